//! GazeCue Detection Core
//!
//! Turns a stream of frames into a sparse list of gaze events:
//! - **Sampling:** Forward every Nth frame by index
//! - **Estimation:** Derive a normalized gaze vector from eye landmarks
//! - **Smoothing:** Average the gaze vector over a bounded window
//! - **Classification:** Threshold the smoothed vector per axis
//! - **Confidence:** Require a run of consecutive candidate frames
//! - **Debounce:** Enforce a minimum spacing between accepted events
//!
//! Every stateful stage is a small value with a pure transition
//! `(state, input) -> (state, output)`; [`pipeline::GazePipeline`] threads
//! them together in frame order. The crate does no I/O of its own: frames
//! arrive through [`source::FrameSource`] and landmarks through
//! [`source::LandmarkProvider`].

pub mod classifier;
pub mod debounce;
pub mod emitter;
pub mod error;
pub mod estimator;
pub mod observer;
pub mod pipeline;
pub mod sampler;
pub mod smoothing;
pub mod source;

pub use classifier::{ConfidenceAccumulator, ThresholdClassifier};
pub use debounce::DebounceGate;
pub use error::FrameFault;
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};
pub use pipeline::{DetectionOutcome, DetectionRun, FrameOutcome, GazePipeline, RunStats};
pub use smoothing::SmoothingBuffer;
pub use source::{FrameSource, LandmarkProvider, SourceGuard, VecSource};
