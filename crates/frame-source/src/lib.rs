//! GazeCue Frame Sources
//!
//! Concrete [`FrameSource`](gazecue_detection::FrameSource) implementations
//! for the detection pipeline:
//!
//! - **Trace:** Streams frames out of a recorded landmark trace (JSONL)
//! - **Synthetic:** Generates frames for a scripted gaze, for demos and tests
//!
//! Both yield frames whose payload is the list of landmark sets already
//! detected in them, so they pair with [`RecordedLandmarks`]. Traces are
//! written with [`writer::TraceWriter`] in the same append-only JSONL layout.

pub mod recorded;
pub mod synthetic;
pub mod trace;
pub mod writer;

pub use recorded::RecordedLandmarks;
pub use synthetic::{GazeScript, SyntheticSource};
pub use trace::TraceSource;
pub use writer::TraceWriter;
