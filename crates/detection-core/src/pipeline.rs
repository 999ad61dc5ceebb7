//! The gaze detection pipeline.
//!
//! # Per-frame flow
//!
//! 1. **Sample:** frames whose index is not a multiple of `frame_skip` are
//!    ignored before the landmark provider is consulted.
//! 2. **Estimate:** the first detected face yields a gaze vector.
//! 3. **Smooth:** the vector joins the bounded history; its mean is used.
//! 4. **Classify:** the mean is compared against the axis thresholds.
//! 5. **Accumulate:** a run of candidate frames fires a ready signal.
//! 6. **Debounce:** ready signals too close to the last event are dropped.
//! 7. **Emit:** accepted signals become events, in frame order.
//!
//! Frames dropped at step 2 or 3 neither extend nor break the candidate run.

use serde::Serialize;

use gazecue_common::config::PipelineConfig;
use gazecue_common::error::{GazecueError, GazecueResult};
use gazecue_model::event::{GazeEvent, GazeSample};
use gazecue_model::frame::{Frame, FrameIndex};
use gazecue_model::landmark::LandmarkSet;

use crate::classifier::{ConfidenceAccumulator, ThresholdClassifier};
use crate::debounce::{DebounceGate, GateDecision};
use crate::emitter::EventEmitter;
use crate::error::FrameFault;
use crate::estimator::estimate_gaze;
use crate::observer::{NoopObserver, PipelineObserver};
use crate::sampler::FrameSampler;
use crate::smoothing::SmoothingBuffer;
use crate::source::{FrameSource, LandmarkProvider, SourceGuard};

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Frames pulled from the source.
    pub frames_read: u64,
    /// Frames forwarded by the sampler.
    pub frames_sampled: u64,
    /// Sampled frames with no detected face.
    pub no_landmarks: u64,
    /// Sampled frames with zero eye width or height.
    pub degenerate_geometry: u64,
    /// Sampled frames that reached an empty smoothing buffer.
    pub insufficient_data: u64,
    /// Frames that reached the threshold classifier.
    pub frames_classified: u64,
    /// Classified frames that passed both thresholds.
    pub candidate_frames: u64,
    /// Ready signals fired by the confidence accumulator.
    pub readies: u64,
    /// Ready signals dropped by the debounce gate.
    pub debounced: u64,
    /// Events accepted.
    pub events: u64,
}

impl RunStats {
    pub fn frames_skipped(&self) -> u64 {
        self.no_landmarks + self.degenerate_geometry + self.insufficient_data
    }

    fn record_fault(&mut self, fault: FrameFault) {
        match fault {
            FrameFault::NoLandmarksDetected => self.no_landmarks += 1,
            FrameFault::DegenerateGeometry => self.degenerate_geometry += 1,
            FrameFault::InsufficientSmoothingData => self.insufficient_data += 1,
        }
    }
}

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Not forwarded by the sampler.
    NotSampled,
    /// Forwarded but dropped before classification.
    Skipped(FrameFault),
    /// Classified; no ready signal fired.
    Classified { smoothed: GazeSample, candidate: bool },
    /// A ready signal fired but fell inside the debounce window.
    Debounced { smoothed: GazeSample, since_last_secs: f64 },
    /// A ready signal fired and was accepted.
    Emitted(GazeEvent),
}

/// The finalized result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionOutcome {
    pub events: Vec<GazeEvent>,
    pub stats: RunStats,
}

impl DetectionOutcome {
    pub fn timestamps(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.timestamp_secs).collect()
    }
}

/// State for processing one video, frame by frame.
///
/// Created fresh for every run; nothing carries over between videos.
#[derive(Debug, Clone)]
pub struct DetectionRun {
    sampler: FrameSampler,
    smoothing: SmoothingBuffer,
    classifier: ThresholdClassifier,
    accumulator: ConfidenceAccumulator,
    gate: DebounceGate,
    emitter: EventEmitter,
    stats: RunStats,
}

impl DetectionRun {
    pub fn new(config: &PipelineConfig) -> GazecueResult<Self> {
        config.validate()?;
        Ok(Self {
            sampler: FrameSampler::new(config.frame_skip)?,
            smoothing: SmoothingBuffer::new(config.smoothing_window),
            classifier: ThresholdClassifier::new(config.x_threshold, config.y_threshold),
            accumulator: ConfidenceAccumulator::new(config.confidence_threshold),
            gate: DebounceGate::new(config.debounce_time),
            emitter: EventEmitter::new(),
            stats: RunStats::default(),
        })
    }

    /// Process one frame, asking `provider` for landmarks only if the frame
    /// is sampled.
    pub fn feed<P, L>(
        &mut self,
        frame: &Frame<P>,
        provider: &L,
        observer: &mut dyn PipelineObserver,
    ) -> FrameOutcome
    where
        L: LandmarkProvider<P> + ?Sized,
    {
        if !self.admit(frame.index) {
            return FrameOutcome::NotSampled;
        }
        let faces = provider.landmarks(&frame.payload);
        self.process_sampled(frame.index, frame.timeline_secs, &faces, observer)
    }

    /// Process one frame whose landmarks are already known.
    pub fn feed_landmarks(
        &mut self,
        index: FrameIndex,
        timeline_secs: f64,
        faces: &[LandmarkSet],
        observer: &mut dyn PipelineObserver,
    ) -> FrameOutcome {
        if !self.admit(index) {
            return FrameOutcome::NotSampled;
        }
        self.process_sampled(index, timeline_secs, faces, observer)
    }

    pub fn events(&self) -> &[GazeEvent] {
        self.emitter.events()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Current length of the candidate run.
    pub fn consistent_frames(&self) -> u32 {
        self.accumulator.consistent_frames()
    }

    /// Close the run and hand over the event sequence.
    pub fn finish(self, observer: &mut dyn PipelineObserver) -> DetectionOutcome {
        observer.run_finished(&self.stats);
        DetectionOutcome {
            events: self.emitter.finish(),
            stats: self.stats,
        }
    }

    fn admit(&mut self, index: FrameIndex) -> bool {
        self.stats.frames_read += 1;
        if !self.sampler.should_process(index) {
            return false;
        }
        self.stats.frames_sampled += 1;
        true
    }

    fn smoothed_gaze(&mut self, faces: &[LandmarkSet]) -> Result<GazeSample, FrameFault> {
        // Single-face tracking: extra faces are ignored.
        let face = faces.first().ok_or(FrameFault::NoLandmarksDetected)?;
        let sample = estimate_gaze(face)?;
        self.smoothing.smooth(sample)
    }

    fn process_sampled(
        &mut self,
        index: FrameIndex,
        timeline_secs: f64,
        faces: &[LandmarkSet],
        observer: &mut dyn PipelineObserver,
    ) -> FrameOutcome {
        let smoothed = match self.smoothed_gaze(faces) {
            Ok(smoothed) => smoothed,
            Err(fault) => {
                self.stats.record_fault(fault);
                observer.frame_skipped(index, fault);
                return FrameOutcome::Skipped(fault);
            }
        };

        let candidate = self.classifier.is_candidate(smoothed);
        self.stats.frames_classified += 1;
        if candidate {
            self.stats.candidate_frames += 1;
        }
        observer.frame_classified(index, smoothed, candidate);

        if !self.accumulator.observe(candidate) {
            return FrameOutcome::Classified {
                smoothed,
                candidate,
            };
        }
        self.stats.readies += 1;
        observer.ready_fired(index, timeline_secs);

        match self.gate.offer(timeline_secs) {
            GateDecision::Accepted => {
                let event = GazeEvent::new(timeline_secs, index);
                self.emitter.emit(event);
                self.stats.events += 1;
                observer.event_emitted(&event);
                FrameOutcome::Emitted(event)
            }
            GateDecision::Rejected { since_last_secs } => {
                self.stats.debounced += 1;
                observer.ready_debounced(index, timeline_secs, since_last_secs);
                FrameOutcome::Debounced {
                    smoothed,
                    since_last_secs,
                }
            }
        }
    }
}

/// Validated configuration plus the landmark provider and observer.
pub struct GazePipeline<L, O = NoopObserver> {
    config: PipelineConfig,
    provider: L,
    observer: O,
}

impl<L> GazePipeline<L> {
    /// Validate `config` and build a pipeline around `provider`.
    pub fn new(config: PipelineConfig, provider: L) -> GazecueResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            observer: NoopObserver,
        })
    }
}

impl<L, O: PipelineObserver> GazePipeline<L, O> {
    pub fn with_observer<O2: PipelineObserver>(self, observer: O2) -> GazePipeline<L, O2> {
        GazePipeline {
            config: self.config,
            provider: self.provider,
            observer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn provider(&self) -> &L {
        &self.provider
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consume every frame of an already opened source.
    ///
    /// The source is closed before this returns, whether the run completes
    /// or fails.
    pub fn run<S>(&mut self, source: S) -> GazecueResult<DetectionOutcome>
    where
        S: FrameSource,
        L: LandmarkProvider<S::Payload>,
    {
        let mut source = SourceGuard::new(source);
        let mut run = DetectionRun::new(&self.config)?;
        tracing::debug!(source = %source.get_ref().name(), "Detection run started");

        while let Some(frame) = source.next_frame().map_err(into_source_unavailable)? {
            run.feed(&frame, &self.provider, &mut self.observer);
        }

        source.close();
        Ok(run.finish(&mut self.observer))
    }

    /// Open a source and run over it. Opening failures surface as
    /// [`GazecueError::SourceUnavailable`]; nothing is left open.
    pub fn run_with<S, F>(&mut self, open: F) -> GazecueResult<DetectionOutcome>
    where
        F: FnOnce() -> GazecueResult<S>,
        S: FrameSource,
        L: LandmarkProvider<S::Payload>,
    {
        let source = open().map_err(into_source_unavailable)?;
        self.run(source)
    }
}

fn into_source_unavailable(err: GazecueError) -> GazecueError {
    match err {
        err @ GazecueError::SourceUnavailable { .. } => err,
        other => GazecueError::source_unavailable(other.to_string()),
    }
}
