//! Observability hook for the detection pipeline.
//!
//! Observers see what the pipeline decided; they cannot influence it.
//! The default observer does nothing.

use gazecue_model::event::{GazeEvent, GazeSample};
use gazecue_model::frame::FrameIndex;

use crate::error::FrameFault;
use crate::pipeline::RunStats;

pub trait PipelineObserver {
    /// A sampled frame was dropped before classification.
    fn frame_skipped(&mut self, _index: FrameIndex, _fault: FrameFault) {}

    /// A frame was classified against the thresholds.
    fn frame_classified(&mut self, _index: FrameIndex, _smoothed: GazeSample, _candidate: bool) {}

    /// The confidence accumulator fired a ready signal.
    fn ready_fired(&mut self, _index: FrameIndex, _timestamp_secs: f64) {}

    /// A ready signal arrived inside the debounce window and was dropped.
    fn ready_debounced(&mut self, _index: FrameIndex, _timestamp_secs: f64, _since_last_secs: f64) {}

    /// An event was accepted.
    fn event_emitted(&mut self, _event: &GazeEvent) {}

    /// The frame source is exhausted.
    fn run_finished(&mut self, _stats: &RunStats) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Forwards pipeline decisions to `tracing` at graded levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn frame_skipped(&mut self, index: FrameIndex, fault: FrameFault) {
        tracing::trace!(frame = index, reason = fault.as_str(), "Frame skipped");
    }

    fn frame_classified(&mut self, index: FrameIndex, smoothed: GazeSample, candidate: bool) {
        tracing::trace!(
            frame = index,
            x = smoothed.x,
            y = smoothed.y,
            candidate,
            "Frame classified"
        );
    }

    fn ready_fired(&mut self, index: FrameIndex, timestamp_secs: f64) {
        tracing::debug!(frame = index, t = timestamp_secs, "Ready signal");
    }

    fn ready_debounced(&mut self, index: FrameIndex, timestamp_secs: f64, since_last_secs: f64) {
        tracing::debug!(
            frame = index,
            t = timestamp_secs,
            since_last = since_last_secs,
            "Ready signal debounced"
        );
    }

    fn event_emitted(&mut self, event: &GazeEvent) {
        tracing::info!(
            frame = event.frame_index,
            t = event.timestamp_secs,
            "Gaze event"
        );
    }

    fn run_finished(&mut self, stats: &RunStats) {
        tracing::info!(
            frames = stats.frames_read,
            sampled = stats.frames_sampled,
            classified = stats.frames_classified,
            skipped = stats.frames_skipped(),
            readies = stats.readies,
            debounced = stats.debounced,
            events = stats.events,
            "Detection run finished"
        );
    }
}
