//! Threshold classification and confidence accumulation.
//!
//! The classifier is a stateless predicate on the smoothed gaze vector. The
//! accumulator counts consecutive candidate frames and fires a one-shot
//! ready signal when the count reaches the confidence threshold.

use gazecue_model::event::GazeSample;

/// Per-axis threshold predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdClassifier {
    pub x_threshold: f64,
    pub y_threshold: f64,
}

impl ThresholdClassifier {
    pub fn new(x_threshold: f64, y_threshold: f64) -> Self {
        Self {
            x_threshold,
            y_threshold,
        }
    }

    /// `x > x_threshold && y < y_threshold`. Both comparisons are strict.
    pub fn is_candidate(&self, smoothed: GazeSample) -> bool {
        smoothed.x > self.x_threshold && smoothed.y < self.y_threshold
    }
}

/// Accumulator state: the length of the current candidate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccumulatorState {
    pub consistent_frames: u32,
}

/// What the accumulator produced for one classified frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Still building (or just broke) a candidate run.
    Hold,
    /// The run reached the threshold on this frame.
    Ready,
}

impl AccumulatorState {
    /// Advance by one classified frame.
    ///
    /// Reaching `threshold` yields [`Signal::Ready`] and resets the count to
    /// zero, whatever happens to the signal downstream.
    pub fn transition(self, candidate: bool, threshold: u32) -> (AccumulatorState, Signal) {
        if !candidate {
            return (AccumulatorState::default(), Signal::Hold);
        }

        let consistent_frames = self.consistent_frames.saturating_add(1);
        if consistent_frames >= threshold {
            (AccumulatorState::default(), Signal::Ready)
        } else {
            (AccumulatorState { consistent_frames }, Signal::Hold)
        }
    }
}

/// Stateful wrapper around [`AccumulatorState`].
#[derive(Debug, Clone)]
pub struct ConfidenceAccumulator {
    state: AccumulatorState,
    threshold: u32,
}

impl ConfidenceAccumulator {
    pub fn new(threshold: u32) -> Self {
        Self {
            state: AccumulatorState::default(),
            threshold: threshold.max(1),
        }
    }

    /// Feed one classification; returns true when a ready signal fires.
    pub fn observe(&mut self, candidate: bool) -> bool {
        let (next, signal) = self.state.transition(candidate, self.threshold);
        self.state = next;
        signal == Signal::Ready
    }

    pub fn consistent_frames(&self) -> u32 {
        self.state.consistent_frames
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn reset(&mut self) {
        self.state = AccumulatorState::default();
    }
}
