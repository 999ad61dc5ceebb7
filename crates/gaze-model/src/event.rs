//! Gaze samples, detected gaze events, and caption cues.

use serde::{Deserialize, Serialize};

use crate::frame::FrameIndex;

/// A per-frame normalized gaze vector derived from eye geometry.
///
/// `x` is the iris offset from the inner eye corner as a fraction of eye
/// width; `y` is the iris offset from the top lid as a fraction of eye height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GazeSample {
    pub x: f64,
    pub y: f64,
}

impl GazeSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An accepted gaze event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeEvent {
    /// Timeline position of the frame that completed the detection (seconds).
    #[serde(rename = "t")]
    pub timestamp_secs: f64,

    /// Index of that frame in the decoded stream.
    #[serde(rename = "frame")]
    pub frame_index: FrameIndex,
}

impl GazeEvent {
    pub fn new(timestamp_secs: f64, frame_index: FrameIndex) -> Self {
        Self {
            timestamp_secs,
            frame_index,
        }
    }
}

/// A timed caption entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time (seconds).
    pub start_secs: f64,
    /// End time (seconds).
    pub end_secs: f64,
    /// Caption text, a single line.
    pub text: String,
}

impl Cue {
    /// Cue starting at the event and lasting `duration_secs`.
    pub fn from_event(event: &GazeEvent, duration_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs: event.timestamp_secs,
            end_secs: event.timestamp_secs + duration_secs,
            text: text.into(),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Whether events are ordered and spaced at least `min_gap_secs` apart.
pub fn events_respect_spacing(events: &[GazeEvent], min_gap_secs: f64) -> bool {
    events
        .windows(2)
        .all(|pair| pair[1].timestamp_secs - pair[0].timestamp_secs >= min_gap_secs)
}
