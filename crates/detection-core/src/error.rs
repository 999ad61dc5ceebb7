//! Per-frame faults.
//!
//! None of these abort a run. The pipeline drops the frame, counts the fault
//! and moves on; the frame is simply absent from what later stages see.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum FrameFault {
    /// The landmark provider found no face in the frame.
    #[error("no landmarks detected")]
    NoLandmarksDetected,

    /// The eye box has zero width or zero height.
    #[error("degenerate eye geometry (zero width or height)")]
    DegenerateGeometry,

    /// The smoothing buffer was asked for a mean before any sample arrived.
    #[error("insufficient smoothing data")]
    InsufficientSmoothingData,
}

impl FrameFault {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameFault::NoLandmarksDetected => "no_landmarks_detected",
            FrameFault::DegenerateGeometry => "degenerate_geometry",
            FrameFault::InsufficientSmoothingData => "insufficient_smoothing_data",
        }
    }
}
