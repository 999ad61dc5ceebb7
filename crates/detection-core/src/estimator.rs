//! Gaze vector estimation from eye landmarks.

use gazecue_model::event::GazeSample;
use gazecue_model::landmark::LandmarkSet;

use crate::error::FrameFault;

/// Estimate the normalized gaze vector for one eye.
///
/// ```text
/// eye_width  = |outer.x - inner.x|
/// eye_height = |bottom.y - top.y|
/// gaze_x = |center.x - inner.x| / eye_width   (mirror-corrected)
/// gaze_y = (center.y - top.y) / eye_height
/// ```
///
/// Only `x` is mirror-corrected; a negative `y` passes through unchanged.
pub fn estimate_gaze(landmarks: &LandmarkSet) -> Result<GazeSample, FrameFault> {
    let center = landmarks.iris_center;
    let inner = landmarks.inner_corner;
    let outer = landmarks.outer_corner;
    let top = landmarks.top_lid;
    let bottom = landmarks.bottom_lid;

    let eye_width = (outer.x - inner.x).abs();
    let eye_height = (bottom.y - top.y).abs();
    if eye_width == 0.0 || eye_height == 0.0 {
        return Err(FrameFault::DegenerateGeometry);
    }

    let mut gaze_x = (center.x - inner.x) / eye_width;
    let gaze_y = (center.y - top.y) / eye_height;

    if gaze_x < 0.0 {
        gaze_x = gaze_x.abs();
    }

    Ok(GazeSample::new(gaze_x, gaze_y))
}
