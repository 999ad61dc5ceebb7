//! Landmark provider for frames that already carry their landmarks.

use gazecue_detection::LandmarkProvider;
use gazecue_model::landmark::LandmarkSet;

/// Returns the landmark sets stored in the frame payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedLandmarks;

impl LandmarkProvider<Vec<LandmarkSet>> for RecordedLandmarks {
    fn landmarks(&self, payload: &Vec<LandmarkSet>) -> Vec<LandmarkSet> {
        payload.clone()
    }
}
