//! Index-based frame subsampling.

use gazecue_common::error::{GazecueError, GazecueResult};
use gazecue_model::frame::FrameIndex;

/// Forwards frames whose index is a multiple of `frame_skip`.
///
/// The decision depends on the index alone, so it cannot drift when frames
/// upstream are dropped or fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSampler {
    frame_skip: u64,
}

impl FrameSampler {
    pub fn new(frame_skip: u64) -> GazecueResult<Self> {
        if frame_skip < 1 {
            return Err(GazecueError::invalid_configuration(
                "frame_skip must be >= 1",
            ));
        }
        Ok(Self { frame_skip })
    }

    pub fn should_process(&self, index: FrameIndex) -> bool {
        index % self.frame_skip == 0
    }

    pub fn frame_skip(&self) -> u64 {
        self.frame_skip
    }
}
