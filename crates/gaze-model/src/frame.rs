//! Frames as delivered by a frame source.

/// Zero-based position of a frame in the decoded stream.
pub type FrameIndex = u64;

/// A single decoded frame.
///
/// The payload is whatever the landmark provider needs (pixels, a recorded
/// landmark list, ...). The pipeline only reads `index` and `timeline_secs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<P> {
    /// Position in the decoded stream, counting every frame.
    pub index: FrameIndex,

    /// Presentation time on the video timeline (seconds).
    pub timeline_secs: f64,

    /// Opaque payload handed to the landmark provider.
    pub payload: P,
}

impl<P> Frame<P> {
    pub fn new(index: FrameIndex, timeline_secs: f64, payload: P) -> Self {
        Self {
            index,
            timeline_secs,
            payload,
        }
    }

    /// Replace the payload, keeping index and timestamp.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Frame<Q> {
        Frame {
            index: self.index,
            timeline_secs: self.timeline_secs,
            payload: f(self.payload),
        }
    }
}
