//! Frame clock utilities.
//!
//! Frame sources report each frame's position on the video timeline in
//! seconds. Sources that only know a frame index (synthetic streams, traces
//! recorded without timestamps) derive it from a nominal frame rate through
//! [`FrameClock`].

/// Maps frame indices onto the video timeline at a fixed frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    fps: f64,
}

impl FrameClock {
    /// Create a clock for the given frame rate. Returns `None` for
    /// non-positive or non-finite rates.
    pub fn new(fps: f64) -> Option<Self> {
        (fps.is_finite() && fps > 0.0).then_some(Self { fps })
    }

    /// Nominal frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Timeline position of a frame: `index / fps`.
    pub fn timeline_secs(&self, index: u64) -> f64 {
        index as f64 / self.fps
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(&self) -> f64 {
        1.0 / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_rates() {
        assert!(FrameClock::new(0.0).is_none());
        assert!(FrameClock::new(-30.0).is_none());
        assert!(FrameClock::new(f64::INFINITY).is_none());
        assert!(FrameClock::new(29.97).is_some());
    }

    #[test]
    fn test_timeline_secs() {
        let clock = FrameClock::new(20.0).unwrap();
        assert_eq!(clock.timeline_secs(0), 0.0);
        assert!((clock.timeline_secs(6) - 0.3).abs() < 1e-12);
        assert!((clock.timeline_secs(40) - 2.0).abs() < 1e-12);
        assert!((clock.frame_duration_secs() - 0.05).abs() < 1e-12);
    }
}
