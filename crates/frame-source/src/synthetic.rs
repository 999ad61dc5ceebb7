//! Scripted gaze streams.

use gazecue_common::clock::FrameClock;
use gazecue_common::error::{GazecueError, GazecueResult};
use gazecue_detection::FrameSource;
use gazecue_model::event::GazeSample;
use gazecue_model::frame::{Frame, FrameIndex};
use gazecue_model::landmark::LandmarkSet;
use gazecue_model::trace::TraceHeader;

/// A gaze held for `hold_frames`, then released to `rest_gaze`.
#[derive(Debug, Clone, PartialEq)]
pub struct GazeScript {
    pub hold_gaze: GazeSample,
    pub hold_frames: u64,
    pub rest_gaze: GazeSample,
    /// Every Nth frame has no detected face.
    pub dropout_every: Option<u64>,
}

impl Default for GazeScript {
    fn default() -> Self {
        Self {
            hold_gaze: GazeSample::new(0.6, 0.2),
            hold_frames: 40,
            rest_gaze: GazeSample::new(0.5, 0.5),
            dropout_every: None,
        }
    }
}

impl GazeScript {
    /// Gaze at `index`, or `None` for a dropout frame.
    pub fn gaze_at(&self, index: FrameIndex) -> Option<GazeSample> {
        if let Some(every) = self.dropout_every {
            if (index + 1) % every == 0 {
                return None;
            }
        }
        Some(if index < self.hold_frames {
            self.hold_gaze
        } else {
            self.rest_gaze
        })
    }
}

/// Generates `frame_count` frames at a fixed rate following a [`GazeScript`].
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    clock: FrameClock,
    frame_count: u64,
    next_index: FrameIndex,
    script: GazeScript,
    closed: bool,
}

impl SyntheticSource {
    pub fn new(fps: f64, frame_count: u64, script: GazeScript) -> GazecueResult<Self> {
        let clock = FrameClock::new(fps).ok_or_else(|| {
            GazecueError::invalid_configuration(format!("fps must be a positive rate (got {fps})"))
        })?;
        if script.dropout_every == Some(0) {
            return Err(GazecueError::invalid_configuration(
                "dropout interval must be >= 1",
            ));
        }
        Ok(Self {
            clock,
            frame_count,
            next_index: 0,
            script,
            closed: false,
        })
    }

    pub fn fps(&self) -> f64 {
        self.clock.fps()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Timeline length of the generated stream (seconds).
    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 * self.clock.frame_duration_secs()
    }

    /// Header for writing this stream out as a trace.
    pub fn trace_header(&self, source: Option<String>) -> TraceHeader {
        TraceHeader::new(self.clock.fps(), source)
    }
}

impl FrameSource for SyntheticSource {
    type Payload = Vec<LandmarkSet>;

    fn next_frame(&mut self) -> GazecueResult<Option<Frame<Vec<LandmarkSet>>>> {
        if self.closed || self.next_index >= self.frame_count {
            return Ok(None);
        }
        let index = self.next_index;
        self.next_index += 1;

        let faces = self
            .script
            .gaze_at(index)
            .map(|g| LandmarkSet::for_gaze(g.x, g.y))
            .into_iter()
            .collect();
        Ok(Some(Frame::new(index, self.clock.timeline_secs(index), faces)))
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_then_rest() {
        let script = GazeScript {
            hold_frames: 2,
            ..Default::default()
        };
        assert_eq!(script.gaze_at(1), Some(GazeSample::new(0.6, 0.2)));
        assert_eq!(script.gaze_at(2), Some(GazeSample::new(0.5, 0.5)));
    }

    #[test]
    fn test_dropouts() {
        let script = GazeScript {
            dropout_every: Some(3),
            ..Default::default()
        };
        let missing: Vec<u64> = (0..9).filter(|i| script.gaze_at(*i).is_none()).collect();
        assert_eq!(missing, vec![2, 5, 8]);
    }

    #[test]
    fn test_generates_timed_frames() {
        let mut source = SyntheticSource::new(20.0, 3, GazeScript::default()).unwrap();
        assert!((source.duration_secs() - 0.15).abs() < 1e-12);

        let mut frames = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            frames.push(frame);
        }
        assert_eq!(frames.len(), 3);
        assert!((frames[2].timeline_secs - 0.1).abs() < 1e-12);
        assert_eq!(frames[0].payload.len(), 1);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(SyntheticSource::new(0.0, 10, GazeScript::default()).is_err());
        let script = GazeScript {
            dropout_every: Some(0),
            ..Default::default()
        };
        assert!(SyntheticSource::new(30.0, 10, script).is_err());
    }
}
