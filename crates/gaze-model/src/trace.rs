//! Landmark traces: JSONL recordings of what the landmark model saw.
//!
//! The first line is a header prefixed with `# `. Every following
//! non-empty line that does not start with `#` is one decoded frame:
//!
//! ```text
//! # {"schema_version":"1.0","fps":20.0,"source":"talk.mp4","recorded_at":"2026-01-01T00:00:00Z"}
//! {"i":0,"t":0.0,"faces":[{"iris_center":{"x":0.52,"y":0.47},...}]}
//! {"i":1,"t":0.05,"faces":[]}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameIndex};
use crate::landmark::LandmarkSet;

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Metadata written as the first line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Nominal frame rate of the source video.
    pub fps: f64,

    /// File name of the video the trace was recorded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Wall-clock time the trace was written.
    pub recorded_at: DateTime<Utc>,
}

impl TraceHeader {
    pub fn new(fps: f64, source: Option<String>) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            fps,
            source,
            recorded_at: Utc::now(),
        }
    }
}

/// One decoded frame and the landmark sets found in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    #[serde(rename = "i")]
    pub index: FrameIndex,

    #[serde(rename = "t")]
    pub timeline_secs: f64,

    /// One entry per detected face; empty when nothing was detected.
    #[serde(default)]
    pub faces: Vec<LandmarkSet>,
}

impl TraceFrame {
    pub fn into_frame(self) -> Frame<Vec<LandmarkSet>> {
        Frame::new(self.index, self.timeline_secs, self.faces)
    }
}

impl From<Frame<Vec<LandmarkSet>>> for TraceFrame {
    fn from(frame: Frame<Vec<LandmarkSet>>) -> Self {
        Self {
            index: frame.index,
            timeline_secs: frame.timeline_secs,
            faces: frame.payload,
        }
    }
}

/// A fully loaded trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    pub frames: Vec<TraceFrame>,
}

/// Errors raised while reading trace content.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("trace is missing its '# {{...}}' header line")]
    MissingHeader,

    #[error("invalid trace header: {0}")]
    Header(#[source] serde_json::Error),

    #[error("invalid frame record on line {line}: {source}")]
    Frame {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a header line (with or without the leading `#`).
pub fn parse_header_line(line: &str) -> Result<TraceHeader, TraceError> {
    let body = line.trim().strip_prefix('#').ok_or(TraceError::MissingHeader)?;
    serde_json::from_str(body.trim()).map_err(TraceError::Header)
}

/// Parse one frame record. `line_number` is 1-based and only used for errors.
pub fn parse_frame_line(line: &str, line_number: usize) -> Result<TraceFrame, TraceError> {
    serde_json::from_str(line.trim()).map_err(|source| TraceError::Frame {
        line: line_number,
        source,
    })
}

/// Parse a complete trace from JSONL content.
pub fn parse_trace(content: &str) -> Result<Trace, TraceError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let header = match lines.next() {
        Some((_, line)) => parse_header_line(line)?,
        None => return Err(TraceError::MissingHeader),
    };

    let frames = lines
        .filter(|(_, line)| !line.starts_with('#'))
        .map(|(number, line)| parse_frame_line(line, number))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trace { header, frames })
}

/// Render the header as a `# ` comment line (without trailing newline).
pub fn header_line(header: &TraceHeader) -> Result<String, serde_json::Error> {
    Ok(format!("# {}", serde_json::to_string(header)?))
}

/// Serialize a trace to JSONL content.
pub fn serialize_trace(trace: &Trace) -> Result<String, serde_json::Error> {
    let mut output = header_line(&trace.header)?;
    output.push('\n');
    for frame in &trace.frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

impl Trace {
    /// Report structural problems a detection run would silently absorb.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(self.header.fps.is_finite() && self.header.fps > 0.0) {
            issues.push(format!("header fps {} is not a positive rate", self.header.fps));
        }

        for pair in self.frames.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.index <= prev.index {
                issues.push(format!(
                    "frame index {} follows {} (indices must increase)",
                    next.index, prev.index
                ));
            }
            if next.timeline_secs < prev.timeline_secs {
                issues.push(format!(
                    "frame {} at {:.3}s precedes frame {} at {:.3}s",
                    next.index, next.timeline_secs, prev.index, prev.timeline_secs
                ));
            }
        }

        for frame in &self.frames {
            for (face_idx, face) in frame.faces.iter().enumerate() {
                let outside = face.out_of_frame();
                if !outside.is_empty() {
                    let names: Vec<&str> = outside.iter().map(|lm| lm.as_str()).collect();
                    issues.push(format!(
                        "frame {} face {}: landmarks outside [0, 1]: {}",
                        frame.index,
                        face_idx,
                        names.join(", ")
                    ));
                }
            }
        }

        issues
    }

    /// Number of frames with at least one detected face.
    pub fn frames_with_faces(&self) -> usize {
        self.frames.iter().filter(|f| !f.faces.is_empty()).count()
    }

    /// Timeline length covered by the trace (seconds).
    pub fn duration_secs(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timeline_secs - first.timeline_secs,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Point2D;

    fn sample_trace() -> Trace {
        Trace {
            header: TraceHeader::new(20.0, Some("talk.mp4".to_string())),
            frames: vec![
                TraceFrame {
                    index: 0,
                    timeline_secs: 0.0,
                    faces: vec![LandmarkSet::for_gaze(0.6, 0.2)],
                },
                TraceFrame {
                    index: 1,
                    timeline_secs: 0.05,
                    faces: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_trace_roundtrip() {
        let trace = sample_trace();
        let jsonl = serialize_trace(&trace).unwrap();
        assert!(jsonl.starts_with("# {\"schema_version\":\"1.0\""));

        let parsed = parse_trace(&jsonl).unwrap();
        assert_eq!(parsed, trace);
        assert_eq!(parsed.frames_with_faces(), 1);
    }

    #[test]
    fn test_landmark_coordinates_survive_roundtrip() {
        for value in [0.47, 0.52, 0.35, 0.1 + 0.2, 0.5200000000000001] {
            let line = serde_json::to_string(&Point2D::new(value, value)).unwrap();
            let parsed: Point2D = serde_json::from_str(&line).unwrap();
            assert_eq!(parsed.x.to_bits(), value.to_bits(), "{line}");
        }
    }

    #[test]
    fn test_frame_record_format() {
        let frame = TraceFrame {
            index: 3,
            timeline_secs: 0.15,
            faces: vec![],
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"i":3,"t":0.15,"faces":[]}"#);

        let parsed = parse_frame_line(r#"{"i":4,"t":0.2}"#, 1).unwrap();
        assert!(parsed.faces.is_empty());
    }

    #[test]
    fn test_missing_header_rejected() {
        let err = parse_trace("{\"i\":0,\"t\":0.0,\"faces\":[]}\n").unwrap_err();
        assert!(matches!(err, TraceError::MissingHeader));
        assert!(matches!(parse_trace("\n\n"), Err(TraceError::MissingHeader)));
    }

    #[test]
    fn test_bad_frame_reports_line_number() {
        let content = "# {\"schema_version\":\"1.0\",\"fps\":30.0,\"recorded_at\":\"2026-01-01T00:00:00Z\"}\n\
                       {\"i\":0,\"t\":0.0,\"faces\":[]}\n\
                       \n\
                       {\"i\":1,\"t\":oops}\n";
        match parse_trace(content) {
            Err(TraceError::Frame { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected frame error, got {other:?}"),
        }
    }

    #[test]
    fn test_comment_lines_skipped() {
        let content = "# {\"schema_version\":\"1.0\",\"fps\":30.0,\"recorded_at\":\"2026-01-01T00:00:00Z\"}\n\
                       # model: face_mesh refine_landmarks=true\n\
                       {\"i\":0,\"t\":0.0,\"faces\":[]}\n";
        let trace = parse_trace(content).unwrap();
        assert_eq!(trace.frames.len(), 1);
        assert_eq!(trace.header.source, None);
    }

    #[test]
    fn test_validate_flags_problems() {
        let mut trace = sample_trace();
        assert!(trace.validate().is_empty());

        trace.frames.push(TraceFrame {
            index: 1,
            timeline_secs: 0.01,
            faces: vec![LandmarkSet::for_gaze(4.0, 0.2)],
        });
        let issues = trace.validate();
        assert_eq!(issues.len(), 3, "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("indices must increase")));
        assert!(issues.iter().any(|i| i.contains("iris_center")));
    }

    #[test]
    fn test_duration() {
        let trace = sample_trace();
        assert!((trace.duration_secs() - 0.05).abs() < 1e-12);
    }
}
