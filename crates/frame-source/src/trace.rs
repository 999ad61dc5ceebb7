//! Streaming reader for landmark traces.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use gazecue_common::error::{GazecueError, GazecueResult};
use gazecue_detection::FrameSource;
use gazecue_model::frame::{Frame, FrameIndex};
use gazecue_model::landmark::LandmarkSet;
use gazecue_model::trace::{parse_frame_line, parse_header_line, TraceError, TraceHeader};

/// Reads a trace one frame at a time.
///
/// The header is parsed when the source is opened; a trace without a valid
/// header is reported as [`GazecueError::SourceUnavailable`]. Frame records
/// are parsed lazily, so a malformed record surfaces from
/// [`FrameSource::next_frame`] when it is reached.
pub struct TraceSource<R = BufReader<File>> {
    reader: Option<R>,
    header: TraceHeader,
    name: String,
    line_number: usize,
    last_index: Option<FrameIndex>,
    frames_read: u64,
}

impl TraceSource {
    pub fn open(path: &Path) -> GazecueResult<Self> {
        let file = File::open(path).map_err(|e| {
            GazecueError::source_unavailable(format!("{}: {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(BufReader::new(file), name)
    }
}

impl<R: BufRead> TraceSource<R> {
    pub fn from_reader(mut reader: R, name: impl Into<String>) -> GazecueResult<Self> {
        let name = name.into();
        let unavailable = |msg: String| GazecueError::source_unavailable(format!("{name}: {msg}"));

        let mut line_number = 0;
        let mut line = String::new();
        let header = loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| unavailable(e.to_string()))?;
            if read == 0 {
                return Err(unavailable(TraceError::MissingHeader.to_string()));
            }
            line_number += 1;
            if !line.trim().is_empty() {
                break parse_header_line(&line).map_err(|e| unavailable(e.to_string()))?;
            }
        };

        tracing::debug!(
            trace = %name,
            fps = header.fps,
            schema = %header.schema_version,
            "Trace opened"
        );

        Ok(Self {
            reader: Some(reader),
            header,
            name,
            line_number,
            last_index: None,
            frames_read: 0,
        })
    }

    pub fn header(&self) -> &TraceHeader {
        &self.header
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: BufRead> FrameSource for TraceSource<R> {
    type Payload = Vec<LandmarkSet>;

    fn next_frame(&mut self) -> GazecueResult<Option<Frame<Vec<LandmarkSet>>>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line).map_err(|e| {
                GazecueError::trace(format!(
                    "{}: line {}: {e}",
                    self.name,
                    self.line_number + 1
                ))
            })?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let record = line.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }

            let frame = parse_frame_line(record, self.line_number)
                .map_err(|e| GazecueError::trace(format!("{}: {e}", self.name)))?;
            if let Some(last) = self.last_index {
                if frame.index <= last {
                    return Err(GazecueError::trace(format!(
                        "{}: line {}: frame index {} follows {}",
                        self.name, self.line_number, frame.index, last
                    )));
                }
            }
            self.last_index = Some(frame.index);
            self.frames_read += 1;
            return Ok(Some(frame.into_frame()));
        }
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(trace = %self.name, frames = self.frames_read, "Trace closed");
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
