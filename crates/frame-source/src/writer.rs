//! Append-only trace writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use gazecue_common::error::{GazecueError, GazecueResult};
use gazecue_model::frame::FrameIndex;
use gazecue_model::trace::{header_line, TraceFrame, TraceHeader};

/// Writes frame records to a JSONL trace.
///
/// Frame indices must strictly increase, matching what [`crate::TraceSource`]
/// accepts when the trace is read back.
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    frames_written: u64,
    last_index: Option<FrameIndex>,
}

impl TraceWriter {
    /// Create the trace file, writing the header as the first line.
    pub fn new(path: PathBuf, header: &TraceHeader) -> GazecueResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header = header_line(header)?;
        writeln!(writer, "{header}")
            .map_err(|e| GazecueError::trace(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            frames_written: 0,
            last_index: None,
        })
    }

    pub fn write_frame(&mut self, frame: &TraceFrame) -> GazecueResult<()> {
        if let Some(last) = self.last_index {
            if frame.index <= last {
                return Err(GazecueError::trace(format!(
                    "{}: frame index {} follows {}",
                    self.path.display(),
                    frame.index,
                    last
                )));
            }
        }

        let json = serde_json::to_string(frame)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| GazecueError::trace(format!("Failed to write frame: {e}")))?;
        self.last_index = Some(frame.index);
        self.frames_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> GazecueResult<()> {
        self.writer
            .flush()
            .map_err(|e| GazecueError::trace(format!("Failed to flush trace: {e}")))?;
        Ok(())
    }

    /// Flush and close the trace, returning the number of frames written.
    ///
    /// Prefer this over dropping the writer: `Drop` cannot report a failed flush.
    pub fn finish(mut self) -> GazecueResult<u64> {
        self.flush()?;
        Ok(self.frames_written)
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
