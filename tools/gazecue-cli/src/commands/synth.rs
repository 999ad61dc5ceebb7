//! Write a synthetic landmark trace.

use std::path::PathBuf;

use gazecue_detection::{FrameSource, SourceGuard};
use gazecue_frame_source::{GazeScript, SyntheticSource, TraceWriter};
use gazecue_model::event::GazeSample;
use gazecue_model::trace::TraceFrame;

pub fn run(
    output: PathBuf,
    fps: f64,
    frames: u64,
    hold_gaze: (f64, f64),
    hold_frames: u64,
    dropout_every: Option<u64>,
    source_name: Option<String>,
) -> anyhow::Result<()> {
    let script = GazeScript {
        hold_gaze: GazeSample::new(hold_gaze.0, hold_gaze.1),
        hold_frames,
        dropout_every,
        ..Default::default()
    };
    let source = SyntheticSource::new(fps, frames, script)?;
    println!(
        "Writing {} synthetic frames ({:.2}s @ {}fps) to: {}",
        source.frame_count(),
        source.duration_secs(),
        source.fps(),
        output.display()
    );

    let mut writer = TraceWriter::new(output, &source.trace_header(source_name))?;
    let mut source = SourceGuard::new(source);
    while let Some(frame) = source.next_frame()? {
        writer.write_frame(&TraceFrame::from(frame))?;
    }
    source.close();
    let frames_written = writer.finish()?;

    println!("  Frames written: {frames_written}");
    println!(
        "  Gaze ({}, {}) held for {} frames",
        hold_gaze.0, hold_gaze.1, hold_frames
    );

    Ok(())
}
