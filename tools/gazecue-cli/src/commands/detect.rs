//! Detect gaze events in a landmark trace and write captions.

use std::path::{Path, PathBuf};

use gazecue_captions::{save_captions, CueRenderer};
use gazecue_common::config::AppConfig;
use gazecue_detection::{GazePipeline, TracingObserver};
use gazecue_frame_source::{RecordedLandmarks, TraceSource};

pub fn run(
    config: &AppConfig,
    trace: PathBuf,
    video: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let default_output = match &video {
        Some(video) => config.subtitle_path_for(video)?,
        None => caption_path_for_trace(config, &trace),
    };
    let output = output.unwrap_or(default_output);

    println!("Detecting gaze events in: {}", trace.display());

    let mut pipeline = GazePipeline::new(config.pipeline.clone(), RecordedLandmarks)?
        .with_observer(TracingObserver);
    let outcome = pipeline.run_with(|| TraceSource::open(&trace))?;
    let stats = &outcome.stats;

    println!(
        "  Frames: {} read, {} sampled, {} skipped",
        stats.frames_read,
        stats.frames_sampled,
        stats.frames_skipped()
    );
    println!(
        "  Ready signals: {} ({} debounced)",
        stats.readies, stats.debounced
    );
    println!("  Events: {}", outcome.events.len());
    for event in &outcome.events {
        println!("    frame {:>6}  t={:.3}s", event.frame_index, event.timestamp_secs);
    }

    let cues = CueRenderer::from_config(pipeline.config()).cues(&outcome.events);
    save_captions(&cues, &output)?;
    println!("  Captions saved to: {}", output.display());

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}

/// `<subtitles_dir>/<trace stem>.vtt`
fn caption_path_for_trace(config: &AppConfig, trace: &Path) -> PathBuf {
    let stem = trace
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "captions".to_string());
    config.subtitles_dir.join(format!("{stem}.vtt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_path_uses_trace_stem() {
        let config = AppConfig {
            subtitles_dir: PathBuf::from("/data/subtitles"),
            ..Default::default()
        };
        assert_eq!(
            caption_path_for_trace(&config, Path::new("/traces/talk.jsonl")),
            PathBuf::from("/data/subtitles/talk.vtt")
        );
    }
}
