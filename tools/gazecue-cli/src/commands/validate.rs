//! Validate a landmark trace.

use std::path::PathBuf;

use gazecue_common::config::AppConfig;
use gazecue_model::trace::parse_trace;

pub fn run(config: &AppConfig, trace: PathBuf) -> anyhow::Result<()> {
    println!("Validating trace at: {}", trace.display());

    let content = std::fs::read_to_string(&trace)
        .map_err(|e| anyhow::anyhow!("Failed to read trace: {e}"))?;
    let parsed = parse_trace(&content).map_err(|e| anyhow::anyhow!("Failed to parse trace: {e}"))?;

    println!("  Schema: {}", parsed.header.schema_version);
    println!("  FPS: {}", parsed.header.fps);
    if let Some(source) = &parsed.header.source {
        println!("  Source: {source}");
    }
    println!("  Recorded: {}", parsed.header.recorded_at);
    println!("  Frames: {}", parsed.frames.len());
    println!("  Frames with faces: {}", parsed.frames_with_faces());
    println!("  Duration: {:.2}s", parsed.duration_secs());

    let mut issues = parsed.validate();
    if let Err(e) = config.pipeline.validate() {
        issues.push(format!("pipeline configuration: {e}"));
    }

    if issues.is_empty() {
        println!("\nTrace is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Detection results may be unreliable.",
            issues.len()
        );
    }

    Ok(())
}
