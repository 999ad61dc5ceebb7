//! Show the cues in a caption file.

use std::path::PathBuf;

use gazecue_captions::{format_vtt_time, load_captions};

pub fn run(captions: PathBuf) -> anyhow::Result<()> {
    let cues = load_captions(&captions)?;

    println!("Captions: {}", captions.display());
    println!("  Cues: {}", cues.len());

    if let (Some(first), Some(last)) = (cues.first(), cues.last()) {
        println!(
            "  Span: {} --> {}",
            format_vtt_time(first.start_secs),
            format_vtt_time(last.end_secs)
        );
    }
    println!();

    for (i, cue) in cues.iter().enumerate() {
        println!(
            "  {:>3}. {} --> {}  {}",
            i + 1,
            format_vtt_time(cue.start_secs),
            format_vtt_time(cue.end_secs),
            cue.text.replace('\n', " / ")
        );
    }

    Ok(())
}
