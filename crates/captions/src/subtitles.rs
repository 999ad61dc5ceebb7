//! Caption files in WebVTT and SRT formats.

use std::path::Path;

use gazecue_common::error::{GazecueError, GazecueResult};
use gazecue_model::event::Cue;

/// On-disk caption format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    WebVtt,
    Srt,
}

impl CaptionFormat {
    /// `.srt` selects SRT; every other extension gets WebVTT.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("srt") => Self::Srt,
            _ => Self::WebVtt,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::WebVtt => "vtt",
            Self::Srt => "srt",
        }
    }

    pub fn render(self, cues: &[Cue]) -> String {
        match self {
            Self::WebVtt => generate_vtt(cues),
            Self::Srt => generate_srt(cues),
        }
    }
}

/// Generate SRT subtitle content from cues.
pub fn generate_srt(cues: &[Cue]) -> String {
    let mut output = String::new();

    for (i, cue) in cues.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_time(cue.start_secs),
            format_srt_time(cue.end_secs),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// Generate WebVTT subtitle content from cues.
///
/// Each cue carries its 1-based sequence number as the cue identifier.
pub fn generate_vtt(cues: &[Cue]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for (i, cue) in cues.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_time(cue.start_secs),
            format_vtt_time(cue.end_secs),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// Whole milliseconds in `secs`, truncated.
///
/// The tolerance absorbs binary representation error: 2.3 s is stored as
/// 2.2999… and must still print as `.300`.
fn truncated_millis(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0 + 1e-6) as u64
}

fn split_millis(secs: f64) -> (u64, u64, u64, u64) {
    let total_ms = truncated_millis(secs);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    (hours, minutes, seconds, millis)
}

/// Format seconds as SRT timestamp: HH:MM:SS,mmm
pub fn format_srt_time(secs: f64) -> String {
    let (hours, minutes, seconds, millis) = split_millis(secs);
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
pub fn format_vtt_time(secs: f64) -> String {
    let (hours, minutes, seconds, millis) = split_millis(secs);
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Parse WebVTT content into cues.
///
/// Cue identifiers, cue settings after the end time, and `NOTE`/`STYLE`/
/// `REGION` blocks are accepted and ignored.
pub fn parse_vtt(content: &str) -> GazecueResult<Vec<Cue>> {
    let lines: Vec<(usize, &str)> = content.lines().enumerate().collect();
    match lines.first() {
        Some((_, first)) if first.trim_start_matches('\u{feff}').starts_with("WEBVTT") => {}
        _ => return Err(GazecueError::caption("missing WEBVTT header")),
    }

    // Header metadata runs until the first blank line.
    let body_start = lines
        .iter()
        .position(|(_, l)| l.trim().is_empty())
        .unwrap_or(lines.len());
    parse_blocks(&lines[body_start..], '.')
}

/// Parse SRT content into cues.
pub fn parse_srt(content: &str) -> GazecueResult<Vec<Cue>> {
    let lines: Vec<(usize, &str)> = content
        .trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .collect();
    parse_blocks(&lines, ',')
}

/// Parse either format, detected from the header line.
pub fn parse_captions(content: &str) -> GazecueResult<Vec<Cue>> {
    if content.trim_start_matches('\u{feff}').starts_with("WEBVTT") {
        parse_vtt(content)
    } else {
        parse_srt(content)
    }
}

fn parse_blocks(lines: &[(usize, &str)], millis_separator: char) -> GazecueResult<Vec<Cue>> {
    let mut cues = Vec::new();

    for block in lines
        .split(|(_, l)| l.trim().is_empty())
        .filter(|b| !b.is_empty())
    {
        let (first_line, first) = block[0];
        if ["NOTE", "STYLE", "REGION"]
            .iter()
            .any(|kw| first.starts_with(kw))
        {
            continue;
        }

        let timing_pos = block
            .iter()
            .position(|(_, l)| l.contains("-->"))
            .ok_or_else(|| {
                GazecueError::caption(format!("line {}: cue has no timing line", first_line + 1))
            })?;
        if timing_pos > 1 {
            return Err(GazecueError::caption(format!(
                "line {}: unexpected text before timing line",
                block[1].0 + 1
            )));
        }

        let (line_no, timing) = block[timing_pos];
        let (start_secs, end_secs) = parse_timing(timing, millis_separator)
            .map_err(|msg| GazecueError::caption(format!("line {}: {msg}", line_no + 1)))?;

        let text = block[timing_pos + 1..]
            .iter()
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n");

        cues.push(Cue {
            start_secs,
            end_secs,
            text,
        });
    }

    Ok(cues)
}

fn parse_timing(line: &str, millis_separator: char) -> Result<(f64, f64), String> {
    let (start, rest) = line
        .split_once("-->")
        .ok_or_else(|| "missing '-->'".to_string())?;
    let end = rest
        .split_whitespace()
        .next()
        .ok_or_else(|| "missing end time".to_string())?;

    let start_secs = parse_timestamp(start.trim(), millis_separator)?;
    let end_secs = parse_timestamp(end, millis_separator)?;
    if end_secs < start_secs {
        return Err(format!("cue ends before it starts ({start} --> {end})"));
    }
    Ok((start_secs, end_secs))
}

/// Parse `hh:mm:ss.mmm` or `mm:ss.mmm` (`,` for SRT) into seconds.
fn parse_timestamp(stamp: &str, millis_separator: char) -> Result<f64, String> {
    let invalid = || format!("invalid timestamp '{stamp}'");

    let (clock, millis) = stamp.split_once(millis_separator).ok_or_else(invalid)?;
    if millis.len() != 3 {
        return Err(invalid());
    }
    let millis: u64 = millis.parse().map_err(|_| invalid())?;

    let fields = clock
        .split(':')
        .map(|f| f.parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return Err(invalid()),
    };
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let total_ms = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;
    Ok(total_ms as f64 / 1000.0)
}

/// Save cues to a file, creating parent directories as needed.
///
/// The format follows the extension (see [`CaptionFormat::from_path`]).
pub fn save_captions(cues: &[Cue], path: &Path) -> GazecueResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let format = CaptionFormat::from_path(path);
    std::fs::write(path, format.render(cues))?;
    tracing::info!(
        path = %path.display(),
        cues = cues.len(),
        format = format.extension(),
        "Captions written"
    );
    Ok(())
}

/// Read and parse a caption file.
pub fn load_captions(path: &Path) -> GazecueResult<Vec<Cue>> {
    if !path.exists() {
        return Err(GazecueError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_captions(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cue(start: f64, end: f64, text: &str) -> Cue {
        Cue {
            start_secs: start,
            end_secs: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_srt_generation() {
        let cues = vec![cue(0.0, 2.5, "Hello world"), cue(3.0, 5.0, "This is a test")];

        let srt = generate_srt(&cues);
        assert!(srt.contains("1\n00:00:00,000 --> 00:00:02,500\nHello world"));
        assert!(srt.contains("2\n00:00:03,000 --> 00:00:05,000\nThis is a test"));
    }

    #[test]
    fn test_vtt_generation() {
        let cues = vec![cue(61.5, 63.0, "One minute in"), cue(70.0, 72.0, "Later")];

        let vtt = generate_vtt(&cues);
        assert!(vtt.starts_with("WEBVTT\n\n"));
        assert!(vtt.contains("1\n00:01:01.500 --> 00:01:03.000\nOne minute in\n\n"));
        assert!(vtt.ends_with("2\n00:01:10.000 --> 00:01:12.000\nLater\n\n"));
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(3661.5), "01:01:01,500");
        assert_eq!(format_vtt_time(3661.5), "01:01:01.500");
        assert_eq!(format_vtt_time(5.4), "00:00:05.400");
        assert_eq!(format_vtt_time(7.4), "00:00:07.400");
        assert_eq!(format_vtt_time(0.3 + 2.0), "00:00:02.300");
    }

    #[test]
    fn test_milliseconds_truncated_not_rounded() {
        assert_eq!(format_vtt_time(1.9999), "00:00:01.999");
        assert_eq!(format_vtt_time(0.0005), "00:00:00.000");
        assert_eq!(format_vtt_time(-1.0), "00:00:00.000");
    }

    #[test]
    fn test_parse_vtt_reads_generated_output() {
        let content = "WEBVTT\n\n1\n00:00:05.400 --> 00:00:07.400\nLie detection\n\n";
        let cues = parse_vtt(content).unwrap();
        assert_eq!(cues.len(), 1);
        assert!((cues[0].start_secs - 5.4).abs() < 1e-9);
        assert!((cues[0].end_secs - 7.4).abs() < 1e-9);
        assert_eq!(cues[0].text, "Lie detection");
    }

    #[test]
    fn test_parse_vtt_tolerates_metadata_and_settings() {
        let content = "\u{feff}WEBVTT - gaze\nKind: captions\n\nNOTE written by hand\n\n\
                       00:05.000 --> 00:07.000 align:start\nfirst\nsecond line\n";
        let cues = parse_vtt(content).unwrap();
        assert_eq!(cues.len(), 1);
        assert!((cues[0].start_secs - 5.0).abs() < 1e-9);
        assert_eq!(cues[0].text, "first\nsecond line");
    }

    #[test]
    fn test_parse_vtt_rejects_missing_header() {
        let err = parse_vtt("1\n00:00:01.000 --> 00:00:02.000\nx\n").unwrap_err();
        assert!(err.to_string().contains("WEBVTT"));
    }

    #[test]
    fn test_parse_reports_bad_timestamp_line() {
        let content = "WEBVTT\n\n1\n00:00:01.0 --> 00:00:02.000\nx\n";
        let err = parse_vtt(content).unwrap_err();
        assert!(err.to_string().contains("line 4"), "{err}");
    }

    #[test]
    fn test_parse_rejects_out_of_range_hours() {
        let content = "WEBVTT\n\n1\n18446744073709551:00:00.000 --> 18446744073709551:00:01.000\nx\n";
        let err = parse_vtt(content).unwrap_err();
        assert!(err.to_string().contains("line 4"), "{err}");

        let srt = "1\n18446744073709551:00:00,000 --> 18446744073709551:00:01,000\nx\n";
        assert!(parse_srt(srt).is_err());
    }

    #[test]
    fn test_parse_rejects_reversed_cue() {
        let content = "WEBVTT\n\n00:00:03.000 --> 00:00:02.000\nx\n";
        assert!(parse_vtt(content).is_err());
    }

    #[test]
    fn test_parse_captions_detects_srt() {
        let srt = generate_srt(&[cue(1.25, 3.25, "Lie detection")]);
        let cues = parse_captions(&srt).unwrap();
        assert_eq!(cues.len(), 1);
        assert!((cues[0].start_secs - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(CaptionFormat::from_path(Path::new("a/b.srt")), CaptionFormat::Srt);
        assert_eq!(CaptionFormat::from_path(Path::new("a/b.SRT")), CaptionFormat::Srt);
        assert_eq!(CaptionFormat::from_path(Path::new("a/b.vtt")), CaptionFormat::WebVtt);
        assert_eq!(CaptionFormat::from_path(Path::new("a/b")), CaptionFormat::WebVtt);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("gazecue-captions-{}", std::process::id()));
        let path = dir.join("nested").join("clip.vtt");
        save_captions(&[cue(5.4, 7.4, "Lie detection")], &path).unwrap();

        let cues = load_captions(&path).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Lie detection");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_captions(Path::new("/nonexistent/gazecue/clip.vtt")).unwrap_err();
        assert!(matches!(err, GazecueError::FileNotFound { .. }));
    }

    proptest! {
        #[test]
        fn formatted_time_never_exceeds_input(ms in 0u64..360_000_000, sub in 0.0f64..0.999) {
            let secs = (ms as f64 + sub) / 1000.0;
            let cues = parse_vtt(&generate_vtt(&[cue(secs, secs, "x")])).unwrap();
            let parsed = cues[0].start_secs;
            prop_assert!(parsed <= secs + 1e-6);
            prop_assert!(secs - parsed < 0.001 + 1e-6);
        }
    }
}
