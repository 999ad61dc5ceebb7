//! Event to cue conversion.

use gazecue_common::config::PipelineConfig;
use gazecue_model::event::{Cue, GazeEvent};

use crate::subtitles::{generate_srt, generate_vtt};

/// Build one cue per event, in event order.
pub fn build_cues(events: &[GazeEvent], duration_secs: f64, text: &str) -> Vec<Cue> {
    events
        .iter()
        .map(|event| Cue::from_event(event, duration_secs, text))
        .collect()
}

/// Cue duration and label for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CueRenderer {
    pub duration_secs: f64,
    pub text: String,
}

impl CueRenderer {
    pub fn new(duration_secs: f64, text: impl Into<String>) -> Self {
        Self {
            duration_secs,
            text: text.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.cue_duration, config.cue_text.clone())
    }

    pub fn cues(&self, events: &[GazeEvent]) -> Vec<Cue> {
        build_cues(events, self.duration_secs, &self.text)
    }

    pub fn render_vtt(&self, events: &[GazeEvent]) -> String {
        generate_vtt(&self.cues(events))
    }

    pub fn render_srt(&self, events: &[GazeEvent]) -> String {
        generate_srt(&self.cues(events))
    }
}

impl Default for CueRenderer {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_cue_per_event() {
        let events = [GazeEvent::new(5.4, 108), GazeEvent::new(9.0, 180)];
        let cues = build_cues(&events, 2.0, "Lie detection");
        assert_eq!(cues.len(), 2);
        assert!((cues[0].end_secs - 7.4).abs() < 1e-9);
        assert!((cues[1].start_secs - 9.0).abs() < 1e-9);
        assert!(cues.iter().all(|c| c.text == "Lie detection"));
    }

    #[test]
    fn test_default_renderer_uses_pipeline_defaults() {
        let renderer = CueRenderer::default();
        assert_eq!(renderer.text, "Lie detection");
        assert!((renderer.duration_secs - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_render_vtt_single_event() {
        let vtt = CueRenderer::default().render_vtt(&[GazeEvent::new(5.4, 108)]);
        assert_eq!(
            vtt,
            "WEBVTT\n\n1\n00:00:05.400 --> 00:00:07.400\nLie detection\n\n"
        );
    }

    #[test]
    fn test_no_events_renders_header_only() {
        assert_eq!(CueRenderer::default().render_vtt(&[]), "WEBVTT\n\n");
        assert_eq!(CueRenderer::default().render_srt(&[]), "");
    }
}
