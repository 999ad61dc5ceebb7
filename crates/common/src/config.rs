//! Application and pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GazecueError, GazecueResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where caption files are written by default.
    pub subtitles_dir: PathBuf,

    /// Accepted source video extensions (compared case-insensitively).
    pub video_extensions: Vec<String>,

    /// Detection pipeline tuning.
    pub pipeline: PipelineConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tuning knobs for the gaze detection pipeline and cue rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Forward only frames whose index is a multiple of this value.
    pub frame_skip: u64,

    /// Number of recent gaze samples averaged per axis.
    pub smoothing_window: usize,

    /// Smoothed x must be strictly above this to count as a candidate.
    pub x_threshold: f64,

    /// Smoothed y must be strictly below this to count as a candidate.
    pub y_threshold: f64,

    /// Consecutive candidate frames required before an event is considered.
    pub confidence_threshold: u32,

    /// Minimum spacing between accepted events (seconds).
    pub debounce_time: f64,

    /// Length of each rendered cue (seconds).
    pub cue_duration: f64,

    /// Text written on every cue.
    pub cue_text: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "gazecue_detection=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subtitles_dir: default_subtitles_dir(),
            video_extensions: vec!["mp4".to_string(), "avi".to_string(), "mov".to_string()],
            pipeline: PipelineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_skip: 2,
            smoothing_window: 10,
            x_threshold: 0.52,
            y_threshold: 0.35,
            confidence_threshold: 4,
            debounce_time: 1.5,
            cue_duration: 2.0,
            cue_text: "Lie detection".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl PipelineConfig {
    /// Check every numeric bound. Runs before any frame is read.
    pub fn validate(&self) -> GazecueResult<()> {
        if self.frame_skip < 1 {
            return Err(GazecueError::invalid_configuration(
                "frame_skip must be >= 1",
            ));
        }
        if self.smoothing_window < 1 {
            return Err(GazecueError::invalid_configuration(
                "smoothing_window must be >= 1",
            ));
        }
        if self.confidence_threshold < 1 {
            return Err(GazecueError::invalid_configuration(
                "confidence_threshold must be >= 1",
            ));
        }
        if !self.x_threshold.is_finite() || !self.y_threshold.is_finite() {
            return Err(GazecueError::invalid_configuration(format!(
                "thresholds must be finite (x={}, y={})",
                self.x_threshold, self.y_threshold
            )));
        }
        if !self.debounce_time.is_finite() || self.debounce_time < 0.0 {
            return Err(GazecueError::invalid_configuration(format!(
                "debounce_time must be a finite, non-negative number of seconds (got {})",
                self.debounce_time
            )));
        }
        if !self.cue_duration.is_finite() || self.cue_duration <= 0.0 {
            return Err(GazecueError::invalid_configuration(format!(
                "cue_duration must be a finite, positive number of seconds (got {})",
                self.cue_duration
            )));
        }
        // A blank or multi-line label would break the caption block grammar.
        if self.cue_text.trim().is_empty() || self.cue_text.contains('\n') {
            return Err(GazecueError::invalid_configuration(
                "cue_text must be a single non-empty line",
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }

    /// Whether `path` carries one of the accepted video extensions.
    pub fn is_supported_video(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.video_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Caption file location for a source video: `<subtitles_dir>/<stem>.vtt`.
    pub fn subtitle_path_for(&self, video_path: &Path) -> GazecueResult<PathBuf> {
        if !self.is_supported_video(video_path) {
            return Err(GazecueError::UnsupportedVideo {
                path: video_path.to_path_buf(),
            });
        }
        let stem = video_path
            .file_stem()
            .ok_or_else(|| GazecueError::UnsupportedVideo {
                path: video_path.to_path_buf(),
            })?;
        let mut file_name = stem.to_os_string();
        file_name.push(".vtt");
        Ok(self.subtitles_dir.join(file_name))
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gazecue").join("config.json")
}

/// Default caption output directory.
fn default_subtitles_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("gazecue").join("subtitles")
}
