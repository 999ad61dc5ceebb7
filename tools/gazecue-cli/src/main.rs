//! GazeCue CLI: command-line interface for gaze event detection.
//!
//! Usage:
//!   gazecue detect <TRACE>      Detect gaze events and write captions
//!   gazecue synth <OUTPUT>      Write a synthetic landmark trace
//!   gazecue validate <TRACE>    Validate a landmark trace
//!   gazecue info <CAPTIONS>     Show the cues in a caption file
//!   gazecue config              Show (or write) the effective configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gazecue_common::config::{AppConfig, PipelineConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "gazecue",
    about = "Detect sustained gaze shifts in video landmark traces and caption them",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run gaze detection over a landmark trace and write captions
    Detect {
        /// Path to the landmark trace (JSONL)
        trace: PathBuf,

        /// Source video file name; names the caption file after it
        #[arg(long)]
        video: Option<PathBuf>,

        /// Caption output path (.vtt or .srt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print events and run statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: PipelineOverrides,
    },

    /// Write a synthetic landmark trace
    Synth {
        /// Output trace path
        output: PathBuf,

        /// Frame rate of the synthetic video
        #[arg(long, default_value = "20.0")]
        fps: f64,

        /// Number of frames to generate
        #[arg(long, default_value = "200")]
        frames: u64,

        /// Horizontal gaze while held
        #[arg(long, default_value = "0.6")]
        gaze_x: f64,

        /// Vertical gaze while held
        #[arg(long, default_value = "0.2")]
        gaze_y: f64,

        /// Number of leading frames holding the gaze
        #[arg(long, default_value = "40")]
        hold_frames: u64,

        /// Drop the face from every Nth frame
        #[arg(long)]
        dropout_every: Option<u64>,

        /// Video file name recorded in the trace header
        #[arg(long)]
        source: Option<String>,
    },

    /// Validate a landmark trace
    Validate {
        /// Path to the landmark trace (JSONL)
        trace: PathBuf,
    },

    /// Show the cues in a caption file
    Info {
        /// Path to a .vtt or .srt file
        captions: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        write: bool,
    },
}

/// Command-line overrides for [`PipelineConfig`].
#[derive(Args, Debug, Default)]
struct PipelineOverrides {
    /// Process every Nth frame
    #[arg(long)]
    frame_skip: Option<u64>,

    /// Number of gaze samples averaged
    #[arg(long)]
    smoothing_window: Option<usize>,

    /// Horizontal gaze threshold (exclusive lower bound)
    #[arg(long)]
    x_threshold: Option<f64>,

    /// Vertical gaze threshold (exclusive upper bound)
    #[arg(long)]
    y_threshold: Option<f64>,

    /// Consecutive candidate frames required
    #[arg(long)]
    confidence_threshold: Option<u32>,

    /// Minimum spacing between events (seconds)
    #[arg(long)]
    debounce_time: Option<f64>,

    /// Cue length (seconds)
    #[arg(long)]
    cue_duration: Option<f64>,

    /// Cue text
    #[arg(long)]
    cue_text: Option<String>,
}

impl PipelineOverrides {
    fn apply(self, config: &mut PipelineConfig) {
        if let Some(v) = self.frame_skip {
            config.frame_skip = v;
        }
        if let Some(v) = self.smoothing_window {
            config.smoothing_window = v;
        }
        if let Some(v) = self.x_threshold {
            config.x_threshold = v;
        }
        if let Some(v) = self.y_threshold {
            config.y_threshold = v;
        }
        if let Some(v) = self.confidence_threshold {
            config.confidence_threshold = v;
        }
        if let Some(v) = self.debounce_time {
            config.debounce_time = v;
        }
        if let Some(v) = self.cue_duration {
            config.cue_duration = v;
        }
        if let Some(v) = self.cue_text {
            config.cue_text = v;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    gazecue_common::logging::init_logging(&logging);
    tracing::debug!(
        config_file = ?cli.config,
        subtitles_dir = %config.subtitles_dir.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Detect {
            trace,
            video,
            output,
            json,
            overrides,
        } => {
            overrides.apply(&mut config.pipeline);
            commands::detect::run(&config, trace, video, output, json)
        }
        Commands::Synth {
            output,
            fps,
            frames,
            gaze_x,
            gaze_y,
            hold_frames,
            dropout_every,
            source,
        } => commands::synth::run(
            output,
            fps,
            frames,
            (gaze_x, gaze_y),
            hold_frames,
            dropout_every,
            source,
        ),
        Commands::Validate { trace } => commands::validate::run(&config, trace),
        Commands::Info { captions } => commands::info::run(captions),
        Commands::Config { write } => commands::config::run(&config, cli.config, write),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_only_given_fields() {
        let mut config = PipelineConfig::default();
        PipelineOverrides {
            frame_skip: Some(1),
            debounce_time: Some(0.5),
            ..Default::default()
        }
        .apply(&mut config);
        assert_eq!(config.frame_skip, 1);
        assert!((config.debounce_time - 0.5).abs() < 1e-12);
        assert_eq!(config.smoothing_window, 10);
        assert_eq!(config.cue_text, "Lie detection");
    }

    #[test]
    fn test_detect_arguments_parse() {
        let cli = Cli::try_parse_from([
            "gazecue",
            "detect",
            "talk.jsonl",
            "--video",
            "talk.mp4",
            "--frame-skip",
            "3",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Detect {
                trace,
                video,
                overrides,
                ..
            } => {
                assert_eq!(trace, PathBuf::from("talk.jsonl"));
                assert_eq!(video, Some(PathBuf::from("talk.mp4")));
                assert_eq!(overrides.frame_skip, Some(3));
            }
            _ => panic!("expected detect"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
