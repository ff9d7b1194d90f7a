use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::load_split_config;
use crate::timecode::{parse_optional_time, parse_time};
use crate::types::SplitConfig;

#[derive(Parser, Debug)]
#[command(
    name = "semclip",
    version,
    about = "Cut a long video into clips at sentence ends and pauses, with per-clip subtitles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Transcribe (or read) a video's speech, cut it into clips and subtitle each clip.
    Split(SplitArgs),
    /// Print the clip ranges chosen for an existing SRT transcript as JSON.
    Plan(PlanArgs),
    /// Print the part of an SRT transcript that falls in a time window, re-timed to zero.
    Window(WindowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SplitConfigArgs {
    /// Number of clips to produce.
    #[arg(long)]
    pub clips: Option<usize>,
    /// Minimum clip length in seconds (the final clip may be shorter).
    #[arg(long = "min-duration", value_name = "SECONDS")]
    pub min_duration: Option<f64>,
    /// Maximum clip length in seconds.
    #[arg(long = "max-duration", value_name = "SECONDS")]
    pub max_duration: Option<f64>,
    /// Gaps longer than this many seconds count as pauses.
    #[arg(long = "min-pause", value_name = "SECONDS")]
    pub min_pause: Option<f64>,
    /// JSON file with split settings; explicit flags override it.
    #[arg(long, value_name = "PATH", conflicts_with = "config_json")]
    pub config: Option<PathBuf>,
    /// Inline JSON split settings; explicit flags override it.
    #[arg(long = "config-json", value_name = "JSON", conflicts_with = "config")]
    pub config_json: Option<String>,
}

impl SplitConfigArgs {
    pub fn resolve(&self) -> Result<SplitConfig> {
        let mut config = load_split_config(self.config.as_deref(), self.config_json.as_deref())
            .context("Failed to load split configuration")?;
        if let Some(clips) = self.clips {
            config.clip_count = clips;
        }
        if let Some(min) = self.min_duration {
            config.min_clip_duration = min;
        }
        if let Some(max) = self.max_duration {
            config.max_clip_duration = max;
        }
        if let Some(pause) = self.min_pause {
            config.min_pause_duration = pause;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Source video file.
    #[arg(value_name = "VIDEO")]
    pub video: PathBuf,
    /// Directory receiving clips, subtitle files and clips.json.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub split: SplitConfigArgs,
    /// Use this SRT transcript instead of running speech recognition.
    #[arg(long, value_name = "SRT")]
    pub transcript: Option<PathBuf>,
    /// Override the video duration (seconds or HH:MM:SS.mmm).
    #[arg(long, value_name = "TIME")]
    pub duration: Option<String>,
    /// Whisper model file (defaults to $WHISPER_MODEL_PATH, then ./models/ggml-base.bin).
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,
    /// Spoken language code passed to whisper; detected when omitted.
    #[arg(long)]
    pub language: Option<String>,
    /// Keep only the plain clips; do not render subtitles into the picture.
    #[arg(long = "no-burn-in")]
    pub no_burn_in: bool,
    /// Write subtitle files and the manifest without calling ffmpeg.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
    /// ffmpeg executable.
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,
    /// ffprobe executable.
    #[arg(long, default_value = "ffprobe")]
    pub ffprobe: PathBuf,
}

impl SplitArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.video.is_file() || self.dry_run,
            "Input video does not exist: {:?}",
            self.video
        );
        ensure!(
            !self.output_dir.exists() || self.output_dir.is_dir(),
            "Output path must be a directory: {:?}",
            self.output_dir
        );
        if let Some(transcript) = &self.transcript {
            ensure!(
                transcript.is_file(),
                "Transcript file does not exist: {:?}",
                transcript
            );
        }
        ensure!(
            !self.dry_run || self.transcript.is_some() || self.video.is_file(),
            "A dry run needs either the video or --transcript"
        );
        Ok(())
    }

    pub fn duration(&self) -> Result<Option<f64>> {
        positive(parse_optional_time(self.duration.as_deref(), "duration")?)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// SRT transcript of the whole video.
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: PathBuf,
    /// Total video duration; defaults to the end of the last cue.
    #[arg(long, value_name = "TIME")]
    pub duration: Option<String>,
    #[command(flatten)]
    pub split: SplitConfigArgs,
}

impl PlanArgs {
    pub fn duration(&self) -> Result<Option<f64>> {
        positive(parse_optional_time(self.duration.as_deref(), "duration")?)
    }
}

#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// SRT transcript of the whole video.
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: PathBuf,
    /// Window start (seconds or HH:MM:SS.mmm), inclusive.
    #[arg(long, value_name = "TIME")]
    pub start: String,
    /// Window end (seconds or HH:MM:SS.mmm), exclusive.
    #[arg(long, value_name = "TIME")]
    pub end: String,
}

impl WindowArgs {
    pub fn range(&self) -> Result<(f64, f64)> {
        let start = parse_time(&self.start, "start")?;
        let end = parse_time(&self.end, "end")?;
        ensure!(end > start, "End time must be greater than start time");
        Ok((start, end))
    }
}

fn positive(value: Option<f64>) -> Result<Option<f64>> {
    if let Some(seconds) = value {
        ensure!(seconds > 0.0, "Duration must be positive");
    }
    Ok(value)
}
