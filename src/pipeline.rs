//! End-to-end run: transcript, split plan, then per-clip subtitle and video files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::splitting::select_split_points;
use crate::subtitles::{read_srt_file, window_transcript, write_srt_file};
use crate::transcription::{transcribe_media, TranscriptionOptions};
use crate::types::{ClipRange, SplitConfig, SplitWarning, Transcript};
use crate::video::FfmpegTools;

pub const FULL_SUBTITLES_FILE: &str = "full_subs.srt";
pub const MANIFEST_FILE: &str = "clips.json";

/// Where the full transcript comes from
#[derive(Debug, Clone)]
pub enum TranscriptSource {
    Whisper(TranscriptionOptions),
    SrtFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SplitJob {
    pub video: PathBuf,
    pub output_dir: PathBuf,
    pub config: SplitConfig,
    pub transcript: TranscriptSource,
    /// Overrides the probed video duration
    pub duration: Option<f64>,
    pub burn_in: bool,
    /// Write subtitle files and the manifest only; never call ffmpeg
    pub dry_run: bool,
    pub tools: FfmpegTools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipStatus {
    Planned,
    Extracted,
    Subtitled,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClipEntry {
    /// 1-based, matching the file names
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub segment_count: usize,
    pub subtitle_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitled_file: Option<String>,
    pub status: ClipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub source: PathBuf,
    pub total_duration: f64,
    pub config: SplitConfig,
    pub warnings: Vec<SplitWarning>,
    pub clips: Vec<ClipEntry>,
}

impl Manifest {
    pub fn failed_clips(&self) -> usize {
        self.clips
            .iter()
            .filter(|clip| clip.status == ClipStatus::Failed)
            .count()
    }
}

pub fn run_split(job: &SplitJob) -> Result<Manifest> {
    fs::create_dir_all(&job.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", job.output_dir))?;
    if !job.dry_run {
        job.tools.ensure_available()?;
    }

    let transcript = load_transcript(&job.video, &job.transcript)?;
    info!(segments = transcript.len(), "transcript ready");
    write_srt_file(&transcript, job.output_dir.join(FULL_SUBTITLES_FILE))?;

    let total_duration = match job.duration {
        Some(seconds) => seconds,
        None if job.dry_run => {
            warn!("no duration given for a dry run; using the end of the last segment");
            transcript.speech_end()
        }
        None => job.tools.probe_duration(&job.video)?,
    };
    info!(total_duration, "source duration");

    let plan = select_split_points(&transcript, total_duration, &job.config)
        .context("Failed to select split points")?;
    if plan.is_degenerate() {
        warn!(
            warning = ?plan.warning,
            "too few natural break points; some boundaries were forced by length"
        );
    }
    let mut warnings: Vec<SplitWarning> = plan.warning.into_iter().collect();
    info!(
        boundaries = ?plan.ranges.iter().map(|r| r.end).collect::<Vec<_>>(),
        "split points selected"
    );

    let mut clips = Vec::with_capacity(plan.ranges.len());
    for (i, range) in plan.ranges.iter().enumerate() {
        let index = i + 1;
        let windowed = window_transcript(&transcript, range.start, range.end);
        if windowed.is_empty() {
            warn!(clip = index, "no speech in clip window; writing an empty subtitle file");
            warnings.push(SplitWarning::EmptyWindow { clip_index: index });
        }
        let entry = process_clip(job, index, *range, &windowed)?;
        clips.push(entry);
    }

    let manifest = Manifest {
        source: job.video.clone(),
        total_duration,
        config: job.config,
        warnings,
        clips,
    };
    write_manifest(&manifest, &job.output_dir.join(MANIFEST_FILE))?;
    info!(
        clips = manifest.clips.len(),
        failed = manifest.failed_clips(),
        "split complete"
    );
    Ok(manifest)
}

fn load_transcript(video: &Path, source: &TranscriptSource) -> Result<Transcript> {
    match source {
        TranscriptSource::SrtFile(path) => {
            info!(path = %path.display(), "reading transcript");
            read_srt_file(path)
        }
        TranscriptSource::Whisper(options) => transcribe_media(video, options)
            .with_context(|| format!("Failed to transcribe {}", video.display())),
    }
}

/// Subtitle I/O errors abort the run; ffmpeg failures only mark the clip as failed.
fn process_clip(
    job: &SplitJob,
    index: usize,
    range: ClipRange,
    windowed: &Transcript,
) -> Result<ClipEntry> {
    let subtitle_name = format!("clip_{}.srt", index);
    let subtitle_path = job.output_dir.join(&subtitle_name);
    write_srt_file(windowed, &subtitle_path)?;

    let mut entry = ClipEntry {
        index,
        start: range.start,
        end: range.end,
        duration: range.duration(),
        segment_count: windowed.len(),
        subtitle_file: subtitle_name,
        video_file: None,
        subtitled_file: None,
        status: ClipStatus::Planned,
        error: None,
    };
    if job.dry_run {
        return Ok(entry);
    }

    info!(
        clip = index,
        start = range.start,
        end = range.end,
        "extracting clip"
    );
    let video_name = format!("clip_{}.mp4", index);
    let video_path = job.output_dir.join(&video_name);
    if let Err(err) = job
        .tools
        .extract_clip(&job.video, range.start, range.end, &video_path)
    {
        error!(clip = index, "clip extraction failed: {:#}", err);
        entry.status = ClipStatus::Failed;
        entry.error = Some(format!("{:#}", err));
        return Ok(entry);
    }
    entry.video_file = Some(video_name);
    entry.status = ClipStatus::Extracted;

    if job.burn_in {
        let subtitled_name = format!("clip_{}_subtitled.mp4", index);
        let subtitled_path = job.output_dir.join(&subtitled_name);
        match job.tools.burn_in(&video_path, &subtitle_path, &subtitled_path) {
            Ok(()) => {
                entry.subtitled_file = Some(subtitled_name);
                entry.status = ClipStatus::Subtitled;
            }
            Err(err) => {
                error!(clip = index, "subtitle burn-in failed: {:#}", err);
                entry.status = ClipStatus::Failed;
                entry.error = Some(format!("{:#}", err));
            }
        }
    }
    Ok(entry)
}

fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    fs::write(path, json).with_context(|| format!("Failed to write manifest {:?}", path))
}
