//! Thin wrappers around the `ffprobe`/`ffmpeg` executables: duration query,
//! clip extraction and subtitle burn-in.

use anyhow::{bail, ensure, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Locations of the ffmpeg tools, overridable for non-standard installs
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for FfmpegTools {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl FfmpegTools {
    /// Fail early when either executable cannot be started
    pub fn ensure_available(&self) -> Result<()> {
        for tool in [&self.ffmpeg, &self.ffprobe] {
            let status = Command::new(tool)
                .arg("-version")
                .output()
                .with_context(|| format!("{} is not installed or not on PATH", tool.display()))?
                .status;
            ensure!(status.success(), "{} -version exited with {}", tool.display(), status);
        }
        Ok(())
    }

    /// Container duration of `video` in seconds
    pub fn probe_duration(&self, video: &Path) -> Result<f64> {
        let mut cmd = Command::new(&self.ffprobe);
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(video);
        let output = run(cmd, "ffprobe duration query")?;
        parse_duration(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("Could not determine duration of {}", video.display()))
    }

    /// Re-encode `[start, end)` of `source` into `output`
    pub fn extract_clip(&self, source: &Path, start: f64, end: f64, output: &Path) -> Result<()> {
        ensure!(end > start, "Clip end ({:.3}) must follow start ({:.3})", end, start);
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-hide_banner", "-loglevel", "error", "-nostdin"])
            .arg("-ss")
            .arg(format!("{:.3}", start))
            .arg("-i")
            .arg(source)
            .arg("-t")
            .arg(format!("{:.3}", end - start))
            .args(["-c:v", "libx264", "-c:a", "aac", "-avoid_negative_ts", "1"])
            .arg(output);
        run(cmd, "ffmpeg clip extraction")?;
        Ok(())
    }

    /// Render `subtitles` into the picture of `clip`, keeping its audio as is
    pub fn burn_in(&self, clip: &Path, subtitles: &Path, output: &Path) -> Result<()> {
        let subtitles = subtitles
            .canonicalize()
            .with_context(|| format!("Subtitle file {} is missing", subtitles.display()))?;
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-hide_banner", "-loglevel", "error", "-nostdin"])
            .arg("-i")
            .arg(clip)
            .arg("-vf")
            .arg(format!("subtitles={}", escape_filter_path(&subtitles)))
            .args(["-c:v", "libx264", "-c:a", "copy"])
            .arg(output);
        run(cmd, "ffmpeg subtitle burn-in")?;
        Ok(())
    }
}

fn run(mut cmd: Command, what: &str) -> Result<Output> {
    debug!(command = ?cmd, "spawning");
    let output = cmd
        .output()
        .with_context(|| format!("Failed to start {}", what))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{} failed ({}): {}", what, output.status, stderr.trim());
    }
    Ok(output)
}

fn parse_duration(stdout: &str) -> Result<f64> {
    let raw = stdout.trim();
    let seconds: f64 = raw
        .parse()
        .with_context(|| format!("Unexpected ffprobe output '{}'", raw))?;
    ensure!(
        seconds.is_finite() && seconds > 0.0,
        "Video duration must be positive (got {})",
        seconds
    );
    Ok(seconds)
}

/// Escape a path for use as the `subtitles` option value inside a filter graph.
///
/// ffmpeg unescapes twice: once while splitting the graph into filters, then
/// again while splitting the filter's options, so both levels are applied.
fn escape_filter_path(path: &Path) -> String {
    let value = escape_with(&path.to_string_lossy(), &['\\', '\'', ':']);
    escape_with(&value, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_with(raw: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
