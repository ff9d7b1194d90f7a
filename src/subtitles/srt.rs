//! SRT subtitle text: numbered cues with `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing lines.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::SubtitleError;
use crate::types::{Segment, Transcript};

/// Render a transcript as SRT. An empty transcript renders as an empty string.
pub fn to_srt(transcript: &Transcript) -> String {
    let mut output = String::new();
    for segment in &transcript.segments {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            segment.index,
            format_timestamp(segment.start_time),
            format_timestamp(segment.end_time),
            segment.text
        ));
    }
    output
}

/// Parse SRT text into a transcript, renumbering cues `1..=N` in file order.
///
/// Cue numbers are optional, either `,` or `.` may separate milliseconds and
/// multi-line cue text is joined with `\n`.
pub fn parse_srt(input: &str) -> Result<Transcript, SubtitleError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut segments = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (line_idx, raw) in input.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !block.is_empty() {
                segments.push(parse_cue(&block, segments.len() + 1)?);
                block.clear();
            }
            continue;
        }
        block.push((line_idx + 1, line));
    }
    if !block.is_empty() {
        segments.push(parse_cue(&block, segments.len() + 1)?);
    }

    Ok(Transcript { segments })
}

pub fn read_srt_file<P: AsRef<Path>>(path: P) -> Result<Transcript> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read subtitle file {}", path.display()))?;
    let transcript = parse_srt(&data)
        .with_context(|| format!("Failed to parse subtitle file {}", path.display()))?;
    Ok(transcript)
}

pub fn write_srt_file<P: AsRef<Path>>(transcript: &Transcript, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_srt(transcript))
        .with_context(|| format!("Failed to write subtitle file {}", path.display()))
}

fn parse_cue(lines: &[(usize, &str)], index: usize) -> Result<Segment, SubtitleError> {
    let mut rest = lines;
    if let Some(&(_, first)) = rest.first() {
        if looks_like_cue_number(first) && rest.len() > 1 {
            rest = &rest[1..];
        }
    }

    let (line_no, timing) = rest[0];
    let (start_raw, end_raw) =
        timing
            .split_once("-->")
            .ok_or_else(|| SubtitleError::MissingTiming {
                line: line_no,
                found: timing.to_string(),
            })?;
    // cue settings may follow the end timestamp
    let end_raw = end_raw.split_whitespace().next().unwrap_or("");
    let start_time = parse_timestamp(start_raw.trim(), line_no)?;
    let end_time = parse_timestamp(end_raw, line_no)?;
    if end_time < start_time {
        return Err(SubtitleError::NegativeDuration {
            line: line_no,
            start: start_time,
            end: end_time,
        });
    }

    let text = rest[1..]
        .iter()
        .map(|(_, line)| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Segment {
        index,
        start_time,
        end_time,
        text,
    })
}

fn looks_like_cue_number(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// `HH:MM:SS,mmm` (or `MM:SS.mmm`) to seconds
fn parse_timestamp(raw: &str, line: usize) -> Result<f64, SubtitleError> {
    let invalid = || SubtitleError::InvalidTimestamp {
        line,
        value: raw.to_string(),
    };
    let normalized = raw.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid());
    }

    let mut seconds = 0.0;
    for part in &parts {
        let value: f64 = part.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        seconds = seconds * 60.0 + value;
    }
    Ok(seconds)
}

fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}
