//! Core types for the semclip splitting pipeline

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// A timed piece of transcribed speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position within the owning transcript
    pub index: usize,
    pub start_time: f64, // seconds
    pub end_time: f64,   // seconds
    pub text: String,
}

/// Transcription output containing timestamped segments, ordered by start time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Build a transcript from `(start, end, text)` triples, numbering them `1..=N`
    pub fn from_timed_text<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, S)>,
        S: Into<String>,
    {
        let segments = items
            .into_iter()
            .enumerate()
            .map(|(i, (start_time, end_time, text))| Segment {
                index: i + 1,
                start_time,
                end_time,
                text: text.into(),
            })
            .collect();
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// End of the last segment, or zero for an empty transcript
    pub fn speech_end(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.end_time)
            .fold(0.0, f64::max)
    }
}

/// Half-open time window `[start, end)` of the source video, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    pub start: f64,
    pub end: f64,
}

impl ClipRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Upper bound on `SplitConfig::clip_count`
pub const MAX_CLIP_COUNT: usize = 10_000;

/// Parameters for split-point selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Number of clips to produce
    #[serde(alias = "clips", alias = "clipCount")]
    pub clip_count: usize,
    /// Every clip but the last is at least this long (seconds)
    #[serde(alias = "min_duration", alias = "minClipDuration")]
    pub min_clip_duration: f64,
    /// Upper bound enforced by forward correction (seconds)
    #[serde(alias = "max_duration", alias = "maxClipDuration")]
    pub max_clip_duration: f64,
    /// Gaps between segments must exceed this to earn a pause bonus (seconds)
    #[serde(alias = "min_pause", alias = "minPauseDuration")]
    pub min_pause_duration: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            clip_count: 3,
            min_clip_duration: 60.0,
            max_clip_duration: 300.0,
            min_pause_duration: 1.0,
        }
    }
}

impl SplitConfig {
    pub fn new(clip_count: usize, min_clip_duration: f64, max_clip_duration: f64) -> Self {
        Self {
            clip_count,
            min_clip_duration,
            max_clip_duration,
            ..Self::default()
        }
    }

    pub fn with_min_pause(mut self, min_pause_duration: f64) -> Self {
        self.min_pause_duration = min_pause_duration;
        self
    }

    /// Checks the parameters on their own, independent of any particular video
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.clip_count < 1 {
            return Err(SplitError::invalid(format!(
                "clip count must be at least 1, got {}",
                self.clip_count
            )));
        }
        if self.clip_count > MAX_CLIP_COUNT {
            return Err(SplitError::invalid(format!(
                "clip count must be at most {}, got {}",
                MAX_CLIP_COUNT, self.clip_count
            )));
        }
        if !self.min_clip_duration.is_finite() || self.min_clip_duration <= 0.0 {
            return Err(SplitError::invalid(format!(
                "minimum clip duration must be positive, got {}",
                self.min_clip_duration
            )));
        }
        if !self.max_clip_duration.is_finite() || self.max_clip_duration < self.min_clip_duration
        {
            return Err(SplitError::invalid(format!(
                "maximum clip duration ({}) must not be below the minimum ({})",
                self.max_clip_duration, self.min_clip_duration
            )));
        }
        if !self.min_pause_duration.is_finite() || self.min_pause_duration < 0.0 {
            return Err(SplitError::invalid(format!(
                "minimum pause duration must be non-negative, got {}",
                self.min_pause_duration
            )));
        }
        Ok(())
    }
}

/// Advisory conditions; the pipeline still produces valid output when these occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// Fewer eligible boundaries than `clip_count - 1`; the rest were forced by duration
    DegenerateSplit { requested: usize, available: usize },
    /// A clip window contains no speech
    EmptyWindow { clip_index: usize },
}

/// Result of split-point selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitPlan {
    pub ranges: Vec<ClipRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<SplitWarning>,
}

impl SplitPlan {
    pub fn is_degenerate(&self) -> bool {
        matches!(self.warning, Some(SplitWarning::DegenerateSplit { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_timed_text_numbers_segments() {
        let transcript = Transcript::from_timed_text(vec![(0.0, 1.0, "a"), (1.0, 2.5, "b")]);
        let indices: Vec<usize> = transcript.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(transcript.speech_end(), 2.5);
    }

    #[test]
    fn config_rejects_inverted_bounds() {
        let config = SplitConfig::new(2, 30.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(SplitError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn config_rejects_oversized_clip_count() {
        assert!(SplitConfig::new(MAX_CLIP_COUNT, 1.0, 2.0).validate().is_ok());
        assert!(SplitConfig::new(MAX_CLIP_COUNT + 1, 1.0, 2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn config_accepts_equal_bounds() {
        assert!(SplitConfig::new(2, 30.0, 30.0).validate().is_ok());
    }

    #[test]
    fn config_parses_aliases_with_defaults() {
        let config: SplitConfig =
            serde_json::from_str(r#"{"clips": 5, "min_duration": 20}"#).unwrap();
        assert_eq!(config.clip_count, 5);
        assert_eq!(config.min_clip_duration, 20.0);
        assert_eq!(config.max_clip_duration, 300.0);
        assert_eq!(config.min_pause_duration, 1.0);
    }
}
