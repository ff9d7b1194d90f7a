use crate::types::{SplitConfig, Transcript};

/// Points per second of silence after a segment
pub(super) const PAUSE_WEIGHT: f64 = 10.0;
/// Flat bonus for a segment that closes a sentence
pub(super) const SENTENCE_BONUS: f64 = 50.0;
/// Score of a candidate sitting exactly on an evenly spaced split
pub(super) const POSITION_PEAK: f64 = 100.0;
/// Linear falloff per unit of relative distance from the nearest even split
pub(super) const POSITION_FALLOFF: f64 = 300.0;

/// A segment end considered as a clip boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Candidate {
    pub(super) segment_idx: usize,
    pub(super) score: f64,
    pub(super) boundary_time: f64,
}

/// Score every segment end that leaves at least one minimum-length clip before it.
pub(super) fn score_candidates(
    transcript: &Transcript,
    pauses: &[f64],
    total_duration: f64,
    config: &SplitConfig,
) -> Vec<Candidate> {
    transcript
        .segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.end_time >= config.min_clip_duration)
        .map(|(idx, segment)| {
            let pause = pauses.get(idx).copied().unwrap_or(0.0);
            let pause_score = if pause > config.min_pause_duration {
                pause * PAUSE_WEIGHT
            } else {
                0.0
            };
            let sentence_score = if idx > 0 && ends_sentence(&segment.text) {
                SENTENCE_BONUS
            } else {
                0.0
            };
            let relative = segment.end_time / total_duration;
            let score =
                pause_score + sentence_score + position_score(relative, config.clip_count);
            Candidate {
                segment_idx: idx,
                score,
                boundary_time: segment.end_time,
            }
        })
        .collect()
}

/// Order by descending score; equal scores keep transcript order.
pub(super) fn rank_candidates(candidates: &mut [Candidate]) {
    // `sort_by` is stable, which is what makes ties resolve to the earlier segment.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

fn ends_sentence(text: &str) -> bool {
    text.trim_end().ends_with(['.', '!', '?'])
}

/// Closeness of `relative` (0..1) to the nearest of the `k / clip_count` split fractions.
fn position_score(relative: f64, clip_count: usize) -> f64 {
    (1..clip_count)
        .map(|k| {
            let ideal = k as f64 / clip_count as f64;
            POSITION_PEAK - (relative - ideal).abs() * POSITION_FALLOFF
        })
        .fold(f64::NEG_INFINITY, f64::max)
}
