//! Split-point selection: cut a transcript's timeline into a fixed number of
//! contiguous clips whose boundaries favour pauses, sentence ends and even spacing.

mod correction;
mod pauses;
mod scoring;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::error::SplitError;
use crate::types::{ClipRange, SplitConfig, SplitPlan, SplitWarning, Transcript};

use correction::{build_ranges, BoundaryCorrector};
use pauses::pauses_after;
use scoring::{rank_candidates, score_candidates};

/// Pure function to partition `[0, total_duration]` into `config.clip_count` clips.
///
/// Boundaries are drawn from segment end times, highest scoring first, then
/// corrected forward so every clip but the last lasts at least
/// `min_clip_duration`. The maximum is enforced the same way, but a clip can
/// still exceed it when the final clip has to absorb the remainder.
///
/// When the transcript offers fewer boundaries than needed, the missing ones
/// are forced at minimum-length steps and the plan carries
/// [`SplitWarning::DegenerateSplit`].
pub fn select_split_points(
    transcript: &Transcript,
    total_duration: f64,
    config: &SplitConfig,
) -> Result<SplitPlan, SplitError> {
    config.validate()?;
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(SplitError::invalid(format!(
            "total duration must be positive, got {}",
            total_duration
        )));
    }

    if config.clip_count == 1 {
        return Ok(SplitPlan {
            ranges: vec![ClipRange::new(0.0, total_duration)],
            warning: None,
        });
    }

    let interior = config.clip_count - 1;
    let reserved = interior as f64 * config.min_clip_duration;
    if reserved >= total_duration {
        return Err(SplitError::invalid(format!(
            "{} clips of at least {}s do not fit in {}s",
            config.clip_count, config.min_clip_duration, total_duration
        )));
    }

    let pauses = pauses_after(transcript);
    let mut candidates = score_candidates(transcript, &pauses, total_duration, config);
    debug!(
        segments = transcript.len(),
        candidates = candidates.len(),
        "scored split candidates"
    );
    rank_candidates(&mut candidates);

    let mut chosen: Vec<f64> = candidates
        .iter()
        .take(interior)
        .map(|candidate| candidate.boundary_time)
        .collect();
    chosen.sort_by(f64::total_cmp);

    let warning = (chosen.len() < interior).then_some(SplitWarning::DegenerateSplit {
        requested: interior,
        available: chosen.len(),
    });

    let mut corrector = BoundaryCorrector::new(total_duration, interior, config);
    for boundary in chosen {
        corrector.push(boundary);
    }
    while corrector.remaining() > 0 {
        corrector.push_forced();
    }
    let boundaries = corrector.finish();
    debug!(?boundaries, "corrected split boundaries");

    Ok(SplitPlan {
        ranges: build_ranges(&boundaries),
        warning,
    })
}
