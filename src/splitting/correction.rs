use crate::types::{ClipRange, SplitConfig};

/// How far a boundary lands before the latest time that still leaves room
/// for the clips after it. Matches the millisecond resolution of SRT output.
const ROOM_MARGIN: f64 = 0.001;

/// Forward, single-pass length correction of interior clip boundaries.
///
/// Boundaries must be pushed in ascending order. Each one is moved to keep the
/// clip that ends at it within `[min, max]`, measured from the previous
/// corrected boundary, and never so late that the remaining clips lose their
/// minimum length or the final clip collapses.
pub(super) struct BoundaryCorrector {
    boundaries: Vec<f64>,
    last_time: f64,
    remaining: usize,
    total_duration: f64,
    min_duration: f64,
    max_duration: f64,
}

impl BoundaryCorrector {
    /// `interior` is the number of boundaries that will be pushed before `finish`.
    pub(super) fn new(total_duration: f64, interior: usize, config: &SplitConfig) -> Self {
        Self {
            boundaries: Vec::with_capacity(interior + 1),
            last_time: 0.0,
            remaining: interior,
            total_duration,
            min_duration: config.min_clip_duration,
            max_duration: config.max_clip_duration,
        }
    }

    pub(super) fn push(&mut self, candidate: f64) {
        let mut boundary = candidate;
        if boundary - self.last_time < self.min_duration {
            boundary = self.last_time + self.min_duration;
        } else if boundary - self.last_time > self.max_duration {
            boundary = self.last_time + self.max_duration;
        }
        boundary = self.limit_to_room(boundary);

        self.boundaries.push(boundary);
        self.last_time = boundary;
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Place a boundary with no transcript evidence: one minimum length after the last.
    pub(super) fn push_forced(&mut self) {
        self.push(self.last_time);
    }

    pub(super) fn remaining(&self) -> usize {
        self.remaining
    }

    /// Close the timeline; the final clip takes whatever is left.
    pub(super) fn finish(mut self) -> Vec<f64> {
        self.boundaries.push(self.total_duration);
        self.boundaries
    }

    fn limit_to_room(&self, boundary: f64) -> f64 {
        let later = self.remaining.saturating_sub(1) as f64;
        let ceiling = self.total_duration - later * self.min_duration;
        if boundary < ceiling {
            return boundary;
        }
        (ceiling - ROOM_MARGIN).max(self.last_time + self.min_duration)
    }
}

/// Consecutive `(start, end)` pairs over `0, boundaries[0], boundaries[1], ...`
pub(super) fn build_ranges(boundaries: &[f64]) -> Vec<ClipRange> {
    let mut ranges = Vec::with_capacity(boundaries.len());
    let mut start = 0.0;
    for &end in boundaries {
        ranges.push(ClipRange::new(start, end));
        start = end;
    }
    ranges
}
