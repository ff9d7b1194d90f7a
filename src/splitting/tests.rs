use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::select_split_points;
use crate::error::SplitError;
use crate::types::{ClipRange, SplitConfig, SplitWarning, Transcript, MAX_CLIP_COUNT};

const TOLERANCE: f64 = 1e-9;

fn lecture_transcript() -> Transcript {
    Transcript::from_timed_text(vec![
        (0.0, 5.0, "Hello world."),
        (5.0, 12.0, "This is a test"),
        (14.0, 20.0, "Final clause."),
    ])
}

/// Deterministic speech-like transcript: sentences of varying length with irregular gaps.
fn synthetic_transcript(seed: u64, count: usize) -> Transcript {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cursor = 0.0;
    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        let start = cursor + rng.gen_range(0.0..3.0);
        let end = start + rng.gen_range(1.0..10.0);
        let text = if i % 3 == 0 {
            format!("sentence {} ends.", i)
        } else {
            format!("clause {} continues", i)
        };
        items.push((start, end, text));
        cursor = end;
    }
    Transcript::from_timed_text(items)
}

fn assert_partition(ranges: &[ClipRange], total: f64, config: &SplitConfig) {
    assert_eq!(ranges.len(), config.clip_count);
    assert_eq!(ranges[0].start, 0.0);
    assert_eq!(ranges[ranges.len() - 1].end, total);
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].end, pair[1].start, "ranges must be contiguous");
    }
    for range in ranges {
        assert!(range.start < range.end, "empty range {:?}", range);
        assert!(range.end <= total);
    }
    for range in &ranges[..ranges.len() - 1] {
        assert!(
            range.duration() >= config.min_clip_duration - TOLERANCE,
            "range {:?} shorter than {}",
            range,
            config.min_clip_duration
        );
        assert!(
            range.duration() <= config.max_clip_duration + TOLERANCE,
            "range {:?} longer than {}",
            range,
            config.max_clip_duration
        );
    }
}

#[test]
fn prefers_pause_near_the_middle() {
    let config = SplitConfig::new(2, 1.0, 1000.0).with_min_pause(1.0);
    let plan = select_split_points(&lecture_transcript(), 20.0, &config).unwrap();

    assert_eq!(
        plan.ranges,
        vec![ClipRange::new(0.0, 12.0), ClipRange::new(12.0, 20.0)]
    );
    assert!(plan.warning.is_none());
}

#[test]
fn single_clip_covers_everything() {
    let config = SplitConfig::new(1, 60.0, 300.0);
    let plan = select_split_points(&lecture_transcript(), 20.0, &config).unwrap();
    assert_eq!(plan.ranges, vec![ClipRange::new(0.0, 20.0)]);

    let plan = select_split_points(&Transcript::default(), 42.5, &config).unwrap();
    assert_eq!(plan.ranges, vec![ClipRange::new(0.0, 42.5)]);
}

#[test]
fn empty_transcript_is_cut_by_duration_alone() {
    let config = SplitConfig::new(3, 60.0, 150.0);
    let plan = select_split_points(&Transcript::default(), 300.0, &config).unwrap();

    assert_eq!(
        plan.ranges,
        vec![
            ClipRange::new(0.0, 60.0),
            ClipRange::new(60.0, 120.0),
            ClipRange::new(120.0, 300.0),
        ]
    );
    assert_eq!(
        plan.warning,
        Some(SplitWarning::DegenerateSplit {
            requested: 2,
            available: 0
        })
    );
}

#[test]
fn missing_boundaries_are_forced_after_chosen_ones() {
    let transcript = Transcript::from_timed_text(vec![(0.0, 70.0, "Only speech here.")]);
    let config = SplitConfig::new(3, 60.0, 300.0);
    let plan = select_split_points(&transcript, 600.0, &config).unwrap();

    assert_eq!(
        plan.ranges,
        vec![
            ClipRange::new(0.0, 70.0),
            ClipRange::new(70.0, 130.0),
            ClipRange::new(130.0, 600.0),
        ]
    );
    assert!(plan.is_degenerate());
}

#[test]
fn sentence_end_beats_plain_segment_at_same_position() {
    let transcript = Transcript::from_timed_text(vec![
        (0.0, 40.0, "Intro"),
        (40.0, 49.0, "still going"),
        (49.0, 51.0, "That is all."),
        (51.0, 100.0, "Next part"),
    ]);
    let config = SplitConfig::new(2, 10.0, 90.0);
    let plan = select_split_points(&transcript, 100.0, &config).unwrap();
    assert_eq!(plan.ranges[0].end, 51.0);
}

#[test]
fn ties_resolve_to_earlier_segment() {
    // Both ends sit exactly 4s from the middle with identical bonuses.
    let transcript = Transcript::from_timed_text(vec![
        (0.0, 28.0, "first"),
        (28.0, 36.0, "second"),
        (36.0, 64.0, "third"),
    ]);
    let config = SplitConfig::new(2, 10.0, 60.0);
    let plan = select_split_points(&transcript, 64.0, &config).unwrap();
    assert_eq!(plan.ranges[0].end, 28.0);
}

#[test]
fn rejects_invalid_configuration() {
    let transcript = lecture_transcript();
    let cases = [
        SplitConfig::new(0, 1.0, 10.0),
        SplitConfig::new(2, 0.0, 10.0),
        SplitConfig::new(2, -1.0, 10.0),
        SplitConfig::new(2, 5.0, 4.0),
        SplitConfig::new(2, 1.0, 10.0).with_min_pause(-0.5),
        SplitConfig::new(MAX_CLIP_COUNT + 1, 1e-6, 10.0),
    ];
    for config in cases {
        assert!(
            matches!(
                select_split_points(&transcript, 20.0, &config),
                Err(SplitError::InvalidConfiguration(_))
            ),
            "{:?} should be rejected",
            config
        );
    }
}

#[test]
fn rejects_unusable_duration() {
    let config = SplitConfig::new(3, 10.0, 100.0);
    for total in [0.0, -5.0, f64::NAN, f64::INFINITY, 20.0] {
        assert!(select_split_points(&Transcript::default(), total, &config).is_err());
    }
    assert!(select_split_points(&Transcript::default(), 20.5, &config).is_ok());
}

#[test]
fn candidates_past_the_end_still_yield_a_partition() {
    let transcript = Transcript::from_timed_text(vec![
        (0.0, 190.0, "Long opening."),
        (190.0, 195.0, "Almost done."),
        (195.0, 210.0, "Overrun."),
    ]);
    let config = SplitConfig::new(3, 60.0, 300.0);
    let plan = select_split_points(&transcript, 200.0, &config).unwrap();
    assert_partition(&plan.ranges, 200.0, &config);
}

#[test]
fn huge_clip_count_is_rejected_not_allocated() {
    let config = SplitConfig::new(usize::MAX, 1e-300, 1.0);
    assert!(matches!(
        select_split_points(&Transcript::default(), 100.0, &config),
        Err(SplitError::InvalidConfiguration(_))
    ));
}

#[test]
fn boundary_near_the_room_limit_moves_smoothly() {
    let config = SplitConfig::new(3, 60.0, 300.0);
    let plan_for = |split: f64| {
        let transcript =
            Transcript::from_timed_text(vec![(0.0, split, "One."), (split, 299.0, "Two.")]);
        select_split_points(&transcript, 300.0, &config).unwrap()
    };

    let below = plan_for(239.9);
    assert_eq!(below.ranges[0], ClipRange::new(0.0, 239.9));
    assert_abs_diff_eq!(below.ranges[1].end, 299.9, epsilon = 1e-9);

    let at = plan_for(240.0);
    assert_abs_diff_eq!(at.ranges[0].end, 239.999, epsilon = 1e-9);
    assert_abs_diff_eq!(at.ranges[1].end, 299.999, epsilon = 1e-9);
    assert_partition(&at.ranges, 300.0, &config);
}

#[test]
fn partition_holds_across_configurations() {
    for seed in 1..40u64 {
        let transcript = synthetic_transcript(seed, 20 + (seed as usize % 30));
        let total = transcript.speech_end() + (seed % 7) as f64;
        for clip_count in 1..6 {
            let min = 5.0 + (seed % 5) as f64;
            let max = min * (2.0 + (seed % 3) as f64);
            let config = SplitConfig::new(clip_count, min, max).with_min_pause(0.5);
            match select_split_points(&transcript, total, &config) {
                Ok(plan) => {
                    let last = plan.ranges.len() - 1;
                    assert_partition(&plan.ranges, total, &config);
                    assert!(plan.ranges[last].duration() > 0.0);
                }
                Err(SplitError::InvalidConfiguration(_)) => {
                    assert!((clip_count - 1) as f64 * min >= total);
                }
            }
        }
    }
}

#[test]
fn selection_is_deterministic() {
    let transcript = synthetic_transcript(7, 60);
    let config = SplitConfig::new(4, 20.0, 120.0);
    let total = transcript.speech_end();
    let first = select_split_points(&transcript, total, &config).unwrap();
    let second = select_split_points(&transcript, total, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn interior_boundaries_come_from_segment_ends_when_unconstrained() {
    let transcript = synthetic_transcript(11, 40);
    let config = SplitConfig::new(3, 1.0, 10_000.0);
    let total = transcript.speech_end();
    let plan = select_split_points(&transcript, total, &config).unwrap();
    let ends: Vec<f64> = transcript.iter().map(|segment| segment.end_time).collect();
    for range in &plan.ranges[..plan.ranges.len() - 1] {
        assert!(ends.contains(&range.end), "{} is not a segment end", range.end);
    }
}
