use crate::types::{ClipRange, Segment, Transcript};

/// Restrict `transcript` to the segments starting inside `[range_start, range_end)`.
///
/// Selected segments are copied, shifted so the window begins at zero and
/// renumbered `1..=N` in their original order. A segment that starts before
/// the window is dropped even if it runs into it, and a shifted end may run
/// past the window length; neither is clamped. The source is left untouched.
pub fn window_transcript(transcript: &Transcript, range_start: f64, range_end: f64) -> Transcript {
    let segments = transcript
        .segments
        .iter()
        .filter(|segment| range_start <= segment.start_time && segment.start_time < range_end)
        .enumerate()
        .map(|(i, segment)| Segment {
            index: i + 1,
            start_time: segment.start_time - range_start,
            end_time: segment.end_time - range_start,
            text: segment.text.clone(),
        })
        .collect();
    Transcript { segments }
}

/// One windowed transcript per range, in range order
pub fn window_transcripts(transcript: &Transcript, ranges: &[ClipRange]) -> Vec<Transcript> {
    ranges
        .iter()
        .map(|range| window_transcript(transcript, range.start, range.end))
        .collect()
}
