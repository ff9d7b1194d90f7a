use crate::types::Transcript;

/// Silence following each segment, in seconds.
///
/// Overlapping neighbours count as no pause; the final segment never has one.
pub(super) fn pauses_after(transcript: &Transcript) -> Vec<f64> {
    let segments = &transcript.segments;
    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| match segments.get(idx + 1) {
            Some(next) => (next.start_time - segment.end_time).max(0.0),
            None => 0.0,
        })
        .collect()
}
