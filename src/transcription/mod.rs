//! Transcription module - converts speech to timestamped text using Whisper
//!
//! Uses whisper-rs to transcribe the audio track of the source video. Segment
//! ends feed split-point selection; the same segments become the subtitles.

use crate::audio::{decoder::decode_audio, resample::linear_resample, AudioData};
use crate::types::Transcript;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Sample rate whisper models are trained on
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Settings for a transcription run
#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    pub model_path: PathBuf,
    /// Spoken language code (e.g. "en", "ru"); `None` lets whisper detect it
    pub language: Option<String>,
}

/// Decode the audio track of `media` and transcribe it
pub fn transcribe_media(media: &Path, options: &TranscriptionOptions) -> Result<Transcript> {
    info!(path = %media.display(), "decoding audio track");
    let audio = decode_audio(media)?;
    debug!(
        samples = audio.samples.len(),
        sample_rate = audio.sample_rate,
        "audio track decoded"
    );
    transcribe_audio(&audio, options)
}

/// Transcribe audio to text with segment-level timing
pub fn transcribe_audio(audio: &AudioData, options: &TranscriptionOptions) -> Result<Transcript> {
    // Whisper expects 16 kHz mono
    let samples = linear_resample(&audio.samples, audio.sample_rate, WHISPER_SAMPLE_RATE)
        .context("Failed to resample audio for Whisper")?;

    // Load the model
    let model_path = options
        .model_path
        .to_str()
        .context("Whisper model path is not valid UTF-8")?;
    let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
        .with_context(|| {
            format!(
                "Failed to load Whisper model from {}. Download one with: wget https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin -P ./models/",
                options.model_path.display()
            )
        })?;

    // Configure parameters
    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(Some(options.language.as_deref().unwrap_or("auto")));
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    // Run transcription
    let mut state = ctx
        .create_state()
        .context("Failed to create Whisper state")?;
    info!(seconds = audio.duration(), "running speech recognition");
    state
        .full(params, &samples)
        .context("Failed to transcribe audio")?;

    // Extract segments
    let mut timed = Vec::new();
    for segment in state.as_iter() {
        let text = segment
            .to_str()
            .context("Failed to get segment text")?
            .to_string();
        // Timestamps are in centiseconds
        let start_time = segment.start_timestamp() as f64 / 100.0;
        let end_time = segment.end_timestamp() as f64 / 100.0;
        timed.push((start_time, end_time, text));
    }

    let transcript = collect_segments(timed);
    info!(segments = transcript.len(), "transcription finished");
    Ok(transcript)
}

/// Trim text, drop silent segments and number the rest in order
fn collect_segments(timed: Vec<(f64, f64, String)>) -> Transcript {
    Transcript::from_timed_text(
        timed
            .into_iter()
            .map(|(start, end, text)| (start, end.max(start), text.trim().to_string()))
            .filter(|(_, _, text)| !text.is_empty()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_segments_trims_and_renumbers() {
        let transcript = collect_segments(vec![
            (0.0, 1.2, " Hello there.".to_string()),
            (1.2, 1.5, "   ".to_string()),
            (1.5, 1.4, " Go! ".to_string()),
        ]);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.segments[0].text, "Hello there.");
        assert_eq!(transcript.segments[1].index, 2);
        assert_eq!(transcript.segments[1].text, "Go!");
        assert_eq!(transcript.segments[1].end_time, 1.5);
    }

    #[test]
    fn missing_model_is_reported() {
        let audio = AudioData {
            samples: vec![0.0; 1600],
            sample_rate: WHISPER_SAMPLE_RATE,
        };
        let options = TranscriptionOptions {
            model_path: PathBuf::from("no/such/model.bin"),
            language: None,
        };
        assert!(transcribe_audio(&audio, &options).is_err());
    }
}
