//! Per-clip subtitle derivation and SRT text serialization.

pub mod srt;
pub mod window;

pub use srt::{parse_srt, read_srt_file, to_srt, write_srt_file};
pub use window::{window_transcript, window_transcripts};
