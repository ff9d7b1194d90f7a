pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod splitting;
pub mod subtitles;
pub mod timecode;
pub mod transcription;
pub mod types;
pub mod video;

pub use error::{SplitError, SubtitleError};
pub use splitting::select_split_points;
pub use subtitles::{window_transcript, window_transcripts};
pub use types::{ClipRange, Segment, SplitConfig, SplitPlan, SplitWarning, Transcript};
