//! Video platform access: channel/video lookups and transcripts

pub mod client;
pub mod transcript;

pub use client::{VideoPlatform, YouTubeClient};
pub use transcript::{TranscriptSource, YtTranscriptSource};
