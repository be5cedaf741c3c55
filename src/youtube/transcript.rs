use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::core::models::CaptionEntry;
use crate::errors::BotError;

/// Ordered caption entries for a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionEntry>, BotError>;
}

#[derive(Clone)]
pub struct YtTranscriptSource {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YtTranscriptSource {
    pub fn new(languages: Vec<String>) -> Result<Self, BotError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| BotError::TranscriptError(format!("Failed to build transcript client: {e}")))?;
        Ok(Self { api, languages })
    }
}

#[async_trait]
impl TranscriptSource for YtTranscriptSource {
    async fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionEntry>, BotError> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| BotError::TranscriptError(format!("{video_id}: {e}")))?;

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| CaptionEntry::new(snippet.text, snippet.start))
            .collect())
    }
}
