//! YouTube Data API v3 lookups used by the summarizer.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::errors::BotError;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Channel and latest-upload lookups on the video platform.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Id of the first channel matching `query`.
    async fn search_channel_id(&self, query: &str) -> Result<String, BotError>;

    /// Id of the most recently published video of `channel_id`.
    async fn latest_video_id(&self, channel_id: &str) -> Result<String, BotError>;
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: SearchItemId,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub channel_id: Option<String>,
}

impl SearchResponse {
    pub fn first_channel_id(&self) -> Option<&str> {
        self.items
            .first()
            .and_then(|item| item.snippet.as_ref())
            .and_then(|snippet| snippet.channel_id.as_deref())
    }

    pub fn first_video_id(&self) -> Option<&str> {
        self.items
            .first()
            .and_then(|item| item.id.video_id.as_deref())
    }
}

pub struct YouTubeClient {
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    async fn search(&self, params: &[(&str, &str)]) -> Result<SearchResponse, BotError> {
        let resp = HTTP_CLIENT
            .get(SEARCH_URL)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::LookupError(format!(
                "YouTube search HTTP {status}: {body}"
            )));
        }

        Ok(resp.json::<SearchResponse>().await?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_channel_id(&self, query: &str) -> Result<String, BotError> {
        let response = self
            .search(&[("part", "snippet"), ("q", query), ("type", "channel")])
            .await?;

        let channel_id = response
            .first_channel_id()
            .ok_or_else(|| BotError::LookupError(format!("No YouTube channel found for '{query}'")))?;

        info!("Resolved YouTube channel '{}' to {}", query, channel_id);
        Ok(channel_id.to_string())
    }

    async fn latest_video_id(&self, channel_id: &str) -> Result<String, BotError> {
        let response = self
            .search(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("maxResults", "1"),
                ("order", "date"),
            ])
            .await?;

        let video_id = response.first_video_id().ok_or_else(|| {
            BotError::LookupError(format!("No videos found for channel {channel_id}"))
        })?;

        info!("Latest video for channel {} is {}", channel_id, video_id);
        Ok(video_id.to_string())
    }
}
