use std::env;
use std::time::Duration;

use url::Url;

use crate::core::models::ChannelReference;
use crate::errors::BotError;

pub const DEFAULT_LLM_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_YOUTUBE_CHANNEL: &str = "FabrizioRomanoYT";
pub const DEFAULT_SUMMARY_CHANNEL: &str = "football-messiah";
pub const DEFAULT_QUOTE_CHANNEL: &str = "general";
pub const DEFAULT_QUOTE_IMAGE_URL: &str = "https://fifpro.org/media/fhmfhvkx/messi-world-cup.jpg?rxy=0.48356841796117644,0.31512414378031967&width=1000&height=640&rnd=133210253587130000";
pub const DEFAULT_SUMMARY_PERIOD_SECS: u64 = 3 * 60 * 60;
pub const MAX_SUMMARY_PERIOD_SECS: u64 = 365 * 24 * 60 * 60;
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_bot_token: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_base_url: String,
    pub youtube_api_key: String,
    pub youtube_channel: ChannelReference,
    pub transcript_languages: Vec<String>,
    pub summary_channel_name: String,
    pub quote_channel_name: String,
    pub quote_image_url: String,
    pub summary_period: Duration,
    pub command_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BotError::ConfigError(format!("{key} is not set")))
        };
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let period_secs = match lookup("SUMMARY_PERIOD_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| (1..=MAX_SUMMARY_PERIOD_SECS).contains(secs))
                .ok_or_else(|| {
                    BotError::ConfigError(format!(
                        "SUMMARY_PERIOD_SECS must be between 1 and {MAX_SUMMARY_PERIOD_SECS}, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_SUMMARY_PERIOD_SECS,
        };

        let quote_image_url = or_default("QUOTE_IMAGE_URL", DEFAULT_QUOTE_IMAGE_URL);
        Url::parse(&quote_image_url)
            .map_err(|e| BotError::ConfigError(format!("QUOTE_IMAGE_URL: {e}")))?;

        let llm_base_url = or_default("LLM_BASE_URL", DEFAULT_LLM_BASE_URL);
        Url::parse(&llm_base_url)
            .map_err(|e| BotError::ConfigError(format!("LLM_BASE_URL: {e}")))?;

        let command_prefix = lookup("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.into());
        if command_prefix.trim().is_empty() || command_prefix.contains(char::is_whitespace) {
            return Err(BotError::ConfigError(
                "COMMAND_PREFIX must be non-empty and contain no whitespace".to_string(),
            ));
        }

        let transcript_languages: Vec<String> = or_default("TRANSCRIPT_LANGUAGES", "en")
            .split(',')
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .collect();

        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            llm_api_key: required("GROQ_API_KEY")?,
            llm_model: or_default("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_base_url: llm_base_url.trim_end_matches('/').to_string(),
            youtube_api_key: required("YOUTUBE_API_KEY")?,
            youtube_channel: ChannelReference::new(or_default(
                "YOUTUBE_CHANNEL",
                DEFAULT_YOUTUBE_CHANNEL,
            )),
            transcript_languages,
            summary_channel_name: or_default("SUMMARY_CHANNEL_NAME", DEFAULT_SUMMARY_CHANNEL),
            quote_channel_name: or_default("QUOTE_CHANNEL_NAME", DEFAULT_QUOTE_CHANNEL),
            quote_image_url,
            summary_period: Duration::from_secs(period_secs),
            command_prefix,
        })
    }
}
