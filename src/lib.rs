/// Messiah bot - a Discord bot that guards a football server's honour.
///
/// The bot runs two independent flows on one gateway session:
/// 1. Moderation: every guild message is classified by a hosted language model and
///    removed, with a canned notice and a Messi quote, when it is flagged
/// 2. Transfer news: the newest video of a YouTube channel is transcribed, summarized by
///    the model and posted to a named channel in every guild, on startup, on a timer and
///    on demand
///
/// # Architecture
///
/// The system uses:
/// - serenity for the Discord gateway and REST API
/// - an OpenAI-compatible chat-completions endpoint (Groq by default) via reqwest
/// - the YouTube Data API v3 and yt-transcript-rs for video lookups and captions
/// - Tokio for async runtime
///
/// Every external collaborator sits behind a trait (`ChatGateway`, `LanguageModel`,
/// `VideoPlatform`, `TranscriptSource`) and is injected into `bot::Bot`.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use messiah_bot::bot::Bot;
/// use messiah_bot::core::config::AppConfig;
/// use messiah_bot::ai::LlmClient;
/// use messiah_bot::youtube::{YouTubeClient, YtTranscriptSource};
/// use messiah_bot::discord::SerenityGateway;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     messiah_bot::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let http = Arc::new(serenity::http::Http::new(&config.discord_bot_token));
///
///     let bot = Bot::new(
///         &config,
///         Arc::new(SerenityGateway::new(http)),
///         Arc::new(LlmClient::new(
///             config.llm_api_key.clone(),
///             config.llm_base_url.clone(),
///             config.llm_model.clone(),
///         )),
///         Arc::new(YouTubeClient::new(config.youtube_api_key.clone())),
///         Arc::new(YtTranscriptSource::new(config.transcript_languages.clone())?),
///     );
///
///     // Run one summarization outside the gateway session
///     let posted = bot.summarizer().summarize_latest_video().await?;
///     println!("Summary posted to {} channel(s)", posted);
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod bot;
pub mod core;
pub mod discord;
pub mod errors;
pub mod features;
pub mod prompt;
pub mod youtube;

pub use ai::estimate_tokens;

/// Configure structured logging with JSON output.
///
/// The level filter is read from `RUST_LOG` and defaults to `info`. Calling
/// this more than once is harmless; later calls are ignored.
///
/// # Example
///
/// ```
/// // Initialize structured logging before starting the bot
/// messiah_bot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
