use std::sync::Arc;

use anyhow::Result;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::{error, info};

use messiah_bot::ai::LlmClient;
use messiah_bot::bot::Bot;
use messiah_bot::core::config::AppConfig;
use messiah_bot::discord::{BotKey, Handler, SerenityGateway};
use messiah_bot::youtube::{YouTubeClient, YtTranscriptSource};

#[tokio::main]
async fn main() -> Result<()> {
    messiah_bot::setup_logging();

    let config = AppConfig::from_env()?;
    info!(
        "Starting bot: summaries of '{}' to #{} every {:?}",
        config.youtube_channel.as_str(),
        config.summary_channel_name,
        config.summary_period
    );

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Discord client: {}", e))?;

    let bot = Arc::new(Bot::new(
        &config,
        Arc::new(SerenityGateway::new(client.http.clone())),
        Arc::new(LlmClient::new(
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
            config.llm_model.clone(),
        )),
        Arc::new(YouTubeClient::new(config.youtube_api_key.clone())),
        Arc::new(YtTranscriptSource::new(config.transcript_languages.clone())?),
    ));

    {
        let mut data = client.data.write().await;
        data.insert::<BotKey>(Arc::clone(&bot));
    }

    // Graceful shutdown: close all shards on SIGTERM or Ctrl+C.
    let shard_manager = client.shard_manager.clone();
    let bot_for_shutdown = Arc::clone(&bot);
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = sigterm.recv() => {}
                    }
                }
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }

        info!("Shutting down");
        bot_for_shutdown.shutdown();
        shard_manager.shutdown_all().await;
    });

    if let Err(e) = client.start().await {
        error!("Discord client error: {}", e);
        return Err(anyhow::anyhow!("Discord client error: {}", e));
    }

    Ok(())
}
