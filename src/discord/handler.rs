//! Serenity event handler: adapts gateway events to the bot's
//! `on_ready` / `on_message` entry points.

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};

use crate::bot::Bot;
use crate::core::models::IncomingMessage;

/// Key under which the composed bot is stored in serenity's data map.
pub struct BotKey;

impl TypeMapKey for BotKey {
    type Value = Arc<Bot>;
}

pub struct Handler;

async fn bot_from(ctx: &Context) -> Option<Arc<Bot>> {
    let data = ctx.data.read().await;
    let bot = data.get::<BotKey>().cloned();
    if bot.is_none() {
        error!("Bot not found in context data");
    }
    bot
}

/// Strips a serenity message down to what the flows consume.
pub fn to_incoming(msg: &Message, from_self: bool) -> IncomingMessage {
    IncomingMessage {
        id: msg.id.get(),
        channel_id: msg.channel_id.get(),
        guild_id: msg.guild_id.map(|g| g.get()),
        author_id: msg.author.id.get(),
        from_self,
        content: msg.content.clone(),
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);

        let Some(bot) = bot_from(&ctx).await else {
            return;
        };

        if let Err(e) = bot.on_ready().await {
            error!("Startup sequence failed: {}", e);
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let from_self = msg.author.id == ctx.cache.current_user().id;

        let Some(bot) = bot_from(&ctx).await else {
            return;
        };

        let incoming = to_incoming(&msg, from_self);
        if let Err(e) = bot.on_message(&incoming).await {
            error!(
                "Failed to process message {} in channel {}: {}",
                incoming.id, incoming.channel_id, e
            );
        }
    }
}
