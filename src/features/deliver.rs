use futures::future::join_all;
use tracing::{info, warn};

use crate::core::models::TextChannel;
use crate::discord::ChatGateway;
use crate::errors::ChatError;

/// In every guild, the first text channel called `name`.
///
/// Guilds without such a channel contribute nothing; a guild with several
/// contributes only the topmost one. A guild whose channels cannot be listed
/// is logged and skipped.
pub async fn channels_named(
    chat: &dyn ChatGateway,
    name: &str,
) -> Result<Vec<TextChannel>, ChatError> {
    let guilds = chat.guilds().await?;
    let listings = join_all(guilds.iter().map(|guild_id| chat.text_channels(*guild_id))).await;

    Ok(guilds
        .into_iter()
        .zip(listings)
        .filter_map(|(guild_id, listing)| match listing {
            Ok(channels) => channels.into_iter().find(|c| c.name == name),
            Err(e) => {
                warn!("Skipping guild {}: cannot list its channels: {}", guild_id, e);
                None
            }
        })
        .collect())
}

/// Send `text` to each channel in turn, returning how many posts were made.
pub async fn send_text_to_channels(
    chat: &dyn ChatGateway,
    channels: &[TextChannel],
    text: &str,
) -> Result<usize, ChatError> {
    for channel in channels {
        chat.send_text(channel.id, text).await?;
        info!(
            "Posted {} chars to #{} (guild {})",
            text.len(),
            channel.name,
            channel.guild_id
        );
    }
    Ok(channels.len())
}
