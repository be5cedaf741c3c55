//! Discord REST access behind the `ChatGateway` seam.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::http::{GuildPagination, Http};
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId, MessageId};
use tracing::debug;

use crate::core::models::TextChannel;
use crate::errors::ChatError;

/// Upper bound of guilds returned by one `GET /users/@me/guilds` page.
const GUILD_PAGE_LIMIT: u64 = 200;

/// Outbound chat operations the flows rely on.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), ChatError>;

    async fn send_embed(
        &self,
        channel_id: u64,
        description: &str,
        image_url: &str,
    ) -> Result<(), ChatError>;

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<(), ChatError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), ChatError>;

    async fn guilds(&self) -> Result<Vec<u64>, ChatError>;

    /// Text channels of one guild, ordered by their position in the sidebar.
    async fn text_channels(&self, guild_id: u64) -> Result<Vec<TextChannel>, ChatError>;
}

/// `ChatGateway` over serenity's HTTP client.
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

// Snowflakes are never zero; serenity's id constructors panic on it.
fn channel(id: u64) -> Result<ChannelId, ChatError> {
    if id == 0 {
        return Err(ChatError::NotFound);
    }
    Ok(ChannelId::new(id))
}

fn message(id: u64) -> Result<MessageId, ChatError> {
    if id == 0 {
        return Err(ChatError::NotFound);
    }
    Ok(MessageId::new(id))
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), ChatError> {
        channel(channel_id)?.say(&*self.http, text).await?;
        Ok(())
    }

    async fn send_embed(
        &self,
        channel_id: u64,
        description: &str,
        image_url: &str,
    ) -> Result<(), ChatError> {
        let embed = CreateEmbed::new().description(description).image(image_url);
        channel(channel_id)?
            .send_message(&*self.http, CreateMessage::new().embed(embed))
            .await?;
        Ok(())
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<(), ChatError> {
        channel(channel_id)?
            .message(&*self.http, message(message_id)?)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), ChatError> {
        channel(channel_id)?
            .delete_message(&*self.http, message(message_id)?)
            .await?;
        Ok(())
    }

    async fn guilds(&self) -> Result<Vec<u64>, ChatError> {
        let http = &self.http;
        collect_pages(GUILD_PAGE_LIMIT, |after| async move {
            let target = after.map(|id| GuildPagination::After(GuildId::new(id)));
            let page = http.get_guilds(target, Some(GUILD_PAGE_LIMIT)).await?;
            Ok::<Vec<u64>, ChatError>(page.into_iter().map(|g| g.id.get()).collect())
        })
        .await
    }

    async fn text_channels(&self, guild_id: u64) -> Result<Vec<TextChannel>, ChatError> {
        if guild_id == 0 {
            return Err(ChatError::NotFound);
        }
        let mut channels = self.http.get_channels(GuildId::new(guild_id)).await?;
        channels.retain(|c| matches!(c.kind, ChannelType::Text | ChannelType::News));
        channels.sort_by_key(|c| (c.position, c.id));

        debug!("Guild {} has {} text channels", guild_id, channels.len());

        Ok(channels
            .into_iter()
            .map(|c| TextChannel {
                id: c.id.get(),
                guild_id,
                name: c.name,
            })
            .collect())
    }
}

/// Walks an id-cursor listing: each page is requested after the last id of
/// the previous one, until a page comes back shorter than `page_size`.
pub async fn collect_pages<F, Fut>(page_size: u64, mut fetch_page: F) -> Result<Vec<u64>, ChatError>
where
    F: FnMut(Option<u64>) -> Fut,
    Fut: Future<Output = Result<Vec<u64>, ChatError>>,
{
    let mut ids = Vec::new();
    let mut after = None;
    loop {
        let page = fetch_page(after).await?;
        let full = page.len() as u64 >= page_size;
        after = page.last().copied();
        ids.extend(page);
        if !full || after.is_none() {
            break;
        }
        debug!("Fetched {} guilds so far, requesting the next page", ids.len());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn listing(total: u64) -> Vec<u64> {
        (1..=total).collect()
    }

    #[tokio::test]
    async fn pages_are_followed_past_the_first() {
        let all = listing(450);
        let cursors = Mutex::new(Vec::new());

        let ids = collect_pages(200, |after| {
            cursors.lock().unwrap().push(after);
            let page: Vec<u64> = all
                .iter()
                .copied()
                .filter(|id| after.is_none_or(|a| *id > a))
                .take(200)
                .collect();
            async move { Ok::<_, ChatError>(page) }
        })
        .await
        .unwrap();

        assert_eq!(ids, all);
        assert_eq!(*cursors.lock().unwrap(), vec![None, Some(200), Some(400)]);
    }

    #[tokio::test]
    async fn exact_multiple_ends_on_an_empty_page() {
        let all = listing(400);
        let mut requests = 0;

        let ids = collect_pages(200, |after| {
            requests += 1;
            let page: Vec<u64> = all
                .iter()
                .copied()
                .filter(|id| after.is_none_or(|a| *id > a))
                .take(200)
                .collect();
            async move { Ok::<_, ChatError>(page) }
        })
        .await
        .unwrap();

        assert_eq!(ids.len(), 400);
        assert_eq!(requests, 3);
    }

    #[tokio::test]
    async fn failed_page_is_returned() {
        let result = collect_pages(2, |after| async move {
            match after {
                None => Ok(vec![1, 2]),
                Some(_) => Err(ChatError::Forbidden),
            }
        })
        .await;

        assert_eq!(result, Err(ChatError::Forbidden));
    }
}
