//! Telegram client using teloxide.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::responder::{HandleResolver, OutboundReply};

/// Telegram API client. Caches the bot's own username after the first
/// successful `getMe` call.
pub struct TelegramClient {
    bot: Bot,
    handle: OnceCell<String>,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            handle: OnceCell::new(),
        }
    }

    /// Send `reply` as a Telegram reply to the triggering message.
    pub async fn send_reply(
        &self,
        chat_id: i64,
        reply_to_message_id: i64,
        reply: &OutboundReply,
    ) -> Result<i64, String> {
        let request = self
            .bot
            .send_message(ChatId(chat_id), &reply.text)
            .parse_mode(reply.parse_mode)
            .reply_parameters(ReplyParameters::new(MessageId(reply_to_message_id as i32)));

        request.await.map(|msg| msg.id.0 as i64).map_err(|e| {
            let msg = format!("Failed to send: {e}");
            warn!("{}", msg);
            msg
        })
    }
}

#[async_trait]
impl HandleResolver for TelegramClient {
    async fn bot_handle(&self) -> Result<String, String> {
        self.handle
            .get_or_try_init(|| async {
                let me = self
                    .bot
                    .get_me()
                    .await
                    .map_err(|e| format!("Failed to get bot info: {e}"))?;
                let username = me.username().to_string();
                info!("Bot username: @{}", username);
                Ok(username)
            })
            .await
            .cloned()
    }
}
