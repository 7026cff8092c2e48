//! Decides whether the bot should answer a message, and with what.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::types::ParseMode;
use tracing::error;

/// Maintenance notice sent whenever the filter passes. Literal periods are
/// escaped for Telegram's MarkdownV2 renderer.
pub const MAINTENANCE_MESSAGE: &str = "I'm down for maintenance right now\\.\n\
Please be patient, I should be back up in a few days\\.";

/// Whether a message came from a one-on-one chat or a multi-party chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    Private,
    /// Any non-private chat: group, supergroup, or channel.
    Group,
}

/// A single inbound message, built per update by the transport layer.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Message text, absent for non-text content (photos, stickers, ...).
    pub text: Option<String>,
    pub kind: ConversationKind,
    /// True when this update is an edit of an earlier message. Edits are
    /// answered exactly like new messages.
    pub is_edit: bool,
}

/// The reply to hand to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundReply {
    pub text: String,
    pub parse_mode: ParseMode,
}

/// Resolves the bot's own @-handle. Abstracted so tests don't need a live
/// Telegram connection.
#[async_trait]
pub trait HandleResolver: Send + Sync {
    /// The bot's username, without the leading `@`.
    async fn bot_handle(&self) -> Result<String, String>;
}

/// Should the bot reply to `message`?
///
/// Non-text messages are never answered. Private chats are always answered.
/// Group chats are answered only when the text mentions `@{bot_handle}`.
pub fn should_respond(message: &InboundMessage, bot_handle: &str) -> bool {
    let Some(text) = message.text.as_deref() else {
        return false;
    };

    match message.kind {
        ConversationKind::Private => true,
        ConversationKind::Group => text.contains(&format!("@{bot_handle}")),
    }
}

/// Stateless per-event filter: holds the reply template and the handle
/// resolver, nothing else.
pub struct Responder {
    reply_text: String,
    parse_mode: ParseMode,
    handles: Arc<dyn HandleResolver>,
}

impl Responder {
    pub fn new(reply_text: String, parse_mode: ParseMode, handles: Arc<dyn HandleResolver>) -> Self {
        Self {
            reply_text,
            parse_mode,
            handles,
        }
    }

    /// Run the filter on one message. Returns the reply to send, or `None`
    /// when the bot should stay silent.
    ///
    /// A handle lookup failure is logged and the event dropped; this bot is
    /// best-effort and never escalates per-event errors.
    pub async fn handle_message(&self, message: &InboundMessage) -> Option<OutboundReply> {
        let handle = match self.handles.bot_handle().await {
            Ok(h) => h,
            Err(e) => {
                error!("Failed to resolve bot handle: {e}");
                return None;
            }
        };

        if !should_respond(message, &handle) {
            return None;
        }

        Some(OutboundReply {
            text: self.reply_text.clone(),
            parse_mode: self.parse_mode,
        })
    }
}
