mod config;
mod responder;
mod telegram;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatKind;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use config::Config;
use responder::{ConversationKind, InboundMessage, Responder};
use telegram::TelegramClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            ),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let bot = Bot::new(&config.telegram_bot_token);
    let telegram = Arc::new(TelegramClient::new(bot.clone()));
    let responder = Arc::new(Responder::new(
        config.reply_text,
        config.parse_mode,
        telegram.clone(),
    ));

    info!("🔧 Maintenance bot starting...");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_new_message))
        .branch(Update::filter_edited_message().endpoint(handle_edited_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![responder, telegram])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_new_message(
    msg: Message,
    responder: Arc<Responder>,
    telegram: Arc<TelegramClient>,
) -> ResponseResult<()> {
    process_message(&msg, false, &responder, &telegram).await;
    Ok(())
}

async fn handle_edited_message(
    msg: Message,
    responder: Arc<Responder>,
    telegram: Arc<TelegramClient>,
) -> ResponseResult<()> {
    process_message(&msg, true, &responder, &telegram).await;
    Ok(())
}

/// Filter one update and send the maintenance notice when it passes. Errors
/// are logged and the event dropped so the dispatch loop keeps running.
async fn process_message(
    msg: &Message,
    is_edit: bool,
    responder: &Responder,
    telegram: &TelegramClient,
) {
    let inbound = telegram_to_inbound(msg, is_edit);

    let Some(reply) = responder.handle_message(&inbound).await else {
        return;
    };

    info!(
        "Replying with maintenance notice in chat {}{}",
        msg.chat.id,
        if is_edit { " (edited message)" } else { "" }
    );

    if let Err(e) = telegram
        .send_reply(msg.chat.id.0, msg.id.0 as i64, &reply)
        .await
    {
        error!("Error sending maintenance message: {e}");
    }
}

fn telegram_to_inbound(msg: &Message, is_edit: bool) -> InboundMessage {
    // Everything that isn't a one-on-one chat counts as group-like
    let kind = if matches!(msg.chat.kind, ChatKind::Private(_)) {
        ConversationKind::Private
    } else {
        ConversationKind::Group
    };

    InboundMessage {
        text: msg.text().map(str::to_string),
        kind,
        is_edit,
    }
}
