//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::{debug, error};

// Import dialogue types
use crate::dialogue::{ScheduleDialogue, ScheduleDialogueState};

use super::dialogue_manager::{DialogueController, Reply};
use super::ui_builder::create_reply_keyboard;

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    match reply {
        Reply::Text { text, keyboard } => {
            let request = bot.send_message(chat_id, text.clone());
            match keyboard {
                Some(keyboard) => {
                    request.reply_markup(create_reply_keyboard(keyboard)).await?;
                }
                None => {
                    request.await?;
                }
            }
        }
        Reply::Document { document, .. } => {
            let file = InputFile::memory(document.bytes.clone()).file_name(document.file_name.clone());
            bot.send_document(chat_id, file)
                .caption(document.caption.clone())
                .await?;
        }
    }
    Ok(())
}

/// Send one reply, falling back to its text form when it is rejected.
/// Failures are logged so the remaining replies still go out.
async fn deliver(bot: &Bot, chat_id: ChatId, reply: Reply) {
    let Err(e) = send_reply(bot, chat_id, &reply).await else {
        return;
    };

    match reply.fallback() {
        Some(fallback) => {
            error!(user_id = %chat_id, error = %e, "Failed to send schedule document, sending fallback");
            if let Err(e) = send_reply(bot, chat_id, &fallback).await {
                error!(user_id = %chat_id, error = %e, "Failed to send fallback message");
            }
        }
        None => error!(user_id = %chat_id, error = %e, "Failed to send message"),
    }
}

async fn store_state(dialogue: &ScheduleDialogue, next: ScheduleDialogueState) -> Result<()> {
    if next.is_idle() {
        dialogue.exit().await?;
    } else {
        dialogue.update(next).await?;
    }
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: ScheduleDialogue,
    controller: Arc<DialogueController>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(user_id = %msg.chat.id, "Received non-text message from user");
        deliver(&bot, msg.chat.id, controller.use_menu()).await;
        return Ok(());
    };

    let state = dialogue.get_or_default().await?;
    debug!(user_id = %msg.chat.id, dialogue_state = ?state, "Received text message from user");

    let step = controller.handle_text(&state, text).await;

    // Session is stored before any reply goes out
    if step.next != state {
        debug!(user_id = %msg.chat.id, from = ?state, to = ?step.next, "Dialogue transition");
    }
    store_state(&dialogue, step.next).await?;

    for reply in step.replies {
        deliver(&bot, msg.chat.id, reply).await;
    }

    Ok(())
}
