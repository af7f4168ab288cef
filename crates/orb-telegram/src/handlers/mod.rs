//! Telegram update handlers.
//!
//! Each handler classifies one raw update into an `InboundEvent` and hands it
//! to the relay; every reply goes back out through the messaging port.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use tracing::warn;

use orb_core::{
    domain::{ChatId, UserId},
    Result,
};

use crate::router::AppState;

mod callback;
mod commands;
mod contact;
mod location;
mod text;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    if let Err(e) = callback::handle_callback(&q, &state).await {
        warn!(callback_id = %q.id, error = %e, "callback handling failed");
    }
    Ok(())
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Err(e) = route_message(&msg, &state).await {
        warn!(chat_id = msg.chat.id.0, error = %e, "message handling failed");
    }
    Ok(())
}

async fn route_message(msg: &Message, state: &Arc<AppState>) -> Result<()> {
    // Channel posts and service updates carry no sender.
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let user = UserId(from.id.0 as i64);
    let chat = ChatId(msg.chat.id.0);

    if let Some(contact) = msg.contact() {
        return contact::handle_contact(user, chat, contact, state).await;
    }

    if let Some(location) = msg.location() {
        return location::handle_location(user, chat, location, state).await;
    }

    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(user, chat, text, state).await;
        }
        return text::handle_text(user, chat, text, state).await;
    }

    // Stickers, photos, voice and the like are not part of the relay.
    Ok(())
}
