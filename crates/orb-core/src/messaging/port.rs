use async_trait::async_trait;

use crate::{domain::ChatId, messaging::types::Keyboard, Result};

/// Outbound transport port.
///
/// Telegram is the first implementation; the relay only ever talks to this
/// trait.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str, keyboard: Option<Keyboard>) -> Result<()>;

    async fn send_location(&self, chat: ChatId, latitude: f64, longitude: f64) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}
