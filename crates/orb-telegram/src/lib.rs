//! Telegram adapter (teloxide).
//!
//! This crate implements the `orb-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{
        ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
        KeyboardMarkup, KeyboardRemove, ReplyMarkup,
    },
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use orb_core::{
    domain::ChatId,
    errors::Error,
    messaging::{port::MessagingPort, types::Keyboard},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Transport(format!("telegram error: {e}"))
    }

    fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
        match keyboard {
            Keyboard::RequestContact { label } => {
                let button = KeyboardButton::new(label.clone()).request(ButtonRequest::Contact);
                ReplyMarkup::Keyboard(
                    KeyboardMarkup::new(vec![vec![button]])
                        .resize_keyboard(true)
                        .one_time_keyboard(true),
                )
            }
            Keyboard::RequestLocation { label } => {
                let button = KeyboardButton::new(label.clone()).request(ButtonRequest::Location);
                ReplyMarkup::Keyboard(
                    KeyboardMarkup::new(vec![vec![button]])
                        .resize_keyboard(true)
                        .one_time_keyboard(true),
                )
            }
            Keyboard::Inline(kb) => {
                let rows: Vec<Vec<InlineKeyboardButton>> = kb
                    .buttons
                    .iter()
                    .map(|b| {
                        vec![InlineKeyboardButton::callback(
                            b.label.clone(),
                            b.action.encode(),
                        )]
                    })
                    .collect();
                ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows))
            }
            Keyboard::Remove => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
        }
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat: ChatId, text: &str, keyboard: Option<Keyboard>) -> Result<()> {
        let markup = keyboard.as_ref().map(Self::reply_markup);
        self.with_retry(|| {
            let mut req = self.bot.send_message(Self::tg_chat(chat), text.to_string());
            if let Some(markup) = markup.clone() {
                req = req.reply_markup(markup);
            }
            req
        })
        .await?;
        Ok(())
    }

    async fn send_location(&self, chat: ChatId, latitude: f64, longitude: f64) -> Result<()> {
        self.with_retry(|| self.bot.send_location(Self::tg_chat(chat), latitude, longitude))
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.with_retry(|| self.bot.answer_callback_query(callback_id.to_string()))
            .await?;
        Ok(())
    }
}
