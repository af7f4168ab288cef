use std::{sync::Arc, time::Duration};

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tracing::{info, warn};

use orb_core::{config::Config, messaging::port::MessagingPort, relay::Relay};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub relay: Arc<Relay>,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    if let Ok(me) = bot.get_me().await {
        info!(username = %me.username(), "relay started");
    }
    info!(operators = cfg.operator_ids.len(), "operator ids configured");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let relay = Arc::new(Relay::new(cfg.clone(), messenger.clone()));

    // Tell the operator we are up (best-effort).
    {
        let cfg = cfg.clone();
        let messenger = messenger.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            let chat = cfg.primary_operator().into();
            if let Err(e) = messenger
                .send_text(chat, "🤖 Relay online. Waiting for user messages.", None)
                .await
            {
                warn!(error = %e, "startup notice failed");
            }
        });
    }

    let state = Arc::new(AppState {
        cfg,
        relay,
        messenger,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
