use std::sync::Arc;

use orb_core::{
    domain::{ChatId, UserId},
    messaging::types::InboundEvent,
    Result,
};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(
    user: UserId,
    chat: ChatId,
    text: &str,
    state: &Arc<AppState>,
) -> Result<()> {
    let (cmd, args) = parse_command(text);
    match cmd.as_str() {
        "start" => {
            state
                .relay
                .dispatch(InboundEvent::Start { user, chat })
                .await
        }
        "get" => {
            state
                .relay
                .dispatch(InboundEvent::LocateCommand {
                    operator: user,
                    chat,
                    args,
                })
                .await
        }
        // Operators get unknown commands relayed as reply text; for anyone
        // else they are dropped.
        _ if state.cfg.is_operator(user) => {
            state
                .relay
                .dispatch(InboundEvent::OperatorMessage {
                    operator: user,
                    chat,
                    text: text.to_string(),
                })
                .await
        }
        _ => Ok(()),
    }
}
