use std::sync::Arc;

use orb_core::{
    domain::{ChatId, UserId},
    messaging::types::InboundEvent,
    Result,
};

use crate::router::AppState;

pub async fn handle_text(
    user: UserId,
    chat: ChatId,
    text: &str,
    state: &Arc<AppState>,
) -> Result<()> {
    let event = if state.cfg.is_operator(user) {
        InboundEvent::OperatorMessage {
            operator: user,
            chat,
            text: text.to_string(),
        }
    } else {
        InboundEvent::UserMessage {
            user,
            chat,
            text: text.to_string(),
        }
    };
    state.relay.dispatch(event).await
}
