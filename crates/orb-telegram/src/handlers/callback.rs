use std::sync::Arc;

use teloxide::types::CallbackQuery;

use orb_core::{
    domain::{ChatId, UserId},
    messaging::types::{CallbackAction, InboundEvent},
    Result,
};

use crate::router::AppState;

pub async fn handle_callback(q: &CallbackQuery, state: &Arc<AppState>) -> Result<()> {
    let operator = UserId(q.from.id.0 as i64);
    let data = q.data.as_deref().unwrap_or_default();
    let chat = q.message.as_ref().map(|m| ChatId(m.chat.id.0));
    let action = CallbackAction::parse(data);

    // Presses on detached messages, payloads we do not recognize, and presses
    // from non-operators are acknowledged and dropped.
    let (Some(chat), Some(action)) = (chat, action) else {
        return state.messenger.answer_callback(&q.id).await;
    };
    if !state.cfg.is_operator(operator) {
        return state.messenger.answer_callback(&q.id).await;
    }

    let CallbackAction::ReplyTo(target) = action;
    state
        .relay
        .dispatch(InboundEvent::ReplyTargetChosen {
            operator,
            chat,
            callback_id: q.id.clone(),
            target,
        })
        .await
}
