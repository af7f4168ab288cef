use std::sync::Arc;

use teloxide::types::Contact;

use orb_core::{
    domain::{ChatId, UserId},
    messaging::types::InboundEvent,
    Result,
};

use crate::router::AppState;

pub async fn handle_contact(
    user: UserId,
    chat: ChatId,
    contact: &Contact,
    state: &Arc<AppState>,
) -> Result<()> {
    let display_name = format!(
        "{} {}",
        contact.first_name,
        contact.last_name.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();

    state
        .relay
        .dispatch(InboundEvent::ContactShared {
            user,
            chat,
            display_name,
            phone: contact.phone_number.clone(),
        })
        .await
}
