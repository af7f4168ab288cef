use std::sync::Arc;

use teloxide::types::Location;

use orb_core::{
    domain::{ChatId, UserId},
    messaging::types::InboundEvent,
    Result,
};

use crate::router::AppState;

pub async fn handle_location(
    user: UserId,
    chat: ChatId,
    location: &Location,
    state: &Arc<AppState>,
) -> Result<()> {
    state
        .relay
        .dispatch(InboundEvent::LocationShared {
            user,
            chat,
            latitude: location.latitude,
            longitude: location.longitude,
        })
        .await
}
