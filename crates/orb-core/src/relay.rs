use std::sync::Arc;

use tracing::warn;

use crate::{
    config::Config,
    domain::{ChatId, UserId},
    messaging::{
        port::MessagingPort,
        types::{InboundEvent, Keyboard},
    },
    routing::{LocationCorrelator, ReplyRouter},
    session::SessionStore,
    Result,
};

/// Relay dispatcher: owns the three state maps and applies one transition
/// per inbound event.
///
/// Sends through the transport port are the only await points; the maps are
/// never held across them.
pub struct Relay {
    cfg: Arc<Config>,
    transport: Arc<dyn MessagingPort>,
    sessions: SessionStore,
    reply_targets: ReplyRouter,
    locations: LocationCorrelator,
}

impl Relay {
    pub fn new(cfg: Arc<Config>, transport: Arc<dyn MessagingPort>) -> Self {
        Self {
            cfg,
            transport,
            sessions: SessionStore::new(),
            reply_targets: ReplyRouter::new(),
            locations: LocationCorrelator::new(),
        }
    }

    pub async fn dispatch(&self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::Start { user, chat } => self.on_start(user, chat).await,
            InboundEvent::ContactShared {
                user,
                chat,
                display_name,
                phone,
            } => self.on_contact(user, chat, &display_name, &phone).await,
            InboundEvent::UserMessage { user, chat, text } => {
                self.on_user_message(user, chat, &text).await
            }
            InboundEvent::ReplyTargetChosen {
                operator,
                chat,
                callback_id,
                target,
            } => {
                self.on_reply_target(operator, chat, &callback_id, target)
                    .await
            }
            InboundEvent::OperatorMessage {
                operator,
                chat,
                text,
            } => self.on_operator_message(operator, chat, &text).await,
            InboundEvent::LocateCommand {
                operator,
                chat,
                args,
            } => self.on_locate_command(operator, chat, &args).await,
            InboundEvent::LocationShared {
                user,
                chat,
                latitude,
                longitude,
            } => self.on_location(user, chat, latitude, longitude).await,
        }
    }

    async fn on_start(&self, user: UserId, chat: ChatId) -> Result<()> {
        if self.cfg.is_operator(user) {
            return self
                .transport
                .send_text(
                    chat,
                    "👑 You are the operator. Messages from users will arrive here.",
                    None,
                )
                .await;
        }

        if self.sessions.is_verified(user) {
            return self
                .transport
                .send_text(
                    chat,
                    "📨 Send me a message and I will pass it to the operator.",
                    None,
                )
                .await;
        }

        self.transport
            .send_text(
                chat,
                "👋 Hi! To message the operator, first confirm you are not a bot.",
                Some(Keyboard::request_contact("✅ Confirm I am not a bot")),
            )
            .await
    }

    async fn on_contact(
        &self,
        user: UserId,
        chat: ChatId,
        display_name: &str,
        phone: &str,
    ) -> Result<()> {
        self.sessions.record_verification(user, display_name, phone);
        self.transport
            .send_text(
                chat,
                "✅ Thanks! You can now send messages to the operator.",
                Some(Keyboard::Remove),
            )
            .await
    }

    async fn on_user_message(&self, user: UserId, chat: ChatId, text: &str) -> Result<()> {
        let Some(session) = self.sessions.get(user).filter(|s| s.verified) else {
            return self
                .transport
                .send_text(
                    chat,
                    "❗ Please confirm you are not a bot first: /start",
                    None,
                )
                .await;
        };

        self.sessions.set_last_message(user, text);

        let notice = format!(
            "📩 New message\n👤 Name: {}\n🆔 ID: {}\n📱 Phone: {}\n\n💬 {}",
            session.display_name, user, session.phone, text
        );
        let button = Keyboard::reply_button(format!("✉️ Reply to {}", session.display_name), user);
        self.transport
            .send_text(self.operator_chat(), &notice, Some(button))
            .await?;

        self.transport
            .send_text(chat, "✅ Your message was delivered to the operator.", None)
            .await
    }

    async fn on_reply_target(
        &self,
        operator: UserId,
        chat: ChatId,
        callback_id: &str,
        target: UserId,
    ) -> Result<()> {
        if let Err(e) = self.transport.answer_callback(callback_id).await {
            warn!(error = %e, "callback ack failed");
        }

        // Validate before mutating; the prompt addresses the target by id.
        if self.sessions.get(target).is_none() {
            return self
                .transport
                .send_text(chat, &format!("❌ Unknown user: {target}"), None)
                .await;
        }

        self.reply_targets.set_target(operator, target);
        self.transport
            .send_text(
                chat,
                &format!("✏️ Write your message for User#{target} and I will deliver it."),
                None,
            )
            .await
    }

    async fn on_operator_message(&self, operator: UserId, chat: ChatId, text: &str) -> Result<()> {
        let Some(target) = self.reply_targets.target(operator) else {
            return self
                .transport
                .send_text(
                    chat,
                    "❗ Pick a recipient first: press a ✉️ Reply button under a forwarded message.",
                    None,
                )
                .await;
        };

        // The target stays selected after the send; only the next button
        // press changes it.
        let outgoing = format!("👑 Message from the operator:\n\n{text}");
        match self.transport.send_text(target.into(), &outgoing, None).await {
            Ok(()) => {
                self.transport
                    .send_text(chat, &format!("✅ Delivered to User#{target}."), None)
                    .await
            }
            Err(e) => {
                warn!(target = target.0, error = %e, "reply delivery failed");
                self.transport
                    .send_text(chat, &format!("❌ Could not deliver the message: {e}"), None)
                    .await
            }
        }
    }

    async fn on_locate_command(&self, operator: UserId, chat: ChatId, args: &str) -> Result<()> {
        // Operator-only; everyone else gets no reply at all.
        if !self.cfg.is_operator(operator) {
            return Ok(());
        }

        let mut parts = args.split_whitespace();
        let target = match (parts.next(), parts.next()) {
            (Some(raw), None) => match raw.parse::<i64>() {
                Ok(id) => UserId(id),
                Err(_) => {
                    return self
                        .transport
                        .send_text(chat, &format!("❗ Not a user id: {raw}"), None)
                        .await;
                }
            },
            _ => {
                return self
                    .transport
                    .send_text(chat, "❗ Usage: /get <user id>", None)
                    .await;
            }
        };

        if !self.sessions.is_verified(target) {
            return self
                .transport
                .send_text(chat, &format!("❌ Unknown user: {target}"), None)
                .await;
        }

        self.locations.request(target, operator);
        self.transport
            .send_text(
                target.into(),
                "📍 The operator asks for your location. Share it with the button below.",
                Some(Keyboard::request_location("📍 Share my location")),
            )
            .await?;

        self.transport
            .send_text(
                chat,
                &format!("📨 Location request sent to User#{target}."),
                None,
            )
            .await
    }

    async fn on_location(
        &self,
        user: UserId,
        chat: ChatId,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        let Some(operator) = self.locations.consume(user) else {
            return self
                .transport
                .send_text(
                    chat,
                    "ℹ️ Location received, but nobody asked for it right now.",
                    None,
                )
                .await;
        };

        let name = self
            .sessions
            .get(user)
            .map(|s| s.display_name)
            .unwrap_or_else(|| format!("User#{user}"));

        let notice = format!(
            "📍 Location from {name} (🆔 {user})\n🌐 Latitude: {latitude}\n🌐 Longitude: {longitude}"
        );
        self.transport
            .send_text(operator.into(), &notice, None)
            .await?;
        self.transport
            .send_location(operator.into(), latitude, longitude)
            .await?;

        self.transport
            .send_text(
                chat,
                "✅ Thanks! Your location was forwarded to the operator.",
                Some(Keyboard::Remove),
            )
            .await
    }

    fn operator_chat(&self) -> ChatId {
        self.cfg.primary_operator().into()
    }
}
