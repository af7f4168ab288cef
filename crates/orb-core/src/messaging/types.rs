use crate::domain::{ChatId, UserId};

/// Classified inbound event, produced by the transport adapter.
///
/// Transport-specific payloads stay in the adapter; the relay only sees
/// these shapes.
#[derive(Clone, Debug)]
pub enum InboundEvent {
    /// `/start` from anyone.
    Start { user: UserId, chat: ChatId },
    /// A contact payload shared through the verification keyboard.
    ContactShared {
        user: UserId,
        chat: ChatId,
        display_name: String,
        phone: String,
    },
    /// Free text from a non-operator.
    UserMessage {
        user: UserId,
        chat: ChatId,
        text: String,
    },
    /// An operator pressed a reply button under a forwarded message.
    ReplyTargetChosen {
        operator: UserId,
        chat: ChatId,
        callback_id: String,
        target: UserId,
    },
    /// Free text from an operator.
    OperatorMessage {
        operator: UserId,
        chat: ChatId,
        text: String,
    },
    /// `/get <userId>` with its raw argument string; validated by the relay.
    LocateCommand {
        operator: UserId,
        chat: ChatId,
        args: String,
    },
    /// A location payload shared by a user.
    LocationShared {
        user: UserId,
        chat: ChatId,
        latitude: f64,
        longitude: f64,
    },
}

const REPLY_PREFIX: &str = "reply_";

/// Typed action carried in inline-button callback payloads.
///
/// Encoded on the wire as a fixed prefix plus the decimal user id
/// (`reply_<userId>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    ReplyTo(UserId),
}

impl CallbackAction {
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::ReplyTo(user) => format!("{REPLY_PREFIX}{}", user.0),
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        let rest = data.strip_prefix(REPLY_PREFIX)?;
        rest.parse::<i64>()
            .ok()
            .map(|id| CallbackAction::ReplyTo(UserId(id)))
    }
}

/// Keyboard attached to an outbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum Keyboard {
    /// One-time reply keyboard with a single share-contact button.
    RequestContact { label: String },
    /// One-time reply keyboard with a single share-location button.
    RequestLocation { label: String },
    /// Inline buttons, one per row.
    Inline(InlineKeyboard),
    /// Remove any active reply keyboard.
    Remove,
}

impl Keyboard {
    pub fn request_contact(label: impl Into<String>) -> Self {
        Keyboard::RequestContact {
            label: label.into(),
        }
    }

    pub fn request_location(label: impl Into<String>) -> Self {
        Keyboard::RequestLocation {
            label: label.into(),
        }
    }

    /// Single inline button that selects `target` as the reply target.
    pub fn reply_button(label: impl Into<String>, target: UserId) -> Self {
        Keyboard::Inline(InlineKeyboard::new(vec![InlineButton {
            label: label.into(),
            action: CallbackAction::ReplyTo(target),
        }]))
    }
}

/// Inline keyboard (buttons) used for reply-target selection.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineButton {
    pub label: String,
    pub action: CallbackAction,
}

impl InlineKeyboard {
    pub fn new(buttons: Vec<InlineButton>) -> Self {
        Self { buttons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_payload_round_trip() {
        let action = CallbackAction::ReplyTo(UserId(111));
        assert_eq!(action.encode(), "reply_111");
        assert_eq!(CallbackAction::parse("reply_111"), Some(action));
    }

    #[test]
    fn callback_parse_rejects_junk() {
        assert_eq!(CallbackAction::parse(""), None);
        assert_eq!(CallbackAction::parse("reply_"), None);
        assert_eq!(CallbackAction::parse("reply_abc"), None);
        assert_eq!(CallbackAction::parse("forward_5"), None);
    }

    #[test]
    fn reply_button_carries_the_target() {
        let Keyboard::Inline(kb) = Keyboard::reply_button("Reply", UserId(7)) else {
            panic!("expected an inline keyboard");
        };
        assert_eq!(kb.buttons.len(), 1);
        assert_eq!(kb.buttons[0].action, CallbackAction::ReplyTo(UserId(7)));
    }
}
