use dashmap::DashMap;

use crate::domain::UserId;

/// Shown in place of a display name when the contact payload has none.
const NAME_PLACEHOLDER: &str = "Unnamed";

/// Verification record for a single user.
#[derive(Clone, Debug, PartialEq)]
pub struct UserSession {
    pub display_name: String,
    pub phone: String,
    pub verified: bool,
    /// Most recent inbound text; informational, not used for routing.
    pub last_message: Option<String>,
}

/// Per-user verification state.
///
/// A record is either absent (unknown user) or verified; re-verification
/// replaces the whole record.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, UserSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_verification(&self, user: UserId, display_name: &str, phone: &str) {
        let name = display_name.trim();
        let display_name = if name.is_empty() {
            NAME_PLACEHOLDER.to_string()
        } else {
            name.to_string()
        };

        self.sessions.insert(
            user,
            UserSession {
                display_name,
                phone: phone.to_string(),
                verified: true,
                last_message: None,
            },
        );
    }

    pub fn is_verified(&self, user: UserId) -> bool {
        self.sessions
            .get(&user)
            .map(|s| s.verified)
            .unwrap_or(false)
    }

    /// Owned copy; no map guard outlives the call.
    pub fn get(&self, user: UserId) -> Option<UserSession> {
        self.sessions.get(&user).map(|s| s.clone())
    }

    /// No-op for unknown users.
    pub fn set_last_message(&self, user: UserId, text: &str) {
        if let Some(mut session) = self.sessions.get_mut(&user) {
            session.last_message = Some(text.to_string());
        }
    }
}
