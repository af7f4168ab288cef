use dashmap::DashMap;

use crate::domain::UserId;

/// Current reply target per operator.
///
/// The target is sticky: it survives any number of operator replies and is
/// replaced only by the next selection. There is deliberately no clear
/// operation.
#[derive(Debug, Default)]
pub struct ReplyRouter {
    targets: DashMap<UserId, UserId>,
}

impl ReplyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target(&self, operator: UserId, target: UserId) {
        self.targets.insert(operator, target);
    }

    pub fn target(&self, operator: UserId) -> Option<UserId> {
        self.targets.get(&operator).map(|t| *t)
    }
}

/// Pending location requests: user -> operator who asked.
///
/// One outstanding request per user. `consume` removes the entry in the same
/// step that reads it, so a duplicate location reply cannot match twice.
#[derive(Debug, Default)]
pub struct LocationCorrelator {
    pending: DashMap<UserId, UserId>,
}

impl LocationCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self, user: UserId, operator: UserId) {
        self.pending.insert(user, operator);
    }

    pub fn consume(&self, user: UserId) -> Option<UserId> {
        self.pending.remove(&user).map(|(_, operator)| operator)
    }
}
