// BotKernel - helper-bot dependencies behind trait objects
//
// Holds everything the helper bot's flows need and provides access via
// traits for testability.

use std::sync::Arc;

use super::traits::{BaseAssistant, BaseChat, BaseDirectory};
use crate::session::SessionStore;

/// BotKernel holds the helper bot's dependencies
pub struct BotKernel {
    pub chat: Arc<dyn BaseChat>,
    pub directory: Arc<dyn BaseDirectory>,
    pub assistant: Arc<dyn BaseAssistant>,
    pub sessions: SessionStore,
    /// Identities allowed to approve/reject submissions.
    pub moderators: Vec<i64>,
}

impl BotKernel {
    pub fn new(
        chat: Arc<dyn BaseChat>,
        directory: Arc<dyn BaseDirectory>,
        assistant: Arc<dyn BaseAssistant>,
        moderators: Vec<i64>,
    ) -> Self {
        Self {
            chat,
            directory,
            assistant,
            sessions: SessionStore::new(),
            moderators,
        }
    }

    /// Pure authorization predicate for moderator-gated actions.
    pub fn is_moderator(&self, user_id: i64) -> bool {
        self.moderators.contains(&user_id)
    }
}
