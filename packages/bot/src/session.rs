// Per-user conversation state.
//
// At most one session per user. Starting any flow replaces whatever session
// was active - deliberate overwrite semantics, covered by tests. All access
// goes through the store's async lock so rapid messages from the same user
// serialize instead of racing on the map.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Which field the submission flow expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStep {
    Name,
    City,
    Services,
    Contact,
}

/// A submission being collected, one field per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    /// Submitter identity, set when the flow starts. Immutable.
    pub user_id: i64,
    pub step: SubmitStep,
    pub name: String,
    pub city: String,
    pub services: String,
    pub contact: String,
}

impl SubmissionDraft {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            step: SubmitStep::Name,
            name: String::new(),
            city: String::new(),
            services: String::new(),
            contact: String::new(),
        }
    }
}

/// The active flow for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Submitting(SubmissionDraft),
    AwaitingQuery,
}

/// Lock-guarded map of user id to active session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<i64, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or replace the user's session.
    pub async fn set(&self, user_id: i64, session: Session) {
        self.inner.lock().await.insert(user_id, session);
    }

    /// Remove and return the user's session, leaving the user idle.
    pub async fn take(&self, user_id: i64) -> Option<Session> {
        self.inner.lock().await.remove(&user_id)
    }

    /// Peek at the user's session without clearing it.
    pub async fn get(&self, user_id: i64) -> Option<Session> {
        self.inner.lock().await.get(&user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starting_a_new_flow_replaces_the_old_session() {
        let store = SessionStore::new();
        store
            .set(1, Session::Submitting(SubmissionDraft::new(1)))
            .await;
        store.set(1, Session::AwaitingQuery).await;

        assert_eq!(store.take(1).await, Some(Session::AwaitingQuery));
        assert_eq!(store.take(1).await, None);
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_user() {
        let store = SessionStore::new();
        store.set(1, Session::AwaitingQuery).await;

        assert_eq!(store.get(2).await, None);
        assert_eq!(store.get(1).await, Some(Session::AwaitingQuery));
    }
}
