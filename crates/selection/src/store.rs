//! Session context storage
//!
//! The state machine never owns contexts; callers load one per turn, hand it
//! in by `&mut`, and put it back afterwards.

use async_trait::async_trait;
use dashmap::DashMap;
use printify_agent_common::SessionId;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::context::SessionContext;

#[async_trait]
pub trait SessionContextStore: Send + Sync {
    /// Context for `session`, created idle if absent
    async fn get(&self, session: &SessionId) -> SessionContext;

    async fn put(&self, session: &SessionId, context: SessionContext);

    async fn remove(&self, session: &SessionId) -> Option<SessionContext>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Mutex serializing turns of one session.
    ///
    /// Every call for the same `session` returns the same mutex.
    fn turn_lock(&self, session: &SessionId) -> Arc<Mutex<()>>;
}

/// Process-local store; distinct sessions live on separate shards
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    contexts: DashMap<SessionId, SessionContext>,
    turn_locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionContextStore for InMemorySessionStore {
    async fn get(&self, session: &SessionId) -> SessionContext {
        self.contexts
            .entry(session.clone())
            .or_insert_with(|| {
                debug!(session = %session, "Created session context");
                SessionContext::new()
            })
            .clone()
    }

    async fn put(&self, session: &SessionId, context: SessionContext) {
        self.contexts.insert(session.clone(), context);
    }

    async fn remove(&self, session: &SessionId) -> Option<SessionContext> {
        self.turn_locks.remove(session);
        self.contexts.remove(session).map(|(_, context)| context)
    }

    async fn len(&self) -> usize {
        self.contexts.len()
    }

    fn turn_lock(&self, session: &SessionId) -> Arc<Mutex<()>> {
        self.turn_locks
            .entry(session.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
