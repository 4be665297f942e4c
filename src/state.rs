use std::sync::Arc;

use crate::store::{self, StoreError, TicketStore, UserStore};
use crate::workflow::TicketWorkflow;

/// Shared application state injected into handlers and middleware. Stores
/// are trait objects so the backend is an explicit dependency, not a
/// process-wide registry.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tickets: Arc<dyn TicketStore>,
    pub workflow: Arc<TicketWorkflow>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, tickets: Arc<dyn TicketStore>) -> Self {
        let workflow = Arc::new(TicketWorkflow::new(tickets.clone()));
        Self {
            users,
            tickets,
            workflow,
        }
    }

    /// Stores per the environment: Postgres when DATABASE_URL is set,
    /// in-memory otherwise.
    pub async fn from_env() -> Result<Self, StoreError> {
        let (users, tickets) = store::from_env().await?;
        Ok(Self::new(users, tickets))
    }

    /// Fully in-memory state; what the test suites run against.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(store::MemoryUserStore::new()),
            Arc::new(store::MemoryTicketStore::new()),
        )
    }
}
