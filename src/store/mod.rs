use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Ticket, TicketFilter, User};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryTicketStore, MemoryUserStore};
pub use postgres::{PgTicketStore, PgUserStore};

/// Errors surfaced by the persistence layer. Converted to `ApiError` at
/// the HTTP boundary; never silently dropped.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn insert(&self, ticket: &Ticket) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, StoreError>;
    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError>;
    async fn find_filtered(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError>;

    /// Open tickets currently assigned to `username`.
    async fn open_assigned_to(&self, username: &str) -> Result<Vec<Ticket>, StoreError>;

    /// Transition a ticket from open to close. Returns false when the
    /// ticket was not open (absent, already closed, or changed
    /// concurrently), so the open->close transition happens at most once.
    async fn close_if_open(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Remove a ticket. Returns false when no ticket had the id.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Ping the backing store.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Build the stores from the environment: Postgres when DATABASE_URL is
/// set, otherwise the in-memory store.
pub async fn from_env() -> Result<(Arc<dyn UserStore>, Arc<dyn TicketStore>), StoreError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = postgres::connect(&url).await?;
            tracing::info!("using postgres ticket store");
            Ok((
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgTicketStore::new(pool)),
            ))
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            Ok((
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryTicketStore::new()),
            ))
        }
    }
}
