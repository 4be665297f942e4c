use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Ticket, TicketFilter, TicketStatus, User};
use crate::store::{StoreError, TicketStore, UserStore};

/// In-memory user store. Default backend when no DATABASE_URL is
/// configured; also what the test suite runs against.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

#[derive(Default)]
pub struct MemoryTicketStore {
    tickets: Arc<RwLock<HashMap<Uuid, Ticket>>>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stable listing order regardless of map iteration order.
fn sorted(mut tickets: Vec<Ticket>) -> Vec<Ticket> {
    tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    tickets
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn insert(&self, ticket: &Ticket) -> Result<(), StoreError> {
        let mut tickets = self.tickets.write().await;
        tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, StoreError> {
        let tickets = self.tickets.read().await;
        Ok(tickets.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        let tickets = self.tickets.read().await;
        Ok(sorted(tickets.values().cloned().collect()))
    }

    async fn find_filtered(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let tickets = self.tickets.read().await;
        Ok(sorted(
            tickets.values().filter(|t| filter.matches(t)).cloned().collect(),
        ))
    }

    async fn open_assigned_to(&self, username: &str) -> Result<Vec<Ticket>, StoreError> {
        let tickets = self.tickets.read().await;
        Ok(sorted(
            tickets
                .values()
                .filter(|t| t.status == TicketStatus::Open && t.assigned_to == username)
                .cloned()
                .collect(),
        ))
    }

    async fn close_if_open(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(&id) {
            Some(ticket) if ticket.status == TicketStatus::Open => {
                ticket.status = TicketStatus::Close;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tickets = self.tickets.write().await;
        Ok(tickets.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
