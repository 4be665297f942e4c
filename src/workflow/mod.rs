use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{Priority, Role, Ticket};
use crate::store::{StoreError, TicketStore};

/// Identity attempting a workflow operation.
#[derive(Debug, Clone)]
pub struct Requester {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Requester {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

/// Result of a close request that passed the authorization gate.
#[derive(Debug)]
pub enum CloseOutcome {
    Closed,
    /// Close refused; carries the open higher-priority tickets that must
    /// be dealt with first.
    Rejected(Vec<Ticket>),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("ticket does not exist")]
    NotFound,

    #[error("requester is not permitted to perform this operation")]
    Forbidden,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Decides close and delete requests over an injected ticket store.
///
/// Close decisions are serialized per ticket id through a lazy registry of
/// async mutexes, and the final status write is conditional on the ticket
/// still being open, so the open->close transition happens at most once
/// under concurrent requests.
pub struct TicketWorkflow {
    tickets: Arc<dyn TicketStore>,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl TicketWorkflow {
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        Self {
            tickets,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn close_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    }

    /// Close `ticket_id` on behalf of `requester`.
    ///
    /// Permitted for admins and for the ticket's assignee. A ticket can
    /// only close while no open ticket of strictly higher priority is
    /// assigned to the same user; otherwise the blocking set is returned.
    /// Closing an already-closed ticket reports `Closed` without touching
    /// the store again.
    pub async fn request_close(
        &self,
        ticket_id: Uuid,
        requester: &Requester,
    ) -> Result<CloseOutcome, WorkflowError> {
        let lock = self.close_lock(ticket_id).await;
        let _guard = lock.lock().await;

        let ticket = self
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or(WorkflowError::NotFound)?;

        if !requester.is_admin() && requester.username != ticket.assigned_to {
            return Err(WorkflowError::Forbidden);
        }

        let open = self.tickets.open_assigned_to(&ticket.assigned_to).await?;
        let blockers = blocking_tickets(ticket.priority, &open);
        if !blockers.is_empty() {
            return Ok(CloseOutcome::Rejected(blockers));
        }

        self.tickets.close_if_open(ticket_id).await?;
        Ok(CloseOutcome::Closed)
    }

    /// Delete `ticket_id`. Admin-only; deleting an absent id is NotFound.
    pub async fn request_delete(
        &self,
        ticket_id: Uuid,
        requester: &Requester,
    ) -> Result<(), WorkflowError> {
        if !requester.is_admin() {
            return Err(WorkflowError::Forbidden);
        }

        if !self.tickets.delete(ticket_id).await? {
            return Err(WorkflowError::NotFound);
        }

        // The ticket is gone; its close lock can go too.
        self.locks.lock().await.remove(&ticket_id);
        Ok(())
    }
}

/// Open tickets that block closing a ticket of `priority`: every open
/// ticket of strictly higher priority. With the low < medium < high order
/// this is exactly the rule set: low is blocked by medium and high,
/// medium only by high, high by nothing.
pub fn blocking_tickets(priority: Priority, open_tickets: &[Ticket]) -> Vec<Ticket> {
    open_tickets
        .iter()
        .filter(|t| t.priority > priority)
        .cloned()
        .collect()
}
