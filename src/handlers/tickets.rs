use axum::extract::{Extension, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Priority, Ticket, TicketFilter, TicketStatus};
use crate::state::AppState;
use crate::workflow::{CloseOutcome, Requester, WorkflowError};

fn requester(auth: &AuthUser) -> Requester {
    Requester {
        username: auth.username.clone(),
        roles: auth.roles.clone(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
}

/// POST /tickets/new - mint a ticket; status defaults to open
pub async fn create(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthUser>,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<Json<Value>, ApiError> {
    let (title, description, priority, assigned_to) = match (
        payload.title,
        payload.description,
        payload.priority,
        payload.assigned_to,
    ) {
        (Some(t), Some(d), Some(p), Some(a)) => (t, d, p, a),
        _ => return Err(ApiError::validation_error("Please fill all the fields")),
    };

    let ticket = Ticket::new(
        title,
        description,
        payload.status.unwrap_or(TicketStatus::Open),
        priority,
        assigned_to,
    );
    state.tickets.insert(&ticket).await?;

    Ok(Json(json!({ "details": ticket.id })))
}

/// GET /tickets/all
pub async fn all(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let details = state.tickets.find_all().await?;
    Ok(Json(json!({ "details": details })))
}

#[derive(Debug, Deserialize)]
pub struct TicketQuery {
    pub status: Option<String>,
    pub title: Option<String>,
    pub priority: Option<String>,
}

impl TicketQuery {
    /// At most one filter is honored; precedence status > title > priority.
    fn into_filter(self) -> Result<Option<TicketFilter>, ApiError> {
        if let Some(status) = self.status {
            let status = status
                .parse::<TicketStatus>()
                .map_err(ApiError::validation_error)?;
            return Ok(Some(TicketFilter::Status(status)));
        }
        if let Some(title) = self.title {
            return Ok(Some(TicketFilter::Title(title)));
        }
        if let Some(priority) = self.priority {
            let priority = priority
                .parse::<Priority>()
                .map_err(ApiError::validation_error)?;
            return Ok(Some(TicketFilter::Priority(priority)));
        }
        Ok(None)
    }
}

/// GET /tickets?status=|title=|priority= - single-filter listing; with no
/// filter supplied this lists everything
pub async fn query(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthUser>,
    Query(params): Query<TicketQuery>,
) -> Result<Json<Value>, ApiError> {
    let details = match params.into_filter()? {
        Some(filter) => state.tickets.find_filtered(&filter).await?,
        None => state.tickets.find_all().await?,
    };
    Ok(Json(json!({ "details": details })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketIdRequest {
    pub ticket_id: Option<Uuid>,
}

impl TicketIdRequest {
    fn required(self) -> Result<Uuid, ApiError> {
        self.ticket_id
            .ok_or_else(|| ApiError::validation_error("Please fill all the fields"))
    }
}

/// POST /tickets/delete - admin-only removal
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<TicketIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let ticket_id = payload.required()?;

    match state.workflow.request_delete(ticket_id, &requester(&auth)).await {
        Ok(()) => Ok(Json(json!({ "deletedTicket": ticket_id }))),
        Err(WorkflowError::Forbidden) => Err(ApiError::forbidden("Only admin can delete a ticket")),
        Err(WorkflowError::NotFound) => Err(ApiError::not_found("Ticket does not exist")),
        Err(WorkflowError::Storage(e)) => Err(e.into()),
    }
}

/// POST /tickets/markAsClosed - priority-gated close
pub async fn mark_as_closed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<TicketIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let ticket_id = payload.required()?;

    match state.workflow.request_close(ticket_id, &requester(&auth)).await {
        Ok(CloseOutcome::Closed) => Ok(Json(json!({ "closedTicket": ticket_id }))),
        Ok(CloseOutcome::Rejected(blockers)) => Err(ApiError::priority_blocked(
            "A higher priority task remains to be closed",
            blockers,
        )),
        Err(WorkflowError::Forbidden) => Err(ApiError::forbidden(
            "Only admin or assigned user can update a ticket",
        )),
        Err(WorkflowError::NotFound) => Err(ApiError::not_found("Ticket does not exist")),
        Err(WorkflowError::Storage(e)) => Err(e.into()),
    }
}
