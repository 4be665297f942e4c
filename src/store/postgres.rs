use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::config;
use crate::models::{Priority, Role, Ticket, TicketFilter, TicketStatus, User};
use crate::store::{StoreError, TicketStore, UserStore};

/// Connect a pool using the configured limits and make sure the schema
/// exists. Status and priority are stored as their wire strings.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let db_config = &config::config().database;

    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
        .connect(database_url)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id uuid PRIMARY KEY,
            username text NOT NULL UNIQUE,
            roles text[] NOT NULL,
            created_at timestamptz NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tickets (
            id uuid PRIMARY KEY,
            title text NOT NULL,
            description text NOT NULL,
            status text NOT NULL,
            priority text NOT NULL,
            assigned_to text NOT NULL,
            created_at timestamptz NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|r| Role::from_str(r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Query)?;
        Ok(User {
            id: row.id,
            username: row.username,
            roles,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct TicketRow {
    id: Uuid,
    title: String,
    description: String,
    status: String,
    priority: String,
    assigned_to: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = StoreError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: row.id,
            title: row.title,
            description: row.description,
            status: TicketStatus::from_str(&row.status).map_err(StoreError::Query)?,
            priority: Priority::from_str(&row.priority).map_err(StoreError::Query)?,
            assigned_to: row.assigned_to,
            created_at: row.created_at,
        })
    }
}

fn tickets_from_rows(rows: Vec<TicketRow>) -> Result<Vec<Ticket>, StoreError> {
    rows.into_iter().map(Ticket::try_from).collect()
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();
        sqlx::query("INSERT INTO users (id, username, roles, created_at) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.username)
            .bind(&roles)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, roles, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, roles, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }
}

pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TICKET_COLUMNS: &str = "id, title, description, status, priority, assigned_to, created_at";

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn insert(&self, ticket: &Ticket) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO tickets (id, title, description, status, priority, assigned_to, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(ticket.id)
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.priority.as_str())
        .bind(&ticket.assigned_to)
        .bind(ticket.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, StoreError> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM tickets WHERE id = $1",
            TICKET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Ticket::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Ticket>, StoreError> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM tickets ORDER BY created_at, id",
            TICKET_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        tickets_from_rows(rows)
    }

    async fn find_filtered(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let (column, value) = match filter {
            TicketFilter::Status(status) => ("status", status.as_str().to_string()),
            TicketFilter::Title(title) => ("title", title.clone()),
            TicketFilter::Priority(priority) => ("priority", priority.as_str().to_string()),
        };
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM tickets WHERE {} = $1 ORDER BY created_at, id",
            TICKET_COLUMNS, column
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;
        tickets_from_rows(rows)
    }

    async fn open_assigned_to(&self, username: &str) -> Result<Vec<Ticket>, StoreError> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM tickets WHERE assigned_to = $1 AND status = 'open' ORDER BY created_at, id",
            TICKET_COLUMNS
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        tickets_from_rows(rows)
    }

    async fn close_if_open(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE tickets SET status = 'close' WHERE id = $1 AND status = 'open'")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
