use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a ticket. Wire values are the original API's
/// "open"/"close" pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Close,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Close => "close",
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "close" => Ok(TicketStatus::Close),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Ticket priority. Variant order carries the total order
/// low < medium < high, so `Ord` comparisons match the business rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    /// Username of the assignee. Weak reference: nothing guarantees a
    /// matching user exists.
    pub assigned_to: String,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TicketStatus,
        priority: Priority,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            status,
            priority,
            assigned_to: assigned_to.into(),
            created_at: Utc::now(),
        }
    }
}

/// A single listing filter. At most one is honored per request; selection
/// precedence is status > title > priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketFilter {
    Status(TicketStatus),
    Title(String),
    Priority(Priority),
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            TicketFilter::Status(status) => ticket.status == *status,
            TicketFilter::Title(title) => ticket.title == *title,
            TicketFilter::Priority(priority) => ticket.priority == *priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_low_medium_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn ticket_serializes_with_camel_case_keys() {
        let ticket = Ticket::new(
            "Broken printer",
            "Second floor printer jams",
            TicketStatus::Open,
            Priority::Low,
            "alice",
        );
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["assignedTo"], "alice");
        assert_eq!(value["status"], "open");
        assert_eq!(value["priority"], "low");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn filter_matches_on_single_field() {
        let ticket = Ticket::new("a", "b", TicketStatus::Open, Priority::High, "bob");
        assert!(TicketFilter::Status(TicketStatus::Open).matches(&ticket));
        assert!(TicketFilter::Title("a".into()).matches(&ticket));
        assert!(!TicketFilter::Priority(Priority::Low).matches(&ticket));
    }
}
