use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Default for Role {
    fn default() -> Self {
        Role::Employee
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Mint a new user with a fresh id. An empty role list falls back to
    /// the default `[employee]`.
    pub fn new(username: impl Into<String>, roles: Vec<Role>) -> Self {
        let roles = if roles.is_empty() { vec![Role::default()] } else { roles };
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            roles,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roles_default_to_employee() {
        let user = User::new("alice", vec![]);
        assert_eq!(user.roles, vec![Role::Employee]);
        assert!(!user.is_admin());
    }

    #[test]
    fn admin_role_is_detected_among_several() {
        let user = User::new("root", vec![Role::Employee, Role::Admin]);
        assert!(user.is_admin());
    }
}
