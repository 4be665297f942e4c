use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::models::{Role, User};
use crate::state::AppState;

/// The original API accepted `role` as a scalar or a list; both map to a
/// role vector here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RoleSpec {
    One(Role),
    Many(Vec<Role>),
}

impl RoleSpec {
    fn into_roles(self) -> Vec<Role> {
        match self {
            RoleSpec::One(role) => vec![role],
            RoleSpec::Many(roles) => roles,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub role: Option<RoleSpec>,
}

/// POST /users/new - create a user and answer with a bearer token for it
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let (username, role) = match (payload.username, payload.role) {
        (Some(username), Some(role)) if !username.is_empty() => (username, role),
        _ => return Err(ApiError::validation_error("Please fill all the fields")),
    };

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::conflict("User with given username already exists"));
    }

    let user = User::new(username, role.into_roles());
    state.users.insert(&user).await?;

    let token = generate_jwt(Claims::new(user.id)).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({ "token": token })))
}
