pub mod tickets;
pub mod users;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Json, Router};
use serde_json::{json, Value};

use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/users/new", post(users::create));

    let protected = Router::new()
        .route("/tickets/new", post(tickets::create))
        .route("/tickets/all", get(tickets::all))
        .route("/tickets", get(tickets::query))
        .route("/tickets/delete", post(tickets::delete))
        .route("/tickets/markAsClosed", post(tickets::mark_as_closed))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    public
        .merge(protected)
        // Global middleware
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Helpdesk API",
        "version": version,
        "endpoints": {
            "users": "/users/new (public)",
            "tickets": "/tickets/new, /tickets/all, /tickets?status=|title=|priority= (bearer token)",
            "workflow": "/tickets/markAsClosed, /tickets/delete (bearer token)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.tickets.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
