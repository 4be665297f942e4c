#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use helpdesk_api::handlers;
use helpdesk_api::state::AppState;

/// Router over a fresh in-memory store. Each test file builds its own so
/// suites stay hermetic.
pub fn app() -> Router {
    handlers::app(AppState::in_memory())
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_json(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body is not JSON")?
    };
    Ok((status, body))
}

/// Register a user and hand back its bearer token.
pub async fn register(app: &Router, username: &str, role: Value) -> Result<String> {
    let (status, body) = send(
        app,
        post_json("/users/new", None, json!({ "username": username, "role": role })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "registration failed: {} {}", status, body);
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("missing token in registration response")
}

/// Create a ticket and hand back its id.
pub async fn create_ticket(
    app: &Router,
    token: &str,
    title: &str,
    priority: &str,
    assigned_to: &str,
) -> Result<String> {
    let (status, body) = send(
        app,
        post_json(
            "/tickets/new",
            Some(token),
            json!({
                "title": title,
                "description": format!("{} description", title),
                "priority": priority,
                "assignedTo": assigned_to,
            }),
        ),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "ticket creation failed: {} {}", status, body);
    body["details"]
        .as_str()
        .map(str::to_string)
        .context("missing ticket id in creation response")
}
