mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn registration_returns_a_usable_token() -> Result<()> {
    let app = common::app();

    let token = common::register(&app, "alice", json!("employee")).await?;

    let (status, body) = common::send(&app, common::get("/tickets/all", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"], json!([]));
    Ok(())
}

#[tokio::test]
async fn registration_accepts_a_role_list() -> Result<()> {
    let app = common::app();

    let token = common::register(&app, "root", json!(["admin", "employee"])).await?;
    let (status, _) = common::send(&app, common::get("/tickets/all", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn registration_requires_username_and_role() -> Result<()> {
    let app = common::app();

    let (status, body) = common::send(
        &app,
        common::post_json("/users/new", None, json!({ "username": "alice" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please fill all the fields");

    let (status, _) = common::send(
        &app,
        common::post_json("/users/new", None, json!({ "role": "employee" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() -> Result<()> {
    let app = common::app();

    common::register(&app, "alice", json!("employee")).await?;
    let (status, body) = common::send(
        &app,
        common::post_json(
            "/users/new",
            None,
            json!({ "username": "alice", "role": "admin" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with given username already exists");
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_or_garbage_tokens() -> Result<()> {
    let app = common::app();

    let (status, _) = common::send(&app, common::get("/tickets/all", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, common::get("/tickets/all", Some("not-a-jwt"))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn health_and_root_are_public() -> Result<()> {
    let app = common::app();

    let (status, body) = common::send(&app, common::get("/health", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = common::send(&app, common::get("/", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Helpdesk API");
    Ok(())
}
