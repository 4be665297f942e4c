mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn created_tickets_default_to_open() -> Result<()> {
    let app = common::app();
    let token = common::register(&app, "alice", json!("employee")).await?;

    let id = common::create_ticket(&app, &token, "Printer jam", "low", "alice").await?;

    let (status, body) = common::send(&app, common::get("/tickets/all", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["id"], id);
    assert_eq!(details[0]["status"], "open");
    assert_eq!(details[0]["assignedTo"], "alice");
    Ok(())
}

#[tokio::test]
async fn ticket_creation_requires_all_fields() -> Result<()> {
    let app = common::app();
    let token = common::register(&app, "alice", json!("employee")).await?;

    let (status, body) = common::send(
        &app,
        common::post_json(
            "/tickets/new",
            Some(&token),
            json!({ "title": "no priority", "description": "d", "assignedTo": "alice" }),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please fill all the fields");
    Ok(())
}

#[tokio::test]
async fn listing_filters_on_a_single_field() -> Result<()> {
    let app = common::app();
    let token = common::register(&app, "alice", json!("employee")).await?;

    common::create_ticket(&app, &token, "first", "low", "alice").await?;
    common::create_ticket(&app, &token, "second", "high", "bob").await?;

    let (status, body) = common::send(&app, common::get("/tickets?priority=high", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["title"], "second");

    let (_, body) = common::send(&app, common::get("/tickets?title=first", Some(&token))).await?;
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["priority"], "low");

    let (_, body) = common::send(&app, common::get("/tickets?status=close", Some(&token))).await?;
    assert_eq!(body["details"], json!([]));
    Ok(())
}

#[tokio::test]
async fn status_filter_wins_over_priority() -> Result<()> {
    let app = common::app();
    let token = common::register(&app, "alice", json!("employee")).await?;

    common::create_ticket(&app, &token, "open low", "low", "alice").await?;

    // Both filters supplied: status is honored, priority ignored
    let (status, body) = common::send(
        &app,
        common::get("/tickets?status=open&priority=high", Some(&token)),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn no_filter_lists_everything() -> Result<()> {
    let app = common::app();
    let token = common::register(&app, "alice", json!("employee")).await?;

    common::create_ticket(&app, &token, "a", "low", "alice").await?;
    common::create_ticket(&app, &token, "b", "medium", "alice").await?;

    let (status, body) = common::send(&app, common::get("/tickets", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn unknown_filter_values_are_rejected() -> Result<()> {
    let app = common::app();
    let token = common::register(&app, "alice", json!("employee")).await?;

    let (status, _) = common::send(&app, common::get("/tickets?priority=urgent", Some(&token))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = common::send(&app, common::get("/tickets?status=reopened", Some(&token))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
