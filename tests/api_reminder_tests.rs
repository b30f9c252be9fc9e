// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminder CRUD over HTTP.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;
use common::{create_offline_test_app, create_test_app, send};

fn aspirin() -> Value {
    json!({
        "userEmail": "a@x.com",
        "medicationName": "Aspirin",
        "time": "08:00",
        "frequency": "daily",
        "caregivers": ["c@x.com"]
    })
}

async fn create(app: &axum::Router, body: Value) -> Value {
    let (status, reminder) = send(app, "POST", "/api/reminders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    reminder
}

fn sorted_ids(list: &Value) -> Vec<String> {
    let mut ids: Vec<String> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_create_then_fetch_returns_same_fields() {
    let (app, _, _) = create_test_app();

    let created = create(&app, aspirin()).await;
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(created["userEmail"], "a@x.com");
    assert_eq!(created["medicationName"], "Aspirin");
    assert_eq!(created["time"], "08:00");
    assert_eq!(created["frequency"], "daily");
    assert_eq!(created["caregivers"], json!(["c@x.com"]));

    let (status, fetched) = send(&app, "GET", &format!("/api/reminders/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_optional_fields_default() {
    let (app, _, _) = create_test_app();

    let created = create(&app, json!({"userEmail": "a@x.com"})).await;
    assert!(created["medicationName"].is_null());
    assert!(created["time"].is_null());
    assert_eq!(created["caregivers"], json!([]));
}

#[tokio::test]
async fn test_create_requires_user_email() {
    let (app, _, _) = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/reminders",
        Some(json!({"medicationName": "Aspirin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "userEmail is required");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _, _) = create_test_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/reminders")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_by_time_is_exact() {
    let (app, _, _) = create_test_app();

    let a = create(&app, aspirin()).await;
    let b = create(
        &app,
        json!({"userEmail": "b@x.com", "medicationName": "Insulin", "time": "08:00"}),
    )
    .await;
    create(
        &app,
        json!({"userEmail": "a@x.com", "medicationName": "Statin", "time": "08:00:00"}),
    )
    .await;

    let (status, list) = send(&app, "GET", "/api/reminders?time=08:00", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = vec![
        a["id"].as_str().unwrap().to_string(),
        b["id"].as_str().unwrap().to_string(),
    ];
    expected.sort();
    assert_eq!(sorted_ids(&list), expected);
}

#[tokio::test]
async fn test_list_by_email_and_unfiltered() {
    let (app, _, _) = create_test_app();

    let a = create(&app, aspirin()).await;
    create(&app, json!({"userEmail": "b@x.com", "time": "09:00"})).await;

    let (_, mine) = send(&app, "GET", "/api/reminders?email=a@x.com", None).await;
    assert_eq!(sorted_ids(&mine), vec![a["id"].as_str().unwrap().to_string()]);

    let (_, all) = send(&app, "GET", "/api/reminders", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_time_filter_wins_over_email() {
    let (app, _, _) = create_test_app();

    create(&app, aspirin()).await;
    let other = create(&app, json!({"userEmail": "b@x.com", "time": "21:00"})).await;

    // email=a@x.com would match the first reminder; time must take over.
    let (_, list) = send(&app, "GET", "/api/reminders?time=21:00&email=a@x.com", None).await;
    assert_eq!(
        sorted_ids(&list),
        vec![other["id"].as_str().unwrap().to_string()]
    );
}

#[tokio::test]
async fn test_update_frequency_keeps_other_fields() {
    let (app, _, _) = create_test_app();

    let created = create(&app, aspirin()).await;
    let uri = format!("/api/reminders/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({"frequency": "weekly"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["frequency"], "weekly");

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["frequency"], "weekly");
    assert_eq!(fetched["medicationName"], "Aspirin");
    assert_eq!(fetched["time"], "08:00");
    assert_eq!(fetched["userEmail"], "a@x.com");
    assert_eq!(fetched["caregivers"], json!(["c@x.com"]));
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn test_delete_then_fetch_is_not_found() {
    let (app, _, _) = create_test_app();

    let created = create(&app, aspirin()).await;
    let uri = format!("/api/reminders/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Reminder not found");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let (app, _, _) = create_test_app();
    let unknown = format!("/api/reminders/{}", uuid::Uuid::new_v4());

    for uri in [unknown.as_str(), "/api/reminders/definitely-not-an-id"] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PUT", uri, Some(json!({"time": "10:00"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_store_failures_use_handler_messages() {
    let app = create_offline_test_app();
    let uri = format!("/api/reminders/{}", uuid::Uuid::new_v4());

    let cases = [
        ("POST", "/api/reminders", Some(aspirin()), "Failed to create a reminder"),
        ("GET", "/api/reminders", None, "Failed to retrieve reminders"),
        ("GET", uri.as_str(), None, "Failed to find the reminder"),
        ("PUT", uri.as_str(), Some(json!({})), "Failed to update the reminder"),
        ("DELETE", uri.as_str(), None, "Failed to delete the reminder"),
    ];

    for (method, path, body, message) in cases {
        let (status, json) = send(&app, method, path, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, path);
        assert_eq!(json["error"], message);
    }
}

#[tokio::test]
async fn test_root_banner() {
    let (app, _, _) = create_test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("MedMinder server running.."));
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = create_test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_put_null_clears_field() {
    let (app, _, _) = create_test_app();

    let created = create(&app, aspirin()).await;
    let uri = format!("/api/reminders/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({"time": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["time"].is_null());
    assert_eq!(updated["frequency"], "daily");

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert!(fetched["time"].is_null());
    assert_eq!(fetched["medicationName"], "Aspirin");
}

#[tokio::test]
async fn test_notify_path_as_id_is_not_found() {
    let (app, _, _) = create_test_app();

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({"time": "10:00"}))),
        ("DELETE", None),
    ] {
        let (status, json) = send(&app, method, "/api/reminders/notify", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", method);
        assert_eq!(json["error"], "Reminder not found");
    }
}

#[tokio::test]
async fn test_bad_query_has_json_error() {
    let (app, _, _) = create_test_app();

    let (status, body) = send(&app, "GET", "/api/reminders?time=a&time=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
