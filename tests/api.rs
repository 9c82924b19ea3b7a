use std::net::SocketAddr;

use inkdraft::config::Config;
use inkdraft::state::AppState;
use serde_json::{json, Value};

async fn spawn_server() -> SocketAddr {
    let config = Config::default();
    let state = AppState::new(&config);
    let app = inkdraft::app(&config, state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let addr = spawn_server().await;
    let res = reqwest::get(format!("http://{addr}/api/health"))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn document_crud_round_trip() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("http://{addr}/api/documents"))
        .json(&json!({"title": "Chapter 3: The Mysterious Letter", "content": "Sarah walked.", "wordCount": 2}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "Chapter 3: The Mysterious Letter");
    assert_eq!(created["wordCount"], 2);

    let fetched: Value = client
        .get(format!("http://{addr}/api/documents/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["content"], "Sarah walked.");

    let updated: Value = client
        .put(format!("http://{addr}/api/documents/{id}"))
        .json(&json!({"content": "Sarah walked on.", "wordCount": 3}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["wordCount"], 3);
    assert_eq!(updated["title"], "Chapter 3: The Mysterious Letter");

    let deleted = client
        .delete(format!("http://{addr}/api/documents/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 204);

    let gone = client
        .get(format!("http://{addr}/api/documents/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
async fn unknown_document_returns_404() {
    let addr = spawn_server().await;
    let res = reqwest::get(format!(
        "http://{addr}/api/documents/00000000-0000-0000-0000-000000000000"
    ))
    .await
    .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Document not found");
}

#[tokio::test]
async fn characters_are_listed_for_their_document() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let document: Value = client
        .post(format!("http://{addr}/api/documents"))
        .json(&json!({"title": "Draft"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let document_id = document["id"].as_str().unwrap();

    let created = client
        .post(format!("http://{addr}/api/characters"))
        .json(&json!({"documentId": document_id, "name": "Test Character"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);

    let listed: Value = client
        .get(format!("http://{addr}/api/documents/{document_id}/characters"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let characters = listed.as_array().unwrap();
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0]["name"], "Test Character");
    assert_eq!(characters[0]["relationships"], json!([]));
}

#[tokio::test]
async fn character_listing_for_unknown_document_returns_404() {
    let addr = spawn_server().await;
    let res = reqwest::get(format!(
        "http://{addr}/api/documents/00000000-0000-0000-0000-000000000000/characters"
    ))
    .await
    .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn timeline_listing_is_ordered() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let document: Value = client
        .post(format!("http://{addr}/api/documents"))
        .json(&json!({"title": "Draft"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let document_id = document["id"].as_str().unwrap();

    for (title, order) in [("climax", 2), ("setup", 1)] {
        client
            .post(format!("http://{addr}/api/timeline"))
            .json(&json!({"documentId": document_id, "title": title, "order": order}))
            .send()
            .await
            .unwrap();
    }

    let listed: Value = client
        .get(format!("http://{addr}/api/documents/{document_id}/timeline"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let events = listed.as_array().unwrap();
    assert_eq!(events[0]["title"], "setup");
    assert_eq!(events[1]["title"], "climax");
}

#[tokio::test]
async fn ai_endpoints_degrade_when_unconfigured() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/api/ai/synonyms"))
        .json(&json!({"word": "walked", "context": "Sarah walked through the corridor."}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 503);

    // Missing required fields are rejected before the backend is consulted.
    let res = client
        .post(format!("http://{addr}/api/ai/analyze"))
        .json(&json!({"text": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}
