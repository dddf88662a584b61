//! e2e tests for the REST API: real listener on 127.0.0.1:0, driven with
//! reqwest. Run: cargo test -p serve --test rest_api

use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Bind to a random port and spawn the server. Returns (base_url, handle);
/// abort the handle at the end of each test.
async fn spawn_server() -> (
    String,
    tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);
    let handle = tokio::spawn(serve::run_serve_on_listener(listener));
    (url, handle)
}

#[tokio::test]
async fn health_reports_ok() {
    let (url, server) = spawn_server().await;

    let body: Value = reqwest::get(format!("{url}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    server.abort();
}

#[tokio::test]
async fn add_triplets_then_read_graph() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    for (subject, predicate, object) in [
        ("Harry", "is_friend_of", "Ron"),
        ("Ron", "is_friend_of", "Harry"),
        ("Harry", "studies_at", "Hogwarts"),
    ] {
        let resp = client
            .post(format!("{url}/tools/add_triplet"))
            .json(&json!({"subject": subject, "predicate": predicate, "object": object}))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["tool"], "add_triplet");
        assert_eq!(
            body["result"],
            json!(format!("Added: ({subject}) -[{predicate}]-> ({object})"))
        );
    }

    let graph: Value = client
        .get(format!("{url}/graph"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(graph["nodes"], json!(["Harry", "Ron", "Hogwarts"]));
    assert_eq!(
        graph["edges"],
        json!([
            {"source": "Harry", "target": "Ron", "relation": "is_friend_of"},
            {"source": "Ron", "target": "Harry", "relation": "is_friend_of"},
            {"source": "Harry", "target": "Hogwarts", "relation": "studies_at"},
        ])
    );

    server.abort();
}

#[tokio::test]
async fn tools_are_listed() {
    let (url, server) = spawn_server().await;

    let specs: Value = reqwest::get(format!("{url}/tools"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = specs
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["add_triplet", "get_graph_state", "reset_graph"]);

    server.abort();
}

#[tokio::test]
async fn unknown_tool_is_404_with_kind() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{url}/tools/save_graph_image"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "unknown-tool");

    server.abort();
}

#[tokio::test]
async fn invalid_arguments_are_422_with_kind() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{url}/tools/add_triplet"))
        .json(&json!({"subject": "  ", "predicate": "p", "object": "B"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "invalid-arguments");

    server.abort();
}

#[tokio::test]
async fn malformed_body_is_400_with_kind() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{url}/tools/add_triplet"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "malformed-request");

    server.abort();
}

#[tokio::test]
async fn no_arg_tools_accept_empty_body() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{url}/tools/add_triplet"))
        .json(&json!({"subject": "A", "predicate": "p", "object": "B"}))
        .send()
        .await
        .unwrap();

    // Bare POST, no body or content type.
    let resp = client
        .post(format!("{url}/tools/get_graph_state"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    let state: Value = serde_json::from_str(body["result"].as_str().unwrap()).unwrap();
    assert_eq!(state["nodes"], json!(["A", "B"]));

    server.abort();
}

#[tokio::test]
async fn export_formats() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{url}/tools/add_triplet"))
        .json(&json!({"subject": "Harry", "predicate": "studies_at", "object": "Hogwarts"}))
        .send()
        .await
        .unwrap();

    let dot = client
        .get(format!("{url}/graph/export?format=dot"))
        .send()
        .await
        .unwrap();
    assert_eq!(dot.headers()["content-type"], "text/vnd.graphviz");
    let dot = dot.text().await.unwrap();
    assert!(dot.contains("\"Harry\" -> \"Hogwarts\" [label=\"studies_at\"];"));

    let json_export: Value = client
        .get(format!("{url}/graph/export"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json_export["nodes"], json!(["Harry", "Hogwarts"]));

    let bad = client
        .get(format!("{url}/graph/export?format=png"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 422);

    server.abort();
}

#[tokio::test]
async fn stats_and_reset() {
    let (url, server) = spawn_server().await;
    let client = reqwest::Client::new();

    for i in 0..3 {
        client
            .post(format!("{url}/tools/add_triplet"))
            .json(&json!({"subject": format!("n{i}"), "predicate": "points_to", "object": "hub"}))
            .send()
            .await
            .unwrap();
    }

    let stats: Value = client
        .get(format!("{url}/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["triplets_added"], 3);
    assert_eq!(stats["graph_size"], json!({"nodes": 4, "edges": 3}));

    let resp = client
        .post(format!("{url}/reset"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let graph: Value = client
        .get(format!("{url}/graph"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(graph, json!({"nodes": [], "edges": []}));

    let stats: Value = client
        .get(format!("{url}/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // Counters survive a reset; only the graph size goes back to zero.
    assert_eq!(stats["triplets_added"], 3);
    assert_eq!(stats["resets"], 1);
    assert_eq!(stats["graph_size"], json!({"nodes": 0, "edges": 0}));

    server.abort();
}
