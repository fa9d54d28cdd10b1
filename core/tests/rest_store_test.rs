//! RestStore against a throwaway local axum server standing in for PostgREST.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use pretty_assertions::assert_eq;
use sen_core::config::StoreConfig;
use sen_core::store::{first_row, RestStore, Store, StoreError};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Seen {
    table: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Value,
}

type Log = Arc<Mutex<Vec<Seen>>>;

async fn echo_rows(
    State(log): State<Log>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    log.lock().unwrap().push(Seen { table: table.clone(), query, headers, body: body.clone() });

    if table == "broken" {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "column does not exist" })));
    }
    (StatusCode::CREATED, Json(json!([body])))
}

async fn fake_store() -> (StoreConfig, Log) {
    let log: Log = Arc::default();
    let app = Router::new()
        .route("/rest/v1/{table}", post(echo_rows))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = StoreConfig {
        base_url: format!("http://{addr}"),
        anon_key: "anon-key".into(),
        service_role_key: "service-key".into(),
    };
    (config, log)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

#[tokio::test]
async fn insert_sends_credentials_and_representation_preference() {
    let (config, log) = fake_store().await;
    let store = RestStore::new(&config).unwrap();

    let body = store.insert_row("agents", &json!({ "name": "scout" })).await.unwrap();

    assert_eq!(first_row(body), Some(json!({ "name": "scout" })));
    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.table, "agents");
    assert_eq!(header(&seen.headers, "apikey"), "anon-key");
    assert_eq!(header(&seen.headers, "authorization"), "Bearer service-key");
    assert_eq!(header(&seen.headers, "content-type"), "application/json");
    assert_eq!(header(&seen.headers, "prefer"), "return=representation");
    assert!(seen.query.is_empty());
}

#[tokio::test]
async fn upsert_targets_conflict_column_and_merges() {
    let (config, log) = fake_store().await;
    let store = RestStore::new(&config).unwrap();

    store
        .upsert_row("agent_registry", &json!({ "id": "sen-001" }), "id")
        .await
        .unwrap();

    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.query.get("on_conflict").map(String::as_str), Some("id"));
    assert_eq!(
        header(&seen.headers, "prefer"),
        "resolution=merge-duplicates,return=representation"
    );
    assert_eq!(seen.body, json!({ "id": "sen-001" }));
}

#[tokio::test]
async fn non_success_status_is_an_error_with_body() {
    let (config, _log) = fake_store().await;
    let store = RestStore::new(&config).unwrap();

    let err = store.insert_row("broken", &json!({})).await.unwrap_err();
    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("column does not exist"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    // Bind then drop so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = RestStore::new(&StoreConfig {
        base_url: format!("http://{addr}"),
        anon_key: "anon".into(),
        service_role_key: "service".into(),
    })
    .unwrap();

    let err = store.insert_row("agents", &json!({})).await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}
