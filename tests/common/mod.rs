// In-memory stand-in for the records REST API
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

const COLLECTIONS: [&str; 4] = ["meetings", "calendars", "participants", "attachments"];

#[derive(Clone, Default)]
pub struct Backend {
    records: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    next_id: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
}

impl Backend {
    /// Make every request answer 500 until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn count(&self, collection: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn insert(&self, collection: &str, mut value: Value) -> String {
        let id = format!("{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        value["id"] = json!(id);
        self.records
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(value);
        id
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .get(collection)?
            .iter()
            .find(|v| v["id"] == id)
            .cloned()
    }

    fn failure(&self) -> Option<Response> {
        if self.failing.load(Ordering::SeqCst) {
            let body = json!({"status": 500, "error": "Internal Server Error", "message": "database offline"});
            return Some((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
        }
        None
    }
}

fn not_found(collection: &str, id: &str) -> Response {
    let body = json!({"status": 404, "error": "Not Found", "message": format!("{} {} not found", collection, id)});
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn known(collection: &str) -> bool {
    COLLECTIONS.contains(&collection)
}

async fn list(State(backend): State<Backend>, Path(collection): Path<String>) -> Response {
    if let Some(failure) = backend.failure() {
        return failure;
    }
    if !known(&collection) {
        return not_found(&collection, "");
    }
    let records = backend
        .records
        .lock()
        .unwrap()
        .get(&collection)
        .cloned()
        .unwrap_or_default();
    Json(records).into_response()
}

async fn create(
    State(backend): State<Backend>,
    Path(collection): Path<String>,
    Json(value): Json<Value>,
) -> Response {
    if let Some(failure) = backend.failure() {
        return failure;
    }
    if !known(&collection) {
        return not_found(&collection, "");
    }
    let id = backend.insert(&collection, value);
    let created = backend.get(&collection, &id).unwrap_or_default();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn fetch(
    State(backend): State<Backend>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    if let Some(failure) = backend.failure() {
        return failure;
    }
    match backend.get(&collection, &id) {
        Some(value) => Json(value).into_response(),
        None => not_found(&collection, &id),
    }
}

async fn update(
    State(backend): State<Backend>,
    Path((collection, id)): Path<(String, String)>,
    Json(mut value): Json<Value>,
) -> Response {
    if let Some(failure) = backend.failure() {
        return failure;
    }
    let mut records = backend.records.lock().unwrap();
    let Some(slot) = records
        .get_mut(&collection)
        .and_then(|list| list.iter_mut().find(|v| v["id"] == id.as_str()))
    else {
        return not_found(&collection, &id);
    };
    value["id"] = json!(id);
    *slot = value.clone();
    Json(value).into_response()
}

async fn delete(
    State(backend): State<Backend>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    if let Some(failure) = backend.failure() {
        return failure;
    }
    let mut records = backend.records.lock().unwrap();
    let Some(list) = records.get_mut(&collection) else {
        return not_found(&collection, &id);
    };
    let before = list.len();
    list.retain(|v| v["id"] != id.as_str());
    if list.len() == before {
        return not_found(&collection, &id);
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Record ids listed in a calendar's `meetingIds` array.
fn listed_ids(calendar: &Value) -> Vec<String> {
    calendar["meetingIds"]
        .as_array()
        .map(|ids| ids.iter().filter_map(|id| id.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

/// Edit the owner's relation and answer with the owner, linked records
/// embedded. Meetings link through `meetingId` on the linked record,
/// calendars through their own `meetingIds` array.
fn relink(
    backend: &Backend,
    owner: &str,
    owner_id: &str,
    relation: &str,
    ids: &[String],
    add: bool,
) -> Response {
    if let Some(failure) = backend.failure() {
        return failure;
    }
    let mut records = backend.records.lock().unwrap();
    let Some(mut record) = records
        .get(owner)
        .and_then(|list| list.iter().find(|v| v["id"] == owner_id))
        .cloned()
    else {
        return not_found(owner, owner_id);
    };

    let embedded: Vec<Value> = match (owner, relation) {
        ("calendars", "meetings") => {
            let mut listed = listed_ids(&record);
            if add {
                for id in ids {
                    if !listed.contains(id) {
                        listed.push(id.clone());
                    }
                }
            } else {
                listed.retain(|id| !ids.contains(id));
            }
            record["meetingIds"] = json!(listed);
            if let Some(slot) = records
                .get_mut("calendars")
                .and_then(|list| list.iter_mut().find(|v| v["id"] == owner_id))
            {
                slot["meetingIds"] = record["meetingIds"].clone();
            }
            records
                .get("meetings")
                .map(|meetings| {
                    meetings
                        .iter()
                        .filter(|m| m["id"].as_str().map(|id| listed.iter().any(|l| l == id)).unwrap_or(false))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        }
        ("meetings", "participants" | "attachments") => {
            let linked = records.entry(relation.to_string()).or_default();
            for item in linked.iter_mut() {
                let matches = item["id"].as_str().map(|id| ids.iter().any(|i| i == id)).unwrap_or(false);
                if matches {
                    item["meetingId"] = if add { json!(owner_id) } else { json!("") };
                }
            }
            linked
                .iter()
                .filter(|r| r["meetingId"] == owner_id)
                .cloned()
                .collect()
        }
        _ => return not_found(relation, ""),
    };
    record[relation] = Value::Array(embedded);
    Json(record).into_response()
}

async fn add_link(
    State(backend): State<Backend>,
    Path((owner, id, relation)): Path<(String, String, String)>,
    Json(ids): Json<Vec<String>>,
) -> Response {
    relink(&backend, &owner, &id, &relation, &ids, true)
}

async fn remove_link(
    State(backend): State<Backend>,
    Path((owner, id, relation)): Path<(String, String, String)>,
    Json(ids): Json<Vec<String>>,
) -> Response {
    relink(&backend, &owner, &id, &relation, &ids, false)
}

pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/{collection}", get(list).post(create))
        .route("/{collection}/{id}", get(fetch).put(update).delete(delete))
        .route("/{collection}/{id}/{relation}", post(add_link).delete(remove_link))
        .with_state(backend)
}

/// Serve `router` on an ephemeral port, returning its base URL.
pub async fn spawn(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

pub async fn spawn_backend() -> (Backend, Url) {
    let backend = Backend::default();
    let url = spawn(router(backend.clone())).await;
    (backend, url)
}

/// A local address nothing is listening on.
pub async fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}
