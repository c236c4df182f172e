//! Shared mock controller for integration tests.
//!
//! One axum router serves both API surfaces the real controller splits
//! across ports: name resolution and job execution (config API) plus
//! authentication and config-object CRUD (web API). Tests point both base
//! URLs of a `ControllerConfig` at the same listener.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const CSRF_TOKEN: &str = "csrf-test-token";

/// One request the mock saw, with whether it carried the CSRF header.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub body: Value,
    pub csrf: bool,
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub object_type: String,
    pub fq_name: Vec<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct MockState {
    pub objects: HashMap<String, StoredObject>,
    /// Force fqname-to-id to answer with this status and body.
    pub resolve_status: Option<(u16, String)>,
    /// Force create-config-object to fail once this many creates succeeded.
    pub fail_create_after: Option<usize>,
    pub requests: Vec<Recorded>,
    pub jobs: Vec<Value>,
    /// Delay applied to authenticate, for timeout tests.
    pub auth_delay: Option<Duration>,
    next_uuid: u64,
    creates_seen: usize,
}

impl MockState {
    fn new_uuid(&mut self) -> String {
        self.next_uuid += 1;
        format!("0000-{:04}", self.next_uuid)
    }

    pub fn insert_object(&mut self, object_type: &str, fq_name: &[&str], body: Value) -> String {
        let uuid = self.new_uuid();
        self.objects.insert(
            uuid.clone(),
            StoredObject {
                object_type: object_type.to_string(),
                fq_name: fq_name.iter().map(|s| s.to_string()).collect(),
                body,
            },
        );
        uuid
    }

    pub fn find_uuid(&self, object_type: &str, fq_name: &[String]) -> Option<String> {
        self.objects
            .iter()
            .find(|(_, object)| {
                object.object_type == object_type && object.fq_name == fq_name
            })
            .map(|(uuid, _)| uuid.clone())
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .iter()
            .filter(|recorded| recorded.path == path)
            .cloned()
            .collect()
    }
}

pub struct MockController {
    pub addr: SocketAddr,
    pub state: Arc<Mutex<MockState>>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl MockController {
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));

        let router = Router::new()
            .route("/fqname-to-id", post(fqname_to_id))
            .route("/execute-job", post(execute_job))
            .route("/authenticate", post(authenticate))
            .route("/api/tenants/config/get-config-objects", post(get_objects))
            .route("/api/tenants/config/create-config-object", post(create_object))
            .route("/api/tenants/config/update-config-object", post(update_object))
            .route("/api/tenants/config/delete", post(delete_objects))
            .route("/{object_type}/{uuid}", get(read_object))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        Self {
            addr,
            state,
            shutdown_tx,
        }
    }

    /// Base URL used for both the config and the web API surface.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

fn has_csrf(headers: &HeaderMap) -> bool {
    headers
        .get("x-csrf-token")
        .and_then(|value| value.to_str().ok())
        == Some(CSRF_TOKEN)
}

fn record(state: &mut MockState, path: &str, body: Value, csrf: bool) {
    state.requests.push(Recorded {
        path: path.to_string(),
        body,
        csrf,
    });
}

async fn fqname_to_id(
    State(state): State<Arc<Mutex<MockState>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, "/fqname-to-id", body.clone(), false);

    if let Some((status, text)) = &state.resolve_status {
        return (
            StatusCode::from_u16(*status).unwrap(),
            text.clone(),
        )
            .into_response();
    }

    let object_type = body["type"].as_str().unwrap_or_default().to_string();
    let fq_name: Vec<String> = body["fq_name"]
        .as_array()
        .map(|segments| {
            segments
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    match state.find_uuid(&object_type, &fq_name) {
        Some(uuid) => axum::Json(json!({ "uuid": uuid })).into_response(),
        None => (StatusCode::NOT_FOUND, "no object found").into_response(),
    }
}

async fn authenticate(State(state): State<Arc<Mutex<MockState>>>) -> Response {
    let delay = state.lock().unwrap().auth_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    (
        [(
            header::SET_COOKIE,
            format!("_csrf={CSRF_TOKEN}; Path=/"),
        )],
        axum::Json(json!({})),
    )
        .into_response()
}

async fn get_objects(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let csrf = has_csrf(&headers);
    record(
        &mut state,
        "/api/tenants/config/get-config-objects",
        body.clone(),
        csrf,
    );

    let uuid = body["data"][0]["uuid"][0].as_str().unwrap_or_default();
    match state.objects.get(uuid) {
        Some(object) => {
            let envelope = json!([{ object.object_type.clone(): object.body }]);
            axum::Json(envelope).into_response()
        }
        None => (StatusCode::NOT_FOUND, "unknown uuid").into_response(),
    }
}

async fn create_object(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let csrf = has_csrf(&headers);
    record(
        &mut state,
        "/api/tenants/config/create-config-object",
        body.clone(),
        csrf,
    );
    if !csrf {
        return (StatusCode::UNAUTHORIZED, "csrf token missing").into_response();
    }
    if let Some(limit) = state.fail_create_after {
        if state.creates_seen >= limit {
            return (StatusCode::BAD_REQUEST, "create rejected by test").into_response();
        }
    }
    state.creates_seen += 1;

    let Some((object_type, object_body)) = body
        .as_object()
        .and_then(|envelope| envelope.iter().next())
        .map(|(key, value)| (key.clone(), value.clone()))
    else {
        return (StatusCode::BAD_REQUEST, "empty document").into_response();
    };
    let fq_name: Vec<String> = object_body["fq_name"]
        .as_array()
        .map(|segments| {
            segments
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let uuid = state.new_uuid();
    state.objects.insert(
        uuid.clone(),
        StoredObject {
            object_type,
            fq_name,
            body: object_body,
        },
    );
    axum::Json(json!({ "uuid": uuid })).into_response()
}

async fn update_object(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let csrf = has_csrf(&headers);
    record(
        &mut state,
        "/api/tenants/config/update-config-object",
        body.clone(),
        csrf,
    );
    if !csrf {
        return (StatusCode::UNAUTHORIZED, "csrf token missing").into_response();
    }

    let Some((object_type, object_body)) = body
        .as_object()
        .and_then(|envelope| envelope.iter().next())
        .map(|(key, value)| (key.clone(), value.clone()))
    else {
        return (StatusCode::BAD_REQUEST, "empty document").into_response();
    };
    let fq_name: Vec<String> = object_body["fq_name"]
        .as_array()
        .map(|segments| {
            segments
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    match state.find_uuid(&object_type, &fq_name) {
        Some(uuid) => {
            state.objects.get_mut(&uuid).unwrap().body = object_body;
            axum::Json(json!({ "uuid": uuid })).into_response()
        }
        None => (StatusCode::NOT_FOUND, "unknown object").into_response(),
    }
}

async fn delete_objects(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let csrf = has_csrf(&headers);
    record(&mut state, "/api/tenants/config/delete", body.clone(), csrf);
    if !csrf {
        return (StatusCode::UNAUTHORIZED, "csrf token missing").into_response();
    }

    if let Some(entries) = body.as_array() {
        for entry in entries {
            if let Some(ids) = entry["deleteIDs"].as_array() {
                for id in ids.iter().filter_map(Value::as_str) {
                    state.objects.remove(id);
                }
            }
        }
    }
    axum::Json(json!({})).into_response()
}

async fn execute_job(
    State(state): State<Arc<Mutex<MockState>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, "/execute-job", body.clone(), false);
    state.jobs.push(body);
    let id = state.jobs.len();
    axum::Json(json!({ "job_execution_id": format!("job-{id}") })).into_response()
}

async fn read_object(
    State(state): State<Arc<Mutex<MockState>>>,
    Path((object_type, uuid)): Path<(String, String)>,
) -> Response {
    let state = state.lock().unwrap();
    match state.objects.get(&uuid) {
        Some(object) if object.object_type == object_type => {
            axum::Json(json!({ object_type: object.body })).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "unknown uuid").into_response(),
    }
}
