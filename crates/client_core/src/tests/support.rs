//! Test doubles: an in-memory gateway and an axum stub of the visitor backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{VisitorDraft, VisitorId, VisitorRecord};
use tokio::net::TcpListener;

use crate::{error::GatewayError, gateway::VisitorGateway};

pub(crate) fn sample_draft(name: &str) -> VisitorDraft {
    VisitorDraft {
        name: name.to_string(),
        phone: "1".to_string(),
        email: "a@x.com".to_string(),
        date: "2024-01-01".to_string(),
        purpose: "P".to_string(),
        meets_whom: "B".to_string(),
        comments: String::new(),
    }
}

pub(crate) fn record_from(id: i64, draft: &VisitorDraft) -> VisitorRecord {
    VisitorRecord {
        id: VisitorId(id),
        name: draft.name.clone(),
        phone: draft.phone.clone(),
        email: draft.email.clone(),
        date: draft.date.clone(),
        purpose: draft.purpose.clone(),
        meets_whom: draft.meets_whom.clone(),
        comments: Some(draft.comments.clone()),
        created_at: Some("2024-01-01 09:00:00".to_string()),
    }
}

#[derive(Default)]
struct BackendState {
    records: Vec<VisitorRecord>,
    next_id: i64,
    create_bodies: Vec<Value>,
    delete_calls: Vec<i64>,
    list_calls: usize,
    fail_creates: bool,
    fail_lists: bool,
}

impl BackendState {
    fn insert(&mut self, draft: &VisitorDraft) -> VisitorId {
        self.next_id += 1;
        let record = record_from(self.next_id, draft);
        let id = record.id;
        self.records.push(record);
        id
    }

    fn delete(&mut self, id: i64) -> bool {
        self.delete_calls.push(id);
        let before = self.records.len();
        self.records.retain(|record| record.id.0 != id);
        self.records.len() != before
    }
}

/// Shared state behind both doubles, so tests can inspect what reached the
/// "backend".
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    inner: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub(crate) fn seed(&self, draft: &VisitorDraft) -> VisitorId {
        self.inner.lock().expect("backend lock").insert(draft)
    }

    pub(crate) fn records(&self) -> Vec<VisitorRecord> {
        self.inner.lock().expect("backend lock").records.clone()
    }

    pub(crate) fn create_bodies(&self) -> Vec<Value> {
        self.inner.lock().expect("backend lock").create_bodies.clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<i64> {
        self.inner.lock().expect("backend lock").delete_calls.clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.inner.lock().expect("backend lock").list_calls
    }

    pub(crate) fn fail_creates(&self, fail: bool) {
        self.inner.lock().expect("backend lock").fail_creates = fail;
    }

    pub(crate) fn fail_lists(&self, fail: bool) {
        self.inner.lock().expect("backend lock").fail_lists = fail;
    }

    /// Serves the backend routes under `/api` and returns that base url.
    pub(crate) async fn spawn_http(&self) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new()
            .route("/api/visitors", get(handle_list).post(handle_create))
            .route("/api/visitors/:id", delete(handle_delete))
            .with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/api")
    }
}

async fn handle_list(
    State(backend): State<FakeBackend>,
) -> Result<Json<Vec<VisitorRecord>>, (StatusCode, Json<Value>)> {
    let mut state = backend.inner.lock().expect("backend lock");
    state.list_calls += 1;
    if state.fail_lists {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database unavailable" })),
        ));
    }
    Ok(Json(state.records.clone()))
}

async fn handle_create(
    State(backend): State<FakeBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = backend.inner.lock().expect("backend lock");
    state.create_bodies.push(body.clone());
    if state.fail_creates {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database unavailable" })),
        );
    }
    for field in ["name", "phone", "email", "date", "purpose", "meets_whom"] {
        let present = body
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|value| !value.is_empty());
        if !present {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("{field} is required") })),
            );
        }
    }
    let draft: VisitorDraft = match serde_json::from_value(body) {
        Ok(draft) => draft,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
        }
    };
    let id = state.insert(&draft);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Visitor added successfully", "visitor": { "id": id.0 } })),
    )
}

async fn handle_delete(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let mut state = backend.inner.lock().expect("backend lock");
    if state.delete(id) {
        (
            StatusCode::OK,
            Json(json!({ "message": "Visitor deleted successfully" })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("visitor {id} not found") })),
        )
    }
}

/// Gateway that talks to [`FakeBackend`] directly, without HTTP.
#[derive(Clone, Default)]
pub(crate) struct InMemoryGateway {
    pub(crate) backend: FakeBackend,
}

#[async_trait]
impl VisitorGateway for InMemoryGateway {
    async fn list_visitors(&self) -> Result<Vec<VisitorRecord>, GatewayError> {
        let mut state = self.backend.inner.lock().expect("backend lock");
        state.list_calls += 1;
        if state.fail_lists {
            return Err(GatewayError::Status {
                status: 500,
                message: Some("database unavailable".to_string()),
            });
        }
        Ok(state.records.clone())
    }

    async fn create_visitor(&self, draft: &VisitorDraft) -> Result<(), GatewayError> {
        let mut state = self.backend.inner.lock().expect("backend lock");
        state
            .create_bodies
            .push(serde_json::to_value(draft).expect("draft json"));
        if state.fail_creates {
            return Err(GatewayError::Status {
                status: 500,
                message: Some("database unavailable".to_string()),
            });
        }
        state.insert(draft);
        Ok(())
    }

    async fn delete_visitor(&self, id: VisitorId) -> Result<(), GatewayError> {
        let mut state = self.backend.inner.lock().expect("backend lock");
        if state.delete(id.0) {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status: 404,
                message: Some(format!("visitor {} not found", id.0)),
            })
        }
    }
}
