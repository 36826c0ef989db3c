//! HTTP transport binding.
//!
//! Maps `POST /query` onto the shared query handler and serves a plaintext
//! liveness route. Tool-level failure is still a 200 with an `error` payload;
//! only requests rejected before the handler runs (bad body, bad prompt) get
//! a non-200 status.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use gateway::{Backend, QueryHandler, ToolRequest, ToolResult};

const LIVENESS_BODY: &str = "modelgate backend is live";

/// Build the HTTP router around a shared handler.
///
/// CORS is deliberately wide open (any origin, GET/POST/OPTIONS): the
/// gateway holds no state or credentials worth protecting per-origin.
pub fn router<B>(handler: Arc<QueryHandler<B>>) -> Router
where
    B: Backend + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(liveness))
        .route("/query", post(query::<B>))
        .layer(cors)
        .with_state(handler)
}

async fn liveness() -> &'static str {
    LIVENESS_BODY
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    prompt: Option<Value>,
}

/// This binding's serialization of a tool result.
pub(crate) fn envelope(result: &ToolResult) -> Value {
    match result {
        ToolResult::Success { text } => json!({ "result": text }),
        ToolResult::Failure { message } => json!({ "error": message }),
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

async fn query<B: Backend>(
    State(handler): State<Arc<QueryHandler<B>>>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    // Rejected before the outbound call; the provider never sees a request
    // without a string prompt.
    let prompt = match body.prompt {
        Some(Value::String(prompt)) => prompt,
        Some(_) => return bad_request("prompt must be a string"),
        None => return bad_request("missing required field: prompt"),
    };

    let result = handler.handle(ToolRequest { prompt }).await;
    (StatusCode::OK, Json(envelope(&result)))
}
