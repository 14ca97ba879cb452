use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

pub const DEFAULT_STUB_PORT: u16 = 4747;
pub const DEFAULT_STUB_REPLY: &str = "yay";

/// Local stand-in for the inference endpoint.
#[derive(Debug, Clone)]
pub struct StubServerConfig {
    pub addr: SocketAddr,
    /// Text returned in `"res"`.
    pub reply: String,
    /// Status code of every reply, e.g. 429 to exercise the rate-limit path.
    pub status: u16,
}

impl Default for StubServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_STUB_PORT)),
            reply: DEFAULT_STUB_REPLY.to_string(),
            status: 200,
        }
    }
}

struct StubState {
    reply: String,
    status: StatusCode,
}

pub fn stub_router(reply: impl Into<String>, status: u16) -> Result<Router> {
    let status = StatusCode::from_u16(status).map_err(|e| anyhow!("invalid status {status}: {e}"))?;
    let state = Arc::new(StubState {
        reply: reply.into(),
        status,
    });

    Ok(Router::new().route("/", post(answer)).with_state(state))
}

async fn answer(State(state): State<Arc<StubState>>, body: String) -> (StatusCode, Json<Value>) {
    let prompt = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("prompt").and_then(Value::as_str).map(str::to_owned));

    match prompt {
        Some(prompt) => info!("Stub received prompt: {prompt:?}"),
        None => info!("Stub received a body without a prompt: {body:?}"),
    }

    (state.status, Json(json!({ "res": state.reply })))
}

pub async fn serve(config: StubServerConfig) -> Result<()> {
    let app = stub_router(config.reply, config.status)?;

    info!("Stub server listening on http://{}/", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("Failed to run stub server: {e}"))?;

    Ok(())
}
