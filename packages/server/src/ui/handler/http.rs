//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::ui::state::AppState;

/// Response body of `GET /api/members`
#[derive(Debug, Serialize)]
pub struct MembersDto {
    pub count: usize,
    pub names: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connected members in connection order
pub async fn list_members(State(state): State<Arc<AppState>>) -> Json<MembersDto> {
    let names: Vec<String> = state
        .message_pusher
        .members()
        .await
        .into_iter()
        .map(|m| m.name.as_str().to_string())
        .collect();

    Json(MembersDto {
        count: names.len(),
        names,
    })
}
