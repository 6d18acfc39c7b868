use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use mindflow_persist::MAX_LIST_LIMIT;
use mindflow_types::{NewThread, Thread, ThreadSummary, ThreadUpdate};

use crate::{
    error::{ApiError, ApiResult},
    extract::OwnerId,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListThreadsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct ListThreadsResponse {
    pub threads: Vec<ThreadSummary>,
}

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub thread: Thread,
}

#[derive(Debug, Serialize)]
pub struct CreateThreadResponse {
    pub success: bool,
    pub thread: Thread,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// List the caller's threads, most recently updated first
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    OwnerId(owner_id): OwnerId,
    Query(query): Query<ListThreadsQuery>,
) -> ApiResult<Json<ListThreadsResponse>> {
    let limit = query.limit.min(MAX_LIST_LIMIT);
    let threads = state.threads.list_threads(&owner_id, limit).await?;

    Ok(Json(ListThreadsResponse { threads }))
}

/// Create an empty thread
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    OwnerId(owner_id): OwnerId,
    Json(req): Json<NewThread>,
) -> ApiResult<(StatusCode, Json<CreateThreadResponse>)> {
    req.validate()?;

    let thread = state.threads.create_thread(&owner_id, req).await?;
    tracing::info!(thread_id = %thread.thread_id, "Thread created");

    Ok((
        StatusCode::CREATED,
        Json(CreateThreadResponse {
            success: true,
            thread,
        }),
    ))
}

/// Get a thread with its full message history
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    OwnerId(owner_id): OwnerId,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<ThreadResponse>> {
    let thread = state
        .threads
        .get_thread(&owner_id, &thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound(thread_id))?;

    Ok(Json(ThreadResponse { thread }))
}

/// Apply a partial update (title, messages, mood)
///
/// A `version` makes the write conditional; an older version gets 409.
pub async fn update_thread(
    State(state): State<Arc<AppState>>,
    OwnerId(owner_id): OwnerId,
    Path(thread_id): Path<String>,
    Json(update): Json<ThreadUpdate>,
) -> ApiResult<Json<SuccessResponse>> {
    let version = update.version;
    state
        .threads
        .update_thread(&owner_id, &thread_id, update)
        .await?;
    tracing::debug!(thread_id = %thread_id, version = ?version, "Thread updated");

    Ok(SuccessResponse::ok())
}

/// Delete a thread and its history
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    OwnerId(owner_id): OwnerId,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.threads.delete_thread(&owner_id, &thread_id).await?;
    tracing::info!(thread_id = %thread_id, "Thread deleted");

    Ok(SuccessResponse::ok())
}
