//! `/api/trabajadores` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tienda_core::{EntityKind, NewWorker, Worker, WorkerUpdate};
use tienda_db::service;

use crate::error::{ApiError, ApiResult};
use crate::routes::json_body;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trabajadores", get(list_workers).post(create_worker))
        .route(
            "/trabajadores/{id}",
            get(get_worker)
                .put(update_worker)
                .patch(update_worker)
                .delete(delete_worker),
        )
}

async fn list_workers(State(state): State<AppState>) -> ApiResult<Json<Vec<Worker>>> {
    Ok(Json(state.db.workers().list().await?))
}

async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Worker>> {
    state
        .db
        .workers()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(EntityKind::Worker, &id))
}

async fn create_worker(
    State(state): State<AppState>,
    body: Result<Json<NewWorker>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Worker>)> {
    let new = json_body(body)?;
    let worker = service::create_worker(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(worker)))
}

async fn update_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<WorkerUpdate>, JsonRejection>,
) -> ApiResult<Json<Worker>> {
    let update = json_body(body)?;
    Ok(Json(service::update_worker(&state.db, &id, update).await?))
}

async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.workers().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
