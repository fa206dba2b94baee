//! `/api/formas-pago` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tienda_core::{EntityKind, NewPaymentMethod, PaymentMethod, PaymentMethodUpdate};
use tienda_db::service;

use crate::error::{ApiError, ApiResult};
use crate::routes::json_body;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/formas-pago",
            get(list_payment_methods).post(create_payment_method),
        )
        .route(
            "/formas-pago/{id}",
            get(get_payment_method)
                .put(update_payment_method)
                .patch(update_payment_method)
                .delete(delete_payment_method),
        )
}

async fn list_payment_methods(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PaymentMethod>>> {
    Ok(Json(state.db.payment_methods().list().await?))
}

async fn get_payment_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PaymentMethod>> {
    state
        .db
        .payment_methods()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(EntityKind::PaymentMethod, &id))
}

async fn create_payment_method(
    State(state): State<AppState>,
    body: Result<Json<NewPaymentMethod>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PaymentMethod>)> {
    let new = json_body(body)?;
    let method = service::create_payment_method(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

async fn update_payment_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PaymentMethodUpdate>, JsonRejection>,
) -> ApiResult<Json<PaymentMethod>> {
    let update = json_body(body)?;
    Ok(Json(
        service::update_payment_method(&state.db, &id, update).await?,
    ))
}

async fn delete_payment_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.payment_methods().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
