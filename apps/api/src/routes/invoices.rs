//! `/api/facturas` handlers.
//!
//! Invoices are immutable: list, retrieve, create and delete only. Totals in
//! the request body are ignored; they are always derived server-side.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tienda_core::{EntityKind, Invoice, Money, NewInvoice};
use tienda_db::service;
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::routes::json_body;
use crate::state::AppState;

/// Invoice as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDto {
    pub id: i64,
    pub customer_id: String,
    pub worker_id: String,
    pub product_id: String,
    pub payment_method_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub tax: Money,
    #[ts(as = "String")]
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceDto {
    fn from(inv: Invoice) -> Self {
        InvoiceDto {
            subtotal: inv.subtotal(),
            tax: inv.tax(),
            total: inv.total(),
            id: inv.id,
            customer_id: inv.customer_id,
            worker_id: inv.worker_id,
            product_id: inv.product_id,
            payment_method_id: inv.payment_method_id,
            quantity: inv.quantity,
            created_at: inv.created_at,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/facturas", get(list_invoices).post(create_invoice))
        .route("/facturas/{id}", get(get_invoice).delete(delete_invoice))
}

/// Path ids that are not integers name no invoice.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::not_found(EntityKind::Invoice, raw))
}

async fn list_invoices(State(state): State<AppState>) -> ApiResult<Json<Vec<InvoiceDto>>> {
    let invoices = state.db.invoices().list().await?;
    Ok(Json(invoices.into_iter().map(InvoiceDto::from).collect()))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<InvoiceDto>> {
    let id = parse_id(&raw)?;
    state
        .db
        .invoices()
        .get_by_id(id)
        .await?
        .map(|inv| Json(inv.into()))
        .ok_or_else(|| ApiError::not_found(EntityKind::Invoice, &raw))
}

async fn create_invoice(
    State(state): State<AppState>,
    body: Result<Json<NewInvoice>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<InvoiceDto>)> {
    let new = json_body(body)?;
    let invoice = service::create_invoice(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw)?;
    state.db.invoices().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
