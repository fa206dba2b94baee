//! # REST Routes
//!
//! ## Route Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                        store answers? 200 : 503        │
//! │                                                                         │
//! │  /api/clientes       /api/clientes/{national_id}                        │
//! │  /api/trabajadores   /api/trabajadores/{national_id}                    │
//! │  /api/productos      /api/productos/{id}                                │
//! │  /api/formas-pago    /api/formas-pago/{id}                              │
//! │     GET list, POST create │ GET, PUT, PATCH, DELETE                     │
//! │                                                                         │
//! │  /api/facturas       /api/facturas/{id}                                 │
//! │     GET list, POST create │ GET, DELETE   (no update: 405)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::error::ApiResult;
use crate::state::AppState;

pub mod customers;
pub mod invoices;
pub mod payment_methods;
pub mod products;
pub mod workers;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(customers::router())
        .merge(workers::router())
        .merge(products::router())
        .merge(payment_methods::router())
        .merge(invoices::router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        tracing::warn!("Health check failed: database unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
    }
}

/// Unwraps a JSON body, turning a parse failure into a 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(value) = body?;
    Ok(value)
}
