//! `/api/productos` handlers.
//!
//! Prices travel as decimal strings (`"10.00"`); storage keeps cents.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tienda_core::{EntityKind, Money, NewProduct, Product, ProductUpdate};
use tienda_db::service;
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::routes::json_body;
use crate::state::AppState;

/// Product as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: String,
    #[ts(as = "String")]
    pub price: Money,
    pub stock: i64,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            price: p.price(),
            id: p.id,
            name: p.name,
            description: p.description,
            stock: p.stock,
            image: p.image,
            category: p.category,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/productos", get(list_products).post(create_product))
        .route(
            "/productos/{id}",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
}

async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = state.db.products().list().await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDto>> {
    state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .map(|p| Json(p.into()))
        .ok_or_else(|| ApiError::not_found(EntityKind::Product, &id))
}

async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let new = json_body(body)?;
    let product = service::create_product(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductUpdate>, JsonRejection>,
) -> ApiResult<Json<ProductDto>> {
    let update = json_body(body)?;
    let product = service::update_product(&state.db, &id, update).await?;
    Ok(Json(product.into()))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.products().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
