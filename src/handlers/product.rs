// src/handlers/product.rs
use axum::{extract::State, http::StatusCode, Json};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::product::{DecrementStockRequest, ListProductsParams, ProductRequest, ProductResponse};
use crate::error::AppError;
use crate::extract::{Json as JsonBody, Path, Query};
use crate::state::AppState;

// GET /products?min_stock=&min_price=&max_price= - List products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .catalog
        .list_products(params.min_stock, params.min_price, params.max_price)
        .await?;

    Ok(Json(products))
}

// GET /products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    Ok(Json(state.catalog.get_product(id).await?))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    payload.validate()?;

    let product = state.catalog.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /products/{id} - Replace product
#[instrument(skip(state, payload))]
pub async fn update_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    payload.validate()?;

    Ok(Json(state.catalog.update_product(payload, id).await?))
}

// DELETE /products/{id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /products/{id}/stock/decrement - Take units out of stock
#[instrument(skip(state, payload))]
pub async fn decrement_stock(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DecrementStockRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    payload.validate()?;

    let mut product = state.catalog.get_product_entity(id).await?;
    state.catalog.decrement_stock(&mut product, payload.quantity).await?;

    Ok(Json(ProductResponse::from(product)))
}

// GET /products/top-brands - Brands of the most expensive products
#[instrument(skip(state))]
pub async fn get_top_brands(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.catalog.top_brands().await?))
}

// GET /products/categories/{name} - Products in a named category
#[instrument(skip(state))]
pub async fn get_products_by_category(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    Ok(Json(state.catalog.products_by_category(&name).await?))
}
