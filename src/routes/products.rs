use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::product::{
    create_product, decrement_stock, delete_product, get_product, get_products,
    get_products_by_category, get_top_brands, update_product,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products).post(create_product))
        .route("/products/top-brands", get(get_top_brands))
        .route("/products/categories/{name}", get(get_products_by_category))
        .route("/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .route("/products/{id}/stock/decrement", post(decrement_stock))
}
