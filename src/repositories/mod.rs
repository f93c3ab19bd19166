// src/repositories/mod.rs
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::product::{NewProduct, Product};

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

/// Durable storage for products. Implementations own id assignment.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;

    /// Stores a new product under a freshly assigned id.
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Inserts or fully replaces the product with the same id.
    async fn save(&self, product: &Product) -> Result<Product, AppError>;

    async fn find_by_stock_greater_than(&self, min_stock: i32) -> Result<Vec<Product>, AppError>;

    async fn find_by_price_less_than(&self, max_price: f64) -> Result<Vec<Product>, AppError>;

    /// Stock strictly above `min_stock`, price within `[min_price, max_price]`.
    async fn find_by_stock_greater_than_and_price_between(
        &self,
        min_stock: i32,
        min_price: f64,
        max_price: f64,
    ) -> Result<Vec<Product>, AppError>;

    async fn find_by_category_name(&self, name: &str) -> Result<Vec<Product>, AppError>;
}
