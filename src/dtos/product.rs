// src/dtos/product.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::product::{NewProduct, Product};

/// Body of both `POST /products` and `PUT /products/{id}`.
///
/// Absent fields deserialize to empty values so the validator reports them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProductRequest {
    #[validate(custom(function = "not_blank", message = "Product name must not be blank"))]
    pub name: String,

    #[validate(
        custom(function = "not_blank", message = "Product description must not be blank"),
        length(max = 50, message = "Product description must be at most 50 characters")
    )]
    pub description: String,

    #[validate(
        custom(function = "not_blank", message = "Product brand must not be blank"),
        length(max = 50, message = "Product brand must be at most 50 characters")
    )]
    pub brand: String,

    #[validate(range(min = 0.0, message = "Product price must be at least 0"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Product stock must be at least 0"))]
    pub stock: i32,

    #[validate(length(min = 1, message = "Product must reference at least one category"))]
    pub category_ids: Vec<i64>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl ProductRequest {
    /// Entity for a fresh product; both dates start at `today`.
    pub fn into_new_product(self, today: NaiveDate) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            stock: self.stock,
            category_ids: self.category_ids,
            created_at: today,
            updated_at: today,
        }
    }

    /// Full replacement of `original`, keeping its identity and creation date.
    pub fn into_replacement(self, original: &Product, today: NaiveDate) -> Product {
        Product {
            id: original.id,
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            stock: self.stock,
            category_ids: self.category_ids,
            created_at: original.created_at,
            updated_at: today,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DecrementStockRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    #[serde(default)]
    pub min_stock: i32,
    #[serde(default)]
    pub min_price: f64,
    #[serde(default)]
    pub max_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: f64,
    pub stock: i32,
    pub category_ids: Vec<i64>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            brand: product.brand,
            price: product.price,
            stock: product.stock,
            category_ids: product.category_ids,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
