use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
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

/// A product that has not been stored yet; the store assigns its id on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: f64,
    pub stock: i32,
    pub category_ids: Vec<i64>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl NewProduct {
    pub fn with_id(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            stock: self.stock,
            category_ids: self.category_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
