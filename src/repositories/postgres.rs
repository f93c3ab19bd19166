// src/repositories/postgres.rs
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::product::{NewProduct, Product};
use super::ProductStore;

const PRODUCT_COLUMNS: &str =
    "id, name, description, brand, price, stock, category_ids, created_at, updated_at";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products
                (name, description, brand, price, stock, category_ids, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category_ids)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn save(&self, product: &Product) -> Result<Product, AppError> {
        let saved = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products
                (id, name, description, brand, price, stock, category_ids, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                brand = EXCLUDED.brand,
                price = EXCLUDED.price,
                stock = EXCLUDED.stock,
                category_ids = EXCLUDED.category_ids,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category_ids)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn find_by_stock_greater_than(&self, min_stock: i32) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock > $1 ORDER BY name"
        ))
        .bind(min_stock)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_price_less_than(&self, max_price: f64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE price < $1 ORDER BY name"
        ))
        .bind(max_price)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_stock_greater_than_and_price_between(
        &self,
        min_stock: i32,
        min_price: f64,
        max_price: f64,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE stock > $1 AND price BETWEEN $2 AND $3
             ORDER BY name"
        ))
        .bind(min_stock)
        .bind(min_price)
        .bind(max_price)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_category_name(&self, name: &str) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p
             WHERE EXISTS (
                 SELECT 1 FROM categories c
                 WHERE c.id = ANY(p.category_ids) AND c.name = $1
             )
             ORDER BY p.name"
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

// These need a live PostgreSQL reachable through DATABASE_URL; each test gets
// a fresh database with ./migrations applied. Run with `cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_product(name: &str, price: f64, stock: i32, category_ids: Vec<i64>) -> NewProduct {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        NewProduct {
            name: name.to_string(),
            description: "desc".to_string(),
            brand: "brand".to_string(),
            price,
            stock,
            category_ids,
            created_at: day,
            updated_at: day,
        }
    }

    fn names(products: Vec<Product>) -> Vec<String> {
        products.into_iter().map(|p| p.name).collect()
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn price_between_is_inclusive_and_stock_is_strict(pool: PgPool) {
        let store = PgProductStore::new(pool);
        for (name, price, stock) in [("a-low", 10.0, 6), ("b-edge", 20.0, 6), ("c-thin", 15.0, 5), ("d-high", 25.0, 6)] {
            store.insert(new_product(name, price, stock, vec![1])).await.unwrap();
        }

        let found = store
            .find_by_stock_greater_than_and_price_between(5, 10.0, 20.0)
            .await
            .unwrap();
        assert_eq!(names(found), vec!["a-low", "b-edge"]);

        let cheap = store.find_by_price_less_than(20.0).await.unwrap();
        assert_eq!(names(cheap), vec!["a-low", "c-thin"]);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn finds_by_seeded_category_name(pool: PgPool) {
        let store = PgProductStore::new(pool);
        store.insert(new_product("ball", 5.0, 1, vec![1])).await.unwrap();
        store.insert(new_product("lamp", 5.0, 1, vec![2])).await.unwrap();
        store.insert(new_product("mat", 5.0, 1, vec![2, 1])).await.unwrap();

        let sports = store.find_by_category_name("Sports").await.unwrap();
        assert_eq!(names(sports), vec!["ball", "mat"]);
        assert!(store.find_by_category_name("Garden").await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn save_upserts_and_delete_removes(pool: PgPool) {
        let store = PgProductStore::new(pool);
        let inserted = store.insert(new_product("a", 1.0, 3, vec![1])).await.unwrap();

        let changed = Product { stock: 42, ..inserted.clone() };
        let saved = store.save(&changed).await.unwrap();
        assert_eq!(saved, changed);
        assert_eq!(store.find_by_id(inserted.id).await.unwrap(), Some(changed));

        store.delete_by_id(inserted.id).await.unwrap();
        assert!(!store.exists_by_id(inserted.id).await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
