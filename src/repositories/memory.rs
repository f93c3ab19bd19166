// src/repositories/memory.rs
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::product::{Category, NewProduct, Product};
use super::ProductStore;

/// Process-local store. Keeps insertion order, which is the order `find_all` reports.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
    categories: Vec<Category>,
}

impl InMemoryProductStore {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            categories,
        }
    }

    /// Same categories the database migration seeds.
    pub fn with_default_categories() -> Self {
        let categories = [(1, "Sports"), (2, "Home"), (3, "Beauty"), (4, "Electronics"), (5, "Food")]
            .into_iter()
            .map(|(id, name)| Category { id, name: name.to_string() })
            .collect();
        Self::with_categories(categories)
    }

    async fn filtered(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products
            .read()
            .await
            .iter()
            .filter(|&p| keep(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.products.read().await.iter().any(|p| p.id == id))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.products.write().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let product = product.with_id(Uuid::new_v4());
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn save(&self, product: &Product) -> Result<Product, AppError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        Ok(product.clone())
    }

    async fn find_by_stock_greater_than(&self, min_stock: i32) -> Result<Vec<Product>, AppError> {
        Ok(self.filtered(|p| p.stock > min_stock).await)
    }

    async fn find_by_price_less_than(&self, max_price: f64) -> Result<Vec<Product>, AppError> {
        Ok(self.filtered(|p| p.price < max_price).await)
    }

    async fn find_by_stock_greater_than_and_price_between(
        &self,
        min_stock: i32,
        min_price: f64,
        max_price: f64,
    ) -> Result<Vec<Product>, AppError> {
        Ok(self
            .filtered(|p| p.stock > min_stock && p.price >= min_price && p.price <= max_price)
            .await)
    }

    async fn find_by_category_name(&self, name: &str) -> Result<Vec<Product>, AppError> {
        let ids: Vec<i64> = self
            .categories
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.id)
            .collect();
        Ok(self
            .filtered(|p| p.category_ids.iter().any(|id| ids.contains(id)))
            .await)
    }
}

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

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_keeps_order() {
        let store = InMemoryProductStore::default();
        let a = store.insert(new_product("a", 1.0, 1, vec![1])).await.unwrap();
        let b = store.insert(new_product("b", 2.0, 1, vec![1])).await.unwrap();

        assert_ne!(a.id, b.id);
        let names: Vec<String> = store.find_all().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn save_replaces_in_place() {
        let store = InMemoryProductStore::default();
        let a = store.insert(new_product("a", 1.0, 1, vec![1])).await.unwrap();
        store.insert(new_product("b", 2.0, 1, vec![1])).await.unwrap();

        let changed = Product { stock: 42, ..a.clone() };
        store.save(&changed).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].stock, 42);
    }

    #[tokio::test]
    async fn price_between_is_inclusive_and_stock_is_strict() {
        let store = InMemoryProductStore::default();
        store.insert(new_product("low", 10.0, 6, vec![1])).await.unwrap();
        store.insert(new_product("edge", 20.0, 6, vec![1])).await.unwrap();
        store.insert(new_product("thin", 15.0, 5, vec![1])).await.unwrap();
        store.insert(new_product("high", 25.0, 6, vec![1])).await.unwrap();

        let names: Vec<String> = store
            .find_by_stock_greater_than_and_price_between(5, 10.0, 20.0)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["low", "edge"]);
    }

    #[tokio::test]
    async fn finds_by_category_name() {
        let store = InMemoryProductStore::with_categories(vec![
            Category { id: 1, name: "Sports".to_string() },
            Category { id: 2, name: "Home".to_string() },
        ]);
        store.insert(new_product("ball", 5.0, 1, vec![1])).await.unwrap();
        store.insert(new_product("lamp", 5.0, 1, vec![2])).await.unwrap();
        store.insert(new_product("mat", 5.0, 1, vec![2, 1])).await.unwrap();

        let names: Vec<String> = store
            .find_by_category_name("Sports")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["ball", "mat"]);
        assert!(store.find_by_category_name("Garden").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_target() {
        let store = InMemoryProductStore::default();
        let a = store.insert(new_product("a", 1.0, 1, vec![1])).await.unwrap();
        let b = store.insert(new_product("b", 1.0, 1, vec![1])).await.unwrap();

        store.delete_by_id(a.id).await.unwrap();

        assert!(!store.exists_by_id(a.id).await.unwrap());
        assert!(store.exists_by_id(b.id).await.unwrap());
    }
}
