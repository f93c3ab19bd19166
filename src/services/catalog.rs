// src/services/catalog.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dtos::product::{ProductRequest, ProductResponse};
use crate::error::{AppError, FieldError};
use crate::models::product::Product;
use crate::repositories::ProductStore;

/// How many of the highest-priced products feed the brand ranking.
pub const TOP_BRANDS_LIMIT: usize = 10;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

fn product_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("No product found with id: {id}"))
}

/// The only mutator of product state. Validation happens before any call lands here.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    today: fn() -> NaiveDate,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self::with_clock(store, utc_today)
    }

    pub fn with_clock(store: Arc<dyn ProductStore>, today: fn() -> NaiveDate) -> Self {
        Self { store, today }
    }

    /// Dispatches to one store query depending on which filters are set.
    ///
    /// The branch order is load-bearing: `min_price` is only honoured together
    /// with both `min_stock` and `max_price`, otherwise it is ignored.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        min_stock: i32,
        min_price: f64,
        max_price: f64,
    ) -> Result<Vec<ProductResponse>, AppError> {
        let products = if min_stock == 0 && max_price == 0.0 {
            self.store.find_all().await?
        } else if min_stock > 0 && max_price > 0.0 {
            self.store
                .find_by_stock_greater_than_and_price_between(min_stock, min_price, max_price)
                .await?
        } else if max_price > 0.0 {
            self.store.find_by_price_less_than(max_price).await?
        } else {
            self.store.find_by_stock_greater_than(min_stock).await?
        };

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, AppError> {
        self.get_product_entity(id).await.map(ProductResponse::from)
    }

    pub async fn get_product_entity(&self, id: Uuid) -> Result<Product, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(&self, request: ProductRequest) -> Result<ProductResponse, AppError> {
        let product = self
            .store
            .insert(request.into_new_product((self.today)()))
            .await?;

        info!(id = %product.id, "Product created");
        Ok(ProductResponse::from(product))
    }

    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        request: ProductRequest,
        id: Uuid,
    ) -> Result<ProductResponse, AppError> {
        let original = self.get_product_entity(id).await?;
        let replacement = request.into_replacement(&original, (self.today)());
        let saved = self.store.save(&replacement).await?;

        info!("Product updated");
        Ok(ProductResponse::from(saved))
    }

    /// Takes `quantity` units out of `product` and persists it. On failure the
    /// instance is left untouched.
    ///
    /// `quantity` must be at least 1; with `1 <= quantity <= stock` the
    /// subtraction cannot overflow.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn decrement_stock(&self, product: &mut Product, quantity: i32) -> Result<(), AppError> {
        if quantity < 1 {
            return Err(AppError::Validation(vec![FieldError {
                field: "quantity".to_string(),
                message: "Quantity must be at least 1".to_string(),
            }]));
        }
        if product.stock < quantity {
            warn!(requested = quantity, available = product.stock, "Insufficient stock");
            return Err(AppError::insufficient_stock(format!(
                "Insufficient stock for product {}: requested {}, available {}",
                product.id, quantity, product.stock
            )));
        }

        product.stock -= quantity;
        self.store.save(product).await?;

        info!(remaining = product.stock, "Stock decremented");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.exists_by_id(id).await? {
            return Err(product_not_found(id));
        }

        self.store.delete_by_id(id).await?;
        info!("Product deleted");
        Ok(())
    }

    /// Distinct brands among the ten most expensive products, most expensive first.
    pub async fn top_brands(&self) -> Result<Vec<String>, AppError> {
        let mut products = self.store.find_all().await?;
        if products.is_empty() {
            return Err(AppError::not_found("No products in the catalog"));
        }

        // Stable, so equal prices keep the store's order.
        products.sort_by(|a, b| b.price.total_cmp(&a.price));
        products.truncate(TOP_BRANDS_LIMIT);

        let mut brands: Vec<String> = Vec::new();
        for product in products {
            if !brands.contains(&product.brand) {
                brands.push(product.brand);
            }
        }
        Ok(brands)
    }

    pub async fn products_by_category(&self, name: &str) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.store.find_by_category_name(name).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}
