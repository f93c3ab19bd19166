// src/state.rs
use std::sync::Arc;

use crate::repositories::ProductStore;
use crate::services::catalog::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            catalog: CatalogService::new(store),
        }
    }
}
