//! Local mirror of the remote product collection
//!
//! Every operation goes through the [`ApiClient`] and only touches the local
//! list once the server has answered. One loading flag and one error message
//! are shared by all operations on a slice; with overlapping calls the last one
//! to finish decides what they show.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::products::model::{Product, ProductDraft, Version};

const LOAD_FAILED: &str = "Failed to load products. Please try again later.";
const CREATE_FAILED: &str = "Failed to add product. Please try again.";
const UPDATE_FAILED: &str = "Failed to update product. Please try again.";
const DELETE_FAILED: &str = "Failed to delete product. Please try again.";
const CONFLICT: &str = "Product was modified by someone else. Reload and try again.";

/// Observable slice state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductState {
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Clones share the same state
#[derive(Debug, Clone)]
pub struct ProductSlice {
    api: ApiClient,
    state: Arc<RwLock<ProductState>>,
}

impl ProductSlice {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ProductState::default())),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ProductState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.snapshot().products
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().loading
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot().error
    }

    /// Replace the local list with the server's
    pub async fn fetch_all(&self) -> Result<Vec<Product>> {
        self.begin();
        let result = self.api.list_products().await;

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(products) => {
                debug!("Loaded {} products", products.len());
                state.products = products.clone();
                Ok(products)
            }
            Err(e) => {
                warn!("Failed to load products: {}", e);
                state.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Validate locally, create on the server, then append the server's record
    pub async fn create(&self, draft: ProductDraft) -> Result<Product> {
        self.reject_invalid(&draft)?;

        self.begin();
        let result = self.api.create_product(&draft).await;

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(product) => {
                debug!("Created product {}", product.id);
                state.products.push(product.clone());
                Ok(product)
            }
            Err(e) => {
                warn!("Failed to create product: {}", e);
                state.error = Some(failure_message(&e, CREATE_FAILED));
                Err(e)
            }
        }
    }

    /// Validate locally, update on the server with `version`, then replace the
    /// local entry with the same id
    pub async fn update(
        &self,
        id: &str,
        draft: ProductDraft,
        version: &Version,
    ) -> Result<Product> {
        self.reject_invalid(&draft)?;

        self.begin();
        let result = self.api.update_product(id, &draft, version).await;

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(product) => {
                debug!("Updated product {}", product.id);
                if let Some(existing) = state.products.iter_mut().find(|p| p.id == product.id) {
                    *existing = product.clone();
                }
                Ok(product)
            }
            Err(e) => {
                warn!("Failed to update product {}: {}", id, e);
                state.error = Some(failure_message(&e, UPDATE_FAILED));
                Err(e)
            }
        }
    }

    /// Delete on the server, then drop the local entry
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.begin();
        let result = self.api.delete_product(id).await;

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(()) => {
                debug!("Deleted product {}", id);
                state.products.retain(|p| p.id != id);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to delete product {}: {}", id, e);
                state.error = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }

    fn reject_invalid(&self, draft: &ProductDraft) -> Result<()> {
        if let Err(e) = draft.validate() {
            self.write().error = Some(e.to_string());
            return Err(e);
        }
        Ok(())
    }

    fn begin(&self) {
        let mut state = self.write();
        state.loading = true;
        state.error = None;
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProductState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Server-provided message when there is one, else the generic text
fn failure_message(err: &Error, fallback: &str) -> String {
    match err {
        Error::Conflict(_) => CONFLICT.to_string(),
        Error::Server { message, .. } if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}
