use async_trait::async_trait;
use shared::domain::{sample_products, Product, ProductId};
use tokio::sync::Mutex;
use tracing::debug;

use super::ProductService;
use crate::error::ServiceError;

struct MockStore {
    products: Vec<Product>,
    next_id: i64,
}

/// In-memory backend. Ids grow monotonically and are never handed out twice.
pub struct MockProductService {
    inner: Mutex<MockStore>,
}

impl MockProductService {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// The three demo products the catalog ships with; the next id is 4.
    pub fn seeded() -> Self {
        Self::with_products(sample_products())
    }

    /// Products without an id get one after the highest id already present.
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut next_id = products
            .iter()
            .filter_map(|p| p.id)
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let products = products
            .into_iter()
            .map(|product| match product.id {
                Some(_) => product,
                None => {
                    let id = ProductId(next_id);
                    next_id += 1;
                    product.with_id(id)
                }
            })
            .collect();
        Self {
            inner: Mutex::new(MockStore { products, next_id }),
        }
    }
}

impl Default for MockProductService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductService for MockProductService {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.inner.lock().await.products.clone())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ServiceError> {
        let guard = self.inner.lock().await;
        guard
            .products
            .iter()
            .find(|p| p.id == Some(id))
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        let mut guard = self.inner.lock().await;
        let id = ProductId(guard.next_id);
        guard.next_id += 1;
        let created = product.with_id(id);
        guard.products.push(created.clone());
        debug!(product_id = id.0, "mock product created");
        Ok(created)
    }

    async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        let id = product.id.ok_or(ServiceError::MissingId)?;
        let mut guard = self.inner.lock().await;
        let slot = guard
            .products
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or(ServiceError::NotFound(id))?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let mut guard = self.inner.lock().await;
        guard.products.retain(|p| p.id != Some(id));
        Ok(())
    }
}
