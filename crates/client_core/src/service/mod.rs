use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{Product, ProductId};
use tracing::info;

use crate::{
    error::{ClientConfigError, ServiceError},
    settings::{BackendMode, ClientConfig},
};

pub mod mock;
pub mod remote;

/// The data access contract shared by the mock and remote backends.
///
/// Each call settles exactly once with either a value or an error.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Every product, in store order.
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError>;

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ServiceError>;

    /// Stores `product` under a newly assigned id; any id it carries is dropped.
    async fn create(&self, product: Product) -> Result<Product, ServiceError>;

    /// Replaces the stored product that has the same id.
    async fn update(&self, product: Product) -> Result<Product, ServiceError>;

    /// Removing an unknown id is not an error.
    async fn delete(&self, id: ProductId) -> Result<(), ServiceError>;
}

/// Builds the backend selected by `config.mock`.
pub fn product_service(config: &ClientConfig) -> Result<Arc<dyn ProductService>, ClientConfigError> {
    match config.backend() {
        BackendMode::Mock => {
            info!("using in-memory mock product backend");
            Ok(Arc::new(mock::MockProductService::seeded()))
        }
        BackendMode::Remote => {
            let url = config.parsed_api_url()?;
            info!(api_url = %url, "using remote product backend");
            Ok(Arc::new(remote::RemoteProductService::new(url)))
        }
    }
}
