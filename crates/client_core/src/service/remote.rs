use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{Product, ProductId},
    error::ApiError,
};
use tracing::{debug, warn};
use url::Url;

use super::ProductService;
use crate::error::ServiceError;

/// REST backend: `GET`/`POST` on the base url, `GET`/`PUT`/`DELETE` on `{base}/{id}`.
pub struct RemoteProductService {
    http: Client,
    base_url: String,
}

impl RemoteProductService {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

async fn check_status(response: Response, id: Option<ProductId>) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ServiceError::NotFound(id));
    }
    let body = response.json::<ApiError>().await.ok();
    warn!(%status, "product api rejected request");
    Err(ServiceError::rejected(status.as_u16(), body))
}

#[async_trait]
impl ProductService for RemoteProductService {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        let response = self.http.get(&self.base_url).send().await?;
        let products = check_status(response, None).await?.json().await?;
        Ok(products)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ServiceError> {
        let response = self.http.get(self.product_url(id)).send().await?;
        let product = check_status(response, Some(id)).await?.json().await?;
        Ok(product)
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&product.without_id())
            .send()
            .await?;
        let created: Product = check_status(response, None).await?.json().await?;
        debug!(product_id = ?created.id, "remote product created");
        Ok(created)
    }

    async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        let id = product.id.ok_or(ServiceError::MissingId)?;
        let response = self
            .http
            .put(self.product_url(id))
            .json(&product)
            .send()
            .await?;
        let updated = check_status(response, Some(id)).await?.json().await?;
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let response = self.http.delete(self.product_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(product_id = id.0, "delete of absent product treated as success");
            return Ok(());
        }
        check_status(response, Some(id)).await?;
        Ok(())
    }
}
