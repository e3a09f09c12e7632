use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
    validation::validate_product,
};
use storage::Storage;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub fn products_route() -> &'static str {
    shared::protocol::PRODUCTS_PATH
}

pub fn product_route() -> &'static str {
    "/api/products/:id"
}

pub async fn list_products(ctx: &ApiContext) -> Result<Vec<Product>, ApiError> {
    ctx.storage.list_products().await.map_err(internal)
}

pub async fn get_product(ctx: &ApiContext, id: ProductId) -> Result<Product, ApiError> {
    ctx.storage
        .product_by_id(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))
}

pub async fn create_product(ctx: &ApiContext, product: Product) -> Result<Product, ApiError> {
    ensure_valid(&product)?;
    let created = ctx
        .storage
        .create_product(&product.without_id())
        .await
        .map_err(internal)?;
    info!(product_id = ?created.id, name = %created.name, "product created");
    Ok(created)
}

/// The path id wins over any id carried in the body.
pub async fn update_product(
    ctx: &ApiContext,
    id: ProductId,
    product: Product,
) -> Result<Product, ApiError> {
    ensure_valid(&product)?;
    let updated = ctx
        .storage
        .update_product(id, &product)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    info!(product_id = id.0, "product updated");
    Ok(updated)
}

/// Deleting an id that does not exist still succeeds.
pub async fn delete_product(ctx: &ApiContext, id: ProductId) -> Result<(), ApiError> {
    let removed = ctx.storage.delete_product(id).await.map_err(internal)?;
    info!(product_id = id.0, removed, "product delete handled");
    Ok(())
}

pub async fn health(ctx: &ApiContext) -> Result<(), ApiError> {
    ctx.storage
        .health_check()
        .await
        .map_err(|err| ApiError::new(ErrorCode::Unavailable, err.to_string()))
}

fn ensure_valid(product: &Product) -> Result<(), ApiError> {
    let violations = validate_product(product);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(&violations))
    }
}

fn not_found(id: ProductId) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("product {id} not found"))
}

fn internal(err: anyhow::Error) -> ApiError {
    error!(error = %err, "storage failure");
    ApiError::new(ErrorCode::Internal, err.to_string())
}
