use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::domain::{Product, ProductId};

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `sqlite::memory:` opens its own empty database.
        let max_connections = if database_url.starts_with(MEMORY_URL) {
            1
        } else {
            5
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity FROM products ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list products")?;
        rows.iter().map(product_from_row).collect()
    }

    pub async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, description, price, quantity FROM products WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to load product {id}"))?;
        row.as_ref().map(product_from_row).transpose()
    }

    /// Inserts `product` under a fresh id. Any id already on `product` is ignored.
    pub async fn create_product(&self, product: &Product) -> Result<Product> {
        let id = insert_product(&self.pool, product).await?;
        debug!(product_id = id.0, "product created");
        Ok(product.clone().with_id(id))
    }

    pub async fn create_products(&self, products: &[Product]) -> Result<Vec<Product>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(products.len());
        for product in products {
            let id = insert_product(&mut *tx, product).await?;
            created.push(product.clone().with_id(id));
        }
        tx.commit().await.context("failed to commit product batch")?;
        Ok(created)
    }

    /// Replaces the row matching `id`. Returns `None` when no such row exists.
    pub async fn update_product(&self, id: ProductId, product: &Product) -> Result<Option<Product>> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, quantity = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update product {id}"))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(product.clone().with_id(id)))
    }

    /// Returns whether a row was removed.
    pub async fn delete_product(&self, id: ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete product {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_products(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await
            .context("failed to clear products")?;
        Ok(result.rows_affected())
    }

    pub async fn count_products(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .context("failed to count products")?;
        Ok(count)
    }

    pub async fn product_exists(&self, id: ProductId) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }
}

async fn insert_product<'e, E>(executor: E, product: &Product) -> Result<ProductId>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rec = sqlx::query(
        "INSERT INTO products (name, description, price, quantity) VALUES (?, ?, ?, ?)
         RETURNING id",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.quantity)
    .fetch_one(executor)
    .await
    .context("failed to insert product")?;
    Ok(ProductId(rec.try_get::<i64, _>(0)?))
}

fn product_from_row(row: &SqliteRow) -> Result<Product> {
    Ok(Product {
        id: Some(ProductId(row.try_get("id")?)),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with(MEMORY_URL) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
