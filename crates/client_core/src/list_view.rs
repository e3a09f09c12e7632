//! Controller behind the product table.

use std::{cmp::Ordering, sync::Arc};

use shared::domain::Product;
use tracing::{info, warn};

use crate::{
    dialog::{ButtonColor, ConfirmDialog, ConfirmRequest},
    navigation::{Navigator, Route},
    notifications::{Notification, Notifier},
    service::ProductService,
};

pub const DISPLAYED_COLUMNS: [&str; 5] = ["name", "description", "price", "quantity", "actions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Description,
    Price,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Failed,
    /// The row was never persisted, so there was nothing to delete.
    Skipped,
}

pub struct ProductListView {
    service: Arc<dyn ProductService>,
    navigator: Arc<dyn Navigator>,
    dialog: Arc<dyn ConfirmDialog>,
    notifier: Arc<dyn Notifier>,
    rows: Vec<Product>,
    sort: Option<(SortKey, SortDirection)>,
}

impl ProductListView {
    pub fn new(
        service: Arc<dyn ProductService>,
        navigator: Arc<dyn Navigator>,
        dialog: Arc<dyn ConfirmDialog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            navigator,
            dialog,
            notifier,
            rows: Vec::new(),
            sort: None,
        }
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    pub async fn activate(&mut self) -> bool {
        self.load().await
    }

    /// Replaces the rows on success. On failure the previous rows stay visible.
    pub async fn load(&mut self) -> bool {
        match self.service.list_all().await {
            Ok(products) => {
                info!(count = products.len(), "products loaded");
                self.rows = products;
                self.apply_sort();
                true
            }
            Err(error) => {
                warn!(%error, "failed to load products");
                self.notifier
                    .notify(Notification::error("Failed to load the product list"));
                false
            }
        }
    }

    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = Some((key, direction));
        self.apply_sort();
    }

    pub fn edit(&self, product: &Product) {
        if let Some(id) = product.id {
            self.navigator.navigate(Route::EditProduct(id));
        }
    }

    pub fn create(&self) {
        self.navigator.navigate(Route::NewProduct);
    }

    pub async fn delete(&mut self, product: &Product) -> DeleteOutcome {
        let Some(id) = product.id else {
            return DeleteOutcome::Skipped;
        };
        let request = ConfirmRequest::new(format!(
            "Are you sure you want to delete the product \"{}\"?",
            product.name
        ))
        .with_labels("Delete", "Cancel")
        .with_ok_color(ButtonColor::Warn);

        if !self.dialog.confirm(&request).await {
            return DeleteOutcome::Cancelled;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                info!(product_id = id.0, "product deleted");
                self.notifier
                    .notify(Notification::success("Product deleted successfully"));
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(error) => {
                warn!(product_id = id.0, %error, "failed to delete product");
                self.notifier
                    .notify(Notification::error("Failed to delete the product"));
                DeleteOutcome::Failed
            }
        }
    }

    fn apply_sort(&mut self) {
        let Some((key, direction)) = self.sort else {
            return;
        };
        self.rows.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortKey::Description => a
                    .description
                    .to_lowercase()
                    .cmp(&b.description.to_lowercase()),
                SortKey::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
                SortKey::Quantity => a.quantity.cmp(&b.quantity),
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
