//! Controller behind the create/edit product form.

use std::sync::Arc;

use shared::{
    domain::{Product, ProductId},
    validation::{
        check_price, check_quantity, check_text, validate_product, FieldViolation, ProductField,
    },
};
use tracing::{info, warn};

use crate::{
    navigation::{Navigator, Route},
    notifications::{Notification, Notifier},
    service::ProductService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Field values as the user currently has them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            quantity: 0,
        }
    }
}

impl ProductForm {
    pub fn patch(&mut self, product: &Product) {
        self.name = product.name.clone();
        self.description = product.description.clone();
        self.price = product.price;
        self.quantity = product.quantity;
    }

    pub fn to_product(&self, id: Option<ProductId>) -> Product {
        Product {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }

    pub fn violations(&self) -> Vec<FieldViolation> {
        validate_product(&self.to_product(None))
    }

    pub fn field_error(&self, field: ProductField) -> Option<FieldViolation> {
        match field {
            ProductField::Name => check_text(field, &self.name),
            ProductField::Description => check_text(field, &self.description),
            ProductField::Price => check_price(self.price),
            ProductField::Quantity => check_quantity(self.quantity),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(Product),
    Invalid(Vec<FieldViolation>),
    Failed,
}

pub struct ProductFormView {
    service: Arc<dyn ProductService>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    mode: FormMode,
    form: ProductForm,
}

impl ProductFormView {
    pub fn new(
        service: Arc<dyn ProductService>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            navigator,
            notifier,
            mode: FormMode::Create,
            form: ProductForm::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub async fn activate_route(&mut self, route: Route) -> bool {
        self.activate(route.product_id()).await
    }

    /// Resets the form for creation, or loads the product to edit.
    ///
    /// Returns `false` when the product could not be loaded; the view has then
    /// already navigated back to the list.
    pub async fn activate(&mut self, id: Option<ProductId>) -> bool {
        self.form = ProductForm::default();
        let Some(id) = id else {
            self.mode = FormMode::Create;
            return true;
        };

        self.mode = FormMode::Edit(id);
        match self.service.get_by_id(id).await {
            Ok(product) => {
                self.form.patch(&product);
                info!(product_id = id.0, "product loaded for editing");
                true
            }
            Err(error) => {
                warn!(product_id = id.0, %error, "failed to load product for editing");
                self.notifier
                    .notify(Notification::error("Failed to load the product for editing"));
                self.navigator.navigate(Route::ProductList);
                false
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let violations = self.form.violations();
        if !violations.is_empty() {
            self.notifier.notify(Notification::error(
                "Please complete all required fields correctly",
            ));
            return SubmitOutcome::Invalid(violations);
        }

        match self.mode {
            FormMode::Create => {
                let product = self.form.to_product(None);
                match self.service.create(product).await {
                    Ok(created) => {
                        self.notifier
                            .notify(Notification::success("Product created successfully"));
                        self.navigator.navigate(Route::ProductList);
                        SubmitOutcome::Saved(created)
                    }
                    Err(error) => {
                        warn!(%error, "failed to create product");
                        self.notifier
                            .notify(Notification::error("Failed to create the product"));
                        SubmitOutcome::Failed
                    }
                }
            }
            FormMode::Edit(id) => {
                let product = self.form.to_product(Some(id));
                match self.service.update(product).await {
                    Ok(updated) => {
                        self.notifier
                            .notify(Notification::success("Product updated successfully"));
                        self.navigator.navigate(Route::ProductList);
                        SubmitOutcome::Saved(updated)
                    }
                    Err(error) => {
                        warn!(product_id = id.0, %error, "failed to update product");
                        self.notifier
                            .notify(Notification::error("Failed to update the product"));
                        SubmitOutcome::Failed
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_view_tests.rs"]
mod tests;
