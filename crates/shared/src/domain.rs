use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ProductId);

/// A catalog entry. `id` stays `None` until a store persists the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Same field values with the id cleared, as sent on create.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn is_valid(&self) -> bool {
        crate::validation::validate_product(self).is_empty()
    }
}

/// The demo catalog, ids 1 to 3.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("Laptop", "Gaming Laptop alta gama", 1200.0, 5).with_id(ProductId(1)),
        Product::new("Teclado Mecánico", "Teclado retroiluminado", 80.0, 15).with_id(ProductId(2)),
        Product::new("Ratón Inalámbrico", "Ratón ergonómico", 35.0, 20).with_id(ProductId(3)),
    ]
}
