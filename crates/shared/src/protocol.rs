use serde::{Deserialize, Serialize};

use crate::domain::ProductId;

pub const PRODUCTS_PATH: &str = "/api/products";

pub fn product_path(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroMessage {
    pub message: String,
    pub age: u32,
}

impl Default for IntroMessage {
    fn default() -> Self {
        Self {
            message: "Welcome to this application".into(),
            age: 21,
        }
    }
}
