//! Field rules shared by the form view and the server.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Name,
    Description,
    Price,
    Quantity,
}

impl ProductField {
    pub const ALL: [ProductField; 4] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::Price,
        ProductField::Quantity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::Quantity => "quantity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    Required,
    Negative,
    NotANumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: ProductField,
    pub violation: Violation,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.as_str();
        match self.violation {
            Violation::Required => write!(f, "{field} is required"),
            Violation::Negative => write!(f, "{field} must be at least 0"),
            Violation::NotANumber => write!(f, "{field} must be a number"),
        }
    }
}

/// Only the empty string is missing; whitespace counts as a value.
pub fn check_text(field: ProductField, value: &str) -> Option<FieldViolation> {
    value.is_empty().then_some(FieldViolation {
        field,
        violation: Violation::Required,
    })
}

pub fn check_price(price: f64) -> Option<FieldViolation> {
    let violation = if price.is_nan() {
        Violation::NotANumber
    } else if price < 0.0 {
        Violation::Negative
    } else {
        return None;
    };
    Some(FieldViolation {
        field: ProductField::Price,
        violation,
    })
}

pub fn check_quantity(quantity: i64) -> Option<FieldViolation> {
    (quantity < 0).then_some(FieldViolation {
        field: ProductField::Quantity,
        violation: Violation::Negative,
    })
}

/// Every rule the product breaks, in field order. Empty means valid.
pub fn validate_product(product: &Product) -> Vec<FieldViolation> {
    [
        check_text(ProductField::Name, &product.name),
        check_text(ProductField::Description, &product.description),
        check_price(product.price),
        check_quantity(product.quantity),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_product() {
        let product = Product::new("Mouse Gamer", "RGB high precision", 150.0, 5);
        assert!(validate_product(&product).is_empty());
        assert!(product.is_valid());
    }

    #[test]
    fn zero_price_and_quantity_are_allowed() {
        let product = Product::new("Out of Stock", "No items available", 0.0, 0);
        assert!(product.is_valid());
    }

    #[test]
    fn reports_each_broken_rule() {
        let product = Product::new("", "", -1.0, -3);
        let violations = validate_product(&product);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, ProductField::ALL.to_vec());
        assert_eq!(violations[0].violation, Violation::Required);
        assert_eq!(violations[2].violation, Violation::Negative);
    }

    #[test]
    fn whitespace_text_counts_as_present() {
        let product = Product::new(" ", "RGB high precision", 150.0, 5);
        assert!(product.is_valid());
        assert!(check_text(ProductField::Description, "\t").is_none());
        assert_eq!(
            check_text(ProductField::Name, "").map(|v| v.violation),
            Some(Violation::Required)
        );
    }

    #[test]
    fn nan_price_is_rejected() {
        let violation = check_price(f64::NAN).expect("violation");
        assert_eq!(violation.violation, Violation::NotANumber);
        assert_eq!(violation.to_string(), "price must be a number");
    }
}
