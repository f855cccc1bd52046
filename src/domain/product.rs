use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog item together with its stock ledger count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Upper bound on a unit price. With `u32` quantities this keeps every
/// order total far inside `Decimal`'s range.
pub const MAX_UNIT_PRICE: u64 = 1_000_000_000;

impl Product {
    /// Non-negative and no greater than [`MAX_UNIT_PRICE`].
    pub fn is_valid_price(price: Decimal) -> bool {
        !price.is_sign_negative() && price <= Decimal::from(MAX_UNIT_PRICE)
    }
}

/// Payload for creating a new product. `id` is generated when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

#[cfg(test)]
impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
