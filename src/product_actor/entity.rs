use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn requested_id(params: &ProductCreate) -> Option<String> {
        params.id.clone()
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Rejects negative prices and prices above [`crate::domain::MAX_UNIT_PRICE`].
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        if !Product::is_valid_price(params.price) {
            return Err(ProductError::InvalidPrice(id));
        }
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
        })
    }

    /// Handles stock ledger actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `ReserveStock(amount)`: Decrements stock, returning the unit price
    /// - `Restock(amount)`: Increments stock
    /// - `SetPrice(price)`: Replaces the catalog price
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(0) | ProductAction::Restock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(amount) => {
                if self.stock >= amount {
                    self.stock -= amount;
                    Ok(ProductActionResult::Reserved {
                        unit_price: self.price,
                        remaining: self.stock,
                    })
                } else {
                    Err(ProductError::InsufficientStock {
                        item_id: self.id.clone(),
                        requested: amount,
                        available: self.stock,
                    })
                }
            }
            ProductAction::Restock(amount) => {
                self.stock = self
                    .stock
                    .checked_add(amount)
                    .ok_or_else(|| ProductError::StockOverflow(self.id.clone()))?;
                Ok(ProductActionResult::Restocked(self.stock))
            }
            ProductAction::SetPrice(price) => {
                if !Product::is_valid_price(price) {
                    return Err(ProductError::InvalidPrice(self.id.clone()));
                }
                self.price = price;
                Ok(ProductActionResult::PriceSet(price))
            }
        }
    }
}
