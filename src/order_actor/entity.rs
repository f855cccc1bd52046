use super::actions::OrderAction;
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate};
use chrono::Utc;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    /// Creates a new Order from creation parameters.
    ///
    /// # Notes
    /// The order starts with approval status `Pending` and its total computed
    /// from the line snapshots.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if let Some(line) = params.items.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.item_id.clone()));
        }
        Order::new(id, params)
            .ok_or_else(|| OrderError::ValidationError("order total overflows".to_string()))
    }

    fn on_create(&mut self) -> Result<(), OrderError> {
        if self.total_is_consistent() {
            Ok(())
        } else {
            Err(OrderError::ValidationError(format!(
                "total {} does not match its lines",
                self.total_amount
            )))
        }
    }

    /// Orders are never deleted by the normal flow.
    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(format!(
            "order {} cannot be deleted",
            self.id
        )))
    }

    /// Applies an approval decision.
    ///
    /// # Errors
    /// `InvalidState` if the order has already been decided; the stored
    /// order is left untouched in that case.
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::Decide {
                decision,
                decided_by,
            } => {
                if !self.is_pending() {
                    return Err(OrderError::InvalidState {
                        id: self.id.clone(),
                        current: self.approval_status,
                    });
                }
                let now = Utc::now();
                self.approval_status = decision.outcome();
                self.decided_by = Some(decided_by);
                self.decided_at = Some(now);
                self.updated_at = now;
                Ok(self.clone())
            }
        }
    }
}
