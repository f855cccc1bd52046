use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::domain::{Decision, Identity, LineRequest, Order, OrderCreate, PaymentStatus};
use crate::order_actor::{OrderAction, OrderError};
use std::cmp::Reverse;
use tracing::{debug, error, info, instrument, warn};

/// What happens to reserved stock when an admin rejects an order.
///
/// Stock is taken at checkout and, by default, kept when the order is
/// rejected. `Restore` puts the rejected lines back on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockOnReject {
    #[default]
    Retain,
    Restore,
}

/// The order lifecycle engine.
///
/// Every operation takes the caller's verified [`Identity`] and checks it
/// before touching the store. Checkout orchestrates the stock ledger and the
/// order store; approval decisions are applied inside the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    product_client: ProductClient,
    stock_on_reject: StockOnReject,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        product_client: ProductClient,
        stock_on_reject: StockOnReject,
    ) -> Self {
        Self {
            inner,
            product_client,
            stock_on_reject,
        }
    }

    /// Places an order for `user_id`, who must be the caller.
    ///
    /// 1. **Validate the cart** locally
    /// 2. **Reserve stock** for all lines in one ledger message, capturing prices
    /// 3. **Persist the order** with payment `Completed` and approval `Pending`
    ///
    /// If step 3 fails the reserved stock is returned, so a failed checkout
    /// leaves no partial state behind.
    #[instrument(
        fields(caller = %identity.user_id, item_count = lines.len()),
        skip(self, identity, lines)
    )]
    pub async fn create_order(
        &self,
        identity: &Identity,
        user_id: &str,
        lines: Vec<LineRequest>,
    ) -> Result<Order, OrderError> {
        info!("Processing create_order request");

        if identity.user_id != user_id {
            warn!("Caller tried to order for another user");
            return Err(OrderError::Unauthorized(user_id.to_string()));
        }
        if lines.is_empty() {
            warn!("Empty cart");
            return Err(OrderError::EmptyCart);
        }
        if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
            warn!(item_id = %line.item_id, "Zero quantity line");
            return Err(OrderError::InvalidQuantity(line.item_id.clone()));
        }

        // Step 1: Reserve stock and snapshot prices
        let items = match self.product_client.reserve_all(&lines).await {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, "Stock reservation failed");
                return Err(e.into());
            }
        };
        info!("Stock reserved successfully");

        // Step 2: Persist the order
        let params = OrderCreate {
            user_id: user_id.to_string(),
            items,
            payment_status: PaymentStatus::Completed,
        };
        match self.inner.create(params).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total_amount, "Order created successfully");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order persistence failed, returning reserved stock");
                if let Err(restock) = self.product_client.restock_all(&lines).await {
                    error!(error = %restock, "Failed to return reserved stock");
                }
                Err(e.into())
            }
        }
    }

    /// Review queue: every pending order, oldest first. Admins only.
    #[instrument(fields(caller = %identity.user_id), skip(self, identity))]
    pub async fn list_pending(&self, identity: &Identity) -> Result<Vec<Order>, OrderError> {
        debug!("Processing list_pending request");
        require_admin(identity)?;

        let mut pending: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(Order::is_pending)
            .collect();
        pending.sort_by(|a, b| {
            a.payment_date
                .cmp(&b.payment_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        info!(pending_count = pending.len(), "Listed pending orders");
        Ok(pending)
    }

    /// Fetches one order for its owner or an admin.
    #[instrument(fields(caller = %identity.user_id), skip(self, identity))]
    pub async fn get_order(&self, id: &str, identity: &Identity) -> Result<Order, OrderError> {
        debug!("Processing get_order request");

        let order = self
            .inner
            .get(id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        if !identity.can_access(&order.user_id) {
            warn!("Caller is neither owner nor admin");
            return Err(OrderError::Authorization(format!(
                "order {} belongs to another user",
                id
            )));
        }
        Ok(order)
    }

    /// Applies an admin decision to a pending order.
    ///
    /// The pending check and the write happen inside the order actor, so of
    /// two racing decisions exactly one wins; the other gets `InvalidState`.
    #[instrument(fields(caller = %identity.user_id, decision = %decision), skip(self, identity))]
    pub async fn transition(
        &self,
        id: &str,
        identity: &Identity,
        decision: Decision,
    ) -> Result<Order, OrderError> {
        info!("Processing transition request");
        require_admin(identity)?;

        let action = OrderAction::Decide {
            decision,
            decided_by: identity.user_id.clone(),
        };
        let order = match self.inner.perform_action(id.to_string(), action).await {
            Ok(order) => order,
            Err(e) => {
                let e = OrderError::from(e);
                warn!(error = %e, "Transition refused");
                return Err(e);
            }
        };
        info!(status = %order.approval_status, "Order decided");

        if decision == Decision::Reject && self.stock_on_reject == StockOnReject::Restore {
            // The decision stands even if the ledger refuses the stock.
            match self.product_client.restock_all(&order.line_requests()).await {
                Ok(()) => info!("Stock returned for rejected order"),
                Err(e) => error!(error = %e, "Failed to return stock for rejected order"),
            }
        }
        Ok(order)
    }

    pub async fn approve(&self, id: &str, identity: &Identity) -> Result<Order, OrderError> {
        self.transition(id, identity, Decision::Approve).await
    }

    pub async fn reject(&self, id: &str, identity: &Identity) -> Result<Order, OrderError> {
        self.transition(id, identity, Decision::Reject).await
    }

    /// Order history for one user, most recent first.
    #[instrument(fields(caller = %identity.user_id), skip(self, identity))]
    pub async fn list_for_user(
        &self,
        user_id: &str,
        identity: &Identity,
    ) -> Result<Vec<Order>, OrderError> {
        debug!("Processing list_for_user request");
        if !identity.can_access(user_id) {
            warn!("Caller is neither owner nor admin");
            return Err(OrderError::Authorization(format!(
                "orders of user {} are not visible to the caller",
                user_id
            )));
        }

        let mut orders: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();
        orders.sort_by_key(|order| (Reverse(order.payment_date), Reverse(order.id.clone())));

        info!(order_count = orders.len(), "Listed user orders");
        Ok(orders)
    }
}

fn require_admin(identity: &Identity) -> Result<(), OrderError> {
    if identity.is_admin() {
        Ok(())
    } else {
        warn!("Admin role required");
        Err(OrderError::Authorization("admin role required".to_string()))
    }
}
