use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether funds capture succeeded. Capture is simulated, so orders are
/// created as `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Administrative sign-off. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "Pending"),
            ApprovalStatus::Approved => write!(f, "Approved"),
            ApprovalStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// An admin's verdict on a pending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn outcome(self) -> ApprovalStatus {
        match self {
            Decision::Approve => ApprovalStatus::Approved,
            Decision::Reject => ApprovalStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => write!(f, "approve"),
            Decision::Reject => write!(f, "reject"),
        }
    }
}

/// One purchased item with the unit price captured when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: String,
    pub quantity: u32,
    pub price_at_order_time: Decimal,
}

impl OrderLine {
    /// `None` when the product does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.price_at_order_time)
    }
}

/// A line as requested at checkout, before prices are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub item_id: String,
    pub quantity: u32,
}

impl LineRequest {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// A customer's checkout record. Historically also called a "payment";
/// payment capture and admin approval are tracked as two independent fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub approval_status: ApprovalStatus,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

/// Parameters for persisting a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<OrderLine>,
    pub payment_status: PaymentStatus,
}

impl Order {
    /// Builds a pending order. Returns `None` if the total overflows.
    pub fn new(id: impl Into<String>, params: OrderCreate) -> Option<Self> {
        let total_amount = total_of(&params.items)?;
        let now = Utc::now();
        Some(Self {
            id: id.into(),
            user_id: params.user_id,
            total_amount,
            items: params.items,
            payment_status: params.payment_status,
            approval_status: ApprovalStatus::Pending,
            payment_date: now,
            created_at: now,
            updated_at: now,
            decided_by: None,
            decided_at: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.approval_status == ApprovalStatus::Pending
    }

    /// Checks the stored total against its lines.
    pub fn total_is_consistent(&self) -> bool {
        total_of(&self.items) == Some(self.total_amount)
    }

    /// The lines as reservation requests, for returning stock to the ledger.
    pub fn line_requests(&self) -> Vec<LineRequest> {
        self.items
            .iter()
            .map(|line| LineRequest::new(line.item_id.clone(), line.quantity))
            .collect()
    }
}

pub fn total_of(items: &[OrderLine]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.subtotal()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: &str, quantity: u32, price: i64) -> OrderLine {
        OrderLine {
            item_id: item_id.to_string(),
            quantity,
            price_at_order_time: Decimal::from(price),
        }
    }

    #[test]
    fn test_new_order_totals_and_defaults() {
        let order = Order::new(
            "o1",
            OrderCreate {
                user_id: "u1".to_string(),
                items: vec![line("X", 2, 100), line("Y", 3, 15)],
                payment_status: PaymentStatus::Completed,
            },
        )
        .unwrap();

        assert_eq!(order.total_amount, Decimal::from(245));
        assert_eq!(order.approval_status, ApprovalStatus::Pending);
        assert_eq!(order.payment_date, order.created_at);
        assert!(order.total_is_consistent());
    }

    #[test]
    fn test_fractional_prices_sum_exactly() {
        let items = vec![
            OrderLine {
                item_id: "rope".into(),
                quantity: 3,
                price_at_order_time: Decimal::new(1999, 2),
            },
            OrderLine {
                item_id: "mat".into(),
                quantity: 1,
                price_at_order_time: Decimal::new(10, 2),
            },
        ];
        assert_eq!(total_of(&items), Some(Decimal::new(6007, 2)));
    }

    #[test]
    fn test_overflowing_total_is_none() {
        let priciest = OrderLine {
            item_id: "G".to_string(),
            quantity: 1,
            price_at_order_time: Decimal::MAX,
        };
        assert_eq!(priciest.subtotal(), Some(Decimal::MAX));
        assert_eq!(OrderLine { quantity: 2, ..priciest.clone() }.subtotal(), None);

        let items = vec![line("X", 1, 1), priciest];
        assert_eq!(total_of(&items), None);
        assert!(Order::new(
            "o1",
            OrderCreate {
                user_id: "u1".to_string(),
                items,
                payment_status: PaymentStatus::Completed,
            },
        )
        .is_none());
    }

    #[test]
    fn test_json_shape() {
        let order = Order::new(
            "o1",
            OrderCreate {
                user_id: "u1".to_string(),
                items: vec![line("X", 2, 100)],
                payment_status: PaymentStatus::Completed,
            },
        )
        .unwrap();
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["userId"], "u1");
        assert_eq!(value["approvalStatus"], "Pending");
        assert_eq!(value["paymentStatus"], "Completed");
        assert_eq!(value["items"][0]["itemId"], "X");
        assert!(value.get("decidedBy").is_none());
    }
}
