use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Prepaid,
    Cash,
    Buyout,
    /// Forward-compat passthrough for payment types the server adds later.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourierInfo {
    pub name: String,
    pub phone: String,
    pub rating: f64,
}

/// One delivery job as the server reports it. Never mutated locally; the
/// whole collection is replaced by each server snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerOrder {
    pub id: i64,
    pub status: String,
    pub created_at: String,
    pub dropoff_address: String,
    pub order_price: f64,
    pub delivery_fee: f64,
    pub payment_type: PaymentType,
    pub is_ready: bool,
    #[serde(default)]
    pub courier: Option<CourierInfo>,
}

/// Closed classification of the raw wire status. The server is an evolving
/// system; statuses it grows later land in `Unknown` and render as-is
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderPhase {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
    Unknown(String),
}

impl OrderPhase {
    pub fn classify(raw: &str) -> Self {
        match raw {
            "pending" => OrderPhase::Pending,
            "assigned" | "in_progress" | "picked_up" => OrderPhase::InTransit,
            "delivered" => OrderPhase::Delivered,
            "cancelled" => OrderPhase::Cancelled,
            other => OrderPhase::Unknown(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderPhase::Delivered | OrderPhase::Cancelled)
    }

    pub fn label(&self) -> &str {
        match self {
            OrderPhase::Pending => "pending",
            OrderPhase::InTransit => "in transit",
            OrderPhase::Delivered => "delivered",
            OrderPhase::Cancelled => "cancelled",
            OrderPhase::Unknown(raw) => raw,
        }
    }
}

impl PartnerOrder {
    pub fn phase(&self) -> OrderPhase {
        OrderPhase::classify(&self.status)
    }

    /// Boosting the delivery fee only makes sense while the job is still
    /// waiting for a courier to accept it.
    pub fn can_boost(&self) -> bool {
        self.phase() == OrderPhase::Pending
    }

    /// The ready flag is a partner-side signal to an assigned courier; it is
    /// meaningless before assignment and after delivery.
    pub fn can_mark_ready(&self) -> bool {
        !self.is_ready && self.courier.is_some() && self.phase() != OrderPhase::Delivered
    }

    pub fn can_rate(&self, already_rated: bool) -> bool {
        self.phase() == OrderPhase::Delivered && !already_rated
    }
}

/// Request body for creating a new delivery job.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderDraft {
    pub dropoff_address: String,
    pub customer_phone: String,
    pub order_price: f64,
    pub delivery_fee: f64,
    pub comment: String,
    pub payment_type: PaymentType,
    pub is_return_required: bool,
}
