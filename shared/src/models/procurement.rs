//! Purchase request and purchase order models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Internal request to buy material for a short order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRequest {
    pub id: Uuid,
    pub order_id: Uuid,
    pub material_id: Uuid,
    /// Deficit to procure, not the full requirement
    pub quantity_needed: Decimal,
    pub status: PurchaseRequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Purchase request lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequestStatus {
    Pending,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseRequestStatus::Pending => "pending",
            PurchaseRequestStatus::Ordered => "ordered",
            PurchaseRequestStatus::Received => "received",
            PurchaseRequestStatus::Cancelled => "cancelled",
        }
    }

    /// Pending or ordered requests still cover their shortage
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PurchaseRequestStatus::Pending | PurchaseRequestStatus::Ordered
        )
    }
}

impl std::fmt::Display for PurchaseRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier commitment against a purchase request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub purchase_request_id: Uuid,
    pub supplier: String,
    pub expected_delivery: NaiveDate,
    pub status: PurchaseOrderStatus,
    pub delivered_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Purchase order lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Ordered,
    Delivered,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Ordered => "ordered",
            PurchaseOrderStatus::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for raising a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub purchase_request_id: Uuid,
    pub supplier: String,
    pub expected_delivery: NaiveDate,
}
