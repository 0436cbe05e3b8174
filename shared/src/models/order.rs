//! Customer order models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A customer order for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    /// Requested delivery date
    pub delivery_date: NaiveDate,
    pub customer: CustomerContact,
    pub status: OrderStatus,
    /// Human review workflow, independent of `status`
    pub process_status: ProcessStatus,
    /// Result of the latest fulfillment check, `None` until checked
    pub can_fulfill: Option<bool>,
    /// Shortages found by the latest fulfillment check
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_materials: Vec<MissingMaterial>,
    #[serde(default)]
    pub commercials: OrderCommercials,
    pub schedule_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a pending order from validated intake data
    pub fn from_intake(input: NewOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            quantity: input.quantity,
            delivery_date: input.delivery_date,
            customer: CustomerContact {
                name: input.customer_name,
                phone: input.customer_phone,
                email: input.customer_email,
                company: input.customer_company,
            },
            status: OrderStatus::Pending,
            process_status: ProcessStatus::PendingConsultant,
            can_fulfill: None,
            missing_materials: Vec::new(),
            commercials: OrderCommercials {
                notes: input.notes,
                ..OrderCommercials::default()
            },
            schedule_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Customer contact fields captured on intake
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

/// Commercial terms set by sales staff
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderCommercials {
    pub price: Option<Decimal>,
    pub rush_fee: Option<Decimal>,
    pub notes: Option<String>,
    pub contract_reference: Option<String>,
}

/// Production lifecycle of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Scheduled,
    InProduction,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Scheduled => "scheduled",
            OrderStatus::InProduction => "in_production",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human review workflow of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    PendingConsultant,
    ConsultantVerified,
    ManagerApproved,
    Rejected,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::PendingConsultant => "pending_consultant",
            ProcessStatus::ConsultantVerified => "consultant_verified",
            ProcessStatus::ManagerApproved => "manager_approved",
            ProcessStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessStatus::ManagerApproved | ProcessStatus::Rejected)
    }

    /// Review moves forward one step at a time; any open review may be rejected
    pub fn can_transition_to(&self, next: ProcessStatus) -> bool {
        match (self, next) {
            (ProcessStatus::PendingConsultant, ProcessStatus::ConsultantVerified) => true,
            (ProcessStatus::ConsultantVerified, ProcessStatus::ManagerApproved) => true,
            (current, ProcessStatus::Rejected) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A material the order cannot currently be covered for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingMaterial {
    pub material_id: Uuid,
    pub needed: Decimal,
    pub available: Decimal,
}

impl MissingMaterial {
    /// Quantity to procure to cover the shortage
    pub fn deficit(&self) -> Decimal {
        self.needed - self.available
    }
}

/// Outcome of a fulfillment check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FulfillmentReport {
    pub order_id: Uuid,
    pub can_fulfill: bool,
    pub missing_materials: Vec<MissingMaterial>,
}

/// Input for order intake
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrder {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    pub delivery_date: NaiveDate,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub customer_email: Option<String>,
    pub customer_company: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_status_forward_path() {
        assert!(ProcessStatus::PendingConsultant.can_transition_to(ProcessStatus::ConsultantVerified));
        assert!(ProcessStatus::ConsultantVerified.can_transition_to(ProcessStatus::ManagerApproved));
        assert!(!ProcessStatus::PendingConsultant.can_transition_to(ProcessStatus::ManagerApproved));
        assert!(!ProcessStatus::ManagerApproved.can_transition_to(ProcessStatus::ConsultantVerified));
    }

    #[test]
    fn test_process_status_rejection() {
        assert!(ProcessStatus::PendingConsultant.can_transition_to(ProcessStatus::Rejected));
        assert!(ProcessStatus::ConsultantVerified.can_transition_to(ProcessStatus::Rejected));
        assert!(!ProcessStatus::ManagerApproved.can_transition_to(ProcessStatus::Rejected));
        assert!(!ProcessStatus::Rejected.can_transition_to(ProcessStatus::Rejected));
    }

    #[test]
    fn test_missing_material_deficit() {
        let missing = MissingMaterial {
            material_id: Uuid::new_v4(),
            needed: Decimal::from(12),
            available: Decimal::from(10),
        };
        assert_eq!(missing.deficit(), Decimal::from(2));
    }

    #[test]
    fn test_new_order_validation() {
        let mut input = NewOrder {
            product_id: Uuid::new_v4(),
            quantity: 10,
            delivery_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            customer_name: "Acme Packaging".to_string(),
            customer_phone: None,
            customer_email: Some("buyer@acme.example".to_string()),
            customer_company: None,
            notes: None,
        };
        assert!(input.validate().is_ok());

        input.quantity = 0;
        assert!(input.validate().is_err());

        input.quantity = 1;
        input.customer_email = Some("not-an-email".to_string());
        assert!(input.validate().is_err());
    }
}
