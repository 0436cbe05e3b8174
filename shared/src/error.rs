//! Error types for the production workflow
//!
//! Every console command returns a [`WorkflowResult`]. A failed precondition
//! leaves the console untouched and reports why.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Kinds of entity the console keeps, used to tag lookup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Material,
    InventoryRecord,
    Order,
    PurchaseRequest,
    PurchaseOrder,
    Schedule,
    Printer,
    Worker,
    Assignment,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Product => write!(f, "Product"),
            EntityKind::Material => write!(f, "Material"),
            EntityKind::InventoryRecord => write!(f, "Inventory record"),
            EntityKind::Order => write!(f, "Order"),
            EntityKind::PurchaseRequest => write!(f, "Purchase request"),
            EntityKind::PurchaseOrder => write!(f, "Purchase order"),
            EntityKind::Schedule => write!(f, "Production schedule"),
            EntityKind::Printer => write!(f, "Printer"),
            EntityKind::Worker => write!(f, "Worker"),
            EntityKind::Assignment => write!(f, "Machine assignment"),
        }
    }
}

/// Workflow error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid {entity} transition from {from} to {to}")]
    InvalidTransition {
        entity: EntityKind,
        from: String,
        to: String,
    },

    #[error("Insufficient inventory for material {material_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        material_id: Uuid,
        requested: Decimal,
        available: Decimal,
    },

    #[error("{0} is not accepting work")]
    ResourceUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl WorkflowError {
    pub(crate) fn not_found(entity: EntityKind, id: Uuid) -> Self {
        WorkflowError::NotFound { entity, id }
    }

    pub(crate) fn transition(
        entity: EntityKind,
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
    ) -> Self {
        WorkflowError::InvalidTransition {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for WorkflowError {
    fn from(errors: validator::ValidationErrors) -> Self {
        WorkflowError::Validation(errors.to_string())
    }
}

/// Result type alias for console commands and lookups
pub type WorkflowResult<T> = Result<T, WorkflowError>;
