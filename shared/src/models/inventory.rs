//! Inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stock position for one material
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub material_id: Uuid,
    /// Physical quantity in the warehouse
    pub on_hand: Decimal,
    /// Quantity committed to scheduled orders but not yet consumed
    pub reserved: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(material_id: Uuid, on_hand: Decimal) -> Self {
        Self {
            material_id,
            on_hand,
            reserved: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// Quantity free for new reservations
    pub fn available(&self) -> Decimal {
        self.on_hand - self.reserved
    }
}

/// Inventory position enriched with catalog data for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryPosition {
    pub material_id: Uuid,
    pub material_name: String,
    pub unit: super::UnitOfMeasure,
    pub on_hand: Decimal,
    pub reserved: Decimal,
    pub available: Decimal,
}
