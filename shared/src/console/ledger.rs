//! Inventory ledger: on-hand and reserved quantities per material

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{InventoryRecord, MaterialRequirement};
use crate::validation::{check, validate_positive_quantity};

/// Per-material stock positions.
///
/// Reservations never exceed on-hand stock: `reserve` refuses anything beyond
/// the available quantity, and `consume` refuses more than is reserved.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    records: Vec<InventoryRecord>,
}

impl InventoryLedger {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn record(&self, material_id: Uuid) -> WorkflowResult<&InventoryRecord> {
        self.records
            .iter()
            .find(|record| record.material_id == material_id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::InventoryRecord, material_id))
    }

    fn record_mut(&mut self, material_id: Uuid) -> WorkflowResult<&mut InventoryRecord> {
        self.records
            .iter_mut()
            .find(|record| record.material_id == material_id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::InventoryRecord, material_id))
    }

    /// On hand minus reserved; materials never stocked have nothing available
    pub fn available(&self, material_id: Uuid) -> Decimal {
        self.record(material_id)
            .map(InventoryRecord::available)
            .unwrap_or(Decimal::ZERO)
    }

    /// Earmark stock for a scheduled order
    pub fn reserve(&mut self, material_id: Uuid, quantity: Decimal) -> WorkflowResult<&InventoryRecord> {
        check(validate_positive_quantity(quantity))?;
        let record = self.record_mut(material_id)?;
        let available = record.available();
        if quantity > available {
            return Err(WorkflowError::InsufficientInventory {
                material_id,
                requested: quantity,
                available,
            });
        }

        record.reserved += quantity;
        record.updated_at = Utc::now();
        tracing::debug!(%material_id, %quantity, reserved = %record.reserved, "reserved material");
        Ok(record)
    }

    /// Turn a reservation into an actual deduction
    pub fn consume(&mut self, material_id: Uuid, quantity: Decimal) -> WorkflowResult<&InventoryRecord> {
        check(validate_positive_quantity(quantity))?;
        let record = self.record_mut(material_id)?;
        if quantity > record.reserved || quantity > record.on_hand {
            return Err(WorkflowError::InsufficientInventory {
                material_id,
                requested: quantity,
                available: record.reserved.min(record.on_hand),
            });
        }

        record.on_hand -= quantity;
        record.reserved -= quantity;
        record.updated_at = Utc::now();
        tracing::debug!(%material_id, %quantity, on_hand = %record.on_hand, "consumed material");
        Ok(record)
    }

    /// Add delivered stock, opening a record for materials not yet stocked
    pub fn receive(&mut self, material_id: Uuid, quantity: Decimal) -> WorkflowResult<&InventoryRecord> {
        check(validate_positive_quantity(quantity))?;
        let index = match self
            .records
            .iter()
            .position(|record| record.material_id == material_id)
        {
            Some(index) => index,
            None => {
                self.records
                    .push(InventoryRecord::new(material_id, Decimal::ZERO));
                self.records.len() - 1
            }
        };

        let record = &mut self.records[index];
        record.on_hand += quantity;
        record.updated_at = Utc::now();
        tracing::debug!(%material_id, %quantity, on_hand = %record.on_hand, "received material");
        Ok(record)
    }

    /// Correct the physical count after a stock take
    pub fn adjust(&mut self, material_id: Uuid, on_hand: Decimal) -> WorkflowResult<&InventoryRecord> {
        if on_hand < Decimal::ZERO {
            return Err(WorkflowError::Validation(
                "On-hand quantity cannot be negative".to_string(),
            ));
        }
        let record = self.record_mut(material_id)?;
        if on_hand < record.reserved {
            return Err(WorkflowError::Precondition(format!(
                "on-hand {} would fall below reserved {}",
                on_hand, record.reserved
            )));
        }

        record.on_hand = on_hand;
        record.updated_at = Utc::now();
        Ok(record)
    }

    /// Every requirement can be reserved right now
    pub fn ensure_reservable(&self, requirements: &[MaterialRequirement]) -> WorkflowResult<()> {
        for req in requirements {
            let available = self.available(req.material_id);
            if req.quantity > available {
                return Err(WorkflowError::InsufficientInventory {
                    material_id: req.material_id,
                    requested: req.quantity,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Every requirement is covered by an existing reservation
    pub fn ensure_consumable(&self, requirements: &[MaterialRequirement]) -> WorkflowResult<()> {
        for req in requirements {
            let record = self.record(req.material_id)?;
            let covered = record.reserved.min(record.on_hand);
            if req.quantity > covered {
                return Err(WorkflowError::InsufficientInventory {
                    material_id: req.material_id,
                    requested: req.quantity,
                    available: covered,
                });
            }
        }
        Ok(())
    }
}
