//! Catalog reference data: products, materials and bills of materials

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product the shop can produce
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Units producible per day
    pub production_rate: u32,
}

/// A raw material consumed by production
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub unit: UnitOfMeasure,
}

/// Units materials are stocked in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitOfMeasure {
    Sheet,
    Kilogram,
    Liter,
    Meter,
    Roll,
    Piece,
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitOfMeasure::Sheet => write!(f, "sheet"),
            UnitOfMeasure::Kilogram => write!(f, "kg"),
            UnitOfMeasure::Liter => write!(f, "L"),
            UnitOfMeasure::Meter => write!(f, "m"),
            UnitOfMeasure::Roll => write!(f, "roll"),
            UnitOfMeasure::Piece => write!(f, "pcs"),
        }
    }
}

/// One line of a bill of materials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BomEntry {
    pub product_id: Uuid,
    pub material_id: Uuid,
    /// Material consumed per unit of product
    pub quantity_per_unit: Decimal,
}

impl BomEntry {
    /// Material needed to produce `units` of the product
    pub fn needed_for(&self, units: u32) -> Decimal {
        self.quantity_per_unit * Decimal::from(units)
    }
}

/// Total quantity of one material an order needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialRequirement {
    pub material_id: Uuid,
    pub quantity: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needed_for_scales_by_units() {
        let entry = BomEntry {
            product_id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            quantity_per_unit: Decimal::new(25, 1),
        };
        assert_eq!(entry.needed_for(4), Decimal::from(10));
        assert_eq!(entry.needed_for(0), Decimal::ZERO);
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(UnitOfMeasure::Kilogram.to_string(), "kg");
        assert_eq!(UnitOfMeasure::Sheet.to_string(), "sheet");
    }
}
