//! Read-only catalog of products, materials and bills of materials

use uuid::Uuid;

use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{BomEntry, Material, MaterialRequirement, Product};
use crate::validation::{check, validate_bom_quantity, validate_production_rate};

/// Products, materials and their bills of materials
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    materials: Vec<Material>,
    bom: Vec<BomEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting BOM lines that reference unknown entries
    pub fn new(
        products: Vec<Product>,
        materials: Vec<Material>,
        bom: Vec<BomEntry>,
    ) -> WorkflowResult<Self> {
        for product in &products {
            check(validate_production_rate(product.production_rate))?;
        }

        let catalog = Self {
            products,
            materials,
            bom,
        };
        for entry in &catalog.bom {
            catalog.product(entry.product_id)?;
            catalog.material(entry.material_id)?;
            check(validate_bom_quantity(entry.quantity_per_unit))?;
        }
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn bom(&self) -> &[BomEntry] {
        &self.bom
    }

    pub fn product(&self, id: Uuid) -> WorkflowResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Product, id))
    }

    pub fn material(&self, id: Uuid) -> WorkflowResult<&Material> {
        self.materials
            .iter()
            .find(|material| material.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Material, id))
    }

    pub fn bom_for(&self, product_id: Uuid) -> impl Iterator<Item = &BomEntry> {
        self.bom
            .iter()
            .filter(move |entry| entry.product_id == product_id)
    }

    /// Material needed to produce `quantity` units, one line per material.
    ///
    /// Duplicate BOM lines for the same material are summed.
    pub fn requirements(&self, product_id: Uuid, quantity: u32) -> Vec<MaterialRequirement> {
        let mut requirements: Vec<MaterialRequirement> = Vec::new();
        for entry in self.bom_for(product_id) {
            let needed = entry.needed_for(quantity);
            match requirements
                .iter_mut()
                .find(|req| req.material_id == entry.material_id)
            {
                Some(existing) => existing.quantity += needed,
                None => requirements.push(MaterialRequirement {
                    material_id: entry.material_id,
                    quantity: needed,
                }),
            }
        }
        requirements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitOfMeasure;
    use rust_decimal::Decimal;

    fn product(rate: u32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Mailer Box".to_string(),
            production_rate: rate,
        }
    }

    fn material(name: &str) -> Material {
        Material {
            id: Uuid::new_v4(),
            name: name.to_string(),
            unit: UnitOfMeasure::Sheet,
        }
    }

    #[test]
    fn test_requirements_sum_duplicate_lines() {
        let p = product(100);
        let board = material("E-flute board");
        let bom = vec![
            BomEntry {
                product_id: p.id,
                material_id: board.id,
                quantity_per_unit: Decimal::from(2),
            },
            BomEntry {
                product_id: p.id,
                material_id: board.id,
                quantity_per_unit: Decimal::new(5, 1),
            },
        ];
        let catalog = Catalog::new(vec![p.clone()], vec![board.clone()], bom).unwrap();

        let reqs = catalog.requirements(p.id, 10);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].material_id, board.id);
        assert_eq!(reqs[0].quantity, Decimal::from(25));
    }

    #[test]
    fn test_requirements_for_unknown_product_is_empty() {
        let catalog = Catalog::default();
        assert!(catalog.requirements(Uuid::new_v4(), 5).is_empty());
    }

    #[test]
    fn test_rejects_dangling_bom_line() {
        let p = product(100);
        let bom = vec![BomEntry {
            product_id: p.id,
            material_id: Uuid::new_v4(),
            quantity_per_unit: Decimal::ONE,
        }];
        let err = Catalog::new(vec![p], vec![], bom).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::NotFound {
                entity: EntityKind::Material,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_production_rate() {
        let err = Catalog::new(vec![product(0)], vec![], vec![]).unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }
}
