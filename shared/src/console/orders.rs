//! Order intake, human review workflow and fulfillment checks

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use super::ProductionConsole;
use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{
    FulfillmentReport, MissingMaterial, NewOrder, Order, OrderCommercials, ProcessStatus,
};
use crate::validation::{check, validate_phone};

impl ProductionConsole {
    /// Take in a new order; it starts pending and awaiting consultant review
    pub fn create_order(&mut self, input: NewOrder) -> WorkflowResult<Order> {
        input.validate()?;
        if let Some(phone) = input.customer_phone.as_deref() {
            check(validate_phone(phone))?;
        }
        self.catalog.product(input.product_id)?;

        let order = Order::from_intake(input);
        tracing::info!(
            order_id = %order.id,
            product_id = %order.product_id,
            quantity = order.quantity,
            "order created"
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Compare the order's bill of materials against available stock.
    ///
    /// Records the outcome on the order and never touches inventory, so it can
    /// be re-run whenever stock changes.
    pub fn check_fulfillment(&mut self, order_id: Uuid) -> WorkflowResult<FulfillmentReport> {
        let (product_id, quantity) = {
            let order = self.order(order_id)?;
            (order.product_id, order.quantity)
        };

        let missing_materials: Vec<MissingMaterial> = self
            .catalog
            .requirements(product_id, quantity)
            .into_iter()
            .filter_map(|req| {
                let available = self.ledger.available(req.material_id);
                (available < req.quantity).then_some(MissingMaterial {
                    material_id: req.material_id,
                    needed: req.quantity,
                    available,
                })
            })
            .collect();
        let can_fulfill = missing_materials.is_empty();

        let order = self.order_mut(order_id)?;
        order.can_fulfill = Some(can_fulfill);
        order.missing_materials = missing_materials.clone();
        order.updated_at = Utc::now();

        if can_fulfill {
            tracing::info!(%order_id, "order can be fulfilled from stock");
        } else {
            tracing::info!(
                %order_id,
                shortages = missing_materials.len(),
                "order is short of materials"
            );
        }

        Ok(FulfillmentReport {
            order_id,
            can_fulfill,
            missing_materials,
        })
    }

    /// Move the order through consultant and manager review
    pub fn update_process_status(
        &mut self,
        order_id: Uuid,
        next: ProcessStatus,
    ) -> WorkflowResult<Order> {
        let order = self.order_mut(order_id)?;
        if !order.process_status.can_transition_to(next) {
            tracing::warn!(%order_id, from = %order.process_status, to = %next, "rejected review transition");
            return Err(WorkflowError::transition(
                EntityKind::Order,
                order.process_status,
                next,
            ));
        }

        order.process_status = next;
        order.updated_at = Utc::now();
        tracing::info!(%order_id, process_status = %next, "order review updated");
        Ok(order.clone())
    }

    /// Set price, rush fee, notes and contract reference
    pub fn update_order_commercials(
        &mut self,
        order_id: Uuid,
        commercials: OrderCommercials,
    ) -> WorkflowResult<Order> {
        let negative = |value: Option<Decimal>| value.is_some_and(|v| v < Decimal::ZERO);
        if negative(commercials.price) || negative(commercials.rush_fee) {
            return Err(WorkflowError::Validation(
                "Price and rush fee cannot be negative".to_string(),
            ));
        }

        let order = self.order_mut(order_id)?;
        order.commercials = commercials;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Catalog, InventoryLedger};
    use crate::models::{BomEntry, InventoryRecord, Material, OrderStatus, Product, UnitOfMeasure};
    use chrono::NaiveDate;

    struct Fixture {
        console: ProductionConsole,
        product: Uuid,
        ink: Uuid,
        board: Uuid,
    }

    fn fixture() -> Fixture {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Folding Carton".to_string(),
            production_rate: 400,
        };
        let ink = Material {
            id: Uuid::new_v4(),
            name: "Process Ink".to_string(),
            unit: UnitOfMeasure::Kilogram,
        };
        let board = Material {
            id: Uuid::new_v4(),
            name: "Carton Board".to_string(),
            unit: UnitOfMeasure::Sheet,
        };
        let bom = vec![
            BomEntry {
                product_id: product.id,
                material_id: ink.id,
                quantity_per_unit: Decimal::new(1, 1),
            },
            BomEntry {
                product_id: product.id,
                material_id: board.id,
                quantity_per_unit: Decimal::ONE,
            },
        ];
        let ledger = InventoryLedger::new(vec![
            InventoryRecord::new(ink.id, Decimal::from(50)),
            InventoryRecord::new(board.id, Decimal::from(300)),
        ]);
        let catalog = Catalog::new(vec![product.clone()], vec![ink.clone(), board.clone()], bom).unwrap();
        Fixture {
            console: ProductionConsole::new(catalog, ledger),
            product: product.id,
            ink: ink.id,
            board: board.id,
        }
    }

    fn intake(product_id: Uuid, quantity: u32) -> NewOrder {
        NewOrder {
            product_id,
            quantity,
            delivery_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
            customer_name: "Blue Door Bakery".to_string(),
            customer_phone: Some("02-555-0199".to_string()),
            customer_email: None,
            customer_company: None,
            notes: Some("Matte finish".to_string()),
        }
    }

    #[test]
    fn test_create_order_defaults() {
        let mut f = fixture();
        let order = f.console.create_order(intake(f.product, 100)).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.process_status, ProcessStatus::PendingConsultant);
        assert_eq!(order.can_fulfill, None);
        assert_eq!(order.commercials.notes.as_deref(), Some("Matte finish"));
        assert_eq!(f.console.orders().len(), 1);
    }

    #[test]
    fn test_create_order_rejects_unknown_product() {
        let mut f = fixture();
        let err = f.console.create_order(intake(Uuid::new_v4(), 10)).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::NotFound {
                entity: EntityKind::Product,
                ..
            }
        ));
        assert!(f.console.orders().is_empty());
    }

    #[test]
    fn test_create_order_rejects_bad_phone() {
        let mut f = fixture();
        let mut input = intake(f.product, 10);
        input.customer_phone = Some("ask reception".to_string());
        assert!(matches!(
            f.console.create_order(input),
            Err(WorkflowError::Validation(_))
        ));
    }

    #[test]
    fn test_fulfillment_lists_only_short_materials() {
        let mut f = fixture();
        let order = f.console.create_order(intake(f.product, 400)).unwrap();

        let report = f.console.check_fulfillment(order.id).unwrap();
        assert!(!report.can_fulfill);
        assert_eq!(
            report.missing_materials,
            vec![MissingMaterial {
                material_id: f.board,
                needed: Decimal::from(400),
                available: Decimal::from(300),
            }]
        );
        assert_eq!(f.console.available(f.ink), Decimal::from(50));
    }

    #[test]
    fn test_fulfillment_clears_stale_shortages() {
        let mut f = fixture();
        let order = f.console.create_order(intake(f.product, 400)).unwrap();
        f.console.check_fulfillment(order.id).unwrap();

        f.console.ledger.receive(f.board, Decimal::from(100)).unwrap();
        let report = f.console.check_fulfillment(order.id).unwrap();
        assert!(report.can_fulfill);

        let order = f.console.order(order.id).unwrap();
        assert_eq!(order.can_fulfill, Some(true));
        assert!(order.missing_materials.is_empty());
    }

    #[test]
    fn test_fulfillment_is_idempotent() {
        let mut f = fixture();
        let order = f.console.create_order(intake(f.product, 400)).unwrap();
        let first = f.console.check_fulfillment(order.id).unwrap();
        let second = f.console.check_fulfillment(order.id).unwrap();
        assert_eq!(first, second);
        assert_eq!(f.console.inventory_record(f.board).unwrap().reserved, Decimal::ZERO);
    }

    #[test]
    fn test_fulfillment_unknown_order() {
        let mut f = fixture();
        assert!(f.console.check_fulfillment(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_review_workflow() {
        let mut f = fixture();
        let order = f.console.create_order(intake(f.product, 10)).unwrap();

        assert!(f
            .console
            .update_process_status(order.id, ProcessStatus::ManagerApproved)
            .is_err());
        f.console
            .update_process_status(order.id, ProcessStatus::ConsultantVerified)
            .unwrap();
        let approved = f
            .console
            .update_process_status(order.id, ProcessStatus::ManagerApproved)
            .unwrap();
        assert_eq!(approved.process_status, ProcessStatus::ManagerApproved);
        assert!(f
            .console
            .update_process_status(order.id, ProcessStatus::Rejected)
            .is_err());
    }

    #[test]
    fn test_update_commercials() {
        let mut f = fixture();
        let order = f.console.create_order(intake(f.product, 10)).unwrap();
        let updated = f
            .console
            .update_order_commercials(
                order.id,
                OrderCommercials {
                    price: Some(Decimal::from(1200)),
                    rush_fee: Some(Decimal::from(150)),
                    notes: None,
                    contract_reference: Some("CT-2024-018".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.commercials.price, Some(Decimal::from(1200)));

        let err = f.console.update_order_commercials(
            order.id,
            OrderCommercials {
                price: Some(Decimal::from(-1)),
                ..OrderCommercials::default()
            },
        );
        assert!(err.is_err());
    }
}
