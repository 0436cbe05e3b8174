//! Procurement: purchase requests, purchase orders and goods receipt

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::ProductionConsole;
use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{
    InventoryRecord, PurchaseOrder, PurchaseOrderStatus, PurchaseRequest, PurchaseRequestStatus,
};
use crate::validation::{check, validate_supplier_name};

impl ProductionConsole {
    /// Raise one purchase request per shortage recorded on the order.
    ///
    /// Each request asks for the deficit (`needed - available`). Materials that
    /// already have an open request for this order are skipped.
    pub fn create_purchase_request(&mut self, order_id: Uuid) -> WorkflowResult<Vec<PurchaseRequest>> {
        let order = self.order(order_id)?;
        if order.can_fulfill != Some(false) || order.missing_materials.is_empty() {
            return Err(WorkflowError::Precondition(format!(
                "order {} has no recorded shortage",
                order_id
            )));
        }

        let now = Utc::now();
        let requests: Vec<PurchaseRequest> = order
            .missing_materials
            .iter()
            .filter(|missing| {
                !self.purchase_requests.iter().any(|pr| {
                    pr.order_id == order_id
                        && pr.material_id == missing.material_id
                        && pr.status.is_open()
                })
            })
            .map(|missing| PurchaseRequest {
                id: Uuid::new_v4(),
                order_id,
                material_id: missing.material_id,
                quantity_needed: missing.deficit(),
                status: PurchaseRequestStatus::Pending,
                created_at: now,
            })
            .collect();

        if requests.is_empty() {
            return Err(WorkflowError::Precondition(format!(
                "every shortage on order {} already has an open purchase request",
                order_id
            )));
        }

        for pr in &requests {
            tracing::info!(
                pr_id = %pr.id,
                %order_id,
                material_id = %pr.material_id,
                quantity = %pr.quantity_needed,
                "purchase request raised"
            );
        }
        self.purchase_requests.extend(requests.iter().cloned());
        Ok(requests)
    }

    /// Commit a supplier to a pending purchase request
    pub fn create_purchase_order(
        &mut self,
        purchase_request_id: Uuid,
        supplier: &str,
        expected_delivery: NaiveDate,
    ) -> WorkflowResult<PurchaseOrder> {
        check(validate_supplier_name(supplier))?;

        let pr = self.purchase_request_mut(purchase_request_id)?;
        if pr.status != PurchaseRequestStatus::Pending {
            return Err(WorkflowError::transition(
                EntityKind::PurchaseRequest,
                pr.status,
                PurchaseRequestStatus::Ordered,
            ));
        }
        pr.status = PurchaseRequestStatus::Ordered;

        let po = PurchaseOrder {
            id: Uuid::new_v4(),
            purchase_request_id,
            supplier: supplier.trim().to_string(),
            expected_delivery,
            status: PurchaseOrderStatus::Ordered,
            delivered_on: None,
            created_at: Utc::now(),
        };
        tracing::info!(
            po_id = %po.id,
            pr_id = %purchase_request_id,
            supplier = %po.supplier,
            %expected_delivery,
            "purchase order placed"
        );
        self.purchase_orders.push(po.clone());
        Ok(po)
    }

    /// Book a delivered purchase order into stock.
    ///
    /// Adds the request's quantity to on-hand inventory and closes both the
    /// order and the request. Orders waiting on this material are not
    /// re-checked; callers run `check_fulfillment` again to pick them up.
    pub fn receive_inventory(&mut self, purchase_order_id: Uuid) -> WorkflowResult<PurchaseOrder> {
        let po = self.purchase_order(purchase_order_id)?;
        if po.status != PurchaseOrderStatus::Ordered {
            return Err(WorkflowError::transition(
                EntityKind::PurchaseOrder,
                po.status,
                PurchaseOrderStatus::Delivered,
            ));
        }
        let pr = self.purchase_request(po.purchase_request_id)?;
        if pr.status != PurchaseRequestStatus::Ordered {
            return Err(WorkflowError::transition(
                EntityKind::PurchaseRequest,
                pr.status,
                PurchaseRequestStatus::Received,
            ));
        }
        let (pr_id, material_id, quantity) = (pr.id, pr.material_id, pr.quantity_needed);

        self.ledger.receive(material_id, quantity)?;
        self.purchase_request_mut(pr_id)?.status = PurchaseRequestStatus::Received;

        let today = self.today();
        let po = self.purchase_order_mut(purchase_order_id)?;
        po.status = PurchaseOrderStatus::Delivered;
        po.delivered_on = Some(today);

        tracing::info!(
            po_id = %purchase_order_id,
            %material_id,
            %quantity,
            "purchase order received into stock"
        );
        Ok(po.clone())
    }

    /// Withdraw a request before any supplier was engaged
    pub fn cancel_purchase_request(&mut self, purchase_request_id: Uuid) -> WorkflowResult<PurchaseRequest> {
        let pr = self.purchase_request_mut(purchase_request_id)?;
        if pr.status != PurchaseRequestStatus::Pending {
            return Err(WorkflowError::transition(
                EntityKind::PurchaseRequest,
                pr.status,
                PurchaseRequestStatus::Cancelled,
            ));
        }

        pr.status = PurchaseRequestStatus::Cancelled;
        tracing::info!(pr_id = %purchase_request_id, "purchase request cancelled");
        Ok(pr.clone())
    }

    /// Overwrite the on-hand count of a material after a stock take
    pub fn adjust_inventory(&mut self, material_id: Uuid, on_hand: Decimal) -> WorkflowResult<InventoryRecord> {
        self.catalog.material(material_id)?;
        let record = self.ledger.adjust(material_id, on_hand)?.clone();
        tracing::info!(%material_id, %on_hand, "inventory adjusted");
        Ok(record)
    }
}
