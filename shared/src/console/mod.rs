//! In-memory production console
//!
//! [`ProductionConsole`] owns every collection the print shop works with and
//! is the only way to change them. Each command checks its preconditions
//! before touching any state, so a rejected command leaves the console as it
//! was. Commands take `&mut self`; callers sharing a console across threads
//! must serialize access themselves.

mod catalog;
mod ledger;
mod orders;
mod procurement;
mod resources;
mod scheduler;
mod seed;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

pub use catalog::Catalog;
pub use ledger::InventoryLedger;

use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{
    BomEntry, InventoryPosition, InventoryRecord, MachineAssignment, Material, Order, Printer,
    Product, ProductionSchedule, ProductionStage, PurchaseOrder, PurchaseRequest, Worker,
};
use crate::types::{Clock, SystemClock};

/// Aggregate owning catalog, inventory, orders, procurement, schedules and resources
pub struct ProductionConsole {
    catalog: Catalog,
    ledger: InventoryLedger,
    orders: Vec<Order>,
    purchase_requests: Vec<PurchaseRequest>,
    purchase_orders: Vec<PurchaseOrder>,
    schedules: Vec<ProductionSchedule>,
    printers: Vec<Printer>,
    workers: Vec<Worker>,
    assignments: Vec<MachineAssignment>,
    clock: Arc<dyn Clock>,
}

impl ProductionConsole {
    /// Create an empty console over the given catalog and stock
    pub fn new(catalog: Catalog, ledger: InventoryLedger) -> Self {
        Self {
            catalog,
            ledger,
            orders: Vec::new(),
            purchase_requests: Vec::new(),
            purchase_orders: Vec::new(),
            schedules: Vec::new(),
            printers: Vec::new(),
            workers: Vec::new(),
            assignments: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for stage and delivery dates
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ------------------------------------------------------------------------
    // Catalog & inventory queries
    // ------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn product(&self, id: Uuid) -> WorkflowResult<&Product> {
        self.catalog.product(id)
    }

    pub fn materials(&self) -> &[Material] {
        self.catalog.materials()
    }

    pub fn material(&self, id: Uuid) -> WorkflowResult<&Material> {
        self.catalog.material(id)
    }

    pub fn bom(&self) -> &[BomEntry] {
        self.catalog.bom()
    }

    pub fn inventory(&self) -> &[InventoryRecord] {
        self.ledger.records()
    }

    pub fn inventory_record(&self, material_id: Uuid) -> WorkflowResult<&InventoryRecord> {
        self.ledger.record(material_id)
    }

    /// On hand minus reserved, computed at read time
    pub fn available(&self, material_id: Uuid) -> Decimal {
        self.ledger.available(material_id)
    }

    /// Inventory joined with material names, in catalog order
    pub fn inventory_positions(&self) -> Vec<InventoryPosition> {
        self.catalog
            .materials()
            .iter()
            .map(|material| {
                let (on_hand, reserved) = self
                    .ledger
                    .record(material.id)
                    .map(|record| (record.on_hand, record.reserved))
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                InventoryPosition {
                    material_id: material.id,
                    material_name: material.name.clone(),
                    unit: material.unit,
                    on_hand,
                    reserved,
                    available: on_hand - reserved,
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Order, procurement and schedule queries
    // ------------------------------------------------------------------------

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: Uuid) -> WorkflowResult<&Order> {
        self.orders
            .iter()
            .find(|order| order.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Order, id))
    }

    pub(crate) fn order_mut(&mut self, id: Uuid) -> WorkflowResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Order, id))
    }

    pub fn purchase_requests(&self) -> &[PurchaseRequest] {
        &self.purchase_requests
    }

    pub fn purchase_request(&self, id: Uuid) -> WorkflowResult<&PurchaseRequest> {
        self.purchase_requests
            .iter()
            .find(|pr| pr.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::PurchaseRequest, id))
    }

    pub(crate) fn purchase_request_mut(&mut self, id: Uuid) -> WorkflowResult<&mut PurchaseRequest> {
        self.purchase_requests
            .iter_mut()
            .find(|pr| pr.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::PurchaseRequest, id))
    }

    pub fn purchase_requests_for_order(&self, order_id: Uuid) -> Vec<&PurchaseRequest> {
        self.purchase_requests
            .iter()
            .filter(|pr| pr.order_id == order_id)
            .collect()
    }

    pub fn purchase_orders(&self) -> &[PurchaseOrder] {
        &self.purchase_orders
    }

    pub fn purchase_order(&self, id: Uuid) -> WorkflowResult<&PurchaseOrder> {
        self.purchase_orders
            .iter()
            .find(|po| po.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::PurchaseOrder, id))
    }

    pub(crate) fn purchase_order_mut(&mut self, id: Uuid) -> WorkflowResult<&mut PurchaseOrder> {
        self.purchase_orders
            .iter_mut()
            .find(|po| po.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::PurchaseOrder, id))
    }

    pub fn schedules(&self) -> &[ProductionSchedule] {
        &self.schedules
    }

    pub fn schedule(&self, id: Uuid) -> WorkflowResult<&ProductionSchedule> {
        self.schedules
            .iter()
            .find(|schedule| schedule.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Schedule, id))
    }

    pub(crate) fn schedule_mut(&mut self, id: Uuid) -> WorkflowResult<&mut ProductionSchedule> {
        self.schedules
            .iter_mut()
            .find(|schedule| schedule.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Schedule, id))
    }

    pub fn schedule_for_order(&self, order_id: Uuid) -> Option<&ProductionSchedule> {
        self.schedules
            .iter()
            .find(|schedule| schedule.order_id == order_id)
    }

    /// Stage list of the order's schedule, empty if the order is not scheduled
    pub fn stages_for_order(&self, order_id: Uuid) -> WorkflowResult<&[ProductionStage]> {
        self.order(order_id)?;
        Ok(self
            .schedule_for_order(order_id)
            .map(|schedule| schedule.stages.as_slice())
            .unwrap_or(&[]))
    }

    // ------------------------------------------------------------------------
    // Resource queries
    // ------------------------------------------------------------------------

    pub fn printers(&self) -> &[Printer] {
        &self.printers
    }

    pub fn printer(&self, id: Uuid) -> WorkflowResult<&Printer> {
        self.printers
            .iter()
            .find(|printer| printer.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Printer, id))
    }

    pub(crate) fn printer_mut(&mut self, id: Uuid) -> WorkflowResult<&mut Printer> {
        self.printers
            .iter_mut()
            .find(|printer| printer.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Printer, id))
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn worker(&self, id: Uuid) -> WorkflowResult<&Worker> {
        self.workers
            .iter()
            .find(|worker| worker.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Worker, id))
    }

    pub(crate) fn worker_mut(&mut self, id: Uuid) -> WorkflowResult<&mut Worker> {
        self.workers
            .iter_mut()
            .find(|worker| worker.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Worker, id))
    }

    pub fn assignments(&self) -> &[MachineAssignment] {
        &self.assignments
    }

    pub fn assignment(&self, id: Uuid) -> WorkflowResult<&MachineAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.id == id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Assignment, id))
    }

    /// The order's open assignment, if any
    pub fn assignment_for_order(&self, order_id: Uuid) -> Option<&MachineAssignment> {
        self.assignments
            .iter()
            .rev()
            .find(|assignment| assignment.order_id == order_id && assignment.status.is_active())
    }
}
