//! WebAssembly module for the Print Shop Console
//!
//! Runs the production console inside the browser:
//! - Order intake, fulfillment checks and review workflow
//! - Procurement (purchase requests, purchase orders, goods receipt)
//! - Scheduling and the eight-stage production pipeline
//! - Printer and worker assignment
//!
//! Every method takes and returns JSON strings; failures are returned to
//! JavaScript as error strings.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{ProductionConsole, WorkflowResult};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("print shop console loaded"));
}

/// Today's date in the browser's local time zone
#[cfg(target_arch = "wasm32")]
struct BrowserClock;

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            now.get_full_year() as i32,
            now.get_month() + 1,
            now.get_date(),
        )
        .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn parse_id(id: &str) -> Result<Uuid, JsValue> {
    Uuid::parse_str(id).map_err(|e| JsValue::from_str(&format!("Invalid id {}: {}", id, e)))
}

fn parse_date(date: &str) -> Result<NaiveDate, JsValue> {
    date.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date {}: {}", date, e)))
}

fn respond<T: Serialize>(result: WorkflowResult<T>) -> Result<String, JsValue> {
    let value = result.map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Stage key such as `"die_cut"` to its pipeline stage
fn stage_from_key(key: &str) -> Option<StageKind> {
    StageKind::PIPELINE
        .iter()
        .copied()
        .find(|stage| stage.as_str() == key)
}

/// Browser-side handle owning one production console
#[wasm_bindgen]
pub struct ConsoleHandle {
    console: ProductionConsole,
}

#[wasm_bindgen]
impl ConsoleHandle {
    /// Console preloaded with the demo shop
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ConsoleHandle, JsValue> {
        let console = ProductionConsole::with_demo_data().map_err(|e| JsValue::from_str(&e.to_string()))?;
        #[cfg(target_arch = "wasm32")]
        let console = console.with_clock(Arc::new(BrowserClock));
        Ok(Self { console })
    }

    /// Pin "today" to a fixed `YYYY-MM-DD` date
    #[wasm_bindgen(js_name = setToday)]
    pub fn set_today(&mut self, date: &str) -> Result<(), JsValue> {
        let date = parse_date(date)?;
        self.console.set_clock(Arc::new(FixedClock(date)));
        Ok(())
    }

    // Queries

    pub fn products(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.products()))
    }

    pub fn materials(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.materials()))
    }

    pub fn bom(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.bom()))
    }

    pub fn inventory(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.inventory_positions()))
    }

    pub fn orders(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.orders()))
    }

    pub fn order(&self, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.order(parse_id(order_id)?))
    }

    #[wasm_bindgen(js_name = purchaseRequests)]
    pub fn purchase_requests(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.purchase_requests()))
    }

    #[wasm_bindgen(js_name = purchaseOrders)]
    pub fn purchase_orders(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.purchase_orders()))
    }

    pub fn schedules(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.schedules()))
    }

    #[wasm_bindgen(js_name = stagesForOrder)]
    pub fn stages_for_order(&self, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.stages_for_order(parse_id(order_id)?))
    }

    pub fn printers(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.printers()))
    }

    pub fn workers(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.workers()))
    }

    pub fn assignments(&self) -> Result<String, JsValue> {
        respond(Ok(self.console.assignments()))
    }

    // Orders

    #[wasm_bindgen(js_name = createOrder)]
    pub fn create_order(&mut self, input_json: &str) -> Result<String, JsValue> {
        let input: NewOrder = parse(input_json, "order")?;
        respond(self.console.create_order(input))
    }

    #[wasm_bindgen(js_name = checkFulfillment)]
    pub fn check_fulfillment(&mut self, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.check_fulfillment(parse_id(order_id)?))
    }

    /// `status` is a JSON string such as `"consultant_verified"`
    #[wasm_bindgen(js_name = updateProcessStatus)]
    pub fn update_process_status(&mut self, order_id: &str, status_json: &str) -> Result<String, JsValue> {
        let status: ProcessStatus = parse(status_json, "process status")?;
        respond(self.console.update_process_status(parse_id(order_id)?, status))
    }

    #[wasm_bindgen(js_name = updateOrderCommercials)]
    pub fn update_order_commercials(&mut self, order_id: &str, commercials_json: &str) -> Result<String, JsValue> {
        let commercials: OrderCommercials = parse(commercials_json, "commercials")?;
        respond(self.console.update_order_commercials(parse_id(order_id)?, commercials))
    }

    // Procurement

    #[wasm_bindgen(js_name = createPurchaseRequest)]
    pub fn create_purchase_request(&mut self, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.create_purchase_request(parse_id(order_id)?))
    }

    #[wasm_bindgen(js_name = createPurchaseOrder)]
    pub fn create_purchase_order(&mut self, input_json: &str) -> Result<String, JsValue> {
        let input: NewPurchaseOrder = parse(input_json, "purchase order")?;
        respond(self.console.create_purchase_order(
            input.purchase_request_id,
            &input.supplier,
            input.expected_delivery,
        ))
    }

    #[wasm_bindgen(js_name = receiveInventory)]
    pub fn receive_inventory(&mut self, purchase_order_id: &str) -> Result<String, JsValue> {
        respond(self.console.receive_inventory(parse_id(purchase_order_id)?))
    }

    #[wasm_bindgen(js_name = cancelPurchaseRequest)]
    pub fn cancel_purchase_request(&mut self, purchase_request_id: &str) -> Result<String, JsValue> {
        respond(self.console.cancel_purchase_request(parse_id(purchase_request_id)?))
    }

    #[wasm_bindgen(js_name = adjustInventory)]
    pub fn adjust_inventory(&mut self, material_id: &str, on_hand: &str) -> Result<String, JsValue> {
        let on_hand: Decimal = on_hand
            .parse()
            .map_err(|e| JsValue::from_str(&format!("Invalid quantity {}: {}", on_hand, e)))?;
        respond(self.console.adjust_inventory(parse_id(material_id)?, on_hand))
    }

    // Production

    #[wasm_bindgen(js_name = scheduleProduction)]
    pub fn schedule_production(&mut self, order_id: &str, machine_id: Option<String>) -> Result<String, JsValue> {
        let machine_id = machine_id.as_deref().map(parse_id).transpose()?;
        respond(self.console.schedule_production(parse_id(order_id)?, machine_id))
    }

    #[wasm_bindgen(js_name = startProduction)]
    pub fn start_production(&mut self, schedule_id: &str) -> Result<String, JsValue> {
        respond(self.console.start_production(parse_id(schedule_id)?))
    }

    /// `stage` is a stage key such as `"die_cut"`
    #[wasm_bindgen(js_name = updateProductionStage)]
    pub fn update_production_stage(&mut self, schedule_id: &str, stage: &str) -> Result<String, JsValue> {
        let stage = stage_from_key(stage).ok_or_else(|| JsValue::from_str(&format!("Unknown stage {}", stage)))?;
        respond(self.console.update_production_stage(parse_id(schedule_id)?, stage))
    }

    #[wasm_bindgen(js_name = completeProduction)]
    pub fn complete_production(&mut self, schedule_id: &str) -> Result<String, JsValue> {
        respond(self.console.complete_production(parse_id(schedule_id)?))
    }

    // Resources

    #[wasm_bindgen(js_name = addPrinter)]
    pub fn add_printer(&mut self, input_json: &str) -> Result<String, JsValue> {
        let input: NewPrinter = parse(input_json, "printer")?;
        respond(self.console.add_printer(input))
    }

    #[wasm_bindgen(js_name = addWorker)]
    pub fn add_worker(&mut self, input_json: &str) -> Result<String, JsValue> {
        let input: NewWorker = parse(input_json, "worker")?;
        respond(self.console.add_worker(input))
    }

    #[wasm_bindgen(js_name = assignMachineToOrder)]
    pub fn assign_machine_to_order(&mut self, machine_id: &str, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.assign_machine_to_order(parse_id(machine_id)?, parse_id(order_id)?))
    }

    #[wasm_bindgen(js_name = assignWorkerToOrder)]
    pub fn assign_worker_to_order(&mut self, worker_id: &str, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.assign_worker_to_order(parse_id(worker_id)?, parse_id(order_id)?))
    }

    /// Record an assignment without touching printer or worker queues
    #[wasm_bindgen(js_name = createMachineAssignment)]
    pub fn create_machine_assignment(
        &mut self,
        order_id: &str,
        machine_id: &str,
        worker_id: Option<String>,
    ) -> Result<String, JsValue> {
        let worker_id = worker_id.as_deref().map(parse_id).transpose()?;
        respond(self.console.create_machine_assignment(
            parse_id(order_id)?,
            parse_id(machine_id)?,
            worker_id,
        ))
    }

    /// `status` is a JSON string such as `"in_progress"`
    #[wasm_bindgen(js_name = updateAssignmentStatus)]
    pub fn update_assignment_status(&mut self, assignment_id: &str, status_json: &str) -> Result<String, JsValue> {
        let status: AssignmentStatus = parse(status_json, "assignment status")?;
        respond(self.console.update_assignment_status(parse_id(assignment_id)?, status))
    }

    #[wasm_bindgen(js_name = assignMachineWithWorker)]
    pub fn assign_machine_with_worker(
        &mut self,
        order_id: &str,
        machine_id: &str,
        worker_id: Option<String>,
    ) -> Result<String, JsValue> {
        let worker_id = worker_id.as_deref().map(parse_id).transpose()?;
        respond(self.console.assign_machine_with_worker(
            parse_id(order_id)?,
            parse_id(machine_id)?,
            worker_id,
        ))
    }

    #[wasm_bindgen(js_name = reassignWorker)]
    pub fn reassign_worker(&mut self, order_id: &str, worker_id: &str) -> Result<String, JsValue> {
        respond(self.console.reassign_worker(parse_id(order_id)?, parse_id(worker_id)?))
    }

    #[wasm_bindgen(js_name = removeMachineFromOrder)]
    pub fn remove_machine_from_order(&mut self, machine_id: &str, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.remove_machine_from_order(parse_id(machine_id)?, parse_id(order_id)?))
    }

    #[wasm_bindgen(js_name = removeWorkerFromOrder)]
    pub fn remove_worker_from_order(&mut self, worker_id: &str, order_id: &str) -> Result<String, JsValue> {
        respond(self.console.remove_worker_from_order(parse_id(worker_id)?, parse_id(order_id)?))
    }

    #[wasm_bindgen(js_name = updatePrinter)]
    pub fn update_printer(&mut self, printer_id: &str, update_json: &str) -> Result<String, JsValue> {
        let update: PrinterUpdate = parse(update_json, "printer update")?;
        respond(self.console.update_printer(parse_id(printer_id)?, update))
    }

    #[wasm_bindgen(js_name = updateWorker)]
    pub fn update_worker(&mut self, worker_id: &str, update_json: &str) -> Result<String, JsValue> {
        let update: WorkerUpdate = parse(update_json, "worker update")?;
        respond(self.console.update_worker(parse_id(worker_id)?, update))
    }
}

/// Whole production days needed for `quantity` units at `production_rate` per day
#[wasm_bindgen(js_name = productionDays)]
pub fn production_days_for(quantity: u32, production_rate: u32) -> u32 {
    production_days(quantity, production_rate).unwrap_or(0)
}

/// Production window as `{"start": ..., "end": ...}`, or `null` if none fits
#[wasm_bindgen(js_name = scheduleWindow)]
pub fn schedule_window_json(delivery_date: &str, quantity: u32, production_rate: u32) -> String {
    let window = delivery_date
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| schedule_window(date, quantity, production_rate));
    serde_json::to_string(&window).unwrap_or_else(|_| "null".to_string())
}

/// Display names of the pipeline stages, in order
#[wasm_bindgen(js_name = stageNames)]
pub fn stage_names() -> Vec<String> {
    StageKind::PIPELINE.iter().map(|stage| stage.to_string()).collect()
}

/// Check an employee code before submitting a worker form
#[wasm_bindgen(js_name = isValidEmployeeCode)]
pub fn is_valid_employee_code(code: &str) -> bool {
    validate_employee_code(code).is_ok()
}

/// Check a phone number before submitting an order form
#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone(phone: &str) -> bool {
    validate_phone(phone).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_days() {
        assert_eq!(production_days_for(1000, 400), 3);
        assert_eq!(production_days_for(800, 400), 2);
        assert_eq!(production_days_for(10, 0), 0);
    }

    #[test]
    fn test_schedule_window_json() {
        let json = schedule_window_json("2024-07-15", 1000, 400);
        assert_eq!(json, r#"{"start":"2024-07-11","end":"2024-07-14"}"#);
        assert_eq!(schedule_window_json("not a date", 1000, 400), "null");
    }

    #[test]
    fn test_stage_keys() {
        assert_eq!(stage_from_key("die_cut"), Some(StageKind::DieCut));
        assert_eq!(stage_from_key("ralo"), Some(StageKind::Ralo));
        assert_eq!(stage_from_key("fold"), None);
        assert_eq!(stage_names().len(), 8);
    }

    #[test]
    fn test_form_checks() {
        assert!(is_valid_employee_code("OP-101"));
        assert!(!is_valid_employee_code("op 101"));
        assert!(is_valid_phone("+84 28 3822 1234"));
    }

    #[test]
    fn test_handle_order_flow() {
        let mut handle = ConsoleHandle::new().unwrap();
        let product_id = handle.console.products()[0].id;
        let input = serde_json::json!({
            "product_id": product_id,
            "quantity": 500,
            "delivery_date": "2031-03-20",
            "customer_name": "Lotus Florist",
        });

        let order: Order = serde_json::from_str(&handle.create_order(&input.to_string()).unwrap()).unwrap();
        let report: FulfillmentReport =
            serde_json::from_str(&handle.check_fulfillment(&order.id.to_string()).unwrap()).unwrap();
        assert!(report.can_fulfill);

        let schedule: ProductionSchedule =
            serde_json::from_str(&handle.schedule_production(&order.id.to_string(), None).unwrap()).unwrap();
        assert_eq!(schedule.stages.len(), 8);
        assert_eq!(handle.console.schedules().len(), 1);

        let printer_id = handle.console.printers()[0].id.to_string();
        let printer: Printer =
            serde_json::from_str(&handle.assign_machine_to_order(&printer_id, &order.id.to_string()).unwrap())
                .unwrap();
        assert_eq!(printer.current_job, Some(order.id));
    }
}
