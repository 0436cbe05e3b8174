//! Printers, workers and machine assignments
//!
//! A printer's `assigned_orders` is its work queue and `current_job` is always
//! the head of that queue. Workers keep the same queue without a current-job
//! field; `current_machine` records the printer they were put on.

use chrono::Utc;
use uuid::Uuid;

use super::ProductionConsole;
use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{
    AssignmentStatus, AssignmentType, MachineAssignment, NewPrinter, NewWorker, Printer,
    PrinterStatus, PrinterUpdate, Worker, WorkerStatus, WorkerUpdate,
};
use crate::validation::{check, validate_employee_code, validate_rating};

impl ProductionConsole {
    // ------------------------------------------------------------------------
    // Printer registry
    // ------------------------------------------------------------------------

    pub fn add_printer(&mut self, input: NewPrinter) -> WorkflowResult<Printer> {
        if input.name.trim().is_empty() {
            return Err(WorkflowError::Validation("Printer name is required".to_string()));
        }
        let printer = Printer::from_input(input);
        tracing::info!(printer_id = %printer.id, name = %printer.name, "printer registered");
        self.printers.push(printer.clone());
        Ok(printer)
    }

    /// Apply a partial update; `available` and `busy` must agree with the queue
    pub fn update_printer(&mut self, printer_id: Uuid, update: PrinterUpdate) -> WorkflowResult<Printer> {
        let printer = self.printer_mut(printer_id)?;
        if let Some(status) = update.status {
            let queued = !printer.assigned_orders.is_empty();
            let consistent = match status {
                PrinterStatus::Available => !queued,
                PrinterStatus::Busy => queued,
                PrinterStatus::Maintenance | PrinterStatus::Offline => true,
            };
            if !consistent {
                return Err(WorkflowError::transition(
                    EntityKind::Printer,
                    printer.status,
                    status,
                ));
            }
        }

        if let Some(name) = update.name {
            printer.name = name;
        }
        if let Some(status) = update.status {
            printer.status = status;
        }
        if let Some(capabilities) = update.capabilities {
            printer.capabilities = capabilities;
        }
        tracing::info!(%printer_id, status = %printer.status, "printer updated");
        Ok(printer.clone())
    }

    /// Queue an order on a printer, making it busy if it was idle
    pub fn assign_machine_to_order(&mut self, machine_id: Uuid, order_id: Uuid) -> WorkflowResult<Printer> {
        self.order(order_id)?;
        let printer = self.printer_mut(machine_id)?;
        if !printer.accepts_work() {
            return Err(WorkflowError::ResourceUnavailable(format!(
                "Printer {} ({})",
                printer.name, printer.status
            )));
        }
        if printer.is_queued(order_id) {
            tracing::debug!(%machine_id, %order_id, "order already queued on printer");
            return Ok(printer.clone());
        }

        printer.assigned_orders.push(order_id);
        printer.status = PrinterStatus::Busy;
        printer.sync_current_job();
        tracing::info!(
            %machine_id,
            %order_id,
            queue_len = printer.assigned_orders.len(),
            "order assigned to printer"
        );
        Ok(printer.clone())
    }

    /// Drop an order from a printer's queue; an empty queue frees the printer
    pub fn remove_machine_from_order(&mut self, machine_id: Uuid, order_id: Uuid) -> WorkflowResult<Printer> {
        let printer = self.printer_mut(machine_id)?;
        if !printer.is_queued(order_id) {
            return Err(WorkflowError::Precondition(format!(
                "order {} is not assigned to printer {}",
                order_id, machine_id
            )));
        }

        printer.assigned_orders.retain(|id| *id != order_id);
        printer.sync_current_job();
        if printer.assigned_orders.is_empty() && printer.status == PrinterStatus::Busy {
            printer.status = PrinterStatus::Available;
        }
        tracing::info!(%machine_id, %order_id, "order removed from printer");
        Ok(printer.clone())
    }

    // ------------------------------------------------------------------------
    // Worker registry
    // ------------------------------------------------------------------------

    pub fn add_worker(&mut self, input: NewWorker) -> WorkflowResult<Worker> {
        check(validate_employee_code(&input.employee_code))?;
        if let Some(rating) = input.rating {
            check(validate_rating(rating))?;
        }
        if self
            .workers
            .iter()
            .any(|worker| worker.employee_code == input.employee_code)
        {
            return Err(WorkflowError::Validation(format!(
                "Employee code {} is already in use",
                input.employee_code
            )));
        }

        let worker = Worker::from_input(input);
        tracing::info!(worker_id = %worker.id, code = %worker.employee_code, "worker registered");
        self.workers.push(worker.clone());
        Ok(worker)
    }

    /// Apply a partial update; `available` and `busy` must agree with the queue
    pub fn update_worker(&mut self, worker_id: Uuid, update: WorkerUpdate) -> WorkflowResult<Worker> {
        if let Some(rating) = update.rating {
            check(validate_rating(rating))?;
        }
        let worker = self.worker_mut(worker_id)?;
        if let Some(status) = update.status {
            let queued = !worker.assigned_orders.is_empty();
            let consistent = match status {
                WorkerStatus::Available => !queued,
                WorkerStatus::Busy => queued,
                WorkerStatus::Break | WorkerStatus::Off => true,
            };
            if !consistent {
                return Err(WorkflowError::transition(
                    EntityKind::Worker,
                    worker.status,
                    status,
                ));
            }
        }

        if let Some(name) = update.name {
            worker.name = name;
        }
        if let Some(position) = update.position {
            worker.position = position;
        }
        if let Some(department) = update.department {
            worker.department = department;
        }
        if let Some(skills) = update.skills {
            worker.skills = skills;
        }
        if let Some(status) = update.status {
            worker.status = status;
        }
        if let Some(shift) = update.shift {
            worker.shift = shift;
        }
        if let Some(rating) = update.rating {
            worker.rating = rating;
        }
        tracing::info!(%worker_id, status = %worker.status, "worker updated");
        Ok(worker.clone())
    }

    /// Queue an order on a worker, making them busy if they were idle
    pub fn assign_worker_to_order(&mut self, worker_id: Uuid, order_id: Uuid) -> WorkflowResult<Worker> {
        self.order(order_id)?;
        let worker = self.worker_mut(worker_id)?;
        if !worker.accepts_work() {
            return Err(WorkflowError::ResourceUnavailable(format!(
                "Worker {} ({})",
                worker.name, worker.status
            )));
        }
        if worker.is_queued(order_id) {
            return Ok(worker.clone());
        }

        worker.assigned_orders.push(order_id);
        worker.status = WorkerStatus::Busy;
        tracing::info!(%worker_id, %order_id, "order assigned to worker");
        Ok(worker.clone())
    }

    /// Drop an order from a worker's queue; an empty queue frees the worker
    pub fn remove_worker_from_order(&mut self, worker_id: Uuid, order_id: Uuid) -> WorkflowResult<Worker> {
        let worker = self.worker(worker_id)?;
        if !worker.is_queued(order_id) {
            return Err(WorkflowError::Precondition(format!(
                "order {} is not assigned to worker {}",
                order_id, worker_id
            )));
        }

        let remaining: Vec<Uuid> = worker
            .assigned_orders
            .iter()
            .copied()
            .filter(|id| *id != order_id)
            .collect();
        // Stay on the current machine while it still runs one of the worker's
        // orders, otherwise follow the next remaining order
        let current_machine = worker.current_machine.and_then(|machine_id| {
            let still_running = self
                .printers
                .iter()
                .any(|printer| printer.id == machine_id && remaining.iter().any(|id| printer.is_queued(*id)));
            if still_running {
                Some(machine_id)
            } else {
                remaining
                    .iter()
                    .find_map(|id| self.machine_for_worker_order(worker_id, *id))
            }
        });

        let worker = self.worker_mut(worker_id)?;
        worker.assigned_orders = remaining;
        worker.current_machine = current_machine;
        if worker.assigned_orders.is_empty() && worker.status == WorkerStatus::Busy {
            worker.status = WorkerStatus::Available;
        }
        tracing::info!(%worker_id, %order_id, "order removed from worker");
        Ok(worker.clone())
    }

    // ------------------------------------------------------------------------
    // Machine assignments
    // ------------------------------------------------------------------------

    /// Record which machine, and optionally which worker, produces an order
    pub fn create_machine_assignment(
        &mut self,
        order_id: Uuid,
        machine_id: Uuid,
        worker_id: Option<Uuid>,
    ) -> WorkflowResult<MachineAssignment> {
        self.order(order_id)?;
        self.printer(machine_id)?;
        if let Some(worker_id) = worker_id {
            self.worker(worker_id)?;
        }
        if self.assignment_for_order(order_id).is_some() {
            return Err(WorkflowError::Precondition(format!(
                "order {} already has an open machine assignment",
                order_id
            )));
        }

        let now = Utc::now();
        let assignment = MachineAssignment {
            id: Uuid::new_v4(),
            order_id,
            machine_id,
            worker_id,
            assignment_type: AssignmentType::for_worker(worker_id),
            status: AssignmentStatus::Assigned,
            assigned_at: now,
            updated_at: now,
        };
        tracing::info!(
            assignment_id = %assignment.id,
            %order_id,
            %machine_id,
            worker_id = ?worker_id,
            "machine assignment created"
        );
        self.assignments.push(assignment.clone());
        Ok(assignment)
    }

    /// Move an assignment forward through its lifecycle
    pub fn update_assignment_status(
        &mut self,
        assignment_id: Uuid,
        status: AssignmentStatus,
    ) -> WorkflowResult<MachineAssignment> {
        let assignment = self
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == assignment_id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Assignment, assignment_id))?;
        if status <= assignment.status {
            return Err(WorkflowError::transition(
                EntityKind::Assignment,
                assignment.status,
                status,
            ));
        }

        assignment.status = status;
        assignment.updated_at = Utc::now();
        let assignment = assignment.clone();

        if status == AssignmentStatus::Completed {
            self.release_assignment(&assignment)?;
        }
        tracing::info!(%assignment_id, status = ?status, "assignment status updated");
        Ok(assignment)
    }

    /// Take a closed assignment's order off its printer and worker
    fn release_assignment(&mut self, assignment: &MachineAssignment) -> WorkflowResult<()> {
        let order_id = assignment.order_id;
        if self.printer(assignment.machine_id)?.is_queued(order_id) {
            self.remove_machine_from_order(assignment.machine_id, order_id)?;
        }
        if let Some(worker_id) = assignment.worker_id {
            if self.worker(worker_id)?.is_queued(order_id) {
                self.remove_worker_from_order(worker_id, order_id)?;
            }
        }
        Ok(())
    }

    /// Printer a worker runs a given order on
    fn machine_for_worker_order(&self, worker_id: Uuid, order_id: Uuid) -> Option<Uuid> {
        self.assignment_for_order(order_id)
            .filter(|assignment| assignment.worker_id == Some(worker_id))
            .map(|assignment| assignment.machine_id)
            .or_else(|| {
                self.printers
                    .iter()
                    .find(|printer| printer.is_queued(order_id))
                    .map(|printer| printer.id)
            })
    }

    /// Put a machine, and optionally a worker, on an order in one step.
    ///
    /// Both resources are checked before either is touched.
    pub fn assign_machine_with_worker(
        &mut self,
        order_id: Uuid,
        machine_id: Uuid,
        worker_id: Option<Uuid>,
    ) -> WorkflowResult<MachineAssignment> {
        self.order(order_id)?;
        let printer = self.printer(machine_id)?;
        if !printer.accepts_work() {
            return Err(WorkflowError::ResourceUnavailable(format!(
                "Printer {} ({})",
                printer.name, printer.status
            )));
        }
        if let Some(worker_id) = worker_id {
            let worker = self.worker(worker_id)?;
            if !worker.accepts_work() {
                return Err(WorkflowError::ResourceUnavailable(format!(
                    "Worker {} ({})",
                    worker.name, worker.status
                )));
            }
        }
        if self.assignment_for_order(order_id).is_some() {
            return Err(WorkflowError::Precondition(format!(
                "order {} already has an open machine assignment",
                order_id
            )));
        }

        // A scheduled order leaves the printer its schedule pointed at
        let previous_machine = self
            .schedule_for_order(order_id)
            .and_then(|schedule| schedule.machine_id)
            .filter(|previous| *previous != machine_id);
        if let Some(previous) = previous_machine {
            if self.printer(previous)?.is_queued(order_id) {
                self.remove_machine_from_order(previous, order_id)?;
            }
        }

        self.assign_machine_to_order(machine_id, order_id)?;
        if let Some(worker_id) = worker_id {
            self.assign_worker_to_order(worker_id, order_id)?;
            self.worker_mut(worker_id)?.current_machine = Some(machine_id);
        }
        let assignment = self.create_machine_assignment(order_id, machine_id, worker_id)?;

        if let Some(schedule) = self
            .schedules
            .iter_mut()
            .find(|schedule| schedule.order_id == order_id)
        {
            schedule.machine_id = Some(machine_id);
            schedule.worker_id = worker_id;
        }
        Ok(assignment)
    }

    /// Hand an order's assignment over to a different worker.
    ///
    /// The machine binding is kept; the previous worker is released from the
    /// order and the new one is put on the assignment's machine.
    pub fn reassign_worker(&mut self, order_id: Uuid, new_worker_id: Uuid) -> WorkflowResult<MachineAssignment> {
        let assignment = self.assignment_for_order(order_id).ok_or_else(|| {
            WorkflowError::Precondition(format!("order {} has no machine assignment", order_id))
        })?;
        let (assignment_id, machine_id, old_worker_id) =
            (assignment.id, assignment.machine_id, assignment.worker_id);

        if old_worker_id == Some(new_worker_id) {
            return Ok(assignment.clone());
        }
        let new_worker = self.worker(new_worker_id)?;
        if !new_worker.accepts_work() {
            return Err(WorkflowError::ResourceUnavailable(format!(
                "Worker {} ({})",
                new_worker.name, new_worker.status
            )));
        }

        if let Some(old_worker_id) = old_worker_id {
            if self.worker(old_worker_id)?.is_queued(order_id) {
                self.remove_worker_from_order(old_worker_id, order_id)?;
            }
        }
        self.assign_worker_to_order(new_worker_id, order_id)?;
        self.worker_mut(new_worker_id)?.current_machine = Some(machine_id);

        if let Some(schedule) = self
            .schedules
            .iter_mut()
            .find(|schedule| schedule.order_id == order_id)
        {
            schedule.worker_id = Some(new_worker_id);
        }

        let assignment = self
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == assignment_id)
            .ok_or_else(|| WorkflowError::not_found(EntityKind::Assignment, assignment_id))?;
        assignment.worker_id = Some(new_worker_id);
        assignment.assignment_type = AssignmentType::MachineWithWorker;
        assignment.updated_at = Utc::now();

        tracing::info!(
            %order_id,
            old_worker = ?old_worker_id,
            new_worker = %new_worker_id,
            "worker reassigned"
        );
        Ok(assignment.clone())
    }

    /// Free every printer and worker still holding a finished order
    pub(crate) fn release_order_resources(&mut self, order_id: Uuid) {
        let printers: Vec<Uuid> = self
            .printers
            .iter()
            .filter(|printer| printer.is_queued(order_id))
            .map(|printer| printer.id)
            .collect();
        for machine_id in printers {
            if let Err(err) = self.remove_machine_from_order(machine_id, order_id) {
                tracing::warn!(%machine_id, %order_id, error = %err, "could not release printer");
            }
        }

        let workers: Vec<Uuid> = self
            .workers
            .iter()
            .filter(|worker| worker.is_queued(order_id))
            .map(|worker| worker.id)
            .collect();
        for worker_id in workers {
            if let Err(err) = self.remove_worker_from_order(worker_id, order_id) {
                tracing::warn!(%worker_id, %order_id, error = %err, "could not release worker");
            }
        }

        let now = Utc::now();
        for assignment in self
            .assignments
            .iter_mut()
            .filter(|assignment| assignment.order_id == order_id && assignment.status.is_active())
        {
            assignment.status = AssignmentStatus::Completed;
            assignment.updated_at = now;
        }
    }
}
