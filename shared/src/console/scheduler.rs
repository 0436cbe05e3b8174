//! Production scheduling and the stage pipeline

use chrono::Utc;
use uuid::Uuid;

use super::ProductionConsole;
use crate::error::{EntityKind, WorkflowError, WorkflowResult};
use crate::models::{
    schedule_window, AssignmentStatus, OrderStatus, ProductionSchedule, ProductionStage,
    ScheduleStatus, StageKind, StageStatus,
};

impl ProductionConsole {
    /// Plan production for a fulfillable order and reserve its materials.
    ///
    /// Availability is re-verified for every BOM line before anything is
    /// reserved, so a stale fulfillment check cannot over-commit stock.
    pub fn schedule_production(
        &mut self,
        order_id: Uuid,
        machine_id: Option<Uuid>,
    ) -> WorkflowResult<ProductionSchedule> {
        let order = self.order(order_id)?;
        if order.can_fulfill != Some(true) {
            return Err(WorkflowError::Precondition(format!(
                "order {} has not passed a fulfillment check",
                order_id
            )));
        }
        if order.status != OrderStatus::Pending {
            return Err(WorkflowError::transition(
                EntityKind::Order,
                order.status,
                OrderStatus::Scheduled,
            ));
        }
        let (product_id, quantity, delivery_date) =
            (order.product_id, order.quantity, order.delivery_date);

        let product = self.catalog.product(product_id)?;
        let window = schedule_window(delivery_date, quantity, product.production_rate)
            .ok_or_else(|| {
                WorkflowError::Validation(format!(
                    "cannot compute a production window for order {}",
                    order_id
                ))
            })?;

        // An order bound before scheduling keeps its machine and worker
        let bound = self
            .assignment_for_order(order_id)
            .map(|assignment| (assignment.machine_id, assignment.worker_id));
        match (bound, machine_id) {
            (Some((bound_machine, _)), Some(requested)) if bound_machine != requested => {
                return Err(WorkflowError::Precondition(format!(
                    "order {} is already assigned to printer {}",
                    order_id, bound_machine
                )));
            }
            (None, Some(requested)) => {
                let printer = self.printer(requested)?;
                if !printer.accepts_work() {
                    return Err(WorkflowError::ResourceUnavailable(format!(
                        "Printer {} ({})",
                        printer.name, printer.status
                    )));
                }
            }
            _ => {}
        }
        let (machine_id, worker_id) = match bound {
            Some((bound_machine, bound_worker)) => (Some(bound_machine), bound_worker),
            None => (machine_id, None),
        };

        let requirements = self.catalog.requirements(product_id, quantity);
        self.ledger.ensure_reservable(&requirements)?;
        for req in &requirements {
            self.ledger.reserve(req.material_id, req.quantity)?;
        }

        let schedule = ProductionSchedule {
            id: Uuid::new_v4(),
            order_id,
            start_date: window.start,
            end_date: window.end,
            status: ScheduleStatus::Scheduled,
            current_stage: StageKind::first(),
            stages: ProductionStage::pipeline(),
            machine_id,
            worker_id,
            created_at: Utc::now(),
        };
        self.schedules.push(schedule.clone());

        let order = self.order_mut(order_id)?;
        order.status = OrderStatus::Scheduled;
        order.schedule_id = Some(schedule.id);
        order.updated_at = Utc::now();

        if bound.is_none() {
            if let Some(machine_id) = machine_id {
                self.assign_machine_with_worker(order_id, machine_id, None)?;
            }
        }

        tracing::info!(
            schedule_id = %schedule.id,
            %order_id,
            start = %schedule.start_date,
            end = %schedule.end_date,
            days = window.days(),
            materials = requirements.len(),
            "production scheduled"
        );
        Ok(schedule)
    }

    /// Mark a scheduled production run as started
    pub fn start_production(&mut self, schedule_id: Uuid) -> WorkflowResult<ProductionSchedule> {
        let schedule = self.schedule_mut(schedule_id)?;
        if schedule.status != ScheduleStatus::Scheduled {
            return Err(WorkflowError::transition(
                EntityKind::Schedule,
                schedule.status,
                ScheduleStatus::InProgress,
            ));
        }
        schedule.status = ScheduleStatus::InProgress;
        let schedule = schedule.clone();

        let order = self.order_mut(schedule.order_id)?;
        order.status = OrderStatus::InProduction;
        order.updated_at = Utc::now();

        if let Some(assignment) = self
            .assignments
            .iter_mut()
            .rev()
            .find(|a| a.order_id == schedule.order_id && a.status == AssignmentStatus::Assigned)
        {
            assignment.status = AssignmentStatus::InProgress;
            assignment.updated_at = Utc::now();
        }

        tracing::info!(%schedule_id, order_id = %schedule.order_id, "production started");
        Ok(schedule)
    }

    /// Move the pipeline to `target`.
    ///
    /// Stages run strictly in order: while the current stage is still pending
    /// the only legal target is that stage itself; once it is in progress the
    /// only legal target is the next stage, and the current one is completed.
    /// The last stage is closed by `complete_production`.
    pub fn update_production_stage(
        &mut self,
        schedule_id: Uuid,
        target: StageKind,
    ) -> WorkflowResult<ProductionSchedule> {
        let today = self.today();
        let schedule = self.schedule_mut(schedule_id)?;
        if schedule.status == ScheduleStatus::Completed {
            return Err(WorkflowError::transition(
                EntityKind::Schedule,
                schedule.status,
                target,
            ));
        }

        let current = schedule.current_stage;
        let current_status = schedule
            .stage(current)
            .map(|stage| stage.status)
            .unwrap_or(StageStatus::Pending);
        let legal = match current_status {
            StageStatus::Pending => Some(current),
            StageStatus::InProgress => current.next(),
            StageStatus::Completed => None,
        };
        if legal != Some(target) {
            tracing::warn!(%schedule_id, %current, %target, "out-of-sequence stage update rejected");
            return Err(WorkflowError::transition(EntityKind::Schedule, current, target));
        }

        if target != current {
            if let Some(previous) = schedule.stage_mut(current) {
                previous.status = StageStatus::Completed;
                previous.end_date = Some(today);
            }
        }
        if let Some(next) = schedule.stage_mut(target) {
            next.status = StageStatus::InProgress;
            next.start_date = Some(today);
        }
        schedule.current_stage = target;

        tracing::info!(%schedule_id, stage = %target, "production stage advanced");
        Ok(schedule.clone())
    }

    /// Finish the run: close every stage and consume the reserved materials
    pub fn complete_production(&mut self, schedule_id: Uuid) -> WorkflowResult<ProductionSchedule> {
        let today = self.today();
        let schedule = self.schedule(schedule_id)?;
        if schedule.status == ScheduleStatus::Completed {
            return Err(WorkflowError::transition(
                EntityKind::Schedule,
                schedule.status,
                ScheduleStatus::Completed,
            ));
        }
        let order_id = schedule.order_id;
        let order = self.order(order_id)?;
        let requirements = self.catalog.requirements(order.product_id, order.quantity);

        self.ledger.ensure_consumable(&requirements)?;
        for req in &requirements {
            self.ledger.consume(req.material_id, req.quantity)?;
        }

        let schedule = self.schedule_mut(schedule_id)?;
        for stage in schedule.stages.iter_mut() {
            stage.status = StageStatus::Completed;
            if stage.end_date.is_none() {
                stage.end_date = Some(today);
            }
        }
        schedule.status = ScheduleStatus::Completed;
        let schedule = schedule.clone();

        let order = self.order_mut(order_id)?;
        order.status = OrderStatus::Completed;
        order.updated_at = Utc::now();

        self.release_order_resources(order_id);

        tracing::info!(%schedule_id, %order_id, "production completed");
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Catalog, InventoryLedger};
    use crate::models::{BomEntry, InventoryRecord, Material, NewOrder, Product, UnitOfMeasure};
    use crate::types::FixedClock;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        console: ProductionConsole,
        order_id: Uuid,
        board: Uuid,
        glue: Uuid,
    }

    /// A fulfillable order for 1000 units at 400/day, delivery 2024-07-15
    fn fixture(order_quantity: u32) -> Fixture {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Corrugated Tray".to_string(),
            production_rate: 400,
        };
        let board = Material {
            id: Uuid::new_v4(),
            name: "B-flute Board".to_string(),
            unit: UnitOfMeasure::Sheet,
        };
        let glue = Material {
            id: Uuid::new_v4(),
            name: "Starch Glue".to_string(),
            unit: UnitOfMeasure::Kilogram,
        };
        let catalog = Catalog::new(
            vec![product.clone()],
            vec![board.clone(), glue.clone()],
            vec![
                BomEntry {
                    product_id: product.id,
                    material_id: board.id,
                    quantity_per_unit: Decimal::ONE,
                },
                BomEntry {
                    product_id: product.id,
                    material_id: glue.id,
                    quantity_per_unit: Decimal::new(2, 2),
                },
            ],
        )
        .unwrap();
        let ledger = InventoryLedger::new(vec![
            InventoryRecord::new(board.id, Decimal::from(1500)),
            InventoryRecord::new(glue.id, Decimal::from(40)),
        ]);
        let mut console = ProductionConsole::new(catalog, ledger)
            .with_clock(Arc::new(FixedClock(date(2024, 7, 8))));
        let order = console
            .create_order(NewOrder {
                product_id: product.id,
                quantity: order_quantity,
                delivery_date: date(2024, 7, 15),
                customer_name: "Greenfield Farms".to_string(),
                customer_phone: None,
                customer_email: None,
                customer_company: None,
                notes: None,
            })
            .unwrap();
        console.check_fulfillment(order.id).unwrap();
        Fixture {
            console,
            order_id: order.id,
            board: board.id,
            glue: glue.id,
        }
    }

    #[test]
    fn test_schedule_reserves_bom_and_sets_window() {
        let mut f = fixture(1000);
        let schedule = f.console.schedule_production(f.order_id, None).unwrap();

        // ceil(1000 / 400) = 3 days, plus one buffer day
        assert_eq!(schedule.start_date, date(2024, 7, 11));
        assert_eq!(schedule.end_date, date(2024, 7, 14));
        assert_eq!(schedule.current_stage, StageKind::Ralo);
        assert_eq!(schedule.status, ScheduleStatus::Scheduled);
        assert!(schedule.stages.iter().all(|s| s.status == StageStatus::Pending));

        assert_eq!(f.console.inventory_record(f.board).unwrap().reserved, Decimal::from(1000));
        assert_eq!(f.console.inventory_record(f.glue).unwrap().reserved, Decimal::from(20));

        let order = f.console.order(f.order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Scheduled);
        assert_eq!(order.schedule_id, Some(schedule.id));
    }

    #[test]
    fn test_schedule_requires_fulfillable_order() {
        let mut f = fixture(2000);
        assert!(matches!(
            f.console.schedule_production(f.order_id, None),
            Err(WorkflowError::Precondition(_))
        ));
        assert!(f.console.schedules().is_empty());
        assert_eq!(f.console.inventory_record(f.board).unwrap().reserved, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_rechecks_stale_availability() {
        let mut f = fixture(1000);
        f.console.adjust_inventory(f.glue, Decimal::from(10)).unwrap();

        let err = f.console.schedule_production(f.order_id, None).unwrap_err();
        assert!(matches!(err, WorkflowError::InsufficientInventory { .. }));
        // Nothing reserved for the material that was still available
        assert_eq!(f.console.inventory_record(f.board).unwrap().reserved, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_twice_is_rejected() {
        let mut f = fixture(1000);
        f.console.schedule_production(f.order_id, None).unwrap();
        assert!(f.console.schedule_production(f.order_id, None).is_err());
        assert_eq!(f.console.schedules().len(), 1);
        assert_eq!(f.console.inventory_record(f.board).unwrap().reserved, Decimal::from(1000));
    }

    #[test]
    fn test_start_production_propagates_to_order() {
        let mut f = fixture(1000);
        let schedule = f.console.schedule_production(f.order_id, None).unwrap();
        let started = f.console.start_production(schedule.id).unwrap();
        assert_eq!(started.status, ScheduleStatus::InProgress);
        assert!(started.stages.iter().all(|s| s.status == StageStatus::Pending));
        assert_eq!(f.console.order(f.order_id).unwrap().status, OrderStatus::InProduction);
        assert!(f.console.start_production(schedule.id).is_err());
    }

    #[test]
    fn test_stage_advancement_is_sequential() {
        let mut f = fixture(1000);
        let schedule = f.console.schedule_production(f.order_id, None).unwrap();

        // Cannot skip the first stage
        assert!(f
            .console
            .update_production_stage(schedule.id, StageKind::Cut)
            .is_err());

        let s = f
            .console
            .update_production_stage(schedule.id, StageKind::Ralo)
            .unwrap();
        assert_eq!(s.active_stages().count(), 1);
        assert_eq!(s.stage(StageKind::Ralo).unwrap().start_date, Some(date(2024, 7, 8)));

        f.console.set_clock(Arc::new(FixedClock(date(2024, 7, 9))));
        let s = f
            .console
            .update_production_stage(schedule.id, StageKind::Cut)
            .unwrap();
        let ralo = s.stage(StageKind::Ralo).unwrap();
        assert_eq!(ralo.status, StageStatus::Completed);
        assert!(ralo.start_date.unwrap() <= ralo.end_date.unwrap());
        assert_eq!(s.current_stage, StageKind::Cut);
        assert_eq!(
            s.active_stages().map(|st| st.stage).collect::<Vec<_>>(),
            vec![StageKind::Cut]
        );

        // No going back, no jumping ahead
        assert!(f
            .console
            .update_production_stage(schedule.id, StageKind::Ralo)
            .is_err());
        assert!(f
            .console
            .update_production_stage(schedule.id, StageKind::Glue)
            .is_err());
    }

    #[test]
    fn test_last_stage_has_no_successor() {
        let mut f = fixture(1000);
        let schedule = f.console.schedule_production(f.order_id, None).unwrap();
        for stage in StageKind::PIPELINE {
            f.console.update_production_stage(schedule.id, stage).unwrap();
        }
        assert!(f
            .console
            .update_production_stage(schedule.id, StageKind::Glue)
            .is_err());
        let s = f.console.schedule(schedule.id).unwrap();
        assert_eq!(s.current_stage, StageKind::Glue);
        assert_eq!(s.active_stages().count(), 1);
    }

    #[test]
    fn test_complete_consumes_reservation() {
        let mut f = fixture(1000);
        let schedule = f.console.schedule_production(f.order_id, None).unwrap();
        f.console.start_production(schedule.id).unwrap();
        f.console
            .update_production_stage(schedule.id, StageKind::Ralo)
            .unwrap();

        let done = f.console.complete_production(schedule.id).unwrap();
        assert_eq!(done.status, ScheduleStatus::Completed);
        assert!(done
            .stages
            .iter()
            .all(|s| s.status == StageStatus::Completed && s.end_date.is_some()));

        let board = f.console.inventory_record(f.board).unwrap();
        assert_eq!(board.on_hand, Decimal::from(500));
        assert_eq!(board.reserved, Decimal::ZERO);
        let glue = f.console.inventory_record(f.glue).unwrap();
        assert_eq!(glue.on_hand, Decimal::from(20));
        assert_eq!(f.console.order(f.order_id).unwrap().status, OrderStatus::Completed);
    }

    #[test]
    fn test_complete_twice_does_not_double_consume() {
        let mut f = fixture(1000);
        let schedule = f.console.schedule_production(f.order_id, None).unwrap();
        f.console.complete_production(schedule.id).unwrap();
        assert!(f.console.complete_production(schedule.id).is_err());
        assert_eq!(f.console.inventory_record(f.board).unwrap().on_hand, Decimal::from(500));
        assert!(f
            .console
            .update_production_stage(schedule.id, StageKind::Ralo)
            .is_err());
    }

    #[test]
    fn test_stages_for_order() {
        let mut f = fixture(1000);
        assert!(f.console.stages_for_order(f.order_id).unwrap().is_empty());
        f.console.schedule_production(f.order_id, None).unwrap();
        assert_eq!(f.console.stages_for_order(f.order_id).unwrap().len(), 8);
    }
}
