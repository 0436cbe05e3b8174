//! Printer, worker and machine assignment models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A printing machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Printer {
    pub id: Uuid,
    pub name: String,
    pub printer_type: PrinterType,
    pub status: PrinterStatus,
    pub capabilities: PrinterCapabilities,
    /// Head of `assigned_orders`
    pub current_job: Option<Uuid>,
    /// Work queue, oldest first
    pub assigned_orders: Vec<Uuid>,
}

impl Printer {
    pub fn from_input(input: NewPrinter) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            printer_type: input.printer_type,
            status: PrinterStatus::Available,
            capabilities: input.capabilities,
            current_job: None,
            assigned_orders: Vec::new(),
        }
    }

    pub fn accepts_work(&self) -> bool {
        matches!(self.status, PrinterStatus::Available | PrinterStatus::Busy)
    }

    pub fn is_queued(&self, order_id: Uuid) -> bool {
        self.assigned_orders.contains(&order_id)
    }

    /// Keep `current_job` pointing at the head of the queue
    pub(crate) fn sync_current_job(&mut self) {
        self.current_job = self.assigned_orders.first().copied();
    }
}

/// Printing technology
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrinterType {
    Offset,
    Digital,
    Flexo,
    Screen,
}

/// Printer availability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrinterStatus {
    Available,
    Busy,
    Maintenance,
    Offline,
}

impl std::fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrinterStatus::Available => write!(f, "available"),
            PrinterStatus::Busy => write!(f, "busy"),
            PrinterStatus::Maintenance => write!(f, "maintenance"),
            PrinterStatus::Offline => write!(f, "offline"),
        }
    }
}

/// What a printer can handle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrinterCapabilities {
    /// e.g. "70x100 cm"
    pub max_print_size: String,
    pub color_support: bool,
    /// Sheets per day
    pub daily_capacity: u32,
}

/// Input for registering a printer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrinter {
    pub name: String,
    pub printer_type: PrinterType,
    pub capabilities: PrinterCapabilities,
}

/// Partial printer update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrinterUpdate {
    pub name: Option<String>,
    pub status: Option<PrinterStatus>,
    pub capabilities: Option<PrinterCapabilities>,
}

/// A shop-floor employee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worker {
    pub id: Uuid,
    pub employee_code: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub skills: Vec<String>,
    pub status: WorkerStatus,
    pub current_machine: Option<Uuid>,
    pub assigned_orders: Vec<Uuid>,
    pub shift: Shift,
    pub rating: Decimal,
}

impl Worker {
    pub fn from_input(input: NewWorker) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_code: input.employee_code,
            name: input.name,
            position: input.position,
            department: input.department,
            skills: input.skills,
            status: WorkerStatus::Available,
            current_machine: None,
            assigned_orders: Vec::new(),
            shift: input.shift,
            rating: input.rating.unwrap_or(Decimal::from(3)),
        }
    }

    pub fn accepts_work(&self) -> bool {
        matches!(self.status, WorkerStatus::Available | WorkerStatus::Busy)
    }

    pub fn is_queued(&self, order_id: Uuid) -> bool {
        self.assigned_orders.contains(&order_id)
    }
}

/// Worker availability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Available,
    Busy,
    Break,
    Off,
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerStatus::Available => write!(f, "available"),
            WorkerStatus::Busy => write!(f, "busy"),
            WorkerStatus::Break => write!(f, "break"),
            WorkerStatus::Off => write!(f, "off"),
        }
    }
}

/// Work shift
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

/// Input for registering a worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorker {
    pub employee_code: String,
    pub name: String,
    pub position: String,
    pub department: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub shift: Shift,
    pub rating: Option<Decimal>,
}

/// Partial worker update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub skills: Option<Vec<String>>,
    pub status: Option<WorkerStatus>,
    pub shift: Option<Shift>,
    pub rating: Option<Decimal>,
}

/// Binding of a machine, and optionally a worker, to an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineAssignment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub machine_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub assignment_type: AssignmentType,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived from whether a worker is attached
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    MachineOnly,
    MachineWithWorker,
}

impl AssignmentType {
    pub fn for_worker(worker_id: Option<Uuid>) -> Self {
        match worker_id {
            Some(_) => AssignmentType::MachineWithWorker,
            None => AssignmentType::MachineOnly,
        }
    }
}

/// Assignment lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    pub fn is_active(&self) -> bool {
        *self != AssignmentStatus::Completed
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "pending"),
            AssignmentStatus::Assigned => write!(f, "assigned"),
            AssignmentStatus::InProgress => write!(f, "in_progress"),
            AssignmentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_type_from_worker() {
        assert_eq!(AssignmentType::for_worker(None), AssignmentType::MachineOnly);
        assert_eq!(
            AssignmentType::for_worker(Some(Uuid::new_v4())),
            AssignmentType::MachineWithWorker
        );
    }

    #[test]
    fn test_current_job_follows_queue_head() {
        let mut printer = Printer::from_input(NewPrinter {
            name: "Heidelberg SM 74".to_string(),
            printer_type: PrinterType::Offset,
            capabilities: PrinterCapabilities {
                max_print_size: "52x74 cm".to_string(),
                color_support: true,
                daily_capacity: 15000,
            },
        });
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        printer.assigned_orders = vec![first, second];
        printer.sync_current_job();
        assert_eq!(printer.current_job, Some(first));

        printer.assigned_orders.remove(0);
        printer.sync_current_job();
        assert_eq!(printer.current_job, Some(second));

        printer.assigned_orders.clear();
        printer.sync_current_job();
        assert_eq!(printer.current_job, None);
    }
}
