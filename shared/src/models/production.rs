//! Production schedule and stage models

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DateRange;

/// Steps of the print-shop pipeline, in production order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Ralo,
    Cut,
    Print,
    Laminate,
    Corrugate,
    Crease,
    DieCut,
    Glue,
}

impl StageKind {
    pub const PIPELINE: [StageKind; 8] = [
        StageKind::Ralo,
        StageKind::Cut,
        StageKind::Print,
        StageKind::Laminate,
        StageKind::Corrugate,
        StageKind::Crease,
        StageKind::DieCut,
        StageKind::Glue,
    ];

    pub fn first() -> Self {
        StageKind::Ralo
    }

    pub fn position(&self) -> usize {
        Self::PIPELINE
            .iter()
            .position(|stage| stage == self)
            .unwrap_or_default()
    }

    /// Stage that follows this one, `None` after Glue
    pub fn next(&self) -> Option<Self> {
        Self::PIPELINE.get(self.position() + 1).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Ralo => "ralo",
            StageKind::Cut => "cut",
            StageKind::Print => "print",
            StageKind::Laminate => "laminate",
            StageKind::Corrugate => "corrugate",
            StageKind::Crease => "crease",
            StageKind::DieCut => "die_cut",
            StageKind::Glue => "glue",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Ralo => write!(f, "Ralo"),
            StageKind::Cut => write!(f, "Cut"),
            StageKind::Print => write!(f, "Print"),
            StageKind::Laminate => write!(f, "Laminate"),
            StageKind::Corrugate => write!(f, "Corrugate"),
            StageKind::Crease => write!(f, "Crease"),
            StageKind::DieCut => write!(f, "Die-cut"),
            StageKind::Glue => write!(f, "Glue"),
        }
    }
}

/// Status shared by stages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStatus::Pending => write!(f, "pending"),
            StageStatus::InProgress => write!(f, "in_progress"),
            StageStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One stage of a schedule's pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionStage {
    pub stage: StageKind,
    pub name: String,
    pub status: StageStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProductionStage {
    fn pending(stage: StageKind) -> Self {
        Self {
            stage,
            name: stage.to_string(),
            status: StageStatus::Pending,
            start_date: None,
            end_date: None,
        }
    }

    /// All eight stages, pending
    pub fn pipeline() -> Vec<ProductionStage> {
        StageKind::PIPELINE.iter().copied().map(Self::pending).collect()
    }
}

/// Overall schedule lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleStatus::Scheduled => write!(f, "scheduled"),
            ScheduleStatus::InProgress => write!(f, "in_progress"),
            ScheduleStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Production plan for one order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionSchedule {
    pub id: Uuid,
    pub order_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ScheduleStatus,
    pub current_stage: StageKind,
    pub stages: Vec<ProductionStage>,
    pub machine_id: Option<Uuid>,
    pub worker_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ProductionSchedule {
    pub fn stage(&self, kind: StageKind) -> Option<&ProductionStage> {
        self.stages.iter().find(|stage| stage.stage == kind)
    }

    pub fn stage_mut(&mut self, kind: StageKind) -> Option<&mut ProductionStage> {
        self.stages.iter_mut().find(|stage| stage.stage == kind)
    }

    /// Stages currently marked in progress
    pub fn active_stages(&self) -> impl Iterator<Item = &ProductionStage> {
        self.stages
            .iter()
            .filter(|stage| stage.status == StageStatus::InProgress)
    }
}

/// Days of production needed, rounded up to whole days
pub fn production_days(quantity: u32, production_rate: u32) -> Option<u32> {
    if production_rate == 0 {
        return None;
    }
    Some(quantity.div_ceil(production_rate))
}

/// Production window ending one day before delivery.
///
/// The window starts `production_days + 1` days before delivery, leaving the
/// day before delivery as a buffer.
pub fn schedule_window(
    delivery_date: NaiveDate,
    quantity: u32,
    production_rate: u32,
) -> Option<DateRange> {
    let days = production_days(quantity, production_rate)?;
    let start = delivery_date.checked_sub_signed(Duration::days(i64::from(days) + 1))?;
    let end = delivery_date.checked_sub_signed(Duration::days(1))?;
    Some(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pipeline_order() {
        let stages = ProductionStage::pipeline();
        assert_eq!(stages.len(), 8);
        assert_eq!(stages[0].stage, StageKind::Ralo);
        assert_eq!(stages[6].name, "Die-cut");
        assert_eq!(stages[7].stage, StageKind::Glue);
        assert!(stages.iter().all(|s| s.status == StageStatus::Pending));
    }

    #[test]
    fn test_stage_next() {
        assert_eq!(StageKind::Ralo.next(), Some(StageKind::Cut));
        assert_eq!(StageKind::Crease.next(), Some(StageKind::DieCut));
        assert_eq!(StageKind::Glue.next(), None);
    }

    #[test]
    fn test_production_days_rounds_up() {
        assert_eq!(production_days(1000, 500), Some(2));
        assert_eq!(production_days(1001, 500), Some(3));
        assert_eq!(production_days(1, 500), Some(1));
        assert_eq!(production_days(10, 0), None);
    }

    #[test]
    fn test_schedule_window_leaves_buffer_day() {
        let window = schedule_window(date(2024, 3, 20), 1200, 500).unwrap();
        // 3 production days + 1 buffer day
        assert_eq!(window.start, date(2024, 3, 16));
        assert_eq!(window.end, date(2024, 3, 19));
    }

    #[test]
    fn test_schedule_window_crosses_month() {
        let window = schedule_window(date(2024, 3, 2), 100, 100).unwrap();
        assert_eq!(window.start, date(2024, 2, 29));
        assert_eq!(window.end, date(2024, 3, 1));
    }

    #[test]
    fn test_stage_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&StageKind::DieCut).unwrap(), "\"die_cut\"");
        let parsed: StageKind = serde_json::from_str("\"corrugate\"").unwrap();
        assert_eq!(parsed, StageKind::Corrugate);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_window_ends_day_before_delivery(
                quantity in 1u32..100_000,
                rate in 1u32..5_000,
                offset in 0i64..3_000
            ) {
                let delivery = date(2025, 1, 1) + Duration::days(offset);
                let window = schedule_window(delivery, quantity, rate).unwrap();
                let days = production_days(quantity, rate).unwrap();

                prop_assert_eq!(window.end, delivery - Duration::days(1));
                prop_assert_eq!(window.days(), i64::from(days) + 1);
                prop_assert!(window.start < window.end);
                prop_assert!(u64::from(days) * u64::from(rate) >= u64::from(quantity));
            }
        }
    }
}
