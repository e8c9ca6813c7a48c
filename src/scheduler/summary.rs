//! Schedule coverage metrics.
//!
//! Computes fill statistics from a completed run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate | Filled slots / total slots (1.0 for an empty run) |
//! | Filled by phase | Commitments per assignment pass |
//! | Assigned by staff | Commitments per roster member, roster order |
//! | Weekend overages | Staff whose weekend slots in one month exceed the monthly cap |

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::config::RuleSet;
use crate::models::{Phase, Schedule, StaffMember};

use super::ScheduleOutcome;

/// Coverage indicators for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    /// Number of input slots.
    pub total_slots: usize,
    /// Slots with a staff member.
    pub filled: usize,
    /// Slots left open.
    pub unfilled: usize,
    /// Fraction of slots filled (0.0..1.0).
    pub fill_rate: f64,
    /// Commitments made by the self-requested pass.
    pub self_requested: usize,
    /// Commitments made by the weekend-priority pass.
    pub weekend_priority: usize,
    /// Commitments made by the weekday pass.
    pub weekday: usize,
    /// (staff ID, commitments this run), roster order.
    pub assigned_by_staff: Vec<(String, usize)>,
    /// Staff IDs over the monthly weekend cap, roster order.
    pub weekend_overages: Vec<String>,
}

impl ScheduleSummary {
    /// Computes metrics from a run outcome.
    pub fn calculate(outcome: &ScheduleOutcome, rules: &RuleSet) -> Self {
        let total_slots = outcome.slots.len();
        let filled = outcome.slots.iter().filter(|s| s.is_filled()).count();

        let fill_rate = if total_slots == 0 {
            1.0
        } else {
            filled as f64 / total_slots as f64
        };

        let schedule = &outcome.schedule;
        let assigned_by_staff = outcome
            .staff
            .iter()
            .filter(|s| s.is_assignable())
            .map(|s| (s.id().to_string(), schedule.for_staff(s.id()).count()))
            .collect();

        Self {
            total_slots,
            filled,
            unfilled: total_slots - filled,
            fill_rate,
            self_requested: schedule.count_in_phase(Phase::SelfRequested),
            weekend_priority: schedule.count_in_phase(Phase::WeekendPriority),
            weekday: schedule.count_in_phase(Phase::Weekday),
            assigned_by_staff,
            weekend_overages: weekend_overages(schedule, &outcome.staff, rules),
        }
    }

    /// Whether every slot was filled.
    pub fn is_fully_staffed(&self) -> bool {
        self.unfilled == 0
    }

    /// Commitments made in a given pass.
    pub fn filled_in(&self, phase: Phase) -> usize {
        match phase {
            Phase::SelfRequested => self.self_requested,
            Phase::WeekendPriority => self.weekend_priority,
            Phase::Weekday => self.weekday,
        }
    }
}

/// Core staff whose weekend slots in some calendar month exceed
/// `max_weekend_shifts_per_month`.
///
/// Self-requested and weekend-priority commitments skip the weekend cap,
/// so overage is possible and is reported rather than prevented.
pub(crate) fn weekend_overages(
    schedule: &Schedule,
    staff: &[StaffMember],
    rules: &RuleSet,
) -> Vec<String> {
    staff
        .iter()
        .filter(|s| s.is_core() && s.is_assignable())
        .filter(|s| {
            let mut per_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();
            for a in schedule.for_staff(s.id()).filter(|a| a.is_weekend()) {
                *per_month.entry((a.date.year(), a.date.month())).or_default() += 1;
            }
            per_month
                .values()
                .any(|&n| n > rules.max_weekend_shifts_per_month)
        })
        .map(|s| s.id().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::date;
    use crate::models::{
        Assignment, AvailabilityWindow, CoreStaff, FlexibleStaff, ShiftKind, ShiftSlot,
    };

    fn weekend(schedule: &mut Schedule, slot: &str, staff: &str, d: &str) {
        schedule.add_assignment(Assignment::new(
            slot,
            staff,
            staff,
            date(d),
            ShiftKind::EarlyMorning,
            Phase::WeekendPriority,
        ));
    }

    #[test]
    fn test_summary_basic() {
        let mut schedule = Schedule::new();
        weekend(&mut schedule, "s1", "A1", "2024-06-01");
        schedule.add_assignment(Assignment::new(
            "s2",
            "P1",
            "Pat",
            date("2024-06-03"),
            ShiftKind::MidMorning,
            Phase::Weekday,
        ));

        let outcome = ScheduleOutcome {
            slots: vec![
                ShiftSlot::new("s1", date("2024-06-01"), ShiftKind::EarlyMorning)
                    .filled_by("A1", "A1"),
                ShiftSlot::new("s2", date("2024-06-03"), ShiftKind::MidMorning)
                    .filled_by("P1", "Pat"),
                ShiftSlot::new("s3", date("2024-06-04"), ShiftKind::Overnight),
            ],
            staff: vec![
                CoreStaff::new("A1", "A1").into(),
                FlexibleStaff::new(
                    "P1",
                    "Pat",
                    AvailabilityWindow::new(date("2024-06-01"), date("2024-06-30")),
                )
                .into(),
            ],
            schedule,
            trace: Vec::new(),
        };

        let summary = outcome.summary(&RuleSet::default());
        assert_eq!(summary.total_slots, 3);
        assert_eq!(summary.filled, 2);
        assert_eq!(summary.unfilled, 1);
        assert!((summary.fill_rate - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(summary.filled_in(Phase::WeekendPriority), 1);
        assert_eq!(summary.filled_in(Phase::Weekday), 1);
        assert_eq!(summary.filled_in(Phase::SelfRequested), 0);
        assert_eq!(
            summary.assigned_by_staff,
            vec![("A1".to_string(), 1), ("P1".to_string(), 1)]
        );
        assert!(summary.weekend_overages.is_empty());
        assert!(!summary.is_fully_staffed());
    }

    #[test]
    fn test_empty_run() {
        let outcome = ScheduleOutcome {
            slots: Vec::new(),
            staff: Vec::new(),
            schedule: Schedule::new(),
            trace: Vec::new(),
        };
        let summary = outcome.summary(&RuleSet::default());
        assert!((summary.fill_rate - 1.0).abs() < 1e-10);
        assert!(summary.is_fully_staffed());
    }

    #[test]
    fn test_weekend_overage_per_month() {
        let staff: Vec<StaffMember> = vec![CoreStaff::new("A1", "A1").into()];
        let mut schedule = Schedule::new();
        // Three weekend days in June, cap is 2.
        weekend(&mut schedule, "s1", "A1", "2024-06-01");
        weekend(&mut schedule, "s2", "A1", "2024-06-08");
        weekend(&mut schedule, "s3", "A1", "2024-06-15");

        let rules = RuleSet::default();
        assert_eq!(weekend_overages(&schedule, &staff, &rules), vec!["A1".to_string()]);

        // Two in June and one in July stays under the cap.
        let mut split = Schedule::new();
        weekend(&mut split, "s1", "A1", "2024-06-01");
        weekend(&mut split, "s2", "A1", "2024-06-08");
        weekend(&mut split, "s3", "A1", "2024-07-06");
        assert!(weekend_overages(&split, &staff, &rules).is_empty());
    }
}
