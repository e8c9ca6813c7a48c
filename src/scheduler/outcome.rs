//! Run results and decision traces.

use serde::{Deserialize, Serialize};

use crate::config::RuleSet;
use crate::eligibility::Rejection;
use crate::error::Result;
use crate::models::{Phase, Schedule, ShiftSlot, StaffMember};

use super::ScheduleSummary;

/// What happened to one (slot, candidate) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// The candidate was committed to the slot.
    Accepted,
    /// The candidate was turned down.
    Rejected(Rejection),
    /// No candidate was found; the slot stays open.
    Unfilled,
    /// Core staff had no capacity left, so the slot was left open without
    /// evaluating anyone.
    CoreStaffExhausted,
}

/// One diagnostic record of the assignment process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Slot under consideration.
    pub slot_id: String,
    /// Candidate staff, absent for slot-level decisions.
    pub staff_id: Option<String>,
    /// Pass that made the decision.
    pub phase: Phase,
    /// Decision taken.
    #[serde(flatten)]
    pub decision: Decision,
}

impl TraceRecord {
    pub(crate) fn candidate(
        slot_id: &str,
        staff_id: &str,
        phase: Phase,
        decision: Decision,
    ) -> Self {
        Self {
            slot_id: slot_id.to_string(),
            staff_id: Some(staff_id.to_string()),
            phase,
            decision,
        }
    }

    pub(crate) fn slot(slot_id: &str, phase: Phase, decision: Decision) -> Self {
        Self {
            slot_id: slot_id.to_string(),
            staff_id: None,
            phase,
            decision,
        }
    }
}

/// Complete result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Every input slot exactly once, in input order, filled or unfilled.
    #[serde(rename = "updatedSlots")]
    pub slots: Vec<ShiftSlot>,
    /// Every roster member, in roster order, with final counters.
    #[serde(rename = "updatedStaff")]
    pub staff: Vec<StaffMember>,
    /// Commitments in the order they were made.
    pub schedule: Schedule,
    /// Per-decision trace (empty unless tracing was enabled).
    #[serde(default)]
    pub trace: Vec<TraceRecord>,
}

impl ScheduleOutcome {
    /// Output slot by ID.
    pub fn slot(&self, slot_id: &str) -> Option<&ShiftSlot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    /// Output staff member by ID.
    pub fn staff_member(&self, staff_id: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id() == staff_id)
    }

    /// Slots left unfilled.
    pub fn unfilled_slots(&self) -> impl Iterator<Item = &ShiftSlot> {
        self.slots.iter().filter(|s| !s.is_filled())
    }

    /// Trace records for one slot.
    pub fn trace_for_slot<'a>(
        &'a self,
        slot_id: &'a str,
    ) -> impl Iterator<Item = &'a TraceRecord> + 'a {
        self.trace.iter().filter(move |t| t.slot_id == slot_id)
    }

    /// Computes summary metrics.
    pub fn summary(&self, rules: &RuleSet) -> ScheduleSummary {
        ScheduleSummary::calculate(self, rules)
    }

    /// Serializes the outcome as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::date;
    use crate::models::{Assignment, CoreStaff, ShiftKind};

    fn sample() -> ScheduleOutcome {
        let open = ShiftSlot::new("s2", date("2024-06-04"), ShiftKind::Overnight);
        let filled = ShiftSlot::new("s1", date("2024-06-03"), ShiftKind::EarlyMorning)
            .filled_by("A1", "Alice");
        let mut schedule = Schedule::new();
        schedule.add_assignment(Assignment::new(
            "s1",
            "A1",
            "Alice",
            date("2024-06-03"),
            ShiftKind::EarlyMorning,
            Phase::Weekday,
        ));

        ScheduleOutcome {
            slots: vec![filled, open],
            staff: vec![CoreStaff::new("A1", "Alice").into()],
            schedule,
            trace: vec![
                TraceRecord::candidate("s1", "A1", Phase::Weekday, Decision::Accepted),
                TraceRecord::candidate(
                    "s2",
                    "A1",
                    Phase::Weekday,
                    Decision::Rejected(Rejection::MinimumRest { days: 1 }),
                ),
                TraceRecord::slot("s2", Phase::Weekday, Decision::Unfilled),
            ],
        }
    }

    #[test]
    fn test_lookups() {
        let outcome = sample();
        assert!(outcome.slot("s1").unwrap().is_filled());
        assert_eq!(outcome.unfilled_slots().count(), 1);
        assert_eq!(outcome.staff_member("A1").unwrap().name(), "Alice");
        assert!(outcome.staff_member("B2").is_none());
        assert_eq!(outcome.trace_for_slot("s2").count(), 2);
    }

    #[test]
    fn test_trace_json_shape() {
        let outcome = sample();
        let json = serde_json::to_value(&outcome.trace).unwrap();
        assert_eq!(json[0]["decision"], "accepted");
        assert_eq!(json[1]["decision"], "rejected");
        assert_eq!(json[1]["reason"], "minimum_rest");
        assert_eq!(json[1]["days"], 1);
        assert!(json[2]["staff_id"].is_null());
        assert_eq!(json[2]["phase"], "weekday");
    }

    #[test]
    fn test_to_json_round_trip() {
        let outcome = sample();
        let text = outcome.to_json().unwrap();
        assert!(text.contains("\"updatedSlots\""));
        assert!(text.contains("\"updatedStaff\""));
        let back: ScheduleOutcome = serde_json::from_str(&text).unwrap();
        assert_eq!(back, outcome);
    }
}
