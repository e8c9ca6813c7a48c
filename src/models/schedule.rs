//! Committed assignment ledger.
//!
//! A `Schedule` is the running list of slot commitments made during a run.
//! Eligibility rules query it (per staff, per date, per period); the engine
//! only ever appends to it. Unfilled slots never appear here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::ShiftKind;

/// The assignment pass that produced a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Staff member's own request, honored before any rule is checked.
    SelfRequested,
    /// Weekend coverage pass using the relaxed rules.
    WeekendPriority,
    /// Weekday greedy pass using the standard rules.
    Weekday,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 3] = [Phase::SelfRequested, Phase::WeekendPriority, Phase::Weekday];
}

/// A slot committed to a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Committed slot ID.
    pub slot_id: String,
    /// Assigned staff ID.
    pub staff_id: String,
    /// Assigned staff display name.
    pub staff_name: String,
    /// Slot date (denormalized for rule queries).
    pub date: NaiveDate,
    /// Slot kind (denormalized for rule queries).
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    /// Pass that made the commitment.
    pub phase: Phase,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        slot_id: impl Into<String>,
        staff_id: impl Into<String>,
        staff_name: impl Into<String>,
        date: NaiveDate,
        kind: ShiftKind,
        phase: Phase,
    ) -> Self {
        Self {
            slot_id: slot_id.into(),
            staff_id: staff_id.into(),
            staff_name: staff_name.into(),
            date,
            kind,
            phase,
        }
    }

    /// Whether the committed slot is an overnight shift.
    #[inline]
    pub fn is_overnight(&self) -> bool {
        self.kind.is_overnight()
    }

    /// Whether the committed slot falls on a weekend.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        calendar::is_weekend(self.date)
    }
}

/// Ordered ledger of commitments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Commitments in the order they were made.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a commitment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of commitments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// The commitment for a slot, if any.
    pub fn assignment_for_slot(&self, slot_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.slot_id == slot_id)
    }

    /// All commitments held by a staff member, in commit order.
    pub fn for_staff<'a>(&'a self, staff_id: &'a str) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.assignments.iter().filter(move |a| a.staff_id == staff_id)
    }

    /// Whether the staff member already holds a slot on `date`.
    pub fn holds_date(&self, staff_id: &str, date: NaiveDate) -> bool {
        self.for_staff(staff_id).any(|a| a.date == date)
    }

    /// Latest committed date for a staff member.
    pub fn most_recent_date(&self, staff_id: &str) -> Option<NaiveDate> {
        self.for_staff(staff_id).map(|a| a.date).max()
    }

    /// Committed dates for a staff member, ascending.
    pub fn dates_for(&self, staff_id: &str) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.for_staff(staff_id).map(|a| a.date).collect();
        dates.sort();
        dates
    }

    /// Number of a staff member's commitments matching a predicate.
    pub fn count_for<F>(&self, staff_id: &str, predicate: F) -> usize
    where
        F: Fn(&Assignment) -> bool,
    {
        self.for_staff(staff_id).filter(|a| predicate(a)).count()
    }

    /// Number of commitments made in a given phase.
    pub fn count_in_phase(&self, phase: Phase) -> usize {
        self.assignments.iter().filter(|a| a.phase == phase).count()
    }
}
