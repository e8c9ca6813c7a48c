//! Eligibility rules and evaluators.
//!
//! Decides whether a staff member may take a slot given the commitments
//! already made. Each labor rule is a small [`EligibilityRule`]; an
//! [`Evaluator`] chains rules in a fixed order and stops at the first
//! rejection.
//!
//! # Usage
//!
//! ```
//! use shift_roster::eligibility::{Candidate, EvaluationContext, Evaluator};
//! use shift_roster::models::{CoreStaff, Schedule, ShiftKind, ShiftSlot, StaffMember, StaffTally};
//! use shift_roster::models::calendar::parse_date;
//! use shift_roster::RuleSet;
//!
//! let staff: StaffMember = CoreStaff::new("A1", "Alice").into();
//! let slot = ShiftSlot::new("s1", parse_date("2024-06-03").unwrap(), ShiftKind::EarlyMorning);
//! let rules = RuleSet::default();
//! let schedule = Schedule::new();
//! let ctx = EvaluationContext::new(&rules, &schedule);
//!
//! let candidate = Candidate::new(&staff, StaffTally::seeded_from(&staff));
//! assert!(Evaluator::standard().evaluate(&candidate, &slot, &ctx).is_ok());
//! ```
//!
//! # Evaluators
//!
//! | Evaluator | Used by |
//! |-----------|---------|
//! | standard | weekday pass |
//! | relaxed | weekend-priority pass |
//!
//! The standard evaluator checks, in order: availability window, horizon
//! cap, same day, day off, overnight rest, minimum rest, consecutive run,
//! then the weekly, paycheck, overnight and weekend caps. The relaxed
//! evaluator checks same day and day off only.

mod context;
mod evaluator;
pub mod rules;

pub use context::{Candidate, EvaluationContext};
pub use evaluator::Evaluator;

use crate::models::{ShiftSlot, StaffMember};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Outcome of an eligibility check.
pub type Eligibility = Result<(), Rejection>;

/// Why a staff member cannot take a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("Max shifts reached ({max} per horizon)")]
    ShiftCapReached { max: u32 },

    #[error("Already assigned to another shift today")]
    AlreadyAssignedToday,

    #[error("Requested day off")]
    RequestedDayOff,

    #[error("Must have {days} days off after overnight shift")]
    OvernightRest { days: i64 },

    #[error("Rest of {days} day(s) required between shifts")]
    MinimumRest { days: i64 },

    #[error("Max {limit} consecutive shifts in a row")]
    ConsecutiveRun { limit: usize },

    #[error("Max {max} shifts per week (has {count})")]
    WeeklyCap { count: usize, max: usize },

    #[error("Max {max} shifts per paycheck period (has {count})")]
    PaycheckCap { count: usize, max: usize },

    #[error("Max {max} overnight shifts per paycheck period")]
    OvernightCap { max: usize },

    #[error("Max {max} weekend shifts per month")]
    WeekendCap { max: usize },

    #[error("Not available during this date range")]
    OutsideAvailability,
}

/// Which staff kinds a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Every staff member.
    All,
    /// Core staff only.
    Core,
    /// Flexible staff only.
    Flexible,
}

impl RuleScope {
    /// Whether the scope includes this staff member.
    pub fn covers(self, staff: &StaffMember) -> bool {
        match self {
            RuleScope::All => true,
            RuleScope::Core => staff.is_core(),
            RuleScope::Flexible => !staff.is_core(),
        }
    }
}

/// A single labor rule.
///
/// Rules are stateless: everything they need comes from the candidate
/// (record plus running tally), the slot, and the context (rule set plus
/// committed schedule).
pub trait EligibilityRule: Send + Sync + Debug {
    /// Short rule name used in traces.
    fn name(&self) -> &'static str;

    /// Staff kinds this rule applies to.
    fn scope(&self) -> RuleScope {
        RuleScope::All
    }

    /// Checks the rule. Only called for staff inside `scope()`.
    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        context: &EvaluationContext<'_>,
    ) -> Eligibility;
}
