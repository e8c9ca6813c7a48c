//! Rule-checked greedy staff rostering.
//!
//! Assigns staff to predefined shift slots over a 28-day horizon while
//! honoring labor rules: rest periods, weekly/paycheck/monthly caps, and
//! overnight and weekend fairness. Staff may reserve slots ahead of time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ShiftSlot`, `ShiftKind`, `StaffMember`,
//!   `StaffTally`, `Schedule`, `Assignment`, and the calendar helpers
//! - **`roster`**: Builds a `Roster` from raw `Name(ID)`-keyed records
//! - **`eligibility`**: Labor rules and the standard/relaxed evaluators
//! - **`scheduler`**: `AssignmentEngine` (three greedy passes) and
//!   `ScheduleSummary`
//! - **`validation`**: Input integrity checks (duplicate IDs, malformed staff)
//! - **`config`**: `RuleSet` caps, loadable from TOML
//!
//! # Example
//!
//! ```
//! use shift_roster::models::{CoreStaff, ShiftKind, ShiftSlot};
//! use shift_roster::models::calendar::parse_date;
//! use shift_roster::roster::Roster;
//! use shift_roster::{AssignmentEngine, RuleSet, ScheduleRequest};
//!
//! let slots = vec![
//!     ShiftSlot::new("s1", parse_date("2024-06-01").unwrap(), ShiftKind::Overnight),
//!     ShiftSlot::new("s2", parse_date("2024-06-04").unwrap(), ShiftKind::EarlyMorning),
//! ];
//! let roster = Roster::new()
//!     .with_member(CoreStaff::new("A1", "Alice"))
//!     .with_member(CoreStaff::new("B2", "Bob"));
//!
//! let rules = RuleSet::default();
//! let outcome = AssignmentEngine::new(rules.clone())
//!     .run(&ScheduleRequest::new(slots, roster))
//!     .unwrap();
//! assert!(outcome.summary(&rules).is_fully_staffed());
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod roster;
pub mod scheduler;
pub mod validation;

pub use config::RuleSet;
pub use error::{Result, ScheduleError};
pub use scheduler::{AssignmentEngine, ScheduleOutcome, ScheduleRequest, ScheduleSummary};
