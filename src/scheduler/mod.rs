//! Shift assignment and coverage metrics.
//!
//! # Algorithm
//!
//! `AssignmentEngine` fills slots in three greedy passes:
//!
//! | Pass | Slots | Candidates | Rules |
//! |------|-------|------------|-------|
//! | Self-requested | all | staff who asked for the slot | none (same-day guard only) |
//! | Weekend priority | open weekend slots | core staff, fewest weekend slots first | relaxed |
//! | Weekday | open weekday slots | core staff, then flexible staff | standard |
//!
//! Greedy placement is not optimal; a slot left open by an early choice is
//! not revisited.
//!
//! # Summary
//!
//! `ScheduleSummary` reports fill rate, per-pass and per-staff counts, and
//! staff over the monthly weekend cap.

mod engine;
mod outcome;
mod summary;

#[cfg(test)]
mod properties;

pub use engine::{AssignmentEngine, ScheduleRequest};
pub use outcome::{Decision, ScheduleOutcome, TraceRecord};
pub use summary::ScheduleSummary;
