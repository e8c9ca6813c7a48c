//! Evaluation context for eligibility rules.

use crate::config::RuleSet;
use crate::models::{Schedule, StaffMember, StaffTally};

/// Shared state every rule may consult: the rule book and the commitments
/// made so far in the run.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Caps and rest periods.
    pub rules: &'a RuleSet,
    /// Commitments made so far.
    pub schedule: &'a Schedule,
}

impl<'a> EvaluationContext<'a> {
    /// Creates a context.
    pub fn new(rules: &'a RuleSet, schedule: &'a Schedule) -> Self {
        Self { rules, schedule }
    }
}

/// A staff member under evaluation, paired with their running counters.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Input record (never mutated).
    pub member: &'a StaffMember,
    /// Counters as of this point in the run.
    pub tally: StaffTally,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(member: &'a StaffMember, tally: StaffTally) -> Self {
        Self { member, tally }
    }

    /// Staff identifier.
    pub fn id(&self) -> &'a str {
        self.member.id()
    }
}
