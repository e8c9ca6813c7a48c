//! Rule chains.
//!
//! An evaluator runs its rules in insertion order and short-circuits on the
//! first rejection, so the reported reason is always the earliest rule that
//! fails.

use std::sync::Arc;

use super::rules;
use super::{Candidate, Eligibility, EligibilityRule, EvaluationContext};
use crate::models::ShiftSlot;

/// An ordered chain of eligibility rules.
///
/// # Example
/// ```
/// use shift_roster::eligibility::{rules, Evaluator};
///
/// let evaluator = Evaluator::new("minimal")
///     .with_rule(rules::SameDay)
///     .with_rule(rules::DayOff);
/// assert_eq!(evaluator.rule_names(), vec!["SAME_DAY", "DAY_OFF"]);
/// ```
#[derive(Clone)]
pub struct Evaluator {
    name: &'static str,
    rules: Vec<Arc<dyn EligibilityRule>>,
}

impl Evaluator {
    /// Creates an empty evaluator (admits everyone).
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: EligibilityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// The full rule book, used for weekday assignment.
    ///
    /// Core staff go through every cap; flexible staff only through the
    /// availability window and same-day exclusivity.
    pub fn standard() -> Self {
        Self::new("standard")
            .with_rule(rules::Availability)
            .with_rule(rules::HorizonCap)
            .with_rule(rules::SameDay)
            .with_rule(rules::DayOff)
            .with_rule(rules::OvernightRest)
            .with_rule(rules::MinimumRest)
            .with_rule(rules::ConsecutiveRun)
            .with_rule(rules::WeeklyCap)
            .with_rule(rules::PaycheckCap)
            .with_rule(rules::OvernightCap)
            .with_rule(rules::WeekendCap)
    }

    /// Weekend-forcing rules: only same-day exclusivity and days off.
    ///
    /// Every workload and rest cap is bypassed so weekend slots get covered.
    pub fn relaxed() -> Self {
        Self::new("relaxed")
            .with_rule(rules::SameDay)
            .with_rule(rules::DayOff)
    }

    /// Evaluator name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the chained rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs the chain for one candidate and slot.
    pub fn evaluate(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        context: &EvaluationContext<'_>,
    ) -> Eligibility {
        self.rules
            .iter()
            .filter(|rule| rule.scope().covers(candidate.member))
            .try_for_each(|rule| rule.check(candidate, slot, context))
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("name", &self.name)
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;
    use crate::eligibility::Rejection;
    use crate::models::calendar::date;
    use crate::models::{
        Assignment, AvailabilityWindow, CoreStaff, FlexibleStaff, Phase, Schedule, ShiftKind,
        StaffMember, StaffTally,
    };

    fn commit(schedule: &mut Schedule, id: &str, d: &str, kind: ShiftKind) {
        schedule.add_assignment(Assignment::new(
            format!("{id}-{d}"),
            id,
            id,
            date(d),
            kind,
            Phase::Weekday,
        ));
    }

    fn evaluate(
        evaluator: &Evaluator,
        staff: &StaffMember,
        tally: StaffTally,
        schedule: &Schedule,
        slot: &ShiftSlot,
    ) -> Eligibility {
        let rules = RuleSet::default();
        let ctx = EvaluationContext::new(&rules, schedule);
        evaluator.evaluate(&Candidate::new(staff, tally), slot, &ctx)
    }

    #[test]
    fn test_standard_admits_fresh_staff() {
        let staff: StaffMember = CoreStaff::new("A1", "Alice").into();
        let slot = ShiftSlot::new("s1", date("2024-06-03"), ShiftKind::EarlyMorning);
        let (tally, schedule) = (StaffTally::default(), Schedule::new());
        assert!(evaluate(&Evaluator::standard(), &staff, tally, &schedule, &slot).is_ok());
    }

    #[test]
    fn test_standard_reports_first_failure() {
        // Over the horizon cap AND already working that day: the cap wins
        let staff: StaffMember = CoreStaff::new("A1", "Alice").with_max_shifts(1).into();
        let mut schedule = Schedule::new();
        commit(&mut schedule, "A1", "2024-06-03", ShiftKind::EarlyMorning);
        let tally = StaffTally::default().after(date("2024-06-03"), ShiftKind::EarlyMorning);

        let slot = ShiftSlot::new("s2", date("2024-06-03"), ShiftKind::LateMorning);
        assert_eq!(
            evaluate(&Evaluator::standard(), &staff, tally, &schedule, &slot),
            Err(Rejection::ShiftCapReached { max: 1 })
        );
    }

    #[test]
    fn test_relaxed_bypasses_caps() {
        let staff: StaffMember = CoreStaff::new("A1", "Alice").with_max_shifts(1).into();
        let mut schedule = Schedule::new();
        commit(&mut schedule, "A1", "2024-06-01", ShiftKind::Overnight);
        let tally = StaffTally::default().after(date("2024-06-01"), ShiftKind::Overnight);

        // Day after an overnight, over the cap: only the relaxed chain admits
        let slot = ShiftSlot::new("s2", date("2024-06-02"), ShiftKind::Overnight);
        assert!(evaluate(&Evaluator::relaxed(), &staff, tally, &schedule, &slot).is_ok());
        assert!(evaluate(&Evaluator::standard(), &staff, tally, &schedule, &slot).is_err());
    }

    #[test]
    fn test_relaxed_keeps_day_off_and_same_day() {
        let staff: StaffMember = CoreStaff::new("A1", "Alice")
            .with_day_off(date("2024-06-02"))
            .into();
        let mut schedule = Schedule::new();
        commit(&mut schedule, "A1", "2024-06-01", ShiftKind::EarlyMorning);

        let same_day = ShiftSlot::new("s1", date("2024-06-01"), ShiftKind::Overnight);
        let day_off = ShiftSlot::new("s2", date("2024-06-02"), ShiftKind::Overnight);
        assert_eq!(
            evaluate(&Evaluator::relaxed(), &staff, StaffTally::default(), &schedule, &same_day),
            Err(Rejection::AlreadyAssignedToday)
        );
        assert_eq!(
            evaluate(&Evaluator::relaxed(), &staff, StaffTally::default(), &schedule, &day_off),
            Err(Rejection::RequestedDayOff)
        );
    }

    #[test]
    fn test_standard_flexible_only_window_and_same_day() {
        let flex: StaffMember = FlexibleStaff::new(
            "P1",
            "Pat",
            AvailabilityWindow::new(date("2024-06-01"), date("2024-06-28")),
        )
        .into();
        let mut schedule = Schedule::new();
        // Four consecutive days would stop core staff cold
        for d in ["2024-06-03", "2024-06-04", "2024-06-05"] {
            commit(&mut schedule, "P1", d, ShiftKind::Overnight);
        }

        let next = ShiftSlot::new("s", date("2024-06-06"), ShiftKind::Overnight);
        let tally = StaffTally::default();
        assert!(evaluate(&Evaluator::standard(), &flex, tally, &schedule, &next).is_ok());

        let same = ShiftSlot::new("s", date("2024-06-05"), ShiftKind::EarlyMorning);
        assert_eq!(
            evaluate(&Evaluator::standard(), &flex, StaffTally::default(), &schedule, &same),
            Err(Rejection::AlreadyAssignedToday)
        );

        let outside = ShiftSlot::new("s", date("2024-06-29"), ShiftKind::EarlyMorning);
        assert_eq!(
            evaluate(&Evaluator::standard(), &flex, StaffTally::default(), &schedule, &outside),
            Err(Rejection::OutsideAvailability)
        );
    }

    #[test]
    fn test_empty_evaluator_admits() {
        let staff: StaffMember = CoreStaff::new("A1", "Alice").into();
        let slot = ShiftSlot::new("s1", date("2024-06-03"), ShiftKind::EarlyMorning);
        let (tally, schedule) = (StaffTally::default(), Schedule::new());
        assert!(evaluate(&Evaluator::new("none"), &staff, tally, &schedule, &slot).is_ok());
    }

    #[test]
    fn test_debug_lists_rules() {
        let dbg = format!("{:?}", Evaluator::relaxed());
        assert!(dbg.contains("relaxed"));
        assert!(dbg.contains("SAME_DAY"));
        assert!(dbg.contains("DAY_OFF"));
    }
}
