//! Built-in labor rules.
//!
//! # Categories
//!
//! - **Exclusivity**: SAME_DAY, DAY_OFF, AVAILABILITY
//! - **Rest**: OVERNIGHT_REST, MIN_REST, CONSECUTIVE
//! - **Workload caps**: HORIZON_CAP, WEEKLY_CAP, PAYCHECK_CAP, OVERNIGHT_CAP, WEEKEND_CAP
//!
//! Weeks and paycheck periods are the month-relative buckets of
//! [`crate::models::calendar`].

use super::{Candidate, Eligibility, EligibilityRule, EvaluationContext, Rejection, RuleScope};
use crate::models::calendar::{
    days_between, is_weekend, same_month, same_paycheck_period, same_week,
};
use crate::models::ShiftSlot;

// ======================== Exclusivity rules ========================

/// A staff member holds at most one slot per date.
#[derive(Debug, Clone, Copy)]
pub struct SameDay;

impl EligibilityRule for SameDay {
    fn name(&self) -> &'static str {
        "SAME_DAY"
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        if ctx.schedule.holds_date(candidate.id(), slot.date) {
            return Err(Rejection::AlreadyAssignedToday);
        }
        Ok(())
    }
}

/// Requested days off are never worked.
#[derive(Debug, Clone, Copy)]
pub struct DayOff;

impl EligibilityRule for DayOff {
    fn name(&self) -> &'static str {
        "DAY_OFF"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        _ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        match candidate.member.as_core() {
            Some(core) if core.has_day_off(slot.date) => Err(Rejection::RequestedDayOff),
            _ => Ok(()),
        }
    }
}

/// Flexible staff work only inside their availability window.
#[derive(Debug, Clone, Copy)]
pub struct Availability;

impl EligibilityRule for Availability {
    fn name(&self) -> &'static str {
        "AVAILABILITY"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Flexible
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        _ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        match candidate.member.as_flexible() {
            Some(flex) if !flex.availability.contains(slot.date) => {
                Err(Rejection::OutsideAvailability)
            }
            _ => Ok(()),
        }
    }
}

// ======================== Rest rules ========================

/// Days off after an overnight shift.
///
/// Measured as absolute calendar distance from the latest overnight, so a
/// slot just before that overnight is rejected too.
#[derive(Debug, Clone, Copy)]
pub struct OvernightRest;

impl EligibilityRule for OvernightRest {
    fn name(&self) -> &'static str {
        "OVERNIGHT_REST"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        let days = ctx.rules.overnight_rest_days;
        match candidate.tally.last_overnight {
            Some(last) if days_between(last, slot.date) < days => {
                Err(Rejection::OvernightRest { days })
            }
            _ => Ok(()),
        }
    }
}

/// Minimum calendar gap to the most recent committed slot.
#[derive(Debug, Clone, Copy)]
pub struct MinimumRest;

impl EligibilityRule for MinimumRest {
    fn name(&self) -> &'static str {
        "MIN_REST"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        let days = ctx.rules.min_rest_days;
        match ctx.schedule.most_recent_date(candidate.id()) {
            Some(last) if days_between(last, slot.date) < days => {
                Err(Rejection::MinimumRest { days })
            }
            _ => Ok(()),
        }
    }
}

/// Caps runs of consecutive working days.
///
/// Rejects when the latest `max_consecutive_days` committed dates are
/// consecutive and end the day before the slot.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutiveRun;

impl EligibilityRule for ConsecutiveRun {
    fn name(&self) -> &'static str {
        "CONSECUTIVE"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        let limit = ctx.rules.max_consecutive_days;
        let dates = ctx.schedule.dates_for(candidate.id());
        if limit == 0 || dates.len() < limit {
            return Ok(());
        }

        let tail = &dates[dates.len() - limit..];
        let is_run = tail.windows(2).all(|w| (w[1] - w[0]).num_days() == 1);
        let ends_day_before = tail
            .last()
            .is_some_and(|&last| (slot.date - last).num_days() == 1);

        if is_run && ends_day_before {
            return Err(Rejection::ConsecutiveRun { limit });
        }
        Ok(())
    }
}

// ======================== Workload caps ========================

/// Horizon cap on the running assigned count.
#[derive(Debug, Clone, Copy)]
pub struct HorizonCap;

impl EligibilityRule for HorizonCap {
    fn name(&self) -> &'static str {
        "HORIZON_CAP"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        _slot: &ShiftSlot,
        _ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        match candidate.member.as_core() {
            Some(core) if candidate.tally.assigned >= core.max_shifts => {
                Err(Rejection::ShiftCapReached {
                    max: core.max_shifts,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Cap per week-of-month.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyCap;

impl EligibilityRule for WeeklyCap {
    fn name(&self) -> &'static str {
        "WEEKLY_CAP"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        let max = ctx.rules.max_shifts_per_week;
        let count = ctx
            .schedule
            .count_for(candidate.id(), |a| same_week(a.date, slot.date));
        if count >= max {
            return Err(Rejection::WeeklyCap { count, max });
        }
        Ok(())
    }
}

/// Cap per paycheck period.
#[derive(Debug, Clone, Copy)]
pub struct PaycheckCap;

impl EligibilityRule for PaycheckCap {
    fn name(&self) -> &'static str {
        "PAYCHECK_CAP"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        let max = ctx.rules.max_shifts_per_paycheck;
        let count = ctx
            .schedule
            .count_for(candidate.id(), |a| same_paycheck_period(a.date, slot.date));
        if count >= max {
            return Err(Rejection::PaycheckCap { count, max });
        }
        Ok(())
    }
}

/// Overnight cap per paycheck period. Only overnight slots are checked.
#[derive(Debug, Clone, Copy)]
pub struct OvernightCap;

impl EligibilityRule for OvernightCap {
    fn name(&self) -> &'static str {
        "OVERNIGHT_CAP"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        if !slot.is_overnight() {
            return Ok(());
        }
        let max = ctx.rules.max_overnights_per_paycheck;
        let count = ctx.schedule.count_for(candidate.id(), |a| {
            a.is_overnight() && same_paycheck_period(a.date, slot.date)
        });
        if count >= max {
            return Err(Rejection::OvernightCap { max });
        }
        Ok(())
    }
}

/// Weekend cap per calendar month. Only weekend slots are checked.
#[derive(Debug, Clone, Copy)]
pub struct WeekendCap;

impl EligibilityRule for WeekendCap {
    fn name(&self) -> &'static str {
        "WEEKEND_CAP"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Core
    }

    fn check(
        &self,
        candidate: &Candidate<'_>,
        slot: &ShiftSlot,
        ctx: &EvaluationContext<'_>,
    ) -> Eligibility {
        if !slot.is_weekend() {
            return Ok(());
        }
        let max = ctx.rules.max_weekend_shifts_per_month;
        let count = ctx.schedule.count_for(candidate.id(), |a| {
            is_weekend(a.date) && same_month(a.date, slot.date)
        });
        if count >= max {
            return Err(Rejection::WeekendCap { max });
        }
        Ok(())
    }
}
