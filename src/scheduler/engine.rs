//! Three-pass greedy assignment engine.
//!
//! # Algorithm
//!
//! 1. **Self-requested.** Each slot goes to whoever made the first matching
//!    request, in request-record order. The slot is left for later passes
//!    when that requester is not core staff or already holds a slot that
//!    day. No rule is checked.
//! 2. **Weekend priority.** Remaining weekend slots are offered tier by
//!    tier: staff with 0 weekend slots first, then staff with 1, and so on
//!    up to `weekend_priority_tiers`. Candidates are checked with the
//!    relaxed evaluator.
//! 3. **Weekday.** Remaining slots are offered to core staff, then flexible
//!    staff, in roster order under the standard evaluator. The pass stops
//!    early once no core staff member has capacity left.
//!
//! Slots are visited in input order and staff in roster order, so a run is
//! deterministic.
//!
//! # Complexity
//! O(n * s * a) where n=slots, s=staff, a=commitments per staff member.

use std::collections::HashMap;

use chrono::Datelike;
use log::{debug, info, warn};

use crate::config::RuleSet;
use crate::eligibility::{Candidate, EvaluationContext, Evaluator, Rejection};
use crate::error::{Result, ScheduleError};
use crate::models::calendar;
use crate::models::{Assignment, Phase, Schedule, ShiftSlot, StaffMember, StaffTally};
use crate::roster::{Roster, SchedulingData};
use crate::validation::validate_input;

use super::outcome::{Decision, ScheduleOutcome, TraceRecord};
use super::summary::weekend_overages;

/// Input container for one scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Slots to fill, in processing order.
    pub slots: Vec<ShiftSlot>,
    /// Staff in evaluation order.
    pub roster: Roster,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(slots: Vec<ShiftSlot>, roster: Roster) -> Self {
        Self { slots, roster }
    }
}

/// Multi-pass greedy shift assignment.
///
/// # Example
///
/// ```
/// use shift_roster::scheduler::{AssignmentEngine, ScheduleRequest};
/// use shift_roster::models::{CoreStaff, ShiftKind, ShiftSlot};
/// use shift_roster::models::calendar::parse_date;
/// use shift_roster::roster::Roster;
/// use shift_roster::RuleSet;
///
/// let monday = parse_date("2024-06-03").unwrap();
/// let slots = vec![ShiftSlot::new("s1", monday, ShiftKind::EarlyMorning)];
/// let roster = Roster::new().with_member(CoreStaff::new("A1", "Alice"));
///
/// let engine = AssignmentEngine::new(RuleSet::default());
/// let outcome = engine.run(&ScheduleRequest::new(slots, roster)).unwrap();
/// assert_eq!(outcome.slots[0].assigned_staff_id.as_deref(), Some("A1"));
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    rules: RuleSet,
    standard: Evaluator,
    relaxed: Evaluator,
    trace: bool,
}

impl AssignmentEngine {
    /// Creates an engine with the standard and relaxed evaluators.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            standard: Evaluator::standard(),
            relaxed: Evaluator::relaxed(),
            trace: false,
        }
    }

    /// Enables or disables per-decision trace records.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Replaces the evaluator used by the weekday pass.
    pub fn with_standard_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.standard = evaluator;
        self
    }

    /// Replaces the evaluator used by the weekend-priority pass.
    pub fn with_relaxed_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.relaxed = evaluator;
        self
    }

    /// The rule set in force.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Builds the roster from raw records, then runs.
    pub fn generate(
        &self,
        slots: Vec<ShiftSlot>,
        data: &SchedulingData,
    ) -> Result<ScheduleOutcome> {
        let roster = Roster::build(data, &self.rules)?;
        self.run(&ScheduleRequest::new(slots, roster))
    }

    /// Runs all three passes over a request.
    ///
    /// The request is never modified; every output value is a fresh copy.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidInput`] when the input has fatal validation
    /// issues (duplicate slot IDs). Other issues are logged and the run
    /// proceeds.
    pub fn run(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome> {
        if let Err(errors) = validate_input(&request.slots, &request.roster) {
            let (fatal, minor): (Vec<_>, Vec<_>) =
                errors.into_iter().partition(|e| e.is_fatal());
            for issue in &minor {
                warn!("{}", issue.message);
            }
            if !fatal.is_empty() {
                return Err(ScheduleError::InvalidInput(fatal));
            }
        }

        info!(
            "Scheduling {} slots across {} staff",
            request.slots.len(),
            request.roster.len()
        );

        let mut run = Run::new(self, &request.slots, &request.roster);

        let remaining = run.self_requested();
        info!(
            "Self-requested pass filled {} slots",
            run.schedule.count_in_phase(Phase::SelfRequested)
        );

        let (weekend, weekday): (Vec<usize>, Vec<usize>) = remaining
            .into_iter()
            .partition(|&i| request.slots[i].is_weekend());

        run.weekend_priority(&weekend);
        info!(
            "Weekend-priority pass filled {} of {} slots",
            run.schedule.count_in_phase(Phase::WeekendPriority),
            weekend.len()
        );

        run.weekday(&weekday);
        info!(
            "Weekday pass filled {} of {} slots",
            run.schedule.count_in_phase(Phase::Weekday),
            weekday.len()
        );

        let outcome = run.finish();
        for staff_id in weekend_overages(&outcome.schedule, &outcome.staff, &self.rules) {
            warn!(
                "Staff {} exceeds {} weekend shifts in a month",
                staff_id, self.rules.max_weekend_shifts_per_month
            );
        }
        Ok(outcome)
    }
}

/// Working state of one run.
struct Run<'a> {
    engine: &'a AssignmentEngine,
    slots: &'a [ShiftSlot],
    staff: &'a [StaffMember],
    roster: &'a Roster,
    tallies: Vec<StaffTally>,
    /// Staff index holding each slot.
    holders: Vec<Option<usize>>,
    schedule: Schedule,
    trace: Vec<TraceRecord>,
}

impl<'a> Run<'a> {
    fn new(engine: &'a AssignmentEngine, slots: &'a [ShiftSlot], roster: &'a Roster) -> Self {
        Self {
            engine,
            slots,
            staff: &roster.members,
            roster,
            tallies: roster.members.iter().map(StaffTally::seeded_from).collect(),
            holders: vec![None; slots.len()],
            schedule: Schedule::new(),
            trace: Vec::new(),
        }
    }

    /// Pass 1. Returns the slots left open, in input order.
    fn self_requested(&mut self) -> Vec<usize> {
        let slots = self.slots;
        let mut remaining = Vec::new();

        for (i, slot) in slots.iter().enumerate() {
            let requester = self.roster.request_for(slot).and_then(|r| {
                self.staff
                    .iter()
                    .position(|m| m.is_core() && m.id() == r.staff_id)
            });

            match requester {
                Some(s) if !self.schedule.holds_date(self.staff[s].id(), slot.date) => {
                    self.commit(i, s, Phase::SelfRequested);
                }
                Some(s) => {
                    debug!(
                        "Request by {} for slot {} deferred: already working {}",
                        self.staff[s].id(),
                        slot.id,
                        calendar::format_date(slot.date)
                    );
                    self.record(
                        i,
                        Some(s),
                        Phase::SelfRequested,
                        Decision::Rejected(Rejection::AlreadyAssignedToday),
                    );
                    remaining.push(i);
                }
                None => remaining.push(i),
            }
        }

        remaining
    }

    /// Pass 2.
    fn weekend_priority(&mut self, weekend: &[usize]) {
        let engine = self.engine;
        let mut weekend_counts: Vec<u32> = self
            .staff
            .iter()
            .map(|m| {
                self.schedule
                    .count_for(m.id(), |a| a.phase == Phase::SelfRequested && a.is_weekend())
                    as u32
            })
            .collect();

        let core: Vec<usize> = (0..self.staff.len())
            .filter(|&s| self.staff[s].is_core() && self.staff[s].is_assignable())
            .collect();

        for &i in weekend {
            let mut holder = None;

            'tiers: for tier in 0..engine.rules.weekend_priority_tiers {
                for &s in &core {
                    if weekend_counts[s] != tier {
                        continue;
                    }
                    if self.offer(i, s, &engine.relaxed, Phase::WeekendPriority) {
                        weekend_counts[s] = tier + 1;
                        holder = Some(s);
                        break 'tiers;
                    }
                }
            }

            if holder.is_none() {
                self.leave_open(i, Phase::WeekendPriority, Decision::Unfilled);
            }
        }
    }

    /// Pass 3.
    fn weekday(&mut self, weekday: &[usize]) {
        let engine = self.engine;
        let core: Vec<usize> = (0..self.staff.len())
            .filter(|&s| self.staff[s].is_core() && self.staff[s].is_assignable())
            .collect();
        let flexible: Vec<usize> = (0..self.staff.len())
            .filter(|&s| !self.staff[s].is_core() && self.staff[s].is_assignable())
            .collect();

        for (pos, &i) in weekday.iter().enumerate() {
            if !self.core_capacity_left(&core) {
                info!(
                    "Core staff exhausted; leaving {} weekday slots unfilled",
                    weekday.len() - pos
                );
                for &rest in &weekday[pos..] {
                    self.leave_open(rest, Phase::Weekday, Decision::CoreStaffExhausted);
                }
                return;
            }

            let filled = core
                .iter()
                .chain(&flexible)
                .any(|&s| self.offer(i, s, &engine.standard, Phase::Weekday));

            if !filled {
                self.leave_open(i, Phase::Weekday, Decision::Unfilled);
            }
        }
    }

    /// Whether some core staff member is below both the horizon cap and
    /// every weekly cap.
    fn core_capacity_left(&self, core: &[usize]) -> bool {
        let max_week = self.engine.rules.max_shifts_per_week;
        core.iter().any(|&s| {
            let member = &self.staff[s];
            let under_horizon = member
                .as_core()
                .is_some_and(|c| self.tallies[s].assigned < c.max_shifts);

            let mut per_week: HashMap<(i32, u32), usize> = HashMap::new();
            for a in self.schedule.for_staff(member.id()) {
                *per_week
                    .entry((a.date.year(), calendar::week_of_month(a.date)))
                    .or_default() += 1;
            }

            under_horizon && per_week.values().all(|&n| n < max_week)
        })
    }

    /// Evaluates one candidate and commits on success.
    fn offer(&mut self, i: usize, s: usize, evaluator: &Evaluator, phase: Phase) -> bool {
        let slot = &self.slots[i];
        let member = &self.staff[s];
        let verdict = {
            let context = EvaluationContext::new(&self.engine.rules, &self.schedule);
            let candidate = Candidate::new(member, self.tallies[s]);
            evaluator.evaluate(&candidate, slot, &context)
        };

        match verdict {
            Ok(()) => {
                self.commit(i, s, phase);
                true
            }
            Err(rejection) => {
                debug!(
                    "{} evaluator rejected {} for slot {}: {}",
                    evaluator.name(),
                    member.id(),
                    slot.id,
                    rejection
                );
                self.record(i, Some(s), phase, Decision::Rejected(rejection));
                false
            }
        }
    }

    fn commit(&mut self, i: usize, s: usize, phase: Phase) {
        let slot = &self.slots[i];
        let member = &self.staff[s];

        debug!(
            "Assigned {} to slot {} ({} {})",
            member.id(),
            slot.id,
            calendar::format_date(slot.date),
            slot.kind
        );

        self.schedule.add_assignment(Assignment::new(
            slot.id.clone(),
            member.id(),
            member.name(),
            slot.date,
            slot.kind,
            phase,
        ));
        self.tallies[s] = self.tallies[s].after(slot.date, slot.kind);
        self.holders[i] = Some(s);
        self.record(i, Some(s), phase, Decision::Accepted);
    }

    fn leave_open(&mut self, i: usize, phase: Phase, decision: Decision) {
        debug!("Slot {} left unfilled", self.slots[i].id);
        self.record(i, None, phase, decision);
    }

    fn record(&mut self, i: usize, s: Option<usize>, phase: Phase, decision: Decision) {
        if !self.engine.trace {
            return;
        }
        let slot_id = &self.slots[i].id;
        let record = match s {
            Some(s) => TraceRecord::candidate(slot_id, self.staff[s].id(), phase, decision),
            None => TraceRecord::slot(slot_id, phase, decision),
        };
        self.trace.push(record);
    }

    fn finish(self) -> ScheduleOutcome {
        let slots = self
            .slots
            .iter()
            .zip(&self.holders)
            .map(|(slot, holder)| match holder {
                Some(s) => slot.filled_by(self.staff[*s].id(), self.staff[*s].name()),
                None => slot.unfilled(),
            })
            .collect();

        let staff = self
            .staff
            .iter()
            .zip(&self.tallies)
            .map(|(member, tally)| tally.apply_to(member))
            .collect();

        ScheduleOutcome {
            slots,
            staff,
            schedule: self.schedule,
            trace: self.trace,
        }
    }
}
