//! Randomized checks of run-wide guarantees.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::RuleSet;
use crate::models::calendar::{self, date};
use crate::models::{
    AvailabilityWindow, CoreStaff, FlexibleStaff, Phase, ShiftKind, ShiftSlot, StaffMember,
};
use crate::roster::Roster;

use super::{AssignmentEngine, ScheduleOutcome, ScheduleRequest};

type CoreSpec = (Vec<(u32, usize)>, Vec<u32>, u32);

fn june(day: u32) -> chrono::NaiveDate {
    date(&format!("2024-06-{day:02}"))
}

fn build_request(
    slots: &[(u32, usize)],
    core: &[CoreSpec],
    flex: &[(u32, u32)],
) -> ScheduleRequest {
    let slots = slots
        .iter()
        .enumerate()
        .map(|(i, &(day, kind))| {
            ShiftSlot::new(format!("s{i}"), june(day), ShiftKind::ALL[kind])
        })
        .collect();

    let mut roster = Roster::new();
    for (n, (requests, days_off, max)) in core.iter().enumerate() {
        let mut staff = CoreStaff::new(format!("C{n}"), format!("Core {n}"))
            .with_max_shifts(*max)
            .with_assigned_count(requests.len() as u32);
        for &(day, kind) in requests {
            staff = staff.with_requested_work_day(june(day), ShiftKind::ALL[kind]);
        }
        for &day in days_off {
            staff = staff.with_day_off(june(day));
        }
        roster = roster.with_member(staff);
    }
    for (n, &(start, len)) in flex.iter().enumerate() {
        let end = (start + len).min(28);
        roster = roster.with_member(FlexibleStaff::new(
            format!("F{n}"),
            format!("Flex {n}"),
            AvailabilityWindow::new(june(start), june(end)),
        ));
    }

    ScheduleRequest::new(slots, roster)
}

fn run(request: &ScheduleRequest) -> ScheduleOutcome {
    AssignmentEngine::new(RuleSet::default())
        .with_trace(true)
        .run(request)
        .unwrap()
}

fn assert_invariants(request: &ScheduleRequest, outcome: &ScheduleOutcome) {
    let rules = RuleSet::default();

    // Every slot exactly once, in input order.
    let input: Vec<&str> = request.slots.iter().map(|s| s.id.as_str()).collect();
    let output: Vec<&str> = outcome.slots.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(input, output);

    // Ledger and slots agree.
    for slot in &outcome.slots {
        let committed = outcome.schedule.assignment_for_slot(&slot.id);
        assert_eq!(
            slot.assigned_staff_id.as_deref(),
            committed.map(|a| a.staff_id.as_str())
        );
    }

    // At most one slot per staff member per day.
    let mut seen = HashSet::new();
    for a in &outcome.schedule.assignments {
        assert!(seen.insert((a.staff_id.clone(), a.date)), "double booking: {a:?}");
    }

    // Each pass only touches its own kind of slot.
    for a in &outcome.schedule.assignments {
        match a.phase {
            Phase::WeekendPriority => assert!(a.is_weekend()),
            Phase::Weekday => assert!(!a.is_weekend()),
            Phase::SelfRequested => {}
        }
    }

    // Strict caps hold at the moment of every weekday commitment.
    let mut overnights: HashMap<(String, u32), usize> = HashMap::new();
    let mut per_paycheck: HashMap<(String, u32), usize> = HashMap::new();
    for a in &outcome.schedule.assignments {
        let is_core = request
            .roster
            .find(&a.staff_id)
            .is_some_and(|m| m.is_core());
        let period = (a.staff_id.clone(), calendar::paycheck_period(a.date));

        if a.phase == Phase::Weekday && is_core {
            let nights = overnights.get(&period).copied().unwrap_or(0);
            if a.is_overnight() {
                assert!(
                    nights < rules.max_overnights_per_paycheck,
                    "overnight cap bypassed outside the weekend pass: {a:?}"
                );
            }
            let shifts = per_paycheck.get(&period).copied().unwrap_or(0);
            assert!(shifts < rules.max_shifts_per_paycheck);
        }

        if a.is_overnight() {
            *overnights.entry(period.clone()).or_default() += 1;
        }
        *per_paycheck.entry(period).or_default() += 1;
    }

    // Flexible staff only work inside their window.
    for a in &outcome.schedule.assignments {
        if let Some(flex) = request.roster.find(&a.staff_id).and_then(|m| m.as_flexible()) {
            assert!(flex.availability.contains(a.date));
        }
    }

    // Final counters grow by exactly the commitments made.
    for (before, after) in request.roster.members.iter().zip(&outcome.staff) {
        let made = outcome.schedule.for_staff(before.id()).count() as u32;
        let seeded = match before {
            StaffMember::Core(c) => c.assigned_shift_count,
            StaffMember::Flexible(f) => f.assigned_shift_count,
        };
        let finished = match after {
            StaffMember::Core(c) => c.assigned_shift_count,
            StaffMember::Flexible(f) => f.assigned_shift_count,
        };
        assert_eq!(finished, seeded + made);
    }
}

fn core_strategy() -> impl Strategy<Value = Vec<CoreSpec>> {
    prop::collection::vec(
        (
            prop::collection::vec((1u32..=28, 0usize..4), 0..3),
            prop::collection::vec(1u32..=28, 0..3),
            1u32..=12,
        ),
        0..5,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_prop_run_invariants(
        slots in prop::collection::vec((1u32..=28, 0usize..4), 0..40),
        core in core_strategy(),
        flex in prop::collection::vec((1u32..=28, 0u32..10), 0..3),
    ) {
        let request = build_request(&slots, &core, &flex);
        let outcome = run(&request);
        assert_invariants(&request, &outcome);
    }

    #[test]
    fn test_prop_deterministic(
        slots in prop::collection::vec((1u32..=28, 0usize..4), 0..30),
        core in core_strategy(),
    ) {
        let request = build_request(&slots, &core, &[]);
        prop_assert_eq!(run(&request), run(&request));
    }
}

#[test]
fn test_seeded_rosters() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..20 {
        let slots: Vec<(u32, usize)> = (0..rng.random_range(10..50))
            .map(|_| (rng.random_range(1..=28), rng.random_range(0..4)))
            .collect();
        let core: Vec<CoreSpec> = (0..rng.random_range(1..6))
            .map(|_| {
                let requests = if rng.random_bool(0.3) {
                    vec![(rng.random_range(1..=28), rng.random_range(0..4))]
                } else {
                    Vec::new()
                };
                (requests, vec![rng.random_range(1..=28)], rng.random_range(4..=12))
            })
            .collect();
        let flex: Vec<(u32, u32)> = vec![(rng.random_range(1..=14), rng.random_range(0..14))];

        let request = build_request(&slots, &core, &flex);
        let first = run(&request);
        assert_invariants(&request, &first);
        assert_eq!(first, run(&request));
    }
}
