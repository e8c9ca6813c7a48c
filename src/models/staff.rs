//! Staff model.
//!
//! Two kinds of staff can fill a slot:
//!
//! - **Core staff** carry a horizon cap, self-requested work days and
//!   requested days off, and are subject to the full labor rule book.
//! - **Flexible (per-diem) staff** are overflow capacity, usable only inside
//!   their availability window.
//!
//! Staff records are inputs: the engine never mutates them. Running counters
//! live in [`StaffTally`] values that are replaced on every commit and folded
//! back into the output roster at the end of a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::ShiftKind;

/// A self-requested (date, shift kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkRequest {
    /// Requested date.
    pub date: NaiveDate,
    /// Requested shift kind.
    #[serde(rename = "type")]
    pub kind: ShiftKind,
}

impl WorkRequest {
    /// Creates a work request.
    pub fn new(date: NaiveDate, kind: ShiftKind) -> Self {
        Self { date, kind }
    }
}

/// Inclusive date range in which a flexible staff member can work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// First available date (inclusive).
    pub start: NaiveDate,
    /// Last available date (inclusive).
    pub end: NaiveDate,
}

impl AvailabilityWindow {
    /// Creates a window [start, end].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether a date lies inside the window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// An inverted window admits no date.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// A core staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStaff {
    /// Staff identifier. Empty for malformed roster tokens.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum slots over the scheduling horizon.
    pub max_shifts: u32,
    /// Slots held (seeded with the number of self-requested days).
    pub assigned_shift_count: u32,
    /// Overnight slots held.
    pub overnight_shift_count: u32,
    /// Weekend slots held.
    pub weekend_shift_count: u32,
    /// Date of the latest overnight slot committed.
    #[serde(default)]
    pub last_overnight_date: Option<NaiveDate>,
    /// Self-selected (date, shift kind) pairs.
    #[serde(default)]
    pub requested_work_days: Vec<WorkRequest>,
    /// Dates the staff member asked not to work.
    #[serde(default)]
    pub requested_days_off: Vec<NaiveDate>,
}

impl CoreStaff {
    /// Creates a core staff member with the default horizon cap of 12.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_shifts: 12,
            assigned_shift_count: 0,
            overnight_shift_count: 0,
            weekend_shift_count: 0,
            last_overnight_date: None,
            requested_work_days: Vec::new(),
            requested_days_off: Vec::new(),
        }
    }

    /// Sets the horizon cap.
    pub fn with_max_shifts(mut self, max_shifts: u32) -> Self {
        self.max_shifts = max_shifts;
        self
    }

    /// Sets the pre-seeded assigned count.
    pub fn with_assigned_count(mut self, count: u32) -> Self {
        self.assigned_shift_count = count;
        self
    }

    /// Adds a self-requested work day.
    pub fn with_requested_work_day(mut self, date: NaiveDate, kind: ShiftKind) -> Self {
        self.requested_work_days.push(WorkRequest::new(date, kind));
        self
    }

    /// Adds a requested day off.
    pub fn with_day_off(mut self, date: NaiveDate) -> Self {
        self.requested_days_off.push(date);
        self
    }

    /// Whether the staff member asked for this date off.
    pub fn has_day_off(&self, date: NaiveDate) -> bool {
        self.requested_days_off.contains(&date)
    }

    /// Whether the staff member self-requested this (date, kind).
    pub fn has_requested(&self, date: NaiveDate, kind: ShiftKind) -> bool {
        self.requested_work_days
            .iter()
            .any(|r| r.date == date && r.kind == kind)
    }
}

/// A flexible (per-diem) staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexibleStaff {
    /// Staff identifier. Empty for malformed roster tokens.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Dates the staff member can work.
    pub availability: AvailabilityWindow,
    /// Slots held at the end of a run.
    #[serde(default)]
    pub assigned_shift_count: u32,
}

impl FlexibleStaff {
    /// Creates a flexible staff member.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        availability: AvailabilityWindow,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            availability,
            assigned_shift_count: 0,
        }
    }
}

/// Any staff member that can be evaluated for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaffMember {
    /// Core staff.
    Core(CoreStaff),
    /// Flexible (per-diem) staff.
    Flexible(FlexibleStaff),
}

impl StaffMember {
    /// Staff identifier.
    pub fn id(&self) -> &str {
        match self {
            StaffMember::Core(s) => &s.id,
            StaffMember::Flexible(s) => &s.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            StaffMember::Core(s) => &s.name,
            StaffMember::Flexible(s) => &s.name,
        }
    }

    /// Whether this is core staff.
    pub fn is_core(&self) -> bool {
        matches!(self, StaffMember::Core(_))
    }

    /// Core staff view, if any.
    pub fn as_core(&self) -> Option<&CoreStaff> {
        match self {
            StaffMember::Core(s) => Some(s),
            StaffMember::Flexible(_) => None,
        }
    }

    /// Flexible staff view, if any.
    pub fn as_flexible(&self) -> Option<&FlexibleStaff> {
        match self {
            StaffMember::Flexible(s) => Some(s),
            StaffMember::Core(_) => None,
        }
    }

    /// Staff built from a malformed `Name(ID)` token carry no identifier
    /// and are never assigned.
    pub fn is_assignable(&self) -> bool {
        !self.id().is_empty()
    }
}

impl From<CoreStaff> for StaffMember {
    fn from(s: CoreStaff) -> Self {
        StaffMember::Core(s)
    }
}

impl From<FlexibleStaff> for StaffMember {
    fn from(s: FlexibleStaff) -> Self {
        StaffMember::Flexible(s)
    }
}

/// Running counters for one staff member during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaffTally {
    /// Slots held.
    pub assigned: u32,
    /// Overnight slots held.
    pub overnight: u32,
    /// Weekend slots held.
    pub weekend: u32,
    /// Latest overnight date.
    pub last_overnight: Option<NaiveDate>,
}

impl StaffTally {
    /// Seeds a tally from a staff record's counters.
    pub fn seeded_from(staff: &StaffMember) -> Self {
        match staff {
            StaffMember::Core(s) => Self {
                assigned: s.assigned_shift_count,
                overnight: s.overnight_shift_count,
                weekend: s.weekend_shift_count,
                last_overnight: s.last_overnight_date,
            },
            StaffMember::Flexible(s) => Self {
                assigned: s.assigned_shift_count,
                ..Self::default()
            },
        }
    }

    /// Tally after committing one more slot on `date` of `kind`.
    #[must_use]
    pub fn after(self, date: NaiveDate, kind: ShiftKind) -> Self {
        let overnight = kind.is_overnight();
        Self {
            assigned: self.assigned + 1,
            overnight: self.overnight + u32::from(overnight),
            weekend: self.weekend + u32::from(calendar::is_weekend(date)),
            last_overnight: if overnight {
                Some(date)
            } else {
                self.last_overnight
            },
        }
    }

    /// Returns a copy of `staff` carrying this tally's counters.
    pub fn apply_to(&self, staff: &StaffMember) -> StaffMember {
        match staff {
            StaffMember::Core(s) => StaffMember::Core(CoreStaff {
                assigned_shift_count: self.assigned,
                overnight_shift_count: self.overnight,
                weekend_shift_count: self.weekend,
                last_overnight_date: self.last_overnight,
                ..s.clone()
            }),
            StaffMember::Flexible(s) => StaffMember::Flexible(FlexibleStaff {
                assigned_shift_count: self.assigned,
                ..s.clone()
            }),
        }
    }
}
