//! Shift slot model.
//!
//! A slot is one shift instance on one date that needs exactly one staff
//! member. Slots are produced upstream (day templates, manual entry) and
//! arrive possibly pre-populated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::calendar;

/// Shift start kinds.
///
/// Serialized with the roster labels (`"7AM"`, `"7PM"`, `"8AM"`, `"10AM"`);
/// the variant names are accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    /// 7 AM start.
    #[serde(rename = "7AM", alias = "EarlyMorning")]
    EarlyMorning,
    /// 7 PM start, runs overnight.
    #[serde(rename = "7PM", alias = "Overnight")]
    Overnight,
    /// 8 AM start.
    #[serde(rename = "8AM", alias = "MidMorning")]
    MidMorning,
    /// 10 AM start.
    #[serde(rename = "10AM", alias = "LateMorning")]
    LateMorning,
}

impl ShiftKind {
    /// All kinds, in label order.
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::EarlyMorning,
        ShiftKind::Overnight,
        ShiftKind::MidMorning,
        ShiftKind::LateMorning,
    ];

    /// Roster label.
    pub fn label(self) -> &'static str {
        match self {
            ShiftKind::EarlyMorning => "7AM",
            ShiftKind::Overnight => "7PM",
            ShiftKind::MidMorning => "8AM",
            ShiftKind::LateMorning => "10AM",
        }
    }

    /// Only overnight shifts are subject to the overnight rules.
    #[inline]
    pub fn is_overnight(self) -> bool {
        self == ShiftKind::Overnight
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShiftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ShiftKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s) || format!("{k:?}") == s)
            .ok_or_else(|| format!("Unknown shift kind: {s}"))
    }
}

/// A unit of work to be staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Stable slot identifier.
    pub id: String,
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Shift kind.
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    /// Staff filling the slot. `None` = unfilled.
    #[serde(default)]
    pub assigned_staff_id: Option<String>,
    /// Display name of the assigned staff (denormalized for output).
    #[serde(default)]
    pub assigned_staff_name: Option<String>,
}

impl ShiftSlot {
    /// Creates an unfilled slot.
    pub fn new(id: impl Into<String>, date: NaiveDate, kind: ShiftKind) -> Self {
        Self {
            id: id.into(),
            date,
            kind,
            assigned_staff_id: None,
            assigned_staff_name: None,
        }
    }

    /// Returns a copy filled by the given staff member.
    pub fn filled_by(&self, staff_id: impl Into<String>, staff_name: impl Into<String>) -> Self {
        Self {
            assigned_staff_id: Some(staff_id.into()),
            assigned_staff_name: Some(staff_name.into()),
            ..self.clone()
        }
    }

    /// Returns an explicitly unfilled copy.
    pub fn unfilled(&self) -> Self {
        Self {
            assigned_staff_id: None,
            assigned_staff_name: None,
            ..self.clone()
        }
    }

    /// Whether a staff member is assigned.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.assigned_staff_id.is_some()
    }

    /// Whether the slot falls on a Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        calendar::is_weekend(self.date)
    }

    /// Whether the slot is an overnight shift.
    #[inline]
    pub fn is_overnight(&self) -> bool {
        self.kind.is_overnight()
    }
}
