//! Roster construction from raw staffing records.
//!
//! Raw records arrive as spreadsheet-shaped rows keyed by column names. Each
//! row names its staff member with a combined `"<name>(<id>)"` token. The
//! builder splits those tokens, attaches requests to their staff member and
//! seeds the assigned count with the number of self-requested days.
//!
//! # Tolerated anomalies
//! - A token without parentheses yields an empty name and identifier. The
//!   resulting staff member is kept but never matches a request or a slot.
//! - A request whose shift label is unknown is dropped with a warning. It
//!   still counts toward the staff member's reserved shifts.
//!
//! Malformed dates are the only hard failure.

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::RuleSet;
use crate::error::{Result, ScheduleError};
use crate::models::calendar::parse_date;
use crate::models::{
    AvailabilityWindow, CoreStaff, FlexibleStaff, ShiftKind, ShiftSlot, StaffMember, WorkRequest,
};

/// A core staff row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreStaffRecord {
    #[serde(rename = "Name(ID)", default)]
    pub name_id: String,
    /// Horizon cap. Missing or zero falls back to the rule set default.
    #[serde(rename = "Number of Shift", default)]
    pub shift_count: Option<u32>,
}

/// A flexible (per-diem) staff row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlexibleStaffRecord {
    #[serde(rename = "Name(ID)", default)]
    pub name_id: String,
    #[serde(rename = "Dates Available to Work Start")]
    pub available_start: String,
    #[serde(rename = "Dates Available to Work End")]
    pub available_end: String,
}

/// A self-requested work day row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkDayRecord {
    #[serde(rename = "Name(ID)", default)]
    pub name_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Shift")]
    pub shift: String,
}

/// A requested day off row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayOffRecord {
    #[serde(rename = "Name(ID)", default)]
    pub name_id: String,
    #[serde(rename = "Date")]
    pub date: String,
}

/// All raw inputs for one run. Any missing dataset is an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingData {
    #[serde(default, alias = "paList")]
    pub core_staff: Vec<CoreStaffRecord>,
    #[serde(default, alias = "perDiemList")]
    pub flexible_staff: Vec<FlexibleStaffRecord>,
    #[serde(default)]
    pub requested_work_days: Vec<WorkDayRecord>,
    #[serde(default)]
    pub requested_days_off: Vec<DayOffRecord>,
}

impl SchedulingData {
    /// Parses a JSON input document.
    ///
    /// A blank or `null` document means the caller supplied nothing at all
    /// and is reported as [`ScheduleError::MissingInput`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(ScheduleError::MissingInput(
                "no scheduling data supplied".to_string(),
            ));
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Reads a JSON input document from disk.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Splits a `"<name>(<id>)"` token into `(name, id)`.
///
/// Returns two empty strings when the token has no opening parenthesis.
pub fn split_name_id(token: &str) -> (String, String) {
    let mut parts = token.split('(');
    let name = parts.next().unwrap_or_default();
    match parts.next() {
        Some(rest) => (
            name.trim().to_string(),
            rest.replacen(')', "", 1).trim().to_string(),
        ),
        None => (String::new(), String::new()),
    }
}

fn record_id(token: &str) -> String {
    split_name_id(token).1
}

/// A self-requested slot and the staff member who asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRequest {
    /// Requesting staff ID (may name no core staff member).
    pub staff_id: String,
    /// Requested date and shift.
    pub request: WorkRequest,
}

impl StaffRequest {
    /// Creates a request.
    pub fn new(staff_id: impl Into<String>, date: NaiveDate, kind: ShiftKind) -> Self {
        Self {
            staff_id: staff_id.into(),
            request: WorkRequest::new(date, kind),
        }
    }

    /// Whether this request asks for `slot`.
    pub fn matches(&self, slot: &ShiftSlot) -> bool {
        self.request.date == slot.date && self.request.kind == slot.kind
    }
}

/// Ordered staff roster for one run: core staff first, then flexible staff,
/// each in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Staff in evaluation order.
    pub members: Vec<StaffMember>,
    /// Self-requested slots in record order. The first matching request
    /// decides who gets a slot.
    #[serde(default)]
    pub requests: Vec<StaffRequest>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a staff member. A core staff member's own requests are
    /// appended to the request list after those already present.
    pub fn with_member(mut self, member: impl Into<StaffMember>) -> Self {
        let member = member.into();
        if let StaffMember::Core(core) = &member {
            self.requests.extend(
                core.requested_work_days
                    .iter()
                    .map(|wd| StaffRequest::new(core.id.clone(), wd.date, wd.kind)),
            );
        }
        self.members.push(member);
        self
    }

    /// Appends a self-requested slot.
    pub fn with_request(
        mut self,
        staff_id: impl Into<String>,
        date: NaiveDate,
        kind: ShiftKind,
    ) -> Self {
        self.requests.push(StaffRequest::new(staff_id, date, kind));
        self
    }

    /// The first request with a staff ID that asks for `slot`.
    pub fn request_for(&self, slot: &ShiftSlot) -> Option<&StaffRequest> {
        self.requests
            .iter()
            .find(|r| !r.staff_id.is_empty() && r.matches(slot))
    }

    /// Number of staff.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Core staff, in roster order.
    pub fn core(&self) -> impl Iterator<Item = &CoreStaff> {
        self.members.iter().filter_map(StaffMember::as_core)
    }

    /// Flexible staff, in roster order.
    pub fn flexible(&self) -> impl Iterator<Item = &FlexibleStaff> {
        self.members.iter().filter_map(StaffMember::as_flexible)
    }

    /// Finds a staff member by identifier.
    pub fn find(&self, staff_id: &str) -> Option<&StaffMember> {
        self.members.iter().find(|m| m.id() == staff_id)
    }

    /// Builds a roster from raw records.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidDate`] when any record carries a date that is
    /// not `YYYY-MM-DD`.
    pub fn build(data: &SchedulingData, rules: &RuleSet) -> Result<Self> {
        let mut roster = Roster::new();

        for record in &data.core_staff {
            let staff = build_core(record, data, rules)?;
            roster.members.push(staff.into());
        }

        for record in &data.flexible_staff {
            let (name, id) = split_name_id(&record.name_id);
            if id.is_empty() {
                warn!("Malformed flexible staff token '{}'", record.name_id);
            }
            let window = AvailabilityWindow::new(
                parse_date(&record.available_start)?,
                parse_date(&record.available_end)?,
            );
            roster.members.push(FlexibleStaff::new(id, name, window).into());
        }

        let known: HashSet<String> = roster.core().map(|s| s.id.clone()).collect();
        for record in &data.requested_work_days {
            let id = record_id(&record.name_id);
            if id.is_empty() {
                continue;
            }
            if !known.contains(&id) {
                warn!(
                    "Work request on {} names no core staff member '{}'",
                    record.date, record.name_id
                );
            }
            let date = parse_date(&record.date)?;
            if let Ok(kind) = record.shift.parse::<ShiftKind>() {
                roster.requests.push(StaffRequest::new(id, date, kind));
            }
        }

        info!(
            "Built roster: {} core, {} flexible",
            roster.core().count(),
            roster.flexible().count()
        );
        Ok(roster)
    }
}

fn build_core(
    record: &CoreStaffRecord,
    data: &SchedulingData,
    rules: &RuleSet,
) -> Result<CoreStaff> {
    let (name, id) = split_name_id(&record.name_id);
    let max_shifts = record
        .shift_count
        .filter(|&n| n > 0)
        .unwrap_or(rules.default_max_shifts);

    if id.is_empty() {
        warn!("Malformed core staff token '{}'", record.name_id);
        return Ok(CoreStaff::new(id, name).with_max_shifts(max_shifts));
    }

    let mut requests = Vec::new();
    // Every record reserves a shift, including ones with unknown labels.
    let mut reserved = 0;
    for wd in data
        .requested_work_days
        .iter()
        .filter(|wd| record_id(&wd.name_id) == id)
    {
        reserved += 1;
        let date = parse_date(&wd.date)?;
        match wd.shift.parse::<ShiftKind>() {
            Ok(kind) => requests.push(WorkRequest::new(date, kind)),
            Err(e) => warn!("Dropping work request for '{}' on {}: {}", id, wd.date, e),
        }
    }

    let mut days_off = Vec::new();
    for off in data
        .requested_days_off
        .iter()
        .filter(|off| record_id(&off.name_id) == id)
    {
        let date = parse_date(&off.date)?;
        if !days_off.contains(&date) {
            days_off.push(date);
        }
    }

    Ok(CoreStaff {
        requested_work_days: requests,
        requested_days_off: days_off,
        ..CoreStaff::new(id, name)
            .with_max_shifts(max_shifts)
            .with_assigned_count(reserved)
    })
}
