//! Input validation for scheduling runs.
//!
//! Checks structural integrity of the slot list and roster before the
//! engine runs. Detects:
//! - Duplicate slot IDs (fatal: the output must list every slot exactly once)
//! - Duplicate staff IDs
//! - Staff without an identifier (malformed `Name(ID)` tokens)
//! - Inverted flexible availability windows
//!
//! Only fatal issues stop a run. The rest are reported so callers can fix
//! their upstream data, and the engine logs them as warnings.

use std::collections::HashSet;

use crate::models::{ShiftSlot, StaffMember};
use crate::roster::Roster;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two slots share the same ID.
    DuplicateSlotId,
    /// Two staff members share the same ID.
    DuplicateStaffId,
    /// A staff member has no identifier.
    EmptyIdentifier,
    /// A flexible availability window ends before it starts.
    EmptyAvailabilityWindow,
}

impl ValidationErrorKind {
    /// Whether this kind of issue must abort the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ValidationErrorKind::DuplicateSlotId)
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this issue must abort the run.
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Validates the input for a scheduling run.
///
/// Checks:
/// 1. No duplicate slot IDs
/// 2. No duplicate staff IDs (among identified staff)
/// 3. Every staff member has an identifier
/// 4. Every flexible availability window is non-empty
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(slots: &[ShiftSlot], roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();

    let mut slot_ids = HashSet::new();
    for slot in slots {
        if !slot_ids.insert(slot.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlotId,
                format!("Duplicate slot ID: {}", slot.id),
            ));
        }
    }

    let mut staff_ids = HashSet::new();
    for (index, member) in roster.members.iter().enumerate() {
        if member.id().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyIdentifier,
                format!("Staff member #{} has no identifier", index + 1),
            ));
            continue;
        }

        if !staff_ids.insert(member.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateStaffId,
                format!("Duplicate staff ID: {}", member.id()),
            ));
        }

        if let StaffMember::Flexible(flex) = member {
            if flex.availability.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyAvailabilityWindow,
                    format!("Staff '{}' availability window ends before it starts", flex.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
