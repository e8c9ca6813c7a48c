//! Rostering domain models.
//!
//! Provides the data types for a scheduling run: the slots to be staffed,
//! the staff who can fill them, the ledger of commitments, and the
//! month-relative calendar periods the labor rules are expressed in.
//!
//! # Domain Mappings
//!
//! | shift-roster | Hospital | Retail | Call center |
//! |--------------|----------|--------|-------------|
//! | ShiftSlot | Shift | Shift | Seat block |
//! | CoreStaff | Staff PA / nurse | Full-time associate | Agent |
//! | FlexibleStaff | Per-diem | Temp | Contractor |
//! | Schedule | Monthly roster | Rota | Seat plan |

pub mod calendar;
mod schedule;
mod shift;
mod staff;

pub use schedule::{Assignment, Phase, Schedule};
pub use shift::{ShiftKind, ShiftSlot};
pub use staff::{
    AvailabilityWindow, CoreStaff, FlexibleStaff, StaffMember, StaffTally, WorkRequest,
};
