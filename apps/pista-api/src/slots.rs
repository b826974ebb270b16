//! Shared slot-shape validation for courts and reservations.
//!
//! A court is either schedule-based (bookings carry a start/end time pair)
//! or capacity-based (bookings carry a position in a list). The mode is
//! decided entirely by the sport: the climbing wall is the one capacity-based
//! sport, everything else runs on a schedule. Court creation/edit and
//! reservation admission both validate against the same rule.

/// Sport id of the climbing wall, the only capacity-based court type.
pub const CLIMBING_WALL_SPORT_ID: i64 = 5;

/// Booking mode of a court, derived from its sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourtMode {
    /// Bookings are a start/end time pair.
    Schedule,
    /// Bookings are a numbered position in a capacity list.
    CapacityList,
}

impl CourtMode {
    pub fn for_sport(sport_id: i64) -> Self {
        if sport_id == CLIMBING_WALL_SPORT_ID {
            CourtMode::CapacityList
        } else {
            CourtMode::Schedule
        }
    }
}

/// The validated slot fields of a court or reservation: exactly one of a
/// schedule pair or a list/capacity number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotShape {
    Schedule { start: String, end: String },
    Slot(i32),
}

/// Which shape the court's mode demands, when the submitted fields don't fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShapeError {
    /// Capacity-mode court: a slot number is required and no schedule allowed.
    NeedsSlot,
    /// Schedule-mode court: both times are required and no slot number allowed.
    NeedsSchedule,
}

/// Validate the mutually exclusive slot fields against the sport's mode.
///
/// Both times absent plus a slot number is the only valid capacity shape;
/// both times present without a slot number is the only valid schedule shape.
pub fn validate_slot_shape(
    sport_id: i64,
    start: Option<String>,
    end: Option<String>,
    slot: Option<i32>,
) -> Result<SlotShape, SlotShapeError> {
    match CourtMode::for_sport(sport_id) {
        CourtMode::CapacityList => match (slot, start, end) {
            (Some(number), None, None) => Ok(SlotShape::Slot(number)),
            _ => Err(SlotShapeError::NeedsSlot),
        },
        CourtMode::Schedule => match (slot, start, end) {
            (None, Some(start), Some(end)) => Ok(SlotShape::Schedule { start, end }),
            _ => Err(SlotShapeError::NeedsSchedule),
        },
    }
}
