//! Attribute level to action-dice mapping.

use crate::error::{MechError, MechResult};

/// Number of action dice granted by an attribute level.
///
/// The mapping is fixed game data: 1→1, 2→2, 3→4, 4→7, 5→12. Stored
/// levels are clamped to 1-5 on write, so an out-of-range level here is
/// a bug upstream and fails fast rather than being clamped again.
pub fn action_dice_for_level(level: u32) -> MechResult<u32> {
    match level {
        1 => Ok(1),
        2 => Ok(2),
        3 => Ok(4),
        4 => Ok(7),
        5 => Ok(12),
        other => Err(MechError::InvalidAttributeLevel(other)),
    }
}
