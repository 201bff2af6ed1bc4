//! Error types for the mechanics layer.

use thiserror::Error;

/// Result alias for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// Errors from rolling and resolving dice.
#[derive(Debug, Error)]
pub enum MechError {
    /// An attribute level outside the rateable 1-5 range reached the
    /// dice mapping. Stored levels are clamped on write, so this means
    /// the caller passed corrupt data.
    #[error("attribute level {0} is outside the rateable range 1-5")]
    InvalidAttributeLevel(u32),

    /// A roll requested dice with an impossible side count.
    #[error("cannot roll a die with {0} sides")]
    InvalidSides(u32),
}
