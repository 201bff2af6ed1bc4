use crate::id::{CharacterId, ClockId, PlayerId, RollId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a session store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested character ID does not exist in the store.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// The requested clock ID does not exist in the store.
    #[error("clock not found: {0}")]
    ClockNotFound(ClockId),

    /// The requested player ID does not exist in the store.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The requested dice roll ID does not exist in the store.
    #[error("roll not found: {0}")]
    RollNotFound(RollId),

    /// A document with the same name already exists.
    #[error("name already in use: \"{0}\"")]
    DuplicateName(String),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
