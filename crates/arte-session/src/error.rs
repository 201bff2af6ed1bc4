//! Error types for the session layer.

use thiserror::Error;

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while running a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A character name that could not be resolved, with a close match
    /// when one exists.
    #[error("no character named '{name}'{}", suggestion_text(.suggestion))]
    UnknownCharacter {
        /// The name as the user typed it.
        name: String,
        /// The closest known name, if any came near.
        suggestion: Option<String>,
    },

    /// A spell name that could not be resolved.
    #[error("no spell named '{name}'{}", suggestion_text(.suggestion))]
    UnknownSpell {
        /// The name as the user typed it.
        name: String,
        /// The closest known spell, if any came near.
        suggestion: Option<String>,
    },

    /// A clock label that could not be resolved.
    #[error("no clock labelled '{0}'")]
    UnknownClock(String),

    /// A player name that could not be resolved.
    #[error("no player named '{0}'")]
    UnknownPlayer(String),

    /// Malformed command input.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Unrecognized command word.
    #[error("unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    /// Document store error.
    #[error(transparent)]
    Core(#[from] arte_core::CoreError),

    /// Dice mechanics error.
    #[error(transparent)]
    Mech(#[from] arte_mechanics::MechError),
}

fn suggestion_text(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!("; did you mean '{s}'?"),
        None => String::new(),
    }
}
