//! Session orchestration for Game of Arte tables.
//!
//! This crate ties the document store and the dice mechanics together
//! into a playable session: fuzzy name resolution for characters and
//! spells, a spellbook, a visibility-filtered roll log, and
//! [`GameSession`], a line-oriented command processor that drives it
//! all from plain text input.

/// Session configuration (RNG seed, fuzzy matching threshold).
pub mod config;
/// Session-level error type.
pub mod error;
/// Roll-log visibility and export.
pub mod log;
/// Fuzzy name resolution for characters and spells.
pub mod names;
/// The interactive session and its command processor.
pub mod session;
/// Spell definitions and the spellbook.
pub mod spells;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use log::Viewer;
pub use session::{CONSOLATION_HINT, GameSession, RollOptions, RollReport};
pub use spells::{Spell, Spellbook};
