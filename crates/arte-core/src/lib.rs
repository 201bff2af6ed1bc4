//! Core document model for Game of Arte sessions.
//!
//! This crate defines the documents a session is made of (characters,
//! clocks, players, and dice-roll records) together with typed ids and
//! an indexed in-memory [`SessionStore`] that holds them. Game rules
//! live in `arte-mechanics`; orchestration lives in `arte-session`.

/// Character sheets and attributes.
pub mod character;
/// Progress clocks.
pub mod clock;
/// Error types shared across the document model.
pub mod error;
/// Typed UUID ids for every document kind.
pub mod id;
/// Players and table roles.
pub mod player;
/// Persisted roll records and their display enums.
pub mod roll;
/// The in-memory session store and its snapshots.
pub mod store;
/// Clamped resource tracks (stress, resilience).
pub mod track;

pub use character::{Attribute, Character, ATTRIBUTE_MAX, ATTRIBUTE_MIN, RESILIENCE_MAX, STRESS_MAX};
pub use clock::Clock;
pub use error::{CoreError, CoreResult};
pub use id::{CharacterId, ClockId, PlayerId, RollId};
pub use player::{Player, Role};
pub use roll::{DiceRoll, DieColor, DieFace, RollKind, RolledDie};
pub use store::{SessionStore, SessionMeta, Snapshot};
pub use track::Track;
