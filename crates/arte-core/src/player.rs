use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, PlayerId};

/// Role of a participant at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Runs the session: sees secret rolls and hidden clocks.
    GameMaster,
    /// Plays a single character.
    Player,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameMaster => write!(f, "GM"),
            Self::Player => write!(f, "Player"),
        }
    }
}

/// A participant in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Table role.
    pub role: Role,
    /// The character this player controls, if any.
    pub character: Option<CharacterId>,
    /// Timestamp when the player joined.
    pub joined_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with the given role and no character.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            role,
            character: None,
            joined_at: Utc::now(),
        }
    }

    /// Whether this player is the game master.
    pub fn is_gm(&self) -> bool {
        self.role == Role::GameMaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_no_character() {
        let p = Player::new("Sam", Role::Player);
        assert_eq!(p.name, "Sam");
        assert!(p.character.is_none());
        assert!(!p.is_gm());
    }

    #[test]
    fn gm_role() {
        let gm = Player::new("Alex", Role::GameMaster);
        assert!(gm.is_gm());
        assert_eq!(gm.role.to_string(), "GM");
    }
}
