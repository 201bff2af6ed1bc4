use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, PlayerId};
use crate::track::Track;

/// Default maximum for the stress track.
pub const STRESS_MAX: i32 = 6;

/// Default maximum for the resilience track.
pub const RESILIENCE_MAX: i32 = 10;

/// Lowest rateable attribute level.
pub const ATTRIBUTE_MIN: u32 = 1;

/// Highest rateable attribute level.
pub const ATTRIBUTE_MAX: u32 = 5;

/// The five rated attributes of a character sheet.
///
/// Each attribute is rated 1-5 and sets the action-die pool for rolls
/// made with it. [`Attribute::Arte`] is the casting attribute used for
/// spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Raw physical power and endurance.
    Strength,
    /// Precision, agility, and sleight of hand.
    Finesse,
    /// Perception, memory, and quick thinking.
    Wits,
    /// Charm, intimidation, and force of personality.
    Presence,
    /// Affinity with the arte, used for spellcasting.
    Arte,
}

impl Attribute {
    /// All attributes in sheet order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Strength,
            Self::Finesse,
            Self::Wits,
            Self::Presence,
            Self::Arte,
        ]
    }

    /// Parse an attribute from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Some(Self::Strength),
            "finesse" | "fin" => Some(Self::Finesse),
            "wits" | "wit" => Some(Self::Wits),
            "presence" | "pre" => Some(Self::Presence),
            "arte" => Some(Self::Arte),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strength => write!(f, "Strength"),
            Self::Finesse => write!(f, "Finesse"),
            Self::Wits => write!(f, "Wits"),
            Self::Presence => write!(f, "Presence"),
            Self::Arte => write!(f, "Arte"),
        }
    }
}

/// A character sheet document.
///
/// Attribute levels are clamped to 1-5 on write; reading an attribute
/// that was never set returns the floor level of 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier for this character.
    pub id: CharacterId,
    /// Display name of the character.
    pub name: String,
    /// The player controlling this character, if assigned.
    pub player: Option<PlayerId>,
    /// Attribute levels, keyed by attribute.
    attributes: HashMap<Attribute, u32>,
    /// Spendable resource used to buy boost dice and soften failures.
    pub resilience: Track,
    /// Accumulated strain from spellcasting and hard scenes.
    pub stress: Track,
    /// Active conditions (free text, e.g. "winded", "cursed").
    pub conditions: Vec<String>,
    /// Free-text notes.
    pub notes: String,
    /// Timestamp when the character was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the character was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Create a new character with every attribute at level 1 and empty
    /// stress and resilience tracks.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        let attributes = Attribute::all().iter().map(|a| (*a, ATTRIBUTE_MIN)).collect();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            player: None,
            attributes,
            resilience: Track::empty("Resilience", RESILIENCE_MAX),
            stress: Track::empty("Stress", STRESS_MAX),
            conditions: Vec::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Get an attribute level (1-5). Unset attributes read as 1.
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        self.attributes
            .get(&attribute)
            .copied()
            .unwrap_or(ATTRIBUTE_MIN)
    }

    /// Set an attribute level, clamping to 1-5. Returns the stored value.
    pub fn set_attribute(&mut self, attribute: Attribute, level: u32) -> u32 {
        let clamped = level.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
        self.attributes.insert(attribute, clamped);
        self.touch();
        clamped
    }

    /// All attribute levels in sheet order.
    pub fn attribute_levels(&self) -> Vec<(Attribute, u32)> {
        Attribute::all()
            .iter()
            .map(|a| (*a, self.attribute(*a)))
            .collect()
    }

    /// Adjust resilience by a delta, clamped to the track bounds.
    /// Returns the new value.
    pub fn adjust_resilience(&mut self, delta: i32) -> i32 {
        let value = self.resilience.adjust(delta);
        self.touch();
        value
    }

    /// Adjust stress by a delta, clamped to the track bounds.
    /// Returns the new value.
    pub fn adjust_stress(&mut self, delta: i32) -> i32 {
        let value = self.stress.adjust(delta);
        self.touch();
        value
    }

    /// Assign or clear the controlling player.
    pub fn assign_player(&mut self, player: Option<PlayerId>) {
        self.player = player;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
