use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, RollId};

/// Display color of a resolved die.
///
/// Colors carry table-facing semantics only; the numeric effect of a die
/// lives in its `successes` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieColor {
    /// A favorable result.
    Positive,
    /// An exceptional result worth celebrating at the table.
    Critical,
    /// An unfavorable result.
    Negative,
}

impl fmt::Display for DieColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Critical => write!(f, "critical"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Face icon shown on a resolved die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieFace {
    /// No effect.
    Blank,
    /// The die contributes a success.
    Success,
    /// The die removes a success.
    Fail,
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank"),
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Broad category of a roll, used for log display and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    /// An attribute-driven action roll.
    Action,
    /// A spellcasting roll.
    Spell,
    /// Plain dice with no rule table applied.
    Simple,
}

impl fmt::Display for RollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Spell => write!(f, "spell"),
            Self::Simple => write!(f, "simple"),
        }
    }
}

/// One die inside a persisted roll.
///
/// Simple dice carry only `sides` and `result`; rule-resolved dice also
/// carry the resolved successes, color, face, and tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledDie {
    /// Number of sides on the die.
    pub sides: u32,
    /// The face value rolled, in `1..=sides`.
    pub result: u32,
    /// Successes contributed by this die, if a rule table resolved it.
    pub successes: Option<i32>,
    /// Display color, if a rule table assigned one.
    pub color: Option<DieColor>,
    /// Face icon, if a rule table assigned one.
    pub face: Option<DieFace>,
    /// Human-readable explanation of the resolved outcome.
    pub tooltip: Option<String>,
}

impl RolledDie {
    /// A plain die with no resolved outcome.
    pub fn plain(sides: u32, result: u32) -> Self {
        Self {
            sides,
            result,
            successes: None,
            color: None,
            face: None,
            tooltip: None,
        }
    }
}

impl fmt::Display for RolledDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}:{}", self.sides, self.result)
    }
}

/// A persisted roll record.
///
/// Rolls are immutable once inserted into the store, except for `hints`,
/// which later mutations may append to (for example an offer to collect
/// resilience after a failed action roll).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Unique identifier for this roll.
    pub id: RollId,
    /// Optional short description ("Ambush the patrol").
    pub label: Option<String>,
    /// Optional category of the roll.
    pub kind: Option<RollKind>,
    /// The character the roll was made for, if any.
    pub character: Option<CharacterId>,
    /// Secret rolls are visible only to the game master and the owner.
    pub secret: bool,
    /// The dice in the order they were rolled.
    pub dice: Vec<RolledDie>,
    /// Follow-up annotations appended after the roll resolved.
    pub hints: Vec<String>,
    /// Timestamp of the roll.
    pub rolled_at: DateTime<Utc>,
}

impl DiceRoll {
    /// Create a roll record from resolved dice.
    pub fn new(dice: Vec<RolledDie>) -> Self {
        Self {
            id: RollId::new(),
            label: None,
            kind: None,
            character: None,
            secret: false,
            dice,
            hints: Vec::new(),
            rolled_at: Utc::now(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the roll kind.
    pub fn with_kind(mut self, kind: RollKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach the roll to a character.
    pub fn for_character(mut self, character: CharacterId) -> Self {
        self.character = Some(character);
        self
    }

    /// Mark the roll secret.
    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    /// Total successes of the roll: the sum of per-die successes, with
    /// dice that resolved to no value counting as 0.
    pub fn total_successes(&self) -> i32 {
        self.dice.iter().map(|d| d.successes.unwrap_or(0)).sum()
    }

    /// Number of dice in the roll.
    pub fn die_count(&self) -> usize {
        self.dice.len()
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.label, self.kind) {
            (Some(label), _) => write!(f, "{label}")?,
            (None, Some(kind)) => write!(f, "{kind} roll")?,
            (None, None) => write!(f, "roll")?,
        }
        if self.secret {
            write!(f, " (secret)")?;
        }
        write!(f, ":")?;
        for die in &self.dice {
            write!(f, " {}", die.result)?;
        }
        write!(f, " => {}", self.total_successes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(sides: u32, result: u32, successes: i32) -> RolledDie {
        RolledDie {
            successes: Some(successes),
            ..RolledDie::plain(sides, result)
        }
    }

    #[test]
    fn total_counts_missing_successes_as_zero() {
        let roll = DiceRoll::new(vec![
            resolved(12, 12, 2),
            RolledDie::plain(6, 4),
            resolved(4, 4, -1),
        ]);
        assert_eq!(roll.total_successes(), 1);
        assert_eq!(roll.die_count(), 3);
    }

    #[test]
    fn empty_roll_totals_zero() {
        let roll = DiceRoll::new(Vec::new());
        assert_eq!(roll.total_successes(), 0);
    }

    #[test]
    fn builder_sets_metadata() {
        let id = CharacterId::new();
        let roll = DiceRoll::new(vec![resolved(12, 9, 1)])
            .with_label("Pick the lock")
            .with_kind(RollKind::Action)
            .for_character(id)
            .secret(true);
        assert_eq!(roll.label.as_deref(), Some("Pick the lock"));
        assert_eq!(roll.kind, Some(RollKind::Action));
        assert_eq!(roll.character, Some(id));
        assert!(roll.secret);
    }

    #[test]
    fn display_shows_results_and_total() {
        let roll = DiceRoll::new(vec![resolved(12, 12, 2), resolved(12, 3, 0)])
            .with_label("Leap the chasm");
        assert_eq!(roll.to_string(), "Leap the chasm: 12 3 => 2");
    }

    #[test]
    fn display_falls_back_to_kind() {
        let roll = DiceRoll::new(vec![resolved(12, 9, 1)])
            .with_kind(RollKind::Spell)
            .secret(true);
        assert_eq!(roll.to_string(), "spell roll (secret): 9 => 1");
    }

    #[test]
    fn serde_round_trip() {
        let roll = DiceRoll::new(vec![RolledDie {
            sides: 4,
            result: 4,
            successes: Some(-1),
            color: Some(DieColor::Negative),
            face: Some(DieFace::Fail),
            tooltip: Some("A snag bites".to_string()),
        }])
        .with_kind(RollKind::Action);
        let json = serde_json::to_string(&roll).unwrap();
        let back: DiceRoll = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dice, roll.dice);
        assert_eq!(back.total_successes(), -1);
    }
}
