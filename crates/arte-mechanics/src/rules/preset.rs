//! The fixed rule tables of Game of Arte.
//!
//! Three die categories exist at the table: d12 action dice, d4 boost
//! dice, and d4 snag dice. Their tables are game data, not configuration;
//! these constructors return fresh owned copies.

use arte_core::roll::{DieColor, DieFace};

use super::{RangedRule, RuleOutcome, RuleTable};

/// Sides on an action die.
pub const ACTION_DIE_SIDES: u32 = 12;

/// Sides on a boost die.
pub const BOOST_DIE_SIDES: u32 = 4;

/// Sides on a snag die.
pub const SNAG_DIE_SIDES: u32 = 4;

/// The action die table (d12).
///
/// A 12 is a critical worth two successes, 9 through 11 is a plain
/// success, anything lower is a miss.
pub fn action() -> RuleTable {
    RuleTable::new(RuleOutcome::new(0, "A miss."))
        .with_rule(RangedRule::at_least(
            12,
            RuleOutcome::new(2, "A critical! Two successes.").with_color(DieColor::Critical),
        ))
        .with_rule(RangedRule::at_least(
            9,
            RuleOutcome::new(1, "A success.").with_color(DieColor::Positive),
        ))
}

/// The boost die table (d4).
///
/// Only a 4 lands; everything else is blank. Boost dice never subtract.
pub fn boost() -> RuleTable {
    RuleTable::new(
        RuleOutcome::new(0, "The boost die is blank.")
            .with_color(DieColor::Positive)
            .with_face(DieFace::Blank),
    )
    .with_rule(RangedRule::at_least(
        4,
        RuleOutcome::new(1, "The boost die lands: one extra success.")
            .with_color(DieColor::Positive)
            .with_face(DieFace::Success),
    ))
}

/// The snag die table (d4).
///
/// A 4 removes a success; everything else is blank.
pub fn snag() -> RuleTable {
    RuleTable::new(
        RuleOutcome::new(0, "The snag die is blank.")
            .with_color(DieColor::Negative)
            .with_face(DieFace::Blank),
    )
    .with_rule(RangedRule::at_least(
        4,
        RuleOutcome::new(-1, "The snag die bites: one success removed.")
            .with_color(DieColor::Negative)
            .with_face(DieFace::Fail),
    ))
}
