//! Die-rule tables and the first-match resolver.
//!
//! A [`RuleTable`] maps a die result to a [`RuleOutcome`] by scanning its
//! ranged rules in order and taking the first match. Every table carries
//! a structural fallback outcome, so resolution is total by construction:
//! there is no way to build a table that leaves some die result
//! unmatched. Tables are plain data and serialize with the rest of the
//! document model.

pub mod preset;

use arte_core::roll::{DieColor, DieFace};
use serde::{Deserialize, Serialize};

/// The outcome a rule assigns to a die result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Successes this die contributes. Negative values remove successes.
    pub successes: i32,
    /// Display color for the die, if any.
    pub color: Option<DieColor>,
    /// Face icon for the die, if any.
    pub face: Option<DieFace>,
    /// Human-readable explanation shown with the die.
    pub tooltip: String,
}

impl RuleOutcome {
    /// An outcome with the given successes and tooltip and no display
    /// hints.
    pub fn new(successes: i32, tooltip: impl Into<String>) -> Self {
        Self {
            successes,
            color: None,
            face: None,
            tooltip: tooltip.into(),
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: DieColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the face icon.
    pub fn with_face(mut self, face: DieFace) -> Self {
        self.face = Some(face);
        self
    }
}

/// A rule matching a bounded range of die results.
///
/// Both bounds are optional and checked independently: an absent `min`
/// matches any value from below, an absent `max` from above. A rule with
/// neither bound matches every value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangedRule {
    /// Inclusive lower bound on the die result.
    pub min: Option<u32>,
    /// Inclusive upper bound on the die result.
    pub max: Option<u32>,
    /// The outcome assigned when this rule matches.
    pub outcome: RuleOutcome,
}

impl RangedRule {
    /// A rule matching results at or above `min`.
    pub fn at_least(min: u32, outcome: RuleOutcome) -> Self {
        Self {
            min: Some(min),
            max: None,
            outcome,
        }
    }

    /// A rule matching results between `min` and `max`, inclusive.
    pub fn between(min: u32, max: u32, outcome: RuleOutcome) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            outcome,
        }
    }

    /// Whether this rule matches the given die result.
    pub fn matches(&self, value: u32) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// An ordered rule table with a structural fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Rules scanned in order; the first match wins.
    pub rules: Vec<RangedRule>,
    /// Outcome for results no rule matches.
    pub fallback: RuleOutcome,
}

impl RuleTable {
    /// A table with no ranged rules: every result takes the fallback.
    pub fn new(fallback: RuleOutcome) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn with_rule(mut self, rule: RangedRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Resolve a die result to its outcome.
    ///
    /// Scans the rules in order and returns the first match, or the
    /// fallback when nothing matches. Pure and deterministic: the same
    /// value always resolves to the same outcome.
    pub fn resolve(&self, value: u32) -> &RuleOutcome {
        self.rules
            .iter()
            .find(|rule| rule.matches(value))
            .map(|rule| &rule.outcome)
            .unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome(successes: i32) -> RuleOutcome {
        RuleOutcome::new(successes, format!("worth {successes}"))
    }

    #[test]
    fn bounds_are_inclusive_and_independent() {
        let at_least = RangedRule::at_least(9, outcome(1));
        assert!(!at_least.matches(8));
        assert!(at_least.matches(9));
        assert!(at_least.matches(12));

        let capped = RangedRule {
            min: None,
            max: Some(3),
            outcome: outcome(0),
        };
        assert!(capped.matches(1));
        assert!(capped.matches(3));
        assert!(!capped.matches(4));

        let unbounded = RangedRule {
            min: None,
            max: None,
            outcome: outcome(0),
        };
        assert!(unbounded.matches(1));
        assert!(unbounded.matches(9999));
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        let table = RuleTable::new(outcome(0))
            .with_rule(RangedRule::at_least(10, outcome(2)))
            .with_rule(RangedRule::at_least(5, outcome(1)));
        // 10 matches both rules; the earlier one decides
        assert_eq!(table.resolve(10).successes, 2);
        assert_eq!(table.resolve(7).successes, 1);
        assert_eq!(table.resolve(4).successes, 0);
    }

    #[test]
    fn rule_order_changes_the_result() {
        let generous_first = RuleTable::new(outcome(0))
            .with_rule(RangedRule::at_least(5, outcome(1)))
            .with_rule(RangedRule::at_least(10, outcome(2)));
        // the broader rule shadows the narrower one
        assert_eq!(generous_first.resolve(12).successes, 1);
    }

    #[test]
    fn fallback_catches_everything() {
        let table = RuleTable::new(outcome(-7));
        assert_eq!(table.resolve(1).successes, -7);
        assert_eq!(table.resolve(u32::MAX).successes, -7);
    }

    #[test]
    fn serde_round_trip() {
        let table = RuleTable::new(outcome(0))
            .with_rule(RangedRule::between(4, 4, outcome(1)));
        let json = serde_json::to_string(&table).unwrap();
        let back: RuleTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    prop_compose! {
        fn arb_rule()(
            min in proptest::option::of(0u32..=15),
            max in proptest::option::of(0u32..=15),
            successes in -2i32..=2,
        ) -> RangedRule {
            RangedRule { min, max, outcome: outcome(successes) }
        }
    }

    proptest! {
        /// Resolution agrees with a plain first-match scan and always
        /// produces exactly one outcome.
        #[test]
        fn resolve_is_first_match_total(
            rules in proptest::collection::vec(arb_rule(), 0..6),
            value in 1u32..=20,
        ) {
            let table = RuleTable { rules: rules.clone(), fallback: outcome(0) };
            let expected = rules
                .iter()
                .find(|r| r.matches(value))
                .map(|r| &r.outcome)
                .unwrap_or(&table.fallback);
            prop_assert_eq!(table.resolve(value), expected);
        }

        /// Resolving the same value twice yields the identical outcome.
        #[test]
        fn resolve_is_idempotent(
            rules in proptest::collection::vec(arb_rule(), 0..6),
            value in 1u32..=20,
        ) {
            let table = RuleTable { rules, fallback: outcome(0) };
            prop_assert_eq!(table.resolve(value), table.resolve(value));
        }
    }
}
