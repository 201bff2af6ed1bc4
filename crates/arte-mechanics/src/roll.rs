//! Building roll requests and performing them.

use arte_core::id::CharacterId;
use arte_core::roll::{DiceRoll, RollKind, RolledDie};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{MechError, MechResult};
use crate::rules::{RuleTable, preset};

/// One group of identical dice in a roll request.
#[derive(Debug, Clone)]
pub struct DieRequest {
    /// How many dice to roll.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
    /// Rule table applied to each die, or `None` for plain dice that
    /// store only their raw result.
    pub rules: Option<RuleTable>,
}

impl DieRequest {
    /// `count` action dice (d12, action table).
    pub fn action(count: u32) -> Self {
        Self {
            count,
            sides: preset::ACTION_DIE_SIDES,
            rules: Some(preset::action()),
        }
    }

    /// `count` boost dice (d4, boost table).
    pub fn boost(count: u32) -> Self {
        Self {
            count,
            sides: preset::BOOST_DIE_SIDES,
            rules: Some(preset::boost()),
        }
    }

    /// `count` snag dice (d4, snag table).
    pub fn snag(count: u32) -> Self {
        Self {
            count,
            sides: preset::SNAG_DIE_SIDES,
            rules: Some(preset::snag()),
        }
    }

    /// `count` plain dice with no rule table.
    pub fn plain(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            rules: None,
        }
    }
}

/// A complete roll request: metadata plus the die groups to roll.
#[derive(Debug, Clone, Default)]
pub struct RollRequest {
    /// Optional short description for the log.
    pub label: Option<String>,
    /// Optional roll category.
    pub kind: Option<RollKind>,
    /// The character rolling, if any.
    pub character: Option<CharacterId>,
    /// Whether the resulting roll is secret.
    pub secret: bool,
    /// Die groups, rolled in order.
    pub dice: Vec<DieRequest>,
}

impl RollRequest {
    /// An empty request.
    pub fn new() -> Self {
        Self::default()
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

    /// Mark the resulting roll secret.
    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    /// Append a die group.
    pub fn add(mut self, group: DieRequest) -> Self {
        self.dice.push(group);
        self
    }

    /// Total number of dice across all groups.
    pub fn die_count(&self) -> u32 {
        self.dice.iter().map(|g| g.count).sum()
    }
}

/// Roll every die in the request and assemble a persistable record.
///
/// Each die is an independent uniform draw in `1..=sides`. Groups with a
/// rule table get their outcome resolved onto the die; plain groups
/// store the raw result only. The returned record has not touched any
/// store and carries no side effects.
pub fn perform_roll(request: &RollRequest, rng: &mut StdRng) -> MechResult<DiceRoll> {
    let mut dice = Vec::with_capacity(request.die_count() as usize);
    for group in &request.dice {
        if group.sides == 0 {
            return Err(MechError::InvalidSides(0));
        }
        for _ in 0..group.count {
            let result = rng.random_range(1..=group.sides);
            let die = match &group.rules {
                Some(table) => {
                    let outcome = table.resolve(result);
                    RolledDie {
                        sides: group.sides,
                        result,
                        successes: Some(outcome.successes),
                        color: outcome.color,
                        face: outcome.face,
                        tooltip: Some(outcome.tooltip.clone()),
                    }
                }
                None => RolledDie::plain(group.sides, result),
            };
            dice.push(die);
        }
    }

    let mut roll = DiceRoll::new(dice);
    roll.label = request.label.clone();
    roll.kind = request.kind;
    roll.character = request.character;
    roll.secret = request.secret;
    debug!(
        dice = roll.die_count(),
        total = roll.total_successes(),
        "performed roll"
    );
    Ok(roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rolled_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let request = RollRequest::new()
            .add(DieRequest::action(20))
            .add(DieRequest::boost(10));
        let roll = perform_roll(&request, &mut rng).unwrap();
        assert_eq!(roll.die_count(), 30);
        for die in &roll.dice[..20] {
            assert!((1..=12).contains(&die.result));
            assert_eq!(die.sides, 12);
        }
        for die in &roll.dice[20..] {
            assert!((1..=4).contains(&die.result));
            assert_eq!(die.sides, 4);
        }
    }

    #[test]
    fn rule_groups_resolve_plain_groups_do_not() {
        let mut rng = StdRng::seed_from_u64(7);
        let request = RollRequest::new()
            .add(DieRequest::action(3))
            .add(DieRequest::plain(2, 6));
        let roll = perform_roll(&request, &mut rng).unwrap();
        for die in &roll.dice[..3] {
            assert!(die.successes.is_some());
            assert!(die.tooltip.is_some());
        }
        for die in &roll.dice[3..] {
            assert!(die.successes.is_none());
            assert!(die.color.is_none());
            assert!(die.tooltip.is_none());
        }
    }

    #[test]
    fn resolved_successes_match_the_table() {
        let mut rng = StdRng::seed_from_u64(123);
        let request = RollRequest::new().add(DieRequest::action(50));
        let roll = perform_roll(&request, &mut rng).unwrap();
        for die in &roll.dice {
            let expected = match die.result {
                12 => 2,
                9..=11 => 1,
                _ => 0,
            };
            assert_eq!(die.successes, Some(expected));
        }
        assert_eq!(
            roll.total_successes(),
            roll.dice.iter().map(|d| d.successes.unwrap()).sum::<i32>()
        );
    }

    #[test]
    fn empty_request_yields_empty_roll() {
        let mut rng = StdRng::seed_from_u64(1);
        let roll = perform_roll(&RollRequest::new(), &mut rng).unwrap();
        assert_eq!(roll.die_count(), 0);
        assert_eq!(roll.total_successes(), 0);

        let zero_count = RollRequest::new().add(DieRequest::plain(0, 6));
        let roll = perform_roll(&zero_count, &mut rng).unwrap();
        assert_eq!(roll.die_count(), 0);
    }

    #[test]
    fn zero_sided_dice_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let request = RollRequest::new().add(DieRequest::plain(1, 0));
        assert!(matches!(
            perform_roll(&request, &mut rng),
            Err(MechError::InvalidSides(0))
        ));
    }

    #[test]
    fn same_seed_same_roll() {
        let request = RollRequest::new()
            .add(DieRequest::action(5))
            .add(DieRequest::snag(2));
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        let r1 = perform_roll(&request, &mut rng1).unwrap();
        let r2 = perform_roll(&request, &mut rng2).unwrap();
        let values1: Vec<u32> = r1.dice.iter().map(|d| d.result).collect();
        let values2: Vec<u32> = r2.dice.iter().map(|d| d.result).collect();
        assert_eq!(values1, values2);
    }

    #[test]
    fn request_metadata_lands_on_the_record() {
        let mut rng = StdRng::seed_from_u64(4);
        let id = CharacterId::new();
        let request = RollRequest::new()
            .with_label("Duel at dawn")
            .with_kind(RollKind::Action)
            .for_character(id)
            .secret(true)
            .add(DieRequest::action(1));
        let roll = perform_roll(&request, &mut rng).unwrap();
        assert_eq!(roll.label.as_deref(), Some("Duel at dawn"));
        assert_eq!(roll.kind, Some(RollKind::Action));
        assert_eq!(roll.character, Some(id));
        assert!(roll.secret);
    }
}
