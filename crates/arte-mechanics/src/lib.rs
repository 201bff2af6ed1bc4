//! Game mechanics for Game of Arte: rule tables, roll resolution, and
//! the attribute dice mapping.
//!
//! The heart of the crate is [`rules::RuleTable`], a declarative,
//! first-match-wins mapping from die results to outcomes, with the three
//! fixed tables of the game in [`rules::preset`]. [`roll::perform_roll`]
//! turns a [`roll::RollRequest`] into a persistable `DiceRoll` record,
//! and [`attribute::action_dice_for_level`] maps attribute levels to
//! action-die counts.

pub mod attribute;
pub mod error;
pub mod roll;
pub mod rules;

pub use attribute::action_dice_for_level;
pub use error::{MechError, MechResult};
pub use roll::{DieRequest, RollRequest, perform_roll};
pub use rules::{RangedRule, RuleOutcome, RuleTable};
