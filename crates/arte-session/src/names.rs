//! Name resolution with fuzzy matching.
//!
//! Exact (case-insensitive) matches always win. Below that, the closest
//! Jaro-Winkler match resolves automatically when it clears the session's
//! fuzzy threshold; a weaker near-miss becomes a "did you mean"
//! suggestion in the error instead.

use arte_core::character::Character;
use arte_core::store::SessionStore;
use strsim::jaro_winkler;

use crate::error::{SessionError, SessionResult};
use crate::spells::{Spell, Spellbook};

/// Minimum similarity for a name to be offered as a suggestion.
const SUGGEST_THRESHOLD: f64 = 0.6;

/// Best fuzzy match for `input` among `candidates`, with its score.
pub fn best_match<'a, I>(input: &str, candidates: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.to_lowercase();
    candidates
        .into_iter()
        .map(|name| (name, jaro_winkler(&needle, &name.to_lowercase())))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Resolve a character name against the store.
pub fn resolve_character<'a>(
    store: &'a SessionStore,
    input: &str,
    threshold: f64,
) -> SessionResult<&'a Character> {
    if let Some(character) = store.find_character(input) {
        return Ok(character);
    }
    let names = store.character_names();
    if let Some((name, score)) = best_match(input, names.iter().copied()) {
        if score >= threshold {
            if let Some(character) = store.find_character(name) {
                return Ok(character);
            }
        }
        if score >= SUGGEST_THRESHOLD {
            return Err(SessionError::UnknownCharacter {
                name: input.to_string(),
                suggestion: Some(name.to_string()),
            });
        }
    }
    Err(SessionError::UnknownCharacter {
        name: input.to_string(),
        suggestion: None,
    })
}

/// Resolve a spell name against a spellbook.
pub fn resolve_spell<'a>(
    book: &'a Spellbook,
    input: &str,
    threshold: f64,
) -> SessionResult<&'a Spell> {
    if let Some(spell) = book.find(input) {
        return Ok(spell);
    }
    let names = book.names();
    if let Some((name, score)) = best_match(input, names.iter().copied()) {
        if score >= threshold {
            if let Some(spell) = book.find(name) {
                return Ok(spell);
            }
        }
        if score >= SUGGEST_THRESHOLD {
            return Err(SessionError::UnknownSpell {
                name: input.to_string(),
                suggestion: Some(name.to_string()),
            });
        }
    }
    Err(SessionError::UnknownSpell {
        name: input.to_string(),
        suggestion: None,
    })
}
