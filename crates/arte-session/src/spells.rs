//! The spellbook: spells castable with the Arte attribute.
//!
//! Spell data is fixed, like the dice tables. Casting rolls the caster's
//! Arte dice and then applies the spell's stress cost as a follow-up
//! mutation.

use std::fmt;

/// A castable spell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spell {
    /// Spell name.
    pub name: String,
    /// Stress the caster takes when the spell is cast, success or not.
    pub stress_cost: i32,
    /// One-line description for the table.
    pub description: String,
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (stress {}): {}",
            self.name, self.stress_cost, self.description
        )
    }
}

/// A collection of spells, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct Spellbook {
    spells: Vec<Spell>,
}

impl Spellbook {
    /// An empty spellbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spell.
    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.push(spell);
        self
    }

    /// Find a spell by exact name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Spell> {
        let needle = name.to_lowercase();
        self.spells.iter().find(|s| s.name.to_lowercase() == needle)
    }

    /// All spells in book order.
    pub fn all(&self) -> &[Spell] {
        &self.spells
    }

    /// All spell names, for fuzzy matching.
    pub fn names(&self) -> Vec<&str> {
        self.spells.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of spells in the book.
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    /// Whether the book has no spells.
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

/// The standard spellbook every session starts with.
pub fn standard() -> Spellbook {
    fn spell(name: &str, stress_cost: i32, description: &str) -> Spell {
        Spell {
            name: name.to_string(),
            stress_cost,
            description: description.to_string(),
        }
    }

    Spellbook::new()
        .with_spell(spell(
            "Veil of Dusk",
            1,
            "Wrap yourself in gloom; watchers look past you",
        ))
        .with_spell(spell(
            "Glimmerstep",
            1,
            "Cross a short gap in a blink of pale light",
        ))
        .with_spell(spell(
            "Mirror of Intent",
            1,
            "Read the surface intention of someone you can see",
        ))
        .with_spell(spell(
            "Emberweave",
            2,
            "Draw living flame into a shape that holds for a scene",
        ))
        .with_spell(spell(
            "Binding Lattice",
            2,
            "Pin a creature or mechanism in place with woven light",
        ))
        .with_spell(spell(
            "Sundering Chord",
            3,
            "One note that breaks a lock, a blade, or a ward",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_book_contents() {
        let book = standard();
        assert_eq!(book.len(), 6);
        assert!(!book.is_empty());
        for spell in book.all() {
            assert!(spell.stress_cost >= 1);
            assert!(!spell.description.is_empty());
        }
    }

    #[test]
    fn find_ignores_case() {
        let book = standard();
        let spell = book.find("veil of dusk").unwrap();
        assert_eq!(spell.name, "Veil of Dusk");
        assert_eq!(spell.stress_cost, 1);
        assert!(book.find("fireball").is_none());
    }

    #[test]
    fn spell_display() {
        let book = standard();
        let line = book.find("Sundering Chord").unwrap().to_string();
        assert!(line.starts_with("Sundering Chord (stress 3):"));
    }
}
