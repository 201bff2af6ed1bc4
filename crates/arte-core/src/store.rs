use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::id::{CharacterId, ClockId, PlayerId, RollId};
use crate::player::Player;
use crate::roll::DiceRoll;

/// Session-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Name of the session ("The Glass Court, season 2").
    pub name: String,
    /// Timestamp when the session was created.
    pub created_at: DateTime<Utc>,
}

/// In-memory document store for one game session.
///
/// Holds characters, clocks, players, and the roll log, with name and
/// per-character indexes. Mutations are plain read-modify-write with no
/// optimistic concurrency; with multiple writers the last write wins.
/// Roll records are immutable after insertion except for their hints.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session metadata.
    pub meta: SessionMeta,
    characters: HashMap<CharacterId, Character>,
    clocks: HashMap<ClockId, Clock>,
    players: HashMap<PlayerId, Player>,
    rolls: HashMap<RollId, DiceRoll>,
    /// Lowercased character name -> id, for exact lookups and duplicate
    /// rejection.
    character_names: HashMap<String, CharacterId>,
    /// Roll ids in insertion order. This is the only ordering the roll
    /// log guarantees.
    roll_order: Vec<RollId>,
    rolls_by_character: HashMap<CharacterId, Vec<RollId>>,
}

impl SessionStore {
    /// Create an empty store for a named session.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: SessionMeta {
                name: name.into(),
                created_at: Utc::now(),
            },
            characters: HashMap::new(),
            clocks: HashMap::new(),
            players: HashMap::new(),
            rolls: HashMap::new(),
            character_names: HashMap::new(),
            roll_order: Vec::new(),
            rolls_by_character: HashMap::new(),
        }
    }

    // --- characters ---

    /// Insert a character. Names are unique case-insensitively.
    pub fn insert_character(&mut self, character: Character) -> CoreResult<CharacterId> {
        let key = character.name.to_lowercase();
        if self.character_names.contains_key(&key) {
            return Err(CoreError::DuplicateName(character.name));
        }
        let id = character.id;
        self.character_names.insert(key, id);
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Get a character by id.
    pub fn get_character(&self, id: CharacterId) -> CoreResult<&Character> {
        self.characters
            .get(&id)
            .ok_or(CoreError::CharacterNotFound(id))
    }

    /// Apply a mutation to a character.
    ///
    /// The closure must not change the character's name; renames go
    /// through [`SessionStore::rename_character`] so the name index and
    /// duplicate check stay correct. A closure that does rename is
    /// reverted and rejected.
    pub fn patch_character<F>(&mut self, id: CharacterId, patch: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Character),
    {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(CoreError::CharacterNotFound(id))?;
        let name_before = character.name.clone();
        patch(character);
        if character.name != name_before {
            character.name = name_before;
            return Err(CoreError::Validation(
                "character renames must use rename_character".to_string(),
            ));
        }
        Ok(())
    }

    /// Rename a character, keeping the name index consistent and
    /// rejecting duplicates.
    pub fn rename_character(
        &mut self,
        id: CharacterId,
        new_name: impl Into<String>,
    ) -> CoreResult<()> {
        let new_name = new_name.into();
        let new_key = new_name.to_lowercase();
        if let Some(other) = self.character_names.get(&new_key) {
            if *other != id {
                return Err(CoreError::DuplicateName(new_name));
            }
        }
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(CoreError::CharacterNotFound(id))?;
        let old_key = character.name.to_lowercase();
        character.name = new_name;
        character.updated_at = Utc::now();
        self.character_names.remove(&old_key);
        self.character_names.insert(new_key, id);
        Ok(())
    }

    /// Remove a character. Any player controlling it is unassigned; the
    /// character's rolls stay in the log for history.
    pub fn remove_character(&mut self, id: CharacterId) -> CoreResult<Character> {
        let character = self
            .characters
            .remove(&id)
            .ok_or(CoreError::CharacterNotFound(id))?;
        self.character_names.remove(&character.name.to_lowercase());
        for player in self.players.values_mut() {
            if player.character == Some(id) {
                player.character = None;
            }
        }
        Ok(character)
    }

    /// Find a character by exact name, case-insensitively.
    pub fn find_character(&self, name: &str) -> Option<&Character> {
        let id = self.character_names.get(&name.to_lowercase())?;
        self.characters.get(id)
    }

    /// All characters, sorted by name.
    pub fn characters(&self) -> Vec<&Character> {
        let mut all: Vec<&Character> = self.characters.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// All character names, for fuzzy matching.
    pub fn character_names(&self) -> Vec<&str> {
        self.characters.values().map(|c| c.name.as_str()).collect()
    }

    /// Number of characters in the store.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    // --- clocks ---

    /// Insert a clock.
    pub fn insert_clock(&mut self, clock: Clock) -> ClockId {
        let id = clock.id;
        self.clocks.insert(id, clock);
        id
    }

    /// Get a clock by id.
    pub fn get_clock(&self, id: ClockId) -> CoreResult<&Clock> {
        self.clocks.get(&id).ok_or(CoreError::ClockNotFound(id))
    }

    /// Apply a mutation to a clock.
    pub fn patch_clock<F>(&mut self, id: ClockId, patch: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Clock),
    {
        let clock = self.clocks.get_mut(&id).ok_or(CoreError::ClockNotFound(id))?;
        patch(clock);
        Ok(())
    }

    /// Remove a clock.
    pub fn remove_clock(&mut self, id: ClockId) -> CoreResult<Clock> {
        self.clocks.remove(&id).ok_or(CoreError::ClockNotFound(id))
    }

    /// Find a clock by exact label, case-insensitively.
    pub fn find_clock(&self, label: &str) -> Option<&Clock> {
        let needle = label.to_lowercase();
        self.clocks
            .values()
            .find(|c| c.label.to_lowercase() == needle)
    }

    /// All clocks, sorted by label.
    pub fn clocks(&self) -> Vec<&Clock> {
        let mut all: Vec<&Clock> = self.clocks.values().collect();
        all.sort_by(|a, b| a.label.cmp(&b.label));
        all
    }

    /// Number of clocks in the store.
    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    // --- players ---

    /// Insert a player.
    pub fn insert_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.insert(id, player);
        id
    }

    /// Get a player by id.
    pub fn get_player(&self, id: PlayerId) -> CoreResult<&Player> {
        self.players.get(&id).ok_or(CoreError::PlayerNotFound(id))
    }

    /// Apply a mutation to a player.
    pub fn patch_player<F>(&mut self, id: PlayerId, patch: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Player),
    {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(CoreError::PlayerNotFound(id))?;
        patch(player);
        Ok(())
    }

    /// Remove a player, clearing any character assignment.
    pub fn remove_player(&mut self, id: PlayerId) -> CoreResult<Player> {
        let player = self.players.remove(&id).ok_or(CoreError::PlayerNotFound(id))?;
        if let Some(character_id) = player.character {
            if let Some(character) = self.characters.get_mut(&character_id) {
                character.player = None;
            }
        }
        Ok(player)
    }

    /// Find a player by exact name, case-insensitively.
    pub fn find_player(&self, name: &str) -> Option<&Player> {
        let needle = name.to_lowercase();
        self.players
            .values()
            .find(|p| p.name.to_lowercase() == needle)
    }

    /// All players, sorted by name.
    pub fn players(&self) -> Vec<&Player> {
        let mut all: Vec<&Player> = self.players.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Number of players in the store.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Link a player and a character in both directions, clearing any
    /// previous links on either side.
    pub fn assign_character(
        &mut self,
        player_id: PlayerId,
        character_id: CharacterId,
    ) -> CoreResult<()> {
        if !self.players.contains_key(&player_id) {
            return Err(CoreError::PlayerNotFound(player_id));
        }
        if !self.characters.contains_key(&character_id) {
            return Err(CoreError::CharacterNotFound(character_id));
        }
        for player in self.players.values_mut() {
            if player.character == Some(character_id) {
                player.character = None;
            }
        }
        if let Some(player) = self.players.get_mut(&player_id) {
            if let Some(previous) = player.character.take() {
                if let Some(prev_character) = self.characters.get_mut(&previous) {
                    prev_character.player = None;
                }
            }
            player.character = Some(character_id);
        }
        for character in self.characters.values_mut() {
            if character.player == Some(player_id) && character.id != character_id {
                character.player = None;
            }
        }
        if let Some(character) = self.characters.get_mut(&character_id) {
            character.player = Some(player_id);
        }
        Ok(())
    }

    // --- rolls ---

    /// Insert a roll into the log. Rolls keep insertion order and are
    /// indexed by character.
    pub fn insert_roll(&mut self, roll: DiceRoll) -> RollId {
        let id = roll.id;
        if let Some(character) = roll.character {
            self.rolls_by_character.entry(character).or_default().push(id);
        }
        self.roll_order.push(id);
        self.rolls.insert(id, roll);
        id
    }

    /// Get a roll by id.
    pub fn get_roll(&self, id: RollId) -> CoreResult<&DiceRoll> {
        self.rolls.get(&id).ok_or(CoreError::RollNotFound(id))
    }

    /// Append a hint to an existing roll. This is the only mutation a
    /// persisted roll accepts.
    pub fn append_roll_hint(&mut self, id: RollId, hint: impl Into<String>) -> CoreResult<()> {
        let roll = self.rolls.get_mut(&id).ok_or(CoreError::RollNotFound(id))?;
        roll.hints.push(hint.into());
        Ok(())
    }

    /// The full roll log in insertion order.
    pub fn rolls(&self) -> Vec<&DiceRoll> {
        self.roll_order
            .iter()
            .filter_map(|id| self.rolls.get(id))
            .collect()
    }

    /// Rolls made for one character, in insertion order.
    pub fn rolls_for_character(&self, id: CharacterId) -> Vec<&DiceRoll> {
        self.rolls_by_character
            .get(&id)
            .map(|ids| ids.iter().filter_map(|rid| self.rolls.get(rid)).collect())
            .unwrap_or_default()
    }

    /// Number of rolls in the log.
    pub fn roll_count(&self) -> usize {
        self.roll_order.len()
    }

    // --- snapshots ---

    /// Capture the store as a serializable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            meta: self.meta.clone(),
            characters: self.characters().into_iter().cloned().collect(),
            clocks: self.clocks().into_iter().cloned().collect(),
            players: self.players().into_iter().cloned().collect(),
            rolls: self.rolls().into_iter().cloned().collect(),
        }
    }

    /// Rebuild a store from a snapshot, restoring indexes and roll order
    /// and re-validating character name uniqueness.
    pub fn restore(snapshot: Snapshot) -> CoreResult<Self> {
        let mut store = Self::new(snapshot.meta.name.clone());
        store.meta = snapshot.meta;
        for character in snapshot.characters {
            store.insert_character(character)?;
        }
        for clock in snapshot.clocks {
            store.insert_clock(clock);
        }
        for player in snapshot.players {
            store.insert_player(player);
        }
        for roll in snapshot.rolls {
            store.insert_roll(roll);
        }
        Ok(store)
    }
}

/// Serializable image of a [`SessionStore`].
///
/// Rolls are stored in insertion order; indexes are rebuilt on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session metadata.
    pub meta: SessionMeta,
    /// All characters.
    pub characters: Vec<Character>,
    /// All clocks.
    pub clocks: Vec<Clock>,
    /// All players.
    pub players: Vec<Player>,
    /// The roll log, oldest first.
    pub rolls: Vec<DiceRoll>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Attribute;
    use crate::player::Role;
    use crate::roll::{DiceRoll, RolledDie};

    fn store_with_character(name: &str) -> (SessionStore, CharacterId) {
        let mut store = SessionStore::new("Test Table");
        let id = store.insert_character(Character::new(name)).unwrap();
        (store, id)
    }

    #[test]
    fn duplicate_character_names_rejected_case_insensitively() {
        let (mut store, _) = store_with_character("Luca");
        let err = store.insert_character(Character::new("LUCA")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
        assert_eq!(store.character_count(), 1);
    }

    #[test]
    fn find_character_ignores_case() {
        let (store, id) = store_with_character("Luca");
        assert_eq!(store.find_character("luca").map(|c| c.id), Some(id));
        assert!(store.find_character("nobody").is_none());
    }

    #[test]
    fn patch_character_rejects_rename() {
        let (mut store, id) = store_with_character("Luca");
        let err = store
            .patch_character(id, |c| c.name = "Mara".to_string())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store.get_character(id).unwrap().name, "Luca");
    }

    #[test]
    fn patch_character_applies_mutation() {
        let (mut store, id) = store_with_character("Luca");
        store
            .patch_character(id, |c| {
                c.set_attribute(Attribute::Wits, 4);
            })
            .unwrap();
        assert_eq!(store.get_character(id).unwrap().attribute(Attribute::Wits), 4);
    }

    #[test]
    fn rename_character_updates_index() {
        let (mut store, id) = store_with_character("Luca");
        store.rename_character(id, "Mara").unwrap();
        assert!(store.find_character("luca").is_none());
        assert_eq!(store.find_character("mara").map(|c| c.id), Some(id));
        // renaming onto another character's name fails
        let other = store.insert_character(Character::new("Luca")).unwrap();
        let err = store.rename_character(other, "MARA").unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
    }

    #[test]
    fn remove_character_unassigns_player_and_keeps_rolls() {
        let (mut store, character_id) = store_with_character("Luca");
        let player_id = store.insert_player(Player::new("Sam", Role::Player));
        store.assign_character(player_id, character_id).unwrap();
        let roll_id = store.insert_roll(
            DiceRoll::new(vec![RolledDie::plain(12, 7)]).for_character(character_id),
        );
        store.remove_character(character_id).unwrap();
        assert!(store.get_character(character_id).is_err());
        assert!(store.get_player(player_id).unwrap().character.is_none());
        assert!(store.get_roll(roll_id).is_ok());
        assert_eq!(store.roll_count(), 1);
    }

    #[test]
    fn assign_character_is_symmetric_and_exclusive() {
        let mut store = SessionStore::new("Test Table");
        let luca = store.insert_character(Character::new("Luca")).unwrap();
        let mara = store.insert_character(Character::new("Mara")).unwrap();
        let sam = store.insert_player(Player::new("Sam", Role::Player));
        let kit = store.insert_player(Player::new("Kit", Role::Player));

        store.assign_character(sam, luca).unwrap();
        assert_eq!(store.get_player(sam).unwrap().character, Some(luca));
        assert_eq!(store.get_character(luca).unwrap().player, Some(sam));

        // reassigning the character steals it from the first player
        store.assign_character(kit, luca).unwrap();
        assert!(store.get_player(sam).unwrap().character.is_none());
        assert_eq!(store.get_character(luca).unwrap().player, Some(kit));

        // moving the player to a new character releases the old one
        store.assign_character(kit, mara).unwrap();
        assert!(store.get_character(luca).unwrap().player.is_none());
        assert_eq!(store.get_character(mara).unwrap().player, Some(kit));
    }

    #[test]
    fn rolls_keep_insertion_order() {
        let (mut store, character_id) = store_with_character("Luca");
        let mut ids = Vec::new();
        for result in [3, 9, 12] {
            ids.push(store.insert_roll(
                DiceRoll::new(vec![RolledDie::plain(12, result)]).for_character(character_id),
            ));
        }
        let log: Vec<RollId> = store.rolls().iter().map(|r| r.id).collect();
        assert_eq!(log, ids);
        let by_character: Vec<RollId> = store
            .rolls_for_character(character_id)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(by_character, ids);
    }

    #[test]
    fn append_roll_hint_is_the_only_roll_mutation() {
        let (mut store, _) = store_with_character("Luca");
        let roll_id = store.insert_roll(DiceRoll::new(vec![RolledDie::plain(12, 2)]));
        store.append_roll_hint(roll_id, "offer to collect resilience").unwrap();
        let roll = store.get_roll(roll_id).unwrap();
        assert_eq!(roll.hints, vec!["offer to collect resilience".to_string()]);
        assert!(matches!(
            store.append_roll_hint(RollId::new(), "nope"),
            Err(CoreError::RollNotFound(_))
        ));
    }

    #[test]
    fn snapshot_round_trip_restores_order_and_indexes() {
        let (mut store, character_id) = store_with_character("Luca");
        store.insert_clock(Clock::new("The Duke's Suspicion", 6));
        let player_id = store.insert_player(Player::new("Sam", Role::Player));
        store.assign_character(player_id, character_id).unwrap();
        let mut ids = Vec::new();
        for result in [5, 11, 2, 12] {
            ids.push(store.insert_roll(
                DiceRoll::new(vec![RolledDie::plain(12, result)]).for_character(character_id),
            ));
        }

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = SessionStore::restore(snapshot).unwrap();

        assert_eq!(restored.meta.name, "Test Table");
        assert_eq!(restored.character_count(), 1);
        assert_eq!(restored.clock_count(), 1);
        assert_eq!(restored.player_count(), 1);
        let log: Vec<RollId> = restored.rolls().iter().map(|r| r.id).collect();
        assert_eq!(log, ids);
        assert_eq!(restored.find_character("LUCA").map(|c| c.id), Some(character_id));
        assert_eq!(restored.rolls_for_character(character_id).len(), 4);
    }

    #[test]
    fn restore_rejects_duplicate_names() {
        let mut snapshot = SessionStore::new("Test Table").snapshot();
        snapshot.characters.push(Character::new("Luca"));
        snapshot.characters.push(Character::new("luca"));
        assert!(SessionStore::restore(snapshot).is_err());
    }
}
