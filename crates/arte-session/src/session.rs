//! Game session orchestration.
//!
//! `GameSession` owns the store, the spellbook, and the RNG, and exposes
//! typed operations plus a line-oriented command processor used by the
//! CLI REPL. Operations that touch more than one document issue
//! sequential mutations with no transaction: the roll persists first,
//! and a follow-up mutation that fails is logged and reported, never
//! rolled back.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use arte_core::character::{Attribute, Character};
use arte_core::clock::Clock;
use arte_core::id::{CharacterId, ClockId, RollId};
use arte_core::player::{Player, Role};
use arte_core::roll::{DiceRoll, RollKind};
use arte_core::store::SessionStore;
use arte_mechanics::attribute::action_dice_for_level;
use arte_mechanics::roll::{DieRequest, RollRequest, perform_roll};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::log::{self, Viewer};
use crate::names;
use crate::spells::{self, Spellbook};

/// Hint appended to an action roll that produced no successes.
pub const CONSOLATION_HINT: &str = "No successes: the roller may collect 1 resilience.";

/// Options for an action roll.
#[derive(Debug, Clone, Default)]
pub struct RollOptions {
    /// Boost dice to roll. Each costs 1 resilience, spent after the
    /// roll persists.
    pub boost: u32,
    /// Snag dice imposed on the roll.
    pub snag: u32,
    /// Extra action dice granted on top of the attribute's pool.
    pub extra: u32,
    /// Hide the roll from other players.
    pub secret: bool,
    /// Short description for the log.
    pub label: Option<String>,
}

/// The persisted roll plus notes from its follow-up mutations.
#[derive(Debug, Clone)]
pub struct RollReport {
    /// Id of the inserted roll record.
    pub roll_id: RollId,
    /// Outcomes of follow-up mutations, for display.
    pub notes: Vec<String>,
}

/// An interactive game session.
pub struct GameSession {
    store: SessionStore,
    spellbook: Spellbook,
    config: SessionConfig,
    rng: StdRng,
}

impl GameSession {
    /// Create a session over an existing store.
    pub fn new(store: SessionStore, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            spellbook: spells::standard(),
            config,
            rng,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The session's spellbook.
    pub fn spellbook(&self) -> &Spellbook {
        &self.spellbook
    }

    /// Consume the session, returning the store for persistence.
    pub fn into_store(self) -> SessionStore {
        self.store
    }

    /// The roll log as a viewer sees it.
    pub fn visible_log(&self, viewer: Viewer) -> Vec<&DiceRoll> {
        log::visible_rolls(&self.store, viewer)
    }

    // --- rolls ---

    /// Roll an attribute action: the attribute's action dice plus any
    /// boost, snag, and extra dice.
    ///
    /// The roll record is inserted first. Afterwards, as separate
    /// mutations: a roll with no successes gains the consolation hint,
    /// and boost dice are paid for from the character's resilience. A
    /// follow-up that cannot apply in full is reported and logged, but
    /// the roll stands.
    pub fn roll_action(
        &mut self,
        character: &str,
        attribute: Attribute,
        options: RollOptions,
    ) -> SessionResult<RollReport> {
        let character = self.resolve_character(character)?;
        let character_id = character.id;
        let level = character.attribute(attribute);
        let base = action_dice_for_level(level)?;

        let mut request = RollRequest::new()
            .with_kind(RollKind::Action)
            .for_character(character_id)
            .secret(options.secret)
            .add(DieRequest::action(base + options.extra));
        if options.boost > 0 {
            request = request.add(DieRequest::boost(options.boost));
        }
        if options.snag > 0 {
            request = request.add(DieRequest::snag(options.snag));
        }
        if let Some(label) = &options.label {
            request = request.with_label(label.clone());
        }

        let roll = perform_roll(&request, &mut self.rng)?;
        let total = roll.total_successes();
        let roll_id = self.store.insert_roll(roll);

        // Follow-up mutations. The roll above is already persisted.
        let mut notes = Vec::new();
        if total <= 0 {
            if let Err(err) = self.store.append_roll_hint(roll_id, CONSOLATION_HINT) {
                warn!(%err, "could not append consolation hint");
                notes.push(format!("hint not recorded: {err}"));
            }
        }
        if options.boost > 0 {
            notes.push(self.spend_for_boost(character_id, options.boost));
        }

        Ok(RollReport { roll_id, notes })
    }

    /// Cast a spell: roll the caster's Arte dice, then apply the
    /// spell's stress cost as a follow-up mutation.
    pub fn cast_spell(&mut self, character: &str, spell: &str) -> SessionResult<RollReport> {
        let character = self.resolve_character(character)?;
        let character_id = character.id;
        let level = character.attribute(Attribute::Arte);
        let spell =
            names::resolve_spell(&self.spellbook, spell, self.config.fuzzy_threshold)?.clone();
        let dice = action_dice_for_level(level)?;

        let request = RollRequest::new()
            .with_kind(RollKind::Spell)
            .with_label(format!("Cast {}", spell.name))
            .for_character(character_id)
            .add(DieRequest::action(dice));
        let roll = perform_roll(&request, &mut self.rng)?;
        let roll_id = self.store.insert_roll(roll);

        let mut notes = Vec::new();
        let mut after = 0;
        let mut cap = 0;
        match self.store.patch_character(character_id, |c| {
            after = c.adjust_stress(spell.stress_cost);
            cap = c.stress.max;
        }) {
            Ok(()) => notes.push(format!(
                "Stress +{} (now {after}/{cap})",
                spell.stress_cost
            )),
            Err(err) => {
                warn!(%err, "stress cost failed after roll persisted");
                notes.push(format!("stress not applied: {err}"));
            }
        }

        Ok(RollReport { roll_id, notes })
    }

    /// Roll plain dice from `NdS` notation, with no rule table.
    pub fn roll_simple(&mut self, expr: &str, label: Option<String>) -> SessionResult<RollReport> {
        let (count, sides) = parse_dice_expr(expr).ok_or_else(|| {
            SessionError::InvalidCommand(format!(
                "cannot parse dice expression '{expr}' (use NdS, e.g. 3d6)"
            ))
        })?;
        let request = RollRequest::new()
            .with_kind(RollKind::Simple)
            .with_label(label.unwrap_or_else(|| expr.to_string()))
            .add(DieRequest::plain(count, sides));
        let roll = perform_roll(&request, &mut self.rng)?;
        let roll_id = self.store.insert_roll(roll);
        Ok(RollReport {
            roll_id,
            notes: Vec::new(),
        })
    }

    // --- resource tracks ---

    /// Grant 1 resilience, e.g. after a fully failed roll.
    pub fn collect_resilience(&mut self, character: &str) -> SessionResult<String> {
        let id = self.resolve_character_id(character)?;
        let mut after = 0;
        let mut cap = 0;
        self.store.patch_character(id, |c| {
            after = c.adjust_resilience(1);
            cap = c.resilience.max;
        })?;
        Ok(format!("Resilience now {after}/{cap}"))
    }

    /// Spend resilience. A spend larger than the current value drains
    /// the track and reports the shortfall.
    pub fn spend_resilience(&mut self, character: &str, amount: u32) -> SessionResult<String> {
        if amount == 0 {
            return Err(SessionError::InvalidCommand(
                "spend at least 1 resilience".to_string(),
            ));
        }
        let id = self.resolve_character_id(character)?;
        let cost = amount as i32;
        let mut spent = 0;
        let mut after = 0;
        let mut cap = 0;
        self.store.patch_character(id, |c| {
            let before = c.resilience.current;
            after = c.adjust_resilience(-cost);
            cap = c.resilience.max;
            spent = before - after;
        })?;
        if spent < cost {
            Ok(format!(
                "Only {spent} of {cost} resilience available; now {after}/{cap}"
            ))
        } else {
            Ok(format!("Spent {spent} resilience; now {after}/{cap}"))
        }
    }

    /// Apply stress to a character.
    pub fn apply_stress(&mut self, character: &str, amount: u32) -> SessionResult<String> {
        let id = self.resolve_character_id(character)?;
        let mut after = 0;
        let mut cap = 0;
        self.store.patch_character(id, |c| {
            after = c.adjust_stress(amount as i32);
            cap = c.stress.max;
        })?;
        Ok(format!("Stress now {after}/{cap}"))
    }

    /// Relieve stress on a character.
    pub fn relieve_stress(&mut self, character: &str, amount: u32) -> SessionResult<String> {
        let id = self.resolve_character_id(character)?;
        let mut after = 0;
        let mut cap = 0;
        self.store.patch_character(id, |c| {
            after = c.adjust_stress(-(amount as i32));
            cap = c.stress.max;
        })?;
        Ok(format!("Stress now {after}/{cap}"))
    }

    // --- clocks ---

    /// Add a clock.
    pub fn add_clock(
        &mut self,
        label: &str,
        segments: u32,
        visible: bool,
    ) -> SessionResult<String> {
        if label.is_empty() {
            return Err(SessionError::InvalidCommand(
                "a clock needs a label".to_string(),
            ));
        }
        if self.store.find_clock(label).is_some() {
            return Err(SessionError::InvalidCommand(format!(
                "clock '{label}' already exists"
            )));
        }
        let clock = if visible {
            Clock::new(label, segments)
        } else {
            Clock::hidden(label, segments)
        };
        let display = clock.to_string();
        self.store.insert_clock(clock);
        Ok(format!("Clock added: {display}"))
    }

    /// Advance or rewind a clock by label.
    pub fn tick_clock(&mut self, label: &str, delta: i32) -> SessionResult<String> {
        let id = self.find_clock_id(label)?;
        let mut display = String::new();
        self.store.patch_clock(id, |c| {
            c.tick(delta);
            display = c.to_string();
        })?;
        Ok(display)
    }

    /// Set a clock's fill directly.
    pub fn set_clock(&mut self, label: &str, filled: u32) -> SessionResult<String> {
        let id = self.find_clock_id(label)?;
        let mut display = String::new();
        self.store.patch_clock(id, |c| {
            c.set(filled);
            display = c.to_string();
        })?;
        Ok(display)
    }

    /// Remove a clock by label.
    pub fn remove_clock(&mut self, label: &str) -> SessionResult<String> {
        let id = self.find_clock_id(label)?;
        let clock = self.store.remove_clock(id)?;
        Ok(format!("Clock removed: {}", clock.label))
    }

    // --- table administration ---

    /// Create a character.
    pub fn add_character(&mut self, name: &str) -> SessionResult<String> {
        if name.is_empty() {
            return Err(SessionError::InvalidCommand(
                "a character needs a name".to_string(),
            ));
        }
        self.store.insert_character(Character::new(name))?;
        Ok(format!("Character created: {name}"))
    }

    /// Set a character's attribute level (clamped to 1-5).
    pub fn set_attribute(
        &mut self,
        character: &str,
        attribute: Attribute,
        level: u32,
    ) -> SessionResult<String> {
        let id = self.resolve_character_id(character)?;
        let mut stored = 0;
        self.store.patch_character(id, |c| {
            stored = c.set_attribute(attribute, level);
        })?;
        let name = self.store.get_character(id)?.name.clone();
        if stored == level {
            Ok(format!("{name}: {attribute} set to {stored}"))
        } else {
            Ok(format!(
                "{name}: {attribute} set to {stored} (clamped from {level})"
            ))
        }
    }

    /// Add a player to the table.
    pub fn add_player(&mut self, name: &str, role: Role) -> SessionResult<String> {
        if name.is_empty() {
            return Err(SessionError::InvalidCommand(
                "a player needs a name".to_string(),
            ));
        }
        if self.store.find_player(name).is_some() {
            return Err(SessionError::InvalidCommand(format!(
                "player '{name}' already exists"
            )));
        }
        self.store.insert_player(Player::new(name, role));
        Ok(format!("Player added: {name} ({role})"))
    }

    /// Assign a character to a player.
    pub fn assign_player(&mut self, player: &str, character: &str) -> SessionResult<String> {
        let player_id = self
            .store
            .find_player(player)
            .ok_or_else(|| SessionError::UnknownPlayer(player.to_string()))?
            .id;
        let character_id = self.resolve_character_id(character)?;
        self.store.assign_character(player_id, character_id)?;
        let player_name = self.store.get_player(player_id)?.name.clone();
        let character_name = self.store.get_character(character_id)?.name.clone();
        Ok(format!("{player_name} now plays {character_name}"))
    }

    // --- command processor ---

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "roll" => self.do_roll(rest),
            "dice" => self.do_dice(rest),
            "cast" => self.do_cast(rest),
            "resilience" => self.do_resilience(rest),
            "stress" => self.do_stress(rest),
            "clock" => self.do_clock(rest),
            "clocks" => self.do_clock_list(),
            "character" => self.do_character(rest),
            "characters" => self.do_character_list(),
            "player" => self.do_player(rest),
            "players" => self.do_player_list(),
            "assign" => self.do_assign(rest),
            "spells" => self.do_spell_list(),
            "log" => self.do_log(rest),
            "export" => self.do_export(rest),
            "status" => self.do_status(),
            "help" => self.do_help(rest),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(SessionError::UnknownCommand(other.to_string())),
        }
    }

    fn do_roll(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(SessionError::InvalidCommand(
                "usage: roll <character> <attribute> [boost N] [snag N] [extra N] [secret] [label]"
                    .to_string(),
            ));
        }
        let name = tokens[0];
        let attribute = Attribute::parse(tokens[1]).ok_or_else(|| {
            SessionError::InvalidCommand(format!("unknown attribute '{}'", tokens[1]))
        })?;
        let options = parse_roll_options(&tokens[2..])?;
        let report = self.roll_action(name, attribute, options)?;
        self.render_report(&report)
    }

    fn do_dice(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(SessionError::InvalidCommand(
                "usage: dice <NdS> [label]".to_string(),
            ));
        }
        let label = if tokens.len() > 1 {
            Some(tokens[1..].join(" "))
        } else {
            None
        };
        let report = self.roll_simple(tokens[0], label)?;
        self.render_report(&report)
    }

    fn do_cast(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(SessionError::InvalidCommand(
                "usage: cast <character> <spell>".to_string(),
            ));
        }
        let report = self.cast_spell(tokens[0], &tokens[1..].join(" "))?;
        self.render_report(&report)
    }

    fn do_resilience(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        match tokens.as_slice() {
            ["collect", name] => self.collect_resilience(name),
            ["spend", name] => self.spend_resilience(name, 1),
            ["spend", name, n] => {
                let amount = n.parse().map_err(|_| {
                    SessionError::InvalidCommand(format!("'{n}' is not a number"))
                })?;
                self.spend_resilience(name, amount)
            }
            _ => Err(SessionError::InvalidCommand(
                "usage: resilience collect <character> | resilience spend <character> [n]"
                    .to_string(),
            )),
        }
    }

    fn do_stress(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        match tokens.as_slice() {
            ["apply", name] => self.apply_stress(name, 1),
            ["apply", name, n] => {
                let amount = n.parse().map_err(|_| {
                    SessionError::InvalidCommand(format!("'{n}' is not a number"))
                })?;
                self.apply_stress(name, amount)
            }
            ["relieve", name] => self.relieve_stress(name, 1),
            ["relieve", name, n] => {
                let amount = n.parse().map_err(|_| {
                    SessionError::InvalidCommand(format!("'{n}' is not a number"))
                })?;
                self.relieve_stress(name, amount)
            }
            _ => Err(SessionError::InvalidCommand(
                "usage: stress apply|relieve <character> [n]".to_string(),
            )),
        }
    }

    fn do_clock(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let usage = || {
            SessionError::InvalidCommand(
                "usage: clock add|hidden <segments> <label> | clock tick|set <label> [n] | clock remove <label>"
                    .to_string(),
            )
        };
        let sub = tokens.first().map(|s| s.to_lowercase()).unwrap_or_default();
        match sub.as_str() {
            "add" | "hidden" if tokens.len() >= 3 => {
                let segments = tokens[1].parse().map_err(|_| usage())?;
                let label = tokens[2..].join(" ");
                self.add_clock(&label, segments, sub == "add")
            }
            "tick" if tokens.len() >= 2 => {
                let (label_tokens, delta) = split_trailing_int(&tokens[1..]);
                self.tick_clock(&label_tokens.join(" "), delta.unwrap_or(1))
            }
            "set" if tokens.len() >= 3 => {
                let (label_tokens, value) = split_trailing_int(&tokens[1..]);
                let value = value.and_then(|v| u32::try_from(v).ok()).ok_or_else(usage)?;
                self.set_clock(&label_tokens.join(" "), value)
            }
            "remove" if tokens.len() >= 2 => self.remove_clock(&tokens[1..].join(" ")),
            _ => Err(usage()),
        }
    }

    fn do_clock_list(&self) -> SessionResult<String> {
        let clocks = self.store.clocks();
        if clocks.is_empty() {
            return Ok("No clocks.".to_string());
        }
        let mut out = format!("Clocks ({}):\n", clocks.len());
        for clock in clocks {
            out.push_str(&format!("  {clock}"));
            if !clock.visible {
                out.push_str(" (hidden)");
            }
            out.push('\n');
        }
        Ok(out.trim_end().to_string())
    }

    fn do_character(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let usage = || {
            SessionError::InvalidCommand(
                "usage: character new <name> | character show <name> | character set <name> <attribute> <level>"
                    .to_string(),
            )
        };
        let sub = tokens.first().map(|s| s.to_lowercase()).unwrap_or_default();
        match sub.as_str() {
            "new" if tokens.len() >= 2 => self.add_character(&tokens[1..].join(" ")),
            "show" if tokens.len() >= 2 => self.do_character_show(&tokens[1..].join(" ")),
            "set" if tokens.len() == 4 => {
                let attribute = Attribute::parse(tokens[2]).ok_or_else(|| {
                    SessionError::InvalidCommand(format!("unknown attribute '{}'", tokens[2]))
                })?;
                let level = tokens[3].parse().map_err(|_| usage())?;
                self.set_attribute(tokens[1], attribute, level)
            }
            _ => Err(usage()),
        }
    }

    fn do_character_show(&self, name: &str) -> SessionResult<String> {
        let character = self.resolve_character(name)?;
        let mut out = character.name.clone();
        if let Some(player_id) = character.player {
            if let Ok(player) = self.store.get_player(player_id) {
                out.push_str(&format!(" (played by {})", player.name));
            }
        }
        out.push('\n');
        for (attribute, level) in character.attribute_levels() {
            // the mapping cannot fail for a stored (clamped) level
            let dice = action_dice_for_level(level).unwrap_or(0);
            let word = if dice == 1 { "die" } else { "dice" };
            out.push_str(&format!("  {attribute} {level} ({dice} {word})\n"));
        }
        out.push_str(&format!(
            "  {} | {}\n",
            character.resilience, character.stress
        ));
        if !character.conditions.is_empty() {
            out.push_str(&format!("  Conditions: {}\n", character.conditions.join(", ")));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_character_list(&self) -> SessionResult<String> {
        let characters = self.store.characters();
        if characters.is_empty() {
            return Ok("No characters.".to_string());
        }
        let mut out = format!("Characters ({}):\n", characters.len());
        for character in characters {
            out.push_str(&format!(
                "  {} ({} | {})",
                character.name, character.resilience, character.stress
            ));
            if let Some(player_id) = character.player {
                if let Ok(player) = self.store.get_player(player_id) {
                    out.push_str(&format!(", played by {}", player.name));
                }
            }
            out.push('\n');
        }
        Ok(out.trim_end().to_string())
    }

    fn do_player(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        match tokens.as_slice() {
            ["add", args @ ..] if !args.is_empty() => {
                let (name_tokens, role) = match args.split_last() {
                    Some((last, front)) if last.eq_ignore_ascii_case("gm") && !front.is_empty() => {
                        (front, Role::GameMaster)
                    }
                    _ => (args, Role::Player),
                };
                self.add_player(&name_tokens.join(" "), role)
            }
            _ => Err(SessionError::InvalidCommand(
                "usage: player add <name> [gm]".to_string(),
            )),
        }
    }

    fn do_player_list(&self) -> SessionResult<String> {
        let players = self.store.players();
        if players.is_empty() {
            return Ok("No players.".to_string());
        }
        let mut out = format!("Players ({}):\n", players.len());
        for player in players {
            out.push_str(&format!("  {} ({})", player.name, player.role));
            if let Some(character_id) = player.character {
                if let Ok(character) = self.store.get_character(character_id) {
                    out.push_str(&format!(", plays {}", character.name));
                }
            }
            out.push('\n');
        }
        Ok(out.trim_end().to_string())
    }

    fn do_assign(&mut self, rest: &str) -> SessionResult<String> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        match tokens.as_slice() {
            [player, character] => self.assign_player(player, character),
            _ => Err(SessionError::InvalidCommand(
                "usage: assign <player> <character>".to_string(),
            )),
        }
    }

    fn do_spell_list(&self) -> SessionResult<String> {
        let mut out = format!("Spellbook ({} spells):\n", self.spellbook.len());
        for spell in self.spellbook.all() {
            out.push_str(&format!("  {spell}\n"));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_log(&self, rest: &str) -> SessionResult<String> {
        let limit: usize = rest.trim().parse().unwrap_or(10);
        let rolls = self.visible_log(Viewer::GameMaster);
        if rolls.is_empty() {
            return Ok("No rolls yet.".to_string());
        }
        let start = rolls.len().saturating_sub(limit);
        let recent = &rolls[start..];
        let mut out = format!(
            "Roll log ({} rolls, showing last {}):\n",
            rolls.len(),
            recent.len()
        );
        for roll in recent {
            out.push_str(&format!("  {}\n", log::format_roll(&self.store, roll)));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_export(&self, format: &str) -> SessionResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(log::export_markdown(&self.store, Viewer::GameMaster)),
            "text" | "txt" => Ok(log::export_text(&self.store, Viewer::GameMaster)),
            other => Err(SessionError::InvalidCommand(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }

    fn do_status(&self) -> SessionResult<String> {
        let mut out = format!("Session: {}\n", self.store.meta.name);
        out.push_str(&format!("Characters: {}\n", self.store.character_count()));
        let complete = self
            .store
            .clocks()
            .iter()
            .filter(|c| c.is_complete())
            .count();
        out.push_str(&format!(
            "Clocks: {} ({} complete)\n",
            self.store.clock_count(),
            complete
        ));
        out.push_str(&format!("Players: {}\n", self.store.player_count()));
        out.push_str(&format!("Rolls logged: {}", self.store.roll_count()));
        Ok(out)
    }

    fn do_help(&self, topic: &str) -> SessionResult<String> {
        match topic.to_lowercase().as_str() {
            "roll" | "dice" => Ok("\
Rolling:
  roll <character> <attribute> [boost N] [snag N] [extra N] [secret] [label]
                                Action roll for an attribute
  dice <NdS> [label]            Plain dice with no rules (e.g. dice 3d6)
  cast <character> <spell>      Cast a spell with Arte dice

Attributes: strength, finesse, wits, presence, arte
Boost dice cost 1 resilience each; snag dice are imposed by the GM."
                .to_string()),
            "cast" | "spells" | "spell" => Ok("\
Spellcasting:
  cast <character> <spell>      Roll Arte dice, then take the spell's stress
  spells                        List the spellbook"
                .to_string()),
            "resilience" | "stress" => Ok("\
Resource tracks:
  resilience collect <character>       Gain 1 resilience
  resilience spend <character> [n]     Spend resilience
  stress apply <character> [n]         Take stress
  stress relieve <character> [n]       Recover stress"
                .to_string()),
            "clock" | "clocks" => Ok("\
Clocks:
  clock add <segments> <label>     Add a visible clock
  clock hidden <segments> <label>  Add a GM-only clock
  clock tick <label> [n]           Advance (negative n rewinds)
  clock set <label> <n>            Set the fill directly
  clock remove <label>             Remove a clock
  clocks                           List clocks"
                .to_string()),
            "character" | "characters" | "player" | "players" => Ok("\
Table administration:
  character new <name>                     Create a character
  character show <name>                    Show a character sheet
  character set <name> <attribute> <level> Set an attribute (1-5)
  characters                               List characters
  player add <name> [gm]                   Add a player
  players                                  List players
  assign <player> <character>              Link player and character"
                .to_string()),
            "log" | "export" => Ok("\
Roll log:
  log [n]                       Show the last n rolls (default 10)
  export [markdown|text]        Export the full log"
                .to_string()),
            _ => Ok("\
Game of Arte session commands:
  roll <character> <attribute> [options]  Action roll
  dice <NdS>                              Plain dice
  cast <character> <spell>                Cast a spell
  resilience collect|spend                Manage resilience
  stress apply|relieve                    Manage stress
  clock add|hidden|tick|set|remove        Manage clocks
  clocks                                  List clocks
  character new|show|set                  Manage characters
  characters                              List characters
  player add / players / assign           Manage the table
  spells                                  List the spellbook
  log [n] / export [markdown|text]        Roll log
  status                                  Session overview
  help [topic]                            This help (topics: roll, spells,
                                          resilience, clock, character, log)
  quit                                    Exit"
                .to_string()),
        }
    }

    // --- helpers ---

    fn resolve_character(&self, input: &str) -> SessionResult<&Character> {
        names::resolve_character(&self.store, input, self.config.fuzzy_threshold)
    }

    fn resolve_character_id(&self, input: &str) -> SessionResult<CharacterId> {
        self.resolve_character(input).map(|c| c.id)
    }

    fn find_clock_id(&self, label: &str) -> SessionResult<ClockId> {
        self.store
            .find_clock(label)
            .map(|c| c.id)
            .ok_or_else(|| SessionError::UnknownClock(label.to_string()))
    }

    fn render_report(&self, report: &RollReport) -> SessionResult<String> {
        let roll = self.store.get_roll(report.roll_id)?;
        let mut out = log::format_roll(&self.store, roll);
        for die in &roll.dice {
            if let Some(tooltip) = &die.tooltip {
                out.push_str(&format!("\n  {die} {tooltip}"));
            }
        }
        for note in &report.notes {
            out.push_str(&format!("\n  note: {note}"));
        }
        Ok(out)
    }

    fn spend_for_boost(&mut self, character_id: CharacterId, boost: u32) -> String {
        let cost = boost as i32;
        let mut spent = 0;
        let mut after = 0;
        let result = self.store.patch_character(character_id, |c| {
            let before = c.resilience.current;
            after = c.adjust_resilience(-cost);
            spent = before - after;
        });
        match result {
            Ok(()) if spent >= cost => format!("Spent {spent} resilience (now {after})"),
            Ok(()) => {
                warn!(
                    character = %character_id,
                    requested = cost,
                    spent,
                    "resilience spend applied partially"
                );
                format!("Only {spent} of {cost} resilience available; the rest is owed")
            }
            Err(err) => {
                warn!(%err, "resilience spend failed after roll persisted");
                format!("resilience spend failed: {err}")
            }
        }
    }
}

/// Parse `NdS` dice notation ("3d6", "d20"). Counts above 100 and sides
/// above 1000 are rejected.
fn parse_dice_expr(expr: &str) -> Option<(u32, u32)> {
    let lower = expr.trim().to_lowercase();
    let (count_str, sides_str) = lower.split_once('d')?;
    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str.parse().ok()?
    };
    let sides: u32 = sides_str.parse().ok()?;
    if count == 0 || count > 100 || sides == 0 || sides > 1000 {
        return None;
    }
    Some((count, sides))
}

/// Parse roll options: `[boost N] [snag N] [extra N] [secret]` followed
/// by free label text.
fn parse_roll_options(tokens: &[&str]) -> SessionResult<RollOptions> {
    let mut options = RollOptions::default();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].to_lowercase().as_str() {
            key @ ("boost" | "snag" | "extra") => {
                let value = tokens
                    .get(i + 1)
                    .and_then(|t| t.parse::<u32>().ok())
                    .ok_or_else(|| {
                        SessionError::InvalidCommand(format!("'{key}' needs a number"))
                    })?;
                match key {
                    "boost" => options.boost = value,
                    "snag" => options.snag = value,
                    _ => options.extra = value,
                }
                i += 2;
            }
            "secret" => {
                options.secret = true;
                i += 1;
            }
            _ => {
                options.label = Some(tokens[i..].join(" "));
                break;
            }
        }
    }
    Ok(options)
}

/// Split a trailing integer off a token list, if the list has one and
/// at least one token would remain.
fn split_trailing_int<'a>(tokens: &'a [&'a str]) -> (&'a [&'a str], Option<i32>) {
    match tokens.split_last() {
        Some((last, rest)) if !rest.is_empty() => match last.parse::<i32>() {
            Ok(n) => (rest, Some(n)),
            Err(_) => (tokens, None),
        },
        _ => (tokens, None),
    }
}
