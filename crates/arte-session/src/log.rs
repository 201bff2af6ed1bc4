//! Roll-log views and export.
//!
//! The store keeps every roll; these functions narrow the log to what a
//! given viewer may see and render it for the terminal or for export.
//! Secret rolls are visible to the game master and to the player whose
//! character made them, and to nobody else.

use arte_core::id::PlayerId;
use arte_core::roll::DiceRoll;
use arte_core::store::SessionStore;

/// Who is looking at the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Sees everything.
    GameMaster,
    /// Sees public rolls plus their own character's secret rolls.
    Player(PlayerId),
    /// Sees public rolls only.
    Observer,
}

/// Whether a viewer may see a roll.
pub fn can_view(store: &SessionStore, roll: &DiceRoll, viewer: Viewer) -> bool {
    if !roll.secret {
        return true;
    }
    match viewer {
        Viewer::GameMaster => true,
        Viewer::Player(player_id) => roll
            .character
            .and_then(|id| store.get_character(id).ok())
            .is_some_and(|c| c.player == Some(player_id)),
        Viewer::Observer => false,
    }
}

/// The roll log as one viewer sees it, oldest first.
pub fn visible_rolls(store: &SessionStore, viewer: Viewer) -> Vec<&DiceRoll> {
    store
        .rolls()
        .into_iter()
        .filter(|roll| can_view(store, roll, viewer))
        .collect()
}

/// One-line log rendering of a roll, with hint lines indented below.
pub fn format_roll(store: &SessionStore, roll: &DiceRoll) -> String {
    let mut line = format!("[{}] ", roll.rolled_at.format("%H:%M"));
    if let Some(name) = character_name(store, roll) {
        line.push_str(name);
        line.push_str(", ");
    }
    line.push_str(&title(roll));
    if roll.secret {
        line.push_str(" (secret)");
    }
    line.push(':');
    for die in &roll.dice {
        line.push_str(&format!(" {}", die.result));
    }
    line.push_str(&format!(" => {}", roll.total_successes()));
    for hint in &roll.hints {
        line.push_str(&format!("\n    hint: {hint}"));
    }
    line
}

/// Export the visible log as Markdown.
pub fn export_markdown(store: &SessionStore, viewer: Viewer) -> String {
    let mut out = format!("# Session Log: {}\n\n", store.meta.name);
    let rolls = visible_rolls(store, viewer);
    if rolls.is_empty() {
        out.push_str("No rolls yet.\n");
        return out;
    }
    for (i, roll) in rolls.iter().enumerate() {
        out.push_str(&format!("## {}. {}\n\n", i + 1, title(roll)));
        out.push_str(&format!(
            "- when: {}\n",
            roll.rolled_at.format("%Y-%m-%d %H:%M UTC")
        ));
        if let Some(name) = character_name(store, roll) {
            out.push_str(&format!("- character: {name}\n"));
        }
        if roll.secret {
            out.push_str("- secret\n");
        }
        out.push_str("- dice:");
        for die in &roll.dice {
            out.push_str(&format!(" {die}"));
        }
        out.push('\n');
        out.push_str(&format!("- total: {}\n", roll.total_successes()));
        for hint in &roll.hints {
            out.push_str(&format!("- hint: {hint}\n"));
        }
        out.push('\n');
    }
    out.trim_end().to_string() + "\n"
}

/// Export the visible log as plain text.
pub fn export_text(store: &SessionStore, viewer: Viewer) -> String {
    let header = format!("Session Log: {}", store.meta.name);
    let mut out = format!("{header}\n{}\n\n", "=".repeat(header.len()));
    let rolls = visible_rolls(store, viewer);
    if rolls.is_empty() {
        out.push_str("No rolls yet.\n");
        return out;
    }
    for roll in rolls {
        out.push_str(&format_roll(store, roll));
        out.push('\n');
    }
    out
}

fn title(roll: &DiceRoll) -> String {
    match (&roll.label, roll.kind) {
        (Some(label), _) => label.clone(),
        (None, Some(kind)) => format!("{kind} roll"),
        (None, None) => "roll".to_string(),
    }
}

fn character_name<'a>(store: &'a SessionStore, roll: &DiceRoll) -> Option<&'a str> {
    roll.character
        .and_then(|id| store.get_character(id).ok())
        .map(|c| c.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arte_core::character::Character;
    use arte_core::player::{Player, Role};
    use arte_core::roll::{DiceRoll, RolledDie};

    struct Fixture {
        store: SessionStore,
        sam: PlayerId,
        kit: PlayerId,
    }

    fn fixture() -> Fixture {
        let mut store = SessionStore::new("The Glass Court");
        let luca = store.insert_character(Character::new("Luca")).unwrap();
        let sam = store.insert_player(Player::new("Sam", Role::Player));
        let kit = store.insert_player(Player::new("Kit", Role::Player));
        store.assign_character(sam, luca).unwrap();

        store.insert_roll(
            DiceRoll::new(vec![RolledDie::plain(12, 9)])
                .with_label("Public move")
                .for_character(luca),
        );
        store.insert_roll(
            DiceRoll::new(vec![RolledDie::plain(12, 3)])
                .with_label("Luca's secret")
                .for_character(luca)
                .secret(true),
        );
        store.insert_roll(
            DiceRoll::new(vec![RolledDie::plain(4, 4)])
                .with_label("GM's own secret")
                .secret(true),
        );

        Fixture { store, sam, kit }
    }

    #[test]
    fn gm_sees_everything() {
        let f = fixture();
        assert_eq!(visible_rolls(&f.store, Viewer::GameMaster).len(), 3);
    }

    #[test]
    fn owner_sees_their_secret_roll_only() {
        let f = fixture();
        let visible = visible_rolls(&f.store, Viewer::Player(f.sam));
        let labels: Vec<&str> = visible.iter().filter_map(|r| r.label.as_deref()).collect();
        assert_eq!(labels, vec!["Public move", "Luca's secret"]);
    }

    #[test]
    fn other_players_and_observers_see_public_only() {
        let f = fixture();
        assert_eq!(visible_rolls(&f.store, Viewer::Player(f.kit)).len(), 1);
        assert_eq!(visible_rolls(&f.store, Viewer::Observer).len(), 1);
    }

    #[test]
    fn visible_log_keeps_insertion_order() {
        let f = fixture();
        let visible = visible_rolls(&f.store, Viewer::GameMaster);
        assert_eq!(visible[0].label.as_deref(), Some("Public move"));
        assert_eq!(visible[2].label.as_deref(), Some("GM's own secret"));
    }

    #[test]
    fn format_roll_includes_character_and_hints() {
        let mut f = fixture();
        let roll_id = f.store.rolls()[0].id;
        f.store.append_roll_hint(roll_id, "collect 1 resilience").unwrap();
        let roll = f.store.get_roll(roll_id).unwrap();
        let line = format_roll(&f.store, roll);
        assert!(line.contains("Luca, Public move:"));
        assert!(line.contains("=> 0"));
        assert!(line.contains("hint: collect 1 resilience"));
    }

    #[test]
    fn markdown_export_respects_viewer() {
        let f = fixture();
        let gm = export_markdown(&f.store, Viewer::GameMaster);
        assert!(gm.starts_with("# Session Log: The Glass Court"));
        assert!(gm.contains("Luca's secret"));
        assert!(gm.contains("- secret"));

        let observer = export_markdown(&f.store, Viewer::Observer);
        assert!(observer.contains("Public move"));
        assert!(!observer.contains("Luca's secret"));
    }

    #[test]
    fn text_export_has_header_and_lines() {
        let f = fixture();
        let text = export_text(&f.store, Viewer::GameMaster);
        assert!(text.starts_with("Session Log: The Glass Court\n===="));
        assert!(text.contains("Public move"));
    }

    #[test]
    fn empty_log_export() {
        let store = SessionStore::new("Quiet Table");
        let md = export_markdown(&store, Viewer::GameMaster);
        assert!(md.contains("No rolls yet."));
        let txt = export_text(&store, Viewer::Observer);
        assert!(txt.contains("No rolls yet."));
    }
}
