use std::path::Path;

use arte_core::character::Attribute;
use arte_core::{Character, Player, Role, SessionStore};

pub fn run(file: &Path, name: &str) -> Result<(), String> {
    if file.exists() {
        return Err(format!("'{}' already exists", file.display()));
    }

    let mut store = SessionStore::new(name);

    // Template troupe so the table can roll immediately
    let mut colombina = Character::new("Colombina");
    colombina.set_attribute(Attribute::Finesse, 3);
    colombina.set_attribute(Attribute::Wits, 2);
    colombina.set_attribute(Attribute::Arte, 2);
    store
        .insert_character(colombina)
        .map_err(|e| e.to_string())?;

    let mut capitano = Character::new("Capitano");
    capitano.set_attribute(Attribute::Strength, 3);
    capitano.set_attribute(Attribute::Presence, 2);
    store
        .insert_character(capitano)
        .map_err(|e| e.to_string())?;

    store.insert_player(Player::new("GM", Role::GameMaster));

    super::save_store(file, &store)?;

    println!("Created session '{name}' in {}", file.display());
    println!("  Template troupe: Colombina, Capitano");
    println!();
    println!("Get started:");
    println!("  arte play                     # Interactive session");
    println!("  arte roll Colombina finesse   # One-shot roll");
    println!("  arte log                      # Show the roll log");

    Ok(())
}
