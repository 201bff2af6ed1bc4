use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use arte_core::Character;
use arte_core::character::Attribute;
use arte_mechanics::attribute::action_dice_for_level;

pub fn list(file: &Path) -> Result<(), String> {
    let store = super::load_store(file)?;
    let characters = store.characters();

    if characters.is_empty() {
        println!("  No characters. Add one with: arte character new <name>");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name",
        "Str",
        "Fin",
        "Wit",
        "Pre",
        "Arte",
        "Resilience",
        "Stress",
        "Player",
    ]);

    for character in &characters {
        let player = character
            .player
            .and_then(|id| store.get_player(id).ok())
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let mut row = vec![character.name.clone()];
        for (_, level) in character.attribute_levels() {
            row.push(level.to_string());
        }
        row.push(format!(
            "{}/{}",
            character.resilience.current, character.resilience.max
        ));
        row.push(format!(
            "{}/{}",
            character.stress.current, character.stress.max
        ));
        row.push(player);
        table.add_row(row);
    }

    println!("{table}");
    println!();
    println!("  {} characters", characters.len());

    Ok(())
}

pub fn show(file: &Path, name: &str) -> Result<(), String> {
    let store = super::load_store(file)?;
    let character = store
        .find_character(name)
        .ok_or_else(|| format!("no character named '{name}'"))?;

    println!("{}", character.name);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Attribute", "Level", "Action dice"]);
    for (attribute, level) in character.attribute_levels() {
        let dice = action_dice_for_level(level).map_err(|e| e.to_string())?;
        table.add_row(vec![
            attribute.to_string(),
            level.to_string(),
            dice.to_string(),
        ]);
    }
    println!("{table}");

    println!("  {} | {}", character.resilience, character.stress);
    if let Some(player) = character.player.and_then(|id| store.get_player(id).ok()) {
        println!("  Played by {}", player.name);
    }
    if !character.conditions.is_empty() {
        println!("  Conditions: {}", character.conditions.join(", "));
    }
    if !character.notes.is_empty() {
        println!("  Notes: {}", character.notes);
    }

    Ok(())
}

pub fn new(file: &Path, name: &str) -> Result<(), String> {
    let mut store = super::load_store(file)?;
    store
        .insert_character(Character::new(name))
        .map_err(|e| e.to_string())?;
    super::save_store(file, &store)?;
    println!("Added character '{name}'");
    Ok(())
}

pub fn set(file: &Path, name: &str, attribute: &str, level: u32) -> Result<(), String> {
    let mut store = super::load_store(file)?;
    let attribute = Attribute::parse(attribute).ok_or_else(|| {
        format!("unknown attribute '{attribute}' (use strength, finesse, wits, presence, arte)")
    })?;
    let id = store
        .find_character(name)
        .ok_or_else(|| format!("no character named '{name}'"))?
        .id;

    let mut stored = 0;
    store
        .patch_character(id, |c| {
            stored = c.set_attribute(attribute, level);
        })
        .map_err(|e| e.to_string())?;
    super::save_store(file, &store)?;

    println!("{name}: {attribute} is now {stored}");
    Ok(())
}
