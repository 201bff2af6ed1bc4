use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use arte_session::log::{self, Viewer};

pub fn run(file: &Path, viewer_name: Option<&str>, format: Option<&str>) -> Result<(), String> {
    let store = super::load_store(file)?;

    let viewer = match viewer_name {
        None => Viewer::GameMaster,
        Some(name) => {
            let player = store
                .find_player(name)
                .ok_or_else(|| format!("no player named '{name}'"))?;
            if player.is_gm() {
                Viewer::GameMaster
            } else {
                Viewer::Player(player.id)
            }
        }
    };

    match format {
        Some("markdown" | "md") => {
            print!("{}", log::export_markdown(&store, viewer));
            return Ok(());
        }
        Some("text" | "txt") => {
            print!("{}", log::export_text(&store, viewer));
            return Ok(());
        }
        Some(other) => {
            return Err(format!(
                "unsupported format: \"{other}\". Use: markdown, text"
            ));
        }
        None => {}
    }

    let rolls = log::visible_rolls(&store, viewer);
    if rolls.is_empty() {
        println!("  No rolls yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Character", "Label", "Dice", "Total", "Secret"]);

    for roll in &rolls {
        let character = roll
            .character
            .and_then(|id| store.get_character(id).ok())
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".to_string());
        let dice = roll
            .dice
            .iter()
            .map(|d| d.result.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let secret = if roll.secret { "yes" } else { "" };
        table.add_row(vec![
            roll.rolled_at.format("%Y-%m-%d %H:%M").to_string(),
            character,
            roll.label.clone().unwrap_or_else(|| "-".to_string()),
            dice,
            roll.total_successes().to_string(),
            secret.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} rolls", rolls.len());

    Ok(())
}
