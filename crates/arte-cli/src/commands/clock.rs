use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use arte_core::Clock;

pub fn list(file: &Path) -> Result<(), String> {
    let store = super::load_store(file)?;
    let clocks = store.clocks();

    if clocks.is_empty() {
        println!("  No clocks. Add one with: arte clock add <segments> <label>");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Label", "Progress", "Visibility", "Status"]);

    for clock in &clocks {
        let visibility = if clock.visible { "visible" } else { "hidden" };
        let status = if clock.is_complete() { "complete" } else { "" };
        table.add_row(vec![
            clock.label.clone(),
            format!("{}/{}", clock.filled, clock.segments),
            visibility.to_string(),
            status.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn add(file: &Path, label: &str, segments: u32, hidden: bool) -> Result<(), String> {
    let mut store = super::load_store(file)?;

    if store.find_clock(label).is_some() {
        return Err(format!("clock '{label}' already exists"));
    }

    let clock = if hidden {
        Clock::hidden(label, segments)
    } else {
        Clock::new(label, segments)
    };
    let display = clock.to_string();
    store.insert_clock(clock);
    super::save_store(file, &store)?;

    println!("Added clock: {display}");
    Ok(())
}

pub fn tick(file: &Path, label: &str, amount: i32) -> Result<(), String> {
    let mut store = super::load_store(file)?;
    let id = store
        .find_clock(label)
        .map(|c| c.id)
        .ok_or_else(|| format!("no clock labelled '{label}'"))?;

    let mut display = String::new();
    store
        .patch_clock(id, |c| {
            c.tick(amount);
            display = c.to_string();
        })
        .map_err(|e| e.to_string())?;
    super::save_store(file, &store)?;

    println!("{display}");
    Ok(())
}

pub fn remove(file: &Path, label: &str) -> Result<(), String> {
    let mut store = super::load_store(file)?;
    let id = store
        .find_clock(label)
        .map(|c| c.id)
        .ok_or_else(|| format!("no clock labelled '{label}'"))?;

    let clock = store.remove_clock(id).map_err(|e| e.to_string())?;
    super::save_store(file, &store)?;

    println!("Removed clock '{}'", clock.label);
    Ok(())
}
