use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use arte_session::{GameSession, SessionConfig};

pub fn run(file: &Path, seed: Option<u64>) -> Result<(), String> {
    let store = super::load_store(file)?;
    let mut config = SessionConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut session = GameSession::new(store, config);

    println!(
        "  {} {}",
        "Session".bold(),
        session.store().meta.name
    );
    println!(
        "  {} characters, {} rolls logged",
        session.store().character_count(),
        session.store().roll_count()
    );
    println!("  Type 'help' for commands, 'quit' to save and exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    super::save_store(file, &session.into_store())?;
    println!("Session saved to {}", file.display());
    Ok(())
}
