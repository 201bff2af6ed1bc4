use std::path::Path;

use arte_core::character::Attribute;
use arte_session::log::format_roll;
use arte_session::{GameSession, RollOptions, SessionConfig};

pub fn run(
    file: &Path,
    target: &str,
    attribute: Option<&str>,
    options: RollOptions,
    seed: Option<u64>,
) -> Result<(), String> {
    let store = super::load_store(file)?;
    let mut config = SessionConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut session = GameSession::new(store, config);

    let report = match attribute {
        Some(attr_str) => {
            let attribute = Attribute::parse(attr_str)
                .ok_or_else(|| format!("unknown attribute '{attr_str}'"))?;
            session
                .roll_action(target, attribute, options)
                .map_err(|e| e.to_string())?
        }
        None => {
            if options.boost > 0 || options.snag > 0 || options.extra > 0 || options.secret {
                return Err(
                    "boost, snag, extra, and secret apply to attribute rolls; \
                     usage: arte roll <character> <attribute> [flags]"
                        .into(),
                );
            }
            session
                .roll_simple(target, options.label)
                .map_err(|e| e.to_string())?
        }
    };

    let store = session.into_store();
    let roll = store.get_roll(report.roll_id).map_err(|e| e.to_string())?;
    println!("{}", format_roll(&store, roll));
    for die in &roll.dice {
        if let Some(tooltip) = &die.tooltip {
            println!("  {die} {tooltip}");
        }
    }
    for note in &report.notes {
        println!("  note: {note}");
    }

    super::save_store(file, &store)
}
