//! CLI frontend for the Game of Arte session engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use arte_session::RollOptions;

#[derive(Parser)]
#[command(
    name = "arte",
    about = "Dice rules and session logs for the Game of Arte tabletop",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new session file with a template troupe
    Init {
        /// Name of the session
        name: String,

        /// Session file to create
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Play an interactive session; saves the session file on quit
    Play {
        /// RNG seed for deterministic dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Make one roll and append it to the session log
    Roll {
        /// Character name, or an NdS dice expression (e.g. 3d6)
        target: String,

        /// Attribute to roll: strength, finesse, wits, presence, arte
        attribute: Option<String>,

        /// Boost dice (each costs 1 resilience)
        #[arg(short, long, default_value_t = 0)]
        boost: u32,

        /// Snag dice imposed on the roll
        #[arg(long, default_value_t = 0)]
        snag: u32,

        /// Extra action dice
        #[arg(long, default_value_t = 0)]
        extra: u32,

        /// Hide the roll from other players
        #[arg(long)]
        secret: bool,

        /// Label for the roll log
        #[arg(short, long)]
        label: Option<String>,

        /// RNG seed for deterministic dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Print the roll log
    Log {
        /// View the log as this player (secret rolls are filtered)
        #[arg(long = "as", value_name = "PLAYER")]
        viewer: Option<String>,

        /// Export instead of a table: markdown, text
        #[arg(long)]
        format: Option<String>,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Manage characters
    Character {
        #[command(subcommand)]
        command: CharacterCommands,
    },

    /// Manage progress clocks
    Clock {
        #[command(subcommand)]
        command: ClockCommands,
    },
}

#[derive(Subcommand)]
enum CharacterCommands {
    /// List characters
    List {
        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Show a character sheet
    Show {
        /// Character name (case-insensitive)
        name: String,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Create a character
    New {
        /// Character name
        name: String,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Set an attribute level (1-5)
    Set {
        /// Character name
        name: String,

        /// Attribute: strength, finesse, wits, presence, arte
        attribute: String,

        /// New level
        level: u32,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ClockCommands {
    /// List clocks
    List {
        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Add a clock
    Add {
        /// Number of segments
        segments: u32,

        /// Clock label
        label: String,

        /// Keep the clock hidden from players
        #[arg(long)]
        hidden: bool,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Advance a clock (negative amounts rewind)
    Tick {
        /// Clock label
        label: String,

        /// Segments to advance
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        amount: i32,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },

    /// Remove a clock
    Remove {
        /// Clock label
        label: String,

        /// Session file
        #[arg(short, long, default_value = "session.arte.json")]
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name, file } => commands::init::run(&file, &name),
        Commands::Play { seed, file } => commands::play::run(&file, seed),
        Commands::Roll {
            target,
            attribute,
            boost,
            snag,
            extra,
            secret,
            label,
            seed,
            file,
        } => commands::roll::run(
            &file,
            &target,
            attribute.as_deref(),
            RollOptions {
                boost,
                snag,
                extra,
                secret,
                label,
            },
            seed,
        ),
        Commands::Log {
            viewer,
            format,
            file,
        } => commands::log::run(&file, viewer.as_deref(), format.as_deref()),
        Commands::Character { command } => match command {
            CharacterCommands::List { file } => commands::character::list(&file),
            CharacterCommands::Show { name, file } => commands::character::show(&file, &name),
            CharacterCommands::New { name, file } => commands::character::new(&file, &name),
            CharacterCommands::Set {
                name,
                attribute,
                level,
                file,
            } => commands::character::set(&file, &name, &attribute, level),
        },
        Commands::Clock { command } => match command {
            ClockCommands::List { file } => commands::clock::list(&file),
            ClockCommands::Add {
                segments,
                label,
                hidden,
                file,
            } => commands::clock::add(&file, &label, segments, hidden),
            ClockCommands::Tick {
                label,
                amount,
                file,
            } => commands::clock::tick(&file, &label, amount),
            ClockCommands::Remove { label, file } => commands::clock::remove(&file, &label),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
