//! flashdrill CLI — the interactive flashcard front end.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "flashdrill",
    version,
    about = "Adaptive vocabulary flashcard trainer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive learning session
    Learn {
        /// Path to a .json word list or a directory of them
        #[arg(long)]
        words: Option<PathBuf>,

        /// RNG seed for a reproducible word order
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write session reports to (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, markdown, all, none
        #[arg(long, default_value = "none")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate word list JSON files
    Validate {
        /// Path to word list file or directory
        #[arg(long)]
        words: PathBuf,
    },

    /// Print a saved session report
    Show {
        /// Report JSON file
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example word list
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Learn {
            words,
            seed,
            output,
            format,
            config,
        } => commands::learn::execute(words, seed, output, format, config),
        Commands::Validate { words } => commands::validate::execute(words),
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
