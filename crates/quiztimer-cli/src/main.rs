//! quiztimer CLI — the user-facing command-line interface.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quiztimer", version, about = "Timed quizzes from delimited question files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timed quiz
    Run {
        /// Question file in the format 'question,answer' (default: problems.csv)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Time limit for the whole quiz in seconds (default: 30)
        #[arg(long)]
        limit: Option<u64>,

        /// Shuffle questions
        #[arg(long, conflicts_with = "no_shuffle")]
        shuffle: bool,

        /// Keep file order even if the config enables shuffling
        #[arg(long, conflicts_with = "seed")]
        no_shuffle: bool,

        /// Seed for a reproducible shuffle (implies --shuffle)
        #[arg(long)]
        seed: Option<u64>,

        /// Field delimiter (default: ',')
        #[arg(long)]
        delimiter: Option<char>,

        /// Start the clock immediately instead of waiting for Enter
        #[arg(long, conflicts_with = "wait")]
        no_wait: bool,

        /// Wait for Enter before starting the clock even if the config disables it
        #[arg(long)]
        wait: bool,

        /// Print every answered question after the score
        #[arg(long)]
        review: bool,

        /// Write a JSON session report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question file for problems
    Validate {
        /// Question file to check
        #[arg(long)]
        csv: PathBuf,

        /// Field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// Show a saved session report
    Summary {
        /// Report JSON written by `run --output`
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config and question file
    Init,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quiztimer=info,quiztimer_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            csv,
            limit,
            shuffle,
            no_shuffle,
            seed,
            delimiter,
            no_wait,
            wait,
            review,
            output,
            config,
        } => {
            let options = commands::run::RunOptions {
                csv,
                limit,
                shuffle: commands::run::toggle(shuffle, no_shuffle),
                seed,
                delimiter,
                wait_for_start: commands::run::toggle(wait, no_wait),
                review,
                output,
                config,
            };
            commands::run::execute(options).await
        }
        Commands::Validate { csv, delimiter } => commands::validate::execute(csv, delimiter),
        Commands::Summary { report, format } => commands::summary::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    match result {
        // A timed-out quiz can leave stdin blocked on a read; exit without
        // waiting for the runtime to join it.
        Ok(()) => {
            let _ = std::io::stdout().flush();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
