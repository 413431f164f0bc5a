//! CLI for fairdraw — run and verify raffle draws from public entropy.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fairdraw")]
#[command(about = "fairdraw — raffle draws anyone can recompute")]
#[command(version = fairdraw_core::VERSION)]
struct Cli {
    /// Log derived values and every pipeline step
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a draw and write `<PATH>.results.json`
    Draw {
        /// Raffle definition (JSON with time, name, count, dice, salt, entrants)
        path: PathBuf,

        /// Write the result record here instead of next to the definition
        #[arg(long)]
        output: Option<PathBuf>,

        /// Indent the result record
        #[arg(long)]
        pretty: bool,

        /// Also print the derived seed and numbered winning order
        #[arg(long)]
        summary: bool,
    },

    /// Recompute a published result record and compare every field
    Verify {
        /// Result record written by `draw`
        path: PathBuf,
    },

    /// Run a draw and print its summary without writing anything
    Show {
        /// Raffle definition
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(commands::log_filter(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Draw {
            path,
            output,
            pretty,
            summary,
        } => commands::draw::run(&commands::draw::DrawCommandConfig {
            input: &path,
            output: output.as_deref(),
            pretty,
            summary,
        }),
        Commands::Verify { path } => {
            commands::verify::run(&commands::verify::VerifyCommandConfig { path: &path })
        }
        Commands::Show { path } => commands::show::run(&path),
    }
}
