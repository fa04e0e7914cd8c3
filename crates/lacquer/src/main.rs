//! # lacquer
//!
//! Command-line front end for the lacquer Angular template linter.
//!
//! Templates arrive as serialized documents (`*.ast.json`) produced by the
//! Angular template parser, so this binary never parses HTML itself.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lacquer")]
#[command(about = "Angular template linter in Rust", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Angular template documents (default command)
    #[command(visible_alias = "patina")]
    Lint(commands::lint::LintArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Lint(args)) => commands::lint::run(args),
        None => commands::lint::run(commands::lint::LintArgs::default()),
    }
}
