//! Generations CLI
//!
//! Command-line interface for rendering family trees

use clap::{Parser, Subcommand};

use generations_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "generations")]
#[command(about = "Generations - genealogytree family trees from YAML databases", long_about = None)]
struct Cli {
    /// Log as JSON lines instead of human readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render every tree of a render configuration
    Render(commands::render::RenderArgs),
    /// Generate IDs for persons without one
    Ids(commands::ids::IdsArgs),
    /// Anonymize recent persons of a database
    Anonymize(commands::anonymize::AnonymizeArgs),
    /// Show the relations of one person
    Show(commands::show::ShowArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args),
        Commands::Ids(args) => commands::ids::execute(args),
        Commands::Anonymize(args) => commands::anonymize::execute(args),
        Commands::Show(args) => commands::show::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
