//! IDs command
//!
//! Usage: generations ids <DATABASE> [--strategy <STRATEGY>] [--write]

use clap::Args;
use std::path::PathBuf;

use generations_core::IdStrategy;
use generations_store::database::database_to_string;
use generations_store::{load_databases, write_database_file};

#[derive(Debug, Args)]
pub struct IdsArgs {
    /// Database file
    pub database: PathBuf,

    /// four-four-year, four-four-birthname or last-first
    #[arg(short, long, default_value_t = IdStrategy::FourFourYear)]
    pub strategy: IdStrategy,

    /// Write the result back to the database file instead of stdout
    #[arg(short, long)]
    pub write: bool,
}

/// Execute ids command
pub fn execute(args: IdsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = load_databases(std::slice::from_ref(&args.database))?;
    let assigned = db.assign_ids(args.strategy);

    if args.write {
        write_database_file(&db, &args.database)?;
        println!("✓ Assigned {} ID(s) in {}", assigned, args.database.display());
    } else {
        print!("{}", database_to_string(&db)?);
        eprintln!("Assigned {} ID(s)", assigned);
    }

    Ok(())
}
