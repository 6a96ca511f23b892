//! Anonymize command
//!
//! Usage: generations anonymize <DATABASE> --output <FILE> [--cutoff <YEAR>]

use clap::Args;
use std::path::PathBuf;

use generations_core::ops::DEFAULT_CUTOFF_YEAR;
use generations_store::{load_databases, write_database_file};

#[derive(Debug, Args)]
pub struct AnonymizeArgs {
    /// Database file
    pub database: PathBuf,

    /// Persons born in or after this year are anonymized
    #[arg(long, default_value_t = DEFAULT_CUTOFF_YEAR)]
    pub cutoff: i32,

    /// Output database file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute anonymize command
pub fn execute(args: AnonymizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = load_databases(std::slice::from_ref(&args.database))?;
    let changed = db.anonymize(args.cutoff);
    write_database_file(&db, &args.output)?;
    println!(
        "✓ Anonymized {} of {} person(s) to {}",
        changed,
        db.len(),
        args.output.display()
    );
    Ok(())
}
