pub mod anonymize;
pub mod database;
pub mod ids;

pub use anonymize::DEFAULT_CUTOFF_YEAR;
pub use database::{Database, DatabaseFile, IngestReport};
pub use ids::{best_id, IdStrategy};
