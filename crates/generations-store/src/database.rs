//! YAML person databases
//!
//! A database file holds `persons`, `sources` and `default-sources`. Unknown
//! keys are rejected. A file is parsed and validated completely before any of
//! its persons is merged, so a broken file leaves the database unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use generations_core::ops::IngestReport;
use generations_core::{log_op_end, log_op_error, log_op_start};
use generations_core::{Database, DatabaseFile};

use crate::errors::{database_validation, in_file, io_error, yaml_error, Result};

/// Parse and validate the content of one database file
///
/// # Errors
///
/// `Serialization` for YAML syntax errors and unknown keys, `InvalidInput`
/// for persons referencing themselves or partnerships without a partner.
pub fn parse_database_str(content: &str) -> Result<DatabaseFile> {
    let file: DatabaseFile =
        serde_yaml::from_str(content).map_err(|e| yaml_error("database_parse", e))?;
    validate_database_file(&file)?;
    Ok(file)
}

fn validate_database_file(file: &DatabaseFile) -> Result<()> {
    for person in &file.persons {
        let label = person.to_string();
        for partnership in &person.partners {
            if partnership.partner_id.is_empty() {
                return Err(database_validation(&label, "partnership without partner_id"));
            }
        }

        let references = [person.mom.as_str(), person.dad.as_str()]
            .into_iter()
            .chain(person.partners.iter().map(|p| p.partner_id.as_str()));
        for reference in references {
            if person.matches_id_uuid(&[reference]) {
                return Err(database_validation(
                    &label,
                    &format!("person references itself as '{}'", reference),
                ));
            }
        }
    }
    Ok(())
}

/// Read one database file and merge it into `db`
///
/// # Errors
///
/// `Io` if the file cannot be read, plus everything
/// [`parse_database_str`] rejects. `db` is untouched on error.
pub fn read_database_file(db: &mut Database, path: &Path) -> Result<IngestReport> {
    let started = log_op_start!("read_database", path = %path.display());

    let result = fs::read_to_string(path)
        .map_err(|e| io_error("read_database", path, e))
        .and_then(|content| parse_database_str(&content).map_err(|e| in_file(e, path)))
        .map(|file| db.ingest(file));

    match &result {
        Ok(report) => {
            log_op_end!(
                "read_database",
                started,
                added = report.added,
                merged = report.merged
            );
        }
        Err(err) => {
            log_op_error!("read_database", started, err.clone());
        }
    }
    result
}

/// Read all `paths` in order into a fresh database
///
/// Duplicates across files are merged into the first occurrence.
///
/// # Errors
///
/// The first file that fails to read or parse.
pub fn load_databases(paths: &[PathBuf]) -> Result<Database> {
    let mut db = Database::new();
    for path in paths {
        read_database_file(&mut db, path)?;
    }
    tracing::debug!(persons = db.len(), files = paths.len(), "databases loaded");
    Ok(db)
}

/// Serialize `db` to YAML in the same form it is read from
///
/// # Errors
///
/// `Serialization` if encoding fails.
pub fn database_to_string(db: &Database) -> Result<String> {
    serde_yaml::to_string(&db.to_file()).map_err(|e| yaml_error("database_write", e))
}

/// Write `db` to `path`, replacing the file
///
/// # Errors
///
/// `Serialization` if encoding fails, `Io` if the file cannot be written.
pub fn write_database_file(db: &Database, path: &Path) -> Result<()> {
    let content = database_to_string(db)?;
    fs::write(path, content).map_err(|e| io_error("write_database", path, e))?;
    tracing::info!(path = %path.display(), persons = db.len(), "database written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use generations_core::errors::ExErrorKind;

    #[test]
    fn test_parse_minimal_database() {
        let file = parse_database_str("persons:\n  - id: gauss\n").unwrap();
        assert_eq!(file.persons.len(), 1);
        assert_eq!(file.persons[0].id, "gauss");
    }

    #[test]
    fn test_reject_unknown_person_key() {
        let err = parse_database_str("persons:\n  - id: gauss\n    shoe-size: 44\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }

    #[test]
    fn test_reject_self_reference() {
        let err = parse_database_str("persons:\n  - id: gauss\n    dad: gauss\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.entity_id(), Some("gauss"));
    }

    #[test]
    fn test_reject_partnership_without_partner() {
        let yaml = "persons:\n  - id: gauss\n    partners:\n      - marriage:\n          date: \"1805\"\n";
        let err = parse_database_str(yaml).unwrap_err();
        assert!(err.message().contains("partner_id"));
    }

    #[test]
    fn test_database_to_string_uses_file_keys() {
        let file = parse_database_str(
            "persons:\n  - id: gauss\n    child-number: 2\n    image: gauss.jpg\n",
        )
        .unwrap();
        let mut db = Database::new();
        db.ingest(file);
        let yaml = database_to_string(&db).unwrap();
        assert!(yaml.contains("child-number: 2"));
        assert!(yaml.contains("image: gauss.jpg"));
    }
}
