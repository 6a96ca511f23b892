//! Show command
//!
//! Usage: generations show <DATABASE> <SEARCH>

use clap::Args;
use std::path::PathBuf;

use generations_core::errors::Result;
use generations_core::model::DatePlace;
use generations_core::PersonRef;
use generations_store::load_databases;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Database file
    pub database: PathBuf,

    /// ID, UUID or "first last" name of the person
    pub search: String,
}

/// Execute show command
pub fn execute(args: ShowArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let db = load_databases(std::slice::from_ref(&args.database))?;
    let person = db.get(&args.search)?;
    print!("{}", describe(person)?);
    Ok(())
}

fn label(person: PersonRef<'_>) -> String {
    if person.is_placeholder() {
        return "-".to_string();
    }
    let name = person.name.format_full();
    if name.is_empty() {
        person.to_string()
    } else {
        format!("{} ({})", person, name)
    }
}

fn labels(persons: &[PersonRef<'_>]) -> String {
    if persons.is_empty() {
        return "-".to_string();
    }
    persons
        .iter()
        .map(|p| label(*p))
        .collect::<Vec<_>>()
        .join(", ")
}

fn event(title: &str, date_place: &DatePlace) -> Option<String> {
    if date_place.is_empty() {
        return None;
    }
    let text = format!("{} {}", date_place.date, date_place.place);
    Some(format!("  {}: {}", title, text.trim()))
}

/// Plain text overview of a person and the derived relations
///
/// # Errors
///
/// Relation lookups failing on identifiers that do not resolve.
pub fn describe(person: PersonRef<'_>) -> Result<String> {
    let mut lines = vec![label(person)];
    lines.extend(
        [
            ("born", &person.birth),
            ("baptized", &person.baptism),
            ("died", &person.death),
            ("buried", &person.burial),
        ]
        .into_iter()
        .filter_map(|(title, date_place)| event(title, date_place)),
    );
    lines.push(format!("  mom: {}", label(person.mom()?)));
    lines.push(format!("  dad: {}", label(person.dad()?)));
    let partners: Vec<_> = person
        .partners()?
        .into_iter()
        .filter(|p| !p.is_placeholder())
        .collect();
    lines.push(format!("  partners: {}", labels(&partners)));
    lines.push(format!("  children: {}", labels(&person.children())));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}
