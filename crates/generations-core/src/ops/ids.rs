//! Identifier generation strategies
//!
//! Every strategy is a pure function of the person's name and birth data.
//! An empty result means "no identifier could be derived".

use std::fmt;
use std::str::FromStr;

use crate::errors::GenealogyError;
use crate::model::date_place::first_chars;
use crate::model::{Name, Person};

/// Number of characters taken from each name component
const COMPONENT_LEN: usize = 4;

/// Available identifier generation strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// `MüllHein1982`: family name, used or first name, birth year
    #[default]
    FourFourYear,
    /// `MüllHeinSchm`: family name, used or first name, birth name
    FourFourBirthName,
    /// `MüllerHeinz`: full family name and full used or first name
    LastFirst,
}

impl IdStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdStrategy::FourFourYear => "four-four-year",
            IdStrategy::FourFourBirthName => "four-four-birthname",
            IdStrategy::LastFirst => "last-first",
        }
    }

    /// Derive an identifier for `person` with this strategy
    pub fn generate(&self, person: &Person) -> String {
        match self {
            IdStrategy::FourFourYear => four_four_year(person),
            IdStrategy::FourFourBirthName => four_four_birth_name(person),
            IdStrategy::LastFirst => last_first(person),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = GenealogyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "four-four-year" => Ok(IdStrategy::FourFourYear),
            "four-four-birthname" => Ok(IdStrategy::FourFourBirthName),
            "last-first" => Ok(IdStrategy::LastFirst),
            other => Err(GenealogyError::InvalidInput {
                reason: format!("unknown ID strategy '{}'", other),
            }),
        }
    }
}

/// Used name unless it is unset or "?", first given name otherwise
fn given_name(name: &Name) -> &str {
    if !name.used.is_empty() && name.used != "?" {
        return &name.used;
    }
    name.first.first().map(String::as_str).unwrap_or("")
}

pub fn four_four_year(person: &Person) -> String {
    let mut id = String::new();
    id.push_str(first_chars(&person.name.last, COMPONENT_LEN));
    id.push_str(first_chars(given_name(&person.name), COMPONENT_LEN));
    if let Some(year) = person.birth.year() {
        id.push_str(year);
    }
    id
}

pub fn four_four_birth_name(person: &Person) -> String {
    let name = &person.name;
    if name.birth.is_empty() || name.birth == "?" {
        return String::new();
    }
    let mut id = String::new();
    id.push_str(first_chars(&name.last, COMPONENT_LEN));
    id.push_str(first_chars(given_name(name), COMPONENT_LEN));
    id.push_str(first_chars(&name.birth, COMPONENT_LEN));
    id
}

pub fn last_first(person: &Person) -> String {
    let id = format!("{}{}", person.name.last, given_name(&person.name));
    if id == "??" {
        return String::new();
    }
    id
}

/// Identity key used to detect duplicates on import
///
/// The explicit ID if set, the UUID otherwise, the generated
/// four-four-year identifier as a last resort.
pub fn best_id(person: &Person) -> String {
    if !person.id.is_empty() {
        return person.id.clone();
    }
    if !person.uuid.is_empty() {
        return person.uuid.clone();
    }
    four_four_year(person)
}
