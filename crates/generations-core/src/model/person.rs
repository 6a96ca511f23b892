use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_place::{years_between, DatePlace};
use super::name::Name;
use super::source::Reference;

/// Identifier shared by every placeholder person
pub const PLACEHOLDER_ID: &str = "<dummy>";

/// Attribute derived for persons with a recorded death or burial
pub const DEAD_ATTRIBUTE: &str = "dead";

/// Gender of a person
///
/// Text other than `male`, `female` or `unknown` is kept as written so it
/// survives a write-back, but renders like an unknown gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    #[default]
    Unknown,
    Male,
    Female,
    Unrecognized(String),
}

impl Gender {
    /// Neither male nor female
    pub fn is_unknown(&self) -> bool {
        matches!(self, Gender::Unknown | Gender::Unrecognized(_))
    }

    /// Nothing recorded at all
    pub fn is_unset(&self) -> bool {
        *self == Gender::Unknown
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Unknown => "unknown",
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "unknown" => Gender::Unknown,
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unrecognized(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// An explicitly recorded partnership of a person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Partnership {
    #[serde(rename = "partner_id")]
    pub partner_id: String,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub engagement: DatePlace,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub marriage: DatePlace,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub divorce: DatePlace,
}

impl Partnership {
    pub fn with(partner_id: impl Into<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            ..Default::default()
        }
    }
}

/// One person record
///
/// Parents are referenced by identifier (`mom`, `dad`, empty = unknown).
/// Relationship derivation needs the owning collection, see
/// [`crate::queries::PersonRef`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Person {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    /// Manual ordering among siblings (twins, unknown birth dates)
    #[serde(skip_serializing_if = "is_zero")]
    pub child_number: i32,
    #[serde(skip_serializing_if = "Name::is_empty")]
    pub name: Name,
    #[serde(skip_serializing_if = "Gender::is_unset")]
    pub gender: Gender,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub birth: DatePlace,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub baptism: DatePlace,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub death: DatePlace,
    #[serde(skip_serializing_if = "DatePlace::is_empty")]
    pub burial: DatePlace,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mom: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dad: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partners: Vec<Partnership>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    #[serde(rename = "image", skip_serializing_if = "String::is_empty")]
    pub image_filename: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub floruit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub jobs: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Reference>,

    #[serde(skip)]
    placeholder: bool,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl Person {
    /// Create a person with the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// The sentinel standing in for "no such person"
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            placeholder: true,
            ..Default::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// True if any non-empty search term equals the ID or the UUID
    pub fn matches_id_uuid(&self, searches: &[&str]) -> bool {
        searches
            .iter()
            .filter(|s| !s.is_empty())
            .any(|s| self.id == *s || self.uuid == *s)
    }

    /// ID/UUID match, or exact `"<first given name> <family name>"`
    pub fn matches_search(&self, search: &str) -> bool {
        if self.matches_id_uuid(&[search]) {
            return true;
        }
        match self.name.first.first() {
            Some(first) => format!("{} {}", first, self.name.last) == search,
            None => false,
        }
    }

    /// Recorded attributes plus the derived `dead` attribute
    pub fn attributes(&self) -> Vec<String> {
        let mut result = self.attributes.clone();
        let is_dead = !self.death.is_empty() || !self.burial.is_empty();
        if is_dead && !result.iter().any(|a| a == DEAD_ATTRIBUTE) {
            result.push(DEAD_ATTRIBUTE.to_string());
        }
        result
    }

    /// Add an attribute unless it is already present
    pub fn add_attribute(&mut self, attr: impl Into<String>) {
        let attr = attr.into();
        if !self.attributes.contains(&attr) {
            self.attributes.push(attr);
        }
    }

    /// Age in completed years at `at`, -1 if the birth date is not a full date
    pub fn age_at(&self, at: NaiveDate) -> i32 {
        match self.birth.full_date() {
            Ok(birth) => years_between(birth, at),
            Err(err) => {
                tracing::trace!(person_id = %self.id, error = %err, "age unknown");
                -1
            }
        }
    }

    /// Age at death in completed years, -1 if it can't be determined
    pub fn death_age(&self) -> i32 {
        match (self.birth.full_date(), self.death.full_date()) {
            (Ok(birth), Ok(death)) => years_between(birth, death),
            _ => -1,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "{}", self.uuid)
        } else {
            write!(f, "{}", self.id)
        }
    }
}
