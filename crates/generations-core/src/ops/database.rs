use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use generations_core_types::Sensitive;

use crate::errors::{GenealogyError, Result};
use crate::model::{Person, Reference, Source};
use crate::ops::anonymize::{anonymize_person, is_recent};
use crate::ops::ids::{best_id, IdStrategy};
use crate::queries::PersonRef;

static PLACEHOLDER: Lazy<Person> = Lazy::new(Person::placeholder);

/// Serialized form of one database file
///
/// `default-sources` apply to every person of the same file that names no
/// source of its own. They are consumed on ingest and never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DatabaseFile {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_sources: Vec<Reference>,
}

/// Outcome of one [`Database::ingest`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub added: usize,
    pub merged: usize,
}

/// In-memory person collection
///
/// Persons keep their insertion order so that every derived list (children,
/// siblings, partners) comes out deterministically. The collection is only
/// mutated while loading, assigning IDs or anonymizing, never during a render.
#[derive(Debug, Clone, Default)]
pub struct Database {
    persons: Vec<Person>,
    sources: Vec<Source>,
}

impl Database {
    /// Create a new empty Database
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from already deduplicated persons
    pub fn from_persons(persons: Vec<Person>) -> Self {
        Self {
            persons,
            sources: Vec::new(),
        }
    }

    /// Append a person without duplicate detection
    pub fn insert_person(&mut self, person: Person) {
        self.persons.push(person);
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// View on every person, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = PersonRef<'_>> {
        self.persons.iter().map(move |p| PersonRef::new(p, self))
    }

    /// The sentinel for "no such person", bound to this database
    pub fn placeholder(&self) -> PersonRef<'_> {
        PersonRef::new(&PLACEHOLDER, self)
    }

    /// Find a person by ID, UUID or `"<first given name> <family name>"`
    ///
    /// # Errors
    ///
    /// Returns `PersonNotFound` if nobody matches.
    pub fn get(&self, search: &str) -> Result<PersonRef<'_>> {
        self.persons
            .iter()
            .find(|p| p.matches_search(search))
            .map(|p| PersonRef::new(p, self))
            .ok_or_else(|| GenealogyError::PersonNotFound {
                search: search.to_string(),
            })
    }

    /// Find a person by ID or UUID only
    ///
    /// # Errors
    ///
    /// Returns `IdNotFound` if the identifier does not resolve.
    pub fn get_by_id(&self, id: &str) -> Result<PersonRef<'_>> {
        self.persons
            .iter()
            .find(|p| p.matches_id_uuid(&[id]))
            .map(|p| PersonRef::new(p, self))
            .ok_or_else(|| GenealogyError::IdNotFound { id: id.to_string() })
    }

    /// Resolve a parent reference: empty means unknown, not an error
    ///
    /// # Errors
    ///
    /// Returns `IdNotFound` for a non-empty identifier that does not resolve.
    pub fn resolve(&self, id: &str) -> Result<PersonRef<'_>> {
        if id.is_empty() {
            return Ok(self.placeholder());
        }
        self.get_by_id(id)
    }

    /// Add the persons and sources of one database file
    ///
    /// Persons without sources inherit the file's default sources. A person
    /// whose identity key (ID, UUID or generated four-four-year ID) matches
    /// an already known person is not added; it only fills an empty `mom` or
    /// `dad` of the known record.
    pub fn ingest(&mut self, file: DatabaseFile) -> IngestReport {
        let DatabaseFile {
            persons,
            sources,
            default_sources,
        } = file;
        let mut report = IngestReport::default();

        // first pass: resolve duplicates against known and pending records
        let mut pending: Vec<Person> = Vec::with_capacity(persons.len());
        for mut person in persons {
            if person.sources.is_empty() {
                person.sources = default_sources.clone();
            }

            let key = best_id(&person);
            let existing = if key.is_empty() {
                None
            } else {
                self.persons
                    .iter_mut()
                    .chain(pending.iter_mut())
                    .find(|p| p.matches_search(&key))
            };

            if let Some(existing) = existing {
                tracing::info!(
                    person_id = %key,
                    name = %Sensitive::new(person.name.format_full()),
                    "duplicate person"
                );
                if existing.dad.is_empty() {
                    existing.dad = person.dad;
                }
                if existing.mom.is_empty() {
                    existing.mom = person.mom;
                }
                report.merged += 1;
                continue;
            }

            tracing::trace!(person_id = %key, "adding person");
            pending.push(person);
        }

        // second pass: commit
        report.added = pending.len();
        self.persons.extend(pending);
        self.sources.extend(sources);
        report
    }

    /// Serializable form of the whole collection
    pub fn to_file(&self) -> DatabaseFile {
        DatabaseFile {
            persons: self.persons.clone(),
            sources: self.sources.clone(),
            default_sources: Vec::new(),
        }
    }

    /// Give every person lacking an ID a generated one
    ///
    /// Manually assigned IDs are never touched. Persons for which the
    /// strategy derives nothing, or an ID that is already taken, stay without
    /// an ID. Returns the number of IDs assigned.
    pub fn assign_ids(&mut self, strategy: IdStrategy) -> usize {
        let mut assigned = 0;
        for index in 0..self.persons.len() {
            if !self.persons[index].id.is_empty() {
                continue;
            }
            let id = strategy.generate(&self.persons[index]);
            if id.is_empty() {
                continue;
            }
            if self.persons.iter().any(|p| p.matches_id_uuid(&[id.as_str()])) {
                tracing::warn!(person_id = %id, strategy = %strategy, "generated ID already taken");
                continue;
            }
            self.persons[index].id = id;
            assigned += 1;
        }
        assigned
    }

    /// Anonymize every person born in or after `cutoff_year`
    ///
    /// Returns the number of persons changed.
    pub fn anonymize(&mut self, cutoff_year: i32) -> usize {
        let mut changed = 0;
        for person in self.persons.iter_mut() {
            if !is_recent(person, cutoff_year) {
                continue;
            }
            anonymize_person(person);
            changed += 1;
        }
        changed
    }
}
