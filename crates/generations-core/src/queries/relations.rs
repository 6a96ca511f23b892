//! Relationship derivation
//!
//! Only `mom`/`dad` identifiers and explicit partnerships are stored. Children,
//! co-parents and partners are derived on demand by scanning the collection.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use crate::errors::Result;
use crate::model::Person;
use crate::ops::Database;

/// A person together with the collection it belongs to
///
/// Cheap to copy. All relationship queries go through this view so that
/// persons never hold a reference to their database.
#[derive(Clone, Copy)]
pub struct PersonRef<'a> {
    person: &'a Person,
    db: &'a Database,
}

impl<'a> PersonRef<'a> {
    pub(crate) fn new(person: &'a Person, db: &'a Database) -> Self {
        Self { person, db }
    }

    pub fn person(&self) -> &'a Person {
        self.person
    }

    pub fn database(&self) -> &'a Database {
        self.db
    }

    /// Same identity (by ID) as `other`
    pub fn same_as(&self, other: &PersonRef<'_>) -> bool {
        self.person.id == other.person.id
    }

    /// Mother, or the placeholder when unknown
    ///
    /// # Errors
    ///
    /// `IdNotFound` if a mother is recorded but not in the collection.
    pub fn mom(&self) -> Result<PersonRef<'a>> {
        self.db.resolve(&self.person.mom)
    }

    /// Father, or the placeholder when unknown
    ///
    /// # Errors
    ///
    /// `IdNotFound` if a father is recorded but not in the collection.
    pub fn dad(&self) -> Result<PersonRef<'a>> {
        self.db.resolve(&self.person.dad)
    }

    /// True if `child` names this person as mom or dad
    fn is_parent_of(&self, child: &Person) -> bool {
        self.person.matches_id_uuid(&[child.mom.as_str()])
            || self.person.matches_id_uuid(&[child.dad.as_str()])
    }

    /// Identifier of the parent of `child` that is not this person
    fn other_parent_id<'c>(&self, child: &'c Person) -> &'c str {
        if self.person.matches_id_uuid(&[child.mom.as_str()]) {
            &child.dad
        } else {
            &child.mom
        }
    }

    /// All children, ordered by child number, then birth date
    pub fn children(&self) -> Vec<PersonRef<'a>> {
        if self.person.is_placeholder() {
            return Vec::new();
        }
        let mut children: Vec<PersonRef<'a>> = self
            .db
            .persons()
            .iter()
            .filter(|candidate| self.is_parent_of(candidate))
            .map(|child| PersonRef::new(child, self.db))
            .collect();
        children.sort_by(|a, b| {
            a.child_number
                .cmp(&b.child_number)
                .then_with(|| a.birth.date.cmp(&b.birth.date))
        });
        children
    }

    /// Children whose other parent is `partner`
    ///
    /// With the placeholder as `partner`, the children whose other parent is
    /// unknown.
    ///
    /// # Errors
    ///
    /// `IdNotFound` if a child's other parent is recorded but unknown.
    pub fn children_with(&self, partner: &PersonRef<'_>) -> Result<Vec<PersonRef<'a>>> {
        let mut result = Vec::new();
        for child in self.children() {
            let other = self.db.resolve(self.other_parent_id(child.person))?;
            let matches = if partner.is_placeholder() {
                other.is_placeholder()
            } else {
                !other.is_placeholder() && other.same_as(partner)
            };
            if matches {
                result.push(child);
            }
        }
        Ok(result)
    }

    /// The other parent of every child, first seen first, each once
    ///
    /// Children with an unknown other parent contribute the placeholder,
    /// which appears at most once.
    ///
    /// # Errors
    ///
    /// `IdNotFound` if a child's other parent is recorded but unknown.
    pub fn children_parents(&self) -> Result<Vec<PersonRef<'a>>> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for child in self.children() {
            let other = self.db.resolve(self.other_parent_id(child.person))?;
            if seen.insert(other.id.clone()) {
                result.push(other);
            }
        }
        Ok(result)
    }

    /// Partners from shared children and explicit partnerships
    ///
    /// Children-derived partners are listed before explicit ones, duplicates
    /// (by ID) are dropped, and the merged list is then reversed.
    ///
    /// # Errors
    ///
    /// `IdNotFound` if an explicit partner or a child's other parent does not
    /// resolve.
    pub fn partners(&self) -> Result<Vec<PersonRef<'a>>> {
        let mut merged = self.children_parents()?;
        for partnership in &self.person.partners {
            merged.push(self.db.get_by_id(&partnership.partner_id)?);
        }

        let mut seen = HashSet::new();
        let mut result: Vec<PersonRef<'a>> = merged
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        result.reverse();
        Ok(result)
    }
}

impl Deref for PersonRef<'_> {
    type Target = Person;

    fn deref(&self) -> &Person {
        self.person
    }
}

impl fmt::Debug for PersonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PersonRef").field(&self.person.id).finish()
    }
}

impl fmt::Display for PersonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.person, f)
    }
}

/// Split `persons` around `split` into (older, younger)
///
/// Everyone before the first ID match is older, everyone after it younger.
/// Without a match the whole list counts as older.
pub fn split_persons<'a>(
    persons: &[PersonRef<'a>],
    split: &PersonRef<'_>,
) -> (Vec<PersonRef<'a>>, Vec<PersonRef<'a>>) {
    match persons.iter().position(|p| p.same_as(split)) {
        Some(index) => (persons[..index].to_vec(), persons[index + 1..].to_vec()),
        None => (persons.to_vec(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DatePlace, Partnership};

    fn child(id: &str, mom: &str, dad: &str, birth: &str) -> Person {
        let mut p = Person::new(id);
        p.mom = mom.to_string();
        p.dad = dad.to_string();
        p.birth = DatePlace::new(birth, "");
        p
    }

    fn family() -> Database {
        Database::from_persons(vec![
            Person::new("mom"),
            Person::new("dad"),
            child("late", "mom", "dad", "1990-01-01"),
            child("early", "mom", "dad", "1980-01-01"),
            child("half", "mom", "", "1985-01-01"),
        ])
    }

    #[test]
    fn test_children_sorted_by_birth() {
        let db = family();
        let mom = db.get("mom").unwrap();
        let ids: Vec<_> = mom.children().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec!["early", "half", "late"]);
    }

    #[test]
    fn test_child_number_wins_over_birth_date() {
        let mut db = family();
        let mut twin = child("twin", "mom", "dad", "1980-01-01");
        twin.child_number = -1;
        db.insert_person(twin);

        let mom = db.get("mom").unwrap();
        assert_eq!(mom.children()[0].id, "twin");
    }

    #[test]
    fn test_children_with_partner_and_placeholder() {
        let db = family();
        let mom = db.get("mom").unwrap();
        let dad = db.get("dad").unwrap();

        let shared: Vec<_> = mom
            .children_with(&dad)
            .unwrap()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(shared, vec!["early", "late"]);

        let unknown_dad = mom.children_with(&db.placeholder()).unwrap();
        assert_eq!(unknown_dad.len(), 1);
        assert_eq!(unknown_dad[0].id, "half");
    }

    #[test]
    fn test_children_parents_dedupes_placeholder() {
        let mut db = family();
        db.insert_person(child("half2", "mom", "", "1986-01-01"));
        let mom = db.get("mom").unwrap();

        let parents = mom.children_parents().unwrap();
        assert_eq!(parents.len(), 2);
        assert_eq!(parents[0].id, "dad");
        assert!(parents[1].is_placeholder());
    }

    #[test]
    fn test_unresolved_parent_is_error() {
        let db = Database::from_persons(vec![child("orphan", "ghost", "", "")]);
        let orphan = db.get("orphan").unwrap();
        assert!(orphan.mom().is_err());
        assert!(orphan.dad().unwrap().is_placeholder());
    }

    #[test]
    fn test_partners_without_children_are_explicit_only() {
        let mut single = Person::new("p");
        single.partners = vec![Partnership::with("a"), Partnership::with("b")];
        let db = Database::from_persons(vec![single, Person::new("a"), Person::new("b")]);

        let p = db.get("p").unwrap();
        assert!(p.children_parents().unwrap().is_empty());
        let ids: Vec<_> = p.partners().unwrap().iter().map(|x| x.id.clone()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_split_persons() {
        let db = family();
        let mom = db.get("mom").unwrap();
        let children = mom.children();
        let half = db.get("half").unwrap();

        let (older, younger) = split_persons(&children, &half);
        assert_eq!(older.len(), 1);
        assert_eq!(older[0].id, "early");
        assert_eq!(younger.len(), 1);
        assert_eq!(younger[0].id, "late");

        let stranger = db.get("dad").unwrap();
        let (older, younger) = split_persons(&children, &stranger);
        assert_eq!(older.len(), 3);
        assert!(younger.is_empty());
    }
}
