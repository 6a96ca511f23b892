//! Privacy pass for recent persons

use crate::model::date_place::first_chars;
use crate::model::{DatePlace, Name, Person};

/// Persons born in or after this year are anonymized by default
pub const DEFAULT_CUTOFF_YEAR: i32 = 1880;

/// Birth year from the first four characters of the birth date
fn birth_year(person: &Person) -> Option<i32> {
    first_chars(&person.birth.date, 4).parse().ok()
}

/// True if `person` falls under the anonymization policy
///
/// A person without a readable birth year is treated as recent.
pub fn is_recent(person: &Person, cutoff_year: i32) -> bool {
    match birth_year(person) {
        Some(year) => year >= cutoff_year,
        None => true,
    }
}

fn truncate_to_year(date: &mut String) {
    let year = first_chars(date, 4).to_string();
    *date = year;
}

/// Reduce a person to initials, years and relations
pub fn anonymize_person(person: &mut Person) {
    let initial = {
        let given = person.name.used_first();
        if person.name.first.is_empty() {
            None
        } else {
            Some(format!("{}.", first_chars(given, 1)))
        }
    };
    person.name = match initial {
        Some(initial) => Name {
            first: vec![initial],
            ..Default::default()
        },
        None => Name::default(),
    };

    person.birth.place.clear();
    truncate_to_year(&mut person.birth.date);
    person.death.place.clear();
    truncate_to_year(&mut person.death.date);
    person.baptism = DatePlace::default();
    person.burial = DatePlace::default();

    person.jobs.clear();
    person.floruit.clear();
    person.comment.clear();
    person.sources.clear();

    for partnership in &mut person.partners {
        partnership.engagement = DatePlace::default();
        partnership.marriage.place.clear();
        truncate_to_year(&mut partnership.marriage.date);
        partnership.divorce.place.clear();
        truncate_to_year(&mut partnership.divorce.date);
    }
}
