//! Template-facing record of one person node

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{DatePlace, Name, Person};
use crate::render::options::{LastnamePolicy, RenderPersonOptions};

/// Attribute marking the proband of a child tree
pub const ROOT_NODE_ATTRIBUTE: &str = "rootnode";

/// A life event as seen by templates; every field is always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub date: String,
    pub place: String,
    /// Date or place recorded
    pub known: bool,
}

impl EventView {
    fn new(event: &DatePlace, hidden: bool, hide_place: bool) -> Self {
        if hidden {
            return Self::default();
        }
        let place = if hide_place {
            String::new()
        } else {
            event.place.clone()
        };
        Self {
            known: !event.date.is_empty() || !place.is_empty(),
            date: event.date.clone(),
            place,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameView {
    pub title: String,
    pub first: Vec<String>,
    pub used: String,
    pub last: String,
    pub birth: String,
    pub alias: String,
    pub nick: String,
    pub used_first: String,
    pub full: String,
    pub full_inverse: String,
    pub full_no_middle: String,
}

impl NameView {
    fn new(name: &Name, options: &RenderPersonOptions) -> Self {
        if options.hide_name {
            return Self::default();
        }
        let mut name = name.clone();
        if options.hide_middle_names {
            let used_first = name.used_first().to_string();
            name.first = if used_first.is_empty() {
                Vec::new()
            } else {
                vec![used_first]
            };
            name.used.clear();
        }
        match options.lastname_policy {
            LastnamePolicy::Birth => {
                if !name.birth.is_empty() {
                    name.last = std::mem::take(&mut name.birth);
                }
            }
            LastnamePolicy::Current => name.birth.clear(),
            LastnamePolicy::CurrentAndBirth => {}
        }

        Self {
            used_first: name.used_first().to_string(),
            full: name.format_full(),
            full_inverse: name.format_full_inverse(),
            full_no_middle: name.format_full_no_middle(),
            title: name.title,
            first: name.first,
            used: name.used,
            last: name.last,
            birth: name.birth,
            alias: name.alias,
            nick: name.nick,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartnershipView {
    pub partner_id: String,
    pub engagement: EventView,
    pub marriage: EventView,
    pub divorce: EventView,
}

/// A person with the display options applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonView {
    pub id: String,
    pub uuid: String,
    pub placeholder: bool,
    pub child_number: i32,
    /// `male`, `female`, or empty
    pub gender: String,
    pub name: NameView,
    pub birth: EventView,
    pub baptism: EventView,
    pub death: EventView,
    pub burial: EventView,
    /// Age at the reference date for living persons, -1 if unknown
    pub age: i32,
    /// Age at death, -1 if unknown
    pub death_age: i32,
    pub attributes: Vec<String>,
    /// Attributes joined by `, ` for use as node option keys
    pub attribute_keys: String,
    pub image: String,
    pub floruit: String,
    pub jobs: String,
    pub comment: String,
    pub partners: Vec<PartnershipView>,
}

impl PersonView {
    /// Build the view of `person`; `root` marks the proband of a child tree
    pub fn new(person: &Person, options: &RenderPersonOptions, root: bool) -> Self {
        let hide_places = options.hide_places;

        let mut attributes: Vec<String> = person
            .attributes()
            .into_iter()
            .filter(|a| !options.hides_attribute(a))
            .collect();
        if root
            && !options.hide_root_node_highlighting
            && !attributes.iter().any(|a| a == ROOT_NODE_ATTRIBUTE)
        {
            attributes.push(ROOT_NODE_ATTRIBUTE.to_string());
        }

        let gender = match &person.gender {
            _ if options.hide_gender => String::new(),
            g if g.is_unknown() => String::new(),
            known => known.as_str().to_string(),
        };

        let death_age = if options.hide_death || options.hide_death_age || options.hide_birth {
            -1
        } else {
            person.death_age()
        };

        let is_dead = !person.death.is_empty() || !person.burial.is_empty();
        let age = match NaiveDate::parse_from_str(&options.date, "%Y-%m-%d") {
            Ok(at) if !is_dead && !options.hide_birth => person.age_at(at),
            _ => -1,
        };

        let partners = person
            .partners
            .iter()
            .map(|p| PartnershipView {
                partner_id: p.partner_id.clone(),
                engagement: EventView::new(&p.engagement, options.hide_engagement, hide_places),
                marriage: EventView::new(&p.marriage, options.hide_marriage, hide_places),
                divorce: EventView::new(&p.divorce, options.hide_divorce, hide_places),
            })
            .collect();

        let text = |value: &str, hidden: bool| {
            if hidden {
                String::new()
            } else {
                value.to_string()
            }
        };

        Self {
            id: text(&person.id, options.hide_id),
            uuid: text(&person.uuid, options.hide_id),
            placeholder: person.is_placeholder(),
            child_number: person.child_number,
            gender,
            name: NameView::new(&person.name, options),
            birth: EventView::new(&person.birth, options.hide_birth, hide_places),
            baptism: EventView::new(&person.baptism, options.hide_baptism, hide_places),
            death: EventView::new(&person.death, options.hide_death, hide_places),
            burial: EventView::new(&person.burial, options.hide_burial, hide_places),
            age,
            death_age,
            attribute_keys: attributes.join(", "),
            attributes,
            image: text(&person.image_filename, options.hide_image),
            floruit: text(&person.floruit, options.hide_floruit),
            jobs: text(&person.jobs, options.hide_jobs),
            comment: text(&person.comment, options.hide_comment),
            partners,
        }
    }
}

/// Data record of the person template
#[derive(Debug, Clone, Serialize)]
pub struct PersonData {
    pub person: PersonView,
    pub options: RenderPersonOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Partnership};

    fn gauss() -> Person {
        let mut p = Person::new("gauss");
        p.gender = Gender::Male;
        p.name.first = vec!["Johann".into(), "Carl".into(), "Friedrich".into()];
        p.name.used = "Carl".into();
        p.name.last = "Gauß".into();
        p.birth = DatePlace::new("1777-04-30", "Braunschweig");
        p.death = DatePlace::new("1855-02-23", "Göttingen");
        p.jobs = "Mathematiker".into();
        let mut marriage = Partnership::with("johanna");
        marriage.marriage = DatePlace::new("1805-10-09", "Braunschweig");
        p.partners = vec![marriage];
        p
    }

    #[test]
    fn test_full_view() {
        let view = PersonView::new(&gauss(), &RenderPersonOptions::default(), false);
        assert_eq!(view.id, "gauss");
        assert_eq!(view.gender, "male");
        assert_eq!(view.name.full, r#"Johann Carl Friedrich "Carl" Gauß"#);
        assert_eq!(view.birth.place, "Braunschweig");
        assert!(view.birth.known);
        assert!(!view.baptism.known);
        assert_eq!(view.death_age, 77);
        assert_eq!(view.age, -1);
        assert_eq!(view.attributes, vec!["dead".to_string()]);
        assert_eq!(view.partners[0].marriage.date, "1805-10-09");
    }

    #[test]
    fn test_unrecognized_gender_renders_empty() {
        let mut p = gauss();
        p.gender = Gender::from("m".to_string());
        let view = PersonView::new(&p, &RenderPersonOptions::default(), false);
        assert_eq!(view.gender, "");
    }

    #[test]
    fn test_hidden_places_and_middle_names() {
        let options = RenderPersonOptions {
            hide_places: true,
            hide_middle_names: true,
            ..Default::default()
        };
        let view = PersonView::new(&gauss(), &options, false);
        assert_eq!(view.birth.place, "");
        assert_eq!(view.birth.date, "1777-04-30");
        assert_eq!(view.partners[0].marriage.place, "");
        assert_eq!(view.name.first, vec!["Carl".to_string()]);
        assert_eq!(view.name.full, "Carl Gauß");
    }

    #[test]
    fn test_lastname_policy() {
        let mut anna = Person::new("anna");
        anna.name.first = vec!["Anna".into()];
        anna.name.last = "Gauß".into();
        anna.name.birth = "Müller".into();

        let birth = RenderPersonOptions {
            lastname_policy: LastnamePolicy::Birth,
            ..Default::default()
        };
        assert_eq!(PersonView::new(&anna, &birth, false).name.full, "Anna Müller");

        let current = RenderPersonOptions {
            lastname_policy: LastnamePolicy::Current,
            ..Default::default()
        };
        assert_eq!(PersonView::new(&anna, &current, false).name.full, "Anna Gauß");

        let both = RenderPersonOptions::default();
        assert_eq!(
            PersonView::new(&anna, &both, false).name.full,
            "Anna Gauß, geb. Müller"
        );
    }

    #[test]
    fn test_hide_all_data() {
        let mut options = RenderPersonOptions::default();
        options.hide_all_data();
        let view = PersonView::new(&gauss(), &options, true);

        assert_eq!(view.id, "gauss");
        assert!(view.name.full.is_empty());
        assert!(!view.birth.known);
        assert!(view.jobs.is_empty());
        assert_eq!(view.death_age, -1);
        // root highlighting is independent of the attribute filter
        assert_eq!(view.attributes, vec!["rootnode".to_string()]);
    }

    #[test]
    fn test_root_highlighting_is_idempotent() {
        let mut p = gauss();
        p.add_attribute("rootnode");
        let view = PersonView::new(&p, &RenderPersonOptions::default(), true);
        assert_eq!(view.attribute_keys, "rootnode, dead");

        let suppressed = RenderPersonOptions {
            hide_root_node_highlighting: true,
            ..Default::default()
        };
        let view = PersonView::new(&gauss(), &suppressed, true);
        assert_eq!(view.attributes, vec!["dead".to_string()]);
    }

    #[test]
    fn test_age_at_reference_date() {
        let mut living = gauss();
        living.death = DatePlace::default();
        let options = RenderPersonOptions {
            date: "1800-05-01".into(),
            ..Default::default()
        };
        assert_eq!(PersonView::new(&living, &options, false).age, 23);
        assert_eq!(PersonView::new(&gauss(), &options, false).age, -1);
    }
}
