use generations_core::render::{RenderTreeOptions, StringTemplates, TemplateKind};
use generations_core::{Database, DatePlace, Gender, Partnership, Person};

/// Builder for test persons
///
/// Only the fields the relation and traversal tests care about.
#[allow(dead_code)]
pub struct PersonBuilder {
    person: Person,
}

#[allow(dead_code)]
impl PersonBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            person: Person::new(id),
        }
    }

    pub fn male(mut self) -> Self {
        self.person.gender = Gender::Male;
        self
    }

    pub fn female(mut self) -> Self {
        self.person.gender = Gender::Female;
        self
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.person.name.first = first.split_whitespace().map(str::to_string).collect();
        self.person.name.last = last.to_string();
        self
    }

    pub fn mom(mut self, mom: &str) -> Self {
        self.person.mom = mom.to_string();
        self
    }

    pub fn dad(mut self, dad: &str) -> Self {
        self.person.dad = dad.to_string();
        self
    }

    pub fn born(mut self, date: &str) -> Self {
        self.person.birth = DatePlace::new(date, "");
        self
    }

    pub fn partner(mut self, partner_id: &str) -> Self {
        self.person.partners.push(Partnership::with(partner_id));
        self
    }

    pub fn build(self) -> Person {
        self.person
    }
}

/// Database of the given persons, in order
#[allow(dead_code)]
pub fn database(persons: Vec<PersonBuilder>) -> Database {
    Database::from_persons(persons.into_iter().map(PersonBuilder::build).collect())
}

/// Minimal templates that only show node roles and IDs
#[allow(dead_code)]
pub fn test_templates() -> StringTemplates {
    StringTemplates::new()
        .with(
            TemplateKind::Person,
            "{{ options.node_type }}[id={{ person.id }},]{}",
        )
        .with(
            TemplateKind::ParentTree,
            "parent{ {{ g }} {{ siblings_older }} {{ siblings_younger }} {{ parents }} }",
        )
        .with(TemplateKind::ParentTreeHeadless, "{{ parents }}")
        .with(
            TemplateKind::ChildTree,
            "child{ {{ g }} {{ partner }} {{ children }} {{ unions }} }",
        )
        .with(TemplateKind::UnionTree, "union{ {{ partner }} {{ children }} }")
        .with(
            TemplateKind::Tree,
            "sandclock{ {{ siblings_older }} {{ parent_tree }} {{ child_tree }} {{ siblings_younger }} }",
        )
}

/// Tree options with every person detail hidden
#[allow(dead_code)]
pub fn bare_options() -> RenderTreeOptions {
    let mut options = RenderTreeOptions::default();
    options.render_person_options.hide_all_data();
    options.render_person_options.hide_root_node_highlighting = true;
    options.hide_family_ids = true;
    options
}

/// Rendered text reduced to its structure: no whitespace, no comment signs
#[allow(dead_code)]
pub fn semantic(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '%')
        .collect()
}

/// Expected fragment of a person node under [`test_templates`]
#[allow(dead_code)]
pub fn node(node_type: &str, id: &str) -> String {
    format!("{}[id={},]{{}}", node_type, id)
}
