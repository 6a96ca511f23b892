//! Template-substitution seam
//!
//! The traversal hands every fragment record to a [`TemplateEngine`] as a
//! `serde_json::Value`. Both bundled engines use the small substitution
//! language implemented here:
//!
//! - `{{ path.to.value }}` inserts a scalar; arrays of scalars are joined
//!   with a single space, `null` and `false` insert nothing
//! - `{{#path}}...{{/path}}` keeps its body if the value is truthy
//! - `{{^path}}...{{/path}}` keeps its body if the value is falsy
//!
//! Paths always resolve from the root of the data record. Unknown paths are
//! errors, so a typo in a template never silently drops data.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{GenealogyError, Result};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([#^/]?)\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("valid template tag regex")
});

/// The six templates a tree is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Tree,
    Person,
    ParentTree,
    ParentTreeHeadless,
    ChildTree,
    UnionTree,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 6] = [
        TemplateKind::Tree,
        TemplateKind::Person,
        TemplateKind::ParentTree,
        TemplateKind::ParentTreeHeadless,
        TemplateKind::ChildTree,
        TemplateKind::UnionTree,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Tree => "tree",
            TemplateKind::Person => "person",
            TemplateKind::ParentTree => "parent-tree",
            TemplateKind::ParentTreeHeadless => "parent-tree-headless",
            TemplateKind::ChildTree => "child-tree",
            TemplateKind::UnionTree => "union-tree",
        }
    }

    /// Conventional file name inside a template directory
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Tree => "tree.tpl",
            TemplateKind::Person => "person.tpl",
            TemplateKind::ParentTree => "parent_tree.tpl",
            TemplateKind::ParentTreeHeadless => "parent_tree_headless.tpl",
            TemplateKind::ChildTree => "child_tree.tpl",
            TemplateKind::UnionTree => "union_tree.tpl",
        }
    }

    /// Bundled genealogytree template
    pub fn default_text(&self) -> &'static str {
        match self {
            TemplateKind::Tree => include_str!("templates/tree.tpl"),
            TemplateKind::Person => include_str!("templates/person.tpl"),
            TemplateKind::ParentTree => include_str!("templates/parent_tree.tpl"),
            TemplateKind::ParentTreeHeadless => {
                include_str!("templates/parent_tree_headless.tpl")
            }
            TemplateKind::ChildTree => include_str!("templates/child_tree.tpl"),
            TemplateKind::UnionTree => include_str!("templates/union_tree.tpl"),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Substitution function the traversal delegates text production to
pub trait TemplateEngine {
    /// Render the template of `kind` with `data`
    ///
    /// # Errors
    ///
    /// `Template` if the template is missing, unreadable or does not fit
    /// the data.
    fn render(&self, kind: TemplateKind, data: &Value) -> Result<String>;
}

/// Engine over in-memory template texts
#[derive(Debug, Clone, Default)]
pub struct StringTemplates {
    templates: HashMap<TemplateKind, String>,
}

impl StringTemplates {
    /// An engine without any template
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled genealogytree templates
    pub fn defaults() -> Self {
        let templates = TemplateKind::ALL
            .iter()
            .map(|kind| (*kind, kind.default_text().to_string()))
            .collect();
        Self { templates }
    }

    /// Replace the template of `kind`
    pub fn with(mut self, kind: TemplateKind, text: impl Into<String>) -> Self {
        self.templates.insert(kind, text.into());
        self
    }

    pub fn get(&self, kind: TemplateKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }
}

impl TemplateEngine for StringTemplates {
    fn render(&self, kind: TemplateKind, data: &Value) -> Result<String> {
        let text = self.get(kind).ok_or_else(|| GenealogyError::Template {
            template: kind.name().to_string(),
            person_id: None,
            message: "no template configured".to_string(),
        })?;
        substitute(kind, text, data)
    }
}

/// Evaluate `template` against `data`
///
/// # Errors
///
/// `Template` for unbalanced sections, unknown paths and values that cannot
/// be inserted as text.
pub fn substitute(kind: TemplateKind, template: &str, data: &Value) -> Result<String> {
    let to_error = |message: String| GenealogyError::Template {
        template: kind.name().to_string(),
        person_id: None,
        message,
    };
    let nodes = parse(template).map_err(to_error)?;
    let mut out = String::with_capacity(template.len());
    render_nodes(&nodes, data, &mut out).map_err(to_error)?;
    Ok(out)
}

#[derive(Debug)]
enum Node {
    Text(String),
    Var(String),
    Section {
        path: String,
        inverted: bool,
        body: Vec<Node>,
    },
}

struct OpenSection {
    path: String,
    inverted: bool,
    body: Vec<Node>,
}

fn parse(template: &str) -> std::result::Result<Vec<Node>, String> {
    let mut root: Vec<Node> = Vec::new();
    let mut open: Vec<OpenSection> = Vec::new();
    let mut last = 0;

    for caps in TAG_RE.captures_iter(template) {
        let Some(tag) = caps.get(0) else { continue };
        let sigil = caps.get(1).map_or("", |m| m.as_str());
        let path = caps.get(2).map_or("", |m| m.as_str()).to_string();

        let target = open.last_mut().map_or(&mut root, |s| &mut s.body);
        if tag.start() > last {
            target.push(Node::Text(template[last..tag.start()].to_string()));
        }
        last = tag.end();

        match sigil {
            "#" | "^" => open.push(OpenSection {
                path,
                inverted: sigil == "^",
                body: Vec::new(),
            }),
            "/" => {
                let section = open
                    .pop()
                    .ok_or_else(|| format!("closing tag '{}' without open section", path))?;
                if section.path != path {
                    return Err(format!(
                        "section '{}' closed by '{}'",
                        section.path, path
                    ));
                }
                let node = Node::Section {
                    path: section.path,
                    inverted: section.inverted,
                    body: section.body,
                };
                open.last_mut().map_or(&mut root, |s| &mut s.body).push(node);
            }
            _ => target.push(Node::Var(path)),
        }
    }

    if let Some(section) = open.last() {
        return Err(format!("section '{}' is never closed", section.path));
    }
    if last < template.len() {
        root.push(Node::Text(template[last..].to_string()));
    }
    Ok(root)
}

fn lookup<'v>(data: &'v Value, path: &str) -> std::result::Result<&'v Value, String> {
    let mut current = data;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| format!("unknown variable '{}'", path))?;
    }
    Ok(current)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn write_scalar(value: &Value, path: &str, out: &mut String) -> std::result::Result<(), String> {
    match value {
        Value::Null | Value::Bool(false) => {}
        Value::Bool(true) => out.push_str("true"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(_) | Value::Object(_) => {
            return Err(format!("variable '{}' is not a scalar", path));
        }
    }
    Ok(())
}

fn render_nodes(nodes: &[Node], data: &Value, out: &mut String) -> std::result::Result<(), String> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(path) => match lookup(data, path)? {
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        write_scalar(item, path, out)?;
                    }
                }
                value => write_scalar(value, path, out)?,
            },
            Node::Section {
                path,
                inverted,
                body,
            } => {
                if is_truthy(lookup(data, path)?) != *inverted {
                    render_nodes(body, data, out)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(template: &str, data: Value) -> Result<String> {
        substitute(TemplateKind::Person, template, &data)
    }

    #[test]
    fn test_variables() {
        let data = json!({
            "person": { "id": "gauss", "age": 77, "first": ["Carl", "Friedrich"], "dead": true },
            "empty": null
        });
        assert_eq!(
            eval("{{ person.id }}/{{person.age}}/{{ person.first }}/{{ empty }}", data.clone())
                .unwrap(),
            "gauss/77/Carl Friedrich/"
        );
        assert_eq!(eval("{{ person.first.1 }}", data).unwrap(), "Friedrich");
    }

    #[test]
    fn test_sections() {
        let data = json!({ "id": "gauss", "place": "", "children": [] });
        assert_eq!(
            eval("{{#id}}[id={{ id }}]{{/id}}{{^place}}-{{/place}}{{#children}}x{{/children}}", data)
                .unwrap(),
            "[id=gauss]-"
        );
    }

    #[test]
    fn test_nested_sections() {
        let data = json!({ "a": true, "b": false });
        assert_eq!(
            eval("{{#a}}A{{^b}}notB{{/b}}{{/a}}", data).unwrap(),
            "AnotB"
        );
    }

    #[test]
    fn test_unknown_variable_is_template_error() {
        let err = eval("{{ person.nmae }}", json!({ "person": {} })).unwrap_err();
        match err {
            GenealogyError::Template {
                template, message, ..
            } => {
                assert_eq!(template, "person");
                assert!(message.contains("person.nmae"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_sections() {
        assert!(eval("{{#a}}x", json!({ "a": true })).is_err());
        assert!(eval("x{{/a}}", json!({ "a": true })).is_err());
        assert!(eval("{{#a}}x{{/b}}", json!({ "a": true, "b": true })).is_err());
    }

    #[test]
    fn test_object_is_not_a_scalar() {
        assert!(eval("{{ person }}", json!({ "person": { "id": "x" } })).is_err());
    }

    #[test]
    fn test_text_without_tags_is_unchanged() {
        assert_eq!(eval("parent{\n}\n", json!({})).unwrap(), "parent{\n}\n");
    }

    #[test]
    fn test_string_templates_missing_kind() {
        let engine = StringTemplates::new().with(TemplateKind::Person, "{{ id }}");
        assert_eq!(
            engine.render(TemplateKind::Person, &json!({ "id": "x" })).unwrap(),
            "x"
        );
        assert!(engine.render(TemplateKind::Tree, &json!({})).is_err());
    }

    #[test]
    fn test_bundled_defaults_are_complete() {
        let engine = StringTemplates::defaults();
        for kind in TemplateKind::ALL {
            assert!(engine.get(kind).is_some(), "missing default for {}", kind);
        }
    }
}
