//! Rendering limits and display filters
//!
//! Deserialized from kebab-case YAML (`max-parent-generations`,
//! `render-person-options`, ...). Template data sees the snake_case names.

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Depth value meaning "zero generations"
pub const GENERATIONS_NONE: i32 = -1;

/// Depth substituted for an unset (zero) limit
pub const GENERATIONS_UNLIMITED: i32 = 1000;

/// Order in which the two parents of a person are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenderOrder {
    #[default]
    MaleFirst,
    FemaleFirst,
}

/// Which family names are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastnamePolicy {
    /// Birth name only, current name if no birth name is known
    Birth,
    /// Current name only
    Current,
    #[default]
    CurrentAndBirth,
}

/// Presentation role of a node in the genealogytree vocabulary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Anchor of a family group
    #[default]
    G,
    /// Parent or partner
    P,
    /// Child or sibling
    C,
}

/// Display options of a single person node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "kebab-case"), deny_unknown_fields)]
pub struct RenderPersonOptions {
    /// Set by the traversal for every node
    #[serde(skip_deserializing)]
    pub node_type: NodeType,

    /// Reference date (`YYYY-MM-DD`) for the age of living persons
    pub date: String,

    pub hide_root_node_highlighting: bool,
    pub lastname_policy: LastnamePolicy,

    pub hide_id: bool,
    /// Attributes to drop, `all` drops every attribute
    pub hide_attributes: Vec<String>,
    pub hide_gender: bool,
    pub hide_name: bool,
    pub hide_birth: bool,
    pub hide_baptism: bool,
    pub hide_death: bool,
    pub hide_death_age: bool,
    pub hide_burial: bool,
    pub hide_image: bool,
    pub hide_jobs: bool,
    pub hide_floruit: bool,
    pub hide_comment: bool,
    pub hide_engagement: bool,
    pub hide_marriage: bool,
    pub hide_divorce: bool,

    pub hide_places: bool,
    pub hide_middle_names: bool,
}

impl RenderPersonOptions {
    /// Hide everything but IDs and relations
    pub fn hide_all_data(&mut self) -> &mut Self {
        self.hide_attributes = vec!["all".to_string()];
        self.hide_gender = true;
        self.hide_name = true;
        self.hide_birth = true;
        self.hide_baptism = true;
        self.hide_image = true;
        self.hide_death = true;
        self.hide_burial = true;
        self.hide_jobs = true;
        self.hide_floruit = true;
        self.hide_comment = true;
        self.hide_engagement = true;
        self.hide_marriage = true;
        self.hide_divorce = true;
        self
    }

    /// Copy of these options for a node of the given role
    pub fn with_node_type(&self, node_type: NodeType) -> Self {
        Self {
            node_type,
            ..self.clone()
        }
    }

    /// True if `attribute` must not be shown
    pub fn hides_attribute(&self, attribute: &str) -> bool {
        self.hide_attributes
            .iter()
            .any(|hidden| hidden == "all" || hidden == attribute)
    }
}

/// Limits and filters of one tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "kebab-case"), deny_unknown_fields)]
pub struct RenderTreeOptions {
    pub render_person_options: RenderPersonOptions,

    pub gender_order: GenderOrder,

    /// IDs or `"first last"` searches of persons left out with their subtrees
    #[serde(rename(deserialize = "ignore"))]
    pub ignore_ids: Vec<String>,
    pub max_parent_generations: i32,
    pub max_parent_siblings_generations: i32,
    pub max_child_generations: i32,
    pub max_child_partners_generations: i32,

    pub hide_family_ids: bool,
    /// Render the top level parent tree without its own anchor node
    pub headless_parent_tree: bool,

    /// Resolved level styles, filled in from the level configuration
    #[serde(skip_deserializing)]
    pub levels: Vec<Level>,
}

impl RenderTreeOptions {
    /// Replace unset (zero) depth limits by [`GENERATIONS_UNLIMITED`]
    pub fn set_defaults(&mut self) -> &mut Self {
        for limit in [
            &mut self.max_parent_generations,
            &mut self.max_parent_siblings_generations,
            &mut self.max_child_generations,
            &mut self.max_child_partners_generations,
        ] {
            if *limit == 0 {
                *limit = GENERATIONS_UNLIMITED;
            }
        }
        self
    }
}
