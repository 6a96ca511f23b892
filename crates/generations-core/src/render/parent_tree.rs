use serde::Serialize;

use crate::errors::Result;
use crate::queries::PersonRef;
use crate::render::options::{GenderOrder, NodeType};
use crate::render::template::TemplateKind;
use crate::render::text::collapse_blank_lines;
use crate::render::tree::{push_fragment, TreeRenderer};

/// Data record of the parent-tree templates
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParentTreeData {
    /// `family-<id>`, empty with `hide_family_ids`
    pub family_id: String,
    /// The anchor node
    pub g: String,
    pub parents: String,
    pub siblings_older: String,
    pub siblings_younger: String,
    pub level: i32,
}

impl TreeRenderer<'_> {
    /// Ancestry of `person` at traversal depth `level`
    ///
    /// Ignored persons and the placeholder end the recursion with an empty
    /// fragment. A person above the proband without rendered parents
    /// collapses to its bare node.
    ///
    /// # Errors
    ///
    /// Lookup and template failures, annotated with every person on the way.
    pub fn parent_tree(
        &self,
        person: PersonRef<'_>,
        base_node_type: NodeType,
        level: i32,
        headless: bool,
    ) -> Result<String> {
        self.parent_tree_inner(person, base_node_type, level, headless)
            .map_err(|e| e.in_subtree(person.id.clone(), "parent tree"))
    }

    fn parent_tree_inner(
        &self,
        person: PersonRef<'_>,
        base_node_type: NodeType,
        level: i32,
        headless: bool,
    ) -> Result<String> {
        if person.is_placeholder() || self.is_ignored(&person) {
            return Ok(String::new());
        }
        tracing::trace!(person_id = %person.id, level, "parent tree");

        let options = self.options();
        let mut data = ParentTreeData {
            level,
            ..Default::default()
        };

        if level < options.max_parent_generations {
            let mom = person.mom()?;
            let dad = person.dad()?;
            let parents = match options.gender_order {
                GenderOrder::MaleFirst => [dad, mom],
                GenderOrder::FemaleFirst => [mom, dad],
            };
            for parent in parents {
                if parent.is_placeholder() {
                    continue;
                }
                let fragment = self.parent_tree(parent, NodeType::P, level + 1, false)?;
                push_fragment(&mut data.parents, &fragment);
            }

            if level <= options.max_parent_siblings_generations {
                let (older, younger) = self.siblings(person, mom, dad)?;
                data.siblings_older = self.person_slice(&older, NodeType::C)?;
                data.siblings_younger = self.person_slice(&younger, NodeType::C)?;
            }
        }

        // a node with ancestry is always the anchor of its group
        let node_type = if data.parents.is_empty() {
            base_node_type
        } else {
            NodeType::G
        };
        data.g = self.person(person, node_type, false)?;
        if !options.hide_family_ids {
            data.family_id = format!("family-{}", person.id);
        }

        if data.parents.is_empty() && level > 0 {
            return Ok(data.g);
        }

        let kind = if headless {
            TemplateKind::ParentTreeHeadless
        } else {
            TemplateKind::ParentTree
        };
        let text = self
            .render_template(kind, &data)
            .map_err(|e| e.for_person(&person.id))?;
        Ok(collapse_blank_lines(&text))
    }
}
