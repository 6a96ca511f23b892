use serde::Serialize;

use crate::errors::Result;
use crate::queries::PersonRef;
use crate::render::options::NodeType;
use crate::render::template::TemplateKind;
use crate::render::text::collapse_blank_lines;
use crate::render::tree::{push_fragment, TreeRenderer};

/// Data record of the child-tree template
///
/// `partner` and `children` hold the union with the first partner, every
/// further union is rendered into `unions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChildTreeData {
    pub g: String,
    pub partner: String,
    pub children: String,
    pub unions: String,
    pub level: i32,
}

/// Data record of the union template: one partner and the shared children
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnionData {
    pub partner: String,
    pub children: String,
    pub level: i32,
}

impl UnionData {
    fn is_empty(&self) -> bool {
        self.partner.is_empty() && self.children.is_empty()
    }
}

impl TreeRenderer<'_> {
    /// Descendants of `person` at traversal depth `level`
    ///
    /// # Errors
    ///
    /// Lookup and template failures, annotated with every person on the way.
    pub fn child_tree(
        &self,
        person: PersonRef<'_>,
        base_node_type: NodeType,
        level: i32,
    ) -> Result<String> {
        self.child_tree_inner(person, base_node_type, level)
            .map_err(|e| e.in_subtree(person.id.clone(), "child tree"))
    }

    fn child_tree_inner(
        &self,
        person: PersonRef<'_>,
        base_node_type: NodeType,
        level: i32,
    ) -> Result<String> {
        if person.is_placeholder() || self.is_ignored(&person) {
            return Ok(String::new());
        }
        tracing::trace!(person_id = %person.id, level, "child tree");

        let mut data = ChildTreeData {
            level,
            ..Default::default()
        };

        let partners = self.non_ignored(person.partners()?);
        for (index, partner) in partners.into_iter().enumerate() {
            let union = self.union(person, partner, level)?;
            if index == 0 {
                data.partner = union.partner;
                data.children = union.children;
                continue;
            }
            if union.is_empty() {
                continue;
            }
            let text = self
                .render_template(TemplateKind::UnionTree, &union)
                .map_err(|e| e.for_person(&person.id))?;
            push_fragment(&mut data.unions, &collapse_blank_lines(&text));
        }

        let has_content =
            !data.partner.is_empty() || !data.children.is_empty() || !data.unions.is_empty();
        let node_type = if has_content {
            NodeType::G
        } else {
            base_node_type
        };
        data.g = self.person(person, node_type, level == 0)?;

        if !has_content && level > 0 {
            return Ok(data.g);
        }

        let text = self
            .render_template(TemplateKind::ChildTree, &data)
            .map_err(|e| e.for_person(&person.id))?;
        Ok(collapse_blank_lines(&text))
    }

    /// Partner node and shared children of `person` with `partner`
    ///
    /// The partner cap and the children cap apply independently.
    fn union(
        &self,
        person: PersonRef<'_>,
        partner: PersonRef<'_>,
        level: i32,
    ) -> Result<UnionData> {
        let options = self.options();
        let mut union = UnionData {
            level,
            ..Default::default()
        };

        if !partner.is_placeholder() && level < options.max_child_partners_generations {
            union.partner = self.person(partner, NodeType::P, false)?;
        }

        if level < options.max_child_generations {
            for child in person.children_with(&partner)? {
                let fragment = self.child_tree(child, NodeType::C, level + 1)?;
                push_fragment(&mut union.children, &fragment);
            }
        }
        Ok(union)
    }
}
