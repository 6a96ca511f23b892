use serde::Serialize;

use generations_core_types::RunId;

use crate::errors::Result;
use crate::model::Person;
use crate::queries::{split_persons, PersonRef};
use crate::render::options::{NodeType, RenderTreeOptions, GENERATIONS_NONE};
use crate::render::person_view::{PersonData, PersonView};
use crate::render::template::{TemplateEngine, TemplateKind};
use crate::render::text::{collapse_blank_lines, strip_comment_lines};
use crate::{log_op_end, log_op_error, log_op_start};

/// Data record of the outer tree template
#[derive(Debug, Clone, Serialize)]
pub struct TreeData<'o> {
    pub parent_tree: String,
    pub child_tree: String,
    pub siblings_older: String,
    pub siblings_younger: String,
    pub options: &'o RenderTreeOptions,
}

/// Traversal state shared by all recursion levels of one render
pub struct TreeRenderer<'e> {
    options: RenderTreeOptions,
    engine: &'e dyn TemplateEngine,
}

impl<'e> TreeRenderer<'e> {
    /// Prepare a render; unset depth limits become unlimited
    pub fn new(options: &RenderTreeOptions, engine: &'e dyn TemplateEngine) -> Self {
        let mut options = options.clone();
        options.set_defaults();
        Self { options, engine }
    }

    pub fn options(&self) -> &RenderTreeOptions {
        &self.options
    }

    /// True if `person` matches an entry of the ignore list
    pub fn is_ignored(&self, person: &Person) -> bool {
        self.options
            .ignore_ids
            .iter()
            .any(|search| person.matches_search(search))
    }

    pub(crate) fn non_ignored<'a>(&self, persons: Vec<PersonRef<'a>>) -> Vec<PersonRef<'a>> {
        persons
            .into_iter()
            .filter(|p| !self.is_ignored(p))
            .collect()
    }

    pub(crate) fn render_template<T: Serialize>(
        &self,
        kind: TemplateKind,
        data: &T,
    ) -> Result<String> {
        let value = serde_json::to_value(data)?;
        self.engine.render(kind, &value)
    }

    /// Fragment of a single person node
    ///
    /// # Errors
    ///
    /// `Template` errors carry the person's ID.
    pub fn person(
        &self,
        person: PersonRef<'_>,
        node_type: NodeType,
        root: bool,
    ) -> Result<String> {
        let options = self.options.render_person_options.with_node_type(node_type);
        let data = PersonData {
            person: PersonView::new(&person, &options, root),
            options,
        };
        let text = self
            .render_template(TemplateKind::Person, &data)
            .map_err(|e| e.for_person(&person.id))?;
        Ok(strip_comment_lines(&collapse_blank_lines(&text)))
    }

    /// Adjacent person fragments of the given role
    pub(crate) fn person_slice(
        &self,
        persons: &[PersonRef<'_>],
        node_type: NodeType,
    ) -> Result<String> {
        let mut out = String::new();
        for person in persons {
            out.push_str(&self.person(*person, node_type, false)?);
        }
        Ok(out)
    }

    /// Older and younger siblings of `person`, ignore list applied
    ///
    /// Siblings share both parents, or the one known parent.
    pub(crate) fn siblings<'a>(
        &self,
        person: PersonRef<'a>,
        mom: PersonRef<'a>,
        dad: PersonRef<'a>,
    ) -> Result<(Vec<PersonRef<'a>>, Vec<PersonRef<'a>>)> {
        let siblings = if !mom.is_placeholder() {
            mom.children_with(&dad)?
        } else if !dad.is_placeholder() {
            dad.children_with(&person.database().placeholder())?
        } else {
            Vec::new()
        };
        let siblings = self.non_ignored(siblings);
        Ok(split_persons(&siblings, &person))
    }

    /// The complete tree around `proband`
    ///
    /// # Errors
    ///
    /// The first lookup or template failure anywhere in the tree.
    pub fn tree(&self, proband: PersonRef<'_>) -> Result<String> {
        let parent_tree =
            self.parent_tree(proband, NodeType::G, 0, self.options.headless_parent_tree)?;
        let child_tree = self.child_tree(proband, NodeType::G, 0)?;

        let (siblings_older, siblings_younger) =
            if self.options.max_parent_siblings_generations != GENERATIONS_NONE {
                self.proband_siblings(proband)
                    .map_err(|e| e.in_subtree(proband.id.clone(), "siblings"))?
            } else {
                (String::new(), String::new())
            };

        let data = TreeData {
            parent_tree,
            child_tree,
            siblings_older,
            siblings_younger,
            options: &self.options,
        };
        let text = self
            .render_template(TemplateKind::Tree, &data)
            .map_err(|e| e.for_person(&proband.id))?;
        Ok(collapse_blank_lines(&text))
    }

    fn proband_siblings(&self, proband: PersonRef<'_>) -> Result<(String, String)> {
        let (older, younger) = self.siblings(proband, proband.mom()?, proband.dad()?)?;
        Ok((
            self.person_slice(&older, NodeType::C)?,
            self.person_slice(&younger, NodeType::C)?,
        ))
    }
}

/// Append a fragment on its own line, skipping empty ones
pub(crate) fn push_fragment(out: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    out.push_str(fragment);
    out.push('\n');
}

/// Render the complete tree around `proband`
///
/// Runs inside a tracing span carrying a fresh run ID.
///
/// # Errors
///
/// The first lookup or template failure anywhere in the tree; no partial
/// output is returned.
pub fn render_tree(
    proband: PersonRef<'_>,
    options: &RenderTreeOptions,
    engine: &dyn TemplateEngine,
) -> Result<String> {
    let run_id = RunId::new();
    let span = tracing::info_span!("render_tree", run_id = %run_id, proband = %proband.id);
    let _guard = span.enter();

    let started = log_op_start!("render_tree", proband = %proband.id);

    let result = TreeRenderer::new(options, engine).tree(proband);
    match &result {
        Ok(text) => {
            log_op_end!("render_tree", started, fragment_len = text.len());
        }
        Err(err) => {
            log_op_error!("render_tree", started, err.clone(), proband = %proband.id);
        }
    }
    result
}

/// Parent-ward fragment of `proband` only
///
/// # Errors
///
/// The first lookup or template failure in the ancestry.
pub fn render_parent_subtree(
    proband: PersonRef<'_>,
    options: &RenderTreeOptions,
    engine: &dyn TemplateEngine,
) -> Result<String> {
    let renderer = TreeRenderer::new(options, engine);
    renderer.parent_tree(proband, NodeType::G, 0, options.headless_parent_tree)
}

/// Child-ward fragment of `proband` only
///
/// # Errors
///
/// The first lookup or template failure in the descendants.
pub fn render_child_subtree(
    proband: PersonRef<'_>,
    options: &RenderTreeOptions,
    engine: &dyn TemplateEngine,
) -> Result<String> {
    TreeRenderer::new(options, engine).child_tree(proband, NodeType::G, 0)
}

/// Fragment of a single person node with the tree's person options
///
/// # Errors
///
/// `Template` if the person template fails.
pub fn render_person(
    person: PersonRef<'_>,
    node_type: NodeType,
    options: &RenderTreeOptions,
    engine: &dyn TemplateEngine,
) -> Result<String> {
    TreeRenderer::new(options, engine).person(person, node_type, false)
}
