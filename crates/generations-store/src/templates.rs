//! Templates read from disk

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use generations_core::errors::{GenealogyError, Result as CoreResult};
use generations_core::render::{substitute, TemplateEngine, TemplateKind};

/// Optional template file per kind, as given in a render configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplatePaths {
    pub tree: Option<PathBuf>,
    pub person: Option<PathBuf>,
    pub parent_tree: Option<PathBuf>,
    pub parent_tree_headless: Option<PathBuf>,
    pub child_tree: Option<PathBuf>,
    pub union_tree: Option<PathBuf>,
}

impl TemplatePaths {
    pub fn get(&self, kind: TemplateKind) -> Option<&Path> {
        let path = match kind {
            TemplateKind::Tree => &self.tree,
            TemplateKind::Person => &self.person,
            TemplateKind::ParentTree => &self.parent_tree,
            TemplateKind::ParentTreeHeadless => &self.parent_tree_headless,
            TemplateKind::ChildTree => &self.child_tree,
            TemplateKind::UnionTree => &self.union_tree,
        };
        path.as_deref()
    }

    /// Make relative paths relative to `base` instead of the working directory
    pub fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.tree,
            &mut self.person,
            &mut self.parent_tree,
            &mut self.parent_tree_headless,
            &mut self.child_tree,
            &mut self.union_tree,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Engine reading each template file on every render call
///
/// Kinds without a file fall back to the bundled default template.
#[derive(Debug, Clone, Default)]
pub struct FileTemplates {
    paths: HashMap<TemplateKind, PathBuf>,
}

impl FileTemplates {
    /// An engine using only the bundled templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Use every `<kind file name>` present in `dir`
    pub fn from_dir(dir: &Path) -> Self {
        let paths = TemplateKind::ALL
            .iter()
            .map(|kind| (*kind, dir.join(kind.file_name())))
            .filter(|(_, path)| path.is_file())
            .collect();
        Self { paths }
    }

    /// Use the configured files
    pub fn from_paths(paths: &TemplatePaths) -> Self {
        let paths = TemplateKind::ALL
            .iter()
            .filter_map(|kind| paths.get(*kind).map(|p| (*kind, p.to_path_buf())))
            .collect();
        Self { paths }
    }

    /// Use `path` for `kind`
    pub fn with(mut self, kind: TemplateKind, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(kind, path.into());
        self
    }

    /// Add the configured files of `other`, replacing existing entries
    pub fn merge(mut self, other: &TemplatePaths) -> Self {
        for kind in TemplateKind::ALL {
            if let Some(path) = other.get(kind) {
                self.paths.insert(kind, path.to_path_buf());
            }
        }
        self
    }

    pub fn path(&self, kind: TemplateKind) -> Option<&Path> {
        self.paths.get(&kind).map(PathBuf::as_path)
    }
}

impl TemplateEngine for FileTemplates {
    fn render(&self, kind: TemplateKind, data: &Value) -> CoreResult<String> {
        let Some(path) = self.path(kind) else {
            return substitute(kind, kind.default_text(), data);
        };
        let text = fs::read_to_string(path).map_err(|e| GenealogyError::Template {
            template: kind.name().to_string(),
            person_id: None,
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        substitute(kind, &text, data)
    }
}
