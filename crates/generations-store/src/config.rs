//! Render configuration files
//!
//! ```yaml
//! databases: [family.yml]
//! date: "2024-01-01"
//! levels:
//!   themes: [classic]
//! trees:
//!   - proband: gauss
//!     proband-level: 0
//!     render-tree-options:
//!       max-parent-generations: 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use generations_core::{LevelConfig, RenderTreeOptions};

use crate::errors::{config_validation, in_file, io_error, yaml_error, Result};
use crate::templates::TemplatePaths;
use crate::themes::load_themes;

/// A whole render run: shared settings and the trees to render
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderConfig {
    pub databases: Vec<PathBuf>,
    pub title: String,
    /// Reference date for ages of living persons, `YYYY-MM-DD`
    pub date: String,
    pub templates: TemplatePaths,
    /// Global level styles every tree inherits from
    pub levels: LevelConfig,
    pub trees: Vec<TreeConfig>,
    pub output_filename: Option<PathBuf>,
}

/// One tree of a render run
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TreeConfig {
    /// Databases of this tree; the global ones when empty
    pub databases: Vec<PathBuf>,
    pub title: String,
    pub date: String,
    /// ID or `"first last"` search of the tree's proband
    pub proband: String,
    /// Absolute level of the proband
    pub proband_level: i32,
    pub pre_content: String,
    pub post_content: String,
    pub levels: LevelConfig,
    pub render_tree_options: RenderTreeOptions,
}

impl RenderConfig {
    /// Push the global settings down into trees that leave them unset
    pub fn apply_globals(&mut self) -> &mut Self {
        for tree in self.trees.iter_mut() {
            if tree.databases.is_empty() {
                tree.databases = self.databases.clone();
            }
            if tree.date.is_empty() {
                tree.date = self.date.clone();
            }
            let person_options = &mut tree.render_tree_options.render_person_options;
            if person_options.date.is_empty() {
                person_options.date = tree.date.clone();
            }
        }
        self
    }

    /// Make relative database and template paths relative to `base`
    pub fn rebase(&mut self, base: &Path) -> &mut Self {
        let rebase_all = |paths: &mut Vec<PathBuf>| {
            for path in paths.iter_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        rebase_all(&mut self.databases);
        for tree in self.trees.iter_mut() {
            rebase_all(&mut tree.databases);
        }
        self.templates.rebase(base);
        self
    }

    fn validate(&self) -> Result<()> {
        for (index, tree) in self.trees.iter().enumerate() {
            if tree.proband.is_empty() {
                return Err(config_validation(&format!("tree {} has no proband", index + 1)));
            }
            if tree.databases.is_empty() {
                return Err(config_validation(&format!(
                    "tree {} ({}) has no databases",
                    index + 1,
                    tree.proband
                )));
            }
        }
        Ok(())
    }
}

impl TreeConfig {
    /// Tree options with the resolved level styles filled in
    ///
    /// Themes named by this tree's level configuration are read from
    /// `theme_dir`.
    ///
    /// # Errors
    ///
    /// The first theme that fails to load.
    pub fn render_options(&self, global: &LevelConfig, theme_dir: &Path) -> Result<RenderTreeOptions> {
        let themes = load_themes(theme_dir, &self.levels.themes)?;
        let mut levels = self.levels.clone();
        let resolved = levels.resolve(self.proband_level, global, &themes).to_vec();

        let mut options = self.render_tree_options.clone();
        options.levels = resolved;
        Ok(options)
    }
}

/// Parse a render configuration and apply its globals
///
/// # Errors
///
/// `Serialization` for YAML errors and unknown keys, `InvalidInput` for trees
/// without proband or databases.
pub fn parse_render_config_str(content: &str) -> Result<RenderConfig> {
    let mut config: RenderConfig =
        serde_yaml::from_str(content).map_err(|e| yaml_error("config_parse", e))?;
    config.apply_globals();
    config.validate()?;
    Ok(config)
}

/// Read a render configuration file
///
/// Relative paths inside the file are taken relative to its directory.
///
/// # Errors
///
/// `Io` if the file cannot be read, plus everything
/// [`parse_render_config_str`] rejects.
pub fn load_render_config(path: &Path) -> Result<RenderConfig> {
    let content = fs::read_to_string(path).map_err(|e| io_error("load_config", path, e))?;
    let mut config = parse_render_config_str(&content).map_err(|e| in_file(e, path))?;
    if let Some(base) = path.parent() {
        config.rebase(base);
    }
    tracing::debug!(path = %path.display(), trees = config.trees.len(), "render config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use generations_core::errors::ExErrorKind;
    use generations_core::render::{GenderOrder, GENERATIONS_NONE};

    const CONFIG: &str = r#"
databases: [family.yml]
date: "2024-05-01"
levels:
  color:
    main: gray
trees:
  - proband: gauss
    proband-level: 1
    render-tree-options:
      max-parent-generations: -1
      gender-order: female-first
      ignore: [fremde]
  - proband: Carl Gauß
    databases: [other.yml]
    date: "1855-02-23"
"#;

    #[test]
    fn test_parse_and_apply_globals() {
        let config = parse_render_config_str(CONFIG).unwrap();
        assert_eq!(config.trees.len(), 2);
        assert_eq!(config.levels.color.main, "gray");

        let first = &config.trees[0];
        assert_eq!(first.databases, vec![PathBuf::from("family.yml")]);
        assert_eq!(first.proband_level, 1);
        assert_eq!(first.render_tree_options.max_parent_generations, GENERATIONS_NONE);
        assert_eq!(first.render_tree_options.gender_order, GenderOrder::FemaleFirst);
        assert_eq!(first.render_tree_options.ignore_ids, vec!["fremde"]);
        assert_eq!(first.render_tree_options.render_person_options.date, "2024-05-01");

        let second = &config.trees[1];
        assert_eq!(second.databases, vec![PathBuf::from("other.yml")]);
        assert_eq!(second.render_tree_options.render_person_options.date, "1855-02-23");
    }

    #[test]
    fn test_tree_without_proband() {
        let err = parse_render_config_str("databases: [a.yml]\ntrees:\n  - title: x\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_tree_without_databases() {
        let err = parse_render_config_str("trees:\n  - proband: gauss\n").unwrap_err();
        assert!(err.message().contains("no databases"));
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_render_config_str("trees: []\nfont-size: 12\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }

    #[test]
    fn test_rebase() {
        let mut config = parse_render_config_str(CONFIG).unwrap();
        config.rebase(Path::new("/data"));
        assert_eq!(config.databases, vec![PathBuf::from("/data/family.yml")]);
        assert_eq!(config.trees[1].databases, vec![PathBuf::from("/data/other.yml")]);
    }
}
