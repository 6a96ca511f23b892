//! Level themes: `<theme dir>/<name>.yml` files holding a level configuration

use std::fs;
use std::path::{Path, PathBuf};

use generations_core::LevelConfig;

use crate::errors::{in_file, io_error, yaml_error, Result};

/// Default theme directory, relative to the working directory
pub const DEFAULT_THEME_DIR: &str = "templates/levels";

/// File holding the theme `name`
pub fn theme_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.yml", name))
}

/// Load one theme
///
/// # Errors
///
/// `Io` if the theme file is missing, `Serialization` if it is not a level
/// configuration.
pub fn load_theme(dir: &Path, name: &str) -> Result<LevelConfig> {
    let path = theme_path(dir, name);
    let content = fs::read_to_string(&path).map_err(|e| io_error("load_theme", &path, e))?;
    let theme: LevelConfig = serde_yaml::from_str(&content)
        .map_err(|e| in_file(yaml_error("load_theme", e), &path))?;
    tracing::debug!(theme = name, levels = theme.absolute.len(), "theme loaded");
    Ok(theme)
}

/// Load the themes `names`, keeping their order
///
/// # Errors
///
/// The first theme that fails to load.
pub fn load_themes(dir: &Path, names: &[String]) -> Result<Vec<LevelConfig>> {
    names.iter().map(|name| load_theme(dir, name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use generations_core::errors::ExErrorKind;

    #[test]
    fn test_load_theme() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            theme_path(dir.path(), "blue"),
            "color:\n  main: blue\nabsolute:\n  - index: 1\n    options: pale\n",
        )
        .unwrap();

        let theme = load_theme(dir.path(), "blue").unwrap();
        assert_eq!(theme.color.main, "blue");
        assert_eq!(theme.absolute[0].options, "pale");
    }

    #[test]
    fn test_missing_theme() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_themes(dir.path(), &["nope".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert!(err.message().contains("nope.yml"));
    }
}
