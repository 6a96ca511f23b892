//! Level styling relative to the proband
//!
//! Absolute levels count generations from a fixed origin, relative levels
//! from the proband. Both tables hold the same plain [`Level`] record and are
//! merged by the same two functions: [`Level::overlay`] (a relative entry
//! onto its absolute position) and [`Level::merge_with_base`] (theme or
//! global defaults filling gaps).

use serde::{Deserialize, Serialize};

/// Separator placed between appended option blocks
pub const OPTIONS_SEPARATOR: &str = "%\n%\n";

/// Range of absolute levels every resolved table covers
pub const DEFAULT_LEVEL_RANGE: (i32, i32) = (-20, 20);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelColor {
    pub main: String,
    pub leaf: String,
}

impl LevelColor {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.leaf.is_empty()
    }

    /// Own non-empty fields win, the rest comes from `base`
    pub fn merge_with_base(&self, base: &LevelColor) -> LevelColor {
        LevelColor {
            main: pick(&self.main, &base.main),
            leaf: pick(&self.leaf, &base.leaf),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelBoxOptions {
    pub main: String,
    pub leaf: String,
}

impl LevelBoxOptions {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.leaf.is_empty()
    }

    /// `inherited` options followed by own options
    pub fn append_to(&self, inherited: &LevelBoxOptions) -> LevelBoxOptions {
        LevelBoxOptions {
            main: append_options(&self.main, &inherited.main),
            leaf: append_options(&self.leaf, &inherited.leaf),
        }
    }
}

fn pick(own: &str, base: &str) -> String {
    if own.is_empty() {
        base.to_string()
    } else {
        own.to_string()
    }
}

/// Concatenate option blocks, separated only if both are non-empty
pub fn append_options(own: &str, inherited: &str) -> String {
    if own.is_empty() || inherited.is_empty() {
        return format!("{}{}", inherited, own);
    }
    format!("{}{}{}", inherited, OPTIONS_SEPARATOR, own)
}

/// Style of one generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "kebab-case"), deny_unknown_fields)]
pub struct Level {
    pub index: i32,
    pub color: LevelColor,
    pub box_options: LevelBoxOptions,
    /// Free-form node options
    pub options: String,
}

impl Level {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Apply `other` on top of this level
    ///
    /// A non-empty color of `other` replaces this color, box and free
    /// options are appended (`other` first).
    pub fn overlay(&self, other: &Level) -> Level {
        Level {
            index: self.index,
            color: if other.color.is_empty() {
                self.color.clone()
            } else {
                other.color.clone()
            },
            box_options: self.box_options.append_to(&other.box_options),
            options: append_options(&self.options, &other.options),
        }
    }

    /// Fill gaps of this level from `base`
    pub fn merge_with_base(&self, base: &Level) -> Level {
        Level {
            index: self.index,
            color: self.color.merge_with_base(&base.color),
            box_options: self.box_options.append_to(&base.box_options),
            options: append_options(&self.options, &base.options),
        }
    }

    pub fn is_parent_level(&self, proband_level: i32) -> bool {
        self.index > proband_level
    }

    pub fn is_child_level(&self, proband_level: i32) -> bool {
        self.index < proband_level
    }

    pub fn is_proband_level(&self, proband_level: i32) -> bool {
        self.index == proband_level
    }
}

/// Absolute and relative level tables plus globals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LevelConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub absolute: Vec<Level>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relative: Vec<Level>,

    /// Backfills empty level colors
    #[serde(skip_serializing_if = "LevelColor::is_empty")]
    pub color: LevelColor,
    /// Prepended to every level's box options
    #[serde(skip_serializing_if = "LevelBoxOptions::is_empty")]
    pub box_options: LevelBoxOptions,
    /// Prepended to every level's free options
    #[serde(skip_serializing_if = "String::is_empty")]
    pub options: String,

    /// Theme names, most specific last
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,

    #[serde(skip)]
    combined: Vec<Level>,
}

impl LevelConfig {
    /// Result of the last [`LevelConfig::combine`]
    pub fn combined(&self) -> &[Level] {
        &self.combined
    }

    /// Combined level with the given absolute index
    pub fn level_at(&self, index: i32) -> Option<&Level> {
        self.combined.iter().find(|l| l.index == index)
    }

    /// Add empty absolute levels for every missing index in `from..=to`
    pub fn add_default_levels(&mut self, from: i32, to: i32) -> &mut Self {
        for index in from..=to {
            if !self.absolute.iter().any(|l| l.index == index) {
                self.absolute.push(Level::new(index));
            }
        }
        self
    }

    /// Apply the global color, box and free options to every absolute level
    pub fn set_globals(&mut self) -> &mut Self {
        let globals = Level {
            index: 0,
            color: self.color.clone(),
            box_options: self.box_options.clone(),
            options: self.options.clone(),
        };
        for level in self.absolute.iter_mut() {
            *level = level.merge_with_base(&globals);
        }
        self
    }

    /// Overlay relative levels onto their absolute positions
    ///
    /// A relative entry applies to the absolute level with
    /// `index == relative.index + proband_level`.
    pub fn combine(&mut self, proband_level: i32) -> &mut Self {
        self.combined = self
            .absolute
            .iter()
            .map(|absolute| {
                match self
                    .relative
                    .iter()
                    .find(|r| r.index + proband_level == absolute.index)
                {
                    Some(relative) => absolute.overlay(relative),
                    None => absolute.clone(),
                }
            })
            .collect();
        self
    }

    /// Fill gaps of the absolute levels from the combined table of `base`
    pub fn inherit(&mut self, base: &LevelConfig) -> &mut Self {
        for level in self.absolute.iter_mut() {
            if let Some(inherited) = base.combined.iter().find(|b| b.index == level.index) {
                *level = level.merge_with_base(inherited);
            }
        }
        self
    }

    /// Resolve the final level table for a tree
    ///
    /// `global` is the document-wide configuration, `themes` the loaded
    /// themes in the order of [`LevelConfig::themes`]. Themes are applied in
    /// reverse order and never replace a value already set, so for every gap
    /// the last listed theme wins.
    pub fn resolve(
        &mut self,
        proband_level: i32,
        global: &LevelConfig,
        themes: &[LevelConfig],
    ) -> &[Level] {
        let (from, to) = DEFAULT_LEVEL_RANGE;
        self.add_default_levels(from, to).set_globals();

        let mut global = global.clone();
        global
            .add_default_levels(from, to)
            .set_globals()
            .combine(proband_level);
        self.inherit(&global);

        for theme in themes.iter().rev() {
            let mut theme = theme.clone();
            theme
                .add_default_levels(from, to)
                .set_globals()
                .combine(proband_level);
            self.inherit(&theme);
        }

        self.combine(proband_level);
        &self.combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(index: i32, main: &str, options: &str) -> Level {
        Level {
            index,
            color: LevelColor {
                main: main.to_string(),
                leaf: String::new(),
            },
            box_options: LevelBoxOptions::default(),
            options: options.to_string(),
        }
    }

    #[test]
    fn test_append_options() {
        assert_eq!(append_options("own", ""), "own");
        assert_eq!(append_options("", "inherited"), "inherited");
        assert_eq!(append_options("own", "inherited"), "inherited%\n%\nown");
    }

    #[test]
    fn test_combine_overlays_relative_at_proband_offset() {
        let mut config = LevelConfig {
            absolute: vec![level(0, "red", "l1-opts"), level(1, "blue", "")],
            relative: vec![level(-1, "green", "l2-opts")],
            ..Default::default()
        };
        config.combine(1);

        let overlaid = config.level_at(0).unwrap();
        assert_eq!(overlaid.color.main, "green");
        assert_eq!(overlaid.options, "l2-opts%\n%\nl1-opts");
        assert_eq!(config.level_at(1).unwrap().color.main, "blue");
    }

    #[test]
    fn test_relative_without_color_keeps_absolute_color() {
        let mut config = LevelConfig {
            absolute: vec![level(2, "red", "")],
            relative: vec![level(0, "", "bold")],
            ..Default::default()
        };
        config.combine(2);
        let combined = config.level_at(2).unwrap();
        assert_eq!(combined.color.main, "red");
        assert_eq!(combined.options, "bold");
    }

    #[test]
    fn test_inherit_only_fills_gaps() {
        let mut base = LevelConfig {
            absolute: vec![level(0, "base-color", "base-opts"), level(1, "base-color", "")],
            ..Default::default()
        };
        base.combine(0);

        let mut config = LevelConfig {
            absolute: vec![level(0, "own-color", "own-opts"), level(1, "", "")],
            ..Default::default()
        };
        config.inherit(&base).combine(0);

        assert_eq!(config.level_at(0).unwrap().color.main, "own-color");
        assert_eq!(config.level_at(0).unwrap().options, "base-opts%\n%\nown-opts");
        assert_eq!(config.level_at(1).unwrap().color.main, "base-color");
    }

    #[test]
    fn test_add_default_levels_keeps_existing() {
        let mut config = LevelConfig {
            absolute: vec![level(0, "red", "")],
            ..Default::default()
        };
        config.add_default_levels(-1, 1);
        assert_eq!(config.absolute.len(), 3);
        assert_eq!(config.absolute[0].color.main, "red");
    }

    #[test]
    fn test_set_globals() {
        let mut config = LevelConfig {
            absolute: vec![level(0, "", "own"), level(1, "red", "")],
            color: LevelColor {
                main: "gray".into(),
                leaf: "white".into(),
            },
            options: "global".into(),
            ..Default::default()
        };
        config.set_globals();
        assert_eq!(config.absolute[0].color.main, "gray");
        assert_eq!(config.absolute[0].options, "global%\n%\nown");
        assert_eq!(config.absolute[1].color.main, "red");
        assert_eq!(config.absolute[1].color.leaf, "white");
    }

    #[test]
    fn test_resolve_applies_themes_in_reverse() {
        let generic = LevelConfig {
            absolute: vec![level(0, "generic", ""), level(1, "generic", "")],
            ..Default::default()
        };
        let specific = LevelConfig {
            absolute: vec![level(0, "specific", "")],
            ..Default::default()
        };
        let mut config = LevelConfig {
            relative: vec![level(1, "", "above-proband")],
            ..Default::default()
        };
        let combined = config.resolve(0, &LevelConfig::default(), &[generic, specific]);

        assert_eq!(combined.len(), 41);
        let at = |index: i32| combined.iter().find(|l| l.index == index).unwrap();
        assert_eq!(at(0).color.main, "specific");
        assert_eq!(at(1).color.main, "generic");
        assert_eq!(at(1).options, "above-proband");
    }

    #[test]
    fn test_level_position_helpers() {
        let l = Level::new(3);
        assert!(l.is_parent_level(2));
        assert!(l.is_child_level(4));
        assert!(l.is_proband_level(3));
    }
}
