//! Post-processing of rendered fragments

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(\s*\n)+").expect("valid blank line regex"));

static COMMENT_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(\s*%\s*)+\n").expect("valid comment line regex"));

/// Collapse every run of blank lines into a single newline
pub fn collapse_blank_lines(input: &str) -> String {
    BLANK_LINES_RE.replace_all(input, "\n").into_owned()
}

/// Drop lines holding nothing but a `%` comment leader
pub fn strip_comment_lines(input: &str) -> String {
    COMMENT_LINES_RE.replace_all(input, "\n").into_owned()
}
