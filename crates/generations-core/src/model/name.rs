use serde::{Deserialize, Serialize};

/// Personal name as recorded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Name {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Given names in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub first: Vec<String>,
    /// Name in everyday use when it is not the first of `first`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub used: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last: String,
    /// Birth (maiden) name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub birth: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alias: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nick: String,
}

impl Name {
    /// True if no part of the name is recorded
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.first.is_empty()
            && self.used.is_empty()
            && self.last.is_empty()
            && self.birth.is_empty()
            && self.alias.is_empty()
            && self.nick.is_empty()
    }

    /// The used name if given, the first given name otherwise
    pub fn used_first(&self) -> &str {
        if !self.used.is_empty() {
            return &self.used;
        }
        self.first.first().map(String::as_str).unwrap_or("")
    }

    /// Given names before family name: `Carl Friedrich "Fritz" Gauss, geb. Hauser`
    pub fn format_full(&self) -> String {
        let mut out = String::new();
        for first in &self.first {
            out.push_str(first);
            out.push(' ');
        }
        self.push_used_and_nick(&mut out);
        out.push_str(&self.last);
        self.push_birth(&mut out);
        out.trim().to_string()
    }

    /// Family name first: `Gauss, Carl Friedrich "Fritz", geb. Hauser`
    pub fn format_full_inverse(&self) -> String {
        let mut out = String::new();
        if !self.last.is_empty() {
            out.push_str(&self.last);
            out.push(',');
        }
        for first in &self.first {
            out.push(' ');
            out.push_str(first);
        }
        if !self.used.is_empty() {
            out.push_str(&format!(" \"{}\"", self.used));
        }
        if !self.nick.is_empty() {
            out.push_str(&format!(" (\"{}\")", self.nick));
        }
        self.push_birth(&mut out);
        out.trim().trim_end_matches(',').to_string()
    }

    /// Like [`Name::format_full`] with the middle names left out
    pub fn format_full_no_middle(&self) -> String {
        let mut out = String::new();
        let used_first = self.used_first();
        if !used_first.is_empty() {
            out.push_str(used_first);
            out.push(' ');
        }
        if !self.nick.is_empty() {
            out.push_str(&format!("(\"{}\") ", self.nick));
        }
        out.push_str(&self.last);
        self.push_birth(&mut out);
        out.trim().to_string()
    }

    fn push_used_and_nick(&self, out: &mut String) {
        if !self.used.is_empty() {
            out.push_str(&format!("\"{}\" ", self.used));
        }
        if !self.nick.is_empty() {
            out.push_str(&format!("(\"{}\") ", self.nick));
        }
    }

    fn push_birth(&self, out: &mut String) {
        if !self.birth.is_empty() {
            out.push_str(", geb. ");
            out.push_str(&self.birth);
        }
    }
}
