//! Redaction of personal data in log output
//!
//! Names, birth dates and places of living people must not end up in log
//! files. Wrap them in [`Sensitive`] before handing them to a tracing macro;
//! the person id is the part that is safe to log.

use std::fmt;

/// Text written in place of a wrapped value
pub const REDACTED: &str = "<personal data>";

/// Personal data that formats as [`REDACTED`]
///
/// ```
/// use generations_core_types::Sensitive;
///
/// let name = Sensitive::new("Carl Friedrich Gauss");
/// assert_eq!(name.to_string(), "<personal data>");
/// assert_eq!(name.expose(), &"Carl Friedrich Gauss");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Transform the hidden value without revealing it
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sensitive<U> {
        Sensitive(f(self.0))
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
