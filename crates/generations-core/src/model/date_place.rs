use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{GenealogyError, Result};

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[12]\d{3}").expect("valid year regex"));

/// A life event: free-form date text plus place
///
/// Dates are kept as written ("1777-04-30", "um 1826", "before 1932", "10/1854").
/// Only full ISO dates are interpreted, and only for age computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatePlace {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub place: String,
}

impl DatePlace {
    pub fn new(date: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            place: place.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.place.is_empty()
    }

    /// First four-digit year (1000-2999) found anywhere in the date text
    pub fn year(&self) -> Option<&str> {
        YEAR_RE.find(&self.date).map(|m| m.as_str())
    }

    /// Interpret the date as `YYYY-MM-DD`
    ///
    /// # Errors
    ///
    /// `MalformedDate` for partial or free-form dates.
    pub fn full_date(&self) -> Result<NaiveDate> {
        if self.date.len() != 10 {
            return Err(GenealogyError::MalformedDate {
                date: self.date.clone(),
            });
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            GenealogyError::MalformedDate {
                date: self.date.clone(),
            }
        })
    }
}

/// Completed years between two dates
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Keep at most `count` characters, never splitting a multi-byte character
pub fn first_chars(input: &str, count: usize) -> &str {
    match input.char_indices().nth(count) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
