//! Month header resolution.
//!
//! Headers look like `2025May` or `2025August`. Both forms resolve to the
//! first day of the month; anything else is unresolved and its column is
//! dropped from the output.

use crate::constants::MONTH_LABEL_PATTERN;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

// Compile-time constant, checked by the month tests
static MONTH_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MONTH_LABEL_PATTERN).expect("static regex must compile"));

#[derive(Debug, Clone, Copy)]
pub struct MonthLabelResolver {
    pattern: &'static Regex,
}

impl MonthLabelResolver {
    pub fn new() -> Self {
        Self {
            pattern: &MONTH_LABEL_RE,
        }
    }

    /// Resolve a header to its month-start date
    ///
    /// Tries the abbreviated month name first, then the full name.
    pub fn resolve(&self, label: &str) -> Option<NaiveDate> {
        let label = label.trim();
        if !self.pattern.is_match(label) {
            return None;
        }

        let first_of_month = format!("{}01", label);
        NaiveDate::parse_from_str(&first_of_month, "%Y%b%d")
            .or_else(|_| NaiveDate::parse_from_str(&first_of_month, "%Y%B%d"))
            .ok()
    }
}

impl Default for MonthLabelResolver {
    fn default() -> Self {
        Self::new()
    }
}
