//! Cell value coercion.

use std::collections::HashSet;

/// Outcome of coercing one raw cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Number(f64),
    /// Cell matched a configured missing-value token
    MissingToken,
    /// Cell was neither a token nor a finite number
    Unparseable,
}

impl CellValue {
    pub fn value(self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(value),
            CellValue::MissingToken | CellValue::Unparseable => None,
        }
    }
}

/// Turns raw cells into numbers or missing values; never fails
#[derive(Debug, Clone)]
pub struct ValueCoercer {
    missing_tokens: HashSet<String>,
}

impl ValueCoercer {
    pub fn new<S: AsRef<str>>(missing_tokens: &[S]) -> Self {
        Self {
            missing_tokens: missing_tokens
                .iter()
                .map(|token| token.as_ref().to_string())
                .collect(),
        }
    }

    pub fn classify(&self, raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if self.missing_tokens.contains(trimmed) {
            return CellValue::MissingToken;
        }

        match trimmed.replace(',', "").parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Number(value),
            _ => CellValue::Unparseable,
        }
    }

    pub fn coerce(&self, raw: &str) -> Option<f64> {
        self.classify(raw).value()
    }
}

impl Default for ValueCoercer {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_MISSING_TOKENS)
    }
}
