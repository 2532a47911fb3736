//! Indentation depth detection for hierarchy labels.
//!
//! The source files encode nesting only through leading whitespace: every
//! tab is one level and every run of `indent_width` spaces is one level.

/// A label split into its depth and clean name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLabel {
    pub level: u32,
    pub name: String,
}

impl ClassifiedLabel {
    /// Blank labels mark rows the parser skips entirely
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

/// Splits raw labels into depth and name
#[derive(Debug, Clone, Copy)]
pub struct IndentClassifier {
    indent_width: usize,
}

impl IndentClassifier {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.max(1),
        }
    }

    /// Compute `tabs + spaces / indent_width` over the leading whitespace run
    ///
    /// Other leading whitespace (non-breaking spaces, carriage returns) is
    /// stripped from the name but does not add depth.
    pub fn classify(&self, raw: &str) -> ClassifiedLabel {
        let content_start = raw
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(raw.len());
        let (lead, rest) = raw.split_at(content_start);

        let tabs = lead.chars().filter(|&c| c == '\t').count();
        let spaces = lead.chars().filter(|&c| c == ' ').count();
        let level = tabs + spaces / self.indent_width;

        ClassifiedLabel {
            level: level as u32,
            name: rest.trim().to_string(),
        }
    }
}

impl Default for IndentClassifier {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_INDENT_WIDTH)
    }
}
