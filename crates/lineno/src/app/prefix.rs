//! The number-prefix grammar: `digits, repeated trimmed delimiter, payload`.

use regex::Regex;

use crate::domain::errors::DomainError;

/// Matches and splits lines that already carry a rendered line number.
///
/// Built once per invocation from the configured delimiter. Matching is
/// tolerant: the trimmed delimiter may repeat (`: ` also recognizes `:` and
/// `::`), which keeps lines recognizable after their trailing whitespace has
/// been edited away.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    delimiter: String,
    trimmed: String,
    pattern: Regex,
}

/// A matched line split into the prefix through the delimiter and the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixSplit<'a> {
    pub prefix: &'a str,
    pub payload: &'a str,
}

impl PrefixMatcher {
    pub fn new(delimiter: &str) -> Result<Self, DomainError> {
        let trimmed = delimiter.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidDelimiter(delimiter.to_string()));
        }
        let pattern = Regex::new(&format!(r"^\d+(?:{})+.*$", regex::escape(trimmed)))
            .expect("escaped delimiter pattern is valid");
        Ok(Self {
            delimiter: delimiter.to_string(),
            trimmed: trimmed.to_string(),
            pattern,
        })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Whether the line carries a number prefix, judged on its trimmed text.
    pub fn matches(&self, line_text: &str) -> bool {
        self.pattern.is_match(line_text.trim())
    }

    /// Split a matching line at the delimiter. The full delimiter is tried
    /// first, then its trimmed form, so prefixes survive trailing-whitespace
    /// variation between insertion and later removal. `None` when the line
    /// does not match the grammar.
    pub fn split<'a>(&self, line_text: &'a str) -> Option<PrefixSplit<'a>> {
        if !self.matches(line_text) {
            return None;
        }
        let split_end = match line_text.find(self.delimiter.as_str()) {
            Some(index) => index + self.delimiter.len(),
            None => line_text.find(self.trimmed.as_str())? + self.trimmed.len(),
        };
        Some(PrefixSplit {
            prefix: &line_text[..split_end],
            payload: &line_text[split_end..],
        })
    }
}
