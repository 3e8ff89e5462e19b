use std::collections::HashMap;

use regex_ast::{parse_pattern, Charset, Regex, RegexParseError};

/// A named pattern, per spec.md §3: `Lexeme = (name, pattern)`.
#[derive(Debug, Clone)]
pub struct Lexeme {
    name: String,
    pattern: Regex,
}

impl Lexeme {
    pub fn new(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// Parses `pattern_str` against the pattern sub-language from spec.md §6,
    /// resolving any `@name` fragment references against `fragments`.
    pub fn from_pattern_str(
        name: impl Into<String>,
        pattern_str: &str,
        charset: Charset,
        fragments: &HashMap<String, Regex>,
    ) -> Result<Self, RegexParseError> {
        let pattern = parse_pattern(pattern_str, charset, fragments)?;
        Ok(Self::new(name, pattern))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}
