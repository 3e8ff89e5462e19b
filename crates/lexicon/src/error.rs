use std::fmt;

use crate::location::Location;

/// Errors raised while assembling lexemes into a `DfaBuilder`, before the
/// exploration phase starts. Unknown fragment references are caught
/// earlier, while a pattern string is still being parsed into a `Regex`
/// (see `regex_ast::RegexParseError`) — by the time a `Lexeme` reaches
/// this builder its pattern is already fragment-free, so `ConfigError` has
/// no variant for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyLexemeList,
    DuplicateLexemeName(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EmptyLexemeList => write!(f, "a DFA needs at least one lexeme"),
            ConfigError::DuplicateLexemeName(name) => {
                write!(f, "lexeme '{}' is defined more than once", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by `DfaBuilder::build`, per spec.md §4.B/§7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DfaBuildError {
    TooManyStates(usize),
    AmbiguousLexeme {
        state_description: String,
        lexemes: Vec<String>,
    },
}

impl fmt::Display for DfaBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DfaBuildError::TooManyStates(n) => {
                write!(f, "DFA has {} states, exceeding the 32,767 state limit", n)
            }
            DfaBuildError::AmbiguousLexeme {
                state_description,
                lexemes,
            } => write!(
                f,
                "ambiguous lexemes {:?} both accept at state {}",
                lexemes, state_description
            ),
        }
    }
}

impl std::error::Error for DfaBuildError {}

/// Errors raised while driving the tokenizer over input, per spec.md §4.C/§7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    UnexpectedCharacter {
        character: char,
        location: Location,
        trace: Option<Vec<String>>,
    },
    UnexpectedEndOfInput {
        location: Location,
        trace: Option<Vec<String>>,
    },
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenizerError::UnexpectedCharacter {
                character,
                location,
                trace,
            } => {
                write!(f, "unexpected character '{}' at {}", character, location)?;
                write_trace(f, trace)
            }
            TokenizerError::UnexpectedEndOfInput { location, trace } => {
                write!(f, "unexpected end of input at {}", location)?;
                write_trace(f, trace)
            }
        }
    }
}

fn write_trace(f: &mut fmt::Formatter, trace: &Option<Vec<String>>) -> fmt::Result {
    if let Some(trace) = trace {
        writeln!(f)?;
        for line in trace {
            writeln!(f, "  {}", line)?;
        }
    }
    Ok(())
}

impl std::error::Error for TokenizerError {}
