use std::fmt;

/// Errors raised while assembling a grammar, prior to augmentation, per
/// spec.md §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    UndefinedSymbol(String),
    UnreachableNonTerminal(String),
    EmptyRuleList,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::UndefinedSymbol(name) => {
                write!(f, "non-terminal '{}' is referenced but never defined", name)
            }
            GrammarError::UnreachableNonTerminal(name) => {
                write!(f, "non-terminal '{}' is defined but unreachable from the start symbol", name)
            }
            GrammarError::EmptyRuleList => write!(f, "a grammar needs at least one rule"),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Raised only in the theoretical case spec.md §7 names: the counter-based
/// auxiliary-name scheme exhausts `u32` before expansion reaches a fixed
/// point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpansionError {
    pub message: String,
}

impl fmt::Display for MacroExpansionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "macro expansion failed: {}", self.message)
    }
}

impl std::error::Error for MacroExpansionError {}
