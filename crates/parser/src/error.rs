use std::fmt;

use lexicon::{Token, TokenizerError};
use lr1::StateId;

/// Errors raised while driving a parse, per spec.md §7. Both variants abort
/// the current parse immediately — nothing is retried or recovered
/// internally, per spec.md §7's propagation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Lexical(TokenizerError),
    Syntax { state: StateId, token: Token },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Lexical(err) => write!(f, "{}", err),
            ParseError::Syntax { state, token } => {
                write!(f, "no action for {} in state {}", token, state)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizerError> for ParseError {
    fn from(err: TokenizerError) -> Self {
        ParseError::Lexical(err)
    }
}
