//! Multi-lexeme DFA construction and tokenizer runtime (components B and C).

mod dfa;
mod error;
mod lexeme;
mod location;
mod token;
mod tokenizer;

pub use dfa::{AmbiguityPolicy, Dfa, DfaBuilder, StateId};
pub use error::{ConfigError, DfaBuildError, TokenizerError};
pub use lexeme::Lexeme;
pub use location::{Location, Position};
pub use token::{Token, EOI_TYPE};
pub use tokenizer::{Tokenizer, TransitionRecord};

pub use regex_ast::{Charset, Regex, RegexParseError};
