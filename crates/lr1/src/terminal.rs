use std::fmt;

/// A lookahead-capable terminal: either a named terminal from the grammar
/// or the end-of-input sentinel. Kept distinct from `grammar::Symbol` here
/// because lookahead sets only ever range over terminals, never
/// non-terminals or macros.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    Named(String),
    Eoi,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Terminal::Named(name) => write!(f, "'{}'", name),
            Terminal::Eoi => write!(f, "\\0"),
        }
    }
}
