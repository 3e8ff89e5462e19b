use std::fmt;

use crate::symbol::Symbol;

/// A finite ordered sequence of symbols. Invariant per spec.md §3: if any
/// symbol is `Epsilon` the sentence has length 1 — enforced at
/// construction in every build profile, not merely documented or checked
/// only under `debug_assertions`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence(Vec<Symbol>);

impl Sentence {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        assert!(
            symbols.len() == 1 || !symbols.iter().any(|s| *s == Symbol::Epsilon),
            "epsilon must be the sole symbol of its sentence"
        );
        Self(symbols)
    }

    pub fn epsilon() -> Self {
        Self(vec![Symbol::Epsilon])
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.len() == 1 && self.0[0] == Symbol::Epsilon
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_macro(&self) -> bool {
        self.0.iter().any(Symbol::is_macro)
    }

    /// Appends `suffix` onto a copy of this sentence's symbols, used by
    /// macro expansion to build right-recursive bodies (`x1...xn A'`).
    pub fn with_appended(&self, suffix: Symbol) -> Self {
        let mut symbols = self.0.clone();
        symbols.push(suffix);
        Self::new(symbols)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_epsilon() {
            return write!(f, "ε");
        }
        let parts: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl From<Vec<Symbol>> for Sentence {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self::new(symbols)
    }
}
