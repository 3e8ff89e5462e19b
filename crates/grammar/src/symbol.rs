use std::fmt;

use crate::sentence::Sentence;

/// The grammar's alphabet: terminals, non-terminals, the two sentinel
/// symbols, and the EBNF macro tags, per spec.md §3. A sum type with
/// exhaustive dispatch rather than a class hierarchy, per spec.md §9.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    Epsilon,
    Eoi,
    Macro(Box<MacroSymbol>),
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_) | Symbol::Eoi)
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    pub fn is_macro(&self) -> bool {
        matches!(self, Symbol::Macro(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Terminal(name) => write!(f, "'{}'", name),
            Symbol::NonTerminal(name) => write!(f, "{}", name),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Eoi => write!(f, "\\0"),
            Symbol::Macro(m) => write!(f, "{}", m),
        }
    }
}

/// EBNF constructs embeddable in a rule body, per spec.md §4.D. Expanded
/// away to pure CFG by [`crate::grammar::Grammar::augment`] before any
/// LR(1) construction sees the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MacroSymbol {
    /// `(x1 ... xn)` — one rule, no epsilon alternative.
    Group(Sentence),
    /// `[x1 ... xn]` — optional, nullable.
    Option(Sentence),
    /// `{x1 ... xn}` — zero-or-more, right-recursive, nullable.
    Repetition(Sentence),
    /// `x1 ... xn` repeated one-or-more times; not nullable itself.
    OneOrMore(Sentence),
    /// `x1 ... xn | y1 ... yn | ...` — one rule per alternative.
    Alternative(Vec<Sentence>),
}

impl fmt::Display for MacroSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MacroSymbol::Group(s) => write!(f, "({})", s),
            MacroSymbol::Option(s) => write!(f, "[{}]", s),
            MacroSymbol::Repetition(s) => write!(f, "{{{}}}", s),
            MacroSymbol::OneOrMore(s) => write!(f, "{}+", s),
            MacroSymbol::Alternative(alts) => {
                let parts: Vec<String> = alts.iter().map(|s| s.to_string()).collect();
                write!(f, "({})", parts.join(" | "))
            }
        }
    }
}
