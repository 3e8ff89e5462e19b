use std::collections::{BTreeSet, VecDeque};

use crate::error::{GrammarError, MacroExpansionError};
use crate::macro_expand;
use crate::production::Production;
use crate::sentence::Sentence;
use crate::symbol::Symbol;

/// Head of the single rule macro-expansion and augmentation introduce:
/// `<augmented_start> -> StartSymbol`, per spec.md §3/§4.D.
pub const AUGMENTED_START: &str = "__augmented_start";

/// A mutable staging area for rules, frozen into a [`Grammar`] by `build`.
/// Mirrors the builder/frozen split used throughout this workspace.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    start: Option<String>,
    rules: Vec<Production>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn rule(mut self, production: Production) -> Self {
        self.rules.push(production);
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.rules.is_empty() {
            return Err(GrammarError::EmptyRuleList);
        }
        let start = self
            .start
            .unwrap_or_else(|| self.rules[0].head.clone());
        Ok(Grammar {
            start,
            rules: self.rules,
        })
    }
}

/// `(start, rules)`. Before augmentation this is the user's possibly
/// macro-bearing grammar; after [`Grammar::augment`] it is pure CFG with
/// exactly one `<augmented_start>` rule, per spec.md §3.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    rules: Vec<Production>,
}

impl Grammar {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn rules(&self) -> &[Production] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> &Production {
        &self.rules[index]
    }

    pub fn rules_for_head<'a>(&'a self, head: &'a str) -> impl Iterator<Item = (usize, &'a Production)> {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.head == head)
    }

    pub fn is_augmented(&self) -> bool {
        self.start == AUGMENTED_START
    }

    /// All distinct non-terminal names: every rule head, plus every
    /// `NonTerminal` symbol appearing in a body.
    pub fn non_terminals(&self) -> BTreeSet<&str> {
        let mut set = BTreeSet::new();
        for rule in &self.rules {
            set.insert(rule.head.as_str());
            for symbol in rule.body.symbols() {
                if let Symbol::NonTerminal(name) = symbol {
                    set.insert(name.as_str());
                }
            }
        }
        set
    }

    /// All distinct terminal names appearing in any rule body.
    pub fn terminals(&self) -> BTreeSet<&str> {
        let mut set = BTreeSet::new();
        for rule in &self.rules {
            for symbol in rule.body.symbols() {
                if let Symbol::Terminal(name) = symbol {
                    set.insert(name.as_str());
                }
            }
        }
        set
    }

    /// Expands EBNF macros to a fixed point (spec.md §4.D), then augments
    /// the result with `<augmented_start> -> StartSymbol`.
    pub fn augment(self) -> Result<Grammar, MacroExpansionError> {
        let expanded_rules = macro_expand::expand(self.rules)?;
        let mut rules = expanded_rules;
        rules.push(Production::new(
            AUGMENTED_START,
            Sentence::new(vec![Symbol::non_terminal(self.start)]),
        ));
        Ok(Grammar {
            start: AUGMENTED_START.to_string(),
            rules,
        })
    }

    /// Checks every non-terminal referenced in a body is defined by some
    /// rule head, and every defined non-terminal is reachable from the
    /// start symbol, per spec.md §7's `GrammarError` cases.
    pub fn validate(&self) -> Result<(), GrammarError> {
        let heads: BTreeSet<&str> = self.rules.iter().map(|r| r.head.as_str()).collect();
        for rule in &self.rules {
            for symbol in rule.body.symbols() {
                if let Symbol::NonTerminal(name) = symbol {
                    if !heads.contains(name.as_str()) {
                        return Err(GrammarError::UndefinedSymbol(name.clone()));
                    }
                }
            }
        }

        let mut reachable: BTreeSet<&str> = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(self.start.as_str());
        reachable.insert(self.start.as_str());
        while let Some(head) = queue.pop_front() {
            for (_, rule) in self.rules_for_head(head) {
                for symbol in rule.body.symbols() {
                    if let Symbol::NonTerminal(name) = symbol {
                        if reachable.insert(name.as_str()) {
                            queue.push_back(name.as_str());
                        }
                    }
                }
            }
        }

        for head in heads {
            if !reachable.contains(head) {
                return Err(GrammarError::UnreachableNonTerminal(head.to_string()));
            }
        }
        Ok(())
    }
}
