use std::collections::{BTreeMap, BTreeSet};

use grammar::{Grammar, Symbol};

use crate::terminal::Terminal;

/// FIRST sets and nullability for every non-terminal in an augmented
/// grammar, computed by fixed-point iteration, per spec.md §4.E.
#[derive(Debug, Clone)]
pub struct FirstSets {
    nullable: BTreeSet<String>,
    first: BTreeMap<String, BTreeSet<Terminal>>,
}

impl FirstSets {
    pub fn compute(grammar: &Grammar) -> Self {
        let mut nullable: BTreeSet<String> = BTreeSet::new();
        let mut first: BTreeMap<String, BTreeSet<Terminal>> = grammar
            .non_terminals()
            .into_iter()
            .map(|n| (n.to_string(), BTreeSet::new()))
            .collect();

        loop {
            let mut changed = false;
            for rule in grammar.rules() {
                if rule.is_epsilon() {
                    if nullable.insert(rule.head.clone()) {
                        changed = true;
                    }
                    continue;
                }

                let mut all_nullable_so_far = true;
                let mut additions: BTreeSet<Terminal> = BTreeSet::new();
                for symbol in rule.body.symbols() {
                    match symbol {
                        Symbol::Terminal(name) => {
                            additions.insert(Terminal::Named(name.clone()));
                            all_nullable_so_far = false;
                            break;
                        }
                        Symbol::Eoi => {
                            additions.insert(Terminal::Eoi);
                            all_nullable_so_far = false;
                            break;
                        }
                        Symbol::NonTerminal(name) => {
                            if let Some(set) = first.get(name) {
                                additions.extend(set.iter().cloned());
                            }
                            if !nullable.contains(name) {
                                all_nullable_so_far = false;
                                break;
                            }
                        }
                        Symbol::Epsilon | Symbol::Macro(_) => {}
                    }
                }

                let entry = first.entry(rule.head.clone()).or_default();
                let before = entry.len();
                entry.extend(additions);
                if entry.len() != before {
                    changed = true;
                }
                if all_nullable_so_far && nullable.insert(rule.head.clone()) {
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        Self { nullable, first }
    }

    pub fn is_nullable(&self, non_terminal: &str) -> bool {
        self.nullable.contains(non_terminal)
    }

    pub fn first_of(&self, non_terminal: &str) -> &BTreeSet<Terminal> {
        static EMPTY: BTreeSet<Terminal> = BTreeSet::new();
        self.first.get(non_terminal).unwrap_or(&EMPTY)
    }

    /// FIRST(tail · lookahead): scans `tail` left to right, stopping at the
    /// first terminal or non-nullable non-terminal; if every symbol in
    /// `tail` is nullable, `lookahead` is folded in too, per spec.md §4.E's
    /// `FIRST(βL)` construction.
    pub fn first_of_tail(&self, tail: &[Symbol], lookahead: &BTreeSet<Terminal>) -> BTreeSet<Terminal> {
        let mut result = BTreeSet::new();
        let mut all_nullable_so_far = true;
        for symbol in tail {
            match symbol {
                Symbol::Terminal(name) => {
                    result.insert(Terminal::Named(name.clone()));
                    all_nullable_so_far = false;
                    break;
                }
                Symbol::Eoi => {
                    result.insert(Terminal::Eoi);
                    all_nullable_so_far = false;
                    break;
                }
                Symbol::NonTerminal(name) => {
                    result.extend(self.first_of(name).iter().cloned());
                    if !self.is_nullable(name) {
                        all_nullable_so_far = false;
                        break;
                    }
                }
                Symbol::Epsilon | Symbol::Macro(_) => {}
            }
        }
        if all_nullable_so_far {
            result.extend(lookahead.iter().cloned());
        }
        result
    }
}
