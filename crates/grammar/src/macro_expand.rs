use std::collections::VecDeque;

use crate::error::MacroExpansionError;
use crate::production::Production;
use crate::sentence::Sentence;
use crate::symbol::{MacroSymbol, Symbol};

/// A generous bound on auxiliary non-terminals a single expansion run may
/// mint. Ordinary macro nesting in hand-written grammars never comes
/// close; this only trips on a pathological or buggy grammar whose
/// expansion would otherwise spin forever.
const MAX_AUXILIARY_SYMBOLS: u64 = 1_000_000;

fn first_macro_index(body: &[Symbol]) -> Option<usize> {
    body.iter().position(Symbol::is_macro)
}

fn fresh_name(head: &str, counter: &mut u64) -> Result<String, MacroExpansionError> {
    *counter += 1;
    if *counter > MAX_AUXILIARY_SYMBOLS {
        return Err(MacroExpansionError {
            message: format!(
                "exceeded {} auxiliary non-terminals while expanding '{}'",
                MAX_AUXILIARY_SYMBOLS, head
            ),
        });
    }
    Ok(format!("{}__aux_{}", head, counter))
}

/// Builds the productions for one macro occurrence, per spec.md §4.D.
/// `aux` is the fresh non-terminal standing in for the macro at its call
/// site; `OneOrMore` mints a second fresh name of its own.
fn expand_macro_symbol(
    macro_symbol: &MacroSymbol,
    aux: &str,
    counter: &mut u64,
) -> Result<Vec<Production>, MacroExpansionError> {
    let rules = match macro_symbol {
        MacroSymbol::Group(body) => vec![Production::new(aux, body.clone())],
        MacroSymbol::Option(body) => vec![
            Production::new(aux, body.clone()),
            Production::new(aux, Sentence::epsilon()),
        ],
        MacroSymbol::Repetition(body) => {
            let recursive = body.with_appended(Symbol::non_terminal(aux));
            vec![
                Production::new(aux, recursive),
                Production::new(aux, Sentence::epsilon()),
            ]
        }
        MacroSymbol::OneOrMore(body) => {
            let aux2 = fresh_name(aux, counter)?;
            let first = body.with_appended(Symbol::non_terminal(aux2.clone()));
            let recursive = body.with_appended(Symbol::non_terminal(aux2.clone()));
            vec![
                Production::new(aux, first),
                Production::new(aux2.clone(), recursive),
                Production::new(aux2, Sentence::epsilon()),
            ]
        }
        MacroSymbol::Alternative(alternatives) => alternatives
            .iter()
            .cloned()
            .map(|body| Production::new(aux, body))
            .collect(),
    };
    Ok(rules)
}

/// Rewrites `rules` to a fixed point with no macro symbols left in any
/// body, per spec.md §4.D. Fresh non-terminals are named `{head}__aux_{N}`
/// with `N` a monotonically increasing counter, replacing the source's
/// unbounded `′`-suffix scheme per spec.md §9.
pub fn expand(rules: Vec<Production>) -> Result<Vec<Production>, MacroExpansionError> {
    let mut counter: u64 = 0;
    let mut worklist: VecDeque<Production> = rules.into_iter().collect();
    let mut finished = Vec::new();

    while let Some(production) = worklist.pop_front() {
        let idx = match first_macro_index(production.body.symbols()) {
            None => {
                finished.push(production);
                continue;
            }
            Some(idx) => idx,
        };

        let aux_name = fresh_name(&production.head, &mut counter)?;
        let macro_symbol = match &production.body.symbols()[idx] {
            Symbol::Macro(m) => (**m).clone(),
            _ => unreachable!("first_macro_index only returns macro positions"),
        };

        let mut rewritten_symbols = production.body.symbols().to_vec();
        rewritten_symbols[idx] = Symbol::non_terminal(aux_name.clone());
        worklist.push_back(Production::new(production.head, Sentence::new(rewritten_symbols)));

        for new_rule in expand_macro_symbol(&macro_symbol, &aux_name, &mut counter)? {
            worklist.push_back(new_rule);
        }
    }

    Ok(finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::non_terminal(name)
    }

    #[test]
    fn repetition_expands_right_recursive_and_nullable() {
        // list : item { ',' item } ;
        let macro_symbol = MacroSymbol::Repetition(Sentence::new(vec![term(","), nt("item")]));
        let rules = vec![Production::new(
            "list",
            Sentence::new(vec![nt("item"), Symbol::Macro(Box::new(macro_symbol))]),
        )];
        let expanded = expand(rules).unwrap();
        assert!(expanded.iter().all(|p| !p.body.contains_macro()));
        let aux_rules: Vec<&Production> = expanded.iter().filter(|p| p.head != "list").collect();
        assert_eq!(aux_rules.len(), 2);
        assert!(aux_rules.iter().any(|p| p.is_epsilon()));
    }

    #[test]
    fn one_or_more_introduces_two_auxiliaries() {
        let macro_symbol = MacroSymbol::OneOrMore(Sentence::new(vec![nt("digit")]));
        let rules = vec![Production::new(
            "digits",
            Sentence::new(vec![Symbol::Macro(Box::new(macro_symbol))]),
        )];
        let expanded = expand(rules).unwrap();
        assert!(expanded.iter().all(|p| !p.body.contains_macro()));
        assert!(expanded.iter().any(Production::is_epsilon));
        assert!(expanded.iter().any(|p| !p.is_epsilon()));
    }

    #[test]
    fn alternative_becomes_one_rule_per_branch() {
        let macro_symbol = MacroSymbol::Alternative(vec![
            Sentence::new(vec![term("a")]),
            Sentence::new(vec![term("b")]),
        ]);
        let rules = vec![Production::new(
            "choice",
            Sentence::new(vec![Symbol::Macro(Box::new(macro_symbol))]),
        )];
        let expanded = expand(rules).unwrap();
        assert_eq!(expanded.len(), 2);
        assert!(expanded.iter().all(|p| !p.body.contains_macro()));
    }
}
