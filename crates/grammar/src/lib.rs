//! The grammar model and EBNF macro expansion (component D).

mod error;
mod grammar;
mod macro_expand;
mod production;
mod sentence;
mod symbol;

pub use error::{GrammarError, MacroExpansionError};
pub use grammar::{Grammar, GrammarBuilder, AUGMENTED_START};
pub use production::Production;
pub use sentence::Sentence;
pub use symbol::{MacroSymbol, Symbol};

#[cfg(test)]
mod tests {
    use super::*;

    fn t(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::non_terminal(name)
    }

    #[test]
    fn augment_adds_exactly_one_augmented_rule() {
        let grammar = GrammarBuilder::new()
            .start("start")
            .rule(Production::new("start", Sentence::new(vec![nt("expr")])))
            .rule(Production::new("expr", Sentence::new(vec![t("x")])))
            .build()
            .unwrap()
            .augment()
            .unwrap();

        let augmented: Vec<&Production> = grammar
            .rules()
            .iter()
            .filter(|p| p.head == AUGMENTED_START)
            .collect();
        assert_eq!(augmented.len(), 1);
        assert_eq!(augmented[0].body.symbols(), &[nt("start")]);
        assert!(grammar.is_augmented());
    }

    #[test]
    fn validate_rejects_undefined_non_terminal() {
        let grammar = GrammarBuilder::new()
            .start("start")
            .rule(Production::new("start", Sentence::new(vec![nt("missing")])))
            .build()
            .unwrap();
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::UndefinedSymbol("missing".to_string()))
        );
    }

    #[test]
    fn validate_rejects_unreachable_non_terminal() {
        let grammar = GrammarBuilder::new()
            .start("start")
            .rule(Production::new("start", Sentence::new(vec![t("x")])))
            .rule(Production::new("orphan", Sentence::new(vec![t("y")])))
            .build()
            .unwrap();
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::UnreachableNonTerminal("orphan".to_string()))
        );
    }

    #[test]
    fn empty_rule_list_rejected() {
        assert_eq!(
            GrammarBuilder::new().build().unwrap_err(),
            GrammarError::EmptyRuleList
        );
    }

    #[test]
    fn macro_free_grammar_expands_to_itself() {
        let grammar = GrammarBuilder::new()
            .start("start")
            .rule(Production::new("start", Sentence::new(vec![t("x")])))
            .build()
            .unwrap()
            .augment()
            .unwrap();
        // one original rule plus the augmented-start rule
        assert_eq!(grammar.rules().len(), 2);
    }
}
