//! `gramforge`: a grammar-driven text-analysis toolkit. Given regex-based
//! lexeme declarations and a (possibly EBNF-macro-bearing) context-free
//! grammar, builds a deterministic multi-lexeme tokenizer and a canonical
//! LR(1) parser that yields a concrete syntax tree.
//!
//! The crate is a thin facade over its components — `regex_ast`, `lexicon`,
//! `grammar`, `lr1`, `cst`, `parser` — each usable standalone. `prelude`
//! re-exports the types most callers need to go from lexeme/grammar
//! declarations to a parsed `Cst` without depending on every member crate
//! directly.

pub mod prelude {
    pub use cst::{Cst, CstNodeId, ProductionRef};
    pub use grammar::{
        Grammar, GrammarBuilder, GrammarError, MacroExpansionError, MacroSymbol, Production, Sentence, Symbol,
    };
    pub use lexicon::{
        AmbiguityPolicy, Charset, ConfigError, Dfa, DfaBuildError, DfaBuilder, Lexeme, Location, Position, Token,
        Tokenizer, TokenizerError,
    };
    pub use lr1::{Action, GrammarConflictError, Lr1Builder, ParseTable, StateId, Terminal};
    pub use parser::{ParseError, Parser};
    pub use regex_ast::{Regex, RegexParseError};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::collections::{HashMap, HashSet};

    fn lexeme(name: &str, pattern: &str) -> Lexeme {
        Lexeme::from_pattern_str(name, pattern, Charset::Ascii, &HashMap::new()).unwrap()
    }

    fn t(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::non_terminal(name)
    }

    /// Scenario 1 (spec.md §8): whitespace + integer + identifier.
    #[test]
    fn whitespace_int_identifier_tokenizes_with_column_tracking() {
        let mut ignored = HashSet::new();
        for c in [' ', '\t', '\n', '\r'] {
            ignored.insert(c);
        }
        let dfa = DfaBuilder::new(
            vec![lexeme("int", "[0-9]+"), lexeme("id", "[a-zA-Z_][a-zA-Z0-9_]*")],
            ignored,
        )
        .unwrap()
        .build()
        .unwrap();

        let tokens: Vec<Token> = Tokenizer::new(&dfa, "  42 foo").collect::<Result<_, _>>().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].ty(), tokens[0].value(), tokens[0].position().column), ("int", "42", 3));
        assert_eq!((tokens[1].ty(), tokens[1].value(), tokens[1].position().column), ("id", "foo", 6));
    }

    /// Scenario 2 (spec.md §8): string literal with backslash escapes.
    #[test]
    fn string_with_escapes_matches_as_one_token() {
        let dfa = DfaBuilder::new(vec![lexeme("string", r"'([^'\\]|\\.)*'")], HashSet::new())
            .unwrap()
            .build()
            .unwrap();

        let input = r"'a\'b'";
        let tokens: Vec<Token> = Tokenizer::new(&dfa, input).collect::<Result<_, _>>().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value(), input);
        assert_eq!(tokens[0].value().chars().count(), 5);
    }

    /// Scenario 4 (spec.md §8): declaration order breaks an equal-length
    /// match tie between `lex` and `id`.
    #[test]
    fn lexeme_priority_tie_break_by_declaration_order() {
        let dfa = DfaBuilder::new(vec![lexeme("lex", "lexeme"), lexeme("id", "[a-zA-Z_]+")], HashSet::new())
            .unwrap()
            .build()
            .unwrap();

        let tokens: Vec<Token> = Tokenizer::new(&dfa, "lexeme").collect::<Result<_, _>>().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].ty(), "lex");
    }

    /// Scenario 5 (spec.md §8): `list : item { ',' item } ;` expands to a
    /// right-recursive auxiliary and parses a comma-separated run.
    #[test]
    fn repetition_macro_parses_comma_separated_list() {
        let mut ignored = HashSet::new();
        ignored.insert(' ');
        let dfa = DfaBuilder::new(
            vec![lexeme("id", "[a-zA-Z_]+"), lexeme("comma", ",")],
            ignored,
        )
        .unwrap()
        .build()
        .unwrap();

        // list : item aux ;  aux : ',' item aux | ε ;  item : 'id' ;
        let grammar = GrammarBuilder::new()
            .start("list")
            .rule(Production::new(
                "list",
                Sentence::new(vec![nt("item"), Symbol::Macro(Box::new(MacroSymbol::Repetition(
                    Sentence::new(vec![t("comma"), nt("item")]),
                )))]),
            ))
            .rule(Production::new("item", Sentence::new(vec![t("id")])))
            .build()
            .unwrap()
            .augment()
            .unwrap();

        let table = Lr1Builder::new(&grammar).build().unwrap();
        let tokens = Tokenizer::new(&dfa, "a, b, c");
        let cst = Parser::new(&table).parse(tokens).unwrap();

        let leaves: Vec<String> = cst
            .leaves()
            .iter()
            .filter_map(|&id| cst.token(id))
            .map(|tok| tok.value().to_string())
            .filter(|v| v != ",")
            .collect();
        assert_eq!(leaves, vec!["a", "b", "c"]);
    }

    /// Scenario 6 (spec.md §8): dangling-else is a shift/reduce conflict.
    #[test]
    fn dangling_else_grammar_is_rejected_as_a_conflict() {
        let grammar = GrammarBuilder::new()
            .start("stmt")
            .rule(Production::new(
                "stmt",
                Sentence::new(vec![t("if"), nt("expr"), nt("stmt")]),
            ))
            .rule(Production::new(
                "stmt",
                Sentence::new(vec![t("if"), nt("expr"), nt("stmt"), t("else"), nt("stmt")]),
            ))
            .rule(Production::new("stmt", Sentence::new(vec![t("x")])))
            .rule(Production::new("expr", Sentence::new(vec![t("e")])))
            .build()
            .unwrap()
            .augment()
            .unwrap();

        let result = Lr1Builder::new(&grammar).build();
        assert!(matches!(result, Err(ref conflicts) if !conflicts.is_empty()));
    }
}
