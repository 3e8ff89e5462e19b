//! The table-driven parser runtime (component F): shift/reduce/goto/accept
//! over an [`lr1::ParseTable`], producing a [`cst::Cst`].

mod cursor;
mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

#[cfg(test)]
mod tests {
    use super::*;
    use grammar::{GrammarBuilder, Production, Sentence, Symbol};
    use lexicon::{Charset, Dfa, DfaBuilder, Lexeme, Tokenizer};
    use lr1::Lr1Builder;
    use std::collections::HashMap;

    fn t(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::non_terminal(name)
    }

    fn digit_plus_digit_dfa() -> Dfa {
        let lexemes = vec![
            Lexeme::from_pattern_str("num", "[0-9]+", Charset::Ascii, &HashMap::new()).unwrap(),
            Lexeme::from_pattern_str("plus", r"\+", Charset::Ascii, &HashMap::new()).unwrap(),
        ];
        let mut ignored = std::collections::HashSet::new();
        ignored.insert(' ');
        DfaBuilder::new(lexemes, ignored).unwrap().build().unwrap()
    }

    /// expr : expr 'plus' 'num' | 'num' ;
    fn expr_plus_grammar() -> grammar::Grammar {
        GrammarBuilder::new()
            .start("expr")
            .rule(Production::new(
                "expr",
                Sentence::new(vec![nt("expr"), t("plus"), t("num")]),
            ))
            .rule(Production::new("expr", Sentence::new(vec![t("num")])))
            .build()
            .unwrap()
            .augment()
            .unwrap()
    }

    #[test]
    fn parses_left_associative_sum_into_nested_cst() {
        let dfa = digit_plus_digit_dfa();
        let grammar = expr_plus_grammar();
        let table = Lr1Builder::new(&grammar).build().unwrap();

        let tokens = Tokenizer::new(&dfa, "1 + 2 + 3");
        let cst = Parser::new(&table).parse(tokens).unwrap();

        let leaves: Vec<String> = cst
            .leaves()
            .iter()
            .map(|&id| cst.token(id).unwrap().value().to_string())
            .collect();
        assert_eq!(leaves, vec!["1", "+", "2", "+", "3"]);

        let (production, children) = cst.as_root(cst.root()).unwrap();
        assert_eq!(production.head, "expr");
        // left-associative: outermost reduction is `expr plus num`
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn syntax_error_reports_offending_state_and_token() {
        let dfa = digit_plus_digit_dfa();
        let grammar = expr_plus_grammar();
        let table = Lr1Builder::new(&grammar).build().unwrap();

        let tokens = Tokenizer::new(&dfa, "+ 2");
        let result = Parser::new(&table).parse(tokens);
        assert!(matches!(result, Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn ignored_comment_tokens_are_skipped_between_lookups() {
        let lexemes = vec![
            Lexeme::from_pattern_str("num", "[0-9]+", Charset::Ascii, &HashMap::new()).unwrap(),
            Lexeme::from_pattern_str("plus", r"\+", Charset::Ascii, &HashMap::new()).unwrap(),
            Lexeme::from_pattern_str("comment", r"#[^\n]*", Charset::Ascii, &HashMap::new()).unwrap(),
        ];
        let mut ignored_chars = std::collections::HashSet::new();
        ignored_chars.insert(' ');
        let dfa = DfaBuilder::new(lexemes, ignored_chars).unwrap().build().unwrap();
        let grammar = expr_plus_grammar();
        let table = Lr1Builder::new(&grammar).build().unwrap();

        let tokens = Tokenizer::new(&dfa, "1 # trailing note\n+ 2");
        let cst = Parser::new(&table).parse(tokens).unwrap();
        let leaves: Vec<String> = cst
            .leaves()
            .iter()
            .map(|&id| cst.token(id).unwrap().value().to_string())
            .collect();
        assert_eq!(leaves, vec!["1", "+", "2"]);
    }
}
