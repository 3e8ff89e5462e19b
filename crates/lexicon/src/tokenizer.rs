use std::fmt;

use crate::dfa::{Dfa, StateId};
use crate::error::TokenizerError;
use crate::location::{Location, Position};
use crate::token::Token;

/// One recorded DFA transition, captured only in debug mode.
#[derive(Debug, Clone)]
pub struct TransitionRecord {
    pub from: StateId,
    pub to: StateId,
    pub character: char,
    pub location: Location,
}

impl fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} -{}-> {} @{}",
            self.from, self.character, self.to, self.location
        )
    }
}

/// Table-driven transition executor with positional tracking, per
/// spec.md §4.C. Implements `Iterator` directly: it is the lazy,
/// restartable token stream the parser runtime consumes.
pub struct Tokenizer<'d, 'i> {
    dfa: &'d Dfa,
    input: &'i str,
    cursor: Location,
    token_start: Location,
    state: StateId,
    history: Option<Vec<TransitionRecord>>,
    done: bool,
}

impl<'d, 'i> Tokenizer<'d, 'i> {
    pub fn new(dfa: &'d Dfa, input: &'i str) -> Self {
        Self::with_debug(dfa, input, false)
    }

    pub fn with_debug(dfa: &'d Dfa, input: &'i str, debug: bool) -> Self {
        Self {
            dfa,
            input,
            cursor: Location::start(),
            token_start: Location::start(),
            state: Dfa::INITIAL,
            history: if debug { Some(Vec::new()) } else { None },
            done: false,
        }
    }

    fn rest(&self) -> &'i str {
        &self.input[self.cursor.offset..]
    }

    fn emit(&mut self, lexeme_name: &str) -> Token {
        let value = &self.input[self.token_start.offset..self.cursor.offset];
        let position = Position {
            start: self.token_start.offset,
            end: self.cursor.offset,
            line: self.token_start.line,
            column: self.token_start.column,
        };
        let token = Token::new(lexeme_name, value, position);
        self.state = Dfa::INITIAL;
        self.token_start = self.cursor;
        token
    }

    fn trace(&self) -> Option<Vec<String>> {
        self.history
            .as_ref()
            .map(|h| h.iter().map(|r| r.to_string()).collect())
    }

    fn advance(&mut self, c: char) {
        let from = self.state;
        self.cursor.advance(c);
        if let Some(history) = &mut self.history {
            history.push(TransitionRecord {
                from,
                to: self.state,
                character: c,
                location: self.cursor,
            });
        }
    }
}

impl<'d, 'i> Iterator for Tokenizer<'d, 'i> {
    type Item = Result<Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.rest().chars().next() {
                None => {
                    if self.state == Dfa::INITIAL {
                        self.done = true;
                        return None;
                    }
                    return match self.dfa.is_accepting(self.state) {
                        Some(name) => {
                            let name = name.to_string();
                            Some(Ok(self.emit(&name)))
                        }
                        None => {
                            self.done = true;
                            Some(Err(TokenizerError::UnexpectedEndOfInput {
                                location: self.cursor,
                                trace: self.trace(),
                            }))
                        }
                    };
                }
                Some(c) => match self.dfa.transition(self.state, c) {
                    Some(next_state) => {
                        let was_initial = self.state == Dfa::INITIAL;
                        self.state = next_state;
                        self.advance(c);
                        if was_initial && next_state == Dfa::INITIAL {
                            self.token_start = self.cursor;
                        }
                    }
                    None => {
                        return match self.dfa.is_accepting(self.state) {
                            Some(name) => {
                                let name = name.to_string();
                                Some(Ok(self.emit(&name)))
                            }
                            None => {
                                self.done = true;
                                Some(Err(TokenizerError::UnexpectedCharacter {
                                    character: c,
                                    location: self.cursor,
                                    trace: self.trace(),
                                }))
                            }
                        };
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::DfaBuilder;
    use crate::lexeme::Lexeme;
    use regex_ast::Charset;
    use std::collections::{HashMap, HashSet};

    fn lexeme(name: &str, pattern: &str) -> Lexeme {
        Lexeme::from_pattern_str(name, pattern, Charset::Ascii, &HashMap::new()).unwrap()
    }

    fn build_dfa() -> Dfa {
        let mut ignored = HashSet::new();
        for c in [' ', '\t', '\n', '\r'] {
            ignored.insert(c);
        }
        DfaBuilder::new(
            vec![lexeme("int", "[0-9]+"), lexeme("id", "[a-zA-Z_][a-zA-Z0-9_]*")],
            ignored,
        )
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn whitespace_int_identifier() {
        let dfa = build_dfa();
        let tokens: Vec<Token> = Tokenizer::new(&dfa, "  42 foo")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].ty(), "int");
        assert_eq!(tokens[0].value(), "42");
        assert_eq!(tokens[0].position().column, 3);
        assert_eq!(tokens[1].ty(), "id");
        assert_eq!(tokens[1].value(), "foo");
        assert_eq!(tokens[1].position().column, 6);
    }

    #[test]
    fn string_with_escapes() {
        let fragments = HashMap::new();
        let string_lexeme = Lexeme::from_pattern_str(
            "string",
            r"'([^'\\]|\\.)*'",
            Charset::Ascii,
            &fragments,
        )
        .unwrap();
        let dfa = DfaBuilder::new(vec![string_lexeme], HashSet::new())
            .unwrap()
            .build()
            .unwrap();
        let input = "'a\\'b'";
        let tokens: Vec<Token> = Tokenizer::new(&dfa, input).collect::<Result<_, _>>().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value(), input);
    }

    #[test]
    fn unexpected_character_errors() {
        let dfa = build_dfa();
        let mut tokenizer = Tokenizer::new(&dfa, "42#");
        assert!(tokenizer.next().unwrap().is_ok());
        let err = tokenizer.next().unwrap();
        assert!(matches!(err, Err(TokenizerError::UnexpectedCharacter { .. })));
    }

    #[test]
    fn restartable_iterator_terminates_cleanly() {
        let dfa = build_dfa();
        let mut tokenizer = Tokenizer::new(&dfa, "a b");
        let mut count = 0;
        while let Some(result) = tokenizer.next() {
            result.unwrap();
            count += 1;
        }
        assert_eq!(count, 2);
        assert!(tokenizer.next().is_none());
    }
}
