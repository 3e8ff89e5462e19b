use std::collections::HashSet;

use lexicon::{Position, Token, TokenizerError};

/// A one-token-of-lookahead buffer over the tokenizer's iterator that
/// transparently skips ignored token types (comments, by default), per
/// spec.md §4.F: "the parser consumes an ignored token set ... between
/// lookups." Kept a strictly separate concern from the tokenizer's own
/// ignored-*character* skipping, per spec.md §9.
pub struct TokenCursor<I> {
    tokens: I,
    ignored: HashSet<String>,
    peeked: Option<Token>,
    last_position: Position,
}

impl<I> TokenCursor<I>
where
    I: Iterator<Item = Result<Token, TokenizerError>>,
{
    pub fn new(tokens: I, ignored: HashSet<String>) -> Self {
        Self {
            tokens,
            ignored,
            peeked: None,
            last_position: Position::default(),
        }
    }

    fn pull_next(&mut self) -> Result<Token, TokenizerError> {
        loop {
            match self.tokens.next() {
                None => {
                    let end = self.last_position.end;
                    let position = Position {
                        start: end,
                        end,
                        line: self.last_position.line,
                        column: self.last_position.column,
                    };
                    return Ok(Token::eoi(position));
                }
                Some(Err(err)) => return Err(err),
                Some(Ok(token)) => {
                    self.last_position = token.position();
                    if self.ignored.contains(token.ty()) {
                        continue;
                    }
                    return Ok(token);
                }
            }
        }
    }

    /// The current lookahead token, without consuming it.
    pub fn front(&mut self) -> Result<Token, TokenizerError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.pull_next()?);
        }
        Ok(self.peeked.clone().expect("just populated"))
    }

    pub fn advance(&mut self) {
        self.peeked = None;
    }
}
