use std::collections::HashMap;
use std::str::Chars;

use crate::ast::{ClassMember, Regex};
use crate::charset::Charset;
use crate::error::RegexParseError;

/// Parses the pattern sub-language from spec.md §6: literals, `.`, `[...]`
/// classes with `-` ranges and leading `^` negation, `\c` escapes, `*`/`+`/`?`
/// quantifiers, `|` alternation, `(...)` grouping, and `@name` fragment
/// references resolved against `fragments`.
pub fn parse_pattern(
    pattern: &str,
    charset: Charset,
    fragments: &HashMap<String, Regex>,
) -> Result<Regex, RegexParseError> {
    let mut parser = PatternParser {
        chars: pattern.chars(),
        offset: 0,
        charset,
        fragments,
    };
    let regex = parser.parse_alternation()?;
    if let Some(c) = parser.peek() {
        return Err(RegexParseError::new(
            parser.offset,
            format!("unexpected character '{}'", c),
        ));
    }
    Ok(regex)
}

struct PatternParser<'a> {
    chars: Chars<'a>,
    offset: usize,
    charset: Charset,
    fragments: &'a HashMap<String, Regex>,
}

impl<'a> PatternParser<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(c) = c {
            self.offset += c.len_utf8();
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<(), RegexParseError> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(RegexParseError::new(
                self.offset,
                format!("expected '{}' but found '{}'", expected, c),
            )),
            None => Err(RegexParseError::new(
                self.offset,
                format!("expected '{}' but found end of pattern", expected),
            )),
        }
    }

    fn parse_alternation(&mut self) -> Result<Regex, RegexParseError> {
        let mut result = self.parse_concatenation()?;
        while self.peek() == Some('|') {
            self.advance();
            let rhs = self.parse_concatenation()?;
            result = Regex::union(result, rhs);
        }
        Ok(result)
    }

    fn parse_concatenation(&mut self) -> Result<Regex, RegexParseError> {
        let mut result: Option<Regex> = None;
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let term = self.parse_quantified()?;
            result = Some(match result {
                Some(acc) => Regex::concat(acc, term),
                None => term,
            });
        }
        Ok(result.unwrap_or(Regex::Epsilon))
    }

    fn parse_quantified(&mut self) -> Result<Regex, RegexParseError> {
        let atom = self.parse_atom()?;
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(Regex::star(atom))
            }
            Some('+') => {
                self.advance();
                Ok(Regex::plus(atom))
            }
            Some('?') => {
                self.advance();
                Ok(Regex::optional(atom))
            }
            _ => Ok(atom),
        }
    }

    fn parse_atom(&mut self) -> Result<Regex, RegexParseError> {
        match self.advance() {
            None => Err(RegexParseError::new(self.offset, "unexpected end of pattern")),
            Some('(') => {
                let inner = self.parse_alternation()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some('.') => Ok(Regex::any_char(self.charset)),
            Some('[') => self.parse_class(),
            Some('\\') => self.parse_escape().map(Regex::Literal),
            Some('@') => self.parse_fragment_ref(),
            Some(c) => Ok(Regex::Literal(c)),
        }
    }

    fn parse_escape(&mut self) -> Result<char, RegexParseError> {
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('\\') => Ok('\\'),
            Some('\'') => Ok('\''),
            Some('"') => Ok('"'),
            Some('0') => Ok('\0'),
            Some('b') => Ok('\u{8}'),
            Some('f') => Ok('\u{C}'),
            Some('v') => Ok('\u{B}'),
            Some(other) => Ok(other),
            None => Err(RegexParseError::new(self.offset, "dangling escape at end of pattern")),
        }
    }

    fn parse_fragment_ref(&mut self) -> Result<Regex, RegexParseError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(RegexParseError::new(self.offset, "empty fragment reference"));
        }
        self.fragments
            .get(&name)
            .cloned()
            .ok_or_else(|| RegexParseError::new(self.offset, format!("unknown fragment '@{}'", name)))
    }

    fn parse_class(&mut self) -> Result<Regex, RegexParseError> {
        let negated = if self.peek() == Some('^') {
            self.advance();
            true
        } else {
            false
        };
        let mut members = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(RegexParseError::new(self.offset, "unterminated character class"))
                }
                Some(']') => {
                    self.advance();
                    break;
                }
                _ => {
                    let lo = self.parse_class_char()?;
                    if self.peek() == Some('-') {
                        let mut lookahead = self.chars.clone();
                        lookahead.next();
                        if lookahead.next() == Some(']') {
                            members.push(ClassMember::Literal(lo));
                            continue;
                        }
                        self.advance();
                        let hi = self.parse_class_char()?;
                        if lo >= hi {
                            return Err(RegexParseError::new(
                                self.offset,
                                format!("invalid range '{}-{}': start must be < end", lo, hi),
                            ));
                        }
                        members.push(ClassMember::Range(lo, hi));
                    } else {
                        members.push(ClassMember::Literal(lo));
                    }
                }
            }
        }
        if members.is_empty() {
            return Err(RegexParseError::new(self.offset, "empty character class"));
        }
        Ok(Regex::char_class(self.charset, negated, members))
    }

    fn parse_class_char(&mut self) -> Result<char, RegexParseError> {
        match self.advance() {
            Some('\\') => self.parse_escape(),
            Some(c) => Ok(c),
            None => Err(RegexParseError::new(self.offset, "unterminated character class")),
        }
    }
}
