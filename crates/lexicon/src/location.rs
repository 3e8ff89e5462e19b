use std::fmt;

/// Byte offset plus line/column of a point in the input. Line and column are
/// both 1-based — the port's resolution of the Open Question in spec.md §9
/// (the source implementation disagreed on this across call sites).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advances past `c`, bumping `line`/`column` on any of the line-break
    /// characters spec.md §4.C names: `\n`, `\r`, U+2028, U+2029.
    pub fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The span a token covers: byte offsets into the input plus the
/// line/column of its start, per spec.md §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}
