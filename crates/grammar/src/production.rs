use std::fmt;

use crate::sentence::Sentence;

/// `(head, body)`, value-equal by its two fields, per spec.md §3.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub head: String,
    pub body: Sentence,
}

impl Production {
    pub fn new(head: impl Into<String>, body: impl Into<Sentence>) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.is_epsilon()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.head, self.body)
    }
}
