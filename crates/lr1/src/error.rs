use std::fmt;

use crate::table::{Action, StateId};
use crate::terminal::Terminal;

/// A single `(state, symbol)` cell that two distinct actions both claim,
/// per spec.md §4.E/§7. The builder collects every conflict it finds
/// rather than aborting at the first one, so a grammar author sees the
/// whole picture in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarConflictError {
    pub state: StateId,
    pub symbol: Terminal,
    pub existing: Action,
    pub attempted: Action,
}

impl fmt::Display for GrammarConflictError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "conflict in state {} on {}: {:?} vs {:?}",
            self.state, self.symbol, self.existing, self.attempted
        )
    }
}

impl std::error::Error for GrammarConflictError {}
