use std::collections::HashMap;

use crate::terminal::Terminal;

pub type StateId = u32;

/// An encoded table cell, per spec.md §4.E. `Goto` is only ever returned
/// from [`ParseTable::goto`]; the action map itself holds only
/// `Shift`/`Reduce`/`Accept`, since those are the only variants a lookahead
/// terminal can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(usize),
    Goto(StateId),
    Accept,
}

/// What the parser needs to know about a rule at reduce time, independent
/// of the `grammar` crate's representation.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub head: String,
    pub len: usize,
    pub is_epsilon: bool,
}

/// The frozen output of [`crate::builder::Lr1Builder::build`]: encoded
/// action/goto tables plus enough rule metadata for the parser to drive
/// reductions without going back to the `grammar` crate.
#[derive(Debug, Clone)]
pub struct ParseTable {
    pub(crate) action: HashMap<(StateId, Terminal), Action>,
    pub(crate) goto: HashMap<(StateId, String), StateId>,
    pub(crate) rules: Vec<RuleInfo>,
    pub(crate) state_count: u32,
    /// `GOTO[0, StartSymbol]` — the state reached immediately after
    /// reducing the augmented start rule, spec.md §4.F's "accept
    /// antechamber" — used by the parser to distinguish the CST root
    /// reduction from an ordinary internal node. Computed directly rather
    /// than assumed to be state id 1, since BFS discovery order is not
    /// otherwise pinned down.
    pub(crate) accept_antechamber: StateId,
}

impl ParseTable {
    pub const START: StateId = 0;

    pub fn action(&self, state: StateId, terminal: &Terminal) -> Option<Action> {
        self.action.get(&(state, terminal.clone())).copied()
    }

    pub fn goto(&self, state: StateId, non_terminal: &str) -> Option<StateId> {
        self.goto
            .get(&(state, non_terminal.to_string()))
            .copied()
    }

    pub fn rule(&self, index: usize) -> &RuleInfo {
        &self.rules[index]
    }

    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    pub fn is_accept_antechamber(&self, state: StateId) -> bool {
        state == self.accept_antechamber
    }
}
