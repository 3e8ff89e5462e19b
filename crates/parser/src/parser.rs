use std::collections::HashSet;

use cst::{Cst, CstBuilder, CstNodeId, ProductionRef};
use lexicon::{Token, TokenizerError};
use lr1::{Action, ParseTable, StateId, Terminal};

use crate::cursor::TokenCursor;
use crate::error::ParseError;

/// The table-driven shift/reduce/goto/accept loop, per spec.md §4.F. Owns
/// the lookahead cursor, the dual state/node stack, and the `CstBuilder`
/// that accumulates the tree as reductions fire — grounded on the
/// `ParseStack`/`parse_text` shape this workspace's LALR driver uses, but
/// consuming an in-memory table instead of trait-dispatched per-grammar
/// codegen and building a `Cst` instead of arbitrary semantic attributes.
pub struct Parser<'t> {
    table: &'t ParseTable,
    ignored: HashSet<String>,
    include_epsilons: bool,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t ParseTable) -> Self {
        Self {
            table,
            ignored: ["comment".to_string()].into_iter().collect(),
            include_epsilons: false,
        }
    }

    pub fn with_ignored(mut self, ignored: HashSet<String>) -> Self {
        self.ignored = ignored;
        self
    }

    pub fn with_epsilons(mut self, include_epsilons: bool) -> Self {
        self.include_epsilons = include_epsilons;
        self
    }

    pub fn parse<I>(&self, tokens: I) -> Result<Cst, ParseError>
    where
        I: Iterator<Item = Result<Token, TokenizerError>>,
    {
        let mut cursor = TokenCursor::new(tokens, self.ignored.clone());
        let mut states: Vec<StateId> = vec![ParseTable::START];
        let mut nodes: Vec<Option<CstNodeId>> = Vec::new();
        let mut builder = CstBuilder::new().with_epsilons(self.include_epsilons);
        let mut root: Option<CstNodeId> = None;

        loop {
            let current_state = *states.last().expect("state stack is never empty");
            let token = cursor.front()?;
            let terminal = if token.is_eoi() {
                Terminal::Eoi
            } else {
                Terminal::Named(token.ty().to_string())
            };

            match self.table.action(current_state, &terminal) {
                Some(Action::Shift(next)) => {
                    let leaf = builder.new_leaf(token);
                    nodes.push(Some(leaf));
                    states.push(next);
                    cursor.advance();
                }
                Some(Action::Reduce(rule_index)) => {
                    let rule = self.table.rule(rule_index).clone();
                    let production = ProductionRef::new(rule_index as u32, rule.head.clone());

                    let (children, goto_source_state) = if rule.is_epsilon {
                        (Vec::new(), current_state)
                    } else {
                        let split = states.len() - rule.len;
                        states.truncate(split);
                        let children: Vec<CstNodeId> = nodes
                            .split_off(nodes.len() - rule.len)
                            .into_iter()
                            .flatten()
                            .collect();
                        let source_state = *states.last().expect("state stack is never empty");
                        (children, source_state)
                    };

                    let next_state = self
                        .table
                        .goto(goto_source_state, &rule.head)
                        .expect("a well-formed table always has a goto for a just-reduced head");

                    let node = if rule.is_epsilon {
                        builder.new_epsilon_internal(production)
                    } else if self.table.is_accept_antechamber(next_state) {
                        let id = builder.new_root(production, children);
                        root = Some(id);
                        Some(id)
                    } else {
                        Some(builder.new_internal(production, children))
                    };

                    states.push(next_state);
                    nodes.push(node);
                }
                Some(Action::Accept) => {
                    return Ok(builder.finish(root.expect("accept only follows a root reduction")));
                }
                Some(Action::Goto(_)) => {
                    unreachable!("ParseTable::action never resolves to a bare Goto")
                }
                None => {
                    return Err(ParseError::Syntax {
                        state: current_state,
                        token,
                    });
                }
            }
        }
    }
}
