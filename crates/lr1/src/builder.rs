use std::collections::{HashMap, VecDeque};

use grammar::{Grammar, Symbol, AUGMENTED_START};

use crate::closure::{closure, goto_kernel};
use crate::error::GrammarConflictError;
use crate::first_sets::FirstSets;
use crate::item::{Item, ItemSet};
use crate::table::{Action, ParseTable, RuleInfo, StateId};
use crate::terminal::Terminal;

/// Builds an LR(1) [`ParseTable`] from an augmented, macro-free
/// [`Grammar`], per spec.md §4.E. The grammar passed in must already have
/// gone through [`grammar::Grammar::augment`].
pub struct Lr1Builder<'g> {
    grammar: &'g Grammar,
    firsts: FirstSets,
}

impl<'g> Lr1Builder<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        let firsts = FirstSets::compute(grammar);
        Self { grammar, firsts }
    }

    fn augmented_rule_index(&self) -> usize {
        self.grammar
            .rules()
            .iter()
            .position(|r| r.head == AUGMENTED_START)
            .expect("grammar must be augmented before LR(1) construction")
    }

    pub fn build(self) -> Result<ParseTable, Vec<GrammarConflictError>> {
        let initial_kernel: ItemSet = {
            let mut kernel = ItemSet::new();
            kernel.insert(
                Item::initial(self.augmented_rule_index()),
                [Terminal::Eoi].into_iter().collect(),
            );
            kernel
        };

        let mut kernels: Vec<ItemSet> = vec![initial_kernel.clone()];
        let mut state_index: HashMap<ItemSet, StateId> = HashMap::new();
        state_index.insert(initial_kernel, 0);

        let mut action: HashMap<(StateId, Terminal), Action> = HashMap::new();
        let mut goto: HashMap<(StateId, String), StateId> = HashMap::new();
        let mut conflicts: Vec<GrammarConflictError> = Vec::new();

        let mut queue: VecDeque<StateId> = VecDeque::new();
        queue.push_back(0);
        let mut processed = vec![false; 1];

        while let Some(state_id) = queue.pop_front() {
            if processed[state_id as usize] {
                continue;
            }
            processed[state_id as usize] = true;

            let kernel = kernels[state_id as usize].clone();
            let closed = closure(self.grammar, &self.firsts, kernel);

            let mut next_symbols: Vec<Symbol> = Vec::new();
            for item in closed.keys() {
                if let Some(symbol) = item.next_symbol(self.grammar) {
                    if !next_symbols.contains(symbol) {
                        next_symbols.push(symbol.clone());
                    }
                }
            }

            for symbol in &next_symbols {
                let target_kernel = goto_kernel(self.grammar, &closed, symbol);
                if target_kernel.is_empty() {
                    continue;
                }
                let target_id = if let Some(&id) = state_index.get(&target_kernel) {
                    id
                } else {
                    let id = kernels.len() as StateId;
                    kernels.push(target_kernel.clone());
                    state_index.insert(target_kernel, id);
                    processed.push(false);
                    queue.push_back(id);
                    id
                };

                match symbol {
                    Symbol::Terminal(name) => {
                        self.set_action(
                            &mut action,
                            &mut conflicts,
                            state_id,
                            Terminal::Named(name.clone()),
                            Action::Shift(target_id),
                        );
                    }
                    Symbol::Eoi => {
                        self.set_action(
                            &mut action,
                            &mut conflicts,
                            state_id,
                            Terminal::Eoi,
                            Action::Shift(target_id),
                        );
                    }
                    Symbol::NonTerminal(name) => {
                        goto.insert((state_id, name.clone()), target_id);
                    }
                    Symbol::Epsilon | Symbol::Macro(_) => {
                        unreachable!("augmented grammar must be macro-free with epsilon only as a whole body")
                    }
                }
            }

            for (item, lookahead) in &closed {
                if !item.is_reducible(self.grammar) {
                    continue;
                }
                let rule = self.grammar.rule(item.rule);
                if rule.head == AUGMENTED_START {
                    for terminal in lookahead {
                        self.set_action(
                            &mut action,
                            &mut conflicts,
                            state_id,
                            terminal.clone(),
                            Action::Accept,
                        );
                    }
                } else {
                    for terminal in lookahead {
                        self.set_action(
                            &mut action,
                            &mut conflicts,
                            state_id,
                            terminal.clone(),
                            Action::Reduce(item.rule),
                        );
                    }
                }
            }
        }

        if !conflicts.is_empty() {
            return Err(conflicts);
        }

        let rules: Vec<RuleInfo> = self
            .grammar
            .rules()
            .iter()
            .map(|r| RuleInfo {
                head: r.head.clone(),
                len: if r.is_epsilon() { 0 } else { r.body.len() },
                is_epsilon: r.is_epsilon(),
            })
            .collect();

        let accept_antechamber = goto.get(&(0, self.real_start_symbol())).copied().unwrap_or(0);

        Ok(ParseTable {
            action,
            goto,
            rules,
            state_count: kernels.len() as u32,
            accept_antechamber,
        })
    }

    /// The original, pre-augmentation start non-terminal's name — the
    /// single symbol on the right-hand side of the `<augmented_start>`
    /// rule.
    fn real_start_symbol(&self) -> String {
        let rule = self.grammar.rule(self.augmented_rule_index());
        match rule.body.symbols().first() {
            Some(Symbol::NonTerminal(name)) => name.clone(),
            _ => unreachable!("augmented rule body is always a single non-terminal"),
        }
    }

    fn set_action(
        &self,
        action: &mut HashMap<(StateId, Terminal), Action>,
        conflicts: &mut Vec<GrammarConflictError>,
        state: StateId,
        terminal: Terminal,
        new_action: Action,
    ) {
        match action.get(&(state, terminal.clone())) {
            Some(existing) if *existing != new_action => {
                conflicts.push(GrammarConflictError {
                    state,
                    symbol: terminal,
                    existing: *existing,
                    attempted: new_action,
                });
            }
            Some(_) => {}
            None => {
                action.insert((state, terminal), new_action);
            }
        }
    }
}
