use grammar::{Grammar, Symbol};

use crate::first_sets::FirstSets;
use crate::item::{merge_lookahead, Item, ItemSet};
use crate::terminal::Terminal;

/// Closes `items` under non-terminal expansion, per spec.md §4.E: for every
/// `A → α . B β , L`, for every `B → γ`, add `B → . γ , FIRST(βL)`. Runs to
/// a fixed point since closing one item can expose another.
pub fn closure(grammar: &Grammar, firsts: &FirstSets, mut items: ItemSet) -> ItemSet {
    loop {
        let mut changed = false;
        let snapshot: Vec<(Item, Vec<Terminal>)> = items
            .iter()
            .map(|(item, lookahead)| (*item, lookahead.iter().cloned().collect()))
            .collect();

        for (item, lookahead) in snapshot {
            let lookahead_set = lookahead.into_iter().collect();
            let Some(Symbol::NonTerminal(name)) = item.next_symbol(grammar) else {
                continue;
            };
            let tail = item.rhs_tail(grammar);
            let new_lookahead = firsts.first_of_tail(tail, &lookahead_set);

            for (rule_index, rule) in grammar.rules().iter().enumerate() {
                if rule.head != *name {
                    continue;
                }
                if merge_lookahead(&mut items, Item::initial(rule_index), new_lookahead.clone()) {
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }
    items
}

/// The goto kernel on `symbol`: every item whose dot sits just before
/// `symbol`, shifted one place, lookaheads carried through unchanged.
pub fn goto_kernel(grammar: &Grammar, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let mut kernel = ItemSet::new();
    for (item, lookahead) in items {
        if item.next_symbol(grammar) == Some(symbol) {
            merge_lookahead(&mut kernel, item.shifted(), lookahead.iter().cloned());
        }
    }
    kernel
}
