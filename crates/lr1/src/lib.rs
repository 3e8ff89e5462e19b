//! LR(1) item-set construction and parse-table generation (component E).

mod builder;
mod closure;
mod error;
mod first_sets;
mod item;
mod table;
mod terminal;

pub use builder::Lr1Builder;
pub use error::GrammarConflictError;
pub use table::{Action, ParseTable, RuleInfo, StateId};
pub use terminal::Terminal;
