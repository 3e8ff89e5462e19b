use std::fmt;

/// A lightweight pointer back to the grammar rule that produced a node,
/// kept local to this crate so `cst` does not need to depend on `grammar`
/// or `lr1` — only the rule's identity and head name survive into the
/// tree, per spec.md §5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductionRef {
    pub rule_index: u32,
    pub head: String,
}

impl ProductionRef {
    pub fn new(rule_index: u32, head: impl Into<String>) -> Self {
        Self {
            rule_index,
            head: head.into(),
        }
    }
}

impl fmt::Display for ProductionRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.head, self.rule_index)
    }
}
