use std::collections::HashMap;

use lexicon::Token;

use crate::node::{CstNodeData, CstNodeId};
use crate::production_ref::ProductionRef;
use crate::tree::Cst;

/// Mutable staging area for assembling a `Cst` bottom-up, mirroring the
/// builder/frozen split used throughout this workspace (`DfaBuilder` /
/// `Dfa`, `GrammarBuilder` / `Grammar`). The parser creates children
/// before the node that owns them exists — a leaf is emitted on Shift, an
/// internal node only once its whole right-hand side has been reduced —
/// so each node's `parent` link is backpatched onto the child the moment
/// its parent is built, never supplied up front.
#[derive(Debug, Default)]
pub struct CstBuilder {
    nodes: Vec<CstNodeData>,
    include_epsilons: bool,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `new_epsilon_internal` actually materializes a childless
    /// internal node for an empty reduction instead of being skipped,
    /// per spec.md §5's "may be omitted" wording for epsilon productions.
    pub fn with_epsilons(mut self, include_epsilons: bool) -> Self {
        self.include_epsilons = include_epsilons;
        self
    }

    fn push(&mut self, data: CstNodeData) -> CstNodeId {
        let id = CstNodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    fn backpatch_parent(&mut self, children: &[CstNodeId], parent: CstNodeId) {
        for &child in children {
            self.nodes[child.0 as usize].set_parent(parent);
        }
    }

    pub fn new_leaf(&mut self, token: Token) -> CstNodeId {
        self.push(CstNodeData::Leaf {
            token,
            parent: None,
            properties: HashMap::new(),
        })
    }

    pub fn new_internal(&mut self, production: ProductionRef, children: Vec<CstNodeId>) -> CstNodeId {
        let id = self.push(CstNodeData::Internal {
            production,
            children: children.clone(),
            parent: None,
            properties: HashMap::new(),
        });
        self.backpatch_parent(&children, id);
        id
    }

    pub fn new_root(&mut self, production: ProductionRef, children: Vec<CstNodeId>) -> CstNodeId {
        let id = self.push(CstNodeData::Root {
            production,
            children: children.clone(),
            properties: HashMap::new(),
        });
        self.backpatch_parent(&children, id);
        id
    }

    /// Builds a zero-child internal node standing in for an epsilon
    /// reduction, if `with_epsilons(true)` was set; otherwise returns
    /// `None` and the caller should skip inserting a node for it.
    pub fn new_epsilon_internal(&mut self, production: ProductionRef) -> Option<CstNodeId> {
        if self.include_epsilons {
            Some(self.new_internal(production, Vec::new()))
        } else {
            None
        }
    }

    pub fn set_property(&mut self, id: CstNodeId, key: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.0 as usize]
            .properties_mut()
            .insert(key.into(), value.into());
    }

    pub fn finish(self, root: CstNodeId) -> Cst {
        Cst {
            nodes: self.nodes,
            root,
        }
    }
}
