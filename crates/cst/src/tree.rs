use std::collections::HashMap;

use lexicon::Token;

use crate::node::{CstNodeData, CstNodeId};
use crate::production_ref::ProductionRef;

/// A frozen concrete syntax tree: an arena of nodes addressed by index,
/// per spec.md §5's design note against `Rc`/parent-pointer cycles.
#[derive(Debug, Clone)]
pub struct Cst {
    pub(crate) nodes: Vec<CstNodeData>,
    pub(crate) root: CstNodeId,
}

impl Cst {
    pub fn root(&self) -> CstNodeId {
        self.root
    }

    fn get(&self, id: CstNodeId) -> &CstNodeData {
        &self.nodes[id.0 as usize]
    }

    pub fn parent(&self, id: CstNodeId) -> Option<CstNodeId> {
        self.get(id).parent()
    }

    /// Walks parent links from `id` all the way up to (and including) the
    /// root, per spec.md §4.G's "ascend to root" operation. `id` itself is
    /// the first element; the root is always the last.
    pub fn ascend_to_root(&self, id: CstNodeId) -> Vec<CstNodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path
    }

    pub fn children(&self, id: CstNodeId) -> &[CstNodeId] {
        self.get(id).children()
    }

    pub fn production(&self, id: CstNodeId) -> Option<&ProductionRef> {
        match self.get(id) {
            CstNodeData::Root { production, .. } | CstNodeData::Internal { production, .. } => {
                Some(production)
            }
            CstNodeData::Leaf { .. } => None,
        }
    }

    pub fn token(&self, id: CstNodeId) -> Option<&Token> {
        match self.get(id) {
            CstNodeData::Leaf { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn properties(&self, id: CstNodeId) -> &HashMap<String, String> {
        self.get(id).properties()
    }

    pub fn as_leaf(&self, id: CstNodeId) -> Option<&Token> {
        self.token(id)
    }

    pub fn as_internal(&self, id: CstNodeId) -> Option<(&ProductionRef, &[CstNodeId])> {
        match self.get(id) {
            CstNodeData::Internal {
                production,
                children,
                ..
            } => Some((production, children)),
            _ => None,
        }
    }

    pub fn as_root(&self, id: CstNodeId) -> Option<(&ProductionRef, &[CstNodeId])> {
        match self.get(id) {
            CstNodeData::Root {
                production,
                children,
                ..
            } => Some((production, children)),
            _ => None,
        }
    }

    /// All node ids in arena (insertion) order.
    pub fn nodes(&self) -> impl Iterator<Item = CstNodeId> + '_ {
        (0..self.nodes.len() as u32).map(CstNodeId)
    }

    /// Leaf nodes in left-to-right depth-first order — the token sequence
    /// the tree was built from, per spec.md §5.
    pub fn leaves(&self) -> Vec<CstNodeId> {
        let mut out = Vec::new();
        self.collect_leaves(self.root, &mut out);
        out
    }

    fn collect_leaves(&self, id: CstNodeId, out: &mut Vec<CstNodeId>) {
        match self.get(id) {
            CstNodeData::Leaf { .. } => out.push(id),
            CstNodeData::Internal { children, .. } | CstNodeData::Root { children, .. } => {
                for &child in children {
                    self.collect_leaves(child, out);
                }
            }
        }
    }
}
