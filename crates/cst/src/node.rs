use std::collections::HashMap;
use std::fmt;

use lexicon::Token;

use crate::production_ref::ProductionRef;

/// An index into a `Cst`'s arena. Never constructed outside this crate, so
/// a `CstNodeId` is only ever meaningful against the `Cst` that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CstNodeId(pub(crate) u32);

impl fmt::Display for CstNodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three node shapes spec.md §5 names. `Root` and `Internal` both carry
/// a production reference and their children; only `Root` has no parent.
/// A child's `parent` is unknown at the moment it is created (the parser
/// builds bottom-up) and is backpatched by the builder once the enclosing
/// node exists — see `CstBuilder::new_internal`/`new_root`.
#[derive(Debug, Clone)]
pub enum CstNodeData {
    Root {
        production: ProductionRef,
        children: Vec<CstNodeId>,
        properties: HashMap<String, String>,
    },
    Internal {
        production: ProductionRef,
        children: Vec<CstNodeId>,
        parent: Option<CstNodeId>,
        properties: HashMap<String, String>,
    },
    Leaf {
        token: Token,
        parent: Option<CstNodeId>,
        properties: HashMap<String, String>,
    },
}

impl CstNodeData {
    pub(crate) fn parent(&self) -> Option<CstNodeId> {
        match self {
            CstNodeData::Root { .. } => None,
            CstNodeData::Internal { parent, .. } | CstNodeData::Leaf { parent, .. } => *parent,
        }
    }

    pub(crate) fn set_parent(&mut self, id: CstNodeId) {
        match self {
            CstNodeData::Root { .. } => panic!("a root node cannot have a parent"),
            CstNodeData::Internal { parent, .. } | CstNodeData::Leaf { parent, .. } => {
                *parent = Some(id);
            }
        }
    }

    pub(crate) fn children(&self) -> &[CstNodeId] {
        match self {
            CstNodeData::Root { children, .. } | CstNodeData::Internal { children, .. } => children,
            CstNodeData::Leaf { .. } => &[],
        }
    }

    pub(crate) fn properties_mut(&mut self) -> &mut HashMap<String, String> {
        match self {
            CstNodeData::Root { properties, .. }
            | CstNodeData::Internal { properties, .. }
            | CstNodeData::Leaf { properties, .. } => properties,
        }
    }

    pub(crate) fn properties(&self) -> &HashMap<String, String> {
        match self {
            CstNodeData::Root { properties, .. }
            | CstNodeData::Internal { properties, .. }
            | CstNodeData::Leaf { properties, .. } => properties,
        }
    }
}
