//! The concrete syntax tree component (G): an arena-backed tree built
//! bottom-up by the parser's reduce actions.

mod builder;
mod node;
mod production_ref;
mod tree;

pub use builder::CstBuilder;
pub use node::{CstNodeData, CstNodeId};
pub use production_ref::ProductionRef;
pub use tree::Cst;

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon::{Position, Token};

    fn tok(ty: &str, value: &str) -> Token {
        Token::new(ty, value, Position::default())
    }

    #[test]
    fn leaf_then_internal_then_root() {
        let mut builder = CstBuilder::new();
        let a = builder.new_leaf(tok("int", "1"));
        let plus = builder.new_leaf(tok("plus", "+"));
        let b = builder.new_leaf(tok("int", "2"));
        let sum = builder.new_internal(ProductionRef::new(0, "expr"), vec![a, plus, b]);
        let root = builder.new_root(ProductionRef::new(1, "start"), vec![sum]);
        let cst = builder.finish(root);

        assert_eq!(cst.root(), root);
        assert!(cst.parent(root).is_none());
        assert_eq!(cst.children(root), &[sum]);
        assert_eq!(cst.parent(sum), Some(root));
        assert_eq!(cst.parent(a), Some(sum));
        let leaves: Vec<&str> = cst.leaves().iter().map(|&id| cst.token(id).unwrap().value()).collect();
        assert_eq!(leaves, vec!["1", "+", "2"]);
        assert_eq!(cst.ascend_to_root(a), vec![a, sum, root]);
        assert_eq!(cst.ascend_to_root(root), vec![root]);
    }

    #[test]
    fn epsilon_internal_omitted_by_default() {
        let mut builder = CstBuilder::new();
        assert!(builder
            .new_epsilon_internal(ProductionRef::new(2, "opt"))
            .is_none());
    }

    #[test]
    fn epsilon_internal_materialized_when_enabled() {
        let mut builder = CstBuilder::new().with_epsilons(true);
        let epsilon = builder
            .new_epsilon_internal(ProductionRef::new(2, "opt"))
            .unwrap();
        let root = builder.new_root(ProductionRef::new(0, "start"), vec![epsilon]);
        let cst = builder.finish(root);
        assert_eq!(cst.as_internal(epsilon).unwrap().1, &[]);
        assert_eq!(cst.parent(epsilon), Some(root));
    }

    #[test]
    fn properties_are_freeform() {
        let mut builder = CstBuilder::new();
        let root = builder.new_root(ProductionRef::new(0, "start"), vec![]);
        builder.set_property(root, "resolved_type", "int");
        let cst = builder.finish(root);
        assert_eq!(
            cst.properties(root).get("resolved_type").map(String::as_str),
            Some("int")
        );
    }
}
