//! Resolution results, keyed by AST node identity.
//!
//! AST nodes carry no resolution state; everything analysis learns about
//! a node lands here. The maps are append/overwrite-only and are never
//! cleared mid-compilation; a later pass may refine an earlier pass's
//! entry for the same node.

use crate::const_eval::ConstValue;
use crate::symbol::SymbolId;
use lumen_ast::NodeId;
use lumen_core::type_system::Type;
use std::collections::HashMap;

/// The annotation store shared by every pass and exposed to later stages.
#[derive(Debug, Default)]
pub struct SemanticContext {
    types: HashMap<NodeId, Type>,
    symbols: HashMap<NodeId, SymbolId>,
    consts: HashMap<NodeId, ConstValue>,
}

impl SemanticContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }

    #[must_use]
    pub fn type_of(&self, node: NodeId) -> Option<Type> {
        self.types.get(&node).copied()
    }

    pub fn set_symbol(&mut self, node: NodeId, symbol: SymbolId) {
        self.symbols.insert(node, symbol);
    }

    #[must_use]
    pub fn symbol_of(&self, node: NodeId) -> Option<SymbolId> {
        self.symbols.get(&node).copied()
    }

    pub fn set_const(&mut self, node: NodeId, value: ConstValue) {
        self.consts.insert(node, value);
    }

    #[must_use]
    pub fn const_of(&self, node: NodeId) -> Option<&ConstValue> {
        self.consts.get(&node)
    }

    /// Number of type-annotated nodes; used by tests and tooling.
    #[must_use]
    pub fn typed_node_count(&self) -> usize {
        self.types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::type_system::TypeId;

    #[test]
    fn later_entries_overwrite_earlier_ones() {
        let mut ctx = SemanticContext::new();
        let node = NodeId::new(1);
        ctx.set_type(node, Type::unresolved());
        ctx.set_type(node, Type::rvalue(TypeId::INT32));
        assert_eq!(ctx.type_of(node), Some(Type::rvalue(TypeId::INT32)));
    }

    #[test]
    fn missing_nodes_have_no_annotation() {
        let ctx = SemanticContext::new();
        assert_eq!(ctx.type_of(NodeId::new(7)), None);
        assert_eq!(ctx.symbol_of(NodeId::new(7)), None);
    }
}
