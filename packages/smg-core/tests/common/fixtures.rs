//! Test fixtures
//!
//! Ready-made graphs and sizing oracles.

use smg_core::features::smg::{
    ClangSmg, FunctionDeclaration, MachineModel, SmgObject, SmgType, TypeSizeOracle,
};
use smg_core::SmgConfig;
use std::sync::Arc;

use super::builders::ClangSmgBuilder;

/// Oracle answering the same size for every type
#[derive(Debug, Clone, Copy)]
pub struct ConstantSizer(pub u64);

impl TypeSizeOracle for ConstantSizer {
    fn size_of(&self, _ty: &SmgType, _model: MachineModel) -> Option<u64> {
        Some(self.0)
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

/// 4-byte `int`
pub fn int_type() -> SmgType {
    SmgType::named("int")
}

/// 8-byte pointer on Linux64
pub fn ptr_type() -> SmgType {
    SmgType::named("void *")
}

/// Function returning `int`
pub fn int_function(name: &str) -> FunctionDeclaration {
    FunctionDeclaration::new(name, Some(int_type()))
}

/// Graph sized by a constant oracle
pub fn constant_sized_smg(size: u64) -> ClangSmg {
    ClangSmg::with_oracle(SmgConfig::default(), Arc::new(ConstantSizer(size)))
}

/// `main` frame with local `head` pointing to a singly linked list of
/// `length` heap nodes (`next` at offset 0, `data` at offset 8).
///
/// Returns the graph and the nodes in list order.
pub fn fixture_linked_list(length: usize) -> (ClangSmg, Vec<SmgObject>) {
    let mut builder = ClangSmgBuilder::new().frame(int_function("main"));
    let head = builder.local("head", 8);

    let nodes: Vec<SmgObject> = (0..length)
        .map(|i| builder.heap(&format!("node_{i}"), 16))
        .collect();

    let mut previous = head;
    for node in &nodes {
        builder.point(&previous, 0, node);
        builder.store_fresh(node, 8, int_type());
        previous = node.clone();
    }
    builder.store_null(&previous, 0, ptr_type());

    (builder.build(), nodes)
}
