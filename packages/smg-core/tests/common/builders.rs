//! Test data builders
//!
//! This module provides a builder for C memory graphs.

use smg_core::features::smg::{
    ClangSmg, FunctionDeclaration, MachineModel, SmgEdgeHasValue, SmgEdgePointsTo, SmgObject,
    SmgType, SmgValue,
};
use smg_core::SmgConfig;

/// Builder for ClangSmg
///
/// Panics on structural errors; fixtures are expected to be well formed.
#[derive(Debug)]
pub struct ClangSmgBuilder {
    smg: ClangSmg,
}

impl ClangSmgBuilder {
    /// Create a new builder over a fresh Linux64 graph
    pub fn new() -> Self {
        Self {
            smg: ClangSmg::new(MachineModel::Linux64),
        }
    }

    /// Create a new builder with a configuration
    pub fn with_config(config: SmgConfig) -> Self {
        Self {
            smg: ClangSmg::with_config(config),
        }
    }

    /// Push a stack frame
    pub fn frame(mut self, function: FunctionDeclaration) -> Self {
        self.smg.add_stack_frame(function).unwrap();
        self
    }

    /// Add a local of the innermost frame
    pub fn local(&mut self, name: &str, size: u64) -> SmgObject {
        let object = SmgObject::new(size, name);
        self.smg.add_stack_object(object.clone()).unwrap();
        object
    }

    /// Add a global
    pub fn global(&mut self, name: &str, size: u64) -> SmgObject {
        let object = SmgObject::new(size, name);
        self.smg.add_global_object(object.clone()).unwrap();
        object
    }

    /// Add a heap allocation
    pub fn heap(&mut self, label: &str, size: u64) -> SmgObject {
        let object = SmgObject::new(size, label);
        self.smg.add_heap_object(object.clone()).unwrap();
        object
    }

    /// Store the address of `target` at `offset` of `source`
    pub fn point(&mut self, source: &SmgObject, offset: u64, target: &SmgObject) -> SmgValue {
        let address = SmgValue::fresh();
        self.smg.add_value(address).unwrap();
        self.smg
            .add_points_to_edge(SmgEdgePointsTo::new(address, target.clone(), 0));
        self.smg.add_has_value_edge(SmgEdgeHasValue::new(
            source.clone(),
            offset,
            SmgType::named("void *"),
            address,
        ));
        address
    }

    /// Store a fresh non-pointer value at `offset` of `object`
    pub fn store_fresh(&mut self, object: &SmgObject, offset: u64, ty: SmgType) -> SmgValue {
        let value = SmgValue::fresh();
        self.smg.add_value(value).unwrap();
        self.smg
            .add_has_value_edge(SmgEdgeHasValue::new(object.clone(), offset, ty, value));
        value
    }

    /// Store the null value at `offset` of `object`
    pub fn store_null(&mut self, object: &SmgObject, offset: u64, ty: SmgType) {
        self.smg.add_has_value_edge(SmgEdgeHasValue::new(
            object.clone(),
            offset,
            ty,
            SmgValue::NULL,
        ));
    }

    /// Build the graph
    pub fn build(self) -> ClangSmg {
        self.smg
    }
}

impl Default for ClangSmgBuilder {
    fn default() -> Self {
        Self::new()
    }
}
