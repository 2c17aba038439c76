//! Has-value and points-to edges
//!
//! Edges are plain values compared structurally; the graph keeps them in
//! unordered sets.

use super::object::SmgObject;
use super::types::SmgType;
use super::value::SmgValue;
use std::fmt;

/// Reading `ty`-sized bytes at `offset` within `object` yields `value`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SmgEdgeHasValue {
    object: SmgObject,
    offset: u64,
    ty: SmgType,
    value: SmgValue,
}

impl SmgEdgeHasValue {
    pub fn new(object: SmgObject, offset: u64, ty: SmgType, value: SmgValue) -> Self {
        Self {
            object,
            offset,
            ty,
            value,
        }
    }

    pub fn object(&self) -> &SmgObject {
        &self.object
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn ty(&self) -> &SmgType {
        &self.ty
    }

    pub fn value(&self) -> SmgValue {
        self.value
    }

    /// Same field, different value
    pub fn with_value(&self, value: SmgValue) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Whether both edges describe the same `(object, offset, type)` field
    pub fn same_field(&self, other: &SmgEdgeHasValue) -> bool {
        self.object == other.object && self.offset == other.offset && self.ty == other.ty
    }

    /// Two edges are consistent unless they describe the same field with
    /// different values
    pub fn is_consistent_with(&self, other: &SmgEdgeHasValue) -> bool {
        !self.same_field(other) || self.value == other.value
    }
}

impl fmt::Display for SmgEdgeHasValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}+{}b[{}]->{}",
            self.object, self.offset, self.ty, self.value
        )
    }
}

/// `value`, read as an address, designates `offset` bytes into `object`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SmgEdgePointsTo {
    value: SmgValue,
    object: SmgObject,
    offset: u64,
}

impl SmgEdgePointsTo {
    pub fn new(value: SmgValue, object: SmgObject, offset: u64) -> Self {
        Self {
            value,
            object,
            offset,
        }
    }

    pub fn value(&self) -> SmgValue {
        self.value
    }

    pub fn object(&self) -> &SmgObject {
        &self.object
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Same target, different source value
    pub fn with_value(&self, value: SmgValue) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

impl fmt::Display for SmgEdgePointsTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}+{}b", self.value, self.object, self.offset)
    }
}
