//! Symbolic Memory Graph core
//!
//! Language-agnostic heap graph:
//!
//! ```text
//! Smg ::= Objects × Values × HasValue × PointsTo × Validity
//!
//! HasValue ⊆ Object × Offset × Type × Value
//! PointsTo ⊆ Value × Object × Offset
//! ```
//!
//! Edge insertion performs no structural checking: a multi-step mutation may
//! pass through inconsistent intermediate states. The verifier decides
//! whether the final state is consistent.
//!
//! Cloning a graph clones the containers of handles; object payloads are
//! shared and immutable, so copies never alias mutable storage.

use super::domain::{
    HasValueFilter, MachineModel, SmgEdgeHasValue, SmgEdgePointsTo, SmgObject, SmgType,
    SmgValue,
};
use super::infrastructure::CBasicTypeSizer;
use super::ports::TypeSizeOracle;
use crate::config::SmgConfig;
use crate::errors::{Result, SmgError};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Container sizes of one graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SmgStats {
    pub objects: usize,
    pub valid_objects: usize,
    pub values: usize,
    pub has_value_edges: usize,
    pub points_to_edges: usize,
}

/// Symbolic memory graph of one abstract program state
#[derive(Debug, Clone)]
pub struct Smg {
    objects: FxHashSet<SmgObject>,
    values: FxHashSet<SmgValue>,
    hv_edges: FxHashSet<SmgEdgeHasValue>,
    pt_edges: FxHashSet<SmgEdgePointsTo>,
    object_validity: FxHashMap<SmgObject, bool>,
    config: SmgConfig,
    oracle: Arc<dyn TypeSizeOracle>,
}

impl Smg {
    /// Fresh graph with the default configuration for `machine_model`
    pub fn new(machine_model: MachineModel) -> Self {
        Self::with_config(SmgConfig::default().machine_model(machine_model))
    }

    pub fn with_config(config: SmgConfig) -> Self {
        Self::with_oracle(config, Arc::new(CBasicTypeSizer::new()))
    }

    /// Fresh graph with an injected sizing oracle.
    ///
    /// Contains exactly the null object and the null value, and no edges.
    pub fn with_oracle(config: SmgConfig, oracle: Arc<dyn TypeSizeOracle>) -> Self {
        let mut smg = Self {
            objects: FxHashSet::default(),
            values: FxHashSet::default(),
            hv_edges: FxHashSet::default(),
            pt_edges: FxHashSet::default(),
            object_validity: FxHashMap::default(),
            config,
            oracle,
        };

        let null = SmgObject::null().clone();
        smg.objects.insert(null.clone());
        smg.object_validity.insert(null, false);
        smg.values.insert(SmgValue::NULL);
        smg
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutators
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a fresh object; it starts valid.
    ///
    /// With checks: fails on an object already present. Without checks the
    /// re-insertion is logged and ignored.
    pub fn add_object(&mut self, object: SmgObject) -> Result<()> {
        if self.objects.contains(&object) {
            if self.config.perform_checks {
                return Err(SmgError::DuplicateObject(object));
            }
            warn!("Object [{}] already in the SMG, ignoring re-insertion", object);
            return Ok(());
        }

        self.object_validity.insert(object.clone(), true);
        self.objects.insert(object);
        Ok(())
    }

    /// Add a value.
    ///
    /// With checks: fails on a value already present. Without checks the
    /// re-insertion is logged and ignored.
    pub fn add_value(&mut self, value: SmgValue) -> Result<()> {
        if !self.values.insert(value) {
            if self.config.perform_checks {
                return Err(SmgError::DuplicateValue(value));
            }
            warn!("Value [{}] already in the SMG, ignoring re-insertion", value);
        }
        Ok(())
    }

    pub fn add_has_value_edge(&mut self, edge: SmgEdgeHasValue) {
        self.hv_edges.insert(edge);
    }

    pub fn add_points_to_edge(&mut self, edge: SmgEdgePointsTo) {
        self.pt_edges.insert(edge);
    }

    /// Remove exactly `edge`; returns whether it was present
    pub fn remove_has_value_edge(&mut self, edge: &SmgEdgeHasValue) -> bool {
        self.hv_edges.remove(edge)
    }

    /// Remove every points-to edge starting from `value`; returns whether
    /// any was present
    pub fn remove_points_to_edge(&mut self, value: SmgValue) -> bool {
        let before = self.pt_edges.len();
        self.pt_edges.retain(|pt| pt.value() != value);
        before != self.pt_edges.len()
    }

    /// Remove the value only; edges holding it are left to the caller
    pub fn remove_value(&mut self, value: SmgValue) -> bool {
        self.values.remove(&value)
    }

    /// Remove the object only; edges mentioning it are left dangling
    pub fn remove_object(&mut self, object: &SmgObject) -> bool {
        self.object_validity.remove(object);
        self.objects.remove(object)
    }

    /// Remove the object and every has-value and points-to edge mentioning it
    pub fn remove_object_and_edges(&mut self, object: &SmgObject) -> bool {
        let removed = self.remove_object(object);
        self.hv_edges.retain(|hv| hv.object() != object);
        self.pt_edges.retain(|pt| pt.object() != object);
        removed
    }

    pub fn set_validity(&mut self, object: &SmgObject, validity: bool) -> Result<()> {
        match self.object_validity.get_mut(object) {
            Some(slot) => {
                *slot = validity;
                Ok(())
            }
            None => Err(SmgError::UnknownObject(object.clone())),
        }
    }

    /// Replace every has-value edge of the graph with `hv_edges`
    pub fn replace_hv_set(&mut self, hv_edges: FxHashSet<SmgEdgeHasValue>) {
        self.hv_edges = hv_edges;
    }

    /// Declare `v1` and `v2` abstractly equal.
    ///
    /// `v1` stays as representative unless `v2` is the null value, which is
    /// always kept. Has-value edges holding the dropped value are rewritten
    /// to the representative. The dropped value's points-to edge moves to the
    /// representative when the representative has none, and is discarded
    /// otherwise.
    pub fn merge_values(&mut self, v1: SmgValue, v2: SmgValue) {
        if v1 == v2 {
            return;
        }

        let (kept, dropped) = if v2.is_null() { (v2, v1) } else { (v1, v2) };
        debug!("Merging value {} into {}", dropped, kept);

        let rewritten: Vec<SmgEdgeHasValue> = self
            .hv_edges
            .iter()
            .filter(|hv| hv.value() == dropped)
            .cloned()
            .collect();
        for hv in rewritten {
            self.hv_edges.remove(&hv);
            self.hv_edges.insert(hv.with_value(kept));
        }

        let dropped_targets: Vec<SmgEdgePointsTo> = self
            .pt_edges
            .iter()
            .filter(|pt| pt.value() == dropped)
            .cloned()
            .collect();
        let kept_is_pointer = self.is_pointer(kept) || kept.is_null();
        for pt in dropped_targets {
            self.pt_edges.remove(&pt);
            if !kept_is_pointer {
                self.pt_edges.insert(pt.with_value(kept));
            }
        }

        self.values.remove(&dropped);
        self.values.insert(kept);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    pub fn is_object_valid(&self, object: &SmgObject) -> Result<bool> {
        self.object_validity
            .get(object)
            .copied()
            .ok_or_else(|| SmgError::UnknownObject(object.clone()))
    }

    pub fn get_points_to_edge(&self, value: SmgValue) -> Option<&SmgEdgePointsTo> {
        self.pt_edges.iter().find(|pt| pt.value() == value)
    }

    pub fn is_pointer(&self, value: SmgValue) -> bool {
        self.get_points_to_edge(value).is_some()
    }

    /// Object designated by `value`. The null value designates the null
    /// object even without an explicit points-to edge.
    pub fn get_object_pointed_by(&self, value: SmgValue) -> Option<&SmgObject> {
        match self.get_points_to_edge(value) {
            Some(pt) => Some(pt.object()),
            None if value.is_null() => Some(SmgObject::null()),
            None => None,
        }
    }

    /// Every has-value edge anchored at `object`
    pub fn get_values_for_object(&self, object: &SmgObject) -> FxHashSet<SmgEdgeHasValue> {
        self.get_hv_edges_filtered(&HasValueFilter::new().filter_by_object(object))
    }

    /// Has-value edges anchored at `object` and starting at `offset`
    pub fn get_values_for_object_at(
        &self,
        object: &SmgObject,
        offset: u64,
    ) -> FxHashSet<SmgEdgeHasValue> {
        self.get_hv_edges_filtered(
            &HasValueFilter::new()
                .filter_by_object(object)
                .filter_at_offset(offset),
        )
    }

    pub fn get_hv_edges_filtered(&self, filter: &HasValueFilter) -> FxHashSet<SmgEdgeHasValue> {
        self.hv_edges
            .iter()
            .filter(|hv| filter.holds_for(hv))
            .cloned()
            .collect()
    }

    /// Byte mask of `object`: `true` where a has-value edge holding the
    /// null value covers the byte. Edges of unsizable type cover nothing;
    /// edges reaching past the object grow the mask.
    pub fn get_null_bytes_for_object(&self, object: &SmgObject) -> Vec<bool> {
        let nulls = HasValueFilter::new()
            .filter_by_object(object)
            .filter_having_value(SmgValue::NULL);

        let mut bytes = vec![false; object.size_in_bytes() as usize];
        for edge in nulls.filter(&self.hv_edges) {
            let Some(size) = self.size_of(edge.ty()) else {
                continue;
            };
            let (start, end) = (edge.offset() as usize, (edge.offset() + size) as usize);
            if bytes.len() < end {
                bytes.resize(end, false);
            }
            bytes[start..end].iter_mut().for_each(|byte| *byte = true);
        }
        bytes
    }

    pub fn get_objects(&self) -> &FxHashSet<SmgObject> {
        &self.objects
    }

    pub fn get_values(&self) -> &FxHashSet<SmgValue> {
        &self.values
    }

    pub fn get_hv_edges(&self) -> &FxHashSet<SmgEdgeHasValue> {
        &self.hv_edges
    }

    pub fn get_pt_edges(&self) -> &FxHashSet<SmgEdgePointsTo> {
        &self.pt_edges
    }

    pub fn get_null_object(&self) -> &SmgObject {
        SmgObject::null()
    }

    pub fn get_null_value(&self) -> SmgValue {
        SmgValue::NULL
    }

    /// Byte size of `ty` according to the sizing oracle
    pub fn size_of(&self, ty: &SmgType) -> Option<u64> {
        self.oracle.size_of(ty, self.config.machine_model)
    }

    pub fn machine_model(&self) -> MachineModel {
        self.config.machine_model
    }

    pub fn config(&self) -> &SmgConfig {
        &self.config
    }

    pub fn oracle(&self) -> &Arc<dyn TypeSizeOracle> {
        &self.oracle
    }

    pub fn stats(&self) -> SmgStats {
        SmgStats {
            objects: self.objects.len(),
            valid_objects: self.object_validity.values().filter(|v| **v).count(),
            values: self.values.len(),
            has_value_edges: self.hv_edges.len(),
            points_to_edges: self.pt_edges.len(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering helpers
    // ═══════════════════════════════════════════════════════════════════════

    pub(crate) fn values_to_string(&self) -> String {
        let mut values: Vec<_> = self.values.iter().collect();
        values.sort();
        format!(
            "values=[{}]",
            values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
        )
    }

    pub(crate) fn pt_to_string(&self) -> String {
        let mut edges: Vec<String> = self.pt_edges.iter().map(|pt| pt.to_string()).collect();
        edges.sort();
        format!("pointsTo={{{}}}", edges.join(", "))
    }

    pub(crate) fn hv_to_string(&self) -> String {
        let mut edges: Vec<String> = self.hv_edges.iter().map(|hv| hv.to_string()).collect();
        edges.sort();
        format!("hasValue=[{}]", edges.join(", "))
    }
}

impl fmt::Display for Smg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut objects: Vec<_> = self.objects.iter().collect();
        objects.sort();
        writeln!(f, "SMG [")?;
        writeln!(
            f,
            " objects=[{}]",
            objects.iter().map(|o| o.to_string()).collect::<Vec<_>>().join(", ")
        )?;
        writeln!(f, " {}", self.values_to_string())?;
        writeln!(f, " {}", self.pt_to_string())?;
        writeln!(f, " {}", self.hv_to_string())?;
        write!(f, "]")
    }
}
