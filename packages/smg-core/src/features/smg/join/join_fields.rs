//! Field-level join of two objects
//!
//! ```text
//! H1' = non-null fields of smg1
//!     ∪ null blocks nullified in both objects
//!     ∪ null fields under smg2 pointers that smg1 nullifies
//!     ∪ fresh-valued copies of smg2 fields smg1 lacks
//! ```
//!
//! and symmetrically for `H2'`. Both objects must have the same size. The
//! null value is shared by every graph, so null edges compare across sides.

use super::join_status::JoinStatus;
use crate::errors::{Result, SmgError};
use crate::features::smg::domain::{
    HasValueFilter, SmgEdgeHasValue, SmgObject, SmgType, SmgValue,
};
use crate::features::smg::graph::Smg;
use rustc_hash::FxHashSet;
use tracing::{debug, error};

/// Both graphs after joining the fields of one object pair, with the
/// resulting entailment status
#[derive(Debug, Clone)]
pub struct JoinFields {
    smg1: Smg,
    smg2: Smg,
    status: JoinStatus,
}

impl JoinFields {
    /// Join `obj1` of `smg1` with `obj2` of `smg2`.
    ///
    /// Takes both graphs by value and rewrites their has-value edges; clone
    /// them first to keep the inputs.
    pub fn new(mut smg1: Smg, mut smg2: Smg, obj1: &SmgObject, obj2: &SmgObject) -> Result<Self> {
        if obj1.size_in_bytes() != obj2.size_in_bytes() {
            return Err(SmgError::JoinSizeMismatch(obj1.clone(), obj2.clone()));
        }
        if !smg1.get_objects().contains(obj1) {
            return Err(SmgError::UnknownObject(obj1.clone()));
        }
        if !smg2.get_objects().contains(obj2) {
            return Err(SmgError::UnknownObject(obj2.clone()));
        }

        let mut h1 = compatible_hv_edge_set(&smg1, &smg2, obj1, obj2);
        let mut h2 = compatible_hv_edge_set(&smg2, &smg1, obj2, obj1);

        let orig1 = smg1.clone();
        let orig2 = smg2.clone();
        smg1.replace_hv_set(h1.clone());
        smg2.replace_hv_set(h2.clone());

        let mut status = JoinStatus::Equal;
        status = join_fields_relax_status(&orig1, &smg1, status, JoinStatus::RightEntail, obj1);
        status = join_fields_relax_status(&orig2, &smg2, status, JoinStatus::LeftEntail, obj2);

        let smg2_extension = merge_non_null_has_value_edges(&smg1, &smg2, obj1, obj2);
        let smg1_extension = merge_non_null_has_value_edges(&smg2, &smg1, obj2, obj1);

        for edge in &smg1_extension {
            smg1.add_value(edge.value())?;
        }
        for edge in &smg2_extension {
            smg2.add_value(edge.value())?;
        }
        h1.extend(smg1_extension);
        h2.extend(smg2_extension);
        smg1.replace_hv_set(h1);
        smg2.replace_hv_set(h2);

        debug!("Joined fields of {} and {}: {}", obj1, obj2, status);

        if smg1.config().checkpoints_enabled() {
            if let Err(err) = check_result_consistency(&smg1, &smg2, obj1, obj2) {
                error!("Join of {} and {} left unmatched fields: {}", obj1, obj2, err);
            }
        }

        Ok(Self { smg1, smg2, status })
    }

    pub fn smg1(&self) -> &Smg {
        &self.smg1
    }

    pub fn smg2(&self) -> &Smg {
        &self.smg2
    }

    pub fn status(&self) -> JoinStatus {
        self.status
    }

    pub fn into_parts(self) -> (Smg, Smg, JoinStatus) {
        (self.smg1, self.smg2, self.status)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Edge sets
// ═══════════════════════════════════════════════════════════════════════════

fn null_edges_of(object: &SmgObject) -> HasValueFilter {
    HasValueFilter::new()
        .filter_by_object(object)
        .filter_having_value(SmgValue::NULL)
}

fn non_null_edges_of(object: &SmgObject) -> HasValueFilter {
    HasValueFilter::new()
        .filter_by_object(object)
        .filter_not_having_value(SmgValue::NULL)
}

/// Whether every byte of `[offset, offset + size)` is set in `bytes`
fn is_covered(bytes: &[bool], offset: u64, size: u64) -> bool {
    let (start, end) = (offset as usize, (offset + size) as usize);
    end <= bytes.len() && bytes[start..end].iter().all(|byte| *byte)
}

/// Every has-value edge of `smg` except the null-valued ones on `object`
pub fn hv_set_without_null_values_on_object(
    smg: &Smg,
    object: &SmgObject,
) -> FxHashSet<SmgEdgeHasValue> {
    let nulls = null_edges_of(object);
    smg.get_hv_edges()
        .iter()
        .filter(|hv| !nulls.holds_for(hv))
        .cloned()
        .collect()
}

/// Null edges for `obj1` standing where `obj2` holds a pointer that `smg1`
/// has no non-null field for, provided `smg1` nullifies every byte of it
pub fn hv_set_of_missing_null_values(
    smg1: &Smg,
    smg2: &Smg,
    obj1: &SmgObject,
    obj2: &SmgObject,
) -> FxHashSet<SmgEdgeHasValue> {
    let null_bytes = smg1.get_null_bytes_for_object(obj1);
    let non_null_in_smg1 = non_null_edges_of(obj1);

    let mut missing = FxHashSet::default();
    for edge in non_null_edges_of(obj2).filter(smg2.get_hv_edges()) {
        if !smg2.is_pointer(edge.value()) {
            continue;
        }

        let occupied = smg1
            .get_hv_edges()
            .iter()
            .any(|hv| non_null_in_smg1.holds_for(hv) && hv.offset() == edge.offset());
        if occupied {
            continue;
        }

        let Some(size) = smg1.size_of(edge.ty()) else {
            continue;
        };
        if is_covered(&null_bytes, edge.offset(), size) {
            missing.insert(SmgEdgeHasValue::new(
                obj1.clone(),
                edge.offset(),
                edge.ty().clone(),
                SmgValue::NULL,
            ));
        }
    }
    missing
}

/// One null edge on `obj1` per maximal block nullified in both objects
pub fn hv_set_of_common_null_values(
    smg1: &Smg,
    smg2: &Smg,
    obj1: &SmgObject,
    obj2: &SmgObject,
) -> FxHashSet<SmgEdgeHasValue> {
    let left = smg1.get_null_bytes_for_object(obj1);
    let right = smg2.get_null_bytes_for_object(obj2);
    let common = left.iter().zip(right.iter()).map(|(l, r)| *l && *r);

    let mut blocks = FxHashSet::default();
    let mut start = None;
    for (index, is_null) in common.chain(std::iter::once(false)).enumerate() {
        match (start, is_null) {
            (None, true) => start = Some(index),
            (Some(first), false) => {
                blocks.insert(SmgEdgeHasValue::new(
                    obj1.clone(),
                    first as u64,
                    SmgType::bytes((index - first) as u64),
                    SmgValue::NULL,
                ));
                start = None;
            }
            _ => {}
        }
    }
    blocks
}

/// Has-value edges `smg1` keeps when `obj1` is joined with `obj2`
pub fn compatible_hv_edge_set(
    smg1: &Smg,
    smg2: &Smg,
    obj1: &SmgObject,
    obj2: &SmgObject,
) -> FxHashSet<SmgEdgeHasValue> {
    let mut compatible = hv_set_without_null_values_on_object(smg1, obj1);
    compatible.extend(hv_set_of_common_null_values(smg1, smg2, obj1, obj2));
    compatible.extend(hv_set_of_missing_null_values(smg1, smg2, obj1, obj2));
    compatible
}

/// Fields `obj2` must gain: one per non-null field of `obj1` that `smg2`
/// has no edge for at the same offset and type, each holding a fresh value
pub fn merge_non_null_has_value_edges(
    smg1: &Smg,
    smg2: &Smg,
    obj1: &SmgObject,
    obj2: &SmgObject,
) -> FxHashSet<SmgEdgeHasValue> {
    let mut extension = FxHashSet::default();
    for edge in non_null_edges_of(obj1).filter(smg1.get_hv_edges()) {
        let same_field = HasValueFilter::new()
            .filter_by_object(obj2)
            .filter_at_offset(edge.offset())
            .filter_by_type(edge.ty());

        if !smg2.get_hv_edges().iter().any(|hv| same_field.holds_for(hv)) {
            extension.insert(SmgEdgeHasValue::new(
                obj2.clone(),
                edge.offset(),
                edge.ty().clone(),
                SmgValue::fresh(),
            ));
        }
    }
    extension
}

// ═══════════════════════════════════════════════════════════════════════════
// Status and result checks
// ═══════════════════════════════════════════════════════════════════════════

/// Relax `current` by `new_status` when `new_smg` lost a null byte of
/// `object` that `orig_smg` had
pub fn join_fields_relax_status(
    orig_smg: &Smg,
    new_smg: &Smg,
    current: JoinStatus,
    new_status: JoinStatus,
    object: &SmgObject,
) -> JoinStatus {
    let orig_null = orig_smg.get_null_bytes_for_object(object);
    let new_null = new_smg.get_null_bytes_for_object(object);

    let lost_null_byte = orig_null
        .iter()
        .enumerate()
        .any(|(index, is_null)| *is_null && !new_null.get(index).copied().unwrap_or(false));

    if lost_null_byte {
        current.update(new_status)
    } else {
        current
    }
}

/// Every null edge of `obj1` in `smg1` needs a field of the same offset and
/// type on `obj2`, which must be nullified or hold a pointer
fn check_result_consistency_single_side(
    smg1: &Smg,
    obj1: &SmgObject,
    smg2: &Smg,
    obj2: &SmgObject,
    null_bytes_in_smg2: &[bool],
) -> Result<()> {
    for edge in null_edges_of(obj1).filter(smg1.get_hv_edges()) {
        let same_field = HasValueFilter::new()
            .filter_by_object(obj2)
            .filter_at_offset(edge.offset())
            .filter_by_type(edge.ty());
        let Some(counterpart) = smg2.get_hv_edges().iter().find(|hv| same_field.holds_for(hv))
        else {
            return Err(SmgError::Inconsistent(format!(
                "join fields: null field {} has no counterpart on {}",
                edge, obj2
            )));
        };

        let size = smg1
            .size_of(edge.ty())
            .ok_or_else(|| SmgError::UnsizableType(edge.ty().to_string()))?;
        if !is_covered(null_bytes_in_smg2, edge.offset(), size)
            && !smg2.is_pointer(counterpart.value())
        {
            return Err(SmgError::Inconsistent(format!(
                "join fields: nullified blocks differ at {}",
                edge
            )));
        }
    }
    Ok(())
}

/// Postcondition of a field join: both objects carry the same number of
/// fields, and every null field on one side is matched on the other
pub fn check_result_consistency(
    smg1: &Smg,
    smg2: &Smg,
    obj1: &SmgObject,
    obj2: &SmgObject,
) -> Result<()> {
    let fields1 = smg1.get_values_for_object(obj1).len();
    let fields2 = smg2.get_values_for_object(obj2).len();
    if fields1 != fields2 {
        return Err(SmgError::Inconsistent(format!(
            "join fields: {} has {} fields, {} has {}",
            obj1, fields1, obj2, fields2
        )));
    }

    let null_bytes_in_smg1 = smg1.get_null_bytes_for_object(obj1);
    let null_bytes_in_smg2 = smg2.get_null_bytes_for_object(obj2);
    check_result_consistency_single_side(smg1, obj1, smg2, obj2, &null_bytes_in_smg2)?;
    check_result_consistency_single_side(smg2, obj2, smg1, obj1, &null_bytes_in_smg1)
}
