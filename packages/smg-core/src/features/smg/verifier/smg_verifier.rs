//! Consistency checks of the graph core
//!
//! Stateless: every check reads the graph and returns failure messages.

use super::report::{Invariant, VerificationReport};
use crate::features::smg::domain::{HasValueFilter, SmgObject, SmgType, SmgValue};
use crate::features::smg::graph::Smg;
use rustc_hash::{FxHashMap, FxHashSet};

pub fn verify_smg(smg: &Smg) -> bool {
    check_smg(smg).is_consistent()
}

/// Run every core check
pub fn check_smg(smg: &Smg) -> VerificationReport {
    let mut report = VerificationReport::new();
    report.record(Invariant::NullObject, check_null_object(smg));
    report.record(
        Invariant::InvalidRegionHasNoValues,
        check_invalid_regions_have_no_values(smg),
    );
    report.record(Invariant::HasValueEndpoints, check_hv_endpoints(smg));
    report.record(Invariant::PointsToEndpoints, check_pt_endpoints(smg));
    report.record(Invariant::FieldConsistency, check_field_consistency(smg));
    report.record(Invariant::HasValueConsistency, check_hv_consistency(smg));
    report.record(Invariant::PointsToConsistency, check_pt_consistency(smg));
    report
}

fn check_null_object(smg: &Smg) -> Vec<String> {
    let mut failures = Vec::new();

    let nulls: Vec<&SmgObject> = smg.get_objects().iter().filter(|o| o.is_null()).collect();
    match nulls.as_slice() {
        [] => failures.push("null object missing".to_string()),
        [null] => {
            if smg.is_object_valid(null).unwrap_or(true) {
                failures.push("null object is valid".to_string());
            }
            if null.size_in_bytes() != 0 {
                failures.push(format!(
                    "null object has size {}",
                    null.size_in_bytes()
                ));
            }
        }
        many => failures.push(format!("{} null objects", many.len())),
    }

    if !smg.get_values().contains(&SmgValue::NULL) {
        failures.push("null value missing".to_string());
    }
    failures
}

fn check_invalid_regions_have_no_values(smg: &Smg) -> Vec<String> {
    smg.get_objects()
        .iter()
        .filter(|o| !smg.is_object_valid(o).unwrap_or(false))
        .filter_map(|o| {
            let edges = smg.get_values_for_object(o);
            (!edges.is_empty())
                .then(|| format!("invalid object [{}] has {} values", o, edges.len()))
        })
        .collect()
}

fn check_hv_endpoints(smg: &Smg) -> Vec<String> {
    let mut failures = Vec::new();
    for hv in smg.get_hv_edges() {
        if !smg.get_objects().contains(hv.object()) {
            failures.push(format!("edge [{}] anchored at an unknown object", hv));
        }
        if !smg.get_values().contains(&hv.value()) {
            failures.push(format!("edge [{}] holds an unknown value", hv));
        }
    }
    failures
}

fn check_pt_endpoints(smg: &Smg) -> Vec<String> {
    let mut failures = Vec::new();
    for pt in smg.get_pt_edges() {
        if !smg.get_values().contains(&pt.value()) {
            failures.push(format!("edge [{}] starts at an unknown value", pt));
        }
        if !smg.get_objects().contains(pt.object()) {
            failures.push(format!("edge [{}] targets an unknown object", pt));
        }
    }
    failures
}

/// Each has-value edge reads inside its object
fn check_field_consistency(smg: &Smg) -> Vec<String> {
    let mut failures = Vec::new();
    for object in smg.get_objects() {
        let filter = HasValueFilter::new().filter_by_object(object);
        for hv in filter.filter(smg.get_hv_edges()) {
            match smg.size_of(hv.ty()) {
                None => failures.push(format!("edge [{}] has an unsizable type", hv)),
                Some(size) => {
                    let fits = hv
                        .offset()
                        .checked_add(size)
                        .is_some_and(|end| end <= object.size_in_bytes());
                    if !fits {
                        failures.push(format!(
                            "edge [{}] reads {} bytes at offset {} of a {}-byte object",
                            hv,
                            size,
                            hv.offset(),
                            object.size_in_bytes()
                        ));
                    }
                }
            }
        }
    }
    failures
}

/// No two has-value edges disagree on the same field
fn check_hv_consistency(smg: &Smg) -> Vec<String> {
    let mut fields: FxHashMap<(&SmgObject, u64, &SmgType), FxHashSet<SmgValue>> =
        FxHashMap::default();
    for hv in smg.get_hv_edges() {
        fields
            .entry((hv.object(), hv.offset(), hv.ty()))
            .or_default()
            .insert(hv.value());
    }

    fields
        .into_iter()
        .filter(|(_, values)| values.len() > 1)
        .map(|((object, offset, ty), values)| {
            format!(
                "field [{}+{}b[{}]] holds {} different values",
                object,
                offset,
                ty,
                values.len()
            )
        })
        .collect()
}

/// No value points to two different targets
fn check_pt_consistency(smg: &Smg) -> Vec<String> {
    let mut targets: FxHashMap<SmgValue, FxHashSet<(&SmgObject, u64)>> = FxHashMap::default();
    for pt in smg.get_pt_edges() {
        targets
            .entry(pt.value())
            .or_default()
            .insert((pt.object(), pt.offset()));
    }

    targets
        .into_iter()
        .filter(|(_, targets)| targets.len() > 1)
        .map(|(value, targets)| format!("value {} points to {} targets", value, targets.len()))
        .collect()
}
