//! Consistency checks of the C language layer
//!
//! The core checks run first; the partition checks follow.

use super::report::{Invariant, VerificationReport};
use super::smg_verifier::check_smg;
use crate::features::smg::clang::ClangSmg;
use crate::features::smg::domain::SmgObject;
use rustc_hash::FxHashSet;

pub fn verify_clang_smg(smg: &ClangSmg) -> bool {
    check_clang_smg(smg).is_consistent()
}

/// Run every core and partition check
pub fn check_clang_smg(smg: &ClangSmg) -> VerificationReport {
    let mut report = check_smg(smg);

    let stack = stack_objects(smg);
    let globals: FxHashSet<&SmgObject> = smg.global_objects().values().collect();
    let heap: FxHashSet<&SmgObject> = smg.heap_objects().iter().collect();

    report.record(
        Invariant::PartitionDisjointness,
        check_disjointness(&heap, &globals, &stack),
    );
    report.record(
        Invariant::PartitionCompleteness,
        check_completeness(smg, &heap, &globals, &stack),
    );
    report.record(
        Invariant::NullObjectPlacement,
        check_null_placement(smg, &globals, &stack),
    );
    report.record(Invariant::GlobalNamespace, check_global_namespace(smg));
    report.record(Invariant::StackNamespace, check_stack_namespace(smg));
    report
}

fn stack_objects(smg: &ClangSmg) -> FxHashSet<&SmgObject> {
    smg.stack_frames()
        .flat_map(|frame| frame.all_objects())
        .collect()
}

fn check_disjointness(
    heap: &FxHashSet<&SmgObject>,
    globals: &FxHashSet<&SmgObject>,
    stack: &FxHashSet<&SmgObject>,
) -> Vec<String> {
    let pairs = [
        ("heap", heap, "global", globals),
        ("heap", heap, "stack", stack),
        ("global", globals, "stack", stack),
    ];

    let mut failures = Vec::new();
    for (left_name, left, right_name, right) in pairs {
        for object in left.intersection(right) {
            failures.push(format!(
                "object [{}] is both a {} and a {} object",
                object, left_name, right_name
            ));
        }
    }
    failures
}

/// Partitions cover the core object set exactly
fn check_completeness(
    smg: &ClangSmg,
    heap: &FxHashSet<&SmgObject>,
    globals: &FxHashSet<&SmgObject>,
    stack: &FxHashSet<&SmgObject>,
) -> Vec<String> {
    let partitioned: FxHashSet<&SmgObject> = heap
        .iter()
        .chain(globals.iter())
        .chain(stack.iter())
        .copied()
        .collect();

    let mut failures = Vec::new();
    for object in smg.get_objects() {
        if !partitioned.contains(object) {
            failures.push(format!("object [{}] is in no partition", object));
        }
    }
    for object in partitioned {
        if !smg.get_objects().contains(object) {
            failures.push(format!("partitioned object [{}] is not in the SMG", object));
        }
    }
    failures
}

fn check_null_placement(
    smg: &ClangSmg,
    globals: &FxHashSet<&SmgObject>,
    stack: &FxHashSet<&SmgObject>,
) -> Vec<String> {
    let mut failures = Vec::new();

    let nulls = smg.get_objects().iter().filter(|o| o.is_null()).count();
    if nulls != 1 {
        failures.push(format!("{} null objects", nulls));
    }
    if globals.iter().any(|o| o.is_null()) {
        failures.push("null object is a global object".to_string());
    }
    if stack.iter().any(|o| o.is_null()) {
        failures.push("null object is a stack object".to_string());
    }
    failures
}

/// Global names match their objects' labels
fn check_global_namespace(smg: &ClangSmg) -> Vec<String> {
    smg.global_objects()
        .iter()
        .filter(|(name, object)| name.as_str() != object.label())
        .map(|(name, object)| format!("global '{}' is bound to [{}]", name, object))
        .collect()
}

/// Stack names match labels and no object lives in two frames
fn check_stack_namespace(smg: &ClangSmg) -> Vec<String> {
    let mut failures = Vec::new();
    let mut seen: FxHashSet<&SmgObject> = FxHashSet::default();

    for frame in smg.stack_frames() {
        for (name, object) in frame.variables() {
            if name.as_str() != object.label() {
                failures.push(format!(
                    "variable '{}' of '{}' is bound to [{}]",
                    name,
                    frame.function().name,
                    object
                ));
            }
        }
        for object in frame.all_objects() {
            if !seen.insert(object) {
                failures.push(format!("object [{}] is in more than one frame", object));
            }
        }
    }
    failures
}
