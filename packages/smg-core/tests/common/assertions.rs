//! Custom assertions for test verification
//!
//! This module provides graph-specific assertions.

use smg_core::features::smg::verifier::{check_clang_smg, check_smg};
use smg_core::features::smg::{ClangSmg, Smg, SmgObject};
use std::collections::BTreeSet;

/// Assert that the core graph passes every check
pub fn assert_smg_consistent(smg: &Smg) {
    let report = check_smg(smg);
    assert!(report.is_consistent(), "Expected consistent SMG, got: {report}\n{smg}");
}

/// Assert that the language layer passes every check
pub fn assert_clang_consistent(smg: &ClangSmg) {
    let report = check_clang_smg(smg);
    assert!(report.is_consistent(), "Expected consistent SMG, got: {report}\n{smg}");
}

/// Assert that heap, global and stack partitions are disjoint and cover the
/// core object set
pub fn assert_partitioned(smg: &ClangSmg) {
    let heap: BTreeSet<&SmgObject> = smg.heap_objects().iter().collect();
    let globals: BTreeSet<&SmgObject> = smg.global_objects().values().collect();
    let stack: BTreeSet<&SmgObject> = smg
        .stack_frames()
        .flat_map(|frame| frame.all_objects())
        .collect();

    assert!(heap.is_disjoint(&globals), "heap and global objects overlap");
    assert!(heap.is_disjoint(&stack), "heap and stack objects overlap");
    assert!(globals.is_disjoint(&stack), "global and stack objects overlap");

    let union: BTreeSet<&SmgObject> = heap.union(&globals).copied().collect();
    let union: BTreeSet<&SmgObject> = union.union(&stack).copied().collect();
    let all: BTreeSet<&SmgObject> = smg.get_objects().iter().collect();
    assert_eq!(union, all, "partitions do not cover the object set");
}
