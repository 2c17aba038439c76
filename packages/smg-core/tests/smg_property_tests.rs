//! Property-based tests for the symbolic memory graph
//!
//! Random sequences of well-formed C heap operations:
//! - Consistency: every step leaves the graph consistent
//! - Independence: mutating a copy never changes the original
//! - Pruning: idempotent, and never drops a reachable object

mod common;

use common::*;
use proptest::prelude::*;
use smg_core::features::smg::verifier::verify_clang_smg;
use smg_core::features::smg::{
    ClangSmg, FunctionDeclaration, HasValueFilter, MachineModel, SmgEdgeHasValue,
    SmgEdgePointsTo, SmgObject, SmgType, SmgValue,
};

#[derive(Debug, Clone)]
enum Op {
    Malloc(u64),
    Global,
    PushFrame(bool),
    Local(u64),
    PopFrame,
    Point(usize, usize),
    Store(usize),
    Free(usize),
    Prune,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (16u64..=64).prop_map(Op::Malloc),
        Just(Op::Global),
        any::<bool>().prop_map(Op::PushFrame),
        (16u64..=64).prop_map(Op::Local),
        Just(Op::PopFrame),
        (any::<usize>(), any::<usize>()).prop_map(|(s, t)| Op::Point(s, t)),
        any::<usize>().prop_map(Op::Store),
        any::<usize>().prop_map(Op::Free),
        Just(Op::Prune),
    ]
}

/// Non-null objects in allocation order
fn live_objects(smg: &ClangSmg) -> Vec<SmgObject> {
    let mut objects: Vec<SmgObject> = smg
        .get_objects()
        .iter()
        .filter(|o| o.not_null())
        .cloned()
        .collect();
    objects.sort();
    objects
}

fn pick(smg: &ClangSmg, index: usize) -> Option<SmgObject> {
    let objects = live_objects(smg);
    (!objects.is_empty()).then(|| objects[index % objects.len()].clone())
}

fn is_writable(smg: &ClangSmg, object: &SmgObject) -> bool {
    object.size_in_bytes() >= 16 && smg.is_object_valid(object).unwrap_or(false)
}

/// Overwrite the field at `offset`, dropping whatever it held
fn write(smg: &mut ClangSmg, object: &SmgObject, offset: u64, ty: SmgType, value: SmgValue) {
    let filter = HasValueFilter::new()
        .filter_by_object(object)
        .filter_at_offset(offset);
    for old in smg.get_hv_edges_filtered(&filter) {
        smg.remove_has_value_edge(&old);
    }
    smg.add_has_value_edge(SmgEdgeHasValue::new(object.clone(), offset, ty, value));
}

fn apply(smg: &mut ClangSmg, op: &Op, counter: &mut usize) {
    *counter += 1;
    match op {
        Op::Malloc(size) => {
            smg.add_heap_object(SmgObject::new(*size, format!("heap_{counter}")))
                .unwrap();
        }
        Op::Global => {
            smg.add_global_object(SmgObject::new(16, format!("global_{counter}")))
                .unwrap();
        }
        Op::PushFrame(returns_int) => {
            let function = if *returns_int {
                int_function(&format!("f_{counter}"))
            } else {
                FunctionDeclaration::void(format!("f_{counter}"))
            };
            smg.add_stack_frame(function).unwrap();
        }
        Op::Local(size) => {
            if smg.stack_depth() > 0 {
                smg.add_stack_object(SmgObject::new(*size, format!("local_{counter}")))
                    .unwrap();
            }
        }
        Op::PopFrame => {
            if smg.stack_depth() > 0 {
                smg.drop_stack_frame().unwrap();
            }
        }
        Op::Point(source, target) => {
            let (Some(source), Some(target)) = (pick(smg, *source), pick(smg, *target)) else {
                return;
            };
            if !is_writable(smg, &source) {
                return;
            }
            let address = SmgValue::fresh();
            smg.add_value(address).unwrap();
            smg.add_points_to_edge(SmgEdgePointsTo::new(address, target, 0));
            write(smg, &source, 0, ptr_type(), address);
        }
        Op::Store(object) => {
            let Some(object) = pick(smg, *object) else {
                return;
            };
            if !is_writable(smg, &object) {
                return;
            }
            let value = SmgValue::fresh();
            smg.add_value(value).unwrap();
            write(smg, &object, 8, int_type(), value);
        }
        Op::Free(object) => {
            let Some(object) = pick(smg, *object) else {
                return;
            };
            if !smg.is_heap_object(&object) {
                return;
            }
            for hv in smg.get_values_for_object(&object) {
                smg.remove_has_value_edge(&hv);
            }
            smg.set_validity(&object, false).unwrap();
        }
        Op::Prune => {
            smg.prune_unreachable();
        }
    }
}

fn run(ops: &[Op]) -> ClangSmg {
    let mut smg = ClangSmg::new(MachineModel::Linux64);
    let mut counter = 0;
    for op in ops {
        apply(&mut smg, op, &mut counter);
    }
    smg
}

proptest! {
    #[test]
    fn prop_well_formed_operations_stay_consistent(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut smg = ClangSmg::new(MachineModel::Linux64);
        let mut counter = 0;
        for op in &ops {
            apply(&mut smg, op, &mut counter);
            prop_assert!(verify_clang_smg(&smg), "inconsistent after {:?}\n{}", op, smg);
        }
    }

    #[test]
    fn prop_copy_is_independent(
        prefix in prop::collection::vec(op_strategy(), 0..20),
        suffix in prop::collection::vec(op_strategy(), 1..20),
    ) {
        let original = run(&prefix);
        let snapshot = original.stats();
        let snapshot_objects = live_objects(&original);

        let mut copy = original.clone();
        let mut counter = 1000;
        for op in &suffix {
            apply(&mut copy, op, &mut counter);
        }
        copy.add_heap_object(SmgObject::new(16, "copy-only")).unwrap();

        prop_assert_eq!(original.stats(), snapshot);
        prop_assert_eq!(live_objects(&original), snapshot_objects);
        prop_assert!(verify_clang_smg(&original));
    }

    #[test]
    fn prop_pruning_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut smg = run(&ops);
        let had_leaks = smg.has_memory_leaks();

        let leaked = smg.prune_unreachable();
        prop_assert_eq!(smg.has_memory_leaks(), had_leaks || !leaked.is_empty());
        prop_assert!(verify_clang_smg(&smg));

        let stats = smg.stats();
        prop_assert!(smg.prune_unreachable().is_empty());
        prop_assert_eq!(smg.stats(), stats);
    }

    #[test]
    fn prop_pruning_keeps_roots(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut smg = run(&ops);
        let roots: Vec<SmgObject> = smg
            .stack_frames()
            .flat_map(|frame| frame.all_objects())
            .chain(smg.global_objects().values())
            .cloned()
            .collect();

        smg.prune_unreachable();
        for root in &roots {
            prop_assert!(smg.get_objects().contains(root));
        }
        assert_partitioned(&smg);
    }
}
