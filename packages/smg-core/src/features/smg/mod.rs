//! Symbolic Memory Graph (Hexagonal Architecture)
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  clang/     ClangSmg: heap / global / stack partitions,   │
//! │             stack frames, reachability pruning, leaks     │
//! ├──────────────────────────────────────────────────────────┤
//! │  graph      Smg: objects, values, has-value and          │
//! │             points-to edges, validity                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  verifier/  stateless consistency checks over both layers │
//! │  join/      field-level join of two graphs, join status   │
//! ├──────────────────────────────────────────────────────────┤
//! │  domain/    SmgObject, SmgValue, SmgType, edges, filter   │
//! │  ports/     TypeSizeOracle                                │
//! │  infrastructure/  CBasicTypeSizer                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use smg_core::features::smg::{ClangSmg, FunctionDeclaration, MachineModel, SmgObject};
//! use smg_core::features::smg::verifier::verify_clang_smg;
//!
//! let mut smg = ClangSmg::new(MachineModel::Linux64);
//! smg.add_stack_frame(FunctionDeclaration::void("main")).unwrap();
//! smg.add_heap_object(SmgObject::new(16, "malloc_1")).unwrap();
//!
//! let leaked = smg.prune_unreachable();
//! assert_eq!(leaked.len(), 1);
//! assert!(smg.has_memory_leaks());
//! assert!(verify_clang_smg(&smg));
//! ```

pub mod clang;
pub mod domain;
pub mod graph;
pub mod infrastructure;
pub mod join;
pub mod ports;
pub mod verifier;

pub use clang::{ClangSmg, ClangStackFrame, FunctionDeclaration};
pub use domain::{
    HasValueFilter, MachineModel, SmgEdgeHasValue, SmgEdgePointsTo, SmgObject, SmgType, SmgValue,
};
pub use graph::{Smg, SmgStats};
pub use infrastructure::CBasicTypeSizer;
pub use join::{JoinFields, JoinStatus};
pub use ports::TypeSizeOracle;
pub use verifier::{check_clang_smg, check_smg, verify_clang_smg, verify_smg, VerificationReport};
