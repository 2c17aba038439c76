//! C language layer: heap, global and stack partitions over the graph core

pub mod clang_smg;
pub mod stack_frame;

pub use clang_smg::ClangSmg;
pub use stack_frame::{ClangStackFrame, FunctionDeclaration, RETVAL_LABEL};
