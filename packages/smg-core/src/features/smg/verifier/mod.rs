//! Consistency verifier
//!
//! Free functions over a graph reference; the verifier never mutates the
//! graph. `verify_*` answer a boolean, `check_*` list every failed
//! invariant.

pub mod clang_verifier;
pub mod report;
pub mod smg_verifier;

pub use clang_verifier::{check_clang_smg, verify_clang_smg};
pub use report::{Invariant, VerificationReport, Violation};
pub use smg_verifier::{check_smg, verify_smg};
