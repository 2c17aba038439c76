/*
 * SMG Core - Symbolic Memory Graph for C heap analysis
 *
 * Feature-First Hexagonal Architecture:
 * - features/smg : Graph core, C language layer, consistency verifier,
 *                  field-level join
 * - config/      : Presets, runtime check granularity, YAML io
 * - errors       : Structural-violation errors
 *
 * Ownership:
 * - One graph per abstract program state, never shared across threads
 * - Copy-on-branch: cloning a graph clones handle containers only
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::derivable_impls)] // Manual impl for documentation
#![allow(clippy::type_complexity)] // Index maps keyed by tuples

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration (presets, check granularity, YAML io)
pub mod config;

/// Error types
pub mod errors;

/// Feature modules
pub mod features;

pub use config::{Preset, RuntimeCheck, SmgConfig};
pub use errors::{Result, SmgError};
pub use features::smg::{
    ClangSmg, ClangStackFrame, FunctionDeclaration, JoinFields, JoinStatus, MachineModel, Smg,
    SmgEdgeHasValue, SmgEdgePointsTo, SmgObject, SmgType, SmgValue,
};
