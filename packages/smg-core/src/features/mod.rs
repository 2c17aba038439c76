//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure graph entities (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - infrastructure/ - Port implementations

// Symbolic Memory Graph: heap abstraction for shape and memory-safety analysis
pub mod smg;
