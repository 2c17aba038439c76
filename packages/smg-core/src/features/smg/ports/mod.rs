//! SMG Ports - Collaborator interfaces
//!
//! The graph core consumes exactly one external collaborator: the sizing
//! oracle that turns a declared type into a byte count. The type system and
//! machine model stay outside the core.

use super::domain::{MachineModel, SmgType};
use std::fmt::Debug;

/// Sizing collaborator
///
/// # Implementors
/// - `CBasicTypeSizer` (C basic types, pointer types, explicit widths)
/// - test doubles answering a constant size
pub trait TypeSizeOracle: Debug + Send + Sync {
    /// Byte size of `ty` on `model`, or `None` when the type cannot be sized
    fn size_of(&self, ty: &SmgType, model: MachineModel) -> Option<u64>;

    /// Oracle name for debugging and logging
    fn name(&self) -> &'static str;
}
