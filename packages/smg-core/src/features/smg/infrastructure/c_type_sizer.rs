//! Sizing oracle for C basic types
//!
//! Sizes follow the ILP32 / LP64 data models used by 32- and 64-bit Linux.

use crate::features::smg::domain::{MachineModel, SmgType};
use crate::features::smg::ports::TypeSizeOracle;

/// Default sizing oracle: explicit widths, C basic types and pointer types
#[derive(Debug, Clone, Copy, Default)]
pub struct CBasicTypeSizer;

impl CBasicTypeSizer {
    pub fn new() -> Self {
        Self
    }

    fn basic_type_size(name: &str, model: MachineModel) -> Option<u64> {
        let normalized = name
            .split_whitespace()
            .filter(|w| !matches!(*w, "const" | "volatile" | "signed" | "unsigned"))
            .collect::<Vec<_>>()
            .join(" ");

        let size = match normalized.as_str() {
            "char" | "_Bool" | "bool" => 1,
            "short" | "short int" => 2,
            // bare "signed"/"unsigned" normalize to the empty string
            "" | "int" | "float" => 4,
            "long" | "long int" => model.long_size(),
            "long long" | "long long int" | "double" => 8,
            "long double" => model.long_double_size(),
            _ => return None,
        };
        Some(size)
    }
}

impl TypeSizeOracle for CBasicTypeSizer {
    fn size_of(&self, ty: &SmgType, model: MachineModel) -> Option<u64> {
        match ty {
            SmgType::Bytes(size) => Some(*size),
            SmgType::Named(name) => {
                let name = name.trim();
                if name.ends_with('*') {
                    Some(model.pointer_size())
                } else {
                    Self::basic_type_size(name, model)
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "c-basic-types"
    }
}
