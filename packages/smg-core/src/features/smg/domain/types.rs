//! Declared types of has-value edges and the machine model
//!
//! The graph never interprets a type itself; it hands it to the sizing
//! oracle together with the machine model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Declared type of the bytes a has-value edge reads
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SmgType {
    /// Explicit byte width
    Bytes(u64),
    /// Named type resolved by the sizing oracle (`int`, `char *`, ...)
    Named(Arc<str>),
}

impl SmgType {
    pub fn bytes(size: u64) -> Self {
        Self::Bytes(size)
    }

    pub fn named(name: impl AsRef<str>) -> Self {
        Self::Named(Arc::from(name.as_ref()))
    }
}

impl fmt::Display for SmgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmgType::Bytes(size) => write!(f, "{}B", size),
            SmgType::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Target machine model (pointer width and C basic type sizes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineModel {
    /// ILP32
    Linux32,
    /// LP64
    Linux64,
}

impl MachineModel {
    pub fn pointer_size(&self) -> u64 {
        match self {
            MachineModel::Linux32 => 4,
            MachineModel::Linux64 => 8,
        }
    }

    pub fn long_size(&self) -> u64 {
        self.pointer_size()
    }

    pub fn long_double_size(&self) -> u64 {
        match self {
            MachineModel::Linux32 => 12,
            MachineModel::Linux64 => 16,
        }
    }
}

impl Default for MachineModel {
    fn default() -> Self {
        MachineModel::Linux64
    }
}

impl fmt::Display for MachineModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineModel::Linux32 => write!(f, "linux32"),
            MachineModel::Linux64 => write!(f, "linux64"),
        }
    }
}
