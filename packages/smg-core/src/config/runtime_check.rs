//! Runtime consistency check granularity
//!
//! A graph is configured with one level; every checkpoint asks for a level.
//! The verifier runs at a checkpoint when the configured level is finer than
//! or equal to the requested one.

use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of consistency checks.
///
/// Ordering: `Forced < None < Half < Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeCheck {
    /// Checkpoint that always runs, whatever the configured level
    Forced,
    /// No checks (production)
    None,
    /// Checks after coarse operations (frame push/pop, variable creation)
    Half,
    /// Checks after every mutation
    Full,
}

impl RuntimeCheck {
    pub fn level(&self) -> i8 {
        match self {
            Self::Forced => -1,
            Self::None => 0,
            Self::Half => 1,
            Self::Full => 2,
        }
    }

    pub fn is_finer_or_equal_than(&self, other: RuntimeCheck) -> bool {
        self.level() >= other.level()
    }

    /// Parse a level name (case-insensitive)
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "forced" => Ok(Self::Forced),
            "none" => Ok(Self::None),
            "half" => Ok(Self::Half),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::UnknownRuntimeCheck(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forced => "forced",
            Self::None => "none",
            Self::Half => "half",
            Self::Full => "full",
        }
    }
}

impl Default for RuntimeCheck {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for RuntimeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
