//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::error::{ConfigError, ConfigResult};
use super::runtime_check::RuntimeCheck;
use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Production analysis runs
    ///
    /// - Duplicate-insertion checks: off
    /// - Runtime consistency checks: none
    Production,

    /// Development of transfer relations
    ///
    /// - Duplicate-insertion checks: on
    /// - Runtime consistency checks: half (frame push/pop, variables)
    Debug,

    /// Test suites hunting for graph corruption
    ///
    /// - Duplicate-insertion checks: on
    /// - Runtime consistency checks: full (after every mutation)
    Paranoid,
}

impl Preset {
    /// Whether structural duplicate checks are enabled
    pub fn perform_checks(&self) -> bool {
        !matches!(self, Self::Production)
    }

    /// Runtime check level for this preset
    pub fn runtime_check(&self) -> RuntimeCheck {
        match self {
            Self::Production => RuntimeCheck::None,
            Self::Debug => RuntimeCheck::Half,
            Self::Paranoid => RuntimeCheck::Full,
        }
    }

    /// Parse preset from string
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "debug" => Ok(Self::Debug),
            "paranoid" => Ok(Self::Paranoid),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Debug => "debug",
            Self::Paranoid => "paranoid",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Production
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
