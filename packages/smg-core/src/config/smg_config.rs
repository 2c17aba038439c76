//! Graph configuration threaded through construction
//!
//! Replaces a process-wide "perform checks" switch: every graph carries the
//! configuration it was built with, and copies inherit it.

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides};
use super::preset::Preset;
use super::runtime_check::RuntimeCheck;
use super::validation::Validatable;
use crate::features::smg::domain::MachineModel;
use serde::{Deserialize, Serialize};
use std::path::Path;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Configuration of one symbolic memory graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmgConfig {
    /// Preset the configuration was derived from
    pub preset: Preset,

    /// Reject duplicate insertions with an error instead of a logged no-op
    pub perform_checks: bool,

    /// Consistency check granularity for checkpoints. Automatic checkpoints
    /// after mutators run only when `perform_checks` is also set; explicit
    /// `perform_consistency_check` calls honor this level on their own.
    pub runtime_check: RuntimeCheck,

    /// Machine model handed to the sizing oracle
    pub machine_model: MachineModel,
}

impl Default for SmgConfig {
    fn default() -> Self {
        Self::preset(Preset::Production)
    }
}

impl SmgConfig {
    /// Complete configuration for a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            perform_checks: preset.perform_checks(),
            runtime_check: preset.runtime_check(),
            machine_model: MachineModel::default(),
        }
    }

    /// Builder: Set perform_checks
    pub fn perform_checks(mut self, v: bool) -> Self {
        self.perform_checks = v;
        self
    }

    /// Builder: Set runtime_check
    pub fn runtime_check(mut self, v: RuntimeCheck) -> Self {
        self.runtime_check = v;
        self
    }

    /// Builder: Set machine_model
    pub fn machine_model(mut self, v: MachineModel) -> Self {
        self.machine_model = v;
        self
    }

    /// Whether mutators verify the graph after they finish
    pub fn checkpoints_enabled(&self) -> bool {
        self.perform_checks && self.runtime_check.is_finer_or_equal_than(RuntimeCheck::Half)
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML configuration document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::preset(Preset::from_str(&export.preset)?);

        if let Some(overrides) = export.overrides {
            if let Some(v) = overrides.perform_checks {
                config.perform_checks = v;
            }
            if let Some(v) = overrides.runtime_check {
                config.runtime_check = v;
            }
            if let Some(v) = overrides.machine_model {
                config.machine_model = v;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as a YAML v1 document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                perform_checks: Some(self.perform_checks),
                runtime_check: Some(self.runtime_check),
                machine_model: Some(self.machine_model),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Validatable for SmgConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.runtime_check == RuntimeCheck::Forced {
            return Err(ConfigError::invalid_with_hint(
                format!("{}.runtime_check", self.config_name()),
                self.runtime_check,
                "Forced is a per-call level and cannot be configured",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "SmgConfig"
    }
}
