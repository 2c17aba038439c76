//! Configuration I/O (YAML loading)
//!
//! Defines YAML schema types. Loading and export live in smg_config.rs.

use super::runtime_check::RuntimeCheck;
use crate::features::smg::domain::MachineModel;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset_name")]
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

fn default_preset_name() -> String {
    "production".to_string()
}

/// Configuration overrides applied on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perform_checks: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_check: Option<RuntimeCheck>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_model: Option<MachineModel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;
    use crate::config::{Preset, SmgConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = SmgConfig::preset(Preset::Debug).machine_model(MachineModel::Linux32);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: debug"));
        assert!(yaml.contains("machine_model: linux32"));
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
preset: production
overrides:
  perform_checks: true
  runtime_check: full
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = SmgConfig::from_yaml(file.path()).unwrap();
        assert!(config.perform_checks);
        assert_eq!(config.runtime_check, RuntimeCheck::Full);
        assert_eq!(config.machine_model, MachineModel::Linux64);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = SmgConfig::from_yaml_str("preset: debug\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = SmgConfig::from_yaml_str("version: 2\npreset: debug\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field() {
        let result = SmgConfig::from_yaml_str("version: 1\nturbo: true\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_forced_level_rejected() {
        let yaml = "version: 1\noverrides:\n  runtime_check: forced\n";
        let result = SmgConfig::from_yaml_str(yaml);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
