//! Graph Configuration
//!
//! Two-tier configuration:
//! - Level 1: Preset (production / debug / paranoid)
//! - Level 2: Field overrides via builder or YAML
//!
//! # Examples
//!
//! ```rust,ignore
//! use smg_core::config::{Preset, RuntimeCheck, SmgConfig};
//!
//! // Level 1: preset
//! let config = SmgConfig::preset(Preset::Debug);
//!
//! // Level 2: override a field
//! let config = SmgConfig::preset(Preset::Production).runtime_check(RuntimeCheck::Half);
//!
//! // YAML document
//! let config = SmgConfig::from_yaml("smg.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod runtime_check;
pub mod smg_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use runtime_check::RuntimeCheck;
pub use smg_config::SmgConfig;
pub use validation::Validatable;
