//! Configuration validation

use super::error::ConfigResult;

/// Configuration object that can reject its own field combinations
///
/// # Example
/// ```rust,ignore
/// use smg_core::config::{SmgConfig, Validatable};
///
/// let config = SmgConfig::default();
/// config.validate()?;
/// ```
pub trait Validatable {
    /// `Ok(())` if valid, the offending field otherwise
    fn validate(&self) -> ConfigResult<()>;

    /// Name used in error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}
