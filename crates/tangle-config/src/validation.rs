//! Schema validation for [`TangleConfig`] (no filesystem checks).

use crate::config::TangleConfig;
use crate::error::{ConfigError, Result};

/// Validate a configuration.
///
/// # Example
///
/// ```
/// use tangle_config::{validate, TangleConfig};
///
/// let mut config = TangleConfig::default();
/// validate(&config).unwrap();
///
/// config.file_extensions = vec!["ts".to_string()];
/// assert!(validate(&config).is_err());
/// ```
pub fn validate(config: &TangleConfig) -> Result<()> {
    if config.file_extensions.is_empty() {
        return Err(ConfigError::SchemaValidation {
            message: "file_extensions cannot be empty".to_string(),
        });
    }

    for ext in &config.file_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::SchemaValidation {
                message: format!("file extension '{ext}' must start with '.', e.g. '.ts'"),
            });
        }
    }

    if config.circular_max_depth == Some(0) {
        return Err(ConfigError::SchemaValidation {
            message: "circular_max_depth must be at least 1 (omit it for no limit)".to_string(),
        });
    }

    if config.manifest_path.as_os_str().is_empty() {
        return Err(ConfigError::SchemaValidation {
            message: "manifest_path cannot be empty".to_string(),
        });
    }

    Ok(())
}
