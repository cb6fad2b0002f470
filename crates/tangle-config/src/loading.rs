//! Layered configuration loading with figment.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};

use crate::config::TangleConfig;
use crate::discovery::{ConfigDiscovery, ConfigSource};
use crate::error::{ConfigError, Result};
use crate::validation::validate;

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "TANGLE_";

impl TangleConfig {
    /// Load configuration for the project at `root`.
    ///
    /// Priority: environment variables > config file > defaults. Nested keys
    /// are separated by a double underscore, e.g.
    /// `TANGLE_DEPENDENCY_TRACKING__THIRD_PARTY=true`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let source = ConfigDiscovery::new(root.as_ref()).find();
        Self::load_from(source)
    }

    /// Load configuration from an explicit file, still honoring the environment.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::load_from(Some(ConfigSource::from_path(path)?))
    }

    fn load_from(source: Option<ConfigSource>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        match &source {
            Some(ConfigSource::Toml(path)) => {
                tracing::debug!(path = %path.display(), "loading tangle.toml");
                figment = figment.merge(Toml::file(path));
            }
            Some(json @ (ConfigSource::Json(_) | ConfigSource::PackageJson(_))) => {
                tracing::debug!(path = %json.path().display(), "loading JSON configuration");
                let value = ConfigDiscovery::read_json(json)?;
                figment = figment.merge(Serialized::defaults(value));
            }
            None => tracing::debug!("no configuration file found, using defaults"),
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })?;

        validate(&config)?;
        Ok(config)
    }
}
