//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{
    paths,
    schema::{Config, default_background, default_foreground},
};
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding the default namespace
pub const ENV_NAMESPACE: &str = "KUBESURVEYOR_NAMESPACE";
/// Environment variable overriding the default output format
pub const ENV_OUTPUT: &str = "KUBESURVEYOR_OUTPUT";
/// Environment variable overriding the `dot` executable
pub const ENV_DOT: &str = "KUBESURVEYOR_DOT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    ///
    /// Command line flags are applied on top by the caller.
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path(), |key| std::env::var(key).ok())
    }

    /// Load configuration from `path` with overrides looked up through `env`
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load_from<F>(path: &Path, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };

        let config = Self::apply_env_overrides(config, env);
        Ok(Self::sanitize(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(mut config: Config, env: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = env(ENV_NAMESPACE).filter(|ns| !ns.is_empty()) {
            config.default_namespace = namespace;
        }

        if let Some(output) = env(ENV_OUTPUT) {
            match output.parse() {
                Ok(format) => config.output = format,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_OUTPUT, e),
            }
        }

        if let Some(dot) = env(ENV_DOT).filter(|dot| !dot.is_empty()) {
            config.render.dot_binary = dot;
        }

        config
    }

    /// Replace colours that are not valid CSS colours with the defaults
    fn sanitize(mut config: Config) -> Config {
        if csscolorparser::parse(&config.graph.background).is_err() {
            tracing::warn!(
                "Invalid background colour '{}', using default",
                config.graph.background
            );
            config.graph.background = default_background();
        }
        if csscolorparser::parse(&config.graph.foreground).is_err() {
            tracing::warn!(
                "Invalid foreground colour '{}', using default",
                config.graph.foreground
            );
            config.graph.foreground = default_foreground();
        }
        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(&dir.path().join("config.yaml"), no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.default_namespace = "shop".to_string();
        config.graph.rankdir = "TB".to_string();
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_from(&path, no_env).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "graph: [not, a, mapping").unwrap();
        assert!(ConfigLoader::load_from(&path, no_env).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_NAMESPACE, "payments"),
            (ENV_OUTPUT, "png"),
            (ENV_DOT, "/opt/graphviz/bin/dot"),
        ]);

        let config = ConfigLoader::load_from(&dir.path().join("config.yaml"), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.default_namespace, "payments");
        assert_eq!(config.output, OutputFormat::Png);
        assert_eq!(config.render.dot_binary, "/opt/graphviz/bin/dot");
    }

    #[test]
    fn test_invalid_env_output_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(&dir.path().join("config.yaml"), |key| {
            (key == ENV_OUTPUT).then(|| "svg".to_string())
        })
        .unwrap();
        assert_eq!(config.output, OutputFormat::Dot);
    }

    #[test]
    fn test_invalid_colours_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "graph:\n  background: not-a-colour\n  foreground: '#ffcc00'\n")
            .unwrap();

        let config = ConfigLoader::load_from(&path, no_env).unwrap();
        assert_eq!(config.graph.background, "black");
        assert_eq!(config.graph.foreground, "#ffcc00");
    }
}
