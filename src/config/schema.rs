//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace surveyed when none is given on the command line
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Output produced when `--out` is not given
    #[serde(default)]
    pub output: OutputFormat,

    /// Graph presentation attributes
    #[serde(default)]
    pub graph: GraphStyle,

    /// External renderer configuration
    #[serde(default)]
    pub render: RenderConfig,
}

/// Output format of a survey
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Graphviz DOT text on stdout
    #[default]
    Dot,
    /// PNG image rendered by the `dot` binary
    Png,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Png => write!(f, "png"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" => Ok(OutputFormat::Dot),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Graph presentation attributes
///
/// Purely cosmetic; passed through to the DOT output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphStyle {
    /// Layout direction (LR, TB, ...)
    #[serde(default = "default_rankdir")]
    pub rankdir: String,

    #[serde(default = "default_ranksep")]
    pub ranksep: String,

    #[serde(default = "default_nodesep")]
    pub nodesep: String,

    #[serde(default = "default_fontname")]
    pub fontname: String,

    #[serde(default = "default_fontsize")]
    pub fontsize: u32,

    /// Merge parallel edges
    #[serde(default = "default_true")]
    pub concentrate: bool,

    /// Background colour
    #[serde(default = "default_background")]
    pub background: String,

    /// Colour for text, node borders and edges
    #[serde(default = "default_foreground")]
    pub foreground: String,
}

/// External renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Graphviz `dot` executable used for image output
    #[serde(default = "default_dot_binary")]
    pub dot_binary: String,
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_rankdir() -> String {
    "LR".to_string()
}

fn default_ranksep() -> String {
    "5.2 equally".to_string()
}

fn default_nodesep() -> String {
    "0.3".to_string()
}

fn default_fontname() -> String {
    "Sans-Serif".to_string()
}

fn default_fontsize() -> u32 {
    12
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_background() -> String {
    "black".to_string()
}

pub(crate) fn default_foreground() -> String {
    "white".to_string()
}

fn default_dot_binary() -> String {
    "dot".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            output: OutputFormat::default(),
            graph: GraphStyle::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            rankdir: default_rankdir(),
            ranksep: default_ranksep(),
            nodesep: default_nodesep(),
            fontname: default_fontname(),
            fontsize: default_fontsize(),
            concentrate: default_true(),
            background: default_background(),
            foreground: default_foreground(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_binary: default_dot_binary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.output, OutputFormat::Dot);
        assert_eq!(config.graph.rankdir, "LR");
        assert_eq!(config.render.dot_binary, "dot");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("defaultNamespace"));
        assert!(yaml.contains("dotBinary"));
        assert!(yaml.contains("output: dot"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
defaultNamespace: shop
output: png
graph:
  rankdir: TB
  background: white
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_namespace, "shop");
        assert_eq!(config.output, OutputFormat::Png);
        assert_eq!(config.graph.rankdir, "TB");
        assert_eq!(config.graph.background, "white");
        assert_eq!(config.graph.foreground, "white");
        assert_eq!(config.graph.fontsize, 12);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert!("svg".parse::<OutputFormat>().is_err());
    }
}
