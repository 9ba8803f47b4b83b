//! Command line surface
//!
//! Argument parsing and logging setup for the `kubesurveyor` binary.

mod logging;

pub use logging::init_logging;

use crate::config::{Config, OutputFormat};
use crate::kube::ConnectOptions;
use clap::Parser;

/// Kubesurveyor: good enough Kubernetes namespace visualization tool
#[derive(Parser, Debug)]
#[command(name = "kubesurveyor")]
#[command(version = concat!("(version ", env!("CARGO_PKG_VERSION"), ")"))]
#[command(
    about = "Good enough Kubernetes namespace visualization tool",
    after_help = "\
Examples:
    # Show '<namespace>' as a 'dot' language graph, using the active kubeconfig context
    kubesurveyor <namespace>

    # Ignore Kubernetes API certificate errors
    kubesurveyor <namespace> --insecure

    # Use a specific context
    kubesurveyor <namespace> --context <context>

    # Dump the surveyed namespace as YAML for later processing
    kubesurveyor <namespace> --context <context> --save > namespace.yaml

    # Load from a YAML file and show as a 'dot' language graph
    cat namespace.yaml | kubesurveyor <namespace> --load

    # Load from a YAML file and render '<namespace>.png' in the current directory
    cat namespace.yaml | kubesurveyor <namespace> --load --out png"
)]
pub struct Args {
    /// The Kubernetes namespace (default 'default')
    pub namespace: Option<String>,

    /// Kubernetes config file context
    #[arg(long, short = 'c')]
    pub context: Option<String>,

    /// Visualisation format (default 'dot')
    #[arg(long, short = 'o', value_enum)]
    pub out: Option<OutputFormat>,

    /// Save surveyed namespace as YAML for later processing
    #[arg(long, short = 's')]
    pub save: bool,

    /// Load namespace from YAML on stdin for visualisation
    #[arg(long, short = 'l')]
    pub load: bool,

    /// Do not verify cluster SSL certificate
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Enable debug logging to stderr
    #[arg(long, short = 'd')]
    pub debug: bool,
}

impl Args {
    /// Namespace to survey, falling back to the configured default
    pub fn namespace(&self, config: &Config) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| config.default_namespace.clone())
    }

    /// Output format, falling back to the configured default
    pub fn output(&self, config: &Config) -> OutputFormat {
        self.out.unwrap_or(config.output)
    }

    /// Kubernetes connection options
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            context: self.context.clone(),
            insecure: self.insecure,
        }
    }
}
