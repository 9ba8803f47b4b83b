//! Kubesurveyor - good enough Kubernetes namespace visualization
//!
//! Surveys one namespace (or loads a saved survey), correlates ingresses,
//! services and pods, and prints the traffic flow as a Graphviz graph.

use anyhow::{Context, Result};
use clap::Parser;
use kubesurveyor::cli::{Args, init_logging};
use kubesurveyor::collector::survey;
use kubesurveyor::config::ConfigLoader;
use kubesurveyor::kube::ClusterSource;
use kubesurveyor::models::NamespaceSnapshot;
use kubesurveyor::render::{Rendered, render};
use kubesurveyor::topology::build_topology;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if init_logging(args.debug) {
        tracing::debug!("Debug logging enabled");
    }

    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let namespace = args.namespace(&config);

    // Decide if we are loading from an actual cluster or an existing YAML file
    let snapshot = if args.load {
        let mut snapshot = NamespaceSnapshot::from_reader(std::io::stdin().lock())
            .context("Failed to read namespace snapshot from stdin")?;
        if snapshot.namespace.is_empty() {
            snapshot.namespace = namespace.clone();
        }
        snapshot
    } else {
        let source = match ClusterSource::connect(&args.connect_options()).await {
            Ok(source) => source,
            Err(e) if e.is_configuration() => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        };
        survey(&source, &namespace)
            .await
            .with_context(|| format!("Failed to survey namespace {}", namespace))?
    };

    // Show the surveyed YAML instead of a visualization
    if args.save {
        print!("{}", snapshot.to_yaml()?);
        return Ok(());
    }

    let graph = build_topology(&snapshot);
    match render(
        &graph,
        args.output(&config),
        &config,
        &namespace,
        Path::new("."),
    )? {
        Rendered::Dot(source) => print!("{}", source),
        Rendered::Image(path) => eprintln!("Rendered {}", path.display()),
    }

    Ok(())
}
