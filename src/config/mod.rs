//! Configuration system for kubesurveyor
//!
//! A single YAML file plus environment overrides. Everything in it is
//! optional; command line flags take precedence over both.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, GraphStyle, OutputFormat, RenderConfig};
