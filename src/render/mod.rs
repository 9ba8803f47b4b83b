//! Graph output
//!
//! DOT text is always produced; image output hands that text to Graphviz.

pub mod dot;
pub mod png;

pub use dot::{quote, to_dot};
pub use png::{image_path, render_png};

use crate::config::{Config, OutputFormat};
use crate::error::SurveyResult;
use crate::topology::TopologyGraph;
use std::path::{Path, PathBuf};

/// What a render produced
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// DOT source, to be printed
    Dot(String),
    /// Path of the image written by the renderer
    Image(PathBuf),
}

/// Render `graph` in `format`
///
/// Images are named after `namespace` and written into `dir`.
pub fn render(
    graph: &TopologyGraph,
    format: OutputFormat,
    config: &Config,
    namespace: &str,
    dir: &Path,
) -> SurveyResult<Rendered> {
    let source = to_dot(graph, &config.graph);
    match format {
        OutputFormat::Dot => Ok(Rendered::Dot(source)),
        OutputFormat::Png => {
            let output = image_path(dir, namespace);
            render_png(&source, &config.render.dot_binary, &output).map(Rendered::Image)
        }
    }
}
