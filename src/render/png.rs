//! Image output through Graphviz
//!
//! Rasterising is left to the `dot` executable: the DOT text is piped to its
//! stdin and the image is written next to the working directory.

use crate::error::{SurveyError, SurveyResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Path of the image rendered for `namespace` inside `dir`
pub fn image_path(dir: &Path, namespace: &str) -> PathBuf {
    dir.join(format!("{}.png", namespace))
}

/// Render `dot` source to a PNG at `output` using `dot_binary`
pub fn render_png(dot: &str, dot_binary: &str, output: &Path) -> SurveyResult<PathBuf> {
    tracing::debug!("Rendering {} with {}", output.display(), dot_binary);

    let mut child = Command::new(dot_binary)
        .arg("-Tpng")
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            SurveyError::Render(format!(
                "failed to run '{}' (is Graphviz installed?): {}",
                dot_binary, e
            ))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // A renderer that exits early closes the pipe; its exit status tells why
        if let Err(e) = stdin.write_all(dot.as_bytes()) {
            tracing::debug!("Writing to {} failed: {}", dot_binary, e);
        }
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(SurveyError::Render(format!(
            "'{}' exited with {}: {}",
            dot_binary,
            result.status,
            stderr.trim()
        )));
    }

    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path() {
        assert_eq!(
            image_path(Path::new("/tmp/out"), "shop"),
            PathBuf::from("/tmp/out/shop.png")
        );
    }

    #[test]
    fn test_missing_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_png(
            "digraph {}",
            "kubesurveyor-no-such-dot-binary",
            &image_path(dir.path(), "shop"),
        );
        assert!(matches!(result, Err(SurveyError::Render(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_png("digraph {}", "false", &image_path(dir.path(), "shop"));
        assert!(matches!(result, Err(SurveyError::Render(_))));
    }
}
