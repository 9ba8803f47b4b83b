//! Error types for surveying, loading and rendering a namespace

/// Errors surfaced to the caller of the survey pipeline
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("Context {0} not found in the kube-config file.")]
    ContextNotFound(String),

    #[error("Failed to load Kubernetes configuration: {0}")]
    Config(String),

    #[error("Failed to list {kind} in namespace {namespace}: {source}")]
    Fetch {
        kind: &'static str,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("Invalid namespace snapshot: {0}")]
    Snapshot(#[from] serde_yaml::Error),

    #[error("Failed to render graph: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SurveyError {
    /// Whether the error is a user configuration problem rather than a failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ContextNotFound(_) | Self::Config(_))
    }
}

/// Result type for survey operations
pub type SurveyResult<T> = Result<T, SurveyError>;
