use thiserror::Error;

/// A path segment landed on something that is not an object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalkError {
    #[error("path '{path}' is not traversable at segment {segment} ('{name}' is not an object)")]
    NotTraversable {
        path: String,
        segment: usize,
        name: String,
    },
}

/// Failure reported by a document source. Kept apart from [`DecodeError`] so
/// callers can tell a broken connection from a broken document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Jira returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Structure(#[from] WalkError),
    #[error("malformed issue: '{field}' is missing or not a string")]
    MissingField { field: &'static str },
    #[error("malformed issue {key}: time tracking field '{field}' is missing or not a number")]
    MissingTimeTracking { key: String, field: &'static str },
    #[error("cyclic subtask reference: {key}")]
    CyclicSubtask { key: String },
    #[error("failed to fetch subtask {key}: {source}")]
    Fetch {
        key: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to decode subtask {key}: {source}")]
    Subtask {
        key: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// True when the failure came from the document source rather than from
    /// the shape of a document, at any depth of the subtask tree.
    pub fn is_fetch_failure(&self) -> bool {
        match self {
            DecodeError::Fetch { .. } => true,
            DecodeError::Subtask { source, .. } => source.is_fetch_failure(),
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("failed to set up Jira client: {0}")]
    Client(#[from] FetchError),
}
