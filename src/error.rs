use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeKind;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read records from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request for records failed")]
    Http(#[from] reqwest::Error),

    #[error("record source {url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("record payload is not valid JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderInitError {
    #[error("node id {0} appears more than once")]
    DuplicateNode(String),

    #[error("edge {edge} references missing node {endpoint}")]
    DanglingEdge { edge: String, endpoint: String },

    #[error("layout parameter {0} must be finite and positive")]
    InvalidLayout(&'static str),

    #[error("zoom bounds are inverted: min {min} >= max {max}")]
    InvalidZoomBounds { min: f32, max: f32 },

    #[error("no style rule for {0:?} nodes")]
    MissingStyle(NodeKind),
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summary request failed")]
    Http(#[from] reqwest::Error),

    #[error("summary endpoint answered with HTTP {0}")]
    Status(u16),

    #[error("summary response carried no summary text")]
    MissingSummary,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid year range {0:?}; expected \"<start>-<end>\" or \"before-<year>\"")]
    InvalidYearRange(String),
}
