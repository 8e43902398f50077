//! Graph-subsystem error type.

use thiserror::Error;

use ev_core::LinkId;

/// Errors produced by `ev-graph`.
///
/// Builder errors are fatal to dataset construction: no partial graph is ever
/// handed to the search engine.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A segment's polyline had fewer than 2 coordinates.  Reported
    /// per-segment; there is no fallback that can produce a valid link.
    #[error("segment {segment_id}: geometry has fewer than 2 coordinates")]
    MalformedGeometry { segment_id: u64 },

    /// A segment row lacked a field with no documented fallback.
    #[error("segment {segment_id}: missing required field `{field}`")]
    MissingField {
        segment_id: u64,
        field: &'static str,
    },

    /// Largest-SCC extraction yielded an empty graph.
    #[error("graph is empty after strongly-connected-component extraction")]
    Disconnected,

    #[error("link {0} not found")]
    LinkNotFound(LinkId),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("graph codec error: {0}")]
    Codec(#[from] bincode::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
