//! Live-update error type.

use thiserror::Error;

use ev_core::LinkId;
use ev_graph::GraphError;

/// Errors produced by the live-update channel.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// A batch named a link id the graph does not have.  The whole batch is
    /// rejected and no snapshot is published.
    #[error("update batch references unknown link {0}")]
    UnknownLink(LinkId),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type UpdateResult<T> = Result<T, UpdateError>;
