//! Search-subsystem error type.
//!
//! Search errors are returned per-query: they never panic, never corrupt the
//! shared graph store, and one failed query has no effect on concurrent ones.

use thiserror::Error;

use ev_core::{Coordinate, VertexId};

/// Errors produced by `ev-search`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The open set was exhausted without reaching the destination.  Should
    /// not occur for two snapped vertices of an SCC-compacted graph, but is
    /// handled rather than assumed away.
    #[error("no route found from {from} to {to}")]
    NoRouteFound { from: VertexId, to: VertexId },

    /// The coordinate snapped to no vertex within the configured threshold —
    /// routing from an arbitrarily distant vertex would silently lie.
    #[error("coordinate {coord} is more than {max_m} m from any graph vertex")]
    OutsideCoverage { coord: Coordinate, max_m: f64 },

    /// Requested powertrain key has no energy table on this graph store.
    /// Reported before the search begins, never mid-traversal.
    #[error("unknown powertrain key {0:?} for this graph")]
    UnknownPowertrain(String),

    /// Every requested weight is zero: the optimization target is ambiguous.
    #[error("all requested weights are zero; cannot choose an optimization target")]
    AmbiguousWeights,

    #[error("weight for `{variable}` is negative ({value})")]
    NegativeWeight { variable: &'static str, value: f64 },

    /// A route exists when restrictions are ignored, but none satisfies the
    /// vehicle's parameters.  Distinguished from [`NoRouteFound`] so callers
    /// can suggest relaxing constraints.
    ///
    /// [`NoRouteFound`]: SearchError::NoRouteFound
    #[error("routes from {from} to {to} exist but none satisfies the vehicle restrictions")]
    RestrictionViolationNoPath { from: VertexId, to: VertexId },

    /// The search exceeded its wall-clock or settled-vertex budget.
    #[error("search exceeded its resource budget after settling {settled} vertices")]
    Timeout { settled: usize },
}

pub type SearchResult<T> = Result<T, SearchError>;
