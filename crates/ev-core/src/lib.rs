//! `ev-core` — foundational types for the `evroute` routing engine.
//!
//! This crate is a dependency of every other `ev-*` crate.  It intentionally
//! has no `ev-*` dependencies and only an optional `serde` external one.
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`ids`]   | `VertexId`, `LinkId`, `ProfileId`               |
//! | [`geo`]   | `Coordinate`, planar distance helpers           |
//! | [`units`] | conversion constants, `DEFAULT_SPEED_KPH`       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by graph persistence in `ev-graph`.               |

pub mod geo;
pub mod ids;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Coordinate;
pub use ids::{LinkId, ProfileId, VertexId};
