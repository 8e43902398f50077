//! Multi-criteria route search over an `ev-graph` store.
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | `request` | [`SearchRequest`], weights/rates, [`PathResult`]          |
//! | `state`   | [`TripState`] accumulated per-variable totals             |
//! | `cost`    | per-query cost model (restrictions, profiles, energy)     |
//! | `engine`  | [`SearchEngine`] label-setting search                     |
//! | `batch`   | rayon-parallel batch execution                            |
//! | `error`   | [`SearchError`]                                           |
//!
//! A query names an origin and destination coordinate plus a weight per cost
//! variable (distance, time, energy).  Coordinates snap to the nearest graph
//! vertex within a configured radius; the engine then runs Dijkstra over the
//! weighted scalar cost and returns the route's coordinates together with
//! the raw per-variable totals of the winning path.

mod batch;
mod cost;
mod engine;
mod error;
mod request;
mod state;

pub use engine::{SearchConfig, SearchEngine};
pub use error::{SearchError, SearchResult};
pub use request::{PathResult, Rates, SearchRequest, StartTime, VehicleParameters, Weights};
pub use state::TripState;
