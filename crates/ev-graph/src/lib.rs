//! `ev-graph` — road network graph store, builder/compactor, persistence.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`link`]    | `Vertex`, `Link`, `Restrictions`                            |
//! | [`store`]   | `GraphStore` (CSR both directions + R-tree + energy tables) |
//! | [`builder`] | `GraphBuilder`, `SegmentRecord`, `RestrictionTables`        |
//! | [`scc`]     | largest strongly-connected-component extraction             |
//! | [`profile`] | `SpeedProfiles` time-of-day table                           |
//! | [`loader`]  | CSV loaders for segment/restriction/profile tables          |
//! | [`persist`] | bincode save/load of a built store                          |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |

pub mod builder;
pub mod error;
pub mod link;
pub mod loader;
pub mod persist;
pub mod profile;
pub mod scc;
pub mod store;


pub use builder::{
    GraphBuilder, RestrictionTables, SegmentRecord, BIDIRECTIONAL_DIRECTIONS, FORWARD_DIRECTION,
    REVERSE_DIRECTION,
};
pub use error::{GraphError, GraphResult};
pub use link::{Link, Restrictions, Vertex};
pub use profile::{DayOfWeek, SecondOfDay, SpeedProfiles, SECONDS_PER_DAY};
pub use store::GraphStore;
