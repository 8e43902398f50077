//! `ev-energy` — per-powertrain energy model abstraction.
//!
//! The routing core treats energy prediction as an opaque function
//! `predict(speed, grade, distance) -> energy`; this crate defines that seam
//! ([`PowertrainModel`]), the keyed collection attached to a graph store
//! ([`ModelCollection`]), and a simple concrete model for tests and demos
//! ([`LinearModel`]).  Training and serializing real models is out of scope.

pub mod model;

#[cfg(test)]
mod tests;

pub use model::{LinearModel, ModelCollection, PowertrainModel, PredictInput};
