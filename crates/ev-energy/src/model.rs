//! Powertrain energy model trait and collection.
//!
//! # Opacity
//!
//! Energy models are opaque to the routing core: a model is any
//! `Send + Sync` function from `(speed, grade, distance)` to energy in its
//! own native unit (gallons, kWh).  Real deployments wrap machine-learned
//! regressors; tests and demos use [`LinearModel`].

use std::sync::Arc;

use rustc_hash::FxHashMap;

// ── PowertrainModel ───────────────────────────────────────────────────────────

/// Feature vector for one link traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PredictInput {
    /// Link speed in mph.
    pub speed_mph: f64,
    /// Signed grade as a decimal fraction (+0.05 = 5 % uphill).
    pub grade: f64,
    /// Link distance in miles.
    pub distance_miles: f64,
}

/// An opaque per-powertrain energy predictor.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: one model instance is shared
/// across Rayon worker threads during parallel batch search and bulk energy
/// derivation.
pub trait PowertrainModel: Send + Sync {
    /// Predict the energy consumed traversing one link, in the model's
    /// native unit.  Negative values (regenerative braking) are permitted;
    /// the cost model clips them before weighting.
    fn predict(&self, input: &PredictInput) -> f64;
}

// ── ModelCollection ───────────────────────────────────────────────────────────

/// A mapping from powertrain key (e.g. `"Gasoline"`, `"Electric"`) to model.
///
/// Attached to a graph store, the collection's keys define which powertrains
/// a search request may select.
#[derive(Clone, Default)]
pub struct ModelCollection {
    models: FxHashMap<String, Arc<dyn PowertrainModel>>,
}

impl ModelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, model: Arc<dyn PowertrainModel>) {
        self.models.insert(key.into(), model);
    }

    /// Builder-style insert for collection literals.
    pub fn with(mut self, key: impl Into<String>, model: Arc<dyn PowertrainModel>) -> Self {
        self.insert(key, model);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn PowertrainModel>> {
        self.models.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn PowertrainModel>)> {
        self.models.iter().map(|(k, m)| (k.as_str(), m))
    }
}

// ── LinearModel ───────────────────────────────────────────────────────────────

/// A simple affine energy model: `distance * (per_mile + per_grade * grade)`.
///
/// Stands in for an opaque learned regressor in tests and demos.  With a
/// positive `per_grade`, steep downhill links can predict negative energy,
/// which exercises the cost model's clipping path.
#[derive(Copy, Clone, Debug)]
pub struct LinearModel {
    /// Energy per mile on flat ground.
    pub per_mile: f64,
    /// Additional energy per mile per unit of decimal grade.
    pub per_grade: f64,
}

impl LinearModel {
    pub fn new(per_mile: f64, per_grade: f64) -> Self {
        Self { per_mile, per_grade }
    }

    /// Flat-ground-only model, insensitive to grade.
    pub fn flat(per_mile: f64) -> Self {
        Self::new(per_mile, 0.0)
    }
}

impl PowertrainModel for LinearModel {
    fn predict(&self, input: &PredictInput) -> f64 {
        input.distance_miles * (self.per_mile + self.per_grade * input.grade)
    }
}
