//! Search request and result types.

use ev_core::units::{CENTIMETERS_TO_MILES, SECONDS_TO_HOURS};
use ev_core::Coordinate;
use ev_graph::{DayOfWeek, SecondOfDay};

use crate::state::TripState;
use crate::{SearchError, SearchResult};

// ── Weights ───────────────────────────────────────────────────────────────────

/// Per-variable objective weights.
///
/// A variable absent from the caller's request defaults to 0.  An all-zero
/// weight vector is rejected before search ([`SearchError::AmbiguousWeights`])
/// and negative weights are rejected outright: the label-setting search
/// requires non-negative edge costs.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Weights {
    pub distance: f64,
    pub time: f64,
    pub energy: f64,
}

impl Weights {
    pub fn distance_only() -> Self {
        Weights { distance: 1.0, ..Default::default() }
    }

    pub fn time_only() -> Self {
        Weights { time: 1.0, ..Default::default() }
    }

    pub fn energy_only() -> Self {
        Weights { energy: 1.0, ..Default::default() }
    }

    pub(crate) fn validate(&self) -> SearchResult<()> {
        for (variable, value) in [
            ("distance", self.distance),
            ("time", self.time),
            ("energy", self.energy),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(SearchError::NegativeWeight { variable, value });
            }
        }
        if self.distance == 0.0 && self.time == 0.0 && self.energy == 0.0 {
            return Err(SearchError::AmbiguousWeights);
        }
        Ok(())
    }
}

// ── Rates ─────────────────────────────────────────────────────────────────────

/// Unit-conversion factors applied to raw state deltas before weighting.
///
/// Defaults convert to road-trip units: centimeters → miles, seconds →
/// hours, energy passed through in the model's native unit.  Callers that
/// price variables (e.g. $/kWh vs $/hour) fold the price into the factor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rates {
    pub distance: f64,
    pub time: f64,
    pub energy: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Rates {
            distance: CENTIMETERS_TO_MILES,
            time: SECONDS_TO_HOURS,
            energy: 1.0,
        }
    }
}

// ── Vehicle parameters ────────────────────────────────────────────────────────

/// Physical vehicle dimensions checked against link restrictions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VehicleParameters {
    pub weight_lbs: u32,
    pub height_in: u16,
    pub width_in: u16,
    pub length_in: u16,
}

// ── Start time ────────────────────────────────────────────────────────────────

/// Trip departure time, enabling time-of-day speed profile lookups keyed by
/// the accumulated time along each candidate path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StartTime {
    /// Monday-first day of week, `0..7`.
    pub day_of_week: DayOfWeek,
    /// Seconds since local midnight.
    pub second_of_day: SecondOfDay,
}

// ── SearchRequest ─────────────────────────────────────────────────────────────

/// One routing query.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub weights: Weights,
    /// Required when `weights.energy > 0`; must name a powertrain attached
    /// to the graph store.
    pub powertrain: Option<String>,
    pub rates: Rates,
    pub vehicle: Option<VehicleParameters>,
    pub start_time: Option<StartTime>,
}

impl SearchRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, weights: Weights) -> Self {
        SearchRequest {
            origin,
            destination,
            weights,
            powertrain: None,
            rates: Rates::default(),
            vehicle: None,
            start_time: None,
        }
    }

    pub fn with_powertrain(mut self, key: impl Into<String>) -> Self {
        self.powertrain = Some(key.into());
        self
    }

    pub fn with_rates(mut self, rates: Rates) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleParameters) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    pub fn with_start_time(mut self, start: StartTime) -> Self {
        self.start_time = Some(start);
        self
    }
}

// ── PathResult ────────────────────────────────────────────────────────────────

/// A found route: vertex coordinates in travel order, accumulated raw
/// per-variable totals, and the scalar objective value.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub route: Vec<Coordinate>,
    pub totals: TripState,
    pub total_cost: f64,
}

impl PathResult {
    /// `true` if origin and destination snapped to the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.route.len() <= 1
    }
}
