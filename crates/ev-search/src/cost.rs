//! Per-query cost model.
//!
//! Built once per request after validation, then consulted for every edge
//! relaxation: restriction filtering, per-variable state deltas, and the
//! scalar weighting that drives the priority queue.

use ev_graph::{GraphStore, Link, SECONDS_PER_DAY};

use crate::request::{SearchRequest, StartTime, VehicleParameters, Weights};
use crate::state::TripState;
use crate::{Rates, SearchError, SearchResult};

pub(crate) struct CostModel<'a> {
    store: &'a GraphStore,
    weights: Weights,
    rates: Rates,
    vehicle: Option<VehicleParameters>,
    start_time: Option<StartTime>,
    /// Per-link energy for the requested powertrain.  `None` when the energy
    /// weight is zero — prediction results are never fetched and discarded.
    energy_table: Option<&'a [f64]>,
}

impl<'a> CostModel<'a> {
    /// Validate `request` against `store` and capture everything the inner
    /// loop needs.  All request-level failures (ambiguous weights, unknown
    /// powertrain) surface here, before any traversal work.
    pub fn new(store: &'a GraphStore, request: &SearchRequest) -> SearchResult<CostModel<'a>> {
        request.weights.validate()?;

        let energy_table = if request.weights.energy > 0.0 {
            let key = request
                .powertrain
                .as_deref()
                .ok_or_else(|| SearchError::UnknownPowertrain(String::from("<unspecified>")))?;
            let table = store
                .energy_for(key)
                .ok_or_else(|| SearchError::UnknownPowertrain(key.to_owned()))?;
            Some(table)
        } else {
            None
        };

        Ok(CostModel {
            store,
            weights: request.weights,
            rates: request.rates,
            vehicle: request.vehicle,
            start_time: request.start_time,
            energy_table,
        })
    }

    /// Forget the vehicle parameters: used by the unrestricted probe that
    /// distinguishes "no route at all" from "no route for this vehicle".
    pub fn without_vehicle(&self) -> CostModel<'a> {
        CostModel { vehicle: None, ..*self }
    }

    pub fn has_vehicle(&self) -> bool {
        self.vehicle.is_some()
    }

    /// `false` if any of the link's limits is below the vehicle's parameter.
    /// Non-passable links are skipped entirely, never merely deprioritized.
    pub fn passable(&self, link: &Link) -> bool {
        let Some(vehicle) = &self.vehicle else {
            return true;
        };
        let r = &link.restrictions;
        let over = r.weight_lbs.is_some_and(|limit| vehicle.weight_lbs > limit)
            || r.height_in.is_some_and(|limit| vehicle.height_in > limit)
            || r.width_in.is_some_and(|limit| vehicle.width_in > limit)
            || r.length_in.is_some_and(|limit| vehicle.length_in > limit);
        !over
    }

    /// Per-variable delta for traversing `link` with `accumulated` state so
    /// far.  Time honors the active speed profile at the clock position
    /// reached along this candidate path.
    pub fn delta(&self, link: &Link, accumulated: &TripState) -> TripState {
        let time_secs = match self.start_time {
            Some(start) => {
                let elapsed = accumulated.time_secs as u64;
                let absolute = start.second_of_day as u64 + elapsed;
                let day = (start.day_of_week + (absolute / SECONDS_PER_DAY as u64) as usize) % 7;
                let second = (absolute % SECONDS_PER_DAY as u64) as u32;
                self.store.profiles().link_time_secs(link, day, second)
            }
            None => link.base_time_secs(),
        };

        let energy = match self.energy_table {
            Some(table) => table[link.id.index()],
            None => 0.0,
        };

        TripState {
            distance_cm: link.distance_cm as u64,
            time_secs,
            energy,
        }
    }

    /// Scalar traversal cost: Σ weight·rate·delta, with negative energy
    /// (regenerative braking) clipped to 0 so edge costs stay non-negative.
    pub fn scalar(&self, delta: &TripState) -> f64 {
        self.weights.distance * self.rates.distance * delta.distance_cm as f64
            + self.weights.time * self.rates.time * delta.time_secs
            + self.weights.energy * self.rates.energy * delta.energy.max(0.0)
    }
}
