//! Accumulated trip state.
//!
//! The tracked state variables form a closed, typed set — distance, time,
//! energy — rather than stringly-keyed edge attributes, so the compiler
//! checks which variables a cost model can contribute to.

/// Per-trip accumulated totals, also used for single-link deltas.
///
/// Units are raw: centimeters, seconds, and the energy model's native unit.
/// Unit conversion happens only inside the scalar weighting
/// ([`Rates`](crate::Rates)), never in the accumulated state.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct TripState {
    pub distance_cm: u64,
    pub time_secs: f64,
    /// Energy for the request's selected powertrain.  Zero when the request
    /// carries no energy weight.  May be negative in aggregate (regenerative
    /// braking); clipping applies per-link in the cost term only.
    pub energy: f64,
}

impl TripState {
    pub const ZERO: TripState = TripState {
        distance_cm: 0,
        time_secs: 0.0,
        energy: 0.0,
    };

    /// Component-wise sum, used to extend a label by one link delta.
    #[inline]
    pub fn plus(&self, delta: &TripState) -> TripState {
        TripState {
            distance_cm: self.distance_cm + delta.distance_cm,
            time_secs: self.time_secs + delta.time_secs,
            energy: self.energy + delta.energy,
        }
    }
}
