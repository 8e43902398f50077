//! Vertex and directed-link records.
//!
//! # Integer attribute encoding
//!
//! Link attributes are stored as small integers — centimeters for distance,
//! milli-units for grade, whole kph for speed — so the persisted graph
//! round-trips bit-exactly and repeated rebuilds produce identical tables.
//! Floating point appears only in *derived* quantities (travel time, energy),
//! which are recomputed rather than stored per search.

use ev_core::units::{CENTIMETERS_TO_KILOMETERS, CENTIMETERS_TO_MILES, GRADE_MILLI_TO_DECIMAL, KPH_TO_MPH};
use ev_core::{Coordinate, LinkId, ProfileId, VertexId};

// ── Vertex ────────────────────────────────────────────────────────────────────

/// A graph vertex: a dense id plus its projected coordinate.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub coord: Coordinate,
}

impl Vertex {
    pub fn new(id: VertexId, coord: Coordinate) -> Self {
        Self { id, coord }
    }
}

// ── Restrictions ──────────────────────────────────────────────────────────────

/// Physical limits a vehicle must not exceed to traverse a link.
///
/// `None` means *unrestricted* — deliberately distinct from a zero limit,
/// which would make the link impassable for every vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Restrictions {
    pub weight_lbs: Option<u32>,
    pub height_in: Option<u16>,
    pub width_in: Option<u16>,
    pub length_in: Option<u16>,
}

impl Restrictions {
    pub const NONE: Restrictions = Restrictions {
        weight_lbs: None,
        height_in: None,
        width_in: None,
        length_in: None,
    };

    /// `true` if no dimension carries a limit.
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::NONE
    }
}

// ── Link ──────────────────────────────────────────────────────────────────────

/// A directed, single-direction road link.
///
/// A two-way source segment produces exactly two `Link`s with independently
/// signed grade and independently sourced directional speed; `segment_id`
/// records which raw segment each came from.  After compaction, `id` equals
/// the link's position in the store's link table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub id: LinkId,
    /// External id of the raw segment this link was split from.
    pub segment_id: u64,
    pub src: VertexId,
    pub dst: VertexId,
    pub speed_kph: u8,
    pub distance_cm: u32,
    /// Signed grade in milli-units (`round(fraction * 1000)`); the reverse
    /// link of a two-way segment carries the negated value.
    pub grade_milli: i16,
    pub road_class: u8,
    /// Per-day (Monday-first) time-of-day speed profile references.
    pub week_profiles: [Option<ProfileId>; 7],
    pub restrictions: Restrictions,
}

impl Link {
    /// Free-flow traversal time in seconds, derived from the stored distance
    /// and speed.  A stored speed of 0 is clamped to 1 kph so the derivation
    /// is always finite.
    #[inline]
    pub fn base_time_secs(&self) -> f64 {
        let km = self.distance_cm as f64 * CENTIMETERS_TO_KILOMETERS;
        km / self.speed_kph.max(1) as f64 * 3600.0
    }

    /// Link speed in mph, as consumed by powertrain energy models.
    #[inline]
    pub fn speed_mph(&self) -> f64 {
        self.speed_kph as f64 * KPH_TO_MPH
    }

    /// Link distance in miles.
    #[inline]
    pub fn distance_miles(&self) -> f64 {
        self.distance_cm as f64 * CENTIMETERS_TO_MILES
    }

    /// Grade as a signed decimal fraction.
    #[inline]
    pub fn grade(&self) -> f64 {
        self.grade_milli as f64 * GRADE_MILLI_TO_DECIMAL
    }
}
