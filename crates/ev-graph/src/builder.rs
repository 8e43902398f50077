//! Graph builder / compactor.
//!
//! Ingests raw, possibly bidirectional segment records and produces a
//! validated [`GraphStore`]:
//!
//! 1. opaque junction ids are interned to dense integer vertex ids in
//!    encounter order (deterministic given deterministic input order);
//! 2. each segment emits one directed link per applicable direction, with
//!    independently resolved speed, signed grade, and restrictions;
//! 3. the largest strongly connected component is extracted and everything
//!    outside it is dropped, so every retained vertex pair is mutually
//!    reachable.
//!
//! Malformed geometry is a per-segment hard error; unknown direction codes
//! fall back to forward-only emission and are logged, never silently dropped.

use rustc_hash::FxHashMap;

use ev_core::units::{DEFAULT_SPEED_KPH, TONS_TO_LBS};
use ev_core::{Coordinate, LinkId, ProfileId, VertexId};

use crate::profile::SpeedProfiles;
use crate::scc::largest_scc_mask;
use crate::{GraphError, GraphResult, GraphStore, Link, Restrictions, Vertex};

// ── Direction codes ───────────────────────────────────────────────────────────

/// Travel follows the segment's digitized direction ("positive").
pub const FORWARD_DIRECTION: u8 = 2;

/// Travel opposes the digitized direction ("negative").
pub const REVERSE_DIRECTION: u8 = 3;

/// Direction codes meaning both directions are open.  1 and 9 are treated
/// identically.
pub const BIDIRECTIONAL_DIRECTIONS: [u8; 2] = [1, 9];

// ── Input records ─────────────────────────────────────────────────────────────

/// One raw road segment as delivered by the upstream dataset.
///
/// Junction ids are opaque strings; geometry is an ordered polyline in
/// digitized direction.  Optional attributes use `None` for "not present in
/// the source", which the builder resolves via documented fallbacks.
#[derive(Clone, Debug)]
pub struct SegmentRecord {
    pub segment_id: u64,
    pub junction_from: String,
    pub junction_to: String,
    pub geometry: Vec<Coordinate>,
    pub direction: Option<u8>,
    pub free_flow_kph: Option<f64>,
    /// Average speed in the digitized (positive) direction.
    pub speed_average_pos: Option<f64>,
    /// Average speed against the digitized (negative) direction.
    pub speed_average_neg: Option<f64>,
    /// Mean grade as a decimal fraction in the digitized direction.
    pub grade: Option<f64>,
    pub road_class: u8,
    pub distance_cm: u32,
    pub week_profiles: [Option<ProfileId>; 7],
}

/// Restriction lookups keyed by external segment id, then by direction code.
///
/// Direction code 1 means "applies regardless of direction" and takes
/// precedence over a direction-specific entry.  Absence of any entry means
/// *unrestricted*.  Weight limits arrive in tons and are stored in lbs.
#[derive(Clone, Debug, Default)]
pub struct RestrictionTables {
    pub weight_tons: FxHashMap<u64, FxHashMap<u8, f64>>,
    pub height_in: FxHashMap<u64, FxHashMap<u8, f64>>,
    pub width_in: FxHashMap<u64, FxHashMap<u8, f64>>,
    pub length_in: FxHashMap<u64, FxHashMap<u8, f64>>,
}

impl RestrictionTables {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the restrictions applying to one emitted link.
    fn resolve(&self, segment_id: u64, direction: u8) -> Restrictions {
        Restrictions {
            weight_lbs: lookup(&self.weight_tons, segment_id, direction)
                .map(|tons| (tons * TONS_TO_LBS) as u32),
            height_in: lookup(&self.height_in, segment_id, direction).map(|v| v as u16),
            width_in: lookup(&self.width_in, segment_id, direction).map(|v| v as u16),
            length_in: lookup(&self.length_in, segment_id, direction).map(|v| v as u16),
        }
    }
}

/// Bidirectional entry (code 1) wins over a direction-specific one; no entry
/// at all means unrestricted.
fn lookup(table: &FxHashMap<u64, FxHashMap<u8, f64>>, segment_id: u64, direction: u8) -> Option<f64> {
    let by_direction = table.get(&segment_id)?;
    by_direction
        .get(&1)
        .or_else(|| by_direction.get(&direction))
        .copied()
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Accumulates segments, then compacts them into a [`GraphStore`] via
/// [`build`](Self::build).
pub struct GraphBuilder {
    junctions: FxHashMap<String, VertexId>,
    vertices: Vec<Vertex>,
    links: Vec<Link>,
    restrictions: RestrictionTables,
    profiles: SpeedProfiles,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_restrictions(RestrictionTables::empty())
    }

    pub fn with_restrictions(restrictions: RestrictionTables) -> Self {
        Self {
            junctions: FxHashMap::default(),
            vertices: Vec::new(),
            links: Vec::new(),
            restrictions,
            profiles: SpeedProfiles::empty(),
        }
    }

    /// Attach the time-of-day speed profile table referenced by segment
    /// `week_profiles` entries.
    pub fn set_profiles(&mut self, profiles: SpeedProfiles) {
        self.profiles = profiles;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Ingest one segment, emitting one link per open direction.
    ///
    /// Geometry with fewer than 2 coordinates is a hard error for the
    /// segment: there is no fallback that yields a non-degenerate link.
    pub fn add_segment(&mut self, segment: &SegmentRecord) -> GraphResult<()> {
        if segment.geometry.len() < 2 {
            return Err(GraphError::MalformedGeometry {
                segment_id: segment.segment_id,
            });
        }

        match segment.direction {
            Some(FORWARD_DIRECTION) => self.emit(segment, FORWARD_DIRECTION),
            Some(REVERSE_DIRECTION) => self.emit(segment, REVERSE_DIRECTION),
            Some(code) if BIDIRECTIONAL_DIRECTIONS.contains(&code) => {
                self.emit(segment, FORWARD_DIRECTION);
                self.emit(segment, REVERSE_DIRECTION);
            }
            other => {
                log::warn!(
                    "segment {}: unrecognized direction code {:?}, emitting forward link only",
                    segment.segment_id,
                    other
                );
                self.emit(segment, FORWARD_DIRECTION);
            }
        }
        Ok(())
    }

    /// Bulk ingest; the first malformed segment aborts the batch so no
    /// partial graph survives a bad input table.
    pub fn add_segments<'a>(
        &mut self,
        segments: impl IntoIterator<Item = &'a SegmentRecord>,
    ) -> GraphResult<()> {
        for segment in segments {
            self.add_segment(segment)?;
        }
        Ok(())
    }

    /// Compact the accumulated graph: extract the largest SCC, drop
    /// everything outside it, re-index densely, and assemble the store.
    pub fn build(self) -> GraphResult<GraphStore> {
        if self.links.is_empty() {
            return Err(GraphError::Disconnected);
        }

        let mask = largest_scc_mask(self.vertices.len(), &self.links);

        // Dense re-index of surviving vertices, ascending old id.
        let mut remap = vec![VertexId::INVALID; self.vertices.len()];
        let mut vertices = Vec::new();
        for (old, vertex) in self.vertices.into_iter().enumerate() {
            if mask[old] {
                let new_id = VertexId(vertices.len() as u32);
                remap[old] = new_id;
                vertices.push(Vertex::new(new_id, vertex.coord));
            }
        }

        let before = self.links.len();
        let links: Vec<Link> = self
            .links
            .into_iter()
            .filter(|l| mask[l.src.index()] && mask[l.dst.index()])
            .map(|mut l| {
                l.src = remap[l.src.index()];
                l.dst = remap[l.dst.index()];
                l
            })
            .collect();

        if vertices.is_empty() || links.is_empty() {
            return Err(GraphError::Disconnected);
        }
        log::info!(
            "largest SCC retained {} of {} vertices, {} of {} links",
            vertices.len(),
            remap.len(),
            links.len(),
            before
        );

        Ok(GraphStore::assemble(
            vertices,
            links,
            self.profiles,
            FxHashMap::default(),
        ))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Intern a junction id, assigning dense vertex ids in encounter order.
    fn intern(&mut self, junction: &str, coord: Coordinate) -> VertexId {
        if let Some(&id) = self.junctions.get(junction) {
            return id;
        }
        let id = VertexId(self.vertices.len() as u32);
        self.junctions.insert(junction.to_owned(), id);
        self.vertices.push(Vertex::new(id, coord));
        id
    }

    /// Emit one directed link for `segment` in `direction`.
    fn emit(&mut self, segment: &SegmentRecord, direction: u8) {
        // geometry.len() >= 2 was validated in add_segment
        let head = segment.geometry[0];
        let tail = segment.geometry[segment.geometry.len() - 1];

        let (src, dst, grade) = if direction == REVERSE_DIRECTION {
            // Reverse link: coordinate order flips, grade negates.
            let src = self.intern(&segment.junction_to, tail);
            let dst = self.intern(&segment.junction_from, head);
            (src, dst, segment.grade.map(|g| -g))
        } else {
            let src = self.intern(&segment.junction_from, head);
            let dst = self.intern(&segment.junction_to, tail);
            (src, dst, segment.grade)
        };

        self.links.push(Link {
            id: LinkId::INVALID, // assigned at assembly
            segment_id: segment.segment_id,
            src,
            dst,
            speed_kph: resolve_speed(segment, direction),
            distance_cm: segment.distance_cm,
            grade_milli: encode_grade_milli(grade),
            road_class: segment.road_class,
            week_profiles: segment.week_profiles,
            restrictions: self.restrictions.resolve(segment.segment_id, direction),
        });
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Attribute resolution ──────────────────────────────────────────────────────

/// Three-tier speed fallback, applied independently per emitted link:
/// free-flow speed, then the direction-appropriate average, then the fixed
/// default.
fn resolve_speed(segment: &SegmentRecord, direction: u8) -> u8 {
    let directional = if direction == REVERSE_DIRECTION {
        segment.speed_average_neg
    } else {
        segment.speed_average_pos
    };
    segment
        .free_flow_kph
        .filter(|s| s.is_finite() && *s > 0.0)
        .or(directional.filter(|s| s.is_finite() && *s > 0.0))
        .map(|s| s.round().clamp(1.0, u8::MAX as f64) as u8)
        .unwrap_or(DEFAULT_SPEED_KPH)
}

/// Encode a decimal grade fraction as integer milli-units; undefined (absent
/// or NaN) grade defaults to 0.
fn encode_grade_milli(grade: Option<f64>) -> i16 {
    match grade {
        Some(g) if g.is_finite() => {
            (g * 1000.0).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
        }
        _ => 0,
    }
}
