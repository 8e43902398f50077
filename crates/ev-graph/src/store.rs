//! Immutable, indexed graph store.
//!
//! # Data layout
//!
//! Links live in one `Vec<Link>` sorted by source vertex — **Compressed
//! Sparse Row (CSR)**.  Given a `VertexId v`, its outgoing links occupy the
//! slice:
//!
//! ```text
//! links[ out_start[v] .. out_start[v+1] ]
//! ```
//!
//! A second CSR (`in_start`/`in_links`) indexes the same link table by
//! destination vertex for reverse traversal.  `LinkId` equals a link's
//! position in the table, so lookups by id are direct indexing.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps projected coordinates to the nearest
//! `VertexId`, used to snap query origin/destination coordinates.
//!
//! # Mutability discipline
//!
//! The store is read-only once handed to the search engine.  The mutators
//! (`set_link_speed`, `recompute_energy_for`) exist so the live-update
//! channel can clone a store, revise it, and publish the clone as a new
//! snapshot — they are never called on a store that searches can see.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use ev_core::{Coordinate, LinkId, VertexId};
use ev_energy::{ModelCollection, PredictInput};

use crate::profile::SpeedProfiles;
use crate::{GraphError, GraphResult, Link, Vertex};

// ── R-tree vertex entry ───────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a projected 2-D point with the
/// associated `VertexId`.
#[derive(Clone)]
struct VertexEntry {
    point: [f64; 2],
    id: VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── GraphStore ────────────────────────────────────────────────────────────────

/// Directed multigraph in CSR form plus spatial index, per-powertrain energy
/// tables, and time-of-day speed profiles.
///
/// Do not construct directly; use [`GraphBuilder`](crate::GraphBuilder) or
/// [`GraphStore::from_file`].
#[derive(Clone)]
pub struct GraphStore {
    vertices: Vec<Vertex>,

    /// All links, sorted by `src`.  `LinkId` == position.
    links: Vec<Link>,

    /// CSR row pointer for outgoing links.  Length = vertex count + 1.
    out_start: Vec<u32>,

    /// CSR row pointer for incoming links.  Length = vertex count + 1.
    in_start: Vec<u32>,

    /// Link positions grouped by destination vertex.
    in_links: Vec<u32>,

    spatial_idx: RTree<VertexEntry>,

    /// Per-powertrain, per-link energy in model-native units.  Computed by
    /// [`attach_energy`](Self::attach_energy); keys define the valid
    /// `powertrain_key`s for search requests against this store.
    energy: FxHashMap<String, Vec<f64>>,

    profiles: SpeedProfiles,
}

impl GraphStore {
    /// Assemble a store from a compacted vertex/link table.
    ///
    /// `vertices` must be densely indexed (`vertices[i].id == i`) and every
    /// link endpoint must be a valid vertex id; the builder and the
    /// persistence loader both guarantee this.
    pub(crate) fn assemble(
        vertices: Vec<Vertex>,
        mut links: Vec<Link>,
        profiles: SpeedProfiles,
        energy: FxHashMap<String, Vec<f64>>,
    ) -> Self {
        let vertex_count = vertices.len();

        // CSR by source.  Stable sort keeps emission order within a vertex
        // deterministic.
        links.sort_by_key(|l| l.src);
        for (i, link) in links.iter_mut().enumerate() {
            link.id = LinkId(i as u64);
        }

        let mut out_start = vec![0u32; vertex_count + 1];
        for link in &links {
            out_start[link.src.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[vertex_count] as usize, links.len());

        // CSR by destination: bucket link positions under their dst vertex.
        let mut in_start = vec![0u32; vertex_count + 1];
        for link in &links {
            in_start[link.dst.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            in_start[i] += in_start[i - 1];
        }
        let mut in_links = vec![0u32; links.len()];
        let mut cursor = in_start.clone();
        for (pos, link) in links.iter().enumerate() {
            let slot = cursor[link.dst.index()];
            in_links[slot as usize] = pos as u32;
            cursor[link.dst.index()] += 1;
        }

        // Bulk-load the R-tree (O(N log N), faster than N inserts).
        let entries: Vec<VertexEntry> = vertices
            .iter()
            .map(|v| VertexEntry {
                point: [v.coord.x, v.coord.y],
                id: v.id,
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        GraphStore {
            vertices,
            links,
            out_start,
            in_start,
            in_links,
            spatial_idx,
            energy,
            profiles,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.index())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// All outgoing links of `vertex` — a contiguous slice, no allocation.
    #[inline]
    pub fn links_from(&self, vertex: VertexId) -> &[Link] {
        let start = self.out_start[vertex.index()] as usize;
        let end = self.out_start[vertex.index() + 1] as usize;
        &self.links[start..end]
    }

    /// All incoming links of `vertex`, for reverse traversal.
    #[inline]
    pub fn links_to(&self, vertex: VertexId) -> impl Iterator<Item = &Link> + '_ {
        let start = self.in_start[vertex.index()] as usize;
        let end = self.in_start[vertex.index() + 1] as usize;
        self.in_links[start..end]
            .iter()
            .map(|&pos| &self.links[pos as usize])
    }

    #[inline]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        (self.out_start[vertex.index() + 1] - self.out_start[vertex.index()]) as usize
    }

    #[inline]
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        (self.in_start[vertex.index() + 1] - self.in_start[vertex.index()]) as usize
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest vertex to `coord`, unbounded.  `None` only for an empty store.
    pub fn nearest_vertex(&self, coord: Coordinate) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&[coord.x, coord.y])
            .map(|e| e.id)
    }

    /// Nearest vertex within `max_m` projection meters of `coord`.
    ///
    /// Queries snapped from coordinates far outside the covered region must
    /// fail rather than silently route from an arbitrarily distant vertex.
    pub fn nearest_vertex_within(&self, coord: Coordinate, max_m: f64) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&[coord.x, coord.y])
            .filter(|e| e.distance_2(&[coord.x, coord.y]) <= max_m * max_m)
            .map(|e| e.id)
    }

    // ── Speed profiles ────────────────────────────────────────────────────

    pub fn profiles(&self) -> &SpeedProfiles {
        &self.profiles
    }

    // ── Per-powertrain energy ─────────────────────────────────────────────

    /// Compute the per-link energy table for every model in `models`.
    ///
    /// Energy prediction is the most expensive per-link derivation, so it is
    /// run once here (and incrementally via
    /// [`recompute_energy_for`](Self::recompute_energy_for)) rather than per
    /// search.
    pub fn attach_energy(&mut self, models: &ModelCollection) {
        for (key, model) in models.iter() {
            let table: Vec<f64> = self
                .links
                .iter()
                .map(|link| model.predict(&predict_input(link)))
                .collect();
            self.energy.insert(key.to_owned(), table);
        }
    }

    /// Re-derive energy for `touched` links only, across all attached
    /// powertrain tables.  Links whose powertrain has no model in `models`
    /// keep their previous value (logged).
    pub fn recompute_energy_for(&mut self, models: &ModelCollection, touched: &[LinkId]) {
        for (key, table) in self.energy.iter_mut() {
            let Some(model) = models.get(key) else {
                log::warn!("no model for attached powertrain {key:?}; energy not re-derived");
                continue;
            };
            for &id in touched {
                if let Some(link) = self.links.get(id.index()) {
                    table[id.index()] = model.predict(&predict_input(link));
                }
            }
        }
    }

    /// Per-link energy table for `key`, if that powertrain is attached.
    pub fn energy_for(&self, key: &str) -> Option<&[f64]> {
        self.energy.get(key).map(Vec::as_slice)
    }

    pub fn has_powertrain(&self, key: &str) -> bool {
        self.energy.contains_key(key)
    }

    pub(crate) fn energy_tables(&self) -> &FxHashMap<String, Vec<f64>> {
        &self.energy
    }

    // ── Snapshot revision (live-update channel only) ──────────────────────

    /// Overwrite a link's speed on a *cloned, unpublished* store.
    ///
    /// Returns `Err` if the id is out of range; the caller validates whole
    /// batches before mutating anything.
    pub fn set_link_speed(&mut self, id: LinkId, speed_kph: u8) -> GraphResult<()> {
        match self.links.get_mut(id.index()) {
            Some(link) => {
                link.speed_kph = speed_kph;
                Ok(())
            }
            None => Err(GraphError::LinkNotFound(id)),
        }
    }
}

fn predict_input(link: &Link) -> PredictInput {
    PredictInput {
        speed_mph: link.speed_mph(),
        grade: link.grade(),
        distance_miles: link.distance_miles(),
    }
}
