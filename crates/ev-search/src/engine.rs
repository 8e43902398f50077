//! Label-setting route search.
//!
//! # Algorithm
//!
//! Classic Dijkstra over the scalar objective: each vertex settles at most
//! once, at its minimum weighted cost.  The raw per-variable totals
//! (distance, time, energy) ride along with each label so the winning path's
//! totals come out of the same traversal, with no second pass.
//!
//! # Cost units
//!
//! The heap orders `f64` scalar costs (weight · rate · delta, summed over
//! variables).  Edge costs are non-negative by construction: weights are
//! validated non-negative and negative per-link energy is clipped in the
//! scalar term, so the label-setting property holds.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ev_core::{Coordinate, LinkId, VertexId};
use ev_graph::GraphStore;

use crate::cost::CostModel;
use crate::request::{PathResult, SearchRequest};
use crate::state::TripState;
use crate::{SearchError, SearchResult};

// ── SearchConfig ──────────────────────────────────────────────────────────────

/// Engine-level limits, shared by every query the engine runs.
#[derive(Copy, Clone, Debug)]
pub struct SearchConfig {
    /// Maximum snap distance in projection meters.  Queries whose origin or
    /// destination lies further from every vertex fail with
    /// [`SearchError::OutsideCoverage`].
    pub snap_max_m: f64,
    /// Abort a query after settling this many vertices.
    pub max_settled: Option<usize>,
    /// Abort a query after this much wall-clock time.
    pub max_duration: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            snap_max_m: 500.0,
            max_settled: None,
            max_duration: None,
        }
    }
}

// ── SearchEngine ──────────────────────────────────────────────────────────────

/// Route search over a single immutable graph snapshot.
///
/// The engine holds an `Arc<GraphStore>` and never mutates it, so one engine
/// (or many, over the same store) can serve queries from multiple threads.
/// Live speed updates produce a *new* store; build a new engine on the new
/// snapshot — in-flight queries finish against the snapshot they started on.
pub struct SearchEngine {
    store: Arc<GraphStore>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(store: Arc<GraphStore>) -> Self {
        SearchEngine { store, config: SearchConfig::default() }
    }

    pub fn with_config(store: Arc<GraphStore>, config: SearchConfig) -> Self {
        SearchEngine { store, config }
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Run one routing query.
    ///
    /// Request validation (weights, powertrain) and coordinate snapping
    /// happen before any traversal, so malformed requests fail fast and
    /// specifically.
    pub fn run(&self, request: &SearchRequest) -> SearchResult<PathResult> {
        let model = CostModel::new(&self.store, request)?;

        let from = self.snap(request.origin)?;
        let to = self.snap(request.destination)?;

        if from == to {
            let coord = self
                .store
                .vertex(from)
                .map(|v| v.coord)
                .unwrap_or(request.origin);
            return Ok(PathResult {
                route: vec![coord],
                totals: TripState::ZERO,
                total_cost: 0.0,
            });
        }

        match self.dijkstra(&model, from, to) {
            Ok(found) => Ok(self.reconstruct(from, to, found)),
            // A vehicle-restricted dead end and a genuinely disconnected pair
            // look identical from the exhausted open set; an unrestricted
            // probe tells them apart.
            Err(SearchError::NoRouteFound { .. }) if model.has_vehicle() => {
                match self.dijkstra(&model.without_vehicle(), from, to) {
                    Ok(_) => Err(SearchError::RestrictionViolationNoPath { from, to }),
                    // Only a probe that exhausts the open set proves
                    // disconnection; a probe timeout proves nothing and is
                    // reported as the budget failure it is.
                    Err(SearchError::NoRouteFound { .. }) => {
                        Err(SearchError::NoRouteFound { from, to })
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn snap(&self, coord: Coordinate) -> SearchResult<VertexId> {
        self.store
            .nearest_vertex_within(coord, self.config.snap_max_m)
            .ok_or(SearchError::OutsideCoverage { coord, max_m: self.config.snap_max_m })
    }

    fn dijkstra(
        &self,
        model: &CostModel<'_>,
        from: VertexId,
        to: VertexId,
    ) -> SearchResult<Found> {
        let n = self.store.vertex_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut totals = vec![TripState::ZERO; n];
        // prev[v] = link that reached v on the best label; INVALID = unreached.
        let mut prev = vec![LinkId::INVALID; n];
        let mut settled = 0usize;
        let started = Instant::now();

        dist[from.index()] = 0.0;

        // Min-heap; OrderedCost supplies a total order over finite f64 costs
        // and VertexId breaks ties deterministically.
        let mut heap: BinaryHeap<Reverse<(OrderedCost, VertexId)>> = BinaryHeap::new();
        heap.push(Reverse((OrderedCost(0.0), from)));

        while let Some(Reverse((OrderedCost(cost), vertex))) = heap.pop() {
            if vertex == to {
                return Ok(Found {
                    cost,
                    totals: totals[to.index()],
                    prev,
                });
            }

            // Skip stale heap entries.
            if cost > dist[vertex.index()] {
                continue;
            }

            settled += 1;
            if self.config.max_settled.is_some_and(|max| settled >= max) {
                return Err(SearchError::Timeout { settled });
            }
            if settled % CLOCK_CHECK_INTERVAL == 0
                && self
                    .config
                    .max_duration
                    .is_some_and(|max| started.elapsed() >= max)
            {
                return Err(SearchError::Timeout { settled });
            }

            let here = totals[vertex.index()];
            for link in self.store.links_from(vertex) {
                if !model.passable(link) {
                    continue;
                }
                let delta = model.delta(link, &here);
                let new_cost = cost + model.scalar(&delta);

                if new_cost < dist[link.dst.index()] {
                    dist[link.dst.index()] = new_cost;
                    totals[link.dst.index()] = here.plus(&delta);
                    prev[link.dst.index()] = link.id;
                    heap.push(Reverse((OrderedCost(new_cost), link.dst)));
                }
            }
        }

        Err(SearchError::NoRouteFound { from, to })
    }

    fn reconstruct(&self, from: VertexId, to: VertexId, found: Found) -> PathResult {
        let mut link_ids = Vec::new();
        let mut cur = to;
        while cur != from {
            let id = found.prev[cur.index()];
            debug_assert_ne!(id, LinkId::INVALID);
            link_ids.push(id);
            cur = match self.store.link(id) {
                Some(link) => link.src,
                None => break,
            };
        }
        link_ids.reverse();

        let mut route = Vec::with_capacity(link_ids.len() + 1);
        if let Some(v) = self.store.vertex(from) {
            route.push(v.coord);
        }
        for id in link_ids {
            if let Some(link) = self.store.link(id) {
                if let Some(v) = self.store.vertex(link.dst) {
                    route.push(v.coord);
                }
            }
        }

        PathResult {
            route,
            totals: found.totals,
            total_cost: found.cost,
        }
    }
}

/// Wall-clock checks piggyback on settle counting instead of querying the
/// clock on every pop.  The settled-vertex limit is exact.
const CLOCK_CHECK_INTERVAL: usize = 1024;

struct Found {
    cost: f64,
    totals: TripState,
    prev: Vec<LinkId>,
}

// ── OrderedCost ───────────────────────────────────────────────────────────────

/// `f64` wrapper with a total order, for use as a heap key.  Costs entering
/// the heap are finite and non-negative, so `total_cmp` agrees with the
/// partial order everywhere it matters.
#[derive(Copy, Clone, PartialEq)]
struct OrderedCost(f64);

impl Eq for OrderedCost {}

impl PartialOrd for OrderedCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
