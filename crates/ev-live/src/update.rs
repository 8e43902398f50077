//! Snapshot-publishing update channel.
//!
//! # Snapshot discipline
//!
//! Readers hold `Arc<GraphStore>` snapshots and never see a half-applied
//! batch: [`LiveGraph::push_updates`] clones the current store, revises the
//! clone, and atomically swaps it in.  A query that began on the old
//! snapshot finishes on the old snapshot.
//!
//! Cloning the whole store per batch is deliberate — batches arrive on the
//! order of minutes (traffic feeds), not microseconds, and it keeps the read
//! path completely lock-free once the `Arc` is cloned out.

use std::sync::{Arc, RwLock};

use ev_core::LinkId;
use ev_energy::ModelCollection;
use ev_graph::GraphStore;

use crate::{UpdateError, UpdateResult};

// ── LinkUpdate ────────────────────────────────────────────────────────────────

/// One observed speed for one link, e.g. from a live traffic feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LinkUpdate {
    pub link: LinkId,
    pub speed_kph: u8,
}

/// What a successfully applied batch did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Links whose speed was overwritten.
    pub applied: usize,
    /// Zero-length links skipped: a speed on a zero-distance link changes no
    /// travel time and would poison energy rates.
    pub skipped: usize,
}

// ── LiveGraph ─────────────────────────────────────────────────────────────────

/// Shared handle over the current graph snapshot.
///
/// Search engines take snapshots via [`snapshot`](Self::snapshot); a feed
/// ingester applies batches via [`push_updates`](Self::push_updates).  The
/// two never contend beyond the brief pointer swap.
pub struct LiveGraph {
    current: RwLock<Arc<GraphStore>>,
    /// Models used to re-derive per-link energy after a speed change.  Empty
    /// when the deployment carries no energy tables.
    models: ModelCollection,
}

impl LiveGraph {
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self::with_models(store, ModelCollection::new())
    }

    pub fn with_models(store: Arc<GraphStore>, models: ModelCollection) -> Self {
        LiveGraph {
            current: RwLock::new(store),
            models,
        }
    }

    /// The current snapshot.  The returned `Arc` stays valid (and unchanged)
    /// however many batches land afterwards.
    pub fn snapshot(&self) -> Arc<GraphStore> {
        // A poisoned lock only means a panicking writer; the stored Arc is
        // still the last fully-published snapshot.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Validate and apply one batch, then publish the revised snapshot.
    ///
    /// All-or-nothing: any unknown link id fails the whole batch before a
    /// single speed is written, so a feed glitch cannot publish a partially
    /// updated graph.
    pub fn push_updates(&self, updates: &[LinkUpdate]) -> UpdateResult<UpdateOutcome> {
        // The write lock is held across validate-clone-publish so concurrent
        // batches serialize instead of overwriting each other's clones.  A
        // reader calling `snapshot` mid-batch waits for the publish; readers
        // already holding a snapshot are unaffected.
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let base = Arc::clone(&guard);

        // Phase 1: validate before paying for the clone.
        for update in updates {
            if base.link(update.link).is_none() {
                return Err(UpdateError::UnknownLink(update.link));
            }
        }

        // Phase 2: revise a private clone.
        let mut revised = (*base).clone();
        let mut outcome = UpdateOutcome::default();
        let mut touched = Vec::with_capacity(updates.len());
        for update in updates {
            // Validated above; re-check is cheap and keeps this loop total.
            let Some(link) = revised.link(update.link) else {
                return Err(UpdateError::UnknownLink(update.link));
            };
            if link.distance_cm == 0 {
                log::warn!(
                    "skipping speed update for zero-length link {}",
                    update.link
                );
                outcome.skipped += 1;
                continue;
            }
            revised.set_link_speed(update.link, update.speed_kph)?;
            touched.push(update.link);
            outcome.applied += 1;
        }

        if !self.models.is_empty() && !touched.is_empty() {
            revised.recompute_energy_for(&self.models, &touched);
        }

        // Phase 3: publish.
        *guard = Arc::new(revised);
        Ok(outcome)
    }
}
