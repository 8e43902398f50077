//! Unit tests for ev-live.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use ev_core::Coordinate;
    use ev_energy::{ModelCollection, PowertrainModel, PredictInput};
    use ev_graph::{GraphBuilder, GraphStore, SegmentRecord};

    /// A bidirectional two-point segment at 36 kph.
    pub fn seg(
        id: u64,
        from: &str,
        to: &str,
        from_xy: (f64, f64),
        to_xy: (f64, f64),
        distance_cm: u32,
    ) -> SegmentRecord {
        SegmentRecord {
            segment_id: id,
            junction_from: from.to_owned(),
            junction_to: to.to_owned(),
            geometry: vec![
                Coordinate::new(from_xy.0, from_xy.1),
                Coordinate::new(to_xy.0, to_xy.1),
            ],
            direction: Some(1),
            free_flow_kph: Some(36.0),
            speed_average_pos: None,
            speed_average_neg: None,
            grade: None,
            road_class: 3,
            distance_cm,
            week_profiles: [None; 7],
        }
    }

    /// Two 1 km segments a–b–c: four links after bidirectional splitting.
    pub fn chain() -> GraphStore {
        let mut b = GraphBuilder::new();
        b.add_segment(&seg(1, "a", "b", (0.0, 0.0), (1000.0, 0.0), 100_000))
            .unwrap();
        b.add_segment(&seg(2, "b", "c", (1000.0, 0.0), (2000.0, 0.0), 100_000))
            .unwrap();
        b.build().unwrap()
    }

    /// `chain` plus a zero-length segment b–z.
    pub fn chain_with_zero_length() -> GraphStore {
        let mut b = GraphBuilder::new();
        b.add_segment(&seg(1, "a", "b", (0.0, 0.0), (1000.0, 0.0), 100_000))
            .unwrap();
        b.add_segment(&seg(2, "b", "c", (1000.0, 0.0), (2000.0, 0.0), 100_000))
            .unwrap();
        b.add_segment(&seg(3, "b", "z", (1000.0, 0.0), (1000.0, 1.0), 0))
            .unwrap();
        b.build().unwrap()
    }

    /// Energy proportional to speed, so a speed update must change the
    /// energy table.
    pub struct SpeedProportional;

    impl PowertrainModel for SpeedProportional {
        fn predict(&self, input: &PredictInput) -> f64 {
            input.distance_miles * input.speed_mph * 0.01
        }
    }

    pub fn speed_models() -> ModelCollection {
        ModelCollection::new().with("ev", Arc::new(SpeedProportional))
    }
}

// ── Snapshot isolation ────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshots {
    use std::sync::Arc;

    use ev_core::LinkId;

    use crate::{LinkUpdate, LiveGraph};

    use super::helpers::chain;

    #[test]
    fn update_does_not_disturb_held_snapshots() {
        let live = LiveGraph::new(Arc::new(chain()));
        let before = live.snapshot();

        let outcome = live
            .push_updates(&[LinkUpdate { link: LinkId(0), speed_kph: 18 }])
            .unwrap();
        assert_eq!(outcome.applied, 1);

        let after = live.snapshot();
        assert_eq!(before.link(LinkId(0)).unwrap().speed_kph, 36);
        assert_eq!(after.link(LinkId(0)).unwrap().speed_kph, 18);
        // Untouched links carry over.
        assert_eq!(after.link(LinkId(1)).unwrap().speed_kph, 36);
    }

    #[test]
    fn snapshots_are_the_same_arc_until_an_update_lands() {
        let live = LiveGraph::new(Arc::new(chain()));
        let one = live.snapshot();
        let two = live.snapshot();
        assert!(Arc::ptr_eq(&one, &two));

        live.push_updates(&[LinkUpdate { link: LinkId(0), speed_kph: 50 }])
            .unwrap();
        assert!(!Arc::ptr_eq(&one, &live.snapshot()));
    }

    #[test]
    fn base_travel_time_reflects_the_new_speed() {
        let live = LiveGraph::new(Arc::new(chain()));
        live.push_updates(&[LinkUpdate { link: LinkId(0), speed_kph: 18 }])
            .unwrap();
        let store = live.snapshot();
        // 1 km at 18 kph = 200 s.
        assert!((store.link(LinkId(0)).unwrap().base_time_secs() - 200.0).abs() < 1e-9);
    }
}

// ── Batch validation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use std::sync::Arc;

    use ev_core::LinkId;

    use crate::{LinkUpdate, LiveGraph, UpdateError};

    use super::helpers::{chain, chain_with_zero_length};

    #[test]
    fn unknown_link_rejects_the_whole_batch() {
        let live = LiveGraph::new(Arc::new(chain()));
        let updates = [
            LinkUpdate { link: LinkId(0), speed_kph: 18 },
            LinkUpdate { link: LinkId(999), speed_kph: 18 },
        ];
        let err = live.push_updates(&updates).unwrap_err();
        assert!(matches!(err, UpdateError::UnknownLink(LinkId(999))));

        // The valid half of the batch was not applied either.
        let store = live.snapshot();
        assert_eq!(store.link(LinkId(0)).unwrap().speed_kph, 36);
    }

    #[test]
    fn zero_length_links_are_skipped_not_fatal() {
        let store = chain_with_zero_length();
        let zero_id = store
            .links()
            .iter()
            .find(|l| l.distance_cm == 0)
            .map(|l| l.id)
            .unwrap();
        let live = LiveGraph::new(Arc::new(store));

        let updates = [
            LinkUpdate { link: LinkId(0), speed_kph: 18 },
            LinkUpdate { link: zero_id, speed_kph: 18 },
        ];
        let outcome = live.push_updates(&updates).unwrap();
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 1);

        let after = live.snapshot();
        assert_eq!(after.link(LinkId(0)).unwrap().speed_kph, 18);
        // The zero-length link keeps its original speed.
        assert_eq!(after.link(zero_id).unwrap().speed_kph, 36);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let live = LiveGraph::new(Arc::new(chain()));
        let outcome = live.push_updates(&[]).unwrap();
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 0);
    }
}

// ── Energy re-derivation ──────────────────────────────────────────────────────

#[cfg(test)]
mod energy {
    use std::sync::Arc;

    use ev_core::LinkId;

    use crate::{LinkUpdate, LiveGraph};

    use super::helpers::{chain, speed_models};

    #[test]
    fn touched_links_get_fresh_energy() {
        let mut store = chain();
        let models = speed_models();
        store.attach_energy(&models);
        let live = LiveGraph::with_models(Arc::new(store), models);

        let before = live.snapshot().energy_for("ev").unwrap().to_vec();

        // Halve one link's speed: its energy halves, the rest are untouched.
        live.push_updates(&[LinkUpdate { link: LinkId(0), speed_kph: 18 }])
            .unwrap();
        let snapshot = live.snapshot();
        let after = snapshot.energy_for("ev").unwrap();

        assert!((after[0] - before[0] / 2.0).abs() < 1e-12);
        for i in 1..before.len() {
            assert_eq!(after[i], before[i]);
        }
    }

    #[test]
    fn no_models_leaves_energy_tables_alone() {
        let mut store = chain();
        store.attach_energy(&speed_models());
        // LiveGraph built without models: speeds change, tables do not.
        let live = LiveGraph::new(Arc::new(store));
        let before = live.snapshot().energy_for("ev").unwrap().to_vec();

        live.push_updates(&[LinkUpdate { link: LinkId(0), speed_kph: 18 }])
            .unwrap();
        let snapshot = live.snapshot();
        assert_eq!(snapshot.energy_for("ev").unwrap(), before.as_slice());
    }
}
