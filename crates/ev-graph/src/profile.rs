//! Time-of-day speed profiles.
//!
//! A profile is a step function over the seconds of a day: each entry gives
//! the relative speed (1.0 = free flow) that applies from its
//! `second_of_day` until the next entry.  Links reference one profile per
//! weekday via [`Link::week_profiles`](crate::Link::week_profiles); a link
//! with no profile for the active day travels at its base speed.

use rustc_hash::FxHashMap;

use ev_core::ProfileId;

use crate::Link;

/// Seconds since local midnight, `0..86_400`.
pub type SecondOfDay = u32;

/// Day of week, Monday-first, `0..7`.
pub type DayOfWeek = usize;

pub const SECONDS_PER_DAY: u32 = 86_400;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct SpeedModifier {
    second_of_day: SecondOfDay,
    relative_speed: f64,
}

/// All time-of-day speed profiles for a graph, keyed by [`ProfileId`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SpeedProfiles {
    modifiers: FxHashMap<ProfileId, Vec<SpeedModifier>>,
}

impl SpeedProfiles {
    /// No profiles: every lookup returns the neutral modifier 1.0.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Register a profile from `(second_of_day, relative_speed)` pairs.
    /// Entries are sorted by second of day; input order does not matter.
    pub fn insert(&mut self, id: ProfileId, mut entries: Vec<(SecondOfDay, f64)>) {
        entries.sort_by_key(|(second, _)| *second);
        let entries = entries
            .into_iter()
            .map(|(second_of_day, relative_speed)| SpeedModifier {
                second_of_day,
                relative_speed,
            })
            .collect();
        self.modifiers.insert(id, entries);
    }

    /// Relative speed for `profile` at `second`.  Binary-searches for the
    /// entry in effect; unknown profiles and empty entry lists yield 1.0.
    pub fn modifier_at(&self, profile: ProfileId, second: SecondOfDay) -> f64 {
        let Some(entries) = self.modifiers.get(&profile) else {
            return 1.0;
        };
        if entries.is_empty() {
            return 1.0;
        }
        match entries.binary_search_by(|m| m.second_of_day.cmp(&second)) {
            Ok(i) => entries[i].relative_speed,
            // Not an exact hit: the entry before the insertion point is in
            // effect.  Before the first entry, the first entry applies.
            Err(i) => entries[i.saturating_sub(1).min(entries.len() - 1)].relative_speed,
        }
    }

    /// Traversal time of `link` in seconds at the given day and second,
    /// scaling the base time by the inverse of the active relative speed.
    pub fn link_time_secs(&self, link: &Link, day: DayOfWeek, second: SecondOfDay) -> f64 {
        match link.week_profiles.get(day).copied().flatten() {
            Some(profile) => {
                let modifier = self.modifier_at(profile, second % SECONDS_PER_DAY);
                if modifier > 0.0 {
                    link.base_time_secs() / modifier
                } else {
                    link.base_time_secs()
                }
            }
            None => link.base_time_secs(),
        }
    }
}
