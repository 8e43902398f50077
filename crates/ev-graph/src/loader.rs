//! CSV table loaders for the builder's input schema.
//!
//! # Segment table
//!
//! One row per raw (possibly bidirectional) segment:
//!
//! ```csv
//! segment_id,junction_from,junction_to,geometry,direction,free_flow_kph,speed_average_pos,speed_average_neg,grade,road_class,distance_cm,monday_profile,tuesday_profile,wednesday_profile,thursday_profile,friday_profile,saturday_profile,sunday_profile
//! 10,j-a,j-b,0 0;100 0,1,,40,35,0.02,3,10000,,,,,,,
//! ```
//!
//! `geometry` is a `;`-separated polyline of `x y` pairs in projection
//! meters.  Empty optional columns mean "absent in the source" and are
//! resolved by the builder's documented fallbacks.
//!
//! # Restriction table
//!
//! One row per (segment, direction, dimension) limit:
//!
//! ```csv
//! segment_id,direction,dimension,limit
//! 10,1,weight,12.5
//! 10,2,height,162
//! ```
//!
//! `dimension` is one of `weight` (tons), `height`, `width`, `length`
//! (inches).
//!
//! # Speed profile table
//!
//! ```csv
//! profile_id,second_of_day,relative_speed
//! 0,0,1.0
//! 0,28800,0.6
//! ```

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use ev_core::{Coordinate, ProfileId};

use crate::builder::{RestrictionTables, SegmentRecord};
use crate::profile::SpeedProfiles;
use crate::{GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SegmentRow {
    segment_id: u64,
    junction_from: String,
    junction_to: String,
    geometry: String,
    direction: Option<u8>,
    free_flow_kph: Option<f64>,
    speed_average_pos: Option<f64>,
    speed_average_neg: Option<f64>,
    grade: Option<f64>,
    road_class: u8,
    distance_cm: u32,
    monday_profile: Option<u16>,
    tuesday_profile: Option<u16>,
    wednesday_profile: Option<u16>,
    thursday_profile: Option<u16>,
    friday_profile: Option<u16>,
    saturday_profile: Option<u16>,
    sunday_profile: Option<u16>,
}

#[derive(Deserialize)]
struct RestrictionRow {
    segment_id: u64,
    direction: u8,
    dimension: String,
    limit: f64,
}

#[derive(Deserialize)]
struct ProfileRow {
    profile_id: u16,
    second_of_day: u32,
    relative_speed: f64,
}

// ── Segment table ─────────────────────────────────────────────────────────────

/// Load the raw segment table from a CSV file.
pub fn load_segments_csv(path: &Path) -> GraphResult<Vec<SegmentRecord>> {
    let file = std::fs::File::open(path).map_err(GraphError::Io)?;
    load_segments_reader(file)
}

/// Like [`load_segments_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_segments_reader<R: Read>(reader: R) -> GraphResult<Vec<SegmentRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut segments = Vec::new();

    for result in csv_reader.deserialize::<SegmentRow>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let geometry = parse_geometry(&row.geometry, row.segment_id)?;
        segments.push(SegmentRecord {
            segment_id: row.segment_id,
            junction_from: row.junction_from,
            junction_to: row.junction_to,
            geometry,
            direction: row.direction,
            free_flow_kph: row.free_flow_kph,
            speed_average_pos: row.speed_average_pos,
            speed_average_neg: row.speed_average_neg,
            grade: row.grade,
            road_class: row.road_class,
            distance_cm: row.distance_cm,
            week_profiles: [
                row.monday_profile.map(ProfileId),
                row.tuesday_profile.map(ProfileId),
                row.wednesday_profile.map(ProfileId),
                row.thursday_profile.map(ProfileId),
                row.friday_profile.map(ProfileId),
                row.saturday_profile.map(ProfileId),
                row.sunday_profile.map(ProfileId),
            ],
        });
    }

    Ok(segments)
}

fn parse_geometry(s: &str, segment_id: u64) -> GraphResult<Vec<Coordinate>> {
    if s.trim().is_empty() {
        return Err(GraphError::MissingField {
            segment_id,
            field: "geometry",
        });
    }
    s.split(';')
        .map(|pair| {
            let mut parts = pair.split_whitespace();
            let x = parts.next().and_then(|v| v.parse::<f64>().ok());
            let y = parts.next().and_then(|v| v.parse::<f64>().ok());
            match (x, y) {
                (Some(x), Some(y)) => Ok(Coordinate::new(x, y)),
                _ => Err(GraphError::Parse(format!(
                    "segment {segment_id}: bad geometry point {pair:?}"
                ))),
            }
        })
        .collect()
}

// ── Restriction table ─────────────────────────────────────────────────────────

/// Load restriction tables from a CSV file.
pub fn load_restrictions_csv(path: &Path) -> GraphResult<RestrictionTables> {
    let file = std::fs::File::open(path).map_err(GraphError::Io)?;
    load_restrictions_reader(file)
}

/// Like [`load_restrictions_csv`] but accepts any `Read` source.
pub fn load_restrictions_reader<R: Read>(reader: R) -> GraphResult<RestrictionTables> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut tables = RestrictionTables::empty();

    for result in csv_reader.deserialize::<RestrictionRow>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let table = match row.dimension.as_str() {
            "weight" => &mut tables.weight_tons,
            "height" => &mut tables.height_in,
            "width" => &mut tables.width_in,
            "length" => &mut tables.length_in,
            other => {
                return Err(GraphError::Parse(format!(
                    "segment {}: unknown restriction dimension {other:?}",
                    row.segment_id
                )));
            }
        };
        table
            .entry(row.segment_id)
            .or_insert_with(FxHashMap::default)
            .insert(row.direction, row.limit);
    }

    Ok(tables)
}

// ── Speed profile table ───────────────────────────────────────────────────────

/// Load the time-of-day speed profile table from a CSV file.
pub fn load_profiles_csv(path: &Path) -> GraphResult<SpeedProfiles> {
    let file = std::fs::File::open(path).map_err(GraphError::Io)?;
    load_profiles_reader(file)
}

/// Like [`load_profiles_csv`] but accepts any `Read` source.
pub fn load_profiles_reader<R: Read>(reader: R) -> GraphResult<SpeedProfiles> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_profile: FxHashMap<u16, Vec<(u32, f64)>> = FxHashMap::default();

    for result in csv_reader.deserialize::<ProfileRow>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        by_profile
            .entry(row.profile_id)
            .or_default()
            .push((row.second_of_day, row.relative_speed));
    }

    let mut profiles = SpeedProfiles::empty();
    for (id, entries) in by_profile {
        profiles.insert(ProfileId(id), entries);
    }
    Ok(profiles)
}
