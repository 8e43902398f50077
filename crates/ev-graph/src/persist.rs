//! Binary graph persistence.
//!
//! Serializes the vertex/link tables, energy attachments, and speed profiles
//! with `bincode`; the CSR adjacency and R-tree are derived structures and
//! are rebuilt deterministically on load.  All stored attributes are integers
//! (or exact `f64` bit patterns), so a save/load cycle is lossless and a
//! reloaded graph answers a fixed query set identically.

use std::io::{Read, Write};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::profile::SpeedProfiles;
use crate::{GraphResult, GraphStore, Link, Vertex};

/// The persisted portion of a [`GraphStore`].
#[derive(Serialize, Deserialize)]
struct GraphImage {
    vertices: Vec<Vertex>,
    links: Vec<Link>,
    energy: FxHashMap<String, Vec<f64>>,
    profiles: SpeedProfiles,
}

impl GraphStore {
    /// Write the store to `writer` in binary form.
    pub fn to_writer<W: Write>(&self, writer: W) -> GraphResult<()> {
        let image = GraphImage {
            vertices: self.vertices().to_vec(),
            links: self.links().to_vec(),
            energy: self.energy_tables().clone(),
            profiles: self.profiles().clone(),
        };
        bincode::serialize_into(writer, &image)?;
        Ok(())
    }

    /// Read a store previously written by [`to_writer`](Self::to_writer),
    /// rebuilding the adjacency index and spatial index.
    pub fn from_reader<R: Read>(reader: R) -> GraphResult<GraphStore> {
        let image: GraphImage = bincode::deserialize_from(reader)?;
        Ok(GraphStore::assemble(
            image.vertices,
            image.links,
            image.profiles,
            image.energy,
        ))
    }

    /// Persist to a file; see [`to_writer`](Self::to_writer).
    pub fn to_file(&self, path: &Path) -> GraphResult<()> {
        let file = std::fs::File::create(path)?;
        self.to_writer(std::io::BufWriter::new(file))
    }

    /// Reload from a file; see [`from_reader`](Self::from_reader).
    pub fn from_file(path: &Path) -> GraphResult<GraphStore> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}
