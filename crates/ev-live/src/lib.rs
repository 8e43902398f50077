//! Live speed updates over an `ev-graph` store.
//!
//! | Module   | Contents                                            |
//! |----------|-----------------------------------------------------|
//! | `update` | [`LiveGraph`], [`LinkUpdate`], snapshot publication |
//! | `error`  | [`UpdateError`]                                     |
//!
//! A [`LiveGraph`] owns the authoritative graph pointer.  Traffic-feed
//! batches are applied to a private clone and published atomically, so
//! search engines always work against a consistent immutable snapshot.

mod error;
mod update;

pub use error::{UpdateError, UpdateResult};
pub use update::{LinkUpdate, LiveGraph, UpdateOutcome};

#[cfg(test)]
mod tests;
