//! Data-driven agent archetypes.
//!
//! This crate houses the archetype catalog and the loaders that read it from
//! RON:
//! - Named agent tunings (health, ranges, detectors, fallback, protection)
//! - An embedded default catalog (`data/archetypes.ron`)
//!
//! Content is consumed when agents are spawned and never appears in
//! per-agent state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ArchetypeCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{ArchetypeLoader, LoadResult};
