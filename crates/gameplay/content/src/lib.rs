//! Loaders for host-supplied authoring data.
//!
//! This crate reads RON/TOML files into gameplay-core types:
//! - Gameplay configuration (TOML)
//! - Tag trees (RON)
//! - Per-archetype starting stats (RON)
//!
//! Effect and ability definitions carry strategy objects and are built in
//! code by the host; only plain data goes through files.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadedTags, StatsLoader, TagLoader};
