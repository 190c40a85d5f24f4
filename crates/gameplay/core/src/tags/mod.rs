//! Hierarchical gameplay tags.
//!
//! # Design
//!
//! Tags live in an arena ([`TagRegistry`]) and refer to their parent by
//! [`TagId`]. The registry is built at authoring time, then frozen behind an
//! `Arc` by the world and shared by every [`TagContainer`].
//!
//! Hierarchy queries run in the direction "held tag descends from queried
//! tag": a container holding `Status.Burning` satisfies a requirement for
//! `Status`, never the reverse.

mod container;
mod error;
mod registry;
mod requirements;

pub use container::{TagContainer, TagListener};
pub use error::TagError;
pub use registry::{TagId, TagRegistry};
pub use requirements::TagRequirements;
