//! Data-driven content for the entity model.
//!
//! This crate provides:
//! - Reference oracles for wilderness geometry, skill levels and inventories
//! - A TOML loader for entity and wilderness configuration
//!
//! The core crate only sees these through its collaborator traits.

pub mod oracle;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use oracle::{CenterWilderness, Inventories, Inventory, SkillTable, WildernessConfig};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, SimulationConfig};
