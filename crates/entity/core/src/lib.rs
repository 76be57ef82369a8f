//! Deterministic per-tick entity state model.
//!
//! `entity-core` tracks each simulated agent's vital resources, timed status
//! effects, identity and rolling history, and defines the ordered transition
//! every living entity goes through once per tick. Attribute values live in a
//! shared [`AttributeTable`] so observers can read a consistent snapshot after
//! each tick; skills, inventories and combat geometry are reached through the
//! collaborator traits in [`env`].
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod registry;
pub mod state;
pub mod table;

pub use config::{ConfigError, EntityConfig};
pub use entity::{
    AttackRecord, AttackStyle, BasePacket, EntityPacket, EntityState, FullEntityPacket,
    HistoryPacket, HistoryTracker, Identity, ResolvedActions, ResourcePool, ResourceTick,
    ResourcesPacket, SpawnError, SpawnSpec, StatusEffects, StatusPacket,
};
pub use env::{
    CombatOracle, EntityEnv, Env, EquipmentSlot, EquipmentSummary, EquippedItem, InventoryStore,
    LootOutcome, MapDimensions, MapOracle, SkillLevels, SkillOracle,
};
pub use error::{CoreError, ErrorSeverity};
pub use registry::{EntityRegistry, RegistryError};
pub use state::{Color, EntityId, EntityKind, ItemHandle, ItemStack, PopulationId, Position};
pub use table::{
    AttributeCell, AttributeKind, AttributeMask, AttributeTable, CellInit, CellPacket, DataFrame,
    RowChange, TableCommit, TableError,
};
