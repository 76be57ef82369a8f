//! Traits describing the collaborators an entity reads but does not own.
//!
//! Oracles expose map geometry, combat geometry, and skill levels. The
//! [`Env`] aggregate bundles them with the [`EntityConfig`] so an entity update
//! can reach everything it needs without coupling to concrete
//! implementations. Inventories are mutable and external, so they are passed
//! separately as an [`InventoryStore`].
mod combat;
mod inventory;
mod map;
mod skills;

pub use combat::CombatOracle;
pub use inventory::{EquipmentSlot, EquipmentSummary, EquippedItem, InventoryStore, LootOutcome};
pub use map::{MapDimensions, MapOracle};
pub use skills::{SkillLevels, SkillOracle};

use crate::config::EntityConfig;

/// Aggregates the read-only collaborators required by an entity update.
pub struct Env<'a, M, C, S>
where
    M: MapOracle + ?Sized,
    C: CombatOracle + ?Sized,
    S: SkillOracle + ?Sized,
{
    config: &'a EntityConfig,
    map: &'a M,
    combat: &'a C,
    skills: &'a S,
}

/// Type-erased environment for callers that store oracles behind trait objects.
pub type EntityEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn CombatOracle + 'a, dyn SkillOracle + 'a>;

// Manual impls: a derive would demand `M: Clone`, which trait objects never satisfy.
impl<M, C, S> Clone for Env<'_, M, C, S>
where
    M: MapOracle + ?Sized,
    C: CombatOracle + ?Sized,
    S: SkillOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, C, S> Copy for Env<'_, M, C, S>
where
    M: MapOracle + ?Sized,
    C: CombatOracle + ?Sized,
    S: SkillOracle + ?Sized,
{
}

impl<'a, M, C, S> Env<'a, M, C, S>
where
    M: MapOracle + ?Sized,
    C: CombatOracle + ?Sized,
    S: SkillOracle + ?Sized,
{
    pub fn new(config: &'a EntityConfig, map: &'a M, combat: &'a C, skills: &'a S) -> Self {
        Self {
            config,
            map,
            combat,
            skills,
        }
    }

    pub fn config(&self) -> &'a EntityConfig {
        self.config
    }

    pub fn map(&self) -> &'a M {
        self.map
    }

    pub fn combat(&self) -> &'a C {
        self.combat
    }

    pub fn skills(&self) -> &'a S {
        self.skills
    }
}
