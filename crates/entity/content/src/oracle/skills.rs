//! Skill oracle backed by per-entity levels.

use std::collections::HashMap;

use entity_core::{EntityId, SkillLevels, SkillOracle};

/// Per-entity food and water levels with a shared fallback.
///
/// Entities without an explicit entry report the default levels.
#[derive(Clone, Debug)]
pub struct SkillTable {
    default: SkillLevels,
    levels: HashMap<EntityId, SkillLevels>,
}

impl SkillTable {
    pub const DEFAULT_LEVEL: u32 = 10;

    pub fn new(default: SkillLevels) -> Self {
        Self {
            default,
            levels: HashMap::new(),
        }
    }

    /// Sets both levels for an entity, replacing any previous entry.
    pub fn set(&mut self, entity: EntityId, levels: SkillLevels) {
        self.levels.insert(entity, levels);
    }

    /// Raises the food level by one, starting from the default if unset.
    pub fn level_up_food(&mut self, entity: EntityId) -> u32 {
        let default = self.default;
        let entry = self.levels.entry(entity).or_insert(default);
        entry.food = entry.food.saturating_add(1);
        entry.food
    }

    pub fn level_up_water(&mut self, entity: EntityId) -> u32 {
        let default = self.default;
        let entry = self.levels.entry(entity).or_insert(default);
        entry.water = entry.water.saturating_add(1);
        entry.water
    }

    /// Forgets an entity's levels, e.g. after it was removed from the simulation.
    pub fn remove(&mut self, entity: EntityId) -> Option<SkillLevels> {
        self.levels.remove(&entity)
    }
}

impl Default for SkillTable {
    fn default() -> Self {
        Self::new(SkillLevels::new(Self::DEFAULT_LEVEL, Self::DEFAULT_LEVEL))
    }
}

impl SkillOracle for SkillTable {
    fn food_level(&self, entity: EntityId) -> u32 {
        self.levels.get(&entity).unwrap_or(&self.default).food
    }

    fn water_level(&self, entity: EntityId) -> u32 {
        self.levels.get(&entity).unwrap_or(&self.default).water
    }
}
