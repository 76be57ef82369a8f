use crate::state::EntityId;

/// Skill/leveling oracle that supplies the food and water caps.
///
/// Levels are read every tick and may move in either direction.
pub trait SkillOracle {
    fn food_level(&self, entity: EntityId) -> u32;
    fn water_level(&self, entity: EntityId) -> u32;

    fn levels(&self, entity: EntityId) -> SkillLevels {
        SkillLevels {
            food: self.food_level(entity),
            water: self.water_level(entity),
        }
    }
}

/// Snapshot of the skill levels relevant to resource caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillLevels {
    pub food: u32,
    pub water: u32,
}

impl SkillLevels {
    pub const fn new(food: u32, water: u32) -> Self {
        Self { food, water }
    }
}

/// Every entity shares the same levels.
impl SkillOracle for SkillLevels {
    fn food_level(&self, _entity: EntityId) -> u32 {
        self.food
    }

    fn water_level(&self, _entity: EntityId) -> u32 {
        self.water
    }
}
