//! Vital resource pools: health, food, water.
//!
//! Food and water caps follow the entity's skill levels and are refreshed
//! every tick. Health regenerates only while both food and water sit above the
//! regeneration threshold, and each empty pool costs one health per tick.

use crate::state::EntityId;
use crate::table::{AttributeCell, AttributeKind, AttributeTable, CellInit, CellPacket, TableError};

/// Health/food/water cells of one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourcePool {
    health: AttributeCell,
    food: AttributeCell,
    water: AttributeCell,
}

/// Net health movement produced by one [`ResourcePool::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceTick {
    /// Health restored by regeneration, after clamping.
    pub restored: i64,
    /// Health lost to empty food and water pools (0, 1 or 2), after clamping.
    pub starved: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcesPacket {
    pub health: CellPacket,
    pub food: CellPacket,
    pub water: CellPacket,
}

impl ResourcePool {
    pub fn new(entity: EntityId) -> Self {
        Self {
            health: AttributeCell::new(entity, AttributeKind::Health),
            food: AttributeCell::new(entity, AttributeKind::Food),
            water: AttributeCell::new(entity, AttributeKind::Water),
        }
    }

    /// Spawn values: every pool starts full.
    pub(crate) fn initial_cells(max_health: u32, max_food: u32, max_water: u32) -> [CellInit; 3] {
        let (health, food, water) = (
            i64::from(max_health),
            i64::from(max_food),
            i64::from(max_water),
        );
        [
            CellInit::bounded(AttributeKind::Health, health, health),
            CellInit::bounded(AttributeKind::Food, food, food),
            CellInit::bounded(AttributeKind::Water, water, water),
        ]
    }

    pub fn health(&self) -> AttributeCell {
        self.health
    }

    pub fn food(&self) -> AttributeCell {
        self.food
    }

    pub fn water(&self) -> AttributeCell {
        self.water
    }

    /// Applies one tick of cap refresh, regeneration and starvation.
    ///
    /// Fractions outside `[0, 1]` are a caller contract violation; validated
    /// configuration never produces them.
    pub fn update<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        max_water: u32,
        max_food: u32,
        health_restore: f64,
        regen_threshold: f64,
    ) -> Result<ResourceTick, TableError> {
        debug_assert!((0.0..=1.0).contains(&health_restore));
        debug_assert!((0.0..=1.0).contains(&regen_threshold));

        self.water.set_max(table, i64::from(max_water))?;
        self.food.set_max(table, i64::from(max_food))?;

        let food_ok = above_threshold(self.food.get(table)?, max_food, regen_threshold);
        let water_ok = above_threshold(self.water.get(table)?, max_water, regen_threshold);

        let mut tick = ResourceTick::default();
        let before = self.health.get(table)?;

        if food_ok && water_ok {
            let health_max = self.health.max(table)?.unwrap_or(before);
            let restore = (health_max as f64 * health_restore).floor() as i64;
            let after = self.health.increment(table, restore)?;
            tick.restored = after - before;
        }

        let fed = self.health.get(table)?;
        if self.food.is_empty(table)? {
            self.health.decrement(table, 1)?;
        }
        if self.water.is_empty(table)? {
            self.health.decrement(table, 1)?;
        }
        tick.starved = fed - self.health.get(table)?;

        if tick.restored > 0 || tick.starved > 0 {
            tracing::trace!(
                entity = %self.health.entity(),
                restored = tick.restored,
                starved = tick.starved,
                "resource tick"
            );
        }
        Ok(tick)
    }

    /// Committed pools for observers.
    pub fn packet<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<ResourcesPacket, TableError> {
        Ok(ResourcesPacket {
            health: self.health.packet(table)?,
            food: self.food.packet(table)?,
            water: self.water.packet(table)?,
        })
    }
}

fn above_threshold(value: i64, max: u32, threshold: f64) -> bool {
    value as f64 > threshold * f64::from(max)
}
