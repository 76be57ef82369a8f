//! Timed status effects and the derived wilderness level.
//!
//! Immunity and freeze are countdown timers: they are granted by combat or
//! item systems and this component only decays them, one per tick, holding at
//! zero. The wilderness level carries no state of its own; it is recomputed
//! from the current position every tick.

use crate::config::EntityConfig;
use crate::env::CombatOracle;
use crate::state::{EntityId, Position};
use crate::table::{AttributeCell, AttributeKind, AttributeTable, CellInit, TableError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusEffects {
    wilderness: AttributeCell,
    immune: AttributeCell,
    freeze: AttributeCell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusPacket {
    pub wilderness: i32,
    pub immune: u32,
    pub freeze: u32,
}

impl StatusEffects {
    pub fn new(entity: EntityId) -> Self {
        Self {
            wilderness: AttributeCell::new(entity, AttributeKind::Wilderness),
            immune: AttributeCell::new(entity, AttributeKind::Immune),
            freeze: AttributeCell::new(entity, AttributeKind::Freeze),
        }
    }

    pub(crate) fn initial_cells(wilderness: i32) -> [CellInit; 3] {
        [
            CellInit::new(AttributeKind::Wilderness, i64::from(wilderness)),
            CellInit::new(AttributeKind::Immune, 0),
            CellInit::new(AttributeKind::Freeze, 0),
        ]
    }

    /// Decays both timers by one and refreshes the wilderness level.
    pub fn update<T, C>(
        &self,
        table: &mut T,
        position: Position,
        combat: &C,
        config: &EntityConfig,
    ) -> Result<(), TableError>
    where
        T: AttributeTable + ?Sized,
        C: CombatOracle + ?Sized,
    {
        self.immune.decrement(table, 1)?;
        self.freeze.decrement(table, 1)?;

        let wilderness = combat.wilderness(config, position);
        self.wilderness.set(table, i64::from(wilderness))
    }

    /// Grants damage immunity for at least `ticks` more ticks.
    pub fn grant_immunity<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        ticks: u32,
    ) -> Result<(), TableError> {
        extend(self.immune, table, ticks)
    }

    /// Freezes movement for at least `ticks` more ticks.
    pub fn freeze_for<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        ticks: u32,
    ) -> Result<(), TableError> {
        extend(self.freeze, table, ticks)
    }

    pub fn wilderness<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<i32, TableError> {
        Ok(self.wilderness.get(table)? as i32)
    }

    pub fn immune_ticks<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<u32, TableError> {
        Ok(self.immune.get(table)? as u32)
    }

    pub fn freeze_ticks<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<u32, TableError> {
        Ok(self.freeze.get(table)? as u32)
    }

    pub fn is_immune<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<bool, TableError> {
        Ok(self.immune_ticks(table)? > 0)
    }

    pub fn is_frozen<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<bool, TableError> {
        Ok(self.freeze_ticks(table)? > 0)
    }

    /// Committed snapshot for observers.
    pub fn packet<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<StatusPacket, TableError> {
        Ok(StatusPacket {
            wilderness: self.wilderness.packet(table)?.val as i32,
            immune: self.immune.packet(table)?.val as u32,
            freeze: self.freeze.packet(table)?.val as u32,
        })
    }
}

fn extend<T: AttributeTable + ?Sized>(
    cell: AttributeCell,
    table: &mut T,
    ticks: u32,
) -> Result<(), TableError> {
    let current = cell.get(table)?;
    cell.set(table, current.max(i64::from(ticks)))
}
