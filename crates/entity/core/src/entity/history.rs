use super::actions::{AttackRecord, ResolvedActions};
use crate::state::{EntityId, Position};
use crate::table::{AttributeCell, AttributeKind, AttributeTable, CellInit, TableError};

/// Rolling per-entity history: damage taken this tick, exploration, lifetime.
///
/// `last_attacker` is a weak reference by id; resolve it through
/// [`EntityRegistry::resolve_attacker`](crate::EntityRegistry::resolve_attacker).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryTracker {
    damage: AttributeCell,
    time_alive: AttributeCell,
    exploration: u32,
    last_attacker: Option<EntityId>,
    attack: Option<AttackRecord>,
    actions: Option<ResolvedActions>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryPacket {
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(rename = "timeAlive"))]
    pub time_alive: u64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub attack: Option<AttackRecord>,
}

impl HistoryTracker {
    pub fn new(entity: EntityId) -> Self {
        Self {
            damage: AttributeCell::new(entity, AttributeKind::Damage),
            time_alive: AttributeCell::new(entity, AttributeKind::TimeAlive),
            exploration: 0,
            last_attacker: None,
            attack: None,
            actions: None,
        }
    }

    pub(crate) fn initial_cells() -> [CellInit; 2] {
        [
            CellInit::new(AttributeKind::Damage, 0),
            CellInit::new(AttributeKind::TimeAlive, 0),
        ]
    }

    /// Resets the per-tick damage record, extends the exploration maximum,
    /// and counts the tick as survived.
    pub fn update<T: AttributeTable + ?Sized>(
        &mut self,
        table: &mut T,
        position: Position,
        spawn: Position,
        actions: &ResolvedActions,
    ) -> Result<(), TableError> {
        self.damage.set(table, 0)?;
        self.last_attacker = None;
        self.attack = None;
        self.actions = Some(actions.clone());

        self.exploration = self.exploration.max(position.l1_distance(spawn));

        self.time_alive.increment(table, 1)?;
        Ok(())
    }

    /// Records a damage event. Called from the damage path, never from `update`.
    pub fn record_damage<T: AttributeTable + ?Sized>(
        &mut self,
        table: &mut T,
        amount: u32,
        attacker: Option<EntityId>,
    ) -> Result<(), TableError> {
        self.damage.set(table, i64::from(amount))?;
        self.last_attacker = attacker;
        Ok(())
    }

    pub fn record_attack(&mut self, attack: AttackRecord) {
        self.attack = Some(attack);
    }

    pub(crate) fn clear_attacker(&mut self) {
        self.last_attacker = None;
    }

    pub fn damage<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<u32, TableError> {
        Ok(self.damage.get(table)? as u32)
    }

    pub fn time_alive<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<u64, TableError> {
        Ok(self.time_alive.get(table)? as u64)
    }

    /// Largest L1 distance from spawn reached so far.
    pub fn exploration(&self) -> u32 {
        self.exploration
    }

    /// Raw attacker id; may name an entity that has since been removed.
    pub fn last_attacker(&self) -> Option<EntityId> {
        self.last_attacker
    }

    pub fn attack(&self) -> Option<&AttackRecord> {
        self.attack.as_ref()
    }

    pub fn last_actions(&self) -> Option<&ResolvedActions> {
        self.actions.as_ref()
    }

    /// Committed damage and lifetime for observers.
    ///
    /// `attack` is not table-backed: it is the record held since the last
    /// update, cleared by the next one.
    pub fn packet<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<HistoryPacket, TableError> {
        Ok(HistoryPacket {
            damage: self.damage.packet(table)?.val as u32,
            time_alive: self.time_alive.packet(table)?.val as u64,
            attack: self.attack,
        })
    }
}
