//! Per-agent entity state and its tick transition.
//!
//! [`EntityState`] composes four components, each backed by cells in the
//! shared attribute table:
//! - [`Identity`]: name, color, population, position
//! - [`StatusEffects`]: wilderness level, immunity and freeze timers
//! - [`ResourcePool`]: health, food, water
//! - [`HistoryTracker`]: damage this tick, exploration, time alive
//!
//! # Tick Pipeline
//!
//! 1. The driver calls [`EntityState::update`] once per living entity.
//! 2. Combat calls [`EntityState::apply_damage`] (usually through
//!    [`EntityRegistry::apply_damage`](crate::EntityRegistry::apply_damage)).
//! 3. The driver commits the attribute table for observers.
//!
//! Damage dealt in step 2 is published by the commit of the same tick. The
//! next tick's update sees it in the attacker check and then resets it, so
//! combat always strictly precedes the update that evaluates it.

mod actions;
mod history;
mod identity;
mod packet;
mod resources;
mod status;

pub use actions::{AttackRecord, AttackStyle, ResolvedActions};
pub use history::{HistoryPacket, HistoryTracker};
pub use identity::{BasePacket, Identity};
pub use packet::{EntityPacket, FullEntityPacket};
pub use resources::{ResourcePool, ResourceTick, ResourcesPacket};
pub use status::{StatusEffects, StatusPacket};

use crate::env::{CombatOracle, Env, InventoryStore, MapOracle, SkillOracle};
use crate::error::{CoreError, ErrorSeverity};
use crate::state::{Color, EntityId, EntityKind, PopulationId, Position};
use crate::table::{AttributeTable, CellInit, TableError};

/// Blueprint for a newly spawned entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnSpec {
    pub id: EntityId,
    pub position: Position,
    pub name: String,
    pub color: Color,
    pub population: PopulationId,
    pub kind: EntityKind,
    pub is_self: bool,
}

impl SpawnSpec {
    pub fn new(id: EntityId, position: Position) -> Self {
        Self {
            id,
            position,
            name: "Entity".to_string(),
            color: Color::default(),
            population: PopulationId::default(),
            kind: EntityKind::Player,
            is_self: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_population(mut self, population: PopulationId) -> Self {
        self.population = population;
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_self_flag(mut self, is_self: bool) -> Self {
        self.is_self = is_self;
        self
    }
}

/// Errors raised while spawning an entity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("spawn position {0} is outside the map")]
    PositionOutOfBounds(Position),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl CoreError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PositionOutOfBounds(_) => ErrorSeverity::Validation,
            Self::Table(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PositionOutOfBounds(_) => "SPAWN_POSITION_OUT_OF_BOUNDS",
            Self::Table(err) => err.error_code(),
        }
    }
}

/// Complete state of one simulated agent.
///
/// An entity is alive while its health is above zero. Death is irreversible:
/// callers must stop updating an entity once [`EntityState::is_alive`] is false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityState {
    id: EntityId,
    spawn_position: Position,
    identity: Identity,
    status: StatusEffects,
    resources: ResourcePool,
    history: HistoryTracker,
}

impl EntityState {
    /// Creates the entity and initialises its attribute row.
    ///
    /// Health starts at `config.base_health`; food and water start full at the
    /// entity's current skill levels.
    ///
    /// # Errors
    ///
    /// - [`SpawnError::PositionOutOfBounds`] if the map does not contain the position
    /// - [`SpawnError::Table`] if the table already holds a row for this id
    pub fn spawn<T, M, C, S>(
        env: &Env<'_, M, C, S>,
        table: &mut T,
        spec: SpawnSpec,
    ) -> Result<Self, SpawnError>
    where
        T: AttributeTable + ?Sized,
        M: MapOracle + ?Sized,
        C: CombatOracle + ?Sized,
        S: SkillOracle + ?Sized,
    {
        if !env.map().contains(spec.position) {
            return Err(SpawnError::PositionOutOfBounds(spec.position));
        }

        let config = env.config();
        let skills = env.skills().levels(spec.id);
        let wilderness = env.combat().wilderness(config, spec.position);

        let cells: Vec<CellInit> = Identity::initial_cells(spec.position, spec.population, spec.is_self)
            .into_iter()
            .chain(ResourcePool::initial_cells(config.base_health, skills.food, skills.water))
            .chain(StatusEffects::initial_cells(wilderness))
            .chain(HistoryTracker::initial_cells())
            .collect();
        table.init_row(spec.id, &cells)?;

        tracing::debug!(entity = %spec.id, position = %spec.position, "entity spawned");

        Ok(Self {
            id: spec.id,
            spawn_position: spec.position,
            identity: Identity::new(spec.id, &spec.name, spec.color, spec.kind, config.vision),
            status: StatusEffects::new(spec.id),
            resources: ResourcePool::new(spec.id),
            history: HistoryTracker::new(spec.id),
        })
    }

    /// Advances the entity by one tick.
    ///
    /// Order is fixed:
    /// 1. Drop the last attacker if no damage arrived since the previous update
    /// 2. Identity (movement)
    /// 3. Status effects
    /// 4. Resources
    /// 5. History, so exploration and time alive see the post-movement state
    pub fn update<T, M, C, S>(
        &mut self,
        env: &Env<'_, M, C, S>,
        table: &mut T,
        actions: &ResolvedActions,
    ) -> Result<(), TableError>
    where
        T: AttributeTable + ?Sized,
        M: MapOracle + ?Sized,
        C: CombatOracle + ?Sized,
        S: SkillOracle + ?Sized,
    {
        debug_assert!(self.is_alive(table)?, "update called on dead entity {}", self.id);

        if self.history.damage(table)? == 0 {
            self.history.clear_attacker();
        }

        self.identity.update(table, env.map(), actions)?;
        let position = self.identity.position(table)?;

        self.status
            .update(table, position, env.combat(), env.config())?;

        let config = env.config();
        let skills = env.skills().levels(self.id);
        self.resources.update(
            table,
            skills.water,
            skills.food,
            config.health_restore,
            config.health_regen_threshold,
        )?;

        self.history
            .update(table, position, self.spawn_position, actions)
    }

    /// Applies `amount` damage from `source` and hands loot to the killer.
    ///
    /// Returns `false` when this hit killed the entity and the kill is
    /// attributed to a source, so the caller can stop follow-up effects.
    /// Environmental deaths (`source == None`) return `true`.
    ///
    /// Damage to an already-dead entity only updates the history record.
    ///
    /// # Panics
    ///
    /// If `source` is this entity.
    pub fn apply_damage<T, I>(
        &mut self,
        table: &mut T,
        inventory: &mut I,
        source: Option<EntityId>,
        amount: u32,
    ) -> Result<bool, TableError>
    where
        T: AttributeTable + ?Sized,
        I: InventoryStore + ?Sized,
    {
        assert_ne!(source, Some(self.id), "entity {} cannot damage itself", self.id);

        self.history.record_damage(table, amount, source)?;
        self.resources.health().decrement(table, i64::from(amount))?;

        if self.is_alive(table)? {
            return Ok(true);
        }
        let Some(killer) = source else {
            tracing::debug!(entity = %self.id, "entity died without attributable source");
            return Ok(true);
        };

        let outcome = inventory.transfer_all(self.id, killer);
        tracing::debug!(
            entity = %self.id,
            killer = %killer,
            stacks = outcome.received,
            "entity killed, loot transferred"
        );
        if !outcome.is_complete() {
            tracing::warn!(
                killer = %killer,
                dropped = outcome.dropped.len(),
                "killer inventory full, loot discarded"
            );
        }
        Ok(false)
    }

    /// Stores the attack this entity performed during the current tick.
    pub fn record_attack(&mut self, attack: AttackRecord) {
        self.history.record_attack(attack);
    }

    pub fn is_alive<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<bool, TableError> {
        Ok(!self.resources.health().is_empty(table)?)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn spawn_position(&self) -> Position {
        self.spawn_position
    }

    pub fn position<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<Position, TableError> {
        self.identity.position(table)
    }

    pub fn is_player(&self) -> bool {
        self.identity.kind() == EntityKind::Player
    }

    pub fn is_npc(&self) -> bool {
        self.identity.kind() == EntityKind::Npc
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn status(&self) -> &StatusEffects {
        &self.status
    }

    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    /// Observation packet with the stable `{status, history, equipment, alive}` layout.
    ///
    /// Table columns are read from the committed layer, so a packet taken
    /// mid-tick still describes the previous tick.
    pub fn packet<T, I>(&self, table: &T, inventory: &I) -> Result<EntityPacket, TableError>
    where
        T: AttributeTable + ?Sized,
        I: InventoryStore + ?Sized,
    {
        Ok(EntityPacket {
            status: self.status.packet(table)?,
            history: self.history.packet(table)?,
            equipment: inventory.equipment(self.id),
            alive: self.resources.health().packet(table)?.val > 0,
        })
    }

    /// [`Self::packet`] extended with identity and resource columns.
    pub fn full_packet<T, I>(&self, table: &T, inventory: &I) -> Result<FullEntityPacket, TableError>
    where
        T: AttributeTable + ?Sized,
        I: InventoryStore + ?Sized,
    {
        Ok(FullEntityPacket {
            base: self.identity.packet(table)?,
            resources: self.resources.packet(table)?,
            entity: self.packet(table, inventory)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::EntityConfig;
    use crate::env::{EquipmentSummary, LootOutcome, MapDimensions, SkillLevels};
    use crate::state::{ItemHandle, ItemStack};
    use crate::table::DataFrame;

    const A: EntityId = EntityId(1);
    const B: EntityId = EntityId(2);

    #[derive(Default)]
    struct Bags(BTreeMap<EntityId, Vec<ItemStack>>);

    impl InventoryStore for Bags {
        fn items(&self, entity: EntityId) -> Vec<ItemStack> {
            self.0.get(&entity).cloned().unwrap_or_default()
        }

        fn take_all(&mut self, entity: EntityId) -> Vec<ItemStack> {
            self.0.remove(&entity).unwrap_or_default()
        }

        fn receive_loot(&mut self, entity: EntityId, items: Vec<ItemStack>) -> LootOutcome {
            let received = items.len();
            self.0.entry(entity).or_default().extend(items);
            LootOutcome {
                received,
                dropped: Vec::new(),
            }
        }

        fn equipment(&self, _entity: EntityId) -> EquipmentSummary {
            EquipmentSummary::empty()
        }
    }

    fn safe_zone(_: &EntityConfig, _: Position) -> i32 {
        -1
    }

    struct Fixture {
        config: EntityConfig,
        map: MapDimensions,
        skills: SkillLevels,
        table: DataFrame,
        bags: Bags,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: EntityConfig::default(),
                map: MapDimensions::new(16, 16),
                skills: SkillLevels::new(10, 10),
                table: DataFrame::new(),
                bags: Bags::default(),
            }
        }

        fn spawn(&mut self, id: EntityId, position: Position) -> EntityState {
            let env = Env::new(&self.config, &self.map, &safe_zone, &self.skills);
            EntityState::spawn(&env, &mut self.table, SpawnSpec::new(id, position)).unwrap()
        }

        fn update(&mut self, entity: &mut EntityState, actions: &ResolvedActions) {
            let env = Env::new(&self.config, &self.map, &safe_zone, &self.skills);
            entity.update(&env, &mut self.table, actions).unwrap();
        }
    }

    #[test]
    fn spawn_fills_pools_from_config_and_skills() {
        let mut fx = Fixture::new();
        let entity = fx.spawn(A, Position::new(4, 4));
        assert_eq!(
            entity.full_packet(&fx.table, &fx.bags).unwrap_err(),
            TableError::NotCommitted(A)
        );

        fx.table.commit();
        let packet = entity.full_packet(&fx.table, &fx.bags).unwrap();

        assert_eq!(packet.resources.health.val, 10);
        assert_eq!(packet.resources.health.max, Some(10));
        assert_eq!(packet.resources.food.val, 10);
        assert_eq!(packet.resources.water.val, 10);
        assert_eq!(packet.entity.status.wilderness, -1);
        assert_eq!(packet.base.name, "Entity1");
        assert!(packet.entity.alive);
    }

    #[test]
    fn spawn_rejects_out_of_bounds_position() {
        let mut fx = Fixture::new();
        let env = Env::new(&fx.config, &fx.map, &safe_zone, &fx.skills);
        let err = EntityState::spawn(&env, &mut fx.table, SpawnSpec::new(A, Position::new(16, 0)))
            .unwrap_err();
        assert_eq!(err, SpawnError::PositionOutOfBounds(Position::new(16, 0)));
        assert!(!fx.table.contains_row(A));
    }

    #[test]
    fn lethal_hit_transfers_loot_and_reports_death() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));
        fx.spawn(B, Position::new(1, 2));
        a.resources().health().set(&mut fx.table, 1).unwrap();
        fx.bags.0.insert(
            A,
            vec![ItemStack::new(ItemHandle(1), 3), ItemStack::new(ItemHandle(2), 1)],
        );
        fx.bags.0.insert(B, vec![ItemStack::new(ItemHandle(9), 1)]);

        let survived = a.apply_damage(&mut fx.table, &mut fx.bags, Some(B), 5).unwrap();

        assert!(!survived);
        assert!(!a.is_alive(&fx.table).unwrap());
        assert_eq!(a.resources().health().get(&fx.table).unwrap(), 0);
        assert!(fx.bags.items(A).is_empty());
        assert_eq!(
            fx.bags.items(B),
            vec![
                ItemStack::new(ItemHandle(9), 1),
                ItemStack::new(ItemHandle(1), 3),
                ItemStack::new(ItemHandle(2), 1),
            ]
        );
    }

    #[test]
    fn environmental_death_keeps_inventory() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));
        fx.bags.0.insert(A, vec![ItemStack::new(ItemHandle(1), 1)]);

        let survived = a.apply_damage(&mut fx.table, &mut fx.bags, None, 50).unwrap();

        assert!(survived);
        assert!(!a.is_alive(&fx.table).unwrap());
        assert_eq!(fx.bags.items(A).len(), 1);
    }

    #[test]
    fn non_lethal_hit_records_history() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));

        let survived = a.apply_damage(&mut fx.table, &mut fx.bags, Some(B), 3).unwrap();

        assert!(survived);
        assert_eq!(a.resources().health().get(&fx.table).unwrap(), 7);
        assert_eq!(a.history().damage(&fx.table).unwrap(), 3);
        assert_eq!(a.history().last_attacker(), Some(B));
    }

    #[test]
    fn damage_to_dead_entity_only_touches_history() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));
        a.apply_damage(&mut fx.table, &mut fx.bags, None, 10).unwrap();

        a.apply_damage(&mut fx.table, &mut fx.bags, None, 4).unwrap();

        assert_eq!(a.resources().health().get(&fx.table).unwrap(), 0);
        assert_eq!(a.history().damage(&fx.table).unwrap(), 4);
    }

    #[test]
    #[should_panic(expected = "cannot damage itself")]
    fn self_damage_is_a_contract_violation() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));
        let _ = a.apply_damage(&mut fx.table, &mut fx.bags, Some(A), 1);
    }

    #[test]
    fn attacker_cleared_when_no_damage_entering_update() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));
        a.history.record_damage(&mut fx.table, 0, Some(B)).unwrap();
        assert_eq!(a.history().last_attacker(), Some(B));

        fx.update(&mut a, &ResolvedActions::idle());

        assert_eq!(a.history().last_attacker(), None);
    }

    #[test]
    fn update_runs_history_after_movement() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(5, 5));

        fx.update(&mut a, &ResolvedActions::move_to(Position::new(7, 6)));

        assert_eq!(a.position(&fx.table).unwrap(), Position::new(7, 6));
        assert_eq!(a.history().exploration(), 3);
        assert_eq!(a.history().time_alive(&fx.table).unwrap(), 1);
        assert_eq!(a.spawn_position(), Position::new(5, 5));
    }

    #[test]
    fn update_follows_skill_levels() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(5, 5));
        fx.skills = SkillLevels::new(4, 12);

        fx.update(&mut a, &ResolvedActions::idle());

        assert_eq!(a.resources().food().max(&fx.table).unwrap(), Some(4));
        assert_eq!(a.resources().food().get(&fx.table).unwrap(), 4);
        assert_eq!(a.resources().water().max(&fx.table).unwrap(), Some(12));
    }

    #[test]
    fn packet_alive_tracks_health() {
        let mut fx = Fixture::new();
        let mut a = fx.spawn(A, Position::new(1, 1));
        fx.table.commit();
        assert!(a.packet(&fx.table, &fx.bags).unwrap().alive);

        a.apply_damage(&mut fx.table, &mut fx.bags, None, 9).unwrap();
        fx.table.commit();
        assert!(a.packet(&fx.table, &fx.bags).unwrap().alive);

        a.apply_damage(&mut fx.table, &mut fx.bags, None, 1).unwrap();
        assert!(a.packet(&fx.table, &fx.bags).unwrap().alive);
        fx.table.commit();
        assert!(!a.packet(&fx.table, &fx.bags).unwrap().alive);
    }

    #[test]
    fn npc_kind_is_reported() {
        let mut fx = Fixture::new();
        let env = Env::new(&fx.config, &fx.map, &safe_zone, &fx.skills);
        let npc = EntityState::spawn(
            &env,
            &mut fx.table,
            SpawnSpec::new(A, Position::ORIGIN).with_kind(EntityKind::Npc),
        )
        .unwrap();
        assert!(npc.is_npc());
        assert!(!npc.is_player());
        assert_eq!(npc.identity().vision(), EntityConfig::DEFAULT_VISION);
    }
}
