//! Live-entity registry.
//!
//! Attacker back-references are plain ids resolved against this registry, so
//! an entity removed from the simulation resolves to "no attacker" instead of
//! dangling. Cross-entity damage goes through [`EntityRegistry::apply_damage`],
//! which performs decrement, death check and loot transfer under a single
//! exclusive borrow.

use std::collections::BTreeMap;

use crate::entity::{EntityState, ResolvedActions, SpawnError, SpawnSpec};
use crate::env::{CombatOracle, Env, InventoryStore, MapOracle, SkillOracle};
use crate::error::{CoreError, ErrorSeverity};
use crate::state::EntityId;
use crate::table::{AttributeTable, TableError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("entity {0} is not registered")]
    EntityNotFound(EntityId),

    #[error("entity {0} is already registered")]
    DuplicateEntity(EntityId),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl CoreError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EntityNotFound(_) | Self::DuplicateEntity(_) => ErrorSeverity::Validation,
            Self::Spawn(err) => err.severity(),
            Self::Table(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EntityNotFound(_) => "REGISTRY_ENTITY_NOT_FOUND",
            Self::DuplicateEntity(_) => "REGISTRY_DUPLICATE_ENTITY",
            Self::Spawn(err) => err.error_code(),
            Self::Table(err) => err.error_code(),
        }
    }
}

/// Entities currently present in the simulation, keyed and iterated by id.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, EntityState>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns and registers a new entity.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateEntity`] if the id is already registered
    /// - [`RegistryError::Spawn`] if the spawn itself is rejected
    pub fn spawn<T, M, C, S>(
        &mut self,
        env: &Env<'_, M, C, S>,
        table: &mut T,
        spec: SpawnSpec,
    ) -> Result<EntityId, RegistryError>
    where
        T: AttributeTable + ?Sized,
        M: MapOracle + ?Sized,
        C: CombatOracle + ?Sized,
        S: SkillOracle + ?Sized,
    {
        let id = spec.id;
        if self.entities.contains_key(&id) {
            return Err(RegistryError::DuplicateEntity(id));
        }
        let entity = EntityState::spawn(env, table, spec)?;
        self.entities.insert(id, entity);
        Ok(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityState> {
        self.entities.values()
    }

    /// The entity's last attacker, if that attacker is still registered.
    pub fn resolve_attacker(&self, id: EntityId) -> Option<EntityId> {
        self.entities
            .get(&id)?
            .history()
            .last_attacker()
            .filter(|attacker| self.entities.contains_key(attacker))
    }

    /// Applies damage from `source` to `target`.
    ///
    /// A source that is no longer registered is treated as environmental
    /// damage. Returns the same flag as [`EntityState::apply_damage`].
    ///
    /// # Errors
    ///
    /// [`RegistryError::EntityNotFound`] if `target` is not registered.
    pub fn apply_damage<T, I>(
        &mut self,
        table: &mut T,
        inventory: &mut I,
        target: EntityId,
        source: Option<EntityId>,
        amount: u32,
    ) -> Result<bool, RegistryError>
    where
        T: AttributeTable + ?Sized,
        I: InventoryStore + ?Sized,
    {
        let source = source.filter(|id| self.entities.contains_key(id));
        let entity = self
            .entities
            .get_mut(&target)
            .ok_or(RegistryError::EntityNotFound(target))?;
        Ok(entity.apply_damage(table, inventory, source, amount)?)
    }

    /// Runs [`EntityState::update`] for one registered entity.
    pub fn update<T, M, C, S>(
        &mut self,
        id: EntityId,
        env: &Env<'_, M, C, S>,
        table: &mut T,
        actions: &ResolvedActions,
    ) -> Result<(), RegistryError>
    where
        T: AttributeTable + ?Sized,
        M: MapOracle + ?Sized,
        C: CombatOracle + ?Sized,
        S: SkillOracle + ?Sized,
    {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(RegistryError::EntityNotFound(id))?;
        Ok(entity.update(env, table, actions)?)
    }

    /// Unregisters an entity and tears down its attribute row.
    pub fn remove<T: AttributeTable + ?Sized>(
        &mut self,
        table: &mut T,
        id: EntityId,
    ) -> Result<EntityState, RegistryError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(RegistryError::EntityNotFound(id))?;
        table.remove_row(id)?;
        tracing::debug!(entity = %id, "entity removed");
        Ok(entity)
    }

    /// Removes every dead entity. Returns their ids in ascending order.
    pub fn remove_dead<T: AttributeTable + ?Sized>(
        &mut self,
        table: &mut T,
    ) -> Result<Vec<EntityId>, RegistryError> {
        let mut dead = Vec::new();
        for (&id, entity) in &self.entities {
            if !entity.is_alive(table)? {
                dead.push(id);
            }
        }
        for &id in &dead {
            self.remove(table, id)?;
        }
        Ok(dead)
    }
}
