//! Bounded in-memory inventories.

use std::collections::HashMap;

use arrayvec::ArrayVec;
use entity_core::{
    EntityConfig, EntityId, EquipmentSummary, EquippedItem, InventoryStore, ItemStack,
    LootOutcome,
};

/// One entity's bag and worn equipment.
///
/// Equipped items are references into the bag: equipping requires the item to
/// be held, and emptying the bag unequips everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    items: ArrayVec<ItemStack, { EntityConfig::MAX_INVENTORY_SLOTS }>,
    equipment: EquipmentSummary,
}

impl Inventory {
    pub fn items(&self) -> &[ItemStack] {
        &self.items
    }

    pub fn equipment(&self) -> &EquipmentSummary {
        &self.equipment
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Adds a stack, merging into an existing stack of the same item.
    ///
    /// Returns the stack back if no slot can hold it.
    pub fn add(&mut self, stack: ItemStack) -> Result<(), ItemStack> {
        if let Some(existing) = self.items.iter_mut().find(|s| s.handle == stack.handle)
            && let Some(quantity) = existing.quantity.checked_add(stack.quantity)
        {
            existing.quantity = quantity;
            return Ok(());
        }
        self.items.try_push(stack).map_err(|err| err.element())
    }

    /// Equips a held item. Returns `false` if the item is not in the bag.
    pub fn equip(&mut self, item: EquippedItem) -> bool {
        if !self.items.iter().any(|s| s.handle == item.item) {
            return false;
        }
        self.equipment.equip(item);
        true
    }

    fn drain(&mut self) -> Vec<ItemStack> {
        self.equipment = EquipmentSummary::empty();
        self.items.drain(..).collect()
    }
}

/// [`InventoryStore`] holding every entity's inventory in memory.
#[derive(Clone, Debug, Default)]
pub struct Inventories {
    inventories: HashMap<EntityId, Inventory>,
}

impl Inventories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: EntityId) -> Option<&Inventory> {
        self.inventories.get(&entity)
    }

    /// The inventory of `entity`, created empty on first access.
    pub fn entry(&mut self, entity: EntityId) -> &mut Inventory {
        self.inventories.entry(entity).or_default()
    }

    /// Gives `stack` to `entity`. Returns the stack back if the bag is full.
    pub fn give(&mut self, entity: EntityId, stack: ItemStack) -> Result<(), ItemStack> {
        self.entry(entity).add(stack)
    }

    pub fn equip(&mut self, entity: EntityId, item: EquippedItem) -> bool {
        self.entry(entity).equip(item)
    }

    /// Drops an entity's inventory, returning it.
    pub fn remove(&mut self, entity: EntityId) -> Option<Inventory> {
        self.inventories.remove(&entity)
    }
}

impl InventoryStore for Inventories {
    fn items(&self, entity: EntityId) -> Vec<ItemStack> {
        self.inventories
            .get(&entity)
            .map(|inv| inv.items.to_vec())
            .unwrap_or_default()
    }

    fn take_all(&mut self, entity: EntityId) -> Vec<ItemStack> {
        self.inventories
            .get_mut(&entity)
            .map(Inventory::drain)
            .unwrap_or_default()
    }

    fn receive_loot(&mut self, entity: EntityId, items: Vec<ItemStack>) -> LootOutcome {
        let inventory = self.entry(entity);
        let mut outcome = LootOutcome::default();
        for stack in items {
            match inventory.add(stack) {
                Ok(()) => outcome.received += 1,
                Err(stack) => outcome.dropped.push(stack),
            }
        }
        tracing::trace!(
            entity = %entity,
            received = outcome.received,
            dropped = outcome.dropped.len(),
            "loot received"
        );
        outcome
    }

    fn equipment(&self, entity: EntityId) -> EquipmentSummary {
        self.inventories
            .get(&entity)
            .map(|inv| inv.equipment.clone())
            .unwrap_or_default()
    }
}
