use arrayvec::ArrayVec;

use crate::config::EntityConfig;
use crate::state::{EntityId, ItemHandle, ItemStack};

/// External inventory and equipment system.
///
/// The entity never owns its items; it only asks the store to move them on
/// death and to summarize equipment for packets.
pub trait InventoryStore {
    /// Items currently held by `entity`, in slot order.
    fn items(&self, entity: EntityId) -> Vec<ItemStack>;

    /// Removes and returns every item held by `entity`.
    fn take_all(&mut self, entity: EntityId) -> Vec<ItemStack>;

    /// Adds `items` to `entity`'s inventory.
    fn receive_loot(&mut self, entity: EntityId, items: Vec<ItemStack>) -> LootOutcome;

    fn equipment(&self, entity: EntityId) -> EquipmentSummary;

    /// Moves the whole inventory of `from` into `to`.
    fn transfer_all(&mut self, from: EntityId, to: EntityId) -> LootOutcome {
        let items = self.take_all(from);
        self.receive_loot(to, items)
    }
}

/// Result of handing items to an inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LootOutcome {
    /// Stacks accepted by the receiving inventory.
    pub received: usize,
    /// Stacks that did not fit and were discarded.
    pub dropped: Vec<ItemStack>,
}

impl LootOutcome {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Equipment slots reported in observation packets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Hat,
    Top,
    Bottom,
    Weapon,
    Ammunition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedItem {
    pub slot: EquipmentSlot,
    pub item: ItemHandle,
    pub level: u16,
}

/// Summary of worn equipment, one entry per occupied slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSummary {
    pub items: ArrayVec<EquippedItem, { EntityConfig::MAX_EQUIPMENT_SLOTS }>,
}

impl EquipmentSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips `item`, replacing whatever occupied the same slot.
    pub fn equip(&mut self, item: EquippedItem) {
        if let Some(existing) = self.items.iter_mut().find(|e| e.slot == item.slot) {
            *existing = item;
            return;
        }
        // One entry per slot kind, so capacity is never exceeded.
        self.items.push(item);
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.items.iter().find(|e| e.slot == slot)
    }

    /// Sum of equipped item levels.
    pub fn item_level(&self) -> u32 {
        self.items.iter().map(|e| u32::from(e.level)).sum()
    }
}
