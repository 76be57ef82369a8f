//! Identifiers and small value types shared by every entity component.

use std::fmt;

/// Unique identifier for an entity tracked by the attribute table and registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed as `(row, col)` tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn l1_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Population (team) an entity was spawned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationId(pub u16);

/// Display color assigned to an entity at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex representation used by observation packets, e.g. `#ff8000`.
    pub fn packet(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Whether an entity is controlled by an agent policy or by scripted NPC logic.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    #[default]
    Player,
    Npc,
}

/// Opaque handle into an external item catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub handle: ItemHandle,
    pub quantity: u16,
}

impl ItemStack {
    pub const fn new(handle: ItemHandle, quantity: u16) -> Self {
        Self { handle, quantity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l1_distance_is_symmetric() {
        let a = Position::new(2, -3);
        let b = Position::new(-1, 4);
        assert_eq!(a.l1_distance(b), 10);
        assert_eq!(b.l1_distance(a), 10);
        assert_eq!(a.l1_distance(a), 0);
    }

    #[test]
    fn color_packet_is_lowercase_hex() {
        assert_eq!(Color::rgb(255, 128, 0).packet(), "#ff8000");
    }

    #[test]
    fn entity_kind_parses_case_insensitively() {
        assert_eq!("NPC".parse::<EntityKind>().unwrap(), EntityKind::Npc);
        assert_eq!(EntityKind::Player.to_string(), "player");
    }
}
