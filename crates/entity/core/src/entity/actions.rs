use crate::state::{EntityId, Position};

/// Outcome of action resolution for one entity this tick.
///
/// Produced by the external action/movement resolver and consumed by
/// [`EntityState::update`](super::EntityState::update).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedActions {
    /// Destination chosen by the movement resolver, already validated against the map.
    pub movement: Option<Position>,
}

impl ResolvedActions {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn move_to(position: Position) -> Self {
        Self {
            movement: Some(position),
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackStyle {
    Melee,
    Range,
    Mage,
}

/// An attack performed by the entity during the current tick.
///
/// Recorded by combat resolution through
/// [`EntityState::record_attack`](super::EntityState::record_attack).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRecord {
    pub style: AttackStyle,
    pub target: EntityId,
    pub damage: u32,
}

impl AttackRecord {
    pub const fn new(style: AttackStyle, target: EntityId, damage: u32) -> Self {
        Self {
            style,
            target,
            damage,
        }
    }
}
