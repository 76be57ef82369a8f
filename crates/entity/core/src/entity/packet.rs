//! Observation packets.
//!
//! The [`EntityPacket`] layout is consumed by rendering, logging and policy
//! observation layers and must stay stable:
//! `{status: {wilderness, immune, freeze}, history: {damage, timeAlive, attack?}, equipment, alive}`.

use super::history::HistoryPacket;
use super::identity::BasePacket;
use super::resources::ResourcesPacket;
use super::status::StatusPacket;
use crate::env::EquipmentSummary;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityPacket {
    pub status: StatusPacket,
    pub history: HistoryPacket,
    pub equipment: EquipmentSummary,
    pub alive: bool,
}

/// [`EntityPacket`] plus identity and resource columns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FullEntityPacket {
    pub base: BasePacket,
    pub resources: ResourcesPacket,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub entity: EntityPacket,
}
