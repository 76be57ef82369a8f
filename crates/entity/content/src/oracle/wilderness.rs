//! Ring-based wilderness geometry.

use entity_core::{CombatOracle, EntityConfig, MapDimensions, Position};

/// Wilderness layout around the map centre.
///
/// Tiles within `safe_radius` (Chebyshev distance) of the centre are the safe
/// zone and report `-1`. Beyond it, the level rises by one every
/// `ring_width` tiles, capped at `max_level`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WildernessConfig {
    pub enabled: bool,
    pub safe_radius: u32,
    pub ring_width: u32,
    pub max_level: i32,
}

impl WildernessConfig {
    pub const DEFAULT_SAFE_RADIUS: u32 = 8;
    pub const DEFAULT_RING_WIDTH: u32 = 1;
    pub const DEFAULT_MAX_LEVEL: i32 = 99;

    /// Level reported everywhere when the wilderness is disabled or in the safe zone.
    pub const SAFE: i32 = -1;

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for WildernessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            safe_radius: Self::DEFAULT_SAFE_RADIUS,
            ring_width: Self::DEFAULT_RING_WIDTH,
            max_level: Self::DEFAULT_MAX_LEVEL,
        }
    }
}

/// [`CombatOracle`] computing wilderness from distance to the map centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CenterWilderness {
    center: Position,
    settings: WildernessConfig,
}

impl CenterWilderness {
    pub fn new(map: MapDimensions, settings: WildernessConfig) -> Self {
        Self {
            center: map.center(),
            settings,
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn settings(&self) -> &WildernessConfig {
        &self.settings
    }

    pub fn level_at(&self, position: Position) -> i32 {
        if !self.settings.enabled {
            return WildernessConfig::SAFE;
        }
        let distance = position
            .row
            .abs_diff(self.center.row)
            .max(position.col.abs_diff(self.center.col));
        if distance <= self.settings.safe_radius {
            return WildernessConfig::SAFE;
        }

        let ring_width = self.settings.ring_width.max(1);
        let level = (distance - self.settings.safe_radius - 1) / ring_width;
        i32::try_from(level)
            .unwrap_or(i32::MAX)
            .min(self.settings.max_level)
    }
}

impl CombatOracle for CenterWilderness {
    fn wilderness(&self, _config: &EntityConfig, position: Position) -> i32 {
        self.level_at(position)
    }
}
