use crate::config::EntityConfig;
use crate::state::Position;

/// Combat geometry oracle.
///
/// `wilderness` must be a pure function of configuration and position; the
/// status component re-reads it every tick instead of decaying it.
pub trait CombatOracle {
    /// PvP intensity at `position`. Negative values mark the safe zone.
    fn wilderness(&self, config: &EntityConfig, position: Position) -> i32;
}

impl<F> CombatOracle for F
where
    F: Fn(&EntityConfig, Position) -> i32,
{
    fn wilderness(&self, config: &EntityConfig, position: Position) -> i32 {
        self(config, position)
    }
}
