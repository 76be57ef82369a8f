use crate::error::{CoreError, ErrorSeverity};

/// Entity configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityConfig {
    /// Fraction of maximum health restored per tick while fed and watered.
    pub health_restore: f64,
    /// Fraction of the food/water maximum that must be exceeded to regenerate.
    pub health_regen_threshold: f64,
    /// Health maximum assigned at spawn. Fixed for the entity's lifetime.
    pub base_health: u32,
    /// Observation radius in tiles.
    pub vision: u32,
}

impl EntityConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 12;
    pub const MAX_EQUIPMENT_SLOTS: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HEALTH_RESTORE: f64 = 0.1;
    pub const DEFAULT_HEALTH_REGEN_THRESHOLD: f64 = 0.5;
    pub const DEFAULT_BASE_HEALTH: u32 = 10;
    pub const DEFAULT_VISION: u32 = 5;

    pub fn new() -> Self {
        Self {
            health_restore: Self::DEFAULT_HEALTH_RESTORE,
            health_regen_threshold: Self::DEFAULT_HEALTH_REGEN_THRESHOLD,
            base_health: Self::DEFAULT_BASE_HEALTH,
            vision: Self::DEFAULT_VISION,
        }
    }

    pub fn with_base_health(mut self, base_health: u32) -> Self {
        self.base_health = base_health;
        self
    }

    pub fn with_health_restore(mut self, health_restore: f64) -> Self {
        self.health_restore = health_restore;
        self
    }

    pub fn with_regen_threshold(mut self, threshold: f64) -> Self {
        self.health_regen_threshold = threshold;
        self
    }

    /// Checks the fractions are within `[0, 1]` and health can be positive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.health_restore) {
            return Err(ConfigError::FractionOutOfRange {
                field: "health_restore",
                value: self.health_restore,
            });
        }
        if !(0.0..=1.0).contains(&self.health_regen_threshold) {
            return Err(ConfigError::FractionOutOfRange {
                field: "health_regen_threshold",
                value: self.health_regen_threshold,
            });
        }
        if self.base_health == 0 {
            return Err(ConfigError::ZeroBaseHealth);
        }
        Ok(())
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("base_health must be positive")]
    ZeroBaseHealth,
}

impl CoreError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FractionOutOfRange { .. } => "CONFIG_FRACTION_OUT_OF_RANGE",
            Self::ZeroBaseHealth => "CONFIG_ZERO_BASE_HEALTH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EntityConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_fraction_above_one() {
        let config = EntityConfig::new().with_health_restore(1.5);
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_FRACTION_OUT_OF_RANGE");
    }

    #[test]
    fn rejects_nan_threshold() {
        let config = EntityConfig::new().with_regen_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_health() {
        let config = EntityConfig::new().with_base_health(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBaseHealth));
    }
}
