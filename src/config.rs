//! Tunable balance values for the engine, loaded from RON.
//!
//! Every field has a default, so a config file only needs to name what it changes:
//!
//! ```text
//! (
//!     encounter: (bias_probability: 0.5),
//!     ivs: (fresh_catch: 20),
//! )
//! ```

use crate::errors::{ConfigError, ConfigResult};
use schema::Rarity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable the binaries read a config path from.
pub const CONFIG_ENV_VAR: &str = "POKEMON_ENCOUNTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub encounter: EncounterConfig,
    pub catch: CatchConfig,
    pub damage: DamageConfig,
    pub leveling: LevelingConfig,
    pub ivs: IvDefaults,
}

/// Inclusive level offset range applied to the companion's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOffset {
    pub min: i16,
    pub max: i16,
}

/// A value for each rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerRarity<T> {
    pub common: T,
    pub uncommon: T,
    pub rare: T,
    pub legendary: T,
}

impl<T: Copy> PerRarity<T> {
    pub fn get(&self, rarity: Rarity) -> T {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn entries(&self) -> [(Rarity, T); 4] {
        [
            (Rarity::Common, self.common),
            (Rarity::Uncommon, self.uncommon),
            (Rarity::Rare, self.rare),
            (Rarity::Legendary, self.legendary),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub rarity_weights: PerRarity<f64>,
    /// Chance of narrowing the pool to species matching the bias types.
    pub bias_probability: f64,
    pub level_offsets: PerRarity<LevelOffset>,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            rarity_weights: PerRarity {
                common: 60.0,
                uncommon: 25.0,
                rare: 12.0,
                legendary: 3.0,
            },
            bias_probability: 0.7,
            level_offsets: PerRarity {
                common: LevelOffset { min: -2, max: 3 },
                uncommon: LevelOffset { min: -1, max: 5 },
                rare: LevelOffset { min: 2, max: 8 },
                legendary: LevelOffset { min: 5, max: 15 },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchConfig {
    /// Fraction of the species rate lost per opponent level.
    pub level_penalty: f64,
    pub rarity_factors: PerRarity<f64>,
}

impl Default for CatchConfig {
    fn default() -> Self {
        Self {
            level_penalty: 0.005,
            rarity_factors: PerRarity {
                common: 1.0,
                uncommon: 0.85,
                rare: 0.65,
                legendary: 0.35,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub stab_multiplier: f64,
    pub variance_min: f64,
    pub variance_max: f64,
    /// Damage dealt by zero-power moves missing from the fixed-damage table.
    pub fixed_damage_fallback: u16,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            critical_chance: 1.0 / 16.0,
            critical_multiplier: 2.0,
            stab_multiplier: 1.5,
            variance_min: 0.85,
            variance_max: 1.0,
            fixed_damage_fallback: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingConfig {
    pub max_exp_gain: u32,
    pub trainer_factor: f64,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            max_exp_gain: 10_000,
            trainer_factor: 1.5,
        }
    }
}

/// Where a missing IV is being filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IvContext {
    /// Battle calculations for a raised companion.
    Trained,
    /// Display of a freshly caught creature.
    FreshCatch,
}

/// IV substituted for every stat the caller left unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvDefaults {
    pub trained: u8,
    pub fresh_catch: u8,
}

impl Default for IvDefaults {
    fn default() -> Self {
        Self {
            trained: 31,
            fresh_catch: 15,
        }
    }
}

impl IvDefaults {
    pub fn for_context(&self, context: IvContext) -> u8 {
        match context {
            IvContext::Trained => self.trained,
            IvContext::FreshCatch => self.fresh_catch,
        }
    }
}

impl EngineConfig {
    pub fn from_ron_str(source: &str) -> ConfigResult<Self> {
        let config: EngineConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Loads from the path in [`CONFIG_ENV_VAR`] if set, otherwise returns defaults.
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let encounter = &self.encounter;
        let weights = encounter.rarity_weights.entries();
        if weights.iter().any(|(_, weight)| !weight.is_finite() || *weight < 0.0) {
            return Err(invalid(
                "encounter.rarity_weights",
                "weights must be finite and non-negative",
            ));
        }
        if weights.iter().map(|(_, weight)| weight).sum::<f64>() <= 0.0 {
            return Err(invalid(
                "encounter.rarity_weights",
                "at least one weight must be positive",
            ));
        }
        check_probability("encounter.bias_probability", encounter.bias_probability)?;
        for (rarity, offset) in encounter.level_offsets.entries() {
            if offset.min > offset.max {
                return Err(invalid(
                    "encounter.level_offsets",
                    format!("{} range {}..={} is inverted", rarity, offset.min, offset.max),
                ));
            }
        }

        check_probability("catch.level_penalty", self.catch.level_penalty)?;
        for (rarity, factor) in self.catch.rarity_factors.entries() {
            if !factor.is_finite() || factor < 0.0 {
                return Err(invalid(
                    "catch.rarity_factors",
                    format!("{} factor {} must be non-negative", rarity, factor),
                ));
            }
        }

        let damage = &self.damage;
        check_probability("damage.critical_chance", damage.critical_chance)?;
        if !(0.0 < damage.variance_min && damage.variance_min <= damage.variance_max) {
            return Err(invalid(
                "damage.variance_min",
                format!(
                    "variance range {}..={} must be positive and ordered",
                    damage.variance_min, damage.variance_max
                ),
            ));
        }

        if self.leveling.max_exp_gain == 0 {
            return Err(invalid("leveling.max_exp_gain", "must be at least 1"));
        }

        for (field, value) in [
            ("ivs.trained", self.ivs.trained),
            ("ivs.fresh_catch", self.ivs.fresh_catch),
        ] {
            if value > 31 {
                return Err(invalid(field, format!("{} exceeds the IV ceiling of 31", value)));
            }
        }
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{} is outside 0.0..=1.0", value)))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = EngineConfig::from_ron_str(
            "(encounter: (bias_probability: 0.5), ivs: (fresh_catch: 20))",
        )
        .unwrap();
        assert_eq!(config.encounter.bias_probability, 0.5);
        assert_eq!(config.encounter.rarity_weights.common, 60.0);
        assert_eq!(config.ivs.fresh_catch, 20);
        assert_eq!(config.ivs.trained, 31);
    }

    #[test]
    fn test_iv_defaults_per_context() {
        let ivs = IvDefaults::default();
        assert_eq!(ivs.for_context(IvContext::Trained), 31);
        assert_eq!(ivs.for_context(IvContext::FreshCatch), 15);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let result = EngineConfig::from_ron_str(
            "(encounter: (rarity_weights: (common: -1.0, uncommon: 25.0, rare: 12.0, legendary: 3.0)))",
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "encounter.rarity_weights",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_inverted_offset() {
        let mut config = EngineConfig::default();
        config.encounter.level_offsets.rare = LevelOffset { min: 8, max: 2 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_iv_default_above_ceiling() {
        let mut config = EngineConfig::default();
        config.ivs.trained = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            EngineConfig::from_ron_str("(encounter: ("),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_sample_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/engine.ron");
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = EngineConfig::load(Path::new("config/does-not-exist.ron"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
