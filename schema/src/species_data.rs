use crate::{BaseStats, EvYield, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Encounter-frequency classification. Drives both selection weight and level skew.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub catch_rate: u8,
    pub encounter_weight: f64,
    pub rarity: Rarity,
    pub base_exp: u16,
    pub ev_yield: EvYield,
}

impl SpeciesData {
    /// Stand-in for ids the data table does not know about.
    pub fn fallback(id: u16) -> Self {
        Self {
            id,
            name: format!("Unknown #{}", id),
            types: vec![PokemonType::Normal],
            base_stats: BaseStats::FALLBACK,
            catch_rate: 45,
            encounter_weight: 1.0,
            rarity: Rarity::Common,
            base_exp: 50,
            ev_yield: EvYield {
                hp: 1,
                ..EvYield::default()
            },
        }
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// Checks the invariants the build script and fixture loaders rely on.
    pub fn validate(&self) -> Result<(), String> {
        if self.types.is_empty() || self.types.len() > 2 {
            return Err(format!(
                "{} (#{}) must have one or two types, found {}",
                self.name,
                self.id,
                self.types.len()
            ));
        }
        if self.encounter_weight.is_nan() || self.encounter_weight < 0.0 {
            return Err(format!(
                "{} (#{}) has invalid encounter weight {}",
                self.name, self.id, self.encounter_weight
            ));
        }
        Ok(())
    }
}
