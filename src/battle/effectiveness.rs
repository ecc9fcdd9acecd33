//! Type-effectiveness lookups and the display tier derived from them.

use schema::PokemonType;
use serde::{Deserialize, Serialize};

/// Display bucket for an effectiveness multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectivenessTier {
    Immune,
    Weak,
    Normal,
    Super,
}

impl EffectivenessTier {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            EffectivenessTier::Immune
        } else if multiplier < 1.0 {
            EffectivenessTier::Weak
        } else if multiplier > 1.0 {
            EffectivenessTier::Super
        } else {
            EffectivenessTier::Normal
        }
    }
}

/// Product of the per-type chart entries for every defending type.
/// One of 0, 0.25, 0.5, 1, 2 or 4.
pub fn effectiveness_of(attack_type: PokemonType, defense_types: &[PokemonType]) -> f64 {
    PokemonType::effectiveness_against(attack_type, defense_types)
}

/// Battle text for a multiplier. Neutral hits have no message.
pub fn effectiveness_message(multiplier: f64) -> &'static str {
    if multiplier == 0.0 {
        "It doesn't affect the target..."
    } else if multiplier < 0.5 {
        "It's barely effective..."
    } else if multiplier < 1.0 {
        "It's not very effective..."
    } else if multiplier > 2.0 {
        "It's extremely effective!"
    } else if multiplier > 1.0 {
        "It's super effective!"
    } else {
        ""
    }
}
