use crate::PokemonType;
use serde::{Deserialize, Serialize};
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum DamageClass {
    Physical,
    Special,
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    /// `None` (or zero) marks a status move or a fixed-damage move.
    pub power: Option<u16>,
    pub accuracy: u8,
    pub damage_class: DamageClass,
    #[serde(default)]
    pub priority: i8,
}

impl MoveData {
    /// The move used when a name cannot be resolved.
    pub fn fallback() -> Self {
        Self {
            name: "Tackle".to_string(),
            move_type: PokemonType::Normal,
            power: Some(40),
            accuracy: 100,
            damage_class: DamageClass::Physical,
            priority: 0,
        }
    }

    /// Power for the standard formula; `None` when the move deals no formula damage.
    pub fn formula_power(&self) -> Option<u16> {
        self.power.filter(|&power| power > 0)
    }

    pub fn is_status(&self) -> bool {
        self.damage_class == DamageClass::Status
    }

    /// Lowercase, hyphen-separated form of the name ("Quick Attack" -> "quick-attack").
    pub fn normalized_name(&self) -> String {
        normalize_move_name(&self.name)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.accuracy > 100 {
            return Err(format!(
                "{} has accuracy {} above 100",
                self.name, self.accuracy
            ));
        }
        Ok(())
    }
}

pub fn normalize_move_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_move_name() {
        assert_eq!(normalize_move_name("Quick Attack"), "quick-attack");
        assert_eq!(normalize_move_name("  Dragon   Rage "), "dragon-rage");
        assert_eq!(normalize_move_name("X-Scissor"), "x-scissor");
    }

    #[test]
    fn test_formula_power_treats_zero_as_none() {
        let mut move_data = MoveData::fallback();
        assert_eq!(move_data.formula_power(), Some(40));
        move_data.power = Some(0);
        assert_eq!(move_data.formula_power(), None);
    }
}
