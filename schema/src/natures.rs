use crate::Stat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumCount, EnumIter, EnumString, FromRepr};

const BOOST: f64 = 1.1;
const HINDER: f64 = 0.9;

/// The 25 natures. Names parse and serialize exactly as written here (case-sensitive).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    EnumCount,
    FromRepr,
)]
#[repr(u8)]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Nature {
    /// The stats raised and lowered by this nature, or `None` for the five neutral natures.
    pub fn effect(self) -> Option<(Stat, Stat)> {
        use Nature::*;
        use Stat::*;

        match self {
            Hardy | Docile | Serious | Bashful | Quirky => None,
            Lonely => Some((Attack, Defense)),
            Brave => Some((Attack, Speed)),
            Adamant => Some((Attack, SpAttack)),
            Naughty => Some((Attack, SpDefense)),
            Bold => Some((Defense, Attack)),
            Relaxed => Some((Defense, Speed)),
            Impish => Some((Defense, SpAttack)),
            Lax => Some((Defense, SpDefense)),
            Timid => Some((Speed, Attack)),
            Hasty => Some((Speed, Defense)),
            Jolly => Some((Speed, SpAttack)),
            Naive => Some((Speed, SpDefense)),
            Modest => Some((SpAttack, Attack)),
            Mild => Some((SpAttack, Defense)),
            Quiet => Some((SpAttack, Speed)),
            Rash => Some((SpAttack, SpDefense)),
            Calm => Some((SpDefense, Attack)),
            Gentle => Some((SpDefense, Defense)),
            Sassy => Some((SpDefense, Speed)),
            Careful => Some((SpDefense, SpAttack)),
        }
    }

    pub fn increased(self) -> Option<Stat> {
        self.effect().map(|(up, _)| up)
    }

    pub fn decreased(self) -> Option<Stat> {
        self.effect().map(|(_, down)| down)
    }

    pub fn is_neutral(self) -> bool {
        self.effect().is_none()
    }

    /// Multiplier this nature applies to `stat`: 1.1, 0.9 or 1.0.
    pub fn modifier_for(self, stat: Stat) -> f64 {
        match self.effect() {
            Some((up, _)) if up == stat => BOOST,
            Some((_, down)) if down == stat => HINDER,
            _ => 1.0,
        }
    }

    /// Display text such as "+Attack / -Defense".
    pub fn description(self) -> String {
        match self.effect() {
            Some((up, down)) => format!("+{} / -{}", up, down),
            None => "Neutral nature (no stat changes)".to_string(),
        }
    }

    /// Nature at position `index` in declaration order, used for uniform draws.
    pub fn from_index(index: usize) -> Option<Nature> {
        u8::try_from(index).ok().and_then(Nature::from_repr)
    }
}

/// Modifier lookup by raw name. Unrecognised names are neutral.
pub fn nature_modifier(name: &str, stat: Stat) -> f64 {
    Nature::from_str(name)
        .map(|nature| nature.modifier_for(stat))
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_twenty_five_natures_five_neutral() {
        assert_eq!(Nature::COUNT, 25);
        assert_eq!(Nature::iter().filter(|n| n.is_neutral()).count(), 5);
    }

    #[test]
    fn test_each_stat_raised_and_lowered_four_times() {
        for stat in Stat::ALL.iter().skip(1) {
            let raised = Nature::iter().filter(|n| n.increased() == Some(*stat)).count();
            let lowered = Nature::iter().filter(|n| n.decreased() == Some(*stat)).count();
            assert_eq!(raised, 4, "{}", stat);
            assert_eq!(lowered, 4, "{}", stat);
        }
        assert!(Nature::iter().all(|n| n.increased() != Some(Stat::Hp)));
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(Nature::Adamant.modifier_for(Stat::Attack), 1.1);
        assert_eq!(Nature::Adamant.modifier_for(Stat::SpAttack), 0.9);
        assert_eq!(Nature::Adamant.modifier_for(Stat::Speed), 1.0);
        assert_eq!(Nature::Serious.modifier_for(Stat::Attack), 1.0);
    }

    #[test]
    fn test_unknown_name_is_neutral() {
        assert_eq!(nature_modifier("Grumpy", Stat::Attack), 1.0);
        assert_eq!(nature_modifier("adamant", Stat::Attack), 1.0);
        assert_eq!(nature_modifier("Adamant", Stat::Attack), 1.1);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Nature::Lonely.description(), "+Attack / -Defense");
        assert_eq!(Nature::Modest.description(), "+Sp. Atk / -Attack");
        assert_eq!(Nature::Quirky.description(), "Neutral nature (no stat changes)");
    }

    #[test]
    fn test_from_index_covers_all() {
        assert_eq!(Nature::from_index(0), Some(Nature::Hardy));
        assert_eq!(Nature::from_index(24), Some(Nature::Quirky));
        assert_eq!(Nature::from_index(25), None);
    }
}
