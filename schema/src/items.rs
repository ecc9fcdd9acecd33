use crate::Stat;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// Held items that scale a derived stat after the nature modifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum HeldItem {
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    AssaultVest,
    Eviolite,
}

impl HeldItem {
    pub fn stat_multiplier(self, stat: Stat) -> f64 {
        match (self, stat) {
            (HeldItem::ChoiceBand, Stat::Attack) => 1.5,
            (HeldItem::ChoiceSpecs, Stat::SpAttack) => 1.5,
            (HeldItem::ChoiceScarf, Stat::Speed) => 1.5,
            (HeldItem::AssaultVest, Stat::SpDefense) => 1.5,
            (HeldItem::Eviolite, Stat::Defense | Stat::SpDefense) => 1.5,
            _ => 1.0,
        }
    }
}

impl fmt::Display for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeldItem::ChoiceBand => "Choice Band",
            HeldItem::ChoiceSpecs => "Choice Specs",
            HeldItem::ChoiceScarf => "Choice Scarf",
            HeldItem::AssaultVest => "Assault Vest",
            HeldItem::Eviolite => "Eviolite",
        };
        f.write_str(name)
    }
}
