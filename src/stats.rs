//! Derived stat formulas.
//!
//! These are pure functions over pre-validated inputs: base in 1..=255, level in
//! 1..=100, EV in 0..=252, IV in 0..=31. Out-of-range values are not corrected here;
//! the JSON boundary rejects them before they arrive.

use schema::{BaseStats, HeldItem, Nature, Stat};
use serde::{Deserialize, Serialize};

pub const MAX_IV: u8 = 31;
pub const MAX_EV_PER_STAT: u8 = 252;
pub const MAX_EV_TOTAL: u16 = 510;

/// Individual values, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IvSet {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl IvSet {
    pub fn uniform(value: u8) -> Self {
        Self {
            hp: value,
            attack: value,
            defense: value,
            sp_attack: value,
            sp_defense: value,
            speed: value,
        }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAttack => self.sp_attack,
            Stat::SpDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u8) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpAttack => self.sp_attack = value,
            Stat::SpDefense => self.sp_defense = value,
            Stat::Speed => self.speed = value,
        }
    }
}

/// Effort values. Only ever grow, through [`crate::progression::apply_ev_yield`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvSet {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl EvSet {
    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAttack => self.sp_attack,
            Stat::SpDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u8) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpAttack => self.sp_attack = value,
            Stat::SpDefense => self.sp_defense = value,
            Stat::Speed => self.speed = value,
        }
    }

    pub fn total(&self) -> u16 {
        Stat::ALL.iter().map(|&stat| self.get(stat) as u16).sum()
    }
}

/// The derived stat block. `hp` is the max HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl CalculatedStats {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAttack => self.sp_attack,
            Stat::SpDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }

    fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpAttack => self.sp_attack = value,
            Stat::SpDefense => self.sp_defense = value,
            Stat::Speed => self.speed = value,
        }
    }
}

fn scaled_base(base: u8, level: u8, ev: u8, iv: u8) -> u32 {
    ((2 * base as u32 + iv as u32 + ev as u32 / 4) * level as u32) / 100
}

/// `floor(((2·base + iv + floor(ev/4)) · level) / 100) + level + 10`
pub fn compute_hp(base: u8, level: u8, ev: u8, iv: u8) -> u16 {
    (scaled_base(base, level, ev, iv) + level as u32 + 10) as u16
}

/// `floor((floor(((2·base + iv + floor(ev/4)) · level) / 100) + 5) · nature_mod)`
pub fn compute_stat(base: u8, level: u8, ev: u8, iv: u8, nature_mod: f64) -> u16 {
    let unmodified = scaled_base(base, level, ev, iv) + 5;
    (unmodified as f64 * nature_mod).floor() as u16
}

/// Full stat block. Held-item multipliers apply after the nature and are floored.
pub fn compute_all_stats(
    base_stats: &BaseStats,
    level: u8,
    ivs: &IvSet,
    evs: &EvSet,
    nature: Nature,
    item: Option<HeldItem>,
) -> CalculatedStats {
    let mut stats = CalculatedStats {
        hp: compute_hp(base_stats.hp, level, evs.hp, ivs.hp),
        attack: 0,
        defense: 0,
        sp_attack: 0,
        sp_defense: 0,
        speed: 0,
    };

    for stat in Stat::ALL.into_iter().skip(1) {
        let value = compute_stat(
            base_stats.get(stat),
            level,
            evs.get(stat),
            ivs.get(stat),
            nature.modifier_for(stat),
        );
        stats.set(stat, value);
    }

    if let Some(item) = item {
        for stat in Stat::ALL {
            let multiplier = item.stat_multiplier(stat);
            if multiplier != 1.0 {
                let boosted = (stats.get(stat) as f64 * multiplier).floor() as u16;
                stats.set(stat, boosted);
            }
        }
    }

    stats
}
