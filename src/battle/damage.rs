//! Single-attack damage resolution.
//!
//! Draw order for one attack is fixed: the accuracy roll, then (for formula moves) the
//! critical roll and the variance roll. Psywave draws one extra unit for its damage.
//! Misses, criticals and immunities are reported in [`DamageResult`], never as errors.

use crate::battle::effectiveness::{effectiveness_message, effectiveness_of, EffectivenessTier};
use crate::battle::stats::{effective_attack, effective_defense};
use crate::config::DamageConfig;
use crate::move_data::{fixed_damage_rule, FixedDamage};
use crate::pokemon::Combatant;
use crate::rng::RandomSource;
use schema::MoveData;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageKind {
    /// Damage from the level/power/stat formula.
    Standard,
    /// Damage from the fixed-damage table or its fallback.
    Fixed,
    /// A status move that landed. Deals no HP damage.
    Status,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageResult {
    pub damage: u16,
    pub missed: bool,
    pub critical: bool,
    pub stab: bool,
    pub effectiveness: f64,
    pub effectiveness_tier: EffectivenessTier,
    pub kind: DamageKind,
    pub message: String,
}

impl DamageResult {
    fn missed() -> Self {
        Self {
            damage: 0,
            missed: true,
            critical: false,
            stab: false,
            effectiveness: 1.0,
            effectiveness_tier: EffectivenessTier::Normal,
            kind: DamageKind::Missed,
            message: String::new(),
        }
    }

    fn without_formula(kind: DamageKind, damage: u16) -> Self {
        Self {
            damage,
            missed: false,
            critical: false,
            stab: false,
            effectiveness: 1.0,
            effectiveness_tier: EffectivenessTier::Normal,
            kind,
            message: String::new(),
        }
    }
}

/// `floor(((2·level/5 + 2) · power · (attack/defense)) / 50 + 2)`
pub fn base_damage(level: u8, power: u16, attack: u16, defense: u16) -> u32 {
    let level_factor = 2.0 * level as f64 / 5.0 + 2.0;
    let ratio = attack as f64 / defense.max(1) as f64;
    ((level_factor * power as f64 * ratio) / 50.0 + 2.0).floor() as u32
}

/// Resolves attacks using the configured critical, STAB and variance values.
#[derive(Debug, Clone, Copy)]
pub struct DamageResolver<'a> {
    config: &'a DamageConfig,
}

impl<'a> DamageResolver<'a> {
    pub fn new(config: &'a DamageConfig) -> Self {
        Self { config }
    }

    pub fn resolve(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        move_data: &MoveData,
        rng: &mut dyn RandomSource,
    ) -> DamageResult {
        let hit_roll = rng.next_unit("accuracy") * 100.0;
        if hit_roll >= move_data.accuracy as f64 {
            debug!(move_name = %move_data.name, hit_roll, "attack missed");
            return DamageResult::missed();
        }

        if move_data.is_status() {
            return DamageResult::without_formula(DamageKind::Status, 0);
        }

        let (Some(power), Some(attack), Some(defense)) = (
            move_data.formula_power(),
            effective_attack(attacker, move_data.damage_class),
            effective_defense(defender, move_data.damage_class),
        ) else {
            let damage = self.fixed_damage(attacker, defender, move_data, rng);
            return DamageResult::without_formula(DamageKind::Fixed, damage);
        };

        let base = base_damage(attacker.level(), power, attack, defense);
        let stab = attacker.has_type(move_data.move_type);
        let stab_multiplier = if stab {
            self.config.stab_multiplier
        } else {
            1.0
        };
        let effectiveness = effectiveness_of(move_data.move_type, &defender.types);

        let critical = rng.chance(self.config.critical_chance, "critical hit");
        let critical_multiplier = if critical {
            self.config.critical_multiplier
        } else {
            1.0
        };

        let variance_span = self.config.variance_max - self.config.variance_min;
        let variance = self.config.variance_min + rng.next_unit("damage variance") * variance_span;

        let raw = base as f64 * stab_multiplier * effectiveness * critical_multiplier * variance;
        let damage = if effectiveness == 0.0 {
            0
        } else {
            (raw.floor() as u32).clamp(1, u16::MAX as u32) as u16
        };

        debug!(
            move_name = %move_data.name,
            base,
            stab,
            effectiveness,
            critical,
            variance,
            damage,
            "resolved attack"
        );

        DamageResult {
            damage,
            missed: false,
            critical,
            stab,
            effectiveness,
            effectiveness_tier: EffectivenessTier::from_multiplier(effectiveness),
            kind: DamageKind::Standard,
            message: effectiveness_message(effectiveness).to_string(),
        }
    }

    /// Damage for a zero-power move. Never below 1; ignores types entirely.
    fn fixed_damage(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        move_data: &MoveData,
        rng: &mut dyn RandomSource,
    ) -> u16 {
        let level = attacker.level() as u16;
        let target_hp = defender.current_hp();
        let damage = match fixed_damage_rule(move_data) {
            Some(FixedDamage::Flat(amount)) => amount,
            Some(FixedDamage::AttackerLevel) => level,
            Some(FixedDamage::LevelScaledRandom) => {
                let scale = 0.5 + rng.next_unit("psywave");
                (level as f64 * scale).floor() as u16
            }
            Some(FixedDamage::HalfTargetHp) => target_hp / 2,
            Some(FixedDamage::TargetHpMinusOne) => target_hp.saturating_sub(1),
            None => self.config.fixed_damage_fallback,
        };
        damage.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(50, 40, 100, 100, 19)]
    #[case(50, 90, 120, 60, 81)]
    #[case(1, 40, 10, 10, 3)]
    #[case(100, 120, 300, 150, 203)]
    fn test_base_damage(
        #[case] level: u8,
        #[case] power: u16,
        #[case] attack: u16,
        #[case] defense: u16,
        #[case] expected: u32,
    ) {
        assert_eq!(base_damage(level, power, attack, defense), expected);
    }

    #[test]
    fn test_zero_defense_is_treated_as_one() {
        assert_eq!(base_damage(50, 40, 10, 0), base_damage(50, 40, 10, 1));
    }
}
