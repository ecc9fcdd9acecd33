use crate::config::LevelingConfig;
use crate::pokemon::{MAX_LEVEL, MIN_LEVEL};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which kind of battle the opponent was defeated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattleKind {
    #[default]
    Wild,
    Trainer,
}

impl BattleKind {
    pub fn factor(self, config: &LevelingConfig) -> f64 {
        match self {
            BattleKind::Wild => 1.0,
            BattleKind::Trainer => config.trainer_factor,
        }
    }
}

/// Total experience needed to reach `level` (cubic curve).
pub fn exp_for_level(level: u8) -> u32 {
    if level <= MIN_LEVEL {
        return 0;
    }
    let level = level.min(MAX_LEVEL) as u32;
    level * level * level
}

/// The highest level whose threshold `total_exp` has reached.
pub fn level_for_exp(total_exp: u32) -> u8 {
    (MIN_LEVEL..=MAX_LEVEL)
        .rev()
        .find(|&level| exp_for_level(level) <= total_exp)
        .unwrap_or(MIN_LEVEL)
}

/// Experience for defeating a level `defeated_level` opponent with the given base
/// experience, scaled against the companion's level.
///
/// `floor((a·b·L/5) · ((2L+10)^2.5 / (L+Lp+10)^2.5)) + 1`, clamped to
/// `[1, config.max_exp_gain]`.
pub fn exp_gain(
    defeated_level: u8,
    base_exp: u16,
    companion_level: u8,
    kind: BattleKind,
    config: &LevelingConfig,
) -> u32 {
    let level = defeated_level as f64;
    let companion = companion_level as f64;
    let numerator = (2.0 * level + 10.0).powf(2.5);
    let denominator = (level + companion + 10.0).powf(2.5);
    let scaled = kind.factor(config) * base_exp as f64 * level / 5.0;
    let raw = (scaled * (numerator / denominator)).floor() + 1.0;

    let gain = (raw.max(1.0) as u32).min(config.max_exp_gain.max(1));
    debug!(defeated_level, base_exp, companion_level, ?kind, gain, "experience gain");
    gain
}

/// Result of adding experience to a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpReport {
    pub old_level: u8,
    pub new_level: u8,
    pub levels_gained: u8,
    pub new_total_exp: u32,
    /// Experience still missing for the next level; zero at the level cap.
    pub exp_to_next_level: u32,
    /// Threshold of the next level; equals the current threshold at the level cap.
    pub exp_for_next_level: u32,
}

impl LevelUpReport {
    pub fn did_level_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Adds `gained` to `total_exp` and resolves the new level, possibly across several
/// thresholds. Levels never go down.
pub fn check_level_up(level: u8, total_exp: u32, gained: u32) -> LevelUpReport {
    let new_total_exp = total_exp.saturating_add(gained);
    let new_level = level_for_exp(new_total_exp).max(level);
    let next = new_level.saturating_add(1).min(MAX_LEVEL);
    let exp_for_next_level = exp_for_level(next);

    LevelUpReport {
        old_level: level,
        new_level,
        levels_gained: new_level - level,
        new_total_exp,
        exp_to_next_level: exp_for_next_level.saturating_sub(new_total_exp),
        exp_for_next_level,
    }
}
