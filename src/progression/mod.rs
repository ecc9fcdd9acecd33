//! Growth of the surviving combatant: the experience curve, experience gained from a
//! defeated opponent, and effort-value rewards.

pub mod experience;
pub mod rewards;

pub use experience::{
    check_level_up, exp_for_level, exp_gain, level_for_exp, BattleKind, LevelUpReport,
};
pub use rewards::{apply_ev_yield, format_ev_gains};
