use crate::config::LevelingConfig;
use crate::progression::{self, BattleKind, LevelUpReport};
use crate::stats::{compute_all_stats, CalculatedStats, EvSet, IvSet};
use schema::{BaseStats, EvYield, HeldItem, Nature, PokemonType, SpeciesData, Stat};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 100;

/// A live creature: a wild encounter or the player's companion.
///
/// The derived stat block is recomputed whenever level, EVs, IVs, nature or item
/// change, and `current_hp` always stays within `0..=max_hp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub species_id: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    level: u8,
    ivs: IvSet,
    evs: EvSet,
    nature: Nature,
    item: Option<HeldItem>,
    stats: CalculatedStats,
    current_hp: u16,
    total_exp: u32,
    base_stats: BaseStats,
    base_exp: u16,
    ev_yield: EvYield,
}

impl Combatant {
    /// Creates a combatant at full HP with the experience total for its level.
    pub fn new(
        species: &SpeciesData,
        level: u8,
        ivs: IvSet,
        evs: EvSet,
        nature: Nature,
        item: Option<HeldItem>,
    ) -> Self {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        let stats = compute_all_stats(&species.base_stats, level, &ivs, &evs, nature, item);
        Self {
            species_id: species.id,
            name: species.name.clone(),
            types: species.types.clone(),
            level,
            ivs,
            evs,
            nature,
            item,
            stats,
            current_hp: stats.hp,
            total_exp: progression::exp_for_level(level),
            base_stats: species.base_stats,
            base_exp: species.base_exp,
            ev_yield: species.ev_yield,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn ivs(&self) -> &IvSet {
        &self.ivs
    }

    pub fn evs(&self) -> &EvSet {
        &self.evs
    }

    pub fn nature(&self) -> Nature {
        self.nature
    }

    pub fn item(&self) -> Option<HeldItem> {
        self.item
    }

    pub fn stats(&self) -> &CalculatedStats {
        &self.stats
    }

    pub fn stat(&self, stat: Stat) -> u16 {
        self.stats.get(stat)
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn total_exp(&self) -> u32 {
        self.total_exp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    /// Base experience granted to whoever defeats this combatant.
    pub fn base_exp(&self) -> u16 {
        self.base_exp
    }

    pub fn ev_yield(&self) -> EvYield {
        self.ev_yield
    }

    /// Reduce HP by `amount`. Returns true if the combatant fainted.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.is_fainted()
    }

    pub fn heal(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
    }

    /// Sets HP directly, clamped to `0..=max_hp`.
    pub fn set_current_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    pub fn set_item(&mut self, item: Option<HeldItem>) {
        self.item = item;
        self.recalculate_stats();
    }

    /// Adds experience and resolves any level-ups.
    pub fn gain_experience(&mut self, amount: u32) -> LevelUpReport {
        let report = progression::check_level_up(self.level, self.total_exp, amount);
        self.total_exp = report.new_total_exp;
        if report.did_level_up() {
            self.level = report.new_level;
            self.recalculate_stats();
            debug!(
                name = %self.name,
                level = self.level,
                max_hp = self.max_hp(),
                "level up"
            );
        }
        report
    }

    /// Credits the experience for defeating `defeated` and applies its EV yield.
    pub fn defeat(
        &mut self,
        defeated: &Combatant,
        kind: BattleKind,
        config: &LevelingConfig,
    ) -> LevelUpReport {
        let gained =
            progression::exp_gain(defeated.level, defeated.base_exp(), self.level, kind, config);
        self.apply_ev_yield(&defeated.ev_yield());
        self.gain_experience(gained)
    }

    pub fn apply_ev_yield(&mut self, ev_yield: &EvYield) {
        let updated = progression::apply_ev_yield(&self.evs, ev_yield);
        if updated != self.evs {
            self.evs = updated;
            self.recalculate_stats();
        }
    }

    /// Recomputes the stat block. Current HP moves by the change in max HP.
    fn recalculate_stats(&mut self) {
        let old_max = self.stats.hp;
        self.stats = compute_all_stats(
            &self.base_stats,
            self.level,
            &self.ivs,
            &self.evs,
            self.nature,
            self.item,
        );
        if !self.is_fainted() {
            let grown = self.stats.hp.saturating_sub(old_max);
            self.current_hp = self.current_hp.saturating_add(grown);
        }
        self.current_hp = self.current_hp.min(self.stats.hp);
    }
}
