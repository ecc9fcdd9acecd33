//! Wild encounter generation and the encounter lifecycle.
//!
//! A generated [`Encounter`] starts `Active` and ends either `Caught` or `Fled`. Combat
//! only ever touches the wild combatant's HP; capture and fleeing are the only ways
//! out of the active state.

use crate::battle::catch::{self, can_attempt_capture, CaptureError, CaptureOutcome, CaptureTool};
use crate::config::{CatchConfig, EngineConfig};
use crate::data::GameData;
use crate::pokemon::{Combatant, MAX_LEVEL, MIN_LEVEL};
use crate::rng::{random_nature, weighted_index, RandomSource};
use crate::stats::{EvSet, IvSet, MAX_IV};
use schema::{PokemonType, Rarity, SpeciesData, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncounterStatus {
    Active,
    Caught,
    Fled,
}

impl fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EncounterStatus::Active => "active",
            EncounterStatus::Caught => "caught",
            EncounterStatus::Fled => "fled",
        };
        f.write_str(text)
    }
}

/// Species catch rate scaled down by level and rarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchRateInputs {
    pub species_rate: u8,
    pub level_factor: f64,
    pub rarity_factor: f64,
    /// Base rate handed to the capture roll, in `1..=255`.
    pub adjusted_rate: u8,
}

impl CatchRateInputs {
    pub fn new(species: &SpeciesData, level: u8, config: &CatchConfig) -> Self {
        let level_factor = (1.0 - config.level_penalty * level as f64).max(0.0);
        let rarity_factor = config.rarity_factors.get(species.rarity);
        let adjusted = (species.catch_rate as f64 * level_factor * rarity_factor).floor();
        Self {
            species_rate: species.catch_rate,
            level_factor,
            rarity_factor,
            adjusted_rate: adjusted.clamp(1.0, 255.0) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub wild: Combatant,
    pub rarity: Rarity,
    pub generated_at: SystemTime,
    pub catch_inputs: CatchRateInputs,
    pub status: EncounterStatus,
}

impl Encounter {
    pub fn new(
        wild: Combatant,
        species: &SpeciesData,
        config: &CatchConfig,
        generated_at: SystemTime,
    ) -> Self {
        let catch_inputs = CatchRateInputs::new(species, wild.level(), config);
        Self {
            wild,
            rarity: species.rarity,
            generated_at,
            catch_inputs,
            status: EncounterStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EncounterStatus::Active
    }

    /// Throws `tool` at the wild combatant. A successful roll ends the encounter.
    pub fn attempt_capture(
        &mut self,
        tool: CaptureTool,
        rng: &mut dyn RandomSource,
    ) -> Result<CaptureOutcome, CaptureError> {
        can_attempt_capture(self)?;
        let outcome = catch::attempt(
            self.wild.current_hp(),
            self.wild.max_hp(),
            self.catch_inputs.adjusted_rate,
            tool,
            rng,
        );
        if outcome.success {
            self.status = EncounterStatus::Caught;
        }
        info!(
            species = %self.wild.name,
            %tool,
            catch_rate = outcome.catch_rate,
            success = outcome.success,
            "capture attempt"
        );
        Ok(outcome)
    }

    /// Ends an active encounter. Returns false if it was already over.
    pub fn flee(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = EncounterStatus::Fled;
        info!(species = %self.wild.name, "wild combatant fled");
        true
    }
}

/// Builds wild encounters from the species table.
#[derive(Debug, Clone, Copy)]
pub struct EncounterGenerator<'a> {
    data: &'a GameData,
    config: &'a EngineConfig,
}

impl<'a> EncounterGenerator<'a> {
    pub fn new(data: &'a GameData, config: &'a EngineConfig) -> Self {
        Self { data, config }
    }

    /// Generates a wild encounter for a companion at `companion_level`, favouring
    /// species with one of `bias_types` when the bias roll succeeds.
    pub fn generate(
        &self,
        bias_types: &[PokemonType],
        companion_level: u8,
        rng: &mut dyn RandomSource,
    ) -> Encounter {
        let encounter_config = &self.config.encounter;

        let rarity = self.roll_rarity(rng);
        let species = self.pick_species(rarity, bias_types, rng);

        let offset = encounter_config.level_offsets.get(rarity);
        let level_offset = rng.next_int(offset.min as i32, offset.max as i32, "level offset");
        let level = (companion_level as i32 + level_offset)
            .clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u8;

        let mut ivs = IvSet::default();
        for stat in Stat::ALL {
            let iv = rng.next_int(0, MAX_IV as i32, stat.as_ref());
            ivs.set(stat, iv as u8);
        }
        let nature = random_nature(rng);

        let wild = Combatant::new(&species, level, ivs, EvSet::default(), nature, None);
        info!(
            species = %wild.name,
            %rarity,
            level,
            %nature,
            "generated wild encounter"
        );
        Encounter::new(wild, &species, &self.config.catch, SystemTime::now())
    }

    fn roll_rarity(&self, rng: &mut dyn RandomSource) -> Rarity {
        let entries = self.config.encounter.rarity_weights.entries();
        let weights: Vec<f64> = entries.iter().map(|(_, weight)| *weight).collect();
        weighted_index(&weights, rng, "rarity")
            .map(|index| entries[index].0)
            .unwrap_or(Rarity::Common)
    }

    fn pick_species(
        &self,
        rarity: Rarity,
        bias_types: &[PokemonType],
        rng: &mut dyn RandomSource,
    ) -> SpeciesData {
        let table = &self.data.species;
        let mut pool = table.by_rarity(rarity);
        if pool.is_empty() {
            debug!(%rarity, "no species of this rarity, using the full table");
            pool = table.all().iter().collect();
        }

        if !bias_types.is_empty()
            && rng.chance(self.config.encounter.bias_probability, "type bias")
        {
            let biased: Vec<&SpeciesData> = pool
                .iter()
                .copied()
                .filter(|species| bias_types.iter().any(|&t| species.has_type(t)))
                .collect();
            if !biased.is_empty() {
                pool = biased;
            }
        }

        if pool.is_empty() {
            warn!("species table is empty, using the fallback species");
            return SpeciesData::fallback(0);
        }

        let weights: Vec<f64> = pool.iter().map(|species| species.encounter_weight).collect();
        let index = weighted_index(&weights, rng, "species").unwrap_or_else(|| {
            rng.next_int(0, pool.len() as i32 - 1, "species") as usize
        });
        pool[index].clone()
    }
}
