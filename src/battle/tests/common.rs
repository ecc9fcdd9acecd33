use crate::config::{EngineConfig, IvContext, IvDefaults};
use crate::data::GameData;
use crate::encounter::Encounter;
use crate::pokemon::Combatant;
use crate::rng::ScriptedRng;
use crate::stats::{EvSet, IvSet};
use schema::{DamageClass, HeldItem, MoveData, Nature, PokemonType};
use std::time::SystemTime;

/// Bundled game data shared by every test.
pub fn test_data() -> &'static GameData {
    match GameData::shared() {
        Ok(data) => data,
        Err(err) => panic!("Failed to load bundled game data: {}", err),
    }
}

/// A builder for test combatants with common defaults: trained IVs, no EVs, a
/// neutral nature, no item and full HP.
///
/// # Example
/// ```ignore
/// let pikachu = TestCombatantBuilder::new(25, 50)
///     .with_nature(Nature::Timid)
///     .with_hp(10)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    species_id: u16,
    level: u8,
    ivs: IvSet,
    evs: EvSet,
    nature: Nature,
    item: Option<HeldItem>,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    pub fn new(species_id: u16, level: u8) -> Self {
        Self {
            species_id,
            level,
            ivs: IvSet::uniform(IvDefaults::default().for_context(IvContext::Trained)),
            evs: EvSet::default(),
            nature: Nature::Hardy,
            item: None,
            current_hp: None,
        }
    }

    pub fn with_ivs(mut self, ivs: IvSet) -> Self {
        self.ivs = ivs;
        self
    }

    pub fn with_evs(mut self, evs: EvSet) -> Self {
        self.evs = evs;
        self
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }

    pub fn with_item(mut self, item: HeldItem) -> Self {
        self.item = Some(item);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let species = test_data().species.get_or_fallback(self.species_id);
        let mut combatant = Combatant::new(
            &species,
            self.level,
            self.ivs,
            self.evs,
            self.nature,
            self.item,
        );
        if let Some(hp) = self.current_hp {
            combatant.set_current_hp(hp);
        }
        combatant
    }
}

/// Wraps a combatant in a fresh, active encounter using the default catch config.
pub fn test_encounter(wild: Combatant) -> Encounter {
    let species = test_data().species.get_or_fallback(wild.species_id);
    Encounter::new(
        wild,
        &species,
        &EngineConfig::default().catch,
        SystemTime::now(),
    )
}

/// A move from the bundled catalog.
pub fn catalog_move(name: &str) -> MoveData {
    match test_data().moves.get(name) {
        Some(move_data) => move_data.clone(),
        None => panic!("Move {} is missing from the catalog", name),
    }
}

/// An ad-hoc move outside the catalog.
pub fn custom_move(
    name: &str,
    move_type: PokemonType,
    power: Option<u16>,
    accuracy: u8,
    damage_class: DamageClass,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        power,
        accuracy,
        damage_class,
        priority: 0,
    }
}

/// Always hits, never crits, and rolls the maximum variance.
pub fn max_roll_rng() -> ScriptedRng {
    ScriptedRng::new_for_test(vec![0.0, 0.99, 1.0])
}
