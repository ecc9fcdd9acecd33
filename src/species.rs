use schema::{PokemonType, Rarity, SpeciesData};
use std::collections::HashMap;
use tracing::warn;

/// Read-only species table keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    entries: Vec<SpeciesData>,
    by_id: HashMap<u16, usize>,
}

impl SpeciesRegistry {
    pub fn new(entries: Vec<SpeciesData>) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, species)| (species.id, index))
            .collect();
        Self { entries, by_id }
    }

    pub fn get(&self, id: u16) -> Option<&SpeciesData> {
        self.by_id.get(&id).map(|&index| &self.entries[index])
    }

    /// Species by id, or a baseline 50-stat stand-in when the id is unknown.
    pub fn get_or_fallback(&self, id: u16) -> SpeciesData {
        match self.get(id) {
            Some(species) => species.clone(),
            None => {
                warn!(species_id = id, "unknown species id, using baseline stats");
                SpeciesData::fallback(id)
            }
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SpeciesData> {
        let wanted = name.trim();
        self.entries
            .iter()
            .find(|species| species.name.eq_ignore_ascii_case(wanted))
    }

    pub fn all(&self) -> &[SpeciesData] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_rarity(&self, rarity: Rarity) -> Vec<&SpeciesData> {
        self.entries
            .iter()
            .filter(|species| species.rarity == rarity)
            .collect()
    }

    pub fn with_any_type(&self, types: &[PokemonType]) -> Vec<&SpeciesData> {
        self.entries
            .iter()
            .filter(|species| types.iter().any(|&t| species.has_type(t)))
            .collect()
    }
}

/// Multi-line summary used by the lookup tool and the demo binary.
pub fn display_species(species: &SpeciesData) -> String {
    let types = species
        .types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("/");
    let stats = &species.base_stats;
    format!(
        "#{:03} {} [{}] ({})\n  HP {} / Atk {} / Def {} / SpA {} / SpD {} / Spe {} (BST {})\n  Catch rate {}, base exp {}",
        species.id,
        species.name,
        types,
        species.rarity,
        stats.hp,
        stats.attack,
        stats.defense,
        stats.sp_attack,
        stats.sp_defense,
        stats.speed,
        stats.total(),
        species.catch_rate,
        species.base_exp
    )
}
