//! Static game tables.
//!
//! The species and move tables are compiled from `data/*.ron` by the build script and
//! embedded as postcard blobs. They are decoded once into a [`GameData`] that callers
//! pass to the resolvers; tests can build their own from RON fixtures instead.

use crate::errors::{DataError, DataResult};
use crate::move_data::MoveRegistry;
use crate::species::SpeciesRegistry;
use schema::{MoveData, SpeciesData};
use std::sync::OnceLock;
use tracing::debug;

static SPECIES_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/species.postcard"));
static MOVES_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/moves.postcard"));

#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub species: SpeciesRegistry,
    pub moves: MoveRegistry,
}

impl GameData {
    pub fn new(species: Vec<SpeciesData>, moves: Vec<MoveData>) -> DataResult<Self> {
        for entry in &species {
            entry.validate().map_err(|details| DataError::Malformed {
                table: "species",
                details,
            })?;
        }
        for entry in &moves {
            entry.validate().map_err(|details| DataError::Malformed {
                table: "moves",
                details,
            })?;
        }
        Ok(Self {
            species: SpeciesRegistry::new(species),
            moves: MoveRegistry::new(moves),
        })
    }

    /// Decodes the tables bundled into the binary.
    pub fn builtin() -> DataResult<Self> {
        let species: Vec<SpeciesData> = schema::decode_table(SPECIES_BLOB)
            .map_err(|source| DataError::Decode {
                table: "species",
                source,
            })?;
        let moves: Vec<MoveData> =
            schema::decode_table(MOVES_BLOB).map_err(|source| DataError::Decode {
                table: "moves",
                source,
            })?;
        debug!(
            species = species.len(),
            moves = moves.len(),
            "decoded bundled game data"
        );
        Self::new(species, moves)
    }

    /// Shared instance of the bundled tables, decoded on first use.
    pub fn shared() -> DataResult<&'static GameData> {
        static SHARED: OnceLock<GameData> = OnceLock::new();
        if let Some(data) = SHARED.get() {
            return Ok(data);
        }
        let data = Self::builtin()?;
        Ok(SHARED.get_or_init(|| data))
    }

    /// Builds tables from RON source, for fixtures and alternate data sets.
    pub fn from_ron(species_ron: &str, moves_ron: &str) -> DataResult<Self> {
        let species: Vec<SpeciesData> =
            ron::from_str(species_ron).map_err(|source| DataError::Parse {
                table: "species",
                source,
            })?;
        let moves: Vec<MoveData> = ron::from_str(moves_ron).map_err(|source| DataError::Parse {
            table: "moves",
            source,
        })?;
        Self::new(species, moves)
    }
}
