//! Pokemon Encounter Engine
//!
//! Wild encounter generation, single-attack damage resolution, turn ordering, capture
//! rolls and post-battle leveling for a creature-collection game. Static tables are
//! compiled into the binary; randomness is injected through [`rng::RandomSource`].

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod data;
pub mod encounter;
pub mod errors;
pub mod mcp_interface;
pub mod move_data;
pub mod pokemon;
pub mod progression;
pub mod rng;
pub mod species;
pub mod stats;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, DamageClass, EvYield, HeldItem, MoveData, Nature, PokemonType, Rarity,
    SpeciesData, Stat,
};

// --- From this crate's modules (`src/`) ---

// Resolvers.
pub use battle::catch::{CaptureError, CaptureOutcome, CaptureTool};
pub use battle::{resolve_exchange, DamageResolver, DamageResult, ExchangeReport, Side};
pub use encounter::{Encounter, EncounterGenerator, EncounterStatus};
pub use progression::{BattleKind, LevelUpReport};

// Runtime types and data access.
pub use config::{EngineConfig, IvContext, IvDefaults};
pub use data::GameData;
pub use pokemon::Combatant;
pub use rng::{RandomSource, ScriptedRng, StdRandom};
pub use stats::{CalculatedStats, EvSet, IvSet};

// Crate-specific error and result types.
pub use errors::{
    ConfigError, ConfigResult, DataError, DataResult, InterfaceError, InterfaceResult,
    ValidationError, ValidationResult,
};
