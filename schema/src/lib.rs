// Pokemon Encounter Schema - Shared type definitions
// This crate contains the static enums and data records shared between the
// main pokemon-encounter crate and its build script, which compiles the RON
// data tables into postcard blobs.

pub use items::*;
pub use move_types::*;
pub use natures::*;
pub use pokemon_types::*;
pub use species_data::*;
pub use stats::*;

pub mod items;
pub mod move_types;
pub mod natures;
pub mod pokemon_types;
pub mod species_data;
pub mod stats;

/// Encode a data table into the compact form embedded in the engine binary.
pub fn encode_table<T: serde::Serialize>(table: &T) -> Result<Vec<u8>, postcard::Error> {
    postcard::to_allocvec(table)
}

/// Decode a table produced by [`encode_table`].
pub fn decode_table<'a, T: serde::Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, postcard::Error> {
    postcard::from_bytes(bytes)
}
