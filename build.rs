use schema::{MoveData, SpeciesData};
use std::collections::HashSet;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=data/species.ron");
    println!("cargo:rerun-if-changed=data/moves.ron");

    let out_dir = env::var("OUT_DIR")?;
    let out_dir = Path::new(&out_dir);

    let species: Vec<SpeciesData> = ron::from_str(&fs::read_to_string("data/species.ron")?)?;
    let mut seen_ids = HashSet::new();
    for entry in &species {
        entry.validate()?;
        if !seen_ids.insert(entry.id) {
            return Err(format!("duplicate species id {}", entry.id).into());
        }
    }
    fs::write(
        out_dir.join("species.postcard"),
        schema::encode_table(&species)?,
    )?;

    let moves: Vec<MoveData> = ron::from_str(&fs::read_to_string("data/moves.ron")?)?;
    let mut seen_names = HashSet::new();
    for entry in &moves {
        entry.validate()?;
        if !seen_names.insert(entry.normalized_name()) {
            return Err(format!("duplicate move {}", entry.name).into());
        }
    }
    fs::write(out_dir.join("moves.postcard"), schema::encode_table(&moves)?)?;

    Ok(())
}
