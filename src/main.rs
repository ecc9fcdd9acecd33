//! Command-line demo: one wild encounter played out against a companion.
//!
//! Usage: `pokemon-encounter [species_id] [level]` (defaults: Pikachu at level 12).
//! Set `POKEMON_ENCOUNTER_CONFIG` to a RON file to change balance values and
//! `RUST_LOG=debug` to watch the formulas.

use pokemon_encounter::battle::turn_order::ExchangeAction;
use pokemon_encounter::species::display_species;
use pokemon_encounter::{
    resolve_exchange, BattleKind, CaptureTool, Combatant, DamageResolver, EncounterGenerator,
    EngineConfig, EvSet, GameData, IvContext, IvSet, Nature, Side, StdRandom,
};
use std::error::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const MAX_TURNS: usize = 20;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let species_id: u16 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(25);
    let level: u8 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(12);

    let config = EngineConfig::from_env()?;
    let data = GameData::shared()?;
    let mut rng = StdRandom::from_os();

    let companion_species = data.species.get_or_fallback(species_id);
    let mut companion = Combatant::new(
        &companion_species,
        level,
        IvSet::uniform(config.ivs.for_context(IvContext::Trained)),
        EvSet::default(),
        Nature::Hardy,
        None,
    );
    let attack = data.moves.get_or_fallback(signature_move(&companion));
    let wild_move = data.moves.get_or_fallback("Tackle");

    let generator = EncounterGenerator::new(data, &config);
    let mut encounter = generator.generate(&companion.types, companion.level(), &mut rng);
    let wild_species = data.species.get_or_fallback(encounter.wild.species_id);
    println!("A wild {} (Lv. {}) appeared!", encounter.wild.name, encounter.wild.level());
    println!("{}\n", display_species(&wild_species));
    println!("Go, {} (Lv. {})!", companion.name, companion.level());

    let resolver = DamageResolver::new(&config.damage);
    for turn in 1..=MAX_TURNS {
        println!("\n--- Turn {} ---", turn);

        let wild = &encounter.wild;
        if wild.current_hp() * 2 <= wild.max_hp() {
            let outcome = encounter.attempt_capture(CaptureTool::GreatBall, &mut rng)?;
            println!(
                "You threw a {} ({:.1}% chance, {}).",
                outcome.tool, outcome.percentage, outcome.description
            );
            if outcome.success {
                println!("Gotcha! {} was caught!", encounter.wild.name);
                return Ok(());
            }
            println!("Oh no! It broke free!");
            continue;
        }

        let report = resolve_exchange(
            &mut companion,
            &attack,
            &mut encounter.wild,
            &wild_move,
            &resolver,
            &mut rng,
        );
        for action in &report.actions {
            let actor = match action.actor {
                Side::A => companion.name.as_str(),
                Side::B => encounter.wild.name.as_str(),
            };
            println!("{}", narrate(actor, action));
        }
        println!(
            "{}: {}/{} HP | {}: {}/{} HP",
            companion.name,
            companion.current_hp(),
            companion.max_hp(),
            encounter.wild.name,
            encounter.wild.current_hp(),
            encounter.wild.max_hp()
        );

        match report.fainted() {
            Some(Side::B) => {
                println!("The wild {} fainted!", encounter.wild.name);
                let before = companion.total_exp();
                let level_up = companion.defeat(&encounter.wild, BattleKind::Wild, &config.leveling);
                println!(
                    "{} gained {} experience.",
                    companion.name,
                    level_up.new_total_exp - before
                );
                if level_up.did_level_up() {
                    println!("{} grew to level {}!", companion.name, level_up.new_level);
                }
                encounter.flee();
                return Ok(());
            }
            Some(Side::A) => {
                println!("{} fainted! You ran back to safety.", companion.name);
                encounter.flee();
                return Ok(());
            }
            None => {}
        }
    }

    encounter.flee();
    println!("\nThe wild {} fled!", encounter.wild.name);
    Ok(())
}

/// A same-type attack for the companion's primary type.
fn signature_move(companion: &Combatant) -> &'static str {
    use pokemon_encounter::PokemonType::*;
    match companion.types.first() {
        Some(Fire) => "Ember",
        Some(Water) => "Water Gun",
        Some(Electric) => "Thunder Shock",
        Some(Grass) => "Vine Whip",
        Some(Psychic) => "Confusion",
        Some(Ghost) => "Lick",
        _ => "Tackle",
    }
}

fn narrate(actor: &str, action: &ExchangeAction) -> String {
    let result = &action.result;
    if result.missed {
        return format!("{} used {}, but it missed!", actor, action.move_name);
    }
    let mut line = format!(
        "{} used {} for {} damage.",
        actor, action.move_name, result.damage
    );
    if result.critical {
        line.push_str(" A critical hit!");
    }
    if !result.message.is_empty() {
        line.push(' ');
        line.push_str(&result.message);
    }
    line
}
