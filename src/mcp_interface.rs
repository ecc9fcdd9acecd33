//! The JSON tool surface.
//!
//! Requests arrive from untrusted callers with loosely typed fields. Everything is
//! validated here and turned into a canonical [`Combatant`] or [`MoveData`] before any
//! formula runs; the functions below return serializable responses for the MCP server
//! and for [`call_tool`], which dispatches raw JSON by tool name.

use crate::battle::catch::{CaptureOutcome, CaptureTool};
use crate::battle::damage::{DamageResolver, DamageResult};
use crate::battle::effectiveness::{effectiveness_message, effectiveness_of, EffectivenessTier};
use crate::config::{EngineConfig, IvContext, IvDefaults};
use crate::data::GameData;
use crate::encounter::{Encounter, EncounterGenerator};
use crate::errors::{InterfaceError, InterfaceResult, ValidationError, ValidationResult};
use crate::move_data::{format_move, MoveRegistry};
use crate::pokemon::{Combatant, MAX_LEVEL, MIN_LEVEL};
use crate::progression::{exp_gain, format_ev_gains, BattleKind, LevelUpReport};
use crate::species::display_species;
use crate::stats::{CalculatedStats, EvSet, IvSet, MAX_EV_PER_STAT, MAX_EV_TOTAL, MAX_IV};
use crate::rng::RandomSource;
use rmcp::schemars;
use schema::{DamageClass, HeldItem, MoveData, Nature, PokemonType, Stat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::SystemTime;
use tracing::warn;

const DEFAULT_LEVEL: i64 = 50;
const MAX_PRIORITY: i64 = 7;

/// Everything a tool call needs besides its arguments.
#[derive(Debug, Clone, Copy)]
pub struct EngineContext<'a> {
    pub data: &'a GameData,
    pub config: &'a EngineConfig,
}

impl<'a> EngineContext<'a> {
    pub fn new(data: &'a GameData, config: &'a EngineConfig) -> Self {
        Self { data, config }
    }
}

/// Per-stat values keyed by the six wire names. Missing stats take a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatValues {
    pub hp: Option<i64>,
    pub attack: Option<i64>,
    pub defense: Option<i64>,
    pub sp_attack: Option<i64>,
    pub sp_defense: Option<i64>,
    pub speed: Option<i64>,
}

impl StatValues {
    pub fn get(&self, stat: Stat) -> Option<i64> {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAttack => self.sp_attack,
            Stat::SpDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }
}

/// A combatant as described by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSpec {
    #[schemars(description = "National dex number of the species")]
    pub species: u16,
    #[schemars(description = "Level 1-100, defaults to 50")]
    pub level: Option<i64>,
    #[schemars(description = "Nature name such as 'Adamant' (case-sensitive), defaults to Hardy")]
    pub nature: Option<String>,
    pub ivs: Option<StatValues>,
    pub evs: Option<StatValues>,
    #[schemars(description = "Held item such as 'Choice Band'")]
    pub item: Option<String>,
    #[schemars(description = "Current HP, defaults to max HP")]
    pub current_hp: Option<i64>,
}

impl CombatantSpec {
    /// Validates the description and builds the combatant. Unspecified IVs come from
    /// `iv_defaults` for `context`.
    pub fn build(
        &self,
        data: &GameData,
        iv_defaults: &IvDefaults,
        context: IvContext,
    ) -> ValidationResult<Combatant> {
        let level = self.level.unwrap_or(DEFAULT_LEVEL);
        if !(MIN_LEVEL as i64..=MAX_LEVEL as i64).contains(&level) {
            return Err(ValidationError::LevelOutOfRange(level));
        }

        let ivs = self.ivs(iv_defaults.for_context(context))?;
        let evs = self.evs()?;
        let nature = self.nature();
        let item = self.item.as_deref().map(parse_item).transpose()?;

        let species = data.species.get_or_fallback(self.species);
        let mut combatant = Combatant::new(&species, level as u8, ivs, evs, nature, item);

        if let Some(current) = self.current_hp {
            let max = combatant.max_hp();
            if !(0..=max as i64).contains(&current) {
                return Err(ValidationError::HpOutOfRange { current, max });
            }
            combatant.set_current_hp(current as u16);
        }
        Ok(combatant)
    }

    fn ivs(&self, default: u8) -> ValidationResult<IvSet> {
        let given = self.ivs.clone().unwrap_or_default();
        let mut ivs = IvSet::uniform(default);
        for stat in Stat::ALL {
            if let Some(value) = given.get(stat) {
                if !(0..=MAX_IV as i64).contains(&value) {
                    return Err(ValidationError::IvOutOfRange { stat, value });
                }
                ivs.set(stat, value as u8);
            }
        }
        Ok(ivs)
    }

    fn evs(&self) -> ValidationResult<EvSet> {
        let given = self.evs.clone().unwrap_or_default();
        let mut evs = EvSet::default();
        let mut total = 0;
        for stat in Stat::ALL {
            let value = given.get(stat).unwrap_or(0);
            if !(0..=MAX_EV_PER_STAT as i64).contains(&value) {
                return Err(ValidationError::EvOutOfRange { stat, value });
            }
            total += value;
            evs.set(stat, value as u8);
        }
        if total > MAX_EV_TOTAL as i64 {
            return Err(ValidationError::EvTotalExceeded(total));
        }
        Ok(evs)
    }

    fn nature(&self) -> Nature {
        match self.nature.as_deref() {
            None => Nature::default(),
            Some(name) => Nature::from_str(name).unwrap_or_else(|_| {
                warn!(nature = name, "unknown nature, treating as neutral");
                Nature::default()
            }),
        }
    }
}

/// A move named from the catalog, optionally with fields overridden. A name the
/// catalog doesn't know becomes a custom move built on Tackle's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub power: Option<i64>,
    pub accuracy: Option<i64>,
    #[schemars(description = "physical, special or status")]
    pub damage_class: Option<String>,
    pub priority: Option<i64>,
}

impl MoveSpec {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn has_overrides(&self) -> bool {
        self.move_type.is_some()
            || self.power.is_some()
            || self.accuracy.is_some()
            || self.damage_class.is_some()
            || self.priority.is_some()
    }

    pub fn resolve(&self, moves: &MoveRegistry) -> ValidationResult<MoveData> {
        let mut move_data = match moves.get(&self.name) {
            Some(known) => known.clone(),
            None if self.has_overrides() => MoveData {
                name: self.name.clone(),
                ..MoveData::fallback()
            },
            None => moves.get_or_fallback(&self.name),
        };

        if let Some(name) = &self.move_type {
            move_data.move_type = parse_type(name)?;
        }
        if let Some(power) = self.power {
            if !(0..=u16::MAX as i64).contains(&power) {
                return Err(ValidationError::Invalid(format!(
                    "power {} is outside 0..={}",
                    power,
                    u16::MAX
                )));
            }
            move_data.power = Some(power as u16);
        }
        if let Some(accuracy) = self.accuracy {
            if !(0..=100).contains(&accuracy) {
                return Err(ValidationError::AccuracyOutOfRange(accuracy));
            }
            move_data.accuracy = accuracy as u8;
        }
        if let Some(class) = &self.damage_class {
            move_data.damage_class = DamageClass::from_str(class.trim())
                .map_err(|_| ValidationError::UnknownDamageClass(class.clone()))?;
        }
        if let Some(priority) = self.priority {
            if !(-MAX_PRIORITY..=MAX_PRIORITY).contains(&priority) {
                return Err(ValidationError::Invalid(format!(
                    "priority {} is outside -{}..={}",
                    priority, MAX_PRIORITY, MAX_PRIORITY
                )));
            }
            move_data.priority = priority as i8;
        }
        Ok(move_data)
    }
}

fn parse_type(name: &str) -> ValidationResult<PokemonType> {
    PokemonType::from_str(name.trim()).map_err(|_| ValidationError::UnknownType(name.to_string()))
}

/// "Choice Band", "choice-band" and "ChoiceBand" all name the same item.
fn parse_item(name: &str) -> ValidationResult<HeldItem> {
    let compact: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    HeldItem::from_str(&compact).map_err(|_| ValidationError::UnknownItem(name.to_string()))
}

fn parse_tool(name: Option<&str>) -> ValidationResult<CaptureTool> {
    let Some(name) = name else {
        return Ok(CaptureTool::default());
    };
    let compact: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    CaptureTool::from_str(&compact)
        .map_err(|_| ValidationError::Invalid(format!("unknown capture tool '{}'", name)))
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DamageRequest {
    pub attacker: CombatantSpec,
    pub defender: CombatantSpec,
    #[serde(rename = "move")]
    pub move_spec: MoveSpec,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    pub pokemon: CombatantSpec,
    /// Fill missing IVs with the trained default instead of the fresh-catch one.
    #[serde(default)]
    pub trained: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub name: String,
    pub level: u8,
    pub nature: Nature,
    pub ivs: IvSet,
    pub evs: EvSet,
    pub stats: CalculatedStats,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessRequest {
    pub attack_type: String,
    pub defender_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessResponse {
    pub multiplier: f64,
    pub tier: EffectivenessTier,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRequest {
    pub companion_level: i64,
    /// Type names the generator should favour.
    #[serde(default)]
    pub bias_types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    pub target: CombatantSpec,
    #[schemars(description = "Poke Ball, Great Ball or Ultra Ball")]
    pub tool: Option<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequest {
    pub companion: CombatantSpec,
    pub defeated: CombatantSpec,
    #[serde(default)]
    pub trainer_battle: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceResponse {
    pub exp_gained: u32,
    pub report: LevelUpReport,
    pub ev_gains: String,
    pub stats: CalculatedStats,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[schemars(description = "Species name or dex number, or a move name")]
    pub query: String,
}

pub fn calculate_damage(
    ctx: &EngineContext<'_>,
    request: &DamageRequest,
    rng: &mut dyn RandomSource,
) -> ValidationResult<DamageResult> {
    let ivs = &ctx.config.ivs;
    let attacker = request.attacker.build(ctx.data, ivs, IvContext::Trained)?;
    let defender = request.defender.build(ctx.data, ivs, IvContext::Trained)?;
    let move_data = request.move_spec.resolve(&ctx.data.moves)?;
    Ok(DamageResolver::new(&ctx.config.damage).resolve(&attacker, &defender, &move_data, rng))
}

pub fn calculate_stats(
    ctx: &EngineContext<'_>,
    request: &StatsRequest,
) -> ValidationResult<StatsResponse> {
    let context = if request.trained {
        IvContext::Trained
    } else {
        IvContext::FreshCatch
    };
    let pokemon = request.pokemon.build(ctx.data, &ctx.config.ivs, context)?;
    Ok(StatsResponse {
        name: pokemon.name.clone(),
        level: pokemon.level(),
        nature: pokemon.nature(),
        ivs: *pokemon.ivs(),
        evs: *pokemon.evs(),
        stats: *pokemon.stats(),
    })
}

pub fn type_effectiveness(request: &EffectivenessRequest) -> ValidationResult<EffectivenessResponse> {
    let attack = parse_type(&request.attack_type)?;
    if request.defender_types.is_empty() || request.defender_types.len() > 2 {
        return Err(ValidationError::Invalid(
            "a defender has one or two types".to_string(),
        ));
    }
    let defenders = request
        .defender_types
        .iter()
        .map(|name| parse_type(name))
        .collect::<ValidationResult<Vec<_>>>()?;
    let multiplier = effectiveness_of(attack, &defenders);
    Ok(EffectivenessResponse {
        multiplier,
        tier: EffectivenessTier::from_multiplier(multiplier),
        message: effectiveness_message(multiplier).to_string(),
    })
}

pub fn generate_encounter(
    ctx: &EngineContext<'_>,
    request: &EncounterRequest,
    rng: &mut dyn RandomSource,
) -> ValidationResult<Encounter> {
    let level = request.companion_level;
    if !(MIN_LEVEL as i64..=MAX_LEVEL as i64).contains(&level) {
        return Err(ValidationError::LevelOutOfRange(level));
    }
    let bias = request
        .bias_types
        .iter()
        .map(|name| parse_type(name))
        .collect::<ValidationResult<Vec<_>>>()?;
    Ok(EncounterGenerator::new(ctx.data, ctx.config).generate(&bias, level as u8, rng))
}

/// One throw at a described wild combatant. Fresh-catch IV defaults apply.
pub fn attempt_capture(
    ctx: &EngineContext<'_>,
    request: &CaptureRequest,
    rng: &mut dyn RandomSource,
) -> InterfaceResult<CaptureOutcome> {
    let tool = parse_tool(request.tool.as_deref())?;
    let wild = request
        .target
        .build(ctx.data, &ctx.config.ivs, IvContext::FreshCatch)?;
    let species = ctx.data.species.get_or_fallback(wild.species_id);
    let mut encounter = Encounter::new(wild, &species, &ctx.config.catch, SystemTime::now());
    Ok(encounter.attempt_capture(tool, rng)?)
}

pub fn experience_gain(
    ctx: &EngineContext<'_>,
    request: &ExperienceRequest,
) -> ValidationResult<ExperienceResponse> {
    let ivs = &ctx.config.ivs;
    let mut companion = request.companion.build(ctx.data, ivs, IvContext::Trained)?;
    let defeated = request.defeated.build(ctx.data, ivs, IvContext::Trained)?;
    let kind = if request.trainer_battle {
        BattleKind::Trainer
    } else {
        BattleKind::Wild
    };

    let exp_gained = exp_gain(
        defeated.level(),
        defeated.base_exp(),
        companion.level(),
        kind,
        &ctx.config.leveling,
    );
    let report = companion.defeat(&defeated, kind, &ctx.config.leveling);
    Ok(ExperienceResponse {
        exp_gained,
        report,
        ev_gains: format_ev_gains(&defeated.ev_yield()),
        stats: *companion.stats(),
    })
}

/// Species by dex number or name.
pub fn lookup_species(ctx: &EngineContext<'_>, query: &str) -> ValidationResult<String> {
    let query = query.trim();
    let found = match query.parse::<u16>() {
        Ok(id) => ctx.data.species.get(id),
        Err(_) => ctx.data.species.find_by_name(query),
    };
    found
        .map(display_species)
        .ok_or_else(|| ValidationError::Invalid(format!("unknown species '{}'", query)))
}

pub fn lookup_move(ctx: &EngineContext<'_>, query: &str) -> ValidationResult<String> {
    ctx.data
        .moves
        .get(query)
        .map(format_move)
        .ok_or_else(|| ValidationError::Invalid(format!("unknown move '{}'", query.trim())))
}

/// Tool names accepted by [`call_tool`].
pub const TOOL_NAMES: [&str; 8] = [
    "calculate_damage",
    "calculate_stats",
    "type_effectiveness",
    "generate_encounter",
    "attempt_capture",
    "experience_gain",
    "lookup_species",
    "lookup_move",
];

/// Dispatches a tool call with raw JSON arguments and returns its JSON response.
pub fn call_tool(
    ctx: &EngineContext<'_>,
    name: &str,
    args: Value,
    rng: &mut dyn RandomSource,
) -> InterfaceResult<Value> {
    let response = match name {
        "calculate_damage" => {
            serde_json::to_value(calculate_damage(ctx, &serde_json::from_value(args)?, rng)?)?
        }
        "calculate_stats" => {
            serde_json::to_value(calculate_stats(ctx, &serde_json::from_value(args)?)?)?
        }
        "type_effectiveness" => {
            serde_json::to_value(type_effectiveness(&serde_json::from_value(args)?)?)?
        }
        "generate_encounter" => {
            serde_json::to_value(generate_encounter(ctx, &serde_json::from_value(args)?, rng)?)?
        }
        "attempt_capture" => {
            serde_json::to_value(attempt_capture(ctx, &serde_json::from_value(args)?, rng)?)?
        }
        "experience_gain" => {
            serde_json::to_value(experience_gain(ctx, &serde_json::from_value(args)?)?)?
        }
        "lookup_species" => {
            let request: LookupRequest = serde_json::from_value(args)?;
            Value::String(lookup_species(ctx, &request.query)?)
        }
        "lookup_move" => {
            let request: LookupRequest = serde_json::from_value(args)?;
            Value::String(lookup_move(ctx, &request.query)?)
        }
        other => {
            return Err(InterfaceError::Validation(ValidationError::Invalid(format!(
                "unknown tool '{}'",
                other
            ))))
        }
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::catch::CaptureError;
    use crate::battle::damage::DamageKind;
    use crate::rng::ScriptedRng;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn data() -> &'static GameData {
        GameData::shared().unwrap()
    }

    fn spec(value: Value) -> CombatantSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_follow_iv_context() {
        let config = EngineConfig::default();
        let pikachu = spec(json!({ "species": 25 }));

        let trained = pikachu
            .build(data(), &config.ivs, IvContext::Trained)
            .unwrap();
        let fresh = pikachu
            .build(data(), &config.ivs, IvContext::FreshCatch)
            .unwrap();

        assert_eq!(trained.level(), 50);
        assert_eq!(trained.nature(), Nature::Hardy);
        assert_eq!(trained.ivs(), &IvSet::uniform(31));
        assert_eq!(fresh.ivs(), &IvSet::uniform(15));
        assert_eq!(trained.max_hp(), 110);
        assert!(fresh.max_hp() < trained.max_hp());
    }

    #[test]
    fn test_full_description_is_honoured() {
        let config = EngineConfig::default();
        let pikachu = spec(json!({
            "species": 25,
            "level": 50,
            "nature": "Timid",
            "ivs": { "attack": 0 },
            "evs": { "speed": 252, "spAttack": 252 },
            "item": "Choice Scarf",
            "currentHp": 40
        }))
        .build(data(), &config.ivs, IvContext::Trained)
        .unwrap();

        assert_eq!(pikachu.nature(), Nature::Timid);
        assert_eq!(pikachu.ivs().attack, 0);
        assert_eq!(pikachu.ivs().speed, 31);
        assert_eq!(pikachu.evs().total(), 504);
        assert_eq!(pikachu.item(), Some(HeldItem::ChoiceScarf));
        assert_eq!(pikachu.current_hp(), 40);
    }

    #[test]
    fn test_unknown_nature_is_neutral() {
        let config = EngineConfig::default();
        let pokemon = spec(json!({ "species": 25, "nature": "timid" }))
            .build(data(), &config.ivs, IvContext::Trained)
            .unwrap();
        assert_eq!(pokemon.nature(), Nature::Hardy);
    }

    #[rstest]
    #[case(json!({ "species": 25, "level": 0 }), ValidationError::LevelOutOfRange(0))]
    #[case(json!({ "species": 25, "level": 101 }), ValidationError::LevelOutOfRange(101))]
    #[case(
        json!({ "species": 25, "ivs": { "speed": 32 } }),
        ValidationError::IvOutOfRange { stat: Stat::Speed, value: 32 }
    )]
    #[case(
        json!({ "species": 25, "ivs": { "hp": -1 } }),
        ValidationError::IvOutOfRange { stat: Stat::Hp, value: -1 }
    )]
    #[case(
        json!({ "species": 25, "evs": { "attack": 253 } }),
        ValidationError::EvOutOfRange { stat: Stat::Attack, value: 253 }
    )]
    #[case(
        json!({ "species": 25, "evs": { "hp": 252, "attack": 252, "speed": 8 } }),
        ValidationError::EvTotalExceeded(512)
    )]
    #[case(
        json!({ "species": 25, "item": "Leftovers" }),
        ValidationError::UnknownItem("Leftovers".to_string())
    )]
    #[case(
        json!({ "species": 25, "currentHp": 500 }),
        ValidationError::HpOutOfRange { current: 500, max: 110 }
    )]
    fn test_boundary_rejects_bad_combatants(#[case] request: Value, #[case] expected: ValidationError) {
        let config = EngineConfig::default();
        let result = spec(request).build(data(), &config.ivs, IvContext::Trained);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn test_misspelled_stat_key_is_rejected() {
        let result: Result<CombatantSpec, _> =
            serde_json::from_value(json!({ "species": 25, "evs": { "sp_attack": 10 } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_move_spec_resolution() {
        let moves = &data().moves;

        let thunderbolt = MoveSpec::named("thunderbolt").resolve(moves).unwrap();
        assert_eq!(thunderbolt.power, Some(90));

        let unknown = MoveSpec::named("Mega Splash").resolve(moves).unwrap();
        assert_eq!(unknown, MoveData::fallback());

        let custom = MoveSpec {
            name: "Mega Splash".to_string(),
            move_type: Some("water".to_string()),
            power: Some(70),
            damage_class: Some("special".to_string()),
            ..MoveSpec::default()
        }
        .resolve(moves)
        .unwrap();
        assert_eq!(custom.name, "Mega Splash");
        assert_eq!(custom.move_type, PokemonType::Water);
        assert_eq!(custom.damage_class, DamageClass::Special);
        assert_eq!(custom.accuracy, 100);

        let weaker = MoveSpec {
            power: Some(10),
            ..MoveSpec::named("Hyper Beam")
        }
        .resolve(moves)
        .unwrap();
        assert_eq!(weaker.power, Some(10));
        assert_eq!(weaker.accuracy, 90);
    }

    #[rstest]
    #[case(MoveSpec { accuracy: Some(101), ..MoveSpec::named("Tackle") }, ValidationError::AccuracyOutOfRange(101))]
    #[case(MoveSpec { move_type: Some("Sound".to_string()), ..MoveSpec::named("Tackle") }, ValidationError::UnknownType("Sound".to_string()))]
    #[case(MoveSpec { damage_class: Some("magic".to_string()), ..MoveSpec::named("Tackle") }, ValidationError::UnknownDamageClass("magic".to_string()))]
    fn test_move_spec_rejections(#[case] spec: MoveSpec, #[case] expected: ValidationError) {
        assert_eq!(spec.resolve(&data().moves), Err(expected));
    }

    #[test]
    fn test_calculate_damage_through_json() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        let args = json!({
            "attacker": { "species": 4 },
            "defender": { "species": 19 },
            "move": { "name": "Ember" }
        });

        let mut rng = ScriptedRng::new_for_test(vec![0.0, 0.99, 1.0]);
        let response = call_tool(&ctx, "calculate_damage", args, &mut rng).unwrap();

        assert_eq!(response["damage"], json!(40));
        assert_eq!(response["stab"], json!(true));
        assert_eq!(response["effectivenessTier"], json!("normal"));
        assert_eq!(response["kind"], json!("standard"));
    }

    #[test]
    fn test_calculate_damage_reports_fixed_kind() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        let request = DamageRequest {
            attacker: spec(json!({ "species": 6, "level": 42 })),
            defender: spec(json!({ "species": 143 })),
            move_spec: MoveSpec::named("Seismic Toss"),
        };
        let result = calculate_damage(&ctx, &request, &mut ScriptedRng::constant(0.0)).unwrap();
        assert_eq!(result.kind, DamageKind::Fixed);
        assert_eq!(result.damage, 42);
    }

    #[test]
    fn test_calculate_stats_uses_fresh_catch_by_default() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        let request = StatsRequest {
            pokemon: spec(json!({ "species": 25 })),
            trained: false,
        };
        let response = calculate_stats(&ctx, &request).unwrap();
        assert_eq!(response.ivs, IvSet::uniform(15));

        let trained = calculate_stats(
            &ctx,
            &StatsRequest {
                trained: true,
                ..request
            },
        )
        .unwrap();
        assert_eq!(trained.stats.speed, 110);
    }

    #[rstest]
    #[case("Electric", vec!["Water", "Flying"], 4.0, EffectivenessTier::Super)]
    #[case("ground", vec!["flying"], 0.0, EffectivenessTier::Immune)]
    #[case("Fire", vec!["Water", "Rock"], 0.25, EffectivenessTier::Weak)]
    #[case("Normal", vec!["Psychic"], 1.0, EffectivenessTier::Normal)]
    fn test_type_effectiveness_tool(
        #[case] attack: &str,
        #[case] defenders: Vec<&str>,
        #[case] multiplier: f64,
        #[case] tier: EffectivenessTier,
    ) {
        let request = EffectivenessRequest {
            attack_type: attack.to_string(),
            defender_types: defenders.into_iter().map(String::from).collect(),
        };
        let response = type_effectiveness(&request).unwrap();
        assert_eq!(response.multiplier, multiplier);
        assert_eq!(response.tier, tier);
    }

    #[test]
    fn test_type_effectiveness_needs_one_or_two_types() {
        let request = EffectivenessRequest {
            attack_type: "Fire".to_string(),
            defender_types: vec![],
        };
        assert!(type_effectiveness(&request).is_err());
    }

    #[test]
    fn test_generate_encounter_validates_inputs() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        let mut rng = ScriptedRng::constant(0.0);

        let bad_level = EncounterRequest {
            companion_level: 0,
            bias_types: vec![],
        };
        assert_eq!(
            generate_encounter(&ctx, &bad_level, &mut rng).map(|e| e.is_active()),
            Err(ValidationError::LevelOutOfRange(0))
        );

        let bad_type = EncounterRequest {
            companion_level: 10,
            bias_types: vec!["Cosmic".to_string()],
        };
        assert_eq!(
            generate_encounter(&ctx, &bad_type, &mut rng).map(|e| e.is_active()),
            Err(ValidationError::UnknownType("Cosmic".to_string()))
        );

        let good = EncounterRequest {
            companion_level: 10,
            bias_types: vec!["Water".to_string()],
        };
        let encounter = generate_encounter(&ctx, &good, &mut rng).unwrap();
        assert!(encounter.is_active());
    }

    #[test]
    fn test_attempt_capture_tool() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);

        let request = CaptureRequest {
            target: spec(json!({ "species": 16, "level": 5, "currentHp": 1 })),
            tool: Some("Great Ball".to_string()),
        };
        let outcome = attempt_capture(&ctx, &request, &mut ScriptedRng::constant(0.0)).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.tool, CaptureTool::GreatBall);

        let fainted = CaptureRequest {
            target: spec(json!({ "species": 16, "currentHp": 0 })),
            tool: None,
        };
        let result = attempt_capture(&ctx, &fainted, &mut ScriptedRng::constant(0.0));
        assert!(matches!(
            result,
            Err(InterfaceError::Capture(CaptureError::TargetFainted { .. }))
        ));

        let unknown_tool = CaptureRequest {
            tool: Some("Master Ball".to_string()),
            ..request
        };
        let result = attempt_capture(&ctx, &unknown_tool, &mut ScriptedRng::constant(0.0));
        assert!(matches!(result, Err(InterfaceError::Validation(_))));
    }

    #[test]
    fn test_experience_gain_tool() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        let request = ExperienceRequest {
            companion: spec(json!({ "species": 25, "level": 10 })),
            defeated: spec(json!({ "species": 16, "level": 10 })),
            trainer_battle: false,
        };

        let response = experience_gain(&ctx, &request).unwrap();
        assert_eq!(response.exp_gained, exp_gain(10, 50, 10, BattleKind::Wild, &config.leveling));
        assert_eq!(response.report.new_total_exp, 1000 + response.exp_gained);
        assert_eq!(response.ev_gains, "+1 Speed");

        let trainer = experience_gain(
            &ctx,
            &ExperienceRequest {
                trainer_battle: true,
                ..request
            },
        )
        .unwrap();
        assert!(trainer.exp_gained > response.exp_gained);
    }

    #[test]
    fn test_lookups() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        assert!(lookup_species(&ctx, "25").unwrap().contains("Pikachu"));
        assert!(lookup_species(&ctx, "snorlax").unwrap().contains("#143"));
        assert!(lookup_species(&ctx, "Missingno").is_err());
        assert!(lookup_move(&ctx, "quick attack").unwrap().contains("Priority: +1"));
    }

    #[test]
    fn test_call_tool_errors() {
        let config = EngineConfig::default();
        let ctx = EngineContext::new(data(), &config);
        let mut rng = ScriptedRng::constant(0.0);

        let malformed = call_tool(&ctx, "calculate_damage", json!({ "attacker": 4 }), &mut rng);
        assert!(matches!(malformed, Err(InterfaceError::Json(_))));

        let unknown = call_tool(&ctx, "start_battle", json!({}), &mut rng);
        assert!(matches!(unknown, Err(InterfaceError::Validation(_))));
    }
}
