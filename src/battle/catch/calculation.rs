use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};
use tracing::debug;

pub const MIN_CATCH_RATE: u8 = 1;
pub const MAX_CATCH_RATE: u8 = 255;

/// Capture tool thrown at a wild combatant. Inventory is the caller's concern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum CaptureTool {
    #[default]
    PokeBall,
    GreatBall,
    UltraBall,
}

impl CaptureTool {
    pub fn multiplier(self) -> f64 {
        match self {
            CaptureTool::PokeBall => 1.0,
            CaptureTool::GreatBall => 1.5,
            CaptureTool::UltraBall => 2.0,
        }
    }
}

impl fmt::Display for CaptureTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureTool::PokeBall => "Poke Ball",
            CaptureTool::GreatBall => "Great Ball",
            CaptureTool::UltraBall => "Ultra Ball",
        };
        f.write_str(name)
    }
}

/// Catch rate on the 1..=255 scale.
///
/// `floor((3·max_hp − 2·current_hp) · base_rate · multiplier / (3·max_hp))`, clamped.
/// Lowering `current_hp` never lowers the result.
pub fn calculate_catch_rate(current_hp: u16, max_hp: u16, base_rate: u8, multiplier: f64) -> u8 {
    let max_hp = max_hp.max(1) as f64;
    let current_hp = (current_hp as f64).min(max_hp);
    let rate = ((3.0 * max_hp - 2.0 * current_hp) * base_rate as f64 * multiplier) / (3.0 * max_hp);
    rate.floor().clamp(MIN_CATCH_RATE as f64, MAX_CATCH_RATE as f64) as u8
}

/// Draws an integer in `[0, 255]`; the catch succeeds when it lands below `catch_rate`.
pub fn roll_catch_success(catch_rate: u8, rng: &mut dyn RandomSource) -> (bool, u8) {
    let roll = rng.next_int(0, 255, "catch roll") as u8;
    (roll < catch_rate, roll)
}

/// Success chance shown to the player, as a percentage.
pub fn catch_percentage(catch_rate: u8) -> f64 {
    catch_rate as f64 / 256.0 * 100.0
}

pub fn catch_rate_description(catch_rate: u8) -> &'static str {
    match catch_rate {
        200.. => "Excellent",
        150.. => "Very Good",
        100.. => "Good",
        50.. => "Fair",
        25.. => "Poor",
        _ => "Very Poor",
    }
}

/// Outcome of one capture attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutcome {
    pub success: bool,
    pub catch_rate: u8,
    pub roll: u8,
    pub percentage: f64,
    pub description: String,
    pub tool: CaptureTool,
}

/// Resolves a throw. Pure probability: no HP or inventory changes.
pub fn attempt(
    current_hp: u16,
    max_hp: u16,
    base_rate: u8,
    tool: CaptureTool,
    rng: &mut dyn RandomSource,
) -> CaptureOutcome {
    let catch_rate = calculate_catch_rate(current_hp, max_hp, base_rate, tool.multiplier());
    let (success, roll) = roll_catch_success(catch_rate, rng);
    debug!(current_hp, max_hp, base_rate, %tool, catch_rate, roll, success, "capture roll");
    CaptureOutcome {
        success,
        catch_rate,
        roll,
        percentage: catch_percentage(catch_rate),
        description: catch_rate_description(catch_rate).to_string(),
        tool,
    }
}
