use phf::phf_map;
use schema::{normalize_move_name, MoveData};
use std::collections::HashMap;
use tracing::warn;

/// Priority of named fast moves. Takes precedence over the catalog's own priority.
static PRIORITY_MOVES: phf::Map<&'static str, i8> = phf_map! {
    "quick-attack" => 1,
    "mach-punch" => 1,
    "bullet-punch" => 1,
    "ice-shard" => 1,
    "aqua-jet" => 1,
    "shadow-sneak" => 1,
    "sucker-punch" => 1,
    "extreme-speed" => 2,
    "fake-out" => 3,
    "protect" => 4,
    "detect" => 4,
};

/// How a zero-power damaging move computes its damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedDamage {
    Flat(u16),
    AttackerLevel,
    /// `floor(level · (0.5 + unit draw))`
    LevelScaledRandom,
    HalfTargetHp,
    /// Target current HP minus one.
    TargetHpMinusOne,
}

static FIXED_DAMAGE_MOVES: phf::Map<&'static str, FixedDamage> = phf_map! {
    "dragon-rage" => FixedDamage::Flat(40),
    "sonic-boom" => FixedDamage::Flat(20),
    "seismic-toss" => FixedDamage::AttackerLevel,
    "night-shade" => FixedDamage::AttackerLevel,
    "psywave" => FixedDamage::LevelScaledRandom,
    "super-fang" => FixedDamage::HalfTargetHp,
    "endeavor" => FixedDamage::TargetHpMinusOne,
};

/// Priority tier for a move: the named table first, then the move's own value.
pub fn move_priority(move_data: &MoveData) -> i8 {
    PRIORITY_MOVES
        .get(move_data.normalized_name().as_str())
        .copied()
        .unwrap_or(move_data.priority)
}

/// Fixed-damage rule for a move, if it has one.
pub fn fixed_damage_rule(move_data: &MoveData) -> Option<FixedDamage> {
    FIXED_DAMAGE_MOVES
        .get(move_data.normalized_name().as_str())
        .copied()
}

/// Read-only move catalog keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct MoveRegistry {
    entries: Vec<MoveData>,
    by_name: HashMap<String, usize>,
}

impl MoveRegistry {
    pub fn new(entries: Vec<MoveData>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(index, move_data)| (move_data.normalized_name(), index))
            .collect();
        Self { entries, by_name }
    }

    /// Accepts display names ("Quick Attack") and normalized ones ("quick-attack").
    pub fn get(&self, name: &str) -> Option<&MoveData> {
        self.by_name
            .get(&normalize_move_name(name))
            .map(|&index| &self.entries[index])
    }

    /// Move by name, or Tackle when the name is unknown.
    pub fn get_or_fallback(&self, name: &str) -> MoveData {
        match self.get(name) {
            Some(move_data) => move_data.clone(),
            None => {
                warn!(move_name = name, "unknown move, using fallback");
                MoveData::fallback()
            }
        }
    }

    pub fn all(&self) -> &[MoveData] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-line summary used by lookups.
pub fn format_move(move_data: &MoveData) -> String {
    let power = match move_data.formula_power() {
        Some(power) => power.to_string(),
        None => "-".to_string(),
    };
    let mut line = format!(
        "{} [{} / {:?}] Power: {}, Accuracy: {}%",
        move_data.name, move_data.move_type, move_data.damage_class, power, move_data.accuracy
    );
    let priority = move_priority(move_data);
    if priority != 0 {
        line.push_str(&format!(", Priority: {:+}", priority));
    }
    line
}
