use crate::battle::damage::{DamageResolver, DamageResult};
use crate::battle::stats::effective_speed;
use crate::move_data::move_priority;
use crate::pokemon::Combatant;
use crate::rng::RandomSource;
use schema::MoveData;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// One of the two combatants in an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Which side acts first: higher move priority, then higher speed, then a coin flip
/// (a draw below 0.5 picks side A). The coin is only drawn on a full tie.
pub fn order(
    a: &Combatant,
    move_a: &MoveData,
    b: &Combatant,
    move_b: &MoveData,
    rng: &mut dyn RandomSource,
) -> Side {
    let by_priority = move_priority(move_a).cmp(&move_priority(move_b));
    let by_speed = effective_speed(a).cmp(&effective_speed(b));

    match by_priority.then(by_speed) {
        Ordering::Greater => Side::A,
        Ordering::Less => Side::B,
        Ordering::Equal => {
            if rng.next_unit("speed tie") < 0.5 {
                Side::A
            } else {
                Side::B
            }
        }
    }
}

/// One attack inside an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeAction {
    pub actor: Side,
    pub move_name: String,
    pub result: DamageResult,
    pub target_fainted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeReport {
    pub first: Side,
    pub actions: Vec<ExchangeAction>,
}

impl ExchangeReport {
    /// The side whose combatant fainted during the exchange, if any.
    pub fn fainted(&self) -> Option<Side> {
        self.actions
            .iter()
            .find(|action| action.target_fainted)
            .map(|action| action.actor.other())
    }
}

/// Runs one exchange: order the two actors, resolve and apply the first attack, then
/// the second attack unless someone has fainted.
pub fn resolve_exchange(
    a: &mut Combatant,
    move_a: &MoveData,
    b: &mut Combatant,
    move_b: &MoveData,
    resolver: &DamageResolver<'_>,
    rng: &mut dyn RandomSource,
) -> ExchangeReport {
    let first = order(a, move_a, b, move_b, rng);
    let mut actions = Vec::with_capacity(2);

    for actor in [first, first.other()] {
        if a.is_fainted() || b.is_fainted() {
            break;
        }
        let (attacker, defender, move_data) = match actor {
            Side::A => (&*a, &mut *b, move_a),
            Side::B => (&*b, &mut *a, move_b),
        };
        let result = resolver.resolve(attacker, defender, move_data, rng);
        let target_fainted = defender.take_damage(result.damage);
        debug!(
            ?actor,
            move_name = %move_data.name,
            damage = result.damage,
            target_hp = defender.current_hp(),
            "exchange action"
        );
        actions.push(ExchangeAction {
            actor,
            move_name: move_data.name.clone(),
            result,
            target_fainted,
        });
    }

    ExchangeReport { first, actions }
}
