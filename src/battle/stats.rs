use crate::pokemon::Combatant;
use schema::{DamageClass, Stat};

/// Attacking stat used by a move of the given class. Status moves use none.
pub fn effective_attack(attacker: &Combatant, class: DamageClass) -> Option<u16> {
    match class {
        DamageClass::Physical => Some(attacker.stat(Stat::Attack)),
        DamageClass::Special => Some(attacker.stat(Stat::SpAttack)),
        DamageClass::Status => None,
    }
}

/// Defending stat that resists a move of the given class, never below 1.
pub fn effective_defense(defender: &Combatant, class: DamageClass) -> Option<u16> {
    let stat = match class {
        DamageClass::Physical => defender.stat(Stat::Defense),
        DamageClass::Special => defender.stat(Stat::SpDefense),
        DamageClass::Status => return None,
    };
    Some(stat.max(1))
}

/// Speed used for turn order.
pub fn effective_speed(combatant: &Combatant) -> u16 {
    combatant.stat(Stat::Speed)
}
