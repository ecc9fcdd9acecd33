use crate::stats::{EvSet, MAX_EV_PER_STAT, MAX_EV_TOTAL};
use schema::{EvYield, Stat};

/// Credits an EV yield, stat by stat in `hp..speed` order.
///
/// Each stat stops at 252 and the whole set stops at 510. A stat that only partly
/// fits gets the part that fits; once the total cap is reached nothing more is added.
pub fn apply_ev_yield(evs: &EvSet, ev_yield: &EvYield) -> EvSet {
    let mut updated = *evs;
    let mut room = MAX_EV_TOTAL.saturating_sub(updated.total());

    for stat in Stat::ALL {
        if room == 0 {
            break;
        }
        let offered = ev_yield.get(stat);
        if offered == 0 {
            continue;
        }
        let current = updated.get(stat);
        let stat_room = MAX_EV_PER_STAT.saturating_sub(current);
        let credited = offered.min(stat_room).min(room.min(u8::MAX as u16) as u8);
        updated.set(stat, current + credited);
        room -= credited as u16;
    }

    updated
}

/// Human-readable list of the non-zero entries, e.g. `"+2 Sp. Atk, +1 Speed"`.
pub fn format_ev_gains(ev_yield: &EvYield) -> String {
    Stat::ALL
        .iter()
        .filter_map(|&stat| {
            let amount = ev_yield.get(stat);
            (amount > 0).then(|| format!("+{} {}", amount, stat.display_name()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_per_stat_cap() {
        let evs = EvSet {
            attack: 250,
            ..EvSet::default()
        };
        let updated = apply_ev_yield(
            &evs,
            &EvYield {
                attack: 3,
                ..EvYield::default()
            },
        );
        assert_eq!(updated.attack, 252);
    }

    #[test]
    fn test_total_cap_gives_partial_credit() {
        let evs = EvSet {
            hp: 252,
            attack: 252,
            speed: 5,
            ..EvSet::default()
        };
        assert_eq!(evs.total(), 509);
        let updated = apply_ev_yield(
            &evs,
            &EvYield {
                defense: 2,
                sp_attack: 1,
                ..EvYield::default()
            },
        );
        assert_eq!(updated.defense, 1);
        assert_eq!(updated.sp_attack, 0);
        assert_eq!(updated.total(), 510);
    }

    #[test]
    fn test_full_set_is_unchanged() {
        let evs = EvSet {
            hp: 252,
            attack: 252,
            defense: 6,
            ..EvSet::default()
        };
        let updated = apply_ev_yield(
            &evs,
            &EvYield {
                speed: 3,
                ..EvYield::default()
            },
        );
        assert_eq!(updated, evs);
    }

    #[test]
    fn test_evs_never_decrease() {
        let evs = EvSet {
            sp_defense: 100,
            ..EvSet::default()
        };
        let updated = apply_ev_yield(&evs, &EvYield::default());
        assert_eq!(updated, evs);
    }

    #[test]
    fn test_format_ev_gains() {
        let ev_yield = EvYield {
            sp_attack: 2,
            speed: 1,
            ..EvYield::default()
        };
        assert_eq!(format_ev_gains(&ev_yield), "+2 Sp. Atk, +1 Speed");
        assert_eq!(format_ev_gains(&EvYield::default()), "");
    }
}
