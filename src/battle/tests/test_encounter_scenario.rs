#[cfg(test)]
mod tests {
    use crate::battle::catch::{CaptureError, CaptureTool};
    use crate::battle::damage::DamageResolver;
    use crate::battle::tests::common::{catalog_move, test_data, test_encounter, TestCombatantBuilder};
    use crate::battle::turn_order::{resolve_exchange, Side};
    use crate::config::{EngineConfig, PerRarity};
    use crate::encounter::{EncounterGenerator, EncounterStatus};
    use crate::progression::BattleKind;
    use crate::rng::{ScriptedRng, StdRandom};
    use pretty_assertions::assert_eq;
    use schema::{PokemonType, Rarity};

    #[test]
    fn test_rare_encounters_stay_in_their_level_band() {
        let mut config = EngineConfig::default();
        config.encounter.rarity_weights = PerRarity {
            common: 0.0,
            uncommon: 0.0,
            rare: 1.0,
            legendary: 0.0,
        };
        let generator = EncounterGenerator::new(test_data(), &config);
        let mut rng = StdRandom::seeded(20);

        for _ in 0..200 {
            let encounter = generator.generate(&[], 20, &mut rng);
            let level = encounter.wild.level();
            assert!((22..=28).contains(&level), "level {} outside the rare band", level);
            assert_eq!(encounter.rarity, Rarity::Rare);
            assert!(encounter.is_active());
            assert_eq!(encounter.wild.current_hp(), encounter.wild.max_hp());
        }
    }

    #[test]
    fn test_forced_bias_only_yields_matching_types() {
        let mut config = EngineConfig::default();
        config.encounter.bias_probability = 1.0;
        let generator = EncounterGenerator::new(test_data(), &config);
        let mut rng = StdRandom::seeded(7);

        for _ in 0..100 {
            let encounter = generator.generate(&[PokemonType::Water], 15, &mut rng);
            let rarity = encounter.rarity;
            let pool_has_water = test_data()
                .species
                .by_rarity(rarity)
                .iter()
                .any(|species| species.has_type(PokemonType::Water));
            if pool_has_water {
                assert!(
                    encounter.wild.has_type(PokemonType::Water),
                    "{} is not Water",
                    encounter.wild.name
                );
            }
        }
    }

    #[test]
    fn test_weaken_then_capture() {
        let config = EngineConfig::default();
        let resolver = DamageResolver::new(&config.damage);
        let mut companion = TestCombatantBuilder::new(25, 20).build();
        let mut encounter = test_encounter(TestCombatantBuilder::new(16, 10).build());

        // Pikachu outspeeds Pidgey; Tackle lands without a critical, then Pidgey answers.
        let mut rng = ScriptedRng::new_for_test(vec![0.0, 0.99, 0.0, 0.0, 0.99, 0.0]);
        let report = resolve_exchange(
            &mut companion,
            &catalog_move("Tackle"),
            &mut encounter.wild,
            &catalog_move("Tackle"),
            &resolver,
            &mut rng,
        );
        assert_eq!(report.first, Side::A);
        assert_eq!(report.actions.len(), 2);
        assert_eq!(report.fainted(), None);
        assert!(encounter.wild.current_hp() < encounter.wild.max_hp());

        let outcome = encounter
            .attempt_capture(CaptureTool::GreatBall, &mut ScriptedRng::constant(0.0))
            .unwrap();
        assert!(outcome.success);
        assert_eq!(encounter.status, EncounterStatus::Caught);
        assert!(!encounter.flee());
    }

    #[test]
    fn test_knockout_blocks_capture_and_rewards_companion() {
        let config = EngineConfig::default();
        let resolver = DamageResolver::new(&config.damage);
        let mut companion = TestCombatantBuilder::new(25, 20).build();
        let mut encounter = test_encounter(TestCombatantBuilder::new(16, 10).build());
        let exp_before = companion.total_exp();

        let report = resolve_exchange(
            &mut companion,
            &catalog_move("Thunderbolt"),
            &mut encounter.wild,
            &catalog_move("Tackle"),
            &resolver,
            &mut ScriptedRng::constant(0.5),
        );
        assert_eq!(report.fainted(), Some(Side::B));
        assert!(report.actions[0].result.effectiveness > 1.0);

        let capture = encounter.attempt_capture(CaptureTool::UltraBall, &mut ScriptedRng::constant(0.0));
        assert!(matches!(capture, Err(CaptureError::TargetFainted { .. })));

        let level_up = companion.defeat(&encounter.wild, BattleKind::Wild, &config.leveling);
        assert!(companion.total_exp() > exp_before);
        assert_eq!(level_up.new_total_exp, companion.total_exp());
        assert_eq!(companion.evs().speed, 1);
        assert!(encounter.flee());
        assert_eq!(encounter.status, EncounterStatus::Fled);
    }
}
