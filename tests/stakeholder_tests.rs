mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use depin_diagnostics::Answerability::{N, P, Y};
    use depin_diagnostics::Metric::*;
    use depin_diagnostics::Verdict::{AtRisk, InsufficientData, No, Yes};
    use depin_diagnostics::{
        evaluate_all_questions, is_known_gap_question, standard_registry, AggregateResult, AnswerContext,
        DemandType, Metric, MetricStats, QuestionAnswer, SimulationParams,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    // ========== E: Users ==========

    #[test]
    fn test_e4_to_e7_service_resilience() {
        let context = ctx_with(
            vec![
                point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (ProCount, 300.0), (MercenaryCount, 700.0), (Demand, 10_000.0), (DemandServed, 9_300.0), (SolvencyScore, 1.05), (ChurnCount, 12.0)]),
                point_with(2, &[(Price, 0.74), (Providers, 930.0), (ProCount, 295.0), (MercenaryCount, 635.0), (Demand, 9_900.0), (DemandServed, 8_300.0), (SolvencyScore, 0.9), (ChurnCount, 40.0)]),
                point_with(3, &[(Price, 0.66), (Providers, 860.0), (ProCount, 290.0), (MercenaryCount, 570.0), (Demand, 9_700.0), (DemandServed, 7_900.0), (SolvencyScore, 0.82), (ChurnCount, 55.0)]),
            ],
            None,
            |p| {
                p.investor_sell_pct = 0.35;
                p.provider_cost_per_week = 85.0;
                p.pro_tier_efficiency = 1.6;
            },
        );
        expect("E4", &context, P, &[AtRisk]);
        expect("E5", &context, P, &[AtRisk, No]);
        expect("E6", &context, P, &[AtRisk, No]);
        expect("E7", &context, P, &[Yes, AtRisk, No]);
    }

    // ========== F: Researchers ==========

    fn research_context() -> AnswerContext {
        let current = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.1), (DemandServed, 9_500.0), (ChurnCount, 10.0), (ProCount, 320.0), (MercenaryCount, 680.0)]),
            point_with(2, &[(Price, 0.9), (Providers, 960.0), (SolvencyScore, 0.98), (DemandServed, 8_900.0), (ChurnCount, 35.0), (ProCount, 315.0), (MercenaryCount, 645.0)]),
            point_with(3, &[(Price, 0.82), (Providers, 920.0), (SolvencyScore, 0.92), (DemandServed, 8_300.0), (ChurnCount, 42.0), (ProCount, 305.0), (MercenaryCount, 615.0)]),
        ];
        let baseline = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.2), (DemandServed, 9_600.0), (ChurnCount, 8.0)]),
            point_with(2, &[(Price, 1.02), (Providers, 1_005.0), (SolvencyScore, 1.18), (DemandServed, 9_700.0), (ChurnCount, 8.0)]),
            point_with(3, &[(Price, 1.03), (Providers, 1_010.0), (SolvencyScore, 1.16), (DemandServed, 9_750.0), (ChurnCount, 9.0)]),
        ];
        ctx_with(current, Some(baseline), |p| {
            p.seed = 1337;
            p.n_sims = 32;
            p.horizon_weeks = 52;
            p.demand_type = DemandType::Growth;
        })
    }

    #[test]
    fn test_f1_to_f14_methodology_diagnostics() {
        let context = research_context();
        for id in ["F1", "F2", "F4", "F5", "F8", "F10"] {
            expect(id, &context, Y, &[Yes]);
        }
        for id in ["F7", "F14"] {
            expect(id, &context, P, &[Yes]);
        }
        for id in ["F3", "F6", "F9", "F11", "F12", "F13"] {
            expect(id, &context, P, &[Yes, AtRisk]);
        }
    }

    #[test]
    fn test_f2_window_names_the_seed() {
        let result = answer("F2", &research_context());
        assert!(result.window.contains("Seed 1337"));
        assert!(result.window.contains("Sims 32"));
    }

    // ========== G: Comparative ==========

    #[test]
    fn test_g2_g3_g5_g7_g8_comparative_robustness() {
        let context = ctx_with(
            vec![
                point_with(1, &[(Price, 1.0), (Demand, 10_000.0), (DemandServed, 9_400.0), (Providers, 1_000.0), (SolvencyScore, 1.05), (ChurnCount, 10.0), (Supply, 1_000_000.0), (Minted, 80_000.0)]),
                point_with(2, &[(Price, 0.75), (Demand, 8_200.0), (DemandServed, 7_400.0), (Providers, 900.0), (SolvencyScore, 0.86), (ChurnCount, 48.0), (Supply, 1_010_000.0), (Minted, 75_000.0)]),
                point_with(3, &[(Price, 0.65), (Demand, 7_000.0), (DemandServed, 6_100.0), (Providers, 820.0), (SolvencyScore, 0.78), (ChurnCount, 62.0), (Supply, 1_020_000.0), (Minted, 70_000.0)]),
            ],
            None,
            |p| {
                p.investor_sell_pct = 0.3;
                p.provider_cost_per_week = 85.0;
            },
        );
        expect("G2", &context, P, &[AtRisk, No]);
        expect("G3", &context, P, &[AtRisk, No]);
        expect("G5", &context, P, &[AtRisk, No]);
        expect("G7", &context, P, &[AtRisk]);

        let anti_dilution = ctx(vec![point_with(1, &[(Price, 1.0), (Supply, 2_000_000.0), (Minted, 6_000.0), (SolvencyScore, 1.15), (Demand, 10_000.0), (DemandServed, 8_600.0), (Utilization, 88.0)])]);
        expect("G8", &anti_dilution, P, &[Yes, AtRisk]);
    }

    // ========== H: Token ==========

    #[test]
    fn test_h1_to_h9_treasury_risk() {
        let stressed = vec![
            point_with(1, &[(Price, 1.0), (Supply, 1_000_000.0), (Minted, 90_000.0), (Burned, 70_000.0), (Providers, 1_000.0), (ChurnCount, 10.0), (SolvencyScore, 1.05), (DailyMintUsd, 10_000.0), (DailyBurnUsd, 8_500.0), (TreasuryBalance, 220_000.0), (UnderwaterCount, 180.0)]),
            point_with(2, &[(Price, 0.72), (Supply, 1_010_000.0), (Minted, 95_000.0), (Burned, 55_000.0), (Providers, 950.0), (ChurnCount, 40.0), (SolvencyScore, 0.86), (DailyMintUsd, 13_000.0), (DailyBurnUsd, 7_500.0), (TreasuryBalance, 210_000.0), (UnderwaterCount, 260.0)]),
            point_with(3, &[(Price, 0.58), (Supply, 1_025_000.0), (Minted, 100_000.0), (Burned, 45_000.0), (Providers, 870.0), (ChurnCount, 62.0), (SolvencyScore, 0.78), (DailyMintUsd, 14_500.0), (DailyBurnUsd, 7_000.0), (TreasuryBalance, 195_000.0), (UnderwaterCount, 340.0)]),
        ];
        let baseline = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.2), (ChurnCount, 8.0), (Minted, 80_000.0), (Burned, 82_000.0)]),
            point_with(2, &[(Price, 1.02), (Providers, 1_010.0), (SolvencyScore, 1.18), (ChurnCount, 8.0), (Minted, 78_000.0), (Burned, 84_000.0)]),
            point_with(3, &[(Price, 1.03), (Providers, 1_015.0), (SolvencyScore, 1.16), (ChurnCount, 9.0), (Minted, 76_000.0), (Burned, 85_000.0)]),
        ];
        let context = ctx_with(stressed, Some(baseline), |p| {
            p.investor_sell_pct = 0.35;
            p.initial_liquidity = 120_000.0;
            p.provider_cost_per_week = 95.0;
        });

        expect("H1", &context, Y, &[AtRisk, Yes]);
        expect("H2", &context, Y, &[No, AtRisk, Yes]);
        expect("H3", &context, Y, &[AtRisk]);
        expect("H4", &context, P, &[AtRisk, No]);
        expect("H5", &context, P, &[Yes, No]);
        expect("H6", &context, P, &[AtRisk, No]);
        expect("H7", &context, P, &[Yes, AtRisk, No]);
        expect("H8", &context, P, &[Yes, AtRisk, No]);
        expect("H9", &context, Y, &[AtRisk, No]);
    }

    // ========== Randomized Invariants ==========

    const METRICS: [Metric; 12] = [
        Price,
        Supply,
        Demand,
        DemandServed,
        Providers,
        Capacity,
        Minted,
        Burned,
        SolvencyScore,
        ChurnCount,
        ProCount,
        MercenaryCount,
    ];

    fn random_series(rng: &mut ChaCha8Rng, weeks: u32) -> Vec<AggregateResult> {
        (1..=weeks)
            .map(|t| {
                let mut p = point(t);
                for metric in METRICS {
                    // Occasionally drop or poison a metric to exercise the fallbacks.
                    match rng.gen_range(0..20) {
                        0 => p.set(metric, MetricStats::constant(f64::NAN)),
                        1 => p.set(metric, MetricStats::constant(0.0)),
                        _ => p.set(metric, MetricStats::constant(p.mean(metric) * rng.gen_range(0.3..1.7))),
                    }
                }
                p
            })
            .collect()
    }

    fn random_context(seed: u64) -> AnswerContext {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let weeks = rng.gen_range(0..14);
        let current = random_series(&mut rng, weeks);
        let baseline = if rng.gen_bool(0.6) {
            let baseline_weeks = rng.gen_range(1..14);
            Some(random_series(&mut rng, baseline_weeks))
        } else {
            None
        };
        let params = SimulationParams {
            competitor_yield: rng.gen_range(0.0..2.0),
            investor_sell_pct: rng.gen_range(0.0..0.5),
            provider_cost_per_week: rng.gen_range(20.0..150.0),
            pro_tier_efficiency: rng.gen_range(0.0..2.5),
            ..SimulationParams::default()
        };
        let context = AnswerContext::new(format!("random-{}", seed), params, current);
        match baseline {
            Some(series) => context.with_baseline(series),
            None => context,
        }
    }

    fn well_formed(answer: &QuestionAnswer) -> bool {
        !answer.summary.is_empty()
            && !answer.window.is_empty()
            && (0.0..=1.0).contains(&answer.confidence)
    }

    #[test]
    fn test_random_contexts_yield_well_formed_answers() {
        for seed in 0..40 {
            let context = random_context(seed);
            let answers = evaluate_all_questions(&context, standard_registry());
            assert_eq!(answers.len(), 103);
            for answer in &answers {
                assert!(well_formed(answer), "seed {} {}: {:?}", seed, answer.question_id, answer.summary);
                assert!(
                    !answer.summary.starts_with("Evaluator failed"),
                    "seed {} {}: {}",
                    seed,
                    answer.question_id,
                    answer.summary
                );
            }
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        for seed in [3, 17, 29] {
            let context = random_context(seed);
            let first = evaluate_all_questions(&context, standard_registry());
            let second = evaluate_all_questions(&context, standard_registry());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_not_answerable_implies_insufficient_data() {
        for seed in 100..120 {
            let context = random_context(seed);
            for answer in evaluate_all_questions(&context, standard_registry()) {
                if answer.answerability == N {
                    assert_eq!(answer.verdict, InsufficientData, "{}", answer.question_id);
                    assert!(!answer.reproducible, "{}", answer.question_id);
                }
                if is_known_gap_question(&answer.question_id) {
                    assert_eq!(answer.answerability, N);
                }
            }
        }
    }
}
