mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use depin_diagnostics::Answerability::{N, P, Y};
    use depin_diagnostics::Metric::*;
    use depin_diagnostics::Verdict::{AtRisk, InsufficientData, No, Yes};
    use depin_diagnostics::{
        canonical_ids, evaluate_all_questions, standard_registry, summarize_coverage, validate_registry_coverage,
        DemandType, EmissionModel,
    };

    // ========== Registry & Coverage ==========

    #[test]
    fn test_registers_all_canonical_questions() {
        let ids = canonical_ids();
        assert_eq!(ids.len(), 103);
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 103);

        let coverage = validate_registry_coverage(standard_registry());
        assert!(coverage.valid);
        assert!(coverage.missing.is_empty());
        assert!(coverage.unexpected.is_empty());
    }

    #[test]
    fn test_evaluates_all_questions_into_structured_payload() {
        let context = ctx(vec![point(1), point(2)]);
        let answers = evaluate_all_questions(&context, standard_registry());
        assert_eq!(answers.len(), 103);
        assert!(answers.iter().all(|a| !a.summary.is_empty()));

        let summary = summarize_coverage(&answers);
        assert_eq!(summary.total.questions, 103);
        assert_eq!(summary.by_section.len(), 9);
    }

    #[test]
    fn test_unknown_question_is_not_registered() {
        let result = answer("X1", &ctx(vec![point(1)]));
        assert_eq!(result.answerability, N);
        assert_eq!(result.verdict, InsufficientData);
        assert_eq!(result.summary, "Question X1 is not registered.");
    }

    #[test]
    fn test_onocoy_input_gaps_stay_not_answerable() {
        let context = ctx(vec![point(1), point(2)]);
        for id in ["M1", "M2", "M3"] {
            let result = answer(id, &context);
            assert_eq!(result.answerability, N);
            assert_eq!(result.verdict, InsufficientData);
            assert!(!result.reproducible);
        }
    }

    #[test]
    fn test_former_hard_gaps_are_answerable() {
        let baseline = vec![
            point_with(1, &[(Minted, 100_000.0), (Burned, 95_000.0), (Providers, 1_000.0), (DemandServed, 9_500.0), (ProCount, 600.0), (MercenaryCount, 400.0), (SolvencyScore, 1.02)]),
            point_with(2, &[(Minted, 100_000.0), (Burned, 94_000.0), (Providers, 980.0), (DemandServed, 9_450.0), (ProCount, 590.0), (MercenaryCount, 390.0), (SolvencyScore, 1.0)]),
        ];
        let current = vec![
            point_with(1, &[(Minted, 110_000.0), (Burned, 88_000.0), (Providers, 900.0), (DemandServed, 9_400.0), (ProCount, 700.0), (MercenaryCount, 200.0), (SolvencyScore, 0.92), (ChurnCount, 35.0)]),
            point_with(2, &[(Minted, 112_000.0), (Burned, 86_000.0), (Providers, 840.0), (DemandServed, 9_350.0), (ProCount, 690.0), (MercenaryCount, 150.0), (SolvencyScore, 0.88), (ChurnCount, 40.0)]),
        ];
        let context = ctx_with(current, Some(baseline), |_| {});
        for id in ["B11", "C8", "C9", "C11"] {
            let result = answer(id, &context);
            assert_ne!(result.answerability, N, "{}", id);
            assert_ne!(result.verdict, InsufficientData, "{}", id);
        }
    }

    #[test]
    fn test_empty_run_never_panics() {
        let answers = evaluate_all_questions(&ctx(Vec::new()), standard_registry());
        assert_eq!(answers.len(), 103);
        assert!(answers.iter().all(|a| !a.summary.starts_with("Evaluator failed")));
    }

    // ========== A: Core ==========

    #[test]
    fn test_a7_subsidy_dependency() {
        expect("A7", &ctx(vec![point_with(1, &[(SolvencyScore, 0.82)])]), Y, &[Yes]);
        expect("A7", &ctx(vec![point_with(1, &[(SolvencyScore, 1.25)])]), Y, &[No]);
    }

    #[test]
    fn test_a4_retention_trend() {
        let stable = ctx(vec![
            point_with(1, &[(Providers, 1_000.0)]),
            point_with(2, &[(Providers, 995.0)]),
            point_with(3, &[(Providers, 994.0)]),
        ]);
        expect("A4", &stable, Y, &[Yes]);

        let degrading = ctx(vec![
            point_with(1, &[(Providers, 1_000.0)]),
            point_with(2, &[(Providers, 930.0)]),
            point_with(3, &[(Providers, 900.0)]),
        ]);
        expect("A4", &degrading, Y, &[AtRisk]);
    }

    #[test]
    fn test_a1_competitive_stress_regime() {
        let context = ctx_with(vec![point(1)], None, |p| {
            p.competitor_yield = 1.5;
            p.demand_type = DemandType::Consistent;
        });
        let result = expect("A1", &context, Y, &[Yes]);
        assert!(result.summary.contains("Competitive Yield Stress"));
    }

    #[test]
    fn test_a2_off_baseline_deltas() {
        let current = vec![point_with(1, &[(Price, 0.7), (Providers, 900.0), (SolvencyScore, 0.9), (Utilization, 55.0), (Demand, 10_000.0), (DemandServed, 8_500.0)])];
        let baseline = vec![point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.2), (Utilization, 65.0), (Demand, 10_000.0), (DemandServed, 9_700.0)])];
        let result = expect("A2", &ctx_with(current, Some(baseline), |_| {}), Y, &[AtRisk]);
        assert!(result.summary.contains("off baseline"));
    }

    #[test]
    fn test_a8_reward_demand_alignment() {
        let misaligned = ctx(vec![point_with(1, &[(Demand, 10_000.0), (DemandServed, 7_200.0), (Utilization, 18.0), (RevenuePerCapacity, 0.25), (CostPerCapacity, 0.5), (SolvencyScore, 0.7)])]);
        expect("A8", &misaligned, Y, &[No]);

        let aligned = ctx(vec![point_with(1, &[(Demand, 10_000.0), (DemandServed, 9_700.0), (Utilization, 50.0), (RevenuePerCapacity, 0.6), (CostPerCapacity, 0.45), (SolvencyScore, 1.15)])]);
        expect("A8", &aligned, Y, &[Yes]);
    }

    #[test]
    fn test_a9_lag_after_price_shock() {
        let context = ctx(vec![
            point_with(1, &[(Price, 1.0), (ChurnCount, 10.0), (Providers, 1_000.0), (Capacity, 15_000.0)]),
            point_with(2, &[(Price, 0.98), (ChurnCount, 10.0), (Providers, 995.0), (Capacity, 14_980.0)]),
            point_with(3, &[(Price, 0.78), (ChurnCount, 10.0), (Providers, 990.0), (Capacity, 14_970.0)]),
            point_with(4, &[(Price, 0.76), (ChurnCount, 25.0), (Providers, 970.0), (Capacity, 14_600.0)]),
            point_with(5, &[(Price, 0.74), (ChurnCount, 30.0), (Providers, 940.0), (Capacity, 14_200.0)]),
        ]);
        expect("A9", &context, Y, &[Yes]);
    }

    #[test]
    fn test_a11_leading_indicator_order() {
        let calm = [(Price, 1.0), (SolvencyScore, 1.1), (Providers, 1_000.0), (ChurnCount, 10.0), (Demand, 10_000.0), (DemandServed, 9_600.0), (Utilization, 62.0)];
        let baseline = (1..=4).map(|t| point_with(t, &calm)).collect();
        let stressed = vec![
            point_with(1, &[(Price, 0.89), (SolvencyScore, 1.02), (Providers, 995.0), (ChurnCount, 12.0), (Demand, 10_000.0), (DemandServed, 9_500.0), (Utilization, 60.0)]),
            point_with(2, &[(Price, 0.84), (SolvencyScore, 0.98), (Providers, 970.0), (ChurnCount, 20.0), (Demand, 10_000.0), (DemandServed, 9_100.0), (Utilization, 57.0)]),
            point_with(3, &[(Price, 0.80), (SolvencyScore, 0.90), (Providers, 940.0), (ChurnCount, 26.0), (Demand, 10_000.0), (DemandServed, 8_800.0), (Utilization, 53.0)]),
            point_with(4, &[(Price, 0.78), (SolvencyScore, 0.86), (Providers, 915.0), (ChurnCount, 30.0), (Demand, 10_000.0), (DemandServed, 8_500.0), (Utilization, 50.0)]),
        ];
        let result = expect("A11", &ctx_with(stressed, Some(baseline), |_| {}), Y, &[Yes]);
        assert!(result.summary.contains("Price"));
        assert!(has_metric(&result, "first_leading_indicator"));
    }

    fn week_json(t: u32, demand: &str, served: &str) -> String {
        format!(
            r#"{{"t":{t},"price":{{"mean":1}},"solvencyScore":{{"mean":1.1}},"providers":{{"mean":1000}},"churnCount":{{"mean":10}},"utilization":{{"mean":62}},"demand":{{"mean":{demand}}},"demand_served":{{"mean":{served}}}}}"#
        )
    }

    #[test]
    fn test_a11_coverage_breach_on_exact_band_edge_from_json() {
        // 9117.516424953938 / 9597.385710477829 * 100 is exactly 95.0, a -5pp breach.
        let current = [
            week_json(1, "9597.385710477829", "9117.516424953938"),
            week_json(2, "10000", "9000"),
            week_json(3, "10000", "9000"),
        ];
        let baseline: Vec<String> = (1..=3).map(|t| week_json(t, "10000", "10000")).collect();
        let json = format!(
            r#"{{"runId":"json-edge","aggregated":[{}],"baselineAggregated":[{}]}}"#,
            current.join(","),
            baseline.join(",")
        );
        let context = depin_diagnostics::AnswerContext::from_json(&json).unwrap();
        assert_eq!(context.aggregated[0].mean(DemandServed), 9117.516424953938);
        assert_eq!(context.aggregated[0].mean(Demand), 9597.385710477829);

        let result = expect("A11", &context, Y, &[Yes]);
        assert_eq!(
            result.find_metric("first_leading_indicator").map(|m| &m.value),
            Some(&depin_diagnostics::MetricValue::Text("Demand Coverage".to_string()))
        );
        assert_eq!(
            result.find_metric("first_breach_week").map(|m| &m.value),
            Some(&depin_diagnostics::MetricValue::Text("W1".to_string()))
        );
    }

    #[test]
    fn test_a12_change_matrix() {
        let current = vec![
            point_with(1, &[(Providers, 1_000.0), (SolvencyScore, 1.1), (ChurnCount, 12.0)]),
            point_with(2, &[(Providers, 970.0), (SolvencyScore, 0.95), (ChurnCount, 26.0)]),
        ];
        let baseline = vec![
            point_with(1, &[(Providers, 1_000.0), (SolvencyScore, 1.15), (ChurnCount, 10.0)]),
            point_with(2, &[(Providers, 990.0), (SolvencyScore, 1.1), (ChurnCount, 12.0)]),
        ];
        let result = expect("A12", &ctx_with(current, Some(baseline), |_| {}), Y, &[AtRisk]);
        assert!(has_metric(&result, "baseline_solvency_delta"));
    }

    // ========== B: Builders ==========

    fn spiral() -> Vec<depin_diagnostics::AggregateResult> {
        vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.0), (ChurnCount, 10.0)]),
            point_with(2, &[(Price, 0.75), (Providers, 900.0), (SolvencyScore, 0.8), (ChurnCount, 60.0)]),
            point_with(3, &[(Price, 0.55), (Providers, 760.0), (SolvencyScore, 0.7), (ChurnCount, 80.0)]),
            point_with(4, &[(Price, 0.45), (Providers, 650.0), (SolvencyScore, 0.65), (ChurnCount, 90.0)]),
        ]
    }

    #[test]
    fn test_h10_death_spiral_and_b12_proxy() {
        let stressed = ctx(spiral());
        expect("H10", &stressed, Y, &[AtRisk]);
        let b12 = answer("B12", &stressed);
        assert_eq!(b12.answerability, P);
        assert!(has_metric(&b12, "death_spiral_probability_pct"));
    }

    #[test]
    fn test_b1_b2_emission_rigidity() {
        let context = ctx_with(
            vec![
                point_with(1, &[(Demand, 12_000.0), (DemandServed, 11_000.0), (Minted, 120_000.0)]),
                point_with(2, &[(Demand, 10_000.0), (DemandServed, 8_000.0), (Minted, 120_000.0)]),
                point_with(3, &[(Demand, 8_000.0), (DemandServed, 6_000.0), (Minted, 120_000.0)]),
            ],
            None,
            |p| p.emission_model = EmissionModel::Fixed,
        );
        expect("B1", &context, P, &[AtRisk]);
        expect("B2", &context, P, &[No]);
    }

    #[test]
    fn test_b3_b9_contraction_speed_and_lag() {
        let context = ctx(vec![
            point_with(1, &[(Price, 1.0), (Demand, 10_000.0), (SolvencyScore, 1.2), (ChurnCount, 5.0), (Providers, 1_000.0), (Capacity, 15_000.0)]),
            point_with(2, &[(Price, 0.98), (Demand, 9_500.0), (SolvencyScore, 1.15), (ChurnCount, 5.0), (Providers, 1_000.0), (Capacity, 15_000.0)]),
            point_with(3, &[(Price, 0.75), (Demand, 8_000.0), (SolvencyScore, 1.0), (ChurnCount, 6.0), (Providers, 990.0), (Capacity, 14_900.0)]),
            point_with(4, &[(Price, 0.73), (Demand, 7_000.0), (SolvencyScore, 0.9), (ChurnCount, 20.0), (Providers, 940.0), (Capacity, 14_200.0)]),
            point_with(5, &[(Price, 0.72), (Demand, 6_500.0), (SolvencyScore, 0.8), (ChurnCount, 25.0), (Providers, 900.0), (Capacity, 13_900.0)]),
        ]);
        expect("B3", &context, Y, &[AtRisk]);
        expect("B9", &context, P, &[Yes]);
    }

    #[test]
    fn test_b5_b6_solvency_sensitivity() {
        let context = ctx_with(
            vec![
                point_with(1, &[(Minted, 60_000.0), (Price, 1.0), (Providers, 1_000.0), (ChurnCount, 10.0)]),
                point_with(2, &[(Minted, 60_000.0), (Price, 1.0), (Providers, 1_000.0), (ChurnCount, 30.0)]),
            ],
            None,
            |p| {
                p.provider_cost_per_week = 120.0;
                p.burn_pct = 0.1;
                p.churn_threshold = 10.0;
            },
        );
        expect("B5", &context, P, &[AtRisk]);
        expect("B6", &context, P, &[AtRisk]);
    }

    #[test]
    fn test_b14_c10_commitment_tier_quality() {
        let context = ctx_with(
            vec![
                point_with(1, &[(ProCount, 400.0), (MercenaryCount, 600.0), (Providers, 1_000.0), (Minted, 120_000.0), (Price, 2.0)]),
                point_with(2, &[(ProCount, 390.0), (MercenaryCount, 500.0), (Providers, 890.0), (Minted, 120_000.0), (Price, 2.0)]),
                point_with(3, &[(ProCount, 385.0), (MercenaryCount, 420.0), (Providers, 805.0), (Minted, 120_000.0), (Price, 2.0)]),
            ],
            None,
            |p| {
                p.provider_cost_per_week = 90.0;
                p.pro_tier_efficiency = 2.0;
            },
        );
        expect("B14", &context, P, &[Yes]);
        expect("C10", &context, Y, &[Yes]);
    }

    #[test]
    fn test_b15_b17_c5_c16_bias_and_no_intervention() {
        let context = ctx(vec![
            point_with(1, &[(Price, 2.0), (Minted, 200_000.0), (Providers, 1_000.0), (Demand, 10_000.0), (DemandServed, 9_900.0), (SolvencyScore, 1.2), (ChurnCount, 10.0)]),
            point_with(2, &[(Price, 1.2), (Minted, 180_000.0), (Providers, 900.0), (Demand, 9_800.0), (DemandServed, 9_700.0), (SolvencyScore, 0.95), (ChurnCount, 40.0)]),
            point_with(3, &[(Price, 0.8), (Minted, 170_000.0), (Providers, 750.0), (Demand, 9_600.0), (DemandServed, 9_500.0), (SolvencyScore, 0.7), (ChurnCount, 70.0)]),
        ]);
        expect("B15", &context, P, &[No]);
        expect("B17", &context, P, &[AtRisk]);
        expect("C5", &context, Y, &[Yes]);
        expect("C16", &context, Y, &[Yes]);
    }

    #[test]
    fn test_b13_b18_c12_c13_proposal_robustness() {
        let proposal = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.05), (ChurnCount, 12.0), (DemandServed, 8_200.0), (Minted, 100_000.0)]),
            point_with(2, &[(Price, 0.98), (Providers, 990.0), (SolvencyScore, 1.08), (ChurnCount, 12.0), (DemandServed, 8_700.0), (Minted, 100_000.0)]),
            point_with(3, &[(Price, 0.97), (Providers, 985.0), (SolvencyScore, 1.12), (ChurnCount, 11.0), (DemandServed, 9_000.0), (Minted, 100_000.0)]),
            point_with(4, &[(Price, 0.96), (Providers, 980.0), (SolvencyScore, 1.15), (ChurnCount, 11.0), (DemandServed, 9_200.0), (Minted, 100_000.0)]),
        ];
        let baseline = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 0.9), (ChurnCount, 25.0), (DemandServed, 8_000.0), (Minted, 110_000.0)]),
            point_with(2, &[(Price, 0.82), (Providers, 900.0), (SolvencyScore, 0.78), (ChurnCount, 60.0), (DemandServed, 7_500.0), (Minted, 110_000.0)]),
            point_with(3, &[(Price, 0.70), (Providers, 820.0), (SolvencyScore, 0.72), (ChurnCount, 70.0), (DemandServed, 7_300.0), (Minted, 110_000.0)]),
            point_with(4, &[(Price, 0.62), (Providers, 760.0), (SolvencyScore, 0.69), (ChurnCount, 75.0), (DemandServed, 7_100.0), (Minted, 110_000.0)]),
        ];
        let context = ctx_with(proposal, Some(baseline), |p| p.emission_model = EmissionModel::Fixed);
        expect("B18", &context, P, &[Yes]);
        expect("B13", &context, P, &[Yes]);
        expect("C12", &context, P, &[Yes]);
        expect("C13", &context, Y, &[Yes]);
    }

    #[test]
    fn test_b11_c8_c9_c11_extension_and_concentration() {
        let baseline = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.08), (ChurnCount, 10.0), (Minted, 100_000.0), (Burned, 95_000.0), (Demand, 10_000.0), (DemandServed, 9_700.0), (ProCount, 650.0), (MercenaryCount, 350.0)]),
            point_with(2, &[(Price, 0.98), (Providers, 990.0), (SolvencyScore, 1.05), (ChurnCount, 12.0), (Minted, 100_000.0), (Burned, 94_000.0), (Demand, 10_000.0), (DemandServed, 9_680.0), (ProCount, 645.0), (MercenaryCount, 345.0)]),
            point_with(3, &[(Price, 0.97), (Providers, 980.0), (SolvencyScore, 1.04), (ChurnCount, 12.0), (Minted, 100_000.0), (Burned, 94_000.0), (Demand, 10_000.0), (DemandServed, 9_670.0), (ProCount, 640.0), (MercenaryCount, 340.0)]),
            point_with(4, &[(Price, 0.96), (Providers, 970.0), (SolvencyScore, 1.03), (ChurnCount, 13.0), (Minted, 100_000.0), (Burned, 93_000.0), (Demand, 10_000.0), (DemandServed, 9_650.0), (ProCount, 635.0), (MercenaryCount, 335.0)]),
        ];
        let current = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.0), (ChurnCount, 20.0), (Minted, 110_000.0), (Burned, 86_000.0), (Demand, 10_000.0), (DemandServed, 9_800.0), (ProCount, 760.0), (MercenaryCount, 240.0)]),
            point_with(2, &[(Price, 0.82), (Providers, 700.0), (SolvencyScore, 0.9), (ChurnCount, 45.0), (Minted, 115_000.0), (Burned, 83_000.0), (Demand, 10_000.0), (DemandServed, 9_800.0), (ProCount, 640.0), (MercenaryCount, 60.0)]),
            point_with(3, &[(Price, 0.68), (Providers, 450.0), (SolvencyScore, 0.82), (ChurnCount, 60.0), (Minted, 118_000.0), (Burned, 80_000.0), (Demand, 10_000.0), (DemandServed, 9_800.0), (ProCount, 420.0), (MercenaryCount, 30.0)]),
            point_with(4, &[(Price, 0.60), (Providers, 300.0), (SolvencyScore, 0.76), (ChurnCount, 72.0), (Minted, 120_000.0), (Burned, 77_000.0), (Demand, 10_000.0), (DemandServed, 9_800.0), (ProCount, 280.0), (MercenaryCount, 20.0)]),
        ];
        let context = ctx_with(current, Some(baseline), |_| {});

        let b11 = answer("B11", &context);
        assert_eq!(b11.answerability, P);
        assert!(has_metric(&b11, "ext12_subsidy_gap_delta_pp"));

        let c11 = answer("C11", &context);
        assert_eq!(c11.answerability, P);
        assert!(has_metric(&c11, "ext12_projected_solvency"));

        expect("C8", &context, P, &[Yes]);
        let c9 = expect("C9", &context, P, &[Yes]);
        assert!(has_metric(&c9, "centralization_proxy_score"));
    }

    #[test]
    fn test_remaining_builder_governance_user_comparative() {
        let baseline = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (Capacity, 15_000.0), (ChurnCount, 10.0), (SolvencyScore, 1.08), (Minted, 100_000.0), (Burned, 95_000.0), (Demand, 10_000.0), (DemandServed, 9_700.0), (ProCount, 650.0), (MercenaryCount, 350.0)]),
            point_with(2, &[(Price, 0.99), (Providers, 995.0), (Capacity, 14_980.0), (ChurnCount, 11.0), (SolvencyScore, 1.06), (Minted, 100_000.0), (Burned, 94_500.0), (Demand, 10_000.0), (DemandServed, 9_700.0), (ProCount, 648.0), (MercenaryCount, 347.0)]),
            point_with(3, &[(Price, 0.98), (Providers, 990.0), (Capacity, 14_960.0), (ChurnCount, 12.0), (SolvencyScore, 1.04), (Minted, 100_000.0), (Burned, 94_000.0), (Demand, 10_000.0), (DemandServed, 9_680.0), (ProCount, 646.0), (MercenaryCount, 344.0)]),
            point_with(4, &[(Price, 0.97), (Providers, 985.0), (Capacity, 14_940.0), (ChurnCount, 12.0), (SolvencyScore, 1.03), (Minted, 100_000.0), (Burned, 93_500.0), (Demand, 10_000.0), (DemandServed, 9_670.0), (ProCount, 644.0), (MercenaryCount, 341.0)]),
            point_with(5, &[(Price, 0.96), (Providers, 980.0), (Capacity, 14_920.0), (ChurnCount, 13.0), (SolvencyScore, 1.02), (Minted, 100_000.0), (Burned, 93_000.0), (Demand, 10_000.0), (DemandServed, 9_660.0), (ProCount, 642.0), (MercenaryCount, 338.0)]),
            point_with(6, &[(Price, 0.95), (Providers, 975.0), (Capacity, 14_900.0), (ChurnCount, 13.0), (SolvencyScore, 1.01), (Minted, 100_000.0), (Burned, 93_000.0), (Demand, 10_000.0), (DemandServed, 9_650.0), (ProCount, 640.0), (MercenaryCount, 335.0)]),
        ];
        let stressed = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (Capacity, 15_000.0), (ChurnCount, 12.0), (SolvencyScore, 1.0), (Minted, 110_000.0), (Burned, 90_000.0), (Demand, 10_000.0), (DemandServed, 9_800.0), (ProCount, 700.0), (MercenaryCount, 300.0)]),
            point_with(2, &[(Price, 0.90), (Providers, 930.0), (Capacity, 14_900.0), (ChurnCount, 12.0), (SolvencyScore, 0.95), (Minted, 112_000.0), (Burned, 88_000.0), (Demand, 10_000.0), (DemandServed, 9_750.0), (ProCount, 670.0), (MercenaryCount, 260.0)]),
            point_with(3, &[(Price, 0.78), (Providers, 820.0), (Capacity, 14_500.0), (ChurnCount, 30.0), (SolvencyScore, 0.88), (Minted, 115_000.0), (Burned, 85_000.0), (Demand, 10_000.0), (DemandServed, 9_700.0), (ProCount, 620.0), (MercenaryCount, 200.0)]),
            point_with(4, &[(Price, 0.72), (Providers, 720.0), (Capacity, 14_000.0), (ChurnCount, 42.0), (SolvencyScore, 0.82), (Minted, 118_000.0), (Burned, 82_000.0), (Demand, 10_000.0), (DemandServed, 9_650.0), (ProCount, 560.0), (MercenaryCount, 160.0)]),
            point_with(5, &[(Price, 0.68), (Providers, 640.0), (Capacity, 13_300.0), (ChurnCount, 50.0), (SolvencyScore, 0.78), (Minted, 120_000.0), (Burned, 80_000.0), (Demand, 10_000.0), (DemandServed, 9_600.0), (ProCount, 500.0), (MercenaryCount, 140.0)]),
            point_with(6, &[(Price, 0.64), (Providers, 580.0), (Capacity, 12_600.0), (ChurnCount, 55.0), (SolvencyScore, 0.74), (Minted, 122_000.0), (Burned, 78_000.0), (Demand, 10_000.0), (DemandServed, 9_550.0), (ProCount, 460.0), (MercenaryCount, 120.0)]),
        ];
        let context = ctx_with(stressed, Some(baseline), |p| {
            p.competitor_yield = 1.2;
            p.provider_cost_per_week = 75.0;
            p.initial_liquidity = 500_000.0;
            p.investor_sell_pct = 0.25;
        });

        let checks = [
            ("B4", "top_churn_sensitivity_parameter"),
            ("B7", "first_failing_tier"),
            ("B8", "required_liquidity_usd"),
            ("B10", "lag_churn_to_capacity_weeks"),
            ("B16", "robust_dimensions_improved"),
            ("C1", "governance_archetype"),
            ("C3", "late_retention_pct"),
            ("C4", "reward_output_tracking_gap_pp"),
            ("C7", "price_drawdown_pct"),
            ("E1", "churn_pressure_active"),
            ("E2", "capacity_buffer_pct"),
            ("E3", "providers_delta_wow_pct"),
            ("E8", "reliability_index_delta"),
            ("G1", "comparative_profile_score"),
            ("G4", "competitor_yield_x"),
            ("G6", "retention_gap_pp"),
        ];
        for (id, metric_id) in checks {
            let result = expect(id, &context, P, &[Yes, No, AtRisk]);
            assert!(has_metric(&result, metric_id), "{} missing {}", id, metric_id);
        }
    }

    // ========== C: Governance ==========

    #[test]
    fn test_c14_c15_review_and_emergency_triggers() {
        let context = ctx_with(
            vec![point_with(1, &[(SolvencyScore, 0.82), (Providers, 1_000.0), (ChurnCount, 72.0), (Demand, 10_000.0), (DemandServed, 7_100.0), (Minted, 100_000.0), (Price, 0.7)])],
            None,
            |p| p.provider_cost_per_week = 95.0,
        );
        expect("C14", &context, P, &[AtRisk]);
        expect("C15", &context, P, &[AtRisk]);
    }

    #[test]
    fn test_c17_solvency_trajectory() {
        let improving = ctx([0.88, 0.94, 0.97, 1.0, 1.08, 1.14]
            .iter()
            .zip(1..)
            .map(|(s, t)| point_with(t, &[(SolvencyScore, *s)]))
            .collect());
        expect("C17", &improving, Y, &[Yes]);

        let worsening = ctx([1.18, 1.05, 0.94, 0.82]
            .iter()
            .zip(1..)
            .map(|(s, t)| point_with(t, &[(SolvencyScore, *s)]))
            .collect());
        expect("C17", &worsening, Y, &[No]);
    }

    #[test]
    fn test_c18_intervention_vs_baseline() {
        let intervention = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 1.1), (ChurnCount, 10.0)]),
            point_with(2, &[(Price, 0.98), (Providers, 1_000.0), (SolvencyScore, 1.08), (ChurnCount, 11.0)]),
            point_with(3, &[(Price, 0.96), (Providers, 995.0), (SolvencyScore, 1.05), (ChurnCount, 12.0)]),
            point_with(4, &[(Price, 0.95), (Providers, 990.0), (SolvencyScore, 1.03), (ChurnCount, 12.0)]),
        ];
        let baseline = vec![
            point_with(1, &[(Price, 1.0), (Providers, 1_000.0), (SolvencyScore, 0.95), (ChurnCount, 22.0)]),
            point_with(2, &[(Price, 0.78), (Providers, 900.0), (SolvencyScore, 0.8), (ChurnCount, 65.0)]),
            point_with(3, &[(Price, 0.62), (Providers, 780.0), (SolvencyScore, 0.7), (ChurnCount, 80.0)]),
            point_with(4, &[(Price, 0.50), (Providers, 700.0), (SolvencyScore, 0.65), (ChurnCount, 85.0)]),
        ];
        expect("C18", &ctx_with(intervention, Some(baseline), |_| {}), P, &[Yes]);
    }

    #[test]
    fn test_c2_subsidy_gap_attribution() {
        let baseline = vec![
            point_with(1, &[(Minted, 100_000.0), (Burned, 96_000.0), (SolvencyScore, 1.05)]),
            point_with(2, &[(Minted, 100_000.0), (Burned, 95_000.0), (SolvencyScore, 1.02)]),
            point_with(3, &[(Minted, 100_000.0), (Burned, 94_000.0), (SolvencyScore, 1.0)]),
            point_with(4, &[(Minted, 100_000.0), (Burned, 94_000.0), (SolvencyScore, 0.99)]),
        ];
        let post_decision = vec![
            point_with(1, &[(Minted, 100_000.0), (Burned, 88_000.0), (SolvencyScore, 0.94)]),
            point_with(2, &[(Minted, 100_000.0), (Burned, 84_000.0), (SolvencyScore, 0.9)]),
            point_with(3, &[(Minted, 100_000.0), (Burned, 80_000.0), (SolvencyScore, 0.86)]),
            point_with(4, &[(Minted, 100_000.0), (Burned, 76_000.0), (SolvencyScore, 0.82)]),
        ];
        let result = expect("C2", &ctx_with(post_decision, Some(baseline), |_| {}), P, &[Yes]);
        assert!(has_metric(&result, "subsidy_gap_delta_pp"));
    }

    // ========== D: Providers ==========

    #[test]
    fn test_d1_d2_tier_margins_and_price_sensitivity() {
        let tiered = ctx_with(
            vec![point_with(1, &[(Providers, 1_000.0), (ProCount, 220.0), (MercenaryCount, 780.0), (Minted, 100_000.0), (Price, 1.0)])],
            None,
            |p| {
                p.provider_cost_per_week = 95.0;
                p.pro_tier_efficiency = 1.8;
            },
        );
        expect("D1", &tiered, P, &[AtRisk]);

        let sensitive = ctx_with(
            vec![point_with(1, &[(Providers, 1_000.0), (Minted, 100_000.0), (Price, 1.0)])],
            None,
            |p| p.provider_cost_per_week = 99.0,
        );
        expect("D2", &sensitive, P, &[Yes]);
    }

    #[test]
    fn test_d3_d12_churn_breakpoints() {
        let context = ctx_with(
            vec![
                point_with(1, &[(Providers, 1_000.0), (Minted, 70_000.0), (Price, 1.0), (ChurnCount, 55.0), (SolvencyScore, 0.82)]),
                point_with(2, &[(Providers, 940.0), (Minted, 70_000.0), (Price, 0.9), (ChurnCount, 70.0), (SolvencyScore, 0.78)]),
                point_with(3, &[(Providers, 860.0), (Minted, 70_000.0), (Price, 0.8), (ChurnCount, 85.0), (SolvencyScore, 0.74)]),
            ],
            None,
            |p| {
                p.provider_cost_per_week = 80.0;
                p.churn_threshold = 10.0;
            },
        );
        expect("D3", &context, P, &[AtRisk]);
        expect("D12", &context, P, &[AtRisk, No]);
    }

    #[test]
    fn test_d4_to_d10_provider_views() {
        let current = vec![
            point_with(1, &[(Providers, 1_000.0), (ProCount, 220.0), (MercenaryCount, 780.0), (Minted, 100_000.0), (Price, 1.0), (SolvencyScore, 1.12), (Demand, 10_000.0), (DemandServed, 9_600.0), (CostPerCapacity, 0.4), (RevenuePerCapacity, 0.5), (ChurnCount, 14.0)]),
            point_with(2, &[(Providers, 980.0), (ProCount, 215.0), (MercenaryCount, 765.0), (Minted, 95_000.0), (Price, 0.95), (SolvencyScore, 1.05), (Demand, 9_800.0), (DemandServed, 9_250.0), (CostPerCapacity, 0.42), (RevenuePerCapacity, 0.48), (ChurnCount, 28.0)]),
        ];
        let baseline = vec![
            point_with(1, &[(Providers, 1_000.0), (Minted, 80_000.0), (Price, 1.0), (SolvencyScore, 0.92), (Demand, 10_000.0), (DemandServed, 9_100.0)]),
            point_with(2, &[(Providers, 940.0), (Minted, 78_000.0), (Price, 0.92), (SolvencyScore, 0.88), (Demand, 9_800.0), (DemandServed, 8_900.0)]),
        ];
        let context = ctx_with(current, Some(baseline), |p| {
            p.provider_cost_per_week = 80.0;
            p.pro_tier_efficiency = 1.8;
        });

        expect("D4", &context, Y, &[Yes]);
        expect("D5", &context, P, &[Yes, AtRisk, No]);
        expect("D7", &context, Y, &[Yes, AtRisk]);
        expect("D8", &context, P, &[Yes, AtRisk, No]);
        expect("D9", &context, P, &[Yes, AtRisk]);
        expect("D10", &context, P, &[Yes, AtRisk]);

        let cost_shock = ctx_with(
            vec![point_with(1, &[(Providers, 1_000.0), (ProCount, 200.0), (MercenaryCount, 800.0), (Minted, 100_000.0), (Price, 1.0)])],
            None,
            |p| {
                p.provider_cost_per_week = 95.0;
                p.pro_tier_efficiency = 2.0;
            },
        );
        expect("D6", &cost_shock, P, &[AtRisk, No, Yes]);
    }
}
