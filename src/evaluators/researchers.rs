// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Researcher Evaluators (F)

//! Methodology checks: whether a run separates inputs from outcomes, can be
//! reproduced, exposes dispersion, and frames its findings as conditional.

use super::{week_of, week_range, yes_no, Entry};
use crate::format::fixed;
use crate::metrics::{churn_pct, demand_coverage, has_dispersion_stats, required_metric_coverage_ratio, retention_from_series};
use crate::snapshots::{death_spiral_risk, infer_failure_mode};
use crate::types::{AnswerContext, Answerability::*, Metric as M, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("F1", f1),
    ("F2", f2),
    ("F3", f3),
    ("F4", f4),
    ("F5", f5),
    ("F6", f6),
    ("F7", f7),
    ("F8", f8),
    ("F9", f9),
    ("F10", f10),
    ("F11", f11),
    ("F12", f12),
    ("F13", f13),
    ("F14", f14),
];

const FRAMEWORK_LEVEL: &str = "Framework-level";
const CURRENT_RUN_ONLY: &str = "Current run only";

fn f1(ctx: &AnswerContext) -> QuestionAnswer {
    let params = &ctx.params;
    let inputs_defined = [params.max_mint_weekly, params.burn_pct, params.provider_cost_per_week]
        .iter()
        .all(|value| value.is_finite());
    let has_outcomes = !ctx.aggregated.is_empty();
    let separated = inputs_defined && has_outcomes;

    QuestionAnswer::base("F1")
        .graded(Y, if separated { Yes } else { No })
        .summary(if separated {
            "Stress inputs are explicitly parameterized and separated from outcome trajectories."
        } else {
            "Input/output separation is incomplete in the current run context."
        })
        .window(if has_outcomes {
            format!("Inputs + {} outcomes", week_range(&ctx.aggregated))
        } else {
            "Input-only".to_string()
        })
        .thresholds([
            "Inputs: parameter object fields populated",
            "Outcomes: aggregated trajectory available",
        ])
        .label_metric("stress_inputs_defined", "Stress Inputs Defined", yes_no(inputs_defined))
        .label_metric("outcome_series_available", "Outcome Series Available", yes_no(has_outcomes))
        .panel("Simulator/Sidebar", "Input controls and assumptions")
        .chart("Simulator/Sandbox", "Outcome trajectories")
        .reproducible(true)
        .confidence(0.96)
}

fn f2(ctx: &AnswerContext) -> QuestionAnswer {
    let params = &ctx.params;
    let reproducible = params.n_sims > 0 && params.horizon_weeks > 0;

    QuestionAnswer::base("F2")
        .graded(Y, if reproducible { Yes } else { AtRisk })
        .summary(if reproducible {
            "Scenario assumptions are visible and reproducible via seeded simulation parameters."
        } else {
            "Scenario assumptions are partially present but reproducibility is weakened."
        })
        .window(format!(
            "Seed {} \u{2022} Sims {} \u{2022} Horizon {}w",
            params.seed, params.n_sims, params.horizon_weeks
        ))
        .threshold("Reproducible if seed, nSims, and T are explicitly set")
        .label_metric("seed", "Seed", params.seed.to_string())
        .label_metric("n_sims", "Simulation Runs", params.n_sims.to_string())
        .metric("horizon_weeks", "Horizon", params.horizon_weeks.to_string(), "weeks")
        .panel("Simulator/Sidebar Scenario Library", "Scenario assumptions and controls")
        .reproducible(reproducible)
        .confidence(if reproducible { 0.95 } else { 0.7 })
}

fn f3(ctx: &AnswerContext) -> QuestionAnswer {
    let ratio = required_metric_coverage_ratio(&ctx.aggregated);
    let (verdict, grade) = if ratio >= 0.99 {
        (Yes, "high")
    } else if ratio >= 0.9 {
        (AtRisk, "moderate")
    } else {
        (No, "low")
    };

    QuestionAnswer::base("F3")
        .graded(P, verdict)
        .summary(format!(
            "Operational metric consistency is {} (coverage ratio {}).",
            grade,
            fixed(ratio, 3)
        ))
        .window(week_range(&ctx.aggregated))
        .thresholds([
            "Coverage ratio >= 0.99: consistent",
            "Coverage ratio 0.90-0.99: partial",
            "Coverage ratio < 0.90: inconsistent",
        ])
        .metric("metric_coverage_ratio", "Metric Coverage Ratio", fixed(ratio, 3), "ratio")
        .chart("Simulator/Sandbox", "Metric series produced from shared engine outputs")
        .reproducible(true)
        .confidence(0.83)
}

fn f4(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(baseline), false) = (ctx.baseline(), ctx.aggregated.is_empty()) else {
        return QuestionAnswer::base("F4")
            .graded(P, AtRisk)
            .summary("Baseline comparison run is missing, so axis/window parity cannot be fully verified.")
            .window(CURRENT_RUN_ONLY)
            .threshold("Requires baseline and stress series with aligned time index")
            .label_metric("baseline_available", "Baseline Available", "No")
            .panel("ScenarioComparisonPanel", "Baseline vs stress comparison panel")
            .reproducible(false)
            .confidence(0.62);
    };
    let length_aligned = baseline.len() == ctx.aggregated.len();
    let time_aligned = length_aligned && ctx.aggregated.iter().zip(baseline).all(|(point, base)| point.t == base.t);
    let aligned = length_aligned && time_aligned;

    QuestionAnswer::base("F4")
        .graded(Y, if aligned { Yes } else { No })
        .summary(if aligned {
            "Baseline and stress runs are aligned on identical time axes."
        } else {
            "Baseline and stress runs are not aligned on identical axes/time windows."
        })
        .window(format!("Current {}w vs baseline {}w", ctx.aggregated.len(), baseline.len()))
        .threshold("Axis parity requires equal horizon length and matching time indices")
        .label_metric("length_aligned", "Length Aligned", yes_no(length_aligned))
        .label_metric("time_aligned", "Time Index Aligned", yes_no(time_aligned))
        .chart("ScenarioComparisonPanel", "Baseline/stress overlay comparability")
        .reproducible(true)
        .confidence(0.9)
}

fn f5(ctx: &AnswerContext) -> QuestionAnswer {
    let current = ctx.current();
    let has_dispersion = has_dispersion_stats(current);

    QuestionAnswer::base("F5")
        .graded(Y, if has_dispersion { Yes } else { No })
        .summary(if has_dispersion {
            "Dispersion statistics (percentiles and confidence intervals) are available."
        } else {
            "Dispersion statistics are missing from the current output path."
        })
        .window(current.map_or("N/A".to_string(), week_of))
        .threshold("Dispersion requires p10/p90 and CI fields in metric stats")
        .label_metric("dispersion_fields_available", "Dispersion Fields Available", yes_no(has_dispersion))
        .chart("Simulator/Sandbox", "CI and percentile bands on core metrics")
        .reproducible(true)
        .confidence(0.94)
}

fn f6(ctx: &AnswerContext) -> QuestionAnswer {
    let mode = infer_failure_mode(ctx);
    let current = ctx.current();
    let has_precursors = current.is_some_and(|point| {
        point.mean(M::SolvencyScore).is_finite()
            && churn_pct(Some(point)).is_finite()
            && demand_coverage(Some(point)).is_finite()
    });

    QuestionAnswer::base("F6")
        .graded(P, if has_precursors { Yes } else { AtRisk })
        .summary(if has_precursors {
            format!(
                "Failure-mode mapping is tied to measurable precursor signals (current mode: {}).",
                mode.label()
            )
        } else {
            "Failure-mode mapping is not fully grounded in measurable precursor signals.".to_string()
        })
        .window(current.map_or("N/A".to_string(), week_of))
        .threshold("Mapping uses solvency, churn, coverage, and price-shock precursor metrics")
        .label_metric("mapped_failure_mode", "Mapped Failure Mode", mode.label())
        .chart("Diagnostic/SignalsOfDeathPanel", "Failure precursors and mode mapping")
        .chart("DecisionTree/Risk", "Risk precursor signals")
        .reproducible(true)
        .confidence(0.85)
}

fn f7(_ctx: &AnswerContext) -> QuestionAnswer {
    QuestionAnswer::base("F7")
        .graded(P, Yes)
        .summary("Current evaluator framework is directional/proxy-based and does not claim causal identification.")
        .window(FRAMEWORK_LEVEL)
        .threshold("Directional evidence uses threshold and trend proxies, not causal model coefficients")
        .label_metric("causal_model_present", "Causal Model Present", "No")
        .label_metric("directional_proxy_mode", "Directional Proxy Mode", "Yes")
        .panel("Methodology/Disclaimers", "Directional-not-causal framing")
        .reproducible(true)
        .confidence(0.74)
}

fn f8(_ctx: &AnswerContext) -> QuestionAnswer {
    QuestionAnswer::base("F8")
        .graded(Y, Yes)
        .summary(
            "Non-goals are explicitly framed (no direct price prediction or deterministic success forecasting).",
        )
        .window(FRAMEWORK_LEVEL)
        .threshold("Non-goal declarations present in methodology/diagnostic framing")
        .label_metric("non_goal_price_prediction", "No Price Prediction Claim", "Yes")
        .label_metric("non_goal_success_forecast", "No Deterministic Success Forecast", "Yes")
        .panel("Diagnostic/AuditDashboard", "Epistemic disclaimer and non-goal framing")
        .reproducible(true)
        .confidence(0.9)
}

fn f9(ctx: &AnswerContext) -> QuestionAnswer {
    let missing_signals = [
        ctx.baseline().is_none(),
        ctx.derived_metrics.is_none(),
        ctx.aggregated.len() < 2,
    ]
    .into_iter()
    .filter(|missing| *missing)
    .count();
    let surfaced = missing_signals <= 1;

    QuestionAnswer::base("F9")
        .graded(P, if surfaced { Yes } else { AtRisk })
        .summary(if surfaced {
            "Model-limit context is sufficiently surfaced for interpretation."
        } else {
            "Model-limit context is partial and should be made more explicit at interpretation points."
        })
        .window("Run context")
        .threshold("Limit visibility weakens when baseline, derived diagnostics, or multi-week context are missing")
        .label_metric(
            "limitation_signal_count",
            "Missing Limitation Context Signals",
            missing_signals.to_string(),
        )
        .panel("Methodology/Disclaimers", "Limitations and caveats framing")
        .panel("MetricEvidenceLegend", "Evidence quality and proxy markers")
        .reproducible(true)
        .confidence(0.72)
}

fn f10(ctx: &AnswerContext) -> QuestionAnswer {
    let traceable = !ctx.aggregated.is_empty();

    QuestionAnswer::base("F10")
        .graded(Y, if traceable { Yes } else { No })
        .summary(if traceable {
            "Results are traceable from parameter input state to observed simulation outcomes."
        } else {
            "Traceability is incomplete due to missing run context."
        })
        .window(if traceable {
            format!("Seed {} -> {}", ctx.params.seed, week_range(&ctx.aggregated))
        } else {
            "N/A".to_string()
        })
        .threshold("Traceability requires explicit input parameters and produced trajectory outputs")
        .label_metric("traceability_complete", "Traceability Complete", yes_no(traceable))
        .label_metric("run_id", "Run ID", ctx.run_id.as_str())
        .panel("Simulator/Sidebar", "Input parameter state")
        .chart("Simulator/Sandbox", "Observed output trajectory")
        .reproducible(traceable)
        .confidence(if traceable { 0.95 } else { 0.65 })
}

fn f11(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(baseline_ctx), false) = (ctx.as_baseline(), ctx.aggregated.is_empty()) else {
        return QuestionAnswer::base("F11")
            .graded(P, AtRisk)
            .summary("Cross-scenario signature distinction needs a paired baseline/scenario run.")
            .window(CURRENT_RUN_ONLY)
            .threshold("Distinguishability requires at least two comparable scenario signatures")
            .label_metric("comparison_signature_available", "Comparison Signature Available", "No")
            .panel("ScenarioComparisonPanel", "Cross-scenario signature comparison")
            .reproducible(false)
            .confidence(0.6);
    };
    let current_mode = infer_failure_mode(ctx);
    let baseline_mode = infer_failure_mode(&baseline_ctx);
    let risk_delta = death_spiral_risk(&ctx.aggregated).probability_pct
        - death_spiral_risk(&baseline_ctx.aggregated).probability_pct;
    let distinguishable = current_mode != baseline_mode || risk_delta.abs() >= 10.0;

    QuestionAnswer::base("F11")
        .graded(P, if distinguishable { Yes } else { AtRisk })
        .summary(if distinguishable {
            "Cross-scenario signatures are distinguishable and interpretable in the current comparison."
        } else {
            "Cross-scenario signatures are only weakly distinguishable in this comparison."
        })
        .window("Current vs baseline scenario")
        .threshold("Distinguishable if failure-mode label differs or risk delta >= 10pp")
        .label_metric("current_signature_mode", "Current Signature Mode", current_mode.label())
        .label_metric("baseline_signature_mode", "Baseline Signature Mode", baseline_mode.label())
        .metric("signature_risk_delta_pp", "Signature Risk Delta", fixed(risk_delta, 1), "pp")
        .chart("ScenarioComparisonPanel", "Scenario signature side-by-side")
        .chart("DecisionTree/Risk", "Scenario-specific risk signatures")
        .reproducible(true)
        .confidence(0.8)
}

fn f12(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(baseline), false) = (ctx.baseline(), ctx.aggregated.is_empty()) else {
        return QuestionAnswer::base("F12")
            .graded(P, AtRisk)
            .summary("Comparative robustness framing requires a comparison run.")
            .window(CURRENT_RUN_ONLY)
            .threshold("Comparative framing requires baseline/peer comparison metrics")
            .label_metric("comparative_frame_available", "Comparative Frame Available", "No")
            .chart("Benchmark/ComparativeMatrix", "Relative robustness comparison view")
            .reproducible(false)
            .confidence(0.6);
    };
    let risk_delta =
        death_spiral_risk(&ctx.aggregated).probability_pct - death_spiral_risk(baseline).probability_pct;
    let retention_delta = retention_from_series(&ctx.aggregated) - retention_from_series(baseline);
    let comparative = risk_delta.abs() >= 1.0 || retention_delta.abs() >= 1.0;

    QuestionAnswer::base("F12")
        .graded(P, if comparative { Yes } else { AtRisk })
        .summary(if comparative {
            "Comparative robustness is emphasized through relative risk/retention deltas."
        } else {
            "Comparative robustness signals are weak in this run pair."
        })
        .window("Current vs baseline comparative frame")
        .threshold("Comparative framing needs non-zero relative robustness deltas")
        .metric("risk_delta_vs_baseline_pp", "Risk Delta vs Baseline", fixed(risk_delta, 1), "pp")
        .metric(
            "retention_delta_vs_baseline_pp",
            "Retention Delta vs Baseline",
            fixed(retention_delta, 1),
            "pp",
        )
        .chart("Benchmark/ComparativeMatrix", "Relative benchmark metrics")
        .chart("Benchmark/HealthMetricsBarChart", "Relative health deltas")
        .reproducible(true)
        .confidence(0.82)
}

fn f13(ctx: &AnswerContext) -> QuestionAnswer {
    let current = ctx.current();
    let connected = current.is_some_and(|point| {
        point.mean(M::ProCount).is_finite()
            && point.mean(M::MercenaryCount).is_finite()
            && churn_pct(Some(point)).is_finite()
    });
    let mode = infer_failure_mode(ctx);

    QuestionAnswer::base("F13")
        .graded(P, if connected { Yes } else { AtRisk })
        .summary(if connected {
            "Archetype diagnostics are connected to observable tier/churn/solvency signals."
        } else {
            "Archetype diagnostics are only partially connected to observable signals."
        })
        .window(current.map_or("N/A".to_string(), week_of))
        .threshold("Connection requires observable cohort + churn + solvency signals")
        .label_metric(
            "archetype_signal_connection",
            "Archetype-Signal Connection",
            if connected { "Connected" } else { "Partial" },
        )
        .label_metric("current_failure_mode", "Current Failure Mode", mode.label())
        .chart("Diagnostic/ArchetypeLogicPanel", "Archetype reasoning layer")
        .chart("DecisionTree/Miner", "Observable cohort/churn signals")
        .reproducible(true)
        .confidence(0.8)
}

fn f14(_ctx: &AnswerContext) -> QuestionAnswer {
    QuestionAnswer::base("F14")
        .graded(P, Yes)
        .summary(
            "Policy outputs are framed as conditional considerations tied to run context rather than universal prescriptions.",
        )
        .window(FRAMEWORK_LEVEL)
        .threshold("Recommendations should remain conditional on scenario assumptions and KPI states")
        .label_metric("policy_frame_mode", "Policy Frame Mode", "Conditional considerations")
        .panel("DecisionPromptCard", "Conditional policy-question framing")
        .panel("Diagnostic/StrategicRecommendationsPanel", "Scenario-conditional recommendations")
        .reproducible(true)
        .confidence(0.76)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AggregateResult, SimulationParams};

    fn point(t: u32) -> AggregateResult {
        AggregateResult::new(t)
            .with(M::Price, 1.0)
            .with(M::Providers, 100.0)
            .with(M::Demand, 100.0)
            .with(M::DemandServed, 100.0)
    }

    #[test]
    fn misaligned_baseline_fails_axis_parity() {
        let ctx = AnswerContext::new("r", SimulationParams::default(), vec![point(1), point(2)])
            .with_baseline(vec![point(1), point(3)]);
        let answer = f4(&ctx);
        assert_eq!(answer.answerability, Y);
        assert_eq!(answer.verdict, No);
    }

    #[test]
    fn zero_horizon_weakens_reproducibility() {
        let params = SimulationParams {
            horizon_weeks: 0,
            ..SimulationParams::default()
        };
        let answer = f2(&AnswerContext::new("r", params, vec![point(1)]));
        assert_eq!(answer.verdict, AtRisk);
        assert!(!answer.reproducible);
    }

    #[test]
    fn missing_context_signals_are_counted() {
        let answer = f9(&AnswerContext::new("r", SimulationParams::default(), vec![point(1)]));
        assert_eq!(answer.verdict, AtRisk);
        assert_eq!(
            answer.find_metric("limitation_signal_count").map(|m| m.value.to_string()),
            Some("3".to_string())
        );
    }
}
