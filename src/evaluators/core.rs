// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Core Evaluators (A)
//
// Questions every viewer asks first: regime, deltas, failure mode, trend
// direction and threshold proximity.

use super::{lag_or_no_breach, needs, span, week_of, Entry};
use crate::format::fixed;
use crate::guardrails::{CHURN, PAYBACK, RETENTION, SOLVENCY, UTILIZATION};
use crate::metrics::{
    burn_to_mint, churn_pct, demand_coverage, estimated_payback_months, pct_change, peak,
    retention_from_series, safe_divide, series,
};
use crate::snapshots::{
    baseline_point, classify_regime, estimate_shock_lag, infer_failure_mode,
    leading_indicator_breaches, FailureMode, Regime,
};
use crate::types::{AnswerContext, Answerability::*, Metric as M, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("A1", a1),
    ("A2", a2),
    ("A3", a3),
    ("A4", a4),
    ("A5", a5),
    ("A6", a6),
    ("A7", a7),
    ("A8", a8),
    ("A9", a9),
    ("A10", a10),
    ("A11", a11),
    ("A12", a12),
];

fn a1(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("A1", "Need at least one timestep to classify current regime.");
    };
    let regime = classify_regime(ctx);

    QuestionAnswer::base("A1")
        .graded(Y, if regime.regime == Regime::Baseline { No } else { Yes })
        .summary(format!("Current run is classified as {}.", regime.regime.label()))
        .window(week_of(current))
        .thresholds([
            "Demand stress: demand <= -15% vs baseline or decay/volatile demand regime",
            "Liquidity stress: investor sell >= 25% or price <= -20% vs baseline",
            "Competitive yield stress: competitorYield >= 0.75x",
            "Cost inflation stress: provider cost >= +25% vs reference or cost/revenue >= 1.1x",
        ])
        .label_metric("regime_label", "Regime", regime.regime.label())
        .metric("regime_stress_score", "Winning Stress Score", fixed(regime.score, 2), "index")
        .metric("demand_delta_vs_baseline_pct", "Demand vs Baseline", fixed(regime.demand_delta_vs_baseline_pct, 1), "%")
        .metric("price_delta_vs_baseline_pct", "Price vs Baseline", fixed(regime.price_delta_vs_baseline_pct, 1), "%")
        .metric("cost_delta_vs_reference_pct", "Provider Cost vs Reference", fixed(regime.cost_delta_vs_reference_pct, 1), "%")
        .panel("Simulator/Sidebar Stress Controls", "Scenario and stress parameter state")
        .chart("Benchmark/AIInsights", "Scenario classification context")
        .reproducible(true)
        .confidence(0.84)
}

fn a2(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(baseline)) = (ctx.current(), baseline_point(ctx)) else {
        return needs("A2", "Need baseline run data aligned to the same week to quantify off-baseline deltas.")
            .panel("ScenarioComparisonPanel", "Baseline vs scenario comparison panel");
    };

    let price_pct = pct_change(current.mean(M::Price), baseline.mean(M::Price));
    let providers_pct = pct_change(current.mean(M::Providers), baseline.mean(M::Providers));
    let utilization_pp = current.mean(M::Utilization) - baseline.mean(M::Utilization);
    let solvency_delta = current.mean(M::SolvencyScore) - baseline.mean(M::SolvencyScore);
    let coverage_pp = demand_coverage(Some(current)) - demand_coverage(Some(baseline));
    let retention_pp = retention_from_series(&ctx.aggregated) - retention_from_series(ctx.baseline_or_empty());

    let flags: Vec<&str> = [
        (price_pct <= -10.0, "Price"),
        (providers_pct <= -5.0, "Providers"),
        (utilization_pp <= -5.0, "Utilization"),
        (solvency_delta <= -0.1, "Solvency"),
        (coverage_pp <= -5.0, "Demand coverage"),
        (retention_pp <= -3.0, "Retention"),
    ]
    .into_iter()
    .filter_map(|(off, label)| off.then_some(label))
    .collect();

    let summary = if flags.is_empty() {
        "Core metrics are broadly in-line with baseline.".to_string()
    } else {
        format!("Metrics currently off baseline: {}.", flags.join(", "))
    };

    QuestionAnswer::base("A2")
        .graded(Y, if flags.len() >= 2 { AtRisk } else { Yes })
        .summary(summary)
        .window(format!("{} vs baseline {}", week_of(current), week_of(baseline)))
        .thresholds([
            "Price <= -10% vs baseline",
            "Providers <= -5% vs baseline",
            "Utilization <= -5 pp vs baseline",
            "Solvency <= -0.10x vs baseline",
        ])
        .metric("price_delta_vs_baseline_pct", "Price Delta vs Baseline", fixed(price_pct, 1), "%")
        .metric("providers_delta_vs_baseline_pct", "Providers Delta vs Baseline", fixed(providers_pct, 1), "%")
        .metric("utilization_delta_vs_baseline_pp", "Utilization Delta vs Baseline", fixed(utilization_pp, 1), "pp")
        .metric("solvency_delta_vs_baseline", "Solvency Delta vs Baseline", fixed(solvency_delta, 3), "x")
        .metric("coverage_delta_vs_baseline_pp", "Coverage Delta vs Baseline", fixed(coverage_pp, 1), "pp")
        .metric("retention_delta_vs_baseline_pp", "Retention Delta vs Baseline", fixed(retention_pp, 1), "pp")
        .chart("Benchmark/HealthMetricsBarChart", "Core KPI deltas in benchmark context")
        .panel("ScenarioComparisonPanel", "Baseline vs scenario statistical comparison")
        .reproducible(true)
        .confidence(0.88)
}

fn a3(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("A3", "Need current timestep to classify emerging failure mode.");
    };
    let price_delta = baseline_point(ctx).map_or(0.0, |b| pct_change(current.mean(M::Price), b.mean(M::Price)));
    let mode = infer_failure_mode(ctx);
    let at_risk = mode != FailureMode::Stable;
    let window = match ctx.previous() {
        Some(previous) => format!("{} vs {}", week_of(current), week_of(previous)),
        None => week_of(current),
    };

    QuestionAnswer::base("A3")
        .graded(Y, if at_risk { AtRisk } else { No })
        .summary(if at_risk {
            format!("Emerging failure mode: {}.", mode.label())
        } else {
            "No dominant failure mode is currently emerging.".to_string()
        })
        .window(window)
        .thresholds([
            "Subsidy trap: burn/mint < 0.8x and solvency < 1.0x".to_string(),
            format!(
                "Capitulation: churn >= {}%/week + retention below benchmark",
                fixed(CHURN.panic_pct_per_week * 0.8, 1)
            ),
            "Liquidity shock: price <= -20% vs baseline with elevated churn".to_string(),
        ])
        .label_metric("failure_mode_label", "Failure Mode", mode.label())
        .metric("burn_to_mint_ratio", "Burn-to-Mint", fixed(burn_to_mint(current), 3), "x")
        .metric("solvency_ratio", "Solvency Ratio", fixed(current.mean(M::SolvencyScore), 3), "x")
        .metric("churn_rate_pct", "Churn Rate", fixed(churn_pct(Some(current)), 2), "%/week")
        .metric("demand_coverage_pct", "Demand Coverage", fixed(demand_coverage(Some(current)), 1), "%")
        .metric("price_delta_vs_baseline_pct", "Price Delta vs Baseline", fixed(price_delta, 1), "%")
        .chart("Diagnostic/SignalsOfDeathPanel", "Failure signal stack")
        .chart("DecisionTree/Financial", "Burn/mint and runway trajectory")
        .reproducible(true)
        .confidence(0.86)
}

fn a4(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("A4", "Need at least two timesteps to determine retention trend.");
    };
    let current_retention = retention_from_series(&ctx.aggregated);
    let head = &ctx.aggregated[..ctx.aggregated.len() - 1];
    let head_peak = peak(&series(head, M::Providers), 0.0);
    let previous_retention = if head_peak > 0.0 {
        previous.mean(M::Providers) / head_peak * 100.0
    } else {
        0.0
    };
    let delta = current_retention - previous_retention;
    let stable = current_retention >= RETENTION.benchmark_min_pct && delta >= -0.5;

    QuestionAnswer::base("A4")
        .graded(Y, if stable { Yes } else { AtRisk })
        .summary(if stable {
            "Retention is stable relative to the benchmark threshold."
        } else {
            "Retention is degrading or below the benchmark threshold."
        })
        .window(format!("{} vs W{}", week_of(current), previous.t))
        .threshold(format!("Retention >= {}%", RETENTION.benchmark_min_pct))
        .metric("retention_pct", "Retention", fixed(current_retention, 1), "%")
        .metric("retention_delta_wow", "WoW Retention Delta", fixed(delta, 2), "pp")
        .chart("Simulator/Sandbox Tier 1", "Weekly Retention Rate trend")
        .chart("DecisionTree/Miner", "Provider churn trend")
        .reproducible(true)
        .confidence(0.9)
}

fn a5(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("A5", "Need at least two timesteps to determine service continuity trend.");
    };
    let current_coverage = demand_coverage(Some(current));
    let delta = current_coverage - demand_coverage(Some(previous));
    let stable = current_coverage >= 90.0 && delta >= -2.0;

    QuestionAnswer::base("A5")
        .graded(Y, if stable { Yes } else { AtRisk })
        .summary(if stable {
            "Service continuity remains stable based on demand coverage."
        } else {
            "Service continuity is at risk due to weakening demand coverage."
        })
        .window(format!("{} vs W{}", week_of(current), previous.t))
        .threshold("Demand coverage >= 90%")
        .metric("demand_coverage_pct", "Demand Coverage", fixed(current_coverage, 1), "%")
        .metric("coverage_delta_wow", "WoW Coverage Delta", fixed(delta, 2), "pp")
        .chart("DecisionTree/Utility", "Demand vs Demand Served")
        .chart("Simulator/Tier 3", "Network utilization and coverage")
        .reproducible(true)
        .confidence(0.87)
}

fn a6(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("A6", "Need at least two timesteps to infer solvency direction.");
    };
    let solvency = current.mean(M::SolvencyScore);
    let delta = solvency - previous.mean(M::SolvencyScore);
    let improving = delta >= 0.0;

    QuestionAnswer::base("A6")
        .graded(Y, if improving { Yes } else { AtRisk })
        .summary(if improving {
            "Incentive solvency is improving week over week."
        } else {
            "Incentive solvency is deteriorating week over week."
        })
        .window(format!("{} vs W{}", week_of(current), previous.t))
        .threshold(format!("Solvency ratio critical floor: {}x", fixed(SOLVENCY.critical_ratio, 1)))
        .metric("solvency_ratio", "Solvency Ratio", fixed(solvency, 3), "x")
        .metric("solvency_delta_wow", "WoW Solvency Delta", fixed(delta, 4), "x")
        .chart("Benchmark/SolvencyProjectionChart", "Solvency projection slope")
        .chart("DecisionTree/Financial", "Burn-to-mint and runway trend")
        .reproducible(true)
        .confidence(0.92)
}

fn a7(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("A7", "Need at least one timestep to classify subsidy dependency.");
    };
    let ratio = current.mean(M::SolvencyScore);
    let dependent = ratio < 1.0;

    QuestionAnswer::base("A7")
        .graded(Y, if dependent { Yes } else { No })
        .summary(if dependent {
            "Current configuration is subsidy-dependent (burn below mint)."
        } else {
            "Current configuration is not subsidy-dependent (burn at or above mint)."
        })
        .window(week_of(current))
        .threshold("Subsidy-dependent if burn/mint < 1.0x")
        .metric("solvency_ratio", "Burn-to-Mint Ratio", fixed(ratio, 3), "x")
        .panel("Diagnostic/SolvencyScorecard", "Cost vs revenue balance")
        .chart("DecisionTree/Financial", "Burn and mint trend")
        .reproducible(true)
        .confidence(0.95)
}

fn a8(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("A8", "Need at least one timestep to evaluate reward-demand alignment.");
    };
    let coverage = demand_coverage(Some(current));
    let utilization = current.mean(M::Utilization);
    let cost_per_capacity = current.mean(M::CostPerCapacity);
    let reward_to_demand = safe_divide(
        cost_per_capacity,
        current.mean(M::RevenuePerCapacity),
        if cost_per_capacity > 0.0 { 2.0 } else { 1.0 },
    );
    let solvency = current.mean(M::SolvencyScore);

    let healthy = [
        coverage >= 90.0,
        utilization >= UTILIZATION.watchlist_min_pct,
        reward_to_demand <= 1.0,
        solvency >= SOLVENCY.critical_ratio,
    ]
    .into_iter()
    .filter(|signal| *signal)
    .count();
    let (verdict, summary) = match healthy {
        3.. => (Yes, "Current rewards are broadly aligned with realized demand proxies."),
        2 => (AtRisk, "Reward-demand alignment is weakening and needs monitoring."),
        _ => (No, "Rewards appear misaligned with realized demand proxies."),
    };

    QuestionAnswer::base("A8")
        .graded(Y, verdict)
        .summary(summary)
        .window(week_of(current))
        .thresholds([
            "Demand coverage >= 90%".to_string(),
            format!("Utilization >= {}%", UTILIZATION.watchlist_min_pct),
            "Incentive cost per capacity <= revenue per capacity".to_string(),
            "Solvency ratio >= 1.0x".to_string(),
        ])
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("utilization_pct", "Utilization", fixed(utilization, 1), "%")
        .metric("reward_to_demand_ratio", "Cost/Revenue per Capacity", fixed(reward_to_demand, 3), "x")
        .metric("solvency_ratio", "Solvency Ratio", fixed(solvency, 3), "x")
        .panel("Diagnostic/SolvencyScorecard", "Cost vs revenue per capacity")
        .chart("DecisionTree/Utility", "Demand served and utilization context")
        .reproducible(true)
        .confidence(0.87)
}

fn a9(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.len() < 4 {
        return needs("A9", "Need at least four timesteps to estimate stress lead-lag behavior.");
    }
    let lag = estimate_shock_lag(ctx);
    let shock_point = usize::try_from(lag.shock_week_index)
        .ok()
        .and_then(|index| ctx.aggregated.get(index));
    let Some(shock_point) = shock_point else {
        return QuestionAnswer::base("A9")
            .graded(Y, No)
            .summary("No material price shock detected in this run, so lag behavior is not activated.")
            .window(span(ctx))
            .thresholds([
                "Shock trigger: price week-over-week drop <= -10%",
                "Churn response trigger: +1pp over pre-shock average",
                "Capacity response trigger: >=3% drop from shock week",
            ])
            .label_metric("price_shock_detected", "Price Shock Detected", "No")
            .chart("Simulator/Tier 3", "Price, churn, and capacity trajectories")
            .reproducible(true)
            .confidence(0.78);
    };

    let lagged = lag.lag_to_churn_weeks > 0 || lag.lag_to_capacity_weeks > 0;

    QuestionAnswer::base("A9")
        .graded(Y, if lagged { Yes } else { No })
        .summary(if lagged {
            "Stress effects are lagged after the primary price shock."
        } else {
            "Stress effects are immediate once a price shock occurs."
        })
        .window(format!("Shock {} onward", week_of(shock_point)))
        .thresholds([
            "Price shock: WoW price <= -10%",
            "Churn reaction: >= +1pp from pre-shock churn",
            "Capacity reaction: >=3% drop from shock-week capacity",
        ])
        .label_metric("shock_week", "Price Shock Week", week_of(shock_point))
        .metric("lag_to_churn_weeks", "Lag: Shock -> Churn", lag_or_no_breach(lag.lag_to_churn_weeks), "weeks")
        .metric("lag_to_capacity_weeks", "Lag: Churn -> Capacity", lag_or_no_breach(lag.lag_to_capacity_weeks), "weeks")
        .chart("DecisionTree/Miner", "Churn and capacity transition timing")
        .chart("Benchmark/SolvencyProjectionChart", "Shock-side solvency response")
        .reproducible(true)
        .confidence(0.8)
}

fn a10(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("A10", "Need at least one timestep to assess threshold proximity.");
    };
    let solvency = current.mean(M::SolvencyScore);
    let payback = estimated_payback_months(ctx);
    let churn = churn_pct(Some(current));
    let solvency_line = SOLVENCY.critical_ratio + 0.1;
    let payback_line = PAYBACK.healthy_max_months * 0.9;
    let churn_line = CHURN.panic_pct_per_week * 0.8;
    let near = solvency <= solvency_line || payback >= payback_line || churn >= churn_line;

    QuestionAnswer::base("A10")
        .graded(Y, if near { AtRisk } else { No })
        .summary(if near {
            "At least one core metric is near a critical threshold."
        } else {
            "Core metrics are not near critical thresholds right now."
        })
        .window(week_of(current))
        .thresholds([
            format!("Solvency near-critical <= {}x", fixed(solvency_line, 1)),
            format!("Payback near-critical >= {} months", fixed(payback_line, 1)),
            format!("Churn near panic >= {}%/week", fixed(churn_line, 1)),
        ])
        .metric("solvency_ratio", "Solvency Ratio", fixed(solvency, 3), "x")
        .metric(
            "payback_months_est",
            "Estimated Payback",
            crate::format::finite_or(payback, 2, ">120"),
            "mo",
        )
        .metric("churn_rate_pct", "Churn Rate", fixed(churn, 2), "%/week")
        .chart("DecisionTree/Miner", "Payback + churn thresholds")
        .chart("Benchmark/SolvencyProjectionChart", "Critical solvency floor")
        .reproducible(true)
        .confidence(0.82)
}

fn a11(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.len() < 3 {
        return needs("A11", "Need at least three timesteps to establish lead-lag ordering across indicators.");
    }
    let breaches = leading_indicator_breaches(ctx);
    let Some(first) = breaches.first() else {
        return QuestionAnswer::base("A11")
            .graded(Y, No)
            .summary("No leading-indicator breach sequence is active in this run.")
            .window(span(ctx))
            .threshold("Lead indicators are ordered by first threshold breach week")
            .label_metric("leading_indicator_sequence_active", "Sequence Active", "No")
            .chart("Benchmark/AIInsights", "Indicator trend context")
            .chart("DecisionTree/Miner", "Provider and churn timing context")
            .reproducible(true)
            .confidence(0.78);
    };

    let ordered = breaches
        .iter()
        .take(4)
        .map(|breach| format!("{} (W{})", breach.label, breach.week))
        .collect::<Vec<_>>()
        .join(" -> ");
    let mut thresholds: Vec<&str> = Vec::new();
    for breach in &breaches {
        if !thresholds.contains(&breach.threshold) {
            thresholds.push(breach.threshold);
        }
    }

    QuestionAnswer::base("A11")
        .graded(Y, Yes)
        .summary(format!(
            "Leading indicator sequence starts with {} at W{}. Ordered sequence: {}.",
            first.label, first.week, ordered
        ))
        .window(span(ctx))
        .thresholds(thresholds)
        .label_metric("first_leading_indicator", "First Leading Indicator", first.label)
        .label_metric("first_breach_week", "First Breach Week", format!("W{}", first.week))
        .metric(
            "first_breach_delta",
            &format!("{} Delta at Breach", first.label),
            fixed(first.delta, 2),
            first.unit,
        )
        .label_metric("leading_indicator_count", "Indicators with Breaches", breaches.len().to_string())
        .chart("Benchmark/AIInsights", "Ordered indicator transitions vs baseline")
        .chart("DecisionTree/Risk", "Cross-metric first-breach timeline")
        .reproducible(true)
        .confidence(0.84)
}

fn a12(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("A12", "Need at least two timesteps to produce week-over-week change analysis.");
    };
    let baseline = baseline_point(ctx);
    let coverage = demand_coverage(Some(current));
    let churn = churn_pct(Some(current));

    let wow_solvency = current.mean(M::SolvencyScore) - previous.mean(M::SolvencyScore);
    let wow_providers = pct_change(current.mean(M::Providers), previous.mean(M::Providers));
    let wow_coverage = coverage - demand_coverage(Some(previous));
    let wow_churn = churn - churn_pct(Some(previous));
    let vs_baseline = baseline.map(|b| {
        (
            current.mean(M::SolvencyScore) - b.mean(M::SolvencyScore),
            pct_change(current.mean(M::Providers), b.mean(M::Providers)),
        )
    });

    let deteriorating = [wow_solvency < 0.0, wow_providers < 0.0, wow_coverage < 0.0, wow_churn > 0.0]
        .into_iter()
        .filter(|signal| *signal)
        .count();

    let (answerability, summary, window) = match baseline {
        Some(b) => (
            Y,
            "Week-over-week and baseline deltas are available for the core KPI set.",
            format!("{} vs {} vs baseline {}", week_of(current), week_of(previous), week_of(b)),
        ),
        None => (
            P,
            "Week-over-week deltas are available, but baseline comparison data is missing.",
            format!("{} vs {}", week_of(current), week_of(previous)),
        ),
    };

    QuestionAnswer::base("A12")
        .graded(answerability, if deteriorating >= 2 { AtRisk } else { Yes })
        .summary(summary)
        .window(window)
        .thresholds([
            "At-risk if two or more core KPIs deteriorate week-over-week",
            "Baseline deltas require aligned baseline run",
        ])
        .metric("wow_solvency_delta", "WoW Solvency Delta", fixed(wow_solvency, 3), "x")
        .metric("wow_providers_delta_pct", "WoW Providers Delta", fixed(wow_providers, 2), "%")
        .metric("wow_coverage_delta_pp", "WoW Coverage Delta", fixed(wow_coverage, 2), "pp")
        .metric("wow_churn_delta_pp", "WoW Churn Delta", fixed(wow_churn, 2), "pp")
        .metric(
            "baseline_solvency_delta",
            "vs Baseline Solvency Delta",
            vs_baseline.map_or("N/A".to_string(), |(solvency, _)| fixed(solvency, 3)),
            "x",
        )
        .metric(
            "baseline_providers_delta_pct",
            "vs Baseline Providers Delta",
            vs_baseline.map_or("N/A".to_string(), |(_, providers)| fixed(providers, 2)),
            "%",
        )
        .chart("Benchmark/HealthMetricsBarChart", "KPI delta context")
        .panel("ScenarioComparisonPanel", "Baseline and stress run comparison")
        .reproducible(baseline.is_some())
        .confidence(if baseline.is_some() { 0.9 } else { 0.74 })
}
