// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - User Evaluators (E)

use super::{cohort_retention, needs, top_ranked, week_of, week_range, yes_no, Entry};
use crate::format::fixed;
use crate::guardrails::{CHURN, RETENTION};
use crate::metrics::{
    average, churn_pct, demand_coverage, nonzero_or, pct_change, retention_from_series, safe_divide, tail,
};
use crate::snapshots::{classify_regime, estimate_shock_lag, ProviderEconomics};
use crate::types::{AggregateResult, AnswerContext, Answerability::*, Metric as M, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("E1", e1),
    ("E2", e2),
    ("E3", e3),
    ("E4", e4),
    ("E5", e5),
    ("E6", e6),
    ("E7", e7),
    ("E8", e8),
];

fn e1(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("E1", "Need current timestep to evaluate service continuity under churn pressure.");
    };
    let churn = churn_pct(Some(current));
    let rising = ctx.previous().is_some_and(|previous| churn >= churn_pct(Some(previous)));
    let elevated = CHURN.panic_pct_per_week * 0.6;
    let pressure = churn >= elevated || rising;
    let min_coverage = ctx
        .aggregated
        .iter()
        .map(|point| demand_coverage(Some(point)))
        .fold(f64::INFINITY, f64::min);
    let stable = min_coverage >= 90.0;

    let (verdict, summary) = if !pressure {
        (
            AtRisk,
            "Meaningful churn pressure is not active in this run, so continuity resilience remains provisional.",
        )
    } else if stable {
        (Yes, "Service continuity remains stable despite rising churn pressure.")
    } else {
        (
            if min_coverage >= 80.0 { AtRisk } else { No },
            "Service continuity is degrading under churn pressure.",
        )
    };

    QuestionAnswer::base("E1")
        .graded(P, verdict)
        .summary(summary)
        .window(week_range(&ctx.aggregated))
        .thresholds([
            format!("Churn pressure active if churn >= {}%/week or rising", fixed(elevated, 1)),
            "Continuity stable if minimum demand coverage remains >= 90%".to_string(),
        ])
        .metric("current_churn_pct_week", "Current Churn", fixed(churn, 2), "%/week")
        .label_metric("churn_pressure_active", "Churn Pressure Active", yes_no(pressure))
        .metric("min_demand_coverage_pct", "Minimum Demand Coverage", fixed(min_coverage, 1), "%")
        .chart("DecisionTree/Utility", "Service continuity under churn pressure")
        .chart("DecisionTree/Miner", "Churn pressure trend")
        .reproducible(true)
        .confidence(0.81)
}

fn e2(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("E2", "Need current timestep to evaluate capacity sufficiency against expected demand.");
    };
    let demand = current.mean(M::Demand);
    let capacity = current.mean(M::Capacity);
    let coverage = demand_coverage(Some(current));
    let buffer_pct = if demand > 0.0 {
        safe_divide(capacity - demand, demand, 0.0) * 100.0
    } else {
        100.0
    };
    let sufficient = coverage >= 95.0 && buffer_pct >= 0.0;

    QuestionAnswer::base("E2")
        .graded(
            P,
            if sufficient {
                Yes
            } else if coverage >= 85.0 {
                AtRisk
            } else {
                No
            },
        )
        .summary(if sufficient {
            "Current capacity is sufficient for expected demand."
        } else {
            "Capacity sufficiency is tightening relative to expected demand."
        })
        .window(week_of(current))
        .thresholds([
            "Sufficient if demand coverage >= 95% and capacity buffer >= 0%",
            "At-risk if demand coverage is between 85% and 95%",
        ])
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("capacity_buffer_pct", "Capacity Buffer vs Demand", fixed(buffer_pct, 1), "%")
        .metric("capacity_units", "Capacity", fixed(capacity, 0), "units")
        .metric("demand_units", "Demand", fixed(demand, 0), "units")
        .chart("DecisionTree/Utility", "Capacity and demand trajectory")
        .chart("Benchmark/HealthMetricsBarChart", "Coverage sufficiency summary")
        .reproducible(true)
        .confidence(0.85)
}

fn e3(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("E3", "Need at least two timesteps to detect latent degradation signals.");
    };
    let coverage = demand_coverage(Some(current));
    let provider_delta = pct_change(current.mean(M::Providers), previous.mean(M::Providers));
    let churn = churn_pct(Some(current));
    let retention = retention_from_series(&ctx.aggregated);
    let latent = coverage >= 95.0
        && (provider_delta <= -2.0
            || churn >= CHURN.panic_pct_per_week * 0.7
            || retention < RETENTION.benchmark_min_pct);

    QuestionAnswer::base("E3")
        .graded(P, if latent { Yes } else { No })
        .summary(if latent {
            "Latent degradation signals are present despite high apparent uptime/coverage."
        } else {
            "No strong latent degradation signal is visible behind current uptime metrics."
        })
        .window(format!("{} vs {}", week_of(previous), week_of(current)))
        .threshold("Latent degradation if coverage >= 95% with simultaneous provider/churn deterioration")
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("providers_delta_wow_pct", "WoW Providers Delta", fixed(provider_delta, 2), "%")
        .metric("churn_pct_week", "Current Churn", fixed(churn, 2), "%/week")
        .metric("retention_pct", "Retention", fixed(retention, 1), "%")
        .chart("DecisionTree/Utility", "Coverage and uptime context")
        .chart("DecisionTree/Miner", "Latent provider-degradation context")
        .reproducible(true)
        .confidence(0.84)
}

fn e4(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs(
            "E4",
            "Need current timestep to identify which stress scenario most threatens service quality.",
        );
    };
    let regime = classify_regime(ctx);
    let lag = estimate_shock_lag(ctx);
    let coverage = demand_coverage(Some(current));
    let churn = churn_pct(Some(current));
    let economics = ProviderEconomics::at(ctx, Some(current));
    let bump = |active: bool, weight: f64| if active { weight } else { 0.0 };

    let threats = [
        ("Demand contraction stress", regime.stress.demand + bump(coverage < 90.0, 1.0)),
        ("Liquidity/unlock stress", regime.stress.liquidity + bump(lag.has_shock(), 0.5)),
        (
            "Competitive-yield stress",
            regime.stress.competitive + bump(churn >= CHURN.panic_pct_per_week * 0.6, 0.5),
        ),
        (
            "Provider cost-inflation stress",
            regime.stress.cost + bump(economics.weekly_margin_usd <= 0.0, 0.5),
        ),
    ];
    let (threat, score) = top_ranked(&threats);

    QuestionAnswer::base("E4")
        .graded(P, if score >= 1.0 { AtRisk } else { No })
        .summary(format!("Most threatening service-quality stress signature is {}.", threat))
        .window(week_of(current))
        .threshold("Threat score combines active regime stress plus service degradation signals")
        .label_metric("top_service_threat", "Top Service-Quality Threat", threat)
        .metric("top_service_threat_score", "Top Threat Score", fixed(score, 2), "index")
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .chart("DecisionTree/Utility", "Service continuity and coverage path")
        .chart("Benchmark/AIInsights", "Scenario stress context")
        .reproducible(true)
        .confidence(0.78)
}

fn e5(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("E5", "Need current timestep to assess coverage resilience to liquidity events.");
    };
    let regime = classify_regime(ctx);
    let lag = estimate_shock_lag(ctx);
    let coverage = demand_coverage(Some(current));
    let provider_delta = ctx
        .previous()
        .map_or(0.0, |previous| pct_change(current.mean(M::Providers), previous.mean(M::Providers)));
    let event_active = ctx.params.investor_sell_pct >= 0.25 || regime.stress.liquidity >= 1.0 || lag.has_shock();

    let (verdict, summary) = if !event_active {
        (
            AtRisk,
            "Liquidity event is not active in this run; coverage resilience remains unproven.",
        )
    } else if coverage >= 90.0 && provider_delta >= -5.0 {
        (Yes, "Coverage remains resilient under liquidity-event conditions.")
    } else {
        (
            if coverage >= 80.0 { AtRisk } else { No },
            "Coverage is degrading under liquidity-event conditions.",
        )
    };

    QuestionAnswer::base("E5")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("{} liquidity-event view", week_of(current)))
        .threshold("Liquidity-event resilience if demand coverage >= 90% and provider drop > -5% WoW")
        .label_metric("liquidity_event_active", "Liquidity Event Active", yes_no(event_active))
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("providers_delta_wow_pct", "WoW Providers Delta", fixed(provider_delta, 2), "%")
        .chart("DecisionTree/Utility", "Coverage under liquidity-event trajectory")
        .chart("DecisionTree/Risk", "Liquidity shock downside context")
        .reproducible(true)
        .confidence(0.8)
}

fn e6(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("E6", "Need current timestep to assess coverage resilience to provider cost inflation.");
    };
    let regime = classify_regime(ctx);
    let coverage = demand_coverage(Some(current));
    let retention = retention_from_series(&ctx.aggregated);
    let cost_stress = regime.cost_delta_vs_reference_pct >= 20.0 || regime.stress.cost >= 1.0;

    let (verdict, summary) = if !cost_stress {
        (AtRisk, "Cost-inflation stress is not active in this run; resilience is unproven.")
    } else if coverage >= 90.0 && retention >= RETENTION.benchmark_min_pct {
        (Yes, "Coverage is resilient under elevated provider-cost conditions.")
    } else {
        (
            if coverage >= 80.0 { AtRisk } else { No },
            "Coverage resilience weakens under provider-cost inflation.",
        )
    };

    QuestionAnswer::base("E6")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("{} cost-inflation view", week_of(current)))
        .thresholds([
            "Cost-inflation stress active if provider cost is >= +20% vs reference",
            "Resilient if demand coverage >= 90% and retention >= benchmark",
        ])
        .metric(
            "provider_cost_delta_vs_reference_pct",
            "Provider Cost Delta vs Reference",
            fixed(regime.cost_delta_vs_reference_pct, 1),
            "%",
        )
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("retention_pct", "Retention", fixed(retention, 1), "%")
        .chart("DecisionTree/Utility", "Coverage under cost pressure")
        .chart("DecisionTree/Miner", "Provider retention under cost pressure")
        .reproducible(true)
        .confidence(0.79)
}

fn e7(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), true) = (ctx.current(), ctx.aggregated.len() >= 2) else {
        return needs(
            "E7",
            "Need quality-tier trajectories to assess whether quality-linked incentives protect delivered service.",
        );
    };
    let lever_active = nonzero_or(ctx.params.pro_tier_efficiency, 1.0) > 1.0;
    let coverage = demand_coverage(Some(current));
    let pro_retention = cohort_retention(&ctx.aggregated, M::ProCount);
    let mercenary_retention = cohort_retention(&ctx.aggregated, M::MercenaryCount);
    let protective = lever_active && coverage >= 90.0 && pro_retention >= mercenary_retention;

    QuestionAnswer::base("E7")
        .graded(
            P,
            if protective {
                Yes
            } else if lever_active {
                AtRisk
            } else {
                No
            },
        )
        .summary(if protective {
            "Quality-linked incentives are currently protecting delivered service outcomes."
        } else {
            "Protection from quality-linked incentives is partial or not evident in this run."
        })
        .window(week_of(current))
        .thresholds([
            "Quality lever active if pro-tier efficiency > 1.0x",
            "Service protection signal if coverage >= 90% and pro retention >= merc retention",
        ])
        .label_metric("quality_lever_active", "Quality Lever Active", yes_no(lever_active))
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("pro_retention_pct", "Pro Retention", fixed(pro_retention, 1), "%")
        .metric("mercenary_retention_pct", "Mercenary Retention", fixed(mercenary_retention, 1), "%")
        .chart("DecisionTree/Utility", "Delivered-service continuity trend")
        .chart("DecisionTree/Miner", "Quality-tier retention trend")
        .reproducible(true)
        .confidence(0.78)
}

/// Coverage and solvency lift reliability; churn drags it.
fn reliability_index(points: &[AggregateResult]) -> f64 {
    let collect = |value: fn(&AggregateResult) -> f64| -> f64 {
        let values: Vec<f64> = points.iter().map(value).collect();
        average(&values)
    };
    let coverage = collect(|p| demand_coverage(Some(p)));
    let solvency = collect(|p| p.mean(M::SolvencyScore));
    let churn = collect(|p| churn_pct(Some(p)));
    coverage * 0.6 + solvency * 30.0 - churn * 3.0
}

fn e8(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.len() < 4 {
        return needs("E8", "Need at least four timesteps to infer reliability direction over time.");
    }
    let window = 4.min(ctx.aggregated.len());
    let early = &ctx.aggregated[..window];
    let late = tail(&ctx.aggregated, window);
    let early_index = reliability_index(early);
    let late_index = reliability_index(late);
    let delta = late_index - early_index;

    let (verdict, summary) = if delta > 2.0 {
        (Yes, "Network reliability is improving over time.")
    } else if delta < -2.0 {
        (No, "Network reliability is degrading over time.")
    } else {
        (AtRisk, "Network reliability is roughly flat with minor drift.")
    };

    QuestionAnswer::base("E8")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("Early {} vs Late {}", week_range(early), week_range(late)))
        .thresholds([
            "Reliability index combines coverage (+), solvency (+), and churn (-)",
            "Meaningful trend if reliability delta magnitude > 2 index points",
        ])
        .metric("reliability_index_early", "Early Reliability Index", fixed(early_index, 2), "index")
        .metric("reliability_index_late", "Late Reliability Index", fixed(late_index, 2), "index")
        .metric("reliability_index_delta", "Reliability Delta", fixed(delta, 2), "index")
        .chart("Benchmark/HealthMetricsBarChart", "Reliability trajectory summary")
        .chart("DecisionTree/Utility", "Coverage and delivery continuity trend")
        .reproducible(true)
        .confidence(0.82)
}
