// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Comparative Evaluators (G)

use super::{cohort_retention, lag_or_no_breach, needs, span, week_of, week_range, yes_no, Entry};
use crate::format::fixed;
use crate::guardrails::{CHURN, RETENTION, SOLVENCY};
use crate::metrics::{average, churn_pct, demand_coverage, late_average, nonzero_or, peak, retention_from_series, series};
use crate::snapshots::{classify_regime, death_spiral_risk, estimate_shock_lag};
use crate::types::{AggregateResult, AnswerContext, Answerability::*, Metric as M, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("G1", g1),
    ("G2", g2),
    ("G3", g3),
    ("G4", g4),
    ("G5", g5),
    ("G6", g6),
    ("G7", g7),
    ("G8", g8),
];

const LATE_WINDOW: usize = 4;

/// Lowest value of `value` across the run; infinite for an empty run.
fn floor_of(points: &[AggregateResult], value: impl Fn(&AggregateResult) -> f64) -> f64 {
    points.iter().map(value).fold(f64::INFINITY, f64::min)
}

fn min_coverage(points: &[AggregateResult]) -> f64 {
    floor_of(points, |p| demand_coverage(Some(p)))
}

fn min_solvency(points: &[AggregateResult]) -> f64 {
    floor_of(points, |p| p.mean(M::SolvencyScore))
}

fn g1(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(peer), false) = (ctx.baseline(), ctx.aggregated.is_empty()) else {
        return needs(
            "G1",
            "Need peer/archetype comparison run data to evaluate relative profile under identical stress.",
        );
    };
    let risk_delta = death_spiral_risk(&ctx.aggregated).probability_pct - death_spiral_risk(peer).probability_pct;
    let retention_delta = retention_from_series(&ctx.aggregated) - retention_from_series(peer);
    let coverage = |points: &[AggregateResult]| late_average(points, LATE_WINDOW, |p| demand_coverage(Some(p)));
    let solvency = |points: &[AggregateResult]| late_average(points, LATE_WINDOW, |p| p.mean(M::SolvencyScore));
    let coverage_delta = coverage(&ctx.aggregated) - coverage(peer);
    let solvency_delta = solvency(&ctx.aggregated) - solvency(peer);

    let score = -risk_delta * 0.4 + retention_delta * 0.2 + coverage_delta * 0.2 + solvency_delta * 100.0 * 0.2;

    let (verdict, summary) = if score > 2.0 {
        (Yes, "Onocoy profile is comparatively stronger versus peer archetype under matched stress.")
    } else if score < -2.0 {
        (No, "Onocoy profile is comparatively weaker versus peer archetype under matched stress.")
    } else {
        (AtRisk, "Comparative profile is mixed or near parity under matched stress.")
    };

    QuestionAnswer::base("G1")
        .graded(P, verdict)
        .summary(summary)
        .window("Current profile vs baseline archetype profile (matched horizon)")
        .threshold("Comparative score combines risk, retention, coverage, and solvency deltas versus peer baseline")
        .metric("comparative_profile_score", "Comparative Profile Score", fixed(score, 1), "index")
        .metric("risk_delta_vs_peer_pp", "Risk Delta vs Peer", fixed(risk_delta, 1), "pp")
        .metric("retention_delta_vs_peer_pp", "Retention Delta vs Peer", fixed(retention_delta, 1), "pp")
        .metric("coverage_delta_vs_peer_pp", "Coverage Delta vs Peer", fixed(coverage_delta, 1), "pp")
        .metric("solvency_delta_vs_peer", "Solvency Delta vs Peer", fixed(solvency_delta, 3), "x")
        .chart("ScenarioComparisonPanel", "Matched-stress comparative outcomes")
        .chart("Benchmark/ComparativeMatrix", "Archetype comparison matrix")
        .reproducible(true)
        .confidence(0.78)
}

fn g2(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.len() < 3 {
        return needs("G2", "Need multi-week trajectory to evaluate demand-contraction robustness.");
    }
    let points = &ctx.aggregated;
    let first_demand = points.first().map_or(0.0, |p| p.mean(M::Demand));
    let min_demand = floor_of(points, |p| nonzero_or(p.mean(M::Demand), first_demand));
    let contraction_pct = if first_demand > 0.0 {
        (first_demand - min_demand) / first_demand * 100.0
    } else {
        0.0
    };
    let coverage_floor = min_coverage(points);
    let solvency_floor = min_solvency(points);
    let providers = series(points, M::Providers);
    let provider_peak = peak(&providers, 1.0);
    let collapse_pct = (provider_peak - providers.last().copied().unwrap_or(0.0)) / provider_peak * 100.0;
    let contraction_active = contraction_pct >= 10.0;

    let verdict = if !contraction_active {
        AtRisk
    } else if coverage_floor >= 90.0 && solvency_floor >= 1.0 && collapse_pct <= 15.0 {
        Yes
    } else if coverage_floor >= 80.0 {
        AtRisk
    } else {
        No
    };

    QuestionAnswer::base("G2")
        .graded(P, verdict)
        .summary(if contraction_active {
            "Demand-contraction robustness is inferred from solvency, coverage, and provider collapse behavior."
        } else {
            "Demand contraction is not active in this run; robustness signal is provisional."
        })
        .window(span(ctx))
        .thresholds([
            "Contraction active if demand drops >= 10% from start",
            "Robust if min coverage >= 90%, min solvency >= 1.0x, collapse <= 15%",
        ])
        .metric("demand_contraction_pct", "Demand Contraction", fixed(contraction_pct, 1), "%")
        .metric("min_coverage_pct", "Minimum Coverage", fixed(coverage_floor, 1), "%")
        .metric("min_solvency_ratio", "Minimum Solvency", fixed(solvency_floor, 3), "x")
        .metric("provider_collapse_pct", "Provider Collapse", fixed(collapse_pct, 1), "%")
        .chart("DecisionTree/Utility", "Demand-contraction service robustness")
        .chart("DecisionTree/Financial", "Contraction solvency robustness")
        .reproducible(true)
        .confidence(0.8)
}

fn g3(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.current().is_none() {
        return needs("G3", "Need current timestep to evaluate liquidity-shock robustness.");
    }
    let lag = estimate_shock_lag(ctx);
    let shock_active = ctx.params.investor_sell_pct >= 0.25 || lag.has_shock();
    let coverage_floor = min_coverage(&ctx.aggregated);
    let collapse_pct = death_spiral_risk(&ctx.aggregated).provider_collapse_pct;

    let verdict = if !shock_active {
        AtRisk
    } else if coverage_floor >= 90.0 && collapse_pct <= 10.0 {
        Yes
    } else if coverage_floor >= 80.0 {
        AtRisk
    } else {
        No
    };

    QuestionAnswer::base("G3")
        .graded(P, verdict)
        .summary(if shock_active {
            "Liquidity-shock robustness is assessed from post-shock coverage and collapse behavior."
        } else {
            "Liquidity shock is not active in this run; robustness is not fully exercised."
        })
        .window(span(ctx))
        .thresholds([
            "Liquidity shock active if investor sell >= 25% or price shock trigger breached",
            "Robust if minimum coverage >= 90% and provider collapse <= 10%",
        ])
        .label_metric("liquidity_shock_active", "Liquidity Shock Active", yes_no(shock_active))
        .metric("min_coverage_pct", "Minimum Coverage", fixed(coverage_floor, 1), "%")
        .metric("provider_collapse_pct", "Provider Collapse", fixed(collapse_pct, 1), "%")
        .chart("DecisionTree/Risk", "Liquidity-shock downside profile")
        .chart("DecisionTree/Utility", "Coverage under liquidity stress")
        .reproducible(true)
        .confidence(0.81)
}

fn g4(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.current().is_none() {
        return needs("G4", "Need current timestep to evaluate robustness under competitive-yield pressure.");
    }
    let competitor_yield = ctx.params.competitor_yield;
    let vampire_churn = average(&series(&ctx.aggregated, M::VampireChurn));
    let pressure_active = competitor_yield >= 0.75 || vampire_churn > 0.0;
    let coverage_floor = min_coverage(&ctx.aggregated);
    let retention = retention_from_series(&ctx.aggregated);
    let collapse_pct = death_spiral_risk(&ctx.aggregated).provider_collapse_pct;

    let verdict = if !pressure_active {
        AtRisk
    } else if coverage_floor >= 90.0 && retention >= RETENTION.benchmark_min_pct && collapse_pct <= 15.0 {
        Yes
    } else if coverage_floor >= 80.0 {
        AtRisk
    } else {
        No
    };

    QuestionAnswer::base("G4")
        .graded(P, verdict)
        .summary(if pressure_active {
            "Competitive-yield robustness is inferred from coverage floor, retention floor, and collapse severity."
        } else {
            "Competitive-yield pressure is not fully activated in this run; robustness remains provisional."
        })
        .window(week_range(&ctx.aggregated))
        .thresholds([
            "Competitive pressure active if competitorYield >= 0.75x or vampire churn is present",
            "Robust if min coverage >= 90%, retention >= benchmark, and provider collapse <= 15%",
        ])
        .metric("competitor_yield_x", "Competitor Yield", fixed(competitor_yield, 2), "x")
        .metric("vampire_churn_avg", "Average Vampire Churn", fixed(vampire_churn, 2), "providers/week")
        .metric("min_coverage_pct", "Minimum Coverage", fixed(coverage_floor, 1), "%")
        .metric("retention_pct", "Retention", fixed(retention, 1), "%")
        .metric("provider_collapse_pct", "Provider Collapse", fixed(collapse_pct, 1), "%")
        .chart("DecisionTree/Miner", "Competitive pressure and churn response")
        .chart("DecisionTree/Utility", "Coverage resilience under competitive stress")
        .reproducible(true)
        .confidence(0.79)
}

fn g5(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.current().is_none() {
        return needs("G5", "Need current timestep to evaluate cost-inflation robustness.");
    }
    let regime = classify_regime(ctx);
    let cost_stress = regime.cost_delta_vs_reference_pct >= 20.0 || regime.stress.cost >= 1.0;
    let retention = retention_from_series(&ctx.aggregated);
    let solvency_floor = min_solvency(&ctx.aggregated);
    let coverage_floor = min_coverage(&ctx.aggregated);

    let verdict = if !cost_stress {
        AtRisk
    } else if retention >= RETENTION.benchmark_min_pct && solvency_floor >= 1.0 && coverage_floor >= 90.0 {
        Yes
    } else if coverage_floor >= 80.0 {
        AtRisk
    } else {
        No
    };

    QuestionAnswer::base("G5")
        .graded(P, verdict)
        .summary(if cost_stress {
            "Cost-inflation robustness is inferred from retention, solvency floor, and coverage floor."
        } else {
            "Cost-inflation stress is not active in this run; comparative robustness remains provisional."
        })
        .window(span(ctx))
        .thresholds([
            "Cost stress active if provider cost delta >= 20%",
            "Robust if retention >= benchmark, min solvency >= 1.0x, min coverage >= 90%",
        ])
        .metric(
            "provider_cost_delta_vs_reference_pct",
            "Provider Cost Delta vs Reference",
            fixed(regime.cost_delta_vs_reference_pct, 1),
            "%",
        )
        .metric("retention_pct", "Retention", fixed(retention, 1), "%")
        .metric("min_solvency_ratio", "Minimum Solvency", fixed(solvency_floor, 3), "x")
        .metric("min_coverage_pct", "Minimum Coverage", fixed(coverage_floor, 1), "%")
        .chart("DecisionTree/Miner", "Cost-pressure provider response")
        .chart("DecisionTree/Utility", "Coverage resilience under cost pressure")
        .reproducible(true)
        .confidence(0.8)
}

fn g6(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(_), true) = (ctx.current(), ctx.aggregated.len() >= 2) else {
        return needs("G6", "Need tier trajectories to evaluate sunk-cost friction effects on churn speed.");
    };
    let pro_retention = cohort_retention(&ctx.aggregated, M::ProCount);
    let mercenary_retention = cohort_retention(&ctx.aggregated, M::MercenaryCount);
    let gap = pro_retention - mercenary_retention;
    let lag = estimate_shock_lag(ctx);
    let materially_slow = gap >= 10.0 && lag.lag_to_churn_weeks >= 1;

    QuestionAnswer::base("G6")
        .graded(
            P,
            if materially_slow {
                Yes
            } else if gap > 0.0 {
                AtRisk
            } else {
                No
            },
        )
        .summary(if materially_slow {
            "Sunk-cost friction appears to materially slow churn relative to low-commitment supply."
        } else {
            "Sunk-cost friction signal is weak or only partial in this run."
        })
        .window(week_range(&ctx.aggregated))
        .threshold("Material slow-down signal if pro-vs-merc retention gap >= 10pp and churn reaction lag >= 1 week")
        .metric("pro_retention_pct", "Pro Retention", fixed(pro_retention, 1), "%")
        .metric("mercenary_retention_pct", "Mercenary Retention", fixed(mercenary_retention, 1), "%")
        .metric("retention_gap_pp", "Retention Gap (Pro - Mercenary)", fixed(gap, 1), "pp")
        .metric(
            "lag_shock_to_churn_weeks",
            "Shock -> Churn Lag",
            lag_or_no_breach(lag.lag_to_churn_weeks),
            "weeks",
        )
        .chart("DecisionTree/Miner", "Commitment-tier retention and churn lag")
        .chart("Diagnostic/SignalsOfDeathPanel", "Churn response sequencing")
        .reproducible(true)
        .confidence(0.8)
}

#[derive(Debug, Clone, Copy)]
enum Signature {
    SubsidyTrap,
    ChurnCapitulation,
    ServiceDegradation,
    LiquiditySpiral,
}

impl Signature {
    fn label(self) -> &'static str {
        match self {
            Self::SubsidyTrap => "Subsidy Trap",
            Self::ChurnCapitulation => "Churn Capitulation",
            Self::ServiceDegradation => "Service Degradation",
            Self::LiquiditySpiral => "Liquidity Spiral",
        }
    }
}

/// Index of the first week whose price sits at least 20% under its running peak.
fn first_drawdown_breach(points: &[AggregateResult]) -> Option<usize> {
    let prices = series(points, M::Price);
    let mut running_peak = prices.first().copied().unwrap_or(0.0);
    prices.iter().position(|&price| {
        running_peak = running_peak.max(price);
        running_peak > 0.0 && (running_peak - price) / running_peak * 100.0 >= 20.0
    })
}

fn g7(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.is_empty() {
        return needs("G7", "Need scenario trajectory to detect earliest failure signature.");
    }
    let points = &ctx.aggregated;
    let breaches = [
        (
            Signature::SubsidyTrap,
            points.iter().position(|p| p.mean(M::SolvencyScore) < SOLVENCY.critical_ratio),
        ),
        (
            Signature::ChurnCapitulation,
            points.iter().position(|p| churn_pct(Some(p)) >= CHURN.panic_pct_per_week * 0.8),
        ),
        (
            Signature::ServiceDegradation,
            points.iter().position(|p| demand_coverage(Some(p)) < 90.0),
        ),
        (Signature::LiquiditySpiral, first_drawdown_breach(points)),
    ];
    let earliest = breaches
        .iter()
        .filter_map(|(signature, index)| index.map(|index| (*signature, index)))
        .min_by_key(|(_, index)| *index);

    let Some((signature, index)) = earliest else {
        return QuestionAnswer::base("G7")
            .graded(P, No)
            .summary("No major failure signature breached in the current horizon.")
            .window(span(ctx))
            .threshold("First breach among solvency, churn, coverage, and liquidity drawdown signatures")
            .label_metric("earliest_failure_signature", "Earliest Failure Signature", "None")
            .chart("DecisionTree/Risk", "Failure-signature timing context")
            .reproducible(true)
            .confidence(0.82);
    };
    let breach_week = week_of(&points[index]);

    QuestionAnswer::base("G7")
        .graded(P, AtRisk)
        .summary(format!("Earliest detected failure signature is {}.", signature.label()))
        .window(format!("First breach at {}", breach_week))
        .threshold("Earliest breach among solvency<1.0x, churn panic threshold, coverage<90%, drawdown>=20%")
        .label_metric("earliest_failure_signature", "Earliest Failure Signature", signature.label())
        .label_metric("earliest_failure_week", "Earliest Failure Week", breach_week)
        .chart("DecisionTree/Risk", "Failure-signature timeline")
        .chart("DecisionTree/Financial", "Solvency and liquidity signature context")
        .reproducible(true)
        .confidence(0.84)
}

fn g8(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("G8", "Need current timestep to evaluate anti-dilution vs flexibility tradeoff.");
    };
    let supply = nonzero_or(current.mean(M::Supply), 1.0).max(1.0);
    let mint_pressure_pct = current.mean(M::Minted) / supply * 100.0;
    let solvency = current.mean(M::SolvencyScore);
    let coverage = demand_coverage(Some(current));
    let utilization = current.mean(M::Utilization);
    let anti_dilution = mint_pressure_pct <= 0.5 && solvency >= SOLVENCY.critical_ratio;
    let flexibility_constraint = coverage < 90.0 || utilization > 85.0;

    let (verdict, summary) = match (anti_dilution, flexibility_constraint) {
        (true, true) => (Yes, "Current profile appears to trade demand flexibility for anti-dilution resilience."),
        (true, false) => (AtRisk, "Profile shows anti-dilution resilience without a clear flexibility penalty."),
        (false, _) => (No, "Anti-dilution resilience is not strong enough to infer this tradeoff."),
    };

    QuestionAnswer::base("G8")
        .graded(P, verdict)
        .summary(summary)
        .window(week_of(current))
        .thresholds([
            "Anti-dilution signal: weekly mint pressure <= 0.5% of supply and solvency >= 1.0x",
            "Flexibility constraint signal: coverage < 90% or utilization > 85%",
        ])
        .metric(
            "mint_pressure_pct_supply_weekly",
            "Weekly Mint Pressure",
            fixed(mint_pressure_pct, 3),
            "% of supply",
        )
        .metric("solvency_ratio", "Solvency Ratio", fixed(solvency, 3), "x")
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .metric("utilization_pct", "Utilization", fixed(utilization, 1), "%")
        .chart("Benchmark/HealthMetricsBarChart", "Dilution and coverage tradeoff context")
        .chart("DecisionTree/Utility", "Flexibility/throughput context")
        .reproducible(true)
        .confidence(0.77)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationParams;

    fn point(t: u32, price: f64, solvency: f64) -> AggregateResult {
        AggregateResult::new(t)
            .with(M::Price, price)
            .with(M::SolvencyScore, solvency)
            .with(M::Providers, 100.0)
            .with(M::Demand, 100.0)
            .with(M::DemandServed, 100.0)
    }

    fn ctx(points: Vec<AggregateResult>) -> AnswerContext {
        AnswerContext::new("r", SimulationParams::default(), points)
    }

    #[test]
    fn earliest_signature_wins() {
        let answer = g7(&ctx(vec![
            point(1, 1.0, 1.2),
            point(2, 0.7, 1.2),
            point(3, 0.7, 0.8),
        ]));
        assert_eq!(answer.verdict, AtRisk);
        assert_eq!(answer.window, "First breach at W2");
        assert_eq!(
            answer.find_metric("earliest_failure_signature").map(|m| m.value.to_string()),
            Some("Liquidity Spiral".to_string())
        );
    }

    #[test]
    fn quiet_horizon_reports_no_signature() {
        let answer = g7(&ctx(vec![point(1, 1.0, 1.2), point(2, 1.0, 1.2)]));
        assert_eq!(answer.verdict, No);
    }

    #[test]
    fn drawdown_breach_tracks_running_peak() {
        let points = vec![point(1, 1.0, 1.0), point(2, 2.0, 1.0), point(3, 1.7, 1.0), point(4, 1.5, 1.0)];
        assert_eq!(first_drawdown_breach(&points), Some(3));
    }
}
