// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Builder Evaluators (B)
//
// Mechanism-design questions: emission rigidity, sensitivities, lags,
// reward-extension tradeoffs and cross-run robustness.

use super::{cohort_retention, lag_or_no_breach, needs, span, top_ranked, week_of, Entry};
use crate::format::{finite_or, fixed};
use crate::guardrails::CHURN;
use crate::metrics::{
    average, churn_pct, demand_coverage, late_average, nonzero_or, pct_change,
    retention_from_series, series,
};
use crate::snapshots::{
    burn_emission_projection, classify_regime, death_spiral_risk, estimate_shock_lag,
    infer_failure_mode, margin_series, reward_extension_sweep, ProviderEconomics, TierMargins,
};
use crate::types::{
    AggregateResult, AnswerContext, Answerability::*, EmissionModel, Metric as M, QuestionAnswer, Verdict::*,
};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("B1", b1),
    ("B2", b2),
    ("B3", b3),
    ("B4", b4),
    ("B5", b5),
    ("B6", b6),
    ("B7", b7),
    ("B8", b8),
    ("B9", b9),
    ("B10", b10),
    ("B11", b11),
    ("B12", b12),
    ("B13", b13),
    ("B14", b14),
    ("B15", b15),
    ("B16", b16),
    ("B17", b17),
    ("B18", b18),
];

fn b1(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), true) = (ctx.current(), ctx.aggregated.len() >= 2) else {
        return needs("B1", "Need at least two timesteps to evaluate emissions rigidity.");
    };
    let reference = &ctx.aggregated[ctx.aggregated.len().saturating_sub(5)];
    let demand_delta = pct_change(current.mean(M::Demand), reference.mean(M::Demand));
    let mint_delta = pct_change(current.mean(M::Minted), reference.mean(M::Minted));
    let gap = (mint_delta - demand_delta).abs();
    let fixed_model = ctx.params.emission_model == EmissionModel::Fixed;
    let rigid = (fixed_model && gap > 15.0 && demand_delta.abs() > 10.0) || gap > 25.0;

    QuestionAnswer::base("B1")
        .graded(P, if rigid { AtRisk } else { No })
        .summary(if rigid {
            "Emissions are moving too rigidly relative to demand change."
        } else {
            "Emissions are not currently showing severe rigidity versus demand."
        })
        .window(format!("{} to {}", week_of(reference), week_of(current)))
        .thresholds([
            "Rigidity gap = |mint delta - demand delta|",
            "Watchlist if rigidity gap > 15pp under fixed emission mode",
            "Intervention if rigidity gap > 25pp",
        ])
        .metric("demand_delta_pct", "Demand Delta", fixed(demand_delta, 1), "%")
        .metric("mint_delta_pct", "Mint Delta", fixed(mint_delta, 1), "%")
        .metric("rigidity_gap_pct", "Emission Rigidity Gap", fixed(gap, 1), "pp")
        .label_metric("emission_model", "Emission Model", ctx.params.emission_model.as_str())
        .panel("Simulator/Sidebar Tokenomics", "Emission and burn controls")
        .chart("DecisionTree/Financial", "Mint and burn response to demand")
        .reproducible(true)
        .confidence(0.84)
}

fn b2(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(first), Some(last), true) = (ctx.aggregated.first(), ctx.current(), ctx.aggregated.len() >= 2) else {
        return needs("B2", "Need at least two timesteps to estimate reward-to-usage tracking.");
    };
    let usage_delta = pct_change(last.mean(M::DemandServed), first.mean(M::DemandServed));
    let reward_delta = pct_change(last.mean(M::Minted), first.mean(M::Minted));
    let gap = (reward_delta - usage_delta).abs();
    let demand_linked = ctx.params.emission_model == EmissionModel::Kpi;
    let tracking = if gap <= 10.0 {
        Yes
    } else if gap <= 25.0 {
        AtRisk
    } else {
        No
    };
    let verdict = match (demand_linked, tracking) {
        (true, No) => AtRisk,
        (true, _) => Yes,
        (false, tracking) => tracking,
    };

    QuestionAnswer::base("B2")
        .graded(P, verdict)
        .summary(if demand_linked {
            "Demand-linking is active; reward-usage coupling is stronger than fixed mode."
        } else {
            "Reward-usage tracking is inferred from minted vs demand-served deltas."
        })
        .window(format!("{} to {}", week_of(first), week_of(last)))
        .thresholds([
            "Tracking gap <= 10pp: tight",
            "Tracking gap 10-25pp: partial",
            "Tracking gap > 25pp: weak",
        ])
        .metric("usage_delta_pct", "Demand Served Delta", fixed(usage_delta, 1), "%")
        .metric("reward_delta_pct", "Minted Rewards Delta", fixed(reward_delta, 1), "%")
        .metric("reward_usage_tracking_gap_pp", "Reward-Usage Gap", fixed(gap, 1), "pp")
        .label_metric("emission_model", "Emission Model", ctx.params.emission_model.as_str())
        .chart("DecisionTree/Utility", "Usage trajectory (demand served)")
        .chart("DecisionTree/Financial", "Reward outflow trajectory (minted)")
        .reproducible(true)
        .confidence(0.81)
}

fn b3(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.len() < 4 {
        return needs("B3", "Need at least four timesteps to estimate contraction deterioration speed.");
    }
    let early_demand = average(&series(&ctx.aggregated[..3], M::Demand));
    let contraction = ctx
        .aggregated
        .iter()
        .position(|point| point.mean(M::Demand) <= early_demand * 0.9);
    let Some(start) = contraction else {
        return QuestionAnswer::base("B3")
            .graded(Y, No)
            .summary("No demand-contraction phase detected in this run.")
            .window(span(ctx))
            .threshold("Demand contraction trigger: demand <= 90% of early-run baseline demand")
            .label_metric("contraction_detected", "Demand Contraction Detected", "No")
            .chart("DecisionTree/Utility", "Demand trajectory")
            .reproducible(true)
            .confidence(0.83);
    };

    let slice = &ctx.aggregated[start..];
    let solvency = series(slice, M::SolvencyScore);
    let starting = solvency[0];
    let min_solvency = solvency.iter().copied().fold(f64::INFINITY, f64::min);
    let min_index = solvency.iter().position(|v| *v == min_solvency).unwrap_or(0).max(1);
    let per_week = ((starting - min_solvency) / min_index as f64).max(0.0);

    QuestionAnswer::base("B3")
        .graded(Y, if per_week > 0.05 { AtRisk } else { No })
        .summary(format!(
            "Burn-to-emission deterioration speed under contraction is {}x solvency/week.",
            fixed(per_week, 3)
        ))
        .window(format!("Contraction {} onward", week_of(&slice[0])))
        .thresholds([
            "Watchlist deterioration > 0.03x solvency/week",
            "Intervention deterioration > 0.05x solvency/week",
        ])
        .metric("contraction_start_solvency", "Solvency at Contraction Start", fixed(starting, 3), "x")
        .metric("contraction_min_solvency", "Minimum Solvency Post-Contraction", fixed(min_solvency, 3), "x")
        .metric("solvency_deterioration_per_week", "Deterioration Speed", fixed(per_week, 3), "x/week")
        .chart("Benchmark/SolvencyProjectionChart", "Post-contraction solvency slope")
        .chart("DecisionTree/Utility", "Demand-contraction trigger context")
        .reproducible(true)
        .confidence(0.87)
}

fn b4(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("B4", "Need current timestep to estimate churn-sensitivity drivers.");
    };
    let (params, reference) = (&ctx.params, &ctx.reference);
    let default_cost = nonzero_or(reference.provider_cost_per_week, nonzero_or(params.provider_cost_per_week, 1.0));
    let default_lag = nonzero_or(reference.reward_lag_weeks, params.reward_lag_weeks);
    let default_threshold = nonzero_or(reference.churn_threshold, params.churn_threshold);
    let default_burn = nonzero_or(reference.burn_pct, nonzero_or(params.burn_pct, 0.3));

    let scores = [
        ("providerCostPerWeek", (pct_change(params.provider_cost_per_week, default_cost) / 18.0).max(0.0)),
        ("competitorYield", ((params.competitor_yield - reference.competitor_yield) / 0.35).max(0.0)),
        ("rewardLagWeeks", ((params.reward_lag_weeks - default_lag) / 1.5).max(0.0)),
        ("churnThreshold", ((params.churn_threshold - default_threshold) / 40.0).max(0.0)),
        ("burnPct", ((default_burn - params.burn_pct) / 0.08).max(0.0)),
    ];
    let (top, score) = top_ranked(&scores);
    let churn = churn_pct(Some(current));
    let elevated = CHURN.panic_pct_per_week * 0.6;

    QuestionAnswer::base("B4")
        .graded(P, if score >= 1.5 || churn >= elevated { AtRisk } else { No })
        .summary(format!(
            "Highest modeled churn sensitivity is currently {} (score {}).",
            top,
            fixed(score, 2)
        ))
        .window(format!("{} parameter state", week_of(current)))
        .thresholds([
            "Sensitivity score >= 1.5: high churn sensitivity".to_string(),
            format!("Elevated churn warning if churn >= {}%/week", fixed(elevated, 1)),
        ])
        .label_metric("top_churn_sensitivity_parameter", "Top Churn Sensitivity Parameter", top)
        .metric("top_churn_sensitivity_score", "Top Churn Sensitivity Score", fixed(score, 2), "index")
        .metric("current_churn_pct_week", "Current Churn", fixed(churn, 2), "%/week")
        .chart("Diagnostic/SensitivityHeatmap", "Churn-related parameter stress map")
        .panel("Simulator/Sidebar Tokenomics", "Current parameter state")
        .reproducible(true)
        .confidence(0.77)
}

fn b5(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("B5", "Need current timestep to estimate solvency sensitivity drivers.");
    };
    let (params, reference) = (&ctx.params, &ctx.reference);
    let default_mint = nonzero_or(reference.max_mint_weekly, nonzero_or(params.max_mint_weekly, 1.0));
    let default_burn = nonzero_or(reference.burn_pct, nonzero_or(params.burn_pct, 1.0));
    let default_cost = nonzero_or(reference.provider_cost_per_week, nonzero_or(params.provider_cost_per_week, 1.0));

    let scores = [
        ("maxMintWeekly", (pct_change(params.max_mint_weekly, default_mint) / 25.0).max(0.0)),
        ("burnPct", (-pct_change(params.burn_pct, default_burn) / 20.0).max(0.0)),
        ("providerCostPerWeek", (pct_change(params.provider_cost_per_week, default_cost) / 20.0).max(0.0)),
        ("competitorYield", ((params.competitor_yield - reference.competitor_yield) / 0.5).max(0.0)),
    ];
    let (top, score) = top_ranked(&scores);

    QuestionAnswer::base("B5")
        .graded(P, if score >= 1.5 { AtRisk } else { No })
        .summary(format!(
            "Highest modeled solvency sensitivity is currently {} (score {}).",
            top,
            fixed(score, 2)
        ))
        .window(format!("{} parameter state", week_of(current)))
        .thresholds([
            "Sensitivity score >= 1.5: high",
            "Sensitivity score 0.75-1.5: moderate",
            "Sensitivity score < 0.75: low",
        ])
        .label_metric("top_sensitivity_parameter", "Top Sensitivity Parameter", top)
        .metric("top_sensitivity_score", "Top Sensitivity Score", fixed(score, 2), "index")
        .metric("solvency_ratio", "Current Solvency", fixed(current.mean(M::SolvencyScore), 3), "x")
        .chart("Diagnostic/SensitivityTornadoChart", "Sensitivity-direction reference")
        .panel("Simulator/Sidebar Tokenomics", "Active parameter settings")
        .reproducible(true)
        .confidence(0.74)
}

fn b6(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("B6", "Need at least two timesteps to estimate margin needed to stabilize churn.");
    };
    let economics = ProviderEconomics::at(ctx, Some(current));
    let acceleration = churn_pct(Some(current)) - churn_pct(Some(previous));
    let minimum_margin = nonzero_or(ctx.params.churn_threshold, 0.0) + (acceleration * 1.5).max(0.0);

    QuestionAnswer::base("B6")
        .graded(P, if economics.weekly_margin_usd >= minimum_margin { No } else { AtRisk })
        .summary(format!(
            "Estimated minimum margin to avoid churn acceleration is {} USD/week.",
            fixed(minimum_margin, 2)
        ))
        .window(format!("{} to {}", week_of(previous), week_of(current)))
        .thresholds([
            "Base margin floor = churn threshold",
            "Additional buffer scales with positive churn acceleration",
        ])
        .metric("current_margin_usd_week", "Current Margin", fixed(economics.weekly_margin_usd, 2), "USD/week")
        .metric("min_margin_needed_usd_week", "Min Margin Needed", fixed(minimum_margin, 2), "USD/week")
        .metric("churn_acceleration_pp", "Churn Acceleration", fixed(acceleration, 2), "pp/week")
        .chart("DecisionTree/Miner", "Margin and churn transition behavior")
        .chart("Simulator/Sandbox Tier 1", "Churn acceleration context")
        .reproducible(true)
        .confidence(0.79)
}

const NO_FAILING_TIER: &str = "No tier currently below break-even";

fn b7(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), true) = (ctx.current(), ctx.aggregated.len() >= 2) else {
        return needs(
            "B7",
            "Need tier and trajectory data to identify which provider tier fails first under cost inflation.",
        );
    };
    let regime = classify_regime(ctx);
    let tier = TierMargins::at(ctx, Some(current));
    let cost_stress = regime.cost_delta_vs_reference_pct >= 20.0 || regime.stress.cost >= 1.0;

    let failing = if tier.pro_margin_usd <= 0.0 && tier.mercenary_margin_usd <= 0.0 {
        if tier.pro_margin_usd < tier.mercenary_margin_usd {
            "Pro tier"
        } else {
            "Mercenary tier"
        }
    } else if tier.mercenary_margin_usd <= 0.0 {
        "Mercenary tier"
    } else if tier.pro_margin_usd <= 0.0 {
        "Pro tier"
    } else {
        NO_FAILING_TIER
    };

    let (verdict, summary) = if !cost_stress {
        (
            AtRisk,
            "Cost-inflation stress is not active; tier-failure order remains provisional.".to_string(),
        )
    } else {
        (
            if failing == NO_FAILING_TIER { No } else { Yes },
            format!("{} appears to fail first under current cost inflation conditions.", failing),
        )
    };

    QuestionAnswer::base("B7")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("{} cost-inflation view", week_of(current)))
        .thresholds([
            "Cost stress active if provider cost delta >= +20% vs reference",
            "Fail-first signal when tier margin <= 0 USD/week",
        ])
        .metric(
            "provider_cost_delta_vs_reference_pct",
            "Provider Cost Delta vs Reference",
            fixed(regime.cost_delta_vs_reference_pct, 1),
            "%",
        )
        .metric("pro_margin_usd_week", "Pro Tier Margin", fixed(tier.pro_margin_usd, 2), "USD/week")
        .metric("mercenary_margin_usd_week", "Mercenary Tier Margin", fixed(tier.mercenary_margin_usd, 2), "USD/week")
        .label_metric("first_failing_tier", "First Failing Tier", failing)
        .chart("DecisionTree/Miner", "Tier economics under cost pressure")
        .chart("Benchmark/AIInsights", "Active cost-stress regime context")
        .reproducible(true)
        .confidence(0.79)
}

const SEVERE_COMPRESSION_PCT: f64 = 30.0;

fn b8(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs(
            "B8",
            "Need current liquidity/supply/price state to estimate required depth against unlock compression.",
        );
    };
    let liquidity = nonzero_or(ctx.params.initial_liquidity, 1.0).max(1.0);
    let sell_pct = ctx.params.investor_sell_pct.max(0.0);
    let unlock_value = (current.mean(M::Supply) * sell_pct * current.mean(M::Price).max(0.0)).max(0.0);

    // Constant-product pool: price retention after dumping `alpha` of depth is 1 / (1 + alpha)^2.
    let alpha = unlock_value / liquidity;
    let compression_pct = ((1.0 - 1.0 / (1.0 + alpha).powi(2)) * 100.0).max(0.0);
    let allowed_retention = 1.0 - SEVERE_COMPRESSION_PCT / 100.0;
    let max_alpha = (1.0 / allowed_retention).sqrt() - 1.0;
    let required = if max_alpha > 0.0 {
        unlock_value / max_alpha
    } else {
        f64::INFINITY
    };
    let gap = required - liquidity;
    let coverage_ratio = if required > 0.0 { liquidity / required } else { 1.0 };

    let verdict = if coverage_ratio >= 1.0 {
        Yes
    } else if coverage_ratio >= 0.6 {
        AtRisk
    } else {
        No
    };

    QuestionAnswer::base("B8")
        .graded(P, verdict)
        .summary(if coverage_ratio >= 1.0 {
            "Current liquidity depth is sufficient to keep unlock reward compression below severe levels."
        } else {
            "Current liquidity depth is insufficient to prevent severe unlock-driven reward compression."
        })
        .window(format!("Unlock event at W{}", (ctx.params.investor_unlock_week + 1).max(1)))
        .thresholds([
            format!(
                "Severe compression threshold: > {}% reward-value compression at unlock",
                SEVERE_COMPRESSION_PCT
            ),
            "Required liquidity computed from constant-product AMM shock approximation".to_string(),
        ])
        .metric("unlock_value_usd", "Unlock Notional Value", fixed(unlock_value, 0), "USD")
        .metric("current_liquidity_usd", "Current Liquidity Depth", fixed(liquidity, 0), "USD")
        .metric(
            "required_liquidity_usd",
            "Required Liquidity Depth",
            finite_or(required, 0, "N/A"),
            "USD",
        )
        .metric("liquidity_gap_usd", "Liquidity Gap", finite_or(gap, 0, "N/A"), "USD")
        .metric("unlock_reward_compression_pct", "Projected Reward Compression", fixed(compression_pct, 1), "%")
        .panel("Simulator/Sidebar Liquidity", "Liquidity/unlock controls")
        .chart("DecisionTree/Financial", "Price and reward compression context")
        .reproducible(true)
        .confidence(0.74)
}

fn b9(ctx: &AnswerContext) -> QuestionAnswer {
    let lag = estimate_shock_lag(ctx);
    let shock = usize::try_from(lag.shock_week_index)
        .ok()
        .and_then(|index| ctx.aggregated.get(index));
    let Some(shock) = shock else {
        return QuestionAnswer::base("B9")
            .graded(P, No)
            .summary("No qualifying price shock was detected, so lag cannot be measured this run.")
            .window(span(ctx))
            .threshold("Shock trigger: week-over-week price drop <= -10%")
            .label_metric("price_shock_detected", "Price Shock Detected", "No")
            .chart("DecisionTree/Risk", "Price and churn path")
            .reproducible(true)
            .confidence(0.78);
    };

    QuestionAnswer::base("B9")
        .graded(P, if lag.lag_to_churn_weeks > 0 { Yes } else { No })
        .summary(if lag.lag_to_churn_weeks >= 0 {
            format!("Estimated lag from shock to churn is {} weeks.", lag.lag_to_churn_weeks)
        } else {
            "No churn reaction breach was detected after the shock.".to_string()
        })
        .window(format!("Shock at {} onward", week_of(shock)))
        .threshold("Churn reaction trigger: +1pp above pre-shock churn average")
        .metric("lag_shock_to_churn_weeks", "Shock -> Churn Lag", lag_or_no_breach(lag.lag_to_churn_weeks), "weeks")
        .metric(
            "lag_churn_to_capacity_weeks",
            "Churn -> Capacity Lag",
            lag_or_no_breach(lag.lag_to_capacity_weeks),
            "weeks",
        )
        .metric("pre_shock_churn_pct", "Pre-Shock Churn Baseline", fixed(lag.avg_pre_shock_churn, 2), "%/week")
        .chart("DecisionTree/Miner", "Churn response timeline")
        .chart("DecisionTree/Utility", "Capacity lag timeline")
        .reproducible(true)
        .confidence(0.82)
}

fn b10(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.len() < 4 {
        return needs("B10", "Need at least four timesteps to estimate churn-to-capacity lag.");
    }
    let churn: Vec<f64> = ctx.aggregated.iter().map(|p| churn_pct(Some(p))).collect();
    let capacity = series(&ctx.aggregated, M::Capacity);
    let churn_baseline = average(&churn[..3]);
    let spike = churn
        .iter()
        .position(|v| *v >= churn_baseline + 1.0 || *v >= CHURN.panic_pct_per_week * 0.6);
    let Some(spike) = spike else {
        return QuestionAnswer::base("B10")
            .graded(P, No)
            .summary("No qualifying churn spike was detected, so churn-to-capacity lag is not activated.")
            .window(span(ctx))
            .threshold(
                "Churn spike trigger: +1pp above early-run churn baseline or >=60% of panic churn threshold",
            )
            .label_metric("churn_spike_detected", "Churn Spike Detected", "No")
            .chart("DecisionTree/Miner", "Churn and capacity timeline")
            .reproducible(true)
            .confidence(0.8);
    };

    let capacity_at_spike = nonzero_or(capacity[spike], 1.0);
    let lag = (spike..capacity.len())
        .find(|&i| pct_change(capacity[i], capacity_at_spike) <= -3.0)
        .map_or(-1, |i| (i - spike) as i64);
    let verdict = match lag {
        1.. => Yes,
        0 => No,
        _ => AtRisk,
    };
    let spike_week = week_of(&ctx.aggregated[spike]);

    QuestionAnswer::base("B10")
        .graded(P, verdict)
        .summary(if lag >= 0 {
            format!("Estimated lag from churn spike to capacity loss is {} weeks.", lag)
        } else {
            "No material capacity-loss breach followed the churn spike in this horizon.".to_string()
        })
        .window(format!("Churn spike at {} onward", spike_week))
        .threshold("Capacity-loss trigger: >=3% drop from churn-spike week capacity")
        .label_metric("churn_spike_week", "Churn Spike Week", spike_week)
        .metric("lag_churn_to_capacity_weeks", "Churn -> Capacity Lag", lag_or_no_breach(lag), "weeks")
        .metric("churn_baseline_pct_week", "Early-Window Churn Baseline", fixed(churn_baseline, 2), "%/week")
        .chart("DecisionTree/Miner", "Churn and capacity reaction timing")
        .chart("DecisionTree/Utility", "Capacity degradation timeline")
        .reproducible(true)
        .confidence(0.82)
}

fn b11(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("B11", "Need current run state to project 4/8/12 week beta/bonus extension impact.");
    };
    let sweep = reward_extension_sweep(ctx, current);
    let (w4, w8, w12) = (&sweep[0], &sweep[1], &sweep[2]);
    let severe_widening = w12.subsidy_gap_delta_pp >= 8.0;
    let weak_lift = w12.retention_delta_pp < 3.0;
    let favorable = w8.retention_delta_pp >= 2.0 && w12.subsidy_gap_delta_pp < 6.0;

    let (verdict, summary) = if severe_widening && weak_lift {
        (No, "Long extension materially widens subsidy dependence with limited retention benefit.")
    } else if favorable {
        (
            Yes,
            "Extending beta/bonus rewards shows a manageable subsidy tradeoff up to 12 weeks in the current regime.",
        )
    } else {
        (
            AtRisk,
            "Short extensions help retention, but longer extension windows meaningfully increase subsidy dependence.",
        )
    };

    QuestionAnswer::base("B11")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("Projection from current state {}", week_of(current)))
        .thresholds([
            "Tradeoff degrades if 12-week subsidy-gap widening >= 8pp",
            "Healthy extension profile keeps 12-week subsidy-gap widening < 6pp with >= 2pp retention lift at 8 weeks",
        ])
        .metric("ext4_retention_delta_pp", "4w Retention Delta", fixed(w4.retention_delta_pp, 2), "pp")
        .metric("ext4_subsidy_gap_delta_pp", "4w Subsidy Gap Delta", fixed(w4.subsidy_gap_delta_pp, 2), "pp")
        .metric("ext8_retention_delta_pp", "8w Retention Delta", fixed(w8.retention_delta_pp, 2), "pp")
        .metric("ext8_subsidy_gap_delta_pp", "8w Subsidy Gap Delta", fixed(w8.subsidy_gap_delta_pp, 2), "pp")
        .metric("ext12_retention_delta_pp", "12w Retention Delta", fixed(w12.retention_delta_pp, 2), "pp")
        .metric("ext12_subsidy_gap_delta_pp", "12w Subsidy Gap Delta", fixed(w12.subsidy_gap_delta_pp, 2), "pp")
        .panel("Simulator/Sidebar Tokenomics", "Reward-policy controls used for extension proxy")
        .chart("DecisionTree/Miner", "Retention and margin baseline context")
        .reproducible(true)
        .confidence(0.71)
}

fn b12(ctx: &AnswerContext) -> QuestionAnswer {
    let risk = death_spiral_risk(&ctx.aggregated);

    QuestionAnswer::base("B12")
        .graded(P, if risk.probability_pct >= 50.0 { AtRisk } else { No })
        .summary(format!(
            "Estimated death-spiral probability for the active scenario is {}%.",
            fixed(risk.probability_pct, 1)
        ))
        .window(span(ctx))
        .thresholds(["Alert >= 40%", "High risk >= 50%", "Very high risk >= 65%"])
        .metric("death_spiral_probability_pct", "Death-Spiral Probability", fixed(risk.probability_pct, 1), "%")
        .metric("insolvency_weeks", "Insolvency Weeks", risk.insolvency_weeks.to_string(), "weeks")
        .metric("panic_churn_weeks", "Panic Churn Weeks", risk.panic_churn_weeks.to_string(), "weeks")
        .metric("max_price_drawdown_pct", "Max Price Drawdown", fixed(risk.max_drawdown_pct, 1), "%")
        .metric("provider_collapse_pct", "Provider Collapse", fixed(risk.provider_collapse_pct, 1), "%")
        .chart("DecisionTree/Risk", "Tail-risk and insolvency exposure")
        .chart("Benchmark/SolvencyProjectionChart", "Solvency deterioration context")
        .reproducible(true)
        .confidence(0.83)
}

fn b13(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("B13", "Need current timestep to run burn/emission directional sensitivity.");
    };
    let projection = burn_emission_projection(ctx, current);
    let improves = projection.burn_up_emission_down_solvency > projection.current_solvency;

    QuestionAnswer::base("B13")
        .graded(P, if improves { Yes } else { AtRisk })
        .summary(
            "Directional sweep indicates higher burn and tighter emission pressure improve solvency from the current state.",
        )
        .window(format!("{} directional sweep", week_of(current)))
        .thresholds([
            "Sensitivity assumption: +10pp burn and -10% emission pressure",
            "Inverse control: -10pp burn and +10% emission pressure",
        ])
        .metric("current_solvency_ratio", "Current Solvency", fixed(projection.current_solvency, 3), "x")
        .metric("baseline_burn_pct", "Current Burn Fraction", fixed(projection.base_burn_pct * 100.0, 1), "%")
        .metric(
            "projected_solvency_burn_up_emission_down",
            "Projected Solvency (Burn Up, Emission Down)",
            fixed(projection.burn_up_emission_down_solvency, 3),
            "x",
        )
        .metric(
            "projected_solvency_burn_down_emission_up",
            "Projected Solvency (Burn Down, Emission Up)",
            fixed(projection.burn_down_emission_up_solvency, 3),
            "x",
        )
        .panel("Simulator/Sidebar Tokenomics", "Burn and emission controls")
        .chart("Benchmark/SolvencyProjectionChart", "Directional solvency sensitivity context")
        .reproducible(true)
        .confidence(0.75)
}

fn b14(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(first), Some(current), true) = (ctx.aggregated.first(), ctx.current(), ctx.aggregated.len() >= 2)
    else {
        return needs("B14", "Need at least two timesteps to compare commitment-tier retention quality.");
    };
    let pro_retention = cohort_retention(&ctx.aggregated, M::ProCount);
    let mercenary_retention = cohort_retention(&ctx.aggregated, M::MercenaryCount);
    let lift = pro_retention - mercenary_retention;
    let tier = TierMargins::at(ctx, Some(current));
    let improves = lift >= 5.0 && tier.pro_margin_usd >= tier.mercenary_margin_usd;

    QuestionAnswer::base("B14")
        .graded(P, if improves { Yes } else if lift > 0.0 { AtRisk } else { No })
        .summary(format!(
            "Commitment-tier quality lift is {}pp (pro retention vs mercenary retention).",
            fixed(lift, 1)
        ))
        .window(format!("{} to {}", week_of(first), week_of(current)))
        .thresholds([
            "Improvement signal if pro retention exceeds mercenary retention by >= 5pp",
            "Improvement signal if pro margin >= mercenary margin",
        ])
        .metric("pro_retention_pct", "Pro Retention", fixed(pro_retention, 1), "%")
        .metric("mercenary_retention_pct", "Mercenary Retention", fixed(mercenary_retention, 1), "%")
        .metric("retention_quality_lift_pp", "Retention Quality Lift", fixed(lift, 1), "pp")
        .metric("pro_margin_usd_week", "Pro Margin", fixed(tier.pro_margin_usd, 2), "USD/week")
        .metric("mercenary_margin_usd_week", "Mercenary Margin", fixed(tier.mercenary_margin_usd, 2), "USD/week")
        .chart("DecisionTree/Miner", "Tier economics and retention trend")
        .panel("Diagnostic/StrategicRecommendationsPanel", "Commitment-tier policy context")
        .reproducible(true)
        .confidence(0.79)
}

fn b15(ctx: &AnswerContext) -> QuestionAnswer {
    if ctx.aggregated.is_empty() {
        return needs(
            "B15",
            "Need run trajectory to determine whether the profile favors peak returns or downside resilience.",
        );
    }
    let margins = margin_series(ctx);
    let peak_margin = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average_margin = average(&margins);
    let resilience = 100.0 - death_spiral_risk(&ctx.aggregated).probability_pct;

    let (mode, verdict) = if peak_margin > 30.0 && resilience < 55.0 {
        ("Peak returns bias", No)
    } else if resilience >= 70.0 {
        ("Downside resilience bias", Yes)
    } else {
        ("Balanced / mixed profile", AtRisk)
    };

    QuestionAnswer::base("B15")
        .graded(P, verdict)
        .summary(format!("Current objective profile is classified as: {}.", mode))
        .window(span(ctx))
        .thresholds([
            "Peak returns bias: high peak margin with weak downside resilience",
            "Downside resilience bias: death-spiral probability remains low",
        ])
        .metric("peak_margin_usd_week", "Peak Margin", fixed(peak_margin, 2), "USD/week")
        .metric("average_margin_usd_week", "Average Margin", fixed(average_margin, 2), "USD/week")
        .metric("downside_resilience_score", "Downside Resilience Score", fixed(resilience, 1), "/100")
        .chart("DecisionTree/Miner", "ROI and margin profile")
        .chart("DecisionTree/Risk", "Downside resilience profile")
        .reproducible(true)
        .confidence(0.8)
}

/// Late-window means compare the last four weeks of each run.
const LATE_WINDOW: usize = 4;

fn b16(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(baseline), false) = (ctx.baseline(), ctx.aggregated.is_empty()) else {
        return needs(
            "B16",
            "Need baseline and design-change runs to test robustness improvement without overfitting.",
        );
    };
    let current_risk = death_spiral_risk(&ctx.aggregated);
    let baseline_risk = death_spiral_risk(baseline);
    let coverage = |p: &AggregateResult| demand_coverage(Some(p));
    let solvency = |p: &AggregateResult| p.mean(M::SolvencyScore);

    let risk_delta = current_risk.probability_pct - baseline_risk.probability_pct;
    let retention_delta = retention_from_series(&ctx.aggregated) - retention_from_series(baseline);
    let coverage_delta =
        late_average(&ctx.aggregated, LATE_WINDOW, coverage) - late_average(baseline, LATE_WINDOW, coverage);
    let solvency_delta =
        late_average(&ctx.aggregated, LATE_WINDOW, solvency) - late_average(baseline, LATE_WINDOW, solvency);

    let improvements = [-risk_delta, retention_delta, coverage_delta, solvency_delta];
    let improved = improvements.iter().filter(|d| **d > 0.0).count();
    let harmed = improvements.iter().filter(|d| **d < -1.0).count();
    let robust = improved >= 3 && harmed == 0;
    let overfit = improved <= 1 && harmed >= 2;

    let (verdict, summary) = if robust {
        (
            Yes,
            "Design change improves robustness across multiple dimensions without concentrated tradeoff failure.",
        )
    } else if overfit {
        (No, "Design change appears overfit: narrow gains with multiple robustness regressions.")
    } else {
        (
            AtRisk,
            "Design change shows mixed robustness impact and needs broader scenario validation.",
        )
    };

    QuestionAnswer::base("B16")
        .graded(P, verdict)
        .summary(summary)
        .window("Design-change run vs baseline run")
        .threshold("Robust-without-overfit if >=3 of 4 robustness dimensions improve and none materially regress")
        .label_metric("robust_dimensions_improved", "Improved Robustness Dimensions", improved.to_string())
        .label_metric("robust_dimensions_harmed", "Harmed Robustness Dimensions", harmed.to_string())
        .metric("risk_delta_pp", "Risk Delta", fixed(risk_delta, 1), "pp")
        .metric("retention_delta_pp", "Retention Delta", fixed(retention_delta, 1), "pp")
        .metric("coverage_delta_pp", "Coverage Delta", fixed(coverage_delta, 1), "pp")
        .metric("solvency_delta", "Solvency Delta", fixed(solvency_delta, 3), "x")
        .chart("ScenarioComparisonPanel", "Cross-run robustness comparison")
        .chart("DecisionTree/Risk", "Downside robustness change context")
        .reproducible(true)
        .confidence(0.79)
}

fn b17(ctx: &AnswerContext) -> QuestionAnswer {
    let mode = infer_failure_mode(ctx);
    let at_risk = mode.is_active();

    QuestionAnswer::base("B17")
        .graded(P, if at_risk { AtRisk } else { No })
        .summary(if at_risk {
            format!("Most likely no-intervention failure mode is {}.", mode.label())
        } else {
            "No dominant failure mode is currently signaled without intervention.".to_string()
        })
        .window(ctx.current().map_or("N/A".to_string(), week_of))
        .threshold("Failure mode inferred from solvency, churn, demand-coverage, and price-shock signatures")
        .label_metric("predicted_failure_mode", "Predicted Failure Mode", mode.label())
        .chart("Diagnostic/SignalsOfDeathPanel", "Failure precursor signals")
        .chart("DecisionTree/Risk", "No-intervention downside context")
        .reproducible(true)
        .confidence(0.83)
}

fn b18(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(baseline), false) = (ctx.baseline(), ctx.aggregated.is_empty()) else {
        return needs(
            "B18",
            "Need baseline and proposal run outputs to evaluate cross-scenario robustness improvement.",
        );
    };
    let current_risk = death_spiral_risk(&ctx.aggregated);
    let baseline_risk = death_spiral_risk(baseline);
    let solvency = |p: &AggregateResult| p.mean(M::SolvencyScore);
    let current_solvency = late_average(&ctx.aggregated, LATE_WINDOW, solvency);
    let baseline_solvency = late_average(baseline, LATE_WINDOW, solvency);
    let current_retention = retention_from_series(&ctx.aggregated);
    let baseline_retention = retention_from_series(baseline);

    let improvements = [
        current_risk.probability_pct <= baseline_risk.probability_pct - 5.0,
        current_solvency >= baseline_solvency + 0.03,
        current_retention >= baseline_retention,
        current_risk.provider_collapse_pct <= baseline_risk.provider_collapse_pct,
    ]
    .into_iter()
    .filter(|improved| *improved)
    .count();

    let (verdict, summary) = match improvements {
        3.. => (Yes, "Proposed parameter change improves robustness across core scenario metrics."),
        1 | 2 => (
            AtRisk,
            "Proposed parameter change improves some metrics, but robustness gains are not broad yet.",
        ),
        _ => (No, "Proposed parameter change does not improve cross-scenario robustness."),
    };

    QuestionAnswer::base("B18")
        .graded(P, verdict)
        .summary(summary)
        .window("Proposal run vs baseline run (matching horizon)")
        .threshold("Robust improvement requires at least 3 of 4 core robustness metrics improving")
        .label_metric("robustness_improvements_count", "Improved Robustness Metrics", improvements.to_string())
        .metric(
            "death_spiral_probability_delta_pp",
            "Death-Spiral Probability Delta",
            fixed(current_risk.probability_pct - baseline_risk.probability_pct, 1),
            "pp",
        )
        .metric(
            "late_window_solvency_delta",
            "Late-Window Solvency Delta",
            fixed(current_solvency - baseline_solvency, 3),
            "x",
        )
        .metric("retention_delta_pp", "Retention Delta", fixed(current_retention - baseline_retention, 1), "pp")
        .chart("ScenarioComparisonPanel", "Proposal vs baseline comparison")
        .chart("DecisionTree/Risk", "Cross-run downside robustness")
        .reproducible(true)
        .confidence(0.81)
}
