// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Provider Evaluators (D)

use super::{cohort_retention, needs, span, week_of, Entry};
use crate::format::{finite_or, fixed};
use crate::guardrails::{CHURN, PAYBACK, SOLVENCY};
use crate::metrics::{
    churn_pct, demand_coverage, estimated_payback_months, nonzero_or, payback_months_at, pct_change,
    retention_from_series, safe_divide,
};
use crate::snapshots::{baseline_point, death_spiral_risk, ProviderEconomics, TierMargins};
use crate::types::{AnswerContext, Answerability::*, Metric as M, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("D1", d1),
    ("D2", d2),
    ("D3", d3),
    ("D4", d4),
    ("D5", d5),
    ("D6", d6),
    ("D7", d7),
    ("D8", d8),
    ("D9", d9),
    ("D10", d10),
    ("D11", d11),
    ("D12", d12),
];

/// Unrecoverable payback is scored as ten years when differencing.
const PAYBACK_CAP_MONTHS: f64 = 120.0;

fn capped_payback(months: f64) -> f64 {
    if months.is_finite() {
        months
    } else {
        PAYBACK_CAP_MONTHS
    }
}

fn d1(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("D1", "Need current timestep to estimate tiered provider margins.");
    };
    let tier = TierMargins::at(ctx, Some(current));
    let all_positive = tier.pro_margin_usd > 0.0 && tier.mercenary_margin_usd > 0.0;
    let one_negative = (tier.pro_margin_usd <= 0.0) != (tier.mercenary_margin_usd <= 0.0);

    QuestionAnswer::base("D1")
        .graded(
            P,
            if all_positive {
                Yes
            } else if one_negative {
                AtRisk
            } else {
                No
            },
        )
        .summary(format!(
            "Estimated weekly margins: pro tier {} USD, mercenary tier {} USD.",
            fixed(tier.pro_margin_usd, 2),
            fixed(tier.mercenary_margin_usd, 2)
        ))
        .window(week_of(current))
        .thresholds([
            "Healthy if both tier margins > 0 USD/week",
            "At-risk if one tier is <= 0 USD/week",
        ])
        .metric("pro_margin_usd_week", "Pro Tier Margin", fixed(tier.pro_margin_usd, 2), "USD/week")
        .metric("mercenary_margin_usd_week", "Mercenary Tier Margin", fixed(tier.mercenary_margin_usd, 2), "USD/week")
        .label_metric("pro_count", "Pro Provider Count", fixed(tier.pro_count, 0))
        .label_metric("mercenary_count", "Mercenary Provider Count", fixed(tier.mercenary_count, 0))
        .chart("DecisionTree/Miner", "Provider profitability context")
        .panel("Diagnostic/SolvencyScorecard", "Cost and revenue per capacity context")
        .reproducible(true)
        .confidence(0.75)
}

fn d2(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("D2", "Need current timestep to estimate ONO price sensitivity.");
    };
    let economics = ProviderEconomics::at(ctx, Some(current));
    if economics.minted_per_provider <= 0.0 {
        return needs(
            "D2",
            "Minted rewards per provider are zero, so price-sensitivity cannot be estimated.",
        );
    }
    let shock_per_10pct = economics.minted_per_provider * economics.price_usd * 0.1;
    let buffer_pct = safe_divide(
        economics.price_usd - economics.break_even_price_usd,
        economics.price_usd,
        0.0,
    ) * 100.0;
    let sensitivity = safe_divide(
        shock_per_10pct.abs(),
        economics.weekly_margin_usd.abs().max(1.0),
        0.0,
    );

    let (verdict, summary) = if buffer_pct >= 20.0 {
        (No, "Profitability has a healthy price buffer before breakeven.")
    } else if buffer_pct >= 5.0 {
        (AtRisk, "Profitability has moderate ONO price sensitivity.")
    } else {
        (Yes, "Profitability is highly sensitive to ONO price movement.")
    };

    QuestionAnswer::base("D2")
        .graded(P, verdict)
        .summary(summary)
        .window(week_of(current))
        .thresholds([
            "High sensitivity if price buffer to breakeven < 5%",
            "Moderate sensitivity if 5-20%",
            "Low sensitivity if > 20%",
        ])
        .metric("current_margin_usd_week", "Current Margin", fixed(economics.weekly_margin_usd, 2), "USD/week")
        .metric("break_even_price_usd", "Break-Even Price", fixed(economics.break_even_price_usd, 4), "USD")
        .metric("price_buffer_to_breakeven_pct", "Price Buffer to Breakeven", fixed(buffer_pct, 1), "%")
        .metric(
            "margin_change_per_10pct_price",
            "Margin Change per +10% Price",
            fixed(shock_per_10pct, 2),
            "USD/week",
        )
        .metric("price_sensitivity_score", "Sensitivity Score", fixed(sensitivity, 2), "ratio")
        .chart("DecisionTree/Miner", "Price, payback, and profitability sensitivity")
        .chart("DecisionTree/Risk", "Downside stress context")
        .reproducible(true)
        .confidence(0.82)
}

fn d3(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("D3", "Need current timestep to estimate churn-risk price and margin thresholds.");
    };
    let economics = ProviderEconomics::at(ctx, Some(current));
    let churn_threshold = nonzero_or(ctx.params.churn_threshold, 0.0);
    let churn = churn_pct(Some(current));
    let margin_buffer = economics.weekly_margin_usd - churn_threshold;
    let price_buffer_pct = safe_divide(
        economics.price_usd - economics.churn_risk_price_usd,
        economics.price_usd.max(1e-9),
        0.0,
    ) * 100.0;
    let high_churn = CHURN.panic_pct_per_week * 0.8;
    let high_risk = margin_buffer <= 0.0 || price_buffer_pct < 10.0 || churn >= high_churn;

    QuestionAnswer::base("D3")
        .graded(P, if high_risk { AtRisk } else { No })
        .summary(if high_risk {
            "Current economics are close to or inside the high-churn risk zone."
        } else {
            "Current economics remain outside the high-churn risk zone."
        })
        .window(week_of(current))
        .thresholds([
            "High churn risk when margin <= churn threshold".to_string(),
            "High churn risk when price buffer to churn threshold < 10%".to_string(),
            format!("High churn risk when churn >= {}%/week", fixed(high_churn, 1)),
        ])
        .metric("churn_threshold_margin_usd_week", "Churn Threshold Margin", fixed(churn_threshold, 2), "USD/week")
        .metric("current_margin_usd_week", "Current Margin", fixed(economics.weekly_margin_usd, 2), "USD/week")
        .metric(
            "margin_buffer_to_churn_usd_week",
            "Margin Buffer to Churn Threshold",
            fixed(margin_buffer, 2),
            "USD/week",
        )
        .metric("churn_risk_price_usd", "Price at High Churn Risk", fixed(economics.churn_risk_price_usd, 4), "USD")
        .metric("price_buffer_to_churn_pct", "Price Buffer to Churn Risk", fixed(price_buffer_pct, 1), "%")
        .chart("DecisionTree/Miner", "Churn and payback threshold overlays")
        .chart("Simulator/Sandbox Tier 1", "Provider retention and churn trend")
        .reproducible(true)
        .confidence(0.83)
}

fn d4(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(comparison)) = (ctx.current(), baseline_point(ctx)) else {
        return needs(
            "D4",
            "Need an alternative comparison run (baseline/peer) to compare provider economics.",
        );
    };
    let now = ProviderEconomics::at(ctx, Some(current));
    let peer = ProviderEconomics::at(ctx, Some(comparison));
    let payback_now = payback_months_at(current, &ctx.params);
    let payback_peer = payback_months_at(comparison, &ctx.params);
    let retention_now = retention_from_series(&ctx.aggregated);
    let retention_peer = retention_from_series(ctx.baseline_or_empty());

    let wins = [
        now.weekly_margin_usd >= peer.weekly_margin_usd,
        payback_now <= payback_peer,
        retention_now >= retention_peer,
    ]
    .into_iter()
    .filter(|win| *win)
    .count();

    QuestionAnswer::base("D4")
        .graded(
            Y,
            match wins {
                2.. => Yes,
                1 => AtRisk,
                _ => No,
            },
        )
        .summary(format!(
            "Provider economics comparison versus baseline/peer: {}/3 core metrics favorable.",
            wins
        ))
        .window(format!("Current {} vs comparison {}", week_of(current), week_of(comparison)))
        .thresholds([
            "Compare weekly margin, payback months, and retention",
            "Favorable if at least 2 of 3 metrics outperform comparison run",
        ])
        .metric(
            "margin_delta_vs_comparison_usd_week",
            "Margin Delta vs Comparison",
            fixed(now.weekly_margin_usd - peer.weekly_margin_usd, 2),
            "USD/week",
        )
        .metric(
            "payback_delta_vs_comparison_months",
            "Payback Delta vs Comparison",
            fixed(capped_payback(payback_now) - capped_payback(payback_peer), 2),
            "mo",
        )
        .metric(
            "retention_delta_vs_comparison_pp",
            "Retention Delta vs Comparison",
            fixed(retention_now - retention_peer, 1),
            "pp",
        )
        .chart("Benchmark/ComparativeMatrix", "Cross-network economics benchmark")
        .chart("DecisionTree/Miner", "Provider economics comparison context")
        .reproducible(true)
        .confidence(0.84)
}

fn d5(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(first), Some(current), true) = (ctx.aggregated.first(), ctx.current(), ctx.aggregated.len() >= 2)
    else {
        return needs("D5", "Need tier trajectories to evaluate whether policy favors reliable operators.");
    };
    let pro_retention = cohort_retention(&ctx.aggregated, M::ProCount);
    let mercenary_retention = cohort_retention(&ctx.aggregated, M::MercenaryCount);
    let tier = TierMargins::at(ctx, Some(current));
    let bias = pro_retention - mercenary_retention;
    let favors_reliable = bias >= 3.0 && tier.pro_margin_usd >= tier.mercenary_margin_usd;

    QuestionAnswer::base("D5")
        .graded(
            P,
            if favors_reliable {
                Yes
            } else if bias > 0.0 {
                AtRisk
            } else {
                No
            },
        )
        .summary(if favors_reliable {
            "Reward policy is currently favoring long-term reliable operators."
        } else {
            "Reward policy does not yet clearly favor reliable operators."
        })
        .window(format!("{} to {}", week_of(first), week_of(current)))
        .thresholds([
            "Reliable-operator bias if pro retention exceeds mercenary retention by >= 3pp",
            "Reliable-operator bias if pro margin >= mercenary margin",
        ])
        .metric("pro_retention_pct", "Pro Retention", fixed(pro_retention, 1), "%")
        .metric("mercenary_retention_pct", "Mercenary Retention", fixed(mercenary_retention, 1), "%")
        .metric("reliability_bias_gap_pp", "Reliability Bias Gap", fixed(bias, 1), "pp")
        .metric("pro_margin_usd_week", "Pro Margin", fixed(tier.pro_margin_usd, 2), "USD/week")
        .metric("mercenary_margin_usd_week", "Mercenary Margin", fixed(tier.mercenary_margin_usd, 2), "USD/week")
        .chart("DecisionTree/Miner", "Tier retention and margin profile")
        .panel("Diagnostic/StrategicRecommendationsPanel", "Policy/tier reliability context")
        .reproducible(true)
        .confidence(0.82)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TierFailure {
    None,
    Pro,
    Mercenary,
    Both,
}

fn d6(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("D6", "Need current timestep to estimate provider-tier cost shock impact.");
    };
    let tier = TierMargins::at(ctx, Some(current));
    let increment = nonzero_or(ctx.params.provider_cost_per_week, 0.0) * 0.2;
    let pro_after = tier.pro_margin_usd - increment;
    let mercenary_after = tier.mercenary_margin_usd - increment;
    let failure = match (pro_after <= 0.0, mercenary_after <= 0.0) {
        (true, false) => TierFailure::Pro,
        (false, true) => TierFailure::Mercenary,
        (true, true) => TierFailure::Both,
        (false, false) => TierFailure::None,
    };

    let (verdict, summary) = match failure {
        TierFailure::None => (Yes, "Both provider tiers remain profitable under a +20% cost shock.".to_string()),
        TierFailure::Both => (No, "Both tiers fall below breakeven under a +20% cost shock.".to_string()),
        TierFailure::Pro => (AtRisk, "Pro tier fails first under a +20% cost shock.".to_string()),
        TierFailure::Mercenary => (AtRisk, "Mercenary tier fails first under a +20% cost shock.".to_string()),
    };

    QuestionAnswer::base("D6")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("{} projected +20% cost shock", week_of(current)))
        .thresholds(["Cost shock test: +20% provider cost", "Tier failure when projected margin <= 0"])
        .metric("pro_margin_after_cost_shock", "Pro Margin After Shock", fixed(pro_after, 2), "USD/week")
        .metric(
            "merc_margin_after_cost_shock",
            "Mercenary Margin After Shock",
            fixed(mercenary_after, 2),
            "USD/week",
        )
        .metric("cost_shock_increment", "Cost Shock Increment", fixed(increment, 2), "USD/week")
        .chart("DecisionTree/Miner", "Tier margin stress behavior")
        .panel("Simulator/Sidebar Provider Economics", "Cost-shock parameter anchor")
        .reproducible(true)
        .confidence(0.8)
}

fn d7(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return QuestionAnswer::base("D7")
            .graded(Y, InsufficientData)
            .summary("Need current timestep to classify reward sustainability.");
    };
    let solvency = current.mean(M::SolvencyScore);
    let coverage = demand_coverage(Some(current));
    let cost_to_revenue = safe_divide(
        current.mean(M::CostPerCapacity),
        current.mean(M::RevenuePerCapacity),
        2.0,
    );
    let sustainable = solvency >= SOLVENCY.critical_ratio && cost_to_revenue <= 1.0 && coverage >= 90.0;

    QuestionAnswer::base("D7")
        .graded(
            Y,
            if sustainable {
                Yes
            } else if solvency >= 0.9 {
                AtRisk
            } else {
                No
            },
        )
        .summary(if sustainable {
            "Current rewards look economically sustainable, not purely subsidy-driven."
        } else {
            "Current rewards appear partially or fully subsidy-supported."
        })
        .window(week_of(current))
        .thresholds([
            "Sustainable if solvency >= 1.0x",
            "Sustainable if cost/revenue per capacity <= 1.0x",
            "Sustainable if demand coverage >= 90%",
        ])
        .metric("solvency_ratio", "Solvency Ratio", fixed(solvency, 3), "x")
        .metric("reward_demand_ratio", "Cost/Revenue per Capacity", fixed(cost_to_revenue, 3), "x")
        .metric("demand_coverage_pct", "Demand Coverage", fixed(coverage, 1), "%")
        .panel("Diagnostic/SolvencyScorecard", "Sustainability scorecard context")
        .chart("DecisionTree/Financial", "Subsidy-vs-utility trajectory")
        .reproducible(true)
        .confidence(0.9)
}

fn d8(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("D8", "Need at least two timesteps to estimate cohort retention trend.");
    };
    let retention = retention_from_series(&ctx.aggregated);
    let prior = retention_from_series(&ctx.aggregated[..ctx.aggregated.len() - 1]);
    let delta = retention - prior;
    let churn = churn_pct(Some(current));
    let high_churn = CHURN.panic_pct_per_week * 0.8;

    let verdict = if delta >= -0.5 && churn < high_churn {
        Yes
    } else if delta >= -2.0 {
        AtRisk
    } else {
        No
    };

    QuestionAnswer::base("D8")
        .graded(P, verdict)
        .summary(format!(
            "Expected retention trend is {} ({}pp WoW).",
            if delta >= 0.0 { "stable/improving" } else { "declining" },
            fixed(delta, 2)
        ))
        .window(format!("{} to {}", week_of(previous), week_of(current)))
        .thresholds([
            "Stable trend if WoW retention delta >= -0.5pp".to_string(),
            format!("Risk trend if churn approaches {}%/week", fixed(high_churn, 1)),
        ])
        .metric("retention_pct", "Retention", fixed(retention, 1), "%")
        .metric("retention_delta_wow_pp", "WoW Retention Delta", fixed(delta, 2), "pp")
        .metric("churn_rate_pct", "Churn Rate", fixed(churn, 2), "%/week")
        .chart("Simulator/Sandbox Tier 1", "Retention trend and cohort context")
        .chart("DecisionTree/Miner", "Churn trend by stress path")
        .reproducible(true)
        .confidence(0.83)
}

fn d9(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("D9", "Need at least two timesteps to detect reward-value erosion signals.");
    };
    let margin_delta = ProviderEconomics::at(ctx, Some(current)).weekly_margin_usd
        - ProviderEconomics::at(ctx, Some(previous)).weekly_margin_usd;
    let payback_delta = capped_payback(payback_months_at(current, &ctx.params))
        - capped_payback(payback_months_at(previous, &ctx.params));
    let price_delta = pct_change(current.mean(M::Price), previous.mean(M::Price));

    let signals = [margin_delta < -2.0, payback_delta > 1.5, price_delta <= -8.0]
        .into_iter()
        .filter(|signal| *signal)
        .count();

    QuestionAnswer::base("D9")
        .graded(
            P,
            match signals {
                2.. => Yes,
                1 => AtRisk,
                _ => No,
            },
        )
        .summary(if signals >= 2 {
            "Early signals indicate nominal rewards are losing real value."
        } else {
            "No strong early warning of nominal reward-value erosion."
        })
        .window(format!("{} vs {}", week_of(previous), week_of(current)))
        .thresholds([
            "Erosion signal if margin drops meaningfully week-over-week",
            "Erosion signal if payback extends quickly",
            "Erosion signal if token price falls materially",
        ])
        .metric("margin_delta_wow_usd_week", "WoW Margin Delta", fixed(margin_delta, 2), "USD/week")
        .metric("payback_delta_wow_months", "WoW Payback Delta", fixed(payback_delta, 2), "mo")
        .metric("price_delta_wow_pct", "WoW Price Delta", fixed(price_delta, 1), "%")
        .label_metric("erosion_signal_count", "Erosion Signal Count", signals.to_string())
        .chart("DecisionTree/Miner", "Payback and margin deterioration signals")
        .chart("DecisionTree/Risk", "Price/drawdown erosion context")
        .reproducible(true)
        .confidence(0.81)
}

fn d10(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(first), Some(current), true) = (ctx.aggregated.first(), ctx.current(), ctx.aggregated.len() >= 2)
    else {
        return needs("D10", "Need tier and retention trajectories to assess quality-linked reward impact.");
    };
    let tier = TierMargins::at(ctx, Some(current));
    let pro_retention = cohort_retention(&ctx.aggregated, M::ProCount);
    let mercenary_retention = cohort_retention(&ctx.aggregated, M::MercenaryCount);
    let efficiency = nonzero_or(ctx.params.pro_tier_efficiency, 1.0);
    let lever_active = efficiency > 1.0;
    let benefit = lever_active && pro_retention > mercenary_retention && tier.pro_margin_usd >= tier.mercenary_margin_usd;

    let (verdict, summary) = if benefit {
        (Yes, "Quality/uptime-linked incentives are improving long-term expected operator return.")
    } else if lever_active {
        (
            AtRisk,
            "Quality-linked incentives are active, but evidence of long-term return uplift is mixed.",
        )
    } else {
        (No, "Quality-linked incentives are not materially active in current parameters.")
    };

    QuestionAnswer::base("D10")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("{} to {}", week_of(first), week_of(current)))
        .thresholds([
            "Quality lever active if pro-tier efficiency > 1.0x",
            "Positive long-term signal if pro retention and pro margin both outperform mercenary tier",
        ])
        .metric("pro_tier_efficiency", "Pro Tier Efficiency Multiplier", fixed(efficiency, 2), "x")
        .metric("pro_retention_pct", "Pro Retention", fixed(pro_retention, 1), "%")
        .metric("mercenary_retention_pct", "Mercenary Retention", fixed(mercenary_retention, 1), "%")
        .metric("pro_margin_usd_week", "Pro Margin", fixed(tier.pro_margin_usd, 2), "USD/week")
        .metric("mercenary_margin_usd_week", "Mercenary Margin", fixed(tier.mercenary_margin_usd, 2), "USD/week")
        .chart("DecisionTree/Miner", "Tier-specific return outcomes")
        .chart("DecisionTree/Utility", "Service-quality continuity context")
        .reproducible(true)
        .confidence(0.8)
}

fn d11(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(last) = ctx.current() else {
        return needs("D11", "Need scenario trajectory to determine breakeven break week.");
    };
    let watchlist = PAYBACK.watchlist_max_months;
    let breach = ctx.aggregated.iter().find(|point| {
        let months = payback_months_at(point, &ctx.params);
        !months.is_finite() || months > watchlist
    });
    let break_week = breach.map_or("No breach in horizon".to_string(), week_of);

    QuestionAnswer::base("D11")
        .graded(P, if breach.is_some() { AtRisk } else { No })
        .summary(if breach.is_some() {
            format!("Breakeven breaks at {} in the active scenario path.", break_week)
        } else {
            "Breakeven remains inside threshold bands in the active scenario path.".to_string()
        })
        .window(span(ctx))
        .thresholds([
            format!("Breakeven break if estimated payback > {} months", watchlist),
            "Breakeven break if weekly provider profit <= 0".to_string(),
        ])
        .label_metric("breakeven_break_week", "Breakeven Break Week", break_week)
        .metric(
            "end_payback_months_est",
            "End-of-Run Estimated Payback",
            finite_or(payback_months_at(last, &ctx.params), 2, "Non-positive profit"),
            "mo",
        )
        .chart("DecisionTree/Miner", "Payback timeline by week")
        .chart("Benchmark/HealthMetricsBarChart", "ROI and retention pressure context")
        .reproducible(true)
        .confidence(0.81)
}

fn d12(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("D12", "Need current timestep to evaluate downside participation rationality.");
    };
    let economics = ProviderEconomics::at(ctx, Some(current));
    let payback = estimated_payback_months(ctx);
    let risk = death_spiral_risk(&ctx.aggregated);
    let solvency = current.mean(M::SolvencyScore);
    let watchlist = PAYBACK.watchlist_max_months;

    let failed = [
        economics.downside_margin_20pct_usd <= 0.0,
        !payback.is_finite() || payback > watchlist,
        risk.probability_pct >= 50.0,
        solvency < SOLVENCY.critical_ratio,
    ]
    .into_iter()
    .filter(|failed| *failed)
    .count();

    let (verdict, summary) = match failed {
        0 => (Yes, "Participation remains economically rational under a 20% downside stress."),
        1 | 2 => (AtRisk, "Participation is borderline under downside stress and needs active monitoring."),
        _ => (No, "Participation is not rational under downside stress assumptions."),
    };

    QuestionAnswer::base("D12")
        .graded(P, verdict)
        .summary(summary)
        .window(week_of(current))
        .thresholds([
            "Downside margin (price -20%) should remain > 0 USD/week".to_string(),
            format!("Payback should remain <= {} months", watchlist),
            "Death-spiral probability should remain < 50%".to_string(),
            "Solvency should remain >= 1.0x".to_string(),
        ])
        .metric(
            "downside_margin_20pct_usd_week",
            "Downside Margin (Price -20%)",
            fixed(economics.downside_margin_20pct_usd, 2),
            "USD/week",
        )
        .metric("payback_months_est", "Estimated Payback", finite_or(payback, 2, "Non-positive profit"), "mo")
        .metric("death_spiral_probability_pct", "Death-Spiral Probability", fixed(risk.probability_pct, 1), "%")
        .metric("solvency_ratio", "Solvency Ratio", fixed(solvency, 3), "x")
        .chart("DecisionTree/Miner", "Provider downside economics")
        .chart("DecisionTree/Risk", "Downside probability context")
        .reproducible(true)
        .confidence(0.8)
}
