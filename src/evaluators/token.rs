// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Token Evaluators (H)

use super::{lag_or_no_breach, needs, span, week_of, week_range, yes_no, Entry};
use crate::format::fixed;
use crate::guardrails::PAYBACK;
use crate::metrics::{estimated_payback_months, late_average, net_emission_pressure_pct, pct_change, safe_divide};
use crate::snapshots::{death_spiral_risk, estimate_shock_lag};
use crate::types::{AggregateResult, AnswerContext, Answerability::*, Metric as M, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[
    ("H1", h1),
    ("H2", h2),
    ("H3", h3),
    ("H4", h4),
    ("H5", h5),
    ("H6", h6),
    ("H7", h7),
    ("H8", h8),
    ("H9", h9),
    ("H10", h10),
];

/// Liquidity depth at which an unlock stops adding severity.
const REFERENCE_LIQUIDITY_USD: f64 = 500_000.0;
const LATE_WINDOW: usize = 4;

fn h1(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("H1", "Need at least two timesteps to determine emission-pressure direction.");
    };
    let current_pressure = net_emission_pressure_pct(Some(current));
    let delta = current_pressure - net_emission_pressure_pct(Some(previous));
    let (verdict, direction) = if delta > 0.0001 {
        (AtRisk, "increasing")
    } else if delta < -0.0001 {
        (Yes, "decreasing")
    } else {
        (AtRisk, "flat")
    };

    QuestionAnswer::base("H1")
        .graded(Y, verdict)
        .summary(format!("Net emission pressure is {} week-over-week.", direction))
        .window(format!("{} vs {}", week_of(previous), week_of(current)))
        .threshold("Net emission pressure = (minted - burned) / supply")
        .metric(
            "net_emission_pressure_current_pct_supply",
            "Current Net Emission Pressure",
            fixed(current_pressure, 4),
            "% of supply/week",
        )
        .metric("net_emission_pressure_delta", "WoW Emission Pressure Delta", fixed(delta, 4), "pp")
        .chart("DecisionTree/Financial", "Mint vs burn pressure trend")
        .chart("Benchmark/SolvencyProjectionChart", "Emission pressure solvency impact")
        .reproducible(true)
        .confidence(0.9)
}

/// Burn-to-mint with minted floored just above zero, so a mint-free week
/// with burn reads as strongly solvent.
fn floored_burn_to_mint(point: &AggregateResult) -> f64 {
    safe_divide(point.mean(M::Burned), point.mean(M::Minted).max(1e-9), 0.0)
}

fn h2(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("H2", "Need at least two timesteps to infer burn-to-mint solvency direction.");
    };
    let current_ratio = floored_burn_to_mint(current);
    let delta = current_ratio - floored_burn_to_mint(previous);
    let toward = delta > 0.0;

    let verdict = match (toward, current_ratio >= 1.0) {
        (true, true) => Yes,
        (true, false) => AtRisk,
        (false, _) => No,
    };

    QuestionAnswer::base("H2")
        .graded(Y, verdict)
        .summary(if toward {
            "Burn-to-mint trajectory is moving toward solvency."
        } else {
            "Burn-to-mint trajectory is moving away from solvency."
        })
        .window(format!("{} vs {}", week_of(previous), week_of(current)))
        .thresholds([
            "Toward solvency if burn-to-mint ratio is increasing",
            "Durable solvency if ratio >= 1.0x",
        ])
        .metric("burn_to_mint_ratio_current", "Current Burn-to-Mint", fixed(current_ratio, 3), "x")
        .metric("burn_to_mint_ratio_delta", "WoW Burn-to-Mint Delta", fixed(delta, 3), "x")
        .chart("DecisionTree/Financial", "Burn-to-mint directionality")
        .chart("Benchmark/SolvencyProjectionChart", "Solvency trend confirmation")
        .reproducible(true)
        .confidence(0.91)
}

fn h3(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("H3", "Need current timestep to estimate unlock-event downside severity.");
    };
    let risk = death_spiral_risk(&ctx.aggregated);
    let liquidity = ctx.params.initial_liquidity;
    let sell_pct = ctx.params.investor_sell_pct;
    let depth = (liquidity / REFERENCE_LIQUIDITY_USD).min(1.0);
    let severity = (sell_pct * 120.0 + risk.max_drawdown_pct * 0.6 + (1.0 - depth) * 25.0).min(100.0);

    QuestionAnswer::base("H3")
        .graded(Y, if severity >= 35.0 { AtRisk } else { No })
        .summary(format!(
            "Estimated unlock-event downside severity score is {}/100.",
            fixed(severity, 1)
        ))
        .window(format!("Current liquidity/unlock state at {}", week_of(current)))
        .thresholds([
            "Severity combines unlock sell %, drawdown response, and liquidity depth",
            "Score >= 65 indicates high downside severity",
        ])
        .metric("unlock_sell_pct", "Unlock Sell %", fixed(sell_pct * 100.0, 1), "%")
        .metric("initial_liquidity_usd", "Initial Liquidity", fixed(liquidity, 0), "USD")
        .metric("unlock_downside_severity_score", "Unlock Downside Severity", fixed(severity, 1), "/100")
        .metric("max_drawdown_pct", "Observed Max Drawdown", fixed(risk.max_drawdown_pct, 1), "%")
        .chart("DecisionTree/Risk", "Unlock-linked drawdown profile")
        .panel("Simulator/Sidebar Tokenomics", "Liquidity/unlock parameter state")
        .reproducible(true)
        .confidence(0.84)
}

fn h4(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("H4", "Need current timestep to estimate subsidy-supported retention share.");
    };
    let total = current.mean(M::Providers).max(1.0);
    let underwater = current.mean(M::UnderwaterCount).max(0.0);
    let payback = estimated_payback_months(ctx);
    let healthy_max = PAYBACK.healthy_max_months;
    // Longer paybacks push more of the remaining fleet toward breakeven.
    let near_breakeven_share = if payback.is_finite() && payback > healthy_max {
        (0.1 + (payback - healthy_max) / healthy_max).min(0.45)
    } else {
        0.08
    };
    let near_breakeven = ((total - underwater) * near_breakeven_share).max(0.0);
    let supported = (underwater + near_breakeven).min(total);
    let supported_pct = safe_divide(supported, total, 0.0) * 100.0;
    let viable_pct = 100.0 - supported_pct;

    QuestionAnswer::base("H4")
        .graded(P, if supported_pct >= 30.0 { AtRisk } else { No })
        .summary(format!(
            "Estimated subsidy-supported retention share is {}% (economically viable share {}%).",
            fixed(supported_pct, 1),
            fixed(viable_pct, 1)
        ))
        .window(week_of(current))
        .thresholds([
            "Subsidy-supported estimate = below breakeven + near breakeven providers",
            "Watchlist >= 30%, intervention >= 50%",
        ])
        .metric(
            "subsidy_supported_retention_pct",
            "Subsidy-Supported Retention",
            fixed(supported_pct, 1),
            "%",
        )
        .metric(
            "economically_viable_retention_pct",
            "Economically Viable Retention",
            fixed(viable_pct, 1),
            "%",
        )
        .label_metric("underwater_provider_count", "Underwater Providers", fixed(underwater, 0))
        .panel("Diagnostic/SolvencyScorecard", "Underwater and breakeven proxy context")
        .chart("DecisionTree/Miner", "Provider economics viability context")
        .reproducible(true)
        .confidence(0.77)
}

fn h5(ctx: &AnswerContext) -> QuestionAnswer {
    let lag = estimate_shock_lag(ctx);
    let risk = death_spiral_risk(&ctx.aggregated);
    let shock_detected = lag.has_shock();
    let second_order = shock_detected
        && lag.lag_to_churn_weeks >= 0
        && (lag.lag_to_capacity_weeks >= 0 || risk.provider_collapse_pct >= 10.0);
    let shock_point = usize::try_from(lag.shock_week_index)
        .ok()
        .and_then(|index| ctx.aggregated.get(index));

    QuestionAnswer::base("H5")
        .graded(P, if second_order { Yes } else { No })
        .summary(if second_order {
            "Price shocks are likely to trigger second-order infrastructure attrition in this run."
        } else {
            "No strong second-order attrition signature is detected from price shocks in this run."
        })
        .window(match shock_point {
            Some(point) => format!("Shock at {} onward", week_of(point)),
            None => week_range(&ctx.aggregated),
        })
        .threshold(
            "Second-order signature requires shock -> churn transition and churn -> capacity (or collapse) transition",
        )
        .label_metric("shock_detected", "Price Shock Detected", yes_no(shock_detected))
        .metric(
            "lag_shock_to_churn_weeks",
            "Shock -> Churn Lag",
            lag_or_no_breach(lag.lag_to_churn_weeks),
            "weeks",
        )
        .metric(
            "lag_churn_to_capacity_weeks",
            "Churn -> Capacity Lag",
            lag_or_no_breach(lag.lag_to_capacity_weeks),
            "weeks",
        )
        .metric("provider_collapse_pct", "Provider Collapse", fixed(risk.provider_collapse_pct, 1), "%")
        .chart("DecisionTree/Risk", "Shock-driven downside propagation")
        .chart("DecisionTree/Miner", "Churn/capacity propagation timing")
        .reproducible(true)
        .confidence(0.83)
}

fn h6(ctx: &AnswerContext) -> QuestionAnswer {
    let Some(current) = ctx.current() else {
        return needs("H6", "Need current timestep to estimate treasury/risk buffer requirements.");
    };
    let treasury = current.mean(M::TreasuryBalance).max(0.0);
    let daily_deficit = (current.mean(M::DailyMintUsd) - current.mean(M::DailyBurnUsd)).max(0.0);
    let buffer_90d = daily_deficit * 90.0;
    let buffer_180d = daily_deficit * 180.0;
    let gap_90d = buffer_90d - treasury;
    let gap_180d = buffer_180d - treasury;
    let covered = gap_90d <= 0.0;

    QuestionAnswer::base("H6")
        .graded(P, if covered { No } else { AtRisk })
        .summary(if covered {
            "Current treasury buffer covers at least a 90-day modeled dislocation deficit."
        } else {
            "Treasury buffer is short versus a 90-day modeled dislocation deficit."
        })
        .window(format!("{} treasury stress buffer view", week_of(current)))
        .threshold("Buffer target = modeled daily deficit x horizon (90d / 180d)")
        .metric("treasury_balance_usd", "Treasury Balance", fixed(treasury, 0), "USD")
        .metric("modeled_daily_deficit_usd", "Modeled Daily Deficit", fixed(daily_deficit, 2), "USD/day")
        .metric("required_buffer_90d_usd", "Required Buffer (90d)", fixed(buffer_90d, 0), "USD")
        .metric("required_buffer_180d_usd", "Required Buffer (180d)", fixed(buffer_180d, 0), "USD")
        .metric("buffer_gap_90d_usd", "Buffer Gap (90d)", fixed(gap_90d, 0), "USD")
        .metric("buffer_gap_180d_usd", "Buffer Gap (180d)", fixed(gap_180d, 0), "USD")
        .chart("DecisionTree/Financial", "Treasury and net-flow stress context")
        .panel("Diagnostic/SolvencyScorecard", "Daily mint/burn buffer inputs")
        .reproducible(true)
        .confidence(0.8)
}

fn h7(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(current), Some(previous)) = (ctx.current(), ctx.previous()) else {
        return needs("H7", "Need at least two timesteps to infer dilution-vs-participation behavior.");
    };
    let net_emission = current.mean(M::Minted) - current.mean(M::Burned);
    let provider_delta = pct_change(current.mean(M::Providers), previous.mean(M::Providers));
    let diluting = net_emission > 0.0;

    let (verdict, summary) = match (diluting, provider_delta >= -1.0) {
        (true, true) => (Yes, "Run indicates dilution pressure while participation is being preserved."),
        (true, false) => (AtRisk, "Dilution pressure is present but participation support is weak."),
        (false, _) => (No, "No net dilution pressure is visible in the current state."),
    };

    QuestionAnswer::base("H7")
        .graded(P, verdict)
        .summary(summary)
        .window(format!("{} vs {}", week_of(previous), week_of(current)))
        .thresholds([
            "Dilution if minted > burned",
            "Participation preserved if provider count is stable/improving",
        ])
        .metric("net_emission_tokens_week", "Net Emission", fixed(net_emission, 0), "tokens/week")
        .metric("providers_delta_wow_pct", "WoW Providers Delta", fixed(provider_delta, 2), "%")
        .chart("DecisionTree/Financial", "Dilution pressure trajectory")
        .chart("Simulator/Sandbox Tier 1", "Participation/retention trajectory")
        .reproducible(true)
        .confidence(0.82)
}

fn h8(ctx: &AnswerContext) -> QuestionAnswer {
    let (Some(baseline), false) = (ctx.baseline(), ctx.aggregated.is_empty()) else {
        return QuestionAnswer::base("H8")
            .graded(P, AtRisk)
            .summary("Need baseline comparison to distinguish long-run improvement from postponement.")
            .window("Current run only")
            .threshold("Requires intervention vs baseline comparison")
            .label_metric("baseline_available", "Baseline Available", "No")
            .panel("ScenarioComparisonPanel", "Intervention vs baseline long-run comparison")
            .reproducible(false)
            .confidence(0.6);
    };
    let risk_delta =
        death_spiral_risk(&ctx.aggregated).probability_pct - death_spiral_risk(baseline).probability_pct;
    let late_solvency = |points: &[AggregateResult]| late_average(points, LATE_WINDOW, |p| p.mean(M::SolvencyScore));
    let solvency_delta = late_solvency(&ctx.aggregated) - late_solvency(baseline);

    let improved = risk_delta <= -5.0 && solvency_delta >= 0.03;
    let postponing = risk_delta <= 0.0 && solvency_delta < 0.03;
    let (verdict, summary) = if improved {
        (Yes, "Intervention improves long-run solvency and downside risk versus baseline.")
    } else if postponing {
        (
            AtRisk,
            "Intervention appears to postpone adjustment more than structurally improve solvency.",
        )
    } else {
        (No, "Intervention does not improve long-run solvency versus baseline.")
    };

    QuestionAnswer::base("H8")
        .graded(P, verdict)
        .summary(summary)
        .window("Intervention run vs baseline run")
        .thresholds([
            "Long-run improvement: risk delta <= -5pp and late solvency delta >= +0.03x",
            "Postponement: risk does not worsen but solvency gain remains weak",
        ])
        .metric("long_run_risk_delta_pp", "Long-Run Risk Delta", fixed(risk_delta, 1), "pp")
        .metric("late_window_solvency_delta", "Late-Window Solvency Delta", fixed(solvency_delta, 3), "x")
        .chart("ScenarioComparisonPanel", "Intervention-vs-baseline long-run outcomes")
        .chart("Benchmark/SolvencyProjectionChart", "Long-run solvency trajectory comparison")
        .reproducible(true)
        .confidence(0.81)
}

fn h9(ctx: &AnswerContext) -> QuestionAnswer {
    let risk = death_spiral_risk(&ctx.aggregated);
    let exposure = risk.max_drawdown_pct * 0.55 + risk.provider_collapse_pct * 0.45;
    let band = match exposure {
        e if e >= 30.0 => "high",
        e if e >= 18.0 => "moderate",
        _ => "low",
    };

    QuestionAnswer::base("H9")
        .graded(Y, if exposure >= 18.0 { AtRisk } else { No })
        .summary(format!(
            "Network health exposure to token volatility is {} (score {}).",
            band,
            fixed(exposure, 1)
        ))
        .window(week_range(&ctx.aggregated))
        .threshold("Exposure score = 55% drawdown severity + 45% provider-collapse severity")
        .metric("volatility_exposure_score", "Volatility Exposure Score", fixed(exposure, 1), "/100")
        .metric("max_drawdown_pct", "Max Drawdown", fixed(risk.max_drawdown_pct, 1), "%")
        .metric("provider_collapse_pct", "Provider Collapse", fixed(risk.provider_collapse_pct, 1), "%")
        .chart("DecisionTree/Risk", "Volatility and downside sensitivity")
        .chart("DecisionTree/Miner", "Provider attrition sensitivity to volatility")
        .reproducible(true)
        .confidence(0.88)
}

fn h10(ctx: &AnswerContext) -> QuestionAnswer {
    let risk = death_spiral_risk(&ctx.aggregated);

    QuestionAnswer::base("H10")
        .graded(Y, if risk.near_alert { AtRisk } else { No })
        .summary(if risk.near_alert {
            "Current path is approaching death-spiral alert conditions."
        } else {
            "Current path is below death-spiral alert thresholds."
        })
        .window(span(ctx))
        .thresholds([
            "Alert if estimated death-spiral probability >= 40%",
            "Alert if insolvency weeks >= 20% of horizon",
            "Alert if provider collapse >= 15%",
        ])
        .metric("death_spiral_probability_pct", "Death-Spiral Probability", fixed(risk.probability_pct, 1), "%")
        .metric("insolvency_weeks", "Insolvency Weeks", risk.insolvency_weeks.to_string(), "weeks")
        .metric("provider_collapse_pct", "Provider Collapse", fixed(risk.provider_collapse_pct, 1), "%")
        .metric("max_drawdown_pct", "Max Drawdown", fixed(risk.max_drawdown_pct, 1), "%")
        .chart("DecisionTree/Risk", "Insolvency and downside stress diagnostics")
        .chart("Benchmark/SolvencyProjectionChart", "Solvency trajectory toward critical floor")
        .reproducible(true)
        .confidence(0.86)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationParams;

    fn flows(t: u32, minted: f64, burned: f64) -> AggregateResult {
        AggregateResult::new(t)
            .with(M::Minted, minted)
            .with(M::Burned, burned)
            .with(M::Supply, 1_000_000.0)
            .with(M::Providers, 100.0)
    }

    fn ctx(points: Vec<AggregateResult>) -> AnswerContext {
        AnswerContext::new("r", SimulationParams::default(), points)
    }

    #[test]
    fn falling_emission_pressure_is_favourable() {
        let answer = h1(&ctx(vec![flows(1, 10_000.0, 2_000.0), flows(2, 8_000.0, 4_000.0)]));
        assert_eq!(answer.verdict, Yes);
        assert_eq!(answer.summary, "Net emission pressure is decreasing week-over-week.");
    }

    #[test]
    fn rising_burn_ratio_below_parity_is_at_risk() {
        let answer = h2(&ctx(vec![flows(1, 10_000.0, 2_000.0), flows(2, 10_000.0, 6_000.0)]));
        assert_eq!(answer.verdict, AtRisk);
    }

    #[test]
    fn treasury_covering_deficit_is_not_at_risk() {
        let point = flows(1, 1.0, 1.0)
            .with(M::TreasuryBalance, 1_000_000.0)
            .with(M::DailyMintUsd, 500.0)
            .with(M::DailyBurnUsd, 100.0);
        let answer = h6(&ctx(vec![point]));
        assert_eq!(answer.verdict, No);
        assert_eq!(
            answer.find_metric("required_buffer_90d_usd").map(|m| m.value.to_string()),
            Some("36000".to_string())
        );
    }
}
