// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Metric & Series Helpers
//
// Pure, total helpers over aggregated points. None of these panic on empty
// or non-finite input; degenerate input maps to a documented fallback.

use crate::types::{AggregateResult, AnswerContext, Metric as M, SimulationParams};

const EPSILON: f64 = 1e-9;
const WEEKS_PER_MONTH: f64 = 4.33;

/// `value` unless it is 0 or NaN, then `fallback`.
pub fn nonzero_or(value: f64, fallback: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        fallback
    } else {
        value
    }
}

pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator.abs() < EPSILON {
        return fallback;
    }
    numerator / denominator
}

/// Percentage change relative to `|previous|`.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if !current.is_finite() || !previous.is_finite() {
        return 0.0;
    }
    if previous.abs() < EPSILON {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    (current - previous) / previous.abs() * 100.0
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Largest value, never below `floor`.
pub fn peak(values: &[f64], floor: f64) -> f64 {
    values.iter().copied().fold(floor, f64::max)
}

pub fn series(points: &[AggregateResult], metric: M) -> Vec<f64> {
    points.iter().map(|point| point.mean(metric)).collect()
}

pub fn providers_floor(point: &AggregateResult) -> f64 {
    point.mean(M::Providers).max(1.0)
}

/// Served share of demand in percent; unconstrained demand counts as fully served.
pub fn demand_coverage(point: Option<&AggregateResult>) -> f64 {
    let Some(point) = point else { return 0.0 };
    let demand = point.mean(M::Demand);
    if demand <= 0.0 {
        return 100.0;
    }
    point.mean(M::DemandServed) / demand * 100.0
}

pub fn churn_pct(point: Option<&AggregateResult>) -> f64 {
    let Some(point) = point else { return 0.0 };
    safe_divide(point.mean(M::ChurnCount), providers_floor(point), 0.0) * 100.0
}

/// Latest provider count as a share of the series peak.
pub fn retention_from_series(points: &[AggregateResult]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let providers = series(points, M::Providers);
    let peak_providers = peak(&providers, 0.0);
    let latest = providers.last().copied().unwrap_or(0.0);
    if peak_providers <= 0.0 {
        return 0.0;
    }
    latest / peak_providers * 100.0
}

pub fn burn_to_mint(point: &AggregateResult) -> f64 {
    safe_divide(point.mean(M::Burned), point.mean(M::Minted), 0.0)
}

/// Months until hardware cost is recovered at the point's weekly profit.
/// `+∞` when weekly profit is not positive.
pub fn payback_months_at(point: &AggregateResult, params: &SimulationParams) -> f64 {
    let minted_per_provider = point.mean(M::Minted) / providers_floor(point);
    let weekly_profit = minted_per_provider * point.mean(M::Price).max(0.0) - params.provider_cost_per_week;
    if weekly_profit <= 0.0 {
        return f64::INFINITY;
    }
    params.hardware_cost / weekly_profit / WEEKS_PER_MONTH
}

pub fn estimated_payback_months(ctx: &AnswerContext) -> f64 {
    match ctx.current() {
        Some(point) => payback_months_at(point, &ctx.params),
        None => f64::INFINITY,
    }
}

/// Net new supply as a share of circulating supply.
pub fn net_emission_pressure_pct(point: Option<&AggregateResult>) -> f64 {
    let Some(point) = point else { return 0.0 };
    let supply = nonzero_or(point.mean(M::Supply), 1.0).max(1.0);
    (point.mean(M::Minted) - point.mean(M::Burned)) / supply * 100.0
}

/// Share of emissions not offset by burn.
pub fn subsidy_gap_pct(point: Option<&AggregateResult>) -> f64 {
    let Some(point) = point else { return 0.0 };
    subsidy_gap_from_flows(point.mean(M::Minted), point.mean(M::Burned))
}

pub fn subsidy_gap_from_flows(minted: f64, burned: f64) -> f64 {
    let minted = minted.max(0.0);
    let burned = burned.max(0.0);
    if minted <= EPSILON {
        return 0.0;
    }
    (safe_divide(minted - burned, minted, 0.0) * 100.0).max(0.0)
}

/// Fraction of required metric slots holding a finite mean.
pub fn required_metric_coverage_ratio(points: &[AggregateResult]) -> f64 {
    let total = points.len() * M::REQUIRED.len();
    if total == 0 {
        return 0.0;
    }
    let valid = points
        .iter()
        .flat_map(|point| M::REQUIRED.iter().map(move |metric| point.mean(*metric)))
        .filter(|value| value.is_finite())
        .count();
    valid as f64 / total as f64
}

/// Whether the price distribution carries usable percentile and CI bounds.
pub fn has_dispersion_stats(point: Option<&AggregateResult>) -> bool {
    point
        .and_then(|point| point.stats(M::Price))
        .is_some_and(|stats| {
            stats.p10.is_finite()
                && stats.p90.is_finite()
                && stats.ci95_lower.is_finite()
                && stats.ci95_upper.is_finite()
        })
}

/// Deepest peak-to-trough drop of the price series in percent.
pub fn max_drawdown_pct(prices: &[f64]) -> f64 {
    let mut running_peak = prices.first().copied().unwrap_or(0.0);
    let mut max_drawdown = 0.0_f64;
    for price in prices {
        running_peak = running_peak.max(*price);
        let drawdown = if running_peak > 0.0 {
            (running_peak - price) / running_peak * 100.0
        } else {
            0.0
        };
        max_drawdown = max_drawdown.max(drawdown);
    }
    max_drawdown
}

/// Last `n` points (fewer when the series is shorter).
pub fn tail(points: &[AggregateResult], n: usize) -> &[AggregateResult] {
    &points[points.len().saturating_sub(n)..]
}

/// Mean of `value` over the last `n` points.
pub fn late_average(points: &[AggregateResult], n: usize, value: impl Fn(&AggregateResult) -> f64) -> f64 {
    let values: Vec<f64> = tail(points, n).iter().map(value).collect();
    average(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricStats;

    fn point(providers: f64, churn: f64) -> AggregateResult {
        AggregateResult::new(1)
            .with(M::Providers, providers)
            .with(M::ChurnCount, churn)
    }

    #[test]
    fn safe_divide_guards_degenerate_input() {
        assert_eq!(safe_divide(1.0, 0.0, 7.0), 7.0);
        assert_eq!(safe_divide(f64::NAN, 2.0, 3.0), 3.0);
        assert_eq!(safe_divide(1.0, f64::INFINITY, 4.0), 4.0);
        assert!((safe_divide(6.0, 3.0, 0.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn pct_change_edge_cases() {
        assert_eq!(pct_change(0.0, 0.0), 0.0);
        assert_eq!(pct_change(5.0, 0.0), 100.0);
        assert_eq!(pct_change(f64::INFINITY, 1.0), 0.0);
        assert!((pct_change(-1.0, -2.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn demand_coverage_treats_no_demand_as_served() {
        assert_eq!(demand_coverage(None), 0.0);
        let idle = AggregateResult::new(0).with(M::Demand, 0.0);
        assert_eq!(demand_coverage(Some(&idle)), 100.0);
        let busy = AggregateResult::new(0).with(M::Demand, 200.0).with(M::DemandServed, 150.0);
        assert!((demand_coverage(Some(&busy)) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn churn_pct_floors_providers_at_one() {
        assert!((churn_pct(Some(&point(0.0, 2.0))) - 200.0).abs() < 1e-9);
        assert!((churn_pct(Some(&point(1000.0, 15.0))) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn retention_uses_series_peak() {
        let points = vec![point(1000.0, 0.0), point(1200.0, 0.0), point(900.0, 0.0)];
        assert!((retention_from_series(&points) - 75.0).abs() < 1e-9);
        assert_eq!(retention_from_series(&[]), 0.0);
        assert_eq!(retention_from_series(&[point(0.0, 0.0)]), 0.0);
    }

    #[test]
    fn payback_is_infinite_without_profit() {
        let params = SimulationParams::default();
        let loss = AggregateResult::new(1)
            .with(M::Providers, 100.0)
            .with(M::Minted, 1000.0)
            .with(M::Price, 0.05);
        assert!(payback_months_at(&loss, &params).is_infinite());
        let profit = AggregateResult::new(1)
            .with(M::Providers, 100.0)
            .with(M::Minted, 300_000.0)
            .with(M::Price, 0.05);
        // 150 - 50 = 100 USD/week
        assert!((payback_months_at(&profit, &params) - 500.0 / 100.0 / 4.33).abs() < 1e-9);
    }

    #[test]
    fn subsidy_gap_never_negative() {
        assert_eq!(subsidy_gap_from_flows(0.0, 10.0), 0.0);
        assert_eq!(subsidy_gap_from_flows(100.0, 150.0), 0.0);
        assert!((subsidy_gap_from_flows(100.0, 80.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn required_coverage_counts_infinite_slots() {
        let mut p = AggregateResult::new(0);
        for metric in M::REQUIRED {
            p = p.with(metric, 1.0);
        }
        assert_eq!(required_metric_coverage_ratio(&[p.clone()]), 1.0);
        p.set(M::Price, MetricStats::constant(f64::INFINITY));
        assert!((required_metric_coverage_ratio(&[p]) - 8.0 / 9.0).abs() < 1e-9);
        assert_eq!(required_metric_coverage_ratio(&[]), 0.0);
    }

    #[test]
    fn drawdown_from_peak() {
        assert!((max_drawdown_pct(&[1.0, 2.0, 1.0, 1.5]) - 50.0).abs() < 1e-9);
    }
}
