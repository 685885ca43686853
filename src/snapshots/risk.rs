// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Risk Snapshots
//
// Shock-lag estimation, death-spiral scoring, leading-indicator breaches and
// the centralization proxy. Every function is total over empty series.

use crate::guardrails::{CHURN, SOLVENCY};
use crate::metrics::{
    average, churn_pct, clamp, demand_coverage, max_drawdown_pct, nonzero_or, pct_change, peak,
    retention_from_series, safe_divide, series,
};
use crate::types::{AggregateResult, AnswerContext, Metric as M};

// ─── Shock Lag ──────────────────────────────────────────────────────────────

const SHOCK_PRICE_DROP_PCT: f64 = -10.0;
const CHURN_REACTION_PP: f64 = 1.0;
const CAPACITY_REACTION_PCT: f64 = -3.0;

/// Lags are week counts, `-1` when the event was not observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockLag {
    pub shock_week_index: i64,
    pub lag_to_churn_weeks: i64,
    pub lag_to_capacity_weeks: i64,
    pub avg_pre_shock_churn: f64,
}

impl ShockLag {
    pub fn has_shock(&self) -> bool {
        self.shock_week_index >= 0
    }
}

pub fn estimate_shock_lag(ctx: &AnswerContext) -> ShockLag {
    let none = |avg_pre_shock_churn| ShockLag {
        shock_week_index: -1,
        lag_to_churn_weeks: -1,
        lag_to_capacity_weeks: -1,
        avg_pre_shock_churn,
    };
    if ctx.aggregated.len() < 3 {
        return none(0.0);
    }

    let prices = series(&ctx.aggregated, M::Price);
    let churn: Vec<f64> = ctx.aggregated.iter().map(|p| churn_pct(Some(p))).collect();
    let capacity = series(&ctx.aggregated, M::Capacity);

    let Some(shock) = (1..prices.len()).find(|&i| pct_change(prices[i], prices[i - 1]) <= SHOCK_PRICE_DROP_PCT)
    else {
        return none(average(&churn));
    };

    let avg_pre_shock_churn = if shock > 0 {
        average(&churn[..shock])
    } else {
        churn[shock]
    };
    let capacity_at_shock = capacity[shock];

    let churn_reaction = (shock..churn.len()).find(|&i| churn[i] >= avg_pre_shock_churn + CHURN_REACTION_PP);
    let capacity_reaction = (shock..capacity.len())
        .find(|&i| pct_change(capacity[i], capacity_at_shock) <= CAPACITY_REACTION_PCT);
    let lag = |reaction: Option<usize>| reaction.map_or(-1, |i| (i - shock) as i64);

    ShockLag {
        shock_week_index: shock as i64,
        lag_to_churn_weeks: lag(churn_reaction),
        lag_to_capacity_weeks: lag(capacity_reaction),
        avg_pre_shock_churn,
    }
}

// ─── Death Spiral ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeathSpiralRisk {
    pub probability_pct: f64,
    pub risk_score: f64,
    pub insolvency_weeks: usize,
    pub panic_churn_weeks: usize,
    pub max_drawdown_pct: f64,
    pub provider_collapse_pct: f64,
    pub insolvency_share: f64,
    pub panic_share: f64,
    pub near_alert: bool,
}

/// Weighted blend of insolvency, panic churn, drawdown and provider collapse
/// over one series (the active run or its baseline).
pub fn death_spiral_risk(points: &[AggregateResult]) -> DeathSpiralRisk {
    if points.is_empty() {
        return DeathSpiralRisk::default();
    }
    let weeks = points.len() as f64;

    let insolvency_weeks = points
        .iter()
        .filter(|p| p.mean(M::SolvencyScore) < SOLVENCY.critical_ratio)
        .count();
    let panic_churn_weeks = points
        .iter()
        .filter(|p| churn_pct(Some(*p)) >= CHURN.panic_pct_per_week)
        .count();
    let drawdown = max_drawdown_pct(&series(points, M::Price));

    let providers = series(points, M::Providers);
    let peak_providers = peak(&providers, 0.0);
    let latest = providers.last().copied().unwrap_or(0.0);
    let provider_collapse_pct = if peak_providers > 0.0 {
        ((peak_providers - latest) / peak_providers * 100.0).max(0.0)
    } else {
        0.0
    };

    let insolvency_share = safe_divide(insolvency_weeks as f64, weeks, 0.0);
    let panic_share = safe_divide(panic_churn_weeks as f64, weeks, 0.0);
    let risk_score = insolvency_share * 0.35
        + panic_share * 0.25
        + (drawdown / 100.0).min(1.0) * 0.2
        + (provider_collapse_pct / 100.0).min(1.0) * 0.2;
    let probability_pct = clamp(risk_score * 100.0, 0.0, 100.0);
    let near_alert = probability_pct >= 40.0
        || insolvency_share >= 0.2
        || panic_share >= 0.15
        || provider_collapse_pct >= 15.0;

    DeathSpiralRisk {
        probability_pct,
        risk_score,
        insolvency_weeks,
        panic_churn_weeks,
        max_drawdown_pct: drawdown,
        provider_collapse_pct,
        insolvency_share,
        panic_share,
        near_alert,
    }
}

// ─── Leading Indicators ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBreach {
    pub id: &'static str,
    pub label: &'static str,
    pub week_index: usize,
    pub week: u32,
    pub delta: f64,
    pub unit: &'static str,
    pub threshold: &'static str,
}

struct Indicator {
    id: &'static str,
    label: &'static str,
    unit: &'static str,
    threshold: &'static str,
    delta: fn(&AggregateResult, &AggregateResult) -> f64,
    breached: fn(f64, &AggregateResult) -> bool,
}

const INDICATORS: [Indicator; 6] = [
    Indicator {
        id: "price_delta_vs_reference_pct",
        label: "Price",
        unit: "%",
        threshold: "Price <= -10% vs reference",
        delta: |cur, reference| pct_change(cur.mean(M::Price), reference.mean(M::Price)),
        breached: |delta, _| delta <= -10.0,
    },
    Indicator {
        id: "solvency_delta_vs_reference",
        label: "Solvency",
        unit: "x",
        threshold: "Solvency <= -0.08x vs reference or below 1.0x",
        delta: |cur, reference| cur.mean(M::SolvencyScore) - reference.mean(M::SolvencyScore),
        breached: |delta, cur| delta <= -0.08 || cur.mean(M::SolvencyScore) < SOLVENCY.critical_ratio,
    },
    Indicator {
        id: "churn_delta_vs_reference_pp",
        label: "Churn",
        unit: "pp",
        threshold: "Churn >= +1pp vs reference",
        delta: |cur, reference| churn_pct(Some(cur)) - churn_pct(Some(reference)),
        breached: |delta, _| delta >= 1.0,
    },
    Indicator {
        id: "providers_delta_vs_reference_pct",
        label: "Providers",
        unit: "%",
        threshold: "Providers <= -4% vs reference",
        delta: |cur, reference| pct_change(cur.mean(M::Providers), reference.mean(M::Providers)),
        breached: |delta, _| delta <= -4.0,
    },
    Indicator {
        id: "demand_coverage_delta_vs_reference_pp",
        label: "Demand Coverage",
        unit: "pp",
        threshold: "Demand coverage <= -5pp vs reference",
        delta: |cur, reference| demand_coverage(Some(cur)) - demand_coverage(Some(reference)),
        breached: |delta, _| delta <= -5.0,
    },
    Indicator {
        id: "utilization_delta_vs_reference_pp",
        label: "Utilization",
        unit: "pp",
        threshold: "Utilization <= -5pp vs reference",
        delta: |cur, reference| cur.mean(M::Utilization) - reference.mean(M::Utilization),
        breached: |delta, _| delta <= -5.0,
    },
];

/// First breach of each indicator, ordered by week then indicator order.
///
/// The reference is the index-aligned baseline point (clamped to the last
/// baseline week), or the first aggregated point when no baseline exists.
pub fn leading_indicator_breaches(ctx: &AnswerContext) -> Vec<IndicatorBreach> {
    let Some(first) = ctx.aggregated.first() else {
        return Vec::new();
    };
    let reference_at = |index: usize| match ctx.baseline() {
        Some(baseline) => &baseline[index.min(baseline.len() - 1)],
        None => first,
    };

    let mut breaches: Vec<IndicatorBreach> = INDICATORS
        .iter()
        .filter_map(|indicator| {
            ctx.aggregated.iter().enumerate().find_map(|(index, current)| {
                let delta = (indicator.delta)(current, reference_at(index));
                (indicator.breached)(delta, current).then(|| IndicatorBreach {
                    id: indicator.id,
                    label: indicator.label,
                    week_index: index,
                    week: current.week(),
                    delta,
                    unit: indicator.unit,
                    threshold: indicator.threshold,
                })
            })
        })
        .collect();
    breaches.sort_by_key(|breach| breach.week_index);
    breaches
}

// ─── Centralization ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CentralizationProxy {
    pub risk_score: f64,
    pub provider_compression_pct: f64,
    pub top10_share_proxy_pct: f64,
    pub foundation_fallback_proxy_pct: f64,
    pub cohort_concentration_hhi_pct: f64,
    pub coverage_pct: f64,
}

/// Coverage held up by a shrinking, concentrating provider set.
pub fn centralization_proxy(ctx: &AnswerContext) -> CentralizationProxy {
    let Some(current) = ctx.current() else {
        return CentralizationProxy::default();
    };
    let coverage_pct = demand_coverage(Some(current));
    let providers = nonzero_or(current.mean(M::Providers), 1.0).max(1.0);
    let peak_providers = peak(&series(&ctx.aggregated, M::Providers), providers);
    let provider_compression_pct = if peak_providers > 0.0 {
        (safe_divide(peak_providers - providers, peak_providers, 0.0) * 100.0).max(0.0)
    } else {
        0.0
    };

    let pro_share = clamp(safe_divide(current.mean(M::ProCount), providers, 0.0), 0.0, 1.0);
    let merc_share = clamp(safe_divide(current.mean(M::MercenaryCount), providers, 0.0), 0.0, 1.0);
    let cohort_concentration_hhi_pct = (pro_share * pro_share + merc_share * merc_share) * 100.0;

    let coverage_pressure = (coverage_pct - 95.0).max(0.0);
    let top10_share_proxy_pct = clamp(
        safe_divide(10.0, providers, 0.0)
            * 100.0
            * (1.0 + provider_compression_pct / 50.0 + coverage_pressure / 25.0),
        0.0,
        100.0,
    );
    let retention = retention_from_series(&ctx.aggregated);
    let foundation_fallback_proxy_pct = clamp((coverage_pct - retention).max(0.0), 0.0, 100.0);

    let risk_score = clamp(
        provider_compression_pct * 0.4
            + cohort_concentration_hhi_pct * 0.25
            + top10_share_proxy_pct * 0.2
            + foundation_fallback_proxy_pct * 0.15,
        0.0,
        100.0,
    );

    CentralizationProxy {
        risk_score,
        provider_compression_pct,
        top10_share_proxy_pct,
        foundation_fallback_proxy_pct,
        cohort_concentration_hhi_pct,
        coverage_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationParams;

    fn week(t: u32, price: f64, providers: f64, churn: f64, capacity: f64) -> AggregateResult {
        AggregateResult::new(t)
            .with(M::Price, price)
            .with(M::Providers, providers)
            .with(M::ChurnCount, churn)
            .with(M::Capacity, capacity)
            .with(M::SolvencyScore, 1.1)
            .with(M::Demand, 100.0)
            .with(M::DemandServed, 100.0)
            .with(M::Utilization, 60.0)
    }

    fn ctx(points: Vec<AggregateResult>) -> AnswerContext {
        AnswerContext::new("risk", SimulationParams::default(), points)
    }

    #[test]
    fn shock_lag_needs_three_points() {
        let lag = estimate_shock_lag(&ctx(vec![week(1, 1.0, 100.0, 1.0, 100.0)]));
        assert!(!lag.has_shock());
        assert_eq!(lag.lag_to_churn_weeks, -1);
    }

    #[test]
    fn shock_lag_measures_delayed_reactions() {
        let lag = estimate_shock_lag(&ctx(vec![
            week(1, 1.0, 100.0, 1.0, 100.0),
            week(2, 1.0, 100.0, 1.0, 100.0),
            week(3, 0.8, 100.0, 1.0, 100.0),
            week(4, 0.8, 100.0, 3.0, 99.0),
            week(5, 0.8, 100.0, 3.0, 95.0),
        ]));
        assert_eq!(lag.shock_week_index, 2);
        assert_eq!(lag.lag_to_churn_weeks, 1);
        assert_eq!(lag.lag_to_capacity_weeks, 2);
        assert!((lag.avg_pre_shock_churn - 1.0).abs() < 1e-9);
    }

    #[test]
    fn death_spiral_flags_provider_collapse() {
        let risk = death_spiral_risk(&[
            week(1, 1.0, 1000.0, 10.0, 100.0),
            week(2, 1.0, 800.0, 10.0, 100.0),
        ]);
        assert!((risk.provider_collapse_pct - 20.0).abs() < 1e-9);
        assert!(risk.near_alert);
        assert_eq!(death_spiral_risk(&[]), DeathSpiralRisk::default());
    }

    #[test]
    fn breaches_are_ordered_by_week() {
        let breaches = leading_indicator_breaches(&ctx(vec![
            week(1, 1.0, 1000.0, 10.0, 100.0),
            week(2, 1.0, 950.0, 10.0, 100.0),
            week(3, 0.85, 950.0, 10.0, 100.0),
        ]));
        let ids: Vec<&str> = breaches.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["providers_delta_vs_reference_pct", "price_delta_vs_reference_pct"]);
        assert_eq!(breaches[0].week, 2);
    }

    #[test]
    fn centralization_is_bounded() {
        let proxy = centralization_proxy(&ctx(vec![
            week(1, 1.0, 20.0, 0.0, 100.0),
            week(2, 1.0, 5.0, 0.0, 100.0),
        ]));
        assert!(proxy.risk_score <= 100.0 && proxy.risk_score >= 0.0);
        assert!((proxy.provider_compression_pct - 75.0).abs() < 1e-9);
        assert_eq!(proxy.top10_share_proxy_pct, 100.0);
    }
}
