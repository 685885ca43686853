// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Regime & Failure-Mode Classification

use crate::guardrails::{CHURN, RETENTION, SOLVENCY, UTILIZATION};
use crate::metrics::{
    burn_to_mint, churn_pct, demand_coverage, nonzero_or, pct_change, retention_from_series,
    safe_divide,
};
use crate::types::{AggregateResult, AnswerContext, DemandType, Metric as M};

/// Baseline point aligned with the current week.
///
/// Exact `t` match first; otherwise the baseline index
/// `min(baseline_len - 1, aggregated_len - 1)`.
pub fn baseline_point(ctx: &AnswerContext) -> Option<&AggregateResult> {
    let baseline = ctx.baseline()?;
    let current = ctx.current()?;
    baseline
        .iter()
        .find(|point| point.t == current.t)
        .or_else(|| {
            let index = (baseline.len() - 1).min(ctx.aggregated.len() - 1);
            baseline.get(index)
        })
}

// ─── Stress Axes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressAxis {
    Demand,
    Liquidity,
    Competitive,
    Cost,
}

impl StressAxis {
    /// Fixed tie-break order.
    pub const ORDER: [StressAxis; 4] = [
        StressAxis::Demand,
        StressAxis::Liquidity,
        StressAxis::Competitive,
        StressAxis::Cost,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Baseline,
    DemandStress,
    LiquidityStress,
    CompetitiveYieldStress,
    CostInflationStress,
}

impl Regime {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::DemandStress => "demand_stress",
            Self::LiquidityStress => "liquidity_stress",
            Self::CompetitiveYieldStress => "competitive_yield_stress",
            Self::CostInflationStress => "cost_inflation_stress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Baseline => "Baseline",
            Self::DemandStress => "Demand Stress",
            Self::LiquidityStress => "Liquidity Stress",
            Self::CompetitiveYieldStress => "Competitive Yield Stress",
            Self::CostInflationStress => "Cost Inflation Stress",
        }
    }

    fn from_axis(axis: StressAxis) -> Self {
        match axis {
            StressAxis::Demand => Self::DemandStress,
            StressAxis::Liquidity => Self::LiquidityStress,
            StressAxis::Competitive => Self::CompetitiveYieldStress,
            StressAxis::Cost => Self::CostInflationStress,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StressScores {
    pub demand: f64,
    pub liquidity: f64,
    pub competitive: f64,
    pub cost: f64,
}

impl StressScores {
    pub fn get(&self, axis: StressAxis) -> f64 {
        match axis {
            StressAxis::Demand => self.demand,
            StressAxis::Liquidity => self.liquidity,
            StressAxis::Competitive => self.competitive,
            StressAxis::Cost => self.cost,
        }
    }

    /// Axes sorted by descending score, ties kept in [`StressAxis::ORDER`].
    pub fn ranked(&self) -> Vec<(StressAxis, f64)> {
        let mut ranked: Vec<(StressAxis, f64)> =
            StressAxis::ORDER.iter().map(|axis| (*axis, self.get(*axis))).collect();
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
        ranked
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeSnapshot {
    pub regime: Regime,
    pub score: f64,
    pub stress: StressScores,
    pub demand_delta_vs_baseline_pct: f64,
    pub price_delta_vs_baseline_pct: f64,
    pub cost_delta_vs_reference_pct: f64,
}

impl RegimeSnapshot {
    fn baseline() -> Self {
        Self {
            regime: Regime::Baseline,
            score: 0.0,
            stress: StressScores::default(),
            demand_delta_vs_baseline_pct: 0.0,
            price_delta_vs_baseline_pct: 0.0,
            cost_delta_vs_reference_pct: 0.0,
        }
    }
}

/// Score each stress axis and report the dominant regime.
pub fn classify_regime(ctx: &AnswerContext) -> RegimeSnapshot {
    let Some(current) = ctx.current() else {
        return RegimeSnapshot::baseline();
    };
    let baseline = baseline_point(ctx);
    let params = &ctx.params;

    let current_demand = current.mean(M::Demand);
    let baseline_demand = nonzero_or(baseline.map_or(0.0, |b| b.mean(M::Demand)), current_demand);
    let demand_delta = pct_change(current_demand, baseline_demand);

    let current_price = current.mean(M::Price);
    let baseline_price = nonzero_or(baseline.map_or(0.0, |b| b.mean(M::Price)), current_price);
    let price_delta = pct_change(current_price, baseline_price);

    let reference_cost = nonzero_or(
        ctx.reference.provider_cost_per_week,
        nonzero_or(params.provider_cost_per_week, 1.0),
    );
    let cost_delta = pct_change(params.provider_cost_per_week, reference_cost);

    let flag = |condition: bool, weight: f64| if condition { weight } else { 0.0 };

    let demand = flag(demand_delta < -15.0, 1.0)
        + flag(params.demand_type == DemandType::HighToDecay, 1.0)
        + flag(params.demand_type == DemandType::Volatile, 0.5);
    let liquidity = flag(params.investor_sell_pct >= 0.25, 1.0) + flag(price_delta <= -20.0, 1.0);
    let competitive =
        flag(params.competitor_yield >= 0.75, 1.0) + flag(params.competitor_yield >= 1.5, 1.0);

    let cost_per_capacity = current.mean(M::CostPerCapacity);
    let cost_pressure = safe_divide(
        cost_per_capacity,
        current.mean(M::RevenuePerCapacity),
        if cost_per_capacity > 0.0 { 2.0 } else { 1.0 },
    );
    let cost = flag(cost_delta >= 25.0, 1.0) + flag(cost_pressure >= 1.1, 1.0);

    let stress = StressScores {
        demand,
        liquidity,
        competitive,
        cost,
    };
    let (top_axis, top_score) = stress
        .ranked()
        .first()
        .copied()
        .unwrap_or((StressAxis::Demand, 0.0));
    let (regime, score) = if top_score >= 1.0 {
        (Regime::from_axis(top_axis), top_score)
    } else {
        (Regime::Baseline, 0.0)
    };

    RegimeSnapshot {
        regime,
        score,
        stress,
        demand_delta_vs_baseline_pct: demand_delta,
        price_delta_vs_baseline_pct: price_delta,
        cost_delta_vs_reference_pct: cost_delta,
    }
}

// ─── Failure Modes ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    SubsidyTrap,
    ProviderCapitulation,
    LiquidityShockChurnSpiral,
    ServiceContinuityDegradation,
    LatentCapacityAttrition,
    Stable,
    InsufficientData,
}

impl FailureMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SubsidyTrap => "Subsidy Trap",
            Self::ProviderCapitulation => "Provider Capitulation",
            Self::LiquidityShockChurnSpiral => "Liquidity Shock -> Churn Spiral",
            Self::ServiceContinuityDegradation => "Service Continuity Degradation",
            Self::LatentCapacityAttrition => "Latent Capacity Attrition",
            Self::Stable => "Stable / No dominant failure mode",
            Self::InsufficientData => "Insufficient data",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Stable | Self::InsufficientData)
    }
}

/// First matching failure mode in priority order.
pub fn infer_failure_mode(ctx: &AnswerContext) -> FailureMode {
    let Some(current) = ctx.current() else {
        return FailureMode::InsufficientData;
    };
    let baseline = baseline_point(ctx);
    let solvency = current.mean(M::SolvencyScore);
    let burn_ratio = burn_to_mint(current);
    let churn = churn_pct(Some(current));
    let retention = retention_from_series(&ctx.aggregated);
    let coverage = demand_coverage(Some(current));
    let utilization = current.mean(M::Utilization);
    let price_delta = baseline.map_or(0.0, |b| pct_change(current.mean(M::Price), b.mean(M::Price)));
    let providers_wow = ctx
        .previous()
        .map_or(0.0, |p| pct_change(current.mean(M::Providers), p.mean(M::Providers)));

    if burn_ratio < 0.8 && solvency < SOLVENCY.critical_ratio {
        FailureMode::SubsidyTrap
    } else if churn >= CHURN.panic_pct_per_week * 0.8 && retention < RETENTION.benchmark_min_pct {
        FailureMode::ProviderCapitulation
    } else if price_delta <= -20.0 && churn >= CHURN.panic_pct_per_week * 0.5 {
        FailureMode::LiquidityShockChurnSpiral
    } else if coverage < 90.0 && utilization > UTILIZATION.healthy_min_pct {
        FailureMode::ServiceContinuityDegradation
    } else if providers_wow < -3.0 && coverage < 95.0 {
        FailureMode::LatentCapacityAttrition
    } else {
        FailureMode::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationParams;

    fn point(t: u32, demand: f64, price: f64) -> AggregateResult {
        AggregateResult::new(t)
            .with(M::Demand, demand)
            .with(M::Price, price)
            .with(M::CostPerCapacity, 0.4)
            .with(M::RevenuePerCapacity, 0.45)
    }

    #[test]
    fn baseline_point_prefers_exact_week() {
        let ctx = AnswerContext::new("r", SimulationParams::default(), vec![point(0, 1.0, 1.0), point(5, 1.0, 1.0)])
            .with_baseline(vec![point(5, 2.0, 1.0), point(9, 3.0, 1.0)]);
        assert_eq!(baseline_point(&ctx).map(|p| p.t), Some(5));
    }

    #[test]
    fn baseline_point_falls_back_to_aligned_index() {
        let aggregated = vec![point(1, 1.0, 1.0), point(2, 1.0, 1.0), point(3, 1.0, 1.0)];
        let ctx = AnswerContext::new("r", SimulationParams::default(), aggregated.clone())
            .with_baseline(vec![point(10, 1.0, 1.0), point(11, 1.0, 1.0)]);
        assert_eq!(baseline_point(&ctx).map(|p| p.t), Some(11));
        let longer = AnswerContext::new("r", SimulationParams::default(), aggregated)
            .with_baseline((10..20).map(|t| point(t, 1.0, 1.0)).collect());
        assert_eq!(baseline_point(&longer).map(|p| p.t), Some(12));
        let empty = AnswerContext::new("r", SimulationParams::default(), vec![]);
        assert!(baseline_point(&empty).is_none());
    }

    #[test]
    fn regime_ties_break_in_axis_order() {
        let params = SimulationParams {
            investor_sell_pct: 0.3,
            competitor_yield: 0.8,
            ..SimulationParams::default()
        };
        let ctx = AnswerContext::new("r", params, vec![point(1, 100.0, 1.0)]);
        let snapshot = classify_regime(&ctx);
        assert_eq!(snapshot.regime, Regime::LiquidityStress);
        assert_eq!(snapshot.score, 1.0);
    }

    #[test]
    fn regime_is_baseline_below_unit_score() {
        let params = SimulationParams {
            demand_type: DemandType::Volatile,
            ..SimulationParams::default()
        };
        let ctx = AnswerContext::new("r", params, vec![point(1, 100.0, 1.0)]);
        let snapshot = classify_regime(&ctx);
        assert_eq!(snapshot.regime, Regime::Baseline);
        assert!((snapshot.stress.demand - 0.5).abs() < 1e-9);
    }

    #[test]
    fn subsidy_trap_has_priority() {
        let trapped = AggregateResult::new(1)
            .with(M::Minted, 100.0)
            .with(M::Burned, 50.0)
            .with(M::SolvencyScore, 0.5)
            .with(M::Providers, 100.0)
            .with(M::ChurnCount, 10.0);
        let ctx = AnswerContext::new("r", SimulationParams::default(), vec![trapped]);
        assert_eq!(infer_failure_mode(&ctx), FailureMode::SubsidyTrap);
        let empty = AnswerContext::new("r", SimulationParams::default(), vec![]);
        assert_eq!(infer_failure_mode(&empty).label(), "Insufficient data");
    }
}
