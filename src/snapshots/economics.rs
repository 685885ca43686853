// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Provider Economics

use crate::metrics::{nonzero_or, safe_divide};
use crate::types::{AggregateResult, AnswerContext, Metric as M};

/// Per-provider weekly economics at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderEconomics {
    pub providers: f64,
    pub price_usd: f64,
    pub minted_per_provider: f64,
    pub weekly_revenue_usd: f64,
    pub weekly_margin_usd: f64,
    /// Token price at which revenue equals operating cost; `+∞` without emissions.
    pub break_even_price_usd: f64,
    /// Token price below which providers start leaving; `+∞` without emissions.
    pub churn_risk_price_usd: f64,
    pub downside_price_20pct_usd: f64,
    pub downside_margin_20pct_usd: f64,
}

/// Operating cost per provider per week, falling back to the reference.
pub fn provider_cost(ctx: &AnswerContext) -> f64 {
    nonzero_or(
        ctx.params.provider_cost_per_week,
        nonzero_or(ctx.reference.provider_cost_per_week, 0.0),
    )
}

impl ProviderEconomics {
    pub fn at(ctx: &AnswerContext, point: Option<&AggregateResult>) -> Self {
        let cost = provider_cost(ctx);
        let churn_threshold = nonzero_or(ctx.params.churn_threshold, 0.0);
        let mean = |metric: M| point.map_or(0.0, |p| p.mean(metric));

        let providers = nonzero_or(mean(M::Providers), 1.0).max(1.0);
        let price_usd = mean(M::Price).max(0.0);
        let minted_per_provider = safe_divide(mean(M::Minted), providers, 0.0);
        let weekly_revenue_usd = minted_per_provider * price_usd;
        let (break_even_price_usd, churn_risk_price_usd) = if minted_per_provider > 0.0 {
            (
                cost / minted_per_provider,
                (cost + churn_threshold).max(0.0) / minted_per_provider,
            )
        } else {
            (f64::INFINITY, f64::INFINITY)
        };
        let downside_price_20pct_usd = price_usd * 0.8;

        Self {
            providers,
            price_usd,
            minted_per_provider,
            weekly_revenue_usd,
            weekly_margin_usd: weekly_revenue_usd - cost,
            break_even_price_usd,
            churn_risk_price_usd,
            downside_price_20pct_usd,
            downside_margin_20pct_usd: minted_per_provider * downside_price_20pct_usd - cost,
        }
    }
}

/// Reward split between committed ("pro") and mercenary providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMargins {
    pub pro_count: f64,
    pub mercenary_count: f64,
    pub pro_margin_usd: f64,
    pub mercenary_margin_usd: f64,
    pub pro_revenue_usd: f64,
    pub mercenary_revenue_usd: f64,
    pub pro_weight: f64,
    pub mercenary_weight: f64,
}

impl TierMargins {
    pub fn at(ctx: &AnswerContext, point: Option<&AggregateResult>) -> Self {
        let cost = provider_cost(ctx);
        let mean = |metric: M| point.map_or(0.0, |p| p.mean(metric));

        let providers = nonzero_or(mean(M::Providers), 1.0).max(1.0);
        let total_rewards_usd = mean(M::Minted) * mean(M::Price).max(0.0);
        let pro_fallback = providers * ctx.params.pro_tier_pct;
        let pro_count = nonzero_or(mean(M::ProCount), pro_fallback).min(providers).max(0.0);
        let mercenary_count = nonzero_or(mean(M::MercenaryCount), (providers - pro_count).max(0.0))
            .min(providers)
            .max(0.0);
        let efficiency = nonzero_or(ctx.params.pro_tier_efficiency, 1.0).max(1.0);

        let pro_weight = pro_count * efficiency;
        let mercenary_weight = mercenary_count;
        let total_weight = (pro_weight + mercenary_weight).max(1e-9);
        let pro_total = total_rewards_usd * safe_divide(pro_weight, total_weight, 0.0);
        let mercenary_total = total_rewards_usd * safe_divide(mercenary_weight, total_weight, 0.0);
        let pro_revenue_usd = if pro_count > 0.0 { pro_total / pro_count } else { 0.0 };
        let mercenary_revenue_usd = if mercenary_count > 0.0 {
            mercenary_total / mercenary_count
        } else {
            0.0
        };

        Self {
            pro_count,
            mercenary_count,
            pro_margin_usd: pro_revenue_usd - cost,
            mercenary_margin_usd: mercenary_revenue_usd - cost,
            pro_revenue_usd,
            mercenary_revenue_usd,
            pro_weight,
            mercenary_weight,
        }
    }
}

/// Weekly per-provider margin for every aggregated point.
pub fn margin_series(ctx: &AnswerContext) -> Vec<f64> {
    ctx.aggregated
        .iter()
        .map(|point| ProviderEconomics::at(ctx, Some(point)).weekly_margin_usd)
        .collect()
}
