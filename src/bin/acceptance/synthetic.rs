// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Synthetic Run Generator
//
// Seeded stand-in for simulator output so the checklist can be produced
// without a live simulation. Each run walks a small provider economy week
// by week; runs are aggregated into per-week distributions.

use depin_diagnostics::{AggregateResult, AnswerContext, EmissionModel, Metric, MetricStats, RevenueStrategy, SimulationParams};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SERVICE_PRICE_USD: f64 = 0.5;
const DEMAND_PER_PROVIDER: f64 = 65.0;

/// Demo economy: a competitor yield shock against a quiet baseline.
pub fn synthetic_params(seed: u64, weeks: u32) -> SimulationParams {
    SimulationParams {
        horizon_weeks: weeks,
        n_sims: 16,
        seed,
        competitor_yield: 0.5,
        investor_sell_pct: 0.05,
        pro_tier_pct: 0.2,
        pro_tier_efficiency: 1.5,
        ..SimulationParams::default()
    }
}

pub fn synthetic_context(seed: u64, weeks: u32) -> AnswerContext {
    let params = synthetic_params(seed, weeks);
    let baseline_params = SimulationParams {
        competitor_yield: 0.0,
        investor_sell_pct: 0.01,
        ..params.clone()
    };

    let aggregated = run_monte_carlo(&params);
    let baseline = run_monte_carlo(&baseline_params);
    AnswerContext::new(format!("acceptance-synthetic-{}", seed), params, aggregated).with_baseline(baseline)
}

// ─── Monte Carlo ────────────────────────────────────────────────────────────

/// Runs seeded `seed..seed+n_sims`, aggregated per week.
pub fn run_monte_carlo(params: &SimulationParams) -> Vec<AggregateResult> {
    let runs: Vec<Vec<Vec<(Metric, f64)>>> = (0..u64::from(params.n_sims.max(1)))
        .map(|run| {
            let rng = ChaCha8Rng::seed_from_u64(params.seed.wrapping_add(run));
            SyntheticRun::new(rng, params).collect_weeks(params.horizon_weeks)
        })
        .collect();

    (0..params.horizon_weeks as usize)
        .map(|week| {
            let mut point = AggregateResult::new(week as u32 + 1);
            let Some(first) = runs.first().and_then(|run| run.get(week)) else {
                return point;
            };
            for (slot, (metric, _)) in first.iter().enumerate() {
                let samples: Vec<f64> = runs
                    .iter()
                    .filter_map(|run| run.get(week).and_then(|w| w.get(slot)).map(|(_, v)| *v))
                    .collect();
                point.set(*metric, MetricStats::from_samples(&samples));
            }
            point
        })
        .collect()
}

// ─── Single Run ─────────────────────────────────────────────────────────────

struct SyntheticRun<'a> {
    rng: ChaCha8Rng,
    params: &'a SimulationParams,
    price: f64,
    supply: f64,
    providers: f64,
    treasury: f64,
    base_demand: f64,
}

impl<'a> SyntheticRun<'a> {
    fn new(rng: ChaCha8Rng, params: &'a SimulationParams) -> Self {
        Self {
            rng,
            params,
            price: params.initial_price,
            supply: params.initial_supply,
            providers: params.initial_providers,
            treasury: 0.0,
            base_demand: params.initial_providers * DEMAND_PER_PROVIDER,
        }
    }

    fn jitter(&mut self, scale: f64) -> f64 {
        1.0 + self.rng.gen_range(-scale..=scale)
    }

    fn collect_weeks(mut self, weeks: u32) -> Vec<Vec<(Metric, f64)>> {
        (1..=weeks).map(|week| self.step(week)).collect()
    }

    fn step(&mut self, week: u32) -> Vec<(Metric, f64)> {
        let p = self.params;
        let pro_share = p.pro_tier_pct.clamp(0.0, 1.0);
        let efficiency = p.pro_tier_efficiency.max(1.0);

        let demand = self.base_demand * (1.0 + 0.004 * f64::from(week)) * self.jitter(0.05);
        let capacity =
            self.providers * p.base_capacity_per_provider * (1.0 + pro_share * (efficiency - 1.0)) * self.jitter(0.02);
        let served = demand.min(capacity);
        let utilization = if capacity > 0.0 { served / capacity * 100.0 } else { 0.0 };

        let emission_scale = match p.emission_model {
            EmissionModel::Fixed => 1.0,
            EmissionModel::Kpi => (utilization / 60.0).clamp(0.3, 1.0),
        };
        let minted = p.max_mint_weekly * emission_scale;
        let revenue_usd = served * SERVICE_PRICE_USD;
        let burned = match p.revenue_strategy {
            RevenueStrategy::Burn => revenue_usd * p.burn_pct / self.price.max(1e-6),
            RevenueStrategy::Reserve => 0.0,
        };
        if p.revenue_strategy == RevenueStrategy::Reserve {
            self.treasury += revenue_usd * p.burn_pct;
        }

        let dilution = (minted - burned) / self.supply.max(1.0);
        let mut drift = p.k_demand_price * 0.01 - p.k_mint_price * dilution * 10.0 - 0.02 * p.competitor_yield;
        if week == p.investor_unlock_week {
            drift -= p.investor_sell_pct * 0.8;
        }
        self.price = (self.price * (1.0 + drift) * self.jitter(0.03)).max(1e-4);
        self.supply = (self.supply + minted - burned).max(0.0);

        let providers = self.providers.max(1.0);
        let profit = minted / providers * self.price + revenue_usd * (1.0 - p.burn_pct) / providers
            - p.provider_cost_per_week;
        let margin = profit / p.provider_cost_per_week.max(1.0);
        let churn_rate = (0.015 + (-margin).max(0.0) * 0.05 + p.competitor_yield * 0.03).clamp(0.0, 0.12);
        let join_rate = (margin * 0.04).clamp(0.0, 0.1);
        let churn = (self.providers * churn_rate * self.jitter(0.2)).round();
        let joins = (self.providers * join_rate * self.jitter(0.2)).round();
        self.providers = (self.providers - churn + joins).max(0.0);

        let minted_usd = minted * self.price;
        let burned_usd = burned * self.price;
        let underwater_share = if profit < 0.0 { 0.6 } else { 0.1 };
        let pro = (self.providers * pro_share).round();

        vec![
            (Metric::Price, self.price),
            (Metric::Supply, self.supply),
            (Metric::Demand, demand),
            (Metric::DemandServed, served),
            (Metric::Providers, self.providers),
            (Metric::Capacity, capacity),
            (Metric::ServicePrice, SERVICE_PRICE_USD),
            (Metric::Minted, minted),
            (Metric::Burned, burned),
            (Metric::Utilization, utilization),
            (Metric::Profit, profit),
            (Metric::Scarcity, demand / capacity.max(1.0)),
            (Metric::Incentive, margin),
            (Metric::SolvencyScore, burned_usd / minted_usd.max(1e-9)),
            (Metric::NetDailyLoss, (minted_usd - burned_usd) / 7.0),
            (Metric::DailyMintUsd, minted_usd / 7.0),
            (Metric::DailyBurnUsd, burned_usd / 7.0),
            (Metric::NetFlow, burned - minted),
            (Metric::ChurnCount, churn),
            (Metric::JoinCount, joins),
            (Metric::TreasuryBalance, self.treasury),
            (Metric::VampireChurn, churn * p.competitor_yield / (1.0 + p.competitor_yield)),
            (Metric::MercenaryCount, self.providers - pro),
            (Metric::ProCount, pro),
            (Metric::UnderwaterCount, (self.providers * underwater_share).round()),
            (Metric::CostPerCapacity, p.provider_cost_per_week * providers / capacity.max(1.0)),
            (Metric::RevenuePerCapacity, revenue_usd / capacity.max(1.0)),
            (Metric::EntryBarrierActive, 0.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_context() {
        let a = synthetic_context(7, 12);
        let b = synthetic_context(7, 12);
        assert_eq!(a.aggregated, b.aggregated);
        assert_eq!(a.aggregated.len(), 12);
        assert_eq!(a.baseline_or_empty().len(), 12);
    }

    #[test]
    fn every_required_metric_is_populated() {
        let ctx = synthetic_context(1, 4);
        for point in &ctx.aggregated {
            for metric in Metric::REQUIRED {
                assert!(point.stats(metric).is_some(), "missing {:?} at t={}", metric, point.t);
            }
        }
    }
}
