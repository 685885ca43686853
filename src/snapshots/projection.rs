// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Policy Projections

use crate::guardrails::CHURN;
use crate::metrics::{
    churn_pct, clamp, nonzero_or, retention_from_series, safe_divide, subsidy_gap_from_flows,
    subsidy_gap_pct,
};
use crate::snapshots::economics::ProviderEconomics;
use crate::types::{AggregateResult, AnswerContext, Metric as M};

// ─── Burn / Emission ────────────────────────────────────────────────────────

const BURN_STEP: f64 = 0.10;
const BURN_MIN: f64 = 0.01;
const BURN_MAX: f64 = 0.95;
const EMISSION_DOWN_FACTOR: f64 = 0.9;
const EMISSION_UP_FACTOR: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnEmissionProjection {
    pub current_solvency: f64,
    pub base_burn_pct: f64,
    pub burn_up_emission_down_solvency: f64,
    pub burn_down_emission_up_solvency: f64,
}

/// Solvency if burn moves ±10pp while emissions move ∓10%.
pub fn burn_emission_projection(ctx: &AnswerContext, point: &AggregateResult) -> BurnEmissionProjection {
    let current_solvency = nonzero_or(
        point.mean(M::SolvencyScore),
        safe_divide(point.mean(M::Burned), point.mean(M::Minted), 0.0),
    );
    let configured = nonzero_or(ctx.params.burn_pct, nonzero_or(ctx.reference.burn_pct, 0.3));
    let base_burn_pct = clamp(configured, BURN_MIN, BURN_MAX);
    let burn_up = (base_burn_pct + BURN_STEP).min(BURN_MAX);
    let burn_down = (base_burn_pct - BURN_STEP).max(BURN_MIN);

    BurnEmissionProjection {
        current_solvency,
        base_burn_pct,
        burn_up_emission_down_solvency: current_solvency * safe_divide(burn_up, base_burn_pct, 1.0)
            / EMISSION_DOWN_FACTOR,
        burn_down_emission_up_solvency: current_solvency * safe_divide(burn_down, base_burn_pct, 1.0)
            / EMISSION_UP_FACTOR,
    }
}

// ─── Reward Extension ───────────────────────────────────────────────────────

pub const EXTENSION_WEEKS: [u32; 3] = [4, 8, 12];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardExtension {
    pub extension_weeks: u32,
    pub bonus_emission_lift_pct: f64,
    pub retention_delta_pp: f64,
    pub projected_retention_pct: f64,
    pub subsidy_gap_delta_pp: f64,
    pub projected_subsidy_gap_pct: f64,
    pub projected_solvency: f64,
}

/// Projected effect of extending bonus rewards by `extension_weeks`.
pub fn reward_extension(ctx: &AnswerContext, point: &AggregateResult, extension_weeks: u32) -> RewardExtension {
    let blocks = (extension_weeks as f64 / 4.0).max(1.0);
    let providers = nonzero_or(point.mean(M::Providers), 1.0).max(1.0);
    let minted = point.mean(M::Minted).max(0.0);
    let burned = point.mean(M::Burned).max(0.0);
    let current_solvency = nonzero_or(point.mean(M::SolvencyScore), safe_divide(burned, minted, 0.0));
    let base_gap = subsidy_gap_pct(Some(point));
    let base_retention = retention_from_series(&ctx.aggregated);
    let churn = churn_pct(Some(point));
    let economics = ProviderEconomics::at(ctx, Some(point));

    let lift = (0.05 * blocks).min(0.18);
    let projected_minted = minted * (1.0 + lift);
    let projected_burned = burned * (1.0 + lift * 0.45);
    let projected_gap = subsidy_gap_from_flows(projected_minted, projected_burned);

    let margin_stress = if economics.weekly_margin_usd < 0.0 { 1.0 } else { 0.0 };
    let panic_drag = if churn >= CHURN.panic_pct_per_week { 0.3 * blocks } else { 0.0 };
    let retention_delta_pp = clamp((0.8 + 0.5 * margin_stress) * blocks - panic_drag, 0.0, 10.0);

    let minted_delta_per_provider = safe_divide(projected_minted - minted, providers, 0.0);
    let projected_margin = economics.weekly_margin_usd + minted_delta_per_provider * point.mean(M::Price).max(0.0);
    let margin_adjustment = if projected_margin >= 0.0 { 0.02 } else { -0.02 };
    let flow_solvency = safe_divide(projected_burned, projected_minted, current_solvency);

    RewardExtension {
        extension_weeks,
        bonus_emission_lift_pct: lift * 100.0,
        retention_delta_pp,
        projected_retention_pct: clamp(base_retention + retention_delta_pp, 0.0, 100.0),
        subsidy_gap_delta_pp: projected_gap - base_gap,
        projected_subsidy_gap_pct: projected_gap,
        projected_solvency: (current_solvency * 0.6 + flow_solvency * 0.4 + margin_adjustment).max(0.0),
    }
}

pub fn reward_extension_sweep(ctx: &AnswerContext, point: &AggregateResult) -> Vec<RewardExtension> {
    EXTENSION_WEEKS
        .iter()
        .map(|weeks| reward_extension(ctx, point, *weeks))
        .collect()
}

// ─── Structural Action ──────────────────────────────────────────────────────

/// How far the scenario's structural levers sit from the reference, 0..100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralActionScore {
    pub score: f64,
    pub burn_norm: f64,
    pub mint_norm: f64,
    pub lag_norm: f64,
    pub emission_norm: f64,
    pub threshold_norm: f64,
}

pub fn structural_action_score(ctx: &AnswerContext) -> StructuralActionScore {
    let params = &ctx.params;
    let reference = &ctx.reference;
    let default_burn = nonzero_or(reference.burn_pct, 0.3);
    let default_mint = nonzero_or(reference.max_mint_weekly, 1.0);

    let burn_norm = clamp((params.burn_pct - default_burn).abs() / 0.10, 0.0, 1.0);
    let mint_norm = clamp(
        safe_divide((params.max_mint_weekly - default_mint).abs(), default_mint.max(1.0), 0.0) / 0.25,
        0.0,
        1.0,
    );
    let lag_norm = clamp((params.reward_lag_weeks - reference.reward_lag_weeks).abs() / 2.0, 0.0, 1.0);
    let emission_norm = if params.emission_model != reference.emission_model {
        1.0
    } else {
        0.0
    };
    let threshold_norm = clamp((params.churn_threshold - reference.churn_threshold).abs() / 50.0, 0.0, 1.0);

    StructuralActionScore {
        score: (burn_norm * 0.25 + mint_norm * 0.25 + lag_norm * 0.2 + emission_norm * 0.2 + threshold_norm * 0.1)
            * 100.0,
        burn_norm,
        mint_norm,
        lag_norm,
        emission_norm,
        threshold_norm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmissionModel, SimulationParams};

    fn point() -> AggregateResult {
        AggregateResult::new(10)
            .with(M::Providers, 1000.0)
            .with(M::Minted, 100_000.0)
            .with(M::Burned, 80_000.0)
            .with(M::Price, 1.0)
            .with(M::SolvencyScore, 1.1)
            .with(M::ChurnCount, 15.0)
    }

    #[test]
    fn burn_up_projection_improves_solvency() {
        let ctx = AnswerContext::new("p", SimulationParams::default(), vec![point()]);
        let projection = burn_emission_projection(&ctx, &point());
        assert!((projection.base_burn_pct - 0.3).abs() < 1e-9);
        assert!(projection.burn_up_emission_down_solvency > projection.current_solvency);
        assert!(projection.burn_down_emission_up_solvency < projection.current_solvency);
    }

    #[test]
    fn extension_lift_is_capped() {
        let ctx = AnswerContext::new("p", SimulationParams::default(), vec![point()]);
        let sweep = reward_extension_sweep(&ctx, &point());
        let lifts: Vec<f64> = sweep.iter().map(|e| e.bonus_emission_lift_pct).collect();
        assert!((lifts[0] - 5.0).abs() < 1e-9);
        assert!((lifts[1] - 10.0).abs() < 1e-9);
        assert!((lifts[2] - 15.0).abs() < 1e-9);
        assert!(sweep.iter().all(|e| e.subsidy_gap_delta_pp > 0.0));
    }

    #[test]
    fn reference_params_score_zero() {
        let ctx = AnswerContext::new("p", SimulationParams::default(), vec![]);
        assert_eq!(structural_action_score(&ctx).score, 0.0);
        let tuned = AnswerContext::new(
            "p",
            SimulationParams {
                burn_pct: 0.5,
                emission_model: EmissionModel::Kpi,
                ..SimulationParams::default()
            },
            vec![],
        );
        assert!((structural_action_score(&tuned).score - 45.0).abs() < 1e-9);
    }
}
