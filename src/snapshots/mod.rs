// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Derived Snapshots

//! Derived views over an [`AnswerContext`](crate::types::AnswerContext).
//!
//! Snapshots are recomputed on demand by each evaluator; nothing is cached
//! between questions.

pub mod economics;
pub mod projection;
pub mod regime;
pub mod risk;

pub use economics::{margin_series, provider_cost, ProviderEconomics, TierMargins};
pub use projection::{
    burn_emission_projection, reward_extension_sweep, structural_action_score,
    BurnEmissionProjection, RewardExtension, StructuralActionScore,
};
pub use regime::{baseline_point, classify_regime, infer_failure_mode, FailureMode, Regime, RegimeSnapshot};
pub use risk::{
    centralization_proxy, death_spiral_risk, estimate_shock_lag, leading_indicator_breaches,
    CentralizationProxy, DeathSpiralRisk, IndicatorBreach, ShockLag,
};
