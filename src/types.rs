// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Type Definitions

use serde::{Deserialize, Serialize};

// ─── MetricStats ─────────────────────────────────────────────────────────────

/// Per-metric Monte Carlo summary at one timestep. Absent fields read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricStats {
    pub mean: f64,
    pub p10: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
    #[serde(rename = "stdDev")]
    pub std_dev: f64,
    pub ci95_lower: f64,
    pub ci95_upper: f64,
}

impl MetricStats {
    /// Degenerate distribution where every run produced `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            mean: value,
            p10: value,
            p90: value,
            min: value,
            max: value,
            std_dev: 0.0,
            ci95_lower: value,
            ci95_upper: value,
        }
    }

    /// Aggregate per-run samples: population variance, nearest-rank
    /// percentiles, normal-approximation 95% CI on the mean.
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self::default();
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        let std_dev = variance.sqrt();
        let margin = 1.96 * (std_dev / (n as f64).sqrt());
        let rank = |q: f64| sorted[((n as f64 * q).floor() as usize).min(n - 1)];
        Self {
            mean,
            p10: rank(0.1),
            p90: rank(0.9),
            min: sorted[0],
            max: sorted[n - 1],
            std_dev,
            ci95_lower: mean - margin,
            ci95_upper: mean + margin,
        }
    }
}

// ─── Metric ──────────────────────────────────────────────────────────────────

/// Every metric tracked per simulated week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Price,
    Supply,
    Demand,
    DemandServed,
    Providers,
    Capacity,
    ServicePrice,
    Minted,
    Burned,
    Utilization,
    Profit,
    Scarcity,
    Incentive,
    SolvencyScore,
    NetDailyLoss,
    DailyMintUsd,
    DailyBurnUsd,
    NetFlow,
    ChurnCount,
    JoinCount,
    TreasuryBalance,
    VampireChurn,
    MercenaryCount,
    ProCount,
    UnderwaterCount,
    CostPerCapacity,
    RevenuePerCapacity,
    EntryBarrierActive,
}

impl Metric {
    /// Metrics a run must populate for its outcome to be considered complete.
    pub const REQUIRED: [Metric; 9] = [
        Metric::Price,
        Metric::Supply,
        Metric::Demand,
        Metric::DemandServed,
        Metric::Providers,
        Metric::Capacity,
        Metric::Minted,
        Metric::Burned,
        Metric::SolvencyScore,
    ];
}

// ─── AggregateResult ─────────────────────────────────────────────────────────

/// One simulated week aggregated across Monte Carlo runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregateResult {
    pub t: u32,
    pub price: Option<MetricStats>,
    pub supply: Option<MetricStats>,
    pub demand: Option<MetricStats>,
    #[serde(rename = "demand_served")]
    pub demand_served: Option<MetricStats>,
    pub providers: Option<MetricStats>,
    pub capacity: Option<MetricStats>,
    pub service_price: Option<MetricStats>,
    pub minted: Option<MetricStats>,
    pub burned: Option<MetricStats>,
    pub utilization: Option<MetricStats>,
    pub profit: Option<MetricStats>,
    pub scarcity: Option<MetricStats>,
    pub incentive: Option<MetricStats>,
    pub solvency_score: Option<MetricStats>,
    pub net_daily_loss: Option<MetricStats>,
    pub daily_mint_usd: Option<MetricStats>,
    pub daily_burn_usd: Option<MetricStats>,
    pub net_flow: Option<MetricStats>,
    pub churn_count: Option<MetricStats>,
    pub join_count: Option<MetricStats>,
    pub treasury_balance: Option<MetricStats>,
    pub vampire_churn: Option<MetricStats>,
    pub mercenary_count: Option<MetricStats>,
    pub pro_count: Option<MetricStats>,
    pub underwater_count: Option<MetricStats>,
    pub cost_per_capacity: Option<MetricStats>,
    pub revenue_per_capacity: Option<MetricStats>,
    pub entry_barrier_active: Option<MetricStats>,
}

impl AggregateResult {
    pub fn new(t: u32) -> Self {
        Self { t, ..Self::default() }
    }

    fn slot(&self, metric: Metric) -> &Option<MetricStats> {
        match metric {
            Metric::Price => &self.price,
            Metric::Supply => &self.supply,
            Metric::Demand => &self.demand,
            Metric::DemandServed => &self.demand_served,
            Metric::Providers => &self.providers,
            Metric::Capacity => &self.capacity,
            Metric::ServicePrice => &self.service_price,
            Metric::Minted => &self.minted,
            Metric::Burned => &self.burned,
            Metric::Utilization => &self.utilization,
            Metric::Profit => &self.profit,
            Metric::Scarcity => &self.scarcity,
            Metric::Incentive => &self.incentive,
            Metric::SolvencyScore => &self.solvency_score,
            Metric::NetDailyLoss => &self.net_daily_loss,
            Metric::DailyMintUsd => &self.daily_mint_usd,
            Metric::DailyBurnUsd => &self.daily_burn_usd,
            Metric::NetFlow => &self.net_flow,
            Metric::ChurnCount => &self.churn_count,
            Metric::JoinCount => &self.join_count,
            Metric::TreasuryBalance => &self.treasury_balance,
            Metric::VampireChurn => &self.vampire_churn,
            Metric::MercenaryCount => &self.mercenary_count,
            Metric::ProCount => &self.pro_count,
            Metric::UnderwaterCount => &self.underwater_count,
            Metric::CostPerCapacity => &self.cost_per_capacity,
            Metric::RevenuePerCapacity => &self.revenue_per_capacity,
            Metric::EntryBarrierActive => &self.entry_barrier_active,
        }
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut Option<MetricStats> {
        match metric {
            Metric::Price => &mut self.price,
            Metric::Supply => &mut self.supply,
            Metric::Demand => &mut self.demand,
            Metric::DemandServed => &mut self.demand_served,
            Metric::Providers => &mut self.providers,
            Metric::Capacity => &mut self.capacity,
            Metric::ServicePrice => &mut self.service_price,
            Metric::Minted => &mut self.minted,
            Metric::Burned => &mut self.burned,
            Metric::Utilization => &mut self.utilization,
            Metric::Profit => &mut self.profit,
            Metric::Scarcity => &mut self.scarcity,
            Metric::Incentive => &mut self.incentive,
            Metric::SolvencyScore => &mut self.solvency_score,
            Metric::NetDailyLoss => &mut self.net_daily_loss,
            Metric::DailyMintUsd => &mut self.daily_mint_usd,
            Metric::DailyBurnUsd => &mut self.daily_burn_usd,
            Metric::NetFlow => &mut self.net_flow,
            Metric::ChurnCount => &mut self.churn_count,
            Metric::JoinCount => &mut self.join_count,
            Metric::TreasuryBalance => &mut self.treasury_balance,
            Metric::VampireChurn => &mut self.vampire_churn,
            Metric::MercenaryCount => &mut self.mercenary_count,
            Metric::ProCount => &mut self.pro_count,
            Metric::UnderwaterCount => &mut self.underwater_count,
            Metric::CostPerCapacity => &mut self.cost_per_capacity,
            Metric::RevenuePerCapacity => &mut self.revenue_per_capacity,
            Metric::EntryBarrierActive => &mut self.entry_barrier_active,
        }
    }

    pub fn stats(&self, metric: Metric) -> Option<&MetricStats> {
        self.slot(metric).as_ref()
    }

    /// Mean of `metric`, or 0 when the metric is absent or NaN.
    pub fn mean(&self, metric: Metric) -> f64 {
        match self.slot(metric) {
            Some(stats) if !stats.mean.is_nan() => stats.mean,
            _ => 0.0,
        }
    }

    pub fn set(&mut self, metric: Metric, stats: MetricStats) {
        *self.slot_mut(metric) = Some(stats);
    }

    /// Builder-style variant of [`AggregateResult::set`] with a constant distribution.
    pub fn with(mut self, metric: Metric, mean: f64) -> Self {
        self.set(metric, MetricStats::constant(mean));
        self
    }

    /// Week label used in answer windows (`W1` for t = 0).
    pub fn week(&self) -> u32 {
        self.t.max(1)
    }
}

// ─── Scenario Enums ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemandType {
    #[default]
    Consistent,
    HighToDecay,
    Growth,
    Volatile,
}

impl DemandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consistent => "consistent",
            Self::HighToDecay => "high-to-decay",
            Self::Growth => "growth",
            Self::Volatile => "volatile",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroCondition {
    Bearish,
    Bullish,
    #[default]
    Sideways,
}

impl MacroCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bearish => "bearish",
            Self::Bullish => "bullish",
            Self::Sideways => "sideways",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionModel {
    #[default]
    Fixed,
    Kpi,
}

impl EmissionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Kpi => "kpi",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueStrategy {
    #[default]
    Burn,
    Reserve,
}

impl RevenueStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Burn => "burn",
            Self::Reserve => "reserve",
        }
    }
}

// ─── SimulationParams ────────────────────────────────────────────────────────

/// Scenario configuration of one simulation run. Missing JSON fields take
/// the reference values from [`SimulationParams::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParams {
    #[serde(rename = "T")]
    pub horizon_weeks: u32,
    pub n_sims: u32,
    pub seed: u64,
    pub initial_supply: f64,
    pub initial_price: f64,
    pub initial_providers: f64,
    pub max_mint_weekly: f64,
    pub burn_pct: f64,
    pub initial_liquidity: f64,
    pub investor_unlock_week: u32,
    pub investor_sell_pct: f64,
    pub demand_type: DemandType,
    #[serde(rename = "macro")]
    pub macro_condition: MacroCondition,
    pub provider_cost_per_week: f64,
    pub base_capacity_per_provider: f64,
    pub k_demand_price: f64,
    pub k_mint_price: f64,
    pub reward_lag_weeks: f64,
    pub churn_threshold: f64,
    pub hardware_cost: f64,
    pub competitor_yield: f64,
    pub emission_model: EmissionModel,
    pub revenue_strategy: RevenueStrategy,
    /// Share of providers in the committed cohort; 0 means "not configured".
    pub pro_tier_pct: f64,
    /// Reward weight multiplier of the committed cohort; 0 means "not configured".
    pub pro_tier_efficiency: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            horizon_weeks: 52,
            n_sims: 25,
            seed: 42,
            initial_supply: 250_000_000.0,
            initial_price: 0.05,
            initial_providers: 100.0,
            max_mint_weekly: 10_000_000.0,
            burn_pct: 0.3,
            initial_liquidity: 500_000.0,
            investor_unlock_week: 26,
            investor_sell_pct: 0.15,
            demand_type: DemandType::Consistent,
            macro_condition: MacroCondition::Sideways,
            provider_cost_per_week: 50.0,
            base_capacity_per_provider: 100.0,
            k_demand_price: 0.1,
            k_mint_price: 0.05,
            reward_lag_weeks: 2.0,
            churn_threshold: -100.0,
            hardware_cost: 500.0,
            competitor_yield: 0.0,
            emission_model: EmissionModel::Fixed,
            revenue_strategy: RevenueStrategy::Burn,
            pro_tier_pct: 0.0,
            pro_tier_efficiency: 0.0,
        }
    }
}

impl SimulationParams {
    /// The reference parameter set every scenario is compared against.
    pub fn reference() -> Self {
        Self::default()
    }
}

// ─── AnswerContext ───────────────────────────────────────────────────────────

/// Everything an evaluator may read. Built once per evaluation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerContext {
    pub run_id: String,
    #[serde(default)]
    pub params: SimulationParams,
    /// Reference parameters that deltas such as "cost vs reference" use.
    #[serde(default)]
    pub reference: SimulationParams,
    #[serde(default)]
    pub aggregated: Vec<AggregateResult>,
    #[serde(default)]
    pub baseline_aggregated: Option<Vec<AggregateResult>>,
    #[serde(default)]
    pub derived_metrics: Option<serde_json::Value>,
}

impl AnswerContext {
    pub fn new(run_id: impl Into<String>, params: SimulationParams, aggregated: Vec<AggregateResult>) -> Self {
        Self {
            run_id: run_id.into(),
            params,
            reference: SimulationParams::reference(),
            aggregated,
            baseline_aggregated: None,
            derived_metrics: None,
        }
    }

    pub fn with_baseline(mut self, baseline: Vec<AggregateResult>) -> Self {
        self.baseline_aggregated = Some(baseline);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, crate::error::DiagnosticError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn current(&self) -> Option<&AggregateResult> {
        self.aggregated.last()
    }

    pub fn previous(&self) -> Option<&AggregateResult> {
        let len = self.aggregated.len();
        if len > 1 {
            self.aggregated.get(len - 2)
        } else {
            None
        }
    }

    /// Baseline series, `None` when absent or empty.
    pub fn baseline(&self) -> Option<&[AggregateResult]> {
        self.baseline_aggregated
            .as_deref()
            .filter(|series| !series.is_empty())
    }

    pub fn baseline_or_empty(&self) -> &[AggregateResult] {
        self.baseline().unwrap_or(&[])
    }

    /// The same run context viewed through its baseline trajectory.
    pub fn as_baseline(&self) -> Option<AnswerContext> {
        let aggregated = self.baseline()?.to_vec();
        Some(Self {
            aggregated,
            ..self.clone()
        })
    }
}

// ─── Answers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answerability {
    Y,
    P,
    N,
}

impl Answerability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Y => "Y",
            Self::P => "P",
            Self::N => "N",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Yes,
    No,
    AtRisk,
    InsufficientData,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::AtRisk => "at_risk",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

/// A metric value is either a number or preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Number(v as f64)
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerMetric {
    pub id: String,
    pub label: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Chart,
    Table,
    Panel,
    Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRef {
    pub kind: EvidenceKind,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
}

/// Structured answer to one acceptance question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub question_id: String,
    pub answerability: Answerability,
    pub verdict: Verdict,
    pub summary: String,
    pub window: String,
    pub thresholds: Vec<String>,
    pub metrics: Vec<AnswerMetric>,
    pub evidence: Vec<EvidenceRef>,
    pub reproducible: bool,
    pub confidence: f64,
}

// ─── Registry Types ──────────────────────────────────────────────────────────

pub type Evaluator = fn(&AnswerContext) -> QuestionAnswer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    Implemented,
    Stub,
}

#[derive(Debug, Clone)]
pub struct QuestionDefinition {
    pub id: String,
    pub section: &'static str,
    pub stakeholder: &'static str,
    pub prompt: String,
    /// `None` when the question is answered by the registry stub.
    pub evaluator: Option<Evaluator>,
}
