// Shared fixtures for the acceptance integration suites.

#![allow(dead_code)]

use depin_diagnostics::{
    evaluate_question, standard_registry, AggregateResult, AnswerContext, Answerability, Metric, MetricStats,
    QuestionAnswer, SimulationParams, Verdict,
};

pub fn stats(mean: f64) -> MetricStats {
    MetricStats::constant(mean)
}

/// A healthy mid-run week; override fields with [`AggregateResult::with`].
pub fn point(t: u32) -> AggregateResult {
    AggregateResult::new(t)
        .with(Metric::Price, 1.0)
        .with(Metric::Supply, 1_000_000.0)
        .with(Metric::Demand, 10_000.0)
        .with(Metric::DemandServed, 9_500.0)
        .with(Metric::Providers, 1_000.0)
        .with(Metric::Capacity, 15_000.0)
        .with(Metric::ServicePrice, 0.5)
        .with(Metric::Minted, 100_000.0)
        .with(Metric::Burned, 80_000.0)
        .with(Metric::Utilization, 63.0)
        .with(Metric::Profit, 25.0)
        .with(Metric::Scarcity, 0.0)
        .with(Metric::Incentive, 1.2)
        .with(Metric::SolvencyScore, 1.1)
        .with(Metric::NetDailyLoss, 0.0)
        .with(Metric::DailyMintUsd, 8_000.0)
        .with(Metric::DailyBurnUsd, 8_800.0)
        .with(Metric::NetFlow, 0.0)
        .with(Metric::ChurnCount, 15.0)
        .with(Metric::JoinCount, 20.0)
        .with(Metric::TreasuryBalance, 500_000.0)
        .with(Metric::VampireChurn, 0.0)
        .with(Metric::MercenaryCount, 300.0)
        .with(Metric::ProCount, 700.0)
        .with(Metric::UnderwaterCount, 120.0)
        .with(Metric::CostPerCapacity, 0.4)
        .with(Metric::RevenuePerCapacity, 0.45)
        .with(Metric::EntryBarrierActive, 1.0)
}

/// `point(t)` with `overrides` applied in order.
pub fn point_with(t: u32, overrides: &[(Metric, f64)]) -> AggregateResult {
    overrides
        .iter()
        .fold(point(t), |p, (metric, value)| p.with(*metric, *value))
}

pub fn ctx(aggregated: Vec<AggregateResult>) -> AnswerContext {
    AnswerContext::new("test-run", SimulationParams::default(), aggregated)
}

pub fn ctx_with(
    aggregated: Vec<AggregateResult>,
    baseline: Option<Vec<AggregateResult>>,
    tweak: impl FnOnce(&mut SimulationParams),
) -> AnswerContext {
    let mut params = SimulationParams::default();
    tweak(&mut params);
    let context = AnswerContext::new("test-run", params, aggregated);
    match baseline {
        Some(series) => context.with_baseline(series),
        None => context,
    }
}

pub fn answer(id: &str, context: &AnswerContext) -> QuestionAnswer {
    evaluate_question(id, context, standard_registry())
}

/// Evaluate `id` and check its grade and that its verdict is one of `verdicts`.
pub fn expect(id: &str, context: &AnswerContext, grade: Answerability, verdicts: &[Verdict]) -> QuestionAnswer {
    let result = answer(id, context);
    assert_eq!(result.answerability, grade, "{} answerability ({})", id, result.summary);
    assert!(
        verdicts.contains(&result.verdict),
        "{} verdict {:?} not in {:?} ({})",
        id,
        result.verdict,
        verdicts,
        result.summary
    );
    result
}

pub fn has_metric(answer: &QuestionAnswer, id: &str) -> bool {
    answer.find_metric(id).is_some()
}
