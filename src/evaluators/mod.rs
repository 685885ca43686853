// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Evaluators

//! One deterministic evaluator per question id, grouped by stakeholder
//! section. Each evaluator guards insufficient context with a `P` answer,
//! names its thresholds, and collapses its decision tree to a verdict.

use crate::metrics::{peak, safe_divide, series};
use crate::types::{AggregateResult, AnswerContext, Evaluator, Metric, QuestionAnswer};

mod builders;
mod comparative;
mod core;
mod governance;
mod inputs;
mod providers;
mod researchers;
mod token;
mod users;

pub(crate) type Entry = (&'static str, Evaluator);

/// Every implemented evaluator, in section order.
pub fn implemented() -> impl Iterator<Item = (&'static str, Evaluator)> {
    [
        core::EVALUATORS,
        builders::EVALUATORS,
        governance::EVALUATORS,
        providers::EVALUATORS,
        users::EVALUATORS,
        researchers::EVALUATORS,
        comparative::EVALUATORS,
        token::EVALUATORS,
        inputs::EVALUATORS,
    ]
    .into_iter()
    .flat_map(|section| section.iter().copied())
}

/// Insufficient-context answer: partial answerability, no verdict.
pub(crate) fn needs(id: &str, summary: &str) -> QuestionAnswer {
    QuestionAnswer::base(id).summary(summary)
}

pub(crate) fn week_of(point: &AggregateResult) -> String {
    format!("W{}", point.week())
}

/// `W{first} to W{last}` across the aggregated run.
pub(crate) fn span(ctx: &AnswerContext) -> String {
    let first = ctx.aggregated.first().map_or(1, AggregateResult::week);
    let last = ctx.aggregated.last().map_or(1, AggregateResult::week);
    format!("W{} to W{}", first, last)
}

/// `W{first}-{last}` for a slice of points.
pub(crate) fn week_range(points: &[AggregateResult]) -> String {
    let first = points.first().map_or(1, AggregateResult::week);
    let last = points.last().map_or(1, AggregateResult::week);
    format!("W{}-{}", first, last)
}

/// Latest cohort size as a percentage of its peak (peak floored at 1).
pub(crate) fn cohort_retention(points: &[AggregateResult], metric: Metric) -> f64 {
    let values = series(points, metric);
    let latest = values.last().copied().unwrap_or(0.0);
    safe_divide(latest, peak(&values, 1.0), 0.0) * 100.0
}

/// Highest-scoring entry; ties resolve to the earliest declared.
pub(crate) fn top_ranked<'a>(scores: &[(&'a str, f64)]) -> (&'a str, f64) {
    scores
        .iter()
        .copied()
        .fold(None, |best: Option<(&'a str, f64)>, entry| match best {
            Some(top) if top.1 >= entry.1 => Some(top),
            _ => Some(entry),
        })
        .unwrap_or(("unknown", 0.0))
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub(crate) fn lag_or_no_breach(weeks: i64) -> String {
    if weeks >= 0 {
        weeks.to_string()
    } else {
        "No breach".to_string()
    }
}
