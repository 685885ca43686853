// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Answer Engine
//
// Dispatches question ids to their registered evaluators and rolls the
// answers up into per-section coverage. A failing evaluator is contained
// at this boundary and never aborts the pass.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DiagnosticError;
use crate::registry::{canonical_ids, QuestionRegistry};
use crate::types::{AnswerContext, Answerability, QuestionAnswer};

// ─── Coverage Types ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSectionSummary {
    pub section: String,
    pub questions: usize,
    pub y: usize,
    pub p: usize,
    pub n: usize,
    pub direct_coverage_pct: f64,
    pub practical_coverage_pct: f64,
    pub pass80_practical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub by_section: Vec<CoverageSectionSummary>,
    pub total: CoverageSectionSummary,
}

/// Practical coverage a section needs to pass.
pub const PRACTICAL_PASS_PCT: f64 = 80.0;

// ─── Evaluation ─────────────────────────────────────────────────────────────

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Evaluate one id. Unknown ids and evaluator failures become `N` answers.
pub fn evaluate_question(id: &str, ctx: &AnswerContext, registry: &QuestionRegistry) -> QuestionAnswer {
    let Some(definition) = registry.get(id) else {
        warn!(question = %id, "{}", DiagnosticError::UnknownQuestion(id.to_string()));
        return QuestionAnswer::not_answerable(id, format!("Question {} is not registered.", id));
    };

    match panic::catch_unwind(AssertUnwindSafe(|| definition.evaluate(ctx))) {
        Ok(answer) => {
            debug!(
                question = %id,
                answerability = answer.answerability.as_str(),
                verdict = answer.verdict.as_str(),
                "Evaluated question"
            );
            answer
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            let failure = DiagnosticError::EvaluatorFailed {
                id: id.to_string(),
                reason: reason.clone(),
            };
            warn!(question = %id, "{}", failure);
            QuestionAnswer::not_answerable(id, format!("Evaluator failed for {}: {}", id, reason))
        }
    }
}

/// Evaluate `ids` in the order given.
pub fn evaluate_questions<S: AsRef<str>>(
    ids: &[S],
    ctx: &AnswerContext,
    registry: &QuestionRegistry,
) -> Vec<QuestionAnswer> {
    ids.iter()
        .map(|id| evaluate_question(id.as_ref(), ctx, registry))
        .collect()
}

/// Evaluate every canonical id, in canonical order.
pub fn evaluate_all_questions(ctx: &AnswerContext, registry: &QuestionRegistry) -> Vec<QuestionAnswer> {
    evaluate_questions(&canonical_ids(), ctx, registry)
}

// ─── Coverage ───────────────────────────────────────────────────────────────

fn section_name(prefix: char) -> &'static str {
    match prefix {
        'A' => "Core",
        'B' => "Builders",
        'C' => "Governance",
        'D' => "Providers",
        'E' => "Users",
        'F' => "Researchers",
        'G' => "Comparative",
        'H' => "Token",
        'M' => "Onocoy Inputs",
        _ => "Unknown",
    }
}

fn coverage_label(question_id: &str) -> String {
    match question_id.chars().next() {
        Some(prefix) => format!("{} {}", prefix, section_name(prefix)),
        None => "Unknown".to_string(),
    }
}

fn section_summary(section: &str, answers: &[&QuestionAnswer]) -> CoverageSectionSummary {
    let count = |grade: Answerability| answers.iter().filter(|a| a.answerability == grade).count();
    let (y, p, n) = (count(Answerability::Y), count(Answerability::P), count(Answerability::N));
    let questions = answers.len();

    let (direct, practical) = if questions > 0 {
        let q = questions as f64;
        (y as f64 / q * 100.0, (y as f64 + 0.5 * p as f64) / q * 100.0)
    } else {
        (0.0, 0.0)
    };

    CoverageSectionSummary {
        section: section.to_string(),
        questions,
        y,
        p,
        n,
        direct_coverage_pct: direct,
        practical_coverage_pct: practical,
        pass80_practical: practical >= PRACTICAL_PASS_PCT,
    }
}

/// Per-section Y/P/N counts sorted by label, plus the overall total.
pub fn summarize_coverage(answers: &[QuestionAnswer]) -> CoverageSummary {
    let mut buckets: BTreeMap<String, Vec<&QuestionAnswer>> = BTreeMap::new();
    for answer in answers {
        buckets
            .entry(coverage_label(&answer.question_id))
            .or_default()
            .push(answer);
    }

    let by_section = buckets
        .iter()
        .map(|(section, bucket)| section_summary(section, bucket))
        .collect();
    let all: Vec<&QuestionAnswer> = answers.iter().collect();
    let total = section_summary("Total", &all);

    info!(
        questions = total.questions,
        y = total.y,
        p = total.p,
        n = total.n,
        practical_pct = total.practical_coverage_pct,
        "Coverage summarized"
    );

    CoverageSummary { by_section, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::standard_registry;
    use crate::types::{QuestionDefinition, Verdict};

    fn exploding(_ctx: &AnswerContext) -> QuestionAnswer {
        panic!("series index out of range")
    }

    fn graded(id: &str, grade: Answerability) -> QuestionAnswer {
        QuestionAnswer::base(id).graded(grade, Verdict::Yes)
    }

    #[test]
    fn unknown_question_is_not_answerable() {
        let answer = evaluate_question("Z9", &AnswerContext::default(), standard_registry());
        assert_eq!(answer.answerability, Answerability::N);
        assert_eq!(answer.verdict, Verdict::InsufficientData);
        assert_eq!(answer.summary, "Question Z9 is not registered.");
        assert_eq!(answer.window, "N/A");
        assert_eq!(answer.confidence, 0.0);
    }

    #[test]
    fn evaluator_panic_is_contained() {
        let mut registry = QuestionRegistry::standard();
        registry.insert(QuestionDefinition::new("A1", Some(exploding)));

        let answers = evaluate_questions(&["A1", "A2"], &AnswerContext::default(), &registry);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].answerability, Answerability::N);
        assert_eq!(answers[0].summary, "Evaluator failed for A1: series index out of range");
        assert!(!answers[0].reproducible);
        assert_eq!(answers[1].question_id, "A2");
    }

    #[test]
    fn evaluate_all_keeps_canonical_order() {
        let answers = evaluate_all_questions(&AnswerContext::default(), standard_registry());
        assert_eq!(answers.len(), 103);
        let ids: Vec<&str> = answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, canonical_ids());
    }

    #[test]
    fn coverage_counts_half_credit_for_partial() {
        let answers = vec![
            graded("A1", Answerability::Y),
            graded("A2", Answerability::P),
            graded("B1", Answerability::Y),
            graded("M1", Answerability::N),
        ];
        let summary = summarize_coverage(&answers);

        let labels: Vec<&str> = summary.by_section.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(labels, vec!["A Core", "B Builders", "M Onocoy Inputs"]);

        let core = &summary.by_section[0];
        assert_eq!((core.y, core.p, core.n), (1, 1, 0));
        assert!((core.direct_coverage_pct - 50.0).abs() < 1e-9);
        assert!((core.practical_coverage_pct - 75.0).abs() < 1e-9);
        assert!(!core.pass80_practical);

        assert_eq!(summary.total.questions, 4);
        assert!((summary.total.practical_coverage_pct - 62.5).abs() < 1e-9);
    }

    #[test]
    fn empty_answers_summarize_to_zero() {
        let summary = summarize_coverage(&[]);
        assert!(summary.by_section.is_empty());
        assert_eq!(summary.total.questions, 0);
        assert_eq!(summary.total.practical_coverage_pct, 0.0);
    }

    #[test]
    fn unknown_prefix_lands_in_unknown_bucket() {
        let summary = summarize_coverage(&[graded("Q1", Answerability::Y)]);
        assert_eq!(summary.by_section[0].section, "Q Unknown");
    }
}
