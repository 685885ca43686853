// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Answer Construction

use crate::types::{
    AnswerMetric, Answerability, EvidenceKind, EvidenceRef, MetricValue, QuestionAnswer, Verdict,
};

pub const STUB_SUMMARY: &str = "Evaluator is not implemented for this question yet.";

impl QuestionAnswer {
    /// Partial-answerability placeholder every evaluator starts from.
    pub fn base(question_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            answerability: Answerability::P,
            verdict: Verdict::InsufficientData,
            summary: STUB_SUMMARY.to_string(),
            window: "N/A".to_string(),
            thresholds: Vec::new(),
            metrics: Vec::new(),
            evidence: Vec::new(),
            reproducible: false,
            confidence: 0.0,
        }
    }

    /// Non-answerable result used for unknown ids, failures and data gaps.
    pub fn not_answerable(question_id: &str, summary: impl Into<String>) -> Self {
        Self::base(question_id)
            .graded(Answerability::N, Verdict::InsufficientData)
            .summary(summary)
    }

    pub fn graded(mut self, answerability: Answerability, verdict: Verdict) -> Self {
        self.answerability = answerability;
        self.verdict = verdict;
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn window(mut self, window: impl Into<String>) -> Self {
        self.window = window.into();
        self
    }

    pub fn threshold(mut self, threshold: impl Into<String>) -> Self {
        self.thresholds.push(threshold.into());
        self
    }

    pub fn thresholds<I, S>(mut self, thresholds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.thresholds.extend(thresholds.into_iter().map(Into::into));
        self
    }

    pub fn metric(
        mut self,
        id: &str,
        label: &str,
        value: impl Into<MetricValue>,
        unit: &str,
    ) -> Self {
        self.metrics.push(AnswerMetric {
            id: id.to_string(),
            label: label.to_string(),
            value: value.into(),
            unit: Some(unit.to_string()),
        });
        self
    }

    /// Metric without a unit, typically a categorical label.
    pub fn label_metric(mut self, id: &str, label: &str, value: impl Into<MetricValue>) -> Self {
        self.metrics.push(AnswerMetric {
            id: id.to_string(),
            label: label.to_string(),
            value: value.into(),
            unit: None,
        });
        self
    }

    fn evidence(mut self, kind: EvidenceKind, reference: &str, label: &str) -> Self {
        self.evidence.push(EvidenceRef {
            kind,
            reference: reference.to_string(),
            label: label.to_string(),
        });
        self
    }

    pub fn chart(self, reference: &str, label: &str) -> Self {
        self.evidence(EvidenceKind::Chart, reference, label)
    }

    pub fn panel(self, reference: &str, label: &str) -> Self {
        self.evidence(EvidenceKind::Panel, reference, label)
    }

    pub fn table(self, reference: &str, label: &str) -> Self {
        self.evidence(EvidenceKind::Table, reference, label)
    }

    pub fn metric_ref(self, reference: &str, label: &str) -> Self {
        self.evidence(EvidenceKind::Metric, reference, label)
    }

    pub fn reproducible(mut self, reproducible: bool) -> Self {
        self.reproducible = reproducible;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn find_metric(&self, id: &str) -> Option<&AnswerMetric> {
        self.metrics.iter().find(|metric| metric.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_answer_defaults() {
        let answer = QuestionAnswer::base("A1");
        assert_eq!(answer.answerability, Answerability::P);
        assert_eq!(answer.verdict, Verdict::InsufficientData);
        assert_eq!(answer.window, "N/A");
        assert!(!answer.reproducible);
        assert_eq!(answer.confidence, 0.0);
    }

    #[test]
    fn builder_accumulates_metrics_and_evidence() {
        let answer = QuestionAnswer::base("A7")
            .graded(Answerability::Y, Verdict::Yes)
            .metric("solvency_ratio", "Burn-to-Mint Ratio", "0.82", "x")
            .label_metric("regime_label", "Regime", "Baseline")
            .chart("Benchmark/Solvency", "Solvency chart")
            .reproducible(true)
            .confidence(0.9);
        assert_eq!(answer.metrics.len(), 2);
        assert_eq!(answer.evidence.len(), 1);
        assert!(answer.find_metric("regime_label").is_some_and(|m| m.unit.is_none()));
    }

    #[test]
    fn serializes_with_camel_case_ids() {
        let answer = QuestionAnswer::not_answerable("Z9", "Question Z9 is not registered.");
        let json = serde_json::to_value(&answer).unwrap_or_default();
        assert_eq!(json["questionId"], "Z9");
        assert_eq!(json["answerability"], "N");
        assert_eq!(json["verdict"], "insufficient_data");
    }
}
