// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Acceptance Report
//
// Flattens an evaluation pass into the acceptance checklist tables:
// one row per canonical question, a per-section coverage roll-up, and the
// rows that are not yet answerable. Tables render as TSV.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::info;

use crate::error::{DiagnosticError, Result};
use crate::format::fixed;
use crate::registry::QuestionRegistry;
use crate::types::{Answerability, QuestionAnswer, Verdict};

pub const ANSWER_COLUMNS: [&str; 16] = [
    "id",
    "section",
    "stakeholder",
    "question",
    "answerable_now",
    "answerable_now_raw",
    "answerability_promotion",
    "dashboard_location",
    "metric_used",
    "time_window",
    "how_derived",
    "owner",
    "gap_note",
    "verdict",
    "confidence",
    "reproducible",
];

pub const COVERAGE_COLUMNS: [&str; 8] = [
    "section",
    "questions",
    "Y",
    "P",
    "N",
    "direct_coverage_pct",
    "practical_coverage_pct",
    "pass_80_practical",
];

/// The answer columns minus the raw grade and promotion reason.
pub const MISSING_COLUMNS: [&str; 14] = [
    "id",
    "section",
    "stakeholder",
    "question",
    "answerable_now",
    "dashboard_location",
    "metric_used",
    "time_window",
    "how_derived",
    "owner",
    "gap_note",
    "verdict",
    "confidence",
    "reproducible",
];

const OWNER: &str = "AutoEvaluator";

// ─── Promotion ──────────────────────────────────────────────────────────────

/// Operational promotion of confident, reproducible `P` answers to `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionPolicy {
    pub enabled: bool,
    pub threshold: Decimal,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: dec!(0.79),
        }
    }
}

impl PromotionPolicy {
    /// Raw grades only.
    pub fn strict() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_threshold(threshold: Decimal) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Operational grade and the reason it differs (or not) from the raw one.
    pub fn promote(&self, answer: &QuestionAnswer) -> (Answerability, String) {
        if !self.enabled {
            return (answer.answerability, "operational_promotion_disabled".to_string());
        }

        let confident = Decimal::from_f64(answer.confidence).is_some_and(|c| c >= self.threshold);
        if answer.answerability == Answerability::P
            && answer.reproducible
            && answer.verdict != Verdict::InsufficientData
            && confident
        {
            return (
                Answerability::Y,
                format!("promoted_from_P_confidence>={:.2}_reproducible", self.threshold.round_dp(2)),
            );
        }

        let reason = if answer.answerability == Answerability::P {
            "remains_P"
        } else {
            "not_applicable"
        };
        (answer.answerability, reason.to_string())
    }
}

// ─── Rows ───────────────────────────────────────────────────────────────────

/// A record addressable by TSV column name.
pub trait TsvRecord {
    fn field(&self, column: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptanceRow {
    pub id: String,
    pub section: String,
    pub stakeholder: String,
    pub question: String,
    pub answerable_now: Answerability,
    pub answerable_now_raw: Answerability,
    pub answerability_promotion: String,
    pub dashboard_location: String,
    pub metric_used: String,
    pub time_window: String,
    pub how_derived: String,
    pub owner: String,
    pub gap_note: String,
    pub verdict: Verdict,
    pub confidence: String,
    pub reproducible: bool,
}

impl AcceptanceRow {
    fn from_answer(
        section: &str,
        stakeholder: &str,
        prompt: &str,
        answer: &QuestionAnswer,
        policy: &PromotionPolicy,
    ) -> Self {
        let (answerable_now, promotion) = policy.promote(answer);
        let refs: Vec<&str> = answer.evidence.iter().map(|e| e.reference.as_str()).collect();
        let metric_ids: Vec<&str> = answer.metrics.iter().map(|m| m.id.as_str()).collect();

        Self {
            id: answer.question_id.clone(),
            section: section.to_string(),
            stakeholder: stakeholder.to_string(),
            question: prompt.to_string(),
            answerable_now,
            answerable_now_raw: answer.answerability,
            answerability_promotion: promotion,
            dashboard_location: refs.join("; "),
            metric_used: metric_ids.join("; "),
            time_window: answer.window.clone(),
            how_derived: answer.summary.clone(),
            owner: OWNER.to_string(),
            gap_note: if answer.answerability == Answerability::Y {
                "None".to_string()
            } else {
                answer.summary.clone()
            },
            verdict: answer.verdict,
            confidence: fixed(answer.confidence, 2),
            reproducible: answer.reproducible,
        }
    }
}

impl TsvRecord for AcceptanceRow {
    fn field(&self, column: &str) -> String {
        match column {
            "id" => self.id.clone(),
            "section" => self.section.clone(),
            "stakeholder" => self.stakeholder.clone(),
            "question" => self.question.clone(),
            "answerable_now" => self.answerable_now.as_str().to_string(),
            "answerable_now_raw" => self.answerable_now_raw.as_str().to_string(),
            "answerability_promotion" => self.answerability_promotion.clone(),
            "dashboard_location" => self.dashboard_location.clone(),
            "metric_used" => self.metric_used.clone(),
            "time_window" => self.time_window.clone(),
            "how_derived" => self.how_derived.clone(),
            "owner" => self.owner.clone(),
            "gap_note" => self.gap_note.clone(),
            "verdict" => self.verdict.as_str().to_string(),
            "confidence" => self.confidence.clone(),
            "reproducible" => self.reproducible.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub section: String,
    pub questions: usize,
    pub y: usize,
    pub p: usize,
    pub n: usize,
    pub direct_coverage_pct: f64,
    pub practical_coverage_pct: f64,
}

impl CoverageRow {
    pub fn passes(&self) -> bool {
        self.practical_coverage_pct >= crate::engine::PRACTICAL_PASS_PCT
    }
}

impl TsvRecord for CoverageRow {
    fn field(&self, column: &str) -> String {
        match column {
            "section" => self.section.clone(),
            "questions" => self.questions.to_string(),
            "Y" => self.y.to_string(),
            "P" => self.p.to_string(),
            "N" => self.n.to_string(),
            "direct_coverage_pct" => fixed(self.direct_coverage_pct, 1),
            "practical_coverage_pct" => fixed(self.practical_coverage_pct, 1),
            "pass_80_practical" => if self.passes() { "PASS" } else { "FAIL" }.to_string(),
            _ => String::new(),
        }
    }
}

/// Input-gap rows are registered under `M` but reported as section `I`.
fn normalize_section(section: &str) -> &str {
    if section == "M Onocoy Inputs" {
        "I Onocoy Inputs"
    } else {
        section
    }
}

/// Coverage by operational grade, grouped per section and sorted by label.
pub fn coverage_rows(rows: &[AcceptanceRow]) -> Vec<CoverageRow> {
    let mut by_section: BTreeMap<&str, [usize; 3]> = BTreeMap::new();
    for row in rows {
        let counts = by_section.entry(normalize_section(&row.section)).or_default();
        match row.answerable_now {
            Answerability::Y => counts[0] += 1,
            Answerability::P => counts[1] += 1,
            Answerability::N => counts[2] += 1,
        }
    }

    by_section
        .into_iter()
        .map(|(section, [y, p, n])| {
            let questions = y + p + n;
            let q = questions.max(1) as f64;
            CoverageRow {
                section: section.to_string(),
                questions,
                y,
                p,
                n,
                direct_coverage_pct: y as f64 / q * 100.0,
                practical_coverage_pct: (y as f64 + 0.5 * p as f64) / q * 100.0,
            }
        })
        .collect()
}

// ─── TSV ────────────────────────────────────────────────────────────────────

fn sanitize(value: &str) -> String {
    value
        .replace('\t', " ")
        .replace("\r\n", " ")
        .replace('\n', " ")
        .trim()
        .to_string()
}

/// Header line, one sanitized line per record, trailing newline.
pub fn render_tsv<R: TsvRecord>(rows: &[R], columns: &[&str]) -> String {
    let mut lines = vec![columns.join("\t")];
    for row in rows {
        let cells: Vec<String> = columns.iter().map(|c| sanitize(&row.field(c))).collect();
        lines.push(cells.join("\t"));
    }
    format!("{}\n", lines.join("\n"))
}

// ─── Report ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeCounts {
    pub y: usize,
    pub p: usize,
    pub n: usize,
}

impl GradeCounts {
    fn tally(grades: impl Iterator<Item = Answerability>) -> Self {
        grades.fold(Self::default(), |mut acc, grade| {
            match grade {
                Answerability::Y => acc.y += 1,
                Answerability::P => acc.p += 1,
                Answerability::N => acc.n += 1,
            }
            acc
        })
    }
}

/// Paths written by [`AcceptanceReport::write_to`], dated copies first.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub answers: PathBuf,
    pub coverage: PathBuf,
    pub missing: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AcceptanceReport {
    pub rows: Vec<AcceptanceRow>,
    pub coverage: Vec<CoverageRow>,
    pub policy: PromotionPolicy,
}

impl AcceptanceReport {
    /// One row per registered id, in registry order. Every registered id
    /// must have an answer.
    pub fn build(
        answers: &[QuestionAnswer],
        registry: &QuestionRegistry,
        policy: PromotionPolicy,
    ) -> Result<Self> {
        let by_id: BTreeMap<&str, &QuestionAnswer> =
            answers.iter().map(|a| (a.question_id.as_str(), a)).collect();

        let rows = registry
            .definitions()
            .map(|definition| {
                let answer = by_id
                    .get(definition.id.as_str())
                    .ok_or_else(|| DiagnosticError::EvaluatorFailed {
                        id: definition.id.clone(),
                        reason: "no answer in evaluation pass".to_string(),
                    })?;
                Ok(AcceptanceRow::from_answer(
                    definition.section,
                    definition.stakeholder,
                    &definition.prompt,
                    answer,
                    &policy,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let coverage = coverage_rows(&rows);
        Ok(Self { rows, coverage, policy })
    }

    pub fn missing(&self) -> Vec<AcceptanceRow> {
        self.rows
            .iter()
            .filter(|row| row.answerable_now != Answerability::Y)
            .cloned()
            .collect()
    }

    pub fn operational_counts(&self) -> GradeCounts {
        GradeCounts::tally(self.rows.iter().map(|row| row.answerable_now))
    }

    pub fn raw_counts(&self) -> GradeCounts {
        GradeCounts::tally(self.rows.iter().map(|row| row.answerable_now_raw))
    }

    pub fn promoted(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.answerable_now_raw == Answerability::P && row.answerable_now == Answerability::Y)
            .count()
    }

    pub fn answers_tsv(&self) -> String {
        render_tsv(&self.rows, &ANSWER_COLUMNS)
    }

    pub fn coverage_tsv(&self) -> String {
        render_tsv(&self.coverage, &COVERAGE_COLUMNS)
    }

    pub fn missing_tsv(&self) -> String {
        render_tsv(&self.missing(), &MISSING_COLUMNS)
    }

    /// Write the three tables tagged with `date_tag`, then refresh the
    /// `_latest` copies.
    pub fn write_to(&self, dir: &Path, date_tag: &str) -> Result<ReportPaths> {
        fs::create_dir_all(dir)?;
        Ok(ReportPaths {
            answers: write_table(dir, "answers_snapshot", date_tag, &self.answers_tsv())?,
            coverage: write_table(dir, "coverage_summary", date_tag, &self.coverage_tsv())?,
            missing: write_table(dir, "missing", date_tag, &self.missing_tsv())?,
        })
    }
}

fn write_table(dir: &Path, name: &str, date_tag: &str, body: &str) -> Result<PathBuf> {
    let dated = dir.join(format!("dashboard_acceptance_{}_{}.tsv", name, date_tag));
    fs::write(&dated, body)?;
    fs::copy(&dated, dir.join(format!("dashboard_acceptance_{}_latest.tsv", name)))?;
    info!(path = %dated.display(), "Wrote acceptance table");
    Ok(dated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{standard_registry, stub_answer};
    use crate::types::{QuestionDefinition, Verdict};

    fn answer(id: &str, grade: Answerability, verdict: Verdict, reproducible: bool, confidence: f64) -> QuestionAnswer {
        QuestionAnswer::base(id)
            .graded(grade, verdict)
            .summary(format!("{} summary", id))
            .reproducible(reproducible)
            .confidence(confidence)
    }

    #[test]
    fn promotion_requires_confidence_and_reproducibility() {
        let policy = PromotionPolicy::default();

        let (grade, reason) = policy.promote(&answer("A1", Answerability::P, Verdict::Yes, true, 0.8));
        assert_eq!(grade, Answerability::Y);
        assert_eq!(reason, "promoted_from_P_confidence>=0.79_reproducible");

        let (grade, reason) = policy.promote(&answer("A2", Answerability::P, Verdict::Yes, false, 0.9));
        assert_eq!((grade, reason.as_str()), (Answerability::P, "remains_P"));

        let (grade, _) = policy.promote(&answer("A3", Answerability::P, Verdict::InsufficientData, true, 0.9));
        assert_eq!(grade, Answerability::P);

        let (grade, _) = policy.promote(&answer("A4", Answerability::P, Verdict::AtRisk, true, 0.78));
        assert_eq!(grade, Answerability::P);

        let (_, reason) = policy.promote(&answer("A5", Answerability::Y, Verdict::Yes, true, 0.9));
        assert_eq!(reason, "not_applicable");
    }

    #[test]
    fn promotion_at_exact_threshold() {
        let (grade, _) = PromotionPolicy::default().promote(&answer("B1", Answerability::P, Verdict::No, true, 0.79));
        assert_eq!(grade, Answerability::Y);

        let (grade, reason) = PromotionPolicy::strict().promote(&answer("B1", Answerability::P, Verdict::No, true, 0.99));
        assert_eq!(grade, Answerability::P);
        assert_eq!(reason, "operational_promotion_disabled");
    }

    #[test]
    fn report_covers_every_canonical_question() {
        let answers: Vec<QuestionAnswer> = crate::registry::canonical_ids()
            .iter()
            .map(|id| stub_answer(id))
            .collect();
        let report = AcceptanceReport::build(&answers, standard_registry(), PromotionPolicy::default())
            .unwrap_or_else(|e| panic!("report failed: {}", e));

        assert_eq!(report.rows.len(), 103);
        assert_eq!(report.coverage.len(), 9);
        let sections: Vec<&str> = report.coverage.iter().map(|row| row.section.as_str()).collect();
        let mut sorted = sections.clone();
        sorted.sort();
        assert_eq!(sections, sorted);
        assert!(sections.contains(&"I Onocoy Inputs"));
        assert_eq!(report.missing().len(), 103);
        assert_eq!(report.raw_counts(), GradeCounts { y: 0, p: 100, n: 3 });
    }

    #[test]
    fn missing_answer_is_an_error() {
        let mut registry = QuestionRegistry::empty();
        registry.insert(QuestionDefinition::new("A1", None));
        assert!(AcceptanceReport::build(&[], &registry, PromotionPolicy::default()).is_err());
    }

    #[test]
    fn tsv_cells_are_sanitized() {
        let mut registry = QuestionRegistry::empty();
        registry.insert(QuestionDefinition::new("A1", None));
        let answers = vec![QuestionAnswer::base("A1")
            .graded(Answerability::Y, Verdict::Yes)
            .summary("line one\nline\ttwo ")
            .panel("Benchmark", "Benchmark view")
            .chart("Sandbox", "Sandbox view")
            .confidence(0.9)];
        let report = AcceptanceReport::build(&answers, &registry, PromotionPolicy::default())
            .unwrap_or_else(|e| panic!("report failed: {}", e));

        let tsv = report.answers_tsv();
        assert!(tsv.ends_with('\n'));
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 16);

        let row = &report.rows[0];
        assert_eq!(row.field("how_derived"), "line one\nline\ttwo ");
        assert_eq!(row.field("gap_note"), "None");
        assert_eq!(row.field("dashboard_location"), "Benchmark; Sandbox");
        assert_eq!(row.field("confidence"), "0.90");
        assert!(lines[1].contains("line one line two\t"));
    }

    #[test]
    fn coverage_rows_render_pass_fail() {
        let rows = vec![CoverageRow {
            section: "A Core".to_string(),
            questions: 12,
            y: 9,
            p: 2,
            n: 1,
            direct_coverage_pct: 75.0,
            practical_coverage_pct: 83.33333,
        }];
        let tsv = render_tsv(&rows, &COVERAGE_COLUMNS);
        assert_eq!(tsv.lines().nth(1), Some("A Core\t12\t9\t2\t1\t75.0\t83.3\tPASS"));
    }
}
