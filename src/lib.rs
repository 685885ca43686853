// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics ("The Checklist")

pub mod answer;
pub mod engine;
pub mod error;
pub mod evaluators;
pub mod format;
pub mod guardrails;
pub mod metrics;
pub mod prompts;
pub mod registry;
pub mod report;
pub mod snapshots;
pub mod types;
pub mod validation;

pub use engine::{
    evaluate_all_questions, evaluate_question, evaluate_questions, summarize_coverage, CoverageSectionSummary,
    CoverageSummary,
};
pub use error::{DiagnosticError, Result};
pub use registry::{canonical_ids, is_known_gap_question, standard_registry, QuestionRegistry};
pub use report::{AcceptanceReport, PromotionPolicy};
pub use types::*;
pub use validation::{validate_registry_coverage, RegistryCoverage};

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

fn bridge_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&DiagnosticError::Wasm(err.to_string()).to_string())
}

fn context_from_js(context: JsValue) -> std::result::Result<AnswerContext, JsValue> {
    serde_wasm_bindgen::from_value(context).map_err(bridge_error)
}

/// Answer every canonical question for a serialized `AnswerContext`.
#[wasm_bindgen]
pub fn evaluate_all(context: JsValue) -> std::result::Result<JsValue, JsValue> {
    install_panic_hook();
    let ctx = context_from_js(context)?;
    let answers = evaluate_all_questions(&ctx, standard_registry());
    Ok(serde_wasm_bindgen::to_value(&answers).unwrap_or(JsValue::NULL))
}

#[wasm_bindgen]
pub fn evaluate_one(question_id: &str, context: JsValue) -> std::result::Result<JsValue, JsValue> {
    install_panic_hook();
    let ctx = context_from_js(context)?;
    let answer = evaluate_question(question_id, &ctx, standard_registry());
    Ok(serde_wasm_bindgen::to_value(&answer).unwrap_or(JsValue::NULL))
}

#[wasm_bindgen]
pub fn coverage_summary(answers: JsValue) -> std::result::Result<JsValue, JsValue> {
    let answers: Vec<QuestionAnswer> = serde_wasm_bindgen::from_value(answers).map_err(bridge_error)?;
    Ok(serde_wasm_bindgen::to_value(&summarize_coverage(&answers)).unwrap_or(JsValue::NULL))
}

#[wasm_bindgen]
pub fn registry_coverage() -> JsValue {
    serde_wasm_bindgen::to_value(&validate_registry_coverage(standard_registry())).unwrap_or(JsValue::NULL)
}

/// Id, section, stakeholder, prompt and implementation state per question.
#[wasm_bindgen]
pub fn question_catalogue() -> JsValue {
    serde_wasm_bindgen::to_value(&standard_registry().catalogue()).unwrap_or(JsValue::NULL)
}
