// Exercises the JS-facing bridge; run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use depin_diagnostics::{
    evaluate_all, evaluate_one, question_catalogue, registry_coverage, AggregateResult, AnswerContext, Metric,
    QuestionAnswer, RegistryCoverage, SimulationParams,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn context_js() -> JsValue {
    let point = AggregateResult::new(1)
        .with(Metric::Price, 1.0)
        .with(Metric::Providers, 1_000.0)
        .with(Metric::SolvencyScore, 1.1);
    let ctx = AnswerContext::new("wasm-run", SimulationParams::default(), vec![point]);
    serde_wasm_bindgen::to_value(&ctx).unwrap()
}

#[wasm_bindgen_test]
fn test_registry_coverage_round_trips() {
    let coverage: RegistryCoverage = serde_wasm_bindgen::from_value(registry_coverage()).unwrap();
    assert!(coverage.valid);
}

#[wasm_bindgen_test]
fn test_catalogue_lists_every_question() {
    let catalogue: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(question_catalogue()).unwrap();
    assert_eq!(catalogue.len(), 103);
}

#[wasm_bindgen_test]
fn test_evaluate_all_from_js() {
    let answers: Vec<QuestionAnswer> = serde_wasm_bindgen::from_value(evaluate_all(context_js()).unwrap()).unwrap();
    assert_eq!(answers.len(), 103);
}

#[wasm_bindgen_test]
fn test_evaluate_one_rejects_malformed_context() {
    assert!(evaluate_one("A1", JsValue::from_str("not a context")).is_err());
}
