// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Error Taxonomy

#[derive(Debug, thiserror::Error)]
pub enum DiagnosticError {
    #[error("question {0} is not registered")]
    UnknownQuestion(String),

    #[error("evaluator failed for {id}: {reason}")]
    EvaluatorFailed { id: String, reason: String },

    #[error("invalid answer context: {0}")]
    InvalidContext(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wasm bridge: {0}")]
    Wasm(String),
}

pub type Result<T> = std::result::Result<T, DiagnosticError>;
