// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Onocoy Input Evaluators (M)
//
// These questions depend on telemetry the simulator does not ingest yet.
// They always answer `N` and name the missing primary input.

use super::Entry;
use crate::types::{AnswerContext, Answerability::*, QuestionAnswer, Verdict::*};

pub(crate) const EVALUATORS: &[Entry] = &[("M1", m1), ("M2", m2), ("M3", m3)];

const PROXY_FALLBACK: &str = "Proxy fallback (missing primary input)";
const HOOK_MISSING_INPUTS: &str = "onocoyHookSnapshot.missingInputs";

/// A question blocked on a primary input stream that is not wired.
struct MissingInput {
    id: &'static str,
    summary: &'static str,
    window: &'static str,
    thresholds: [&'static str; 2],
    required_input: &'static str,
    input_mode: &'static str,
    panel: (&'static str, &'static str),
    metric_ref: (&'static str, &'static str),
}

impl MissingInput {
    fn answer(&self) -> QuestionAnswer {
        QuestionAnswer::base(self.id)
            .graded(N, InsufficientData)
            .summary(self.summary)
            .window(self.window)
            .thresholds(self.thresholds)
            .label_metric("required_input", "Required Input", self.required_input)
            .label_metric("current_input_mode", "Current Input Mode", self.input_mode)
            .panel(self.panel.0, self.panel.1)
            .metric_ref(self.metric_ref.0, self.metric_ref.1)
            .reproducible(false)
            .confidence(0.99)
    }
}

fn m1(_ctx: &AnswerContext) -> QuestionAnswer {
    MissingInput {
        id: "M1",
        summary: "Primary spoofing-detection telemetry is not wired; dashboard currently falls back to proxy-only integrity signals.",
        window: "N/A (primary spoofing telemetry unavailable)",
        thresholds: [
            "Required primary input: spoofingDetections event stream",
            "Current state: integrity proxy with spoofingDetections fallback to zero",
        ],
        required_input: "spoofingDetections",
        input_mode: PROXY_FALLBACK,
        panel: (
            "Sandbox > Onocoy Hook Layer > Integrity Pressure > Missing Primary Inputs",
            "Missing primary spoofing input list",
        ),
        metric_ref: (HOOK_MISSING_INPUTS, "Hook-layer missing input registry"),
    }
    .answer()
}

fn m2(_ctx: &AnswerContext) -> QuestionAnswer {
    MissingInput {
        id: "M2",
        summary: "Primary slashing-event telemetry is not wired; dashboard currently uses proxy-only slashing rate assumptions.",
        window: "N/A (primary slashing telemetry unavailable)",
        thresholds: [
            "Required primary input: slashingEvents event stream",
            "Current state: integrity proxy with slashingEvents fallback to zero",
        ],
        required_input: "slashingEvents",
        input_mode: PROXY_FALLBACK,
        panel: (
            "Sandbox > Onocoy Hook Layer > Integrity Pressure > Missing Primary Inputs",
            "Missing primary slashing input list",
        ),
        metric_ref: (HOOK_MISSING_INPUTS, "Hook-layer missing input registry"),
    }
    .answer()
}

fn m3(_ctx: &AnswerContext) -> QuestionAnswer {
    MissingInput {
        id: "M3",
        summary: "Canonical on-chain/token-plan unlock events are not wired; unlock analysis still uses scenario-proxy curves.",
        window: "N/A (canonical unlock schedule unavailable)",
        thresholds: [
            "Required primary input: canonicalUnlockEvents from vesting/token-plan source",
            "Current state: buildOnocoyUnlockCurve() proxy scaffold",
        ],
        required_input: "canonicalUnlockEvents",
        input_mode: "Scenario proxy unlock curve",
        panel: (
            "Sandbox > Onocoy Hook Layer > Unlock Curve > Missing Primary Inputs",
            "Missing canonical unlock input list",
        ),
        metric_ref: ("onocoyHookSnapshot.unlockSource", "Unlock source mode (proxy vs canonical)"),
    }
    .answer()
}
