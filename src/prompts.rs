// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Question Prompts

/// Stakeholder-facing prompt for every canonical question, in id order.
pub const PROMPTS: &[(&str, &str)] = &[
    (
        "A1",
        "What regime are we currently in (baseline, demand stress, liquidity stress, competitive yield stress, cost inflation stress)?",
    ),
    ("A2", "Which metrics are currently off baseline, and by how much?"),
    ("A3", "Which failure mode is emerging right now?"),
    ("A4", "Is provider retention stable or degrading?"),
    ("A5", "Is service continuity stable or degrading?"),
    ("A6", "Is incentive solvency improving or worsening (burn-to-mint direction)?"),
    ("A7", "Are we currently subsidy-dependent?"),
    ("A8", "Are current rewards aligned with realized demand?"),
    ("A9", "Are stress effects immediate or lagged (especially price shock vs churn vs capacity)?"),
    ("A10", "Are we near any critical thresholds (alert states)?"),
    ("A11", "Which leading indicators changed first?"),
    ("A12", "What changed this week vs last week vs baseline?"),
    ("B1", "Are emissions too rigid relative to demand?"),
    ("B2", "How tightly do rewards track usage?"),
    ("B3", "Under demand contraction, how fast does burn-to-emission deteriorate?"),
    ("B4", "Which parameter has highest sensitivity on churn?"),
    ("B5", "Which parameter has highest sensitivity on solvency?"),
    ("B6", "What is the minimum provider margin needed to avoid churn acceleration?"),
    ("B7", "Which provider tiers fail first under cost inflation?"),
    ("B8", "How much liquidity depth is needed to prevent severe reward compression after unlock?"),
    ("B9", "How long is the lag from price shock to churn?"),
    ("B10", "How long is the lag from churn to capacity loss?"),
    ("B11", "What happens if beta/bonus rewards are extended 4, 8, or 12 weeks?"),
    ("B12", "What is the probability of death-spiral conditions under each scenario?"),
    ("B13", "What if burn fraction or emission decay is changed?"),
    ("B14", "Do differentiated incentives by commitment tier improve retention quality?"),
    ("B15", "Are we optimizing peak returns or downside resilience?"),
    ("B16", "Which design changes improve robustness without overfitting one scenario?"),
    ("B17", "Which failure mode is currently most likely if no intervention is made?"),
    ("B18", "Did a proposed parameter change improve robustness across scenarios, not just one?"),
    (
        "C1",
        "Which stress-response archetype are we currently exhibiting (Subsidy Inertia, Overfitting, Re-targeting, Narrative Pivot, Emergency Centralization)?",
    ),
    ("C2", "Are governance decisions widening the subsidy gap?"),
    ("C3", "Are temporary reward boosts creating short-lived retention and long-term fragility?"),
    ("C4", "Are we rewarding economically valuable output or just participation volume?"),
    ("C5", "Is provider margin deterioration a leading warning signal right now?"),
    ("C6", "How many providers are near/below breakeven?"),
    ("C7", "Is ONO price sensitivity translating into delayed churn risk?"),
    ("C8", "Are we over-relying on narrative versus structural parameter change?"),
    ("C9", "Are we drifting toward emergency centralization to maintain coverage?"),
    ("C10", "Does current policy protect high-commitment providers better than mercenary supply?"),
    ("C11", "What happens if we extend beta/bonus rewards 4, 8, or 12 weeks?"),
    ("C12", "What happens if we increase demand-linking in rewards?"),
    ("C13", "What happens if we adjust burn fraction or emission decay?"),
    ("C14", "Which KPI triggers should force governance review?"),
    ("C15", "Which KPI triggers should force emergency action?"),
    ("C16", "Are capacity metrics masking latent degradation?"),
    ("C17", "Are we improving burn-to-mint trajectory toward solvency?"),
    ("C18", "Are governance interventions reducing fragility or just delaying it?"),
    ("D1", "What is my current expected margin by provider tier?"),
    ("D2", "How sensitive is my profitability to ONO price changes?"),
    ("D3", "At what price/margin level does churn risk become high?"),
    ("D4", "How do my economics compare to alternative networks?"),
    ("D5", "Is reward policy favoring long-term reliable operators?"),
    ("D6", "How do cost shocks affect each provider type?"),
    ("D7", "Are current rewards likely sustainable or temporary subsidy?"),
    ("D8", "What is expected retention trend for my cohort?"),
    ("D9", "Are there early signs that nominal rewards are losing real value?"),
    ("D10", "Are quality/uptime-linked rewards improving my long-term expected return?"),
    ("D11", "Under each stress scenario, when does breakeven break?"),
    ("D12", "Is current participation rational under downside conditions?"),
    ("E1", "Will service continuity remain stable if provider churn rises?"),
    ("E2", "Is capacity still sufficient for expected demand?"),
    ("E3", "Are there signs of latent degradation (capacity at risk despite current uptime)?"),
    ("E4", "Which stress scenarios threaten service quality most?"),
    ("E5", "How resilient is coverage to liquidity events?"),
    ("E6", "How resilient is coverage to provider cost inflation?"),
    ("E7", "Are quality-linked incentives protecting delivered service?"),
    ("E8", "Is the network becoming more or less reliable over time?"),
    ("F1", "Are stress inputs explicitly defined and separated from outcomes?"),
    ("F2", "Are scenario assumptions visible and reproducible?"),
    ("F3", "Are metrics operationally defined and computed consistently?"),
    ("F4", "Can baseline and stress runs be compared on identical axes/time windows?"),
    ("F5", "Is dispersion shown (median, IQR, tails), not just single runs?"),
    ("F6", "Are failure modes mapped to measurable precursor signals?"),
    ("F7", "Are causal claims avoided where only directional evidence exists?"),
    ("F8", "Are non-goals explicit (no price prediction, no success forecasting)?"),
    ("F9", "Are model limitations visible at point of interpretation?"),
    ("F10", "Can results be traced from parameter input to observed outcome?"),
    ("F11", "Are cross-scenario signatures distinguishable and interpretable?"),
    ("F12", "Is comparative robustness emphasized over absolute ranking?"),
    ("F13", "Are archetype diagnostics connected to observable dashboard signals?"),
    ("F14", "Are policy implications framed as considerations, not universal prescriptions?"),
    ("G1", "How does Onocoy profile compare with archetype peers under identical stress?"),
    ("G2", "Which mechanisms are more robust to demand contraction?"),
    ("G3", "Which mechanisms are more robust to liquidity shocks?"),
    ("G4", "Which mechanisms are more robust to competitive yield pressure?"),
    ("G5", "Which mechanisms are more robust to provider cost inflation?"),
    ("G6", "Does sunk-cost friction materially slow churn?"),
    ("G7", "Which failure mode appears earliest by mechanism type?"),
    ("G8", "Is Onocoy's capped-supply profile trading flexibility for anti-dilution resilience?"),
    ("H1", "Is net emission pressure increasing or decreasing?"),
    ("H2", "Is burn-to-mint trending toward or away from solvency?"),
    ("H3", "How severe is unlock-event downside under current liquidity depth?"),
    ("H4", "How much of provider retention is subsidy-supported vs economically viable?"),
    ("H5", "Are price shocks likely to trigger second-order infrastructure attrition?"),
    ("H6", "Which treasury/risk buffers are needed to absorb market dislocation?"),
    ("H7", "Are we diluting to preserve short-term participation?"),
    ("H8", "Are interventions improving long-run solvency or postponing adjustment?"),
    ("H9", "How exposed is network health to token volatility?"),
    ("H10", "Are we approaching conditions consistent with death-spiral probability alerts?"),
    ("M1", "Can we directly measure spoofing detections from the dashboard today?"),
    ("M2", "Can we directly measure slashing-event counts from the dashboard today?"),
    ("M3", "Can we use canonical on-chain/token-plan unlock events instead of scenario proxy unlocks?"),
];

/// Prompt text for `id`, or a generic fallback for ids outside the catalogue.
pub fn prompt_for(id: &str) -> String {
    PROMPTS
        .iter()
        .find(|(known, _)| *known == id)
        .map_or_else(|| format!("Acceptance question {}", id), |(_, prompt)| prompt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_covers_every_question() {
        assert_eq!(PROMPTS.len(), 103);
        assert!(prompt_for("A1").starts_with("What regime are we currently in"));
    }

    #[test]
    fn unknown_ids_get_generic_prompt() {
        assert_eq!(prompt_for("Z9"), "Acceptance question Z9");
    }
}
