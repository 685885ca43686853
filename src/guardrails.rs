// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Guardrail Bands
//
// Health bands shared by every evaluator. Values are fixed per release so
// that two evaluation passes over the same context always agree.

// ─── Payback ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct PaybackGuardrails {
    pub excellent_months: f64,
    pub healthy_max_months: f64,
    pub watchlist_max_months: f64,
    pub extended_horizon_months: f64,
}

pub const PAYBACK: PaybackGuardrails = PaybackGuardrails {
    excellent_months: 12.0,
    healthy_max_months: 24.0,
    watchlist_max_months: 36.0,
    extended_horizon_months: 60.0,
};

// ─── Retention ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct RetentionGuardrails {
    pub benchmark_min_pct: f64,
    pub thesis_min_pct: f64,
}

pub const RETENTION: RetentionGuardrails = RetentionGuardrails {
    benchmark_min_pct: 92.0,
    thesis_min_pct: 70.0,
};

// ─── Solvency ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SolvencyGuardrails {
    pub critical_index: f64,
    pub healthy_index: f64,
    /// Burn-to-mint ratio below which the network is subsidy-dependent.
    pub critical_ratio: f64,
    pub healthy_ratio: f64,
}

pub const SOLVENCY: SolvencyGuardrails = SolvencyGuardrails {
    critical_index: 100.0,
    healthy_index: 130.0,
    critical_ratio: 1.0,
    healthy_ratio: 1.3,
};

// ─── Utilization ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct UtilizationGuardrails {
    pub healthy_min_pct: f64,
    pub watchlist_min_pct: f64,
}

pub const UTILIZATION: UtilizationGuardrails = UtilizationGuardrails {
    healthy_min_pct: 35.0,
    watchlist_min_pct: 20.0,
};

// ─── Churn / Tail Risk ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ChurnGuardrails {
    pub panic_pct_per_week: f64,
}

pub const CHURN: ChurnGuardrails = ChurnGuardrails {
    panic_pct_per_week: 5.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solvency_healthy_above_critical() {
        assert!(SOLVENCY.healthy_ratio > SOLVENCY.critical_ratio);
        assert!(UTILIZATION.healthy_min_pct > UTILIZATION.watchlist_min_pct);
    }
}
