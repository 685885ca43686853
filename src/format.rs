// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Value Formatting
//
// Fixed-point rendering for answer metrics. Midpoints round away from zero
// on the decimal expansion of the stored double, so `1.005` renders as
// `1.00` exactly like the dashboard that consumes these strings.

use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value).or_else(|| Decimal::from_f64(value))
}

/// Render `value` with exactly `dp` fractional digits.
pub fn fixed(value: f64, dp: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    match to_decimal(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            let text = format!("{:.*}", dp as usize, rounded.abs());
            // Sign follows the input, so -0.0001 renders "-0.00" and -0.0 renders "0.00".
            if value < 0.0 {
                format!("-{}", text)
            } else {
                text
            }
        }
        None => format!("{:.*}", dp as usize, value),
    }
}

/// Finite values as fixed-point, otherwise `fallback`.
pub fn finite_or(value: f64, dp: u32, fallback: &str) -> String {
    if value.is_finite() {
        fixed(value, dp)
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_matches_dashboard_rounding() {
        assert_eq!(fixed(1.25, 1), "1.3");
        assert_eq!(fixed(-1.25, 1), "-1.3");
        assert_eq!(fixed(0.82, 2), "0.82");
        assert_eq!(fixed(12.0, 0), "12");
    }

    #[test]
    fn fixed_keeps_sign_of_negative_values_rounding_to_zero() {
        assert_eq!(fixed(-0.0001, 2), "-0.00");
        assert_eq!(fixed(-0.004, 2), "-0.00");
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(fixed(0.0001, 2), "0.00");
    }

    #[test]
    fn fixed_renders_sentinels() {
        assert_eq!(fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(fixed(f64::NEG_INFINITY, 1), "-Infinity");
        assert_eq!(fixed(f64::NAN, 1), "NaN");
        assert_eq!(finite_or(f64::INFINITY, 1, ">120"), ">120");
    }
}
