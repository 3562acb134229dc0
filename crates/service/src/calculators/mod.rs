//! Metric Scoring Engine: pure calculator formulas.
//!
//! Every function here is deterministic and side-effect free. Inputs are
//! validated at the form boundary before they get here, but each formula
//! still rejects its own mathematical domain edges explicitly instead of
//! letting NaN or infinity leak into a result.

use thiserror::Error;

pub mod abs_power;
pub mod body_attr;
pub mod body_fat;
pub mod circ_exp;
pub mod weight_goal;

/// A scoring input violates the mathematical domain of its formula.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    #[error("logarithm of a non-positive value: {0}")]
    LogDomain(&'static str),
    #[error("square root of a negative value: {0}")]
    NegativeSqrt(&'static str),
    #[error("value must be strictly positive: {0}")]
    NonPositive(&'static str),
}

/// Round to 2 decimal places for display.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(16.106606138198572), 16.11);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round2(100.0), 100.0);
    }
}
