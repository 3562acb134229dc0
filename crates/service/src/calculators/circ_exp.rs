//! Circumference extrapolation: predict a circumference at the current
//! weight from an initial and a goal data point via an allometric fit.

use super::{round2, DomainError};

/// Validated circumference-extrapolation input.
#[derive(Debug, Clone, Copy)]
pub struct CircExpInput {
    pub init_weight: f64,
    pub init_circ: f64,
    pub goal_weight: f64,
    pub goal_circ: f64,
    pub curr_weight: f64,
}

/// Expected circumference at the current weight, rounded to 2 decimals.
///
/// Fits the exponent `lda` through the two supplied (weight, circumference)
/// points; all five values must be strictly positive and the two weights
/// distinct, or the logs and the exponent quotient leave their domain.
pub fn extrapolate(input: CircExpInput) -> Result<f64, DomainError> {
    for (name, value) in [
        ("init_weight", input.init_weight),
        ("init_circ", input.init_circ),
        ("goal_weight", input.goal_weight),
        ("goal_circ", input.goal_circ),
        ("curr_weight", input.curr_weight),
    ] {
        if value <= 0.0 {
            return Err(DomainError::LogDomain(name));
        }
    }
    if input.goal_weight == input.init_weight {
        return Err(DomainError::DivisionByZero("goal_weight - init_weight"));
    }

    let lda = (input.goal_circ.ln() - input.init_circ.ln())
        / (input.goal_weight.ln() - input.init_weight.ln());
    Ok(round2(input.init_circ * (input.curr_weight / input.init_weight).powf(lda)))
}
