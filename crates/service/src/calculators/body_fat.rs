//! Body fat percentage (US Navy style log10 fit) and lean body mass.

use super::{round2, DomainError};

/// Body fat percentage plus lean body mass when a weight was supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFatResult {
    pub body_fat: f64,
    pub lean_body_mass: Option<f64>,
}

/// Estimate body fat from navel and neck circumference and height; weight
/// is optional and only feeds the lean-mass output.
///
/// Requires `navel > neck` and `height > 0`, otherwise the log10 terms
/// leave their domain.
pub fn estimate(
    height: f64,
    navel: f64,
    neck: f64,
    weight: Option<f64>,
) -> Result<BodyFatResult, DomainError> {
    if navel <= neck {
        return Err(DomainError::LogDomain("navel - neck"));
    }
    if height <= 0.0 {
        return Err(DomainError::LogDomain("height"));
    }

    let raw = 495.0 / (1.0324 - 0.19077 * (navel - neck).log10() + 0.15456 * height.log10()) - 450.0;
    // lean mass is derived from the unrounded percentage
    let lean_body_mass = weight.map(|w| round2(w * (1.0 - raw / 100.0)));
    Ok(BodyFatResult { body_fat: round2(raw), lean_body_mass })
}
