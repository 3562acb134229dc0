//! Absolute power estimate from body weight and vertical jump height.

use super::{round2, DomainError};

/// `4.341249439 * weight * sqrt(vertical_jump)`, rounded to 2 decimals.
/// A negative jump height is a domain error.
pub fn absolute_power(weight: f64, vertical_jump: f64) -> Result<f64, DomainError> {
    if vertical_jump < 0.0 {
        return Err(DomainError::NegativeSqrt("vertical_jump"));
    }
    Ok(round2(4.341249439 * weight * vertical_jump.sqrt()))
}
