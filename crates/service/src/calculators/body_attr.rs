//! Body attractiveness score: ten normalized measurement ratios combined
//! by geometric mean.
//!
//! The ideal ratios and both tolerance constants are calibration values
//! with no derivation behind them; change them here, nowhere else.

use super::{round2, DomainError};

/// Relative tolerance: each ratio sub-score decays to 0 once the measured
/// ratio drifts more than `DIFF_REL * ideal` away from its ideal.
pub const DIFF_REL: f64 = 0.1;

/// Absolute tolerance (cm) for the height falloff outside the ideal band.
pub const DIFF_ABS: f64 = 10.0;

/// Ideal height band (cm); full score anywhere inside.
pub const HEIGHT_LOWER: f64 = 180.5;
pub const HEIGHT_UPPER: f64 = 195.5;

/// The ten body measurements the score is built from, all in cm.
#[derive(Debug, Clone, Copy)]
pub struct Measurements {
    pub height: f64,
    pub wrist: f64,
    pub chest: f64,
    pub biceps: f64,
    pub thigh: f64,
    pub calf: f64,
    pub waist: f64,
    pub neck: f64,
    pub hips: f64,
    pub shoulder: f64,
}

impl Measurements {
    fn all(&self) -> [(&'static str, f64); 10] {
        [
            ("height", self.height),
            ("wrist", self.wrist),
            ("chest", self.chest),
            ("biceps", self.biceps),
            ("thigh", self.thigh),
            ("calf", self.calf),
            ("waist", self.waist),
            ("neck", self.neck),
            ("hips", self.hips),
            ("shoulder", self.shoulder),
        ]
    }
}

/// Triangular falloff around an ideal ratio: 100 when `quant/ref` hits the
/// ideal exactly, linear decay to 0 at the tolerance boundary, 0 beyond it.
pub fn normalize(quant: f64, reference: f64, ideal: f64) -> f64 {
    let diff = DIFF_REL * ideal;
    let deviation = (quant / reference - ideal).abs();
    if deviation < diff {
        (1.0 - deviation / diff) * 100.0
    } else {
        0.0
    }
}

/// Plateau score: 100 inside `[lower, upper]`, linear falloff of width
/// `DIFF_ABS` on either side. Both one-sided branches share the same slope.
pub fn normalize_height(quant: f64, lower: f64, upper: f64) -> f64 {
    if quant < lower {
        if lower - quant < DIFF_ABS {
            return (DIFF_ABS + quant - lower) * 100.0 / DIFF_ABS;
        }
        return 0.0;
    }
    if quant > upper {
        if quant - upper < DIFF_ABS {
            return (DIFF_ABS + upper - quant) * 100.0 / DIFF_ABS;
        }
        return 0.0;
    }
    100.0
}

/// Combined attractiveness score, rounded to 2 decimals.
///
/// Geometric mean of the ten sub-scores; a single zero sub-score zeroes
/// the whole result. All measurements must be strictly positive (ratios
/// divide by them).
pub fn attractiveness(m: &Measurements) -> Result<f64, DomainError> {
    for (name, value) in m.all() {
        if value <= 0.0 {
            return Err(DomainError::NonPositive(name));
        }
    }

    let points = [
        normalize_height(m.height, HEIGHT_LOWER, HEIGHT_UPPER),
        normalize(m.wrist, m.height, 9.0 / 91.0),
        normalize(m.chest, m.wrist, 13.0 / 2.0),
        normalize(m.biceps, m.chest, 0.36),
        normalize(m.thigh, m.chest, 0.53),
        normalize(m.calf, m.chest, 0.34),
        normalize(m.waist, m.chest, 0.70),
        normalize(m.neck, m.chest, 0.37),
        normalize(m.hips, m.chest, 0.85),
        normalize(m.shoulder, m.waist, 1.61803),
    ];
    Ok(round2(geometric_mean(&points)))
}

fn geometric_mean(values: &[f64]) -> f64 {
    // ln(0) would poison the sum; a zero factor makes the product zero anyway.
    if values.iter().any(|v| *v == 0.0) {
        return 0.0;
    }
    let ln_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (ln_sum / values.len() as f64).exp()
}
