//! Calculator form boundary.
//!
//! One deserializable struct per calculator. `validate` is the only door
//! into the scoring engine: it enforces positivity, date ordering and the
//! optional-field rules, so malformed input never reaches a formula.

use chrono::NaiveDate;
use serde::Deserialize;

use service::calculators::body_attr::Measurements;
use service::calculators::circ_exp::CircExpInput;
use service::calculators::weight_goal::WeightGoalInput;

use crate::errors::ApiError;

fn positive(name: &str, value: f64) -> Result<(), ApiError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("{name} must be a positive number")))
    }
}

#[derive(Debug, Deserialize)]
pub struct WeightGoalForm {
    pub birth_date: NaiveDate,
    pub at_time: NaiveDate,
    pub act_level: f64,
    pub curr_weight: f64,
    pub goal_weight: f64,
    pub curr_height: f64,
    pub pred_height: f64,
}

impl WeightGoalForm {
    /// `today` comes from the handler so the engine itself stays clock-free.
    pub fn validate(&self, today: NaiveDate) -> Result<WeightGoalInput, ApiError> {
        positive("act_level", self.act_level)?;
        positive("curr_weight", self.curr_weight)?;
        positive("goal_weight", self.goal_weight)?;
        positive("curr_height", self.curr_height)?;
        positive("pred_height", self.pred_height)?;
        if self.birth_date >= today {
            return Err(ApiError::Validation("birth_date must be in the past".into()));
        }
        if self.at_time <= today {
            return Err(ApiError::Validation("at_time must be after today".into()));
        }
        Ok(WeightGoalInput {
            activity_level: self.act_level,
            curr_weight: self.curr_weight,
            goal_weight: self.goal_weight,
            curr_height: self.curr_height,
            pred_height: self.pred_height,
            curr_age_days: (today - self.birth_date).num_days(),
            goal_age_days: (self.at_time - self.birth_date).num_days(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BodyAttrForm {
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

impl BodyAttrForm {
    pub fn validate(&self) -> Result<Measurements, ApiError> {
        let m = Measurements {
            height: self.height,
            wrist: self.wrist,
            chest: self.chest,
            biceps: self.biceps,
            thigh: self.thigh,
            calf: self.calf,
            waist: self.waist,
            neck: self.neck,
            hips: self.hips,
            shoulder: self.shoulder,
        };
        for (name, value) in [
            ("height", m.height),
            ("wrist", m.wrist),
            ("chest", m.chest),
            ("biceps", m.biceps),
            ("thigh", m.thigh),
            ("calf", m.calf),
            ("waist", m.waist),
            ("neck", m.neck),
            ("hips", m.hips),
            ("shoulder", m.shoulder),
        ] {
            positive(name, value)?;
        }
        Ok(m)
    }
}

#[derive(Debug, Deserialize)]
pub struct BodyFatForm {
    pub height: f64,
    pub navel: f64,
    pub neck: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl BodyFatForm {
    pub fn validate(&self) -> Result<(f64, f64, f64, Option<f64>), ApiError> {
        positive("height", self.height)?;
        positive("navel", self.navel)?;
        positive("neck", self.neck)?;
        if self.navel <= self.neck {
            return Err(ApiError::Validation("navel must be larger than neck".into()));
        }
        if let Some(w) = self.weight {
            positive("weight", w)?;
        }
        Ok((self.height, self.navel, self.neck, self.weight))
    }
}

#[derive(Debug, Deserialize)]
pub struct CircExpForm {
    pub init_weight: f64,
    pub init_circ: f64,
    pub goal_weight: f64,
    pub goal_circ: f64,
    pub curr_weight: f64,
}

impl CircExpForm {
    pub fn validate(&self) -> Result<CircExpInput, ApiError> {
        positive("init_weight", self.init_weight)?;
        positive("init_circ", self.init_circ)?;
        positive("goal_weight", self.goal_weight)?;
        positive("goal_circ", self.goal_circ)?;
        positive("curr_weight", self.curr_weight)?;
        if self.goal_weight == self.init_weight {
            return Err(ApiError::Validation(
                "goal_weight must differ from init_weight".into(),
            ));
        }
        Ok(CircExpInput {
            init_weight: self.init_weight,
            init_circ: self.init_circ,
            goal_weight: self.goal_weight,
            goal_circ: self.goal_circ,
            curr_weight: self.curr_weight,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AbsPowerForm {
    pub weight: f64,
    pub vertical_jump: f64,
}

impl AbsPowerForm {
    pub fn validate(&self) -> Result<(f64, f64), ApiError> {
        positive("weight", self.weight)?;
        if !self.vertical_jump.is_finite() || self.vertical_jump < 0.0 {
            return Err(ApiError::Validation("vertical_jump must be zero or positive".into()));
        }
        Ok((self.weight, self.vertical_jump))
    }
}
