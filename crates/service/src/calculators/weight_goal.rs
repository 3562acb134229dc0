//! Daily caloric need for reaching a target weight by a target date.

use super::{round2, DomainError};

/// Validated weight-goal input. Ages are day counts derived from the birth
/// date at the current and the goal date; the formula itself never looks at
/// a clock.
#[derive(Debug, Clone, Copy)]
pub struct WeightGoalInput {
    pub activity_level: f64,
    pub curr_weight: f64,
    pub goal_weight: f64,
    pub curr_height: f64,
    pub pred_height: f64,
    pub curr_age_days: i64,
    pub goal_age_days: i64,
}

/// Daily calories needed to move from the current to the goal weight over
/// `goal_age_days - curr_age_days` days, rounded to 2 decimals.
///
/// A goal date equal to the current date is a domain error, not an
/// infinite result.
pub fn daily_caloric_need(input: WeightGoalInput) -> Result<f64, DomainError> {
    let days_to_goal = input.goal_age_days - input.curr_age_days;
    if days_to_goal == 0 {
        return Err(DomainError::DivisionByZero("days_to_goal"));
    }

    let ages = (input.curr_age_days + input.goal_age_days) as f64;
    let basal = 66.473
        + 6.8758 * (input.curr_weight + input.goal_weight)
        + 2.50165 * (input.curr_height + input.pred_height)
        - 6.755 * 2.0 / 1461.0 * ages;
    let delta = 7716.0 * (input.goal_weight - input.curr_weight) / days_to_goal as f64;
    Ok(round2(input.activity_level * basal + delta))
}
