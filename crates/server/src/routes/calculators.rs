use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use service::auth::domain::Session;
use service::calculators::{
    abs_power as power, body_attr as attr, body_fat as fat, circ_exp as circ,
    weight_goal as goal,
};

use crate::errors::ApiError;
use crate::forms::{AbsPowerForm, BodyAttrForm, BodyFatForm, CircExpForm, WeightGoalForm};

#[derive(Serialize)]
pub struct CalcResult {
    pub result: f64,
}

fn view(title: &str, session: &Session) -> Json<Value> {
    Json(json!({"title": title, "user": session.username}))
}

pub async fn weight_goal_view(Extension(session): Extension<Session>) -> Json<Value> {
    view("Weight Goal Calculator", &session)
}

/// The engine works on day counts; the current date enters here, at the
/// boundary, never inside the formula.
pub async fn weight_goal(
    Json(form): Json<WeightGoalForm>,
) -> Result<Json<CalcResult>, ApiError> {
    let today = Utc::now().date_naive();
    let input = form.validate(today)?;
    let result = goal::daily_caloric_need(input)?;
    Ok(Json(CalcResult { result }))
}

pub async fn body_attr_view(Extension(session): Extension<Session>) -> Json<Value> {
    view("Body Attractiveness Calculator", &session)
}

pub async fn body_attr(Json(form): Json<BodyAttrForm>) -> Result<Json<CalcResult>, ApiError> {
    let measurements = form.validate()?;
    let result = attr::attractiveness(&measurements)?;
    Ok(Json(CalcResult { result }))
}

pub async fn body_fat_view(Extension(session): Extension<Session>) -> Json<Value> {
    view("Body Fat Calculator", &session)
}

pub async fn body_fat(Json(form): Json<BodyFatForm>) -> Result<Json<Value>, ApiError> {
    let (height, navel, neck, weight) = form.validate()?;
    let r = fat::estimate(height, navel, neck, weight)?;
    Ok(Json(json!({
        "body_fat": r.body_fat,
        "lean_body_mass": r.lean_body_mass,
    })))
}

pub async fn circ_exp_view(Extension(session): Extension<Session>) -> Json<Value> {
    view("Circumference Expectation Calculator", &session)
}

pub async fn circ_exp(Json(form): Json<CircExpForm>) -> Result<Json<CalcResult>, ApiError> {
    let input = form.validate()?;
    let result = circ::extrapolate(input)?;
    Ok(Json(CalcResult { result }))
}

pub async fn abs_power_view(Extension(session): Extension<Session>) -> Json<Value> {
    view("Absolute Power Calculator", &session)
}

pub async fn abs_power(Json(form): Json<AbsPowerForm>) -> Result<Json<CalcResult>, ApiError> {
    let (weight, vertical_jump) = form.validate()?;
    let result = power::absolute_power(weight, vertical_jump)?;
    Ok(Json(CalcResult { result }))
}
