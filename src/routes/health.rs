// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health metric routes: BMI snapshot, weekly series, calorie log.

use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::session::SessionUser;
use crate::models::{CalorieRecord, User};
use crate::routes::AppJson;
use crate::time_utils::now_rfc3339;
use crate::AppState;

/// All health metric routes require a session; the middleware is applied in
/// routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health/bmi", post(update_bmi))
        .route("/api/health/heartrate", post(update_heart_rate))
        .route("/api/health/steps", post(update_steps))
        .route("/api/health/cals", post(append_calories))
}

async fn load_user(state: &AppState, user_id: &str) -> Result<User> {
    state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

// ─── BMI Snapshot ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub age: Option<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct BmiResponse {
    pub message: String,
    pub latest_bmi: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<f64>,
}

/// Replace the user's latest BMI snapshot.
///
/// Every submission overwrites all four `latest_*` fields: a partial body
/// nulls whatever it leaves out. BMI itself is only computed when height and
/// weight are both present and positive.
async fn update_bmi(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    AppJson(body): AppJson<BmiRequest>,
) -> Result<Json<BmiResponse>> {
    let mut profile = load_user(&state, &user.user_id).await?;

    // Zero or negative measurements cannot yield a meaningful BMI; they are
    // stored as absent, the same as a missing field.
    let height = body.height.filter(|v| *v > 0.0);
    let weight = body.weight.filter(|v| *v > 0.0);
    let age = body.age.filter(|v| *v > 0.0);

    let bmi = match (height, weight) {
        (Some(h), Some(w)) => Some(compute_bmi(h, w)),
        _ => None,
    };

    profile.latest_bmi = bmi;
    profile.latest_height = height;
    profile.latest_weight = weight;
    profile.latest_age = age;
    state.db.save_user(&profile).await?;

    tracing::debug!(user_id = %user.user_id, bmi = ?bmi, "BMI snapshot replaced");

    Ok(Json(BmiResponse {
        message: "Latest BMI data updated successfully".to_string(),
        latest_bmi: profile.latest_bmi,
        height: profile.latest_height,
        weight: profile.latest_weight,
        age: profile.latest_age,
    }))
}

/// BMI = kg / m², rounded to 2 decimals.
fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─── Weekly Series ───────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct HeartRateWeekRequest {
    #[validate(length(equal = 7, message = "heart_rate_week must contain exactly 7 values"))]
    pub heart_rate_week: Vec<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct HeartRateWeekResponse {
    pub message: String,
    pub heart_rate_week: Vec<f64>,
}

/// Replace the stored heart rate week wholesale.
///
/// The shape check runs before any store access, so a bad submission
/// provably mutates nothing.
async fn update_heart_rate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    AppJson(body): AppJson<HeartRateWeekRequest>,
) -> Result<Json<HeartRateWeekResponse>> {
    body.validate()?;

    let mut profile = load_user(&state, &user.user_id).await?;
    profile.heart_rate_week = body.heart_rate_week;
    state.db.save_user(&profile).await?;

    Ok(Json(HeartRateWeekResponse {
        message: "Heart rate updated successfully".to_string(),
        heart_rate_week: profile.heart_rate_week,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct StepsWeekRequest {
    #[validate(length(equal = 7, message = "steps_week must contain exactly 7 values"))]
    pub steps_week: Vec<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct StepsWeekResponse {
    pub message: String,
    pub steps_week: Vec<f64>,
}

/// Replace the stored steps week wholesale.
async fn update_steps(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    AppJson(body): AppJson<StepsWeekRequest>,
) -> Result<Json<StepsWeekResponse>> {
    body.validate()?;

    let mut profile = load_user(&state, &user.user_id).await?;
    profile.steps_week = body.steps_week;
    state.db.save_user(&profile).await?;

    Ok(Json(StepsWeekResponse {
        message: "Steps updated successfully".to_string(),
        steps_week: profile.steps_week,
    }))
}

// ─── Calorie Log ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CalorieRequest {
    /// Missing fields default to 0.0; a non-numeric value is rejected as a
    /// malformed body rather than coerced.
    #[serde(default)]
    pub burned: Option<f64>,
    #[serde(default)]
    pub consumed: Option<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct CalorieResponse {
    pub message: String,
    pub calorie_records: Vec<CalorieRecord>,
}

/// Append one calorie record and return the full log.
async fn append_calories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    AppJson(body): AppJson<CalorieRequest>,
) -> Result<Json<CalorieResponse>> {
    let mut profile = load_user(&state, &user.user_id).await?;

    profile.calorie_records.push(CalorieRecord {
        recorded_at: now_rfc3339(),
        burned: body.burned.unwrap_or(0.0),
        consumed: body.consumed.unwrap_or(0.0),
    });
    state.db.save_user(&profile).await?;

    Ok(Json(CalorieResponse {
        message: "Calorie record added successfully".to_string(),
        calorie_records: profile.calorie_records,
    }))
}
