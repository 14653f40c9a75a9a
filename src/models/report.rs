// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Health report model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::now_rfc3339;

/// A point-in-time health report stored in Firestore.
///
/// Every metric is optional; the server stores whatever subset the client
/// submitted and never computes or edits a report after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct Report {
    /// Server-generated UUID (also used as document ID)
    pub report_id: String,
    /// Owning user's ID
    pub user_id: String,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Body temperature in degrees C
    #[serde(default)]
    pub body_temperature: Option<f64>,
    /// Heart rate in bpm
    #[serde(default)]
    pub heart_rate: Option<f64>,
    /// Free text, e.g. "120/80"
    #[serde(default)]
    pub blood_pressure: Option<String>,
    /// Percentage, e.g. 98
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,
    /// mg/dL
    #[serde(default)]
    pub blood_sugar: Option<f64>,
    /// Liters
    #[serde(default)]
    pub water_intake: Option<f64>,
    /// Free text
    #[serde(default)]
    pub meal_times: Option<String>,
    #[serde(default)]
    pub calorie_intake: Option<f64>,
    /// Free text for carbs/protein/fats
    #[serde(default)]
    pub macronutrients: Option<String>,
    #[serde(default)]
    pub exercise_minutes: Option<f64>,
    #[serde(default)]
    pub step_count: Option<f64>,
    /// Hours
    #[serde(default)]
    pub sleep_duration: Option<f64>,
    /// Free text, e.g. "Good"
    #[serde(default)]
    pub sleep_quality: Option<String>,
    #[serde(default)]
    pub workout_type: Option<String>,
    /// Free text, e.g. "Happy"
    #[serde(default)]
    pub mood_level: Option<String>,
    /// Free text, e.g. "Low"
    #[serde(default)]
    pub stress_level: Option<String>,
    /// Caller-supplied analysis text, stored verbatim
    #[serde(default)]
    pub ai_analysis: Option<String>,
    /// When the report was created (RFC3339)
    pub created_at: String,
}

/// The metric payload of a report as submitted by a client.
///
/// Kept separate from [`Report`] so the storage type can carry the id,
/// owner, and timestamp the server assigns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetrics {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub body_temperature: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,
    #[serde(default)]
    pub blood_sugar: Option<f64>,
    #[serde(default)]
    pub water_intake: Option<f64>,
    #[serde(default)]
    pub meal_times: Option<String>,
    #[serde(default)]
    pub calorie_intake: Option<f64>,
    #[serde(default)]
    pub macronutrients: Option<String>,
    #[serde(default)]
    pub exercise_minutes: Option<f64>,
    #[serde(default)]
    pub step_count: Option<f64>,
    #[serde(default)]
    pub sleep_duration: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Option<String>,
    #[serde(default)]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub mood_level: Option<String>,
    #[serde(default)]
    pub stress_level: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
}

impl Report {
    /// Build a report for `user_id` from submitted metrics, assigning the id
    /// and timestamp.
    pub fn new(user_id: String, metrics: ReportMetrics) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            user_id,
            weight: metrics.weight,
            height: metrics.height,
            body_temperature: metrics.body_temperature,
            heart_rate: metrics.heart_rate,
            blood_pressure: metrics.blood_pressure,
            oxygen_saturation: metrics.oxygen_saturation,
            blood_sugar: metrics.blood_sugar,
            water_intake: metrics.water_intake,
            meal_times: metrics.meal_times,
            calorie_intake: metrics.calorie_intake,
            macronutrients: metrics.macronutrients,
            exercise_minutes: metrics.exercise_minutes,
            step_count: metrics.step_count,
            sleep_duration: metrics.sleep_duration,
            sleep_quality: metrics.sleep_quality,
            workout_type: metrics.workout_type,
            mood_level: metrics.mood_level,
            stress_level: metrics.stress_level,
            ai_analysis: metrics.ai_analysis,
            created_at: now_rfc3339(),
        }
    }
}
