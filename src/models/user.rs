//! User model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::now_rfc3339;

/// Number of slots in the weekly metric arrays (Monday..Sunday).
pub const WEEK_SLOTS: usize = 7;

/// User document stored in Firestore.
///
/// The password hash is persisted with the document but must never reach an
/// API response; handlers map to a view type that omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Server-generated UUID (also used as document ID)
    pub user_id: String,
    /// Email address, unique across users (checked at registration)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    pub username: String,
    pub gender: String,
    pub age: u32,

    /// Latest BMI snapshot, overwritten wholesale on every BMI submission
    #[serde(default)]
    pub latest_bmi: Option<f64>,
    #[serde(default)]
    pub latest_height: Option<f64>,
    #[serde(default)]
    pub latest_weight: Option<f64>,
    #[serde(default)]
    pub latest_age: Option<f64>,

    /// Heart rate per weekday, always exactly 7 slots, replaced wholesale
    #[serde(default = "default_week")]
    pub heart_rate_week: Vec<f64>,
    /// Steps per weekday, always exactly 7 slots, replaced wholesale
    #[serde(default = "default_week")]
    pub steps_week: Vec<f64>,

    /// Append-only calorie log; entries are never edited or removed
    #[serde(default)]
    pub calorie_records: Vec<CalorieRecord>,
    /// Append-only game score log
    #[serde(default)]
    pub game_scores: Vec<GameScore>,
    /// Append-only diet log
    #[serde(default)]
    pub diet_entries: Vec<DietEntry>,

    /// When the account was created (RFC3339)
    pub created_at: String,
}

/// A week of zeroed metric values, the state of a fresh account.
pub fn default_week() -> Vec<f64> {
    vec![0.0; WEEK_SLOTS]
}

impl User {
    /// Build a fresh user document with a random id and zeroed metrics.
    pub fn new(
        email: String,
        password_hash: String,
        username: String,
        gender: String,
        age: u32,
    ) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            username,
            gender,
            age,
            latest_bmi: None,
            latest_height: None,
            latest_weight: None,
            latest_age: None,
            heart_rate_week: default_week(),
            steps_week: default_week(),
            calorie_records: Vec::new(),
            game_scores: Vec::new(),
            diet_entries: Vec::new(),
            created_at: now_rfc3339(),
        }
    }
}

/// One calorie log entry. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct CalorieRecord {
    /// Server-assigned timestamp (RFC3339)
    pub recorded_at: String,
    pub burned: f64,
    pub consumed: f64,
}

/// One game score log entry. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct GameScore {
    /// Server-assigned timestamp (RFC3339)
    pub recorded_at: String,
    pub score: f64,
}

/// One diet log entry. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct DietEntry {
    /// Server-assigned timestamp (RFC3339)
    pub recorded_at: String,
    pub meal_type: String,
    pub food: String,
}
