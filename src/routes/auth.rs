// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login, logout, and profile routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::session::{removal_cookie, session_cookie, SessionUser};
use crate::models::{CalorieRecord, DietEntry, GameScore, User};
use crate::routes::{AppJson, MessageResponse};
use crate::services::{password, SESSION_COOKIE};
use crate::AppState;

/// Routes that work without a session.
///
/// Logout is here on purpose: destroying a session you no longer hold must
/// not fail with 401.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Routes gated by the session middleware (applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/profile", get(profile))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    pub gender: String,
    pub age: u32,
}

/// Register a new account.
///
/// The email must be unused; the check is a lookup rather than a store
/// constraint, so two racing registrations can both pass it. The losing
/// document is unreachable (login resolves the first match) but the race is
/// accepted rather than closed.
async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    body.validate()?;

    if state.db.find_user_by_email(&body.email).await?.is_some() {
        return Err(AppError::Duplicate(format!(
            "an account already exists for {}",
            body.email
        )));
    }

    let hash = password::hash_password(&body.password, state.config.bcrypt_cost).await?;
    let user = User::new(body.email, hash, body.username, body.gender, body.age);
    state.db.save_user(&user).await?;

    tracing::info!(user_id = %user.user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

// ─── Login / Logout ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log in and bind a session.
///
/// Unknown email reports 404 and a wrong password 400, mirroring the client
/// contract. The session id travels only in the cookie, never in a body.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    let user = state
        .db
        .find_user_by_email(&body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let valid = password::verify_password(&body.password, &user.password_hash).await?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    let session = state.sessions.create(&user.user_id).await?;
    let jar = jar.add(session_cookie(&state.config, &session));

    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged in successfully".to_string(),
        }),
    ))
}

/// Log out: destroy the session document and expire the cookie.
///
/// Succeeds with no cookie present. A store failure during the delete is a
/// 500 so the client knows the session may still be live.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value()).await?;
    }

    let jar = jar.add(removal_cookie(&state.config));

    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

// ─── Profile ─────────────────────────────────────────────────

/// User profile as returned to the client. Mapped from [`User`]; there is
/// deliberately no password hash field here.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct UserView {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub gender: String,
    pub age: u32,
    pub latest_bmi: Option<f64>,
    pub latest_height: Option<f64>,
    pub latest_weight: Option<f64>,
    pub latest_age: Option<f64>,
    pub heart_rate_week: Vec<f64>,
    pub steps_week: Vec<f64>,
    pub calorie_records: Vec<CalorieRecord>,
    pub game_scores: Vec<GameScore>,
    pub diet_entries: Vec<DietEntry>,
    pub created_at: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            username: user.username,
            gender: user.gender,
            age: user.age,
            latest_bmi: user.latest_bmi,
            latest_height: user.latest_height,
            latest_weight: user.latest_weight,
            latest_age: user.latest_age,
            heart_rate_week: user.heart_rate_week,
            steps_week: user.steps_week,
            calorie_records: user.calorie_records,
            game_scores: user.game_scores,
            diet_entries: user.diet_entries,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub user: UserView,
}

/// Get the logged-in user's profile.
async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state.db.get_user(&user.user_id).await?.ok_or_else(|| {
        // A session outliving its user means the account was removed while
        // logged in somewhere.
        tracing::warn!(user_id = %user.user_id, "Session references a missing user");
        AppError::NotFound(format!("User {} not found", user.user_id))
    })?;

    Ok(Json(ProfileResponse {
        user: profile.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_has_no_password_hash() {
        let user = User::new(
            "a@example.com".to_string(),
            "$2b$04$secret-hash".to_string(),
            "alex".to_string(),
            "other".to_string(),
            30,
        );
        let view = UserView::from(user);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@example.com");
        assert_eq!(json["heart_rate_week"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_register_request_validation() {
        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
            username: "alex".to_string(),
            gender: "other".to_string(),
            age: 30,
        };
        assert!(bad_email.validate().is_err());

        let empty_password = RegisterRequest {
            email: "a@example.com".to_string(),
            password: String::new(),
            username: "alex".to_string(),
            gender: "other".to_string(),
            age: 30,
        };
        assert!(empty_password.validate().is_err());

        let ok = RegisterRequest {
            email: "a@example.com".to_string(),
            password: "pw".to_string(),
            username: "alex".to_string(),
            gender: "other".to_string(),
            age: 30,
        };
        assert!(ok.validate().is_ok());
    }
}
