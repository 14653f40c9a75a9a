// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game score routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::session::SessionUser;
use crate::models::GameScore;
use crate::routes::{AppJson, MessageResponse};
use crate::time_utils::now_rfc3339;
use crate::AppState;

/// Score listing is readable by user id without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/games/scores/{user_id}", get(list_scores))
}

/// Score submission is tied to the logged-in user.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/games/score", post(submit_score))
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// A missing score records as 0.0; a non-numeric value is rejected.
    #[serde(default)]
    pub score: Option<f64>,
}

/// Append a score to the logged-in user's log.
async fn submit_score(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    AppJson(body): AppJson<ScoreRequest>,
) -> Result<Json<MessageResponse>> {
    let mut profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    profile.game_scores.push(GameScore {
        recorded_at: now_rfc3339(),
        score: body.score.unwrap_or(0.0),
    });
    state.db.save_user(&profile).await?;

    Ok(Json(MessageResponse {
        message: "Score added successfully".to_string(),
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct GameScoresResponse {
    pub game_scores: Vec<GameScore>,
}

/// List all scores for a user, oldest first (append order).
async fn list_scores(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<GameScoresResponse>> {
    let profile = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(GameScoresResponse {
        game_scores: profile.game_scores,
    }))
}
