// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet log routes.
//!
//! Both endpoints are public and take the user id explicitly: the write
//! names its user in the body rather than using the session. This matches
//! the client contract this API serves; tightening it would break the diet
//! screens.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::DietEntry;
use crate::routes::{AppJson, MessageResponse};
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/diet/entry", post(add_entry))
        .route("/api/diet/entries/{user_id}", get(list_entries))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DietEntryRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "meal_type must not be empty"))]
    pub meal_type: String,
    #[validate(length(min = 1, message = "food must not be empty"))]
    pub food: String,
}

/// Append a diet entry to the named user's log.
async fn add_entry(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<DietEntryRequest>,
) -> Result<Json<MessageResponse>> {
    body.validate()?;

    let mut profile = state
        .db
        .get_user(&body.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", body.user_id)))?;

    profile.diet_entries.push(DietEntry {
        recorded_at: now_rfc3339(),
        meal_type: body.meal_type,
        food: body.food,
    });
    state.db.save_user(&profile).await?;

    Ok(Json(MessageResponse {
        message: "Diet entry added successfully".to_string(),
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct DietEntriesResponse {
    pub diet_entries: Vec<DietEntry>,
}

/// List all diet entries for a user, oldest first (append order).
async fn list_entries(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<DietEntriesResponse>> {
    let profile = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(DietEntriesResponse {
        diet_entries: profile.diet_entries,
    }))
}
