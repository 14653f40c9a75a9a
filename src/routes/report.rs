// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health report routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::session::SessionUser;
use crate::models::{Report, ReportMetrics};
use crate::routes::AppJson;
use crate::AppState;

/// Report listing is readable by user id without a session. Creation is not:
/// a report is always filed under the logged-in user.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/report/{user_id}", get(list_reports))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/report/generated", post(create_report))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct ReportCreatedResponse {
    pub message: String,
    pub report: Report,
}

/// File a report under the logged-in user.
///
/// The user document is checked first so a session that outlived its account
/// cannot create orphan reports; nothing persists on the 404 path.
async fn create_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    AppJson(metrics): AppJson<ReportMetrics>,
) -> Result<Json<ReportCreatedResponse>> {
    if state.db.get_user(&user.user_id).await?.is_none() {
        tracing::warn!(user_id = %user.user_id, "Report submission for a missing user");
        return Err(AppError::NotFound(format!(
            "User {} not found",
            user.user_id
        )));
    }

    let report = Report::new(user.user_id.clone(), metrics);
    state.db.save_report(&report).await?;

    tracing::info!(
        user_id = %user.user_id,
        report_id = %report.report_id,
        "Report stored"
    );

    Ok(Json(ReportCreatedResponse {
        message: "Report added successfully".to_string(),
        report,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct ReportListResponse {
    pub reports: Vec<Report>,
}

/// List a user's reports, newest first.
async fn list_reports(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ReportListResponse>> {
    if state.db.get_user(&user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }

    let reports = state.db.get_reports_for_user(&user_id).await?;

    Ok(Json(ReportListResponse { reports }))
}
