// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! VitaTrack: session-authenticated health metrics API
//!
//! This crate provides the backend API for the VitaTrack companion app:
//! account registration/login, per-user health metrics (BMI snapshot,
//! weekly heart rate and steps, calorie log), game scores, diet entries,
//! and persisted health reports.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::SessionService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sessions: SessionService,
}
