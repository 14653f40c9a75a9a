// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod report;
pub mod session;
pub mod user;

pub use report::{Report, ReportMetrics};
pub use session::Session;
pub use user::{CalorieRecord, DietEntry, GameScore, User};
