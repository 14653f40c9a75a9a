// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Session;
use crate::services::SESSION_COOKIE;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

/// Authenticated user extracted from the session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: String,
    pub session_id: String,
}

/// Middleware that requires a live session.
///
/// Missing cookie, unknown token, and expired session all produce the same
/// 401 so a caller cannot probe which case it hit.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let session = state
        .sessions
        .resolve(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let session_user = SessionUser {
        user_id: session.user_id,
        session_id: session.session_id,
    };
    request.extensions_mut().insert(session_user);

    Ok(next.run(request).await)
}

/// Build the session cookie for a fresh login.
pub fn session_cookie(config: &Config, session: &Session) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.session_id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure())
        .max_age(time::Duration::hours(config.session_ttl_hours))
        .build()
}

/// Build the expired cookie that clears the session on logout.
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure())
        .max_age(time::Duration::ZERO)
        .build()
}
