// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side session management.
//!
//! Sessions are opaque random tokens stored as documents in the sessions
//! collection; the token in the client's cookie doubles as the document ID,
//! so nothing about the user is derivable from the token itself. Expiry is
//! enforced on read, which means no background sweeper is needed.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::Session;
use crate::time_utils::{format_utc_rfc3339, now_rfc3339, parse_rfc3339};

/// Cookie that carries the session token.
pub const SESSION_COOKIE: &str = "vitatrack_session";

/// Bytes of entropy per session token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Session manager backed by the sessions collection.
#[derive(Clone)]
pub struct SessionService {
    db: FirestoreDb,
    ttl_hours: i64,
}

impl SessionService {
    pub fn new(db: FirestoreDb, ttl_hours: i64) -> Self {
        Self { db, ttl_hours }
    }

    /// Create and persist a session for `user_id`.
    pub async fn create(&self, user_id: &str) -> Result<Session, AppError> {
        let expires = chrono::Utc::now() + chrono::Duration::hours(self.ttl_hours);
        let session = Session {
            session_id: generate_token()?,
            user_id: user_id.to_string(),
            created_at: now_rfc3339(),
            expires_at: format_utc_rfc3339(expires),
        };
        self.db.save_session(&session).await?;
        Ok(session)
    }

    /// Resolve a token to its session, enforcing expiry.
    ///
    /// An expired session is deleted on sight and reported as absent. A
    /// session with an unparseable expiry is treated the same way.
    pub async fn resolve(&self, session_id: &str) -> Result<Option<Session>, AppError> {
        let Some(session) = self.db.get_session(session_id).await? else {
            return Ok(None);
        };

        let expired = match parse_rfc3339(&session.expires_at) {
            Some(expires_at) => expires_at <= chrono::Utc::now(),
            None => true,
        };
        if expired {
            // Best effort; an expired session is unusable whether or not
            // the delete goes through.
            if let Err(e) = self.db.delete_session(session_id).await {
                tracing::warn!(error = %e, "Failed to delete expired session");
            }
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Destroy a session.
    ///
    /// A store failure here surfaces as a session-destroy error so logout
    /// can report it instead of silently leaving the session live.
    pub async fn destroy(&self, session_id: &str) -> Result<(), AppError> {
        self.db
            .delete_session(session_id)
            .await
            .map_err(|e| AppError::SessionDestroy(e.to_string()))
    }
}

/// Generate an opaque URL-safe session token.
fn generate_token() -> Result<String, AppError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
