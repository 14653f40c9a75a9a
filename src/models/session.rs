// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Server-side session model.

use serde::{Deserialize, Serialize};

/// One login session stored in Firestore.
///
/// The document ID is the opaque session token handed to the client in a
/// cookie; holding the token is the only way to reach the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random token (also used as document ID)
    pub session_id: String,
    /// The logged-in user's ID
    pub user_id: String,
    /// When the session was created (RFC3339)
    pub created_at: String,
    /// When the session stops being honored (RFC3339)
    pub expires_at: String,
}
