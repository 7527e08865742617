// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin authentication: one shared secret, in-memory sessions.
//!
//! The server keeps only a bcrypt hash of the secret. A successful login
//! yields a random session token that stays valid until logout or process
//! exit. Sessions are never written to disk.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// The message returned for every failed password check.
pub const INCORRECT_PASSWORD: &str = "Incorrect password";

/// Lowest bcrypt cost accepted by the bcrypt crate; only for tests and tooling.
pub const MIN_HASH_COST: u32 = 4;

/// Verifies the shared admin secret against its stored hash.
#[derive(Clone)]
pub struct AdminGate {
    password_hash: String,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

impl AdminGate {
    /// Creates a gate from a bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if `password_hash` is not a bcrypt hash.
    pub fn from_hash(password_hash: &str) -> Result<Self, AuthError> {
        let password_hash: &str = password_hash.trim();
        if !password_hash.starts_with("$2") {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Admin password hash is not a bcrypt hash"),
            });
        }
        Ok(Self {
            password_hash: password_hash.to_string(),
        })
    }

    /// Hashes a plain-text secret, e.g. to provision a deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if bcrypt rejects the cost.
    pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
        bcrypt::hash(password, cost).map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to hash password: {e}"),
        })
    }

    /// Checks `password` against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns a generic authentication error on any mismatch, without
    /// revealing anything about the expected secret.
    pub fn verify(&self, password: &str) -> Result<(), AuthError> {
        match bcrypt::verify(password, &self.password_hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::AuthenticationFailed {
                reason: String::from(INCORRECT_PASSWORD),
            }),
            Err(e) => {
                warn!(error = %e, "Admin password hash could not be checked");
                Err(AuthError::AuthenticationFailed {
                    reason: String::from(INCORRECT_PASSWORD),
                })
            }
        }
    }
}

/// The set of live admin sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    tokens: HashSet<String>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `token` belongs to a live session.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nobody is logged in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Authentication service for login, session validation, and logout.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks the password and opens a session.
    ///
    /// # Returns
    ///
    /// The new session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is incorrect.
    pub fn login(
        gate: &AdminGate,
        sessions: &mut SessionRegistry,
        password: &str,
    ) -> Result<String, AuthError> {
        if let Err(e) = gate.verify(password) {
            info!("Rejected admin login");
            return Err(e);
        }

        let session_token: String = Self::generate_session_token();
        sessions.tokens.insert(session_token.clone());
        info!(sessions = sessions.len(), "Admin session opened");

        Ok(session_token)
    }

    /// Validates a session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token does not belong to a live session.
    pub fn validate_session(
        sessions: &SessionRegistry,
        session_token: &str,
    ) -> Result<(), AuthError> {
        if sessions.contains(session_token) {
            debug!("Admin session validated");
            Ok(())
        } else {
            Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })
        }
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the token does not belong to a live session.
    pub fn logout(sessions: &mut SessionRegistry, session_token: &str) -> Result<(), AuthError> {
        if sessions.tokens.remove(session_token) {
            info!(sessions = sessions.len(), "Admin session closed");
            Ok(())
        } else {
            Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })
        }
    }

    /// Generates an unguessable session token.
    fn generate_session_token() -> String {
        format!(
            "session_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }
}
