// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login orchestration.

use std::sync::Arc;

use tracing::warn;

use crate::directory::{DirectoryError, UserDirectory};

use super::hasher::PasswordHasher;
use super::token::TokenService;
use super::AuthError;

/// Verifies credentials and delegates token issuance.
///
/// Collaborators arrive through the constructor; tests substitute directory
/// doubles and deterministic token services freely.
pub struct AuthenticationManager {
    directory: Arc<dyn UserDirectory>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl AuthenticationManager {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            directory,
            tokens,
            hasher,
        }
    }

    /// Authenticate a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords produce the identical
    /// [`AuthError::CredentialsInvalid`] outcome; the distinction exists
    /// only in server-side logs. Directory outages surface as
    /// [`AuthError::InternalError`], not as an authentication failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let account = match self.directory.find_by_username(username).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                warn!(username, "login attempt for unknown username");
                return Err(AuthError::CredentialsInvalid);
            }
            Err(DirectoryError::Unavailable(msg)) => {
                return Err(AuthError::InternalError(msg));
            }
            Err(e) => {
                return Err(AuthError::InternalError(e.to_string()));
            }
        };

        if !self.hasher.verify(password, &account.password) {
            warn!(username, "login attempt with wrong password");
            return Err(AuthError::CredentialsInvalid);
        }

        self.tokens.issue(&account.username)
    }
}
