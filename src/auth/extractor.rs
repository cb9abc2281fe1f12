// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated caller.
//!
//! Use the `Auth` extractor in handlers that want the caller identity:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal is the request's Principal
//! }
//! ```
//!
//! The middleware is the sole authenticator; this extractor only reads the
//! `Principal` it attached to the request extensions.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::Principal;
use super::AuthError;

/// Extractor for the request's authenticated principal.
#[derive(Debug)]
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::AuthenticationRequired)
    }
}
