// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the job board API.
//!
//! ## Auth Flow
//!
//! 1. `POST /register` hashes the password (bcrypt) and persists the account
//!    in the user directory
//! 2. `POST /login` verifies the credentials and returns an HS256-signed
//!    bearer token
//! 3. Subsequent requests send `Authorization: Bearer <token>`; the
//!    middleware:
//!    - Verifies the token signature and expiry
//!    - Reloads the account behind the token's `sub` claim
//!    - Attaches a request-scoped [`Principal`] on success
//! 4. The route policy rejects unauthenticated requests on protected routes
//!
//! ## Security
//!
//! - The signing key is generated at startup and never persisted; a restart
//!   invalidates every outstanding token
//! - Claim extraction always verifies the signature first
//! - Login failures are reported identically for unknown usernames and
//!   wrong passwords

pub mod claims;
pub mod error;
pub mod extractor;
pub mod hasher;
pub mod manager;
pub mod middleware;
pub mod token;

pub use claims::{Principal, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use hasher::PasswordHasher;
pub use manager::AuthenticationManager;
pub use token::TokenService;
