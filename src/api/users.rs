// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: registration, login, account listing, and the
//! authenticated caller's identity.

use axum::{extract::State, Json};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::{Auth, AuthError, Principal},
    error::ApiError,
    models::{LoginRequest, RegisterRequest, UserAccount},
    state::AppState,
};

/// Register a new user.
///
/// The password is bcrypt-hashed before the account is persisted. The
/// response is the stored account, hash included, matching the original
/// deployment's wire behavior.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserAccount),
        (status = 409, description = "Username already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserAccount>, ApiError> {
    let account = UserAccount {
        id: Uuid::new_v4().to_string(),
        username: request.username,
        password: state.hasher.hash(&request.password)?,
    };

    let stored = state.directory.insert(account).await?;
    info!(username = %stored.username, "registered new user");
    Ok(Json(stored))
}

/// Authenticate a user and issue a bearer token.
///
/// Success returns the raw token as a plain-text body. Failure is a generic
/// 401 that never distinguishes unknown users from wrong passwords.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Issued bearer token", body = String),
        (status = 401, description = "Authentication failed"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<String, AuthError> {
    state.auth.login(&request.username, &request.password).await
}

/// List all registered accounts.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All accounts", body = [UserAccount]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_users(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserAccount>>, ApiError> {
    debug!(caller = %principal.username, "listing users");
    Ok(Json(state.directory.list().await?))
}

/// The resolved identity of the caller.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller identity", body = Principal),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn me(Auth(principal): Auth) -> Json<Principal> {
    Json(principal)
}
