// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request authentication middleware.
//!
//! Applied once at the router boundary with
//! `axum::middleware::from_fn_with_state`. Each request starts
//! unauthenticated; if a bearer token resolves to a directory account and
//! validates against its own subject, a [`Principal`] is attached to the
//! request extensions. Token problems of any kind leave the request
//! unauthenticated rather than aborting it; rejection is the job of the
//! route policy evaluated afterwards.
//!
//! The one exception is the user directory being unreachable: that is an
//! infrastructure failure and answers 500 immediately, so callers can tell
//! "you are not authorized" apart from "the system is broken".

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::state::AppState;

use super::claims::Principal;
use super::AuthError;

/// Authorization scheme prefix for bearer tokens.
const BEARER_PREFIX: &str = "Bearer ";

// =============================================================================
// Route Policy
// =============================================================================

/// One route-pattern rule.
#[derive(Debug, Clone)]
pub struct PolicyRule {
    /// Path pattern: exact (`/login`) or trailing-wildcard (`/docs/*`,
    /// which also matches `/docs` itself).
    pub pattern: String,
    /// Whether the route requires an authenticated principal.
    pub requires_auth: bool,
}

/// Data-driven route authorization allow-list.
///
/// Evaluated first-match-wins; paths matching no rule require
/// authentication.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<PolicyRule>,
}

impl RoutePolicy {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(pattern, requires_auth)| PolicyRule {
                    pattern: pattern.into(),
                    requires_auth,
                })
                .collect(),
        }
    }

    /// Whether the given request path requires an authenticated principal.
    pub fn requires_auth(&self, path: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| pattern_matches(&rule.pattern, path))
            .map(|rule| rule.requires_auth)
            .unwrap_or(true)
    }
}

impl Default for RoutePolicy {
    /// Registration and login are exempt from authentication; so are the
    /// health probes, the API docs, and the root redirect to them.
    fn default() -> Self {
        Self::new([
            ("/register", false),
            ("/login", false),
            ("/", false),
            ("/health/*", false),
            ("/docs/*", false),
            ("/api-doc/*", false),
        ])
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => path == prefix || path.starts_with(&format!("{prefix}/")),
        None => pattern == path,
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Authentication middleware function.
///
/// Resolves a principal when possible, then enforces the route policy, then
/// passes control downstream.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Skip resolution when an identity is already attached.
    if request.extensions().get::<Principal>().is_none() {
        let resolved = resolve_principal(request.headers(), &state).await;
        match resolved {
            Ok(Some(principal)) => {
                request.extensions_mut().insert(principal);
            }
            Ok(None) => {}
            Err(err) => return err.into_response(),
        }
    }

    if state.policy.requires_auth(request.uri().path())
        && request.extensions().get::<Principal>().is_none()
    {
        return AuthError::AuthenticationRequired.into_response();
    }

    next.run(request).await
}

/// Resolve the caller identity from the `Authorization` header.
///
/// `Ok(None)` covers every token-shaped failure: missing header, wrong
/// scheme, bad signature, malformed structure, expiry, unknown subject.
/// `Err` is reserved for infrastructure failures.
async fn resolve_principal(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Option<Principal>, AuthError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let Ok(header) = header.to_str() else {
        return Ok(None);
    };
    let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
        return Ok(None);
    };
    let token = token.trim();

    // Subject extraction verifies the signature; there is no unverified
    // claim-read path.
    let subject = match state.tokens.extract_subject(token) {
        Ok(subject) => subject,
        Err(AuthError::InternalError(msg)) => return Err(AuthError::InternalError(msg)),
        Err(e) => {
            debug!(error_code = e.error_code(), "bearer token rejected");
            return Ok(None);
        }
    };

    let account = match state.directory.find_by_username(&subject).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            debug!(subject = %subject, "token subject not found in directory");
            return Ok(None);
        }
        Err(e) => return Err(AuthError::InternalError(e.to_string())),
    };

    match state.tokens.validate(token, &account.username) {
        Ok(claims) => Ok(Some(Principal::from_account(&account, &claims))),
        Err(AuthError::InternalError(msg)) => Err(AuthError::InternalError(msg)),
        Err(e) => {
            debug!(error_code = e.error_code(), "bearer token failed validation");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_exempts_registration_and_login() {
        let policy = RoutePolicy::default();
        assert!(!policy.requires_auth("/register"));
        assert!(!policy.requires_auth("/login"));
        assert!(!policy.requires_auth("/"));
    }

    #[test]
    fn default_policy_exempts_health_and_docs_subtrees() {
        let policy = RoutePolicy::default();
        assert!(!policy.requires_auth("/health"));
        assert!(!policy.requires_auth("/health/live"));
        assert!(!policy.requires_auth("/docs"));
        assert!(!policy.requires_auth("/docs/swagger-ui.css"));
        assert!(!policy.requires_auth("/api-doc/openapi.json"));
    }

    #[test]
    fn unmatched_paths_require_auth() {
        let policy = RoutePolicy::default();
        assert!(policy.requires_auth("/posts"));
        assert!(policy.requires_auth("/users"));
        assert!(policy.requires_auth("/generate-embeddings"));
        assert!(policy.requires_auth("/loginx"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = RoutePolicy::new([("/posts/public", false), ("/posts/*", true)]);
        assert!(!policy.requires_auth("/posts/public"));
        assert!(policy.requires_auth("/posts/123"));
    }

    #[test]
    fn wildcard_does_not_match_sibling_prefixes() {
        assert!(pattern_matches("/docs/*", "/docs"));
        assert!(pattern_matches("/docs/*", "/docs/index.html"));
        assert!(!pattern_matches("/docs/*", "/docsx"));
    }
}
