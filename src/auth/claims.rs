// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the per-request caller identity.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::UserAccount;

/// Claims carried by every issued token.
///
/// Invariant: `exp` is always strictly after `iat` by the validity window
/// passed to [`TokenClaims::new`]. Immutable once constructed; the only
/// other place these values live is the signed token itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Subject: the username the token was issued for.
    pub sub: String,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,

    /// Extensible claim map, empty by default.
    #[serde(flatten, default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TokenClaims {
    /// Build claims for a subject issued at `issued_at`, expiring after
    /// `validity`.
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            iat,
            exp: iat + validity.num_seconds(),
            extra: HashMap::new(),
        }
    }
}

/// Authenticated caller identity for the duration of one request.
///
/// Resolved from a validated token plus a directory lookup, attached to the
/// request extensions by the middleware, and discarded at request end.
/// Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Principal {
    /// Account identifier from the user directory.
    pub user_id: String,

    /// Username the token was issued for.
    pub username: String,

    /// Token expiration (Unix timestamp, not serialized).
    #[serde(skip)]
    pub expires_at: i64,
}

impl Principal {
    /// Build a principal from the directory account and the validated claims.
    pub fn from_account(account: &UserAccount, claims: &TokenClaims) -> Self {
        Self {
            user_id: account.id.clone(),
            username: account.username.clone(),
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_strictly_after_issuance() {
        let now = Utc::now();
        let claims = TokenClaims::new("bob", now, Duration::hours(30));
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.exp - claims.iat, 30 * 3600);
        assert!(claims.exp > claims.iat);
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn claims_round_trip_without_extra_fields() {
        let claims = TokenClaims::new("bob", Utc::now(), Duration::hours(1));
        let json = serde_json::to_string(&claims).unwrap();
        let back: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn unknown_claims_land_in_extra() {
        let json = r#"{"sub":"bob","iat":1700000000,"exp":1700108000,"tenant":"acme"}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.extra["tenant"], "acme");
    }

    #[test]
    fn principal_from_account_copies_identity() {
        let account = UserAccount {
            id: "u-1".into(),
            username: "bob".into(),
            password: "$2b$12$hash".into(),
        };
        let claims = TokenClaims::new("bob", Utc::now(), Duration::hours(30));

        let principal = Principal::from_account(&account, &claims);
        assert_eq!(principal.user_id, "u-1");
        assert_eq!(principal.username, "bob");
        assert_eq!(principal.expires_at, claims.exp);
    }
}
