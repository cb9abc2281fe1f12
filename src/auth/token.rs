// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed bearer-token issuance and validation.
//!
//! Tokens are compact HS256 JWS structures carrying [`TokenClaims`]. The
//! signing key is generated once, in the constructor, before any token
//! operation is possible; every operation afterwards is a read of the
//! immutable key, so concurrent `issue`/`validate` calls need no
//! synchronization. The key is never persisted; a process restart
//! invalidates every outstanding token.
//!
//! There is deliberately no claim-extraction path that skips signature
//! verification: [`TokenService::extract_subject`] runs the same full
//! decode as [`TokenService::validate`].

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};

use super::claims::TokenClaims;
use super::error::AuthError;

/// Issued tokens stay valid for 30 hours.
pub const TOKEN_VALIDITY_HOURS: i64 = 30;

/// Signing key length in bytes (HMAC-SHA-256).
const SIGNING_KEY_LEN: usize = 32;

/// Symmetric signing key in its encoding and decoding forms.
///
/// Read-only for the process lifetime once constructed.
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Generate a fresh random key.
    pub fn generate() -> Result<Self, AuthError> {
        let rng = SystemRandom::new();
        let mut secret = [0u8; SIGNING_KEY_LEN];
        rng.fill(&mut secret)
            .map_err(|_| AuthError::InternalError("signing key generation failed".into()))?;
        Ok(Self::from_secret(&secret))
    }

    /// Build a key from known secret bytes.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and validates signed bearer tokens.
pub struct TokenService {
    key: SigningKey,
    validity: Duration,
}

impl TokenService {
    /// Service with a freshly generated signing key.
    pub fn new() -> Result<Self, AuthError> {
        Ok(Self {
            key: SigningKey::generate()?,
            validity: Duration::hours(TOKEN_VALIDITY_HOURS),
        })
    }

    /// Service with a known secret. Used by tests to get deterministic keys
    /// and to simulate a process restart (two services, two secrets).
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            key: SigningKey::from_secret(secret),
            validity: Duration::hours(TOKEN_VALIDITY_HOURS),
        }
    }

    /// Issue a token for the given username.
    ///
    /// Claims: `sub` = username, `iat` = now, `exp` = now + validity window.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let claims = TokenClaims::new(username, Utc::now(), self.validity);
        encode(&Header::new(Algorithm::HS256), &claims, &self.key.encoding)
            .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))
    }

    /// Validate a token against an expected subject.
    ///
    /// Signature is checked first; invalid signatures and malformed input
    /// fail before any claim is read. On a valid signature the claims must
    /// carry an unexpired `exp` and a `sub` equal (case-sensitively) to
    /// `expected_subject`.
    pub fn validate(&self, token: &str, expected_subject: &str) -> Result<TokenClaims, AuthError> {
        let claims = self.decode(token)?;
        if claims.sub != expected_subject {
            return Err(AuthError::SubjectMismatch);
        }
        Ok(claims)
    }

    /// Extract the subject from a token, verifying the signature on the way.
    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.decode(token)?.sub)
    }

    /// Decode and verify a token, mapping library errors to the auth
    /// taxonomy. Shared by `validate` and `extract_subject` so no call path
    /// can read claims from an unverified token.
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry must be strictly in the future; no clock-skew allowance.
        validation.leeway = 0;
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(token, &self.key.decoding, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    const SECRET: &[u8] = b"test-secret-key-for-token-service";

    fn service() -> TokenService {
        TokenService::from_secret(SECRET)
    }

    /// Flip the first character of the signature segment.
    fn tamper_signature(token: &str) -> String {
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<u8> = sig.bytes().collect();
        sig[0] = if sig[0] == b'A' { b'B' } else { b'A' };
        format!("{head}.{}", String::from_utf8(sig).unwrap())
    }

    #[test]
    fn issued_token_validates_against_its_subject() {
        let tokens = service();
        let token = tokens.issue("bob").unwrap();

        let claims = tokens.validate(&token, "bob").unwrap();
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.exp - claims.iat, TOKEN_VALIDITY_HOURS * 3600);
    }

    #[test]
    fn token_is_compact_jws_with_standard_claims() {
        let tokens = service();
        let token = tokens.issue("bob").unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        let payload = URL_SAFE_NO_PAD.decode(segments[1]).unwrap();
        let claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(claims["sub"], "bob");
        assert!(claims["iat"].is_i64());
        assert!(claims["exp"].is_i64());
    }

    #[test]
    fn validation_against_other_subject_fails() {
        let tokens = service();
        let token = tokens.issue("bob").unwrap();

        assert_eq!(
            tokens.validate(&token, "alice").unwrap_err(),
            AuthError::SubjectMismatch
        );
        // Case-sensitive comparison.
        assert_eq!(
            tokens.validate(&token, "Bob").unwrap_err(),
            AuthError::SubjectMismatch
        );
    }

    #[test]
    fn expired_token_fails_despite_valid_signature_and_subject() {
        let tokens = service();

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "bob".into(),
            iat: now - 7200,
            exp: now - 3600,
            extra: Default::default(),
        };
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(
            tokens.validate(&expired, "bob").unwrap_err(),
            AuthError::TokenExpired
        );
        assert_eq!(
            tokens.extract_subject(&expired).unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[test]
    fn token_signed_with_different_key_fails() {
        // Two services with different secrets model a process restart.
        let before_restart = TokenService::from_secret(b"old-process-secret");
        let after_restart = TokenService::from_secret(b"new-process-secret");

        let token = before_restart.issue("bob").unwrap();
        assert_eq!(
            after_restart.validate(&token, "bob").unwrap_err(),
            AuthError::InvalidSignature
        );
    }

    #[test]
    fn tampered_signature_fails() {
        let tokens = service();
        let token = tokens.issue("bob").unwrap();
        let tampered = tamper_signature(&token);

        assert_eq!(
            tokens.validate(&tampered, "bob").unwrap_err(),
            AuthError::InvalidSignature
        );
        // Subject extraction must not leak claims from a bad signature.
        assert!(tokens.extract_subject(&tampered).is_err());
    }

    #[test]
    fn garbage_input_is_malformed_not_a_panic() {
        let tokens = service();
        assert_eq!(
            tokens.validate("not-a-token", "bob").unwrap_err(),
            AuthError::MalformedToken
        );
        assert_eq!(
            tokens.validate("", "bob").unwrap_err(),
            AuthError::MalformedToken
        );
        assert_eq!(
            tokens.validate("a.b.c", "bob").unwrap_err(),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn generated_keys_differ_between_services() {
        let a = TokenService::new().unwrap();
        let b = TokenService::new().unwrap();

        let token = a.issue("bob").unwrap();
        assert!(a.validate(&token, "bob").is_ok());
        assert!(b.validate(&token, "bob").is_err());
    }
}
