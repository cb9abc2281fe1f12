// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing with bcrypt.
//!
//! Each `hash` call embeds a fresh random salt, so hashing the same
//! plaintext twice yields different strings while `verify` stays correct.

use crate::auth::AuthError;

/// Work factor for bcrypt. Matches the original deployment.
pub const BCRYPT_COST: u32 = 12;

/// One-way password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Hasher at the production work factor.
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Hasher at a custom work factor. Tests use a low cost to stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password with an embedded random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AuthError::InternalError(format!("password hashing failed: {e}")))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Malformed hash strings (corrupted storage) yield `false`, never an
    /// error or panic.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn hash_then_verify_succeeds() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret123").unwrap();
        assert!(hasher.verify("secret123", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret123").unwrap();
        assert!(!hasher.verify("secret124", &hash));
    }

    #[test]
    fn identical_inputs_hash_differently() {
        let hasher = fast_hasher();
        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("secret123", &first));
        assert!(hasher.verify("secret123", &second));
    }

    #[test]
    fn malformed_hash_returns_false() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("secret123", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("secret123", ""));
    }
}
