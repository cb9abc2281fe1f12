// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Directory
//!
//! The authentication core consumes the user directory as a capability:
//! a lookup-by-username contract with no caching layer, so every lookup
//! goes to the directory. The directory call is an I/O boundary and may
//! suspend for arbitrarily long; callers must not hold locks across it.
//!
//! [`InMemoryUserDirectory`] is the bundled implementation. Components take
//! `Arc<dyn UserDirectory>` at construction, so tests substitute doubles
//! without any runtime container.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::UserAccount;

/// Errors surfaced by the user directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// An account with this username already exists.
    #[error("username '{0}' is already registered")]
    DuplicateUsername(String),

    /// The directory could not be reached.
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

/// Lookup and persistence capability supplied by the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find an account by its exact username. Case-sensitive.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserAccount>, DirectoryError>;

    /// Persist a new account. Fails on duplicate usernames.
    async fn insert(&self, account: UserAccount) -> Result<UserAccount, DirectoryError>;

    /// List every account in the directory.
    async fn list(&self) -> Result<Vec<UserAccount>, DirectoryError>;
}

/// In-memory directory keyed by username.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, DirectoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(username).cloned())
    }

    async fn insert(&self, account: UserAccount) -> Result<UserAccount, DirectoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(DirectoryError::DuplicateUsername(account.username));
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DirectoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().cloned().collect())
    }
}
