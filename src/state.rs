// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! Every collaborator is injected explicitly at construction; there is no
//! runtime service lookup. The token service's signing key is the only
//! process-wide mutable-at-startup state, and it is immutable once the
//! state is built.

use std::sync::Arc;

use crate::auth::middleware::RoutePolicy;
use crate::auth::{AuthError, AuthenticationManager, PasswordHasher, TokenService};
use crate::directory::{InMemoryUserDirectory, UserDirectory};
use crate::embeddings::{EmbeddingGenerator, HashEmbedder};
use crate::store::{InMemoryPostStore, PostStore};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectory>,
    pub posts: Arc<dyn PostStore>,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordHasher,
    pub auth: Arc<AuthenticationManager>,
    pub embedder: Arc<dyn EmbeddingGenerator>,
    pub policy: Arc<RoutePolicy>,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        posts: Arc<dyn PostStore>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
        embedder: Arc<dyn EmbeddingGenerator>,
        policy: Arc<RoutePolicy>,
    ) -> Self {
        let auth = Arc::new(AuthenticationManager::new(
            directory.clone(),
            tokens.clone(),
            hasher.clone(),
        ));
        Self {
            directory,
            posts,
            tokens,
            hasher,
            auth,
            embedder,
            policy,
        }
    }

    /// Fully in-memory state with a freshly generated signing key.
    pub fn in_memory() -> Result<Self, AuthError> {
        Ok(Self::new(
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(InMemoryPostStore::new()),
            Arc::new(TokenService::new()?),
            PasswordHasher::new(),
            Arc::new(HashEmbedder::new()),
            Arc::new(RoutePolicy::default()),
        ))
    }
}
