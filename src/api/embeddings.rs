// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Batch embedding trigger.

use axum::extract::State;

use crate::embeddings::run_embedding_batch;
use crate::error::ApiError;
use crate::state::AppState;

/// Derive and persist an embedding vector for every stored posting.
///
/// Fire-and-trigger: the batch runs to completion within the request and
/// re-running overwrites previous vectors.
#[utoipa::path(
    get,
    path = "/generate-embeddings",
    tag = "Embeddings",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Batch finished", body = String),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn generate_embeddings(State(state): State<AppState>) -> Result<String, ApiError> {
    run_embedding_batch(state.posts.as_ref(), state.embedder.as_ref()).await?;
    Ok("Embeddings generated and saved successfully!".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::auth::middleware::RoutePolicy;
    use crate::auth::{PasswordHasher, TokenService};
    use crate::directory::InMemoryUserDirectory;
    use crate::embeddings::{HashEmbedder, EMBEDDING_DIM};
    use crate::models::JobPostPayload;
    use crate::store::{InMemoryPostStore, PostStore};

    #[tokio::test]
    async fn trigger_embeds_all_posts() {
        let posts = Arc::new(InMemoryPostStore::new());
        let state = AppState::new(
            Arc::new(InMemoryUserDirectory::new()),
            posts.clone(),
            Arc::new(TokenService::from_secret(b"embeddings-test-secret")),
            PasswordHasher::with_cost(4),
            Arc::new(HashEmbedder::new()),
            Arc::new(RoutePolicy::default()),
        );

        let post = posts
            .insert(JobPostPayload {
                job_title: "Rust Engineer".into(),
                job_description: "Systems".into(),
                experience: 3,
                required_techs: vec!["Tokio".into()],
            })
            .await
            .unwrap();

        let message = generate_embeddings(State(state)).await.unwrap();
        assert_eq!(message, "Embeddings generated and saved successfully!");

        let vector = posts.embedding(&post.id).await.unwrap().unwrap();
        assert_eq!(vector.len(), EMBEDDING_DIM);
    }
}
