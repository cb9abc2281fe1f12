// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Embedding Generation
//!
//! Derives fixed-dimension vector embeddings from stored job postings.
//! The generator is a capability trait so deployments can plug in a model
//! service; the bundled [`HashEmbedder`] is a deterministic feature-hashing
//! embedder that needs no external calls.
//!
//! [`run_embedding_batch`] is the fire-and-trigger batch job: it embeds the
//! text of every stored posting and persists the vectors through the post
//! store. No coordination logic; re-running simply overwrites.

use tracing::info;

use crate::models::JobPost;
use crate::store::{PostStore, StoreError};

/// Dimension of produced embedding vectors.
pub const EMBEDDING_DIM: usize = 128;

/// Text-to-vector capability.
pub trait EmbeddingGenerator: Send + Sync {
    /// Embed a text into a fixed-dimension vector.
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Deterministic feature-hashing embedder.
///
/// Each whitespace token is hashed into one of `EMBEDDING_DIM` buckets; the
/// resulting count vector is L2-normalized. Equal texts always produce equal
/// vectors.
#[derive(Debug, Clone, Default)]
pub struct HashEmbedder;

impl HashEmbedder {
    pub fn new() -> Self {
        Self
    }
}

fn bucket(token: &str) -> usize {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    token.hash(&mut hasher);
    (hasher.finish() as usize) % EMBEDDING_DIM
}

impl EmbeddingGenerator for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; EMBEDDING_DIM];
        for token in text.split_whitespace() {
            vector[bucket(&token.to_lowercase())] += 1.0;
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

/// The text a posting is embedded from.
fn embedding_text(post: &JobPost) -> String {
    let mut text = format!("{} {}", post.job_title, post.job_description);
    for tech in &post.required_techs {
        text.push(' ');
        text.push_str(tech);
    }
    text
}

/// Embed every stored posting and persist the vectors.
///
/// Returns the number of postings embedded.
pub async fn run_embedding_batch(
    posts: &dyn PostStore,
    generator: &dyn EmbeddingGenerator,
) -> Result<usize, StoreError> {
    let all = posts.list().await?;
    let count = all.len();

    for post in all {
        let vector = generator.embed(&embedding_text(&post));
        posts.put_embedding(&post.id, vector).await?;
    }

    info!(count, "embedding batch finished");
    Ok(count)
}
