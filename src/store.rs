// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Job Posting Store
//!
//! Document store and full-text search capability for job postings,
//! consumed by the API layer as a trait. The bundled implementation keeps
//! everything in memory behind a `tokio` RwLock.
//!
//! Search matches query tokens case-insensitively against the job title,
//! the job description, and the required technologies; results come back
//! ordered by required experience, ascending.
//!
//! Embedding vectors produced by the batch job are stored next to the
//! postings, keyed by post id.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{JobPost, JobPostPayload};

/// Errors surfaced by the posting store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("post store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD, search, and embedding persistence for job postings.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All postings, in unspecified order.
    async fn list(&self) -> Result<Vec<JobPost>, StoreError>;

    /// One posting by id.
    async fn get(&self, id: &str) -> Result<Option<JobPost>, StoreError>;

    /// Store a new posting under a fresh id.
    async fn insert(&self, payload: JobPostPayload) -> Result<JobPost, StoreError>;

    /// Store a batch of new postings.
    async fn insert_many(&self, payloads: Vec<JobPostPayload>)
        -> Result<Vec<JobPost>, StoreError>;

    /// Replace the posting under `id`. Returns `None` if it does not exist.
    async fn update(&self, id: &str, payload: JobPostPayload)
        -> Result<Option<JobPost>, StoreError>;

    /// Delete the posting under `id`. Returns whether it existed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Full-text search ordered by experience ascending.
    async fn search(&self, query: &str) -> Result<Vec<JobPost>, StoreError>;

    /// Persist the embedding vector for a posting.
    async fn put_embedding(&self, id: &str, vector: Vec<f32>) -> Result<(), StoreError>;

    /// The stored embedding vector for a posting, if any.
    async fn embedding(&self, id: &str) -> Result<Option<Vec<f32>>, StoreError>;
}

#[derive(Default)]
struct Inner {
    posts: HashMap<String, JobPost>,
    embeddings: HashMap<String, Vec<f32>>,
}

/// In-memory posting store.
#[derive(Default)]
pub struct InMemoryPostStore {
    inner: RwLock<Inner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// True if any query token occurs in the title, description, or tech list.
fn matches(post: &JobPost, query_tokens: &[String]) -> bool {
    let title = post.job_title.to_lowercase();
    let description = post.job_description.to_lowercase();
    let techs: Vec<String> = post
        .required_techs
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

    query_tokens.iter().any(|token| {
        title.contains(token)
            || description.contains(token)
            || techs.iter().any(|tech| tech.contains(token))
    })
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list(&self) -> Result<Vec<JobPost>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<JobPost>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(id).cloned())
    }

    async fn insert(&self, payload: JobPostPayload) -> Result<JobPost, StoreError> {
        let post = JobPost::from_payload(Uuid::new_v4().to_string(), payload);
        let mut inner = self.inner.write().await;
        inner.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn insert_many(
        &self,
        payloads: Vec<JobPostPayload>,
    ) -> Result<Vec<JobPost>, StoreError> {
        let mut inner = self.inner.write().await;
        let mut created = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let post = JobPost::from_payload(Uuid::new_v4().to_string(), payload);
            inner.posts.insert(post.id.clone(), post.clone());
            created.push(post);
        }
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        payload: JobPostPayload,
    ) -> Result<Option<JobPost>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.posts.contains_key(id) {
            return Ok(None);
        }
        let post = JobPost::from_payload(id, payload);
        inner.posts.insert(id.to_string(), post.clone());
        Ok(Some(post))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let existed = inner.posts.remove(id).is_some();
        if existed {
            inner.embeddings.remove(id);
        }
        Ok(existed)
    }

    async fn search(&self, query: &str) -> Result<Vec<JobPost>, StoreError> {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let inner = self.inner.read().await;
        let mut hits: Vec<JobPost> = if tokens.is_empty() {
            Vec::new()
        } else {
            inner
                .posts
                .values()
                .filter(|post| matches(post, &tokens))
                .cloned()
                .collect()
        };
        hits.sort_by_key(|post| post.experience);
        Ok(hits)
    }

    async fn put_embedding(&self, id: &str, vector: Vec<f32>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.embeddings.insert(id.to_string(), vector);
        Ok(())
    }

    async fn embedding(&self, id: &str) -> Result<Option<Vec<f32>>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.embeddings.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, description: &str, experience: i32, techs: &[&str]) -> JobPostPayload {
        JobPostPayload {
            job_title: title.into(),
            job_description: description.into(),
            experience,
            required_techs: techs.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn insert_get_update_delete_cycle() {
        let store = InMemoryPostStore::new();

        let created = store
            .insert(payload("Backend Engineer", "Build APIs", 3, &["Rust"]))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = store
            .update(
                &created.id,
                payload("Senior Backend Engineer", "Own APIs", 5, &["Rust"]),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.experience, 5);

        assert!(store.delete(&created.id).await.unwrap());
        assert!(store.get(&created.id).await.unwrap().is_none());
        assert!(!store.delete(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_of_missing_post_returns_none() {
        let store = InMemoryPostStore::new();
        let result = store
            .update("no-such-id", payload("X", "Y", 1, &[]))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_many_assigns_distinct_ids() {
        let store = InMemoryPostStore::new();
        let created = store
            .insert_many(vec![
                payload("A", "first", 1, &[]),
                payload("B", "second", 2, &[]),
            ])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_covers_title_description_and_techs() {
        let store = InMemoryPostStore::new();
        store
            .insert(payload("Rust Engineer", "Systems work", 4, &["Tokio"]))
            .await
            .unwrap();
        store
            .insert(payload(
                "Data Analyst",
                "Dashboards in rust-adjacent tools",
                2,
                &["SQL"],
            ))
            .await
            .unwrap();
        store
            .insert(payload("Platform Engineer", "Infra", 6, &["Rust", "Kubernetes"]))
            .await
            .unwrap();

        // Case-insensitive, matches across all three fields, sorted by
        // experience ascending.
        let hits = store.search("RUST").await.unwrap();
        let experiences: Vec<i32> = hits.iter().map(|p| p.experience).collect();
        assert_eq!(experiences, vec![2, 4, 6]);

        let tech_hits = store.search("tokio").await.unwrap();
        assert_eq!(tech_hits.len(), 1);
        assert_eq!(tech_hits[0].job_title, "Rust Engineer");
    }

    #[tokio::test]
    async fn search_with_no_match_or_empty_query_is_empty() {
        let store = InMemoryPostStore::new();
        store
            .insert(payload("Rust Engineer", "Systems", 4, &[]))
            .await
            .unwrap();

        assert!(store.search("cobol").await.unwrap().is_empty());
        assert!(store.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn embeddings_are_stored_and_cleared_with_post() {
        let store = InMemoryPostStore::new();
        let post = store
            .insert(payload("Rust Engineer", "Systems", 4, &[]))
            .await
            .unwrap();

        store.put_embedding(&post.id, vec![0.5, 0.5]).await.unwrap();
        assert_eq!(
            store.embedding(&post.id).await.unwrap(),
            Some(vec![0.5, 0.5])
        );

        store.delete(&post.id).await.unwrap();
        assert!(store.embedding(&post.id).await.unwrap().is_none());
    }
}
