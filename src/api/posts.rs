// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job posting endpoints: CRUD and full-text search.
//!
//! Paths mirror the original deployment (`/post` for single-record writes,
//! `/posts` for reads and batch creation, `/updatepost/{id}` for updates).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{JobPost, JobPostPayload},
    state::AppState,
};

/// Retrieve all postings.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All postings", body = [JobPost]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<JobPost>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

/// Full-text search across title, description, and required technologies.
///
/// Results are ordered by required experience, ascending.
#[utoipa::path(
    get,
    path = "/posts/search/{text}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("text" = String, Path, description = "Search text")),
    responses(
        (status = 200, description = "Matching postings", body = [JobPost]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn search_posts(
    Path(text): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPost>>, ApiError> {
    Ok(Json(state.posts.search(&text).await?))
}

/// Retrieve one posting by id.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Posting identifier")),
    responses(
        (status = 200, description = "The posting", body = JobPost),
        (status = 404, description = "No such posting"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn get_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<JobPost>, ApiError> {
    let post = state
        .posts
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(Json(post))
}

/// Create one posting.
#[utoipa::path(
    post,
    path = "/post",
    tag = "Posts",
    security(("bearer" = [])),
    request_body = JobPostPayload,
    responses(
        (status = 201, description = "Created posting", body = JobPost),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<JobPostPayload>,
) -> Result<(StatusCode, Json<JobPost>), ApiError> {
    let post = state.posts.insert(payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Create a batch of postings.
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    security(("bearer" = [])),
    request_body = [JobPostPayload],
    responses(
        (status = 201, description = "Created postings", body = [JobPost]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_posts(
    State(state): State<AppState>,
    Json(payloads): Json<Vec<JobPostPayload>>,
) -> Result<(StatusCode, Json<Vec<JobPost>>), ApiError> {
    let posts = state.posts.insert_many(payloads).await?;
    Ok((StatusCode::CREATED, Json(posts)))
}

/// Update an existing posting. The path id wins over any id in the body.
#[utoipa::path(
    put,
    path = "/updatepost/{id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Posting identifier")),
    request_body = JobPostPayload,
    responses(
        (status = 200, description = "Updated posting", body = JobPost),
        (status = 404, description = "No such posting"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn update_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<JobPostPayload>,
) -> Result<Json<JobPost>, ApiError> {
    let post = state
        .posts
        .update(&id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(Json(post))
}

/// Delete a posting by id.
#[utoipa::path(
    delete,
    path = "/post/{id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Posting identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such posting"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn delete_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if state.posts.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Post not found"))
    }
}
