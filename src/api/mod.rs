// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP API surface.
//!
//! Route paths mirror the original deployment. Cross-cutting concerns are
//! applied once at the router boundary: request-id generation and
//! propagation, HTTP tracing, CORS, and the authentication middleware with
//! its route policy.

use axum::{
    middleware,
    response::Redirect,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{self, Principal},
    models::{JobPost, JobPostPayload, LoginRequest, RegisterRequest, UserAccount},
    state::AppState,
};

pub mod embeddings;
pub mod health;
pub mod posts;
pub mod users;

/// Redirect the root URL to the Swagger UI.
async fn root_redirect() -> Redirect {
    Redirect::to("/docs")
}

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(root_redirect))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/users", get(users::list_users))
        .route("/me", get(users::me))
        .route("/posts", get(posts::list_posts).post(posts::create_posts))
        .route("/posts/search/{text}", get(posts::search_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/post", post(posts::create_post))
        .route("/post/{id}", delete(posts::delete_post))
        .route("/updatepost/{id}", put(posts::update_post))
        .route("/generate-embeddings", get(embeddings::generate_embeddings))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::authenticate,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::list_users,
        users::me,
        posts::list_posts,
        posts::search_posts,
        posts::get_post,
        posts::create_post,
        posts::create_posts,
        posts::update_post,
        posts::delete_post,
        embeddings::generate_embeddings,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            UserAccount,
            RegisterRequest,
            LoginRequest,
            JobPost,
            JobPostPayload,
            Principal,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Users", description = "Registration, login, and identity"),
        (name = "Posts", description = "Job posting CRUD and search"),
        (name = "Embeddings", description = "Batch embedding generation"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;
