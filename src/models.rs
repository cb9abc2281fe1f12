// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Accounts**: user records held by the user directory
//! - **Job Postings**: the domain records served by the CRUD/search surface
//!
//! Job postings use camelCase field names on the wire; clients of the
//! original deployment depend on them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Account Models
// =============================================================================

/// A user account as held by the user directory.
///
/// The `password` field carries the bcrypt hash, never the plaintext. The
/// field keeps its legacy name and stays in serialized responses for wire
/// compatibility with existing clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique identifier for this account.
    pub id: String,
    /// Login name, unique across the directory. Compared case-sensitively.
    pub username: String,
    /// bcrypt hash of the account password.
    pub password: String,
}

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired login name.
    pub username: String,
    /// Plaintext password; hashed before the account is persisted.
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

// =============================================================================
// Job Posting Models
// =============================================================================

/// A stored job posting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    /// Unique identifier for this posting.
    pub id: String,
    /// Position title.
    pub job_title: String,
    /// Free-text description of the position.
    pub job_description: String,
    /// Required experience in years.
    pub experience: i32,
    /// Technologies the position requires.
    pub required_techs: Vec<String>,
}

/// Request to create or update a job posting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPostPayload {
    /// Position title.
    pub job_title: String,
    /// Free-text description of the position.
    pub job_description: String,
    /// Required experience in years.
    pub experience: i32,
    /// Technologies the position requires.
    pub required_techs: Vec<String>,
}

impl JobPost {
    /// Materialize a posting from a payload under the given identifier.
    pub fn from_payload(id: impl Into<String>, payload: JobPostPayload) -> Self {
        Self {
            id: id.into(),
            job_title: payload.job_title,
            job_description: payload.job_description,
            experience: payload.experience,
            required_techs: payload.required_techs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_post_serializes_camel_case() {
        let post = JobPost {
            id: "p1".into(),
            job_title: "Backend Engineer".into(),
            job_description: "Build APIs".into(),
            experience: 3,
            required_techs: vec!["Rust".into()],
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["jobTitle"], "Backend Engineer");
        assert_eq!(value["jobDescription"], "Build APIs");
        assert_eq!(value["requiredTechs"][0], "Rust");
    }

    #[test]
    fn from_payload_keeps_id() {
        let payload = JobPostPayload {
            job_title: "SRE".into(),
            job_description: "Keep it running".into(),
            experience: 5,
            required_techs: vec!["Linux".into(), "Kubernetes".into()],
        };

        let post = JobPost::from_payload("fixed-id", payload);
        assert_eq!(post.id, "fixed-id");
        assert_eq!(post.experience, 5);
    }

    #[test]
    fn user_account_round_trips_with_password_field() {
        let account = UserAccount {
            id: "u1".into(),
            username: "bob".into(),
            password: "$2b$12$abcdefghijklmnopqrstuv".into(),
        };

        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["password"], "$2b$12$abcdefghijklmnopqrstuv");

        let back: UserAccount = serde_json::from_value(value).unwrap();
        assert_eq!(back, account);
    }
}
