//! User and report records.
//!
//! These are the collaborator-side records around the verification
//! pipeline. Wire shapes use camelCase to preserve the JSON API the
//! existing clients consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user, created through Google sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub google_id: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, name: Option<String>, google_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name,
            google_id: google_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Review state of an incident report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
}

/// An incident report filed by a user, optionally with a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    /// Caller-supplied user reference; not validated against the directory.
    pub user_id: String,
    pub description: String,
    /// Public path under `/uploads` when a photo was attached.
    pub image_url: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(
        user_id: impl Into<String>,
        description: impl Into<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            description: description.into(),
            image_url,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
