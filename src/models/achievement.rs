//! Achievements and the shared input for image-bearing content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::FilePart;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Title, description and image, as posted by the dashboard forms
///
/// The image is required on create and optional on update.
#[derive(Debug, Clone, Default)]
pub struct ImageContentInput {
    pub title: String,
    pub description: String,
    pub image: Option<FilePart>,
}
