//! Institute history model

use serde::{Deserialize, Serialize};

/// The single history record shown on the About > History page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// Input for editing the history record
#[derive(Debug, Clone, Default)]
pub struct UpdateHistoryInput {
    pub title: String,
    pub description: String,
    /// Replacement image; the current one is kept when absent
    pub image: Option<crate::backend::FilePart>,
}
