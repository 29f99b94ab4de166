//! Home page feature cards

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// First feature, trimmed for the home page
#[derive(Debug, Clone, Serialize)]
pub struct FeatureHighlight {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: String,
}
