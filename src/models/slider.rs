//! Home page slider model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slide visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideStatus {
    Active,
    Inactive,
    /// Any status the backend invents; never displayed
    #[serde(other)]
    Unknown,
}

impl Default for SlideStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for SlideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for SlideStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(anyhow::anyhow!("Invalid slide status: {}", s)),
        }
    }
}

/// One slide as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderData {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "unknown_status")]
    pub status: SlideStatus,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn unknown_status() -> SlideStatus {
    SlideStatus::Unknown
}

impl SliderData {
    pub fn is_active(&self) -> bool {
        self.status == SlideStatus::Active
    }
}

/// Dashboard input for creating or editing a slide
#[derive(Debug, Clone, Default)]
pub struct SlideInput {
    pub status: Option<SlideStatus>,
    pub image: Option<crate::backend::FilePart>,
}

/// What the home page needs to render and rotate the slider
#[derive(Debug, Clone, Serialize)]
pub struct SliderView {
    pub images: Vec<String>,
    pub using_fallback: bool,
    pub auto_slide_interval_ms: u64,
    pub interaction_pause_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_timestamps() {
        let slide: SliderData = serde_json::from_str(
            r#"{"_id":"s1","image":"slider/1.jpg","status":"active","createdAt":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();

        assert!(slide.is_active());
        assert!(slide.created_at.is_some());
        assert!(slide.updated_at.is_none());
    }

    #[test]
    fn test_unexpected_status_is_not_active() {
        let slide: SliderData =
            serde_json::from_str(r#"{"_id":"s2","image":"x.jpg","status":"archived"}"#).unwrap();
        assert_eq!(slide.status, SlideStatus::Unknown);
        assert!(!slide.is_active());

        let slide: SliderData = serde_json::from_str(r#"{"_id":"s3","image":"x.jpg"}"#).unwrap();
        assert!(!slide.is_active());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("ACTIVE".parse::<SlideStatus>().unwrap(), SlideStatus::Active);
        assert!("archived".parse::<SlideStatus>().is_err());
    }
}
