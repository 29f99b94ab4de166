//! Mission and vision items
//!
//! Both kinds share one record shape. A mission carries a main description and
//! bullet points; a vision carries an icon, a title and a description.

use serde::{Deserialize, Serialize};

/// Which tab an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionVisionType {
    Mission,
    Vision,
}

impl Default for MissionVisionType {
    fn default() -> Self {
        Self::Mission
    }
}

impl std::fmt::Display for MissionVisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mission => write!(f, "mission"),
            Self::Vision => write!(f, "vision"),
        }
    }
}

impl std::str::FromStr for MissionVisionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mission" => Ok(Self::Mission),
            "vision" => Ok(Self::Vision),
            _ => Err(anyhow::anyhow!("Invalid mission/vision type: {}", s)),
        }
    }
}

/// Icons a vision card may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisionIcon {
    Lightbulb,
    Users,
    Target,
    Eye,
}

impl VisionIcon {
    pub const ALL: [VisionIcon; 4] = [Self::Lightbulb, Self::Users, Self::Target, Self::Eye];

    /// Lowercase name used in templates (`icon-lightbulb`, ...)
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Lightbulb => "lightbulb",
            Self::Users => "users",
            Self::Target => "target",
            Self::Eye => "eye",
        }
    }
}

impl std::fmt::Display for VisionIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lightbulb => write!(f, "Lightbulb"),
            Self::Users => write!(f, "Users"),
            Self::Target => write!(f, "Target"),
            Self::Eye => write!(f, "Eye"),
        }
    }
}

impl std::str::FromStr for VisionIcon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lightbulb" => Ok(Self::Lightbulb),
            "users" => Ok(Self::Users),
            "target" => Ok(Self::Target),
            "eye" => Ok(Self::Eye),
            _ => Err(anyhow::anyhow!("Invalid icon: {}", s)),
        }
    }
}

/// One mission or vision record as stored by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionVisionItem {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: MissionVisionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_description: Option<String>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MissionVisionItem {
    /// Icon parsed from the stored name; unknown names render without icon
    pub fn vision_icon(&self) -> Option<VisionIcon> {
        self.icon.as_deref().and_then(|name| name.parse().ok())
    }

    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("No title")
    }

    pub fn display_description(&self) -> &str {
        non_blank(self.description.as_deref())
            .or_else(|| non_blank(self.main_description.as_deref()))
            .unwrap_or("No description")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Form input for creating or editing an item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionVisionInput {
    #[serde(default)]
    pub main_description: Option<String>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Items split by tab
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissionVisionSections {
    pub mission: Vec<MissionVisionItem>,
    pub vision: Vec<MissionVisionItem>,
}

impl MissionVisionSections {
    pub fn from_items(items: Vec<MissionVisionItem>) -> Self {
        let (mission, vision) = items
            .into_iter()
            .partition(|item| item.kind == MissionVisionType::Mission);
        Self { mission, vision }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let item: MissionVisionItem = serde_json::from_str(
            r#"{"_id":"m1","type":"mission","mainDescription":"Educate","points":["a","b"]}"#,
        )
        .unwrap();

        assert_eq!(item.id.as_deref(), Some("m1"));
        assert_eq!(item.kind, MissionVisionType::Mission);
        assert_eq!(item.main_description.as_deref(), Some("Educate"));
        assert_eq!(item.points, vec!["a", "b"]);
    }

    #[test]
    fn test_serialize_uses_camel_case_and_type() {
        let item = MissionVisionItem {
            kind: MissionVisionType::Vision,
            title: Some("Light".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "vision");
        assert_eq!(json["title"], "Light");
        assert!(json.get("mainDescription").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_icon_parsing_is_case_insensitive() {
        assert_eq!("lightbulb".parse::<VisionIcon>().unwrap(), VisionIcon::Lightbulb);
        assert_eq!("Eye".parse::<VisionIcon>().unwrap(), VisionIcon::Eye);
        assert!("rocket".parse::<VisionIcon>().is_err());

        let item = MissionVisionItem {
            icon: Some("rocket".into()),
            ..Default::default()
        };
        assert!(item.vision_icon().is_none());
    }

    #[test]
    fn test_display_defaults() {
        let item = MissionVisionItem::default();
        assert_eq!(item.display_title(), "No title");
        assert_eq!(item.display_description(), "No description");

        let item = MissionVisionItem {
            main_description: Some("Educate".into()),
            title: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(item.display_title(), "No title");
        assert_eq!(item.display_description(), "Educate");
    }

    #[test]
    fn test_sections_partition() {
        let items = vec![
            MissionVisionItem { kind: MissionVisionType::Vision, ..Default::default() },
            MissionVisionItem { kind: MissionVisionType::Mission, ..Default::default() },
            MissionVisionItem { kind: MissionVisionType::Vision, ..Default::default() },
        ];
        let sections = MissionVisionSections::from_items(items);
        assert_eq!(sections.mission.len(), 1);
        assert_eq!(sections.vision.len(), 2);
    }
}
