//! Common API utilities and shared types

use serde::Deserialize;

use crate::api::upload::UploadedForm;
use crate::models::{ImageContentInput, MissionVisionType};

/// `?type=` filter on the mission/vision listing
#[derive(Debug, Default, Deserialize)]
pub struct MissionVisionQuery {
    #[serde(default, rename = "type")]
    pub kind: Option<MissionVisionType>,
}

/// `?slide=` selection on the home page
#[derive(Debug, Default, Deserialize)]
pub struct SlideQuery {
    #[serde(default)]
    pub slide: Option<usize>,
}

/// Title, description and optional image from a dashboard form
pub fn image_content_input(mut form: UploadedForm) -> ImageContentInput {
    ImageContentInput {
        title: form.text("title").to_string(),
        description: form.text("description").to_string(),
        image: form.take_file("image"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_vision_query() {
        let query: MissionVisionQuery = parse_query("type=vision");
        assert_eq!(query.kind, Some(MissionVisionType::Vision));

        let query: MissionVisionQuery = parse_query("");
        assert_eq!(query.kind, None);
    }

    fn parse_query(raw: &str) -> MissionVisionQuery {
        let uri: axum::http::Uri = format!("/x?{}", raw).parse().unwrap();
        axum::extract::Query::<MissionVisionQuery>::try_from_uri(&uri)
            .unwrap()
            .0
    }
}
