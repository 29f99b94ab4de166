//! Site header and home page feature highlight

use super::{ContentService, MediaUrls, ResourceService, ServiceResult};
use crate::models::{Feature, FeatureHighlight, HeaderData, HeaderView};

const EXCERPT_CHARS: usize = 300;

#[derive(Clone)]
pub struct SiteService {
    info: ResourceService<HeaderData>,
    features: ContentService<Feature>,
    media: MediaUrls,
    fallback_logo: String,
}

impl SiteService {
    pub fn new(
        info: ResourceService<HeaderData>,
        features: ContentService<Feature>,
        media: MediaUrls,
        fallback_logo: impl Into<String>,
    ) -> Self {
        Self {
            info,
            features,
            media,
            fallback_logo: fallback_logo.into(),
        }
    }

    /// School identity from the first `/info` record
    pub async fn header(&self) -> ServiceResult<Option<HeaderData>> {
        Ok(self.info.list().await?.into_iter().next())
    }

    /// Header ready for display; the logo falls back when the record or
    /// its logo is missing
    pub async fn header_view(&self, school_name: &str) -> ServiceResult<HeaderView> {
        let header = self.header().await?.unwrap_or_default();
        let logo = if header.logo.trim().is_empty() {
            self.fallback_logo.as_str()
        } else {
            header.logo.as_str()
        };

        Ok(HeaderView {
            logo_url: self.media.image_url(logo),
            school_name: if header.school_name.trim().is_empty() {
                school_name.to_string()
            } else {
                header.school_name.clone()
            },
            address: header.address,
            eiin: header.eiin,
            school_code: header.school_code,
            email: header.email,
            mobile_no: header.mobile_no,
            website: header.website,
        })
    }

    /// First feature with its description cut for the home page
    pub async fn highlight(&self) -> ServiceResult<Option<FeatureHighlight>> {
        let first = self.features.list().await?.into_iter().next();
        Ok(first.map(|feature| FeatureHighlight {
            excerpt: excerpt(&feature.description, EXCERPT_CHARS),
            image_url: self.media.image_url(&feature.image),
            id: feature.id,
            title: feature.title,
        }))
    }
}

/// First `max_chars` characters followed by `...`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
