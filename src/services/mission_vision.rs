//! Mission and vision service

use super::{required, CrudToasts, ResourceService, ServiceError, ServiceResult, ToastMessages};
use crate::models::{
    MissionVisionInput, MissionVisionItem, MissionVisionSections, MissionVisionType, VisionIcon,
};

pub const MISSION_VISION_TOASTS: CrudToasts = CrudToasts {
    create: ToastMessages {
        success: "Added successfully",
        failure: "Failed to add",
    },
    update: ToastMessages {
        success: "Updated successfully",
        failure: "Failed to update",
    },
    delete: ToastMessages {
        success: "Deleted successfully",
        failure: "Failed to delete",
    },
};

#[derive(Clone)]
pub struct MissionVisionService {
    resource: ResourceService<MissionVisionItem>,
}

impl MissionVisionService {
    pub fn new(resource: ResourceService<MissionVisionItem>) -> Self {
        Self { resource }
    }

    pub async fn list(&self) -> ServiceResult<Vec<MissionVisionItem>> {
        self.resource.list().await
    }

    pub async fn sections(&self) -> ServiceResult<MissionVisionSections> {
        Ok(MissionVisionSections::from_items(self.list().await?))
    }

    pub async fn list_by_type(&self, kind: MissionVisionType) -> ServiceResult<Vec<MissionVisionItem>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|item| item.kind == kind)
            .collect())
    }

    /// Create an item under the given tab; `kind` wins over anything in the input
    pub async fn create(
        &self,
        kind: MissionVisionType,
        input: MissionVisionInput,
    ) -> ServiceResult<Option<MissionVisionItem>> {
        let item = prepare(kind, input)?;
        self.resource.create(to_body(&item)?).await
    }

    pub async fn update(
        &self,
        id: &str,
        kind: MissionVisionType,
        input: MissionVisionInput,
    ) -> ServiceResult<Option<MissionVisionItem>> {
        let item = prepare(kind, input)?;
        self.resource.update(id, to_body(&item)?).await
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.resource.delete(id).await
    }
}

/// Validate the input and shape it for the given tab
///
/// Missions carry a main description and points, visions an icon, a title
/// and a description. Fields of the other kind are dropped.
pub fn prepare(kind: MissionVisionType, input: MissionVisionInput) -> ServiceResult<MissionVisionItem> {
    match kind {
        MissionVisionType::Mission => {
            let main_description = required(
                input.main_description.as_deref().unwrap_or_default(),
                "Main description",
            )?;
            let points = input
                .points
                .iter()
                .map(|point| point.trim())
                .filter(|point| !point.is_empty())
                .map(str::to_string)
                .collect();

            Ok(MissionVisionItem {
                id: None,
                kind,
                main_description: Some(main_description),
                points,
                ..Default::default()
            })
        }
        MissionVisionType::Vision => {
            let title = required(input.title.as_deref().unwrap_or_default(), "Title")?;
            let icon = match input.icon.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(name) => {
                    let icon: VisionIcon = name.parse().map_err(|_| {
                        ServiceError::ValidationError(format!(
                            "Icon must be one of {}",
                            VisionIcon::ALL.map(|i| i.to_string()).join(", ")
                        ))
                    })?;
                    Some(icon.to_string())
                }
            };
            let description = input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());

            Ok(MissionVisionItem {
                id: None,
                kind,
                icon,
                title: Some(title),
                description,
                ..Default::default()
            })
        }
    }
}

fn to_body(item: &MissionVisionItem) -> ServiceResult<serde_json::Value> {
    serde_json::to_value(item)
        .map_err(|e| ServiceError::ValidationError(format!("Unserializable item: {}", e)))
}
