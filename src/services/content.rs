//! Image-bearing content with title and description
//!
//! Achievements and home page features share the same editing rules: title,
//! description and image are required on create, and the image may be kept
//! on update.

use serde::{de::DeserializeOwned, Serialize};

use super::{required, CrudToasts, ResourceService, ServiceError, ServiceResult, ToastMessages};
use crate::backend::FormPayload;
use crate::models::ImageContentInput;

pub const ACHIEVEMENT_TOASTS: CrudToasts = CrudToasts {
    create: ToastMessages {
        success: "Achievement added successfully",
        failure: "Failed to add achievement",
    },
    update: ToastMessages {
        success: "Achievement updated successfully",
        failure: "Failed to update achievement",
    },
    delete: ToastMessages {
        success: "Achievement deleted successfully",
        failure: "Failed to delete achievement",
    },
};

pub const FEATURE_TOASTS: CrudToasts = CrudToasts {
    create: ToastMessages {
        success: "Feature added successfully",
        failure: "Failed to add feature",
    },
    update: ToastMessages {
        success: "Feature updated successfully",
        failure: "Failed to update feature",
    },
    delete: ToastMessages {
        success: "Feature deleted successfully",
        failure: "Failed to delete feature",
    },
};

pub struct ContentService<T> {
    resource: ResourceService<T>,
}

impl<T> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T> ContentService<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(resource: ResourceService<T>) -> Self {
        Self { resource }
    }

    pub async fn list(&self) -> ServiceResult<Vec<T>> {
        self.resource.list().await
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Option<T>> {
        self.resource.get(id).await
    }

    pub async fn require(&self, id: &str) -> ServiceResult<T> {
        self.resource.require(id).await
    }

    pub async fn create(&self, input: ImageContentInput) -> ServiceResult<Option<T>> {
        if input.image.as_ref().map_or(true, |image| image.is_empty()) {
            return Err(ServiceError::ValidationError("Image is required".to_string()));
        }
        let form = Self::form(input)?;
        self.resource.create_form(form).await
    }

    pub async fn update(&self, id: &str, input: ImageContentInput) -> ServiceResult<Option<T>> {
        let form = Self::form(input)?;
        self.resource.update_form(id, form).await
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.resource.delete(id).await
    }

    fn form(input: ImageContentInput) -> ServiceResult<FormPayload> {
        Ok(FormPayload::new()
            .text("title", required(&input.title, "Title")?)
            .text("description", required(&input.description, "Description")?)
            .maybe_file("image", input.image.filter(|image| !image.is_empty())))
    }
}
