//! Institute history service

use super::{required, ResourceService, ServiceResult, ToastMessages};
use crate::backend::FormPayload;
use crate::models::{HistoryData, UpdateHistoryInput};

pub const HISTORY_UPDATE_TOAST: ToastMessages = ToastMessages {
    success: "Institute history updated successfully",
    failure: "Failed to update institute history",
};

#[derive(Clone)]
pub struct HistoryService {
    resource: ResourceService<HistoryData>,
}

impl HistoryService {
    pub fn new(resource: ResourceService<HistoryData>) -> Self {
        Self { resource }
    }

    /// The history record is the first item of the list
    pub async fn current(&self) -> ServiceResult<Option<HistoryData>> {
        Ok(self.resource.list().await?.into_iter().next())
    }

    /// Replace title and description, and the image when a new one is given
    ///
    /// Always sent as multipart so the backend can accept the image in the
    /// same request.
    pub async fn update(&self, id: &str, input: UpdateHistoryInput) -> ServiceResult<Option<HistoryData>> {
        let title = required(&input.title, "Title")?;
        let description = required(&input.description, "Description")?;

        let form = FormPayload::new()
            .text("title", title)
            .text("description", description)
            .maybe_file("image", input.image);

        tracing::info!("Updating institute history {}", id);
        self.resource.update_form(id, form).await
    }
}
