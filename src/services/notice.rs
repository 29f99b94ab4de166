//! Notice board service

use super::{required, CrudToasts, ResourceService, ServiceError, ServiceResult, ToastMessages};
use crate::backend::FormPayload;
use crate::models::{CreateNoticeInput, Notice};

pub const NOTICE_TOASTS: CrudToasts = CrudToasts {
    create: ToastMessages {
        success: "Notice published successfully",
        failure: "Failed to publish notice",
    },
    update: ToastMessages {
        success: "Notice updated successfully",
        failure: "Failed to update notice",
    },
    delete: ToastMessages {
        success: "Notice deleted successfully",
        failure: "Failed to delete notice",
    },
};

#[derive(Clone)]
pub struct NoticeService {
    resource: ResourceService<Notice>,
}

impl NoticeService {
    pub fn new(resource: ResourceService<Notice>) -> Self {
        Self { resource }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Notice>> {
        self.resource.list().await
    }

    /// Publish a notice; both the title and the PDF are required
    pub async fn create(&self, input: CreateNoticeInput) -> ServiceResult<Option<Notice>> {
        let title = required(&input.title, "Title")?;
        let pdf = input
            .pdf
            .filter(|pdf| !pdf.is_empty())
            .ok_or_else(|| ServiceError::ValidationError("PDF file is required".to_string()))?;

        let form = FormPayload::new().text("title", title).file("pdf", pdf);
        self.resource.create_form(form).await
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        tracing::info!("Deleting notice {}", id);
        self.resource.delete(id).await
    }
}
