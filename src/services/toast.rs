//! One-shot notifications returned with every dashboard mutation

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Success and failure copy for one mutation
#[derive(Debug, Clone, Copy)]
pub struct ToastMessages {
    pub success: &'static str,
    pub failure: &'static str,
}

impl ToastMessages {
    pub fn on_success(&self) -> Toast {
        Toast::success(self.success)
    }

    pub fn on_failure(&self) -> Toast {
        Toast::error(self.failure)
    }
}

/// Copy for the create/update/delete mutations of one resource
#[derive(Debug, Clone, Copy)]
pub struct CrudToasts {
    pub create: ToastMessages,
    pub update: ToastMessages,
    pub delete: ToastMessages,
}
