//! Shared API response types
//!
//! Every dashboard mutation answers with a toast for the dashboard to show,
//! plus the affected record when the backend returned one.

use axum::Json;
use serde::Serialize;

use crate::api::middleware::ApiError;
use crate::services::{ServiceResult, Toast, ToastMessages};

/// Body of a successful mutation
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub toast: Toast,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub type MutationResult<T> = Result<Json<MutationResponse<T>>, ApiError>;

/// Success toast with the record, or the error with the failure toast
pub fn mutation<T>(result: ServiceResult<Option<T>>, messages: ToastMessages) -> MutationResult<T> {
    match result {
        Ok(data) => Ok(Json(MutationResponse {
            toast: messages.on_success(),
            data,
        })),
        Err(e) => Err(failed(e.into(), messages)),
    }
}

/// Like `mutation`, for operations without a record to return
pub fn acknowledge(result: ServiceResult<()>, messages: ToastMessages) -> MutationResult<()> {
    mutation(result.map(|()| None), messages)
}

/// Attach the failure toast to an error raised before the service call
pub fn failed(error: ApiError, messages: ToastMessages) -> ApiError {
    error.with_toast(messages.on_failure())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ServiceError, SLIDER_TOASTS};
    use axum::http::StatusCode;

    #[test]
    fn test_success_carries_toast_and_data() {
        let Json(body) = mutation(Ok(Some(42)), SLIDER_TOASTS.create).unwrap();
        assert_eq!(body.toast.description, "Slide added successfully");
        assert_eq!(body.data, Some(42));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["toast"]["title"], "Success");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_acknowledge_omits_data() {
        let Json(body) = acknowledge(Ok(()), SLIDER_TOASTS.delete).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["toast"]["description"], "Slide deleted successfully");
    }

    #[test]
    fn test_failure_carries_destructive_toast() {
        let err = acknowledge(
            Err(ServiceError::ValidationError("Image is required".into())),
            SLIDER_TOASTS.create,
        )
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let toast = err.toast.unwrap();
        assert_eq!(toast.title, "Error");
        assert_eq!(toast.description, "Failed to add slide");
    }
}
