//! Services layer - Business logic
//!
//! Each service wraps one remote resource through `ResourceService`, adds the
//! required-field checks the dashboard forms enforce, and names the toast
//! shown for each mutation. Result aggregation and slider rotation are pure
//! and live here too.

pub mod content;
pub mod history;
pub mod media;
pub mod mission_vision;
pub mod notice;
pub mod resource;
pub mod result;
pub mod site;
pub mod slider;
pub mod toast;

use crate::backend::BackendError;

pub use content::{ContentService, ACHIEVEMENT_TOASTS, FEATURE_TOASTS};
pub use history::{HistoryService, HISTORY_UPDATE_TOAST};
pub use media::MediaUrls;
pub use mission_vision::{MissionVisionService, MISSION_VISION_TOASTS};
pub use notice::{NoticeService, NOTICE_TOASTS};
pub use resource::ResourceService;
pub use result::{overall_grade, parse_float_prefix, parse_int_prefix, process_results, ResultService};
pub use site::{excerpt, SiteService};
pub use slider::{SlideTiming, SliderRotation, SliderService, SLIDER_TOASTS};
pub use toast::{CrudToasts, Toast, ToastMessages, ToastVariant};

/// Error types for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Required input missing or malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote backend failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Trimmed value, or a validation error naming the field
pub(crate) fn required(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
