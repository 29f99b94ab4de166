//! Data models
//!
//! Record shapes mirroring the remote backend resources, the input types
//! posted by dashboard forms, and the views handed to templates and JSON
//! responses.

mod achievement;
mod feature;
mod header;
mod history;
mod mission_vision;
mod navigation;
mod notice;
mod result;
mod slider;

pub use achievement::{Achievement, ImageContentInput};
pub use feature::{Feature, FeatureHighlight};
pub use header::{HeaderData, HeaderView};
pub use history::{HistoryData, UpdateHistoryInput};
pub use mission_vision::{
    MissionVisionInput, MissionVisionItem, MissionVisionSections, MissionVisionType, VisionIcon,
};
pub use navigation::{navigation, NavLink, NavMenu, Navigation};
pub use notice::{CreateNoticeInput, Notice};
pub use result::{
    Grade, ProcessedResult, ResultSummary, SchoolResultInfo, StudentInfo, StudentResultQuery,
    SubjectResult, SubjectRow,
};
pub use slider::{SlideInput, SlideStatus, SliderData, SliderView};
