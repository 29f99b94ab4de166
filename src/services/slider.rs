//! Home page slider: slide management and rotation state

use std::time::{Duration, Instant};

use super::{CrudToasts, MediaUrls, ResourceService, ServiceError, ServiceResult, ToastMessages};
use crate::backend::FormPayload;
use crate::config::SliderConfig;
use crate::models::{SlideInput, SlideStatus, SliderData, SliderView};

pub const SLIDER_TOASTS: CrudToasts = CrudToasts {
    create: ToastMessages {
        success: "Slide added successfully",
        failure: "Failed to add slide",
    },
    update: ToastMessages {
        success: "Slide updated successfully",
        failure: "Failed to update slide",
    },
    delete: ToastMessages {
        success: "Slide deleted successfully",
        failure: "Failed to delete slide",
    },
};

#[derive(Clone)]
pub struct SliderService {
    resource: ResourceService<SliderData>,
    media: MediaUrls,
    config: SliderConfig,
}

impl SliderService {
    pub fn new(resource: ResourceService<SliderData>, media: MediaUrls, config: SliderConfig) -> Self {
        Self {
            resource,
            media,
            config,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<SliderData>> {
        self.resource.list().await
    }

    /// Images to rotate on the home page
    ///
    /// Falls back to the site-local images when there is no active slide or
    /// the backend cannot be reached.
    pub async fn view(&self) -> SliderView {
        let active: Vec<String> = match self.resource.list().await {
            Ok(slides) => slides
                .iter()
                .filter(|slide| slide.is_active())
                .map(|slide| self.media.image_url(&slide.image))
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to load slides, using fallback images: {}", e);
                Vec::new()
            }
        };

        let using_fallback = active.is_empty();
        SliderView {
            images: if using_fallback {
                self.config.fallback_images.clone()
            } else {
                active
            },
            using_fallback,
            auto_slide_interval_ms: self.config.auto_slide_interval_ms,
            interaction_pause_ms: self.config.interaction_pause_ms,
        }
    }

    pub async fn active_images(&self) -> Vec<String> {
        self.view().await.images
    }

    /// New slide; the image is required and the status defaults to active
    pub async fn create(&self, input: SlideInput) -> ServiceResult<Option<SliderData>> {
        let image = input
            .image
            .filter(|image| !image.is_empty())
            .ok_or_else(|| ServiceError::ValidationError("Image is required".to_string()))?;
        let status = input.status.unwrap_or(SlideStatus::Active);

        let form = FormPayload::new()
            .text("status", status.to_string())
            .file("image", image);
        self.resource.create_form(form).await
    }

    /// Change the status, the image, or both
    pub async fn update(&self, id: &str, input: SlideInput) -> ServiceResult<Option<SliderData>> {
        let image = input.image.filter(|image| !image.is_empty());
        if input.status.is_none() && image.is_none() {
            return Err(ServiceError::ValidationError(
                "Nothing to update: provide a status or an image".to_string(),
            ));
        }

        let mut form = FormPayload::new();
        if let Some(status) = input.status {
            form = form.text("status", status.to_string());
        }
        self.resource.update_form(id, form.maybe_file("image", image)).await
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.resource.delete(id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTiming {
    pub auto_slide_interval: Duration,
    pub interaction_pause: Duration,
}

impl From<&SliderConfig> for SlideTiming {
    fn from(config: &SliderConfig) -> Self {
        Self {
            auto_slide_interval: Duration::from_millis(config.auto_slide_interval_ms),
            interaction_pause: Duration::from_millis(config.interaction_pause_ms),
        }
    }
}

/// Which slide is shown, and when the next automatic advance happens
///
/// User interaction (`next`, `previous`, `go_to`) pauses automatic rotation
/// for the interaction pause. Automatic advances never pause. With no slides
/// every operation is a no-op.
#[derive(Debug, Clone)]
pub struct SliderRotation {
    len: usize,
    index: usize,
    timing: SlideTiming,
    paused_until: Option<Instant>,
    next_advance: Instant,
}

impl SliderRotation {
    pub fn new(len: usize, timing: SlideTiming, now: Instant) -> Self {
        Self {
            len,
            index: 0,
            timing,
            paused_until: None,
            next_advance: now + timing.auto_slide_interval,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn peek_next(&self) -> Option<usize> {
        (self.len > 0).then(|| (self.index + 1) % self.len)
    }

    pub fn peek_previous(&self) -> Option<usize> {
        (self.len > 0).then(|| (self.index + self.len - 1) % self.len)
    }

    pub fn is_paused(&self, now: Instant) -> bool {
        self.paused_until.is_some_and(|until| now < until)
    }

    pub fn next(&mut self, now: Instant) {
        if let Some(next) = self.peek_next() {
            self.index = next;
            self.pause(now);
        }
    }

    pub fn previous(&mut self, now: Instant) {
        if let Some(previous) = self.peek_previous() {
            self.index = previous;
            self.pause(now);
        }
    }

    /// Jump to a slide; out-of-range indexes are ignored
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if index < self.len {
            self.index = index;
            self.pause(now);
        }
    }

    /// Advance time; returns true when the slide changed
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }

        if let Some(until) = self.paused_until {
            if now < until {
                return false;
            }
            self.paused_until = None;
            self.next_advance = until + self.timing.auto_slide_interval;
        }

        if now < self.next_advance {
            return false;
        }

        self.index = (self.index + 1) % self.len;
        self.next_advance = now + self.timing.auto_slide_interval;
        true
    }

    fn pause(&mut self, now: Instant) {
        self.paused_until = Some(now + self.timing.interaction_pause);
    }
}
