//! Multipart form reading for dashboard uploads
//!
//! Dashboard forms arrive as multipart: text fields plus at most one file per
//! field. Files are checked against the upload configuration here and then
//! forwarded to the backend untouched.

use axum::extract::Multipart;
use std::collections::HashMap;

use crate::api::middleware::ApiError;
use crate::backend::FilePart;
use crate::config::UploadConfig;

/// Text fields and files of one submitted form
#[derive(Debug, Default)]
pub struct UploadedForm {
    fields: HashMap<String, String>,
    files: HashMap<String, FilePart>,
}

impl UploadedForm {
    /// Text field value; missing fields read as empty
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Text field value when present and not blank
    pub fn optional_text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<FilePart> {
        self.files.remove(name)
    }
}

/// Read every field of a multipart request
///
/// A field with a file name is a file. Files chosen but left empty are
/// skipped, so an untouched file input keeps the current file.
pub async fn read_form(mut multipart: Multipart, config: &UploadConfig) -> Result<UploadedForm, ApiError> {
    let mut form = UploadedForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation_error(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name.is_empty() {
            continue;
        }

        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation_error(format!("Failed to read field {}: {}", name, e)))?;
            form.fields.insert(name, value);
            continue;
        };

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation_error(format!("Failed to read file: {}", e)))?;

        if data.is_empty() {
            continue;
        }

        if !config.is_type_allowed(&content_type) {
            return Err(ApiError::validation_error(format!(
                "Invalid file type: {}. Allowed types: {:?}",
                content_type, config.allowed_types
            )));
        }

        if data.len() as u64 > config.max_file_size {
            return Err(ApiError::validation_error(format!(
                "File too large. Maximum size: {} bytes ({} MB)",
                config.max_file_size,
                config.max_file_size / 1024 / 1024
            )));
        }

        tracing::debug!("Received file {} ({} bytes) for field {}", filename, data.len(), name);
        form.files
            .insert(name, FilePart::new(filename, content_type, data.to_vec()));
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_read_as_empty() {
        let mut form = UploadedForm::default();
        form.fields.insert("title".into(), "Notice".into());
        form.fields.insert("status".into(), "  ".into());

        assert_eq!(form.text("title"), "Notice");
        assert_eq!(form.text("description"), "");
        assert_eq!(form.optional_text("status"), None);
        assert!(form.take_file("image").is_none());
    }
}
