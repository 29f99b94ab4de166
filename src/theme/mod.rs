//! Theme engine
//!
//! Page templates are embedded in the binary and rendered with Tera. A theme
//! directory on disk may override any of them by file name, or add new ones.

use anyhow::{Context, Result};
use chrono::Datelike;
use rust_embed::RustEmbed;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};

use crate::models::{HeaderView, Navigation};

mod error;

pub use error::ThemeError;

#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct BuiltinTemplates;

/// Template renderer for the public pages
pub struct ThemeEngine {
    tera: Tera,
    override_path: Option<PathBuf>,
}

impl ThemeEngine {
    /// Load the built-in templates, then any overrides from `override_path`
    pub fn new(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if !path.is_dir() {
                return Err(ThemeError::NotFound(path.display().to_string()).into());
            }
        }

        let mut engine = Self {
            tera: Tera::default(),
            override_path: override_path.map(Path::to_path_buf),
        };
        engine.reload_templates()?;
        Ok(engine)
    }

    /// Re-read every template, picking up edits in the override directory
    pub fn reload_templates(&mut self) -> Result<()> {
        let mut templates: BTreeMap<String, String> = BTreeMap::new();

        for name in BuiltinTemplates::iter() {
            if let Some(file) = BuiltinTemplates::get(&name) {
                let content = String::from_utf8(file.data.into_owned())
                    .with_context(|| format!("Built-in template {} is not UTF-8", name))?;
                templates.insert(name.to_string(), content);
            }
        }

        if let Some(ref path) = self.override_path {
            let before = templates.len();
            collect_templates_from_dir(path, path, &mut templates)?;
            tracing::info!(
                "Loaded template overrides from {:?} ({} new)",
                path,
                templates.len() - before
            );
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| ThemeError::TemplateError(error_chain("Failed to load templates", &e)))?;

        self.tera = tera;
        Ok(())
    }

    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String> {
        self.tera.render(template, context).map_err(|e| {
            ThemeError::TemplateError(error_chain(&format!("Failed to render '{}'", template), &e)).into()
        })
    }

    /// Render with the variables every page layout expects
    pub fn render_with_standard_vars(
        &self,
        template: &str,
        context: &TeraContext,
        standard_vars: &StandardTemplateVars,
    ) -> Result<String> {
        let mut full_context = context.clone();
        full_context.insert("site_name", &standard_vars.site_name);
        full_context.insert("request_path", &standard_vars.request_path);
        full_context.insert("year", &standard_vars.year);
        full_context.insert("header", &standard_vars.header);
        full_context.insert("navigation", &standard_vars.navigation);

        self.render(template, &full_context)
    }

    /// Render, falling back to `error.html` and then to a bare error page
    pub fn render_with_fallback(
        &self,
        template: &str,
        context: &TeraContext,
        standard_vars: &StandardTemplateVars,
    ) -> String {
        match self.render_with_standard_vars(template, context, standard_vars) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to render template '{}': {}, trying error template", template, e);

                let mut error_context = TeraContext::new();
                error_context.insert("error_message", "This page could not be displayed.");
                match self.render_with_standard_vars("error.html", &error_context, standard_vars) {
                    Ok(html) => html,
                    Err(error_template_err) => {
                        tracing::warn!("Failed to render error template: {}", error_template_err);
                        simple_error_page(&standard_vars.site_name)
                    }
                }
            }
        }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    pub fn override_path(&self) -> Option<&Path> {
        self.override_path.as_deref()
    }
}

fn collect_templates_from_dir(
    base_path: &Path,
    current_path: &Path,
    templates: &mut BTreeMap<String, String>,
) -> Result<()> {
    for entry in fs::read_dir(current_path)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_templates_from_dir(base_path, &path, templates)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            let relative_path = path
                .strip_prefix(base_path)
                .map_err(|_| ThemeError::TemplateError("Failed to get relative path".to_string()))?;
            let name = relative_path.to_string_lossy().replace('\\', "/");
            let content =
                fs::read_to_string(&path).with_context(|| format!("Failed to read template: {:?}", path))?;
            templates.insert(name, content);
        }
    }
    Ok(())
}

fn error_chain(prefix: &str, error: &tera::Error) -> String {
    let mut message = format!("{}: {}", prefix, error);
    let mut source = error.source();
    while let Some(s) = source {
        message.push_str(&format!("\n  Caused by: {}", s));
        source = s.source();
    }
    message
}

fn simple_error_page(site_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{0}</title></head>
<body>
    <h1>{0}</h1>
    <p>This page could not be displayed. Please try again later.</p>
</body>
</html>"#,
        tera::escape_html(site_name)
    )
}

/// Variables shared by every page layout
#[derive(Debug, Clone, Serialize)]
pub struct StandardTemplateVars {
    pub site_name: String,
    pub request_path: String,
    pub year: i32,
    pub header: Option<HeaderView>,
    pub navigation: &'static Navigation,
}

impl StandardTemplateVars {
    pub fn new(site_name: impl Into<String>, request_path: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            request_path: request_path.into(),
            year: chrono::Utc::now().year(),
            header: None,
            navigation: crate::models::navigation(),
        }
    }

    pub fn with_header(mut self, header: HeaderView) -> Self {
        self.header = Some(header);
        self
    }
}
