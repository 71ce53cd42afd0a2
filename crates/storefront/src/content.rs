//! Markdown content pages (about, terms, privacy).
//!
//! Pages are loaded from the `content/` directory at startup: YAML front
//! matter is parsed with `gray_matter`, the body rendered to HTML with
//! `comrak`. Slugs come from filenames (`terms.md` -> `terms`).

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, engine::YAML};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading content pages.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Content directory or file could not be read.
    #[error("content io error: {0}")]
    Io(#[from] std::io::Error),

    /// Front matter is missing or failed to deserialize.
    #[error("invalid front matter in {slug}: {reason}")]
    FrontMatter {
        /// Page slug the error occurred in.
        slug: String,
        /// What was wrong.
        reason: String,
    },
}

/// Front matter metadata for a content page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// A rendered content page.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// All content pages, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    pages: HashMap<String, Page>,
}

impl ContentLibrary {
    /// Load every `.md` file in `dir`.
    ///
    /// A missing directory yields an empty library (the storefront can run
    /// without content pages); unreadable files and bad front matter are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` when a file cannot be read or its front
    /// matter is invalid.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let mut pages = HashMap::new();

        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Content directory missing, no pages loaded");
            return Ok(Self { pages });
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let slug = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let raw = std::fs::read_to_string(&path)?;
            let page = parse_page(&slug, &raw)?;
            pages.insert(slug, page);
        }

        tracing::info!(count = pages.len(), "Content pages loaded");
        Ok(Self { pages })
    }

    /// Look up a page by slug.
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// Number of loaded pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Parse a raw markdown document (front matter + body) into a [`Page`].
fn parse_page(slug: &str, raw: &str) -> Result<Page, ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse::<PageMeta>(raw)
        .map_err(|e| ContentError::FrontMatter {
            slug: slug.to_string(),
            reason: e.to_string(),
        })?;

    let meta = parsed.data.ok_or_else(|| ContentError::FrontMatter {
        slug: slug.to_string(),
        reason: "missing or undeserializable front matter".to_string(),
    })?;

    let content_html = markdown_to_html(&parsed.content, &Options::default());

    Ok(Page {
        slug: slug.to_string(),
        meta,
        content_html,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = "---\ntitle: Terms of Service\ndescription: The fine print.\nupdated_at: 2025-06-01\n---\n\n## Returns\n\nItems can be returned within *30 days*.\n";

    #[test]
    fn parses_front_matter_and_body() {
        let page = parse_page("terms", SAMPLE).unwrap();
        assert_eq!(page.slug, "terms");
        assert_eq!(page.meta.title, "Terms of Service");
        assert_eq!(page.meta.description.as_deref(), Some("The fine print."));
        assert_eq!(
            page.meta.updated_at,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert!(page.content_html.contains("<h2>"));
        assert!(page.content_html.contains("<em>30 days</em>"));
    }

    #[test]
    fn optional_fields_default() {
        let raw = "---\ntitle: About\n---\n\nHello.\n";
        let page = parse_page("about", raw).unwrap();
        assert!(page.meta.description.is_none());
        assert!(page.meta.updated_at.is_none());
    }

    #[test]
    fn rejects_missing_front_matter() {
        let err = parse_page("broken", "just a body, no front matter").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn missing_directory_is_empty_library() {
        let library = ContentLibrary::load(Path::new("/nonexistent/driftwear-content")).unwrap();
        assert!(library.is_empty());
        assert!(library.get_page("terms").is_none());
    }
}
