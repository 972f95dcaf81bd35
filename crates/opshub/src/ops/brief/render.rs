use serde::Deserialize;

use super::document::render_document;
use super::views::BriefView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Html,
    Json,
}

impl DocumentFormat {
    pub fn renderer(self) -> Box<dyn BriefRenderer> {
        match self {
            Self::Html => Box::new(HtmlBriefRenderer),
            Self::Json => Box::new(JsonBriefRenderer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub content_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to format brief document")]
    Format(#[from] std::fmt::Error),
    #[error("failed to encode brief document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Turns a brief view into a downloadable document.
pub trait BriefRenderer: Send + Sync {
    fn render(&self, view: &BriefView) -> Result<RenderedDocument, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBriefRenderer;

impl BriefRenderer for HtmlBriefRenderer {
    fn render(&self, view: &BriefView) -> Result<RenderedDocument, RenderError> {
        let html = render_document(view)?;
        Ok(RenderedDocument {
            content_type: mime::TEXT_HTML_UTF_8.to_string(),
            file_name: file_name(view, "html"),
            bytes: html.into_bytes(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBriefRenderer;

impl BriefRenderer for JsonBriefRenderer {
    fn render(&self, view: &BriefView) -> Result<RenderedDocument, RenderError> {
        Ok(RenderedDocument {
            content_type: mime::APPLICATION_JSON.to_string(),
            file_name: file_name(view, "json"),
            bytes: serde_json::to_vec_pretty(view)?,
        })
    }
}

fn file_name(view: &BriefView, extension: &str) -> String {
    format!("pre-shift-brief-{}.{extension}", view.date.format("%Y-%m-%d"))
}
