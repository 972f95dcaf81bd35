mod compiler;
mod document;
mod render;
mod summary;
pub mod views;

pub use compiler::{Brief, BriefCompiler};
pub use document::{render_document, NO_CHANGES, NO_EIGHTY_SIXED, NO_LOW_STOCK, NO_REVIEWS};
pub use render::{
    BriefRenderer, DocumentFormat, HtmlBriefRenderer, JsonBriefRenderer, RenderError,
    RenderedDocument,
};
pub use views::{star_scale, BriefView};
