// Document rendering.
// `DocumentRenderer` is the seam between resume assembly and the output format;
// `DocxRenderer` is the only backend and writes an Open-XML word-processing package.

pub mod document;
pub mod docx;
pub mod image;

use std::path::Path;

use thiserror::Error;

pub use document::{AssembledDocument, HeadingLevel};
pub use docx::{DocxRenderer, DOCX_MIME_TYPE};
pub use image::ImageKind;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Package write error: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),
}

/// Primitive operations a document backend must provide.
///
/// Blocks are appended in call order; `serialize` consumes the renderer and
/// returns the finished file bytes.
pub trait DocumentRenderer {
    fn add_heading(&mut self, text: &str, level: HeadingLevel);

    fn add_paragraph(&mut self, text: &str);

    fn add_bullet_item(&mut self, text: &str);

    /// Embeds the image at `path`, scaled to `width_inches` with its aspect ratio kept.
    fn add_image(&mut self, path: &Path, width_inches: f32) -> Result<(), RenderError>;

    fn serialize(self) -> Result<Vec<u8>, RenderError>;
}
