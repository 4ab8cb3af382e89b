//! Backend-independent document model: an ordered list of blocks.

use std::path::PathBuf;

use serde::Serialize;

use crate::render::{DocumentRenderer, RenderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    /// Document title (the candidate's name).
    Title,
    /// Bold section label such as "Skills".
    Section,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String, level: HeadingLevel },
    Paragraph { text: String },
    BulletItem { text: String },
    Image { path: PathBuf, width_inches: f32 },
}

/// Blocks in output order. Built once, rendered once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssembledDocument {
    pub blocks: Vec<Block>,
}

impl AssembledDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, text: impl Into<String>, level: HeadingLevel) {
        self.blocks.push(Block::Heading {
            text: text.into(),
            level,
        });
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph { text: text.into() });
    }

    pub fn bullet(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::BulletItem { text: text.into() });
    }

    pub fn image(&mut self, path: impl Into<PathBuf>, width_inches: f32) {
        self.blocks.push(Block::Image {
            path: path.into(),
            width_inches,
        });
    }

    /// Replays every block into `renderer` and serializes it.
    pub fn render<R: DocumentRenderer>(self, mut renderer: R) -> Result<Vec<u8>, RenderError> {
        for block in &self.blocks {
            match block {
                Block::Heading { text, level } => renderer.add_heading(text, *level),
                Block::Paragraph { text } => renderer.add_paragraph(text),
                Block::BulletItem { text } => renderer.add_bullet_item(text),
                Block::Image { path, width_inches } => renderer.add_image(path, *width_inches)?,
            }
        }
        renderer.serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<String>,
        fail_images: bool,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn add_heading(&mut self, text: &str, level: HeadingLevel) {
            self.calls.push(format!("heading:{level:?}:{text}"));
        }

        fn add_paragraph(&mut self, text: &str) {
            self.calls.push(format!("paragraph:{text}"));
        }

        fn add_bullet_item(&mut self, text: &str) {
            self.calls.push(format!("bullet:{text}"));
        }

        fn add_image(&mut self, path: &Path, _width_inches: f32) -> Result<(), RenderError> {
            if self.fail_images {
                return Err(RenderError::UnsupportedImage(path.display().to_string()));
            }
            self.calls.push(format!("image:{}", path.display()));
            Ok(())
        }

        fn serialize(self) -> Result<Vec<u8>, RenderError> {
            Ok(self.calls.join("\n").into_bytes())
        }
    }

    #[test]
    fn test_render_replays_blocks_in_order() {
        let mut doc = AssembledDocument::new();
        doc.image("/tmp/p.png", 1.5);
        doc.heading("Jane", HeadingLevel::Title);
        doc.paragraph("Engineer");
        doc.bullet("• Rust");

        let out = doc.render(RecordingRenderer::default()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "image:/tmp/p.png\nheading:Title:Jane\nparagraph:Engineer\nbullet:• Rust"
        );
    }

    #[test]
    fn test_render_propagates_image_failure() {
        let mut doc = AssembledDocument::new();
        doc.image("/tmp/bad.gif", 1.5);
        let renderer = RecordingRenderer {
            fail_images: true,
            ..Default::default()
        };
        assert!(matches!(
            doc.render(renderer),
            Err(RenderError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let block = Block::Heading {
            text: "Skills".to_string(),
            level: HeadingLevel::Section,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "heading");
        assert_eq!(json["level"], "section");
    }
}
