//! Open-XML (.docx) backend for `DocumentRenderer`.
//!
//! Builds `word/document.xml` incrementally as blocks arrive and zips the
//! package on `serialize`. The package is deliberately minimal:
//! - `[Content_Types].xml`, `_rels/.rels`
//! - `word/document.xml`, `word/styles.xml`, `word/_rels/document.xml.rels`
//! - `docProps/core.xml`
//! - `word/media/imageN.{png,jpeg}` for embedded pictures

use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::image::ImageKind;
use crate::render::{DocumentRenderer, HeadingLevel, RenderError};

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const EMU_PER_INCH: f32 = 914_400.0;
/// Section headings: bold, 14pt (Word measures run size in half-points).
const SECTION_HEADING_HALF_POINTS: u32 = 28;

const NS_DECLS: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
);

/// US letter, 1" margins (twentieths of a point).
const SECTION_PROPERTIES: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
    r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" "#,
    r#"w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"</Relationships>"#,
);

const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#,
    r#"<w:sz w:val="22"/></w:rPr></w:rPrDefault>"#,
    r#"<w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="80"/></w:pPr>"#,
    r#"<w:rPr><w:sz w:val="56"/><w:color w:val="17365D"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/>"#,
    r#"<w:basedOn w:val="Normal"/><w:pPr><w:ind w:left="360"/><w:spacing w:after="40"/></w:pPr></w:style>"#,
    r#"</w:styles>"#,
);

struct MediaPart {
    rel_id: String,
    file_name: String,
    kind: ImageKind,
    bytes: Vec<u8>,
}

/// Accumulates body XML and media, then packages everything in `serialize`.
pub struct DocxRenderer {
    body: String,
    media: Vec<MediaPart>,
    title: Option<String>,
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self {
            body: String::new(),
            media: Vec::new(),
            title: None,
        }
    }

    fn push_paragraph(&mut self, paragraph_props: &str, run_props: &str, text: &str) {
        let _ = write!(
            self.body,
            r#"<w:p>{paragraph_props}<w:r>{run_props}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape_xml(text)
        );
    }

    fn content_types(&self) -> String {
        let mut xml = String::from(concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        ));
        for kind in [ImageKind::Png, ImageKind::Jpeg] {
            if self.media.iter().any(|m| m.kind == kind) {
                let _ = write!(
                    xml,
                    r#"<Default Extension="{}" ContentType="{}"/>"#,
                    kind.extension(),
                    kind.content_type()
                );
            }
        }
        xml.push_str(concat!(
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"</Types>"#,
        ));
        xml
    }

    fn document_rels(&self) -> String {
        let mut xml = String::from(concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        ));
        for part in &self.media {
            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/{}"/>"#,
                part.rel_id, part.file_name
            );
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NS_DECLS}><w:body>{}{SECTION_PROPERTIES}</w:body></w:document>"#,
            self.body
        )
    }

    fn core_xml(&self) -> String {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let title = self.title.as_deref().map(escape_xml).unwrap_or_default();
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
                r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
                r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                r#"<dc:title>{title}</dc:title>"#,
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>"#,
                r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>"#,
                r#"</cp:coreProperties>"#,
            ),
            title = title,
            now = now
        )
    }
}

impl DocumentRenderer for DocxRenderer {
    fn add_heading(&mut self, text: &str, level: HeadingLevel) {
        match level {
            HeadingLevel::Title => {
                if self.title.is_none() {
                    self.title = Some(text.to_string());
                }
                self.push_paragraph(r#"<w:pPr><w:pStyle w:val="Title"/></w:pPr>"#, "", text);
            }
            HeadingLevel::Section => {
                let run_props = format!(
                    r#"<w:rPr><w:b/><w:sz w:val="{SECTION_HEADING_HALF_POINTS}"/><w:szCs w:val="{SECTION_HEADING_HALF_POINTS}"/></w:rPr>"#
                );
                self.push_paragraph(r#"<w:pPr><w:jc w:val="left"/></w:pPr>"#, &run_props, text);
            }
        }
    }

    fn add_paragraph(&mut self, text: &str) {
        self.push_paragraph("", "", text);
    }

    fn add_bullet_item(&mut self, text: &str) {
        self.push_paragraph(r#"<w:pPr><w:pStyle w:val="ListBullet"/></w:pPr>"#, "", text);
    }

    fn add_image(&mut self, path: &Path, width_inches: f32) -> Result<(), RenderError> {
        let bytes = std::fs::read(path)?;
        let kind = ImageKind::sniff(&bytes)
            .ok_or_else(|| RenderError::UnsupportedImage(path.display().to_string()))?;
        let (px_w, px_h) = kind.dimensions(&bytes).ok_or_else(|| {
            RenderError::UnsupportedImage(format!("{}: unreadable header", path.display()))
        })?;
        if px_w == 0 || px_h == 0 {
            return Err(RenderError::UnsupportedImage(format!(
                "{}: zero-sized image",
                path.display()
            )));
        }

        let index = self.media.len() + 1;
        // rId1 is the styles part.
        let rel_id = format!("rId{}", index + 1);
        let file_name = format!("image{index}.{}", kind.extension());
        let cx = (width_inches * EMU_PER_INCH).round() as u64;
        let cy = (cx as f64 * f64::from(px_h) / f64::from(px_w)).round() as u64;

        let _ = write!(
            self.body,
            concat!(
                r#"<w:p><w:pPr><w:jc w:val="left"/></w:pPr><w:r><w:drawing>"#,
                r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:docPr id="{id}" name="Picture {id}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
                r#"</a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
            ),
            cx = cx,
            cy = cy,
            id = index,
            name = file_name,
            rel = rel_id,
        );

        debug!("Embedded {} ({}x{} px) as {}", path.display(), px_w, px_h, file_name);
        self.media.push(MediaPart {
            rel_id,
            file_name,
            kind,
            bytes,
        });
        Ok(())
    }

    fn serialize(self) -> Result<Vec<u8>, RenderError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let parts: [(&str, String); 5] = [
            ("[Content_Types].xml", self.content_types()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("word/document.xml", self.document_xml()),
            ("word/styles.xml", STYLES_XML.to_string()),
            ("word/_rels/document.xml.rels", self.document_rels()),
        ];
        for (name, xml) in &parts {
            zip.start_file(*name, options)?;
            zip.write_all(xml.as_bytes())?;
        }

        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(self.core_xml().as_bytes())?;

        for part in &self.media {
            zip.start_file(format!("word/media/{}", part.file_name), options)?;
            zip.write_all(&part.bytes)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Escapes XML metacharacters and drops the characters XML 1.0 cannot carry.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c.is_control() => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::image::fixtures::png_header;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_serialized_package_has_zip_signature() {
        let mut renderer = DocxRenderer::new();
        renderer.add_paragraph("hello");
        let bytes = renderer.serialize().unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = DocxRenderer::new().serialize().unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/_rels/document.xml.rels",
            "docProps/core.xml",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let mut renderer = DocxRenderer::new();
        renderer.add_paragraph("R&D <lead>");
        let bytes = renderer.serialize().unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains("R&amp;D &lt;lead&gt;"));
    }

    #[test]
    fn test_heading_styles() {
        let mut renderer = DocxRenderer::new();
        renderer.add_heading("Jane Doe", HeadingLevel::Title);
        renderer.add_heading("Skills", HeadingLevel::Section);
        renderer.add_bullet_item("• Rust");
        let bytes = renderer.serialize().unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(xml.contains(r#"<w:b/><w:sz w:val="28"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.find("Jane Doe") < xml.find("Skills"));
        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Jane Doe</dc:title>"));
    }

    #[test]
    fn test_image_is_embedded_with_relationship() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, png_header(200, 100)).unwrap();

        let mut renderer = DocxRenderer::new();
        renderer.add_image(&path, 1.5).unwrap();
        let bytes = renderer.serialize().unwrap();

        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<wp:extent cx="1371600" cy="685800"/>"#));
        assert!(xml.contains(r#"r:embed="rId2""#));
        let rels = read_part(&bytes, "word/_rels/document.xml.rels");
        assert!(rels.contains(r#"Target="media/image1.png""#));
        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains(r#"Extension="png""#));
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(archive.file_names().any(|n| n == "word/media/image1.png"));
    }

    #[test]
    fn test_non_image_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"plain text").unwrap();
        let mut renderer = DocxRenderer::new();
        assert!(matches!(
            renderer.add_image(&path, 1.5),
            Err(RenderError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_missing_image_file_is_io_error() {
        let mut renderer = DocxRenderer::new();
        assert!(matches!(
            renderer.add_image(Path::new("/nonexistent/photo.png"), 1.5),
            Err(RenderError::Io(_))
        ));
    }

    #[test]
    fn test_escape_drops_control_chars() {
        assert_eq!(escape_xml("a\u{0}b\u{7}c\td"), "abc\td");
        assert_eq!(escape_xml("\"it's\""), "&quot;it&apos;s&quot;");
    }

    #[test]
    fn test_escape_drops_noncharacters_outside_xml_range() {
        assert_eq!(escape_xml("a\u{FFFE}b\u{FFFF}c\u{FFFD}"), "abc\u{FFFD}");
    }
}
