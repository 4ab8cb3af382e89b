//! Document Assembler — turns a `ResumeProfile` into the final resume document.
//!
//! Block order is fixed:
//! 1. profile image (optional)
//! 2. name (title) and role
//! 3. contact line, divider
//! 4. "Professional Summary" + generated sentence
//! 5. "Skills" + one bullet per keyword
//! 6. "Experience" / "Education", each only when non-empty
//!
//! Callers must reject empty resume/JD text before calling in here.

use std::io::Cursor;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::sections::SectionKind;
use crate::generation::profile::ResumeProfile;
use crate::keywords::{display_skills, summary_keywords, Tokenizer};
use crate::render::{AssembledDocument, DocumentRenderer, DocxRenderer, HeadingLevel};

pub const PROFILE_IMAGE_WIDTH_INCHES: f32 = 1.5;
const DIVIDER_WIDTH: usize = 70;
const BULLET_GLYPH: char = '\u{2022}';

const SUMMARY_HEADING: &str = "Professional Summary";
const SKILLS_HEADING: &str = "Skills";
const EXPERIENCE_HEADING: &str = "Experience";
const EDUCATION_HEADING: &str = "Education";

pub fn contact_line(profile: &ResumeProfile) -> String {
    let contact = &profile.contact;
    format!(
        "\u{1F4E7} {} | \u{1F4DE} {} | \u{1F310} {}",
        contact.email, contact.phone, contact.profile_link
    )
}

pub fn summary_sentence(keywords: &[String]) -> String {
    format!(
        "Experienced professional with proven expertise in {}. Passionate about delivering quality solutions.",
        summary_keywords(keywords)
    )
}

/// Lays out every block of the resume without touching any output format.
pub fn build_document(profile: &ResumeProfile, image: Option<&Path>) -> AssembledDocument {
    let mut doc = AssembledDocument::new();

    if let Some(path) = image {
        doc.image(path, PROFILE_IMAGE_WIDTH_INCHES);
    }
    doc.heading(profile.name.as_str(), HeadingLevel::Title);
    doc.paragraph(profile.role.as_str());
    doc.paragraph(contact_line(profile));
    doc.paragraph("_".repeat(DIVIDER_WIDTH));

    doc.heading(SUMMARY_HEADING, HeadingLevel::Section);
    doc.paragraph(summary_sentence(&profile.keywords));

    doc.heading(SKILLS_HEADING, HeadingLevel::Section);
    for skill in display_skills(&profile.keywords) {
        doc.bullet(format!("{BULLET_GLYPH} {skill}"));
    }

    for (kind, heading) in [
        (SectionKind::Experience, EXPERIENCE_HEADING),
        (SectionKind::Education, EDUCATION_HEADING),
    ] {
        let lines = profile.sections.get(kind);
        if lines.is_empty() {
            debug!("No {} lines found, omitting section", kind.label());
            continue;
        }
        doc.heading(heading, HeadingLevel::Section);
        for line in lines {
            doc.paragraph(line.as_str());
        }
    }

    doc
}

/// Renders `profile` with `renderer`, returning the bytes with the cursor rewound.
pub fn assemble_with<R: DocumentRenderer>(
    renderer: R,
    profile: &ResumeProfile,
    image: Option<&Path>,
) -> Result<Cursor<Vec<u8>>, AppError> {
    let document = build_document(profile, image);
    let block_count = document.blocks.len();
    let bytes = document.render(renderer)?;

    let mut buffer = Cursor::new(bytes);
    buffer.set_position(0);
    info!(
        "Assembled resume for '{}': {} blocks, {} keywords, {} bytes",
        profile.name,
        block_count,
        profile.keywords.len(),
        buffer.get_ref().len()
    );
    Ok(buffer)
}

/// Extracts every field from the two texts and renders a .docx resume.
pub fn create_resume(
    tokenizer: &dyn Tokenizer,
    resume_text: &str,
    jd_text: &str,
    image: Option<&Path>,
) -> Result<Cursor<Vec<u8>>, AppError> {
    let profile = ResumeProfile::extract(tokenizer, resume_text, jd_text);
    assemble_with(DocxRenderer::new(), &profile, image)
}
