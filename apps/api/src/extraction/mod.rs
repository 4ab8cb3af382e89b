// Heuristic field extraction over raw resume text.
// Nothing in here fails: an unrecognised field falls back to an empty value or a fixed default.

pub mod fields;
pub mod lines;
pub mod sections;

pub use fields::{extract_contact, extract_name_role, ContactInfo};
pub use sections::{extract_sections, SectionMap};
