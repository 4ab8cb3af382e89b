//! ResumeProfile — everything the extractors pull out of one (resume, JD) pair.

use serde::Serialize;

use crate::extraction::{
    extract_contact, extract_name_role, extract_sections, ContactInfo, SectionMap,
};
use crate::keywords::{rank_keywords, Tokenizer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeProfile {
    pub name: String,
    pub role: String,
    pub contact: ContactInfo,
    pub sections: SectionMap,
    /// Sorted, lower-cased JD vocabulary.
    pub keywords: Vec<String>,
}

impl ResumeProfile {
    pub fn extract(tokenizer: &dyn Tokenizer, resume_text: &str, jd_text: &str) -> Self {
        let (name, role) = extract_name_role(resume_text);
        Self {
            name,
            role,
            contact: extract_contact(resume_text),
            sections: extract_sections(resume_text),
            keywords: rank_keywords(tokenizer, jd_text),
        }
    }
}
