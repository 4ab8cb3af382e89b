//! Section Extractor — splits resume text into "experience" and "education" blocks.
//!
//! A single forward pass over the lines keeps a "current section" pointer.
//! Each line is classified by `SECTION_RULES`, evaluated in order, first match wins:
//! 1. contains "experience" → enter experience (line itself dropped)
//! 2. contains "education"  → enter education (line itself dropped)
//! 3. blank, or contains "summary" / "skills" / "project" → leave any section (line dropped)
//!
//! Any other line is appended, trimmed, to the active section (if one is active).

use serde::{Deserialize, Serialize};

use crate::extraction::lines::split_lines;

/// The labeled blocks the extractor knows how to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
}

impl SectionKind {
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
        }
    }
}

/// Experience and education lines in input order. Always carries both keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMap {
    pub experience: Vec<String>,
    pub education: Vec<String>,
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> &[String] {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
        }
    }

    fn push(&mut self, kind: SectionKind, line: String) {
        match kind {
            SectionKind::Experience => self.experience.push(line),
            SectionKind::Education => self.education.push(line),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionAction {
    Enter(SectionKind),
    Reset,
}

struct SectionRule {
    matches: fn(&str) -> bool,
    action: SectionAction,
}

const RESET_TRIGGERS: &[&str] = &["summary", "skills", "project"];

fn is_experience_trigger(line: &str) -> bool {
    line.contains("experience")
}

fn is_education_trigger(line: &str) -> bool {
    line.contains("education")
}

fn is_reset_trigger(line: &str) -> bool {
    line.is_empty() || RESET_TRIGGERS.iter().any(|t| line.contains(t))
}

/// Ordered classification rules. Order is the tie-break.
const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        matches: is_experience_trigger,
        action: SectionAction::Enter(SectionKind::Experience),
    },
    SectionRule {
        matches: is_education_trigger,
        action: SectionAction::Enter(SectionKind::Education),
    },
    SectionRule {
        matches: is_reset_trigger,
        action: SectionAction::Reset,
    },
];

/// `normalized` is the trimmed, lower-cased line.
fn classify(normalized: &str) -> Option<SectionAction> {
    SECTION_RULES
        .iter()
        .find(|rule| (rule.matches)(normalized))
        .map(|rule| rule.action)
}

/// Splits raw resume text into experience/education blocks.
pub fn extract_sections(resume_text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current: Option<SectionKind> = None;

    for line in split_lines(resume_text) {
        let trimmed = line.trim();
        match classify(&trimmed.to_lowercase()) {
            Some(SectionAction::Enter(kind)) => current = Some(kind),
            Some(SectionAction::Reset) => current = None,
            None => {
                if let Some(kind) = current {
                    sections.push(kind, trimmed.to_string());
                }
            }
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_experience_and_education_blocks() {
        let text = "Experience\nDid X at CompanyA\nEducation\nB.S. in Y\nSkills\nPython";
        let sections = extract_sections(text);
        assert_eq!(sections.experience, vec!["Did X at CompanyA"]);
        assert_eq!(sections.education, vec!["B.S. in Y"]);
    }

    #[test]
    fn test_empty_text_yields_both_empty() {
        let sections = extract_sections("");
        assert!(sections.experience.is_empty());
        assert!(sections.education.is_empty());
    }

    #[test]
    fn test_lines_before_any_trigger_are_dropped() {
        let sections = extract_sections("Jane Doe\nEngineer\nExperience\nBuilt things");
        assert_eq!(sections.experience, vec!["Built things"]);
        assert!(sections.education.is_empty());
    }

    #[test]
    fn test_blank_line_closes_section() {
        let sections = extract_sections("Experience\nJob one\n\nStray line\nEducation\nMSc");
        assert_eq!(sections.experience, vec!["Job one"]);
        assert_eq!(sections.education, vec!["MSc"]);
    }

    #[test]
    fn test_whitespace_only_line_counts_as_blank() {
        let sections = extract_sections("Education\nBSc\n   \t\nafter");
        assert_eq!(sections.education, vec!["BSc"]);
    }

    #[test]
    fn test_projects_heading_resets() {
        let sections = extract_sections("Experience\nRole A\nProjects\nSide project");
        assert_eq!(sections.experience, vec!["Role A"]);
    }

    #[test]
    fn test_summary_line_resets_even_inside_block() {
        let sections = extract_sections("Experience\nRole A\nExecutive summary of work\nRole B");
        assert_eq!(sections.experience, vec!["Role A"]);
    }

    #[test]
    fn test_experience_wins_over_education_on_same_line() {
        let sections = extract_sections("Work Experience and Education\nLine");
        assert_eq!(sections.experience, vec!["Line"]);
        assert!(sections.education.is_empty());
    }

    #[test]
    fn test_trigger_beats_reset_keyword() {
        // "skills" would reset, but "experience" is checked first.
        let sections = extract_sections("Skills and experience\nUsed Rust daily");
        assert_eq!(sections.experience, vec!["Used Rust daily"]);
    }

    #[test]
    fn test_trigger_is_case_insensitive() {
        let sections = extract_sections("EDUCATION\n  Stanford University  ");
        assert_eq!(sections.education, vec!["Stanford University"]);
    }

    #[test]
    fn test_content_line_mentioning_trigger_switches_section() {
        // Single-pass, no backtracking: a body line with the word re-targets the pointer.
        let sections = extract_sections("Education\nBSc\nTeaching experience abroad\nTutor");
        assert_eq!(sections.education, vec!["BSc"]);
        assert_eq!(sections.experience, vec!["Tutor"]);
    }

    #[test]
    fn test_section_kind_labels() {
        assert_eq!(SectionKind::Experience.label(), "experience");
        assert_eq!(SectionKind::Education.label(), "education");
    }

    #[test]
    fn test_crlf_input_is_trimmed() {
        let sections = extract_sections("Experience\r\nRole A\r\n");
        assert_eq!(sections.get(SectionKind::Experience), ["Role A".to_string()]);
    }

    #[test]
    fn test_carriage_return_only_input_splits_lines() {
        let sections = extract_sections("Experience\rRole A\rEducation\rBSc");
        assert_eq!(sections.get(SectionKind::Experience), ["Role A".to_string()]);
        assert_eq!(sections.get(SectionKind::Education), ["BSc".to_string()]);
    }
}
