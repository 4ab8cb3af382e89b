//! Field Extractor — name/role from the header lines, contact details from anywhere.

use serde::{Deserialize, Serialize};

use crate::extraction::lines::split_lines;

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_ROLE: &str = "Your Role";

/// Minimum trimmed length (exclusive, in characters) for a digit-bearing line to count as a phone.
const MIN_PHONE_CHARS: usize = 8;
const PROFILE_HOST: &str = "github.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub profile_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactField {
    Email,
    Phone,
    ProfileLink,
}

struct ContactRule {
    matches: fn(&str) -> bool,
    field: ContactField,
}

fn looks_like_email(line: &str) -> bool {
    line.contains('@')
}

fn looks_like_phone(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit()) && line.trim().chars().count() > MIN_PHONE_CHARS
}

fn looks_like_profile_link(line: &str) -> bool {
    line.contains(PROFILE_HOST)
}

/// Evaluated in order per line; the first matching rule classifies the line.
const CONTACT_RULES: &[ContactRule] = &[
    ContactRule {
        matches: looks_like_email,
        field: ContactField::Email,
    },
    ContactRule {
        matches: looks_like_phone,
        field: ContactField::Phone,
    },
    ContactRule {
        matches: looks_like_profile_link,
        field: ContactField::ProfileLink,
    },
];

/// Returns `(name, role)` from the first two lines of the text.
///
/// Falls back to `DEFAULT_NAME` / `DEFAULT_ROLE` when the lines are missing.
pub fn extract_name_role(text: &str) -> (String, String) {
    let trimmed = text.trim();
    let mut lines = split_lines(trimmed).into_iter().map(str::trim);

    // An empty string has no lines, so blank input takes both defaults.
    let name = lines.next().unwrap_or(DEFAULT_NAME);
    let role = lines.next().unwrap_or(DEFAULT_ROLE);

    (name.to_string(), role.to_string())
}

/// Scans every line for email, phone and profile link. Later matches overwrite earlier ones.
pub fn extract_contact(text: &str) -> ContactInfo {
    let mut contact = ContactInfo::default();

    for line in split_lines(text) {
        let Some(rule) = CONTACT_RULES.iter().find(|rule| (rule.matches)(line)) else {
            continue;
        };
        let value = line.trim().to_string();
        match rule.field {
            ContactField::Email => contact.email = value,
            ContactField::Phone => contact.phone = value,
            ContactField::ProfileLink => contact.profile_link = value,
        }
    }

    contact
}
