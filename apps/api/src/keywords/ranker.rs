//! Keyword Ranker — turns a job description into a sorted skill vocabulary.
//!
//! Algorithm:
//! 1. tokenize the JD
//! 2. keep tokens that are alphabetic and not stop-words
//! 3. lower-case, collect into a set (dedup), emit in lexicographic order
//!
//! The output is consumed twice: the head feeds the summary sentence and the
//! full list becomes the "Skills" bullets.

use std::collections::BTreeSet;

use crate::keywords::tokenizer::Tokenizer;

/// How many keywords the summary sentence mentions.
pub const SUMMARY_KEYWORD_LIMIT: usize = 8;

/// Extracts the deduplicated, sorted, lower-cased keyword vocabulary of `jd_text`.
pub fn rank_keywords(tokenizer: &dyn Tokenizer, jd_text: &str) -> Vec<String> {
    tokenizer
        .tokenize(jd_text)
        .into_iter()
        .filter(|token| token.is_alpha && !token.is_stop)
        .map(|token| token.text.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The first `SUMMARY_KEYWORD_LIMIT` keywords, comma-joined.
pub fn summary_keywords(keywords: &[String]) -> String {
    keywords
        .iter()
        .take(SUMMARY_KEYWORD_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display form of the skills list: sorted again, then title-cased.
///
/// The input is already sorted; the sort is kept so both uses of the list
/// agree on order even if a caller passes an unsorted slice.
pub fn display_skills(keywords: &[String]) -> Vec<String> {
    let mut skills = keywords.to_vec();
    skills.sort();
    skills.iter().map(|s| title_case(s)).collect()
}

/// Upper-cases the first letter of each alphabetic run and lower-cases the rest.
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
