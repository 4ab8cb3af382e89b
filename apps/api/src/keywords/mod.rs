// Keyword extraction from job descriptions.
// The tokenizer is injected; nothing here loads a model on its own.

pub mod ranker;
pub mod tokenizer;

pub use ranker::{display_skills, rank_keywords, summary_keywords};
pub use tokenizer::{EnglishTokenizer, Tokenizer};
