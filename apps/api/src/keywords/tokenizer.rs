//! Tokenizer — the NLP capability the keyword ranker is built on.
//!
//! `Tokenizer` is a trait so the ranker never reaches for a process-wide model:
//! the concrete tokenizer is loaded once in `main` and handed out through
//! `AppState` as `Arc<dyn Tokenizer>`. Tests can swap in a fake.

use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

use serde::Serialize;

/// One token of the input, with the two flags the ranker filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub is_alpha: bool,
    pub is_stop: bool,
}

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Standard English stop list (the set shipped with common NLP toolkits).
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amount",
    "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "ca", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "first", "five", "for", "former",
    "formerly", "forty", "four", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly",
    "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding",
    "same", "say", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she",
    "should", "show", "side", "since", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until", "up", "upon",
    "us", "used", "using", "various", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves", "'d", "'ll", "'m", "'re", "'s", "'ve", "n't",
];

/// Rule-based English tokenizer with a fixed stop list.
///
/// Whitespace separates chunks; inside a chunk, runs of alphanumerics become
/// one token and every other character stands alone. Clitics keep their
/// apostrophe ("Rust's" → "Rust", "'s"; "don't" → "do", "n't").
pub struct EnglishTokenizer {
    stop_words: HashSet<&'static str>,
}

impl EnglishTokenizer {
    /// Builds the stop-word table. Call once at startup.
    pub fn load() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    fn make_token(&self, text: String) -> Token {
        let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
        let is_stop = self.stop_words.contains(text.to_lowercase().as_str());
        Token {
            text,
            is_alpha,
            is_stop,
        }
    }
}

impl Tokenizer for EnglishTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut pieces = Vec::new();
        for chunk in text.split_whitespace() {
            split_chunk(chunk, &mut pieces);
        }
        pieces.into_iter().map(|p| self.make_token(p)).collect()
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Splits one whitespace-free chunk into raw token strings.
fn split_chunk(chunk: &str, out: &mut Vec<String>) {
    let mut chars = chunk.chars().peekable();
    let mut word = String::new();

    while let Some(c) = chars.next() {
        if c.is_alphanumeric() {
            word.push(c);
            continue;
        }

        let starts_clitic = is_apostrophe(c)
            && !word.is_empty()
            && chars.peek().is_some_and(|next| next.is_alphabetic());

        if starts_clitic {
            let suffix = take_alphabetic(c, &mut chars);
            // "don't" splits as "do" + "n't"
            if suffix.eq_ignore_ascii_case("'t") && word.to_lowercase().ends_with('n') {
                let n = word.pop().unwrap_or('n');
                flush(&mut word, out);
                out.push(format!("{n}'t"));
            } else {
                flush(&mut word, out);
                out.push(suffix);
            }
        } else {
            flush(&mut word, out);
            out.push(c.to_string());
        }
    }
    flush(&mut word, out);
}

fn take_alphabetic(first: char, chars: &mut Peekable<Chars<'_>>) -> String {
    let mut piece = String::from(first);
    while let Some(&next) = chars.peek() {
        if !next.is_alphabetic() {
            break;
        }
        piece.push(next);
        chars.next();
    }
    piece
}

fn flush(word: &mut String, out: &mut Vec<String>) {
    if !word.is_empty() {
        out.push(std::mem::take(word));
    }
}
