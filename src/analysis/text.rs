use std::collections::{BTreeMap, HashSet};

use crate::data::filter::FilteredView;
use crate::data::model::ReviewTable;

// ---------------------------------------------------------------------------
// Text corpus building + word-frequency extraction
// ---------------------------------------------------------------------------

/// Tokens shorter than this are discarded after stop-word filtering.
pub const MIN_TOKEN_LEN: usize = 1;

/// Common English words excluded from frequency analysis.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "can", "can't", "cannot", "com", "could",
    "couldn't", "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down",
    "during", "each", "else", "ever", "few", "for", "from", "further", "get", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll",
    "he's", "her", "here", "here's", "hers", "herself", "him", "himself", "his", "how",
    "how's", "however", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is",
    "isn't", "it", "it's", "its", "itself", "just", "let's", "like", "me", "more",
    "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shall", "shan't", "she", "she'd", "she'll", "she's",
    "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's",
    "the", "their", "theirs", "them", "themselves", "then", "there", "there's", "these",
    "they", "they'd", "they'll", "they're", "they've", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll",
    "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with",
    "won't", "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've",
    "your", "yours", "yourself", "yourselves",
];

/// The built-in stop-word set.
pub fn default_stopwords() -> HashSet<&'static str> {
    STOPWORDS.iter().copied().collect()
}

/// Concatenate all non-missing values of `field` for records in the view
/// matching `country`, joined by single spaces.  Non-string cells are
/// coerced to their string form.
///
/// Returns `None` when the corpus is empty or whitespace-only — the
/// explicit "no data" condition the caller must branch on before
/// attempting any visualization.
pub fn build_corpus(
    table: &ReviewTable,
    view: &FilteredView,
    country: &str,
    field: &str,
) -> Option<String> {
    let corpus = view
        .indices
        .iter()
        .map(|&idx| &table.records[idx])
        .filter(|r| r.country == country)
        .filter_map(|r| r.text(field))
        .collect::<Vec<String>>()
        .join(" ");

    if corpus.trim().is_empty() {
        None
    } else {
        Some(corpus)
    }
}

/// Tokenize the corpus on non-alphanumeric boundaries, lower-case, and
/// count token frequencies, discarding stop-words and tokens shorter than
/// `min_len`.
pub fn extract_frequencies(
    corpus: &str,
    stopwords: &HashSet<&str>,
    min_len: usize,
) -> BTreeMap<String, u32> {
    let mut frequencies = BTreeMap::new();
    for token in corpus
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= min_len && !t.is_empty())
        .filter(|t| !stopwords.contains(t))
    {
        *frequencies.entry(token.to_string()).or_insert(0) += 1;
    }
    frequencies
}

/// The `top_n` most frequent tokens, descending by count with alphabetical
/// tie-break, ready for bar rendering.
pub fn rank_frequencies(
    frequencies: &BTreeMap<String, u32>,
    top_n: usize,
) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = frequencies
        .iter()
        .map(|(t, n)| (t.clone(), *n))
        .collect();
    // BTreeMap iteration is alphabetical, so the stable sort keeps ties
    // alphabetical.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}
