//! Term extraction for catalog text
//!
//! Product search text is split on Unicode word boundaries, lower-cased and
//! reduced to alphanumeric characters. Single characters and English
//! function words are dropped before n-grams are formed, so
//! "kurta with palazzo" yields the bigram "kurta palazzo".

use unicode_segmentation::UnicodeSegmentation;

/// Function words removed from every token stream
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Lower-cased alphanumeric form of one word, without a trailing `'s`
fn clean_word(word: &str) -> String {
    let stem = ["'s", "\u{2019}s"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word);
    stem.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_index_term(word: &str) -> bool {
    word.chars().nth(1).is_some() && !STOPWORDS.contains(&word)
}

/// Split text into index terms.
///
/// # Example
///
/// ```
/// use stylesearch_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Biba Women's Red A-line Kurta");
/// assert_eq!(tokens, vec!["biba", "women", "red", "line", "kurta"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(clean_word)
        .filter(|w| is_index_term(w))
        .collect()
}

/// Expand a token stream into all n-grams for `n` in `1..=max_n`.
///
/// Multi-word terms join their words with a single space. Unigrams come
/// first, then bigrams, and so on. Orders longer than the stream add
/// nothing.
pub fn ngrams(tokens: &[String], max_n: usize) -> Vec<String> {
    let mut terms = tokens.to_vec();
    for n in 2..=max_n.min(tokens.len()) {
        terms.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    terms
}

/// Tokenize and expand to n-grams in one step
pub fn analyze(text: &str, max_n: usize) -> Vec<String> {
    ngrams(&tokenize(text), max_n)
}
