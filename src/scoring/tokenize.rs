//! Word tokenization and stopword filtering.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English stopwords (NLTK list).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

#[inline]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Fused forms split into two words (`"cannot"` → `"can"`, `"not"`).
const FUSED: [(&str, usize); 6] = [
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// Clitics split off the end of a word, after the apostrophe.
const CLITICS: [&str; 6] = ["s", "m", "d", "ll", "re", "ve"];

/// Lower-cases `sentence` and splits it into words, Penn Treebank style.
///
/// Whitespace separates words and surrounding punctuation is stripped. A trailing
/// `n't` is split off whole (`"don't"` → `"do"`, `"n't"`; `"can't"` → `"ca"`,
/// `"n't"`), as are `'s`, `'m`, `'d`, `'ll`, `'re` and `'ve`. Fused forms such as
/// `"cannot"` and `"gonna"` are split in two. Other apostrophes stay inside the word.
pub fn word_tokens(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    let mut words = Vec::new();

    for chunk in lowered.split_whitespace() {
        let chunk = chunk.trim_matches(|c: char| !c.is_alphanumeric() && !is_apostrophe(c));
        let chunk = chunk.trim_matches(is_apostrophe);
        if !chunk.is_empty() {
            split_word(chunk, &mut words);
        }
    }

    words
}

fn split_word(word: &str, out: &mut Vec<String>) {
    if let Some(&(_, at)) = FUSED.iter().find(|(fused, _)| *fused == word) {
        let (head, tail) = word.split_at(at);
        out.extend([head.to_string(), tail.to_string()]);
        return;
    }

    if let Some(stem) = ["n't", "n\u{2019}t"].iter().find_map(|neg| word.strip_suffix(neg)) {
        if !stem.is_empty() {
            out.push(stem.to_string());
        }
        out.push(word[stem.len()..].to_string());
        return;
    }

    if let Some(pos) = word.rfind(is_apostrophe) {
        let (stem, clitic) = word.split_at(pos);
        let suffix = clitic.trim_start_matches(is_apostrophe);
        if !stem.is_empty() && CLITICS.contains(&suffix) {
            out.extend([stem.to_string(), clitic.to_string()]);
            return;
        }
    }

    out.push(word.to_string());
}

/// Content tokens: alphabetic, non-stopword words in input order (duplicates kept).
pub fn content_tokens(sentence: &str) -> Vec<String> {
    word_tokens(sentence)
        .into_iter()
        .filter(|w| w.chars().all(char::is_alphabetic) && !is_stopword(w))
        .collect()
}

#[inline]
fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}
