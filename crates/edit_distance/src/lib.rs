//! Insert/delete string distance, plain recursive and memoized.
//!
//! The distance counts the minimum number of single-character insertions and
//! deletions turning the second string into the first; matching leading
//! characters cost nothing. There is no substitution move, so
//! `distance("casa", "cara") == 2`, not 1.

/// Slot value for "no result yet"; also used as the cost of a mismatched
/// keep move so it always loses the three-way minimum.
const UNSET: usize = usize::MAX;

/// Plain recursive distance. Exponential in the string lengths; fine for the
/// short inputs it is meant for.
pub fn edit_distance(s1: &str, s2: &str) -> usize {
    distance(s1.as_bytes(), s2.as_bytes())
}

fn distance(s1: &[u8], s2: &[u8]) -> usize {
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let keep = if s1[0] == s2[0] {
        distance(&s1[1..], &s2[1..])
    } else {
        UNSET
    };
    let delete = 1 + distance(s1, &s2[1..]);
    let insert = 1 + distance(&s1[1..], s2);

    keep.min(delete).min(insert)
}

/// Memoized distance, keyed by the pair of remaining suffix lengths.
/// `O(len1 * len2)` time and space.
pub fn edit_distance_dyn(s1: &str, s2: &str) -> usize {
    let (s1, s2) = (s1.as_bytes(), s2.as_bytes());
    if s1.is_empty() || s2.is_empty() {
        return s1.len() + s2.len();
    }

    let mut memo = vec![UNSET; s1.len() * s2.len()];
    distance_memo(s1, s2, s2.len(), &mut memo)
}

fn distance_memo(s1: &[u8], s2: &[u8], width: usize, memo: &mut [usize]) -> usize {
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let slot = (s1.len() - 1) * width + (s2.len() - 1);
    if memo[slot] != UNSET {
        return memo[slot];
    }

    let keep = if s1[0] == s2[0] {
        distance_memo(&s1[1..], &s2[1..], width, memo)
    } else {
        // One less than the sentinel so it never masks an empty slot.
        UNSET - 1
    };
    let delete = 1 + distance_memo(s1, &s2[1..], width, memo);
    let insert = 1 + distance_memo(&s1[1..], s2, width, memo);

    let best = keep.min(delete).min(insert);
    memo[slot] = best;
    best
}

/// Word separators of a text to be corrected: spaces, newlines and the
/// punctuation expected in prose. Tabs and carriage returns stay part of
/// their token.
pub const TEXT_DELIMITERS: [char; 5] = [' ', '.', ',', ':', '\n'];

/// Word separators of a dictionary file: one entry per space- or
/// newline-separated token.
pub const DICTIONARY_DELIMITERS: [char; 2] = [' ', '\n'];

pub fn split_words(text: &str, delimiters: &[char]) -> Vec<String> {
    text.split(delimiters)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// All dictionary entries at the minimal distance from one word, in
/// dictionary order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordCorrections {
    pub word: String,
    pub min_distance: usize,
    pub candidates: Vec<String>,
}

pub fn best_corrections(word: &str, dictionary: &[String]) -> WordCorrections {
    let mut min_distance = UNSET;
    let mut candidates = Vec::new();

    for entry in dictionary {
        let distance = edit_distance_dyn(entry, word);
        if distance < min_distance {
            min_distance = distance;
            candidates.clear();
        }
        if distance == min_distance {
            candidates.push(entry.clone());
        }
    }

    WordCorrections {
        word: word.to_string(),
        min_distance,
        candidates,
    }
}
