// "Did you mean" suggestions for mistyped player names.
//
// Similarity is the matching-blocks ratio 2*M / (len(a) + len(b)), where M
// counts characters in the longest common substring, found recursively on
// either side of each match. Comparison is case-sensitive.

use std::cmp::Ordering;

/// Maximum number of suggestions shown for an unknown name.
pub const SUGGESTION_LIMIT: usize = 5;

/// Minimum similarity for a name to be suggested.
pub const SUGGESTION_CUTOFF: f64 = 0.6;

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(i, j, len)`. Ties go to the earliest start in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // prev[j] = length of the common suffix ending at a[i-1], b[j-1].
    let mut prev = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut cur = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                cur[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = cur;
    }
    best
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut stack = vec![((0, a.len()), (0, b.len()))];
    while let Some(((alo, ahi), (blo, bhi))) = stack.pop() {
        let (i, j, k) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            stack.push(((alo, i), (blo, j)));
        }
        if i + k < ahi && j + k < bhi {
            stack.push(((i + k, ahi), (j + k, bhi)));
        }
    }
    total
}

/// Similarity in `[0, 1]`; identical strings score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let len = a.len() + b.len();
    if len == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / len as f64
}

/// Up to `limit` candidates scoring at least `cutoff` against `word`, best
/// first. Equal scores order by name, descending.
pub fn close_matches<'a, I>(word: &str, candidates: I, limit: usize, cutoff: f64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f64, &'a str)> = candidates
        .into_iter()
        .map(|c| (similarity(c, word), c))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.1.cmp(a.1))
    });
    scored.into_iter().take(limit).map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn ratio_counts_recursive_matching_blocks() {
        assert!(approx_eq(similarity("abcd", "bcde"), 0.75, 1e-12));
        assert!(approx_eq(similarity("apple", "appel"), 0.8, 1e-12));
        assert!(approx_eq(similarity("ape", "appel"), 0.75, 1e-12));
        assert!(approx_eq(similarity("peach", "appel"), 0.4, 1e-12));
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("Josh Allen", "Josh Allen"), 1.0);
    }

    #[test]
    fn ratio_is_case_sensitive() {
        assert!(similarity("ABC", "abc") < 0.1);
    }

    #[test]
    fn best_matches_first_above_cutoff() {
        let words = ["ape", "apple", "peach", "puppy"];
        assert_eq!(close_matches("appel", words, 5, 0.6), vec!["apple", "ape"]);
    }

    #[test]
    fn limit_caps_the_result() {
        let names = ["Ja Marr Chase", "Ja'Marr Chase", "JaMarr Chase", "Chase"];
        let matches = close_matches("JaMar Chase", names, 2, 0.6);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], "JaMarr Chase");
    }

    #[test]
    fn nothing_close_returns_empty() {
        let names = ["Patrick Mahomes", "Travis Kelce"];
        assert!(close_matches("zzz", names, SUGGESTION_LIMIT, SUGGESTION_CUTOFF).is_empty());
    }

    #[test]
    fn equal_scores_order_by_name_descending() {
        let names = ["abx", "aby"];
        assert_eq!(close_matches("abz", names, 5, 0.6), vec!["aby", "abx"]);
    }
}
