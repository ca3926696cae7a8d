//! Approximate string matching
//!
//! Every matching step in the scanner goes through this module: a
//! Levenshtein distance over Unicode scalar values and a best-candidate
//! search that honours the reference list's authored order.

use std::cmp::min;

/// Length-scaled distance budget for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// `min(2, len / 3)`: exclusion, artificial, additive and processed-food
    /// matching
    Tight,

    /// `min(3, len / 2)`: natural plant matching, the fallback stage
    Loose,
}

impl Threshold {
    /// Maximum accepted edit distance for a token of `token_len` chars
    pub fn max_distance(self, token_len: usize) -> usize {
        match self {
            Self::Tight => min(2, token_len / 3),
            Self::Loose => min(3, token_len / 2),
        }
    }
}

/// A candidate that won a best-match search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Canonical candidate name, casing preserved
    pub name: &'a str,

    /// Edit distance between the token and the lowercased candidate
    pub distance: usize,
}

/// Levenshtein distance between two strings, counted in chars
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance_chars(&a, &b)
}

/// Levenshtein distance over pre-split char slices
///
/// Keeps one row of the (|a|+1)×(|b|+1) matrix at a time.
pub fn edit_distance_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        // row[0] still holds the diagonal value for column 1
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1)
                .min(row[j] + 1)
                .min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b.len()]
}

/// Find the closest candidate within `max_distance` of `token`
///
/// Candidates are lowercased before comparison. Only a strictly lower
/// distance replaces the current best, so on ties the candidate that comes
/// first in iteration order wins.
pub fn best_match<'a, I>(token: &str, candidates: I, max_distance: usize) -> Option<Match<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let token: Vec<char> = token.chars().collect();
    let folded: Vec<(&'a str, Vec<char>)> = candidates
        .into_iter()
        .map(|name| (name, name.to_lowercase().chars().collect()))
        .collect();

    best_of(
        &token,
        folded.iter().map(|(name, chars)| (*name, chars.as_slice())),
        max_distance,
    )
}

/// Best-match search over candidates whose folded form is already split
/// into chars
pub(crate) fn best_of<'a, 'b, I>(
    token: &[char],
    candidates: I,
    max_distance: usize,
) -> Option<Match<'a>>
where
    I: IntoIterator<Item = (&'a str, &'b [char])>,
{
    let mut best: Option<Match<'a>> = None;

    for (name, folded) in candidates {
        // Distance is at least the length difference; skip what cannot win.
        let bound = best.map_or(max_distance, |m| m.distance);
        if token.len().abs_diff(folded.len()) > bound {
            continue;
        }

        let distance = edit_distance_chars(token, folded);
        if distance > max_distance {
            continue;
        }
        if best.map_or(true, |m| distance < m.distance) {
            best = Some(Match { name, distance });
            if distance == 0 {
                break;
            }
        }
    }

    best
}

/// Existence test: is any candidate within `max_distance` of `token`?
pub(crate) fn any_within<'b, I>(token: &[char], candidates: I, max_distance: usize) -> bool
where
    I: IntoIterator<Item = &'b [char]>,
{
    candidates.into_iter().any(|folded| {
        token.len().abs_diff(folded.len()) <= max_distance
            && edit_distance_chars(token, folded) <= max_distance
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("carot", "carrots"), 2);
        assert_eq!(edit_distance("patotoes", "potatoes"), 2);
    }

    #[test]
    fn test_edit_distance_counts_code_points() {
        // One substitution, even though 'ñ' is two bytes in UTF-8
        assert_eq!(edit_distance("jalapeno", "jalapeño"), 1);
        assert_eq!(edit_distance("橙子", "橘子"), 1);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(Threshold::Tight.max_distance(0), 0);
        assert_eq!(Threshold::Tight.max_distance(5), 1);
        assert_eq!(Threshold::Tight.max_distance(6), 2);
        assert_eq!(Threshold::Tight.max_distance(30), 2);

        assert_eq!(Threshold::Loose.max_distance(3), 1);
        assert_eq!(Threshold::Loose.max_distance(5), 2);
        assert_eq!(Threshold::Loose.max_distance(6), 3);
        assert_eq!(Threshold::Loose.max_distance(30), 3);
    }

    #[test]
    fn test_best_match_prefers_lowest_distance() {
        let candidates = ["carrots", "parrots", "carrot"];
        let found = best_match("carrot", candidates, 2).unwrap();
        assert_eq!(found.name, "carrot");
        assert_eq!(found.distance, 0);
    }

    #[test]
    fn test_best_match_first_wins_ties() {
        // "cat" is one edit away from both
        let found = best_match("cat", ["bat", "hat"], 1).unwrap();
        assert_eq!(found.name, "bat");

        let found = best_match("cat", ["hat", "bat"], 1).unwrap();
        assert_eq!(found.name, "hat");
    }

    #[test]
    fn test_best_match_lowercases_candidates_keeps_canonical() {
        let found = best_match("red 40", ["Red 40"], 2).unwrap();
        assert_eq!(found.name, "Red 40");
        assert_eq!(found.distance, 0);
    }

    #[test]
    fn test_best_match_respects_threshold() {
        assert!(best_match("xyz", ["carrots"], 3).is_none());
        assert!(best_match("abcdef", ["abcxyz"], 3).is_some());
        assert!(best_match("abcdef", ["abwxyz"], 3).is_none());
    }

    #[test]
    fn test_best_match_empty_candidates() {
        assert!(best_match("carrots", std::iter::empty(), 3).is_none());
    }

    #[test]
    fn test_any_within() {
        let pork: Vec<char> = "pork".chars().collect();
        let beef: Vec<char> = "beef".chars().collect();
        let token: Vec<char> = "porc".chars().collect();

        assert!(any_within(&token, [pork.as_slice(), beef.as_slice()], 1));
        assert!(!any_within(&token, [beef.as_slice()], 1));
    }
}
