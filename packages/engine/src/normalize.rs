//! Shared normalization primitives used by every grammar.
//!
//! All transforms here are deterministic, side-effect-free and have no
//! failure mode. Grammar modules layer their own pattern tables and noise
//! word sets on top of these.

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace runs, collapsed to a single space by [`collapse_whitespace`].
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse whitespace runs to single spaces.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").to_string()
}

/// Trim, uppercase and collapse whitespace in a raw input line.
#[must_use]
pub fn normalize_line(text: &str) -> String {
    collapse_whitespace(text.trim()).to_uppercase()
}

/// Replace every occurrence of the given separator characters with a space.
///
/// Runs of separators become runs of spaces; callers collapse afterwards.
#[must_use]
pub fn fold_separators(text: &str, separators: &[char]) -> String {
    text.chars()
        .map(|c| if separators.contains(&c) { ' ' } else { c })
        .collect()
}

/// Split on whitespace and drop tokens present in the noise table.
///
/// Noise tables are uppercase, so callers uppercase their input first.
#[must_use]
pub fn strip_noise_tokens(text: &str, noise: &[&str]) -> String {
    text.split_whitespace()
        .filter(|token| !noise.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\t c"), "a b c");
        assert_eq!(collapse_whitespace("already single"), "already single");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("  lot 13   dp1242624 "), "LOT 13 DP1242624");
        assert_eq!(normalize_line("\t1//dp131118\t"), "1//DP131118");
    }

    #[test]
    fn test_fold_separators() {
        assert_eq!(fold_separators("1/2\\3", &['/', '\\']), "1 2 3");
        assert_eq!(fold_separators("a,b;c", &[',', ';']), "a b c");
        // Characters outside the set pass through untouched.
        assert_eq!(fold_separators("1-2", &['/', '\\']), "1-2");
    }

    #[test]
    fn test_strip_noise_tokens() {
        assert_eq!(
            strip_noise_tokens("LOT 1 ON RP912949", &["LOT", "ON"]),
            "1 RP912949"
        );
        assert_eq!(strip_noise_tokens("LOT PLAN", &["LOT", "PLAN"]), "");
        // Noise matching is whole-token only.
        assert_eq!(strip_noise_tokens("LOTS 1", &["LOT"]), "LOTS 1");
    }
}
