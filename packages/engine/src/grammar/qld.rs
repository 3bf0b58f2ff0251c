//! QLD lotplan grammar.
//!
//! Canonical form is `<lot><planPrefix><planNumber>` with no separators
//! (`1RP912949`). One line may carry several identifiers separated by
//! commas, the word `and`, or `&`; each fragment runs through an ordered
//! strategy table and duplicate canonical ids are dropped per call.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ParseError;
use crate::normalize::{collapse_whitespace, fold_separators, strip_noise_tokens};
use crate::types::{Jurisdiction, MalformedEntry, ParseResult, ParsedIdentifier};

/// Filler words users type around lotplans.
const NOISE_TOKENS: &[&str] = &[
    "LOT", "PLAN", "ON", "OF", "NUMBER", "NO", "NO.", "STAGE", "UNIT",
];

/// Separators folded to spaces before matching.
const SEPARATORS: &[char] = &['\\', '/', '-', ',', '\t'];

/// Numeric lot, 1-4 letter plan prefix and plan number, whitespace separated.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOTPLAN_SPACED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lot>\d+[A-Z]?)\s+(?P<prefix>[A-Z]{1,4})\s*(?P<number>\d+)$")
        .expect("valid regex")
});

/// Same shape with all separators removed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOTPLAN_COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lot>\d+[A-Z]?)(?P<prefix>[A-Z]{1,4})(?P<number>\d+)$").expect("valid regex")
});

/// A plan on its own (`RP912949`), pairable with a preceding lot token.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLAN_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<prefix>[A-Z]{1,4})\s*(?P<number>\d+)$").expect("valid regex"));

/// A lot on its own (`1`, `2A`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOT_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[A-Z]?$").expect("valid regex"));

/// Lines split on newlines and semicolons.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n;]+").expect("valid regex"));

/// Fragments split on commas, the standalone word `and`, or `&`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FRAGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),|\band\b|&").expect("valid regex"));

/// A successfully matched lotplan, before de-duplication.
struct LotPlan {
    canonical: String,
    lot: String,
    plan: String,
}

/// Ordered matching strategies; the first to produce a lotplan wins.
const STRATEGIES: &[fn(&str) -> Option<LotPlan>] = &[
    match_spaced,
    match_compact,
    match_token_pairs,
    match_plan_with_leading_lot,
];

/// Parse free-form QLD input, de-duplicating by canonical id.
pub(crate) fn parse(raw_text: &str) -> ParseResult {
    let mut result = ParseResult::new();
    let mut seen: HashSet<String> = HashSet::new();

    for fragment in split_fragments(raw_text) {
        match parse_fragment(&fragment) {
            Some(lotplan) => {
                // Later duplicates are dropped silently, not reported.
                if !seen.insert(lotplan.canonical.clone()) {
                    continue;
                }
                result.push_valid(
                    ParsedIdentifier::new(lotplan.canonical, Jurisdiction::Qld, fragment)
                        .with_lot(lotplan.lot)
                        .with_plan(lotplan.plan),
                );
            }
            None => result.push_malformed(MalformedEntry::new(
                fragment,
                &ParseError::UnmatchedQldFragment,
            )),
        }
    }

    result
}

/// Split free-form input into candidate fragments, preserving line order.
fn split_fragments(raw_text: &str) -> Vec<String> {
    let mut fragments = Vec::new();

    for line in LINE_SPLIT.split(raw_text).map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = FRAGMENT_SPLIT
            .split(line)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            // A line of nothing but separators still gets reported once.
            fragments.push(line.to_string());
        } else {
            fragments.extend(parts.into_iter().map(String::from));
        }
    }

    fragments
}

/// Run the strategy table over one fragment, first match wins.
fn parse_fragment(fragment: &str) -> Option<LotPlan> {
    let normalized = normalize_fragment(fragment);
    if normalized.is_empty() {
        return None;
    }

    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&normalized))
}

/// Uppercase, fold separators to spaces and drop filler words.
fn normalize_fragment(fragment: &str) -> String {
    let folded = fold_separators(&fragment.trim().to_uppercase(), SEPARATORS);
    strip_noise_tokens(&collapse_whitespace(&folded), NOISE_TOKENS)
}

fn lotplan_from_captures(captures: &Captures<'_>) -> LotPlan {
    let lot = captures["lot"].to_string();
    let plan = format!("{}{}", &captures["prefix"], &captures["number"]);
    LotPlan {
        canonical: format!("{lot}{plan}"),
        lot,
        plan,
    }
}

/// `1 RP 912949`: lot and plan separated by whitespace.
fn match_spaced(fragment: &str) -> Option<LotPlan> {
    LOTPLAN_SPACED
        .captures(fragment)
        .map(|captures| lotplan_from_captures(&captures))
}

/// `1RP912949`: the compact form, tried on the space-stripped fragment.
fn match_compact(fragment: &str) -> Option<LotPlan> {
    let compact = fragment.replace(' ', "");
    LOTPLAN_COMPACT
        .captures(&compact)
        .map(|captures| lotplan_from_captures(&captures))
}

/// Retry the spaced pattern over adjacent token pairs.
fn match_token_pairs(fragment: &str) -> Option<LotPlan> {
    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    tokens
        .windows(2)
        .find_map(|pair| match_spaced(&format!("{} {}", pair[0], pair[1])))
}

/// A plan-shaped token paired with the numeric-like token right before it.
fn match_plan_with_leading_lot(fragment: &str) -> Option<LotPlan> {
    let tokens: Vec<&str> = fragment.split_whitespace().collect();

    tokens.iter().enumerate().skip(1).find_map(|(idx, token)| {
        let captures = PLAN_ONLY.captures(token)?;
        let lot = tokens[idx - 1];
        LOT_ONLY.is_match(lot).then(|| {
            let plan = format!("{}{}", &captures["prefix"], &captures["number"]);
            LotPlan {
                canonical: format!("{lot}{plan}"),
                lot: lot.to_string(),
                plan,
            }
        })
    })
}
