//! SA grammar: Torrens title references and plan parcels.
//!
//! Two independent sub-grammars are tried per line in fixed priority: the
//! title reference shape (`CT6204/831`) first, then plan-parcel pairs
//! (`D117877 A22`) in either token order.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, Result};
use crate::normalize::{collapse_whitespace, fold_separators, strip_noise_tokens};
use crate::types::{Jurisdiction, MalformedEntry, ParseResult, ParsedIdentifier};

/// Filler words stripped before plan-parcel classification.
const NOISE_TOKENS: &[&str] = &["LOT", "PLAN", "PARCEL"];

/// Certificate prefix plus volume/folio register coordinates.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>[A-Z]{1,3})(?P<volume>\d{1,6})/(?P<folio>\d{1,6})$")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+\d+[A-Z0-9]*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid regex"));

/// Parse newline-delimited SA input.
pub(crate) fn parse(raw_text: &str) -> ParseResult {
    let mut result = ParseResult::new();

    for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        // Title references take priority over plan parcels; when both
        // sub-grammars reject the line, the plan-parcel reason is reported.
        if let Ok(identifier) = parse_title_reference(line) {
            result.push_valid(identifier);
            continue;
        }

        match parse_plan_parcel(line) {
            Ok(identifier) => result.push_valid(identifier),
            Err(error) => result.push_malformed(MalformedEntry::new(line, &error)),
        }
    }

    result
}

/// `CT6204/831`: certificate prefix with volume and folio.
fn parse_title_reference(line: &str) -> Result<ParsedIdentifier> {
    let cleaned: String = line.to_uppercase().split_whitespace().collect();
    let captures = TITLE_REF_PATTERN
        .captures(&cleaned)
        .ok_or(ParseError::InvalidSaTitleReference)?;

    let volume = captures["volume"].to_string();
    let folio = captures["folio"].to_string();

    Ok(ParsedIdentifier::new(cleaned, Jurisdiction::Sa, line)
        .with_volume(volume)
        .with_folio(folio))
}

/// `D117877 A22`: plan and lot in either order, possibly split over tokens.
fn parse_plan_parcel(line: &str) -> Result<ParsedIdentifier> {
    let folded = fold_separators(&line.to_uppercase(), &['/', ',', ';']);
    let stripped = strip_noise_tokens(&collapse_whitespace(&folded), NOISE_TOKENS);
    let tokens: Vec<&str> = stripped.split_whitespace().collect();

    if tokens.len() < 2 {
        return Err(ParseError::MissingSaPlanParcel);
    }

    let (plan, lot) = classify(&tokens).ok_or(ParseError::InvalidSaPlanParcel)?;
    let canonical = format!("{plan} {lot}");

    Ok(ParsedIdentifier::new(canonical, Jurisdiction::Sa, line)
        .with_plan(plan)
        .with_lot(lot))
}

/// Identify exactly one plan and one lot among the tokens.
///
/// Two tokens classify directly; with more, a plan typed with spaces in it
/// is reassembled by concatenation before falling back to the end tokens
/// (which drops interior tokens, the most lenient reading).
fn classify(tokens: &[&str]) -> Option<(String, String)> {
    if tokens.len() == 2 {
        return classify_pair(tokens[0], tokens[1]);
    }

    classify_joined(tokens).or_else(|| classify_pair(tokens[0], tokens[tokens.len() - 1]))
}

/// Decide which of two tokens is the plan and which is the lot.
///
/// Short lots like `A22` satisfy the plan shape too, so both orders can
/// classify; the token with the longer digit run is then taken as the plan
/// (tie favours the first token) so that `D117877 A22` and `A22 D117877`
/// canonicalize identically.
fn classify_pair(first: &str, last: &str) -> Option<(String, String)> {
    let plan_first = is_plan(first) && is_lot(last);
    let plan_last = is_plan(last) && is_lot(first);

    match (plan_first, plan_last) {
        (true, true) if digit_run(last) > digit_run(first) => {
            Some((last.to_string(), first.to_string()))
        }
        (true, _) => Some((first.to_string(), last.to_string())),
        (false, true) => Some((last.to_string(), first.to_string())),
        (false, false) => None,
    }
}

/// Joined forms: all-but-one tokens concatenated as the plan.
///
/// Both directions are tried; when both produce a valid plan/lot split, the
/// longer digit run again decides which concatenation is the plan.
fn classify_joined(tokens: &[&str]) -> Option<(String, String)> {
    let first = tokens[0];
    let last = tokens[tokens.len() - 1];
    let joined_front = tokens[..tokens.len() - 1].concat();
    let joined_back = tokens[1..].concat();

    let front_ok = is_plan(&joined_front) && is_lot(last);
    let back_ok = is_plan(&joined_back) && is_lot(first);

    let front = front_ok.then(|| (joined_front, last.to_string()));
    let back = back_ok.then(|| (joined_back, first.to_string()));

    match (front, back) {
        (Some(front), Some(back)) if digit_run(&back.0) > digit_run(&front.0) => Some(back),
        (Some(front), _) => Some(front),
        (None, back) => back,
    }
}

fn is_plan(token: &str) -> bool {
    PLAN_PATTERN.is_match(token)
}

fn is_lot(token: &str) -> bool {
    LOT_PATTERN.is_match(token)
}

fn digit_run(token: &str) -> usize {
    token.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_reference() {
        let result = parse("CT6204/831");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.malformed.len(), 0);
        assert_eq!(result.valid[0].canonical_id, "CT6204/831");
        assert_eq!(result.valid[0].jurisdiction, Jurisdiction::Sa);
        assert_eq!(result.valid[0].volume.as_deref(), Some("6204"));
        assert_eq!(result.valid[0].folio.as_deref(), Some("831"));
        assert!(result.valid[0].plan.is_none());
    }

    #[test]
    fn test_title_reference_tolerates_spaces_and_case() {
        let result = parse("ct 6204/831");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].canonical_id, "CT6204/831");
        assert_eq!(result.valid[0].raw_input, "ct 6204/831");
    }

    #[test]
    fn test_plan_parcel_plan_first() {
        let result = parse("D117877 A22");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].canonical_id, "D117877 A22");
        assert_eq!(result.valid[0].plan.as_deref(), Some("D117877"));
        assert_eq!(result.valid[0].lot.as_deref(), Some("A22"));
    }

    #[test]
    fn test_plan_parcel_order_invariant() {
        let forward = parse("D117877 A22");
        let backward = parse("A22 D117877");

        assert_eq!(forward.valid[0].canonical_id, "D117877 A22");
        assert_eq!(backward.valid[0].canonical_id, "D117877 A22");
        assert_eq!(backward.valid[0].plan.as_deref(), Some("D117877"));
        assert_eq!(backward.valid[0].lot.as_deref(), Some("A22"));
    }

    #[test]
    fn test_plan_parcel_numeric_lot() {
        let result = parse("F218556 50");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].canonical_id, "F218556 50");
        assert_eq!(result.valid[0].lot.as_deref(), Some("50"));
    }

    #[test]
    fn test_plan_parcel_noise_and_slashes() {
        let result = parse("Lot 50 Plan F218556");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].canonical_id, "F218556 50");

        let result = parse("50/F218556");
        assert_eq!(result.valid[0].canonical_id, "F218556 50");
    }

    #[test]
    fn test_plan_parcel_joined_plan_code() {
        // A plan typed with a space (`D 117877`) joins back together.
        let result = parse("D 117877 A22");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].canonical_id, "D117877 A22");
    }

    #[test]
    fn test_plan_parcel_joined_plan_code_reversed() {
        let result = parse("A22 D 117877");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].canonical_id, "D117877 A22");
        assert_eq!(result.valid[0].plan.as_deref(), Some("D117877"));
        assert_eq!(result.valid[0].lot.as_deref(), Some("A22"));
    }

    #[test]
    fn test_single_token_line() {
        let result = parse("D117877");

        assert_eq!(result.valid.len(), 0);
        assert_eq!(
            result.malformed[0].error_message,
            "Invalid SA plan parcel. Expected plan and lot values"
        );
    }

    #[test]
    fn test_unclassifiable_tokens() {
        let result = parse("6204 831");

        assert_eq!(result.valid.len(), 0);
        assert_eq!(
            result.malformed[0].error_message,
            "Invalid SA plan parcel. Expected format like 'D117877 A22'"
        );
    }

    #[test]
    fn test_title_reference_priority_over_plan_parcel() {
        // `CT6204/831` could fold into plan-parcel tokens, but the title
        // sub-grammar claims it first.
        let result = parse("CT6204/831\nD117877 A22");

        assert_eq!(result.valid.len(), 2);
        assert!(result.valid[0].volume.is_some());
        assert!(result.valid[1].plan.is_some());
    }

    #[test]
    fn test_failure_does_not_abort_later_lines() {
        let result = parse("garbage !!\nCT6204/831");

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.malformed.len(), 1);
        assert_eq!(result.malformed[0].raw_input, "garbage !!");
    }
}
