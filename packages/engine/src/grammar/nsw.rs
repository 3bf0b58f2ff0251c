//! NSW lot/plan grammar.
//!
//! Canonical form is `<lot>//<plan>` or `<lot>/<section>//<plan>`. Each line
//! is tried against the range shorthand, then the canonical pattern, then a
//! tokenizing fallback that reassembles plan codes typed with a space in
//! them (`DP 131118`).

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, Result};
use crate::normalize::normalize_line;
use crate::types::{Jurisdiction, MalformedEntry, ParseResult, ParsedIdentifier};

/// Widest lot span a range line may expand to.
const MAX_RANGE_SPAN: u32 = 100;

/// Tokens that carry no identifier information.
const NOISE_TOKENS: &[&str] = &["LOT", "LOTS", "SEC", "SECTION", "SECT", "PLAN"];

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOT_SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+[A-Z0-9]*$").expect("valid regex"));

/// `<lot>[/<section>]//<plan>` with the double slash required before the plan.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CANONICAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lot>[A-Z0-9]+)(?:/(?P<section>[A-Z0-9]+))?//(?P<plan>[A-Z]+[A-Z0-9]*)$")
        .expect("valid regex")
});

/// `<start>-<end>//<plan>` range shorthand, whitespace tolerated after the hyphen.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<start>[A-Z0-9]+)-\s*(?P<end>[A-Z0-9]+)//(?P<plan>.+)$")
        .expect("valid regex")
});

/// Separator runs in the tokenizing fallback.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FALLBACK_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;/]+").expect("valid regex"));

/// Parse newline-delimited NSW input.
pub(crate) fn parse(raw_text: &str) -> ParseResult {
    let mut result = ParseResult::new();

    for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_line(line) {
            Ok(identifiers) => {
                for identifier in identifiers {
                    result.push_valid(identifier);
                }
            }
            Err(error) => result.push_malformed(MalformedEntry::new(line, &error)),
        }
    }

    result
}

/// Parse one line, expanding a range shorthand to multiple identifiers.
fn parse_line(line: &str) -> Result<Vec<ParsedIdentifier>> {
    let upper = normalize_line(line);

    if let Some(expanded) = expand_range(&upper, line)? {
        return Ok(expanded);
    }

    let (canonical, lot, section, plan) = parse_fragment(&upper)?;
    let mut identifier = ParsedIdentifier::new(canonical, Jurisdiction::Nsw, line)
        .with_lot(lot)
        .with_plan(plan);
    if let Some(section) = section {
        identifier = identifier.with_section(section);
    }

    Ok(vec![identifier])
}

/// Expand `<start>-<end>//<plan>` into one identifier per lot.
///
/// Returns `Ok(None)` when the line is not a numeric range so the caller
/// falls through to the single-identifier paths.
fn expand_range(upper: &str, raw_line: &str) -> Result<Option<Vec<ParsedIdentifier>>> {
    let Some(captures) = RANGE_PATTERN.captures(upper) else {
        return Ok(None);
    };

    let start_text = &captures["start"];
    let end_text = &captures["end"];
    if !is_numeric(start_text) || !is_numeric(end_text) {
        return Ok(None);
    }

    let plan = normalize_plan(&captures["plan"])?;
    let start: u32 = start_text.parse().map_err(|_| ParseError::RangeTooLarge)?;
    let end: u32 = end_text.parse().map_err(|_| ParseError::RangeTooLarge)?;
    if end < start || end - start > MAX_RANGE_SPAN {
        return Err(ParseError::RangeTooLarge);
    }

    let mut expanded = Vec::with_capacity((end - start + 1) as usize);
    for number in start..=end {
        let lot = number.to_string();
        let canonical = format!("{lot}//{plan}");
        expanded.push(
            ParsedIdentifier::new(canonical, Jurisdiction::Nsw, raw_line)
                .with_lot(lot)
                .with_plan(plan.clone()),
        );
    }

    Ok(Some(expanded))
}

/// Parse a single lot/plan fragment into `(canonical, lot, section, plan)`.
fn parse_fragment(upper: &str) -> Result<(String, String, Option<String>, String)> {
    let folded = upper.replace('\\', "/");

    if let Some(captures) = CANONICAL_PATTERN.captures(&folded) {
        return canonical_identifier(
            &captures["lot"],
            captures.name("section").map(|m| m.as_str()),
            &captures["plan"],
        );
    }

    // Tokenizing fallback: strip noise words, split on any separator, and
    // rebuild a plan code that was typed with a space in it.
    let mut tokens: Vec<&str> = FALLBACK_SPLIT
        .split(&folded)
        .filter(|token| !token.is_empty() && !NOISE_TOKENS.contains(token))
        .collect();
    if tokens.is_empty() {
        return Err(ParseError::UnparseableNswLine);
    }

    let plan = take_plan(&mut tokens)?;
    if tokens.is_empty() {
        return Err(ParseError::MissingNswLot);
    }

    let lot = tokens[0];
    let section = tokens.get(1).copied();
    canonical_identifier(lot, section, &plan)
}

/// Pop the plan off the token list, rejoining codes like `DP 131118`.
fn take_plan(tokens: &mut Vec<&str>) -> Result<String> {
    let Some(suffix) = tokens.pop() else {
        return Err(ParseError::MissingNswPlan);
    };

    if is_numeric(suffix) {
        if let Some(prefix) = tokens.last().copied() {
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_uppercase()) {
                tokens.pop();
                return Ok(format!("{prefix}{suffix}"));
            }
        }
    }

    Ok(suffix.to_string())
}

/// Validate components and assemble the canonical id.
fn canonical_identifier(
    lot: &str,
    section: Option<&str>,
    plan: &str,
) -> Result<(String, String, Option<String>, String)> {
    let lot = clean_component(lot).ok_or_else(|| ParseError::InvalidNswLot(lot.to_string()))?;
    let section = section
        .map(|s| clean_component(s).ok_or_else(|| ParseError::InvalidNswSection(s.to_string())))
        .transpose()?;
    let plan = normalize_plan(plan)?;

    let canonical = match &section {
        Some(section) => format!("{lot}/{section}//{plan}"),
        None => format!("{lot}//{plan}"),
    };

    Ok((canonical, lot, section, plan))
}

/// Strip internal whitespace and check the lot/section character set.
fn clean_component(value: &str) -> Option<String> {
    let cleaned: String = value.split_whitespace().collect();
    (!cleaned.is_empty() && LOT_SECTION_PATTERN.is_match(&cleaned)).then_some(cleaned)
}

/// Strip internal whitespace and check the plan character set.
fn normalize_plan(value: &str) -> Result<String> {
    let cleaned: String = value.split_whitespace().collect();
    if !cleaned.is_empty() && PLAN_PATTERN.is_match(&cleaned) {
        Ok(cleaned)
    } else {
        Err(ParseError::InvalidNswPlan(value.to_string()))
    }
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
