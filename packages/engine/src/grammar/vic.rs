//! VIC standard parcel identifier grammar.
//!
//! Canonical form is `<lot>\<plan>`. A line containing a backslash splits
//! directly; anything else is tokenized and scanned right-to-left for a
//! plan-shaped token, with the remaining tokens supplying the lot.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, Result};
use crate::normalize::{collapse_whitespace, fold_separators, strip_noise_tokens};
use crate::types::{Jurisdiction, MalformedEntry, ParseResult, ParsedIdentifier};

const NOISE_TOKENS: &[&str] = &["LOT"];

/// 1-4 letter plan prefix followed by digits (`PS433970`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,4}\d+[A-Z0-9]*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid regex"));

/// Parse newline-delimited VIC input.
pub(crate) fn parse(raw_text: &str) -> ParseResult {
    let mut result = ParseResult::new();

    for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_line(line) {
            Ok(identifier) => result.push_valid(identifier),
            Err(error) => result.push_malformed(MalformedEntry::new(line, &error)),
        }
    }

    result
}

/// Normalize one line to the backslash canonical form.
fn parse_line(line: &str) -> Result<ParsedIdentifier> {
    let upper = line.to_uppercase();

    // Backslash input is already in canonical shape; split and validate.
    if let Some((lot, plan)) = upper.split_once('\\') {
        return canonical_spi(lot.trim(), plan.trim(), line);
    }

    let folded = fold_separators(&upper, &['/', ',', ';']);
    let stripped = strip_noise_tokens(&collapse_whitespace(&folded), NOISE_TOKENS);
    if stripped.is_empty() {
        return Err(ParseError::InvalidVicIdentifier);
    }

    let tokens: Vec<&str> = stripped.split_whitespace().collect();

    // Plans sit at the end of typed input more often than not: scan from the right.
    let plan_index = tokens
        .iter()
        .rposition(|token| PLAN_PATTERN.is_match(token))
        .ok_or(ParseError::MissingVicPlan)?;

    let lot = tokens
        .iter()
        .enumerate()
        .find_map(|(idx, token)| (idx != plan_index).then_some(*token))
        .ok_or(ParseError::MissingVicLot)?;

    if !LOT_PATTERN.is_match(lot) {
        return Err(ParseError::InvalidVicLot);
    }

    canonical_spi(lot, tokens[plan_index], line)
}

/// Validate components and assemble the backslash canonical form.
fn canonical_spi(lot: &str, plan: &str, raw: &str) -> Result<ParsedIdentifier> {
    if lot.is_empty() || !LOT_PATTERN.is_match(lot) {
        return Err(ParseError::InvalidVicLot);
    }
    if plan.is_empty() || !PLAN_PATTERN.is_match(plan) {
        return Err(ParseError::InvalidVicPlan);
    }

    Ok(
        ParsedIdentifier::new(format!("{lot}\\{plan}"), Jurisdiction::Vic, raw)
            .with_lot(lot)
            .with_plan(plan),
    )
}
