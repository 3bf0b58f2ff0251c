//! Per-jurisdiction grammar engines and the dispatching entry point.
//!
//! Each engine turns newline-delimited free-form text into a
//! [`ParseResult`]: an ordered list of canonical identifiers plus an ordered
//! list of rejected fragments with reasons. The engines share the primitives
//! in [`crate::normalize`] and express their grammars as ordered pattern
//! tables evaluated first-match-wins.

pub mod nsw;
pub mod qld;
pub mod sa;
pub mod vic;

use crate::types::{Jurisdiction, ParseResult};

/// Parse raw user input under the grammar of the selected jurisdiction.
///
/// The result is a pure function of `(jurisdiction, raw_text)`: the engines
/// hold no state between calls, and the call as a whole never fails.
/// Individual lines or fragments that cannot be understood are reported in
/// [`ParseResult::malformed`] without affecting their neighbours.
#[must_use]
pub fn parse_parcel_input(jurisdiction: Jurisdiction, raw_text: &str) -> ParseResult {
    let result = match jurisdiction {
        Jurisdiction::Nsw => nsw::parse(raw_text),
        Jurisdiction::Qld => qld::parse(raw_text),
        Jurisdiction::Sa => sa::parse(raw_text),
        Jurisdiction::Vic => vic::parse(raw_text),
    };

    tracing::debug!(
        jurisdiction = jurisdiction.as_str(),
        valid = result.valid.len(),
        malformed = result.malformed.len(),
        "parsed parcel input"
    );

    result
}
