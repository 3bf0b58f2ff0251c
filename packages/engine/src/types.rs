//! Core data types for parse results.
//!
//! These types mirror the JSON payload consumed by the external
//! input-handling layer, so the serialized field names use camelCase.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Supported cadastral identifier grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    /// New South Wales lot/plan references (`1//DP131118`).
    Nsw,

    /// Queensland lotplan identifiers (`1RP912949`).
    Qld,

    /// South Australia title references and plan parcels.
    Sa,

    /// Victoria standard parcel identifiers (`27\PS433970`).
    Vic,
}

impl Jurisdiction {
    /// All supported jurisdictions, in display order.
    pub const ALL: [Self; 4] = [Self::Nsw, Self::Qld, Self::Sa, Self::Vic];

    /// The wire/display code for this jurisdiction.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nsw => "NSW",
            Self::Qld => "QLD",
            Self::Sa => "SA",
            Self::Vic => "VIC",
        }
    }

    /// Parse a jurisdiction code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "NSW" => Some(Self::Nsw),
            "QLD" => Some(Self::Qld),
            "SA" => Some(Self::Sa),
            "VIC" => Some(Self::Vic),
            _ => None,
        }
    }
}

/// A successfully normalized parcel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIdentifier {
    /// Deterministic, unique string form under the jurisdiction's rules.
    pub canonical_id: String,

    /// Grammar that produced this identifier.
    pub jurisdiction: Jurisdiction,

    /// The fragment of user input this identifier was parsed from.
    pub raw_input: String,

    /// Lot number within the plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,

    /// NSW section grouping, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Survey plan identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    /// SA Torrens register volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    /// SA Torrens register folio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folio: Option<String>,
}

impl ParsedIdentifier {
    /// Create an identifier with no component fields set.
    #[must_use]
    pub fn new(
        canonical_id: impl Into<String>,
        jurisdiction: Jurisdiction,
        raw_input: impl Into<String>,
    ) -> Self {
        Self {
            canonical_id: canonical_id.into(),
            jurisdiction,
            raw_input: raw_input.into(),
            lot: None,
            section: None,
            plan: None,
            volume: None,
            folio: None,
        }
    }

    /// Set the lot component.
    #[must_use]
    pub fn with_lot(mut self, lot: impl Into<String>) -> Self {
        self.lot = Some(lot.into());
        self
    }

    /// Set the section component.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the plan component.
    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Set the volume component.
    #[must_use]
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// Set the folio component.
    #[must_use]
    pub fn with_folio(mut self, folio: impl Into<String>) -> Self {
        self.folio = Some(folio.into());
        self
    }
}

/// An input fragment that could not be understood, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedEntry {
    /// The original line or fragment exactly as the user typed it.
    pub raw_input: String,

    /// Human-readable reason the input was rejected.
    pub error_message: String,
}

impl MalformedEntry {
    /// Record a rejected fragment with its rendered error message.
    #[must_use]
    pub fn new(raw_input: impl Into<String>, error: &ParseError) -> Self {
        Self {
            raw_input: raw_input.into(),
            error_message: error.to_string(),
        }
    }
}

/// The complete outcome of one parse call.
///
/// Entry order mirrors input order; an NSW range line or a QLD multi-fragment
/// line contributes its expansions at the position of the originating line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Successfully normalized identifiers.
    pub valid: Vec<ParsedIdentifier>,

    /// Rejected fragments with reasons.
    pub malformed: Vec<MalformedEntry>,
}

impl ParseResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a valid identifier.
    pub fn push_valid(&mut self, identifier: ParsedIdentifier) {
        self.valid.push(identifier);
    }

    /// Append a malformed entry.
    pub fn push_malformed(&mut self, entry: MalformedEntry) {
        self.malformed.push(entry);
    }

    /// Canonical ids of the valid entries, in input order.
    #[must_use]
    pub fn canonical_ids(&self) -> Vec<&str> {
        self.valid.iter().map(|v| v.canonical_id.as_str()).collect()
    }

    /// Number of parseable units derived from the raw input.
    #[must_use]
    pub fn total_units(&self) -> usize {
        self.valid.len() + self.malformed.len()
    }
}
