//! Error types for parcel identifier parsing.
//!
//! Uses the dual-error pattern: `ParseError` covers per-line grammar
//! rejections that end up in `MalformedEntry` records, while the CLI keeps
//! its own operational error type for I/O and argument problems.

use thiserror::Error;

/// Broad category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural mismatch: no pattern recognized the input shape.
    Format,

    /// NSW lot range inverted or wider than the expansion cap.
    Range,

    /// A recognized component carries invalid characters.
    Component,

    /// Every fallback strategy was tried and none matched.
    AmbiguousFragment,
}

/// A single line or fragment could not be parsed.
///
/// The rendered messages are user-facing and are stored verbatim in
/// [`MalformedEntry`](crate::types::MalformedEntry) records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// NSW range with `end < start` or spanning more than the cap.
    #[error("Range too large or invalid (max 100 lots)")]
    RangeTooLarge,

    /// NSW lot with characters outside `[A-Z0-9]`.
    #[error("Invalid NSW lot '{0}'")]
    InvalidNswLot(String),

    /// NSW section with characters outside `[A-Z0-9]`.
    #[error("Invalid NSW section '{0}'")]
    InvalidNswSection(String),

    /// NSW plan not matching letters-then-alphanumerics.
    #[error("Invalid NSW plan '{0}'")]
    InvalidNswPlan(String),

    /// NSW line where a plan was found but no lot token remained.
    #[error("Missing NSW lot value")]
    MissingNswLot,

    /// NSW token list with no plan candidate left.
    #[error("Missing NSW plan value")]
    MissingNswPlan,

    /// NSW line that produced no tokens at all.
    #[error("Unable to parse NSW lot/plan")]
    UnparseableNswLine,

    /// QLD fragment that no matching strategy recognized.
    #[error("Expected formats like '1RP912949', '1 RP 912949', or 'Lot 1 on RP912949'")]
    UnmatchedQldFragment,

    /// SA line that does not match the title reference shape.
    #[error("Invalid SA title reference. Expected format like CT6204/831")]
    InvalidSaTitleReference,

    /// SA plan-parcel line with fewer than two usable tokens.
    #[error("Invalid SA plan parcel. Expected plan and lot values")]
    MissingSaPlanParcel,

    /// SA plan-parcel line where no plan/lot classification worked.
    #[error("Invalid SA plan parcel. Expected format like 'D117877 A22'")]
    InvalidSaPlanParcel,

    /// VIC line with no token matching the plan shape.
    #[error("Missing plan component (e.g. PS433970)")]
    MissingVicPlan,

    /// VIC line with a plan but no remaining lot token.
    #[error("Missing lot component")]
    MissingVicLot,

    /// VIC lot with invalid characters.
    #[error("Invalid lot component")]
    InvalidVicLot,

    /// VIC plan with invalid characters.
    #[error("Invalid plan component")]
    InvalidVicPlan,

    /// VIC line that normalizes to nothing (noise words only).
    #[error("Invalid VIC parcel identifier")]
    InvalidVicIdentifier,
}

impl ParseError {
    /// The taxonomy category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RangeTooLarge => ErrorKind::Range,
            Self::InvalidNswLot(_)
            | Self::InvalidNswSection(_)
            | Self::InvalidNswPlan(_)
            | Self::InvalidVicLot
            | Self::InvalidVicPlan => ErrorKind::Component,
            Self::UnmatchedQldFragment | Self::InvalidSaPlanParcel => ErrorKind::AmbiguousFragment,
            Self::MissingNswLot
            | Self::MissingNswPlan
            | Self::UnparseableNswLine
            | Self::InvalidSaTitleReference
            | Self::MissingSaPlanParcel
            | Self::MissingVicPlan
            | Self::MissingVicLot
            | Self::InvalidVicIdentifier => ErrorKind::Format,
        }
    }
}

/// Result type alias for grammar operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            ParseError::RangeTooLarge.to_string(),
            "Range too large or invalid (max 100 lots)"
        );
        assert_eq!(
            ParseError::InvalidNswLot("1!".to_string()).to_string(),
            "Invalid NSW lot '1!'"
        );
        assert_eq!(
            ParseError::InvalidSaTitleReference.to_string(),
            "Invalid SA title reference. Expected format like CT6204/831"
        );
        assert_eq!(
            ParseError::MissingVicPlan.to_string(),
            "Missing plan component (e.g. PS433970)"
        );
    }

    #[test]
    fn test_qld_message_lists_accepted_formats() {
        let message = ParseError::UnmatchedQldFragment.to_string();
        assert!(message.contains("1RP912949"));
        assert!(message.contains("1 RP 912949"));
        assert!(message.contains("Lot 1 on RP912949"));
    }

    #[test]
    fn test_error_kind_taxonomy() {
        assert_eq!(ParseError::RangeTooLarge.kind(), ErrorKind::Range);
        assert_eq!(
            ParseError::InvalidNswPlan("9".to_string()).kind(),
            ErrorKind::Component
        );
        assert_eq!(
            ParseError::UnmatchedQldFragment.kind(),
            ErrorKind::AmbiguousFragment
        );
        assert_eq!(ParseError::MissingNswLot.kind(), ErrorKind::Format);
        assert_eq!(ParseError::InvalidVicLot.kind(), ErrorKind::Component);
    }
}
