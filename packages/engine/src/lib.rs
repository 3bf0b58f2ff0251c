//! Parcelmap engine - Normalize Australian land-title references.
//!
//! Converts free-form, user-typed land-title references for four
//! jurisdictions (NSW, QLD, SA, VIC) into canonical, unique, machine-usable
//! identifiers, or reports precisely why an input fragment could not be
//! understood. The engine is synchronous, holds no state between calls, and
//! never fails as a whole: unparseable lines become malformed entries
//! alongside the identifiers that did parse.
//!
//! # Example
//!
//! ```
//! use parcelmap_engine::{parse_parcel_input, Jurisdiction};
//!
//! let result = parse_parcel_input(Jurisdiction::Nsw, "LOT 13 DP1242624");
//! assert_eq!(result.valid[0].canonical_id, "13//DP1242624");
//! assert!(result.malformed.is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`normalize`]: shared string primitives used by every grammar
//! - [`types`]: result model (identifiers, malformed entries, jurisdictions)
//! - [`error`]: error taxonomy and Result alias
//! - [`grammar`]: per-jurisdiction engines and the dispatcher
//! - [`cli`]: command-line interface

pub mod cli;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod types;

// Re-export the single entry point
pub use grammar::parse_parcel_input;

// Re-export commonly used items
pub use error::{ErrorKind, ParseError};
pub use types::{Jurisdiction, MalformedEntry, ParseResult, ParsedIdentifier};
