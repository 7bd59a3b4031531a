//! Error types for rule parsing and resolution.

use thiserror::Error;

/// Errors that are fatal to a whole resolution call.
#[derive(Error, Debug)]
pub enum RulesError {
    /// The rule-table text was empty.
    #[error("empty rule table")]
    EmptyTable,

    /// The caller-supplied client address is not a dotted-decimal IPv4
    /// address.
    #[error("invalid query address: {0:?}")]
    InvalidQueryAddress(String),
}

/// Why a single conf line was rejected.
///
/// These are recovered from during table construction: the offending line
/// is skipped and reported, and parsing continues with the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// A network-spec token failed octet or prefix validation.
    #[error("malformed network spec: {0}")]
    MalformedAddress(String),

    /// No whitespace run separates the network spec from the output id.
    #[error("no delimiter between network spec and output id")]
    Syntax,
}

/// A skipped conf line together with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub line: usize,
    pub error: LineError,
}
