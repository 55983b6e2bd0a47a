//! # Error Types
//!
//! Recoverable data errors raised while reading identifiers from text.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.

use thiserror::Error;

/// Validation failure for externally supplied identifier text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The text does not follow the `DD-DDDDDDDD-D` layout (dashes optional).
    #[error("malformed CUIT/CUIL {0:?}: expected DD-DDDDDDDD-D with optional dashes")]
    InvalidCuitFormat(String),

    /// Well-formed number that fails the range, kind or verifier check.
    #[error("invalid CUIT/CUIL {0}: out of range, unknown kind or wrong verifier digit")]
    InvalidCuit(u64),

    /// Period kind name that is neither annual, monthly nor daily.
    #[error("unknown period kind {0:?}")]
    UnknownPeriodKind(String),
}
