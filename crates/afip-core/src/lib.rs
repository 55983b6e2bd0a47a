//! # afip-core: Tax Identifiers and Reporting Periods
//!
//! Pure computation over the two numeric identifier families used by the
//! Argentine tax administration:
//!
//! - [`cuit`]: 11-digit CUIT/CUIL numbers (kind, sequence id and verifier
//!   digit) with parsing, formatting, composition and the modulus-11
//!   verifier digit algorithm.
//! - [`period`]: annual (`YYYY`), monthly (`YYYYMM`) and daily (`YYYYMMDD`)
//!   reporting periods packed into integers, with lenient calendar
//!   validation where a zero month or day means "whole period".
//!
//! ## Crate Policy
//!
//! - No I/O, no shared state. Every function is safe to call from any thread.
//! - Text parsing of identifiers fails with [`ValidationError`]; text parsing
//!   of periods reports a boolean match instead. The two shapes are not
//!   interchangeable and existing callers depend on both.
//! - The only panic outside tests is [`period::PeriodKind::from_tag`] on an
//!   unknown tag, which is a caller bug rather than bad data.

pub mod cuit;
pub mod error;
pub mod period;

// Re-export primary types for ergonomic imports.
pub use cuit::{Cuit, PersonType};
pub use error::ValidationError;
pub use period::{PeriodKind, PeriodMatch};
