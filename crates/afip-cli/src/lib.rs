//! # afip-cli: Command Line Front End
//!
//! Provides the `afip` command-line interface over `afip-core` and
//! `afip-sua`.
//!
//! ## Subcommands
//!
//! - `afip cuit`: validate, parse, format, split, compose and generate
//!   CUIT/CUIL numbers.
//! - `afip period`: check, parse, compose and decompose reporting periods.
//! - `afip sua`: verify a login ticket against a YAML policy.
//!
//! ```bash
//! afip cuit validate 20-24264377-2
//! afip cuit random --count 5 --seed 42
//! afip period parse --kind monthly 201912
//! afip --config sua.yaml sua verify --token ticket.b64 --signature ticket.sig
//! ```
//!
//! Handlers return the process exit code: `0` when the input is valid and
//! `1` when it is not. Operational failures propagate as errors.

pub mod cuit;
pub mod period;
pub mod sua;

/// Exit code for valid input.
pub const EXIT_OK: u8 = 0;

/// Exit code for input that parsed but failed validation.
pub const EXIT_INVALID: u8 = 1;
