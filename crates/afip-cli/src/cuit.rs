//! # CUIT Subcommand
//!
//! Identifier operations. Text arguments accept any form
//! [`afip_core::cuit::parse`] accepts; numeric arguments are raw values and
//! keep the library's excess-digit behavior.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use afip_core::cuit;

use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the `afip cuit` subcommand.
#[derive(Args, Debug)]
pub struct CuitArgs {
    #[command(subcommand)]
    pub command: CuitCommand,
}

#[derive(Subcommand, Debug)]
pub enum CuitCommand {
    /// Check range, kind and verifier digit.
    Validate {
        /// CUIT text, dashes optional.
        cuit: String,
    },

    /// Print the raw integer value of a CUIT text.
    Parse { cuit: String },

    /// Print the canonical dashed form of a raw value.
    Format { value: u64 },

    /// Print kind, id and verifier digit of a raw value.
    Parts { value: u64 },

    /// Build a CUIT from its fields.
    Compose {
        kind: u64,
        id: u64,
        /// Verifier digit. Computed when omitted.
        check: Option<u64>,
    },

    /// Print the verifier digit that corresponds to a raw value.
    Verifier { value: u64 },

    /// Generate valid CUITs.
    Random {
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print whether the holder is a natural or a legal person.
    PersonType { cuit: String },
}

/// Execute the `afip cuit` subcommand.
pub fn run_cuit(args: &CuitArgs) -> Result<u8> {
    match &args.command {
        CuitCommand::Validate { cuit: text } => {
            let value = parse_arg(text)?;
            if cuit::is_valid(value) {
                println!("VALID: {}", cuit::format(value));
                Ok(EXIT_OK)
            } else {
                println!("INVALID: {}", cuit::format(value));
                Ok(EXIT_INVALID)
            }
        }
        CuitCommand::Parse { cuit: text } => {
            println!("{}", parse_arg(text)?);
            Ok(EXIT_OK)
        }
        CuitCommand::Format { value } => {
            println!("{}", cuit::format(*value));
            Ok(EXIT_OK)
        }
        CuitCommand::Parts { value } => {
            let (kind, id, check) = cuit::parts(*value);
            println!("{kind} {id} {check}");
            Ok(EXIT_OK)
        }
        CuitCommand::Compose { kind, id, check } => {
            let check = match check {
                Some(check) => *check,
                None => computed_verifier(*kind, *id)?,
            };
            println!("{}", cuit::format(cuit::compose(*kind, *id, check)));
            Ok(EXIT_OK)
        }
        CuitCommand::Verifier { value } => {
            println!("{}", cuit::verifier(*value));
            Ok(EXIT_OK)
        }
        CuitCommand::Random { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            for _ in 0..*count {
                println!("{}", cuit::format(cuit::random(&mut rng)));
            }
            Ok(EXIT_OK)
        }
        CuitCommand::PersonType { cuit: text } => match cuit::person_type(parse_arg(text)?) {
            Some(person) => {
                println!("{person}");
                Ok(EXIT_OK)
            }
            None => {
                println!("unknown kind");
                Ok(EXIT_INVALID)
            }
        },
    }
}

fn parse_arg(text: &str) -> Result<u64> {
    cuit::parse(text).with_context(|| format!("cannot read CUIT argument {text:?}"))
}

fn computed_verifier(kind: u64, id: u64) -> Result<u64> {
    let check = cuit::verifier(cuit::compose(kind, id, 0));
    if check == 10 {
        bail!("kind {kind} with id {id} has no valid verifier digit");
    }
    tracing::debug!(kind, id, check, "computed verifier digit");
    Ok(check)
}
