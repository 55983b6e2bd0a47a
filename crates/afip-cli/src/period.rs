//! # Period Subcommand
//!
//! Reporting period operations. `--kind` accepts `annual`, `monthly`,
//! `daily` or their Spanish names.

use anyhow::Result;
use clap::{Args, Subcommand};

use afip_core::period::{self, PeriodKind};

use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the `afip period` subcommand.
#[derive(Args, Debug)]
pub struct PeriodArgs {
    #[command(subcommand)]
    pub command: PeriodCommand,
}

#[derive(Subcommand, Debug)]
pub enum PeriodCommand {
    /// Check a packed period value.
    Check {
        #[arg(long)]
        kind: PeriodKind,
        value: u64,
    },

    /// Read a period from its fixed-width digit text.
    Parse {
        #[arg(long)]
        kind: PeriodKind,
        text: String,
        /// Print the match as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Pack year and month, and day when given. No range checks.
    Compose {
        year: u64,
        month: u64,
        day: Option<u64>,
    },

    /// Split a packed value into its fields. No range checks.
    Decompose {
        #[arg(long)]
        kind: PeriodKind,
        value: u64,
    },
}

/// Execute the `afip period` subcommand.
pub fn run_period(args: &PeriodArgs) -> Result<u8> {
    match &args.command {
        PeriodCommand::Check { kind, value } => {
            if check(*kind, *value) {
                println!("VALID: {kind} {value}");
                Ok(EXIT_OK)
            } else {
                println!("INVALID: {kind} {value}");
                Ok(EXIT_INVALID)
            }
        }
        PeriodCommand::Parse { kind, text, json } => {
            let found = period::parse(*kind, text);
            if *json {
                println!("{}", serde_json::to_string(&found)?);
            } else if found.matched {
                println!("{} {} {}", found.year, found.month, found.day);
            } else {
                println!("no match");
            }
            tracing::debug!(%kind, text, matched = found.matched, "parsed period");
            Ok(if found.matched { EXIT_OK } else { EXIT_INVALID })
        }
        PeriodCommand::Compose { year, month, day } => {
            let value = match day {
                Some(day) => period::compose_daily(*year, *month, *day),
                None => period::compose_monthly(*year, *month),
            };
            println!("{value}");
            Ok(EXIT_OK)
        }
        PeriodCommand::Decompose { kind, value } => {
            match kind {
                PeriodKind::Annual => println!("{value}"),
                PeriodKind::Monthly => {
                    let (year, month) = period::decompose_monthly(*value);
                    println!("{year} {month}");
                }
                PeriodKind::Daily => {
                    let (year, month, day) = period::decompose_daily(*value);
                    println!("{year} {month} {day}");
                }
            }
            Ok(EXIT_OK)
        }
    }
}

fn check(kind: PeriodKind, value: u64) -> bool {
    match kind {
        PeriodKind::Annual => period::check_annual(value),
        PeriodKind::Monthly => period::check_monthly_compound(value),
        PeriodKind::Daily => period::check_daily_compound(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_dispatches_by_kind() {
        assert!(check(PeriodKind::Annual, 2000));
        assert!(!check(PeriodKind::Annual, 200001));
        assert!(check(PeriodKind::Monthly, 200012));
        assert!(!check(PeriodKind::Monthly, 200013));
        assert!(check(PeriodKind::Daily, 20000229));
        assert!(!check(PeriodKind::Daily, 20010229));
    }

    #[test]
    fn parse_exit_codes() {
        let ok = PeriodArgs {
            command: PeriodCommand::Parse {
                kind: PeriodKind::Daily,
                text: "20000101".into(),
                json: true,
            },
        };
        assert_eq!(run_period(&ok).unwrap(), EXIT_OK);

        let bad = PeriodArgs {
            command: PeriodCommand::Parse {
                kind: PeriodKind::Monthly,
                text: "200014".into(),
                json: false,
            },
        };
        assert_eq!(run_period(&bad).unwrap(), EXIT_INVALID);
    }
}
