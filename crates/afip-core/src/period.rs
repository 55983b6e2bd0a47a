//! # Reporting Periods
//!
//! Periods are calendar-like values packed into a single integer at one of
//! three granularities:
//!
//! | Kind    | Text       | Packed value          |
//! |---------|------------|-----------------------|
//! | Annual  | `YYYY`     | `Y`                   |
//! | Monthly | `YYYYMM`   | `Y*100 + M`           |
//! | Daily   | `YYYYMMDD` | `Y*10000 + M*100 + D` |
//!
//! ## Sentinel zeros
//!
//! A month of `0` means "the whole year" and a day of `0` means "the whole
//! month". Both are valid. A non-zero day under a zero month is an
//! inconsistent partial date and is rejected.
//!
//! ## Encoding is not validation
//!
//! [`compose_daily`] / [`compose_monthly`] and their inverses are raw digit
//! arithmetic with no clamping. Out-of-range fields still produce a value,
//! and any value decomposes into a well-defined tuple. Validity is a separate
//! question answered by the `check_*` predicates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MIN_YEAR: u64 = 1000;
const MAX_YEAR: u64 = 9999;

/// Granularity of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// `YYYY`
    Annual,
    /// `YYYYMM`
    Monthly,
    /// `YYYYMMDD`
    Daily,
}

impl PeriodKind {
    /// All kinds, from coarsest to finest.
    pub const ALL: [PeriodKind; 3] = [Self::Annual, Self::Monthly, Self::Daily];

    /// Integer tag used by callers that carry the kind as a number.
    pub fn tag(self) -> u8 {
        match self {
            Self::Annual => 1,
            Self::Monthly => 2,
            Self::Daily => 3,
        }
    }

    /// Resolve an integer tag produced by [`PeriodKind::tag`].
    ///
    /// # Panics
    ///
    /// Panics on any other tag.
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            1 => Self::Annual,
            2 => Self::Monthly,
            3 => Self::Daily,
            _ => panic!("unknown period kind tag: {tag}"),
        }
    }

    /// Exact number of digits of the text form.
    pub fn digits(self) -> usize {
        match self {
            Self::Annual => 4,
            Self::Monthly => 6,
            Self::Daily => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PeriodKind {
    type Err = ValidationError;

    /// Accepts the English names and the Spanish ones used by AFIP forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "annual" | "anual" => Ok(Self::Annual),
            "monthly" | "mensual" => Ok(Self::Monthly),
            "daily" | "diario" => Ok(Self::Daily),
            _ => Err(ValidationError::UnknownPeriodKind(s.to_string())),
        }
    }
}

/// Outcome of [`parse`].
///
/// When `matched` is false every field is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodMatch {
    pub matched: bool,
    pub year: u64,
    pub month: u64,
    pub day: u64,
}

/// Number of days in `month` of `year`, Gregorian rules.
///
/// Returns `None` for a month outside `1..=12` or a year chrono cannot
/// represent.
pub fn days_in_month(year: u64, month: u64) -> Option<u64> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = i32::try_from(year).ok()?;
    let month = month as u32;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u64::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Validates a year.
pub fn check_annual(year: u64) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Validates a year and month. Month `0` stands for the whole year.
pub fn check_monthly(year: u64, month: u64) -> bool {
    check_annual(year) && month <= 12
}

/// Validates a year, month and day.
///
/// Month `0` with day `0` stands for the whole year and a real month with
/// day `0` for the whole month. Otherwise the day must exist in that month,
/// including February 29 on leap years.
pub fn check_daily(year: u64, month: u64, day: u64) -> bool {
    if !check_annual(year) {
        return false;
    }
    if month == 0 {
        return day == 0;
    }
    days_in_month(year, month).is_some_and(|days| day <= days)
}

/// [`check_monthly`] on a packed `YYYYMM` value.
pub fn check_monthly_compound(value: u64) -> bool {
    let (year, month) = decompose_monthly(value);
    check_monthly(year, month)
}

/// [`check_daily`] on a packed `YYYYMMDD` value.
pub fn check_daily_compound(value: u64) -> bool {
    let (year, month, day) = decompose_daily(value);
    check_daily(year, month, day)
}

/// Packs `year*100 + month` without range checks.
pub fn compose_monthly(year: u64, month: u64) -> u64 {
    year.wrapping_mul(100).wrapping_add(month)
}

/// Packs `year*10000 + month*100 + day` without range checks.
pub fn compose_daily(year: u64, month: u64, day: u64) -> u64 {
    year.wrapping_mul(10_000)
        .wrapping_add(month.wrapping_mul(100))
        .wrapping_add(day)
}

/// Splits a packed value into `(year, month)`.
pub fn decompose_monthly(value: u64) -> (u64, u64) {
    (value / 100, value % 100)
}

/// Splits a packed value into `(year, month, day)`.
pub fn decompose_daily(value: u64) -> (u64, u64, u64) {
    (value / 10_000, (value / 100) % 100, value % 100)
}

/// Reads a period of the given kind from its fixed-width digit text.
///
/// The text must be exactly [`PeriodKind::digits`] ASCII digits and the
/// fields must pass the kind's `check_*` predicate. Anything else is a
/// non-match, reported through [`PeriodMatch::matched`] rather than an error.
pub fn parse(kind: PeriodKind, text: &str) -> PeriodMatch {
    let bytes = text.as_bytes();
    if bytes.len() != kind.digits() || !bytes.iter().all(u8::is_ascii_digit) {
        return PeriodMatch::default();
    }
    let value = bytes
        .iter()
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));

    let (year, month, day) = match kind {
        PeriodKind::Annual => (value, 0, 0),
        PeriodKind::Monthly => {
            let (year, month) = decompose_monthly(value);
            (year, month, 0)
        }
        PeriodKind::Daily => decompose_daily(value),
    };
    let valid = match kind {
        PeriodKind::Annual => check_annual(year),
        PeriodKind::Monthly => check_monthly(year, month),
        PeriodKind::Daily => check_daily(year, month, day),
    };
    if !valid {
        return PeriodMatch::default();
    }
    PeriodMatch {
        matched: true,
        year,
        month,
        day,
    }
}

/// [`parse`] with the kind given as an integer tag.
///
/// # Panics
///
/// Panics if `tag` is not a known [`PeriodKind`] tag.
pub fn parse_tagged(tag: u8, text: &str) -> PeriodMatch {
    parse(PeriodKind::from_tag(tag), text)
}
