//! # CUIT/CUIL Identifiers
//!
//! An identifier is an 11-digit decimal number made of three fixed-width
//! fields:
//!
//! | Field   | Digits | Meaning                                   |
//! |---------|--------|-------------------------------------------|
//! | kind    | 2      | category, one of [`KINDS`]                |
//! | id      | 8      | sequence number (DNI for natural persons) |
//! | check   | 1      | modulus-11 verifier digit                 |
//!
//! The canonical text form is `KK-IIIIIIII-C`. Both dashes are optional on
//! input and always present on output.
//!
//! ## Permissive free functions, strict newtype
//!
//! The free functions operate on raw `u64` values and never reject digits
//! outside the 11-digit window: [`parts`] and [`format`] discard them,
//! [`compose`] reduces each field modulo its capacity and [`parse`] only
//! checks syntax. Downstream consumers depend on this wraparound.
//!
//! [`Cuit`] is the typed form. It is only constructed from values that pass
//! [`is_valid`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Kind prefixes accepted by [`is_valid`].
pub const KINDS: [u64; 7] = [20, 23, 24, 27, 30, 33, 34];

/// Repeating weight cycle applied from the least significant digit up.
pub const WEIGHTS: [u64; 6] = [2, 3, 4, 5, 6, 7];

/// One past the largest 11-digit value.
const CAPACITY: u64 = 100_000_000_000;

/// Place value of the kind field.
const KIND_UNIT: u64 = 1_000_000_000;

const KIND_CAPACITY: u64 = 100;
const ID_CAPACITY: u64 = 100_000_000;
const CHECK_CAPACITY: u64 = 10;

/// Checks range, kind and verifier digit of a raw identifier.
///
/// All three conditions are independent and must hold.
pub fn is_valid(value: u64) -> bool {
    valid_size(value) && valid_kind(value) && valid_verifier(value)
}

fn valid_size(value: u64) -> bool {
    value / CAPACITY == 0
}

fn valid_kind(value: u64) -> bool {
    KINDS.contains(&(value / KIND_UNIT))
}

fn valid_verifier(value: u64) -> bool {
    value % 10 == verifier(value)
}

/// Computes the verifier digit that corresponds to `value`.
///
/// Digits beyond the 11-digit window are discarded and the current last
/// digit is ignored. The result is in `0..=10`; `10` means the kind and id
/// combination has no valid verifier at all.
pub fn verifier(value: u64) -> u64 {
    let mut rem = (value % CAPACITY) / 10;
    let mut sum = 0;
    let mut i = 0;
    while rem != 0 {
        sum += WEIGHTS[i % WEIGHTS.len()] * (rem % 10);
        rem /= 10;
        i += 1;
    }
    match 11 - sum % 11 {
        11 => 0,
        digit => digit,
    }
}

/// Parses the `DD-DDDDDDDD-D` text form, both dashes optional.
///
/// Only syntax is checked: an unknown kind or a wrong verifier digit still
/// parses. Use [`is_valid`] for semantic validation.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCuitFormat`] when the text does not
/// match the layout exactly.
pub fn parse(text: &str) -> Result<u64, ValidationError> {
    let (kind, id, check) = split_fields(text.as_bytes())
        .ok_or_else(|| ValidationError::InvalidCuitFormat(text.to_string()))?;
    Ok(kind * KIND_UNIT + id * 10 + check)
}

fn split_fields(bytes: &[u8]) -> Option<(u64, u64, u64)> {
    let mut pos = 0;
    let kind = take_digits(bytes, &mut pos, 2)?;
    skip_dash(bytes, &mut pos);
    let id = take_digits(bytes, &mut pos, 8)?;
    skip_dash(bytes, &mut pos);
    let check = take_digits(bytes, &mut pos, 1)?;
    (pos == bytes.len()).then_some((kind, id, check))
}

/// Reads exactly `count` ASCII digits starting at `pos`.
fn take_digits(bytes: &[u8], pos: &mut usize, count: usize) -> Option<u64> {
    let group = bytes.get(*pos..*pos + count)?;
    if !group.iter().all(u8::is_ascii_digit) {
        return None;
    }
    *pos += count;
    Some(group.iter().fold(0, |acc, b| acc * 10 + u64::from(b - b'0')))
}

fn skip_dash(bytes: &[u8], pos: &mut usize) {
    if bytes.get(*pos) == Some(&b'-') {
        *pos += 1;
    }
}

/// Splits a raw identifier into `(kind, id, check)`.
///
/// Digits beyond the 11-digit window are discarded first.
pub fn parts(value: u64) -> (u8, u32, u8) {
    let clean = value % CAPACITY;
    (
        (clean / KIND_UNIT) as u8,
        ((clean % KIND_UNIT) / 10) as u32,
        (clean % 10) as u8,
    )
}

/// Renders the canonical `KK-IIIIIIII-C` form of [`parts`]`(value)`.
pub fn format(value: u64) -> String {
    let (kind, id, check) = parts(value);
    format!("{kind:02}-{id:08}-{check:01}")
}

/// Packs the three fields into a raw identifier.
///
/// Each field is reduced modulo its decimal capacity (100, 10^8, 10) before
/// packing, so excess digits are dropped instead of carried.
pub fn compose(kind: u64, id: u64, check: u64) -> u64 {
    (kind % KIND_CAPACITY) * KIND_UNIT + (id % ID_CAPACITY) * 10 + check % CHECK_CAPACITY
}

/// Draws a random valid identifier.
///
/// The kind is picked uniformly from [`KINDS`] and the id uniformly from
/// `0..10^8`. Draws whose verifier would be `10` are discarded and redrawn,
/// so the result always passes [`is_valid`]. Given a seeded generator the
/// output sequence is reproducible.
pub fn random<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    loop {
        let kind = KINDS[rng.gen_range(0..KINDS.len())];
        let id = rng.gen_range(0..ID_CAPACITY);
        let base = compose(kind, id, 0);
        let check = verifier(base);
        if check < 10 {
            return base + check;
        }
    }
}

/// Legal nature of the identifier holder, derived from the kind prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    /// Kinds 20, 23, 24 and 27.
    Natural,
    /// Kinds 30, 33 and 34.
    Legal,
}

impl std::fmt::Display for PersonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Natural => f.write_str("Persona Física"),
            Self::Legal => f.write_str("Persona Jurídica"),
        }
    }
}

/// Classifies a raw identifier by its kind prefix.
///
/// Returns `None` for kinds outside [`KINDS`]. The verifier digit is not
/// checked.
pub fn person_type(value: u64) -> Option<PersonType> {
    match parts(value).0 {
        20 | 23 | 24 | 27 => Some(PersonType::Natural),
        30 | 33 | 34 => Some(PersonType::Legal),
        _ => None,
    }
}

/// A CUIT/CUIL that passed [`is_valid`].
///
/// Displays and serializes in the canonical dashed form. Deserialization and
/// [`FromStr`](std::str::FromStr) accept any form [`parse`] accepts and then
/// validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cuit(u64);

impl Cuit {
    /// Wrap a raw identifier, checking range, kind and verifier digit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCuit`] if [`is_valid`] rejects it.
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if !is_valid(value) {
            return Err(ValidationError::InvalidCuit(value));
        }
        Ok(Self(value))
    }

    /// Draw a random valid identifier. See [`random`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random(rng))
    }

    /// The raw 11-digit value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn kind(&self) -> u8 {
        parts(self.0).0
    }

    pub fn id(&self) -> u32 {
        parts(self.0).1
    }

    pub fn check_digit(&self) -> u8 {
        parts(self.0).2
    }

    /// Natural or legal person, by kind prefix.
    pub fn person_type(&self) -> PersonType {
        person_type(self.0).expect("validated at construction")
    }
}

impl From<Cuit> for u64 {
    fn from(cuit: Cuit) -> Self {
        cuit.0
    }
}

impl TryFrom<u64> for Cuit {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for Cuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format(self.0))
    }
}

impl std::str::FromStr for Cuit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse(s)?)
    }
}

impl Serialize for Cuit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(self.0))
    }
}

impl<'de> Deserialize<'de> for Cuit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
