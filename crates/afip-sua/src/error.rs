//! # Error Types
//!
//! Every authentication failure is reported as an [`AuthError`] carrying the
//! stage that failed. Nothing is retried and no partial [`Login`] is ever
//! returned.
//!
//! [`Login`]: crate::Login

use afip_core::ValidationError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Authentication failure.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Reading the token or signature stream failed.
    #[error("reading {what}: {source}")]
    Io {
        /// `"token"` or `"signature"`.
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The token or signature is not valid base64.
    #[error("decoding {what}: {source}")]
    Decode {
        /// `"token"` or `"signature"`.
        what: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// No signature was supplied and unsigned tokens are not allowed.
    #[error("token is unsigned and unsigned tokens are not allowed")]
    MissingSignature,

    /// A signature must be checked but no trusted key is configured.
    #[error("no trusted key configured and untrusted tokens are not allowed")]
    NoTrustedKey,

    /// Signature is malformed or does not match the token.
    #[error("checking token signature: {0}")]
    Signature(String),

    /// The decoded token is not a well-formed login ticket.
    #[error("parsing token xml: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A required ticket field is absent.
    #[error("ticket field {0} not found")]
    MissingField(&'static str),

    /// The ticket's CUIL is malformed.
    #[error("user cuil: {0}")]
    Cuil(#[from] ValidationError),

    /// The ticket describes something other than a granted login.
    #[error("login not granted: operation {kind:?} is {value:?}")]
    NotGranted {
        /// Operation type attribute.
        kind: String,
        /// Operation outcome attribute.
        value: String,
    },

    /// A ticket timestamp is outside the representable range.
    #[error("invalid ticket timestamp: {0}")]
    Timestamp(i64),

    /// The ticket expiration time has passed.
    #[error("ticket expired at {0}")]
    Expired(DateTime<Utc>),

    /// The ticket was issued for a service outside the allow list.
    #[error("service {0:?} is not allowed")]
    ServiceNotAllowed(String),

    /// The configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}
