//! # afip-sua: Login Ticket Authentication
//!
//! Consumes the login tickets issued by the AFIP single sign-on service. A
//! ticket arrives as base64 text, optionally with a base64 detached
//! signature. Authentication:
//!
//! 1. decodes both,
//! 2. checks the signature against the configured trusted key,
//! 3. reads the XML ticket and extracts the user identity, including the
//!    CUIL parsed with [`afip_core::cuit::parse`],
//! 4. applies the expiration and service policies of [`AuthConfig`].
//!
//! The identifier engine knows nothing about tickets; this crate only uses
//! its parse operation.

pub mod config;
pub mod error;
pub mod login;
pub mod signature;
pub mod ticket;

pub use config::AuthConfig;
pub use error::AuthError;
pub use login::{authenticate, authenticate_at, Login, User};
pub use signature::{TicketSignature, TrustedKey};
