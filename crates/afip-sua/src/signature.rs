//! # Ticket Signatures
//!
//! Login tickets are signed with Ed25519 over the exact decoded token bytes.
//! The relying party holds one trusted public key.
//!
//! ## Serde
//!
//! [`TrustedKey`] serializes as a lowercase hex string so it can live in the
//! YAML configuration file.

use ed25519_dalek::Verifier;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AuthError;

/// Ed25519 public key of the ticket issuer (32 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrustedKey([u8; 32]);

/// Detached Ed25519 signature over a decoded ticket (64 bytes).
#[derive(Clone, PartialEq, Eq)]
pub struct TicketSignature([u8; 64]);

impl TrustedKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a key from a 64-character hex string.
    pub fn from_hex(text: &str) -> Result<Self, AuthError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(text.trim(), &mut bytes)
            .map_err(|e| AuthError::Config(format!("trusted key must be 64 hex chars: {e}")))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to an `ed25519_dalek::VerifyingKey`, rejecting points that are
    /// not valid curve points.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, AuthError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| AuthError::Config(format!("invalid trusted key: {e}")))
    }
}

impl From<ed25519_dalek::VerifyingKey> for TrustedKey {
    fn from(key: ed25519_dalek::VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl Serialize for TrustedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TrustedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for TrustedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrustedKey({}...)", hex::encode(&self.0[..4]))
    }
}

impl std::fmt::Display for TrustedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TicketSignature {
    /// Wrap decoded signature bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signature`] unless exactly 64 bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AuthError> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| {
            AuthError::Signature(format!("signature must be 64 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl std::fmt::Debug for TicketSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TicketSignature({}...)", hex::encode(&self.0[..4]))
    }
}

/// Check `signature` over the decoded `token` bytes with `key`.
pub fn verify(token: &[u8], signature: &TicketSignature, key: &TrustedKey) -> Result<(), AuthError> {
    let verifying_key = key.to_verifying_key()?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key
        .verify(token, &sig)
        .map_err(|e| AuthError::Signature(format!("Ed25519 verification failed: {e}")))
}
