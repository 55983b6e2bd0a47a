//! # Authentication
//!
//! Turns a base64 login ticket (and optional base64 signature) into a
//! [`Login`], enforcing the [`AuthConfig`] policy along the way.

use std::io::Read;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;

use afip_core::cuit;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::signature::{self, TicketSignature};
use crate::ticket::Ticket;

/// Authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    /// Raw CUIL as parsed from the ticket. Not checked with
    /// [`cuit::is_valid`].
    pub cuil: u64,
    pub email: String,
    pub legajo: String,
}

/// Result of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Login {
    pub user: User,
    pub authentication: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    /// When the ticket was received by this process.
    pub reception: DateTime<Utc>,
    pub service: String,
    pub groups: Vec<String>,
    pub service_data: Option<String>,
}

/// Authenticate a ticket read from `token`, with its signature read from
/// `signature` when one was supplied.
///
/// Both streams carry base64 text; embedded whitespace is ignored.
pub fn authenticate(
    mut token: impl Read,
    signature: Option<&mut dyn Read>,
    config: &AuthConfig,
) -> Result<Login, AuthError> {
    let mut token_b64 = Vec::new();
    token
        .read_to_end(&mut token_b64)
        .map_err(|source| AuthError::Io { what: "token", source })?;
    let signature_b64 = match signature {
        Some(reader) => {
            let mut buf = Vec::new();
            reader
                .read_to_end(&mut buf)
                .map_err(|source| AuthError::Io { what: "signature", source })?;
            Some(buf)
        }
        None => None,
    };
    authenticate_at(&token_b64, signature_b64.as_deref(), config, Utc::now())
}

/// [`authenticate`] over in-memory base64 text, with `now` as the reception
/// time used for expiration checks.
pub fn authenticate_at(
    token_b64: &[u8],
    signature_b64: Option<&[u8]>,
    config: &AuthConfig,
    now: DateTime<Utc>,
) -> Result<Login, AuthError> {
    let token = decode("token", token_b64)?;
    let signature = signature_b64.map(|s| decode("signature", s)).transpose()?;

    check_signature(&token, signature.as_deref(), config)?;

    let ticket = Ticket::from_xml(&token)?;
    if !ticket.is_granted_login() {
        return Err(AuthError::NotGranted {
            kind: ticket.operation.kind,
            value: ticket.operation.value,
        });
    }

    let authentication = timestamp(ticket.id.gen_time)?;
    let expiration = timestamp(ticket.id.exp_time)?;
    if now > expiration {
        if !config.allow_expired {
            return Err(AuthError::Expired(expiration));
        }
        tracing::warn!(%expiration, "accepting expired ticket");
    }

    let login = ticket.operation.login;
    if !config.allows_service(&login.service) {
        return Err(AuthError::ServiceNotAllowed(login.service));
    }

    let cuil_text = login.info("cuil").ok_or(AuthError::MissingField("cuil"))?;
    let cuil = cuit::parse(cuil_text)?;
    let user = User {
        id: login.uid.clone().ok_or(AuthError::MissingField("uid"))?,
        cuil,
        email: login.info("email").unwrap_or_default().to_string(),
        legajo: login.info("legajo").unwrap_or_default().to_string(),
    };

    tracing::info!(
        user = %user.id,
        cuil = %cuit::format(user.cuil),
        service = %login.service,
        ticket = %ticket.id.unique_id,
        "ticket authenticated"
    );

    Ok(Login {
        user,
        authentication,
        expiration,
        reception: now,
        groups: login.group_names(),
        service: login.service,
        service_data: login.service_data,
    })
}

/// Signature policy.
///
/// A signature is checked whenever one is supplied, and is mandatory unless
/// `allow_unsigned` is set. Without a trusted key the check is skipped only
/// under `allow_untrusted`.
fn check_signature(
    token: &[u8],
    signature: Option<&[u8]>,
    config: &AuthConfig,
) -> Result<(), AuthError> {
    let Some(signature) = signature else {
        if config.allow_unsigned {
            tracing::warn!("accepting unsigned ticket");
            return Ok(());
        }
        return Err(AuthError::MissingSignature);
    };
    let Some(key) = &config.trusted_key else {
        if config.allow_untrusted {
            tracing::warn!("no trusted key configured, skipping signature check");
            return Ok(());
        }
        return Err(AuthError::NoTrustedKey);
    };
    signature::verify(token, &TicketSignature::from_slice(signature)?, key)
}

fn decode(what: &'static str, text: &[u8]) -> Result<Vec<u8>, AuthError> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|source| AuthError::Decode { what, source })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(secs, 0).ok_or(AuthError::Timestamp(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::TrustedKey;
    use ed25519_dalek::{Signer, SigningKey};

    const GEN: i64 = 1_700_000_000;
    const EXP: i64 = 1_700_036_000;

    fn ticket_xml(service: &str, cuil: &str) -> String {
        format!(
            r#"<sso version="2.0">
  <id src="CN=sua" dst="CN=padron" unique_id="77" gen_time="{GEN}" exp_time="{EXP}"/>
  <operation type="login" value="granted">
    <login service="{service}" uid="jperez">
      <info name="cuil" value="{cuil}"/>
      <info name="email" value="jperez@example.com"/>
      <info name="legajo" value="40123"/>
      <groups><group name="operadores"/></groups>
      <service_data>payload</service_data>
    </login>
  </operation>
</sso>"#
        )
    }

    fn issuer() -> SigningKey {
        SigningKey::from_bytes(&[11u8; 32])
    }

    fn signed(xml: &str) -> (String, String) {
        let sig = issuer().sign(xml.as_bytes());
        (STANDARD.encode(xml), STANDARD.encode(sig.to_bytes()))
    }

    fn strict_config() -> AuthConfig {
        AuthConfig {
            trusted_key: Some(TrustedKey::from(issuer().verifying_key())),
            ..AuthConfig::default()
        }
    }

    fn before_expiry() -> DateTime<Utc> {
        DateTime::from_timestamp(GEN + 60, 0).unwrap()
    }

    #[test]
    fn signed_ticket_authenticates() {
        let (token, sig) = signed(&ticket_xml("padron", "20-24264377-2"));
        let login = authenticate_at(
            token.as_bytes(),
            Some(sig.as_bytes()),
            &strict_config(),
            before_expiry(),
        )
        .unwrap();
        assert_eq!(login.user.id, "jperez");
        assert_eq!(login.user.cuil, 20242643772);
        assert_eq!(login.user.email, "jperez@example.com");
        assert_eq!(login.user.legajo, "40123");
        assert_eq!(login.groups, vec!["operadores"]);
        assert_eq!(login.service, "padron");
        assert_eq!(login.service_data.as_deref(), Some("payload"));
        assert_eq!(login.authentication.timestamp(), GEN);
        assert_eq!(login.expiration.timestamp(), EXP);
        assert_eq!(login.reception, before_expiry());
    }

    #[test]
    fn base64_with_line_breaks_is_accepted() {
        let (token, sig) = signed(&ticket_xml("padron", "20242643772"));
        let wrapped: String = token
            .as_bytes()
            .chunks(64)
            .map(|c| format!("{}\n", std::str::from_utf8(c).unwrap()))
            .collect();
        assert!(authenticate_at(
            wrapped.as_bytes(),
            Some(sig.as_bytes()),
            &strict_config(),
            before_expiry()
        )
        .is_ok());
    }

    #[test]
    fn tampered_ticket_fails() {
        let (_, sig) = signed(&ticket_xml("padron", "20242643772"));
        let forged = STANDARD.encode(ticket_xml("padron", "27240366180"));
        let err = authenticate_at(
            forged.as_bytes(),
            Some(sig.as_bytes()),
            &strict_config(),
            before_expiry(),
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::Signature(_)), "got {err}");
    }

    #[test]
    fn unsigned_ticket_requires_allow_unsigned() {
        let token = STANDARD.encode(ticket_xml("padron", "20242643772"));
        let err =
            authenticate_at(token.as_bytes(), None, &strict_config(), before_expiry()).unwrap_err();
        assert!(matches!(err, AuthError::MissingSignature));

        let config = AuthConfig {
            allow_unsigned: true,
            ..strict_config()
        };
        assert!(authenticate_at(token.as_bytes(), None, &config, before_expiry()).is_ok());
    }

    #[test]
    fn supplied_signature_is_checked_even_when_unsigned_allowed() {
        let token = STANDARD.encode(ticket_xml("padron", "20242643772"));
        let bogus = STANDARD.encode([0u8; 64]);
        let config = AuthConfig {
            allow_unsigned: true,
            ..strict_config()
        };
        assert!(authenticate_at(token.as_bytes(), Some(bogus.as_bytes()), &config, before_expiry())
            .is_err());
    }

    #[test]
    fn missing_trusted_key() {
        let (token, sig) = signed(&ticket_xml("padron", "20242643772"));
        let err = authenticate_at(
            token.as_bytes(),
            Some(sig.as_bytes()),
            &AuthConfig::default(),
            before_expiry(),
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::NoTrustedKey));

        let config = AuthConfig {
            allow_untrusted: true,
            ..AuthConfig::default()
        };
        assert!(
            authenticate_at(token.as_bytes(), Some(sig.as_bytes()), &config, before_expiry())
                .is_ok()
        );
    }

    #[test]
    fn expired_ticket() {
        let (token, sig) = signed(&ticket_xml("padron", "20242643772"));
        let late = DateTime::from_timestamp(EXP + 1, 0).unwrap();
        let err = authenticate_at(token.as_bytes(), Some(sig.as_bytes()), &strict_config(), late)
            .unwrap_err();
        assert!(matches!(err, AuthError::Expired(at) if at.timestamp() == EXP));

        let config = AuthConfig {
            allow_expired: true,
            ..strict_config()
        };
        assert!(authenticate_at(token.as_bytes(), Some(sig.as_bytes()), &config, late).is_ok());
    }

    #[test]
    fn service_allow_list() {
        let (token, sig) = signed(&ticket_xml("padron", "20242643772"));
        let config = AuthConfig {
            allowed_services: vec!["sua".into()],
            ..strict_config()
        };
        let err = authenticate_at(token.as_bytes(), Some(sig.as_bytes()), &config, before_expiry())
            .unwrap_err();
        assert!(matches!(err, AuthError::ServiceNotAllowed(s) if s == "padron"));
    }

    #[test]
    fn malformed_cuil_is_reported() {
        let (token, sig) = signed(&ticket_xml("padron", "20-2426-2"));
        let err = authenticate_at(
            token.as_bytes(),
            Some(sig.as_bytes()),
            &strict_config(),
            before_expiry(),
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::Cuil(_)));
    }

    #[test]
    fn invalid_base64() {
        let err = authenticate_at(b"***", None, &strict_config(), before_expiry()).unwrap_err();
        assert!(matches!(err, AuthError::Decode { what: "token", .. }));
    }

    #[test]
    fn denied_operation() {
        let xml = ticket_xml("padron", "20242643772").replace("granted", "denied");
        let (token, sig) = signed(&xml);
        let err = authenticate_at(
            token.as_bytes(),
            Some(sig.as_bytes()),
            &strict_config(),
            before_expiry(),
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::NotGranted { .. }));
    }

    #[test]
    fn login_serializes_to_json() {
        let (token, sig) = signed(&ticket_xml("padron", "20242643772"));
        let login = authenticate_at(
            token.as_bytes(),
            Some(sig.as_bytes()),
            &strict_config(),
            before_expiry(),
        )
        .unwrap();
        let json = serde_json::to_value(&login).unwrap();
        assert_eq!(json["user"]["cuil"], 20242643772u64);
        assert_eq!(json["service"], "padron");
    }
}
