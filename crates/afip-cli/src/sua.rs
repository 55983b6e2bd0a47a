//! # SUA Subcommand
//!
//! Verifies a login ticket and prints the resulting [`Login`] as JSON.
//! The policy comes from the global `--config` YAML file; without one the
//! default policy applies, which rejects unsigned and untrusted tickets.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use afip_sua::{authenticate, AuthConfig, AuthError, Login};

use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the `afip sua` subcommand.
#[derive(Args, Debug)]
pub struct SuaArgs {
    #[command(subcommand)]
    pub command: SuaCommand,
}

#[derive(Subcommand, Debug)]
pub enum SuaCommand {
    /// Authenticate a base64 ticket file.
    Verify {
        /// Base64 ticket.
        #[arg(long)]
        token: PathBuf,
        /// Base64 Ed25519 signature over the decoded ticket.
        #[arg(long)]
        signature: Option<PathBuf>,
    },
}

/// Execute the `afip sua` subcommand.
pub fn run_sua(args: &SuaArgs, config: Option<&Path>) -> Result<u8> {
    let config = load_config(config)?;
    match &args.command {
        SuaCommand::Verify { token, signature } => {
            let token_file = File::open(token)
                .with_context(|| format!("cannot open token {}", token.display()))?;
            let mut signature_file = match signature {
                Some(path) => Some(
                    File::open(path)
                        .with_context(|| format!("cannot open signature {}", path.display()))?,
                ),
                None => None,
            };
            let signature_reader = signature_file
                .as_mut()
                .map(|f| f as &mut dyn std::io::Read);

            match authenticate(token_file, signature_reader, &config) {
                Ok(login) => {
                    print_login(&login)?;
                    Ok(EXIT_OK)
                }
                Err(e @ AuthError::Io { .. }) | Err(e @ AuthError::Config(_)) => Err(e.into()),
                Err(e) => {
                    println!("REJECTED: {e}");
                    Ok(EXIT_INVALID)
                }
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AuthConfig> {
    match path {
        Some(path) => AuthConfig::from_yaml_file(path)
            .with_context(|| format!("cannot load policy {}", path.display())),
        None => {
            tracing::info!("no --config given, using default ticket policy");
            Ok(AuthConfig::default())
        }
    }
}

fn print_login(login: &Login) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(login)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_without_config() {
        let config = load_config(None).unwrap();
        assert!(!config.allow_unsigned);
        assert!(config.trusted_key.is_none());
    }

    #[test]
    fn missing_config_file_is_error() {
        assert!(load_config(Some(Path::new("/nonexistent/afip-sua.yaml"))).is_err());
    }

    const TICKET: &str = r#"<sso version="2.0">
  <id unique_id="cli" gen_time="1700000000" exp_time="4102444800"/>
  <operation type="login" value="granted">
    <login service="padron" uid="agente">
      <info name="cuil" value="20-24264377-2"/>
    </login>
  </operation>
</sso>"#;

    fn write_signed_ticket(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        use ed25519_dalek::{Signer, SigningKey};

        let key = SigningKey::from_bytes(&[5u8; 32]);
        let signature = key.sign(TICKET.as_bytes());

        let token = dir.join("ticket.b64");
        let sig = dir.join("ticket.sig");
        let config = dir.join("sua.yaml");
        std::fs::write(&token, STANDARD.encode(TICKET)).unwrap();
        std::fs::write(&sig, STANDARD.encode(signature.to_bytes())).unwrap();
        let trusted = afip_sua::TrustedKey::from(key.verifying_key());
        std::fs::write(&config, format!("trusted_key: \"{}\"\n", trusted.to_hex())).unwrap();
        (token, sig, config)
    }

    #[test]
    fn verify_signed_ticket() {
        let dir = tempfile::tempdir().unwrap();
        let (token, signature, config) = write_signed_ticket(dir.path());
        let args = SuaArgs {
            command: SuaCommand::Verify {
                token,
                signature: Some(signature),
            },
        };
        assert_eq!(run_sua(&args, Some(&config)).unwrap(), EXIT_OK);
    }

    #[test]
    fn unsigned_ticket_is_rejected_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let (token, _, config) = write_signed_ticket(dir.path());
        let args = SuaArgs {
            command: SuaCommand::Verify {
                token,
                signature: None,
            },
        };
        assert_eq!(run_sua(&args, Some(&config)).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn missing_token_file_is_error() {
        let args = SuaArgs {
            command: SuaCommand::Verify {
                token: PathBuf::from("/nonexistent/ticket.b64"),
                signature: None,
            },
        };
        assert!(run_sua(&args, None).is_err());
    }
}
