//! Datasource credential handling.
//!
//! Template datasources keep their passwords in at-rest form. Before a clone
//! is written the secrets are decrypted so the target store can re-encrypt
//! them under its own policy.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use crate::domain::Authentication;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Invalid encoded secret: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Decoded secret is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decrypts the secrets of an authentication block in place.
pub trait SecretDecryptor: Send + Sync {
    fn decrypt_authentication(&self, authentication: &mut Authentication)
        -> Result<(), SecretError>;
}

/// Stores secrets base64-wrapped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64SecretCodec;

impl Base64SecretCodec {
    pub fn encrypt_authentication(&self, authentication: &mut Authentication) {
        if authentication.is_encrypted {
            return;
        }
        if let Some(password) = authentication.password.as_mut() {
            *password = STANDARD.encode(password.as_bytes());
        }
        authentication.is_encrypted = true;
    }
}

impl SecretDecryptor for Base64SecretCodec {
    fn decrypt_authentication(
        &self,
        authentication: &mut Authentication,
    ) -> Result<(), SecretError> {
        if !authentication.is_encrypted {
            return Ok(());
        }
        if let Some(password) = authentication.password.as_mut() {
            let decoded = STANDARD.decode(password.as_bytes())?;
            *password = String::from_utf8(decoded)?;
        }
        authentication.is_encrypted = false;
        Ok(())
    }
}
