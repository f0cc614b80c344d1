use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};

use crate::{
    error::{Result, SignatureError},
    signer::Signer,
};

/// Length of a seed followed by its public key, the layout many tools use
/// when exporting Ed25519 private keys.
const KEYPAIR_LENGTH: usize = 64;

/// Represents a signer that uses an Ed25519 key pair for signing.
#[derive(Debug, Clone)]
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Imports an Ed25519Signer instance from raw private key bytes.
    ///
    /// # Arguments
    ///
    /// * `secret_key` - Either the 32-byte seed, or the 64-byte seed followed
    ///   by its public key.
    ///
    /// # Returns
    ///
    /// A new `Ed25519Signer`, or `InvalidPrivateKey` if the bytes have the
    /// wrong length or the embedded public key does not match the seed.
    pub fn import(secret_key: &[u8]) -> Result<Self> {
        let signing_key = match secret_key.len() {
            SECRET_KEY_LENGTH => {
                let seed: &[u8; SECRET_KEY_LENGTH] = secret_key
                    .try_into()
                    .map_err(|_| SignatureError::InvalidPrivateKey("bad seed".to_owned()))?;
                SigningKey::from_bytes(seed)
            }
            KEYPAIR_LENGTH => {
                let keypair: &[u8; KEYPAIR_LENGTH] = secret_key
                    .try_into()
                    .map_err(|_| SignatureError::InvalidPrivateKey("bad keypair".to_owned()))?;
                SigningKey::from_keypair_bytes(keypair)
                    .map_err(|e| SignatureError::InvalidPrivateKey(e.to_string()))?
            }
            len => {
                return Err(SignatureError::InvalidPrivateKey(format!(
                    "expected {SECRET_KEY_LENGTH} or {KEYPAIR_LENGTH} bytes, got {len}"
                )));
            }
        };

        Ok(Ed25519Signer { signing_key })
    }

    /// Returns the public key in the base64 form stored on signature keys.
    pub fn public_key_base64(&self) -> String {
        BASE64.encode(self.public_key())
    }
}

impl Signer for Ed25519Signer {
    fn sign(&self, data: &[u8]) -> Result<[u8; 64]> {
        log::trace!("Signing data with Ed25519 key");
        let sig = ed25519_dalek::Signer::sign(&self.signing_key, data);
        Ok(sig.to_bytes())
    }

    fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}
