#[cfg(feature = "keyring")]
use std::{fs, path::Path};

#[cfg(feature = "keyring")]
use anyhow::{anyhow, Result as AnyResult};
use serde::{Deserialize, Serialize};

use crate::{error::Result, invoice::Invoice, signature_key::SignatureKey};

/// Current keyring format version.
pub const KEYRING_VERSION: &str = "1.0";

/// A collection of signature keys trusted to verify invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRing {
    pub version: String,
    #[serde(default)]
    pub key: Vec<SignatureKey>,
}

impl Default for KeyRing {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl KeyRing {
    pub fn new(key: Vec<SignatureKey>) -> Self {
        KeyRing {
            version: KEYRING_VERSION.to_owned(),
            key,
        }
    }

    /// Adds a key to the ring. Keys are not checked until verification.
    pub fn add_entry(&mut self, key: SignatureKey) {
        self.key.push(key);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignatureKey> {
        self.key.iter()
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Verifies every signature on `invoice` against the keys in this ring.
    pub fn verify_invoice(&self, invoice: &Invoice) -> Result<()> {
        invoice.verify_signatures(&self.key)
    }

    /// Parses a keyring from its TOML form.
    #[cfg(feature = "keyring")]
    pub fn from_toml_str(s: &str) -> AnyResult<Self> {
        let keyring = toml::from_str(s).map_err(|e| anyhow!("Failed to parse keyring: {e}"))?;
        Ok(keyring)
    }

    /// Renders this keyring as TOML.
    #[cfg(feature = "keyring")]
    pub fn to_toml_string(&self) -> AnyResult<String> {
        let s = toml::to_string(self).map_err(|e| anyhow!("Failed to serialize keyring: {e}"))?;
        Ok(s)
    }
}

/// Loads a keyring from a TOML file.
///
/// # Arguments
///
/// * `path` - Path to the keyring file.
///
/// # Returns
///
/// The parsed `KeyRing`. Self-certificates are not checked here.
#[cfg(feature = "keyring")]
pub fn load_keyring(path: impl AsRef<Path>) -> AnyResult<KeyRing> {
    let path = path.as_ref();
    log::debug!("Loading keyring from {}", path.display());

    let contents = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read keyring {}: {e}", path.display()))?;
    KeyRing::from_toml_str(&contents)
}

/// Saves a keyring to a TOML file, replacing any existing file.
#[cfg(feature = "keyring")]
pub fn save_keyring(keyring: &KeyRing, path: impl AsRef<Path>) -> AnyResult<()> {
    let path = path.as_ref();
    log::debug!("Saving keyring with {} key(s) to {}", keyring.len(), path.display());

    let contents = keyring.to_toml_string()?;
    fs::write(path, contents).map_err(|e| anyhow!("Failed to write to file: {e}"))?;
    Ok(())
}
