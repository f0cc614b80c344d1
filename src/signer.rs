/// Ed25519 elliptic curve signer
pub mod ed25519_signer;

pub use ed25519_signer::*;

use crate::error::Result;

/// Trait for producing Ed25519 signatures over invoice cleartext.
pub trait Signer {
    /// Signs the provided data and returns a 64-byte signature.
    ///
    /// # Arguments
    ///
    /// * `data` - The data to sign.
    ///
    /// # Returns
    ///
    /// A 64-byte signature array.
    fn sign(&self, data: &[u8]) -> Result<[u8; 64]>;

    /// Returns the 32-byte public key matching the signing key.
    fn public_key(&self) -> [u8; 32];
}
