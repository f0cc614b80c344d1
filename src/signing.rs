use std::collections::HashMap;

use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signature as Ed25519Signature, Verifier, VerifyingKey};

use crate::{
    error::{Result, SignatureError},
    invoice::{Invoice, Signature},
    role::Role,
    signature_key::SignatureKey,
    signer::{Ed25519Signer, Signer},
};

// Bindle's signing docs put `at` in the cleartext, but bindle servers do not
// sign over it, so neither do we.

impl Invoice {
    /// Signs this invoice as `author` under `role` and appends the signature.
    ///
    /// # Arguments
    ///
    /// * `author` - Identity to sign as; must be one of the bindle's authors.
    /// * `role` - Role name; must be one of the known roles.
    /// * `sig_key` - The signer's own key entry; must include `role`.
    /// * `private_key` - Ed25519 private key, as a 32-byte seed or a 64-byte
    ///   seed and public key.
    ///
    /// # Returns
    ///
    /// `Ok(())` once exactly one signature has been appended. On any error
    /// the invoice is left unchanged.
    pub fn generate_signature(
        &mut self,
        author: &str,
        role: &str,
        sig_key: &SignatureKey,
        private_key: &[u8],
    ) -> Result<()> {
        let role = check_preconditions(self, author, role, sig_key)?;
        let signer = Ed25519Signer::import(private_key)?;

        self.append_signature(author, role, sig_key, &signer)
    }

    /// Same as [`Invoice::generate_signature`], signing with an existing
    /// [`Signer`] instead of raw key bytes.
    pub fn generate_signature_with(
        &mut self,
        author: &str,
        role: &str,
        sig_key: &SignatureKey,
        signer: &dyn Signer,
    ) -> Result<()> {
        let role = check_preconditions(self, author, role, sig_key)?;

        self.append_signature(author, role, sig_key, signer)
    }

    fn append_signature(
        &mut self,
        author: &str,
        role: Role,
        sig_key: &SignatureKey,
        signer: &dyn Signer,
    ) -> Result<()> {
        let at = chrono::Utc::now().timestamp();

        let cleartext = self.cleartext(author, role);

        log::debug!("Signing invoice {} as '{author}' ({role})", self.bindle_id());
        let sig = signer.sign(cleartext.as_bytes())?;

        let pub_key = sig_key.public_key_bytes()?;

        let signature = Signature {
            by: author.to_owned(),
            signature: BASE64.encode(sig),
            key: BASE64.encode(pub_key),
            role: role.to_string(),
            at,
        };

        self.signature.push(signature);

        Ok(())
    }

    /// Verifies every signature on this invoice against `sig_keys`.
    ///
    /// Each key's self-certificate is checked first; a single bad key fails
    /// the whole call. Then every signature must come from the key whose
    /// label matches its `by` field, carry a role that key includes, and
    /// verify over the invoice cleartext. The first failure is returned.
    pub fn verify_signatures(&self, sig_keys: &[SignatureKey]) -> Result<()> {
        log::trace!(
            "Verifying {} signature(s) on {} with {} key(s)",
            self.signature.len(),
            self.bindle_id(),
            sig_keys.len()
        );

        let keys = trusted_keys(sig_keys)?;

        for s in self.signature.iter() {
            let (key, verifying_key) = keys.get(s.by.as_str()).ok_or_else(|| {
                log::warn!("No signature key for '{}'", s.by);
                SignatureError::MissingSignatureKey(s.by.clone())
            })?;

            let role = Role::parse(&s.role)
                .ok()
                .filter(|role| key.includes_role(*role))
                .ok_or_else(|| SignatureError::SignatureKeyRoleMismatch {
                    label: key.label.clone(),
                    role: s.role.clone(),
                })?;

            let sig_bytes = BASE64.decode(&s.signature)?;

            let invalid = || SignatureError::InvalidSignature {
                by: s.by.clone(),
                role: s.role.clone(),
            };

            let sig = Ed25519Signature::from_slice(&sig_bytes).map_err(|_| invalid())?;

            let cleartext = self.cleartext(&key.label, role);

            verifying_key
                .verify(cleartext.as_bytes(), &sig)
                .map_err(|_| invalid())?;

            log::trace!("Signature by '{}' ({role}) is valid", s.by);
        }

        Ok(())
    }

    fn bindle_id(&self) -> String {
        format!("{}/{}", self.bindle.name, self.bindle.version)
    }
}

/// Runs the signing preconditions in order, returning the parsed role.
fn check_preconditions(
    invoice: &Invoice,
    author: &str,
    role: &str,
    sig_key: &SignatureKey,
) -> Result<Role> {
    let role = Role::parse(role)?;

    if !sig_key.includes_role(role) {
        return Err(SignatureError::SignatureKeyRoleMismatch {
            label: sig_key.label.clone(),
            role: role.to_string(),
        });
    }

    if !invoice.is_authored_by(author) {
        return Err(SignatureError::AuthorNotExist(author.to_owned()));
    }

    Ok(role)
}

/// Checks each key's self-certificate and indexes the keys by label. Later
/// keys replace earlier ones with the same label.
fn trusted_keys(sig_keys: &[SignatureKey]) -> Result<HashMap<&str, (&SignatureKey, VerifyingKey)>> {
    let mut keys = HashMap::with_capacity(sig_keys.len());

    for key in sig_keys {
        let verifying_key = key.verify_label().map_err(|e| {
            log::warn!("Rejecting signature key '{}': {e}", key.label);
            e
        })?;

        keys.insert(key.label.as_str(), (key, verifying_key));
    }

    Ok(keys)
}
