use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signature as Ed25519Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SignatureError},
    role::Role,
    signer::Signer,
};

/// A named public key, the roles it may sign under, and a self-certificate
/// binding the name to the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureKey {
    /// Identity of the key holder, matched against `Signature::by`
    pub label: String,
    /// Roles this key is trusted to sign under
    pub roles: Vec<Role>,
    /// Base64-encoded Ed25519 public key
    pub key: String,
    /// Base64-encoded signature over `label`, made by this key
    pub label_signature: String,
}

impl SignatureKey {
    /// Builds a signature key for existing key material, signing `label` with
    /// `signer` to produce the self-certificate.
    pub fn certify(label: &str, roles: Vec<Role>, signer: &dyn Signer) -> Result<Self> {
        log::debug!("Certifying signature key for '{label}'");
        let label_signature = signer.sign(label.as_bytes())?;

        Ok(SignatureKey {
            label: label.to_owned(),
            roles,
            key: BASE64.encode(signer.public_key()),
            label_signature: BASE64.encode(label_signature),
        })
    }

    /// Returns true if this key may sign under `role`.
    pub fn includes_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Decodes the public key without checking the self-certificate.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        Ok(BASE64.decode(&self.key)?)
    }

    /// Checks that `label_signature` is a valid signature over `label` by this
    /// key, and returns the decoded public key if so.
    ///
    /// Malformed base64 is reported as `Decode`; a key or signature of the
    /// wrong shape, or a signature that does not verify, as
    /// `InvalidSignatureKey`.
    pub fn verify_label(&self) -> Result<VerifyingKey> {
        let key_bytes = self.public_key_bytes()?;
        let label_sig_bytes = BASE64.decode(&self.label_signature)?;

        let invalid = || SignatureError::InvalidSignatureKey(self.label.clone());

        let verifying_key =
            VerifyingKey::try_from(key_bytes.as_slice()).map_err(|_| invalid())?;
        let label_sig =
            Ed25519Signature::from_slice(&label_sig_bytes).map_err(|_| invalid())?;

        verifying_key
            .verify(self.label.as_bytes(), &label_sig)
            .map_err(|_| invalid())?;

        Ok(verifying_key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::signer::Ed25519Signer;

    pub(crate) fn test_signer(seed: u8) -> Ed25519Signer {
        Ed25519Signer::import(&[seed; 32]).unwrap()
    }

    #[test]
    fn certify_and_verify_label() {
        let _ = env_logger::builder().is_test(true).try_init();
        let signer = test_signer(1);

        let key = SignatureKey::certify("Test <test@example.com>", vec![Role::Creator], &signer)
            .unwrap();

        assert_eq!(key.key, signer.public_key_base64());
        let verifying_key = key.verify_label().unwrap();
        assert_eq!(verifying_key.to_bytes(), signer.public_key());
    }

    #[test]
    fn includes_role() {
        let key = SignatureKey::certify(
            "Test <test@example.com>",
            vec![Role::Creator, Role::Approver],
            &test_signer(1),
        )
        .unwrap();

        assert!(key.includes_role(Role::Creator));
        assert!(key.includes_role(Role::Approver));
        assert!(!key.includes_role(Role::Proxy));
        assert!(!key.includes_role(Role::Host));
    }

    #[test]
    fn relabeled_key_fails_self_certificate() {
        let mut key =
            SignatureKey::certify("Alice", vec![Role::Creator], &test_signer(1)).unwrap();
        key.label = "Mallory".to_owned();

        let result = key.verify_label();
        assert!(
            matches!(result, Err(SignatureError::InvalidSignatureKey(ref l)) if l == "Mallory"),
            "Expected InvalidSignatureKey, got {result:?}"
        );
    }

    #[test]
    fn foreign_self_certificate_is_rejected() {
        let alice = SignatureKey::certify("Alice", vec![Role::Creator], &test_signer(1)).unwrap();
        let mut mallory =
            SignatureKey::certify("Alice", vec![Role::Creator], &test_signer(2)).unwrap();
        mallory.label_signature = alice.label_signature.clone();

        assert!(matches!(
            mallory.verify_label(),
            Err(SignatureError::InvalidSignatureKey(_))
        ));
    }

    #[test]
    fn short_key_is_invalid() {
        let mut key = SignatureKey::certify("Alice", vec![Role::Creator], &test_signer(1)).unwrap();
        key.key = BASE64.encode([1u8; 16]);

        assert!(matches!(
            key.verify_label(),
            Err(SignatureError::InvalidSignatureKey(_))
        ));
    }

    #[test]
    fn malformed_base64_is_decode_error() {
        let mut key = SignatureKey::certify("Alice", vec![Role::Creator], &test_signer(1)).unwrap();
        key.label_signature = "not base64!".to_owned();

        assert!(matches!(key.verify_label(), Err(SignatureError::Decode(_))));
    }

    #[test]
    fn serde_field_names() {
        let key = SignatureKey::certify("Alice", vec![Role::Host], &test_signer(1)).unwrap();

        let value = serde_json::to_value(&key).unwrap();
        assert_eq!(value["label"], "Alice");
        assert_eq!(value["roles"][0], "host");
        assert_eq!(value["labelSignature"], key.label_signature.as_str());
    }
}
