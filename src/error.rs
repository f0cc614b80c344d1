use thiserror::Error;

/// Result type for invoice signing and verification.
pub type Result<T> = std::result::Result<T, SignatureError>;

/// Reasons a signing or verification call is rejected.
///
/// Every variant is terminal: the call that produced it made no change to the
/// invoice and accepted nothing.
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("author does not exist on invoice: {0}")]
    AuthorNotExist(String),

    #[error("signature key '{label}' is not valid for the provided role '{role}'")]
    SignatureKeyRoleMismatch { label: String, role: String },

    #[error("signature key is not valid: {0}")]
    InvalidSignatureKey(String),

    #[error("missing signature key for {0}")]
    MissingSignatureKey(String),

    #[error("signature by '{by}' for role '{role}' is not valid")]
    InvalidSignature { by: String, role: String },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("failed to decode base64: {0}")]
    Decode(#[from] base64::DecodeError),
}
