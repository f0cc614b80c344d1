use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Separates the bindle metadata from the parcel digests in the signing text.
const CLEARTEXT_SEPARATOR: &str = "~";

/// Manifest describing a bindle, its parcels, and the signatures on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Version of the invoice format
    pub bindle_version: String,
    /// Name, version and authors of the bindle
    pub bindle: BindleSpec,
    /// Free-form annotations; not covered by signatures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    /// Content-addressed parts of the bindle, in signing order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parcel: Vec<Parcel>,
    /// Signatures attached to this invoice, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signature: Vec<Signature>,
}

/// Identity of the bindle an invoice describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindleSpec {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identities allowed to sign this invoice as authors
    #[serde(default)]
    pub authors: Vec<String>,
}

/// One content-addressed part of a bindle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub label: Label,
}

/// Metadata identifying a parcel's content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Hex-encoded SHA-256 digest of the parcel content
    pub sha256: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// A signature record attached to an invoice.
///
/// `key` holds the signer's public key at the time of signing. It is kept for
/// audit only; verification uses the keys supplied by the verifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Author identity the signature was made as
    pub by: String,
    /// Base64-encoded Ed25519 signature over the invoice cleartext
    pub signature: String,
    /// Base64-encoded Ed25519 public key of the signer
    pub key: String,
    pub role: String,
    /// Unix timestamp (seconds) at which the signature was made
    pub at: i64,
}

impl Signature {
    /// Returns the signing time, if `at` is a representable timestamp.
    pub fn signed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.at, 0)
    }
}

impl Invoice {
    /// Returns true if `author` is listed among the bindle's authors.
    pub fn is_authored_by(&self, author: &str) -> bool {
        self.bindle.authors.iter().any(|a| a == author)
    }

    /// Renders the text that an `author` signs when vouching for this invoice
    /// under `role`.
    ///
    /// The lines are, in order: author, bindle name, bindle version, role,
    /// `~`, then the SHA-256 digest of each parcel in list order. Nothing is
    /// escaped, so fields must not contain newlines. The signing time is not
    /// part of the text.
    pub fn cleartext(&self, author: &str, role: Role) -> String {
        let role = role.to_string();

        let mut parts = vec![
            author,
            self.bindle.name.as_str(),
            self.bindle.version.as_str(),
            role.as_str(),
            CLEARTEXT_SEPARATOR,
        ];
        parts.extend(self.parcel.iter().map(|p| p.label.sha256.as_str()));

        parts.join("\n")
    }
}
