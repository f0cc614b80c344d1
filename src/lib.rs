//! Library for signing and verifying bindle invoices.
//!
//! An invoice lists a bindle's metadata, its authors, and the content digests
//! of its parcels. Authors attach role-scoped Ed25519 signatures over a
//! canonical rendering of the invoice, and verifiers check those signatures
//! against a set of self-certified signature keys.

/// Error types shared by signing and verification
pub mod error;

/// Invoice data model and canonical signing text
pub mod invoice;

/// Keyring of trusted signature keys
pub mod keyring;

/// Closed vocabulary of signing roles
pub mod role;

/// Self-certified, role-scoped public keys
pub mod signature_key;

/// Digital signature implementations
pub mod signer;

/// Invoice signature generation and verification
pub mod signing;

pub use error::{Result, SignatureError};
pub use invoice::{BindleSpec, Invoice, Label, Parcel, Signature};
pub use keyring::KeyRing;
pub use role::Role;
pub use signature_key::SignatureKey;
pub use signer::{Ed25519Signer, Signer};
