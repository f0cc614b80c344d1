use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SignatureError;

/// Roles under which a party may sign an invoice.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Author of the bindle
    Creator,
    /// Party that reviewed and approved the bindle
    Approver,
    /// Party that re-published the bindle on behalf of others
    Proxy,
    /// Server hosting the bindle
    Host,
}

impl Role {
    /// Parses a role name, rejecting anything outside the known vocabulary.
    pub fn parse(role: &str) -> Result<Self, SignatureError> {
        Role::from_str(role).map_err(|_| SignatureError::InvalidRole(role.to_owned()))
    }
}
