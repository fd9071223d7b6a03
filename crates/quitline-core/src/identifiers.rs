//! Core identifier types used across the Quitline client
//!
//! Identifiers are thin newtypes over their wire representation so that a
//! counter id, an account address, and a correlation token can never be
//! confused for one another at an API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised when parsing identifier values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The value is not a `0x`-prefixed 20-byte hex address.
    #[error("invalid account address '{0}'")]
    InvalidAddress(String),
}

/// Counter identifier, assigned by the contract at creation.
///
/// Unique per owning account, not globally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct CounterId(pub u64);

impl CounterId {
    /// Create a counter id from its raw contract value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CounterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<CounterId> for u64 {
    fn from(id: CounterId) -> Self {
        id.0
    }
}

/// Owning account address on the chain.
///
/// Stored normalized to lowercase so equality and map lookups behave the
/// same regardless of how the wallet checksums the address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parse and normalize an address.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        let hex_part = raw
            .strip_prefix("0x")
            .ok_or_else(|| IdentifierError::InvalidAddress(raw.clone()))?;
        let bytes =
            hex::decode(hex_part).map_err(|_| IdentifierError::InvalidAddress(raw.clone()))?;
        if bytes.len() != 20 {
            return Err(IdentifierError::InvalidAddress(raw));
        }
        Ok(Self(format!("0x{}", hex_part.to_lowercase())))
    }

    /// Get the normalized `0x`-prefixed string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Opaque identifier returned by the submission collaborator.
///
/// In production this is a transaction hash; the engine only ever compares
/// tokens for equality, so no structure is imposed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Wrap a raw token value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a token from 32 hash bytes, rendered as `0x`-prefixed hex.
    pub fn from_hash_bytes(bytes: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Get the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CorrelationToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_address_normalizes_case() {
        let upper = AccountAddress::new("0xF6016fCb6653e4D351b976c0574C0359d5D209f4")
            .expect("valid address");
        let lower = AccountAddress::new("0xf6016fcb6653e4d351b976c0574c0359d5d209f4")
            .expect("valid address");
        assert_eq!(upper, lower);
        assert!(upper.as_str().starts_with("0x"));
    }

    #[test]
    fn account_address_rejects_bad_input() {
        assert!(AccountAddress::new("f6016fcb").is_err());
        assert!(AccountAddress::new("0x1234").is_err());
        assert!(AccountAddress::new("0xzz016fcb6653e4d351b976c0574c0359d5d209f4").is_err());
    }

    #[test]
    fn correlation_token_from_hash_bytes_is_hex() {
        let token = CorrelationToken::from_hash_bytes([0xab; 32]);
        assert_eq!(token.as_str().len(), 2 + 64);
        assert!(token.as_str().starts_with("0xabab"));
    }

    #[test]
    fn counter_id_roundtrip() {
        let id = CounterId::new(7);
        assert_eq!(u64::from(id), 7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(CounterId::from(7), id);
    }
}
