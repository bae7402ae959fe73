//! Commitment Hashing
//!
//! SHA-256 helpers and the 32-byte digest type that gets published
//! before a draw. Digests always render as 64 lowercase hex characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::DrawError;

/// Raw SHA-256 output (256 bits / 32 bytes).
pub type Digest32 = [u8; 32];

/// SHA-256 digest of a commitment's canonical JSON.
///
/// Serializes as lowercase hex so it round-trips through the reveal file
/// exactly as published.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitmentHash(pub Digest32);

impl CommitmentHash {
    /// Wrap raw digest bytes.
    pub const fn new(bytes: Digest32) -> Self {
        Self(bytes)
    }

    /// Hash arbitrary bytes.
    pub fn of(data: &[u8]) -> Self {
        Self(hash_bytes(data))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &Digest32 {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for CommitmentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for CommitmentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentHash({})", self.to_hex())
    }
}

impl FromStr for CommitmentHash {
    type Err = DrawError;

    /// Parse 64 hex characters (either case, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 64 {
            return Err(DrawError::InvalidHash(s.to_string()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(trimmed, &mut bytes)
            .map_err(|_| DrawError::InvalidHash(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for CommitmentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CommitmentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Compute SHA-256 of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 over several parts, as if they were concatenated.
pub fn hash_concat(parts: &[&[u8]]) -> Digest32 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Reduce a digest, read as a big-endian integer, modulo 2^32.
///
/// Only the last four bytes survive the reduction.
#[inline]
pub fn digest_mod_2_32(digest: &Digest32) -> u32 {
    u32::from_be_bytes([digest[28], digest[29], digest[30], digest[31]])
}

// =============================================================================
// TESTS
// =============================================================================
