//! Draw Commitment Protocol
//!
//! Commit to a secret before the draw, publish only its hash.
//! Reveal the secret afterwards so anyone can recompute the draw.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::canonical::canonical_json;
use crate::core::entropy::{generate_nonce, EntropySource};
use crate::core::hash::CommitmentHash;
use crate::core::rng::derive_seed;
use crate::core::time::format_timestamp;
use crate::error::{DrawError, Result};

/// Secret commitment data (kept private until the reveal).
///
/// Both fields are opaque strings: a revealed commitment is hashed exactly
/// as typed, so nothing here normalizes or validates them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment {
    /// ISO-8601 creation time with `+09:00` offset.
    pub timestamp: String,

    /// 64 lowercase hex characters (32 random bytes).
    pub nonce: String,
}

/// Borrowed view used for hashing without cloning.
#[derive(Serialize)]
struct CommitmentView<'a> {
    timestamp: &'a str,
    nonce: &'a str,
}

impl Commitment {
    /// Build a commitment from already-known fields.
    pub fn new(timestamp: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            nonce: nonce.into(),
        }
    }

    /// Create a fresh commitment at `now` with a nonce from `entropy`.
    pub fn generate<E>(now: &DateTime<FixedOffset>, entropy: &mut E) -> Result<Self>
    where
        E: EntropySource + ?Sized,
    {
        let nonce = generate_nonce(entropy)?;
        Ok(Self::new(format_timestamp(now), nonce))
    }

    /// The exact string that gets hashed.
    pub fn canonical_json(&self) -> Result<String> {
        canonical_commitment_json(&self.timestamp, &self.nonce)
    }

    /// Commitment hash (the value published before the draw).
    pub fn hash(&self) -> Result<CommitmentHash> {
        compute_commitment_hash(&self.timestamp, &self.nonce)
    }

    /// Draw seed derived from this commitment.
    pub fn seed(&self) -> u32 {
        derive_seed(&self.timestamp, &self.nonce)
    }

    /// Does this commitment hash to `published`?
    pub fn matches(&self, published: &CommitmentHash) -> Result<bool> {
        Ok(self.hash()? == *published)
    }
}

/// What the organizer publishes right after committing.
///
/// The timestamp is public from the start; only the nonce stays secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedCommitment {
    /// Commitment hash.
    pub commitment_hash: CommitmentHash,

    /// Commitment timestamp.
    pub timestamp: String,
}

impl PublishedCommitment {
    /// Derive the public half of a commitment.
    pub fn from_commitment(commitment: &Commitment) -> Result<Self> {
        Ok(Self {
            commitment_hash: commitment.hash()?,
            timestamp: commitment.timestamp.clone(),
        })
    }

    /// Verify that a revealed commitment matches what was published.
    ///
    /// The timestamp must match too; a reveal that swaps in a different
    /// (but hash-consistent) timestamp is rejected.
    pub fn verify(&self, commitment: &Commitment) -> Result<bool> {
        Ok(self.timestamp == commitment.timestamp && commitment.matches(&self.commitment_hash)?)
    }
}

/// Canonical JSON of `{timestamp, nonce}`.
pub fn canonical_commitment_json(timestamp: &str, nonce: &str) -> Result<String> {
    canonical_json(&CommitmentView { timestamp, nonce }).map_err(DrawError::Canonicalize)
}

/// Compute the commitment hash from revealed fields.
pub fn compute_commitment_hash(timestamp: &str, nonce: &str) -> Result<CommitmentHash> {
    let canonical = canonical_commitment_json(timestamp, nonce)?;
    Ok(CommitmentHash::of(canonical.as_bytes()))
}

/// Create a commitment and its hash.
///
/// Persistence and publication are the caller's job.
pub fn commit_with<E>(now: &DateTime<FixedOffset>, entropy: &mut E) -> Result<(CommitmentHash, Commitment)>
where
    E: EntropySource + ?Sized,
{
    let commitment = Commitment::generate(now, entropy)?;
    let hash = commitment.hash()?;

    info!("Commitment {} created at {}", hash.short(), commitment.timestamp);
    debug!("Commitment hash: {}", hash);

    Ok((hash, commitment))
}
