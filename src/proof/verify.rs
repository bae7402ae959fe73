//! Verification API
//!
//! Third-party verification of a published draw: recompute the commitment
//! hash from the revealed fields, then replay the draw.

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::hash::CommitmentHash;
use crate::core::rng::DeterministicRng;
use crate::error::Result;
use crate::proof::commitment::{compute_commitment_hash, Commitment};
use crate::proof::reveal::{DrawRange, RevealRecord};

/// Verification result.
///
/// A hash mismatch is a normal outcome (`matches == false`), not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    /// Did the revealed data hash to the published commitment?
    pub matches: bool,

    /// Replayed draw result (only when the hash matches).
    pub result: Option<i64>,

    /// Replayed seed (only when the hash matches).
    pub seed_value: Option<u32>,

    /// Hash recomputed from the revealed data.
    pub computed_hash: CommitmentHash,
}

impl VerificationOutcome {
    /// Did verification pass?
    pub fn is_valid(&self) -> bool {
        self.matches
    }

    /// `(matches, result)` pair.
    pub fn as_pair(&self) -> (bool, Option<i64>) {
        (self.matches, self.result)
    }
}

/// Verify revealed data against a published hash and replay the draw.
///
/// Returns `matches = false` (and no result) when the hash differs, whatever
/// the range. With a matching hash, an inverted range is `InvalidRange`.
pub fn verify(
    published: &CommitmentHash,
    timestamp: &str,
    nonce: &str,
    min: i64,
    max: i64,
) -> Result<VerificationOutcome> {
    let computed_hash = compute_commitment_hash(timestamp, nonce)?;

    if computed_hash != *published {
        warn!(
            "Commitment mismatch: published {}, computed {}",
            published.short(),
            computed_hash.short()
        );
        return Ok(VerificationOutcome {
            matches: false,
            result: None,
            seed_value: None,
            computed_hash,
        });
    }

    let range = DrawRange::new(min, max)?;
    let commitment = Commitment::new(timestamp, nonce);
    let seed = commitment.seed();
    let result = range.sample(&mut DeterministicRng::from_commitment(timestamp, nonce));

    debug!("Verified commitment {} -> seed {}, result {}", computed_hash.short(), seed, result);

    Ok(VerificationOutcome {
        matches: true,
        result: Some(result),
        seed_value: Some(seed),
        computed_hash,
    })
}

/// Verify with the published hash given as text.
///
/// Text that is not a valid hash can never match, so it is reported as a
/// mismatch rather than an error.
pub fn verify_hex(
    published: &str,
    timestamp: &str,
    nonce: &str,
    min: i64,
    max: i64,
) -> Result<VerificationOutcome> {
    match published.parse::<CommitmentHash>() {
        Ok(hash) => verify(&hash, timestamp, nonce, min, max),
        Err(_) => {
            warn!("Published hash {:?} is not 64 hex characters", published);
            Ok(VerificationOutcome {
                matches: false,
                result: None,
                seed_value: None,
                computed_hash: compute_commitment_hash(timestamp, nonce)?,
            })
        }
    }
}

/// Check every field of a reveal record (hash, seed, result).
pub fn verify_reveal(record: &RevealRecord) -> Result<()> {
    record.verify()
}
