//! Draw Protocol
//!
//! The three caller-facing operations in one place. The protocol holds no
//! session data: the caller keeps the commitment between `commit` and `draw`
//! and decides where to store it.

use chrono::{DateTime, FixedOffset};

use crate::core::entropy::{EntropySource, OsEntropy};
use crate::core::hash::CommitmentHash;
use crate::core::time::now_kst;
use crate::error::Result;
use crate::proof::{self, Commitment, RevealRecord, VerificationOutcome};

/// Commit-reveal draw protocol.
///
/// # Example
///
/// ```
/// use fair_draw::{DrawProtocol, FixedEntropy};
///
/// let mut protocol = DrawProtocol::with_entropy(FixedEntropy::new(vec![7]));
/// let (hash, commitment) = protocol.commit().unwrap();
///
/// let record = protocol.draw(&commitment, 1, 10).unwrap();
/// let outcome = protocol
///     .verify(&hash, &commitment.timestamp, &commitment.nonce, 1, 10)
///     .unwrap();
///
/// assert_eq!(outcome.as_pair(), (true, Some(record.result)));
/// ```
#[derive(Debug, Default)]
pub struct DrawProtocol<E = OsEntropy> {
    entropy: E,
}

impl DrawProtocol<OsEntropy> {
    /// Protocol backed by OS entropy.
    pub fn new() -> Self {
        Self { entropy: OsEntropy }
    }
}

impl<E: EntropySource> DrawProtocol<E> {
    /// Protocol backed by a custom entropy source.
    pub fn with_entropy(entropy: E) -> Self {
        Self { entropy }
    }

    /// Create a commitment at the current KST time.
    pub fn commit(&mut self) -> Result<(CommitmentHash, Commitment)> {
        self.commit_at(&now_kst())
    }

    /// Create a commitment at a given instant.
    pub fn commit_at(&mut self, now: &DateTime<FixedOffset>) -> Result<(CommitmentHash, Commitment)> {
        proof::commit_with(now, &mut self.entropy)
    }

    /// Draw one integer in `[min, max]`.
    pub fn draw(&self, commitment: &Commitment, min: i64, max: i64) -> Result<RevealRecord> {
        proof::draw(commitment, min, max)
    }

    /// Draw, refusing if the commitment does not match `published`.
    pub fn draw_against(
        &self,
        published: &CommitmentHash,
        commitment: &Commitment,
        min: i64,
        max: i64,
    ) -> Result<RevealRecord> {
        proof::draw_against(published, commitment, min, max)
    }

    /// Verify revealed data and replay the draw.
    pub fn verify(
        &self,
        published: &CommitmentHash,
        timestamp: &str,
        nonce: &str,
        min: i64,
        max: i64,
    ) -> Result<VerificationOutcome> {
        proof::verify(published, timestamp, nonce, min, max)
    }

    /// Check a full reveal record.
    pub fn verify_reveal(&self, record: &RevealRecord) -> Result<()> {
        proof::verify_reveal(record)
    }
}
