//! Draw Protocol Errors
//!
//! A hash mismatch during verification is an outcome, not an error.
//! `HashMismatch` is only raised when a caller asks the protocol to
//! enforce a published hash (see `draw_against`).

use std::path::PathBuf;
use thiserror::Error;

use crate::core::hash::CommitmentHash;

/// Errors raised by the draw protocol and its persistence layer.
#[derive(Debug, Error)]
pub enum DrawError {
    /// No commitment has been created (or the file is gone).
    #[error("no commitment found at {}; run `commit` first", path.display())]
    MissingCommitment {
        /// Where the commitment was expected.
        path: PathBuf,
    },

    /// Lower bound is greater than upper bound.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// Revealed data does not hash to the published commitment.
    #[error("commitment hash mismatch: published {expected}, computed {computed}")]
    HashMismatch {
        /// Hash that was published before the draw.
        expected: CommitmentHash,
        /// Hash recomputed from the revealed data.
        computed: CommitmentHash,
    },

    /// A reveal record's seed disagrees with its commitment.
    #[error("seed mismatch: recorded {recorded}, computed {computed}")]
    SeedMismatch {
        /// Seed stored in the reveal record.
        recorded: u32,
        /// Seed derived from the revealed commitment.
        computed: u32,
    },

    /// A reveal record's result disagrees with a fresh draw.
    #[error("result mismatch: recorded {recorded}, recomputed {computed}")]
    ResultMismatch {
        /// Result stored in the reveal record.
        recorded: i64,
        /// Result of redrawing from the revealed commitment.
        computed: i64,
    },

    /// The OS entropy source could not produce a nonce.
    #[error("entropy source failure: {0}")]
    EntropySourceFailure(String),

    /// A commitment hash string is not 64 hex characters.
    #[error("invalid commitment hash: {0:?}")]
    InvalidHash(String),

    /// Commitment fields could not be encoded canonically.
    #[error("canonical serialization failed: {0}")]
    Canonicalize(#[source] serde_json::Error),

    /// File could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File contents are not the expected JSON shape.
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, DrawError>;
