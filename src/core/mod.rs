//! Core deterministic primitives.
//!
//! Everything a third party needs to recompute a draw lives here: the
//! canonical commitment encoding, SHA-256 helpers, and the seeded generator.
//! Only `entropy` and `time::now_kst` touch the outside world.

pub mod canonical;
pub mod entropy;
pub mod hash;
pub mod rng;
pub mod time;

// Re-export core types
pub use canonical::{canonical_json, CanonicalFormatter};
pub use entropy::{generate_nonce, EntropySource, FixedEntropy, OsEntropy, NONCE_LEN};
pub use hash::{CommitmentHash, Digest32};
pub use rng::{derive_seed, DeterministicRng};
pub use time::{format_timestamp, now_kst, KST_OFFSET_SECS};
