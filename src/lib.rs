//! # Fair Draw
//!
//! Verifiable random draws using a SHA-256 commit-reveal scheme.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FAIR DRAW                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── canonical.rs - Canonical JSON for commitment hashing    │
//! │  ├── hash.rs      - SHA-256 digests                          │
//! │  ├── rng.rs       - MT19937 PRNG and seed derivation         │
//! │  ├── time.rs      - KST (UTC+9) timestamps                   │
//! │  └── entropy.rs   - Nonce entropy source                     │
//! │                                                              │
//! │  proof/           - Commit-reveal protocol                   │
//! │  ├── commitment.rs- Commitment creation and hashing          │
//! │  ├── reveal.rs    - Ranged draw and reveal records           │
//! │  └── verify.rs    - Verification by replay                   │
//! │                                                              │
//! │  protocol.rs      - DrawProtocol (commit / draw / verify)    │
//! │  store.rs         - Commitment and reveal JSON files         │
//! │  config.rs        - Paths and default range                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Protocol
//!
//! 1. **Commit** (before the draw): take the current KST time and 32 random
//!    bytes, hash `{"nonce": …, "timestamp": …}` in canonical JSON, publish
//!    the hash and the timestamp. Keep the nonce secret.
//! 2. **Draw** (at the draw): pick the range, seed MT19937 with
//!    `SHA-256(timestamp || nonce) mod 2^32`, draw one integer, publish the
//!    nonce alongside the result.
//! 3. **Verify** (anyone, any time): recompute the hash from the revealed
//!    timestamp and nonce, compare with what was published, replay the draw.
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `proof/` modules are **fully deterministic** apart from
//! the nonce entropy and the commit clock:
//! - No floating-point arithmetic
//! - Canonical, byte-exact commitment encoding
//! - All draw randomness from seeded MT19937
//!
//! Given the same commitment and range, every conforming implementation
//! produces **the same result**.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod proof;
pub mod protocol;
pub mod store;

// Re-export commonly used types
pub use crate::core::entropy::{EntropySource, FixedEntropy, OsEntropy};
pub use crate::core::hash::CommitmentHash;
pub use crate::core::rng::{derive_seed, DeterministicRng};
pub use error::{DrawError, Result};
pub use proof::{Commitment, DrawRange, RevealRecord, VerificationOutcome};
pub use protocol::DrawProtocol;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
