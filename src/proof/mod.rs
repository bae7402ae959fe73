//! Commit-Reveal Proof System
//!
//! Provides verifiable draw outcomes through:
//! - Commitment to a secret nonce before the draw
//! - Deterministic seed derivation from the revealed commitment
//! - Verification by deterministic replay
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs   - Commitment creation and hashing          │
//! │  reveal.rs       - Ranged draw and reveal records           │
//! │  verify.rs       - Verification by replay                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod commitment;
pub mod reveal;
pub mod verify;

// Re-export key types
pub use commitment::{
    commit_with, compute_commitment_hash, Commitment, PublishedCommitment,
};
pub use reveal::{draw, draw_against, draw_in, DrawRange, RevealRecord};
pub use verify::{verify, verify_hex, verify_reveal, VerificationOutcome};
