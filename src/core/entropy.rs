//! Nonce Entropy
//!
//! Commitment nonces come from the operating system's CSPRNG. The source is
//! a trait so a draw can be replayed with pinned bytes.

use tracing::error;

use crate::error::{DrawError, Result};

/// Nonce length in bytes (256 bits).
pub const NONCE_LEN: usize = 32;

/// A source of random bytes for commitment nonces.
pub trait EntropySource {
    /// Fill `dest` entirely or fail.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// Operating system entropy (`getrandom`).
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::getrandom(dest).map_err(|e| {
            error!("OS entropy source failed: {}", e);
            DrawError::EntropySourceFailure(e.to_string())
        })
    }
}

/// Repeats a fixed byte pattern. For tests and reproducible demos only.
#[derive(Clone, Debug)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
    pos: usize,
}

impl FixedEntropy {
    /// Create a source cycling through `pattern`.
    ///
    /// An empty pattern yields zero bytes.
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
            pos: 0,
        }
    }
}

impl EntropySource for FixedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        if self.pattern.is_empty() {
            dest.fill(0);
            return Ok(());
        }
        for byte in dest.iter_mut() {
            *byte = self.pattern[self.pos];
            self.pos = (self.pos + 1) % self.pattern.len();
        }
        Ok(())
    }
}

/// Draw a fresh nonce as 64 lowercase hex characters.
pub fn generate_nonce<E: EntropySource + ?Sized>(source: &mut E) -> Result<String> {
    let mut bytes = [0u8; NONCE_LEN];
    source.fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// Check that `nonce` looks like one we would have generated.
pub fn is_well_formed_nonce(nonce: &str) -> bool {
    nonce.len() == NONCE_LEN * 2
        && nonce.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
