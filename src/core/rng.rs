//! Deterministic Random Number Generator
//!
//! 32-bit Mersenne Twister (MT19937) with array seeding and a
//! rejection-sampling integer draw. Published draws are only reproducible if
//! every verifier walks the exact same bit stream, so the seeding procedure
//! and the range policy here are part of the protocol, not an implementation
//! detail.

use std::fmt;

use super::hash::{digest_mod_2_32, hash_concat};

/// Degree of recurrence (state size in words).
const N: usize = 624;
/// Middle word offset.
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Base seed applied before mixing in the key array.
const ARRAY_INIT_SEED: u32 = 19_650_218;

/// Deterministic PRNG using the MT19937 algorithm.
///
/// # Determinism Guarantee
///
/// Given the same seed, this RNG produces the exact same sequence on any
/// platform, and the same sequence as every other MT19937 implementation
/// that seeds through `init_by_array`.
///
/// # Example
///
/// ```
/// use fair_draw::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(42);
/// assert_eq!(rng.next_u32(), 2746317213); // Always the same!
/// ```
#[derive(Clone)]
pub struct DeterministicRng {
    state: [u32; N],
    index: usize,
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for DeterministicRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeterministicRng")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is used as a one-word key for `init_by_array`, including
    /// when it is zero.
    pub fn new(seed: u32) -> Self {
        Self::from_key(&[seed])
    }

    /// Create a new RNG from an arbitrary-length key (`init_by_array`).
    ///
    /// An empty key behaves like the single-word key `[0]`.
    pub fn from_key(key: &[u32]) -> Self {
        let key: &[u32] = if key.is_empty() { &[0] } else { key };

        let mut rng = Self::from_genrand(ARRAY_INIT_SEED);
        let mt = &mut rng.state;

        let mut i = 1usize;
        let mut j = 0usize;
        for _ in 0..N.max(key.len()) {
            let prev = mt[i - 1] ^ (mt[i - 1] >> 30);
            mt[i] = (mt[i] ^ prev.wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..N - 1 {
            let prev = mt[i - 1] ^ (mt[i - 1] >> 30);
            mt[i] = (mt[i] ^ prev.wrapping_mul(1_566_083_941)).wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
        }

        // Guarantees a non-zero initial state.
        mt[0] = UPPER_MASK;
        rng
    }

    /// Linear initialization from one word (`init_genrand`).
    fn from_genrand(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    /// Create RNG from revealed commitment fields.
    pub fn from_commitment(timestamp: &str, nonce: &str) -> Self {
        Self::new(derive_seed(timestamp, nonce))
    }

    /// Regenerate the whole state block.
    fn twist(&mut self) {
        let mt = &mut self.state;
        let mag01 = |y: u32| if y & 1 == 0 { 0 } else { MATRIX_A };

        for kk in 0..N - M {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + M] ^ (y >> 1) ^ mag01(y);
        }
        for kk in N - M..N - 1 {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + M - N] ^ (y >> 1) ^ mag01(y);
        }
        let y = (mt[N - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
        mt[N - 1] = mt[M - 1] ^ (y >> 1) ^ mag01(y);

        self.index = 0;
    }

    /// Generate the next 32-bit random value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }

        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Generate an integer with `bits` random bits (1..=128).
    ///
    /// Words are consumed least significant first; the last word keeps only
    /// its top bits. `bits == 0` yields 0 without consuming state.
    pub fn next_bits(&mut self, bits: u32) -> u128 {
        debug_assert!(bits <= 128, "at most 128 bits per draw");
        if bits == 0 {
            return 0;
        }
        if bits <= 32 {
            return (self.next_u32() >> (32 - bits)) as u128;
        }

        let mut result = 0u128;
        let mut remaining = bits;
        let mut shift = 0u32;
        while remaining > 0 {
            let mut word = self.next_u32();
            if remaining < 32 {
                word >>= 32 - remaining;
            }
            result |= (word as u128) << shift;
            shift += 32;
            remaining = remaining.saturating_sub(32);
        }
        result
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Draws `bit_length(max)` bits and rejects values `>= max`.
    /// Returns 0 without consuming state when `max == 0`.
    pub fn next_below(&mut self, max: u128) -> u128 {
        if max == 0 {
            return 0;
        }
        let bits = 128 - max.leading_zeros();
        loop {
            let candidate = self.next_bits(bits);
            if candidate < max {
                return candidate;
            }
        }
    }

    /// Generate a random integer in range [min, max].
    ///
    /// Covers the full `i64` domain; returns `min` when `min > max`.
    pub fn next_int_range(&mut self, min: i64, max: i64) -> i64 {
        if min > max {
            return min;
        }
        let width = (max as i128 - min as i128 + 1) as u128;
        let offset = self.next_below(width);
        (min as i128 + offset as i128) as i64
    }
}

/// Derive the draw seed from revealed commitment fields.
///
/// `SHA-256(timestamp || nonce)` read as a big-endian integer, reduced
/// modulo 2^32. The draw range is deliberately not an input.
pub fn derive_seed(timestamp: &str, nonce: &str) -> u32 {
    let digest = hash_concat(&[timestamp.as_bytes(), nonce.as_bytes()]);
    digest_mod_2_32(&digest)
}

// =============================================================================
// TESTS
// =============================================================================
