//! Draw and Reveal
//!
//! Turns a commitment plus a range into a reveal record. The range is
//! chosen at draw time and never feeds the seed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::hash::CommitmentHash;
use crate::core::rng::DeterministicRng;
use crate::error::{DrawError, Result};
use crate::proof::commitment::Commitment;

/// Inclusive draw range, `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DrawRange {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawRange {
    min: i64,
    max: i64,
}

impl TryFrom<RawRange> for DrawRange {
    type Error = DrawError;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl DrawRange {
    /// Validate and build a range.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(DrawError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of possible outcomes (up to 2^64).
    pub fn len(&self) -> u128 {
        (self.max as i128 - self.min as i128 + 1) as u128
    }

    /// A valid range is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Is `value` a possible outcome?
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draw one value from `rng`.
    pub fn sample(&self, rng: &mut DeterministicRng) -> i64 {
        rng.next_int_range(self.min, self.max)
    }
}

/// Reveal record (published after the draw).
///
/// Field order and names match the reveal file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealRecord {
    /// Hash published at commit time.
    pub commitment_hash: CommitmentHash,

    /// Revealed commitment timestamp.
    pub timestamp: String,

    /// Revealed commitment nonce.
    pub nonce: String,

    /// Seed derived from timestamp and nonce.
    pub seed_value: u32,

    /// Lower bound of the draw (inclusive).
    #[serde(rename = "min_num")]
    pub min: i64,

    /// Upper bound of the draw (inclusive).
    #[serde(rename = "max_num")]
    pub max: i64,

    /// Drawn value.
    pub result: i64,
}

impl RevealRecord {
    /// The commitment this record reveals.
    pub fn commitment(&self) -> Commitment {
        Commitment::new(self.timestamp.clone(), self.nonce.clone())
    }

    /// The range this record was drawn from.
    pub fn range(&self) -> Result<DrawRange> {
        DrawRange::new(self.min, self.max)
    }

    /// Check the record against itself: hash, seed and result.
    ///
    /// Fails with the first field that disagrees.
    pub fn verify(&self) -> Result<()> {
        let commitment = self.commitment();

        let computed = commitment.hash()?;
        if computed != self.commitment_hash {
            return Err(DrawError::HashMismatch {
                expected: self.commitment_hash,
                computed,
            });
        }

        let seed = commitment.seed();
        if seed != self.seed_value {
            return Err(DrawError::SeedMismatch {
                recorded: self.seed_value,
                computed: seed,
            });
        }

        let range = self.range()?;
        let mut rng = DeterministicRng::from_commitment(&self.timestamp, &self.nonce);
        let result = range.sample(&mut rng);
        if result != self.result {
            return Err(DrawError::ResultMismatch {
                recorded: self.result,
                computed: result,
            });
        }

        Ok(())
    }
}

/// Draw from an already-validated range.
pub fn draw_in(commitment: &Commitment, range: DrawRange) -> Result<RevealRecord> {
    let commitment_hash = commitment.hash()?;
    let seed_value = commitment.seed();

    let mut rng = DeterministicRng::from_commitment(&commitment.timestamp, &commitment.nonce);
    let result = range.sample(&mut rng);

    debug!(
        "Draw seed {} over [{}, {}] for commitment {}",
        seed_value,
        range.min(),
        range.max(),
        commitment_hash.short()
    );
    info!("Drew {} from [{}, {}]", result, range.min(), range.max());

    Ok(RevealRecord {
        commitment_hash,
        timestamp: commitment.timestamp.clone(),
        nonce: commitment.nonce.clone(),
        seed_value,
        min: range.min(),
        max: range.max(),
        result,
    })
}

/// Draw one integer in `[min, max]` from a commitment.
///
/// Deterministic: the same commitment and range always give the same record.
/// Does not compare against any published hash; see [`draw_against`].
pub fn draw(commitment: &Commitment, min: i64, max: i64) -> Result<RevealRecord> {
    draw_in(commitment, DrawRange::new(min, max)?)
}

/// Like [`draw`], but refuse if the commitment does not match `published`.
pub fn draw_against(
    published: &CommitmentHash,
    commitment: &Commitment,
    min: i64,
    max: i64,
) -> Result<RevealRecord> {
    let range = DrawRange::new(min, max)?;

    let computed = commitment.hash()?;
    if computed != *published {
        return Err(DrawError::HashMismatch {
            expected: *published,
            computed,
        });
    }

    draw_in(commitment, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TS: &str = "2025-01-15T10:30:00.000000+09:00";

    fn zero_commitment() -> Commitment {
        Commitment::new(TS, "00".repeat(32))
    }

    #[test]
    fn test_draw_known_values() {
        let commitment = zero_commitment();

        let record = draw(&commitment, 1, 10).unwrap();
        assert_eq!(record.seed_value, 1326399839);
        assert_eq!(record.result, 3);
        assert_eq!(
            record.commitment_hash.to_string(),
            "14392c1de5b48fc7bd01fa145a9cdb9a03ef4953f1e65c5502ad4b47d1bb532d"
        );

        assert_eq!(draw(&commitment, 1, 100).unwrap().result, 24);
        assert_eq!(draw(&commitment, -50, 50).unwrap().result, -27);
        assert_eq!(draw(&commitment, 0, 1 << 40).unwrap().result, 572678577584);
        assert_eq!(
            draw(&commitment, i64::MIN, i64::MAX).unwrap().result,
            -3004571993961750166
        );
    }

    #[test]
    fn test_other_nonce_known_value() {
        let commitment = Commitment::new(TS, "ff".repeat(32));
        let record = draw(&commitment, 1, 10).unwrap();
        assert_eq!(record.seed_value, 3922809886);
        assert_eq!(record.result, 1);
    }

    #[test]
    fn test_single_value_range() {
        assert_eq!(draw(&zero_commitment(), 5, 5).unwrap().result, 5);
    }

    #[test]
    fn test_invalid_range() {
        let err = draw(&zero_commitment(), 10, 1).unwrap_err();
        assert!(matches!(err, DrawError::InvalidRange { min: 10, max: 1 }));
    }

    #[test]
    fn test_range_does_not_touch_hash_or_seed() {
        let commitment = zero_commitment();
        let a = draw(&commitment, 1, 10).unwrap();
        let b = draw(&commitment, 1, 1000).unwrap();

        assert_eq!(a.commitment_hash, b.commitment_hash);
        assert_eq!(a.seed_value, b.seed_value);
    }

    #[test]
    fn test_draw_against() {
        let commitment = zero_commitment();
        let published = commitment.hash().unwrap();

        let record = draw_against(&published, &commitment, 1, 10).unwrap();
        assert_eq!(record, draw(&commitment, 1, 10).unwrap());

        let tampered = Commitment::new(TS, "ff".repeat(32));
        assert!(matches!(
            draw_against(&published, &tampered, 1, 10),
            Err(DrawError::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_reveal_file_shape() {
        let record = draw(&zero_commitment(), 1, 10).unwrap();
        let json = serde_json::to_string(&record).unwrap();

        let keys: Vec<&str> = [
            "commitment_hash",
            "timestamp",
            "nonce",
            "seed_value",
            "min_num",
            "max_num",
            "result",
        ]
        .to_vec();
        let mut last = 0;
        for key in keys {
            let pos = json.find(&format!("\"{}\"", key)).unwrap();
            assert!(pos >= last, "{} out of order", key);
            last = pos;
        }

        let back: RevealRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_self_verification() {
        let record = draw(&zero_commitment(), 1, 10).unwrap();
        assert!(record.verify().is_ok());

        let mut bad_result = record.clone();
        bad_result.result = 4;
        assert!(matches!(
            bad_result.verify(),
            Err(DrawError::ResultMismatch { recorded: 4, computed: 3 })
        ));

        let mut bad_seed = record.clone();
        bad_seed.seed_value += 1;
        assert!(matches!(bad_seed.verify(), Err(DrawError::SeedMismatch { .. })));

        let mut bad_nonce = record.clone();
        bad_nonce.nonce = "ff".repeat(32);
        assert!(matches!(bad_nonce.verify(), Err(DrawError::HashMismatch { .. })));

        let mut bad_range = record;
        bad_range.min = 11;
        assert!(matches!(bad_range.verify(), Err(DrawError::InvalidRange { .. })));
    }

    #[test]
    fn test_range_deserialize_validates() {
        let ok: DrawRange = serde_json::from_str(r#"{"min": 1, "max": 10}"#).unwrap();
        assert_eq!(ok.len(), 10);
        assert!(ok.contains(1) && ok.contains(10) && !ok.contains(11));

        assert!(serde_json::from_str::<DrawRange>(r#"{"min": 10, "max": 1}"#).is_err());

        let full = DrawRange::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(full.len(), 1u128 << 64);
    }

    proptest! {
        #[test]
        fn prop_draw_in_range_and_idempotent(
            nonce in "[0-9a-f]{64}",
            a in -1_000_000i64..1_000_000,
            b in -1_000_000i64..1_000_000,
        ) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let commitment = Commitment::new(TS, nonce);

            let first = draw(&commitment, min, max).unwrap();
            let second = draw(&commitment, min, max).unwrap();

            prop_assert!(first.result >= min && first.result <= max);
            prop_assert_eq!(first, second);
        }
    }
}
