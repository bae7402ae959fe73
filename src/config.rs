//! Draw Configuration
//!
//! File locations and the default range used when a front end does not
//! supply one.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::store;

/// Default lower bound.
pub const DEFAULT_MIN: i64 = 1;

/// Default upper bound.
pub const DEFAULT_MAX: i64 = 10;

/// Draw configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawConfig {
    /// Where the secret commitment is kept between commit and reveal.
    pub commitment_path: PathBuf,
    /// Where the reveal record is written.
    pub reveal_path: PathBuf,
    /// Range lower bound when none is given.
    pub default_min: i64,
    /// Range upper bound when none is given.
    pub default_max: i64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            commitment_path: PathBuf::from("commitment.json"),
            reveal_path: PathBuf::from("reveal.json"),
            default_min: DEFAULT_MIN,
            default_max: DEFAULT_MAX,
        }
    }
}

impl DrawConfig {
    /// Create config from environment variables.
    ///
    /// - `FAIR_DRAW_COMMITMENT_PATH`
    /// - `FAIR_DRAW_REVEAL_PATH`
    /// - `FAIR_DRAW_DEFAULT_MIN`
    /// - `FAIR_DRAW_DEFAULT_MAX`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            commitment_path: lookup("FAIR_DRAW_COMMITMENT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.commitment_path),
            reveal_path: lookup("FAIR_DRAW_REVEAL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.reveal_path),
            default_min: parse_int(&lookup, "FAIR_DRAW_DEFAULT_MIN", defaults.default_min),
            default_max: parse_int(&lookup, "FAIR_DRAW_DEFAULT_MAX", defaults.default_max),
        }
    }

    /// Default range as `(min, max)`.
    pub fn default_range(&self) -> (i64, i64) {
        (self.default_min, self.default_max)
    }

    /// Range for re-checking a published draw.
    ///
    /// An explicit range wins. Otherwise the range recorded in the reveal
    /// file is used, and the configured default when there is no reveal
    /// file. A reveal file that exists but cannot be read is an error.
    pub fn resolve_range(&self, explicit: Option<(i64, i64)>) -> Result<(i64, i64)> {
        if let Some(range) = explicit {
            return Ok(range);
        }
        match store::load_reveal(&self.reveal_path)? {
            Some(record) => {
                info!("Using range from {}", self.reveal_path.display());
                Ok((record.min, record.max))
            }
            None => Ok(self.default_range()),
        }
    }
}

fn parse_int<F>(lookup: &F, key: &str, fallback: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => fallback,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not an integer, using {}", key, raw, fallback);
            fallback
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrawError;
    use crate::proof::{draw, Commitment};
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DrawConfig::from_lookup(|_| None);
        assert_eq!(config, DrawConfig::default());
        assert_eq!(config.default_range(), (1, 10));
        assert_eq!(config.commitment_path, PathBuf::from("commitment.json"));
    }

    #[test]
    fn test_overrides() {
        let config = DrawConfig::from_lookup(lookup_from(&[
            ("FAIR_DRAW_COMMITMENT_PATH", "/tmp/c.json"),
            ("FAIR_DRAW_REVEAL_PATH", "/tmp/r.json"),
            ("FAIR_DRAW_DEFAULT_MIN", " -5 "),
            ("FAIR_DRAW_DEFAULT_MAX", "500"),
        ]));

        assert_eq!(config.commitment_path, PathBuf::from("/tmp/c.json"));
        assert_eq!(config.reveal_path, PathBuf::from("/tmp/r.json"));
        assert_eq!(config.default_range(), (-5, 500));
    }

    fn config_in(dir: &std::path::Path) -> DrawConfig {
        DrawConfig {
            reveal_path: dir.join("reveal.json"),
            ..DrawConfig::default()
        }
    }

    fn write_reveal(config: &DrawConfig, min: i64, max: i64) {
        let commitment = Commitment::new("2025-01-15T10:30:00.000000+09:00", "00".repeat(32));
        let record = draw(&commitment, min, max).unwrap();
        store::save_reveal(&config.reveal_path, &record).unwrap();
    }

    #[test]
    fn test_resolve_range_explicit_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_reveal(&config, 1, 100);

        assert_eq!(config.resolve_range(Some((-5, 5))).unwrap(), (-5, 5));
    }

    #[test]
    fn test_resolve_range_from_reveal_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        write_reveal(&config, 20, 30);

        assert_eq!(config.resolve_range(None).unwrap(), (20, 30));
    }

    #[test]
    fn test_resolve_range_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DrawConfig {
            default_min: 3,
            default_max: 7,
            ..config_in(dir.path())
        };

        assert_eq!(config.resolve_range(None).unwrap(), (3, 7));
    }

    #[test]
    fn test_resolve_range_malformed_reveal_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.reveal_path, "{\"min_num\": ").unwrap();

        assert!(matches!(
            config.resolve_range(None),
            Err(DrawError::Json { .. })
        ));
        // An explicit range does not read the file at all
        assert_eq!(config.resolve_range(Some((1, 2))).unwrap(), (1, 2));
    }

    #[test]
    fn test_bad_integer_falls_back() {
        let config = DrawConfig::from_lookup(lookup_from(&[("FAIR_DRAW_DEFAULT_MAX", "ten")]));
        assert_eq!(config.default_max, DEFAULT_MAX);
    }
}
