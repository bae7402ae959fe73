//! Commitment and Reveal Files
//!
//! Pretty-printed JSON with two-space indentation. The protocol itself never
//! touches the filesystem; front ends call these helpers.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::entropy::is_well_formed_nonce;
use crate::error::{DrawError, Result};
use crate::proof::{Commitment, RevealRecord};

/// Write `value` as pretty JSON, replacing any existing file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut body = serde_json::to_string_pretty(value).map_err(|source| DrawError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    body.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DrawError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, body).map_err(|source| DrawError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Read JSON from `path`. `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DrawError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|source| DrawError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Save a commitment (the secret half; keep this file private).
pub fn save_commitment(path: &Path, commitment: &Commitment) -> Result<()> {
    write_json(path, commitment)?;
    info!("Commitment saved to {}", path.display());
    Ok(())
}

/// Load a commitment. A missing file is `MissingCommitment`.
///
/// A nonce we would not have generated is still loaded (it is hashed as
/// written) but logged, since it usually means the file was edited by hand.
pub fn load_commitment(path: &Path) -> Result<Commitment> {
    let commitment: Commitment = read_json(path)?.ok_or_else(|| DrawError::MissingCommitment {
        path: path.to_path_buf(),
    })?;

    if !is_well_formed_nonce(&commitment.nonce) {
        warn!(
            "Nonce in {} is not 64 lowercase hex characters",
            path.display()
        );
    }
    Ok(commitment)
}

/// Save a reveal record.
pub fn save_reveal(path: &Path, record: &RevealRecord) -> Result<()> {
    write_json(path, record)?;
    info!("Reveal record saved to {}", path.display());
    Ok(())
}

/// Load a reveal record, if one exists.
pub fn load_reveal(path: &Path) -> Result<Option<RevealRecord>> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::draw;

    fn sample_commitment() -> Commitment {
        Commitment::new("2025-01-15T10:30:00.000000+09:00", "00".repeat(32))
    }

    #[test]
    fn test_commitment_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commitment.json");

        save_commitment(&path, &sample_commitment()).unwrap();
        assert_eq!(load_commitment(&path).unwrap(), sample_commitment());
    }

    #[test]
    fn test_commitment_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commitment.json");

        save_commitment(&path, &sample_commitment()).unwrap();
        let body = fs::read_to_string(&path).unwrap();

        let expected = format!(
            "{{\n  \"timestamp\": \"2025-01-15T10:30:00.000000+09:00\",\n  \"nonce\": \"{}\"\n}}\n",
            "00".repeat(32)
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_hand_edited_nonce_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commitment.json");
        fs::write(
            &path,
            r#"{"timestamp": "2025-01-15T10:30:00+09:00", "nonce": "ABC"}"#,
        )
        .unwrap();

        let commitment = load_commitment(&path).unwrap();
        assert_eq!(commitment.nonce, "ABC");
        assert!(!is_well_formed_nonce(&commitment.nonce));
    }

    #[test]
    fn test_missing_commitment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            load_commitment(&path),
            Err(DrawError::MissingCommitment { .. })
        ));
    }

    #[test]
    fn test_malformed_commitment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commitment.json");
        fs::write(&path, "{\"timestamp\": 5}").unwrap();

        assert!(matches!(load_commitment(&path), Err(DrawError::Json { .. })));
    }

    #[test]
    fn test_reveal_roundtrip_and_absence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("reveal.json");

        assert_eq!(load_reveal(&path).unwrap(), None);

        let record = draw(&sample_commitment(), 1, 10).unwrap();
        save_reveal(&path, &record).unwrap();

        assert_eq!(load_reveal(&path).unwrap(), Some(record));
    }

    #[test]
    fn test_reveal_file_reads_reference_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reveal.json");
        let body = format!(
            r#"{{
  "commitment_hash": "14392c1de5b48fc7bd01fa145a9cdb9a03ef4953f1e65c5502ad4b47d1bb532d",
  "timestamp": "2025-01-15T10:30:00.000000+09:00",
  "nonce": "{}",
  "seed_value": 1326399839,
  "min_num": 1,
  "max_num": 10,
  "result": 3
}}"#,
            "00".repeat(32)
        );
        fs::write(&path, body).unwrap();

        let record = load_reveal(&path).unwrap().unwrap();
        assert_eq!(record.result, 3);
        assert!(record.verify().is_ok());
    }
}
