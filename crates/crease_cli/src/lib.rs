//! File plumbing for the `crease` command-line tool
//!
//! Ball logs and match configs are read from JSON files, snapshots are written
//! back as JSON with a SHA-256 checksum so downstream consumers can verify they
//! are looking at the bytes the engine produced.

use anyhow::{Context, Result};
use crease_core::{BallEvent, InningsSnapshot, MatchConfig, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback location of the match config when `--config` is not given.
pub const MATCH_CONFIG_PATH_ENV: &str = "CREASE_MATCH_CONFIG";

/// Written next to a snapshot with `--metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub schema_version: u8,
    /// SHA-256 of the snapshot file bytes (hex)
    pub checksum: String,
    /// RFC 3339
    pub created_at: String,
    pub ball_count: usize,
    pub overs: String,
    pub total_runs: u32,
    pub total_wickets: u32,
}

/// A ball log is either a bare array or `{ "balls": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum BallLogFile {
    Plain(Vec<BallEvent>),
    Wrapped { balls: Vec<BallEvent> },
}

pub fn load_ball_log(path: &Path) -> Result<Vec<BallEvent>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ball log: {}", path.display()))?;
    let log: BallLogFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse ball log: {}", path.display()))?;

    Ok(match log {
        BallLogFile::Plain(balls) => balls,
        BallLogFile::Wrapped { balls } => balls,
    })
}

pub fn load_match_config(path: &Path) -> Result<MatchConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read match config: {}", path.display()))?;
    MatchConfig::from_json(&json)
        .with_context(|| format!("Invalid match config: {}", path.display()))
}

/// `--config` wins; otherwise a non-empty `CREASE_MATCH_CONFIG`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    let value = env::var(MATCH_CONFIG_PATH_ENV).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

pub fn snapshot_json(snapshot: &InningsSnapshot, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    };
    json.context("Failed to serialize snapshot")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write the snapshot and describe what was written.
pub fn write_snapshot(
    snapshot: &InningsSnapshot,
    ball_count: usize,
    out: &Path,
    pretty: bool,
) -> Result<SnapshotMetadata> {
    let json = snapshot_json(snapshot, pretty)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(out, json.as_bytes())
        .with_context(|| format!("Failed to write snapshot: {}", out.display()))?;

    Ok(SnapshotMetadata {
        schema_version: SCHEMA_VERSION,
        checksum: sha256_hex(json.as_bytes()),
        created_at: chrono::Utc::now().to_rfc3339(),
        ball_count,
        overs: snapshot.overs.clone(),
        total_runs: snapshot.total_runs,
        total_wickets: snapshot.total_wickets,
    })
}

pub fn save_metadata(path: &Path, meta: &SnapshotMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write metadata: {}", path.display()))?;
    Ok(())
}

/// Whether the file's SHA-256 matches `expected_checksum` (case-insensitive hex).
pub fn verify_snapshot(path: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crease_core::recalculate_innings;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_temp(contents: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn loads_plain_and_wrapped_logs() -> Result<()> {
        let plain = write_temp(r#"[ { "sequence": 1, "striker_id": "s", "runs_off_bat": 4 } ]"#)?;
        let wrapped = write_temp(
            r#"{ "balls": [ { "sequence": 1, "batsmanId": "s", "runsOffBat": 4 } ] }"#,
        )?;

        let a = load_ball_log(plain.path())?;
        let b = load_ball_log(wrapped.path())?;
        assert_eq!(a, b);
        assert_eq!(a[0].total_runs, 4);
        Ok(())
    }

    #[test]
    fn malformed_log_reports_the_path() -> Result<()> {
        let file = write_temp("{ nope")?;
        let err = load_ball_log(file.path()).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse ball log"));
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected() -> Result<()> {
        let file = write_temp(r#"{ "overs_limit": 0 }"#)?;
        assert!(load_match_config(file.path()).is_err());

        let file = write_temp(r#"{ "overs_limit": 10, "target": 80 }"#)?;
        let config = load_match_config(file.path())?;
        assert_eq!(config.target, Some(80));
        Ok(())
    }

    #[test]
    fn explicit_config_path_wins() {
        let explicit = PathBuf::from("match.json");
        assert_eq!(resolve_config_path(Some(explicit.clone())), Some(explicit));
    }

    #[test]
    fn written_snapshot_verifies() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("nested").join("snapshot.json");

        let balls = vec![BallEvent::new(1, "s", "n", "b").with_bat_runs(6)];
        let snapshot = recalculate_innings(&balls, &MatchConfig::new(20));
        let meta = write_snapshot(&snapshot, balls.len(), &out, true)?;

        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.ball_count, 1);
        assert_eq!(meta.overs, "0.1");
        assert_eq!(meta.total_runs, 6);
        assert!(verify_snapshot(&out, &meta.checksum)?);
        assert!(verify_snapshot(&out, &meta.checksum.to_uppercase())?);
        assert!(!verify_snapshot(&out, "deadbeef")?);

        let reloaded: InningsSnapshot = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(reloaded, snapshot);
        Ok(())
    }

    #[test]
    fn metadata_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("meta.json");
        let meta = SnapshotMetadata {
            schema_version: 1,
            checksum: "abc".into(),
            created_at: "2026-01-01T00:00:00+00:00".into(),
            ball_count: 3,
            overs: "0.3".into(),
            total_runs: 2,
            total_wickets: 0,
        };
        save_metadata(&path, &meta)?;
        let back: SnapshotMetadata = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(back.checksum, "abc");
        assert_eq!(back.ball_count, 3);
        Ok(())
    }
}
