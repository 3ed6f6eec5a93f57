//! Versioned JSON boundary
//!
//! String in, string out. Failures are reported inside the response document and
//! these functions never panic.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::engine::{recalculate_batch, recalculate_innings, InningsJob, MatchConfig};
use crate::error::{CreaseError, Result};
use crate::models::{BallEvent, InningsSnapshot};

pub const SCHEMA_VERSION: u8 = 1;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub config: MatchConfig,
    pub balls: Vec<BallEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateResponse {
    pub schema_version: u8,
    pub success: bool,
    pub snapshot: Option<InningsSnapshot>,
    /// SHA-256 of the canonical snapshot JSON.
    pub digest: Option<String>,
    pub error_message: Option<String>,
}

impl RecalculateResponse {
    fn ok(snapshot: InningsSnapshot, digest: String) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: true,
            snapshot: Some(snapshot),
            digest: Some(digest),
            error_message: None,
        }
    }

    fn failed(err: &CreaseError) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: false,
            snapshot: None,
            digest: None,
            error_message: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub jobs: Vec<InningsJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub schema_version: u8,
    pub success: bool,
    pub snapshots: Vec<InningsSnapshot>,
    pub error_message: Option<String>,
}

/// Hex SHA-256 of the snapshot's JSON encoding. Equal snapshots give equal digests.
pub fn snapshot_digest(snapshot: &InningsSnapshot) -> Result<String> {
    let bytes = serde_json::to_vec(snapshot)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

fn check_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(CreaseError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Parse, validate, recalculate and digest.
pub fn try_recalculate_innings_json(request_json: &str) -> Result<RecalculateResponse> {
    let request: RecalculateRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    request.config.validate()?;

    let snapshot = recalculate_innings(&request.balls, &request.config);
    let digest = snapshot_digest(&snapshot)?;
    Ok(RecalculateResponse::ok(snapshot, digest))
}

/// Recalculate an innings from a JSON [`RecalculateRequest`].
///
/// # Returns
/// JSON string containing a [`RecalculateResponse`]
pub fn recalculate_innings_json(request_json: &str) -> String {
    let response = match try_recalculate_innings_json(request_json) {
        Ok(response) => {
            if let Some(snapshot) = &response.snapshot {
                info!(
                    "Recalculated innings: {}/{} ({} ov)",
                    snapshot.total_runs, snapshot.total_wickets, snapshot.overs
                );
            }
            response
        }
        Err(err @ CreaseError::Json(_)) => {
            error!("Failed to parse RecalculateRequest: {}", err);
            RecalculateResponse::failed(&err)
        }
        Err(err) => {
            warn!("Recalculate request rejected: {}", err);
            RecalculateResponse::failed(&err)
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// Recalculate many innings from a JSON [`BatchRequest`].
pub fn recalculate_batch_json(request_json: &str) -> String {
    let result = serde_json::from_str::<BatchRequest>(request_json)
        .map_err(CreaseError::from)
        .and_then(|request| {
            check_schema(request.schema_version)?;
            for job in &request.jobs {
                job.config.validate()?;
            }
            Ok(request)
        });

    let response = match result {
        Ok(request) => {
            let snapshots = recalculate_batch(&request.jobs);
            info!("Recalculated {} innings", snapshots.len());
            BatchResponse {
                schema_version: SCHEMA_VERSION,
                success: true,
                snapshots,
                error_message: None,
            }
        }
        Err(err) => {
            warn!("Batch request rejected: {}", err);
            BatchResponse {
                schema_version: SCHEMA_VERSION,
                success: false,
                snapshots: Vec::new(),
                error_message: Some(err.to_string()),
            }
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}
