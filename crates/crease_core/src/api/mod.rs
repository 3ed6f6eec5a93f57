pub mod json_api;

pub use json_api::{
    recalculate_batch_json, recalculate_innings_json, snapshot_digest,
    try_recalculate_innings_json, BatchRequest, BatchResponse, RecalculateRequest,
    RecalculateResponse, SCHEMA_VERSION,
};
