//! # crease_core - Deterministic Cricket Innings Recalculation
//!
//! Derives the complete statistical state of an innings from its ball-by-ball
//! log: score, wickets, overs, partnerships, extras, batting and bowling
//! figures, fall of wickets, strike position and run-rate projections.
//!
//! ## Features
//! - Pure recompute-from-log: same balls + config = bit-identical snapshot
//! - ICC-style attribution for wides, no-balls, byes, leg-byes and run-outs
//! - Lenient decoding of legacy ball records
//! - Versioned JSON API with snapshot digests
//! - Parallel batch recalculation for independent innings

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod rules;

pub use api::{
    recalculate_batch_json, recalculate_innings_json, snapshot_digest, RecalculateRequest,
    RecalculateResponse, SCHEMA_VERSION,
};
pub use engine::{recalculate_batch, recalculate_innings, InningsJob, MatchConfig};
pub use error::{CreaseError, Result};
pub use models::{
    BallEvent, BattingFigures, BowlingFigures, DismissalKind, Extras, FallOfWicket,
    InningsSnapshot, InningsStatus, WicketRecord,
};
