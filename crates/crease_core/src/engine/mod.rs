//! Innings recalculation engine
//!
//! A pure fold: the full ball log plus a [`MatchConfig`] in, one
//! [`InningsSnapshot`](crate::models::InningsSnapshot) out. No state survives
//! between calls, so the same input always yields the same snapshot and
//! different innings can be recalculated in parallel.

pub mod batch;
pub mod chase;
pub mod config;
pub mod ledger;
pub mod over_log;
pub mod partnership;
pub mod recalculate;


pub use batch::{recalculate_batch, InningsJob, PARALLEL_THRESHOLD};
pub use chase::{chase_figures, innings_status, ChaseFigures, MAX_WICKETS};
pub use config::{MatchConfig, DEFAULT_OVERS_LIMIT};
pub use ledger::PlayerLedger;
pub use over_log::{delivery_record, CompletedOver, OverLog};
pub use partnership::PartnershipTracker;
pub use recalculate::recalculate_innings;
