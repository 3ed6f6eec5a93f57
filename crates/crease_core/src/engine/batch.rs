//! Recalculation of many independent innings at once (e.g. a whole tournament
//! after a rules fix). Innings share nothing, so large batches fan out on rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{BallEvent, InningsSnapshot};

use super::config::MatchConfig;
use super::recalculate::recalculate_innings;

/// Below this many innings the thread-pool overhead outweighs the work.
pub const PARALLEL_THRESHOLD: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsJob {
    #[serde(default)]
    pub config: MatchConfig,
    pub balls: Vec<BallEvent>,
}

impl InningsJob {
    pub fn new(config: MatchConfig, balls: Vec<BallEvent>) -> Self {
        Self { config, balls }
    }
}

/// One snapshot per job, in job order.
pub fn recalculate_batch(jobs: &[InningsJob]) -> Vec<InningsSnapshot> {
    if jobs.len() > PARALLEL_THRESHOLD {
        jobs.par_iter()
            .map(|job| recalculate_innings(&job.balls, &job.config))
            .collect()
    } else {
        jobs.iter()
            .map(|job| recalculate_innings(&job.balls, &job.config))
            .collect()
    }
}
