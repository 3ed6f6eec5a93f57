//! Chase and projection math, evaluated once after the fold.

use crate::models::InningsStatus;
use crate::rules::{projected_total, remaining_balls, required_run_rate};

pub const MAX_WICKETS: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ChaseFigures {
    pub target: Option<u32>,
    /// Zero or negative once the target has been reached.
    pub runs_needed: Option<i64>,
    pub remaining_balls: u32,
    pub required_run_rate: Option<f64>,
    pub projected_total: Option<u32>,
}

pub fn chase_figures(
    runs: u32,
    legal_balls: u32,
    overs_limit: u32,
    target: Option<u32>,
) -> ChaseFigures {
    let remaining = remaining_balls(legal_balls, overs_limit);
    let runs_needed = target.map(|t| i64::from(t) - i64::from(runs));
    let required = match runs_needed {
        Some(needed) if needed > 0 && remaining > 0 => {
            required_run_rate(needed, i64::from(remaining))
        }
        _ => None,
    };
    let projected = (legal_balls > 0).then(|| projected_total(runs, legal_balls, overs_limit));

    ChaseFigures {
        target,
        runs_needed,
        remaining_balls: remaining,
        required_run_rate: required,
        projected_total: projected,
    }
}

/// Reaching the target outranks losing the last wicket on the same ball, which
/// outranks running out of overs.
pub fn innings_status(
    runs: u32,
    wickets: u32,
    legal_balls: u32,
    overs_limit: u32,
    target: Option<u32>,
) -> InningsStatus {
    if target.is_some_and(|t| runs >= t) {
        InningsStatus::TargetReached
    } else if wickets >= MAX_WICKETS {
        InningsStatus::AllOut
    } else if remaining_balls(legal_balls, overs_limit) == 0 {
        InningsStatus::OversComplete
    } else {
        InningsStatus::InProgress
    }
}
