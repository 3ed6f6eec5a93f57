//! Rate math. Undefined ratios are `None`, never NaN or infinity.

use super::overs::BALLS_PER_OVER;

/// Runs per over. 0 before the first legal ball.
pub fn run_rate(runs: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    runs as f64 / legal_balls as f64 * BALLS_PER_OVER as f64
}

/// Runs per over needed from the balls that remain.
pub fn required_run_rate(runs_needed: i64, balls_remaining: i64) -> Option<f64> {
    if balls_remaining <= 0 {
        return None;
    }
    Some(runs_needed as f64 / balls_remaining as f64 * BALLS_PER_OVER as f64)
}

/// Current rate extrapolated over the full innings. Not adjusted for wickets.
pub fn projected_total(runs: u32, legal_balls: u32, total_overs: u32) -> u32 {
    let projected = (run_rate(runs, legal_balls) * total_overs as f64).round();
    if projected >= u32::MAX as f64 {
        u32::MAX
    } else {
        projected as u32
    }
}

/// Runs per 100 balls faced.
pub fn strike_rate(runs: u32, balls: u32) -> Option<f64> {
    (balls > 0).then(|| runs as f64 / balls as f64 * 100.0)
}

/// Runs conceded per over.
pub fn economy(runs_conceded: u32, balls_bowled: u32) -> Option<f64> {
    (balls_bowled > 0).then(|| runs_conceded as f64 / balls_bowled as f64 * BALLS_PER_OVER as f64)
}

/// Runs conceded per wicket.
pub fn bowling_average(runs_conceded: u32, wickets: u32) -> Option<f64> {
    (wickets > 0).then(|| runs_conceded as f64 / wickets as f64)
}

/// Balls bowled per wicket.
pub fn bowling_strike_rate(balls_bowled: u32, wickets: u32) -> Option<f64> {
    (wickets > 0).then(|| balls_bowled as f64 / wickets as f64)
}
