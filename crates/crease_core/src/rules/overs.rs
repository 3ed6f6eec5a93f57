//! Over arithmetic and the `overs.balls` notation

pub const BALLS_PER_OVER: u32 = 6;

/// `13` legal balls -> `"2.1"`.
pub fn format_overs(legal_balls: u32) -> String {
    format!("{}.{}", legal_balls / BALLS_PER_OVER, legal_balls % BALLS_PER_OVER)
}

/// Inverse of [`format_overs`]. Accepts `"N"` or `"N.B"` with `B` in `0..=5`.
pub fn parse_overs(overs: &str) -> Option<u32> {
    let overs = overs.trim();
    let (whole, balls) = match overs.split_once('.') {
        Some((whole, balls)) => (whole, balls),
        None => (overs, "0"),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if balls.len() != 1 || !balls.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: u32 = whole.parse().ok()?;
    let balls: u32 = balls.parse().ok()?;
    if balls >= BALLS_PER_OVER {
        return None;
    }
    whole.checked_mul(BALLS_PER_OVER)?.checked_add(balls)
}

pub fn is_over_complete(legal_balls_in_over: u32) -> bool {
    legal_balls_in_over >= BALLS_PER_OVER
}

/// Legal balls left in an innings of `overs_limit` overs; never negative.
pub fn remaining_balls(legal_balls: u32, overs_limit: u32) -> u32 {
    overs_limit.saturating_mul(BALLS_PER_OVER).saturating_sub(legal_balls)
}

/// Whether a bowler is still under their overs quota. No quota means no limit.
pub fn can_bowler_bowl_more(balls_bowled: u32, max_overs: Option<u32>) -> bool {
    match max_overs {
        Some(max) => balls_bowled < max.saturating_mul(BALLS_PER_OVER),
        None => true,
    }
}
