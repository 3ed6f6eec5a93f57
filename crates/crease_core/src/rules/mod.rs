//! Stateless cricket scoring rules
//!
//! Everything in here is a pure function of its arguments. The engine folds
//! deliveries through these primitives; nothing in `rules` knows about an
//! innings as a whole.

pub mod delivery;
pub mod dismissal;
pub mod overs;
pub mod rates;
pub mod scorecard;

pub use delivery::{
    automatic_extra_allowance, batter_runs, batter_runs_credited, bowler_runs,
    bowler_runs_charged, counts_toward_balls_faced, is_boundary, is_legal_delivery,
    is_wicket_allowed_on_free_hit, next_ball_is_free_hit, running_runs, should_rotate_strike,
    wicket_credited_to_bowler,
};
pub use dismissal::format_dismissal;
pub use overs::{
    can_bowler_bowl_more, format_overs, is_over_complete, parse_overs, remaining_balls,
    BALLS_PER_OVER,
};
pub use rates::{
    bowling_average, bowling_strike_rate, economy, projected_total, required_run_rate, run_rate,
    strike_rate,
};
pub use scorecard::{format_extras, format_fall_of_wicket, format_rate, format_score};
