//! Per-delivery rule primitives
//!
//! Pure functions answering "what does this one ball mean". The orchestrator
//! calls these for every delivery and never re-derives the rules itself.
//!
//! Run-out attribution follows three fixed policies:
//! - wide + run out: running runs stay out of the batter's tally
//! - no-ball + run out: the bowler is charged at most the no-ball allowance
//!   plus the bat runs
//! - leg-bye + run out: leg-byes are never the batter's

use crate::models::{BallEvent, DismissalKind};

/// A legal delivery counts toward the over. Wides and no-balls never do,
/// whatever the upstream flag says.
pub fn is_legal_delivery(ball: &BallEvent) -> bool {
    ball.is_legal && !ball.is_wide() && !ball.is_no_ball()
}

/// Every delivery except a wide counts as a ball faced by the striker.
pub fn counts_toward_balls_faced(ball: &BallEvent) -> bool {
    !ball.is_wide()
}

pub fn batter_runs(ball: &BallEvent) -> u32 {
    ball.runs_off_bat
}

/// Team runs conceded by the bowler: everything except byes, leg-byes and penalty.
pub fn bowler_runs(ball: &BallEvent) -> u32 {
    let not_bowler = ball
        .extras
        .byes
        .saturating_add(ball.extras.leg_byes)
        .saturating_add(ball.extras.penalty);
    ball.total_runs.saturating_sub(not_bowler)
}

pub fn wicket_credited_to_bowler(ball: &BallEvent) -> bool {
    ball.wicket.as_ref().is_some_and(|w| w.credited_to_bowler)
}

/// The single run a wide or no-ball is worth before anybody runs.
pub fn automatic_extra_allowance(ball: &BallEvent) -> u32 {
    if ball.is_wide() || ball.is_no_ball() {
        1
    } else {
        0
    }
}

/// Runs the batters physically completed on this delivery.
pub fn running_runs(ball: &BallEvent) -> u32 {
    let recorded = ball
        .runs_off_bat
        .saturating_add(ball.extras.byes)
        .saturating_add(ball.extras.leg_byes);
    let accounted = recorded
        .saturating_add(automatic_extra_allowance(ball))
        .saturating_add(ball.extras.penalty);
    recorded.saturating_add(ball.total_runs.saturating_sub(accounted))
}

/// Odd running runs swap the batters. A wicket ball never rotates here; the
/// incoming batter takes the vacated end.
pub fn should_rotate_strike(ball: &BallEvent) -> bool {
    if ball.is_wicket() {
        return false;
    }
    running_runs(ball) % 2 == 1
}

/// Runs added to the striker's personal tally.
pub fn batter_runs_credited(ball: &BallEvent) -> u32 {
    let run_out = ball.wicket.as_ref().is_some_and(|w| w.kind.is_run_out());
    if run_out && (ball.is_wide() || ball.extras.leg_byes > 0) {
        return 0;
    }
    batter_runs(ball)
}

/// Runs added to the bowler's conceded figure.
pub fn bowler_runs_charged(ball: &BallEvent) -> u32 {
    let normal = bowler_runs(ball);
    let run_out = ball.wicket.as_ref().is_some_and(|w| w.kind.is_run_out());
    if run_out && ball.is_no_ball() {
        let cap = automatic_extra_allowance(ball).saturating_add(ball.runs_off_bat);
        return normal.min(cap);
    }
    normal
}

/// A four or six off the bat.
pub fn is_boundary(ball: &BallEvent) -> bool {
    !ball.is_wide() && (ball.runs_off_bat == 4 || ball.runs_off_bat == 6)
}

/// A no-ball earns a free hit, and an outstanding free hit survives any
/// illegal delivery bowled in its place.
pub fn next_ball_is_free_hit(ball: &BallEvent, this_is_free_hit: bool) -> bool {
    ball.is_no_ball() || (this_is_free_hit && !is_legal_delivery(ball))
}

/// Dismissals that still stand on a free hit.
pub fn is_wicket_allowed_on_free_hit(kind: &DismissalKind) -> bool {
    matches!(
        kind,
        DismissalKind::RunOut
            | DismissalKind::Stumped
            | DismissalKind::HitWicket
            | DismissalKind::ObstructingTheField
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WicketRecord;

    fn ball() -> BallEvent {
        BallEvent::new(1, "s", "n", "b")
    }

    fn run_out_of(id: &str) -> WicketRecord {
        WicketRecord::new(DismissalKind::RunOut, id)
    }

    #[test]
    fn legality_ignores_a_lying_flag() {
        let mut wide = ball().with_wide(1);
        wide.is_legal = true;
        assert!(!is_legal_delivery(&wide));

        let mut flagged = ball();
        flagged.is_legal = false;
        assert!(!is_legal_delivery(&flagged));

        assert!(is_legal_delivery(&ball().with_leg_byes(1)));
    }

    #[test]
    fn balls_faced_excludes_only_wides() {
        assert!(!counts_toward_balls_faced(&ball().with_wide(1)));
        assert!(counts_toward_balls_faced(&ball().with_no_ball()));
        assert!(counts_toward_balls_faced(&ball().with_byes(2)));
    }

    #[test]
    fn bowler_is_not_charged_byes_or_penalty() {
        assert_eq!(bowler_runs(&ball().with_byes(4)), 0);
        assert_eq!(bowler_runs(&ball().with_leg_byes(1)), 0);
        assert_eq!(bowler_runs(&ball().with_bat_runs(2).with_penalty(5)), 2);
        assert_eq!(bowler_runs(&ball().with_wide(3)), 3);
        assert_eq!(bowler_runs(&ball().with_no_ball().with_bat_runs(4)), 5);
    }

    #[test]
    fn rotation_follows_running_runs() {
        assert!(should_rotate_strike(&ball().with_bat_runs(1)));
        assert!(should_rotate_strike(&ball().with_bat_runs(3)));
        assert!(!should_rotate_strike(&ball().with_bat_runs(4)));
        assert!(!should_rotate_strike(&ball().with_bat_runs(2)));
        assert!(should_rotate_strike(&ball().with_leg_byes(1)));

        // the automatic run on a wide is not run
        assert!(!should_rotate_strike(&ball().with_wide(1)));
        assert!(should_rotate_strike(&ball().with_wide(2)));
        assert!(!should_rotate_strike(&ball().with_wide(5)));

        // no-ball plus one run completed beyond the allowance
        assert!(should_rotate_strike(&ball().with_no_ball().with_running_runs(1)));
        assert!(should_rotate_strike(&ball().with_no_ball().with_bat_runs(1)));
    }

    #[test]
    fn penalty_runs_do_not_rotate() {
        assert!(!should_rotate_strike(&ball().with_penalty(5)));
    }

    #[test]
    fn wicket_ball_never_rotates() {
        let b = ball().with_bat_runs(1).with_wicket(run_out_of("n"));
        assert!(!should_rotate_strike(&b));
    }

    #[test]
    fn wide_run_out_gives_batter_nothing() {
        let b = ball().with_wide(2).with_wicket(run_out_of("s"));
        assert_eq!(batter_runs_credited(&b), 0);
    }

    #[test]
    fn leg_bye_run_out_gives_batter_nothing() {
        let mut b = ball().with_leg_byes(2).with_wicket(run_out_of("s"));
        // inconsistent upstream record still cannot credit the batter
        b.runs_off_bat = 1;
        assert_eq!(batter_runs_credited(&b), 0);
        assert_eq!(batter_runs(&b), 1);
    }

    #[test]
    fn no_ball_run_out_caps_bowler_charge() {
        let b = ball()
            .with_no_ball()
            .with_running_runs(2)
            .with_wicket(run_out_of("s"));
        assert_eq!(b.total_runs, 3);
        assert_eq!(bowler_runs(&b), 3);
        assert_eq!(bowler_runs_charged(&b), 1);

        let with_bat = ball()
            .with_no_ball()
            .with_bat_runs(1)
            .with_wicket(run_out_of("n"));
        assert_eq!(bowler_runs_charged(&with_bat), 2);
    }

    #[test]
    fn credit_comes_from_the_record() {
        let bowled = ball().with_wicket(WicketRecord::new(DismissalKind::Bowled, "s"));
        assert!(wicket_credited_to_bowler(&bowled));

        let overridden = ball().with_wicket(
            WicketRecord::new(DismissalKind::Bowled, "s").with_bowler_credit(false),
        );
        assert!(!wicket_credited_to_bowler(&overridden));
        assert!(!wicket_credited_to_bowler(&ball()));
    }

    #[test]
    fn free_hit_carries_over_illegal_deliveries() {
        assert!(next_ball_is_free_hit(&ball().with_no_ball(), false));
        assert!(next_ball_is_free_hit(&ball().with_wide(1), true));
        assert!(!next_ball_is_free_hit(&ball().with_wide(1), false));
        assert!(!next_ball_is_free_hit(&ball().with_bat_runs(1), true));
    }

    #[test]
    fn free_hit_dismissals() {
        assert!(is_wicket_allowed_on_free_hit(&DismissalKind::RunOut));
        assert!(is_wicket_allowed_on_free_hit(&DismissalKind::ObstructingTheField));
        assert!(!is_wicket_allowed_on_free_hit(&DismissalKind::Bowled));
        assert!(!is_wicket_allowed_on_free_hit(&DismissalKind::Caught));
    }

    #[test]
    fn boundaries() {
        assert!(is_boundary(&ball().with_bat_runs(4)));
        assert!(is_boundary(&ball().with_no_ball().with_bat_runs(6)));
        assert!(!is_boundary(&ball().with_byes(4)));
        assert!(!is_boundary(&ball().with_bat_runs(5)));
    }
}
