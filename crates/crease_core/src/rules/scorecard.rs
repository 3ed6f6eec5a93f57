//! Scorecard text helpers

use crate::models::{Extras, FallOfWicket};

/// `"7 (4b, 3lb)"`, or `"0"` when there were no extras.
pub fn format_extras(extras: &Extras) -> String {
    let total = extras.total();
    if total == 0 {
        return "0".to_string();
    }

    let parts: Vec<String> = [
        (extras.byes, "b"),
        (extras.leg_byes, "lb"),
        (extras.wides, "w"),
        (extras.no_balls, "nb"),
        (extras.penalty, "p"),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, suffix)| format!("{count}{suffix}"))
    .collect();

    format!("{} ({})", total, parts.join(", "))
}

/// `"120/3"`.
pub fn format_score(runs: u32, wickets: u32) -> String {
    format!("{runs}/{wickets}")
}

/// `"120/3 (12.4)"`.
pub fn format_fall_of_wicket(fow: &FallOfWicket) -> String {
    format!("{} ({})", format_score(fow.runs, fow.wicket), fow.overs)
}

/// Two decimals, or `"-"` when the rate is undefined.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r.is_finite() => format!("{r:.2}"),
        _ => "-".to_string(),
    }
}
