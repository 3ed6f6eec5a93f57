//! Dismissal formatter
//!
//! Maps a dismissal kind plus bowler/fielder display names to the scorecard
//! phrase. Empty names count as missing, and a missing name simply drops its
//! part of the phrase.
//!
//! ## Usage
//! ```ignore
//! let phrase = format_dismissal(&DismissalKind::Caught, Some("Jones"), Some("Smith"));
//! assert_eq!(phrase, "c Smith b Jones");
//! ```

use crate::models::DismissalKind;

pub fn format_dismissal(
    kind: &DismissalKind,
    bowler_name: Option<&str>,
    fielder_name: Option<&str>,
) -> String {
    let bowler = present(bowler_name);
    let fielder = present(fielder_name);

    match kind {
        DismissalKind::Bowled => bowled(bowler),
        DismissalKind::Caught => match (fielder, bowler) {
            (Some(f), Some(b)) => format!("c {f} b {b}"),
            (Some(f), None) => format!("c {f}"),
            (None, Some(b)) => format!("c b {b}"),
            (None, None) => "c".to_string(),
        },
        DismissalKind::CaughtAndBowled => caught_and_bowled(bowler),
        DismissalKind::Lbw => with_bowler("lbw", bowler),
        DismissalKind::RunOut => match fielder {
            Some(f) => format!("run out ({f})"),
            None => "run out".to_string(),
        },
        DismissalKind::Stumped => match fielder {
            Some(f) => with_bowler(&format!("st {f}"), bowler),
            None => with_bowler("st", bowler),
        },
        DismissalKind::HitWicket => with_bowler("hit wicket", bowler),
        DismissalKind::ObstructingTheField
        | DismissalKind::Retired
        | DismissalKind::RetiredHurt
        | DismissalKind::RetiredOut
        | DismissalKind::TimedOut => kind.label().to_string(),
        DismissalKind::Other(_) => bowled(bowler),
    }
}

fn present(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

fn bowled(bowler: Option<&str>) -> String {
    match bowler {
        Some(b) => format!("b {b}"),
        None => "b".to_string(),
    }
}

fn caught_and_bowled(bowler: Option<&str>) -> String {
    match bowler {
        Some(b) => format!("c & b {b}"),
        None => "c & b".to_string(),
    }
}

fn with_bowler(prefix: &str, bowler: Option<&str>) -> String {
    match bowler {
        Some(b) => format!("{prefix} b {b}"),
        None => prefix.to_string(),
    }
}
