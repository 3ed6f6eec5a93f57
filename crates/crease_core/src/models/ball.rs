//! Ball-by-ball delivery records
//!
//! A [`BallEvent`] is produced by the scoring surface and is never mutated by the
//! engine. Decoding is lenient so that legacy documents still load:
//!
//! - camelCase keys (`batsmanId`, `runsOffBat`, `legByes`, `dismissedPlayerId`, ...)
//! - a missing `total_runs` is rebuilt from bat runs + extras
//! - a missing legality flag means "legal"
//! - a missing `credited_to_bowler` follows the convention for the dismissal kind
//!
//! Encoding always emits the canonical snake_case form.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Opaque player identifier. An empty string means "not known".
pub type PlayerId = String;

// ============================================================================
// Extras
// ============================================================================

/// Extras recorded on a single delivery, or accumulated over an innings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extras {
    pub wides: u32,
    #[serde(alias = "noBalls", alias = "noball", alias = "no_ball")]
    pub no_balls: u32,
    #[serde(alias = "bye")]
    pub byes: u32,
    #[serde(alias = "legByes", alias = "legBye", alias = "legbye", alias = "leg_bye")]
    pub leg_byes: u32,
    pub penalty: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides
            .saturating_add(self.no_balls)
            .saturating_add(self.byes)
            .saturating_add(self.leg_byes)
            .saturating_add(self.penalty)
    }

    /// Add another extras record into this one (innings totals).
    pub fn absorb(&mut self, other: &Extras) {
        self.wides = self.wides.saturating_add(other.wides);
        self.no_balls = self.no_balls.saturating_add(other.no_balls);
        self.byes = self.byes.saturating_add(other.byes);
        self.leg_byes = self.leg_byes.saturating_add(other.leg_byes);
        self.penalty = self.penalty.saturating_add(other.penalty);
    }
}

// ============================================================================
// Dismissal taxonomy
// ============================================================================

/// How a batter was dismissed.
///
/// Unknown kinds are preserved verbatim in [`DismissalKind::Other`] so that a
/// re-encoded log is identical to what upstream wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DismissalKind {
    Bowled,
    Caught,
    CaughtAndBowled,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    ObstructingTheField,
    Retired,
    RetiredHurt,
    RetiredOut,
    TimedOut,
    Other(String),
}

impl DismissalKind {
    /// Lenient parse: case, spaces, underscores and hyphens are interchangeable.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        let normalized = lowered
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        match normalized.as_str() {
            "bowled" | "b" => DismissalKind::Bowled,
            "caught" | "c" | "ct" => DismissalKind::Caught,
            "caught-and-bowled" | "caught-&-bowled" | "c&b" | "c-&-b" | "c-and-b" => {
                DismissalKind::CaughtAndBowled
            }
            "lbw" | "leg-before-wicket" => DismissalKind::Lbw,
            "run-out" | "runout" | "ro" => DismissalKind::RunOut,
            "stumped" | "st" => DismissalKind::Stumped,
            "hit-wicket" | "hitwicket" | "hw" => DismissalKind::HitWicket,
            "obstructing-the-field" | "obstructing-field" | "obstructing" => {
                DismissalKind::ObstructingTheField
            }
            "retired" => DismissalKind::Retired,
            "retired-hurt" => DismissalKind::RetiredHurt,
            "retired-out" => DismissalKind::RetiredOut,
            "timed-out" => DismissalKind::TimedOut,
            _ => DismissalKind::Other(raw.trim().to_string()),
        }
    }

    /// Canonical wire code.
    pub fn code(&self) -> &str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::CaughtAndBowled => "caught-and-bowled",
            DismissalKind::Lbw => "lbw",
            DismissalKind::RunOut => "run-out",
            DismissalKind::Stumped => "stumped",
            DismissalKind::HitWicket => "hit-wicket",
            DismissalKind::ObstructingTheField => "obstructing-the-field",
            DismissalKind::Retired => "retired",
            DismissalKind::RetiredHurt => "retired-hurt",
            DismissalKind::RetiredOut => "retired-out",
            DismissalKind::TimedOut => "timed-out",
            DismissalKind::Other(raw) => raw,
        }
    }

    /// Human-readable label used in commentary lines.
    pub fn label(&self) -> &str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::CaughtAndBowled => "caught & bowled",
            DismissalKind::Lbw => "lbw",
            DismissalKind::RunOut => "run out",
            DismissalKind::Stumped => "stumped",
            DismissalKind::HitWicket => "hit wicket",
            DismissalKind::ObstructingTheField => "obstructing the field",
            DismissalKind::Retired => "retired",
            DismissalKind::RetiredHurt => "retired hurt",
            DismissalKind::RetiredOut => "retired out",
            DismissalKind::TimedOut => "timed out",
            DismissalKind::Other(raw) => raw,
        }
    }

    pub fn is_run_out(&self) -> bool {
        matches!(self, DismissalKind::RunOut)
    }

    /// Upstream convention for the "credited to bowler" flag when a record omits it.
    pub fn credited_to_bowler_by_convention(&self) -> bool {
        matches!(
            self,
            DismissalKind::Bowled
                | DismissalKind::Caught
                | DismissalKind::CaughtAndBowled
                | DismissalKind::Lbw
                | DismissalKind::Stumped
                | DismissalKind::HitWicket
        )
    }
}

impl FromStr for DismissalKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DismissalKind::parse(s))
    }
}

impl From<String> for DismissalKind {
    fn from(raw: String) -> Self {
        DismissalKind::parse(&raw)
    }
}

impl From<DismissalKind> for String {
    fn from(kind: DismissalKind) -> Self {
        kind.code().to_string()
    }
}

impl fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Wicket record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "wire::WicketWire")]
pub struct WicketRecord {
    pub kind: DismissalKind,
    pub dismissed_player_id: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder_id: Option<PlayerId>,
    pub credited_to_bowler: bool,
}

impl WicketRecord {
    /// Wicket with the bowler credit taken from the dismissal convention.
    pub fn new(kind: DismissalKind, dismissed_player_id: impl Into<PlayerId>) -> Self {
        let credited_to_bowler = kind.credited_to_bowler_by_convention();
        Self {
            kind,
            dismissed_player_id: dismissed_player_id.into(),
            fielder_id: None,
            credited_to_bowler,
        }
    }

    pub fn with_fielder(mut self, fielder_id: impl Into<PlayerId>) -> Self {
        self.fielder_id = Some(fielder_id.into());
        self
    }

    pub fn with_bowler_credit(mut self, credited: bool) -> Self {
        self.credited_to_bowler = credited;
        self
    }
}

// ============================================================================
// Ball event
// ============================================================================

/// One delivery as recorded by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "wire::BallWire")]
pub struct BallEvent {
    /// Total order key within the innings.
    pub sequence: u64,
    pub striker_id: PlayerId,
    pub non_striker_id: PlayerId,
    pub bowler_id: PlayerId,
    pub runs_off_bat: u32,
    pub extras: Extras,
    /// Everything this delivery added to the team total.
    pub total_runs: u32,
    pub is_legal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wicket: Option<WicketRecord>,
    /// Marked as a free hit by the scorer.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub free_hit: bool,
}

impl BallEvent {
    /// A legal dot ball.
    pub fn new(
        sequence: u64,
        striker_id: impl Into<PlayerId>,
        non_striker_id: impl Into<PlayerId>,
        bowler_id: impl Into<PlayerId>,
    ) -> Self {
        Self {
            sequence,
            striker_id: striker_id.into(),
            non_striker_id: non_striker_id.into(),
            bowler_id: bowler_id.into(),
            runs_off_bat: 0,
            extras: Extras::default(),
            total_runs: 0,
            is_legal: true,
            wicket: None,
            free_hit: false,
        }
    }

    pub fn with_bat_runs(mut self, runs: u32) -> Self {
        self.runs_off_bat = self.runs_off_bat.saturating_add(runs);
        self.total_runs = self.total_runs.saturating_add(runs);
        self
    }

    /// Wide worth `runs` in total (the automatic run plus anything run or overthrown).
    pub fn with_wide(mut self, runs: u32) -> Self {
        self.extras.wides = self.extras.wides.saturating_add(runs);
        self.total_runs = self.total_runs.saturating_add(runs);
        self.is_legal = false;
        self
    }

    /// No-ball carrying the single automatic run.
    pub fn with_no_ball(mut self) -> Self {
        self.extras.no_balls = self.extras.no_balls.saturating_add(1);
        self.total_runs = self.total_runs.saturating_add(1);
        self.is_legal = false;
        self
    }

    pub fn with_byes(mut self, runs: u32) -> Self {
        self.extras.byes = self.extras.byes.saturating_add(runs);
        self.total_runs = self.total_runs.saturating_add(runs);
        self
    }

    pub fn with_leg_byes(mut self, runs: u32) -> Self {
        self.extras.leg_byes = self.extras.leg_byes.saturating_add(runs);
        self.total_runs = self.total_runs.saturating_add(runs);
        self
    }

    pub fn with_penalty(mut self, runs: u32) -> Self {
        self.extras.penalty = self.extras.penalty.saturating_add(runs);
        self.total_runs = self.total_runs.saturating_add(runs);
        self
    }

    /// Runs completed that no extras column records (e.g. running on a no-ball).
    pub fn with_running_runs(mut self, runs: u32) -> Self {
        self.total_runs = self.total_runs.saturating_add(runs);
        self
    }

    pub fn with_wicket(mut self, wicket: WicketRecord) -> Self {
        self.wicket = Some(wicket);
        self
    }

    pub fn with_free_hit(mut self) -> Self {
        self.free_hit = true;
        self
    }

    pub fn is_wide(&self) -> bool {
        self.extras.wides > 0
    }

    pub fn is_no_ball(&self) -> bool {
        self.extras.no_balls > 0
    }

    pub fn is_wicket(&self) -> bool {
        self.wicket.is_some()
    }
}

// ============================================================================
// Lenient wire decoding
// ============================================================================

mod wire {
    use super::{BallEvent, DismissalKind, Extras, PlayerId, WicketRecord};
    use serde::Deserialize;

    fn default_legal() -> bool {
        true
    }

    #[derive(Deserialize)]
    pub(super) struct WicketWire {
        #[serde(alias = "type", alias = "wicketType")]
        kind: DismissalKind,
        #[serde(default, alias = "dismissedPlayerId", alias = "dismissedBatsmanId")]
        dismissed_player_id: PlayerId,
        #[serde(default, alias = "fielderId")]
        fielder_id: Option<PlayerId>,
        #[serde(default, alias = "creditedToBowler")]
        credited_to_bowler: Option<bool>,
    }

    impl From<WicketWire> for WicketRecord {
        fn from(raw: WicketWire) -> Self {
            let credited_to_bowler = raw
                .credited_to_bowler
                .unwrap_or_else(|| raw.kind.credited_to_bowler_by_convention());
            WicketRecord {
                kind: raw.kind,
                dismissed_player_id: raw.dismissed_player_id,
                fielder_id: raw.fielder_id.filter(|id| !id.is_empty()),
                credited_to_bowler,
            }
        }
    }

    #[derive(Deserialize)]
    pub(super) struct BallWire {
        sequence: u64,
        #[serde(default, alias = "batsmanId", alias = "strikerId", alias = "batsman_id")]
        striker_id: PlayerId,
        #[serde(default, alias = "nonStrikerId")]
        non_striker_id: PlayerId,
        #[serde(default, alias = "bowlerId")]
        bowler_id: PlayerId,
        #[serde(default, alias = "runsOffBat", alias = "batRuns")]
        runs_off_bat: u32,
        #[serde(default)]
        extras: Extras,
        #[serde(default, alias = "totalRuns", alias = "runs")]
        total_runs: Option<u32>,
        #[serde(default = "default_legal", alias = "isLegal")]
        is_legal: bool,
        #[serde(default)]
        wicket: Option<WicketRecord>,
        #[serde(default, alias = "freeHit")]
        free_hit: bool,
    }

    impl From<BallWire> for BallEvent {
        fn from(raw: BallWire) -> Self {
            let total_runs = raw
                .total_runs
                .unwrap_or_else(|| raw.runs_off_bat.saturating_add(raw.extras.total()));
            BallEvent {
                sequence: raw.sequence,
                striker_id: raw.striker_id,
                non_striker_id: raw.non_striker_id,
                bowler_id: raw.bowler_id,
                runs_off_bat: raw.runs_off_bat,
                extras: raw.extras,
                total_runs,
                is_legal: raw.is_legal,
                wicket: raw.wicket,
                free_hit: raw.free_hit,
            }
        }
    }
}
